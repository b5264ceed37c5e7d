//! `ExpandedSwapLeg` — a swap leg resolved into its payment periods.

use crate::currency::Currency;
use crate::notional_exchange::NotionalExchange;
use crate::payment_period::PaymentPeriod;
use crate::swap_leg::SwapLeg;
use chrono::NaiveDate;
use fin_beans::registry;
use fin_beans::{impl_structural, require, Bean, BeanBuilder, ImmutableList, MetaBean, MetaProperty};
use fin_core::errors::{Error, Result};
use std::sync::{LazyLock, Once};

const BEAN_NAME: &str = "ExpandedSwapLeg";

/// A swap leg whose schedules have been resolved: the ordered payment
/// periods and the notional exchange flags.
///
/// Built through [`ExpandedSwapLegBuilder`]; at least one payment period is
/// required.
#[derive(Debug, Clone)]
pub struct ExpandedSwapLeg {
    payment_periods: ImmutableList<PaymentPeriod>,
    notional_exchange: NotionalExchange,
}

static META: LazyLock<MetaBean<ExpandedSwapLeg>> = LazyLock::new(|| {
    MetaBean::new(
        BEAN_NAME,
        vec![
            MetaProperty::without_string_form(
                BEAN_NAME,
                "paymentPeriods",
                |leg: &ExpandedSwapLeg| &leg.payment_periods,
                |b: &ExpandedSwapLegBuilder| &b.payment_periods,
                |b: &mut ExpandedSwapLegBuilder| &mut b.payment_periods,
            ),
            MetaProperty::of(
                BEAN_NAME,
                "notionalExchange",
                |leg: &ExpandedSwapLeg| &leg.notional_exchange,
                |b: &ExpandedSwapLegBuilder| &b.notional_exchange,
                |b: &mut ExpandedSwapLegBuilder| &mut b.notional_exchange,
            ),
        ],
    )
});
static PUBLISHED: Once = Once::new();

impl ExpandedSwapLeg {
    /// A fresh builder.
    pub fn builder() -> ExpandedSwapLegBuilder {
        ExpandedSwapLegBuilder::new()
    }

    /// The payment periods, in date order.
    pub fn payment_periods(&self) -> &[PaymentPeriod] {
        &self.payment_periods
    }

    /// The notional exchange flags.
    pub fn notional_exchange(&self) -> NotionalExchange {
        self.notional_exchange
    }

    /// Number of payment periods.
    pub fn payment_period_count(&self) -> usize {
        self.payment_periods.len()
    }
}

impl Bean for ExpandedSwapLeg {
    type Builder = ExpandedSwapLegBuilder;

    fn meta_bean() -> &'static MetaBean<Self> {
        registry::publish(&META, &PUBLISHED)
    }
}

impl Eq for ExpandedSwapLeg {}

impl SwapLeg for ExpandedSwapLeg {
    fn start_date(&self) -> NaiveDate {
        self.payment_periods[0].start_date()
    }

    fn end_date(&self) -> NaiveDate {
        self.payment_periods[self.payment_periods.len() - 1].end_date()
    }

    fn currency(&self) -> Currency {
        self.payment_periods[0].currency()
    }

    /// Already expanded: returns a copy.
    fn to_expanded(&self) -> Result<ExpandedSwapLeg> {
        Ok(self.clone())
    }
}

/// Builder for [`ExpandedSwapLeg`].
#[derive(Debug, Clone, Default)]
pub struct ExpandedSwapLegBuilder {
    payment_periods: Option<ImmutableList<PaymentPeriod>>,
    notional_exchange: Option<NotionalExchange>,
}

impl ExpandedSwapLegBuilder {
    /// A builder with every property unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payment periods.
    pub fn payment_periods(
        &mut self,
        periods: impl Into<ImmutableList<PaymentPeriod>>,
    ) -> &mut Self {
        self.payment_periods = Some(periods.into());
        self
    }

    /// Set the notional exchange flags.
    pub fn notional_exchange(&mut self, exchange: NotionalExchange) -> &mut Self {
        self.notional_exchange = Some(exchange);
        self
    }
}

impl BeanBuilder for ExpandedSwapLegBuilder {
    type Bean = ExpandedSwapLeg;

    fn from_bean(bean: &ExpandedSwapLeg) -> Self {
        Self {
            payment_periods: Some(bean.payment_periods.clone()),
            notional_exchange: Some(bean.notional_exchange),
        }
    }

    fn build(&self) -> Result<ExpandedSwapLeg> {
        let payment_periods = require(&self.payment_periods, BEAN_NAME, "paymentPeriods")?;
        let notional_exchange = require(&self.notional_exchange, BEAN_NAME, "notionalExchange")?;
        if payment_periods.is_empty() {
            return Err(Error::invalid("an expanded leg needs at least one payment period"));
        }
        Ok(ExpandedSwapLeg {
            payment_periods,
            notional_exchange,
        })
    }
}

impl_structural!(ExpandedSwapLeg, ExpandedSwapLegBuilder);
