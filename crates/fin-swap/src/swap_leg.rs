//! `OvernightRateSwapLeg` — a floating leg paying an overnight rate.
//!
//! The leg is an immutable bean of three definitions: the accrual schedule,
//! the payment schedule and the rate calculation.  It is created through
//! [`OvernightRateSwapLegBuilder`], introspected through its meta-bean and
//! resolved into payment periods by [`SwapLeg::to_expanded`].
//!
//! ```
//! use fin_beans::{Bean, BeanBuilder};
//! use fin_swap::{
//!     Currency, Notional, OvernightIndex, OvernightRateCalculation, OvernightRateSwapLeg,
//!     PaymentSchedule, PeriodicSchedule, SwapLeg,
//! };
//! use fin_time::{BusinessDayAdjustment, Frequency, NaiveDate};
//!
//! let leg = OvernightRateSwapLeg::builder()
//!     .accrual_periods(
//!         PeriodicSchedule::of(
//!             NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
//!             NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
//!             Frequency::P3M,
//!             BusinessDayAdjustment::NONE,
//!         )
//!         .unwrap(),
//!     )
//!     .payment_periods(PaymentSchedule::of(Frequency::P3M))
//!     .calculation(OvernightRateCalculation::of(
//!         Notional::of(Currency::GBP, 1e6).unwrap(),
//!         OvernightIndex::GBP_SONIA,
//!     ))
//!     .build()
//!     .unwrap();
//! assert_eq!(leg.to_expanded().unwrap().payment_period_count(), 4);
//! ```

use crate::calculation::OvernightRateCalculation;
use crate::currency::Currency;
use crate::expanded::ExpandedSwapLeg;
use crate::expansion::LegExpander;
use crate::payment_schedule::PaymentSchedule;
use crate::periodic_schedule::PeriodicSchedule;
use chrono::NaiveDate;
use fin_beans::registry;
use fin_beans::{impl_structural, require, Bean, BeanBuilder, MetaBean, MetaProperty};
use fin_core::errors::Result;
use std::sync::{LazyLock, Once};

/// Behaviour shared by every kind of swap leg.
pub trait SwapLeg {
    /// First adjusted accrual date.
    fn start_date(&self) -> NaiveDate;

    /// Last adjusted accrual date.
    fn end_date(&self) -> NaiveDate;

    /// Currency of the payments.
    fn currency(&self) -> Currency;

    /// Resolve the leg into its payment periods.
    fn to_expanded(&self) -> Result<ExpandedSwapLeg>;
}

const BEAN_NAME: &str = "OvernightRateSwapLeg";

/// A swap leg paying an overnight rate.
#[derive(Debug, Clone)]
pub struct OvernightRateSwapLeg {
    accrual_periods: PeriodicSchedule,
    payment_periods: PaymentSchedule,
    calculation: OvernightRateCalculation,
}

static META: LazyLock<MetaBean<OvernightRateSwapLeg>> = LazyLock::new(|| {
    MetaBean::new(
        BEAN_NAME,
        vec![
            MetaProperty::of(
                BEAN_NAME,
                "accrualPeriods",
                |leg: &OvernightRateSwapLeg| &leg.accrual_periods,
                |b: &OvernightRateSwapLegBuilder| &b.accrual_periods,
                |b: &mut OvernightRateSwapLegBuilder| &mut b.accrual_periods,
            ),
            MetaProperty::of(
                BEAN_NAME,
                "paymentPeriods",
                |leg: &OvernightRateSwapLeg| &leg.payment_periods,
                |b: &OvernightRateSwapLegBuilder| &b.payment_periods,
                |b: &mut OvernightRateSwapLegBuilder| &mut b.payment_periods,
            ),
            MetaProperty::of(
                BEAN_NAME,
                "calculation",
                |leg: &OvernightRateSwapLeg| &leg.calculation,
                |b: &OvernightRateSwapLegBuilder| &b.calculation,
                |b: &mut OvernightRateSwapLegBuilder| &mut b.calculation,
            ),
        ],
    )
});
static PUBLISHED: Once = Once::new();

impl OvernightRateSwapLeg {
    /// A fresh builder with every property unset.
    pub fn builder() -> OvernightRateSwapLegBuilder {
        OvernightRateSwapLegBuilder::new()
    }

    /// The accrual schedule definition.
    pub fn accrual_periods(&self) -> &PeriodicSchedule {
        &self.accrual_periods
    }

    /// The payment schedule definition.
    pub fn payment_periods(&self) -> &PaymentSchedule {
        &self.payment_periods
    }

    /// The rate calculation.
    pub fn calculation(&self) -> &OvernightRateCalculation {
        &self.calculation
    }
}

impl Bean for OvernightRateSwapLeg {
    type Builder = OvernightRateSwapLegBuilder;

    fn meta_bean() -> &'static MetaBean<Self> {
        registry::publish(&META, &PUBLISHED)
    }
}

// `OvernightRateCalculation` holds floats, but they are required finite.
impl Eq for OvernightRateSwapLeg {}

impl SwapLeg for OvernightRateSwapLeg {
    fn start_date(&self) -> NaiveDate {
        self.accrual_periods.adjusted_start_date()
    }

    fn end_date(&self) -> NaiveDate {
        self.accrual_periods.adjusted_end_date()
    }

    fn currency(&self) -> Currency {
        self.calculation.notional().currency()
    }

    fn to_expanded(&self) -> Result<ExpandedSwapLeg> {
        LegExpander::standard().expand(self)
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`OvernightRateSwapLeg`].
#[derive(Debug, Clone, Default)]
pub struct OvernightRateSwapLegBuilder {
    accrual_periods: Option<PeriodicSchedule>,
    payment_periods: Option<PaymentSchedule>,
    calculation: Option<OvernightRateCalculation>,
}

impl OvernightRateSwapLegBuilder {
    /// A builder with every property unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accrual schedule definition.
    pub fn accrual_periods(&mut self, accrual_periods: PeriodicSchedule) -> &mut Self {
        self.accrual_periods = Some(accrual_periods);
        self
    }

    /// Set the payment schedule definition.
    pub fn payment_periods(&mut self, payment_periods: PaymentSchedule) -> &mut Self {
        self.payment_periods = Some(payment_periods);
        self
    }

    /// Set the rate calculation.
    pub fn calculation(&mut self, calculation: OvernightRateCalculation) -> &mut Self {
        self.calculation = Some(calculation);
        self
    }
}

impl BeanBuilder for OvernightRateSwapLegBuilder {
    type Bean = OvernightRateSwapLeg;

    fn from_bean(bean: &OvernightRateSwapLeg) -> Self {
        Self {
            accrual_periods: Some(bean.accrual_periods),
            payment_periods: Some(bean.payment_periods),
            calculation: Some(bean.calculation),
        }
    }

    fn build(&self) -> Result<OvernightRateSwapLeg> {
        Ok(OvernightRateSwapLeg {
            accrual_periods: require(&self.accrual_periods, BEAN_NAME, "accrualPeriods")?,
            payment_periods: require(&self.payment_periods, BEAN_NAME, "paymentPeriods")?,
            calculation: require(&self.calculation, BEAN_NAME, "calculation")?,
        })
    }
}

impl_structural!(OvernightRateSwapLeg, OvernightRateSwapLegBuilder);
