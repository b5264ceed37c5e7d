//! Expansion of a swap leg into its payment periods.
//!
//! [`LegExpander`] drives three collaborators in sequence: the accrual
//! schedule is materialized, accrual periods are computed against it, and
//! the accrual periods are grouped into payments.  Each collaborator sits
//! behind a trait so that expansion can be exercised with substitutes;
//! [`LegExpander::standard`] wires in the implementations provided by the
//! definitions themselves.

use crate::accrual::RateAccrualPeriod;
use crate::calculation::OvernightRateCalculation;
use crate::expanded::ExpandedSwapLeg;
use crate::notional_exchange::NotionalExchange;
use crate::payment_period::PaymentPeriod;
use crate::payment_schedule::PaymentSchedule;
use crate::periodic_schedule::PeriodicSchedule;
use crate::swap_leg::OvernightRateSwapLeg;
use fin_beans::BeanBuilder;
use fin_core::errors::Result;
use fin_time::Schedule;

/// Turns an accrual schedule definition into concrete dates.
pub trait AccrualScheduleSource: Send + Sync {
    /// Generate the schedule described by `definition`.
    fn materialize(&self, definition: &PeriodicSchedule) -> Result<Schedule>;
}

/// Computes the accrual periods of a schedule.
pub trait AccrualPeriodCalculator: Send + Sync {
    /// One accrual period per period of `schedule`, resolved against
    /// `calculation`.
    fn compute_accrual_periods(
        &self,
        schedule: &Schedule,
        calculation: &OvernightRateCalculation,
    ) -> Result<Vec<RateAccrualPeriod>>;
}

/// Groups accrual periods into payment periods.
pub trait PaymentPeriodAssembler: Send + Sync {
    /// Assemble the payment periods of `accrual_periods`.
    fn assemble(
        &self,
        accrual_periods: Vec<RateAccrualPeriod>,
        schedule: &Schedule,
        payment_schedule: &PaymentSchedule,
    ) -> Result<Vec<PaymentPeriod>>;
}

/// The collaborators backed by the definitions' own operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCollaborators;

impl AccrualScheduleSource for StandardCollaborators {
    fn materialize(&self, definition: &PeriodicSchedule) -> Result<Schedule> {
        definition.create_schedule()
    }
}

impl AccrualPeriodCalculator for StandardCollaborators {
    fn compute_accrual_periods(
        &self,
        schedule: &Schedule,
        calculation: &OvernightRateCalculation,
    ) -> Result<Vec<RateAccrualPeriod>> {
        calculation.create_accrual_periods(schedule)
    }
}

impl PaymentPeriodAssembler for StandardCollaborators {
    fn assemble(
        &self,
        accrual_periods: Vec<RateAccrualPeriod>,
        schedule: &Schedule,
        payment_schedule: &PaymentSchedule,
    ) -> Result<Vec<PaymentPeriod>> {
        payment_schedule.create_payment_periods(accrual_periods, schedule)
    }
}

static STANDARD: StandardCollaborators = StandardCollaborators;

/// Expands swap legs using a fixed set of collaborators.
///
/// Stateless: an expander can be shared and reused freely.
#[derive(Clone, Copy)]
pub struct LegExpander<'a> {
    schedules: &'a dyn AccrualScheduleSource,
    accruals: &'a dyn AccrualPeriodCalculator,
    payments: &'a dyn PaymentPeriodAssembler,
}

impl<'a> LegExpander<'a> {
    /// An expander over the given collaborators.
    pub fn new(
        schedules: &'a dyn AccrualScheduleSource,
        accruals: &'a dyn AccrualPeriodCalculator,
        payments: &'a dyn PaymentPeriodAssembler,
    ) -> Self {
        Self {
            schedules,
            accruals,
            payments,
        }
    }
}

impl LegExpander<'static> {
    /// An expander over [`StandardCollaborators`].
    pub fn standard() -> Self {
        Self::new(&STANDARD, &STANDARD, &STANDARD)
    }
}

impl LegExpander<'_> {
    /// Expand `leg`.
    ///
    /// The first collaborator failure is returned unchanged and later
    /// collaborators are not called.  Notional exchange is not computed:
    /// the result always carries [`NotionalExchange::NO_EXCHANGE`].
    pub fn expand(&self, leg: &OvernightRateSwapLeg) -> Result<ExpandedSwapLeg> {
        let schedule = self.schedules.materialize(leg.accrual_periods())?;
        tracing::debug!(periods = schedule.period_count(), "accrual schedule materialized");

        let accrual_periods = self
            .accruals
            .compute_accrual_periods(&schedule, leg.calculation())?;
        tracing::debug!(accrual_periods = accrual_periods.len(), "accrual periods computed");

        let payment_periods = self
            .payments
            .assemble(accrual_periods, &schedule, leg.payment_periods())?;
        tracing::debug!(payment_periods = payment_periods.len(), "payment periods assembled");

        ExpandedSwapLeg::builder()
            .payment_periods(payment_periods)
            .notional_exchange(NotionalExchange::NO_EXCHANGE)
            .build()
    }
}

impl std::fmt::Debug for LegExpander<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LegExpander").finish_non_exhaustive()
    }
}
