//! Integration tests for leg expansion, with substitute collaborators and
//! with the standard ones.

use approx::assert_relative_eq;
use fin_beans::{Bean, BeanBuilder};
use fin_core::Error;
use fin_swap::{
    AccrualPeriodCalculator, AccrualScheduleSource, CompoundingMethod, Currency, LegExpander,
    Notional, NotionalExchange, OvernightIndex, OvernightRateCalculation, OvernightRateSwapLeg,
    PaymentPeriod, PaymentPeriodAssembler, PaymentRelativeTo, PaymentSchedule, PeriodicSchedule,
    RateAccrualPeriod, SwapLeg,
};
use fin_time::{
    BusinessDayAdjustment, BusinessDayConvention, DayCount, Frequency, HolidayCalendar, NaiveDate,
    Schedule,
};
use std::sync::atomic::{AtomicBool, Ordering};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn calculation() -> OvernightRateCalculation {
    OvernightRateCalculation::of(
        Notional::of(Currency::GBP, 10_000_000.0).unwrap(),
        OvernightIndex::GBP_SONIA,
    )
}

fn leg(accrual: PeriodicSchedule, payment: PaymentSchedule) -> OvernightRateSwapLeg {
    OvernightRateSwapLeg::builder()
        .accrual_periods(accrual)
        .payment_periods(payment)
        .calculation(calculation())
        .build()
        .unwrap()
}

fn quarterly_leg() -> OvernightRateSwapLeg {
    leg(
        PeriodicSchedule::of(
            date(2024, 1, 15),
            date(2024, 7, 15),
            Frequency::P3M,
            BusinessDayAdjustment::NONE,
        )
        .unwrap(),
        PaymentSchedule::of(Frequency::P3M),
    )
}

// ───────────────────────────── substitutes ─────────────────────────────

const D1: (i32, u32, u32) = (2024, 1, 15);
const D2: (i32, u32, u32) = (2024, 4, 15);
const D3: (i32, u32, u32) = (2024, 7, 15);

fn fixed_dates() -> Vec<NaiveDate> {
    [D1, D2, D3].iter().map(|&(y, m, d)| date(y, m, d)).collect()
}

/// Ignores the definition and returns `[D1, D2, D3]`.
struct FixedDates;

impl AccrualScheduleSource for FixedDates {
    fn materialize(&self, _definition: &PeriodicSchedule) -> fin_core::Result<Schedule> {
        Schedule::from_dates(fixed_dates())
    }
}

/// One accrual period per schedule period.
struct PerPeriod;

impl AccrualPeriodCalculator for PerPeriod {
    fn compute_accrual_periods(
        &self,
        schedule: &Schedule,
        calculation: &OvernightRateCalculation,
    ) -> fin_core::Result<Vec<RateAccrualPeriod>> {
        Ok(schedule
            .periods()
            .iter()
            .map(|p| RateAccrualPeriod::from_period(p, calculation))
            .collect())
    }
}

/// Always fails.
struct Failing;

impl AccrualPeriodCalculator for Failing {
    fn compute_accrual_periods(
        &self,
        _schedule: &Schedule,
        _calculation: &OvernightRateCalculation,
    ) -> fin_core::Result<Vec<RateAccrualPeriod>> {
        Err(Error::Runtime("no fixings".into()))
    }
}

/// One payment per accrual period, paid at its end; records that it ran.
#[derive(Default)]
struct PassThrough {
    called: AtomicBool,
}

impl PaymentPeriodAssembler for PassThrough {
    fn assemble(
        &self,
        accrual_periods: Vec<RateAccrualPeriod>,
        _schedule: &Schedule,
        _payment_schedule: &PaymentSchedule,
    ) -> fin_core::Result<Vec<PaymentPeriod>> {
        self.called.store(true, Ordering::SeqCst);
        accrual_periods
            .into_iter()
            .map(|a| PaymentPeriod::of(a.end_date(), vec![a], CompoundingMethod::None))
            .collect()
    }
}

// ───────────────────────────── composition ─────────────────────────────

#[test]
fn expansion_composes_the_collaborators() {
    init_tracing();
    let payments = PassThrough::default();
    let expander = LegExpander::new(&FixedDates, &PerPeriod, &payments);

    let expanded = expander.expand(&quarterly_leg()).unwrap();

    let dates = fixed_dates();
    assert!(payments.called.load(Ordering::SeqCst));
    assert_eq!(expanded.payment_period_count(), 2);
    assert_eq!(expanded.notional_exchange(), NotionalExchange::NO_EXCHANGE);
    let periods = expanded.payment_periods();
    assert_eq!(periods[0].start_date(), dates[0]);
    assert_eq!(periods[0].end_date(), dates[1]);
    assert_eq!(periods[1].start_date(), dates[1]);
    assert_eq!(periods[1].end_date(), dates[2]);
    assert_eq!(periods[1].payment_date(), dates[2]);
    assert_eq!(expanded.start_date(), dates[0]);
    assert_eq!(expanded.end_date(), dates[2]);
}

#[test]
fn calculator_failure_is_returned_unchanged() {
    init_tracing();
    let payments = PassThrough::default();
    let expander = LegExpander::new(&FixedDates, &Failing, &payments);

    let err = expander.expand(&quarterly_leg()).unwrap_err();

    assert_eq!(err, Error::Runtime("no fixings".into()));
    assert!(!payments.called.load(Ordering::SeqCst));
}

// ───────────────────────────── standard collaborators ─────────────────────────────

#[test]
fn standard_expansion_end_to_end() {
    init_tracing();
    let x = quarterly_leg();
    let expanded = x.to_expanded().unwrap();
    assert_eq!(expanded, LegExpander::standard().expand(&x).unwrap());
    assert_eq!(expanded.payment_period_count(), 2);
    assert_eq!(expanded.currency(), Currency::GBP);
    assert_eq!(expanded.start_date(), x.start_date());
    assert_eq!(expanded.end_date(), x.end_date());

    let first = &expanded.payment_periods()[0].accrual_periods()[0];
    assert_eq!(first.notional().amount(), 10_000_000.0);
    // 2024-01-15 to 2024-04-15 is 91 days.
    assert_relative_eq!(first.year_fraction(), 91.0 / 365.0, epsilon = 1e-12);
    assert_eq!(first.index(), OvernightIndex::GBP_SONIA);
    assert_eq!(DayCount::Act365F, calculation().day_count());
}

#[test]
fn payment_dates_follow_offset_and_calendar() {
    // 2024-07-15 is a Monday; two business days earlier is Thursday 2024-07-11.
    let accrual = PeriodicSchedule::of(
        date(2024, 1, 15),
        date(2024, 7, 15),
        Frequency::P3M,
        BusinessDayAdjustment::of(BusinessDayConvention::Following, HolidayCalendar::SatSun),
    )
    .unwrap();
    let payment = PaymentSchedule::of(Frequency::P6M)
        .with_offset_days(-2)
        .with_compounding(CompoundingMethod::Straight);
    let expanded = leg(accrual, payment).to_expanded().unwrap();

    assert_eq!(expanded.payment_period_count(), 1);
    let period = &expanded.payment_periods()[0];
    assert_eq!(period.accrual_periods().len(), 2);
    assert_eq!(period.payment_date(), date(2024, 7, 11));
    assert_eq!(period.compounding_method(), CompoundingMethod::Straight);

    let in_advance =
        PaymentSchedule::of(Frequency::P3M).with_relative_to(PaymentRelativeTo::PeriodStart);
    let expanded = leg(*quarterly_leg().accrual_periods(), in_advance).to_expanded().unwrap();
    assert_eq!(expanded.payment_periods()[1].payment_date(), date(2024, 4, 15));
}

#[test]
fn mismatched_payment_frequency_is_rejected() {
    let accrual = PeriodicSchedule::of(
        date(2024, 1, 15),
        date(2025, 1, 15),
        Frequency::P3M,
        BusinessDayAdjustment::NONE,
    )
    .unwrap();
    let err = leg(accrual, PaymentSchedule::of(Frequency::Months(4)))
        .to_expanded()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn zero_length_payment_frequency_fails_expansion() {
    let accrual = *quarterly_leg().accrual_periods();
    for frequency in [Frequency::Months(0), Frequency::Weeks(0), Frequency::Days(0)] {
        let err = leg(accrual, PaymentSchedule::of(frequency))
            .to_expanded()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}

#[test]
fn zero_length_accrual_frequency_is_rejected_up_front() {
    for frequency in [Frequency::Days(0), Frequency::Weeks(0), Frequency::Months(0)] {
        let err = PeriodicSchedule::of(
            date(2024, 1, 15),
            date(2024, 7, 15),
            frequency,
            BusinessDayAdjustment::NONE,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}

#[test]
fn term_payment_covers_every_accrual() {
    let accrual = PeriodicSchedule::of(
        date(2024, 1, 15),
        date(2025, 1, 15),
        Frequency::P3M,
        BusinessDayAdjustment::NONE,
    )
    .unwrap();
    let expanded = leg(accrual, PaymentSchedule::of(Frequency::Term))
        .to_expanded()
        .unwrap();
    assert_eq!(expanded.payment_period_count(), 1);
    assert_eq!(expanded.payment_periods()[0].accrual_periods().len(), 4);
}

// ───────────────────────────── expanded leg bean ─────────────────────────────

#[test]
fn expanded_leg_is_a_bean() {
    let expanded = quarterly_leg().to_expanded().unwrap();
    let names: Vec<_> = fin_swap::ExpandedSwapLeg::meta_bean().property_names().collect();
    assert_eq!(names, ["paymentPeriods", "notionalExchange"]);
    assert_eq!(
        expanded.property("notionalExchange").unwrap().get_string(),
        "NoExchange"
    );

    let mut b = expanded.to_builder();
    assert!(matches!(
        b.set_string("paymentPeriods", "[]"),
        Err(Error::Parse { property: "paymentPeriods", .. })
    ));
    b.set_string("notionalExchange", "Initial+Final").unwrap();
    let exchanged = b.build().unwrap();
    assert_eq!(exchanged.notional_exchange(), NotionalExchange::INITIAL_AND_FINAL);
    assert_eq!(exchanged.payment_periods(), expanded.payment_periods());
    assert_ne!(exchanged, expanded);

    let empty = fin_swap::ExpandedSwapLeg::builder()
        .payment_periods(Vec::<PaymentPeriod>::new())
        .notional_exchange(NotionalExchange::NO_EXCHANGE)
        .build()
        .unwrap_err();
    assert!(matches!(empty, Error::InvalidArgument(_)));
}
