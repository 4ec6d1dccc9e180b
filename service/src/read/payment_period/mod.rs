//! [`PaymentPeriod`] read model definition.

pub mod label;

use common::{define_kind, Date, DateOf, Money};
use derive_more::{Display, Error};
use smart_default::SmartDefault;

use crate::domain::{employee::Cadence, payroll, Payroll};
#[cfg(doc)]
use crate::domain::Employee;

pub use self::label::label;

/// Pay period of an [`Employee`], reconciled against recorded [`Payroll`]s.
///
/// Computed on demand and never persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentPeriod {
    /// First day of this [`PaymentPeriod`].
    pub period_start: Date,

    /// Last day of this [`PaymentPeriod`], inclusive.
    pub period_end: Date,

    /// [`Status`] of this [`PaymentPeriod`].
    pub status: Status,

    /// ID of the [`Payroll`] paying this [`PaymentPeriod`], if any.
    pub payment_id: Option<payroll::Id>,

    /// Net amount of the [`Payroll`] paying this [`PaymentPeriod`], if any.
    pub net_amount: Option<Money>,

    /// [`Date`] of the [`Payroll`] paying this [`PaymentPeriod`], if any.
    pub payment_date: Option<payroll::PaymentDate>,

    /// Indicator whether today falls within this [`PaymentPeriod`].
    pub is_current: bool,
}

impl PaymentPeriod {
    /// Indicates whether this [`PaymentPeriod`] represents money owed, but
    /// not recorded as paid yet: it's either overdue, or it's the current
    /// pending one.
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        self.payment_id.is_none()
            && match self.status {
                Status::Overdue => true,
                Status::Pending => self.is_current,
                Status::Paid | Status::Upcoming => false,
            }
    }

    /// Indicates whether this [`PaymentPeriod`] may still be picked for a
    /// new [`Payroll`].
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.status != Status::Paid
    }

    /// Returns a human-readable `es-CO` label of this [`PaymentPeriod`].
    ///
    /// See [`label()`] for details.
    #[must_use]
    pub fn label(&self, cadence: Option<Cadence>) -> String {
        label(self.period_start, self.period_end, cadence)
    }
}

define_kind! {
    #[doc = "Status of a [`PaymentPeriod`]."]
    enum Status {
        #[doc = "A [`Payroll`] for the period is recorded."]
        Paid = 1,

        #[doc = "The period is the current one and is not paid yet."]
        Pending = 2,

        #[doc = "The period has ended and is not paid."]
        Overdue = 3,

        #[doc = "The period hasn't started yet."]
        Upcoming = 4,
    }
}

/// Bounds of a [`Schedule`] generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Limits {
    /// Number of calendar months after today to generate periods for.
    #[default(3)]
    pub horizon_months: u32,

    /// Maximum number of periods to generate.
    ///
    /// Reaching it marks the [`Schedule`] as [`truncated`].
    ///
    /// [`truncated`]: Schedule::truncated
    #[default(100)]
    pub max_periods: usize,
}

/// Chronologically ordered, contiguous [`PaymentPeriod`]s of an [`Employee`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Schedule {
    /// Generated [`PaymentPeriod`]s.
    pub periods: Vec<PaymentPeriod>,

    /// Indicator whether the generation stopped at [`Limits::max_periods`]
    /// before reaching the horizon.
    pub truncated: bool,
}

impl Schedule {
    /// Generates the [`Schedule`] of pay periods starting at the `hire_date`
    /// and ending with the last period starting no later than
    /// [`Limits::horizon_months`] after `today`.
    ///
    /// Every period is matched against the provided `payments` by its exact
    /// start and end dates. An unknown `cadence` produces single-day periods.
    ///
    /// # Errors
    ///
    /// If any period boundary falls out of the supported date range.
    pub fn generate<Of: ?Sized>(
        hire_date: DateOf<Of>,
        cadence: Option<Cadence>,
        today: Date,
        payments: &[Payroll],
        limits: Limits,
    ) -> Result<Self, DateOutOfRange> {
        let horizon = today
            .checked_add_months(limits.horizon_months)
            .ok_or(DateOutOfRange(today))?;

        let mut schedule = Self::default();
        let mut start = hire_date.coerce::<()>();
        while start <= horizon {
            if schedule.periods.len() >= limits.max_periods {
                schedule.truncated = true;
                break;
            }

            let end = cadence
                .map_or(Some(start), |c| c.period_end(start))
                .ok_or(DateOutOfRange(start))?;
            let payment = payments.iter().find(|p| p.covers(start, end));
            let is_current = start <= today && today <= end;

            let status = if payment.is_some() {
                Status::Paid
            } else if end < today {
                Status::Overdue
            } else if is_current {
                Status::Pending
            } else {
                Status::Upcoming
            };

            schedule.periods.push(PaymentPeriod {
                period_start: start,
                period_end: end,
                status,
                payment_id: payment.map(|p| p.id),
                net_amount: payment.map(|p| p.net_amount),
                payment_date: payment.map(|p| p.payment_date),
                is_current,
            });

            start = end.next_day().ok_or(DateOutOfRange(end))?;
        }

        Ok(schedule)
    }

    /// Returns the current [`PaymentPeriod`], if today is covered by this
    /// [`Schedule`].
    #[must_use]
    pub fn current(&self) -> Option<&PaymentPeriod> {
        self.periods.iter().find(|p| p.is_current)
    }

    /// Returns the [`PaymentPeriod`] spanning exactly `[start, end]`, if any.
    #[must_use]
    pub fn find(&self, start: Date, end: Date) -> Option<&PaymentPeriod> {
        self.periods
            .iter()
            .find(|p| p.period_start == start && p.period_end == end)
    }

    /// Iterates over the [`PaymentPeriod`]s which may be picked for a new
    /// [`Payroll`].
    pub fn selectable(&self) -> impl Iterator<Item = &PaymentPeriod> + '_ {
        self.periods.iter().filter(|p| p.is_selectable())
    }

    /// Iterates over the outstanding [`PaymentPeriod`]s.
    ///
    /// See [`PaymentPeriod::is_outstanding()`] for details.
    pub fn outstanding(&self) -> impl Iterator<Item = &PaymentPeriod> + '_ {
        self.periods.iter().filter(|p| p.is_outstanding())
    }
}

/// Error of a period boundary falling out of the supported date range.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("period boundary after `{_0}` is out of the supported date range")]
pub struct DateOutOfRange(#[error(not(source))] pub Date);
