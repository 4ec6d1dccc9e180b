//! [`PaymentPeriod`]-related definitions.

use common::{Date, Money};
use juniper::{graphql_object, GraphQLEnum};
use service::{
    domain::{self, employee::Cadence},
    query::{self, payment_periods::Output},
    read, Query as _,
};

use crate::{api, AsError, Context, Error};

/// Pay periods of an [`api::Employee`], reconciled against its recorded
/// [`api::Payroll`]s.
#[derive(Debug)]
pub struct PaymentSchedule {
    /// [`Output`] of the generation.
    output: Output,

    /// [`Cadence`] the periods were generated with.
    cadence: Option<Cadence>,
}

impl PaymentSchedule {
    /// Generates the [`PaymentSchedule`] of the provided [`domain::Employee`].
    ///
    /// Uses the current [`Date`] of the [`Service`] if `today` is [`None`].
    ///
    /// # Errors
    ///
    /// If pay periods cannot be generated.
    ///
    /// [`Service`]: crate::Service
    pub(crate) async fn fetch(
        employee: &domain::Employee,
        today: Option<Date>,
        ctx: &Context,
    ) -> Result<Self, Error> {
        let output = ctx
            .service()
            .execute(query::PaymentPeriods {
                employee_id: employee.id,
                salary_type: employee.salary_type.clone(),
                hire_date: employee.hire_date,
                today: today.unwrap_or_else(|| ctx.service().today()),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        Ok(Self {
            output,
            cadence: employee.cadence(),
        })
    }

    /// Wraps the provided [`read::PaymentPeriod`]s into [`PaymentPeriod`]s.
    fn wrap<'a>(
        &self,
        periods: impl IntoIterator<Item = &'a read::PaymentPeriod>,
    ) -> Vec<PaymentPeriod> {
        periods
            .into_iter()
            .map(|p| PaymentPeriod {
                period: p.clone(),
                cadence: self.cadence,
            })
            .collect()
    }
}

/// Pay periods of an `Employee`, reconciled against its recorded `Payroll`s.
#[graphql_object(context = Context)]
impl PaymentSchedule {
    /// All the generated periods, in chronological order, starting at the
    /// hire date.
    #[must_use]
    pub fn periods(&self) -> Vec<PaymentPeriod> {
        self.wrap(&self.output.schedule().periods)
    }

    /// Periods which can still be picked for a new `Payroll`.
    #[must_use]
    pub fn selectable_periods(&self) -> Vec<PaymentPeriod> {
        self.wrap(self.output.schedule().selectable())
    }

    /// Unpaid periods which are either `OVERDUE` or the current `PENDING` one.
    #[must_use]
    pub fn outstanding_periods(&self) -> Vec<PaymentPeriod> {
        self.wrap(self.output.schedule().outstanding())
    }

    /// Period containing the requested date, if any.
    #[must_use]
    pub fn current_period(&self) -> Option<PaymentPeriod> {
        self.wrap(self.output.schedule().current()).pop()
    }

    /// Indicator whether the generation stopped at its maximum number of
    /// periods before reaching the horizon.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.output.schedule().truncated
    }

    /// Indicator whether the `Payroll` history was unavailable, so every
    /// period is reported as unpaid.
    #[must_use]
    pub fn degraded(&self) -> bool {
        self.output.degradation().is_some()
    }

    /// Reason of the `Payroll` history being unavailable, if it was.
    #[must_use]
    pub fn degradation_reason(&self) -> Option<String> {
        self.output.degradation().map(|e| e.as_ref().to_string())
    }
}

/// Single pay period of an [`api::Employee`].
#[derive(Clone, Debug)]
pub struct PaymentPeriod {
    /// Underlying [`read::PaymentPeriod`].
    period: read::PaymentPeriod,

    /// [`Cadence`] to label this [`PaymentPeriod`] with.
    cadence: Option<Cadence>,
}

/// Single pay period of an `Employee`.
#[graphql_object(context = Context)]
impl PaymentPeriod {
    /// First day of this `PaymentPeriod`.
    #[must_use]
    pub fn period_start(&self) -> Date {
        self.period.period_start
    }

    /// Last day of this `PaymentPeriod`, inclusive.
    #[must_use]
    pub fn period_end(&self) -> Date {
        self.period.period_end
    }

    /// Status of this `PaymentPeriod`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.period.status.into()
    }

    /// ID of the `Payroll` paying this `PaymentPeriod`, if any.
    #[must_use]
    pub fn payment_id(&self) -> Option<api::payroll::Id> {
        self.period.payment_id.map(Into::into)
    }

    /// Net amount paid for this `PaymentPeriod`, if any.
    #[must_use]
    pub fn net_amount(&self) -> Option<Money> {
        self.period.net_amount
    }

    /// `Date` when this `PaymentPeriod` was paid, if it was.
    #[must_use]
    pub fn payment_date(&self) -> Option<Date> {
        self.period.payment_date.map(|d| d.coerce())
    }

    /// Indicator whether the requested date falls within this
    /// `PaymentPeriod`.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.period.is_current
    }

    /// Indicator whether this `PaymentPeriod` can still be picked for a new
    /// `Payroll`.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.period.is_selectable()
    }

    /// Indicator whether this `PaymentPeriod` is owed, but not paid yet.
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        self.period.is_outstanding()
    }

    /// Human-readable label of this `PaymentPeriod`.
    #[must_use]
    pub fn label(&self) -> String {
        self.period.label(self.cadence)
    }
}

/// Status of a `PaymentPeriod`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "PaymentPeriodStatus")]
pub enum Status {
    /// A `Payroll` for the period is recorded.
    Paid,

    /// The period is the current one and is not paid yet.
    Pending,

    /// The period has ended and is not paid.
    Overdue,

    /// The period hasn't started yet.
    Upcoming,
}

impl From<read::payment_period::Status> for Status {
    fn from(status: read::payment_period::Status) -> Self {
        use read::payment_period::Status as S;
        match status {
            S::Paid => Self::Paid,
            S::Pending => Self::Pending,
            S::Overdue => Self::Overdue,
            S::Upcoming => Self::Upcoming,
        }
    }
}
