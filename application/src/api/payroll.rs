//! [`Payroll`]-related definitions.

use common::{Date, Money};
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, Context};

/// Recorded salary payment of an [`api::Employee`].
#[derive(Clone, Debug, From, Into)]
pub struct Payroll(domain::Payroll);

/// Recorded salary payment of an `Employee` for one of its pay periods.
#[graphql_object(context = Context)]
impl Payroll {
    /// Unique identifier of this `Payroll`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// ID of the paid `Employee`.
    #[must_use]
    pub fn employee_id(&self) -> api::employee::Id {
        self.0.employee_id.into()
    }

    /// First day of the paid period.
    #[must_use]
    pub fn period_start(&self) -> Date {
        self.0.period_start
    }

    /// Last day of the paid period, inclusive.
    #[must_use]
    pub fn period_end(&self) -> Date {
        self.0.period_end
    }

    /// Amount paid out after deductions.
    #[must_use]
    pub fn net_amount(&self) -> Money {
        self.0.net_amount
    }

    /// `Date` when the payment was made.
    #[must_use]
    pub fn payment_date(&self) -> Date {
        self.0.payment_date.coerce()
    }

    /// Status of this `Payroll`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }
}

/// ID of a `Payroll`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::payroll::Id)]
#[into(domain::payroll::Id)]
#[graphql(name = "PayrollId", transparent)]
pub struct Id(Uuid);

/// Status of a `Payroll`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "PayrollStatus")]
pub enum Status {
    /// The payment is made.
    Paid,

    /// The payment is registered, but not made yet.
    Pending,
}

impl From<domain::payroll::Status> for Status {
    fn from(status: domain::payroll::Status) -> Self {
        use domain::payroll::Status as S;
        match status {
            S::Paid => Self::Paid,
            S::Pending => Self::Pending,
        }
    }
}
