//! [`Payroll`] definitions.

use common::{define_kind, unit, Date, DateOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::employee;
#[cfg(doc)]
use crate::domain::Employee;

/// Recorded salary payment of an [`Employee`] for a single pay period.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payroll {
    /// ID of this [`Payroll`].
    pub id: Id,

    /// ID of the paid [`Employee`].
    pub employee_id: employee::Id,

    /// First day of the paid period.
    pub period_start: Date,

    /// Last day of the paid period, inclusive.
    pub period_end: Date,

    /// Amount paid out after deductions.
    pub net_amount: Money,

    /// [`Date`] when the payment was made.
    pub payment_date: PaymentDate,

    /// [`Status`] of this [`Payroll`].
    pub status: Status,
}

impl Payroll {
    /// Indicates whether this [`Payroll`] pays exactly the period
    /// `[start, end]`.
    #[must_use]
    pub fn covers(&self, start: Date, end: Date) -> bool {
        self.period_start == start && self.period_end == end
    }
}

/// ID of a [`Payroll`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_kind! {
    #[doc = "Status of a [`Payroll`] record."]
    enum Status {
        #[doc = "Payment has been made."]
        Paid = 1,

        #[doc = "Payment is registered, but not made yet."]
        Pending = 2,
    }
}

/// [`Date`] when a [`Payroll`] was paid.
pub type PaymentDate = DateOf<(Payroll, unit::Payment)>;
