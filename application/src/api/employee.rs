//! [`Employee`]-related definitions.

use common::{Date, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// An [`Employee`] receiving salary payments.
#[derive(Clone, Debug, From, Into)]
pub struct Employee(domain::Employee);

/// An `Employee` receiving salary payments.
#[graphql_object(context = Context)]
impl Employee {
    /// Unique identifier of this `Employee`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Full name of this `Employee`.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Salary type of this `Employee`, defining the length of its pay
    /// periods.
    #[must_use]
    pub fn salary_type(&self) -> SalaryType {
        self.0.salary_type.clone().into()
    }

    /// Salary of this `Employee`.
    #[must_use]
    pub fn salary(&self) -> Money {
        self.0.salary
    }

    /// `Date` when this `Employee` was hired, starting its first pay period.
    #[must_use]
    pub fn hire_date(&self) -> Date {
        self.0.hire_date.coerce()
    }

    /// Recorded `Payroll`s of this `Employee`, ordered by their periods.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.payrolls",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn payrolls(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Payroll>, Error> {
        Ok(ctx
            .service()
            .execute(query::payroll::History::by(self.0.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Pay periods of this `Employee`, reconciled against its recorded
    /// `Payroll`s.
    ///
    /// The current date of the server is used, unless the `today` is
    /// provided.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Employee.paymentPeriods",
            otel.name = api::Query::SPAN_NAME,
            today = ?today,
        ),
    )]
    pub async fn payment_periods(
        &self,
        today: Option<Date>,
        ctx: &Context,
    ) -> Result<api::PaymentSchedule, Error> {
        api::PaymentSchedule::fetch(&self.0, today, ctx).await
    }
}

/// ID of an `Employee`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::employee::Id)]
#[into(domain::employee::Id)]
#[graphql(name = "EmployeeId", transparent)]
pub struct Id(Uuid);

/// Name of an `Employee`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "EmployeeName",
    with = scalar::Text::<domain::employee::Name>,
    parse_token(String),
)]
pub struct Name(domain::employee::Name);

/// Salary type of an `Employee`.
///
/// Known ones are `daily`, `weekly`, `biweekly` and `monthly`, with the
/// legacy `hourly` meaning `weekly`. Any other one produces single-day pay
/// periods.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "SalaryType",
    with = scalar::Text::<domain::employee::SalaryType>,
    parse_token(String),
)]
pub struct SalaryType(domain::employee::SalaryType);
