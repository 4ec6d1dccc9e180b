//! GraphQL [`Query`]s definitions.

use common::Date;
use juniper::graphql_object;
use service::{domain, query, read, Query as _};

use crate::{api, error::EmployeeError, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";

    /// Fetches the [`domain::Employee`] with the specified ID.
    ///
    /// # Errors
    ///
    /// If the [`domain::Employee`] doesn't exist or cannot be fetched.
    pub(crate) async fn employee_by_id(
        id: api::employee::Id,
        ctx: &Context,
    ) -> Result<domain::Employee, Error> {
        ctx.service()
            .execute(query::employee::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| EmployeeError::NotExists.into())
            .map_err(ctx.error())
    }
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Employee` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EMPLOYEE_NOT_EXISTS` - the `Employee` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "employee",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn employee(
        id: api::employee::Id,
        ctx: &Context,
    ) -> Result<api::Employee, Error> {
        Self::employee_by_id(id, ctx).await.map(Into::into)
    }

    /// Returns pay periods of the `Employee` with the specified ID, from its
    /// hire date up to 3 months after `today`, reconciled against its
    /// recorded `Payroll`s.
    ///
    /// The current date of the server is used, unless the `today` is
    /// provided.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EMPLOYEE_NOT_EXISTS` - the `Employee` with the specified ID does
    ///                           not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            employee_id = %employee_id,
            gql.name = "paymentPeriods",
            otel.name = Self::SPAN_NAME,
            today = ?today,
        ),
    )]
    pub async fn payment_periods(
        employee_id: api::employee::Id,
        today: Option<Date>,
        ctx: &Context,
    ) -> Result<api::PaymentSchedule, Error> {
        let employee = Self::employee_by_id(employee_id, ctx).await?;
        api::PaymentSchedule::fetch(&employee, today, ctx).await
    }

    /// Returns a human-readable label of the pay period with the specified
    /// boundaries, formatted according to the `salaryType`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "periodLabel",
            otel.name = Self::SPAN_NAME,
            period_end = %period_end,
            period_start = %period_start,
            salary_type = %salary_type,
        ),
    )]
    pub fn period_label(
        period_start: Date,
        period_end: Date,
        salary_type: api::employee::SalaryType,
    ) -> String {
        let salary_type: domain::employee::SalaryType = salary_type.into();
        read::payment_period::label(
            period_start,
            period_end,
            salary_type.cadence(),
        )
    }
}
