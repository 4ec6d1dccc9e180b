//! GraphQL [`Mutation`]s definitions.

use common::{Date, Money};
use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Records a salary payment of the `Employee` for one of its pay periods.
    ///
    /// The period must match one of the `Employee`'s generated pay periods
    /// exactly. The `paymentDate` defaults to the current date of the server.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EMPLOYEE_NOT_EXISTS` - the `Employee` with the specified ID does
    ///                           not exist;
    /// - `NON_POSITIVE_AMOUNT` - the `netAmount` is zero or negative;
    /// - `PERIOD_NOT_FOUND` - the period is not a pay period of the
    ///                        `Employee`;
    /// - `PERIOD_ALREADY_PAID` - the period is already paid;
    /// - `UNKNOWN_SALARY_TYPE` - the `Employee`'s salary type has no known
    ///                           pay periods.
    #[tracing::instrument(
        skip_all,
        fields(
            employee_id = %employee_id,
            gql.name = "recordPayroll",
            net_amount = %net_amount,
            otel.name = Self::SPAN_NAME,
            payment_date = ?payment_date,
            period_end = %period_end,
            period_start = %period_start,
        ),
    )]
    pub async fn record_payroll(
        employee_id: api::employee::Id,
        period_start: Date,
        period_end: Date,
        net_amount: Money,
        payment_date: Option<Date>,
        ctx: &Context,
    ) -> Result<api::Payroll, Error> {
        let today = ctx.service().today();
        ctx.service()
            .execute(command::RecordPayroll {
                employee_id: employee_id.into(),
                period_start,
                period_end,
                net_amount,
                payment_date: payment_date.unwrap_or(today).coerce(),
                today,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}
