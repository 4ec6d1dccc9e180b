//! [`Payroll`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select},
    Money,
};
use tracerr::Traced;

use crate::{
    domain::{employee, Payroll},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Vec<Payroll>, employee::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Payroll>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payroll>, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let employee_id = by.into_inner();

        const SQL: &str = "\
            SELECT id, employee_id, \
                   period_start, period_end, \
                   net_amount, net_amount_currency, \
                   payment_date, status \
            FROM payroll \
            WHERE employee_id = $1::UUID \
            ORDER BY period_start, id";
        Ok(self
            .query(SQL, &[&employee_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Payroll {
                id: row.get("id"),
                employee_id: row.get("employee_id"),
                period_start: row.get("period_start"),
                period_end: row.get("period_end"),
                net_amount: Money {
                    amount: row.get("net_amount"),
                    currency: row.get("net_amount_currency"),
                },
                payment_date: row.get("payment_date"),
                status: row.get("status"),
            })
            .collect())
    }
}

impl<C> Database<Insert<Payroll>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(payroll): Insert<Payroll>,
    ) -> Result<Self::Ok, Self::Err> {
        let Payroll {
            id,
            employee_id,
            period_start,
            period_end,
            net_amount,
            payment_date,
            status,
        } = payroll;

        const SQL: &str = "\
            INSERT INTO payroll (id, employee_id, \
                                 period_start, period_end, \
                                 net_amount, net_amount_currency, \
                                 payment_date, status) \
            VALUES ($1::UUID, $2::UUID, \
                    $3::DATE, $4::DATE, \
                    $5::NUMERIC, $6::INT2, \
                    $7::DATE, $8::INT2)";
        self.exec(
            SQL,
            &[
                &id,
                &employee_id,
                &period_start,
                &period_end,
                &net_amount.amount,
                &net_amount.currency,
                &payment_date,
                &status,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
