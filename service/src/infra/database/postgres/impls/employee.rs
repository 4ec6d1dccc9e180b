//! [`Employee`]-related [`Database`] implementations.

use common::{
    operations::{By, Select},
    Money,
};
use tracerr::Traced;

use crate::{
    domain::{employee, Employee},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Employee>, employee::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Employee>, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, salary_type, \
                   salary, salary_currency, \
                   hire_date \
            FROM employees \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Employee {
                id: row.get("id"),
                name: row.get("name"),
                salary_type: row.get("salary_type"),
                salary: Money {
                    amount: row.get("salary"),
                    currency: row.get("salary_currency"),
                },
                hire_date: row.get("hire_date"),
            }))
    }
}
