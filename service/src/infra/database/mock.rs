//! In-memory [`Database`] for tests.

use std::sync::{Arc, Mutex, MutexGuard};

use common::{
    money::Currency,
    operations::{By, Commit, Insert, Select, Transact},
    Date, Money,
};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{employee, payroll, Employee, Payroll},
    infra::{database, Database},
};

/// In-memory [`Database`] sharing its state between clones.
#[derive(Clone, Debug, Default)]
pub(crate) struct MockDb(Arc<Mutex<State>>);

/// State of a [`MockDb`].
#[derive(Debug, Default)]
struct State {
    employees: Vec<Employee>,
    payrolls: Vec<Payroll>,
    unavailable: bool,
    commits: usize,
}

impl MockDb {
    /// Creates a new [`MockDb`] failing to fetch any [`Payroll`] history.
    #[cfg(feature = "postgres")]
    pub(crate) fn unavailable() -> Self {
        let db = Self::default();
        db.state().unavailable = true;
        db
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().unwrap()
    }

    /// Adds a new [`Employee`] with the provided salary type hired at the
    /// provided `YYYY-MM-DD` date.
    pub(crate) fn add_employee(
        &self,
        salary_type: &str,
        hire_date: &str,
    ) -> employee::Id {
        let id = employee::Id::new();
        self.state().employees.push(Employee {
            id,
            name: employee::Name::new("Ana María").unwrap(),
            salary_type: employee::SalaryType::new(salary_type).unwrap(),
            salary: Money::new(Decimal::new(2_600_000, 0), Currency::Cop),
            hire_date: Date::from_iso(hire_date).unwrap().coerce(),
        });
        id
    }

    /// Adds a new paid [`Payroll`] of the provided [`Employee`] for the
    /// `[start, end]` period.
    pub(crate) fn add_payroll(
        &self,
        employee_id: employee::Id,
        start: &str,
        end: &str,
    ) -> payroll::Id {
        let end = Date::from_iso(end).unwrap();
        let id = payroll::Id::new();
        self.state().payrolls.push(Payroll {
            id,
            employee_id,
            period_start: Date::from_iso(start).unwrap(),
            period_end: end,
            net_amount: Money::new(Decimal::new(1_300_000, 0), Currency::Cop),
            payment_date: end.coerce(),
            status: payroll::Status::Paid,
        });
        id
    }

    /// Returns all the stored [`Payroll`]s.
    pub(crate) fn payrolls(&self) -> Vec<Payroll> {
        self.state().payrolls.clone()
    }

    /// Returns the number of committed transactions.
    pub(crate) fn commits(&self) -> usize {
        self.state().commits
    }
}

impl Database<Select<By<Option<Employee>, employee::Id>>> for MockDb {
    type Ok = Option<Employee>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Employee>, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.state().employees.iter().find(|e| e.id == id).cloned())
    }
}

impl Database<Select<By<Vec<Payroll>, employee::Id>>> for MockDb {
    type Ok = Vec<Payroll>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payroll>, employee::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let employee_id = by.into_inner();
        let state = self.state();
        if state.unavailable {
            #[cfg(feature = "postgres")]
            return Err(tracerr::new!(database::Error::from(
                database::postgres::Error::PoolError(
                    deadpool_postgres::PoolError::Closed,
                ),
            )));
        }
        let mut payrolls = state
            .payrolls
            .iter()
            .filter(|p| p.employee_id == employee_id)
            .cloned()
            .collect::<Vec<_>>();
        payrolls.sort_by_key(|p| p.period_start);
        Ok(payrolls)
    }
}

impl Database<Transact> for MockDb {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Insert<Payroll>> for MockDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(payroll): Insert<Payroll>,
    ) -> Result<Self::Ok, Self::Err> {
        self.state().payrolls.push(payroll);
        Ok(())
    }
}

impl Database<Commit> for MockDb {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.state().commits += 1;
        Ok(())
    }
}
