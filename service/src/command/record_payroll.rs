//! [`Command`] for recording a new [`Payroll`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    Date, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{employee, payroll, Employee, Payroll},
    infra::{database, Database},
    read::payment_period::{DateOutOfRange, Schedule},
    Service,
};

use super::Command;

/// [`Command`] for recording a salary payment of an [`Employee`] for one of
/// its unpaid pay periods.
#[derive(Clone, Debug)]
pub struct RecordPayroll {
    /// ID of the paid [`Employee`].
    pub employee_id: employee::Id,

    /// First day of the paid period.
    pub period_start: Date,

    /// Last day of the paid period, inclusive.
    pub period_end: Date,

    /// Amount paid out after deductions.
    pub net_amount: Money,

    /// [`Date`] when the payment was made.
    pub payment_date: payroll::PaymentDate,

    /// [`Date`] to generate the pay periods against.
    pub today: Date,
}

impl<Db> Command<RecordPayroll> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Employee>, employee::Id>>,
            Ok = Option<Employee>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Payroll>, employee::Id>>,
            Ok = Vec<Payroll>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<Insert<Payroll>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Payroll;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RecordPayroll) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RecordPayroll {
            employee_id,
            period_start,
            period_end,
            net_amount,
            payment_date,
            today,
        } = cmd;

        if !net_amount.is_positive() {
            return Err(tracerr::new!(E::NonPositiveAmount(net_amount)));
        }

        let employee = self
            .database()
            .execute(Select(By::<Option<Employee>, _>::new(employee_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::EmployeeNotExists(employee_id))
            .map_err(tracerr::wrap!())?;
        let cadence = employee
            .cadence()
            .ok_or_else(|| E::UnknownSalaryType(employee.salary_type.clone()))
            .map_err(tracerr::wrap!())?;

        // No fallback to an empty history here: a period must not be paid
        // twice.
        let history = self
            .database()
            .execute(Select(By::<Vec<Payroll>, _>::new(employee.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let schedule = Schedule::generate(
            employee.hire_date,
            Some(cadence),
            today,
            &history,
            self.config().limits,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        let period = schedule
            .find(period_start, period_end)
            .ok_or(E::PeriodNotFound {
                start: period_start,
                end: period_end,
            })
            .map_err(tracerr::wrap!())?;
        if let Some(id) = period.payment_id {
            return Err(tracerr::new!(E::PeriodAlreadyPaid(id)));
        }

        let payroll = Payroll {
            id: payroll::Id::new(),
            employee_id: employee.id,
            period_start,
            period_end,
            net_amount,
            payment_date,
            status: payroll::Status::Paid,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(payroll.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "recorded `Payroll(id: {})` of `Employee(id: {})` for \
             {period_start}..={period_end}",
            payroll.id,
            payroll.employee_id,
        );

        Ok(payroll)
    }
}

/// Error of [`RecordPayroll`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Pay periods of the [`Employee`] cannot be generated.
    #[display("Failed to generate pay periods: {_0}")]
    #[from]
    DateOutOfRange(DateOutOfRange),

    /// [`Employee`] with the provided ID does not exist.
    #[display("`Employee(id: {_0})` does not exist")]
    EmployeeNotExists(#[error(not(source))] employee::Id),

    /// Paid amount is zero or negative.
    #[display("`{_0}` is not a positive amount")]
    NonPositiveAmount(#[error(not(source))] Money),

    /// Requested period is already paid by another [`Payroll`].
    #[display("Period is already paid by `Payroll(id: {_0})`")]
    PeriodAlreadyPaid(#[error(not(source))] payroll::Id),

    /// Requested period doesn't match any pay period of the [`Employee`].
    #[display("`{start}..={end}` is not a pay period of the `Employee`")]
    PeriodNotFound {
        /// First day of the requested period.
        start: Date,

        /// Last day of the requested period.
        end: Date,
    },

    /// [`Employee`]'s salary type has no known pay periods.
    #[display("`{_0}` salary type has no known pay periods")]
    UnknownSalaryType(#[error(not(source))] employee::SalaryType),
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Date, Money};
    use rust_decimal::Decimal;

    use crate::{
        infra::database::mock::MockDb,
        query::PaymentPeriods,
        read::payment_period::Status,
        Command as _, Config, Query as _, Service,
    };

    use super::{ExecutionError, RecordPayroll};

    fn date(s: &str) -> Date {
        Date::from_iso(s).unwrap()
    }

    fn cop(amount: i64) -> Money {
        Money::new(Decimal::new(amount, 0), Currency::Cop)
    }

    fn record(
        employee_id: crate::domain::employee::Id,
        start: &str,
        end: &str,
    ) -> RecordPayroll {
        RecordPayroll {
            employee_id,
            period_start: date(start),
            period_end: date(end),
            net_amount: cop(1_300_000),
            payment_date: date("2024-03-10").coerce(),
            today: date("2024-03-15"),
        }
    }

    #[tokio::test]
    async fn records_overdue_period() {
        let db = MockDb::default();
        let employee = db.add_employee("monthly", "2024-01-01");
        let service = Service::new(Config::default(), db.clone());

        let payroll = service
            .execute(record(employee, "2024-02-01", "2024-02-29"))
            .await
            .unwrap();

        assert_eq!(payroll.employee_id, employee);
        assert_eq!(payroll.net_amount, cop(1_300_000));
        assert_eq!(db.payrolls(), vec![payroll.clone()]);
        assert_eq!(db.commits(), 1);

        let schedule = service
            .execute(PaymentPeriods {
                employee_id: employee,
                salary_type: "monthly".parse().unwrap(),
                hire_date: date("2024-01-01").coerce(),
                today: date("2024-03-15"),
            })
            .await
            .unwrap()
            .into_schedule();
        assert_eq!(schedule.periods[1].status, Status::Paid);
        assert_eq!(schedule.periods[1].payment_id, Some(payroll.id));
    }

    #[tokio::test]
    async fn records_upcoming_period_in_advance() {
        let db = MockDb::default();
        let employee = db.add_employee("biweekly", "2024-03-01");
        let service = Service::new(Config::default(), db.clone());

        let payroll = service
            .execute(record(employee, "2024-03-31", "2024-04-14"))
            .await
            .unwrap();

        assert_eq!(payroll.period_start, date("2024-03-31"));
        assert_eq!(db.payrolls().len(), 1);
    }

    #[tokio::test]
    async fn rejects_already_paid_period() {
        let db = MockDb::default();
        let employee = db.add_employee("monthly", "2024-01-01");
        let paid = db.add_payroll(employee, "2024-01-01", "2024-01-31");
        let service = Service::new(Config::default(), db.clone());

        let err = service
            .execute(record(employee, "2024-01-01", "2024-01-31"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PeriodAlreadyPaid(id) if *id == paid,
        ));
        assert_eq!(db.payrolls().len(), 1);
        assert_eq!(db.commits(), 0);
    }

    #[tokio::test]
    async fn rejects_misaligned_period() {
        let db = MockDb::default();
        let employee = db.add_employee("monthly", "2024-01-01");
        let service = Service::new(Config::default(), db.clone());

        let err = service
            .execute(record(employee, "2024-02-01", "2024-02-28"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PeriodNotFound { .. },
        ));
        assert!(db.payrolls().is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_employee() {
        let db = MockDb::default();
        let service = Service::new(Config::default(), db);
        let unknown = crate::domain::employee::Id::new();

        let err = service
            .execute(record(unknown, "2024-02-01", "2024-02-29"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::EmployeeNotExists(id) if *id == unknown,
        ));
    }

    #[tokio::test]
    async fn rejects_unknown_salary_type() {
        let db = MockDb::default();
        let employee = db.add_employee("commission", "2024-01-01");
        let service = Service::new(Config::default(), db);

        let err = service
            .execute(record(employee, "2024-02-01", "2024-02-01"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::UnknownSalaryType(_),
        ));
    }

    #[tokio::test]
    async fn rejects_non_positive_amount() {
        let db = MockDb::default();
        let employee = db.add_employee("monthly", "2024-01-01");
        let service = Service::new(Config::default(), db.clone());

        let err = service
            .execute(RecordPayroll {
                net_amount: cop(0),
                ..record(employee, "2024-02-01", "2024-02-29")
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::NonPositiveAmount(_),
        ));
        assert!(db.payrolls().is_empty());
    }

    #[cfg(feature = "postgres")]
    #[tokio::test]
    async fn fails_when_history_is_unavailable() {
        let db = MockDb::unavailable();
        let employee = db.add_employee("monthly", "2024-01-01");
        let service = Service::new(Config::default(), db.clone());

        let err = service
            .execute(record(employee, "2024-02-01", "2024-02-29"))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Db(_)));
        assert!(db.payrolls().is_empty());
    }
}
