//! [`PaymentPeriods`] definition.

use common::{
    operations::{By, Select},
    Date,
};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Employee;
use crate::{
    domain::{employee, Payroll},
    infra::{database, Database},
    read::payment_period::{DateOutOfRange, Schedule},
    Query, Service,
};

/// [`Query`] generating pay periods of an [`Employee`] and reconciling them
/// against its recorded [`Payroll`]s.
#[derive(Clone, Debug)]
pub struct PaymentPeriods {
    /// ID of the [`Employee`] to fetch the [`Payroll`]s of.
    pub employee_id: employee::Id,

    /// [`employee::SalaryType`] defining the length of the periods.
    pub salary_type: employee::SalaryType,

    /// [`Date`] when the first period starts.
    pub hire_date: employee::HireDate,

    /// [`Date`] to classify the periods against.
    pub today: Date,
}

/// Output of the [`PaymentPeriods`] [`Query`].
#[derive(Debug)]
pub enum Output {
    /// [`Schedule`] reconciled against the full [`Payroll`] history.
    Reconciled(Schedule),

    /// [`Payroll`] history couldn't be fetched, so the [`Schedule`] treats
    /// every period as unpaid.
    Degraded {
        /// [`Schedule`] generated without any [`Payroll`]s.
        schedule: Schedule,

        /// Reason of the [`Payroll`] history being unavailable.
        reason: Traced<database::Error>,
    },
}

impl Output {
    /// Returns the generated [`Schedule`].
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        match self {
            Self::Reconciled(schedule) | Self::Degraded { schedule, .. } => {
                schedule
            }
        }
    }

    /// Consumes this [`Output`] returning the generated [`Schedule`].
    #[must_use]
    pub fn into_schedule(self) -> Schedule {
        match self {
            Self::Reconciled(schedule) | Self::Degraded { schedule, .. } => {
                schedule
            }
        }
    }

    /// Returns the reason of this [`Output`] being degraded, if it is.
    #[must_use]
    pub fn degradation(&self) -> Option<&Traced<database::Error>> {
        match self {
            Self::Reconciled(_) => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }
}

impl<Db> Query<PaymentPeriods> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Payroll>, employee::Id>>,
        Ok = Vec<Payroll>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<DateOutOfRange>;

    async fn execute(
        &self,
        query: PaymentPeriods,
    ) -> Result<Self::Ok, Self::Err> {
        let PaymentPeriods {
            employee_id,
            salary_type,
            hire_date,
            today,
        } = query;

        let cadence = salary_type.cadence();
        if cadence.is_none() {
            log::warn!(
                "unknown salary type `{salary_type}` of \
                 `Employee(id: {employee_id})`, using single-day periods",
            );
        }

        let (payments, failure) = match self
            .database()
            .execute(Select(By::<Vec<Payroll>, _>::new(employee_id)))
            .await
        {
            Ok(payments) => (payments, None),
            Err(e) => {
                log::error!(
                    "failed to fetch `Payroll` history of \
                     `Employee(id: {employee_id})`: {e}",
                );
                (Vec::new(), Some(e))
            }
        };

        let schedule = Schedule::generate(
            hire_date,
            cadence,
            today,
            &payments,
            self.config().limits,
        )
        .map_err(tracerr::wrap!())?;
        if schedule.truncated {
            log::warn!(
                "pay periods of `Employee(id: {employee_id})` are truncated \
                 at {} periods, starting from {hire_date}",
                schedule.periods.len(),
            );
        }

        Ok(match failure {
            None => Output::Reconciled(schedule),
            Some(reason) => Output::Degraded { schedule, reason },
        })
    }
}

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::{
        domain::employee::{self, SalaryType},
        infra::database::mock::MockDb,
        read::payment_period::Status,
        Config, Query as _, Service,
    };

    use super::{Output, PaymentPeriods};

    fn date(s: &str) -> Date {
        Date::from_iso(s).unwrap()
    }

    fn query(employee_id: employee::Id, salary_type: &str) -> PaymentPeriods {
        PaymentPeriods {
            employee_id,
            salary_type: SalaryType::new(salary_type).unwrap(),
            hire_date: date("2024-01-01").coerce(),
            today: date("2024-03-15"),
        }
    }

    #[tokio::test]
    async fn reconciles_with_own_history_only() {
        let db = MockDb::default();
        let employee = db.add_employee("monthly", "2024-01-01");
        let other = db.add_employee("monthly", "2024-01-01");
        let paid = db.add_payroll(employee, "2024-02-01", "2024-02-29");
        _ = db.add_payroll(other, "2024-01-01", "2024-01-31");
        let service = Service::new(Config::default(), db);

        let output = service.execute(query(employee, "monthly")).await.unwrap();

        assert!(matches!(output, Output::Reconciled(_)));
        let statuses = output
            .schedule()
            .periods
            .iter()
            .map(|p| p.status)
            .collect::<Vec<_>>();
        assert_eq!(
            statuses,
            [
                Status::Overdue,
                Status::Paid,
                Status::Pending,
                Status::Upcoming,
                Status::Upcoming,
                Status::Upcoming,
            ],
        );
        assert_eq!(output.schedule().periods[1].payment_id, Some(paid));
    }

    #[tokio::test]
    async fn legacy_hourly_salary_is_weekly() {
        let db = MockDb::default();
        let employee = db.add_employee("hourly", "2024-01-01");
        let service = Service::new(Config::default(), db);

        let schedule = service
            .execute(query(employee, "hourly"))
            .await
            .unwrap()
            .into_schedule();

        assert!(schedule
            .periods
            .iter()
            .all(|p| p.period_start.days_until(&p.period_end) == 6));
    }

    #[tokio::test]
    async fn unknown_salary_type_falls_back_to_single_days() {
        let db = MockDb::default();
        let employee = db.add_employee("per-project", "2024-01-01");
        let service = Service::new(Config::default(), db);

        let schedule = service
            .execute(query(employee, "per-project"))
            .await
            .unwrap()
            .into_schedule();

        assert!(schedule.truncated);
        assert!(schedule
            .periods
            .iter()
            .all(|p| p.period_start == p.period_end));
    }

    #[cfg(feature = "postgres")]
    #[tokio::test]
    async fn degrades_when_history_is_unavailable() {
        let db = MockDb::unavailable();
        let employee = db.add_employee("monthly", "2024-01-01");
        let service = Service::new(Config::default(), db);

        let output = service.execute(query(employee, "monthly")).await.unwrap();

        assert!(output.degradation().is_some());
        let schedule = output.into_schedule();
        assert_eq!(schedule.periods.len(), 6);
        assert!(schedule.periods.iter().all(|p| p.payment_id.is_none()));
        assert_eq!(schedule.periods[0].status, Status::Overdue);
        assert_eq!(schedule.periods[2].status, Status::Pending);
    }
}
