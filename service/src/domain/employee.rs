//! [`Employee`] definitions.

use common::{define_kind, unit, Date, DateOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employee of a branch, receiving a salary on a recurring [`Cadence`].
#[derive(Clone, Debug)]
pub struct Employee {
    /// ID of this [`Employee`].
    pub id: Id,

    /// [`Name`] of this [`Employee`].
    pub name: Name,

    /// [`SalaryType`] of this [`Employee`].
    pub salary_type: SalaryType,

    /// Salary of this [`Employee`] per pay period.
    pub salary: Money,

    /// [`Date`] when this [`Employee`] was hired.
    pub hire_date: HireDate,
}

impl Employee {
    /// Returns the pay [`Cadence`] of this [`Employee`], if its
    /// [`SalaryType`] is a known one.
    #[must_use]
    pub fn cadence(&self) -> Option<Cadence> {
        self.salary_type.cadence()
    }
}

/// ID of an [`Employee`].
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

/// Name of an [`Employee`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Salary type of an [`Employee`], as it is stored.
///
/// Kept as free text, since stored records may contain values having no
/// known [`Cadence`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct SalaryType(String);

impl SalaryType {
    /// Creates a new [`SalaryType`] if the given `kind` is not blank.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Option<Self> {
        let kind = kind.into();
        let kind = kind.trim();
        (!kind.is_empty()).then(|| Self(kind.to_ascii_lowercase()))
    }

    /// Returns the pay [`Cadence`] described by this [`SalaryType`].
    ///
    /// [`None`] is returned for unknown salary types.
    #[must_use]
    pub fn cadence(&self) -> Option<Cadence> {
        Cadence::from_str(&self.0.to_ascii_uppercase()).ok()
    }
}

impl From<Cadence> for SalaryType {
    fn from(cadence: Cadence) -> Self {
        Self(cadence.to_string().to_ascii_lowercase())
    }
}

impl FromStr for SalaryType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("blank `SalaryType`")
    }
}

define_kind! {
    #[doc = "Recurrence of an [`Employee`]'s pay periods."]
    enum Cadence {
        #[doc = "Single-day periods."]
        Daily = 1,

        #[doc = "15-day periods, both ends inclusive."]
        Biweekly = 2,

        #[doc = "Calendar-month periods."]
        Monthly = 3,

        #[doc = "7-day periods. Stored as `hourly` by older records, which \
                 never accounted for worked hours."]
        #[strum(to_string = "WEEKLY", serialize = "HOURLY")]
        Weekly = 4,
    }
}

impl Cadence {
    /// Calculates the inclusive end of a pay period starting at `start`.
    ///
    /// [`None`] is returned if the end is out of the supported date range.
    #[must_use]
    pub fn period_end(self, start: Date) -> Option<Date> {
        match self {
            Self::Daily => Some(start),
            Self::Biweekly => start.checked_add_days(14),
            // Start days missing from the next month roll over into it, so
            // a period starting on Jan 31 lasts until the end of February.
            Self::Monthly => start
                .checked_add_months(1)?
                .first_day_of_month()
                .previous_day(),
            Self::Weekly => start.checked_add_days(6),
        }
    }
}

/// [`Date`] when an [`Employee`] was hired.
pub type HireDate = DateOf<(Employee, unit::Hire)>;

#[cfg(test)]
mod spec {
    use common::Date;

    use super::{Cadence, SalaryType};

    fn date(s: &str) -> Date {
        Date::from_iso(s).unwrap()
    }

    #[test]
    fn salary_type_cadence() {
        let cadence = |s: &str| SalaryType::new(s).unwrap().cadence();

        assert_eq!(cadence("daily"), Some(Cadence::Daily));
        assert_eq!(cadence("biweekly"), Some(Cadence::Biweekly));
        assert_eq!(cadence("Monthly"), Some(Cadence::Monthly));
        assert_eq!(cadence("weekly"), Some(Cadence::Weekly));
        assert_eq!(cadence("hourly"), Some(Cadence::Weekly));
        assert_eq!(cadence("fortnightly"), None);

        assert!(SalaryType::new("  ").is_none());
        assert_eq!(
            AsRef::<str>::as_ref(&SalaryType::from(Cadence::Weekly)),
            "weekly",
        );
    }

    #[test]
    fn daily_period_is_a_single_day() {
        assert_eq!(
            Cadence::Daily.period_end(date("2024-03-01")),
            Some(date("2024-03-01")),
        );
    }

    #[test]
    fn biweekly_period_spans_15_days() {
        assert_eq!(
            Cadence::Biweekly.period_end(date("2024-03-01")),
            Some(date("2024-03-15")),
        );
        assert_eq!(
            Cadence::Biweekly.period_end(date("2024-02-20")),
            Some(date("2024-03-05")),
        );
    }

    #[test]
    fn weekly_period_spans_7_days() {
        assert_eq!(
            Cadence::Weekly.period_end(date("2024-12-28")),
            Some(date("2025-01-03")),
        );
    }

    #[test]
    fn monthly_period_ends_at_month_end() {
        let end = |s| Cadence::Monthly.period_end(date(s)).unwrap();

        assert_eq!(end("2024-01-01"), date("2024-01-31"));
        assert_eq!(end("2024-02-01"), date("2024-02-29"));
        assert_eq!(end("2023-02-01"), date("2023-02-28"));
        assert_eq!(end("2024-04-15"), date("2024-04-30"));
        assert_eq!(end("2024-12-10"), date("2024-12-31"));
    }

    #[test]
    fn monthly_period_rolls_over_short_months() {
        let end = |s| Cadence::Monthly.period_end(date(s)).unwrap();

        assert_eq!(end("2024-01-31"), date("2024-02-29"));
        assert_eq!(end("2024-01-30"), date("2024-02-29"));
        assert_eq!(end("2024-01-29"), date("2024-01-31"));
        assert_eq!(end("2023-01-29"), date("2023-02-28"));
        assert_eq!(end("2024-03-31"), date("2024-04-30"));
    }
}
