//! Calendar date utilities.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{cmp::Ordering, fmt, marker::PhantomData};

use derive_more::{Debug, Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::{macros::format_description, Month, UtcOffset};

/// Untyped calendar date.
pub type Date = DateOf;

/// Calendar date without a time of day or a time zone.
#[derive(Debug)]
pub struct DateOf<Of: ?Sized = ()> {
    /// Inner representation of the date.
    inner: time::Date,

    /// Type parameter describing the kind of date.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateOf<Of> {
    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day)
            .ok()
            .map(Self::from_inner)
    }

    /// Returns the current [`Date`] as observed at the provided [`UtcOffset`].
    #[must_use]
    pub fn today(offset: UtcOffset) -> Self {
        Self::from_inner(
            time::OffsetDateTime::now_utc().to_offset(offset).date(),
        )
    }

    /// Parses a [`Date`] from its ISO 8601 `YYYY-MM-DD` representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid `YYYY-MM-DD` date.
    pub fn from_iso(input: &str) -> Result<Self, ParseError> {
        time::Date::parse(input, format_description!("[year]-[month]-[day]"))
            .map(Self::from_inner)
            .map_err(ParseError)
    }

    /// Returns this [`Date`] in its ISO 8601 `YYYY-MM-DD` representation.
    #[must_use]
    pub fn to_iso(&self) -> String {
        self.to_string()
    }

    /// Returns the year of this [`Date`].
    #[must_use]
    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    /// Returns the month of this [`Date`] in `1..=12` range.
    #[must_use]
    pub fn month(&self) -> u8 {
        u8::from(self.inner.month())
    }

    /// Returns the day of the month of this [`Date`] in `1..=31` range.
    #[must_use]
    pub fn day(&self) -> u8 {
        self.inner.day()
    }

    /// Returns the [`Date`] following this one.
    ///
    /// [`None`] is returned if the result is out of the supported range.
    #[must_use]
    pub fn next_day(self) -> Option<Self> {
        self.inner.next_day().map(Self::from_inner)
    }

    /// Returns the [`Date`] preceding this one.
    ///
    /// [`None`] is returned if the result is out of the supported range.
    #[must_use]
    pub fn previous_day(self) -> Option<Self> {
        self.inner.previous_day().map(Self::from_inner)
    }

    /// Adds the provided number of days to this [`Date`].
    ///
    /// [`None`] is returned if the result is out of the supported range.
    #[must_use]
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        self.inner
            .checked_add(time::Duration::days(days))
            .map(Self::from_inner)
    }

    /// Adds the provided number of calendar months to this [`Date`].
    ///
    /// The day of the month is preserved. If the target month is shorter,
    /// the excess days roll over into the month after it, so
    /// `2024-01-31 + 1 month` is `2024-03-02`.
    ///
    /// [`None`] is returned if the result is out of the supported range.
    #[must_use]
    pub fn checked_add_months(self, months: u32) -> Option<Self> {
        let total = i64::from(self.inner.year()) * 12
            + i64::from(u8::from(self.inner.month()) - 1)
            + i64::from(months);
        let year = i32::try_from(total.div_euclid(12)).ok()?;
        let month = u8::try_from(total.rem_euclid(12) + 1).ok()?;

        time::Date::from_calendar_date(year, Month::try_from(month).ok()?, 1)
            .ok()?
            .checked_add(time::Duration::days(i64::from(self.inner.day()) - 1))
            .map(Self::from_inner)
    }

    /// Returns the first day of this [`Date`]'s month.
    #[must_use]
    pub fn first_day_of_month(self) -> Self {
        Self::from_inner(self.inner.replace_day(1).unwrap_or(self.inner))
    }

    /// Returns the last day of this [`Date`]'s month.
    #[must_use]
    pub fn last_day_of_month(self) -> Self {
        let last = time::util::days_in_year_month(
            self.inner.year(),
            self.inner.month(),
        );
        Self::from_inner(self.inner.replace_day(last).unwrap_or(self.inner))
    }

    /// Returns the number of days from this [`Date`] to the `other` one.
    ///
    /// The result is negative if `other` precedes this [`Date`].
    #[must_use]
    pub fn days_until<O: ?Sized>(&self, other: &DateOf<O>) -> i64 {
        (other.inner - self.inner).whole_days()
    }

    /// Coerces one kind of [`Date`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateOf<NewOf> {
        DateOf::from_inner(self.inner)
    }

    /// Wraps the provided [`time::Date`].
    fn from_inner(inner: time::Date) -> Self {
        Self {
            inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid `YYYY-MM-DD` date: {_0}")]
pub struct ParseError(time::error::Parse);

impl<Of: ?Sized> fmt::Display for DateOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.inner.year(),
            u8::from(self.inner.month()),
            self.inner.day(),
        )
    }
}

impl<Of: ?Sized> Copy for DateOf<Of> {}
impl<Of: ?Sized> Clone for DateOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateOf<Of> {}
impl<Of: ?Sized> PartialEq for DateOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> std::hash::Hash for DateOf<Of> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<Of: ?Sized> From<time::Date> for DateOf<Of> {
    fn from(date: time::Date) -> Self {
        Self::from_inner(date)
    }
}

impl<Of: ?Sized> From<DateOf<Of>> for time::Date {
    fn from(date: DateOf<Of>) -> Self {
        date.inner
    }
}

impl<Of: ?Sized> std::str::FromStr for DateOf<Of> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_iso(s)
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> FromSql<'_> for DateOf<Of> {
    accepts!(DATE);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::Date::from_sql(ty, raw).map(Self::from_inner)
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> ToSql for DateOf<Of> {
    accepts!(DATE);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.inner.to_sql(ty, w)
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    use super::DateOf;

    impl<Of: ?Sized> Serialize for DateOf<Of> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de, Of: ?Sized> Deserialize<'de> for DateOf<Of> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Self::from_iso(&s).map_err(Error::custom)
        }
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Calendar date in an ISO 8601 `YYYY-MM-DD` format.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Date = crate::Date;

    impl Date {
        fn to_output<S: ScalarValue>(d: &Date) -> Value<S> {
            Value::scalar(d.to_iso())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Date` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_iso(s).map_err(|e| {
                        format!("Cannot parse `Date` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Date;

    fn date(s: &str) -> Date {
        Date::from_iso(s).unwrap()
    }

    #[test]
    fn parses_and_prints_iso() {
        let d = date("2024-03-01");
        assert_eq!((d.year(), d.month(), d.day()), (2024, 3, 1));
        assert_eq!(d.to_iso(), "2024-03-01");
        assert_eq!(Date::from_ymd(2024, 2, 29), Some(date("2024-02-29")));

        assert!(Date::from_iso("2024-3-1").is_err());
        assert!(Date::from_iso("2023-02-29").is_err());
        assert!(Date::from_iso("2024-03-01T00:00:00Z").is_err());
        assert!(Date::from_iso("").is_err());
        assert_eq!(Date::from_ymd(2024, 13, 1), None);
    }

    #[test]
    fn adds_months_rolling_overflow_forward() {
        assert_eq!(
            date("2024-03-15").checked_add_months(3),
            Some(date("2024-06-15")),
        );
        assert_eq!(
            date("2024-01-31").checked_add_months(1),
            Some(date("2024-03-02")),
        );
        assert_eq!(
            date("2023-01-31").checked_add_months(1),
            Some(date("2023-03-03")),
        );
        assert_eq!(
            date("2024-11-30").checked_add_months(3),
            Some(date("2025-03-02")),
        );
        assert_eq!(
            date("2024-12-01").checked_add_months(1),
            Some(date("2025-01-01")),
        );
    }

    #[test]
    fn month_boundaries() {
        let last_day = |s| date(s).last_day_of_month();
        assert_eq!(last_day("2024-02-10"), date("2024-02-29"));
        assert_eq!(last_day("2023-02-10"), date("2023-02-28"));
        assert_eq!(last_day("2024-04-30"), date("2024-04-30"));
        assert_eq!(last_day("2024-12-31"), date("2024-12-31"));
        assert_eq!(
            date("2024-12-31").first_day_of_month(),
            date("2024-12-01"),
        );
    }

    #[test]
    fn day_arithmetic() {
        let leap_day = Some(date("2024-02-29"));
        assert_eq!(date("2024-02-28").next_day(), leap_day);
        assert_eq!(date("2024-03-01").previous_day(), leap_day);
        assert_eq!(
            date("2024-03-01").checked_add_days(14),
            Some(date("2024-03-15")),
        );
        assert_eq!(date("2024-03-01").days_until(&date("2024-03-15")), 14);
        assert_eq!(date("2024-03-15").days_until(&date("2024-03-01")), -14);
    }
}
