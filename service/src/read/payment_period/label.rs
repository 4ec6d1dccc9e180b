//! Human-readable `es-CO` labels of pay periods.

use common::Date;

use crate::domain::employee::Cadence;

/// Full month names, January first.
const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Abbreviated month names, January first.
const SHORT_MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct",
    "nov", "dic",
];

/// Formats a label of the pay period `[start, end]` with the provided
/// [`Cadence`]:
/// - [`Cadence::Monthly`]: `"marzo 2024"`, using the `start` month only;
/// - [`Cadence::Biweekly`]: `"1-15 mar 2024"`, or `"25 mar - 8 abr 2024"`
///   when the period crosses a month;
/// - [`Cadence::Daily`]: `"15 mar 2024"`, using the `start` only;
/// - [`Cadence::Weekly`]: `"Semana 4-10 mar 2024"`, crossing a month the same
///   way as [`Cadence::Biweekly`] (`"Semana 26 feb - 3 mar 2024"`) instead
///   of the single-month `"Semana D-D mon YYYY"` form, which would misname
///   the start day's month;
/// - unknown cadence: raw `"2024-03-01 - 2024-03-15"`.
#[must_use]
pub fn label(start: Date, end: Date, cadence: Option<Cadence>) -> String {
    match cadence {
        Some(Cadence::Monthly) => {
            format!("{} {}", month_name(start), start.year())
        }
        Some(Cadence::Biweekly) => span(start, end),
        Some(Cadence::Daily) => {
            format!("{} {} {}", start.day(), short_month(start), start.year())
        }
        Some(Cadence::Weekly) => format!("Semana {}", span(start, end)),
        None => format!("{start} - {end}"),
    }
}

/// Formats a day span, collapsing the month when both dates share it.
fn span(start: Date, end: Date) -> String {
    if (start.year(), start.month()) == (end.year(), end.month()) {
        format!(
            "{}-{} {} {}",
            start.day(),
            end.day(),
            short_month(end),
            end.year(),
        )
    } else {
        format!(
            "{} {} - {} {} {}",
            start.day(),
            short_month(start),
            end.day(),
            short_month(end),
            end.year(),
        )
    }
}

/// Returns the full month name of the provided [`Date`].
fn month_name(date: Date) -> &'static str {
    MONTHS[usize::from(date.month()) - 1]
}

/// Returns the abbreviated month name of the provided [`Date`].
fn short_month(date: Date) -> &'static str {
    SHORT_MONTHS[usize::from(date.month()) - 1]
}

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::domain::employee::Cadence;

    use super::label;

    fn label_of(start: &str, end: &str, cadence: Option<Cadence>) -> String {
        label(
            Date::from_iso(start).unwrap(),
            Date::from_iso(end).unwrap(),
            cadence,
        )
    }

    #[test]
    fn monthly() {
        assert_eq!(
            label_of("2024-01-01", "2024-01-31", Some(Cadence::Monthly)),
            "enero 2024",
        );
        assert_eq!(
            label_of("2024-09-01", "2024-09-30", Some(Cadence::Monthly)),
            "septiembre 2024",
        );
        // Only the start is considered.
        assert_eq!(
            label_of("2024-01-31", "2024-02-29", Some(Cadence::Monthly)),
            "enero 2024",
        );
    }

    #[test]
    fn biweekly() {
        assert_eq!(
            label_of("2024-03-01", "2024-03-15", Some(Cadence::Biweekly)),
            "1-15 mar 2024",
        );
        assert_eq!(
            label_of("2024-03-25", "2024-04-08", Some(Cadence::Biweekly)),
            "25 mar - 8 abr 2024",
        );
        assert_eq!(
            label_of("2024-12-25", "2025-01-08", Some(Cadence::Biweekly)),
            "25 dic - 8 ene 2025",
        );
    }

    #[test]
    fn daily() {
        assert_eq!(
            label_of("2024-03-15", "2024-03-15", Some(Cadence::Daily)),
            "15 mar 2024",
        );
    }

    #[test]
    fn weekly() {
        assert_eq!(
            label_of("2024-03-04", "2024-03-10", Some(Cadence::Weekly)),
            "Semana 4-10 mar 2024",
        );
        assert_eq!(
            label_of("2024-02-26", "2024-03-03", Some(Cadence::Weekly)),
            "Semana 26 feb - 3 mar 2024",
        );
    }

    #[test]
    fn unknown_cadence() {
        assert_eq!(
            label_of("2024-03-01", "2024-03-15", None),
            "2024-03-01 - 2024-03-15",
        );
    }
}
