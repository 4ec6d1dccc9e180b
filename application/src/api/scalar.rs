//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{InputValue, ScalarValue, Value};

/// Helper for `#[graphql(with = .., parse_token(String))]` of string scalars
/// wrapping a validated `D` domain text.
///
/// Input is validated by the [`FromStr`] impl of `D`, and output is the text
/// `D` dereferences into.
#[derive(Debug)]
pub struct Text<D>(PhantomData<D>);

impl<D> Text<D> {
    /// Outputs the text of the `D` wrapped by `value`.
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        T: AsRef<D>,
        D: AsRef<str>,
        S: ScalarValue,
    {
        Value::scalar(value.as_ref().as_ref().to_owned())
    }

    /// Parses a `D` from a string input and wraps it into `T`.
    ///
    /// # Errors
    ///
    /// If the input is not a string, or is not a valid `D`.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        D: FromStr,
        D::Err: fmt::Display,
        T: From<D>,
        S: ScalarValue,
    {
        let s = input
            .as_string_value()
            .ok_or_else(|| format!("Expected a string, found: {input}"))?;
        s.parse::<D>()
            .map(T::from)
            .map_err(|e| format!("Cannot parse \"{s}\": {e}"))
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue, Value};
    use service::domain;

    use crate::api::employee::{Name, SalaryType};

    use super::Text;

    type Input = InputValue<DefaultScalarValue>;

    #[test]
    fn parses_and_outputs_text() {
        let salary_type: SalaryType =
            Text::<domain::employee::SalaryType>::from_input(&Input::scalar(
                "biweekly".to_owned(),
            ))
            .unwrap();

        assert_eq!(
            Text::<domain::employee::SalaryType>::to_output::<
                _,
                DefaultScalarValue,
            >(&salary_type),
            Value::scalar("biweekly".to_owned()),
        );
    }

    #[test]
    fn rejects_invalid_text() {
        assert!(Text::<domain::employee::SalaryType>::from_input::<
            SalaryType,
            _,
        >(&Input::scalar("  ".to_owned()))
        .is_err());
        assert!(Text::<domain::employee::Name>::from_input::<Name, _>(
            &Input::scalar(String::new()),
        )
        .is_err());
    }

    #[test]
    fn rejects_non_string_input() {
        assert!(Text::<domain::employee::SalaryType>::from_input::<
            SalaryType,
            _,
        >(&Input::Null)
        .is_err());
        assert!(Text::<domain::employee::Name>::from_input::<Name, _>(
            &Input::scalar(42),
        )
        .is_err());
    }
}
