//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use juniper::IntoFieldError;
use service::{command::record_payroll::ExecutionError, infra::database, read};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// GraphQL API [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_SERVER_ERROR",
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

impl<S> IntoFieldError<S> for Error
where
    S: From<String>,
{
    fn into_field_error(self) -> juniper::FieldError<S> {
        let mut ext = juniper::Object::with_capacity(1);
        drop(
            ext.add_field("code", juniper::Value::scalar(self.code.to_owned())),
        );
        drop(
            ext.add_field(
                "backtrace",
                juniper::Value::list(
                    self.backtrace
                        .iter()
                        .flat_map(|trace| trace.iter())
                        .map(|frame| juniper::Value::scalar(frame.to_string()))
                        .collect(),
                ),
            ),
        );
        juniper::FieldError::new(self.message, juniper::Value::object(ext))
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for read::payment_period::DateOutOfRange {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

define_error! {
    enum EmployeeError {
        #[code = "EMPLOYEE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Employee` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum PayrollError {
        #[code = "NON_POSITIVE_AMOUNT"]
        #[status = BAD_REQUEST]
        #[message = "Paid `Money` amount must be positive"]
        NonPositiveAmount,

        #[code = "PERIOD_NOT_FOUND"]
        #[status = BAD_REQUEST]
        #[message = "Provided period is not a pay period of the `Employee`"]
        PeriodNotFound,

        #[code = "PERIOD_ALREADY_PAID"]
        #[status = CONFLICT]
        #[message = "Provided period is already paid"]
        PeriodAlreadyPaid,

        #[code = "UNKNOWN_SALARY_TYPE"]
        #[status = UNPROCESSABLE_ENTITY]
        #[message = "Salary type of the `Employee` has no known pay periods"]
        UnknownSalaryType,
    }
}

impl AsError for ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DateOutOfRange(e) => e.try_as_error(),
            Self::EmployeeNotExists(_) => Some(EmployeeError::NotExists.into()),
            Self::NonPositiveAmount(_) => {
                Some(PayrollError::NonPositiveAmount.into())
            }
            Self::PeriodAlreadyPaid(_) => {
                Some(PayrollError::PeriodAlreadyPaid.into())
            }
            Self::PeriodNotFound { .. } => {
                Some(PayrollError::PeriodNotFound.into())
            }
            Self::UnknownSalaryType(_) => {
                Some(PayrollError::UnknownSalaryType.into())
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Date, Money};
    use service::{
        command::record_payroll::ExecutionError, domain,
        read::payment_period::DateOutOfRange,
    };

    use super::AsError as _;

    fn code_of(err: &ExecutionError) -> (&'static str, http::StatusCode) {
        let err = err.as_error();
        (err.code, err.status_code)
    }

    #[test]
    fn maps_execution_errors() {
        let date = Date::from_iso("2024-03-01").unwrap();

        assert_eq!(
            code_of(&ExecutionError::EmployeeNotExists(
                domain::employee::Id::new(),
            )),
            ("EMPLOYEE_NOT_EXISTS", http::StatusCode::NOT_FOUND),
        );
        assert_eq!(
            code_of(&ExecutionError::NonPositiveAmount(Money::new(
                0.into(),
                Currency::Cop,
            ))),
            ("NON_POSITIVE_AMOUNT", http::StatusCode::BAD_REQUEST),
        );
        assert_eq!(
            code_of(&ExecutionError::PeriodNotFound {
                start: date,
                end: date,
            }),
            ("PERIOD_NOT_FOUND", http::StatusCode::BAD_REQUEST),
        );
        assert_eq!(
            code_of(&ExecutionError::PeriodAlreadyPaid(
                domain::payroll::Id::new(),
            )),
            ("PERIOD_ALREADY_PAID", http::StatusCode::CONFLICT),
        );
        assert_eq!(
            code_of(&ExecutionError::UnknownSalaryType(
                "commission".parse().unwrap(),
            )),
            (
                "UNKNOWN_SALARY_TYPE",
                http::StatusCode::UNPROCESSABLE_ENTITY,
            ),
        );
    }

    #[test]
    fn date_out_of_range_is_internal() {
        let date = Date::from_iso("2024-03-01").unwrap();

        assert_eq!(
            code_of(&ExecutionError::DateOutOfRange(DateOutOfRange(date))),
            (
                "INTERNAL_SERVER_ERROR",
                http::StatusCode::INTERNAL_SERVER_ERROR,
            ),
        );
    }

    #[test]
    fn traced_error_keeps_code_and_trace() {
        let err = tracerr::new!(ExecutionError::PeriodAlreadyPaid(
            domain::payroll::Id::new(),
        ))
        .as_error();

        assert_eq!(err.code, "PERIOD_ALREADY_PAID");
        assert!(err.backtrace.is_some());
        assert!(err.to_string().starts_with("[PERIOD_ALREADY_PAID]: "));
    }
}
