//! [`Config`]-related definitions.

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use smart_default::SmartDefault;
use time::macros::format_description;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// UTC offset to determine the current date in, formatted as `+HH:MM` or
    /// `-HH:MM`.
    #[default("+00:00".to_owned())]
    pub utc_offset: String,

    /// Number of calendar months after the current date to generate pay
    /// periods for.
    #[default(3)]
    pub horizon_months: u32,

    /// Maximum number of pay periods to generate for a single employee.
    #[default(100)]
    pub max_periods: usize,
}

/// Maximum absolute UTC offset of a real time zone, in hours.
const MAX_OFFSET_HOURS: i8 = 14;

/// Error of converting a [`Service`] configuration into a
/// [`service::Config`].
#[derive(Debug, Display, Error, From)]
pub enum UtcOffsetError {
    /// `utc_offset` is not a `+HH:MM` or `-HH:MM` string.
    #[display("malformed `utc_offset`: {_0}")]
    Malformed(time::error::Parse),

    /// `utc_offset` is further than 14 hours from UTC.
    #[display("`utc_offset` {_0} is further than 14 hours from UTC")]
    #[from(ignore)]
    OutOfRange(#[error(not(source))] time::UtcOffset),
}

impl TryFrom<Service> for service::Config {
    type Error = UtcOffsetError;

    fn try_from(value: Service) -> Result<Self, Self::Error> {
        let Service {
            utc_offset,
            horizon_months,
            max_periods,
        } = value;

        let utc_offset = time::UtcOffset::parse(
            &utc_offset,
            format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
        )?;
        if utc_offset.whole_hours().abs() > MAX_OFFSET_HOURS
            || (utc_offset.whole_hours().abs() == MAX_OFFSET_HOURS
                && utc_offset.minutes_past_hour() != 0)
        {
            return Err(UtcOffsetError::OutOfRange(utc_offset));
        }

        Ok(Self {
            limits: service::read::payment_period::Limits {
                horizon_months,
                max_periods,
            },
            utc_offset,
        })
    }
}

/// Postgres configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host to connect to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to connect to.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password to connect with.
    #[default("postgres".to_owned())]
    pub password: String,

    /// Database name to connect to.
    #[default("postgres".to_owned())]
    pub dbname: String,
}

impl From<Postgres> for service::infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Service, UtcOffsetError};

    #[test]
    fn converts_service_config() {
        let conf = service::Config::try_from(Service {
            utc_offset: "-05:00".to_owned(),
            horizon_months: 6,
            max_periods: 50,
        })
        .unwrap();

        assert_eq!(conf.utc_offset.whole_hours(), -5);
        assert_eq!(conf.limits.horizon_months, 6);
        assert_eq!(conf.limits.max_periods, 50);
    }

    #[test]
    fn defaults_to_utc() {
        let conf = service::Config::try_from(Service::default()).unwrap();

        assert!(conf.utc_offset.is_utc());
        assert_eq!(conf.limits, service::Config::default().limits);
    }

    #[test]
    fn rejects_malformed_utc_offset() {
        for offset in ["", "5", "UTC", "-5:00", "+05"] {
            assert!(
                matches!(
                    service::Config::try_from(Service {
                        utc_offset: offset.to_owned(),
                        ..Service::default()
                    }),
                    Err(UtcOffsetError::Malformed(_)),
                ),
                "`{offset}` is accepted",
            );
        }
    }

    #[test]
    fn rejects_offset_beyond_real_time_zones() {
        for offset in ["+25:00", "-25:59", "+15:00", "-14:30"] {
            assert!(
                matches!(
                    service::Config::try_from(Service {
                        utc_offset: offset.to_owned(),
                        ..Service::default()
                    }),
                    Err(UtcOffsetError::OutOfRange(_)),
                ),
                "`{offset}` is accepted",
            );
        }
    }

    #[test]
    fn accepts_extreme_real_offsets() {
        for (offset, hours) in [("+14:00", 14), ("-12:00", -12), ("+05:45", 5)]
        {
            let conf = service::Config::try_from(Service {
                utc_offset: offset.to_owned(),
                ..Service::default()
            })
            .unwrap();

            assert_eq!(conf.utc_offset.whole_hours(), hours);
        }
    }
}
