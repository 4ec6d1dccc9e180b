//! [`Command`] definition.

pub mod record_payroll;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::record_payroll::RecordPayroll;
