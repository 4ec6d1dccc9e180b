//! Read entities definitions.

pub mod payment_period;

pub use self::payment_period::PaymentPeriod;
