//! Domain definitions.

pub mod employee;
pub mod payroll;

pub use self::{employee::Employee, payroll::Payroll};
