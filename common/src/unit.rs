//! Marker types.

/// Marker type describing an employee hiring.
#[derive(Clone, Copy, Debug)]
pub struct Hire;

/// Marker type describing a salary payment.
#[derive(Clone, Copy, Debug)]
pub struct Payment;
