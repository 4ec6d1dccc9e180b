//! GraphQL API definitions.

pub mod employee;
mod mutation;
pub mod payment_period;
pub mod payroll;
mod query;
pub mod scalar;

use crate::Context;

pub use self::{
    employee::Employee,
    mutation::Mutation,
    payment_period::{PaymentPeriod, PaymentSchedule},
    payroll::Payroll,
    query::Query,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<
    'static,
    Query,
    Mutation,
    juniper::EmptySubscription<Context>,
>;
