//! [`Query`] collection related to [`Payroll`]s.

use common::operations::By;

use crate::domain::{employee, Payroll};
#[cfg(doc)]
use crate::{domain::Employee, Query};

use super::DatabaseQuery;

/// Queries the whole payment history of an [`Employee`], ordered by
/// [`Payroll::period_start`] ascending.
pub type History = DatabaseQuery<By<Vec<Payroll>, employee::Id>>;
