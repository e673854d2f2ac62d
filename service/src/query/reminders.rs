//! [`Query`] collection related to [`reminder::Event`]s.

use common::operations::By;

use crate::domain::reminder;
#[cfg(doc)]
use crate::query::Query;

use super::DatabaseQuery;

/// Queries undelivered [`reminder::Event`]s due relative to the carried
/// [`Date`].
///
/// [`Date`]: common::Date
pub type Due = DatabaseQuery<By<Vec<reminder::Event>, reminder::Due>>;
