//! [`Query`] collection related to [`payment::Entry`]s.

use common::operations::By;

use crate::domain::{contract, payment};
#[cfg(doc)]
use crate::query::Query;

use super::DatabaseQuery;

/// Queries the payment schedule of a [`Contract`], by due [`Date`]
/// ascending.
///
/// [`Contract`]: crate::domain::Contract
/// [`Date`]: common::Date
pub type ForContract = DatabaseQuery<By<Vec<payment::Entry>, contract::Id>>;

/// Queries [`payment::Entry`]s overdue relative to the carried [`Date`].
///
/// [`Date`]: common::Date
pub type Overdue = DatabaseQuery<By<Vec<payment::Entry>, payment::Overdue>>;
