//! [`Query`] collection related to the multiple [`Contract`]s.

use common::operations::By;

use crate::{
    domain::{contract, Contract},
    read,
};
#[cfg(doc)]
use crate::query::Query;

use super::DatabaseQuery;

/// Queries a list of [`Contract`]s, optionally filtered.
pub type List =
    DatabaseQuery<By<Vec<Contract>, read::contract::list::Selector>>;

/// Queries the list of [`Contract`]s mentioning the [`contract::Phone`],
/// latest first.
pub type ByPhone = DatabaseQuery<By<Vec<Contract>, contract::Phone>>;

/// Queries total count of [`Contract`]s.
pub type TotalCount = DatabaseQuery<By<read::contract::list::TotalCount, ()>>;
