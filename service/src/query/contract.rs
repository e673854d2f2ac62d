//! [`Query`] collection related to a single [`Contract`].

use common::operations::By;

use crate::{
    domain::{contract, Contract},
    read,
};
#[cfg(doc)]
use crate::query::Query;

use super::DatabaseQuery;

/// Queries a [`Contract`] by its ID.
pub type ById = DatabaseQuery<By<Option<Contract>, contract::Id>>;

/// Queries a [`Contract`] along with its payment, reminder and renewal
/// history.
pub type Details =
    DatabaseQuery<By<Option<read::contract::Details>, contract::Id>>;

/// Queries tenant information by the latest [`Contract`] mentioning the
/// [`contract::Phone`].
pub type TenantByPhone =
    DatabaseQuery<By<Option<read::contract::Tenant>, contract::Phone>>;
