//! [`Contract`] read model definition.

use serde::Serialize;

use crate::domain::{contract, payment, reminder, renewal, Contract};

/// [`Contract`] along with its full payment and reminder history.
#[derive(Clone, Debug, Serialize)]
pub struct Details {
    /// The [`Contract`] itself.
    pub contract: Contract,

    /// Payment schedule of the [`Contract`], by due [`Date`] ascending.
    ///
    /// [`Date`]: common::Date
    pub payments: Vec<payment::Entry>,

    /// Expiry reminders of the [`Contract`], by firing [`Date`] ascending.
    ///
    /// [`Date`]: common::Date
    pub reminders: Vec<reminder::Event>,

    /// Renewal history of the [`Contract`], latest first.
    pub renewals: Vec<renewal::Record>,
}

/// Tenant information resolved from the latest [`Contract`] mentioning a
/// [`contract::Phone`].
#[derive(Clone, Debug, Serialize)]
pub struct Tenant {
    /// ID of the [`Contract`] the tenant was resolved from.
    pub contract_id: contract::Id,

    /// [`contract::Number`] of that [`Contract`].
    pub contract_number: contract::Number,

    /// Name of the tenant.
    pub name: String,

    /// [`contract::Phone`] of the tenant.
    pub phone: contract::Phone,
}

pub mod list {
    //! [`Contract`]s list definitions.

    use derive_more::{From, Into};

    use crate::domain::contract;
    #[cfg(doc)]
    use crate::domain::Contract;

    /// Selector of a [`Contract`]s list.
    #[derive(Clone, Debug, Default)]
    pub struct Selector {
        /// [`contract::Status`] to keep only.
        pub status: Option<contract::Status>,

        /// Substring to search for in [`Contract`] numbers, tenant names,
        /// tenant phones and property addresses, case-insensitively.
        pub search: Option<String>,
    }

    /// Total count of [`Contract`]s.
    #[derive(
        Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq, serde::Serialize,
    )]
    pub struct TotalCount(i32);
}
