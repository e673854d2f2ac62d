//! Domain definitions.

pub mod contract;
pub mod payment;
pub mod reminder;
pub mod renewal;

pub use self::contract::Contract;

pub mod property {
    //! Property identifiers.
    //!
    //! The properties themselves are owned by an external collaborator; only
    //! their identifiers cross this boundary.

    use derive_more::{Display, From, FromStr, Into};
    #[cfg(feature = "postgres")]
    use postgres_types::{FromSql, ToSql};
    use serde::{Deserialize, Serialize};

    /// ID of a property.
    #[derive(
        Clone,
        Copy,
        Debug,
        Deserialize,
        Display,
        Eq,
        From,
        FromStr,
        Hash,
        Into,
        PartialEq,
        Serialize,
    )]
    #[cfg_attr(
        feature = "postgres",
        derive(ToSql, FromSql),
        postgres(transparent)
    )]
    pub struct Id(i32);
}

pub mod tenant {
    //! Tenant identifiers.
    //!
    //! The tenants themselves are owned by an external collaborator; only
    //! their identifiers cross this boundary.

    use derive_more::{Display, From, FromStr, Into};
    #[cfg(feature = "postgres")]
    use postgres_types::{FromSql, ToSql};
    use serde::{Deserialize, Serialize};

    /// ID of a tenant.
    #[derive(
        Clone,
        Copy,
        Debug,
        Deserialize,
        Display,
        Eq,
        From,
        FromStr,
        Hash,
        Into,
        PartialEq,
        Serialize,
    )]
    #[cfg_attr(
        feature = "postgres",
        derive(ToSql, FromSql),
        postgres(transparent)
    )]
    pub struct Id(i32);
}

pub mod owner {
    //! Property-owner identifiers.
    //!
    //! The owners themselves are owned by an external collaborator; only
    //! their identifiers cross this boundary.

    use derive_more::{Display, From, FromStr, Into};
    #[cfg(feature = "postgres")]
    use postgres_types::{FromSql, ToSql};
    use serde::{Deserialize, Serialize};

    /// ID of a property owner.
    #[derive(
        Clone,
        Copy,
        Debug,
        Deserialize,
        Display,
        Eq,
        From,
        FromStr,
        Hash,
        Into,
        PartialEq,
        Serialize,
    )]
    #[cfg_attr(
        feature = "postgres",
        derive(ToSql, FromSql),
        postgres(transparent)
    )]
    pub struct Id(i32);
}
