//! [`Database`]-related implementations.

#[cfg(feature = "postgres")]
pub mod postgres;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;

/// Database operation.
pub use common::Handler as Database;

/// Name of the store constraint keeping [`contract::Number`]s unique.
///
/// [`contract::Number`]: crate::domain::contract::Number
pub const CONTRACT_NUMBER_CONSTRAINT: &str = "contracts_number_key";

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "postgres")]
    /// [`Postgres`] error.
    Postgres(postgres::Error),

    /// Unique violation of the named store constraint, raised by in-memory
    /// stores standing in for a real one.
    #[cfg(test)]
    #[display("unique violation of `{_0}` constraint")]
    #[from(ignore)]
    UniqueViolation(#[error(not(source))] &'static str),
}

impl Error {
    /// Checks if the error is a unique violation of the specified constraint.
    #[must_use]
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres(e) => e.is_unique_violation(constraint),
            #[cfg(test)]
            Self::UniqueViolation(name) => {
                constraint.map_or(true, |c| c == *name)
            }
            #[cfg(not(any(feature = "postgres", test)))]
            _ => {
                let _ = constraint;
                false
            }
        }
    }
}
