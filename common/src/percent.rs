//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Floating-point percentage.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided values is
    /// greater than `0` and less than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            #[expect(
                clippy::allow_attributes,
                reason = "TODO: Remove once clippy is fixed"
            )]
            #[allow(unsafe_code, reason = "invariants checked already")]
            Some(unsafe { Self::new_unchecked(val) })
        }
    }

    /// Creates a new [`Percent`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must be greater than `0` and less than `100`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use ::serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use rust_decimal::Decimal;

    use super::Percent;

    impl ::serde::Serialize for Percent {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            ::serde::Serialize::serialize(&self.0, serializer)
        }
    }

    impl<'de> Deserialize<'de> for Percent {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            let val = <Decimal as Deserialize>::deserialize(deserializer)?;
            Self::new(val).ok_or_else(|| {
                D::Error::custom("percent value out of `0..=100` range")
            })
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod spec {
    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn deserializes_within_range_only() {
        let percent: Percent = serde_json::from_str("5").unwrap();
        assert_eq!(percent, Percent::new(Decimal::from(5)).unwrap());

        let percent: Percent = serde_json::from_str("\"99.5\"").unwrap();
        assert_eq!(percent, "99.5".parse().unwrap());

        assert!(serde_json::from_str::<Percent>("101").is_err());
        assert!(serde_json::from_str::<Percent>("-1").is_err());
    }

    #[test]
    fn serializes_transparently() {
        let percent = Percent::new(Decimal::from(5)).unwrap();

        assert_eq!(
            serde_json::to_string(&percent).unwrap(),
            serde_json::to_string(&Decimal::from(5)).unwrap(),
        );
    }
}
