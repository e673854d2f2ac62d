//! Renewal history definitions.

use common::{Date, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::contract;
#[cfg(doc)]
use crate::domain::Contract;

/// Single renewal of a [`Contract`], kept as history.
#[derive(Clone, Debug, Serialize)]
pub struct Record {
    /// ID of this [`Record`].
    pub id: Id,

    /// ID of the renewed [`Contract`].
    pub contract_id: contract::Id,

    /// [`Date`] the term ended on before the renewal.
    pub old_end_date: Date,

    /// [`Date`] the term ends on after the renewal.
    pub new_end_date: Date,

    /// Monthly rent before the renewal, if it was set.
    pub old_rent: Option<Decimal>,

    /// Monthly rent after the renewal, if it changed.
    pub new_rent: Option<Decimal>,

    /// [`DateTimeOf`] when the renewal happened.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub renewed_at: DateTimeOf<Record>,

    /// Free-text notes.
    pub notes: String,

    /// Who performed the renewal.
    pub created_by: String,
}

/// ID of a [`Record`].
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
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Id(i32);
