//! [`Contract`] definitions.

pub mod candidate;

use common::{
    define_kind, money, unit, Date, DateTime, DateTimeOf, Money, Percent,
};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

use crate::domain::{owner, property, tenant};

pub use self::candidate::Candidate;

/// Number of days before expiry at which a [`Contract`] counts as expiring.
pub const EXPIRY_THRESHOLD_DAYS: i64 = 30;

/// Rental agreement between a property and a tenant with a fixed date range
/// and monthly rent.
#[derive(Clone, Debug, Serialize)]
pub struct Contract {
    /// ID of this [`Contract`].
    pub id: Id,

    /// Unique business-facing [`Number`] of this [`Contract`].
    pub number: Number,

    /// ID of the property this [`Contract`] is related to.
    pub property_id: Option<property::Id>,

    /// ID of the tenant this [`Contract`] is related to.
    pub tenant_id: Option<tenant::Id>,

    /// ID of the property owner this [`Contract`] is related to.
    pub owner_id: Option<owner::Id>,

    /// Name of the tenant.
    pub tenant_name: String,

    /// [`Phone`] of the tenant.
    pub tenant_phone: Option<Phone>,

    /// Address of the related property.
    pub property_address: String,

    /// [`Kind`] of this [`Contract`].
    pub kind: Kind,

    /// Current [`Status`] of this [`Contract`].
    pub status: Status,

    /// [`Date`] the term of this [`Contract`] begins on.
    pub start_date: Date,

    /// [`Date`] the term of this [`Contract`] ends on.
    pub end_date: Date,

    /// Monthly rent amount.
    pub monthly_rent: rust_decimal::Decimal,

    /// Total amount over the whole term.
    pub total_amount: rust_decimal::Decimal,

    /// Deposit paid at the beginning of the term.
    pub deposit_amount: rust_decimal::Decimal,

    /// Agency commission rate.
    pub commission_rate: Percent,

    /// [`money::Currency`] of the monetary amounts.
    pub currency: money::Currency,

    /// Free-text notes, appended to by status updates.
    pub notes: String,

    /// Who created this [`Contract`].
    pub created_by: String,

    /// [`DateTime`] when this [`Contract`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Contract`] was last updated.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub updated_at: UpdateDateTime,
}

impl Contract {
    /// Returns the number of days remaining until this [`Contract`] expires,
    /// relative to the provided `today`.
    ///
    /// Negative for already expired terms. Always recomputed from the stored
    /// `end_date`, never read back from a snapshot.
    #[must_use]
    pub fn days_remaining(&self, today: Date) -> i64 {
        self.end_date - today
    }

    /// Indicates whether this [`Contract`] expires within
    /// [`EXPIRY_THRESHOLD_DAYS`] of the provided `today`.
    #[must_use]
    pub fn is_expiring(&self, today: Date) -> bool {
        self.days_remaining(today) <= EXPIRY_THRESHOLD_DAYS
    }

    /// Returns the monthly rent of this [`Contract`] as [`Money`].
    #[must_use]
    pub fn rent(&self) -> Money {
        Money {
            amount: self.monthly_rent,
            currency: self.currency,
        }
    }

    /// Switches this [`Contract`] to the provided [`Status`], appending a
    /// timestamped line to its notes.
    ///
    /// Notes are concatenated, never replaced. Any [`Status`] is accepted:
    /// no transition rules are enforced.
    pub fn transition(&mut self, status: Status, note: &str, at: DateTime) {
        self.status = status;
        self.notes.push_str(&format!(
            "\n{date}: status changed to {status}. {note}",
            date = at.date(),
        ));
        self.updated_at = at.coerce();
    }
}

/// New [`Contract`] to be persisted.
///
/// Carries the creation-time snapshot of the derived fields alongside the
/// validated input.
#[derive(Clone, Debug)]
pub struct New {
    /// Unique business-facing [`Number`].
    pub number: Number,

    /// ID of the related property.
    pub property_id: Option<property::Id>,

    /// ID of the related tenant.
    pub tenant_id: Option<tenant::Id>,

    /// ID of the related property owner.
    pub owner_id: Option<owner::Id>,

    /// Name of the tenant.
    pub tenant_name: String,

    /// [`Phone`] of the tenant.
    pub tenant_phone: Option<Phone>,

    /// Address of the related property.
    pub property_address: String,

    /// [`Kind`] of the [`Contract`].
    pub kind: Kind,

    /// Initial [`Status`].
    pub status: Status,

    /// [`Date`] the term begins on.
    pub start_date: Date,

    /// [`Date`] the term ends on.
    pub end_date: Date,

    /// Monthly rent amount.
    pub monthly_rent: rust_decimal::Decimal,

    /// Total amount over the whole term.
    pub total_amount: rust_decimal::Decimal,

    /// Deposit amount.
    pub deposit_amount: rust_decimal::Decimal,

    /// Agency commission rate.
    pub commission_rate: Percent,

    /// [`money::Currency`] of the monetary amounts.
    pub currency: money::Currency,

    /// Free-text notes.
    pub notes: String,

    /// Who creates the [`Contract`].
    pub created_by: String,

    /// Snapshot of days remaining at creation time.
    pub days_remaining: i32,

    /// Snapshot of the expiring flag at creation time.
    pub is_expiring: bool,

    /// [`DateTime`] of the creation.
    pub created_at: CreationDateTime,
}

impl New {
    /// Builds a [`New`] contract out of the provided validated [`Candidate`],
    /// snapshotting the derived fields against the creation time.
    #[must_use]
    pub fn from_candidate(
        valid: candidate::Valid,
        at: CreationDateTime,
    ) -> Self {
        let days = valid.end_date - at.date();
        Self {
            number: valid.number,
            property_id: valid.property_id,
            tenant_id: valid.tenant_id,
            owner_id: valid.owner_id,
            tenant_name: valid.tenant_name,
            tenant_phone: valid.tenant_phone,
            property_address: valid.property_address,
            kind: valid.kind,
            status: Status::Active,
            start_date: valid.start_date,
            end_date: valid.end_date,
            monthly_rent: valid.monthly_rent.unwrap_or_default(),
            total_amount: valid.total_amount,
            deposit_amount: valid.deposit_amount,
            commission_rate: valid.commission_rate,
            currency: valid.currency,
            notes: valid.notes,
            created_by: valid.created_by,
            days_remaining: i32::try_from(days).unwrap_or(i32::MAX),
            is_expiring: days <= EXPIRY_THRESHOLD_DAYS,
            created_at: at,
        }
    }
}

/// ID of a [`Contract`].
///
/// Assigned by the persistent store.
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
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(i32);

/// Unique business-facing number of a [`Contract`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Number(String);

impl Number {
    /// Creates a new [`Number`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Number`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        number.trim() == number && !number.is_empty() && number.len() <= 64
    }
}

impl std::str::FromStr for Number {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Number`")
    }
}

/// Phone number of a tenant.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `phone` is valid.
    #[must_use]
    pub fn new(phone: impl Into<String>) -> Option<Self> {
        let phone = phone.into();
        Self::check(&phone).then_some(Self(phone))
    }

    /// Checks whether the given `phone` is a valid [`Phone`].
    fn check(phone: impl AsRef<str>) -> bool {
        let phone = phone.as_ref();
        phone.trim() == phone && !phone.is_empty() && phone.len() <= 32
    }
}

impl std::str::FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

define_kind! {
    #[doc = "Kind of a [`Contract`]."]
    enum Kind {
        #[doc = "Rental [`Contract`]."]
        Rental = 1,

        #[doc = "Sale [`Contract`]."]
        Sale = 2,
    }
}

define_kind! {
    #[doc = "Status of a [`Contract`]."]
    enum Status {
        #[doc = "The [`Contract`] is in force."]
        Active = 1,

        #[doc = "The [`Contract`] term has ended."]
        Expired = 2,

        #[doc = "The [`Contract`] was cancelled before its term ended."]
        Cancelled = 3,

        #[doc = "The [`Contract`] was replaced by a renewal."]
        Renewed = 4,

        #[doc = "The [`Contract`] is not in force yet."]
        Pending = 5,
    }
}

/// [`DateTime`] when a [`Contract`] was created.
pub type CreationDateTime = DateTimeOf<(Contract, unit::Creation)>;

/// [`DateTime`] when a [`Contract`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Contract, unit::Update)>;

#[cfg(test)]
mod spec {
    use common::{Date, DateTime};

    use super::{Kind, Number, Phone, Status};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn contract(end_date: &str) -> super::Contract {
        super::Contract {
            id: 1.into(),
            number: "C-100".parse().unwrap(),
            property_id: None,
            tenant_id: None,
            owner_id: None,
            tenant_name: "Ahmed".into(),
            tenant_phone: None,
            property_address: "Muscat".into(),
            kind: Kind::Rental,
            status: Status::Active,
            start_date: date("2025-01-01"),
            end_date: date(end_date),
            monthly_rent: 500.into(),
            total_amount: 3000.into(),
            deposit_amount: 500.into(),
            commission_rate: "5".parse().unwrap(),
            currency: common::money::Currency::Omr,
            notes: String::new(),
            created_by: "system".into(),
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    #[test]
    fn recomputes_days_remaining_per_call() {
        let c = contract("2025-06-30");

        assert_eq!(c.days_remaining(date("2025-06-01")), 29);
        assert_eq!(c.days_remaining(date("2025-06-30")), 0);
        assert_eq!(c.days_remaining(date("2025-07-10")), -10);
    }

    #[test]
    fn expiring_within_thirty_days() {
        let c = contract("2025-06-30");

        assert!(!c.is_expiring(date("2025-05-30")));
        assert!(c.is_expiring(date("2025-05-31")));
        assert!(c.is_expiring(date("2025-06-30")));
        assert!(c.is_expiring(date("2025-07-01")));
    }

    #[test]
    fn transition_appends_notes() {
        let mut c = contract("2025-06-30");
        c.notes = "initial".into();

        let at = DateTime::now();
        c.transition(Status::Cancelled, "tenant moved out", at);

        assert_eq!(c.status, Status::Cancelled);
        assert!(c.notes.starts_with("initial\n"));
        assert!(c.notes.contains("status changed to CANCELLED"));
        assert!(c.notes.contains("tenant moved out"));
        assert_eq!(c.updated_at, at.coerce());
    }

    #[test]
    fn kinds_serialize_as_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&Status::Active).unwrap(),
            "\"ACTIVE\"",
        );
        assert_eq!(
            serde_json::from_str::<Kind>("\"RENTAL\"").unwrap(),
            Kind::Rental,
        );
        assert_eq!(
            serde_json::from_str::<Status>("\"CANCELLED\"").unwrap(),
            Status::Cancelled,
        );
    }

    #[test]
    fn number_validation() {
        assert!(Number::new("C-100").is_some());
        assert!(Number::new("").is_none());
        assert!(Number::new(" C-100").is_none());
        assert!(Number::new("x".repeat(65)).is_none());
    }

    #[test]
    fn phone_validation() {
        assert!(Phone::new("+96890000000").is_some());
        assert!(Phone::new("").is_none());
        assert!(Phone::new("x".repeat(33)).is_none());
    }
}
