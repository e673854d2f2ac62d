//! Expiry reminder definitions.

use common::{define_kind, unit, Date, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};

use crate::domain::contract;
#[cfg(doc)]
use crate::domain::Contract;

/// Scheduled notification about an upcoming [`Contract`] expiry.
#[derive(Clone, Debug, Serialize)]
pub struct Event {
    /// ID of this [`Event`].
    pub id: Id,

    /// ID of the [`Contract`] this [`Event`] belongs to.
    pub contract_id: contract::Id,

    /// [`Tier`] of this [`Event`].
    pub tier: Tier,

    /// [`Date`] this [`Event`] should fire on.
    pub reminder_date: Date,

    /// Message to be delivered.
    pub message: String,

    /// [`contract::Phone`] to deliver the message to, if known.
    pub phone: Option<contract::Phone>,

    /// Whether this [`Event`] has already been delivered.
    pub sent: bool,

    /// [`DateTimeOf`] when this [`Event`] was delivered, if it was.
    #[serde(with = "common::datetime::serde::rfc3339::option")]
    pub sent_at: Option<SentDateTime>,

    /// [`DateTimeOf`] when this [`Event`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: CreationDateTime,
}

impl Event {
    /// Marks this [`Event`] as delivered at the provided moment.
    ///
    /// No-op for already delivered [`Event`]s, keeping the original delivery
    /// time.
    pub fn mark_sent(&mut self, at: SentDateTime) {
        if !self.sent {
            self.sent = true;
            self.sent_at = Some(at);
        }
    }
}

/// New [`Event`] to be persisted.
#[derive(Clone, Debug)]
pub struct New {
    /// ID of the [`Contract`] the [`Event`] belongs to.
    pub contract_id: contract::Id,

    /// [`Tier`] of the [`Event`].
    pub tier: Tier,

    /// [`Date`] the [`Event`] should fire on.
    pub reminder_date: Date,

    /// Message to be delivered.
    pub message: String,

    /// [`contract::Phone`] to deliver the message to, if known.
    pub phone: Option<contract::Phone>,
}

impl New {
    /// Creates a new [`Event`] of a [`Contract`] out of the provided
    /// [`Draft`].
    #[must_use]
    pub fn from_draft(
        contract_id: contract::Id,
        phone: Option<contract::Phone>,
        draft: Draft,
    ) -> Self {
        Self {
            contract_id,
            tier: draft.tier,
            reminder_date: draft.reminder_date,
            message: draft.tier.message().to_owned(),
            phone,
        }
    }
}

/// Not-yet-persisted reminder produced by [`plan()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Draft {
    /// [`Tier`] of the reminder.
    pub tier: Tier,

    /// [`Date`] the reminder should fire on.
    pub reminder_date: Date,
}

/// Plans the reminder [`Draft`]s for a [`Contract`] ending on the provided
/// `end_date`.
///
/// One [`Draft`] per [`Tier`], each due [`Tier::lead_days()`] before the
/// `end_date`. Only strictly future ones relative to the `reference` are
/// kept, so near-expiry terms lose the tiers that are already in the past.
#[must_use]
pub fn plan(end_date: Date, reference: Date) -> Vec<Draft> {
    Tier::ALL
        .into_iter()
        .map(|tier| Draft {
            tier,
            reminder_date: end_date.minus_days(tier.lead_days()),
        })
        .filter(|draft| draft.reminder_date > reference)
        .collect()
}

/// Selector of undelivered [`Event`]s whose [`Date`] is not after the
/// carried one.
#[derive(Clone, Copy, Debug)]
pub struct Due(pub Date);

/// ID of an [`Event`].
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

define_kind! {
    #[doc = "Tier of an expiry reminder [`Event`], named after its lead \
             time."]
    enum Tier {
        #[doc = "Fires 60 days before expiry."]
        SixtyDay = 60,

        #[doc = "Fires 30 days before expiry."]
        ThirtyDay = 30,

        #[doc = "Fires 7 days before expiry."]
        SevenDay = 7,
    }
}

impl Tier {
    /// All the [`Tier`]s, in firing order.
    pub const ALL: [Self; 3] = [Self::SixtyDay, Self::ThirtyDay, Self::SevenDay];

    /// Number of days before expiry this [`Tier`] fires at.
    #[must_use]
    pub const fn lead_days(self) -> u16 {
        match self {
            Self::SixtyDay => 60,
            Self::ThirtyDay => 30,
            Self::SevenDay => 7,
        }
    }

    /// Message delivered by reminders of this [`Tier`].
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::SixtyDay => {
                "Your contract expires in 2 months. Please contact us to \
                 discuss renewal."
            }
            Self::ThirtyDay => {
                "Your contract expires in 1 month. Renewal paperwork should \
                 be started now."
            }
            Self::SevenDay => {
                "Urgent: your contract expires within a week! Contact us \
                 immediately."
            }
        }
    }
}

/// [`DateTimeOf`] when an [`Event`] was created.
pub type CreationDateTime = DateTimeOf<Event>;

/// [`DateTimeOf`] when an [`Event`] was delivered.
pub type SentDateTime = DateTimeOf<(Event, unit::Delivery)>;

#[cfg(test)]
mod spec {
    use common::Date;

    use super::{plan, Tier};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn plans_all_tiers_for_distant_expiry() {
        let drafts = plan(date("2025-12-31"), date("2025-01-01"));

        assert_eq!(drafts.len(), 3);
        assert_eq!(drafts[0].tier, Tier::SixtyDay);
        assert_eq!(drafts[0].reminder_date, date("2025-11-01"));
        assert_eq!(drafts[1].tier, Tier::ThirtyDay);
        assert_eq!(drafts[1].reminder_date, date("2025-12-01"));
        assert_eq!(drafts[2].tier, Tier::SevenDay);
        assert_eq!(drafts[2].reminder_date, date("2025-12-24"));
    }

    #[test]
    fn drops_tiers_already_in_the_past() {
        let drafts = plan(date("2025-01-20"), date("2025-01-01"));

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].tier, Tier::SevenDay);
    }

    #[test]
    fn past_boundary_is_strict() {
        // 7-day reminder lands exactly on the reference day.
        let drafts = plan(date("2025-01-08"), date("2025-01-01"));

        assert!(drafts.is_empty());
    }

    #[test]
    fn imminent_expiry_yields_nothing() {
        let drafts = plan(date("2025-01-04"), date("2025-01-01"));

        assert!(drafts.is_empty());
    }
}
