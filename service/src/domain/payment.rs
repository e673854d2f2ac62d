//! Payment-related definitions.

use common::{define_kind, Date, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::contract;
#[cfg(doc)]
use crate::domain::Contract;

/// Single scheduled payment of a [`Contract`].
#[derive(Clone, Debug, Serialize)]
pub struct Entry {
    /// ID of this [`Entry`].
    pub id: Id,

    /// ID of the [`Contract`] this [`Entry`] belongs to.
    pub contract_id: contract::Id,

    /// Amount to be paid.
    pub amount: Decimal,

    /// [`Date`] the payment is due on.
    pub due_date: Date,

    /// [`Date`] the payment was actually made on, if it was.
    pub payment_date: Option<Date>,

    /// [`Kind`] of this [`Entry`].
    pub kind: Kind,

    /// [`Status`] of this [`Entry`].
    pub status: Status,

    /// Method the payment was made with (cash, transfer, etc).
    pub method: Option<String>,

    /// External reference of the payment (receipt or transfer number).
    pub reference: Option<String>,

    /// Free-text notes.
    pub notes: String,

    /// [`DateTimeOf`] when this [`Entry`] was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: CreationDateTime,
}

impl Entry {
    /// Records this [`Entry`] as paid on the provided [`Date`].
    ///
    /// The method and reference are replaced with the provided ones, even
    /// when re-recording an already paid [`Entry`].
    pub fn record(
        &mut self,
        on: Date,
        method: Option<String>,
        reference: Option<String>,
    ) {
        self.status = Status::Paid;
        self.payment_date = Some(on);
        self.method = method;
        self.reference = reference;
    }
}

/// New [`Entry`] to be persisted.
#[derive(Clone, Debug)]
pub struct New {
    /// ID of the [`Contract`] the [`Entry`] belongs to.
    pub contract_id: contract::Id,

    /// Amount to be paid.
    pub amount: Decimal,

    /// [`Date`] the payment is due on.
    pub due_date: Date,

    /// [`Kind`] of the [`Entry`].
    pub kind: Kind,

    /// [`Status`] of the [`Entry`].
    pub status: Status,
}

impl New {
    /// Creates a new pending rent [`Entry`] of a [`Contract`] out of the
    /// provided [`Draft`].
    #[must_use]
    pub fn rent(contract_id: contract::Id, draft: Draft) -> Self {
        Self {
            contract_id,
            amount: draft.amount,
            due_date: draft.due_date,
            kind: Kind::Rent,
            status: Status::Pending,
        }
    }
}

/// Not-yet-persisted schedule entry produced by [`generate_schedule()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Draft {
    /// [`Date`] the payment is due on.
    pub due_date: Date,

    /// Amount to be paid.
    pub amount: Decimal,
}

/// Generates a monthly payment schedule over the provided term.
///
/// One [`Draft`] is emitted per calendar month touched by the term, due on
/// the first day of that month, the boundary months included.
#[must_use]
pub fn generate_schedule(start: Date, end: Date, rent: Decimal) -> Vec<Draft> {
    let mut schedule = Vec::new();
    let mut current = start;
    while current <= end {
        schedule.push(Draft {
            due_date: current.first_of_month(),
            amount: rent,
        });
        current = current.next_month();
    }
    schedule
}

/// Selector of [`Status::Pending`] [`Entry`]s whose due [`Date`] is strictly
/// before the carried one.
#[derive(Clone, Copy, Debug)]
pub struct Overdue(pub Date);

/// Operation switching every [`Entry`] matched by [`Overdue`] to
/// [`Status::Overdue`].
#[derive(Clone, Copy, Debug)]
pub struct MarkOverdue(pub Date);

/// ID of an [`Entry`].
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
    #[doc = "Kind of a payment [`Entry`]."]
    enum Kind {
        #[doc = "Regular rent payment."]
        Rent = 1,

        #[doc = "Deposit payment."]
        Deposit = 2,
    }
}

define_kind! {
    #[doc = "Status of a payment [`Entry`]."]
    enum Status {
        #[doc = "Payment is awaited."]
        Pending = 1,

        #[doc = "Payment has been received."]
        Paid = 2,

        #[doc = "Payment is past its due [`Date`]."]
        Overdue = 3,
    }
}

/// [`DateTimeOf`] when an [`Entry`] was created.
pub type CreationDateTime = DateTimeOf<Entry>;

#[cfg(test)]
mod spec {
    use common::Date;

    use super::generate_schedule;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn emits_entry_per_month_on_the_first() {
        let schedule =
            generate_schedule(date("2025-01-01"), date("2025-06-30"), 500.into());

        assert_eq!(schedule.len(), 6);
        for (entry, due) in schedule.iter().zip([
            "2025-01-01",
            "2025-02-01",
            "2025-03-01",
            "2025-04-01",
            "2025-05-01",
            "2025-06-01",
        ]) {
            assert_eq!(entry.due_date, date(due));
            assert_eq!(entry.amount, 500.into());
        }
    }

    #[test]
    fn single_month_term_yields_one_entry() {
        let schedule =
            generate_schedule(date("2025-03-10"), date("2025-03-20"), 350.into());

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].due_date, date("2025-03-01"));
    }

    #[test]
    fn rolls_over_year_boundary() {
        let schedule =
            generate_schedule(date("2024-11-15"), date("2025-02-15"), 100.into());

        let due = schedule.iter().map(|e| e.due_date.to_string());
        assert_eq!(
            due.collect::<Vec<_>>(),
            ["2024-11-01", "2024-12-01", "2025-01-01", "2025-02-01"],
        );
    }

    #[test]
    fn term_end_is_inclusive() {
        let schedule =
            generate_schedule(date("2025-01-01"), date("2025-02-01"), 100.into());

        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn zero_rent_still_schedules() {
        let schedule =
            generate_schedule(date("2025-01-01"), date("2025-01-31"), 0.into());

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].amount, 0.into());
    }
}
