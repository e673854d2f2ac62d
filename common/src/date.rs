//! Calendar date utilities.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{fmt, ops, str::FromStr};

use derive_more::{Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Month,
    OffsetDateTime,
};

/// `YYYY-MM-DD` format description of a [`Date`].
const FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// Calendar date without a time component.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Returns the current UTC [`Date`].
    #[must_use]
    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components do not form a valid date.
    #[must_use]
    pub fn from_calendar(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Parses a [`Date`] from the provided `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// If the string is not a valid `YYYY-MM-DD` date.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        time::Date::parse(input, FORMAT).map(Self).map_err(ParseError)
    }

    /// Returns the first day of the month this [`Date`] falls in.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn first_of_month(self) -> Self {
        Self(self.0.replace_day(1).expect("infallible"))
    }

    /// Returns this [`Date`] advanced by exactly one calendar month, with the
    /// day-of-month clamped to the target month's length.
    ///
    /// December rolls over into January of the next year.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn next_month(self) -> Self {
        let (year, month) = match self.0.month() {
            Month::December => (self.0.year() + 1, Month::January),
            m => (self.0.year(), m.next()),
        };
        let day = self.0.day().min(month.length(year));
        Self(
            time::Date::from_calendar_date(year, month, day)
                .expect("day clamped to month length"),
        )
    }

    /// Returns this [`Date`] moved `days` days back.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn minus_days(self, days: u16) -> Self {
        Self(
            self.0
                .checked_sub(time::Duration::days(days.into()))
                .expect("date out of range"),
        )
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.format(FORMAT).expect("infallible"))
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Number of whole days between two [`Date`]s.
impl ops::Sub for Date {
    type Output = i64;

    fn sub(self, rhs: Self) -> Self::Output {
        (self.0 - rhs.0).whole_days()
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(date)
    }
}

impl From<Date> for time::Date {
    fn from(date: Date) -> Self {
        date.0
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid `YYYY-MM-DD` date: {_0}")]
pub struct ParseError(time::error::Parse);

#[cfg(feature = "postgres")]
impl FromSql<'_> for Date {
    accepts!(DATE);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::Date::from_sql(ty, raw).map(Self)
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Date {
    accepts!(DATE);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.0.to_sql(ty, w)
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use ::serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use super::Date;

    impl ::serde::Serialize for Date {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Date {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            Self::parse(&String::deserialize(deserializer)?)
                .map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Date;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_displays() {
        assert_eq!(date("2025-01-01").to_string(), "2025-01-01");
        assert_eq!(date("2025-12-31").to_string(), "2025-12-31");

        assert!(Date::parse("2025-13-01").is_err());
        assert!(Date::parse("2025-02-30").is_err());
        assert!(Date::parse("01/02/2025").is_err());
        assert!(Date::parse("").is_err());
    }

    #[test]
    fn advances_months_with_year_rollover() {
        assert_eq!(date("2025-01-15").next_month(), date("2025-02-15"));
        assert_eq!(date("2025-12-15").next_month(), date("2026-01-15"));
    }

    #[test]
    fn clamps_day_to_target_month_length() {
        assert_eq!(date("2025-01-31").next_month(), date("2025-02-28"));
        assert_eq!(date("2024-01-31").next_month(), date("2024-02-29"));
        assert_eq!(date("2025-03-31").next_month(), date("2025-04-30"));
    }

    #[test]
    fn normalizes_to_first_of_month() {
        assert_eq!(date("2025-06-17").first_of_month(), date("2025-06-01"));
        assert_eq!(date("2025-06-01").first_of_month(), date("2025-06-01"));
    }

    #[test]
    fn subtracts_to_whole_days() {
        assert_eq!(date("2025-06-30") - date("2025-06-01"), 29);
        assert_eq!(date("2025-06-01") - date("2025-06-30"), -29);
        assert_eq!(date("2025-03-01") - date("2025-02-01"), 28);
    }

    #[test]
    fn moves_days_back() {
        assert_eq!(date("2025-03-02").minus_days(60), date("2025-01-01"));
        assert_eq!(date("2025-01-08").minus_days(7), date("2025-01-01"));
    }
}
