//! Raw [`Contract`] creation input.

use common::{date, money, Date, Percent};
use derive_more::{Display, Error as StdError};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{owner, property, tenant};
#[cfg(doc)]
use crate::domain::Contract;

use super::{Kind, Number, Phone};

/// Raw input for creating a new [`Contract`], as received from a caller.
///
/// Nothing is checked until the [`Candidate`] is validated: required fields
/// may be absent and dates are plain `YYYY-MM-DD` strings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Candidate {
    /// Business-facing [`Number`] of the [`Contract`]. Required.
    #[serde(rename = "contract_number")]
    pub number: Option<String>,

    /// ID of the related property.
    pub property_id: Option<property::Id>,

    /// ID of the related tenant.
    pub tenant_id: Option<tenant::Id>,

    /// ID of the related property owner.
    pub owner_id: Option<owner::Id>,

    /// Name of the tenant.
    pub tenant_name: Option<String>,

    /// [`Phone`] of the tenant.
    pub tenant_phone: Option<String>,

    /// Address of the related property.
    pub property_address: Option<String>,

    /// [`Kind`] of the [`Contract`]. Defaults to [`Kind::Rental`].
    pub kind: Option<Kind>,

    /// `YYYY-MM-DD` [`Date`] the term begins on. Required.
    pub start_date: Option<String>,

    /// `YYYY-MM-DD` [`Date`] the term ends on. Required.
    pub end_date: Option<String>,

    /// Monthly rent amount.
    ///
    /// When absent, no payment schedule is generated for the [`Contract`].
    pub monthly_rent: Option<Decimal>,

    /// Total amount over the whole term.
    pub total_amount: Option<Decimal>,

    /// Deposit amount.
    pub deposit_amount: Option<Decimal>,

    /// Agency commission rate. Defaults to 5%.
    pub commission_rate: Option<Percent>,

    /// [`money::Currency`] of the monetary amounts. Defaults to
    /// [`money::Currency::Omr`].
    pub currency: Option<money::Currency>,

    /// Free-text notes.
    pub notes: Option<String>,

    /// Who creates the [`Contract`].
    pub created_by: Option<String>,
}

impl Candidate {
    /// Checks that every required field of this [`Candidate`] is present and
    /// returns its business [`Number`] for uniqueness checking.
    ///
    /// Blank and whitespace-only values count as absent.
    ///
    /// # Errors
    ///
    /// With an [`Error::MissingField`] naming the first absent required
    /// field, or an [`Error::InvalidField`] if the provided number is
    /// malformed.
    pub fn required(&self) -> Result<Number, Error> {
        use Error as E;

        fn present(value: Option<&String>) -> Option<&str> {
            value.map(String::as_str).filter(|v| !v.trim().is_empty())
        }

        let number = present(self.number.as_ref())
            .ok_or(E::MissingField("contract_number"))?;
        let number =
            Number::new(number).ok_or(E::InvalidField("contract_number"))?;
        if present(self.start_date.as_ref()).is_none() {
            return Err(E::MissingField("start_date"));
        }
        if present(self.end_date.as_ref()).is_none() {
            return Err(E::MissingField("end_date"));
        }
        Ok(number)
    }

    /// Validates this [`Candidate`] into a [`Valid`] one.
    ///
    /// Field presence is checked first, then date syntax, then the date
    /// range, so the first violation wins.
    ///
    /// # Errors
    ///
    /// With the first encountered [`Error`].
    pub fn validate(self) -> Result<Valid, Error> {
        use Error as E;

        let number = self.required()?;

        let end_date = parse_date("end_date", self.end_date.as_deref())?;
        let start_date = parse_date("start_date", self.start_date.as_deref())?;
        if start_date >= end_date {
            return Err(E::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        let tenant_phone = self
            .tenant_phone
            .filter(|p| !p.is_empty())
            .map(|p| Phone::new(p).ok_or(E::InvalidField("tenant_phone")))
            .transpose()?;
        let commission_rate = match self.commission_rate {
            Some(rate) => rate,
            None => Percent::new(Decimal::from(5))
                .unwrap_or_else(|| unreachable!("5% is a valid `Percent`")),
        };

        Ok(Valid {
            number,
            property_id: self.property_id,
            tenant_id: self.tenant_id,
            owner_id: self.owner_id,
            tenant_name: self.tenant_name.unwrap_or_default(),
            tenant_phone,
            property_address: self.property_address.unwrap_or_default(),
            kind: self.kind.unwrap_or(Kind::Rental),
            start_date,
            end_date,
            monthly_rent: self.monthly_rent,
            total_amount: self.total_amount.unwrap_or_default(),
            deposit_amount: self.deposit_amount.unwrap_or_default(),
            commission_rate,
            currency: self.currency.unwrap_or(money::Currency::Omr),
            notes: self.notes.unwrap_or_default(),
            created_by: self
                .created_by
                .unwrap_or_else(|| "system".to_owned()),
        })
    }
}

/// Parses the named `YYYY-MM-DD` date field.
fn parse_date(field: &'static str, value: Option<&str>) -> Result<Date, Error> {
    let value = value.ok_or(Error::MissingField(field))?;
    Date::parse(value).map_err(|source| Error::MalformedDate { field, source })
}

/// Validated [`Candidate`] with every field parsed and defaulted.
#[derive(Clone, Debug)]
pub struct Valid {
    /// Business-facing [`Number`] of the [`Contract`].
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

    /// [`Date`] the term begins on.
    pub start_date: Date,

    /// [`Date`] the term ends on.
    pub end_date: Date,

    /// Monthly rent amount, if set.
    pub monthly_rent: Option<Decimal>,

    /// Total amount over the whole term.
    pub total_amount: Decimal,

    /// Deposit amount.
    pub deposit_amount: Decimal,

    /// Agency commission rate.
    pub commission_rate: Percent,

    /// [`money::Currency`] of the monetary amounts.
    pub currency: money::Currency,

    /// Free-text notes.
    pub notes: String,

    /// Who creates the [`Contract`].
    pub created_by: String,
}

/// Error of validating a [`Candidate`].
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Required field is absent.
    #[display("required field `{_0}` is missing")]
    MissingField(#[error(not(source))] &'static str),

    /// Provided field value is malformed.
    #[display("field `{_0}` is malformed")]
    InvalidField(#[error(not(source))] &'static str),

    /// Provided date field is not a valid `YYYY-MM-DD` date.
    #[display("field `{field}` is not a valid date: {source}")]
    MalformedDate {
        /// Name of the malformed field.
        field: &'static str,

        /// Cause of the failure.
        source: date::ParseError,
    },

    /// Term start does not precede its end.
    #[display("start date `{start}` must precede end date `{end}`")]
    InvalidDateRange {
        /// Start of the term.
        start: Date,

        /// End of the term.
        end: Date,
    },
}

#[cfg(test)]
mod spec {
    use common::money::Currency;

    use super::{Candidate, Error, Kind};

    fn filled() -> Candidate {
        Candidate {
            number: Some("C-100".to_owned()),
            tenant_name: Some("Ahmed".to_owned()),
            tenant_phone: Some("+96890000000".to_owned()),
            property_address: Some("Muscat, Al Khuwair".to_owned()),
            start_date: Some("2025-01-01".to_owned()),
            end_date: Some("2025-06-30".to_owned()),
            monthly_rent: Some(500.into()),
            ..Candidate::default()
        }
    }

    #[test]
    fn accepts_complete_input() {
        let valid = filled().validate().unwrap();

        assert_eq!(valid.number.to_string(), "C-100");
        assert_eq!(valid.start_date.to_string(), "2025-01-01");
        assert_eq!(valid.end_date.to_string(), "2025-06-30");
        assert_eq!(valid.monthly_rent, Some(500.into()));
    }

    #[test]
    fn applies_defaults() {
        let valid = filled().validate().unwrap();

        assert_eq!(valid.kind, Kind::Rental);
        assert_eq!(valid.currency, Currency::Omr);
        assert_eq!(valid.commission_rate, "5".parse().unwrap());
        assert_eq!(valid.created_by, "system");
        assert_eq!(valid.total_amount, 0.into());
    }

    #[test]
    fn first_missing_field_wins() {
        let candidate = Candidate {
            number: None,
            start_date: None,
            ..filled()
        };

        assert!(matches!(
            candidate.validate(),
            Err(Error::MissingField("contract_number")),
        ));

        let candidate = Candidate {
            start_date: None,
            ..filled()
        };

        assert!(matches!(
            candidate.validate(),
            Err(Error::MissingField("start_date")),
        ));

        let candidate = Candidate {
            end_date: None,
            ..filled()
        };

        assert!(matches!(
            candidate.validate(),
            Err(Error::MissingField("end_date")),
        ));
    }

    #[test]
    fn treats_blank_required_fields_as_missing() {
        let candidate = Candidate {
            end_date: Some(String::new()),
            ..filled()
        };

        assert!(matches!(
            candidate.required(),
            Err(Error::MissingField("end_date")),
        ));

        let candidate = Candidate {
            number: Some("   ".to_owned()),
            ..filled()
        };

        assert!(matches!(
            candidate.validate(),
            Err(Error::MissingField("contract_number")),
        ));

        let candidate = Candidate {
            start_date: Some(" ".to_owned()),
            ..filled()
        };

        assert!(matches!(
            candidate.validate(),
            Err(Error::MissingField("start_date")),
        ));
    }

    #[test]
    fn rejects_malformed_dates() {
        let candidate = Candidate {
            end_date: Some("30/06/2025".to_owned()),
            ..filled()
        };

        assert!(matches!(
            candidate.validate(),
            Err(Error::MalformedDate {
                field: "end_date",
                ..
            }),
        ));
    }

    #[test]
    fn rejects_inverted_term() {
        let candidate = Candidate {
            start_date: Some("2025-06-30".to_owned()),
            end_date: Some("2025-01-01".to_owned()),
            ..filled()
        };

        assert!(matches!(
            candidate.validate(),
            Err(Error::InvalidDateRange { .. }),
        ));

        let candidate = Candidate {
            start_date: Some("2025-01-01".to_owned()),
            end_date: Some("2025-01-01".to_owned()),
            ..filled()
        };

        assert!(matches!(
            candidate.validate(),
            Err(Error::InvalidDateRange { .. }),
        ));
    }
}
