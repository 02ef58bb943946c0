//! Field-level checks for display next to the inputs.
//!
//! Validation never changes what [`calculate_property_data`] produces; a scenario
//! with errors still has a complete preview.
//!
//! [`calculate_property_data`]: crate::calculate_property_data

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Serialize, Serializer};

use crate::calculate::{MAX_LOAN_TERM_YEARS, MIN_LOAN_TERM_YEARS};
use crate::property::PropertyData;

pub const MAX_INTEREST_RATE: Decimal = dec!(20);
pub const MAX_CAPITAL_GROWTH: Decimal = dec!(20);
pub const MAX_RENTAL_GROWTH: Decimal = dec!(100);
pub const MAX_QUARTERLY_STRATA: Decimal = dec!(25_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    PropertyValue,
    Deposit,
    PropertyType,
    LoanTerm,
    InterestRate,
    CapitalGrowth,
    RentalGrowth,
    WeeklyRent,
    StrataFees,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::PropertyValue,
        Field::Deposit,
        Field::PropertyType,
        Field::LoanTerm,
        Field::InterestRate,
        Field::CapitalGrowth,
        Field::RentalGrowth,
        Field::WeeklyRent,
        Field::StrataFees,
    ];

    /// Key the field is reported under in serialized errors.
    pub fn key(self) -> &'static str {
        match self {
            Field::PropertyValue => "propertyValue",
            Field::Deposit => "deposit",
            Field::PropertyType => "propertyType",
            Field::LoanTerm => "loanTerm",
            Field::InterestRate => "interestRate",
            Field::CapitalGrowth => "capitalGrowth",
            Field::RentalGrowth => "rentalGrowth",
            Field::WeeklyRent => "weeklyRent",
            Field::StrataFees => "strataFees",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a valid property value")]
    InvalidPropertyValue,
    #[error("Deposit cannot be more than the property value")]
    DepositExceedsValue,
    #[error("Please select a property type")]
    MissingPropertyType,
    #[error("Loan term must be between {min} and {max} years")]
    LoanTermOutOfRange { min: u32, max: u32 },
    #[error("Interest rate must be above 0% and no more than {max}%")]
    InterestRateOutOfRange { max: Decimal },
    #[error("Capital growth must be between 0% and {max}%")]
    CapitalGrowthOutOfRange { max: Decimal },
    #[error("Rental growth must be between $0 and ${max} per week")]
    RentalGrowthOutOfRange { max: Decimal },
    #[error("Please enter the expected weekly rent")]
    MissingWeeklyRent,
    #[error("Strata fees are per quarter and cannot exceed ${max}")]
    StrataFeesTooHigh { max: Decimal },
}

/// Validation messages keyed by field; empty when the scenario is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyDataErrors(BTreeMap<Field, ValidationError>);

impl PropertyDataErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    fn insert(&mut self, field: Field, error: ValidationError) {
        self.0.insert(field, error);
    }
}

impl Serialize for PropertyDataErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(field, error)| (field, error.to_string())))
    }
}

/// Checks a scenario for values the user should correct.
pub fn validate_property_data(data: &PropertyData) -> PropertyDataErrors {
    let mut errors = PropertyDataErrors::default();

    if data.property_value <= Decimal::ZERO {
        errors.insert(Field::PropertyValue, ValidationError::InvalidPropertyValue);
    }
    if data.deposit > data.property_value && data.property_value > Decimal::ZERO {
        errors.insert(Field::Deposit, ValidationError::DepositExceedsValue);
    }
    if data.property_type.is_none() {
        errors.insert(Field::PropertyType, ValidationError::MissingPropertyType);
    }
    if !(MIN_LOAN_TERM_YEARS..=MAX_LOAN_TERM_YEARS).contains(&data.loan.term) {
        errors.insert(
            Field::LoanTerm,
            ValidationError::LoanTermOutOfRange {
                min: MIN_LOAN_TERM_YEARS,
                max: MAX_LOAN_TERM_YEARS,
            },
        );
    }
    if data.loan.interest <= Decimal::ZERO || data.loan.interest > MAX_INTEREST_RATE {
        errors.insert(
            Field::InterestRate,
            ValidationError::InterestRateOutOfRange {
                max: MAX_INTEREST_RATE,
            },
        );
    }
    if data.capital_growth < Decimal::ZERO || data.capital_growth > MAX_CAPITAL_GROWTH {
        errors.insert(
            Field::CapitalGrowth,
            ValidationError::CapitalGrowthOutOfRange {
                max: MAX_CAPITAL_GROWTH,
            },
        );
    }
    if data.rental_growth < Decimal::ZERO || data.rental_growth > MAX_RENTAL_GROWTH {
        errors.insert(
            Field::RentalGrowth,
            ValidationError::RentalGrowthOutOfRange {
                max: MAX_RENTAL_GROWTH,
            },
        );
    }
    if data.is_investment() && !data.is_land() && data.weekly_rent <= Decimal::ZERO {
        errors.insert(Field::WeeklyRent, ValidationError::MissingWeeklyRent);
    }
    if data.strata_fees > MAX_QUARTERLY_STRATA {
        errors.insert(
            Field::StrataFees,
            ValidationError::StrataFeesTooHigh {
                max: MAX_QUARTERLY_STRATA,
            },
        );
    }

    errors
}
