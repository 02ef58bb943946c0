//! Settlement and holding costs.
//!
//! User input is partial while a scenario is being edited, so every category is
//! optional on the way in and filled from [`OngoingExpenses::default`] /
//! [`OneTimeExpenses::default`]. Totals only count categories that apply to the
//! property: vacant land has no water or building insurance bills, and only an
//! investment pays a property manager.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::currency_or;
use crate::property::PropertyType;
use crate::state::StateCode;

/// Annual holding costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OngoingExpenses {
    pub council: Decimal,
    pub water: Decimal,
    pub land_tax: Decimal,
    pub insurance: Decimal,
    pub property_manager: Decimal,
    pub maintenance: Decimal,
}

impl Default for OngoingExpenses {
    fn default() -> Self {
        Self {
            council: dec!(2_000),
            water: dec!(1_200),
            land_tax: dec!(0),
            insurance: dec!(1_500),
            property_manager: dec!(2_500),
            maintenance: dec!(1_500),
        }
    }
}

/// Costs paid once, at settlement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeExpenses {
    pub legal_fees: Decimal,
    pub building_inspection: Decimal,
    pub pest_inspection: Decimal,
    pub loan_establishment: Decimal,
}

impl Default for OneTimeExpenses {
    fn default() -> Self {
        Self {
            legal_fees: dec!(2_000),
            building_inspection: dec!(400),
            pest_inspection: dec!(250),
            loan_establishment: dec!(600),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OngoingExpensesInput {
    pub council: Option<Decimal>,
    pub water: Option<Decimal>,
    pub land_tax: Option<Decimal>,
    pub insurance: Option<Decimal>,
    pub property_manager: Option<Decimal>,
    pub maintenance: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeExpensesInput {
    pub legal_fees: Option<Decimal>,
    pub building_inspection: Option<Decimal>,
    pub pest_inspection: Option<Decimal>,
    pub loan_establishment: Option<Decimal>,
}

/// Partial expense input as edited by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesInput {
    pub one_time: Option<OneTimeExpensesInput>,
    pub ongoing: Option<OngoingExpensesInput>,
}

/// Normalized expenses with their derived totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expenses {
    pub one_time: OneTimeExpenses,
    /// Mortgage registration plus title transfer fee for the state.
    pub government_fees: Decimal,
    pub one_time_total: Decimal,
    pub ongoing: OngoingExpenses,
    pub ongoing_total: Decimal,
}

impl Expenses {
    /// The input that reproduces these expenses.
    pub fn as_input(&self) -> ExpensesInput {
        let ongoing = self.ongoing;
        let one_time = self.one_time;
        ExpensesInput {
            one_time: Some(OneTimeExpensesInput {
                legal_fees: Some(one_time.legal_fees),
                building_inspection: Some(one_time.building_inspection),
                pest_inspection: Some(one_time.pest_inspection),
                loan_establishment: Some(one_time.loan_establishment),
            }),
            ongoing: Some(OngoingExpensesInput {
                council: Some(ongoing.council),
                water: Some(ongoing.water),
                land_tax: Some(ongoing.land_tax),
                insurance: Some(ongoing.insurance),
                property_manager: Some(ongoing.property_manager),
                maintenance: Some(ongoing.maintenance),
            }),
        }
    }
}

/// Which expense categories apply to a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseVisibility {
    pub is_land: bool,
    pub is_investment: bool,
}

impl ExpenseVisibility {
    pub fn new(property_type: Option<PropertyType>, is_living_here: bool) -> Self {
        Self {
            is_land: property_type == Some(PropertyType::Land),
            is_investment: !is_living_here,
        }
    }

    pub fn water(self) -> bool {
        !self.is_land
    }

    pub fn insurance(self) -> bool {
        !self.is_land
    }

    pub fn property_manager(self) -> bool {
        self.is_investment && !self.is_land
    }

    /// Building and pest inspections need a building.
    pub fn inspections(self) -> bool {
        !self.is_land
    }
}

/// Government charges at settlement for one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GovernmentFees {
    pub mortgage_registration: Decimal,
    pub transfer: Decimal,
}

impl GovernmentFees {
    pub fn total(self) -> Decimal {
        self.mortgage_registration + self.transfer
    }
}

impl StateCode {
    pub fn government_fees(self) -> GovernmentFees {
        let (mortgage_registration, transfer) = match self {
            StateCode::Nsw => (dec!(165.90), dec!(165.90)),
            StateCode::Vic => (dec!(138.60), dec!(1_492.00)),
            StateCode::Qld => (dec!(233.19), dec!(1_358.00)),
            StateCode::Sa => (dec!(190.00), dec!(6_470.00)),
            StateCode::Wa => (dec!(210.70), dec!(1_217.60)),
            StateCode::Tas => (dec!(153.34), dec!(242.91)),
            StateCode::Nt => (dec!(167.00), dec!(167.00)),
            StateCode::Act => (dec!(178.00), dec!(455.00)),
        };
        GovernmentFees {
            mortgage_registration,
            transfer,
        }
    }
}

/// Merges partial input over defaults and totals the visible categories.
pub fn normalize_expenses(
    input: Option<&ExpensesInput>,
    property_type: Option<PropertyType>,
    is_living_here: bool,
    state: StateCode,
) -> Expenses {
    let one_time = merge_one_time(input.and_then(|i| i.one_time.as_ref()));
    let ongoing = merge_ongoing(input.and_then(|i| i.ongoing.as_ref()));
    let visibility = ExpenseVisibility::new(property_type, is_living_here);
    let government_fees = state.government_fees().total();

    Expenses {
        one_time,
        government_fees,
        one_time_total: one_time_total(&one_time, visibility) + government_fees,
        ongoing,
        ongoing_total: ongoing_total(&ongoing, visibility),
    }
}

/// Sum of the ongoing categories that apply.
pub fn ongoing_total(ongoing: &OngoingExpenses, visibility: ExpenseVisibility) -> Decimal {
    let mut total = ongoing.council + ongoing.land_tax + ongoing.maintenance;
    if visibility.water() {
        total += ongoing.water;
    }
    if visibility.insurance() {
        total += ongoing.insurance;
    }
    if visibility.property_manager() {
        total += ongoing.property_manager;
    }
    total
}

fn one_time_total(one_time: &OneTimeExpenses, visibility: ExpenseVisibility) -> Decimal {
    let mut total = one_time.legal_fees + one_time.loan_establishment;
    if visibility.inspections() {
        total += one_time.building_inspection + one_time.pest_inspection;
    }
    total
}

fn merge_ongoing(input: Option<&OngoingExpensesInput>) -> OngoingExpenses {
    let defaults = OngoingExpenses::default();
    let Some(input) = input else {
        return defaults;
    };
    OngoingExpenses {
        council: currency_or(input.council, defaults.council),
        water: currency_or(input.water, defaults.water),
        land_tax: currency_or(input.land_tax, defaults.land_tax),
        insurance: currency_or(input.insurance, defaults.insurance),
        property_manager: currency_or(input.property_manager, defaults.property_manager),
        maintenance: currency_or(input.maintenance, defaults.maintenance),
    }
}

fn merge_one_time(input: Option<&OneTimeExpensesInput>) -> OneTimeExpenses {
    let defaults = OneTimeExpenses::default();
    let Some(input) = input else {
        return defaults;
    };
    OneTimeExpenses {
        legal_fees: currency_or(input.legal_fees, defaults.legal_fees),
        building_inspection: currency_or(input.building_inspection, defaults.building_inspection),
        pest_inspection: currency_or(input.pest_inspection, defaults.pest_inspection),
        loan_establishment: currency_or(input.loan_establishment, defaults.loan_establishment),
    }
}
