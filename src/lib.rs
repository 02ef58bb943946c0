//! `au_property` is a Rust library for costing an Australian residential property
//! purchase and projecting how it performs over the following years.
//!
//! It covers the whole lifecycle of a scenario:
//! - **Stamp duty**: transfer duty for all eight states and territories, with
//!   first home buyer exemptions and graduated concessions.
//! - **Lender's mortgage insurance**: tiered premiums for loans above 80% LVR.
//! - **Loans**: principal-and-interest or interest-only repayments, with the
//!   exact principal/interest split for every year of the term.
//! - **Holding costs and tax**: expense totals that respect what applies to the
//!   property, and a negative gearing estimate for investments.
//! - **Projections**: year-by-year value, cash flow, equity and ROI.
//!
//! All amounts are [`rust_decimal::Decimal`] so results are exact and repeatable.
//!
//! ## Usage
//!
//! Add `au_property` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! au_property = "0.1.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then describe a scenario with [`PropertyInput`] (every field is optional) and
//! call [`calculate_property_data`]:
//!
//! ```rust
//! use au_property::{calculate_property_data, validate_property_data, PropertyInput, PropertyType, StateCode};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let input = PropertyInput {
//!         property_value: Some(dec!(600_000)),
//!         deposit: Some(dec!(120_000)),
//!         property_type: Some(PropertyType::House),
//!         is_living_here: Some(false),
//!         weekly_rent: Some(dec!(600)),
//!         state: Some(StateCode::Nsw),
//!         start_year: Some(2025),
//!         ..Default::default()
//!     };
//!
//!     let data = calculate_property_data(&input);
//!     assert!(validate_property_data(&data).is_empty());
//!
//!     println!("Stamp duty: {}", data.stamp_duty);
//!     println!("Monthly repayment: {:?}", data.loan.monthly_mortgage);
//!     for year in &data.projections {
//!         println!("{}: equity {:?}, roi {:?}%", year.year, year.equity, year.roi);
//!     }
//! }
//! ```
//!
//! A loan above 95% LVR cannot be insured. Its `lmi`, `amount` and repayment
//! are `None`, and so is every projection figure that depends on the loan.

pub mod calculate;
pub mod expenses;
pub mod grant;
pub mod lmi;
pub mod loan;
pub mod money;
pub mod projection;
pub mod property;
pub mod stamp_duty;
pub mod state;
pub mod tax;
pub mod validation;

pub use calculate::calculate_property_data;
pub use expenses::{
    Expenses, ExpensesInput, OneTimeExpenses, OneTimeExpensesInput, OngoingExpenses,
    OngoingExpensesInput, normalize_expenses,
};
pub use grant::first_home_owner_grant;
pub use lmi::calculate_lmi;
pub use loan::{
    AnnualBreakdown, MonthPayment, amortization_schedule, annual_breakdown, deposit_from_lvr,
    interest_only_repayment, monthly_repayment,
};
pub use projection::{ProjectionParams, calculate_multi_year_projections};
pub use property::{
    LoanDetails, LoanInput, Projection, PropertyData, PropertyInput, PropertyType,
};
pub use stamp_duty::calculate_stamp_duty;
pub use state::StateCode;
pub use validation::{Field, PropertyDataErrors, ValidationError, validate_property_data};
