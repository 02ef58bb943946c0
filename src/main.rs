use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use au_property::{
    PropertyData, PropertyInput, StateCode, calculate_property_data, calculate_stamp_duty,
    validate_property_data,
};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

#[derive(Parser, Debug)]
#[command(version, about = "Stamp duty, loan and projection calculator for Australian property")]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate a scenario and print its projections
    Project(ProjectCommand),
    /// Preview the stamp duty on a purchase
    Duty(DutyCommand),
}

#[derive(Args, Debug)]
struct ProjectCommand {
    /// Scenario JSON file. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Number of years to project
    #[arg(short, long)]
    years: Option<u32>,

    /// Output the calculated scenario as JSON instead of formatted tables
    #[arg(long)]
    json: bool,

    /// Print validation messages and fail if there are any
    #[arg(long)]
    validate: bool,
}

#[derive(Args, Debug)]
struct DutyCommand {
    /// Purchase price
    value: Decimal,

    /// State or territory code, e.g. NSW or VIC
    #[arg(short, long, default_value = "NSW")]
    state: String,

    /// Apply first home buyer concessions
    #[arg(long)]
    fhb: bool,

    /// The purchase is vacant land
    #[arg(long)]
    land: bool,
}

#[derive(Debug, Clone, Tabled)]
struct ProjectionRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Value")]
    property_value: String,
    #[tabled(rename = "Rent")]
    rental_income: String,
    #[tabled(rename = "Interest")]
    annual_interest: String,
    #[tabled(rename = "Tax Return")]
    tax_return: String,
    #[tabled(rename = "Cash Flow")]
    net_cash_flow: String,
    #[tabled(rename = "Equity")]
    equity: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "ROI")]
    roi: String,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    match Opts::parse().command {
        Command::Project(cmd) => cmd.exec(),
        Command::Duty(cmd) => cmd.exec(),
    }
}

impl ProjectCommand {
    fn exec(&self) -> anyhow::Result<()> {
        let mut input = read_scenario(&self.file)?;
        if let Some(years) = self.years {
            input.projection_years = Some(years);
        }

        let data = calculate_property_data(&input);
        let errors = validate_property_data(&data);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&data)?);
        } else {
            print_summary(&data);
            print_projections(&data);
        }

        if self.validate && !errors.is_empty() {
            for (field, error) in errors.iter() {
                eprintln!("{}: {}", field, error);
            }
            anyhow::bail!("scenario has {} validation error(s)", errors.len());
        }
        Ok(())
    }
}

impl DutyCommand {
    fn exec(&self) -> anyhow::Result<()> {
        let state: StateCode = self
            .state
            .parse()
            .with_context(|| format!("Invalid --state {}", self.state))?;
        let duty = calculate_stamp_duty(self.value, self.fhb, self.land, state);
        println!("{} stamp duty on {}: {}", state, format_aud(self.value), format_aud(duty));
        Ok(())
    }
}

fn read_scenario(path: &Path) -> anyhow::Result<PropertyInput> {
    let mut json = String::new();
    if path.as_os_str() == "-" {
        io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read scenario from stdin")?;
    } else {
        let file = File::open(path)
            .with_context(|| format!("Failed to open scenario {}", path.display()))?;
        BufReader::new(file)
            .read_to_string(&mut json)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    }
    let input = serde_json::from_str(&json).context("Scenario is not valid JSON")?;
    log::info!("Loaded scenario from {}", path.display());
    Ok(input)
}

fn print_summary(data: &PropertyData) {
    let loan = &data.loan;
    println!();
    let occupancy = if data.is_investment() {
        "investment"
    } else {
        "owner occupied"
    };
    println!("SCENARIO ({}, {})", data.state, occupancy);
    println!();
    println!("  Property value     {}", format_aud(data.property_value));
    println!("  Deposit            {}", format_aud(data.deposit));
    println!("  Stamp duty         {}", format_aud(data.stamp_duty));
    println!("  First home grant   {}", format_aud(data.rebate));
    println!("  LVR                {}%", loan.lvr);
    println!("  LMI                {}", format_optional(loan.lmi));
    println!("  Loan amount        {}", format_optional(loan.amount));
    println!("  Monthly repayment  {}", format_optional(loan.monthly_mortgage));
    println!("  One-time costs     {}", format_aud(data.expenses.one_time_total));
    println!("  Ongoing costs      {}", format_aud(data.expenses.ongoing_total));
    if !loan.is_financeable() {
        println!();
        println!("  LVR above 95% cannot be insured; loan figures are unavailable.");
    }
    println!();
}

fn print_projections(data: &PropertyData) {
    let rows: Vec<ProjectionRow> = data
        .projections
        .iter()
        .map(|p| ProjectionRow {
            year: p.year,
            property_value: format_aud(p.property_value),
            rental_income: format_aud(p.rental_income),
            annual_interest: format_optional(p.annual_interest),
            tax_return: format_optional(p.tax_return),
            net_cash_flow: format_optional(p.net_cash_flow),
            equity: format_optional(p.equity),
            spent: format_optional(p.spent),
            roi: p.roi.map_or("n/a".to_string(), |roi| format!("{:.2}%", roi)),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}

fn format_aud(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

fn format_optional(amount: Option<Decimal>) -> String {
    amount.map_or("n/a".to_string(), format_aud)
}
