//! # Commands Module
//!
//! One module per subcommand. Each handler takes already-read input plus
//! the loaded policy and returns a serializable result; reading files and
//! printing stays in [`run`] and `main`.
//!
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (dispatch, input reading)
//! ├── invoice.rs    ◄─── Invoice totals from a JSON draft
//! ├── subsidy.rs    ◄─── Subsidy quote for a capacity
//! ├── payment.rs    ◄─── Apply a payment to an invoice
//! ├── expense.rs    ◄─── Expense total
//! ├── numbering.rs  ◄─── Next document number
//! └── report.rs     ◄─── Sales / expense / dashboard / solar aggregates
//! ```

pub mod expense;
pub mod invoice;
pub mod numbering;
pub mod payment;
pub mod report;
pub mod subsidy;

use clap::Subcommand;
use rust_decimal::Decimal;
use serde::Serialize;
use solarbooks_core::numbering::DocumentKind;
use solarbooks_core::{PaymentMethod, PolicyConfig};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ApiError;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute invoice totals from a JSON invoice draft
    Invoice {
        /// Draft file, or `-` for stdin
        input: PathBuf,
    },

    /// Compute the solar subsidy for a system capacity in kW
    Subsidy {
        #[arg(allow_negative_numbers = true)]
        capacity_kw: Decimal,
    },

    /// Apply a payment to an invoice
    Payment {
        /// Invoice total
        #[arg(long, allow_negative_numbers = true)]
        total: Decimal,

        /// Amount already paid
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        paid: Decimal,

        /// Amount of this payment
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,

        /// cash, bank or card
        #[arg(long, value_parser = payment::parse_method, default_value = "cash")]
        method: PaymentMethod,
    },

    /// Compute an expense total (amount plus tax)
    Expense {
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,

        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        tax: Decimal,

        /// Expense category, e.g. Travel
        #[arg(long)]
        category: Option<String>,

        /// cash, bank or card
        #[arg(long, value_parser = payment::parse_method, default_value = "cash")]
        method: PaymentMethod,
    },

    /// Print the document number following the last one issued
    NextNumber {
        /// invoice, expense, payment or solar
        kind: DocumentKind,

        /// Most recent number of this kind, e.g. INV-00041
        #[arg(long)]
        last: Option<String>,
    },

    /// Aggregate invoices, expenses and solar projects from a JSON file
    Report {
        /// Records file, or `-` for stdin
        input: PathBuf,
    },
}

/// Executes a command and returns what goes to stdout.
pub fn run(command: Command, policy: &PolicyConfig) -> Result<String, ApiError> {
    debug!(?command, "running command");

    match command {
        Command::Invoice { input } => {
            let draft = read_input(&input)?;
            to_json(&invoice::execute(&draft, &policy.invoice)?)
        }
        Command::Subsidy { capacity_kw } => {
            to_json(&subsidy::execute(capacity_kw, &policy.subsidy)?)
        }
        Command::Payment {
            total,
            paid,
            amount,
            method,
        } => to_json(&payment::execute(total, paid, amount, method)?),
        Command::Expense {
            amount,
            tax,
            category,
            method,
        } => to_json(&expense::execute(amount, tax, category, method)?),
        Command::NextNumber { kind, last } => Ok(numbering::execute(kind, last.as_deref())),
        Command::Report { input } => {
            let records = read_input(&input)?;
            to_json(&report::execute(&records)?)
        }
    }
}

/// Reads a whole file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String, ApiError> {
    let mut contents = String::new();

    if path.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut contents)
            .map_err(|e| ApiError::invalid_input(format!("Failed to read stdin: {e}")))?;
    } else {
        contents = std::fs::read_to_string(path).map_err(|e| {
            ApiError::invalid_input(format!("Failed to read {}: {e}", path.display()))
        })?;
    }

    Ok(contents)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::internal(format!("Failed to serialize output: {e}")))
}
