//! # Document Numbering
//!
//! Human-readable sequential numbers for business documents:
//! `INV-00001`, `EXP-00042`, `PAY-00007`, `SOLAR-00003`.
//!
//! The store hands over the most recent number of the same kind; the next
//! number is derived from the digits after its last hyphen. A missing or
//! unreadable previous number restarts the sequence at 1.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Width of the zero-padded sequence part.
pub const SEQUENCE_WIDTH: usize = 5;

/// The kinds of documents that get sequential numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Expense,
    Payment,
    SolarProject,
}

impl DocumentKind {
    pub const fn prefix(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "INV",
            DocumentKind::Expense => "EXP",
            DocumentKind::Payment => "PAY",
            DocumentKind::SolarProject => "SOLAR",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for DocumentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "invoice" | "inv" => Ok(DocumentKind::Invoice),
            "expense" | "exp" => Ok(DocumentKind::Expense),
            "payment" | "pay" => Ok(DocumentKind::Payment),
            "solar_project" | "solar-project" | "solar" => Ok(DocumentKind::SolarProject),
            other => Err(ValidationError::InvalidFormat {
                field: "document kind".to_string(),
                reason: format!("unknown kind '{other}'"),
            }),
        }
    }
}

/// Returns the number following `last` for documents of `kind`.
///
/// ## Example
/// ```rust
/// use solarbooks_core::numbering::{next_document_number, DocumentKind};
///
/// assert_eq!(next_document_number(DocumentKind::Invoice, None), "INV-00001");
/// assert_eq!(next_document_number(DocumentKind::Invoice, Some("INV-00041")), "INV-00042");
/// assert_eq!(next_document_number(DocumentKind::Payment, Some("garbage")), "PAY-00001");
/// ```
pub fn next_document_number(kind: DocumentKind, last: Option<&str>) -> String {
    let next = last.and_then(last_sequence).map_or(1, |n| n.saturating_add(1));
    format!("{}-{:0width$}", kind.prefix(), next, width = SEQUENCE_WIDTH)
}

fn last_sequence(number: &str) -> Option<u64> {
    number.rsplit('-').next()?.trim().parse().ok()
}
