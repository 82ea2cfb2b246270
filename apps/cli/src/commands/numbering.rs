//! Next-number command: prints the bare document number, not JSON, so it
//! can be captured straight into a shell variable.

use solarbooks_core::numbering::{next_document_number, DocumentKind};

pub fn execute(kind: DocumentKind, last: Option<&str>) -> String {
    next_document_number(kind, last)
}
