//! Extraction schema listing

use anyhow::{Result, bail};
use docsense_eval::DocumentType;

use crate::console::CliConsole;

/// List extraction fields for one or all document types
pub fn show(console: &CliConsole, document_type: Option<&str>) -> Result<()> {
    let types: Vec<DocumentType> = match document_type {
        Some(label) => match DocumentType::parse(label) {
            Some(DocumentType::Unknown) | None => bail!("Unknown document type: {}", label),
            Some(doc_type) => vec![doc_type],
        },
        None => DocumentType::all().to_vec(),
    };

    for doc_type in types {
        console.print_header(&format!("{} ({})", doc_type, doc_type.folder_name()));
        for field in doc_type.fields() {
            println!("  - {}", field);
        }
    }

    Ok(())
}
