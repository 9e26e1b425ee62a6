//! NB Text - Norwegian (bokmål) text formatting
//!
//! This crate provides:
//! - Date formatting (`2024-05-17` → `17.05.2024`)
//! - Amount formatting with space-grouped thousands (`120000` → `120 000 kr`)
//! - Yes/no labels
//! - ASCII filename slugs (`Bærum Bil AS` → `baerum-bil-as`)
//!
//! # Example
//!
//! ```
//! use nb_text::{format_amount, format_date, slugify};
//!
//! assert_eq!(format_date("2024-05-17"), "17.05.2024");
//! assert_eq!(format_amount("120000"), "120 000 kr");
//! assert_eq!(slugify("Bilsenter AS"), "bilsenter-as");
//! ```

mod formatter;
mod slug;

pub use formatter::{format_amount, format_date, group_thousands, parse_iso_date, yes_no};
pub use slug::slugify;

use thiserror::Error;

/// Errors that can occur during Norwegian text processing
#[derive(Debug, Error)]
pub enum NbTextError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for Norwegian text operations
pub type Result<T> = std::result::Result<T, NbTextError>;
