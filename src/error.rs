//! All error types for the isbn-range-message crate.
//!
//! These are returned from all fallible operations (XML parsing, row extraction, CSV I/O, lookups).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("CSV error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing <{element}> in {context}")]
    MissingField {
        element: &'static str,
        context: String,
    },

    #[error("malformed {field} `{value}`: expected exactly two hyphen-separated parts")]
    MalformedField { field: &'static str, value: String },

    #[error("invalid ISBN `{0}`: expected 13 digits")]
    InvalidIsbn(String),
}

impl Error {
    /// Creates a missing-element error for the given context description.
    pub fn missing_field(element: &'static str, context: impl Into<String>) -> Self {
        Error::MissingField {
            element,
            context: context.into(),
        }
    }

    /// Replaces the context of a [`Error::MissingField`]; other errors pass through.
    pub(crate) fn in_context(self, context: impl Into<String>) -> Self {
        match self {
            Error::MissingField { element, .. } => Error::missing_field(element, context),
            other => other,
        }
    }
}
