#![forbid(unsafe_code)]
//! Converts the ISBN Range Message registry into a flat CSV table.
//!
//! The International ISBN Agency publishes `RangeMessage.xml`, which lists every
//! registration group (`978-0`, `978-3`, ...) together with the rules that fix
//! how many digits a registrant element has in each numeric sub-range. This crate
//! flattens that hierarchy into one `prefix,group,range_start,range_end` row per
//! rule, with both bounds cut to the rule's length.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use isbn_range_message::{Config, RangeTable, convert_in_directory};
//!
//! // Convert <dir>/RangeMessage.xml into <dir>/RangeMessage.csv
//! let config = Config::new("src/main/resources/standardnumber");
//! convert_in_directory(&config)?;
//!
//! // Use the table to hyphenate ISBNs
//! let table = RangeTable::read_from(config.output_path())?;
//! assert_eq!(
//!     table.hyphenate("9783551752130")?.as_deref(),
//!     Some("978-3-551-75213-0")
//! );
//! # Ok::<(), isbn_range_message::Error>(())
//! ```

pub mod converter;
pub mod error;
pub mod formats;
pub mod range_table;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    converter::{
        Config, DEFAULT_OUTPUT_DIRECTORY, OUTPUT_DIRECTORY_ENV, convert, convert_in_directory,
        read_rows,
    },
    error::Error,
    formats::FormatType,
    range_table::RangeTable,
    traits::{Encoder, Parser},
    types::{RangeMessage, RangeRow, RegistrationGroup, Rule},
};
