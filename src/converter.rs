//! Conversion of `RangeMessage.xml` into `RangeMessage.csv`.
//!
//! The whole document is read and flattened before the output file is touched,
//! so a malformed record fails the conversion without leaving a truncated CSV
//! behind. The output is then written in a single buffered pass.

use std::path::{Path, PathBuf};

use crate::{
    error::Error,
    formats::FormatType,
    traits::{Encoder, Parser},
    types::{RangeMessage, RangeRow},
};

/// Directory used when `OUTPUT_DIRECTORY` is not set.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "src/main/resources/standardnumber";

/// Environment variable naming the directory that holds both files.
pub const OUTPUT_DIRECTORY_ENV: &str = "OUTPUT_DIRECTORY";

/// Basename shared by the input and output files.
pub const FILE_STEM: &str = "RangeMessage";

/// Where the conversion reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub output_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
        }
    }
}

impl Config {
    pub fn new<P: Into<PathBuf>>(output_directory: P) -> Self {
        Config {
            output_directory: output_directory.into(),
        }
    }

    /// `<output_directory>/RangeMessage.<ext>` for the given format.
    pub fn path_for(&self, format: FormatType) -> PathBuf {
        self.output_directory
            .join(format!("{}.{}", FILE_STEM, format.extension()))
    }

    pub fn input_path(&self) -> PathBuf {
        self.path_for(FormatType::RangeMessageXml)
    }

    pub fn output_path(&self) -> PathBuf {
        self.path_for(FormatType::RangeCsv)
    }
}

/// Reads a Range Message and returns its flattened rows.
pub fn read_rows<P: AsRef<Path>>(input: P) -> Result<Vec<RangeRow>, Error> {
    let message = RangeMessage::read_from(input)?;
    message.rows()
}

/// Converts the Range Message at `input` into a CSV table at `output`.
///
/// The output file is created or overwritten. Returns the number of rows written.
///
/// # Example
/// ```rust,no_run
/// use isbn_range_message::convert;
/// let rows = convert("RangeMessage.xml", "RangeMessage.csv")?;
/// println!("wrote {rows} rows");
/// # Ok::<(), isbn_range_message::Error>(())
/// ```
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<usize, Error> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let rows = read_rows(input)?;
    rows.write_to(output)?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        rows = rows.len(),
        "converted range message"
    );
    Ok(rows.len())
}

/// Runs [`convert`] on the fixed file names inside `config.output_directory`.
pub fn convert_in_directory(config: &Config) -> Result<usize, Error> {
    convert(config.input_path(), config.output_path())
}
