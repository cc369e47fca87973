//! Readers and writers for the two file formats involved in a conversion:
//! the `RangeMessage.xml` registry and the flattened `RangeMessage.csv` table.

pub mod csv;
pub mod range_message;

/// The file formats handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    RangeMessageXml,
    RangeCsv,
}

impl FormatType {
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::RangeMessageXml => "xml",
            FormatType::RangeCsv => "csv",
        }
    }
}
