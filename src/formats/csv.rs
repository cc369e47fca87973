// Rows are written without quoting: range texts never contain commas or quotes.
use std::io::{BufRead, Write};

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};

use crate::{
    error::Error,
    traits::{Encoder, Parser},
    types::RangeRow,
};

impl Parser for Vec<RangeRow> {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .from_reader(reader);
        let mut rows = Vec::new();
        for result in rdr.deserialize() {
            rows.push(result?);
        }
        Ok(rows)
    }
}

impl Encoder for Vec<RangeRow> {
    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);
        for row in self {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
