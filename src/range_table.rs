//! Lookup over a flattened range table, used to hyphenate ISBN-13s.
//!
//! Each row says: within registration group `prefix-group`, registrants whose
//! number falls between `range_start` and `range_end` have a registrant element
//! `range_start.len()` digits long.

use std::path::Path;

use crate::{error::Error, traits::Parser, types::RangeRow};

const ISBN13_LEN: usize = 13;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeTable {
    rows: Vec<RangeRow>,
}

impl From<Vec<RangeRow>> for RangeTable {
    fn from(rows: Vec<RangeRow>) -> Self {
        RangeTable { rows }
    }
}

impl RangeTable {
    pub fn from_rows(rows: Vec<RangeRow>) -> Self {
        RangeTable::from(rows)
    }

    /// Loads a table previously written by [`crate::convert`].
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Vec::<RangeRow>::read_from(path).map(RangeTable::from)
    }

    pub fn rows(&self) -> &[RangeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds the first row covering the 13 digits in `digits`.
    pub fn find(&self, digits: &str) -> Option<&RangeRow> {
        self.rows
            .iter()
            .find(|row| registrant(row, digits).is_some())
    }

    /// Formats an ISBN-13 as `prefix-group-registrant-publication-check`.
    ///
    /// Hyphens and spaces in the input are ignored. Returns `Ok(None)` when no
    /// row covers the number.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIsbn`] when the input is not made of exactly 13 digits.
    pub fn hyphenate(&self, isbn: &str) -> Result<Option<String>, Error> {
        let digits: String = isbn.chars().filter(|c| *c != '-' && *c != ' ').collect();
        if digits.len() != ISBN13_LEN || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidIsbn(isbn.to_string()));
        }

        let formatted = self.rows.iter().find_map(|row| {
            let (registrant, rest) = registrant(row, &digits)?;
            let (publication, check) = rest.split_at(rest.len() - 1);
            Some(format!(
                "{}-{}-{}-{}-{}",
                row.prefix, row.group, registrant, publication, check
            ))
        });
        if formatted.is_none() {
            tracing::debug!(isbn = %digits, "no range covers ISBN");
        }
        Ok(formatted)
    }
}

/// Splits the registrant element off `digits` if `row` covers them.
/// The remainder holds the publication element and the check digit.
fn registrant<'a>(row: &RangeRow, digits: &'a str) -> Option<(&'a str, &'a str)> {
    let rest = digits
        .strip_prefix(row.prefix.as_str())?
        .strip_prefix(row.group.as_str())?;
    let width = row.range_start.len();
    // at least one publication digit and the check digit must remain
    if width == 0 || width + 2 > rest.len() {
        return None;
    }
    let (registrant, rest) = (rest.get(..width)?, rest.get(width..)?);
    (row.range_start.as_str() <= registrant && registrant <= row.range_end.as_str())
        .then_some((registrant, rest))
}
