//! Core types for the ISBN Range Message.
//! The XML reader decodes into [`RangeMessage`]; the CSV codec serializes [`RangeRow`]s.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A parsed `ISBNRangeMessage` document.
///
/// Only the parts needed for flattening are kept: the registration groups in
/// document order, each with its rules in document order. Field texts are kept
/// verbatim so that validation happens during [`RangeMessage::rows`], in the
/// same order the rows are produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeMessage {
    pub groups: Vec<RegistrationGroup>,
}

/// One `RegistrationGroups/Group` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationGroup {
    /// `Prefix` text such as `978-0`, `None` when the element is absent.
    pub prefix: Option<String>,

    /// `Rules/Rule` children.
    pub rules: Vec<Rule>,
}

/// One `Rules/Rule` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
    /// `Length` text, `None` when the element is absent.
    pub length: Option<String>,

    /// `Range` text such as `0000000-1999999`, `None` when the element is absent.
    pub range: Option<String>,
}

/// A flattened output row: `prefix,group,range_start,range_end`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RangeRow {
    pub prefix: String,
    pub group: String,
    pub range_start: String,
    pub range_end: String,
}

impl Display for RangeRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.prefix, self.group, self.range_start, self.range_end
        )
    }
}

impl RangeMessage {
    /// Flattens the document into one row per rule with a positive length.
    ///
    /// Rows come out in document order: groups first, then rules within a group.
    /// Rules whose length is zero, negative or non-numeric are skipped before
    /// their `Range` is looked at.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingField`] when a group has no `Prefix`, a rule has no
    ///   `Length`, or a qualifying rule has no `Range`.
    /// - [`Error::MalformedField`] when a `Prefix` or `Range` does not split into
    ///   exactly two non-empty parts.
    pub fn rows(&self) -> Result<Vec<RangeRow>, Error> {
        let mut rows = Vec::new();

        for (group_index, group) in self.groups.iter().enumerate() {
            let (prefix, agency) = group
                .split_prefix()
                .map_err(|e| e.in_context(format!("group #{}", group_index + 1)))?;
            let prefix_text = group.prefix.as_deref().unwrap_or_default();

            let before = rows.len();
            for (rule_index, rule) in group.rules.iter().enumerate() {
                let context = || format!("rule #{} of group {}", rule_index + 1, prefix_text);

                let length = rule
                    .length_value()
                    .ok_or_else(|| Error::missing_field("Length", context()))?;
                if length <= 0 {
                    continue;
                }

                let (range_start, range_end) = rule
                    .truncated_range(length)
                    .map_err(|e| e.in_context(context()))?;

                rows.push(RangeRow {
                    prefix: prefix.to_string(),
                    group: agency.to_string(),
                    range_start,
                    range_end,
                });
            }
            tracing::debug!(
                group = prefix_text,
                rules = group.rules.len(),
                rows = rows.len() - before,
                "flattened registration group"
            );
        }

        Ok(rows)
    }
}

impl RegistrationGroup {
    /// Splits `Prefix` text such as `978-0` into `("978", "0")`.
    pub fn split_prefix(&self) -> Result<(&str, &str), Error> {
        let prefix = self
            .prefix
            .as_deref()
            .ok_or_else(|| Error::missing_field("Prefix", "group"))?;
        split_pair("Prefix", prefix)
    }
}

impl Rule {
    /// Parsed `Length`, or `None` when the element is absent.
    /// Empty or non-numeric text parses as `0`.
    pub fn length_value(&self) -> Option<i64> {
        self.length.as_deref().map(parse_length)
    }

    /// Both `Range` bounds cut to their first `length` characters.
    pub fn truncated_range(&self, length: i64) -> Result<(String, String), Error> {
        let range = self
            .range
            .as_deref()
            .ok_or_else(|| Error::missing_field("Range", "rule"))?;
        truncate_range(range, length)
    }
}

/// Parses an integer the lenient way: leading whitespace and an optional sign are
/// accepted, the leading run of ASCII digits is read and anything after it is
/// ignored. Text without leading digits yields `0`; a digit run too large for
/// `i64` saturates to `i64::MAX` (negated under a leading `-`).
pub fn parse_length(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }
    // digit runs too long for i64 saturate instead of reading as zero
    digits.parse::<i64>().unwrap_or(i64::MAX) * sign
}

/// Splits `text` on its single hyphen into two non-empty parts.
pub fn split_pair<'a>(field: &'static str, text: &'a str) -> Result<(&'a str, &'a str), Error> {
    match text.split_once('-') {
        Some((first, second)) if !first.is_empty() && !second.is_empty() && !second.contains('-') => {
            Ok((first, second))
        }
        _ => Err(Error::MalformedField {
            field,
            value: text.to_string(),
        }),
    }
}

/// Splits a `Range` text and keeps the first `length` characters of each bound.
/// Bounds shorter than `length` are kept whole.
pub fn truncate_range(range: &str, length: i64) -> Result<(String, String), Error> {
    let (start, end) = split_pair("Range", range)?;
    let length = if length <= 0 {
        0
    } else {
        usize::try_from(length).unwrap_or(usize::MAX)
    };
    Ok((truncate(start, length), truncate(end, length)))
}

fn truncate(part: &str, length: usize) -> String {
    part.chars().take(length).collect()
}
