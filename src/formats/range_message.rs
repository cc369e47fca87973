use std::io::BufRead;

use quick_xml::{Reader, errors::IllFormedError, events::Event};

use crate::{
    error::Error,
    traits::Parser,
    types::{RangeMessage, RegistrationGroup, Rule},
};

const ROOT: &[u8] = b"ISBNRangeMessage";
const REGISTRATION_GROUPS: &[u8] = b"RegistrationGroups";
const GROUP: &[u8] = b"Group";
const RULES: &[u8] = b"Rules";
const RULE: &[u8] = b"Rule";

// Depths (number of open elements) of the elements we collect.
const GROUP_DEPTH: usize = 3;
const PREFIX_DEPTH: usize = 4;
const RULE_DEPTH: usize = 5;
const RULE_FIELD_DEPTH: usize = 6;

impl Parser for RangeMessage {
    /// Parse from any reader.
    ///
    /// Groups are collected from `/ISBNRangeMessage/RegistrationGroups/Group` only;
    /// everything else in the document is skipped.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        let mut state = ReaderState::default();
        let mut buf = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    state.open(e.local_name().as_ref());
                }
                Event::Empty(e) => {
                    state.open(e.local_name().as_ref());
                    state.close();
                }
                Event::End(_) => state.close(),
                Event::Text(e) => {
                    if let Some(capture) = state.capture.as_mut() {
                        capture.text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(capture) = state.capture.as_mut() {
                        capture
                            .text
                            .push_str(&e.decode().map_err(quick_xml::Error::from)?);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        state.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Prefix,
    Length,
    Range,
}

#[derive(Debug)]
struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

/// Tracks where in the document the reader is and what is being collected.
#[derive(Debug, Default)]
struct ReaderState {
    path: Vec<Vec<u8>>,
    seen_root: bool,
    groups: Vec<RegistrationGroup>,
    group: Option<RegistrationGroup>,
    rule: Option<Rule>,
    capture: Option<Capture>,
}

impl ReaderState {
    fn open(&mut self, name: &[u8]) {
        self.path.push(name.to_vec());
        self.seen_root = true;
        let depth = self.path.len();

        if depth == GROUP_DEPTH
            && self
                .path
                .iter()
                .map(Vec::as_slice)
                .eq([ROOT, REGISTRATION_GROUPS, GROUP])
        {
            self.group = Some(RegistrationGroup::default());
            return;
        }

        // Nothing below the group level matters outside a group, and nested
        // elements inside a field being captured only contribute text.
        let Some(group) = self.group.as_ref() else {
            return;
        };
        if self.capture.is_some() {
            return;
        }

        match (depth, name) {
            (PREFIX_DEPTH, b"Prefix") if group.prefix.is_none() => {
                self.start_capture(Field::Prefix);
            }
            (RULE_DEPTH, RULE) if self.path[GROUP_DEPTH] == RULES => {
                self.rule = Some(Rule::default());
            }
            (RULE_FIELD_DEPTH, b"Length") => {
                if self.rule.as_ref().is_some_and(|rule| rule.length.is_none()) {
                    self.start_capture(Field::Length);
                }
            }
            (RULE_FIELD_DEPTH, b"Range") => {
                if self.rule.as_ref().is_some_and(|rule| rule.range.is_none()) {
                    self.start_capture(Field::Range);
                }
            }
            _ => {}
        }
    }

    fn close(&mut self) {
        let depth = self.path.len();

        if self.capture.as_ref().is_some_and(|c| c.depth == depth) {
            if let Some(Capture { field, text, .. }) = self.capture.take() {
                self.store(field, text);
            }
        }

        if depth == RULE_DEPTH {
            if let (Some(group), Some(rule)) = (self.group.as_mut(), self.rule.take()) {
                group.rules.push(rule);
            }
        } else if depth == GROUP_DEPTH {
            if let Some(group) = self.group.take() {
                self.groups.push(group);
            }
        }

        self.path.pop();
    }

    fn start_capture(&mut self, field: Field) {
        self.capture = Some(Capture {
            field,
            depth: self.path.len(),
            text: String::new(),
        });
    }

    fn store(&mut self, field: Field, text: String) {
        match field {
            Field::Prefix => {
                if let Some(group) = self.group.as_mut() {
                    group.prefix = Some(text);
                }
            }
            Field::Length => {
                if let Some(rule) = self.rule.as_mut() {
                    rule.length = Some(text);
                }
            }
            Field::Range => {
                if let Some(rule) = self.rule.as_mut() {
                    rule.range = Some(text);
                }
            }
        }
    }

    fn finish(self) -> Result<RangeMessage, Error> {
        if let Some(open) = self.path.last() {
            let name = String::from_utf8_lossy(open).into_owned();
            return Err(Error::XmlParse(quick_xml::Error::IllFormed(
                IllFormedError::MissingEndTag(name),
            )));
        }
        if !self.seen_root {
            return Err(Error::missing_field("root element", "empty document"));
        }
        Ok(RangeMessage {
            groups: self.groups,
        })
    }
}
