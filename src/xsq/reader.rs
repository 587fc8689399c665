//! `.xsq` reader, used to inspect generated sequences

use super::{HeadField, EFFECT_TAG, NODE_TAG};
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::collections::BTreeMap;

/// Head scalars of a sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct XsqHead {
    pub author: String,
    pub song: String,
    pub sequence_type: String,
    pub media_file: String,
    /// Duration in seconds, as written
    pub sequence_duration: String,
}

/// A timed effect inside a channel node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XsqEffect {
    pub name: String,
    pub start: i64,
    pub end: i64,
}

/// Parsed sequence: head plus effects per node name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct XsqDocument {
    pub head: XsqHead,
    /// Only nodes that hold at least one effect
    pub nodes: BTreeMap<String, Vec<XsqEffect>>,
}

impl XsqDocument {
    pub fn effects(&self, node: &str) -> &[XsqEffect] {
        self.nodes.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn effect_count(&self) -> usize {
        self.nodes.values().map(Vec::len).sum()
    }
}

pub struct XsqReader<'a> {
    text: &'a str,
}

impl<'a> XsqReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn parse(&self) -> Result<XsqDocument> {
        let mut reader = Reader::from_str(self.text);
        let mut doc = XsqDocument::default();
        // Node name for every open element, None for anything else
        let mut open: Vec<Option<String>> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Eof => break,
                Event::Start(e) => {
                    if let Some(field) = HeadField::from_tag(e.name().as_ref()) {
                        let raw = reader.read_text(e.name())?;
                        let value =
                            quick_xml::escape::unescape(&raw).map_err(quick_xml::Error::from)?;
                        set_head(&mut doc.head, field, value.into_owned());
                        continue;
                    }
                    let node = node_name(&e)?;
                    if e.name().as_ref() == EFFECT_TAG {
                        // <Effect> with content only appears in the EffectDB
                        self.record_effect(&mut doc, &open, &e)?;
                    }
                    open.push(node);
                }
                Event::Empty(e) => {
                    if e.name().as_ref() == EFFECT_TAG {
                        self.record_effect(&mut doc, &open, &e)?;
                    }
                }
                Event::End(_) => {
                    open.pop();
                }
                _ => {}
            }
        }

        Ok(doc)
    }

    fn record_effect(
        &self,
        doc: &mut XsqDocument,
        open: &[Option<String>],
        element: &BytesStart<'_>,
    ) -> Result<()> {
        let Some(Some(node)) = open.last() else {
            return Ok(());
        };
        let effect = XsqEffect {
            name: attribute(element, "name")?.unwrap_or_default(),
            start: time_attribute(element, "startTime")?,
            end: time_attribute(element, "endTime")?,
        };
        doc.nodes.entry(node.clone()).or_default().push(effect);
        Ok(())
    }
}

fn set_head(head: &mut XsqHead, field: HeadField, value: String) {
    match field {
        HeadField::Author => head.author = value,
        HeadField::Song => head.song = value,
        HeadField::SequenceType => head.sequence_type = value,
        HeadField::MediaFile => head.media_file = value,
        HeadField::SequenceDuration => head.sequence_duration = value,
    }
}

fn node_name(element: &BytesStart<'_>) -> Result<Option<String>> {
    if element.name().as_ref() != NODE_TAG {
        return Ok(None);
    }
    attribute(element, "name")
}

fn attribute(element: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
    match element.try_get_attribute(key)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn time_attribute(element: &BytesStart<'_>, key: &'static str) -> Result<i64> {
    let value = attribute(element, key)?.ok_or(Error::MissingField(key))?;
    value
        .parse()
        .map_err(|_| Error::InvalidSequence(format!("effect {} is not an integer: {}", key, value)))
}
