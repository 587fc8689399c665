//! Fill an `.xsq` template with a sequence

use super::{HeadField, DEFAULT_TEMPLATE, NODE_TAG, SEQUENCE_TYPE_MEDIA};
use crate::error::{Error, Result};
use crate::sequence::Sequence;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

type Effects<'s> = &'s [(i64, i64)];

/// Streams a template through, filling head fields and channel nodes
pub struct XsqWriter {
    template: String,
}

impl XsqWriter {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Load a template from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let template = fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to open template '{}': {}", path.display(), e),
            ))
        })?;
        Ok(Self::new(template))
    }

    /// Render the filled document. Every channel with effects needs a
    /// `<Node name="...">` slot and every required head field must exist.
    pub fn render(&self, sequence: &Sequence) -> Result<Vec<u8>> {
        let mut slots: HashMap<&str, Effects<'_>> = sequence
            .channels()
            .map(|(channel, effects)| (channel.name(), effects))
            .collect();
        let mut filled: HashSet<HeadField> = HashSet::new();

        let mut reader = Reader::from_str(&self.template);
        let mut writer = Writer::new(Vec::new());
        // Pending effects for every open element, closed on its End event
        let mut open: Vec<Option<Effects<'_>>> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Eof => break,
                Event::Start(e) => {
                    if let Some(field) = HeadField::from_tag(e.name().as_ref()) {
                        // Drop the template's own content
                        reader.read_to_end(e.name())?;
                        write_field(&mut writer, e, head_value(field, sequence))?;
                        filled.insert(field);
                        continue;
                    }
                    let effects = take_slot(&e, &mut slots)?;
                    writer.write_event(Event::Start(e))?;
                    open.push(effects);
                }
                Event::Empty(e) => {
                    if let Some(field) = HeadField::from_tag(e.name().as_ref()) {
                        write_field(&mut writer, e, head_value(field, sequence))?;
                        filled.insert(field);
                        continue;
                    }
                    match take_slot(&e, &mut slots)? {
                        Some(effects) => {
                            let end = e.to_end().into_owned();
                            writer.write_event(Event::Start(e))?;
                            write_effects(&mut writer, effects)?;
                            writer.write_event(Event::End(end))?;
                        }
                        None => writer.write_event(Event::Empty(e))?,
                    }
                }
                Event::End(e) => {
                    if let Some(Some(effects)) = open.pop() {
                        write_effects(&mut writer, effects)?;
                    }
                    writer.write_event(Event::End(e))?;
                }
                event => writer.write_event(event)?,
            }
        }

        if let Some(field) = HeadField::ALL
            .into_iter()
            .find(|f| f.required() && !filled.contains(f))
        {
            return Err(Error::MissingField(field.tag()));
        }
        // Report the first unmatched channel in registry order
        if let Some((channel, _)) = sequence
            .channels()
            .find(|(c, _)| slots.contains_key(c.name()))
        {
            return Err(Error::MissingSlot(channel.name().to_string()));
        }

        Ok(writer.into_inner())
    }

    /// Render and write to `path`. Nothing is written if rendering fails.
    pub fn write(&self, sequence: &Sequence, path: &Path) -> Result<()> {
        let data = self.render(sequence)?;
        fs::write(path, data)?;
        Ok(())
    }
}

impl Default for XsqWriter {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

fn head_value(field: HeadField, sequence: &Sequence) -> String {
    match field {
        HeadField::Author => sequence.author.clone(),
        HeadField::Song => sequence.title.clone(),
        HeadField::SequenceType => SEQUENCE_TYPE_MEDIA.to_string(),
        HeadField::MediaFile => sequence.media_file.clone(),
        HeadField::SequenceDuration => sequence.duration_secs(),
    }
}

/// Claim the effects for a `<Node>` element. Only the first node carrying
/// a channel's name receives its effects.
fn take_slot<'s>(
    element: &BytesStart<'_>,
    slots: &mut HashMap<&str, Effects<'s>>,
) -> Result<Option<Effects<'s>>> {
    if element.name().as_ref() != NODE_TAG {
        return Ok(None);
    }
    let Some(name) = element.try_get_attribute("name")? else {
        return Ok(None);
    };
    let name = name.unescape_value()?;
    Ok(slots.remove(name.as_ref()))
}

fn write_field(writer: &mut Writer<Vec<u8>>, start: BytesStart<'_>, value: String) -> Result<()> {
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    if !value.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&value)))?;
    }
    writer.write_event(Event::End(end))?;
    Ok(())
}

fn write_effects(writer: &mut Writer<Vec<u8>>, effects: Effects<'_>) -> Result<()> {
    for &(start, end) in effects {
        let start = start.to_string();
        let end = end.to_string();
        let mut effect = BytesStart::new("Effect");
        effect.push_attribute(("ref", "0"));
        effect.push_attribute(("name", "On"));
        effect.push_attribute(("selected", "1"));
        effect.push_attribute(("startTime", start.as_str()));
        effect.push_attribute(("endTime", end.as_str()));
        effect.push_attribute(("palette", "1"));
        writer.write_event(Event::Empty(effect))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lights::{left, rear};
    use crate::translator::LightInterval;
    use crate::xsq::XsqReader;

    fn sample_sequence() -> Sequence {
        let mut sequence = Sequence::new("/out/lightshow.wav", 7000);
        sequence.push(LightInterval {
            channel: left::FRONT_TURN,
            start: 2000,
            end: 2100,
        });
        sequence.push(LightInterval {
            channel: rear::BRAKE_LIGHTS,
            start: 1000,
            end: 1500,
        });
        sequence.push(LightInterval {
            channel: left::FRONT_TURN,
            start: 2000,
            end: 2100,
        });
        sequence
    }

    #[test]
    fn test_render_default_template() {
        let data = XsqWriter::default().render(&sample_sequence()).unwrap();
        let text = String::from_utf8(data).unwrap();
        assert!(text.contains("<mediaFile>/out/lightshow.wav</mediaFile>"));
        assert!(text.contains("<sequenceDuration>7.000</sequenceDuration>"));
        assert!(text.contains("<sequenceType>Media</sequenceType>"));
        assert!(text.contains("<author></author>"));
        assert!(text.contains(
            r#"<Node index="24" name="Brake Lights"><Effect ref="0" name="On" selected="1" startTime="1000" endTime="1500" palette="1"/></Node>"#
        ));
        // Untouched slots stay empty elements
        assert!(text.contains(r#"<Node index="27" name="License Plate"/>"#));
    }

    #[test]
    fn test_render_reads_back() {
        let data = XsqWriter::default().render(&sample_sequence()).unwrap();
        let doc = XsqReader::new(std::str::from_utf8(&data).unwrap())
            .parse()
            .unwrap();
        assert_eq!(doc.head.media_file, "/out/lightshow.wav");
        assert_eq!(doc.effects("Left Front Turn").len(), 2);
        assert_eq!(doc.effects("Brake Lights")[0].start, 1000);
    }

    #[test]
    fn test_effects_appended_after_existing_children() {
        let template = r#"<xsequence><head><author>x</author><sequenceType/><mediaFile/><sequenceDuration>1</sequenceDuration></head><Node name="Brake Lights"><Effect ref="0" name="On" selected="1" startTime="1" endTime="2" palette="1"/></Node></xsequence>"#;
        let data = XsqWriter::new(template).render(&sample_sequence());
        // Left Front Turn has no slot in this template
        assert!(matches!(data, Err(Error::MissingSlot(ref name)) if name == "Left Front Turn"));

        let mut sequence = Sequence::new("a.wav", 0);
        sequence.push(LightInterval {
            channel: rear::BRAKE_LIGHTS,
            start: 5,
            end: 9,
        });
        let text = String::from_utf8(XsqWriter::new(template).render(&sequence).unwrap()).unwrap();
        assert!(text.contains(
            r#"startTime="1" endTime="2" palette="1"/><Effect ref="0" name="On" selected="1" startTime="5" endTime="9" palette="1"/></Node>"#
        ));
        assert!(text.contains("<author></author>"));
        assert!(text.contains("<sequenceType>Media</sequenceType>"));
    }

    #[test]
    fn test_missing_head_field() {
        let template = r#"<xsequence><head><author/><sequenceType/><mediaFile/></head></xsequence>"#;
        let result = XsqWriter::new(template).render(&Sequence::new("a.wav", 0));
        assert!(matches!(result, Err(Error::MissingField("sequenceDuration"))));
    }

    #[test]
    fn test_render_is_deterministic() {
        let writer = XsqWriter::default();
        let a = writer.render(&sample_sequence()).unwrap();
        let b = writer.render(&sample_sequence()).unwrap();
        assert_eq!(a, b);
    }
}
