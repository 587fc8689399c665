//! xLights sequence (`.xsq`) container

pub mod reader;
pub mod writer;

pub use reader::{XsqDocument, XsqEffect, XsqHead, XsqReader};
pub use writer::XsqWriter;

/// Empty vehicle sequence with one `<Node>` slot per light channel
pub const DEFAULT_TEMPLATE: &str = include_str!("template.xsq");

/// Scalar fields in the `<head>` section that the converter fills in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadField {
    Author,
    Song,
    SequenceType,
    MediaFile,
    SequenceDuration,
}

impl HeadField {
    pub const ALL: [HeadField; 5] = [
        HeadField::Author,
        HeadField::Song,
        HeadField::SequenceType,
        HeadField::MediaFile,
        HeadField::SequenceDuration,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            HeadField::Author => "author",
            HeadField::Song => "song",
            HeadField::SequenceType => "sequenceType",
            HeadField::MediaFile => "mediaFile",
            HeadField::SequenceDuration => "sequenceDuration",
        }
    }

    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.tag().as_bytes() == tag)
    }

    /// The title is optional; a template without the rest is unusable
    pub fn required(self) -> bool {
        !matches!(self, HeadField::Song)
    }
}

/// Element holding one channel's effects
pub(crate) const NODE_TAG: &[u8] = b"Node";
/// One timed effect
pub(crate) const EFFECT_TAG: &[u8] = b"Effect";
/// Sequence type for shows played against an audio file
pub const SEQUENCE_TYPE_MEDIA: &str = "Media";
