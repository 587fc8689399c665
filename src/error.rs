use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cue #{index} (type {cue_type}) ends before it starts: {start}ms > {end}ms")]
    CueOrdering {
        index: usize,
        cue_type: i32,
        start: i64,
        end: i64,
    },

    #[error("Template has no node for channel '{0}'")]
    MissingSlot(String),

    #[error("Template is missing the <{0}> field")]
    MissingField(&'static str),

    #[error("Duplicate channel name: '{0}'")]
    DuplicateChannel(&'static str),

    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Archive entry escapes the extraction directory: {0}")]
    UnsafeArchivePath(String),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Vorbis decode error: {0}")]
    Vorbis(#[from] lewton::VorbisError),

    #[error("WAV encode error: {0}")]
    Wav(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
