//! Converter settings

use crate::translator::{DEFAULT_BLINK_MS, DEFAULT_MARGIN_MS};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "LightshowOutput";
pub const DEFAULT_OUTPUT_STEM: &str = "lightshow";

#[derive(Debug, Clone)]
pub struct Config {
    /// Where the `.xsq` and `.wav` land
    pub output_dir: PathBuf,
    /// File stem shared by both outputs
    pub output_stem: String,
    /// Custom `.xsq` template; the embedded vehicle template otherwise
    pub template: Option<PathBuf>,
    /// Note blink length (ms)
    pub blink_ms: i64,
    /// Time after the last note before the show ends (ms)
    pub margin_ms: i64,
    /// Decode the song to WAV. When off, the media field still points at
    /// the path the WAV would have.
    pub transcode_audio: bool,
}

impl Config {
    pub fn sequence_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.xsq", self.output_stem))
    }

    pub fn audio_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.wav", self.output_stem))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_stem: DEFAULT_OUTPUT_STEM.to_string(),
            template: None,
            blink_ms: DEFAULT_BLINK_MS,
            margin_ms: DEFAULT_MARGIN_MS,
            transcode_audio: true,
        }
    }
}
