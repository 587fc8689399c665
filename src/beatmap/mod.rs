//! Beat Saber level files (v2 `.dat` format)
//!
//! Only the fields the converter needs are modelled; everything else in the
//! JSON is ignored.

pub mod info;

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub use info::{DifficultyBeatmap, DifficultyBeatmapSet, Info};

/// A gameplay note
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Note {
    /// Time in beats
    #[serde(rename = "_time")]
    pub time: f64,
    /// Column, 0..=3 on the standard grid
    #[serde(rename = "_lineIndex")]
    pub line_index: i64,
    /// Row, 0..=2 on the standard grid
    #[serde(rename = "_lineLayer")]
    pub line_layer: i64,
    /// 0 = left (red), 1 = right (blue), 3 = bomb
    #[serde(rename = "_type")]
    pub note_type: i32,
}

/// A lighting event
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Cue {
    /// Time in beats
    #[serde(rename = "_time")]
    pub time: f64,
    /// Light group the event controls
    #[serde(rename = "_type")]
    pub cue_type: i32,
    /// Intensity/colour code, 0 = off
    #[serde(rename = "_value")]
    pub value: i32,
}

/// One difficulty file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Difficulty {
    #[serde(rename = "_notes", default)]
    pub notes: Vec<Note>,
    #[serde(rename = "_events", default)]
    pub cues: Vec<Cue>,
}

impl Difficulty {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = read_file(path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}

/// A difficulty together with the level metadata next to it
#[derive(Debug, Clone)]
pub struct Level {
    pub info: Info,
    pub difficulty: Difficulty,
    /// Directory holding `Info.dat`, the difficulty and the song
    pub directory: PathBuf,
}

impl Level {
    /// Load a difficulty file and the `Info.dat` in the same directory
    pub fn load(difficulty_path: &Path) -> Result<Self> {
        let directory = difficulty_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let difficulty = Difficulty::from_path(difficulty_path)?;
        let info = Info::from_path(&info::info_path(&directory))?;
        Ok(Self {
            info,
            difficulty,
            directory,
        })
    }

    /// Path of the song referenced by `_songFilename`
    pub fn song_path(&self) -> PathBuf {
        self.directory.join(&self.info.song_filename)
    }
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(path.to_path_buf())
        } else {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read '{}': {}", path.display(), e),
            ))
        }
    })
}
