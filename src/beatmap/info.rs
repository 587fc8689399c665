//! `Info.dat` level metadata

use super::read_file;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    #[serde(rename = "_beatsPerMinute")]
    pub beats_per_minute: f64,
    #[serde(rename = "_songFilename", default)]
    pub song_filename: String,
    #[serde(rename = "_difficultyBeatmapSets", default)]
    pub difficulty_beatmap_sets: Vec<DifficultyBeatmapSet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DifficultyBeatmapSet {
    #[serde(rename = "_beatmapCharacteristicName", default)]
    pub characteristic: String,
    #[serde(rename = "_difficultyBeatmaps", default)]
    pub difficulty_beatmaps: Vec<DifficultyBeatmap>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DifficultyBeatmap {
    #[serde(rename = "_difficulty", default)]
    pub difficulty: String,
    #[serde(rename = "_beatmapFilename")]
    pub beatmap_filename: String,
    #[serde(rename = "_customData", default)]
    pub custom_data: CustomData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomData {
    #[serde(rename = "_requirements", default)]
    pub requirements: Vec<String>,
}

impl Info {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = read_file(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// The difficulty the converter plays: the last (hardest) one of the
    /// first characteristic set.
    pub fn primary_difficulty(&self) -> Option<&DifficultyBeatmap> {
        self.difficulty_beatmap_sets
            .first()
            .and_then(|set| set.difficulty_beatmaps.last())
    }

    /// Mods the primary difficulty needs to be played as intended
    pub fn requirements(&self) -> &[String] {
        self.primary_difficulty()
            .map(|d| d.custom_data.requirements.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve the primary difficulty file inside `directory`
    pub fn primary_difficulty_path(&self, directory: &Path) -> Result<PathBuf> {
        let beatmap = self
            .primary_difficulty()
            .ok_or_else(|| Error::InvalidLevel("no difficulty beatmaps found".to_string()))?;
        let path = directory.join(&beatmap.beatmap_filename);
        if !path.is_file() {
            return Err(Error::NotFound(path));
        }
        Ok(path)
    }
}

/// `Info.dat`, or `info.dat` when only the lowercase variant exists
pub fn info_path(directory: &Path) -> PathBuf {
    let canonical = directory.join("Info.dat");
    if canonical.exists() {
        return canonical;
    }
    let lower = directory.join("info.dat");
    if lower.exists() {
        lower
    } else {
        canonical
    }
}
