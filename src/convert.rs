//! End-to-end conversion: level in, light show out

use crate::audio;
use crate::beatmap::Level;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::{self, Downloader};
use crate::lights::{ChannelRegistry, CueBindings};
use crate::translator::{TranslationStats, Translator};
use crate::xsq::XsqWriter;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// What a conversion produced
#[derive(Debug, Clone)]
pub struct Report {
    pub sequence_path: PathBuf,
    /// Media path recorded in the sequence
    pub audio_path: PathBuf,
    pub stats: TranslationStats,
    pub duration_ms: i64,
}

pub struct Converter {
    config: Config,
    registry: ChannelRegistry,
    bindings: CueBindings,
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            registry: ChannelRegistry::vehicle(),
            bindings: CueBindings::vehicle(),
        }
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    /// Convert a level given as an http(s) URL to a zipped level, or as a
    /// path to a local difficulty file.
    pub fn run(&self, input: &str) -> Result<Report> {
        if !fetch::is_url(input) {
            return self.convert_file(Path::new(input));
        }

        // Removed when it goes out of scope, success or not
        let work_dir = tempfile::Builder::new().prefix("lightshow-").tempdir()?;
        let downloader = Downloader::new()?;
        let difficulty = fetch::fetch_level(&downloader, input, work_dir.path())?;
        self.convert_file(&difficulty)
    }

    /// Convert a difficulty file that has its `Info.dat` and song next to it
    pub fn convert_file(&self, difficulty_path: &Path) -> Result<Report> {
        let level = Level::load(difficulty_path)?;
        for requirement in level.info.requirements() {
            log::warn!(
                "This beat map requires a mod that isn't supported and might cause issues with the conversion: {}",
                requirement
            );
        }

        // Fail on a broken template before spending time on audio
        let writer = match &self.config.template {
            Some(path) => XsqWriter::from_path(path)?,
            None => XsqWriter::default(),
        };

        fs::create_dir_all(&self.config.output_dir)?;
        let audio_path = absolute(&self.config.audio_path())?;
        if self.config.transcode_audio {
            log::info!("Converting song to wav...");
            let frames = audio::transcode_ogg_to_wav(&level.song_path(), &audio_path)?;
            log::debug!("Wrote {} audio frames to {}", frames, audio_path.display());
        }

        log::info!("Translating...");
        let (sequence, stats) = Translator::new(&self.bindings)
            .with_blink(self.config.blink_ms)
            .with_margin(self.config.margin_ms)
            .translate(
                level.info.beats_per_minute,
                &level.difficulty.notes,
                &level.difficulty.cues,
                &audio_path.to_string_lossy(),
            )?;
        log::debug!(
            "{} note and {} cue intervals, skipped {} notes and {} cues",
            stats.note_intervals,
            stats.cue_intervals,
            stats.skipped_notes,
            stats.skipped_cues
        );

        let sequence_path = self.config.sequence_path();
        writer.write(&sequence, &sequence_path)?;

        Ok(Report {
            sequence_path,
            audio_path,
            stats,
            duration_ms: sequence.duration_ms,
        })
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}
