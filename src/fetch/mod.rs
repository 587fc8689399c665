//! Remote level retrieval: download, unpack, locate the difficulty file

pub mod download;
pub mod extract;

use crate::beatmap::{info, Info};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub use download::Downloader;
pub use extract::{clear_dir, extract_zip};

/// Directory inside the work dir that receives the unpacked level
pub const LEVEL_DIR: &str = "BeatSaberInputLevel";

/// True when `input` is an http(s) URL rather than a local path
pub fn is_url(input: &str) -> bool {
    match reqwest::Url::parse(input) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// Download and unpack the level at `url` inside `work_dir`, returning the
/// path of its primary difficulty file.
pub fn fetch_level(downloader: &Downloader, url: &str, work_dir: &Path) -> Result<PathBuf> {
    let level_dir = work_dir.join(LEVEL_DIR);
    clear_dir(&level_dir)?;

    log::info!("Downloading...");
    let archive = downloader.fetch(url, work_dir)?;

    log::info!("Extracting...");
    let extracted = extract_zip(&archive, &level_dir);
    let _ = fs::remove_file(&archive);
    log::debug!("Extracted {} entries into {}", extracted?, level_dir.display());

    locate_difficulty(&level_dir)
}

/// Find the primary difficulty of an unpacked level via its `Info.dat`
pub fn locate_difficulty(level_dir: &Path) -> Result<PathBuf> {
    let info = Info::from_path(&info::info_path(level_dir))?;
    info.primary_difficulty_path(level_dir)
}
