//! Best-effort HTTP download of a level archive

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Per-request timeout
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);
/// Archives larger than this are refused (1 GiB)
pub const MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;
pub const MAX_ATTEMPTS: u32 = 3;
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

const USER_AGENT: &str = concat!("lightshow/", env!("CARGO_PKG_VERSION"));

/// Archive file name inside the work directory
pub const ARCHIVE_NAME: &str = "downloadedBeatmap.zip";

pub struct Downloader {
    client: reqwest::blocking::Client,
    max_size: u64,
    attempts: u32,
    retry_delay: Duration,
}

impl Downloader {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            max_size: MAX_FILE_SIZE,
            attempts: MAX_ATTEMPTS,
            retry_delay: RETRY_DELAY,
        })
    }

    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_retries(mut self, attempts: u32, retry_delay: Duration) -> Self {
        self.attempts = attempts.max(1);
        self.retry_delay = retry_delay;
        self
    }

    /// Download `url` into `dir`, retrying on failure. Returns the archive
    /// path.
    pub fn fetch(&self, url: &str, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(ARCHIVE_NAME);
        let mut last_error = None;

        for attempt in 1..=self.attempts {
            if attempt > 1 {
                log::info!("Retrying download (attempt {}/{})...", attempt, self.attempts);
                thread::sleep(self.retry_delay);
            }
            match self.fetch_once(url, &path) {
                Ok(size) => {
                    log::debug!("Downloaded {} bytes from {}", size, url);
                    return Ok(path);
                }
                Err(e) => {
                    log::warn!("Download attempt {} failed: {}", attempt, e);
                    // Partial file from the failed attempt
                    let _ = fs::remove_file(&path);
                    last_error = Some(e);
                }
            }
        }

        Err(Error::Download(format!(
            "gave up after {} attempts: {}",
            self.attempts,
            last_error.map(|e| e.to_string()).unwrap_or_default()
        )))
    }

    fn fetch_once(&self, url: &str, path: &Path) -> Result<u64> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/octet-stream,*/*")
            .send()?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::Download(format!("HTTP status {}", status)));
        }
        if let Some(length) = response.content_length() {
            if length > self.max_size {
                return Err(too_large(length, self.max_size));
            }
        }

        let mut file = File::create(path)?;
        let written = copy_limited(response, &mut file, self.max_size)?;
        file.sync_all()?;
        Ok(written)
    }
}

/// Copy at most `max_size` bytes; more than that, or nothing at all, is an
/// error.
pub fn copy_limited<R: Read, W: Write>(reader: R, writer: &mut W, max_size: u64) -> Result<u64> {
    let mut limited = reader.take(max_size + 1);
    let written = io::copy(&mut limited, writer)?;
    if written > max_size {
        return Err(too_large(written, max_size));
    }
    if written == 0 {
        return Err(Error::Download("downloaded file is empty".to_string()));
    }
    Ok(written)
}

fn too_large(size: u64, max_size: u64) -> Error {
    Error::Download(format!("file too large: {} bytes (max: {})", size, max_size))
}
