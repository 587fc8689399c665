//! Level archive extraction

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

/// Extract a zip archive into `dest_dir`. Entries whose path would land
/// outside `dest_dir` abort the extraction.
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<usize> {
    let file = File::open(archive_path).map_err(|e| {
        Error::Io(io::Error::new(
            e.kind(),
            format!("Failed to open '{}': {}", archive_path.display(), e),
        ))
    })?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;
    if archive.is_empty() {
        return Err(Error::InvalidLevel("archive contains no files".to_string()));
    }

    fs::create_dir_all(dest_dir)?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| Error::UnsafeArchivePath(entry.name().to_string()))?;
        let path = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&path)?;
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&path)?;
        io::copy(&mut entry, &mut out)?;
    }

    Ok(archive.len())
}

/// Remove everything inside `dir`, creating it if needed. Entries that
/// cannot be removed are logged and left behind.
pub fn clear_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let result = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        if let Err(e) = result {
            log::warn!("Failed to delete {}: {}", path.display(), e);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn create_test_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_extract_zip() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("level.zip");
        create_test_zip(
            &archive,
            &[("Info.dat", b"{}"), ("songs/Expert.dat", b"{\"_notes\":[]}")],
        );

        let out = tmp.path().join("out");
        let count = extract_zip(&archive, &out).unwrap();
        assert_eq!(count, 2);
        assert_eq!(fs::read_to_string(out.join("Info.dat")).unwrap(), "{}");
        assert!(out.join("songs/Expert.dat").is_file());
    }

    #[test]
    fn test_extract_rejects_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("evil.zip");
        create_test_zip(&archive, &[("../escape.txt", b"nope")]);

        let out = tmp.path().join("out");
        let err = extract_zip(&archive, &out).unwrap_err();
        assert!(matches!(err, Error::UnsafeArchivePath(_)));
        assert!(!tmp.path().join("escape.txt").exists());
    }

    #[test]
    fn test_extract_empty_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("empty.zip");
        create_test_zip(&archive, &[]);
        assert!(matches!(
            extract_zip(&archive, &tmp.path().join("out")),
            Err(Error::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_extract_not_a_zip() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("bad.zip");
        fs::write(&archive, b"definitely not a zip").unwrap();
        assert!(matches!(
            extract_zip(&archive, &tmp.path().join("out")),
            Err(Error::Zip(_))
        ));
    }

    #[test]
    fn test_clear_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("level");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("a.dat"), "x").unwrap();
        fs::write(dir.join("nested/b.dat"), "y").unwrap();

        clear_dir(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }
}
