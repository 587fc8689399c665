//! Song transcoding: Ogg Vorbis (`.egg`/`.ogg`) to 16-bit PCM WAV

use crate::error::{Error, Result};
use lewton::inside_ogg::OggStreamReader;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Decode `src` and write it to `dest` as WAV, keeping the channel count
/// and sample rate. Returns the number of frames written.
pub fn transcode_ogg_to_wav(src: &Path, dest: &Path) -> Result<u64> {
    let file = File::open(src).map_err(|e| {
        Error::Io(io::Error::new(
            e.kind(),
            format!("Failed to open song '{}': {}", src.display(), e),
        ))
    })?;
    let mut reader = OggStreamReader::new(BufReader::new(file))?;

    let channels = reader.ident_hdr.audio_channels as u16;
    let spec = hound::WavSpec {
        channels,
        sample_rate: reader.ident_hdr.audio_sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(dest, spec)?;

    let mut samples = 0u64;
    // Packets come back interleaved
    while let Some(packet) = reader.read_dec_packet_itl()? {
        for sample in &packet {
            writer.write_sample(*sample)?;
        }
        samples += packet.len() as u64;
    }
    writer.finalize()?;

    Ok(samples / channels.max(1) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_song() {
        let dir = tempfile::tempdir().unwrap();
        let err = transcode_ogg_to_wav(&dir.path().join("song.egg"), &dir.path().join("out.wav"))
            .unwrap_err();
        assert!(err.to_string().contains("song.egg"));
    }

    #[test]
    fn test_not_vorbis() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("song.egg");
        std::fs::write(&src, b"RIFF....WAVEfmt not an ogg stream").unwrap();
        let result = transcode_ogg_to_wav(&src, &dir.path().join("out.wav"));
        assert!(matches!(result, Err(Error::Vorbis(_))));
    }
}
