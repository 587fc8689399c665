//! Sequence document assembled from the translated timelines

use crate::lights::Channel;
use crate::translator::{CueTimeline, LightInterval, NoteTimeline};
use std::collections::BTreeMap;

/// Light show ready to be written into a container
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    pub title: String,
    pub author: String,
    /// Audio the show plays against
    pub media_file: String,
    /// Total length in ms: last note start plus the margin
    pub duration_ms: i64,
    /// `(start, end)` pairs per channel, in insertion order
    channels: BTreeMap<Channel, Vec<(i64, i64)>>,
}

impl Sequence {
    pub fn new(media_file: impl Into<String>, duration_ms: i64) -> Self {
        Self {
            media_file: media_file.into(),
            duration_ms,
            ..Self::default()
        }
    }

    /// Merge note blinks and cue spans. Note intervals go in first, so a
    /// channel's list is ordered by emission, not globally by time.
    pub fn assemble(
        notes: NoteTimeline,
        cues: CueTimeline,
        media_file: &str,
        margin_ms: i64,
    ) -> Self {
        let mut sequence = Self::new(media_file, notes.last_start.saturating_add(margin_ms));
        for interval in notes.intervals.into_iter().chain(cues.intervals) {
            sequence.push(interval);
        }

        let overrun = sequence
            .intervals()
            .filter(|i| i.end > sequence.duration_ms)
            .count();
        if overrun > 0 {
            log::warn!(
                "{} light intervals run past the end of the sequence ({}ms)",
                overrun,
                sequence.duration_ms
            );
        }

        sequence
    }

    pub fn push(&mut self, interval: LightInterval) {
        self.channels
            .entry(interval.channel)
            .or_default()
            .push((interval.start, interval.end));
    }

    /// Intervals on one channel; empty if the channel is never lit
    pub fn effects(&self, channel: &Channel) -> &[(i64, i64)] {
        self.channels
            .get(channel)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Channels with at least one interval, in registry order
    pub fn channels(&self) -> impl Iterator<Item = (&Channel, &[(i64, i64)])> {
        self.channels.iter().map(|(c, e)| (c, e.as_slice()))
    }

    pub fn intervals(&self) -> impl Iterator<Item = LightInterval> + '_ {
        self.channels.iter().flat_map(|(&channel, effects)| {
            effects
                .iter()
                .map(move |&(start, end)| LightInterval { channel, start, end })
        })
    }

    pub fn interval_count(&self) -> usize {
        self.channels.values().map(Vec::len).sum()
    }

    /// Duration in seconds as written to the container
    pub fn duration_secs(&self) -> String {
        format!("{:.3}", self.duration_ms as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lights::{left, rear};

    fn interval(channel: Channel, start: i64, end: i64) -> LightInterval {
        LightInterval { channel, start, end }
    }

    #[test]
    fn test_assemble_groups_by_channel() {
        let notes = NoteTimeline {
            intervals: vec![
                interval(left::FRONT_TURN, 3000, 3100),
                interval(left::FRONT_FOG, 3000, 3100),
                interval(left::FRONT_TURN, 1000, 1100),
            ],
            last_start: 3000,
            skipped: 0,
        };
        let cues = CueTimeline {
            intervals: vec![interval(rear::BRAKE_LIGHTS, 500, 2500)],
            skipped: 0,
        };

        let sequence = Sequence::assemble(notes, cues, "/abs/lightshow.wav", 5000);

        assert_eq!(sequence.duration_ms, 8000);
        assert_eq!(sequence.media_file, "/abs/lightshow.wav");
        assert!(sequence.title.is_empty() && sequence.author.is_empty());
        // Insertion order per channel, not sorted
        assert_eq!(
            sequence.effects(&left::FRONT_TURN),
            &[(3000, 3100), (1000, 1100)]
        );
        assert_eq!(sequence.effects(&rear::BRAKE_LIGHTS), &[(500, 2500)]);
        assert!(sequence.effects(&rear::LICENSE_PLATE).is_empty());
        assert_eq!(sequence.interval_count(), 4);
        assert_eq!(sequence.channels().count(), 3);
    }

    #[test]
    fn test_channels_in_registry_order() {
        let mut sequence = Sequence::new("song.wav", 0);
        sequence.push(interval(rear::LICENSE_PLATE, 0, 1));
        sequence.push(interval(left::SIDE_MARKER, 0, 1));
        sequence.push(interval(left::OUTER_MAIN_BEAM, 0, 1));
        let names: Vec<&str> = sequence.channels().map(|(c, _)| c.name()).collect();
        assert_eq!(
            names,
            vec!["Left Outer Main Beam", "Left Side Marker", "License Plate"]
        );
    }

    #[test]
    fn test_duration_secs() {
        assert_eq!(Sequence::new("", 7000).duration_secs(), "7.000");
        assert_eq!(Sequence::new("", 12345).duration_secs(), "12.345");
    }
}
