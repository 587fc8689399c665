//! Level translator - turns notes and lighting cues into light intervals
//!
//! Translation is a pure function of the tempo and the two event lists:
//! notes become fixed blinks on the front banks, cues become spans on the
//! rear bank, and the assembler groups everything per channel.

pub mod cues;
pub mod notes;
pub mod timebase;

use crate::beatmap::{Cue, Note};
use crate::error::Result;
use crate::lights::{Channel, CueBindings};
use crate::sequence::Sequence;
use cues::CueTranslator;
use notes::NoteTranslator;
use timebase::Timebase;

pub use cues::CueTimeline;
pub use notes::NoteTimeline;

/// How long a note keeps its lights on (ms)
pub const DEFAULT_BLINK_MS: i64 = 100;

/// Time added after the last note before the sequence ends (ms)
pub const DEFAULT_MARGIN_MS: i64 = 5000;

/// A channel switched on for `start..end` milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightInterval {
    pub channel: Channel,
    pub start: i64,
    pub end: i64,
}

impl LightInterval {
    pub fn duration(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }
}

/// Counters gathered while translating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationStats {
    pub note_intervals: usize,
    pub cue_intervals: usize,
    pub skipped_notes: usize,
    pub skipped_cues: usize,
}

/// Translator configured with a binding table and timing constants
pub struct Translator<'a> {
    bindings: &'a CueBindings,
    blink_ms: i64,
    margin_ms: i64,
}

impl<'a> Translator<'a> {
    pub fn new(bindings: &'a CueBindings) -> Self {
        Self {
            bindings,
            blink_ms: DEFAULT_BLINK_MS,
            margin_ms: DEFAULT_MARGIN_MS,
        }
    }

    pub fn with_blink(mut self, blink_ms: i64) -> Self {
        self.blink_ms = blink_ms;
        self
    }

    pub fn with_margin(mut self, margin_ms: i64) -> Self {
        self.margin_ms = margin_ms;
        self
    }

    /// Translate a level into a sequence whose media field is `media_file`
    pub fn translate(
        &self,
        bpm: f64,
        notes: &[Note],
        cues: &[Cue],
        media_file: &str,
    ) -> Result<(Sequence, TranslationStats)> {
        let timebase = Timebase::new(bpm);

        let note_timeline = NoteTranslator::new(self.bindings, timebase, self.blink_ms).translate(notes);
        let cue_timeline =
            CueTranslator::new(self.bindings, timebase).translate(cues, note_timeline.last_start)?;

        let stats = TranslationStats {
            note_intervals: note_timeline.intervals.len(),
            cue_intervals: cue_timeline.intervals.len(),
            skipped_notes: note_timeline.skipped,
            skipped_cues: cue_timeline.skipped,
        };

        let sequence = Sequence::assemble(note_timeline, cue_timeline, media_file, self.margin_ms);
        Ok((sequence, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lights::{left, rear};

    #[test]
    fn test_translate_end_to_end() {
        let bindings = CueBindings::vehicle();
        let notes = [
            Note {
                time: 4.0,
                line_index: 0,
                line_layer: 0,
                note_type: 0,
            },
            Note {
                time: 6.0,
                line_index: 9,
                line_layer: 9,
                note_type: 1,
            },
        ];
        let cues = [
            Cue {
                time: 2.0,
                cue_type: 1,
                value: 2,
            },
            Cue {
                time: 3.0,
                cue_type: 1,
                value: 0,
            },
        ];

        let (sequence, stats) = Translator::new(&bindings)
            .translate(120.0, &notes, &cues, "/tmp/lightshow.wav")
            .unwrap();

        assert_eq!(
            stats,
            TranslationStats {
                note_intervals: 2,
                cue_intervals: 1,
                skipped_notes: 1,
                skipped_cues: 1,
            }
        );
        assert_eq!(sequence.duration_ms, 3000 + DEFAULT_MARGIN_MS);
        assert_eq!(sequence.effects(&left::FRONT_FOG), &[(2000, 2100)]);
        assert_eq!(sequence.effects(&rear::BRAKE_LIGHTS), &[(1000, 1500)]);
    }

    #[test]
    fn test_custom_blink_and_margin() {
        let bindings = CueBindings::vehicle();
        let notes = [Note {
            time: 1.0,
            line_index: 3,
            line_layer: 2,
            note_type: 0,
        }];
        let (sequence, _) = Translator::new(&bindings)
            .with_blink(250)
            .with_margin(1000)
            .translate(60.0, &notes, &[], "song.wav")
            .unwrap();
        assert_eq!(sequence.effects(&left::CHANNEL_6), &[(1000, 1250)]);
        assert_eq!(sequence.duration_ms, 2000);
    }

    #[test]
    fn test_cue_error_propagates() {
        let bindings = CueBindings::vehicle();
        let cues = [
            Cue {
                time: 10.0,
                cue_type: 0,
                value: 3,
            },
            Cue {
                time: 2.0,
                cue_type: 0,
                value: 0,
            },
        ];
        let result = Translator::new(&bindings).translate(120.0, &[], &cues, "song.wav");
        assert!(matches!(result, Err(crate::error::Error::CueOrdering { .. })));
    }

    #[test]
    fn test_outro_fade_after_last_note() {
        let bindings = CueBindings::vehicle();
        let notes = [Note {
            time: 8.0,
            line_index: 0,
            line_layer: 0,
            note_type: 0,
        }];
        let cues = [Cue {
            time: 9.0,
            cue_type: 0,
            value: 3,
        }];
        let (sequence, stats) = Translator::new(&bindings)
            .translate(120.0, &notes, &cues, "song.wav")
            .unwrap();
        assert_eq!(stats.cue_intervals, 2);
        assert_eq!(sequence.effects(&rear::LEFT_SIDE_REPEATER)[0].0, 4500);
        assert_eq!(sequence.duration_ms, 4000 + DEFAULT_MARGIN_MS);
    }

    #[test]
    fn test_huge_note_time_saturates() {
        let bindings = CueBindings::vehicle();
        let notes = [Note {
            time: 1e300,
            line_index: 0,
            line_layer: 0,
            note_type: 0,
        }];
        let (sequence, _) = Translator::new(&bindings)
            .translate(120.0, &notes, &[], "song.wav")
            .unwrap();
        assert_eq!(sequence.effects(&left::FRONT_TURN), &[(i64::MAX, i64::MAX)]);
        assert_eq!(sequence.duration_ms, i64::MAX);
    }
}
