//! Notes to front light blinks

use super::timebase::Timebase;
use super::LightInterval;
use crate::beatmap::Note;
use crate::lights::{CueBindings, GridPosition, Hand};

/// Result of translating the note list
#[derive(Debug, Clone, Default)]
pub struct NoteTimeline {
    /// One interval per bound channel of every matched note, in note order
    pub intervals: Vec<LightInterval>,
    /// Latest note start in ms over all notes (bombs and unmatched notes
    /// included). Anchors the sequence duration and open-ended cues.
    pub last_start: i64,
    /// Notes that produced no interval
    pub skipped: usize,
}

/// Maps each note to a fixed-length blink on its hand's channels
pub struct NoteTranslator<'a> {
    bindings: &'a CueBindings,
    timebase: Timebase,
    blink_ms: i64,
}

impl<'a> NoteTranslator<'a> {
    pub fn new(bindings: &'a CueBindings, timebase: Timebase, blink_ms: i64) -> Self {
        Self {
            bindings,
            timebase,
            blink_ms,
        }
    }

    /// Translate notes in the order given; the list need not be sorted.
    pub fn translate(&self, notes: &[Note]) -> NoteTimeline {
        let mut timeline = NoteTimeline::default();

        for note in notes {
            let start = self.timebase.to_millis(note.time);
            timeline.last_start = timeline.last_start.max(start);

            let Some(hand) = Hand::from_note_type(note.note_type) else {
                timeline.skipped += 1;
                continue;
            };
            let Some(position) = GridPosition::new(note.line_layer, note.line_index) else {
                log::debug!(
                    "Skipping note at beat {} outside the grid ({}, {})",
                    note.time,
                    note.line_layer,
                    note.line_index
                );
                timeline.skipped += 1;
                continue;
            };

            for &channel in self.bindings.note_channels(hand, position) {
                timeline.intervals.push(LightInterval {
                    channel,
                    start,
                    end: start.saturating_add(self.blink_ms),
                });
            }
        }

        timeline
    }
}
