//! Lighting cues to rear light spans
//!
//! A cue only says "this group turns on now". Its span lasts until the next
//! cue of the same type, whatever that cue's value. When nothing follows,
//! the last note start is fed through the timebase once more and used as
//! the end. Cues are scanned in the order given, which must already be
//! ascending in time.

use super::timebase::Timebase;
use super::LightInterval;
use crate::beatmap::Cue;
use crate::error::{Error, Result};
use crate::lights::{CueBindings, RearGroup};
use std::collections::HashMap;

/// Result of translating the cue list
#[derive(Debug, Clone, Default)]
pub struct CueTimeline {
    pub intervals: Vec<LightInterval>,
    /// Cues that started no span: off markers, unbound types and open spans
    /// past the fallback end
    pub skipped: usize,
}

pub struct CueTranslator<'a> {
    bindings: &'a CueBindings,
    timebase: Timebase,
}

impl<'a> CueTranslator<'a> {
    pub fn new(bindings: &'a CueBindings, timebase: Timebase) -> Self {
        Self { bindings, timebase }
    }

    /// Translate cues. `fallback_anchor` is the last note start (ms); its
    /// timebase conversion closes spans that no later cue of the same type
    /// ends.
    pub fn translate(&self, cues: &[Cue], fallback_anchor: i64) -> Result<CueTimeline> {
        let next_times = next_same_type(cues);
        let fallback_end = self.timebase.to_millis(fallback_anchor as f64);
        let mut timeline = CueTimeline::default();

        for (index, cue) in cues.iter().enumerate() {
            let Some(group) = RearGroup::for_cue(cue.cue_type, cue.value) else {
                timeline.skipped += 1;
                continue;
            };

            let start = self.timebase.to_millis(cue.time);
            let Some(next) = next_times[index] else {
                // Open span starting at or past the fallback: nothing to light
                if fallback_end <= start {
                    log::debug!(
                        "Skipping cue at beat {} past the fallback end {}ms",
                        cue.time,
                        fallback_end
                    );
                    timeline.skipped += 1;
                    continue;
                }
                self.emit(&mut timeline, group, start, fallback_end);
                continue;
            };

            let end = self.timebase.to_millis(next);
            if end < start {
                return Err(Error::CueOrdering {
                    index,
                    cue_type: cue.cue_type,
                    start,
                    end,
                });
            }

            self.emit(&mut timeline, group, start, end);
        }

        Ok(timeline)
    }

    fn emit(&self, timeline: &mut CueTimeline, group: RearGroup, start: i64, end: i64) {
        for &channel in self.bindings.rear_channels(group) {
            timeline.intervals.push(LightInterval {
                channel,
                start,
                end,
            });
        }
    }
}

/// For each cue, the time of the first later cue with the same type
fn next_same_type(cues: &[Cue]) -> Vec<Option<f64>> {
    let mut next = vec![None; cues.len()];
    let mut upcoming: HashMap<i32, f64> = HashMap::new();

    for (index, cue) in cues.iter().enumerate().rev() {
        next[index] = upcoming.get(&cue.cue_type).copied();
        upcoming.insert(cue.cue_type, cue.time);
    }

    next
}
