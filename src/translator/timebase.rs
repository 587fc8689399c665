//! Beat to millisecond conversion

/// Linear map from beats to device milliseconds at a fixed tempo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timebase {
    beats_per_ms: f64,
}

impl Timebase {
    /// `bpm` is taken as-is; a non-positive tempo yields meaningless times.
    pub fn new(bpm: f64) -> Self {
        Self {
            beats_per_ms: bpm / 60_000.0,
        }
    }

    /// Convert a beat time to whole milliseconds, truncating toward
    /// negative infinity so a light never fires before its beat.
    pub fn to_millis(&self, beats: f64) -> i64 {
        (beats / self.beats_per_ms).floor() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_120_bpm() {
        let timebase = Timebase::new(120.0);
        assert_eq!(timebase.to_millis(0.0), 0);
        assert_eq!(timebase.to_millis(1.0), 500);
        assert_eq!(timebase.to_millis(2.0), 1000);
        assert_eq!(timebase.to_millis(3.0), 1500);
        assert_eq!(timebase.to_millis(4.0), 2000);
    }

    #[test]
    fn test_floor_not_round() {
        // 1 beat at 90 BPM = 666.67ms
        let timebase = Timebase::new(90.0);
        assert_eq!(timebase.to_millis(1.0), 666);
        // 0.9999 beats at 60 BPM = 999.9ms
        let timebase = Timebase::new(60.0);
        assert_eq!(timebase.to_millis(0.9999), 999);
    }

    proptest! {
        #[test]
        fn test_monotonic(
            bpm in 1.0f64..400.0,
            a in 0.0f64..2000.0,
            b in 0.0f64..2000.0,
        ) {
            let timebase = Timebase::new(bpm);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(timebase.to_millis(lo) <= timebase.to_millis(hi));
        }
    }
}
