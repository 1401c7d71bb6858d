use tracing::warn;

/// Decoded positions of the spinning interval selector. Each detent presents
/// one of ten known 4-bit codes; position 0 reads as ten seconds.
const PATTERNS: [[bool; 4]; 10] = [
    [true, true, true, true],    // 0
    [true, true, true, false],   // 1
    [true, true, false, true],   // 2
    [true, true, false, false],  // 3
    [true, false, true, true],   // 4
    [true, false, true, false],  // 5
    [true, false, false, true],  // 6
    [true, false, false, false], // 7
    [false, true, true, true],   // 8
    [false, true, true, false],  // 9
];

/// BCD interval dial, read once per tick while capture is active.
///
/// A bit pattern matching none of the ten known codes keeps the previously
/// read value instead of erroring, so a bouncing contact between detents
/// never disturbs a running session.
pub struct IntervalDial {
    last_secs: u32,
}

impl IntervalDial {
    /// Seconds per frame used until the dial is first read.
    pub const DEFAULT_SECS: u32 = 3;

    pub fn new() -> Self {
        Self {
            last_secs: Self::DEFAULT_SECS,
        }
    }

    /// Decode one sample of the dial pins into seconds per frame.
    pub fn read(&mut self, bits: [bool; 4]) -> u32 {
        for (position, pattern) in PATTERNS.iter().enumerate() {
            if *pattern == bits {
                self.last_secs = if position == 0 { 10 } else { position as u32 };
                return self.last_secs;
            }
        }
        warn!(?bits, "Unrecognized dial pattern, keeping {}s", self.last_secs);
        self.last_secs
    }

    pub fn current(&self) -> u32 {
        self.last_secs
    }
}

impl Default for IntervalDial {
    fn default() -> Self {
        Self::new()
    }
}
