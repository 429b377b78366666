//! Progress arithmetic shared by the copy surface and the presenters.

/// One progress tick: cumulative bytes written against the expected total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub written: u64,
    pub expected: u64,
}

impl Progress {
    pub fn new(written: u64, expected: u64) -> Self {
        Self { written, expected }
    }

    /// Whole-number percentage of completion, rounded down.
    ///
    /// Returns `None` when the expected total is zero, in which case the tick
    /// carries no usable fraction. Overshoot is clamped to 100.
    pub fn percent(&self) -> Option<u8> {
        if self.expected == 0 {
            return None;
        }
        let pct = u128::from(self.written) * 100 / u128::from(self.expected);
        Some(pct.min(100) as u8)
    }
}

/// Number of bar cells to fill for `percent` out of `width`.
pub fn filled_width(percent: u8, width: usize) -> usize {
    let percent = usize::from(percent.min(100));
    width * percent / 100
}
