/// Process-wide write cursor for every delay line.
///
/// Advances exactly once per sample, after all lines have been read and
/// written for that sample. Wraps at `usize::MAX`; lines mask it with their
/// power-of-two capacity, so wraparound is seamless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleClock {
    cursor: usize,
}

impl SampleClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn advance(&mut self) {
        self.cursor = self.cursor.wrapping_add(1);
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
