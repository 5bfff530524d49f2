/// Circular buffer indexed by a cursor shared with every other line.
///
/// The line never tracks its own write position: the caller passes the
/// engine-wide sample cursor, and the line writes at `cursor mod capacity`
/// and reads `length` samples behind it. Capacity is a power of two so the
/// modulo is a mask and stays correct across cursor wraparound.
pub struct DelayLine {
    buffer: Vec<f32>,
    mask: usize,
}

impl DelayLine {
    /// Allocate a zeroed line. `capacity` is rounded up to a power of two.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        Self {
            buffer: vec![0.0; capacity],
            mask: capacity - 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn write(&mut self, cursor: usize, sample: f32) {
        self.buffer[cursor & self.mask] = sample;
    }

    /// Sample written `length` steps before `cursor`.
    #[inline]
    pub fn read(&self, cursor: usize, length: usize) -> f32 {
        self.buffer[cursor.wrapping_sub(length) & self.mask]
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_back_after_length_steps() {
        let mut line = DelayLine::new(8);
        for cursor in 0..20 {
            line.write(cursor, cursor as f32);
            let delayed = line.read(cursor, 3);
            let expected = if cursor >= 3 { (cursor - 3) as f32 } else { 0.0 };
            assert_eq!(delayed, expected);
        }
    }

    #[test]
    fn zero_length_reads_current_write() {
        let mut line = DelayLine::new(4);
        line.write(5, 0.25);
        assert_eq!(line.read(5, 0), 0.25);
    }

    #[test]
    fn capacity_rounds_to_power_of_two() {
        assert_eq!(DelayLine::new(1000).capacity(), 1024);
        assert_eq!(DelayLine::new(8192).capacity(), 8192);
        assert_eq!(DelayLine::new(0).capacity(), 1);
    }

    #[test]
    fn survives_cursor_wraparound() {
        let mut line = DelayLine::new(16);
        let start = usize::MAX - 4;
        for step in 0..10usize {
            let cursor = start.wrapping_add(step);
            line.write(cursor, step as f32);
            if step >= 2 {
                assert_eq!(line.read(cursor, 2), (step - 2) as f32);
            }
        }
    }

    #[test]
    fn reset_zeroes_buffer() {
        let mut line = DelayLine::new(4);
        line.write(0, 1.0);
        line.reset();
        assert_eq!(line.read(0, 0), 0.0);
    }
}
