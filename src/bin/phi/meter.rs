/// Peak and RMS of a block of samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Meter {
    pub peak: f32,
    pub rms: f32,
}

impl Meter {
    pub fn measure(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self::default();
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let energy: f32 = buffer.iter().map(|&x| x * x).sum();
        Self {
            peak,
            rms: (energy / buffer.len() as f32).sqrt(),
        }
    }
}
