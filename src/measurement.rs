use std::fmt::{Display, Formatter};

/// Running statistics for one key, all in tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub minimum: i32,
    pub maximum: i32,
    pub count: u64,
    pub sum: i64
}

impl Measurement {
    #[inline]
    pub fn update(&mut self, value: i32) {
        self.minimum = self.minimum.min(value);
        self.maximum = self.maximum.max(value);
        self.count += 1;
        self.sum += value as i64;
    }

    #[inline]
    pub fn merge(&mut self, other: &Self) {
        self.minimum = self.minimum.min(other.minimum);
        self.maximum = self.maximum.max(other.maximum);
        self.count += other.count;
        self.sum += other.sum;
    }

    /// Mean in tenths, ties rounded away from zero.
    pub fn mean_tenths(&self) -> i64 {
        if self.count == 0 {
            return 0;
        }
        let sum = self.sum as i128;
        let count = self.count as i128;
        let rounded = (2 * sum.abs() + count) / (2 * count);

        match sum < 0 {
            true => -rounded as i64,
            false => rounded as i64,
        }
    }
}

impl Default for Measurement {
    fn default() -> Self {
        Self { minimum: i32::MAX, maximum: i32::MIN, count: 0, sum: 0 }
    }
}

impl Display for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let min = Tenths(self.minimum as i64);
        let avg = Tenths(self.mean_tenths());
        let max = Tenths(self.maximum as i64);

        write!(f, "{min}/{avg}/{max}")
    }
}

/// A tenths value rendered with exactly one fractional digit. Zero never
/// carries a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenths(pub i64);

impl Display for Tenths {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();

        write!(f, "{sign}{}.{}", magnitude / 10, magnitude % 10)
    }
}
