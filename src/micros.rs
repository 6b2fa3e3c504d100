use core::ops::{Add, AddAssign, Sub};

/// Unsigned Microseconds
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UMicros(u64);

impl UMicros {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates a new instance of microseconds
    #[inline]
    pub const fn new(microseconds: u64) -> Self {
        Self(microseconds)
    }

    /// Returns the microseconds as a u64
    #[inline]
    pub const fn us(&self) -> u64 {
        self.0
    }

    /// ms -> us
    #[inline]
    pub const fn from_ms(ms: u64) -> Self {
        Self(ms * 1_000)
    }

    /// s -> us
    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs * 1_000_000)
    }

    /// Returns seconds
    #[inline]
    pub const fn as_secs_f32(&self) -> f32 {
        self.0 as f32 / 1_000_000.
    }

    /// Returns seconds
    #[inline]
    pub const fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000.
    }

    /// Returns no time if I am less than other.
    pub const fn saturating_sub(&self, other: Self) -> UMicros {
        UMicros(self.0.saturating_sub(other.0))
    }
}

impl Add for UMicros {
    type Output = UMicros;
    fn add(self, rhs: Self) -> Self::Output {
        UMicros(self.0 + rhs.0)
    }
}

impl AddAssign for UMicros {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for UMicros {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        UMicros(self.0 - rhs.0)
    }
}

#[test]
fn conversions() {
    assert_eq!(UMicros::from_ms(250), UMicros::new(250_000));
    assert_eq!(UMicros::from_secs(2).us(), 2_000_000);
    assert!((UMicros::new(1_500_000).as_secs_f64() - 1.5).abs() < f64::EPSILON);
    assert_eq!(
        UMicros::new(10).saturating_sub(UMicros::new(20)),
        UMicros::ZERO
    );

    let mut total = UMicros::from_ms(1);
    total += UMicros::new(500);
    assert_eq!(total + UMicros::new(500), UMicros::from_ms(2));
    assert_eq!(total - UMicros::new(500), UMicros::from_ms(1));
}
