use core::ops::{Add, Div, Mul, Sub};

/// 2D point or vector in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Truncates both components toward zero.
    #[inline]
    pub fn truncated(self) -> (i64, i64) {
        (self.x.trunc() as i64, self.y.trunc() as i64)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Homogeneous point `(x, y, 1, 1)` as used by the transform code.
    #[inline]
    pub fn to_point4(self) -> glam::Vec4 {
        glam::Vec4::new(self.x, self.y, 1.0, 1.0)
    }
}

impl From<glam::Vec2> for Vec2 {
    #[inline]
    fn from(v: glam::Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vec2> for glam::Vec2 {
    #[inline]
    fn from(v: Vec2) -> Self {
        glam::Vec2::new(v.x, v.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_rounds_toward_zero() {
        assert_eq!(Vec2::new(19.9, -0.7).truncated(), (19, 0));
        assert_eq!(Vec2::new(-3.2, 4.0).truncated(), (-3, 4));
    }

    #[test]
    fn glam_round_trip_preserves_components() {
        let v = Vec2::new(1.5, -2.0);
        let g: glam::Vec2 = v.into();
        assert_eq!(Vec2::from(g), v);
    }
}
