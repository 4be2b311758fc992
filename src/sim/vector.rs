//! Vector helpers on top of `glam::Vec2`
//!
//! Angles are in degrees throughout the simulation, matching how headings
//! and contact angles are reasoned about.

use glam::Vec2;

/// Extra 2D vector operations the simulation needs
pub trait VecExt {
    /// Heading in degrees, in (-180°, 180°]
    fn heading_deg(self) -> f32;
    /// Rotate by `degrees` (positive = toward +y)
    fn rotated_deg(self, degrees: f32) -> Self;
    /// Clamp length to `max.abs()`, keeping direction
    fn limited(self, max: f32) -> Self;
    /// Same direction, new length (zero stays zero)
    fn with_mag(self, mag: f32) -> Self;
    /// Same length, new heading
    fn with_heading_deg(self, degrees: f32) -> Self;
    /// Reflect about a (not necessarily unit) surface normal; a zero normal is a no-op
    fn reflected(self, normal: Self) -> Self;
    /// Component-wise remainder; a zero divisor component leaves that component alone
    fn rem_by(self, divisor: Self) -> Self;
}

impl VecExt for Vec2 {
    #[inline]
    fn heading_deg(self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }

    #[inline]
    fn rotated_deg(self, degrees: f32) -> Self {
        Vec2::from_angle(degrees.to_radians()).rotate(self)
    }

    #[inline]
    fn limited(self, max: f32) -> Self {
        let max = max.abs();
        if self.length_squared() > max * max {
            self.normalize_or_zero() * max
        } else {
            self
        }
    }

    #[inline]
    fn with_mag(self, mag: f32) -> Self {
        self.normalize_or_zero() * mag
    }

    #[inline]
    fn with_heading_deg(self, degrees: f32) -> Self {
        Vec2::from_angle(degrees.to_radians()) * self.length()
    }

    #[inline]
    fn reflected(self, normal: Self) -> Self {
        let n = normal.normalize_or_zero();
        self - 2.0 * self.dot(n) * n
    }

    #[inline]
    fn rem_by(self, divisor: Self) -> Self {
        let rem = |v: f32, d: f32| if d != 0.0 { v % d } else { v };
        Vec2::new(rem(self.x, divisor.x), rem(self.y, divisor.y))
    }
}
