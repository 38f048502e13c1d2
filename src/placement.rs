//! Translations and rigid placements.
//!
//! A [`Placement`] is what the host document stores per object: a base
//! translation and a rotation about that base.

use std::ops::{Add, Index, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::rotation::Rotation;

/// Number of decimal digits kept when comparing translations. Anything finer
/// is treated as float round-trip noise.
pub const TRANSLATION_PRECISION: i32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector) -> Vector {
        Vector {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Component-wise equality after rounding to `digits` decimal places.
    pub fn eq_rounded(&self, other: &Vector, digits: i32) -> bool {
        (0..3).all(|i| round_to(self[i], digits) == round_to(other[i], digits))
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    #[inline]
    fn index(&self, row: usize) -> &Self::Output {
        match row {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("index out of bounds: the len is 3 but the index is {}", row),
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, s: f64) -> Vector {
        Vector::new(self.x * s, self.y * s, self.z * s)
    }
}

/// Round to `digits` decimals from the exact binary value, ties to even.
/// Scaling by a power of ten first would round twice.
fn round_to(value: f64, digits: i32) -> f64 {
    let precision = usize::try_from(digits).unwrap_or_default();
    format!("{value:.precision$}").parse().unwrap_or(value)
}

/// Rigid transform: rotate about the origin, then translate by `base`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub base: Vector,
    pub rotation: Rotation,
}

impl Placement {
    pub fn new(base: Vector, rotation: Rotation) -> Self {
        Self { base, rotation }
    }

    /// Value equality used to decide whether a write can be skipped.
    ///
    /// Translations match when equal to [`TRANSLATION_PRECISION`] decimal
    /// digits. Rotations match only when the canonical angle and axis are
    /// exactly equal.
    pub fn approx_eq(&self, other: &Placement) -> bool {
        if !self.base.eq_rounded(&other.base, TRANSLATION_PRECISION) {
            return false;
        }
        let a = self.rotation.as_axis_angle();
        let b = other.rotation.as_axis_angle();
        a.angle == b.angle && a.x == b.x && a.y == b.y && a.z == b.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::Axis;

    #[test]
    fn translations_differing_past_seventh_digit_are_equal() {
        let a = Placement::new(Vector::new(1.00000001, 2.0, -3.00000004), Rotation::IDENTITY);
        let b = Placement::new(Vector::new(1.00000002, 2.00000003, -3.0), Rotation::IDENTITY);
        assert!(a.approx_eq(&b));
    }

    #[test]
    fn translations_differing_at_seventh_digit_are_not_equal() {
        let a = Placement::new(Vector::new(1.0000001, 0.0, 0.0), Rotation::IDENTITY);
        let b = Placement::new(Vector::new(1.0000003, 0.0, 0.0), Rotation::IDENTITY);
        assert!(!a.approx_eq(&b));

        let c = Placement::new(Vector::new(0.0, 0.25, 0.0), Rotation::IDENTITY);
        let d = Placement::new(Vector::new(0.0, 0.26, 0.0), Rotation::IDENTITY);
        assert!(!c.approx_eq(&d));
    }

    #[test]
    fn translation_only_change_is_not_equal() {
        let rotation = Rotation::about(Axis::Y, 90.0);
        let a = Placement::new(Vector::ZERO, rotation);
        let b = Placement::new(Vector::new(0.0, 0.0, 1.0), rotation);
        assert!(!a.approx_eq(&b));
    }

    #[test]
    fn rotation_comparison_is_exact() {
        let base = Vector::new(5.0, 5.0, 5.0);
        let a = Placement::new(base, Rotation::about(Axis::Z, 10.0));
        let b = Placement::new(base, Rotation::about(Axis::Z, 10.0 + 1e-9));
        assert!(!a.approx_eq(&b));
        assert!(a.approx_eq(&Placement::new(base, Rotation::about(Axis::Z, 10.0))));
    }

    #[test]
    fn opposite_hemisphere_quaternions_are_equal() {
        let r = Rotation::about(Axis::X, 45.0);
        let dual = Rotation::from(r.as_quaternion().dual());
        let a = Placement::new(Vector::ZERO, r);
        let b = Placement::new(Vector::ZERO, dual);
        assert!(a.approx_eq(&b));
    }

    #[test]
    fn half_way_translations_round_from_the_exact_value() {
        // 5e-8 is stored just below the tie and 1.23456785 just below
        // 1.2345678|5, so both round down.
        let origin = Placement::default();
        assert!(Placement::new(Vector::new(5e-8, 0.0, 0.0), Rotation::IDENTITY).approx_eq(&origin));

        let a = Placement::new(Vector::new(1.23456785, 0.0, 0.0), Rotation::IDENTITY);
        let b = Placement::new(Vector::new(1.2345678, 0.0, 0.0), Rotation::IDENTITY);
        assert!(a.approx_eq(&b));
    }

    #[test]
    fn exact_ties_round_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.5, 0), 2.0);
    }

    #[test]
    fn tiny_negative_translation_equals_zero() {
        let a = Placement::new(Vector::new(-1e-9, 0.0, 0.0), Rotation::IDENTITY);
        assert!(a.approx_eq(&Placement::default()));
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        assert_eq!(Axis::X.unit().cross(&Axis::Y.unit()), Axis::Z.unit());
        assert_eq!(Axis::Y.unit().cross(&Axis::Z.unit()), Axis::X.unit());
    }
}
