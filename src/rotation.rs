use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::error::{GimbalError, Result};
use crate::placement::Vector;

/// When sin(angle/2) < this, we treat the quaternion as identity to avoid
/// dividing by near-zero when extracting the axis.
const NEAR_IDENTITY_S_THRESHOLD: f64 = 4.0 * f64::EPSILON;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn unit(self) -> Vector {
        match self {
            Axis::X => Vector::new(1.0, 0.0, 0.0),
            Axis::Y => Vector::new(0.0, 1.0, 0.0),
            Axis::Z => Vector::new(0.0, 0.0, 1.0),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    /// Try to create a new unit quaternion. Returns Err if the norm is zero.
    pub fn try_new(w: f64, x: f64, y: f64, z: f64) -> Result<Self> {
        let norm_sq = w * w + x * x + y * y + z * z;
        if norm_sq == 0.0 || !norm_sq.is_finite() {
            return Err(GimbalError::ZeroQuaternion);
        }
        let norm = norm_sq.sqrt();
        Ok(Self {
            w: w / norm,
            x: x / norm,
            y: y / norm,
            z: z / norm,
        })
    }

    // Each quaternion has a dual that represents the same rotation
    pub fn dual(&self) -> Self {
        Self { w: -self.w, x: -self.x, y: -self.y, z: -self.z }
    }

    pub fn conjugate(&self) -> Self {
        Self { w: self.w, x: -self.x, y: -self.y, z: -self.z }
    }

    /// The representative of `±q` with `w > 0`, or with the first non-zero
    /// vector component positive when `w == 0`.
    fn canonical(self) -> Self {
        let flip = if self.w != 0.0 {
            self.w < 0.0
        } else {
            [self.x, self.y, self.z]
                .into_iter()
                .find(|c| *c != 0.0)
                .is_some_and(|c| c < 0.0)
        };
        if flip { self.dual() } else { self }
    }
}

impl Default for Quaternion {
    /// The identity quaternion (no rotation).
    fn default() -> Self {
        Self { w: 1.0, x: 0.0, y: 0.0, z: 0.0 }
    }
}

/// Hamilton product. `a * b` applies `b` first, then `a`.
///
/// The product is not renormalized, so multiplying by the identity is exact.
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, other: Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        (self.w == other.w && self.x == other.x && self.y == other.y && self.z == other.z) ||
        (self.w == -other.w && self.x == -other.x && self.y == -other.y && self.z == -other.z)
    }
}

impl From<AxisAngle> for Quaternion {
    fn from(axis_angle: AxisAngle) -> Self {
        let half = axis_angle.angle / 2.0;
        let s = half.sin();
        // The axis is unit length, so the norm is cos² + sin² and never zero.
        Self::try_new(half.cos(), axis_angle.x * s, axis_angle.y * s, axis_angle.z * s)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AxisAngle {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub angle: f64,
}

impl AxisAngle {
    /// The zero rotation. Its axis is +Z, matching how CAD hosts report an
    /// unrotated placement.
    pub const IDENTITY: AxisAngle = AxisAngle { x: 0.0, y: 0.0, z: 1.0, angle: 0.0 };

    /// Create from axis and angle in degrees. Converts to radians internally.
    pub fn from_degrees(x: f64, y: f64, z: f64, angle_deg: f64) -> Result<Self> {
        Self::try_new(x, y, z, angle_deg.to_radians())
    }

    /// Create a new axis-angle where the axis is normalized and the angle is
    /// brought into [0, π] (in radians).
    pub fn try_new(x: f64, y: f64, z: f64, angle: f64) -> Result<Self> {
        // First bring angle into range [0, 2*pi) with modulo.
        // Rust's % is remainder (truncating division): result has same sign as dividend.
        let mut new_angle = angle % (2.0 * std::f64::consts::PI);
        if new_angle < 0.0 {
            new_angle += 2.0 * std::f64::consts::PI;
        }

        // Axis-angle is a double-cover: (axis, angle) with angle in [pi, 2*pi) is equivalent to
        // (-axis, 2*pi - angle) with angle in (0, pi]. Flip axis when angle >= pi to get [0, pi].
        let mut ax = x;
        let mut ay = y;
        let mut az = z;
        if new_angle >= std::f64::consts::PI {
            new_angle = 2.0 * std::f64::consts::PI - new_angle;
            ax = -x;
            ay = -y;
            az = -z;
        }

        if new_angle == 0.0 {
            return Ok(Self::IDENTITY);
        }
        let axis_norm_sq = ax * ax + ay * ay + az * az;
        if axis_norm_sq == 0.0 {
            return Err(GimbalError::ZeroAxis);
        }
        let axis_norm = axis_norm_sq.sqrt();
        Ok(
            Self {
                x: ax / axis_norm,
                y: ay / axis_norm,
                z: az / axis_norm,
                angle: new_angle
            }
        )
    }

    pub fn axis(&self) -> Vector {
        Vector::new(self.x, self.y, self.z)
    }
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Quaternion> for AxisAngle {
    fn from(quat: Quaternion) -> Self {
        let quat = quat.canonical();
        let w = quat.w.clamp(-1.0, 1.0);
        let angle = 2.0 * w.acos();
        if angle == 0.0 {
            return Self::IDENTITY;
        }
        let s = (1.0 - w * w).sqrt(); // = sin(angle/2)
        if s < NEAR_IDENTITY_S_THRESHOLD {
            return Self::IDENTITY;
        }
        Self::try_new(quat.x, quat.y, quat.z, angle).unwrap_or_default()
    }
}

impl PartialEq for AxisAngle {
    fn eq(&self, other: &Self) -> bool {
       (self.angle == 0.0 && other.angle == 0.0) ||
       (self.angle == other.angle && self.x == other.x && self.y == other.y && self.z == other.z)
    }
}

/// A 3D rotation, stored as a unit quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    quat: Quaternion,
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation {
        quat: Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 },
    };

    /// Elementary rotation of `degrees` about one of the coordinate axes.
    pub fn about(axis: Axis, degrees: f64) -> Self {
        let unit = axis.unit();
        let half = degrees.to_radians() / 2.0;
        let s = half.sin();
        let quat = Quaternion::try_new(half.cos(), unit.x * s, unit.y * s, unit.z * s)
            .unwrap_or_default();
        Rotation { quat }
    }

    /// Rotation of `degrees` about an arbitrary (not necessarily unit) axis.
    pub fn from_axis_degrees(axis: Vector, degrees: f64) -> Result<Self> {
        let axis_angle = AxisAngle::from_degrees(axis.x, axis.y, axis.z, degrees)?;
        Ok(Rotation::from(axis_angle))
    }

    pub fn as_quaternion(&self) -> Quaternion {
        self.quat
    }

    pub fn as_axis_angle(&self) -> AxisAngle {
        AxisAngle::from(self.quat)
    }

    /// Rotation angle in radians, within [0, π].
    pub fn angle(&self) -> f64 {
        self.as_axis_angle().angle
    }

    /// Unit rotation axis. +Z for the identity.
    pub fn axis(&self) -> Vector {
        self.as_axis_angle().axis()
    }

    pub fn inverse(&self) -> Self {
        Rotation { quat: self.quat.conjugate() }
    }

    /// Rotate a vector: `v' = q v q*`.
    pub fn apply(&self, v: Vector) -> Vector {
        let q = self.quat;
        let u = Vector::new(q.x, q.y, q.z);
        let t = u.cross(&v) * 2.0;
        v + t * q.w + u.cross(&t)
    }
}

impl From<Quaternion> for Rotation {
    fn from(quat: Quaternion) -> Self {
        Rotation { quat }
    }
}

impl From<AxisAngle> for Rotation {
    fn from(axis_angle: AxisAngle) -> Self {
        Rotation { quat: Quaternion::from(axis_angle) }
    }
}

impl Mul for Rotation {
    type Output = Rotation;

    fn mul(self, other: Rotation) -> Rotation {
        Rotation {
            quat: self.quat * other.quat,
        }
    }
}
