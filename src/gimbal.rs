//! Gimbal model: three nested rings, one per rotation axis.
//!
//! A torus primitive is authored flat in the XY-plane. Each ring carries a
//! fixed rest pose that stands it up perpendicular to its own axis, so at
//! zero angles the three rings appear as orthogonal circles.

mod config;
mod engine;
mod entity;

pub use config::{Angle, GimbalConfig, Length, UncheckedGimbalConfig};
pub use engine::{compute_placements, GimbalPlacements};
pub use entity::{select_object, set_placement_if_different, Gimbal, RecomputeReport};

use serde::{Deserialize, Serialize};

use crate::rotation::{Axis, Rotation};

/// Order in which the three elementary rotations are composed, written
/// outermost first. `Zyx` composes `Rz ∘ Ry ∘ Rx` (yaw-pitch-roll).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrder {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    #[default]
    Zyx,
}

impl AxisOrder {
    pub const ALL: [AxisOrder; 6] = [
        AxisOrder::Xyz,
        AxisOrder::Xzy,
        AxisOrder::Yxz,
        AxisOrder::Yzx,
        AxisOrder::Zxy,
        AxisOrder::Zyx,
    ];

    /// Axes from outermost (applied last) to innermost (applied first).
    pub fn chain(self) -> [Axis; 3] {
        match self {
            AxisOrder::Xyz => [Axis::X, Axis::Y, Axis::Z],
            AxisOrder::Xzy => [Axis::X, Axis::Z, Axis::Y],
            AxisOrder::Yxz => [Axis::Y, Axis::X, Axis::Z],
            AxisOrder::Yzx => [Axis::Y, Axis::Z, Axis::X],
            AxisOrder::Zxy => [Axis::Z, Axis::X, Axis::Y],
            AxisOrder::Zyx => [Axis::Z, Axis::Y, Axis::X],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AxisOrder::Xyz => "xyz",
            AxisOrder::Xzy => "xzy",
            AxisOrder::Yxz => "yxz",
            AxisOrder::Yzx => "yzx",
            AxisOrder::Zxy => "zxy",
            AxisOrder::Zyx => "zyx",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        AxisOrder::ALL
            .into_iter()
            .find(|o| o.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Position of `axis` in [`chain`](Self::chain); 0 is outermost.
    pub fn depth(self, axis: Axis) -> usize {
        self.chain()
            .iter()
            .position(|a| *a == axis)
            .unwrap_or_default()
    }
}

/// Rotation angles in degrees, one per axis. Any real value is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EulerAngles {
    pub const ZERO: EulerAngles = EulerAngles { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Elementary rotation about `axis` by this axis' angle.
    pub fn rotation(&self, axis: Axis) -> Rotation {
        Rotation::about(axis, self.get(axis))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    pub fn rgba(self) -> [f32; 4] {
        match self {
            Color::Red => [1.0, 0.0, 0.0, 1.0],
            Color::Green => [0.0, 1.0, 0.0, 1.0],
            Color::Blue => [0.0, 0.0, 1.0, 1.0],
        }
    }
}

/// Rest pose of the ring for `axis`.
pub fn rest_pose(axis: Axis) -> Rotation {
    match axis {
        Axis::X => Rotation::about(Axis::Y, 90.0),
        Axis::Y => Rotation::about(Axis::X, 90.0),
        Axis::Z => Rotation::about(Axis::Z, 0.0),
    }
}

/// Static description of one ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub axis: Axis,
    pub initial_rotation: Rotation,
    /// Major radius.
    pub radius1: f64,
    /// Tube radius.
    pub radius2: f64,
    pub color: Color,
}

impl RingSpec {
    /// Rings shrink by one `thickness` per axis (X outermost in size) so they
    /// nest without touching.
    pub fn for_axis(axis: Axis, size: f64, thickness: f64) -> Self {
        let padding = thickness * 3.0;
        let color = match axis {
            Axis::X => Color::Red,
            Axis::Y => Color::Green,
            Axis::Z => Color::Blue,
        };
        Self {
            axis,
            initial_rotation: rest_pose(axis),
            radius1: (size + padding) - thickness * axis.index() as f64,
            radius2: thickness / 2.0,
            color,
        }
    }

    /// Specs for X, Y and Z, in creation order.
    pub fn all(size: f64, thickness: f64) -> [RingSpec; 3] {
        Axis::ALL.map(|axis| RingSpec::for_axis(axis, size, thickness))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_approx_eq_vec;

    #[test]
    fn rest_poses_stand_each_ring_perpendicular_to_its_axis() {
        // A flat torus has its normal along +Z.
        let normal = Axis::Z.unit();
        for axis in Axis::ALL {
            let n = rest_pose(axis).apply(normal);
            assert!(
                (n.dot(&axis.unit()).abs() - 1.0).abs() < 1e-12,
                "ring {axis:?} normal {n:?} is not along its axis"
            );
        }
        assert_approx_eq_vec(rest_pose(Axis::X).apply(normal), Axis::X.unit(), 1e-12);
        assert_approx_eq_vec(rest_pose(Axis::Y).apply(normal), Axis::Y.unit() * -1.0, 1e-12);
    }

    #[test]
    fn z_rest_pose_is_identity() {
        assert_eq!(rest_pose(Axis::Z), Rotation::IDENTITY);
    }

    #[test]
    fn ring_radii_nest() {
        let [x, y, z] = RingSpec::all(15.0, 1.0);
        assert_eq!(x.radius1, 18.0);
        assert_eq!(y.radius1, 17.0);
        assert_eq!(z.radius1, 16.0);
        assert!([x, y, z].iter().all(|r| r.radius2 == 0.5));
        assert_eq!([x.color, y.color, z.color], [Color::Red, Color::Green, Color::Blue]);
    }

    #[test]
    fn every_order_is_a_permutation() {
        for order in AxisOrder::ALL {
            let chain = order.chain();
            for axis in Axis::ALL {
                assert_eq!(chain[order.depth(axis)], axis);
            }
        }
    }

    #[test]
    fn order_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AxisOrder::Zyx).unwrap(), "\"zyx\"");
        let order: AxisOrder = serde_json::from_str("\"xyz\"").unwrap();
        assert_eq!(order, AxisOrder::Xyz);
    }

    #[test]
    fn labels_round_trip() {
        for order in AxisOrder::ALL {
            assert_eq!(AxisOrder::from_label(order.label()), Some(order));
            assert_eq!(serde_json::to_value(order).unwrap(), order.label());
        }
        assert_eq!(AxisOrder::from_label(" ZYX "), Some(AxisOrder::Zyx));
        assert_eq!(AxisOrder::from_label("xyy"), None);
    }
}
