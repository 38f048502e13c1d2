use crate::gimbal::{rest_pose, AxisOrder, EulerAngles};
use crate::placement::{Placement, Vector};
use crate::rotation::{Axis, Rotation};

/// Placements produced by one recompute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GimbalPlacements {
    pub x_ring: Placement,
    pub y_ring: Placement,
    pub z_ring: Placement,
    pub target: Option<Placement>,
}

impl GimbalPlacements {
    pub fn ring(&self, axis: Axis) -> Placement {
        match axis {
            Axis::X => self.x_ring,
            Axis::Y => self.y_ring,
            Axis::Z => self.z_ring,
        }
    }
}

/// Compose the ring and target placements for one set of angles.
///
/// With `order` written outermost first as `[o, m, i]`:
/// - ring `i` gets `Ri ∘ Init_i`
/// - ring `m` gets `Ro ∘ Rm ∘ Init_m`
/// - ring `o` gets `Ro ∘ Rm ∘ Ri ∘ Init_o`
/// - the target gets `Ro ∘ Rm ∘ Ri`
///
/// Every ring is translated to `base`. Pass the linked object's current
/// translation as `base` when a target is linked; the target keeps it.
pub fn compute_placements(
    angles: EulerAngles,
    base: Vector,
    has_target: bool,
    order: AxisOrder,
) -> GimbalPlacements {
    let [outer, middle, inner] = order.chain();
    let r_outer = angles.rotation(outer);
    let r_middle = angles.rotation(middle);
    let r_inner = angles.rotation(inner);

    let outer_middle = r_outer * r_middle;
    let composed = outer_middle * r_inner;

    let ring_rotation = |axis: Axis| -> Rotation {
        let dynamic = match order.depth(axis) {
            0 => composed,
            1 => outer_middle,
            _ => r_inner,
        };
        dynamic * rest_pose(axis)
    };

    GimbalPlacements {
        x_ring: Placement::new(base, ring_rotation(Axis::X)),
        y_ring: Placement::new(base, ring_rotation(Axis::Y)),
        z_ring: Placement::new(base, ring_rotation(Axis::Z)),
        target: has_target.then(|| Placement::new(base, composed)),
    }
}
