//! Typed gimbal properties.
//!
//! Field names serialize as the host property names (`X`, `Y`, `Z`,
//! `LinkedObject`, `Size`, `Thickness`), plus `Order` for the composition
//! order.

use serde::{Deserialize, Serialize};

use crate::document::ObjectId;
use crate::error::{GimbalError, Result};
use crate::gimbal::{AxisOrder, EulerAngles, RingSpec};

pub const DEFAULT_SIZE: f64 = 15.0;
pub const DEFAULT_THICKNESS: f64 = 1.0;

/// An angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(pub f64);

impl Angle {
    pub fn degrees(self) -> f64 {
        self.0
    }
}

/// A length in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(pub f64);

impl Length {
    pub fn millimetres(self) -> f64 {
        self.0
    }
}

/// Raw property values, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UncheckedGimbalConfig {
    pub x: Angle,
    pub y: Angle,
    pub z: Angle,
    pub linked_object: Option<ObjectId>,
    pub size: Length,
    pub thickness: Length,
    pub order: AxisOrder,
}

impl Default for UncheckedGimbalConfig {
    fn default() -> Self {
        Self {
            x: Angle(0.0),
            y: Angle(0.0),
            z: Angle(0.0),
            linked_object: None,
            size: Length(DEFAULT_SIZE),
            thickness: Length(DEFAULT_THICKNESS),
            order: AxisOrder::default(),
        }
    }
}

/// Validated gimbal properties: finite angles, positive finite lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedGimbalConfig", into = "UncheckedGimbalConfig")]
pub struct GimbalConfig {
    angles: EulerAngles,
    linked_object: Option<ObjectId>,
    size: Length,
    thickness: Length,
    order: AxisOrder,
}

fn check_angle(field: &'static str, value: Angle) -> Result<f64> {
    let degrees = value.degrees();
    if degrees.is_finite() {
        Ok(degrees)
    } else {
        Err(GimbalError::InvalidAngle { field, value: degrees })
    }
}

fn check_length(field: &'static str, value: Length) -> Result<Length> {
    if value.0.is_finite() && value.0 > 0.0 {
        Ok(value)
    } else {
        Err(GimbalError::InvalidLength { field, value: value.0 })
    }
}

impl GimbalConfig {
    pub fn new(size: Length, thickness: Length) -> Result<Self> {
        Self::try_from(UncheckedGimbalConfig {
            size,
            thickness,
            ..Default::default()
        })
    }

    pub fn angles(&self) -> EulerAngles {
        self.angles
    }

    pub fn set_angles(&mut self, angles: EulerAngles) -> Result<()> {
        self.angles = EulerAngles::new(
            check_angle("X", Angle(angles.x))?,
            check_angle("Y", Angle(angles.y))?,
            check_angle("Z", Angle(angles.z))?,
        );
        Ok(())
    }

    pub fn linked_object(&self) -> Option<ObjectId> {
        self.linked_object
    }

    pub fn set_linked_object(&mut self, target: Option<ObjectId>) {
        self.linked_object = target;
    }

    pub fn size(&self) -> Length {
        self.size
    }

    pub fn thickness(&self) -> Length {
        self.thickness
    }

    pub fn order(&self) -> AxisOrder {
        self.order
    }

    pub fn with_order(mut self, order: AxisOrder) -> Self {
        self.order = order;
        self
    }

    pub fn ring_specs(&self) -> [RingSpec; 3] {
        RingSpec::all(self.size.0, self.thickness.0)
    }
}

impl Default for GimbalConfig {
    fn default() -> Self {
        Self {
            angles: EulerAngles::ZERO,
            linked_object: None,
            size: Length(DEFAULT_SIZE),
            thickness: Length(DEFAULT_THICKNESS),
            order: AxisOrder::default(),
        }
    }
}

impl TryFrom<UncheckedGimbalConfig> for GimbalConfig {
    type Error = GimbalError;

    fn try_from(raw: UncheckedGimbalConfig) -> Result<Self> {
        Ok(Self {
            angles: EulerAngles::new(
                check_angle("X", raw.x)?,
                check_angle("Y", raw.y)?,
                check_angle("Z", raw.z)?,
            ),
            linked_object: raw.linked_object,
            size: check_length("Size", raw.size)?,
            thickness: check_length("Thickness", raw.thickness)?,
            order: raw.order,
        })
    }
}

impl From<GimbalConfig> for UncheckedGimbalConfig {
    fn from(config: GimbalConfig) -> Self {
        Self {
            x: Angle(config.angles.x),
            y: Angle(config.angles.y),
            z: Angle(config.angles.z),
            linked_object: config.linked_object,
            size: config.size,
            thickness: config.thickness,
            order: config.order,
        }
    }
}
