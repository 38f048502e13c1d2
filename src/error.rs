use crate::document::ObjectId;

/// Error type for gimbal construction and document updates
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GimbalError {
    #[error("Quaternion is zero")]
    ZeroQuaternion,
    #[error("Axis norm cannot be zero unless angle is zero")]
    ZeroAxis,
    #[error("Angle {field} must be finite, got {value}")]
    InvalidAngle { field: &'static str, value: f64 },
    #[error("Length {field} must be positive and finite, got {value}")]
    InvalidLength { field: &'static str, value: f64 },
    #[error("Object {0} is not in the document")]
    MissingObject(ObjectId),
    #[error("Object {0} has no bounding box")]
    NoBoundingBox(ObjectId),
}

pub type Result<T> = std::result::Result<T, GimbalError>;
