//! The host document seam.
//!
//! Gimbal code never reaches for an ambient "active document"; every
//! operation takes a [`Document`] explicitly. [`MemoryDocument`] is the
//! in-process implementation used by the control panel and the tests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GimbalError, Result};
use crate::gimbal::Color;
use crate::placement::{Placement, Vector};

/// Handle to an object in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis-aligned box in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vector,
    pub max: Vector,
}

impl BoundingBox {
    pub fn new(min: Vector, max: Vector) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vector {
        (self.min + self.max) * 0.5
    }

    /// Largest of the maximum coordinates (`max(XMax, YMax, ZMax)`).
    pub fn max_extent(&self) -> f64 {
        self.max.x.max(self.max.y).max(self.max.z)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Torus { radius1: f64, radius2: f64, color: Color },
    Compound { links: Vec<ObjectId> },
    Gimbal,
    /// Any other host shape, known only by its bounding box.
    Solid { bounding_box: BoundingBox },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentObject {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    pub placement: Placement,
}

pub trait Document {
    fn add_object(&mut self, name: &str, kind: ObjectKind) -> ObjectId;

    fn contains(&self, id: ObjectId) -> bool;

    fn remove_object(&mut self, id: ObjectId) -> Result<()>;

    fn placement(&self, id: ObjectId) -> Result<Placement>;

    fn set_placement(&mut self, id: ObjectId, placement: Placement) -> Result<()>;

    /// All objects, in creation order.
    fn objects(&self) -> Vec<ObjectId>;

    /// Currently selected objects, in selection order.
    fn selection(&self) -> Vec<ObjectId>;

    fn bounding_box(&self, id: ObjectId) -> Result<BoundingBox>;
}

#[derive(Debug, Default)]
pub struct MemoryDocument {
    name: String,
    objects: Vec<DocumentObject>,
    selection: Vec<ObjectId>,
    next_id: u64,
    placement_writes: usize,
}

impl MemoryDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, id: ObjectId) -> Option<&DocumentObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    fn get_mut(&mut self, id: ObjectId) -> Result<&mut DocumentObject> {
        self.objects
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(GimbalError::MissingObject(id))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Replace the selection. Ids not in the document are dropped.
    pub fn select(&mut self, ids: &[ObjectId]) {
        self.selection = ids.iter().copied().filter(|id| self.contains(*id)).collect();
    }

    /// Number of `set_placement` calls that reached an object.
    pub fn placement_writes(&self) -> usize {
        self.placement_writes
    }
}

impl Document for MemoryDocument {
    fn add_object(&mut self, name: &str, kind: ObjectKind) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(DocumentObject {
            id,
            name: name.to_string(),
            kind,
            placement: Placement::default(),
        });
        id
    }

    fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    fn remove_object(&mut self, id: ObjectId) -> Result<()> {
        let index = self
            .objects
            .iter()
            .position(|o| o.id == id)
            .ok_or(GimbalError::MissingObject(id))?;
        self.objects.remove(index);
        self.selection.retain(|s| *s != id);
        Ok(())
    }

    fn placement(&self, id: ObjectId) -> Result<Placement> {
        self.get(id)
            .map(|o| o.placement)
            .ok_or(GimbalError::MissingObject(id))
    }

    fn set_placement(&mut self, id: ObjectId, placement: Placement) -> Result<()> {
        self.get_mut(id)?.placement = placement;
        self.placement_writes += 1;
        Ok(())
    }

    fn objects(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id).collect()
    }

    fn selection(&self) -> Vec<ObjectId> {
        self.selection.clone()
    }

    fn bounding_box(&self, id: ObjectId) -> Result<BoundingBox> {
        let object = self.get(id).ok_or(GimbalError::MissingObject(id))?;
        match &object.kind {
            ObjectKind::Solid { bounding_box } => Ok(*bounding_box),
            _ => Err(GimbalError::NoBoundingBox(id)),
        }
    }
}
