use crate::document::{Document, ObjectId, ObjectKind};
use crate::error::{GimbalError, Result};
use crate::gimbal::config::{GimbalConfig, Length, DEFAULT_THICKNESS};
use crate::gimbal::{compute_placements, AxisOrder, EulerAngles};
use crate::placement::{Placement, Vector};
use crate::rotation::Axis;

/// Objects whose placement changed during a recompute, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecomputeReport {
    pub written: Vec<ObjectId>,
}

impl RecomputeReport {
    pub fn writes(&self) -> usize {
        self.written.len()
    }

    pub fn is_noop(&self) -> bool {
        self.written.is_empty()
    }
}

/// Write `next` unless the object already sits there.
///
/// Every write makes the host recompute dependents, so equal placements
/// (see [`Placement::approx_eq`]) are skipped. Returns whether a write happened.
pub fn set_placement_if_different<D: Document + ?Sized>(
    doc: &mut D,
    id: ObjectId,
    next: Placement,
) -> Result<bool> {
    let current = doc.placement(id)?;
    if current.approx_eq(&next) {
        return Ok(false);
    }
    doc.set_placement(id, next)?;
    log::debug!("placement of {} set to {:?}", id, next);
    Ok(true)
}

/// A gimbal in a document.
///
/// The gimbal owns its three rings, the compound grouping them, and its own
/// parent object. [`Gimbal::remove`] deletes all of them together.
#[derive(Debug, Clone, PartialEq)]
pub struct Gimbal {
    object: ObjectId,
    compound: ObjectId,
    rings: [ObjectId; 3],
    config: GimbalConfig,
}

impl Gimbal {
    /// Add the X, Y and Z rings (in that order), their compound and the
    /// parent object. Rings start at `center` in their rest poses.
    pub fn create<D: Document + ?Sized>(
        doc: &mut D,
        name: &str,
        config: GimbalConfig,
        center: Vector,
    ) -> Result<Self> {
        let mut rings = [ObjectId(0); 3];
        for (i, spec) in config.ring_specs().into_iter().enumerate() {
            let ring_name = format!("{:?}", spec.axis);
            rings[i] = doc.add_object(
                &ring_name,
                ObjectKind::Torus {
                    radius1: spec.radius1,
                    radius2: spec.radius2,
                    color: spec.color,
                },
            );
            if let Err(e) = doc.set_placement(rings[i], Placement::new(center, spec.initial_rotation)) {
                // No gimbal owns the rings added so far.
                discard(doc, &rings[..=i]);
                return Err(e);
            }
        }

        let compound = doc.add_object("Compound", ObjectKind::Compound { links: rings.to_vec() });
        let object = doc.add_object(name, ObjectKind::Gimbal);

        log::info!(
            "created gimbal {} ({}) size {} thickness {}",
            name,
            object,
            config.size().millimetres(),
            config.thickness().millimetres()
        );

        Ok(Self { object, compound, rings, config })
    }

    /// Create a gimbal around the first selected object, or the first
    /// object in the document when nothing is selected, and link it.
    /// An empty document gets a default gimbal at the origin.
    pub fn create_for_selection<D: Document + ?Sized>(
        doc: &mut D,
        name: &str,
        order: AxisOrder,
    ) -> Result<Self> {
        let Some(target) = select_object(&*doc) else {
            return Self::create(doc, name, GimbalConfig::default().with_order(order), Vector::ZERO);
        };
        let bounding_box = doc.bounding_box(target)?;
        let mut config =
            GimbalConfig::new(Length(bounding_box.max_extent()), Length(DEFAULT_THICKNESS))?
                .with_order(order);
        config.set_linked_object(Some(target));
        Self::create(doc, name, config, bounding_box.center())
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn compound(&self) -> ObjectId {
        self.compound
    }

    /// Ring ids in X, Y, Z order.
    pub fn rings(&self) -> [ObjectId; 3] {
        self.rings
    }

    pub fn ring(&self, axis: Axis) -> ObjectId {
        self.rings[axis.index()]
    }

    pub fn config(&self) -> &GimbalConfig {
        &self.config
    }

    pub fn set_angles(&mut self, angles: EulerAngles) -> Result<()> {
        self.config.set_angles(angles)
    }

    pub fn set_order(&mut self, order: AxisOrder) {
        self.config = self.config.clone().with_order(order);
    }

    /// Drive `target` with the composed rotation on the next recompute.
    pub fn link<D: Document + ?Sized>(&mut self, doc: &D, target: ObjectId) -> Result<()> {
        if !doc.contains(target) {
            return Err(GimbalError::MissingObject(target));
        }
        self.config.set_linked_object(Some(target));
        Ok(())
    }

    pub fn unlink(&mut self) {
        self.config.set_linked_object(None);
    }

    /// Recompute all placements from the current angles and write the ones
    /// that changed. The linked object's translation becomes the rings' base.
    ///
    /// Nothing is written if a ring or the linked object is gone.
    pub fn recompute<D: Document + ?Sized>(&self, doc: &mut D) -> Result<RecomputeReport> {
        if let Some(missing) = self.rings.iter().find(|id| !doc.contains(**id)) {
            return Err(GimbalError::MissingObject(*missing));
        }

        let target = self.config.linked_object();
        let base = match target {
            Some(id) => doc.placement(id)?.base,
            None => Vector::ZERO,
        };

        let placements = compute_placements(self.config.angles(), base, target.is_some(), self.config.order());

        let mut report = RecomputeReport::default();
        if let (Some(id), Some(next)) = (target, placements.target) {
            if set_placement_if_different(doc, id, next)? {
                report.written.push(id);
            }
        }
        for (axis, id) in Axis::ALL.iter().zip(self.rings) {
            if set_placement_if_different(doc, id, placements.ring(*axis))? {
                report.written.push(id);
            }
        }
        Ok(report)
    }

    /// Remove the rings, the compound and the parent object. Objects that are
    /// already gone are skipped. Returns how many objects were removed.
    ///
    /// A failed removal does not stop the others; the first failure is
    /// returned once every object has been tried.
    pub fn remove<D: Document + ?Sized>(self, doc: &mut D) -> Result<usize> {
        let mut removed = 0;
        let mut failure = None;
        for id in self.rings.into_iter().chain([self.compound, self.object]) {
            if !doc.contains(id) {
                log::debug!("{} already removed", id);
                continue;
            }
            match doc.remove_object(id) {
                Ok(()) => removed += 1,
                Err(e) => {
                    log::warn!("failed to remove {} of gimbal {}: {}", id, self.object, e);
                    failure = failure.or(Some(e));
                }
            }
        }
        log::info!("removed gimbal {} ({} objects)", self.object, removed);
        match failure {
            Some(e) => Err(e),
            None => Ok(removed),
        }
    }
}

/// Best-effort removal of objects left behind by a failed create.
fn discard<D: Document + ?Sized>(doc: &mut D, ids: &[ObjectId]) {
    for id in ids.iter().copied() {
        if !doc.contains(id) {
            continue;
        }
        if let Err(e) = doc.remove_object(id) {
            log::warn!("failed to discard {}: {}", id, e);
        }
    }
}

/// First selected object, else the first object in the document.
pub fn select_object<D: Document + ?Sized>(doc: &D) -> Option<ObjectId> {
    doc.selection()
        .first()
        .copied()
        .or_else(|| doc.objects().first().copied())
}
