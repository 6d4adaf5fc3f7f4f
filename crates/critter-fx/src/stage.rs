//! Renderer seam.
//!
//! The effects engine never draws anything itself. A [`Stage`] turns shape
//! geometry into renderer primitives, parents them under the scene
//! container, and removes them again.

use std::collections::HashMap;

use tracing::warn;

use crate::particle::Pose;
use crate::shape::ShapeGeometry;

/// A renderer container that particle shapes are attached to.
pub trait Stage {
    /// Renderer-side handle for one attached shape.
    type Handle;

    /// Builds the primitive for `geometry` and adds it as a child.
    fn attach(&mut self, geometry: &ShapeGeometry) -> Self::Handle;

    /// Moves, rotates, scales and fades an attached shape.
    fn present(&mut self, handle: &Self::Handle, pose: &Pose);

    /// Removes the shape from the container and frees it.
    fn detach(&mut self, handle: Self::Handle);
}

/// Id of a shape attached to a [`HeadlessStage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

/// In-memory stage for headless runs and tests.
///
/// Keeps the latest pose of every attached shape and counts attach/detach
/// calls so leaks and double frees are visible.
#[derive(Debug, Default)]
pub struct HeadlessStage {
    next_id: u64,
    live: HashMap<ShapeId, (ShapeGeometry, Option<Pose>)>,
    pub attached: u64,
    pub detached: u64,
}

impl HeadlessStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes currently in the container.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn geometry(&self, id: ShapeId) -> Option<&ShapeGeometry> {
        self.live.get(&id).map(|(geometry, _)| geometry)
    }

    /// Last pose presented for a shape.
    pub fn pose(&self, id: ShapeId) -> Option<Pose> {
        self.live.get(&id).and_then(|(_, pose)| *pose)
    }
}

impl Stage for HeadlessStage {
    type Handle = ShapeId;

    fn attach(&mut self, geometry: &ShapeGeometry) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.attached += 1;
        self.live.insert(id, (geometry.clone(), None));
        id
    }

    fn present(&mut self, handle: &ShapeId, pose: &Pose) {
        if let Some((_, slot)) = self.live.get_mut(handle) {
            *slot = Some(*pose);
        }
    }

    fn detach(&mut self, handle: ShapeId) {
        if self.live.remove(&handle).is_none() {
            warn!("Detaching unknown shape {:?}", handle);
            return;
        }
        self.detached += 1;
    }
}
