use log::{debug, info};

use crate::engine::geodesy;
use crate::engine::models::{Checkpoint, Pose};

/// The checkpoint the vessel is currently sailing for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveCheckpoint {
    pub index: usize,
    pub checkpoint: Checkpoint,
    /// Great-circle distance from the vessel, km
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteStatus {
    Active(ActiveCheckpoint),
    /// Every checkpoint has been reached
    Complete,
}

/// Ordered course with per-checkpoint reached flags.
///
/// The sequence is fixed at construction; only the flags change, and only
/// from false to true.
#[derive(Debug, Clone)]
pub struct RouteTracker {
    checkpoints: Vec<Checkpoint>,
}

impl RouteTracker {
    pub fn new(checkpoints: Vec<Checkpoint>) -> Self {
        Self { checkpoints }
    }

    /// Scans the course from the start, flags every checkpoint the vessel is
    /// inside of, and returns the first one still unreached.
    pub fn advance(&mut self, pose: &Pose) -> RouteStatus {
        let position = pose.position();
        let total = self.checkpoints.len();

        for (index, checkpoint) in self.checkpoints.iter_mut().enumerate() {
            let distance = geodesy::distance_on_surface(&position, &checkpoint.location());

            if distance < checkpoint.radius() && !checkpoint.reached() {
                checkpoint.mark_reached();
                info!(
                    "Checkpoint {}/{} reached at ({:.4}, {:.4})",
                    index + 1,
                    total,
                    position.lat,
                    position.lon
                );
                if index + 1 == total {
                    info!("Course complete");
                }
            }

            if !checkpoint.reached() {
                debug!("Active checkpoint {} is {:.1} km away", index + 1, distance);
                return RouteStatus::Active(ActiveCheckpoint {
                    index,
                    checkpoint: *checkpoint,
                    distance,
                });
            }
        }

        RouteStatus::Complete
    }

    /// Index of the first unreached checkpoint.
    pub fn active_index(&self) -> Option<usize> {
        self.checkpoints.iter().position(|c| !c.reached())
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn reached_count(&self) -> usize {
        self.checkpoints.iter().filter(|c| c.reached()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.active_index().is_none()
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}
