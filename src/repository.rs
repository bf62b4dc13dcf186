use crate::generator;
use crate::seed::{normalize_plate, stable_hash};
use crate::types::Snapshot;
use chrono::Utc;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Source of vehicle snapshots. The HTTP handlers only see this trait.
pub trait SnapshotRepository: Send + Sync {
    /// Returns `None` when the plate is unknown.
    fn get_by_plate(&self, plate: &str) -> Option<Snapshot>;
}

/// Repository backed by the synthetic generator.
pub struct MockSnapshotRepository {
    deterministic: bool,
}

impl MockSnapshotRepository {
    /// With `deterministic` set, the random source is seeded from the plate,
    /// so the event count and labor costs repeat as well.
    pub fn new(deterministic: bool) -> Self {
        MockSnapshotRepository { deterministic }
    }

    fn rng_for(&self, plate: &str) -> StdRng {
        if self.deterministic {
            StdRng::seed_from_u64(stable_hash(&normalize_plate(plate)))
        } else {
            StdRng::from_entropy()
        }
    }
}

impl SnapshotRepository for MockSnapshotRepository {
    fn get_by_plate(&self, plate: &str) -> Option<Snapshot> {
        let mut rng = self.rng_for(plate);
        let snapshot = generator::generate(plate, Utc::now(), &mut rng);
        debug!(
            "Generated snapshot for {}: {}",
            plate,
            if snapshot.is_some() { "found" } else { "not found" }
        );
        snapshot
    }
}
