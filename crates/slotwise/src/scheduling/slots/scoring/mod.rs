mod config;
mod rules;

pub use config::{
    ScoringConfig, ADJACENT_ZONE_SCORE, CLUSTER_BONUS_MAJOR, CLUSTER_BONUS_MINOR,
    CLUSTER_MAJOR_THRESHOLD, CONTIGUITY_HOURS, DISTANT_ZONE_SCORE, MAX_SCORE, NEUTRAL_SCORE,
    SAME_ZONE_SCORE, SECOND_RING_ZONE_SCORE,
};

use super::domain::{BookingSlot, ExistingJob};
use super::zones::ZoneResolver;

/// Stateless scorer applying the route-contiguity and zone-adjacency policy
/// to one candidate slot at a time.
pub struct ProximityScorer {
    config: ScoringConfig,
}

impl ProximityScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a candidate slot against the same-day jobs already on the books.
    /// The returned score always lands in `[0, 100]`; the technician is the
    /// one anchoring the best contiguous match, or the first candidate the
    /// capacity source reported when no match exists.
    pub fn score(
        &self,
        slot: &BookingSlot,
        caller_zone: Option<&str>,
        resolver: &ZoneResolver,
        same_day_jobs: &[ExistingJob],
    ) -> SlotScore {
        rules::score_slot(slot, caller_zone, resolver, same_day_jobs, &self.config)
    }
}

/// Outcome of scoring one candidate slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotScore {
    pub score: u8,
    pub technician_id: Option<i64>,
    pub nearby_job_count: u32,
}
