use serde::{Deserialize, Serialize};

// Heuristic thresholds below are business policy, not derived constants, and
// dispatch tunes them without touching the algorithm.

/// Contiguous job in the identical zone.
pub const SAME_ZONE_SCORE: u8 = 95;
/// Contiguous job one rank away (or the special-cased named pair).
pub const ADJACENT_ZONE_SCORE: u8 = 80;
/// Contiguous job two ranks away.
pub const SECOND_RING_ZONE_SCORE: u8 = 65;
/// Contiguous job anywhere farther, or in an unresolvable zone.
pub const DISTANT_ZONE_SCORE: u8 = 45;
/// Score when nothing is known about the caller's zone or no route synergy
/// exists.
pub const NEUTRAL_SCORE: u8 = 50;
/// Upper clamp for every returned score.
pub const MAX_SCORE: u8 = 100;
/// Margin before/after a slot within which an existing job counts as
/// contiguous.
pub const CONTIGUITY_HOURS: i64 = 3;
/// Bonus when the day already clusters three or more nearby jobs.
pub const CLUSTER_BONUS_MAJOR: u8 = 10;
/// Bonus when exactly two nearby jobs exist.
pub const CLUSTER_BONUS_MINOR: u8 = 5;
pub const CLUSTER_MAJOR_THRESHOLD: usize = 3;

/// Tunable proximity-scoring policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub same_zone_score: u8,
    pub adjacent_zone_score: u8,
    pub second_ring_zone_score: u8,
    pub distant_zone_score: u8,
    pub neutral_score: u8,
    pub contiguity_hours: i64,
    pub cluster_bonus_major: u8,
    pub cluster_bonus_minor: u8,
    pub cluster_major_threshold: usize,
    /// Zone-name pairs treated as adjacent even though neither name carries a
    /// numeric rank, for named zones known to border each other.
    pub named_adjacent_pairs: Vec<(String, String)>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            same_zone_score: SAME_ZONE_SCORE,
            adjacent_zone_score: ADJACENT_ZONE_SCORE,
            second_ring_zone_score: SECOND_RING_ZONE_SCORE,
            distant_zone_score: DISTANT_ZONE_SCORE,
            neutral_score: NEUTRAL_SCORE,
            contiguity_hours: CONTIGUITY_HOURS,
            cluster_bonus_major: CLUSTER_BONUS_MAJOR,
            cluster_bonus_minor: CLUSTER_BONUS_MINOR,
            cluster_major_threshold: CLUSTER_MAJOR_THRESHOLD,
            named_adjacent_pairs: vec![("Hill Country".to_string(), "4 - Westlake".to_string())],
        }
    }
}

impl ScoringConfig {
    pub fn named_adjacent(&self, left: &str, right: &str) -> bool {
        self.named_adjacent_pairs.iter().any(|(a, b)| {
            (a.eq_ignore_ascii_case(left) && b.eq_ignore_ascii_case(right))
                || (a.eq_ignore_ascii_case(right) && b.eq_ignore_ascii_case(left))
        })
    }
}
