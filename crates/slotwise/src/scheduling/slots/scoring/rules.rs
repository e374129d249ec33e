use std::collections::BTreeMap;

use chrono::Duration;
use tracing::debug;

use super::super::domain::{BookingSlot, ExistingJob};
use super::super::zones::ZoneResolver;
use super::config::{ScoringConfig, MAX_SCORE};
use super::SlotScore;

pub(crate) fn score_slot(
    slot: &BookingSlot,
    caller_zone: Option<&str>,
    resolver: &ZoneResolver,
    same_day_jobs: &[ExistingJob],
    config: &ScoringConfig,
) -> SlotScore {
    let fallback_technician = slot.window.candidate_technician_ids.first().copied();

    // An unresolved caller zone means no rank information at all, so every
    // slot scores neutrally rather than erroring.
    let caller = match caller_zone {
        Some(zone) => zone,
        None => {
            return SlotScore {
                score: config.neutral_score,
                technician_id: fallback_technician,
                nearby_job_count: 0,
            }
        }
    };
    let caller_rank = ZoneResolver::rank_of_name(caller);

    let mut by_technician: BTreeMap<i64, Vec<&ExistingJob>> = BTreeMap::new();
    for job in same_day_jobs {
        match job.technician_id {
            Some(technician_id) => by_technician.entry(technician_id).or_default().push(job),
            None => debug!(
                appointment_id = job.appointment_id,
                "job carries no technician assignment, excluded from contiguity checks"
            ),
        }
    }

    let mut best: Option<(u8, i64)> = None;
    for (technician_id, jobs) in &by_technician {
        for job in jobs {
            if !contiguous(slot, job, config.contiguity_hours) {
                continue;
            }
            let adjacency = zone_adjacency_score(caller, resolver.zone_for_job(job), config);
            if best.map_or(true, |(score, _)| adjacency > score) {
                best = Some((adjacency, *technician_id));
            }
        }
    }

    // Unassigned jobs still count here even though they cannot anchor a
    // contiguous match.
    let nearby_job_count = same_day_jobs
        .iter()
        .filter(|job| clustered(caller_rank, resolver.zone_for_job(job)))
        .count();

    match best {
        Some((score, technician_id)) => {
            let mut score = score;
            if nearby_job_count >= config.cluster_major_threshold {
                score = score.saturating_add(config.cluster_bonus_major);
            } else if nearby_job_count == 2 {
                score = score.saturating_add(config.cluster_bonus_minor);
            }
            SlotScore {
                score: score.min(MAX_SCORE),
                technician_id: Some(technician_id),
                nearby_job_count: nearby_job_count as u32,
            }
        }
        // A slot with zero route synergy never gets the clustering bonus; it
        // falls back to the first technician the capacity source reported
        // available so the slot stays dispatchable.
        None => SlotScore {
            score: config.neutral_score,
            technician_id: fallback_technician,
            nearby_job_count: nearby_job_count as u32,
        },
    }
}

/// A job is contiguous when it ends inside the margin before the slot starts
/// or starts inside the margin after the slot ends.
fn contiguous(slot: &BookingSlot, job: &ExistingJob, margin_hours: i64) -> bool {
    let margin = Duration::hours(margin_hours);
    let ends_just_before =
        job.appointment_end <= slot.start && slot.start - job.appointment_end <= margin;
    let starts_just_after =
        job.appointment_start >= slot.end && job.appointment_start - slot.end <= margin;
    ends_just_before || starts_just_after
}

fn zone_adjacency_score(caller_zone: &str, job_zone: Option<&str>, config: &ScoringConfig) -> u8 {
    let job_zone = match job_zone {
        Some(zone) => zone,
        None => return config.distant_zone_score,
    };

    match (
        ZoneResolver::numeric_rank(caller_zone),
        ZoneResolver::numeric_rank(job_zone),
    ) {
        (Some(caller_rank), Some(job_rank)) => match (caller_rank - job_rank).abs() {
            0 => config.same_zone_score,
            1 => config.adjacent_zone_score,
            2 => config.second_ring_zone_score,
            _ => config.distant_zone_score,
        },
        // Either side lacks a numeric rank: fall back to name matching.
        _ => {
            if caller_zone.eq_ignore_ascii_case(job_zone) {
                config.same_zone_score
            } else if config.named_adjacent(caller_zone, job_zone) {
                config.adjacent_zone_score
            } else {
                config.distant_zone_score
            }
        }
    }
}

fn clustered(caller_rank: i64, job_zone: Option<&str>) -> bool {
    match ZoneResolver::rank_of(job_zone) {
        Some(job_rank) => (caller_rank - job_rank).abs() <= 1,
        None => false,
    }
}
