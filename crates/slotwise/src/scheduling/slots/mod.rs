//! Slot search pipeline: zone resolution, per-day capacity fan-out, slot
//! generation, proximity scoring, deduplication, ranking, and short-TTL
//! memoization of whole responses.

mod cache;
pub mod config;
pub mod directory;
pub mod domain;
pub mod providers;
mod ranking;
pub mod router;
pub mod scoring;
pub mod service;
pub mod windows;
pub mod zones;

#[cfg(test)]
mod tests;

pub use config::{
    RestrictedWindowsConfig, SchedulingConfig, DEFAULT_CACHE_TTL, DEFAULT_DAYS_TO_LOAD,
};
pub use directory::StaticZoneDirectory;
pub use domain::{
    BookingSlot, CapacityWindow, DayPeriod, ExistingJob, OptimizationSummary, ScoredSlot,
    SlotSearchRequest, SlotSearchResponse, Zone,
};
pub use providers::{
    CapacityError, CapacitySource, JobHistoryError, JobHistoryProvider, ZoneDirectory,
    ZoneDirectoryError,
};
pub use router::slot_router;
pub use scoring::{ProximityScorer, ScoringConfig, SlotScore};
pub use service::{SlotSearchError, SlotSearchService};
pub use windows::ServiceKind;
pub use zones::{ZoneResolver, UNRANKED_ZONE_RANK};
