use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Raw technician-pool availability block reported by the capacity source,
/// one per time block per day. Read-only input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_capacity_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_capacity_hours: Option<f64>,
    #[serde(default)]
    pub candidate_technician_ids: Vec<i64>,
}

/// Fine-grained bookable interval carved out of one capacity window. The
/// parent window travels with the slot because the customer-facing arrival
/// bounds stay the window's, never the narrower booking bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSlot {
    pub window: CapacityWindow,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Customer-facing portion of the day, bucketed from the arrival window start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    pub fn from_start(start: NaiveDateTime) -> Self {
        match start.hour() {
            0..=11 => DayPeriod::Morning,
            12..=16 => DayPeriod::Afternoon,
            _ => DayPeriod::Evening,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
        }
    }
}

/// Externally visible ranked arrival window. The `id` is deterministic so the
/// booking write-side can echo it back when committing a choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredSlot {
    pub id: String,
    pub booking_start: NaiveDateTime,
    pub booking_end: NaiveDateTime,
    pub arrival_window_start: NaiveDateTime,
    pub arrival_window_end: NaiveDateTime,
    pub date: NaiveDate,
    pub display_label: String,
    pub period: DayPeriod,
    pub proximity_score: u8,
    pub nearby_job_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_technician_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_capacity_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_capacity_hours: Option<f64>,
}

/// Same-day appointment read from job history. Scoring input only, never
/// mutated or persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingJob {
    pub appointment_id: i64,
    pub appointment_start: NaiveDateTime,
    pub appointment_end: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<i64>,
}

/// Named geographic partition of the service area. Zones are defined by
/// postal-code membership, city membership, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub zip_codes: BTreeSet<String>,
    pub cities: BTreeSet<String>,
}

/// Logical request accepted by the engine. Required fields stay optional here
/// so the service can reject incomplete requests before any upstream call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSearchRequest {
    pub service_type_id: Option<i64>,
    pub business_unit_id: Option<i64>,
    pub postal_code: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub days_to_load: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSearchResponse {
    pub success: bool,
    pub slots: Vec<ScoredSlot>,
    pub optimization: OptimizationSummary,
}

/// Aggregate metadata reported alongside the ranked slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_zone: Option<String>,
    pub total_slots: u32,
    pub high_score_slots: u32,
}
