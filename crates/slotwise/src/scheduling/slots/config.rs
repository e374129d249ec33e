use std::collections::BTreeSet;
use std::time::Duration;

use super::scoring::ScoringConfig;
use super::windows::ServiceKind;

/// Days of availability loaded when the request does not say.
pub const DEFAULT_DAYS_TO_LOAD: u32 = 7;
/// How long a computed response stays servable from the in-process cache.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Engine policy assembled by the host application: which service types are
/// full-day, which business units host them, and the tunable scoring and
/// restriction rules.
#[derive(Debug, Clone)]
pub struct SchedulingConfig {
    pub standard_business_unit_id: i64,
    pub full_day_business_unit_id: i64,
    pub full_day_service_types: BTreeSet<i64>,
    pub days_to_load_default: u32,
    pub cache_ttl: Duration,
    pub scoring: ScoringConfig,
    pub restricted: RestrictedWindowsConfig,
}

impl SchedulingConfig {
    pub fn service_kind(&self, service_type_id: i64) -> ServiceKind {
        if self.full_day_service_types.contains(&service_type_id) {
            ServiceKind::FullDay
        } else {
            ServiceKind::Standard
        }
    }

    pub fn business_unit_for(&self, kind: ServiceKind) -> i64 {
        match kind {
            ServiceKind::Standard => self.standard_business_unit_id,
            ServiceKind::FullDay => self.full_day_business_unit_id,
        }
    }
}

/// Hand-picked mid-day arrival windows suppressed for the named rural zone
/// until that day already has a job there. Kept as data so dispatch can tune
/// the list without a code change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictedWindowsConfig {
    pub zone_name: String,
    /// (start hour, end hour) pairs of the suppressed windows.
    pub window_hours: Vec<(u32, u32)>,
}

impl Default for RestrictedWindowsConfig {
    fn default() -> Self {
        Self {
            zone_name: "Hill Country".to_string(),
            window_hours: vec![(10, 14), (12, 16)],
        }
    }
}
