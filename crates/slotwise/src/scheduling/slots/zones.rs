use std::collections::HashMap;

use super::domain::{ExistingJob, Zone};

/// Rank assigned to zones whose names carry no numeric prefix (e.g. the hill
/// country zone), distinct from every real numeric rank.
pub const UNRANKED_ZONE_RANK: i64 = 99;

/// In-memory lookup over the zone directory, rebuilt per request from the
/// slowly-changing directory data.
#[derive(Debug, Default)]
pub struct ZoneResolver {
    zone_by_zip: HashMap<String, String>,
    zone_by_city: HashMap<String, String>,
}

impl ZoneResolver {
    pub fn from_zones(zones: &[Zone]) -> Self {
        let mut zone_by_zip = HashMap::new();
        let mut zone_by_city = HashMap::new();

        for zone in zones {
            for zip in &zone.zip_codes {
                if let Some(normalized) = normalize_postal_code(zip) {
                    zone_by_zip.insert(normalized, zone.name.clone());
                }
            }
            for city in &zone.cities {
                zone_by_city.insert(city.trim().to_ascii_lowercase(), zone.name.clone());
            }
        }

        Self {
            zone_by_zip,
            zone_by_city,
        }
    }

    /// Zone containing a raw postal code, matched on its leading five digits.
    pub fn zone_for_postal_code(&self, raw: &str) -> Option<&str> {
        let normalized = normalize_postal_code(raw)?;
        self.zone_by_zip.get(&normalized).map(String::as_str)
    }

    pub fn zone_for_city(&self, raw: &str) -> Option<&str> {
        let normalized = raw.trim().to_ascii_lowercase();
        self.zone_by_city.get(&normalized).map(String::as_str)
    }

    /// Postal code wins; the city fallback covers zones defined by city
    /// membership rather than postal codes.
    pub fn zone_for_job(&self, job: &ExistingJob) -> Option<&str> {
        if let Some(zone) = job
            .location_zip
            .as_deref()
            .and_then(|zip| self.zone_for_postal_code(zip))
        {
            return Some(zone);
        }

        job.location_city
            .as_deref()
            .and_then(|city| self.zone_for_city(city))
    }

    /// Rank used for adjacency math. `None` means "no information" and must
    /// never be treated as rank zero by callers.
    pub fn rank_of(zone_name: Option<&str>) -> Option<i64> {
        zone_name.map(Self::rank_of_name)
    }

    /// Total version of [`Self::rank_of`] for a known zone name.
    pub fn rank_of_name(zone_name: &str) -> i64 {
        Self::numeric_rank(zone_name).unwrap_or(UNRANKED_ZONE_RANK)
    }

    /// Leading run of digits in the zone name, if any ("3 - Central" -> 3).
    pub fn numeric_rank(zone_name: &str) -> Option<i64> {
        let digits: String = zone_name
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            None
        } else {
            digits.parse().ok()
        }
    }
}

fn normalize_postal_code(raw: &str) -> Option<String> {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(5)
        .collect();
    if digits.len() == 5 {
        Some(digits)
    } else {
        None
    }
}
