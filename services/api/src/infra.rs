use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Duration as ChronoDuration, NaiveDate, NaiveDateTime, Weekday};
use metrics_exporter_prometheus::PrometheusHandle;
use slotwise::error::AppError;
use slotwise::scheduling::slots::{
    CapacityError, CapacitySource, CapacityWindow, ExistingJob, JobHistoryError,
    JobHistoryProvider, RestrictedWindowsConfig, SchedulingConfig, ScoringConfig,
    SlotSearchService, StaticZoneDirectory, Zone, DEFAULT_DAYS_TO_LOAD,
};

pub(crate) const DEMO_STANDARD_SERVICE: i64 = 1001;
pub(crate) const DEMO_FULL_DAY_SERVICE: i64 = 2001;
pub(crate) const DEMO_STANDARD_UNIT: i64 = 110;
pub(crate) const DEMO_FULL_DAY_UNIT: i64 = 220;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn default_scheduling_config(cache_ttl: Duration) -> SchedulingConfig {
    SchedulingConfig {
        standard_business_unit_id: DEMO_STANDARD_UNIT,
        full_day_business_unit_id: DEMO_FULL_DAY_UNIT,
        full_day_service_types: BTreeSet::from([DEMO_FULL_DAY_SERVICE]),
        days_to_load_default: DEFAULT_DAYS_TO_LOAD,
        cache_ttl,
        scoring: ScoringConfig::default(),
        restricted: RestrictedWindowsConfig::default(),
    }
}

/// Built-in zone directory used when no CSV export is supplied.
pub(crate) fn demo_zones() -> Vec<Zone> {
    let zone = |name: &str, zips: &[&str], cities: &[&str]| Zone {
        name: name.to_string(),
        zip_codes: zips.iter().map(|zip| zip.to_string()).collect(),
        cities: cities.iter().map(|city| city.to_string()).collect(),
    };
    vec![
        zone("1 - Downtown", &["78701", "78702"], &[]),
        zone("2 - North Loop", &["78751", "78758"], &[]),
        zone("3 - Central", &["78704", "78745"], &[]),
        zone("4 - Westlake", &["78746"], &["Westlake Hills"]),
        zone(
            "Hill Country",
            &["78620", "78676"],
            &["Dripping Springs", "Wimberley"],
        ),
    ]
}

pub(crate) fn zone_directory_from(
    zones_csv: Option<PathBuf>,
) -> Result<StaticZoneDirectory, AppError> {
    match zones_csv {
        Some(path) => StaticZoneDirectory::from_csv_path(path).map_err(AppError::from),
        None => Ok(StaticZoneDirectory::from_zones(demo_zones())),
    }
}

/// Deterministic stand-in for the upstream capacity provider so the service
/// and CLI run with zero external dependencies.
pub(crate) struct DemoCapacitySource;

#[async_trait]
impl CapacitySource for DemoCapacitySource {
    async fn availability(
        &self,
        _business_unit_id: i64,
        service_type_id: i64,
        day_start: NaiveDateTime,
        _day_end: NaiveDateTime,
    ) -> Result<Vec<CapacityWindow>, CapacityError> {
        let day = day_start.date();
        if day.weekday() == Weekday::Sun {
            return Ok(Vec::new());
        }

        if service_type_id == DEMO_FULL_DAY_SERVICE {
            return Ok(vec![demo_window(day, 7, 19, &[104, 105])]);
        }

        Ok(vec![
            demo_window(day, 8, 12, &[101, 102]),
            demo_window(day, 10, 14, &[102, 103]),
            demo_window(day, 12, 16, &[103, 104]),
            demo_window(day, 14, 18, &[104]),
        ])
    }
}

fn demo_window(day: NaiveDate, start_hour: u32, end_hour: u32, technicians: &[i64]) -> CapacityWindow {
    CapacityWindow {
        start: day.and_hms_opt(start_hour, 0, 0).expect("whole hour"),
        end: day.and_hms_opt(end_hour, 0, 0).expect("whole hour"),
        is_available: true,
        available_capacity_hours: Some(6.0),
        total_capacity_hours: Some(8.0),
        candidate_technician_ids: technicians.to_vec(),
    }
}

/// Canned job history: a light recurring route so proximity scoring has
/// something to chew on. Tuesday/Thursday carry one unassigned appointment to
/// exercise the secondary technician lookup.
pub(crate) struct DemoJobHistory;

#[async_trait]
impl JobHistoryProvider for DemoJobHistory {
    async fn jobs_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ExistingJob>, JobHistoryError> {
        let mut jobs = Vec::new();
        let mut day = start.date();
        while day < end.date() {
            match day.weekday() {
                Weekday::Mon | Weekday::Wed | Weekday::Fri => {
                    jobs.push(demo_job(seed(day, 1), day, 7, 9, Some("78704"), None, Some(101)));
                    jobs.push(demo_job(seed(day, 2), day, 13, 15, Some("78746"), None, Some(103)));
                }
                Weekday::Tue | Weekday::Thu => {
                    jobs.push(demo_job(seed(day, 1), day, 8, 10, Some("78701"), None, Some(102)));
                    jobs.push(demo_job(seed(day, 3), day, 9, 11, None, Some("Wimberley"), None));
                }
                _ => {}
            }
            day += ChronoDuration::days(1);
        }
        Ok(jobs)
    }

    async fn technician_for_appointment(
        &self,
        appointment_id: i64,
    ) -> Result<Option<i64>, JobHistoryError> {
        // The unassigned demo appointments are seeded with a trailing 3.
        if appointment_id % 10 == 3 {
            Ok(Some(105))
        } else {
            Ok(None)
        }
    }
}

fn seed(day: NaiveDate, index: i64) -> i64 {
    i64::from(day.num_days_from_ce()) * 10 + index
}

fn demo_job(
    appointment_id: i64,
    day: NaiveDate,
    start_hour: u32,
    end_hour: u32,
    zip: Option<&str>,
    city: Option<&str>,
    technician_id: Option<i64>,
) -> ExistingJob {
    ExistingJob {
        appointment_id,
        appointment_start: day.and_hms_opt(start_hour, 0, 0).expect("whole hour"),
        appointment_end: day.and_hms_opt(end_hour, 0, 0).expect("whole hour"),
        location_zip: zip.map(str::to_string),
        location_city: city.map(str::to_string),
        technician_id,
    }
}

pub(crate) type DemoSlotService =
    SlotSearchService<DemoCapacitySource, DemoJobHistory, StaticZoneDirectory>;

pub(crate) fn build_demo_service(
    zones_csv: Option<PathBuf>,
    cache_ttl: Duration,
) -> Result<Arc<DemoSlotService>, AppError> {
    let zone_directory = Arc::new(zone_directory_from(zones_csv)?);
    Ok(Arc::new(SlotSearchService::new(
        Arc::new(DemoCapacitySource),
        Arc::new(DemoJobHistory),
        zone_directory,
        default_scheduling_config(cache_ttl),
    )))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn demo_config_classifies_the_inspection_service_as_full_day() {
        let config = default_scheduling_config(Duration::from_secs(300));
        assert!(config
            .full_day_service_types
            .contains(&DEMO_FULL_DAY_SERVICE));
        assert!(!config
            .full_day_service_types
            .contains(&DEMO_STANDARD_SERVICE));
    }

    #[tokio::test]
    async fn demo_capacity_reports_no_sunday_windows() {
        let sunday = NaiveDate::from_ymd_opt(2026, 8, 9).expect("valid date");
        let monday = NaiveDate::from_ymd_opt(2026, 8, 10).expect("valid date");

        let source = DemoCapacitySource;
        let empty = source
            .availability(
                DEMO_STANDARD_UNIT,
                DEMO_STANDARD_SERVICE,
                sunday.and_hms_opt(0, 0, 0).expect("midnight"),
                monday.and_hms_opt(0, 0, 0).expect("midnight"),
            )
            .await
            .expect("availability");
        assert!(empty.is_empty());

        let open = source
            .availability(
                DEMO_STANDARD_UNIT,
                DEMO_STANDARD_SERVICE,
                monday.and_hms_opt(0, 0, 0).expect("midnight"),
                monday
                    .succ_opt()
                    .expect("next day")
                    .and_hms_opt(0, 0, 0)
                    .expect("midnight"),
            )
            .await
            .expect("availability");
        assert_eq!(open.len(), 4);
    }
}
