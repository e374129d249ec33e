use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::scheduling::slots::config::{
    RestrictedWindowsConfig, SchedulingConfig, DEFAULT_CACHE_TTL, DEFAULT_DAYS_TO_LOAD,
};
use crate::scheduling::slots::domain::{CapacityWindow, ExistingJob, Zone};
use crate::scheduling::slots::providers::{
    CapacityError, CapacitySource, JobHistoryError, JobHistoryProvider, ZoneDirectory,
    ZoneDirectoryError,
};
use crate::scheduling::slots::scoring::ScoringConfig;
use crate::scheduling::slots::service::SlotSearchService;
use crate::scheduling::slots::zones::ZoneResolver;

pub(super) const STANDARD_SERVICE: i64 = 1001;
pub(super) const FULL_DAY_SERVICE: i64 = 2001;
pub(super) const STANDARD_UNIT: i64 = 110;
pub(super) const FULL_DAY_UNIT: i64 = 220;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn at(day: NaiveDate, hour: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, 0, 0).expect("valid time")
}

pub(super) fn zone(name: &str, zips: &[&str], cities: &[&str]) -> Zone {
    Zone {
        name: name.to_string(),
        zip_codes: zips.iter().map(|zip| zip.to_string()).collect(),
        cities: cities.iter().map(|city| city.to_string()).collect(),
    }
}

pub(super) fn zones() -> Vec<Zone> {
    vec![
        zone("1 - Downtown", &["78701"], &[]),
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

pub(super) fn resolver() -> ZoneResolver {
    ZoneResolver::from_zones(&zones())
}

pub(super) fn window(
    day: NaiveDate,
    start_hour: u32,
    end_hour: u32,
    technicians: &[i64],
) -> CapacityWindow {
    CapacityWindow {
        start: at(day, start_hour),
        end: at(day, end_hour),
        is_available: true,
        available_capacity_hours: Some(4.0),
        total_capacity_hours: Some(8.0),
        candidate_technician_ids: technicians.to_vec(),
    }
}

pub(super) fn job(
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
        appointment_start: at(day, start_hour),
        appointment_end: at(day, end_hour),
        location_zip: zip.map(str::to_string),
        location_city: city.map(str::to_string),
        technician_id,
    }
}

pub(super) fn scheduling_config() -> SchedulingConfig {
    SchedulingConfig {
        standard_business_unit_id: STANDARD_UNIT,
        full_day_business_unit_id: FULL_DAY_UNIT,
        full_day_service_types: [FULL_DAY_SERVICE].into_iter().collect(),
        days_to_load_default: DEFAULT_DAYS_TO_LOAD,
        cache_ttl: DEFAULT_CACHE_TTL,
        scoring: ScoringConfig::default(),
        restricted: RestrictedWindowsConfig::default(),
    }
}

#[derive(Default)]
pub(super) struct ScriptedCapacitySource {
    pub(super) windows: HashMap<NaiveDate, Vec<CapacityWindow>>,
    pub(super) failing_days: HashSet<NaiveDate>,
    pub(super) calls: AtomicU32,
    pub(super) last_business_unit: AtomicI64,
}

impl ScriptedCapacitySource {
    pub(super) fn with_windows(windows: HashMap<NaiveDate, Vec<CapacityWindow>>) -> Self {
        Self {
            windows,
            ..Self::default()
        }
    }

    pub(super) fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CapacitySource for ScriptedCapacitySource {
    async fn availability(
        &self,
        business_unit_id: i64,
        _service_type_id: i64,
        day_start: NaiveDateTime,
        _day_end: NaiveDateTime,
    ) -> Result<Vec<CapacityWindow>, CapacityError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.last_business_unit
            .store(business_unit_id, Ordering::Relaxed);

        let day = day_start.date();
        if self.failing_days.contains(&day) {
            return Err(CapacityError::Unavailable("scripted outage".to_string()));
        }
        Ok(self.windows.get(&day).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub(super) struct ScriptedJobHistory {
    pub(super) jobs: Vec<ExistingJob>,
    pub(super) assignments: HashMap<i64, i64>,
}

#[async_trait]
impl JobHistoryProvider for ScriptedJobHistory {
    async fn jobs_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ExistingJob>, JobHistoryError> {
        Ok(self
            .jobs
            .iter()
            .filter(|job| job.appointment_start >= start && job.appointment_start < end)
            .cloned()
            .collect())
    }

    async fn technician_for_appointment(
        &self,
        appointment_id: i64,
    ) -> Result<Option<i64>, JobHistoryError> {
        Ok(self.assignments.get(&appointment_id).copied())
    }
}

pub(super) struct StaticZones(pub(super) Vec<Zone>);

impl ZoneDirectory for StaticZones {
    fn list_zones(&self) -> Result<Vec<Zone>, ZoneDirectoryError> {
        Ok(self.0.clone())
    }
}

pub(super) struct FailingZones;

impl ZoneDirectory for FailingZones {
    fn list_zones(&self) -> Result<Vec<Zone>, ZoneDirectoryError> {
        Err(ZoneDirectoryError::Unavailable(
            "scripted outage".to_string(),
        ))
    }
}

pub(super) type TestService =
    SlotSearchService<ScriptedCapacitySource, ScriptedJobHistory, StaticZones>;

pub(super) fn build_service(
    capacity: ScriptedCapacitySource,
    history: ScriptedJobHistory,
) -> TestService {
    build_service_with(Arc::new(capacity), Arc::new(history))
}

pub(super) fn build_service_with(
    capacity: Arc<ScriptedCapacitySource>,
    history: Arc<ScriptedJobHistory>,
) -> TestService {
    SlotSearchService::new(
        capacity,
        history,
        Arc::new(StaticZones(zones())),
        scheduling_config(),
    )
}
