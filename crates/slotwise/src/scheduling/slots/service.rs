use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use futures::future::join_all;
use tracing::{debug, warn};

use super::cache::{CacheKey, SlotCache};
use super::config::SchedulingConfig;
use super::domain::{
    BookingSlot, CapacityWindow, DayPeriod, ExistingJob, OptimizationSummary, ScoredSlot,
    SlotSearchRequest, SlotSearchResponse,
};
use super::providers::{CapacitySource, JobHistoryProvider, ZoneDirectory};
use super::ranking::dedupe_and_rank;
use super::scoring::{ProximityScorer, SlotScore};
use super::windows::{bookable_window, booking_slots, window_is_restricted, ServiceKind};
use super::zones::ZoneResolver;

/// Scores above this line count as strong route synergy in the summary.
const HIGH_SCORE_THRESHOLD: u8 = 50;

/// Error raised by the slot search pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SlotSearchError {
    #[error("serviceTypeId is required")]
    MissingServiceType,
    #[error("startDate is required")]
    MissingStartDate,
    #[error("availability lookup failed for every requested day")]
    AvailabilityUnavailable,
}

/// Read-side engine composing zone resolution, the per-day capacity fan-out,
/// slot generation, proximity scoring, deduplication, and ranking behind one
/// operation.
pub struct SlotSearchService<C, J, Z> {
    capacity: Arc<C>,
    job_history: Arc<J>,
    zone_directory: Arc<Z>,
    config: SchedulingConfig,
    scorer: ProximityScorer,
    cache: SlotCache,
}

impl<C, J, Z> SlotSearchService<C, J, Z>
where
    C: CapacitySource + 'static,
    J: JobHistoryProvider + 'static,
    Z: ZoneDirectory + 'static,
{
    pub fn new(
        capacity: Arc<C>,
        job_history: Arc<J>,
        zone_directory: Arc<Z>,
        config: SchedulingConfig,
    ) -> Self {
        let scorer = ProximityScorer::new(config.scoring.clone());
        let cache = SlotCache::new(config.cache_ttl);
        Self {
            capacity,
            job_history,
            zone_directory,
            config,
            scorer,
            cache,
        }
    }

    /// Compute the ranked arrival windows for one request.
    pub async fn search(
        &self,
        request: SlotSearchRequest,
    ) -> Result<SlotSearchResponse, SlotSearchError> {
        let query = self.validate(request)?;
        let key = query.cache_key();
        if let Some(hit) = self.cache.get(&key) {
            debug!(
                service_type_id = query.service_type_id,
                "serving slot search from cache"
            );
            return Ok(hit);
        }

        let resolver = self.load_zone_resolver();
        let caller_zone = query
            .postal_code
            .as_deref()
            .and_then(|postal| resolver.zone_for_postal_code(postal))
            .map(str::to_string);

        let range_start = query.start_date.and_time(NaiveTime::MIN);
        let range_end =
            (query.start_date + Duration::days(i64::from(query.days_to_load))).and_time(NaiveTime::MIN);

        // One availability call per calendar day plus the job-history lookup,
        // all in flight together; scoring starts only after every fetch has
        // settled.
        let (days, jobs) = tokio::join!(
            self.fetch_window_days(&query),
            self.fetch_jobs(range_start, range_end),
        );
        let days = days?;
        let jobs = self.backfill_technicians(jobs).await;

        let mut jobs_by_date: HashMap<NaiveDate, Vec<ExistingJob>> = HashMap::new();
        for job in jobs {
            jobs_by_date
                .entry(job.appointment_start.date())
                .or_default()
                .push(job);
        }

        let mut scored = Vec::new();
        for (date, windows) in days {
            let day_jobs = jobs_by_date
                .get(&date)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for window in windows {
                if window_is_restricted(
                    &window,
                    caller_zone.as_deref(),
                    day_jobs,
                    &resolver,
                    &self.config.restricted,
                ) {
                    debug!(%date, "suppressing restricted rural-zone window");
                    continue;
                }
                for slot in booking_slots(&window, query.kind) {
                    let outcome =
                        self.scorer
                            .score(&slot, caller_zone.as_deref(), &resolver, day_jobs);
                    scored.push(build_scored_slot(&slot, date, outcome, caller_zone.clone()));
                }
            }
        }

        let slots = dedupe_and_rank(scored);
        let response = SlotSearchResponse {
            success: true,
            optimization: OptimizationSummary {
                caller_zone: caller_zone.clone(),
                total_slots: slots.len() as u32,
                high_score_slots: slots
                    .iter()
                    .filter(|slot| slot.proximity_score > HIGH_SCORE_THRESHOLD)
                    .count() as u32,
            },
            slots,
        };
        self.cache.store(key, response.clone());
        Ok(response)
    }

    fn validate(&self, request: SlotSearchRequest) -> Result<SlotQuery, SlotSearchError> {
        let service_type_id = request
            .service_type_id
            .ok_or(SlotSearchError::MissingServiceType)?;
        let start_date = request.start_date.ok_or(SlotSearchError::MissingStartDate)?;

        let kind = self.config.service_kind(service_type_id);
        let business_unit_id = request
            .business_unit_id
            .unwrap_or_else(|| self.config.business_unit_for(kind));

        Ok(SlotQuery {
            service_type_id,
            business_unit_id,
            postal_code: request.postal_code.filter(|code| !code.trim().is_empty()),
            start_date,
            days_to_load: request
                .days_to_load
                .unwrap_or(self.config.days_to_load_default)
                .max(1),
            kind,
        })
    }

    fn load_zone_resolver(&self) -> ZoneResolver {
        match self.zone_directory.list_zones() {
            Ok(zones) => ZoneResolver::from_zones(&zones),
            Err(err) => {
                warn!(error = %err, "zone directory unavailable, scoring degrades to neutral");
                ZoneResolver::default()
            }
        }
    }

    /// One capacity call per calendar day, midnight to midnight so windows
    /// starting before business hours surface too. A failed day degrades to
    /// an empty day; the search fails only when every day failed.
    async fn fetch_window_days(
        &self,
        query: &SlotQuery,
    ) -> Result<Vec<(NaiveDate, Vec<CapacityWindow>)>, SlotSearchError> {
        let fetches = (0..query.days_to_load).map(|offset| {
            let date = query.start_date + Duration::days(i64::from(offset));
            async move {
                let day_start = date.and_time(NaiveTime::MIN);
                let day_end = (date + Duration::days(1)).and_time(NaiveTime::MIN);
                let result = self
                    .capacity
                    .availability(
                        query.business_unit_id,
                        query.service_type_id,
                        day_start,
                        day_end,
                    )
                    .await;
                (date, result)
            }
        });

        let mut any_succeeded = false;
        let mut days = Vec::new();
        for (date, result) in join_all(fetches).await {
            match result {
                Ok(windows) => {
                    any_succeeded = true;
                    let usable: Vec<CapacityWindow> = windows
                        .into_iter()
                        .filter(|window| bookable_window(window, query.kind))
                        .collect();
                    days.push((date, usable));
                }
                Err(err) => {
                    warn!(%date, error = %err, "availability fetch failed, treating day as empty");
                    days.push((date, Vec::new()));
                }
            }
        }

        if !any_succeeded {
            return Err(SlotSearchError::AvailabilityUnavailable);
        }
        Ok(days)
    }

    async fn fetch_jobs(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<ExistingJob> {
        match self.job_history.jobs_in_range(start, end).await {
            Ok(jobs) => jobs,
            Err(err) => {
                warn!(error = %err, "job history unavailable, scoring proceeds without same-day context");
                Vec::new()
            }
        }
    }

    /// Resolve assignments for jobs that arrive without one through the
    /// secondary appointment lookup; all lookups run concurrently.
    async fn backfill_technicians(&self, jobs: Vec<ExistingJob>) -> Vec<ExistingJob> {
        let lookups = jobs.into_iter().map(|mut job| async move {
            if job.technician_id.is_none() {
                match self
                    .job_history
                    .technician_for_appointment(job.appointment_id)
                    .await
                {
                    Ok(found) => job.technician_id = found,
                    Err(err) => debug!(
                        appointment_id = job.appointment_id,
                        error = %err,
                        "technician lookup failed, job stays unassigned"
                    ),
                }
            }
            job
        });
        join_all(lookups).await
    }
}

/// Validated query with defaults applied; doubles as the cache identity.
#[derive(Debug, Clone)]
struct SlotQuery {
    service_type_id: i64,
    business_unit_id: i64,
    postal_code: Option<String>,
    start_date: NaiveDate,
    days_to_load: u32,
    kind: ServiceKind,
}

impl SlotQuery {
    fn cache_key(&self) -> CacheKey {
        CacheKey {
            service_type_id: self.service_type_id,
            business_unit_id: self.business_unit_id,
            postal_code: self.postal_code.clone(),
            start_date: self.start_date,
            days_to_load: self.days_to_load,
        }
    }
}

fn build_scored_slot(
    slot: &BookingSlot,
    date: NaiveDate,
    outcome: SlotScore,
    zone_name: Option<String>,
) -> ScoredSlot {
    ScoredSlot {
        id: slot_id(slot),
        booking_start: slot.start,
        booking_end: slot.end,
        arrival_window_start: slot.window.start,
        arrival_window_end: slot.window.end,
        date,
        display_label: display_label(&slot.window),
        period: DayPeriod::from_start(slot.window.start),
        proximity_score: outcome.score,
        nearby_job_count: outcome.nearby_job_count,
        zone_name,
        candidate_technician_id: outcome.technician_id,
        available_capacity_hours: slot.window.available_capacity_hours,
        total_capacity_hours: slot.window.total_capacity_hours,
    }
}

fn slot_id(slot: &BookingSlot) -> String {
    format!(
        "{}-{}{}-{}{}",
        slot.window.start.format("%Y%m%d"),
        slot.window.start.format("%H%M"),
        slot.window.end.format("%H%M"),
        slot.start.format("%H%M"),
        slot.end.format("%H%M"),
    )
}

fn display_label(window: &CapacityWindow) -> String {
    format!(
        "{} - {}",
        window.start.format("%-I:%M %p"),
        window.end.format("%-I:%M %p")
    )
}
