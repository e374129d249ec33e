use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::domain::{CapacityWindow, ExistingJob, Zone};

/// External provider of raw technician-pool availability windows. The engine
/// issues one call per calendar day, midnight to midnight, so windows that
/// begin before normal business hours still surface.
#[async_trait]
pub trait CapacitySource: Send + Sync {
    async fn availability(
        &self,
        business_unit_id: i64,
        service_type_id: i64,
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> Result<Vec<CapacityWindow>, CapacityError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CapacityError {
    #[error("capacity source unavailable: {0}")]
    Unavailable(String),
    #[error("capacity source rejected the request: {0}")]
    Rejected(String),
}

/// Read-only view over already-booked appointments, used for proximity
/// scoring only.
#[async_trait]
pub trait JobHistoryProvider: Send + Sync {
    async fn jobs_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ExistingJob>, JobHistoryError>;

    /// Secondary lookup used to backfill jobs that arrive without an
    /// assignment.
    async fn technician_for_appointment(
        &self,
        appointment_id: i64,
    ) -> Result<Option<i64>, JobHistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum JobHistoryError {
    #[error("job history unavailable: {0}")]
    Unavailable(String),
}

/// Slowly-changing directory of named geographic zones.
pub trait ZoneDirectory: Send + Sync {
    fn list_zones(&self) -> Result<Vec<Zone>, ZoneDirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ZoneDirectoryError {
    #[error("zone directory unavailable: {0}")]
    Unavailable(String),
    #[error("zone directory entry malformed: {0}")]
    Malformed(String),
}
