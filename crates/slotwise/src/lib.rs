//! Appointment slot optimization engine for field-service dispatch.
//!
//! Given a service type, a rough customer location, and a date range, the
//! engine produces a ranked list of customer-facing arrival windows, each
//! annotated with a route-efficiency score and a pre-assigned technician
//! candidate. Booking the chosen window is a separate write-side concern and
//! lives outside this crate.

pub mod config;
pub mod error;
pub mod scheduling;
pub mod telemetry;
