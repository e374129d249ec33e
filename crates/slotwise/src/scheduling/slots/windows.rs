use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

use super::config::RestrictedWindowsConfig;
use super::domain::{BookingSlot, CapacityWindow, ExistingJob};
use super::zones::ZoneResolver;

/// Arrival-window duration for standard service types.
pub const STANDARD_WINDOW_HOURS: i64 = 4;
/// Arrival-window duration for full-day service types (inspections etc.).
pub const FULL_DAY_WINDOW_HOURS: i64 = 12;
/// Internal bookable sub-slot duration for standard service types.
pub const BOOKING_SLOT_HOURS: i64 = 2;
/// Minimum reported capacity able to host one standard sub-slot.
pub const MIN_BOOKABLE_CAPACITY_HOURS: f64 = 2.0;

/// Window shape required by the requested service type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Standard,
    FullDay,
}

impl ServiceKind {
    pub const fn window_hours(self) -> i64 {
        match self {
            ServiceKind::Standard => STANDARD_WINDOW_HOURS,
            ServiceKind::FullDay => FULL_DAY_WINDOW_HOURS,
        }
    }
}

/// Business-rule filter over raw provider windows: the window must be open,
/// must report enough remaining capacity for one sub-slot, and must span
/// exactly the duration the service type calls for. Wrong-duration windows
/// are discarded entirely, never resized.
pub fn bookable_window(window: &CapacityWindow, kind: ServiceKind) -> bool {
    if !window.is_available {
        return false;
    }

    if let Some(hours) = window.available_capacity_hours {
        if hours < MIN_BOOKABLE_CAPACITY_HOURS {
            return false;
        }
    }

    window.end - window.start == Duration::hours(kind.window_hours())
}

/// Expand one arrival window into its bookable sub-slots. A full-day window
/// yields itself; a standard window yields every two-hour slot aligned to a
/// whole hour that fits inside it, so an 8-12 window yields 8-10, 9-11, and
/// 10-12.
pub fn booking_slots(window: &CapacityWindow, kind: ServiceKind) -> Vec<BookingSlot> {
    match kind {
        ServiceKind::FullDay => vec![BookingSlot {
            window: window.clone(),
            start: window.start,
            end: window.end,
        }],
        ServiceKind::Standard => {
            let span = Duration::hours(BOOKING_SLOT_HOURS);
            let mut slots = Vec::new();
            let mut start = ceil_to_hour(window.start);
            while start + span <= window.end {
                slots.push(BookingSlot {
                    window: window.clone(),
                    start,
                    end: start + span,
                });
                start += Duration::hours(1);
            }
            slots
        }
    }
}

/// Dispatch guard for the rural zone: its mid-day windows stay hidden until
/// the day already has at least one job in that zone, because a lone trip
/// out there cannot be routed efficiently.
pub fn window_is_restricted(
    window: &CapacityWindow,
    caller_zone: Option<&str>,
    same_day_jobs: &[ExistingJob],
    resolver: &ZoneResolver,
    config: &RestrictedWindowsConfig,
) -> bool {
    let caller = match caller_zone {
        Some(zone) => zone,
        None => return false,
    };
    if !caller.eq_ignore_ascii_case(&config.zone_name) {
        return false;
    }

    let hours = (window.start.hour(), window.end.hour());
    if !config.window_hours.contains(&hours) {
        return false;
    }

    !same_day_jobs.iter().any(|job| {
        resolver
            .zone_for_job(job)
            .map_or(false, |zone| zone.eq_ignore_ascii_case(&config.zone_name))
    })
}

fn ceil_to_hour(value: NaiveDateTime) -> NaiveDateTime {
    let on_the_hour = value.date().and_time(NaiveTime::MIN) + Duration::hours(value.hour() as i64);
    if on_the_hour == value {
        value
    } else {
        on_the_hour + Duration::hours(1)
    }
}
