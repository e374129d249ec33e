use crate::infra::{build_demo_service, parse_date, DEMO_FULL_DAY_SERVICE, DEMO_STANDARD_SERVICE};
use chrono::{Local, NaiveDate};
use clap::Args;
use slotwise::error::AppError;
use slotwise::scheduling::slots::{SlotSearchRequest, SlotSearchResponse, DEFAULT_CACHE_TTL};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Service type to search for (defaults to the standard demo type)
    #[arg(long, default_value_t = DEMO_STANDARD_SERVICE)]
    pub(crate) service_type_id: i64,
    /// Explicit business unit; otherwise resolved from the service category
    #[arg(long)]
    pub(crate) business_unit_id: Option<i64>,
    /// Caller postal code used for zone resolution
    #[arg(long)]
    pub(crate) postal_code: Option<String>,
    /// First day to search (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) start_date: Option<NaiveDate>,
    /// Days of availability to load
    #[arg(long, default_value_t = 7)]
    pub(crate) days_to_load: u32,
    /// Zone directory CSV export replacing the built-in demo zones
    #[arg(long)]
    pub(crate) zones_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// First day to search (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) start_date: Option<NaiveDate>,
    /// Days of availability to load for each walkthrough search
    #[arg(long, default_value_t = 3)]
    pub(crate) days_to_load: u32,
    /// Zone directory CSV export replacing the built-in demo zones
    #[arg(long)]
    pub(crate) zones_csv: Option<PathBuf>,
}

pub(crate) async fn run_slot_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        service_type_id,
        business_unit_id,
        postal_code,
        start_date,
        days_to_load,
        zones_csv,
    } = args;

    let start_date = start_date.unwrap_or_else(|| Local::now().date_naive());
    let service = build_demo_service(zones_csv, DEFAULT_CACHE_TTL)?;

    let response = service
        .search(SlotSearchRequest {
            service_type_id: Some(service_type_id),
            business_unit_id,
            postal_code,
            start_date: Some(start_date),
            days_to_load: Some(days_to_load),
        })
        .await?;

    println!(
        "Slot search for service type {service_type_id} starting {start_date} ({days_to_load} day(s))"
    );
    render_slot_response(&response);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        start_date,
        days_to_load,
        zones_csv,
    } = args;

    let start_date = start_date.unwrap_or_else(|| Local::now().date_naive());
    let service = build_demo_service(zones_csv, DEFAULT_CACHE_TTL)?;

    println!("Slot optimization demo");
    println!("Search window: {start_date} + {days_to_load} day(s)");

    println!("\nStandard service, central caller (zip 78745)");
    let standard = service
        .search(SlotSearchRequest {
            service_type_id: Some(DEMO_STANDARD_SERVICE),
            business_unit_id: None,
            postal_code: Some("78745".to_string()),
            start_date: Some(start_date),
            days_to_load: Some(days_to_load),
        })
        .await?;
    render_slot_response(&standard);

    println!("\nFull-day inspection, hill-country caller (zip 78620)");
    let full_day = service
        .search(SlotSearchRequest {
            service_type_id: Some(DEMO_FULL_DAY_SERVICE),
            business_unit_id: None,
            postal_code: Some("78620".to_string()),
            start_date: Some(start_date),
            days_to_load: Some(days_to_load),
        })
        .await?;
    render_slot_response(&full_day);

    Ok(())
}

fn render_slot_response(response: &SlotSearchResponse) {
    match response.optimization.caller_zone.as_deref() {
        Some(zone) => println!("Caller zone: {zone}"),
        None => println!("Caller zone: unresolved (neutral scoring)"),
    }

    if response.slots.is_empty() {
        println!("No bookable arrival windows found.");
        return;
    }

    println!("Ranked arrival windows");
    for slot in &response.slots {
        let technician = match slot.candidate_technician_id {
            Some(id) => format!("tech {id}"),
            None => "unassigned".to_string(),
        };
        println!(
            "- {} | {} | {} | score {} | {} | {} nearby job(s)",
            slot.date,
            slot.display_label,
            slot.period.label(),
            slot.proximity_score,
            technician,
            slot.nearby_job_count
        );
    }

    println!(
        "{} window(s) total, {} scoring above 50",
        response.optimization.total_slots, response.optimization.high_score_slots
    );
}
