use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use hotelbook::engine::{Clock, FixedClock, SystemClock};
use hotelbook::seed::Seed;

const USAGE: &str = "usage: hotelbook <available|occupied|occupancy> <start YYYY-MM-DD> <end YYYY-MM-DD>";

fn parse_date(s: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("bad date {s:?}: {e}").into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let seed_path = std::env::var("HOTELBOOK_SEED").unwrap_or_else(|_| "./seed.json".into());
    let clock: Arc<dyn Clock> = match std::env::var("HOTELBOOK_TODAY") {
        Ok(s) => Arc::new(FixedClock(parse_date(&s)?)),
        Err(_) => Arc::new(SystemClock),
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [command, start, end] = args.as_slice() else {
        return Err(USAGE.into());
    };
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    let repos = Seed::load(&PathBuf::from(&seed_path))?.into_repositories()?;
    let manager = repos.manager(clock);
    info!("  seed: {seed_path}");
    info!("  today: {}", manager.today());

    let output = match command.as_str() {
        "available" => serde_json::to_string_pretty(&manager.find_available_room(start, end)?)?,
        "occupied" => serde_json::to_string_pretty(&manager.fully_occupied_dates(start, end)?)?,
        "occupancy" => serde_json::to_string_pretty(&manager.occupancy(start, end)?)?,
        _ => return Err(USAGE.into()),
    };
    println!("{output}");
    Ok(())
}
