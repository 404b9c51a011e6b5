mod availability;
mod conflict;
mod error;
mod mutations;
mod queries;

pub use availability::{first_free_room, fully_occupied, occupancy};
pub use error::EngineError;

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;

use crate::model::*;
use crate::observability;
use crate::repository::Repository;

/// Source of "today". Stays are only bookable from tomorrow onwards.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Availability queries and booking placement over the room, booking and
/// customer repositories.
///
/// Every query takes a fresh snapshot of the repositories and never mutates
/// them; only `create_booking` and `cancel_booking` write.
pub struct BookingManager {
    pub(super) bookings: Arc<dyn Repository<Booking>>,
    pub(super) rooms: Arc<dyn Repository<Room>>,
    pub(super) customers: Arc<dyn Repository<Customer>>,
    pub(super) clock: Arc<dyn Clock>,
}

impl BookingManager {
    pub fn new(
        bookings: Arc<dyn Repository<Booking>>,
        rooms: Arc<dyn Repository<Room>>,
        customers: Arc<dyn Repository<Customer>>,
    ) -> Self {
        Self::with_clock(bookings, rooms, customers, Arc::new(SystemClock))
    }

    pub fn with_clock(
        bookings: Arc<dyn Repository<Booking>>,
        rooms: Arc<dyn Repository<Room>>,
        customers: Arc<dyn Repository<Customer>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bookings,
            rooms,
            customers,
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Run `f`, recording count, status and latency under the query's label.
    pub(super) fn instrumented<T>(
        &self,
        query: Query,
        f: impl FnOnce() -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let label = observability::query_label(query);
        let started = Instant::now();
        let result = f();
        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(observability::QUERIES_TOTAL, "query" => label, "status" => status)
            .increment(1);
        metrics::histogram!(observability::QUERY_DURATION_SECONDS, "query" => label)
            .record(started.elapsed().as_secs_f64());
        result
    }
}
