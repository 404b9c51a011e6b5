use crate::model::Query;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total engine operations. Labels: query, status.
pub const QUERIES_TOTAL: &str = "hotelbook_queries_total";

/// Histogram: operation latency in seconds. Labels: query.
pub const QUERY_DURATION_SECONDS: &str = "hotelbook_query_duration_seconds";

// ── Booking outcomes ────────────────────────────────────────────

/// Counter: bookings placed.
pub const BOOKINGS_CREATED_TOTAL: &str = "hotelbook_bookings_created_total";

/// Counter: booking requests turned away because every room was taken.
pub const BOOKINGS_REJECTED_TOTAL: &str = "hotelbook_bookings_rejected_total";

/// Counter: bookings cancelled.
pub const BOOKINGS_CANCELLED_TOTAL: &str = "hotelbook_bookings_cancelled_total";

/// Map a Query variant to a short label for metrics.
pub fn query_label(query: Query) -> &'static str {
    match query {
        Query::FindAvailableRoom => "find_available_room",
        Query::FullyOccupiedDates => "fully_occupied_dates",
        Query::Occupancy => "occupancy",
        Query::CreateBooking => "create_booking",
        Query::CancelBooking => "cancel_booking",
    }
}
