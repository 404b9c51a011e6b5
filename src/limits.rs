/// Widest date range a single query may cover (inclusive day count).
pub const MAX_QUERY_WINDOW_DAYS: i64 = 3 * 366;

/// Upper bound on rooms accepted by the seed loader.
pub const MAX_ROOMS: usize = 10_000;
