use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type RoomId = u32;
pub type CustomerId = u32;
pub type BookingId = u32;

/// Closed interval `[start, end]` of calendar dates. Never inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// `None` when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Days from `start` to `date`, or `None` when `date` lies outside the range.
    pub fn offset_of(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        usize::try_from((date - self.start).num_days()).ok()
    }

    /// Neither range ends before the other begins.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Common part of both ranges, if they overlap.
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        DateRange::new(self.start.max(other.start), self.end.min(other.end))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date in the range, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub room_id: RoomId,
    pub customer_id: CustomerId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Cleared on cancellation; inactive bookings never block a room.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Booking {
    /// `None` for a booking whose dates are inverted.
    pub fn range(&self) -> Option<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Active and overlapping `range`.
    pub fn blocks(&self, range: &DateRange) -> bool {
        self.is_active && self.range().is_some_and(|r| r.overlaps(range))
    }
}

// ── Query result types ───────────────────────────────────────────

/// How many rooms carry an active booking on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOccupancy {
    pub date: NaiveDate,
    pub booked_rooms: usize,
    pub total_rooms: usize,
}

impl DayOccupancy {
    pub fn is_full(&self) -> bool {
        self.total_rooms > 0 && self.booked_rooms >= self.total_rooms
    }
}

/// The operations exposed by the engine, used for metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    FindAvailableRoom,
    FullyOccupiedDates,
    Occupancy,
    CreateBooking,
    CancelBooking,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, day).unwrap()
    }

    fn booking(start: u32, end: u32, is_active: bool) -> Booking {
        Booking {
            id: 1,
            room_id: 1,
            customer_id: 1,
            start_date: d(start),
            end_date: d(end),
            is_active,
        }
    }

    fn range(start: u32, end: u32) -> DateRange {
        DateRange::new(d(start), d(end)).unwrap()
    }

    #[test]
    fn range_basics() {
        let r = range(10, 12);
        assert_eq!(r.len_days(), 3);
        assert!(r.contains(d(10)));
        assert!(r.contains(d(12)));
        assert!(!r.contains(d(13)));
    }

    #[test]
    fn single_day_range() {
        let r = range(5, 5);
        assert_eq!(r.len_days(), 1);
        assert_eq!(r.days().collect::<Vec<_>>(), vec![d(5)]);
    }

    #[test]
    fn range_overlap_is_inclusive() {
        let a = range(10, 20);
        let touching = range(20, 25);
        let after = range(21, 25);
        let inside = range(12, 13);
        let around = range(1, 30);
        assert!(a.overlaps(&touching)); // shared end date counts
        assert!(!a.overlaps(&after));
        assert!(a.overlaps(&inside));
        assert!(a.overlaps(&around));
        assert!(around.overlaps(&a));
    }

    #[test]
    fn days_cross_month_boundary() {
        let r = DateRange::new(
            NaiveDate::from_ymd_opt(2030, 1, 30).unwrap(),
            NaiveDate::from_ymd_opt(2030, 2, 2).unwrap(),
        )
        .unwrap();
        let days: Vec<_> = r.days().collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[2], NaiveDate::from_ymd_opt(2030, 2, 1).unwrap());
        assert_eq!(r.len_days(), 4);
    }

    #[test]
    fn inactive_booking_never_blocks() {
        let query = range(10, 12);
        assert!(booking(9, 11, true).blocks(&query));
        assert!(!booking(9, 11, false).blocks(&query));
        assert!(!booking(1, 9, true).blocks(&query));
    }

    #[test]
    fn inverted_range_is_none() {
        assert_eq!(DateRange::new(d(5), d(1)), None);
    }

    #[test]
    fn offset_and_intersection() {
        let r = range(10, 20);
        assert_eq!(r.offset_of(d(10)), Some(0));
        assert_eq!(r.offset_of(d(20)), Some(10));
        assert_eq!(r.offset_of(d(21)), None);
        assert_eq!(r.intersect(&range(18, 25)), Some(range(18, 20)));
        assert_eq!(r.intersect(&range(21, 25)), None);
    }

    #[test]
    fn inverted_booking_never_blocks() {
        let b = booking(12, 9, true);
        assert_eq!(b.range(), None);
        assert!(!b.blocks(&range(1, 30)));
    }

    #[test]
    fn day_occupancy_full() {
        let full = DayOccupancy { date: d(1), booked_rooms: 3, total_rooms: 3 };
        let partial = DayOccupancy { date: d(1), booked_rooms: 2, total_rooms: 3 };
        let no_rooms = DayOccupancy { date: d(1), booked_rooms: 0, total_rooms: 0 };
        assert!(full.is_full());
        assert!(!partial.is_full());
        assert!(!no_rooms.is_full());
    }

    #[test]
    fn booking_json_defaults_to_active() {
        let json = r#"{"id":7,"room_id":2,"customer_id":1,"start_date":"2030-01-10","end_date":"2030-01-12"}"#;
        let b: Booking = serde_json::from_str(json).unwrap();
        assert!(b.is_active);
        assert_eq!(b.range(), Some(range(10, 12)));
    }
}
