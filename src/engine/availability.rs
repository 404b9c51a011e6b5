use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::model::*;

// ── Availability Algorithm ────────────────────────────────────────

/// Lowest room id with no active booking overlapping `query`.
pub fn first_free_room(rooms: &[Room], bookings: &[Booking], query: &DateRange) -> Option<RoomId> {
    let blocked: HashSet<RoomId> = bookings
        .iter()
        .filter(|b| b.blocks(query))
        .map(|b| b.room_id)
        .collect();
    rooms
        .iter()
        .map(|r| r.id)
        .filter(|id| !blocked.contains(id))
        .min()
}

/// Active bookings grouped by room, clamped to `query`.
fn active_spans_by_room(bookings: &[Booking], query: &DateRange) -> HashMap<RoomId, Vec<DateRange>> {
    let mut by_room: HashMap<RoomId, Vec<DateRange>> = HashMap::new();
    for b in bookings.iter().filter(|b| b.blocks(query)) {
        if let Some(clamped) = b.range().and_then(|r| r.intersect(query)) {
            by_room.entry(b.room_id).or_default().push(clamped);
        }
    }
    by_room
}

/// Per-date count of rooms holding at least one active booking.
///
/// A room with several bookings on the same date is counted once, and
/// bookings for rooms not in `rooms` are ignored.
pub fn occupancy(rooms: &[Room], bookings: &[Booking], query: &DateRange) -> Vec<DayOccupancy> {
    let Ok(days) = usize::try_from(query.len_days()) else {
        return Vec::new();
    };
    let mut booked = vec![0usize; days];
    let mut covered = vec![false; days];
    let by_room = active_spans_by_room(bookings, query);

    for room in rooms {
        let Some(spans) = by_room.get(&room.id) else {
            continue;
        };
        covered.fill(false);
        for span in spans {
            if let (Some(from), Some(to)) = (query.offset_of(span.start()), query.offset_of(span.end())) {
                covered[from..=to].fill(true);
            }
        }
        for (count, hit) in booked.iter_mut().zip(&covered) {
            if *hit {
                *count += 1;
            }
        }
    }

    query
        .days()
        .zip(booked)
        .map(|(date, booked_rooms)| DayOccupancy {
            date,
            booked_rooms,
            total_rooms: rooms.len(),
        })
        .collect()
}

/// Dates in `query` on which every room is booked. Empty when there are no rooms.
pub fn fully_occupied(rooms: &[Room], bookings: &[Booking], query: &DateRange) -> Vec<NaiveDate> {
    if rooms.is_empty() || bookings.is_empty() {
        return Vec::new();
    }
    occupancy(rooms, bookings, query)
        .into_iter()
        .filter(DayOccupancy::is_full)
        .map(|o| o.date)
        .collect()
}
