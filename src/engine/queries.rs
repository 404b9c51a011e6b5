use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::model::*;

use super::availability::{first_free_room, fully_occupied, occupancy};
use super::conflict::{check_window, validate_bookable, validate_range};
use super::{BookingManager, EngineError};

impl BookingManager {
    /// First room, ascending by id, with no active booking overlapping
    /// `[start, end]`. `Ok(None)` when every room is taken.
    pub fn find_available_room(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<RoomId>, EngineError> {
        self.instrumented(Query::FindAvailableRoom, || {
            let range = validate_bookable(start, end, self.today()).inspect_err(|e| {
                warn!("rejected availability query: {e}");
            })?;
            let rooms = self.rooms.get_all();
            let bookings = self.bookings.get_all();
            let room = first_free_room(&rooms, &bookings, &range);
            debug!(%start, %end, ?room, "find_available_room");
            Ok(room)
        })
    }

    /// Dates in `[start, end]` on which every room holds an active booking.
    pub fn fully_occupied_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, EngineError> {
        self.instrumented(Query::FullyOccupiedDates, || {
            let range = validate_range(start, end)?;
            check_window(&range)?;
            let rooms = self.rooms.get_all();
            let bookings = self.bookings.get_all();
            let dates = fully_occupied(&rooms, &bookings, &range);
            debug!(%start, %end, count = dates.len(), "fully_occupied_dates");
            Ok(dates)
        })
    }

    /// Booked-room count for each date in `[start, end]`.
    pub fn occupancy(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DayOccupancy>, EngineError> {
        self.instrumented(Query::Occupancy, || {
            let range = validate_range(start, end)?;
            check_window(&range)?;
            let rooms = self.rooms.get_all();
            let bookings = self.bookings.get_all();
            Ok(occupancy(&rooms, &bookings, &range))
        })
    }
}
