use chrono::NaiveDate;
use tracing::{debug, info};

use crate::model::*;
use crate::observability;

use super::{BookingManager, EngineError};

impl BookingManager {
    /// Place a booking for `customer_id` in the first free room.
    ///
    /// Returns `Ok(None)` when no room is free for the whole stay. The new
    /// booking is active and gets the next id after the highest one stored.
    pub fn create_booking(
        &self,
        customer_id: CustomerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Booking>, EngineError> {
        self.instrumented(Query::CreateBooking, || {
            self.customers.get(customer_id)?;

            let Some(room_id) = self.find_available_room(start, end)? else {
                metrics::counter!(observability::BOOKINGS_REJECTED_TOTAL).increment(1);
                info!(customer_id, %start, %end, "no room available");
                return Ok(None);
            };

            let id = match self.bookings.get_all().iter().map(|b| b.id).max() {
                Some(max) => max
                    .checked_add(1)
                    .ok_or(EngineError::LimitExceeded("booking ids exhausted"))?,
                None => 1,
            };
            let booking = Booking {
                id,
                room_id,
                customer_id,
                start_date: start,
                end_date: end,
                is_active: true,
            };
            self.bookings.add(booking.clone())?;

            metrics::counter!(observability::BOOKINGS_CREATED_TOTAL).increment(1);
            info!(booking_id = id, room_id, customer_id, %start, %end, "booking created");
            Ok(Some(booking))
        })
    }

    /// Soft-delete a booking so it stops blocking its room.
    pub fn cancel_booking(&self, id: BookingId) -> Result<Booking, EngineError> {
        self.instrumented(Query::CancelBooking, || {
            let mut booking = self.bookings.get(id)?;
            if !booking.is_active {
                debug!(booking_id = id, "booking already cancelled");
                return Ok(booking);
            }
            booking.is_active = false;
            self.bookings.edit(booking.clone())?;

            metrics::counter!(observability::BOOKINGS_CANCELLED_TOTAL).increment(1);
            info!(booking_id = id, room_id = booking.room_id, "booking cancelled");
            Ok(booking)
        })
    }
}
