use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{BookingManager, Clock};
use crate::limits::MAX_ROOMS;
use crate::model::*;
use crate::repository::{InMemoryRepository, RepositoryError};

/// Fixed reference data for the in-memory repositories, as stored in a
/// JSON seed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Repository(RepositoryError),
    InvalidBooking { id: BookingId, reason: &'static str },
    LimitExceeded(&'static str),
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedError::Io(e) => write!(f, "cannot read seed file: {e}"),
            SeedError::Parse(e) => write!(f, "malformed seed file: {e}"),
            SeedError::Repository(e) => write!(f, "seed rejected: {e}"),
            SeedError::InvalidBooking { id, reason } => write!(f, "booking {id}: {reason}"),
            SeedError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<RepositoryError> for SeedError {
    fn from(e: RepositoryError) -> Self {
        SeedError::Repository(e)
    }
}

/// The three repositories the booking manager reads from.
pub struct Repositories {
    pub rooms: Arc<InMemoryRepository<Room>>,
    pub customers: Arc<InMemoryRepository<Customer>>,
    pub bookings: Arc<InMemoryRepository<Booking>>,
}

impl Repositories {
    pub fn manager(&self, clock: Arc<dyn Clock>) -> BookingManager {
        BookingManager::with_clock(
            self.bookings.clone(),
            self.rooms.clone(),
            self.customers.clone(),
            clock,
        )
    }
}

impl Seed {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        serde_json::from_str(json).map_err(SeedError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let json = std::fs::read_to_string(path).map_err(SeedError::Io)?;
        Self::from_json(&json)
    }

    /// Check bookings reference known rooms and customers and have ordered dates.
    fn validate(&self) -> Result<(), SeedError> {
        if self.rooms.len() > MAX_ROOMS {
            return Err(SeedError::LimitExceeded("too many rooms"));
        }
        for b in &self.bookings {
            if b.range().is_none() {
                return Err(SeedError::InvalidBooking {
                    id: b.id,
                    reason: "start date is after end date",
                });
            }
            if !self.rooms.iter().any(|r| r.id == b.room_id) {
                return Err(SeedError::InvalidBooking {
                    id: b.id,
                    reason: "unknown room",
                });
            }
            if !self.customers.iter().any(|c| c.id == b.customer_id) {
                return Err(SeedError::InvalidBooking {
                    id: b.id,
                    reason: "unknown customer",
                });
            }
        }
        Ok(())
    }

    pub fn into_repositories(self) -> Result<Repositories, SeedError> {
        self.validate()?;
        let repos = Repositories {
            rooms: Arc::new(InMemoryRepository::seeded(self.rooms)?),
            customers: Arc::new(InMemoryRepository::seeded(self.customers)?),
            bookings: Arc::new(InMemoryRepository::seeded(self.bookings)?),
        };
        info!(
            rooms = repos.rooms.len(),
            customers = repos.customers.len(),
            bookings = repos.bookings.len(),
            "seed loaded"
        );
        Ok(repos)
    }
}
