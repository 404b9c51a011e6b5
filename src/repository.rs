use std::fmt;
use std::hash::Hash;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::model::*;

/// Anything a repository can hold: cloneable, keyed by a copyable id.
pub trait Entity: Clone + Send + Sync {
    type Id: Copy + Eq + Hash + Ord + fmt::Display + Send + Sync;

    /// Singular noun used in error messages.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;
}

impl Entity for Room {
    type Id = RoomId;
    const KIND: &'static str = "room";

    fn id(&self) -> RoomId {
        self.id
    }
}

impl Entity for Customer {
    type Id = CustomerId;
    const KIND: &'static str = "customer";

    fn id(&self) -> CustomerId {
        self.id
    }
}

impl Entity for Booking {
    type Id = BookingId;
    const KIND: &'static str = "booking";

    fn id(&self) -> BookingId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    NotFound { kind: &'static str, id: String },
    AlreadyExists { kind: &'static str, id: String },
}

impl RepositoryError {
    fn not_found<T: Entity>(id: T::Id) -> Self {
        RepositoryError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }

    fn already_exists<T: Entity>(id: T::Id) -> Self {
        RepositoryError::AlreadyExists {
            kind: T::KIND,
            id: id.to_string(),
        }
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            RepositoryError::AlreadyExists { kind, id } => write!(f, "{kind} already exists: {id}"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// CRUD access to one entity type. The engine only reads through `get_all`
/// and `get`; the rest serves the booking-placement flow and seed loading.
pub trait Repository<T: Entity>: Send + Sync {
    /// Snapshot of every entity, ascending by id.
    fn get_all(&self) -> Vec<T>;

    fn get(&self, id: T::Id) -> Result<T, RepositoryError>;

    fn add(&self, entity: T) -> Result<(), RepositoryError>;

    /// Replace the stored entity with the same id.
    fn edit(&self, entity: T) -> Result<(), RepositoryError>;

    fn remove(&self, id: T::Id) -> Result<T, RepositoryError>;
}

pub struct InMemoryRepository<T: Entity> {
    items: DashMap<T::Id, T>,
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    /// Build a repository holding `items`. Duplicate ids are rejected.
    pub fn seeded(items: impl IntoIterator<Item = T>) -> Result<Self, RepositoryError> {
        let repo = Self::new();
        for item in items {
            repo.add(item)?;
        }
        Ok(repo)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn get_all(&self) -> Vec<T> {
        let mut all: Vec<T> = self.items.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|e| e.id());
        all
    }

    fn get(&self, id: T::Id) -> Result<T, RepositoryError> {
        self.items
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or_else(|| RepositoryError::not_found::<T>(id))
    }

    fn add(&self, entity: T) -> Result<(), RepositoryError> {
        match self.items.entry(entity.id()) {
            Entry::Occupied(_) => Err(RepositoryError::already_exists::<T>(entity.id())),
            Entry::Vacant(slot) => {
                slot.insert(entity);
                Ok(())
            }
        }
    }

    fn edit(&self, entity: T) -> Result<(), RepositoryError> {
        match self.items.get_mut(&entity.id()) {
            Some(mut current) => {
                *current = entity;
                Ok(())
            }
            None => Err(RepositoryError::not_found::<T>(entity.id())),
        }
    }

    fn remove(&self, id: T::Id) -> Result<T, RepositoryError> {
        self.items
            .remove(&id)
            .map(|(_, v)| v)
            .ok_or_else(|| RepositoryError::not_found::<T>(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: RoomId) -> Room {
        Room {
            id,
            description: format!("room {id}"),
        }
    }

    #[test]
    fn get_all_sorted_by_id() {
        let repo = InMemoryRepository::seeded([room(3), room(1), room(2)]).unwrap();
        let ids: Vec<_> = repo.get_all().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn seeded_rejects_duplicates() {
        let result = InMemoryRepository::seeded([room(1), room(1)]);
        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { kind: "room", .. })
        ));
    }

    #[test]
    fn get_missing_is_not_found() {
        let repo: InMemoryRepository<Room> = InMemoryRepository::new();
        let err = repo.get(42).unwrap_err();
        assert_eq!(err.to_string(), "room not found: 42");
    }

    #[test]
    fn edit_replaces_existing() {
        let repo = InMemoryRepository::seeded([room(1)]).unwrap();
        repo.edit(Room {
            id: 1,
            description: "sea view".into(),
        })
        .unwrap();
        assert_eq!(repo.get(1).unwrap().description, "sea view");
    }

    #[test]
    fn edit_missing_fails() {
        let repo: InMemoryRepository<Room> = InMemoryRepository::new();
        assert!(matches!(
            repo.edit(room(9)),
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(repo.is_empty());
    }

    #[test]
    fn remove_returns_entity() {
        let repo = InMemoryRepository::seeded([room(1), room(2)]).unwrap();
        let removed = repo.remove(1).unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(repo.len(), 1);
        assert!(repo.remove(1).is_err());
    }
}
