use std::collections::HashMap;

use crate::core::models::BaseEntity;
use crate::errors::{Error, Result};

/// In-memory id-keyed store. Ids are assigned on insert and never reused.
#[derive(Debug)]
pub struct Repository<T: BaseEntity> {
    items: HashMap<i32, T>,
    next_id: i32,
}

impl<T: BaseEntity> Default for Repository<T> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            next_id: 1,
        }
    }
}

impl<T: BaseEntity> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn insert(&mut self, mut entity: T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        entity.set_id(id);
        self.items.entry(id).or_insert(entity)
    }

    /// Insert keeping the entity's own id (used when loading from disk).
    pub fn insert_with_id(&mut self, entity: T) -> Result<()> {
        let id = entity.id();
        if id <= 0 {
            return Err(Error::Parse("ID must be positive.".into()));
        }
        if self.items.contains_key(&id) {
            return Err(Error::Parse(format!(
                "Entity with id {} already exists.",
                id
            )));
        }
        self.next_id = self.next_id.max(id + 1);
        self.items.insert(id, entity);
        Ok(())
    }

    pub fn get(&self, id: i32) -> Result<&T> {
        self.items.get(&id).ok_or(Error::NotFound(id))
    }

    pub fn get_mut(&mut self, id: i32) -> Result<&mut T> {
        self.items.get_mut(&id).ok_or(Error::NotFound(id))
    }

    pub fn delete(&mut self, id: i32) -> Result<T> {
        self.items.remove(&id).ok_or(Error::NotFound(id))
    }

    /// Every entity, lowest id first.
    pub fn values(&self) -> Vec<&T> {
        let mut out: Vec<&T> = self.items.values().collect();
        out.sort_by_key(|e| e.id());
        out
    }
}
