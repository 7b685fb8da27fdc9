//! Lookup from the textual id an entity carries in a TNTP file to the entity
//! created for it in memory.

use std::fmt;

use hashbrown::HashMap;

use crate::Error;

/// Entity kinds, each with its own id namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Node,
    Link,
    LinkSegment,
    LinkSegmentType,
    Zone,
    Connectoid,
    Mode,
    TimePeriod,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Node => "node",
            EntityKind::Link => "link",
            EntityKind::LinkSegment => "link segment",
            EntityKind::LinkSegmentType => "link segment type",
            EntityKind::Zone => "zone",
            EntityKind::Connectoid => "connectoid",
            EntityKind::Mode => "mode",
            EntityKind::TimePeriod => "time period",
        };
        f.write_str(name)
    }
}

/// Source id registry for a single entity kind
///
/// Values are the in-memory handles (indices) of the registered entities.
#[derive(Debug, Clone)]
pub struct SourceIdRegistry<T> {
    kind: EntityKind,
    entries: HashMap<String, T>,
}

impl<T: Copy> SourceIdRegistry<T> {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.entries.get(id).copied()
    }

    /// Registers `value` under `id`
    ///
    /// # Errors
    ///
    /// `Error::DuplicateId` if `id` is already registered for this kind
    pub fn register(&mut self, id: impl Into<String>, value: T) -> Result<(), Error> {
        let id = id.into();
        if self.entries.contains_key(&id) {
            return Err(Error::DuplicateId {
                kind: self.kind,
                id,
            });
        }
        self.entries.insert(id, value);
        Ok(())
    }

    /// Returns the registered value for `id`, creating and registering it with
    /// `create` when absent. The flag is `true` when the value was created.
    pub fn get_or_register_with<F>(&mut self, id: &str, create: F) -> Result<(T, bool), Error>
    where
        F: FnOnce() -> Result<T, Error>,
    {
        if let Some(existing) = self.get(id) {
            return Ok((existing, false));
        }
        let value = create()?;
        self.entries.insert(id.to_string(), value);
        Ok((value, true))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> + '_ {
        self.entries.iter().map(|(id, value)| (id.as_str(), *value))
    }
}
