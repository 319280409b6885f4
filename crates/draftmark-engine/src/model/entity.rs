use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of an entity in a document's [`EntityMap`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(pub String);

impl EntityKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for EntityKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    Link,
    Image,
}

/// How the editor treats text carrying the entity when it is edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mutability {
    #[default]
    Mutable,
    Immutable,
    Segmented,
}

/// An out-of-line object attached to text through entity ranges.
///
/// For links the payload is the normalized URL, for images the source URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default)]
    pub mutability: Mutability,
    pub payload: String,
}

impl Entity {
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            entity_type: EntityType::Link,
            mutability: Mutability::Mutable,
            payload: url.into(),
        }
    }

    pub fn image(src: impl Into<String>) -> Self {
        Self {
            entity_type: EntityType::Image,
            mutability: Mutability::Immutable,
            payload: src.into(),
        }
    }
}

/// All entities of a document, addressed by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityMap {
    entities: BTreeMap<EntityKey, Entity>,
}

impl EntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an entity under the next free numeric key.
    pub fn insert(&mut self, entity: Entity) -> EntityKey {
        let key = (self.entities.len()..)
            .map(|n| EntityKey(n.to_string()))
            .find(|key| !self.entities.contains_key(key))
            .unwrap_or_else(|| EntityKey(self.entities.len().to_string()));
        self.entities.insert(key.clone(), entity);
        key
    }

    /// Stores an entity under a caller-chosen key, replacing any previous one.
    pub fn insert_with_key(&mut self, key: impl Into<EntityKey>, entity: Entity) -> Option<Entity> {
        self.entities.insert(key.into(), entity)
    }

    pub fn get(&self, key: &EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn contains_key(&self, key: &EntityKey) -> bool {
        self.entities.contains_key(key)
    }

    /// Finds the key of an existing entity with the same type and payload.
    pub fn find(&self, entity_type: EntityType, payload: &str) -> Option<&EntityKey> {
        self.entities
            .iter()
            .find(|(_, e)| e.entity_type == entity_type && e.payload == payload)
            .map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &Entity)> {
        self.entities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_allocates_sequential_keys() {
        let mut map = EntityMap::new();
        assert_eq!(map.insert(Entity::link("http://a")), EntityKey::from("0"));
        assert_eq!(map.insert(Entity::link("http://b")), EntityKey::from("1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn insert_skips_keys_taken_by_caller() {
        let mut map = EntityMap::new();
        map.insert_with_key("1", Entity::link("http://a"));
        let key = map.insert(Entity::link("http://b"));
        assert_eq!(key, EntityKey::from("2"));
    }

    #[test]
    fn find_matches_type_and_payload() {
        let mut map = EntityMap::new();
        let key = map.insert(Entity::image("cat.png"));
        assert_eq!(map.find(EntityType::Image, "cat.png"), Some(&key));
        assert_eq!(map.find(EntityType::Link, "cat.png"), None);
    }
}
