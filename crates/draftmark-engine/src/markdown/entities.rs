//! # Entity Resolver
//!
//! Creates or reuses link and image entities while parsing, and looks up
//! their payloads while serializing.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Entity, EntityKey, EntityMap, EntityType};

/// An entity's type and payload as needed by the range merger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEntity<'a> {
    pub entity_type: EntityType,
    pub payload: &'a str,
}

/// Looks up the payload for an entity range's key.
pub fn lookup<'a>(map: &'a EntityMap, key: &EntityKey) -> Option<ResolvedEntity<'a>> {
    map.get(key).map(|entity| ResolvedEntity {
        entity_type: entity.entity_type,
        payload: entity.payload.as_str(),
    })
}

/// Lookup-or-create access to a document's entity map during parsing.
pub struct EntityResolver<'a> {
    map: &'a mut EntityMap,
}

impl<'a> EntityResolver<'a> {
    pub fn new(map: &'a mut EntityMap) -> Self {
        Self { map }
    }

    /// Returns the key of a LINK entity for `raw_url`, normalizing the URL.
    pub fn resolve_link(&mut self, raw_url: &str) -> EntityKey {
        self.resolve(Entity::link(normalize_url(raw_url)))
    }

    /// Returns the key of an IMAGE entity for `src`.
    pub fn resolve_image(&mut self, src: &str) -> EntityKey {
        self.resolve(Entity::image(src.trim()))
    }

    fn resolve(&mut self, entity: Entity) -> EntityKey {
        if let Some(key) = self.map.find(entity.entity_type, &entity.payload) {
            return key.clone();
        }
        log::trace!("creating {:?} entity for {}", entity.entity_type, entity.payload);
        self.map.insert(entity)
    }
}

/// Normalizes a link target.
///
/// Targets with a scheme are kept. Bare targets containing `@` become
/// `mailto:` links, anything else gets `http://`.
pub fn normalize_url(raw: &str) -> String {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    let scheme = SCHEME.get_or_init(|| {
        Regex::new(r"(?i)^(?:[a-z][a-z0-9+.\-]*://|mailto:|tel:|data:)")
            .expect("Invalid URL scheme regex")
    });

    let url = raw.trim();
    if url.is_empty() || scheme.is_match(url) {
        url.to_string()
    } else if url.contains('@') {
        format!("mailto:{url}")
    } else {
        format!("http://{url}")
    }
}
