//! Entities and the id index that owns them.

use std::collections::{BTreeMap, HashMap};

/// A deduplicated, row-derived record keyed by its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: String,
    pub uri: String,
    pub label: String,
    pub type_uri: String,
    /// Raw trimmed cell values per column index, in row order.
    pub properties: BTreeMap<usize, Vec<String>>,
}

impl Entity {
    pub fn new(id: String, uri: String, label: String, type_uri: String) -> Self {
        Self {
            id,
            uri,
            label,
            type_uri,
            properties: BTreeMap::new(),
        }
    }

    /// Append a raw value to the column's list, creating the list if needed.
    pub fn push_value(&mut self, column: usize, raw: String) {
        self.properties.entry(column).or_default().push(raw);
    }

    /// Raw values accumulated for `column`.
    pub fn values(&self, column: usize) -> &[String] {
        self.properties.get(&column).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Id → entity index. Entities are kept in first-sighting order.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    entities: Vec<Entity>,
    by_id: HashMap<String, usize>,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.by_id.get(id).map(|&i| &self.entities[i])
    }

    /// Return the entity for `id`, creating it with `make` on first sighting.
    ///
    /// Later calls for the same id never replace the stored uri, label or type.
    pub fn get_or_insert_with(&mut self, id: &str, make: impl FnOnce() -> Entity) -> &mut Entity {
        let slot = match self.by_id.get(id) {
            Some(&i) => i,
            None => {
                let i = self.entities.len();
                self.entities.push(make());
                self.by_id.insert(id.to_string(), i);
                i
            }
        };
        &mut self.entities[slot]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: &str) -> Entity {
        Entity::new(id.into(), format!("urn:t:{id}"), id.into(), "urn:t:Item".into())
    }

    #[test]
    fn first_sighting_wins() {
        let mut index = EntityIndex::new();
        index.get_or_insert_with("a", || entity("a"));
        index.get_or_insert_with("a", || {
            Entity::new("a".into(), "urn:other".into(), "Other".into(), "urn:t:X".into())
        });
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("a").unwrap().uri, "urn:t:a");
    }

    #[test]
    fn values_accumulate_in_order() {
        let mut index = EntityIndex::new();
        index.get_or_insert_with("a", || entity("a")).push_value(3, "x".into());
        index.get_or_insert_with("a", || entity("a")).push_value(3, "y".into());
        index.get_or_insert_with("a", || entity("a")).push_value(1, "z".into());
        let a = index.get("a").unwrap();
        assert_eq!(a.values(3), ["x", "y"]);
        assert_eq!(a.values(1), ["z"]);
        assert!(a.values(7).is_empty());
    }

    #[test]
    fn iteration_follows_first_sighting() {
        let mut index = EntityIndex::new();
        for id in ["b", "a", "b", "c"] {
            index.get_or_insert_with(id, || entity(id));
        }
        let ids: Vec<_> = index.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }
}
