//! Remote collection descriptors.

use std::fmt;

/// Immutable descriptor of a remote collection: base path, id extraction,
/// wire codec and the empty-entity template.
///
/// Created once per entity type and shared (behind an `Arc`) by every
/// service and store dealing with that type. This is the only
/// configuration surface of the REST layer.
pub struct Resource<T, I, S> {
    base: String,
    id: fn(&T) -> I,
    serializer: S,
    empty: T,
}

impl<T, I, S> Resource<T, I, S>
where
    T: Clone,
    I: Default + Eq + fmt::Display,
{
    /// Creates a descriptor.
    ///
    /// `base` addresses the collection (`GET base` queries it, `POST base`
    /// creates into it); `id` extracts an entity's identity, where
    /// `I::default()` marks an entity that has not been persisted yet.
    pub fn new(base: impl Into<String>, id: fn(&T) -> I, serializer: S, empty: T) -> Self {
        let base = base.into();
        Resource {
            base: base.trim_end_matches('/').to_owned(),
            id,
            serializer,
            empty,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// A fresh copy of the empty-entity template.
    pub fn empty(&self) -> T {
        self.empty.clone()
    }

    pub fn id_of(&self, entity: &T) -> I {
        (self.id)(entity)
    }

    /// Whether the entity has no server-assigned id yet.
    pub fn is_transient(&self, entity: &T) -> bool {
        self.id_of(entity) == I::default()
    }

    /// URL addressing a single entity: `{base}/{id}`.
    pub fn entity_url(&self, id: &I) -> String {
        format!("{}/{}", self.base, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Person {
        id: String,
    }

    #[test]
    fn transient_detection_and_urls() {
        let resource = Resource::new(
            "http://api.test/person/",
            |p: &Person| p.id.clone(),
            (),
            Person { id: "".to_owned() },
        );
        assert_eq!(resource.base(), "http://api.test/person");
        assert!(resource.is_transient(&Person { id: "".to_owned() }));
        assert!(!resource.is_transient(&Person { id: "42".to_owned() }));
        assert_eq!(
            resource.entity_url(&"42".to_owned()),
            "http://api.test/person/42"
        );
    }
}
