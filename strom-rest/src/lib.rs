//! REST synchronization for reactive entity and list stores.
//!
//! A [`Resource`] describes a remote collection once per entity type: its
//! base path, how to extract an id, the wire codec and the empty-entity
//! template. [`RestEntityService`] keeps a single-entity store in sync with
//! the collection (load, create/update, delete); [`RestQueryService`] does
//! the same for a list store (bulk query, delete-by-id).
//!
//! Services perform exactly one network round-trip per operation and never
//! retry. They do not serialize operations against each other either; if
//! ordering matters, dispatch them through a store's action queue, which
//! applies results in dispatch order.

pub mod entity;
pub mod error;
pub mod http;
pub mod query;
pub mod resource;
pub mod serializer;

pub use entity::RestEntityService;
pub use error::ServiceError;
pub use http::{HttpExchange, Method, RestClient, WireRequest, WireResponse};
pub use query::{QueryParams, RestQueryService};
pub use resource::Resource;
pub use serializer::{JsonSerializer, Serializer};
