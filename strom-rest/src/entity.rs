//! Single-entity synchronization.

use std::fmt;
use std::sync::Arc;

use crate::{
    error::ServiceError,
    http::{check_status, HttpExchange, Method, WireRequest},
    resource::Resource,
    serializer::Serializer,
};

/// Synchronizes a single-entity store with a remote endpoint.
///
/// Each operation is one network round-trip with no retry. Operations are
/// not serialized against each other here; dispatch them through the
/// store's action queue when ordering matters.
pub struct RestEntityService<T, I, S> {
    resource: Arc<Resource<T, I, S>>,
    http: Arc<dyn HttpExchange>,
}

impl<T, I, S> Clone for RestEntityService<T, I, S> {
    fn clone(&self) -> Self {
        RestEntityService {
            resource: self.resource.clone(),
            http: self.http.clone(),
        }
    }
}

impl<T, I, S> RestEntityService<T, I, S>
where
    T: Clone + Send + Sync,
    I: Default + Eq + fmt::Display + Send + Sync,
    S: Serializer<T>,
{
    pub fn new(resource: Arc<Resource<T, I, S>>, http: Arc<dyn HttpExchange>) -> Self {
        RestEntityService { resource, http }
    }

    /// Fetches the entity with the given id.
    ///
    /// The current store value is accepted (and ignored) so the signature
    /// slots directly into an async store handler; on failure the caller's
    /// store keeps that value.
    pub async fn load(&self, _current: T, id: &I) -> Result<T, ServiceError> {
        let url = self.resource.entity_url(id);
        let response = self
            .http
            .send(WireRequest {
                method: Method::Get,
                url: url.clone(),
                body: None,
            })
            .await?;
        let body = check_status(response, &url)?;
        self.resource.serializer().read(&body)
    }

    /// Creates the entity when its id is still the default ("transient"),
    /// otherwise updates it in place.
    ///
    /// Returns the entity as stored server-side: the create response body
    /// carries the server-assigned id, and an update response may carry
    /// normalized fields. An empty update response means the server stored
    /// the entity as sent.
    pub async fn save_or_update(&self, entity: T) -> Result<T, ServiceError> {
        let body = self.resource.serializer().write(&entity)?;
        let (method, url) = if self.resource.is_transient(&entity) {
            (Method::Post, self.resource.base().to_owned())
        } else {
            let id = self.resource.id_of(&entity);
            (Method::Put, self.resource.entity_url(&id))
        };

        let response = self
            .http
            .send(WireRequest {
                method,
                url: url.clone(),
                body: Some(body),
            })
            .await?;
        let body = check_status(response, &url)?;
        if body.trim().is_empty() {
            Ok(entity)
        } else {
            self.resource.serializer().read(&body)
        }
    }

    /// Removes the entity by id and returns the empty-entity template,
    /// which the caller typically publishes to mean "no entity selected".
    pub async fn delete(&self, entity: T) -> Result<T, ServiceError> {
        let id = self.resource.id_of(&entity);
        let url = self.resource.entity_url(&id);
        let response = self
            .http
            .send(WireRequest {
                method: Method::Delete,
                url: url.clone(),
                body: None,
            })
            .await?;
        check_status(response, &url)?;
        Ok(self.resource.empty())
    }
}
