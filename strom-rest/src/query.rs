//! List synchronization.

use std::fmt;
use std::sync::Arc;

use crate::{
    error::ServiceError,
    http::{check_status, HttpExchange, Method, WireRequest},
    resource::Resource,
    serializer::Serializer,
};

/// Server-side filter parameters, rendered into the query string.
///
/// The parameter type is otherwise opaque to the service. Keys and values
/// must already be URL-safe.
pub trait QueryParams: Send + Sync {
    fn to_pairs(&self) -> Vec<(String, String)>;
}

/// No filtering: query the whole collection.
impl QueryParams for () {
    fn to_pairs(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Synchronizes a list store with a remote endpoint.
pub struct RestQueryService<T, I, S> {
    resource: Arc<Resource<T, I, S>>,
    http: Arc<dyn HttpExchange>,
}

impl<T, I, S> Clone for RestQueryService<T, I, S> {
    fn clone(&self) -> Self {
        RestQueryService {
            resource: self.resource.clone(),
            http: self.http.clone(),
        }
    }
}

impl<T, I, S> RestQueryService<T, I, S>
where
    T: Clone + Send + Sync,
    I: Default + Eq + fmt::Display + Send + Sync,
    S: Serializer<T>,
{
    pub fn new(resource: Arc<Resource<T, I, S>>, http: Arc<dyn HttpExchange>) -> Self {
        RestQueryService { resource, http }
    }

    /// Fetches the collection, optionally filtered server-side, and returns
    /// it as the new list — a wholesale replacement, never a merge with
    /// `_current`. On failure the caller's list stays as it was.
    pub async fn query<Q: QueryParams>(
        &self,
        _current: Vec<T>,
        params: &Q,
    ) -> Result<Vec<T>, ServiceError> {
        let mut url = self.resource.base().to_owned();
        let pairs = params.to_pairs();
        for (i, (key, value)) in pairs.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }

        let response = self
            .http
            .send(WireRequest {
                method: Method::Get,
                url: url.clone(),
                body: None,
            })
            .await?;
        let body = check_status(response, &url)?;
        self.resource.serializer().read_list(&body)
    }

    /// Removes the entity by id, returning `current` with the matching
    /// element filtered out — the projection the caller would otherwise
    /// apply by hand after a successful delete.
    ///
    /// On failure (including a 404 for an id the server no longer knows)
    /// the list is returned unfiltered through the error path: the caller's
    /// store keeps its value and a fresh `query` restores consistency.
    pub async fn delete(&self, current: Vec<T>, id: &I) -> Result<Vec<T>, ServiceError> {
        let url = self.resource.entity_url(id);
        let response = self
            .http
            .send(WireRequest {
                method: Method::Delete,
                url: url.clone(),
                body: None,
            })
            .await?;
        check_status(response, &url)?;
        Ok(current
            .into_iter()
            .filter(|entity| self.resource.id_of(entity) != *id)
            .collect())
    }
}
