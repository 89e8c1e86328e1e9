//! Wire codecs.

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ServiceError;

/// Bidirectional codec between a domain value and its wire text.
///
/// Implementations must round-trip: `read(write(x)) == x` for every valid
/// `x`, and list variants preserve order.
pub trait Serializer<T>: Send + Sync {
    fn write(&self, item: &T) -> Result<String, ServiceError>;
    fn read(&self, text: &str) -> Result<T, ServiceError>;
    fn write_list(&self, items: &[T]) -> Result<String, ServiceError>;
    fn read_list(&self, text: &str) -> Result<Vec<T>, ServiceError>;
}

/// JSON codec for any serde-enabled type.
///
/// Decoding is a strongly-typed deserialization; a schema mismatch fails
/// with [`ServiceError::Decode`] rather than producing wrong-typed values.
pub struct JsonSerializer<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonSerializer<T> {
    pub fn new() -> JsonSerializer<T> {
        JsonSerializer {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonSerializer<T> {
    fn default() -> Self {
        JsonSerializer::new()
    }
}

impl<T> Clone for JsonSerializer<T> {
    fn clone(&self) -> Self {
        JsonSerializer::new()
    }
}

impl<T> Serializer<T> for JsonSerializer<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn write(&self, item: &T) -> Result<String, ServiceError> {
        serde_json::to_string(item).map_err(|e| ServiceError::Decode(e.to_string()))
    }

    fn read(&self, text: &str) -> Result<T, ServiceError> {
        serde_json::from_str(text).map_err(|e| ServiceError::Decode(e.to_string()))
    }

    fn write_list(&self, items: &[T]) -> Result<String, ServiceError> {
        serde_json::to_string(items).map_err(|e| ServiceError::Decode(e.to_string()))
    }

    fn read_list(&self, text: &str) -> Result<Vec<T>, ServiceError> {
        serde_json::from_str(text).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}
