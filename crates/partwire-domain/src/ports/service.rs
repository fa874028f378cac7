use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::value_objects::TypeInfo;

/// Capability of releasing resources when a call completes
pub trait Disposable: Send + Sync {
    fn dispose(&self);
}

/// An object that handles operations dispatched by a service host
pub trait ServiceObject: Send + Sync + 'static {
    /// Handle `operation` with JSON arguments
    fn invoke(&self, operation: &str, args: Value) -> Result<Value>;

    /// Disposal capability, if the object holds releasable resources
    fn as_disposable(&self) -> Option<&dyn Disposable> {
        None
    }
}

/// Decode operation arguments, mapping failures to an invalid-arguments fault
pub fn decode_arguments<A: DeserializeOwned>(operation: &str, args: Value) -> Result<A> {
    serde_json::from_value(args).map_err(|e| Error::invalid_arguments(operation, e.to_string()))
}

/// A resolved service object scoped to one call
#[derive(Clone)]
pub struct ServiceInstance {
    info: TypeInfo,
    object: Arc<dyn ServiceObject>,
}

impl ServiceInstance {
    pub fn new<T: ServiceObject>(object: Arc<T>) -> Self {
        Self {
            info: TypeInfo::of::<T>(),
            object,
        }
    }

    pub fn info(&self) -> TypeInfo {
        self.info
    }

    pub fn invoke(&self, operation: &str, args: Value) -> Result<Value> {
        self.object.invoke(operation, args)
    }

    /// Dispose the object if it is disposable; returns whether it was
    pub fn dispose(&self) -> bool {
        match self.object.as_disposable() {
            Some(disposable) => {
                disposable.dispose();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ServiceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceInstance")
            .field("type", &self.info.name())
            .finish_non_exhaustive()
    }
}
