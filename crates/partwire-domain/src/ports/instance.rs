use crate::error::Result;
use crate::ports::service::ServiceInstance;

/// Supplies the service object for each dispatched call.
///
/// The host calls [`get_instance`](Self::get_instance) before invoking an
/// operation and always hands the instance back through
/// [`release_instance`](Self::release_instance) afterwards, whether the
/// operation succeeded or not.
pub trait InstanceProvider: Send + Sync {
    fn get_instance(&self) -> Result<ServiceInstance>;

    /// Must not fail
    fn release_instance(&self, instance: ServiceInstance);
}
