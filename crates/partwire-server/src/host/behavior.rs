use partwire_domain::error::Result;

use super::description::ServiceDescription;
use super::dispatcher::ChannelDispatcher;

/// Extension applied to a host's dispatchers when the host opens
pub trait ServiceBehavior: Send + Sync {
    /// Check the description before anything is applied
    fn validate(&self, _description: &ServiceDescription) -> Result<()> {
        Ok(())
    }

    /// Customise the runtime of the host's endpoints
    fn apply_dispatch_behavior(
        &self,
        description: &ServiceDescription,
        channel_dispatchers: &mut [ChannelDispatcher],
    );
}
