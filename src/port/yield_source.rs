//! Yield source port.

use async_trait::async_trait;

use crate::domain::{AssetId, SourceId, YieldSourceMetrics};
use crate::error::Result;

/// A venue capital can be routed to.
#[async_trait]
pub trait YieldSource: Send + Sync {
    /// Stable identifier of this source.
    fn id(&self) -> &SourceId;

    /// Live metrics for routing `asset`.
    async fn metrics(&self, asset: &AssetId) -> Result<YieldSourceMetrics>;
}
