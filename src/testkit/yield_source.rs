//! Yield sources with canned behavior.

use async_trait::async_trait;

use crate::domain::{AssetId, SourceId, YieldSourceMetrics};
use crate::error::{Error, Result};
use crate::port::YieldSource;

/// Always reports the same metrics, whatever the asset.
pub struct StaticYieldSource {
    metrics: YieldSourceMetrics,
}

impl StaticYieldSource {
    pub fn new(metrics: YieldSourceMetrics) -> Self {
        Self { metrics }
    }
}

#[async_trait]
impl YieldSource for StaticYieldSource {
    fn id(&self) -> &SourceId {
        &self.metrics.source_id
    }

    async fn metrics(&self, _asset: &AssetId) -> Result<YieldSourceMetrics> {
        Ok(self.metrics.clone())
    }
}

/// Fails every metrics request with `AccountParseError`.
pub struct FailingYieldSource {
    id: SourceId,
}

impl FailingYieldSource {
    pub fn new(id: &str) -> Self {
        Self {
            id: SourceId::from(id),
        }
    }
}

#[async_trait]
impl YieldSource for FailingYieldSource {
    fn id(&self) -> &SourceId {
        &self.id
    }

    async fn metrics(&self, asset: &AssetId) -> Result<YieldSourceMetrics> {
        Err(Error::account_parse(format!(
            "source {} returned unreadable metrics for {asset}",
            self.id
        )))
    }
}
