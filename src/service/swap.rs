//! Oracle-priced swap quoting and execution.

use std::sync::Arc;

use tracing::{debug, info};

use super::oracle::OracleAdapter;
use crate::domain::quote::quote;
use crate::domain::{ensure_executable, AssetId, BasisPoints, QuoteRequest, ScaledAmount, SwapQuote};
use crate::error::{Error, Result};
use crate::port::{TransactionSignature, TransactionSubmitter};

/// Pricing defaults applied when a request leaves a bps value unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapConfig {
    pub default_fee_bps: BasisPoints,
    pub default_spread_bps: BasisPoints,
    pub default_slippage_bps: BasisPoints,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            default_fee_bps: 30,
            default_spread_bps: 10,
            default_slippage_bps: 50,
        }
    }
}

/// A quote request with optional per-call overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteParams {
    pub from: AssetId,
    pub to: AssetId,
    pub amount_in: ScaledAmount,
    pub slippage_bps: Option<i64>,
    pub fee_bps: Option<i64>,
    pub spread_bps: Option<i64>,
}

impl QuoteParams {
    pub fn new(from: impl Into<AssetId>, to: impl Into<AssetId>, amount_in: ScaledAmount) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount_in,
            slippage_bps: None,
            fee_bps: None,
            spread_bps: None,
        }
    }
}

/// Quotes swaps from validated oracle prices and hands accepted quotes to a
/// submitter.
pub struct SwapService {
    oracle: Arc<OracleAdapter>,
    config: SwapConfig,
    submitter: Option<Arc<dyn TransactionSubmitter>>,
}

impl SwapService {
    pub fn new(oracle: Arc<OracleAdapter>, config: SwapConfig) -> Self {
        Self {
            oracle,
            config,
            submitter: None,
        }
    }

    /// Enable [`SwapService::execute`].
    #[must_use]
    pub fn with_submitter(mut self, submitter: Arc<dyn TransactionSubmitter>) -> Self {
        self.submitter = Some(submitter);
        self
    }

    /// Quote a swap at the current validated cross-rate.
    pub async fn quote(&self, params: &QuoteParams) -> Result<SwapQuote> {
        let request = QuoteRequest {
            from_asset: params.from.clone(),
            to_asset: params.to.clone(),
            amount_in: params.amount_in,
            slippage_bps: params
                .slippage_bps
                .unwrap_or(i64::from(self.config.default_slippage_bps)),
            fee_bps: params.fee_bps.unwrap_or(i64::from(self.config.default_fee_bps)),
            spread_bps: params
                .spread_bps
                .unwrap_or(i64::from(self.config.default_spread_bps)),
        };

        request.validate()?;
        let rate = self.oracle.cross_rate(&params.from, &params.to).await?;
        let quote = quote(&request, &rate)?;

        debug!(
            from = %quote.from_asset,
            to = %quote.to_asset,
            amount_in = %quote.in_amount,
            out = %quote.out_amount,
            min_out = %quote.min_out_amount,
            "Computed swap quote"
        );
        Ok(quote)
    }

    /// Same as [`SwapService::quote`]; never submits anything.
    pub async fn simulate(&self, params: &QuoteParams) -> Result<SwapQuote> {
        self.quote(params).await
    }

    /// Quote with every bps value taken from [`SwapConfig`].
    pub async fn quote_with_defaults(
        &self,
        from: &AssetId,
        to: &AssetId,
        amount_in: ScaledAmount,
    ) -> Result<SwapQuote> {
        self.quote(&QuoteParams::new(from.clone(), to.clone(), amount_in))
            .await
    }

    /// Re-check and submit a quote.
    ///
    /// # Errors
    ///
    /// - `UnauthorizedAuthority` when no submitter is configured.
    /// - `InvalidSlippage` when the quote's minimum output exceeds its output.
    /// - Any submitter failure.
    pub async fn execute(&self, quote: &SwapQuote) -> Result<TransactionSignature> {
        let submitter = self
            .submitter
            .as_ref()
            .ok_or_else(|| Error::unauthorized("swap execution requires a transaction submitter"))?;

        ensure_executable(quote)?;

        let signature = submitter.submit_swap(quote).await?;
        info!(
            from = %quote.from_asset,
            to = %quote.to_asset,
            amount_in = %quote.in_amount,
            min_out = %quote.min_out_amount,
            signature = %signature,
            "Swap submitted"
        );
        Ok(signature)
    }
}
