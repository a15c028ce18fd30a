//! ADP endpoint client

use std::sync::Arc;

use hrsync_common::{MinIntervalLimiter, TokenManager};
use hrsync_core::PagedCollectionFetcher;
use hrsync_domain::wire::{
    LaborChargeCodeDto, StateTaxWithholdingDto, TimeCardDto, UsStateTaxProfilesResponseDto,
    UsTaxProfileDto, UsTaxProfilesResponseDto, WorkerDto,
};
use hrsync_domain::{Config, Result};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::pages::CollectionPages;
use crate::api::{ClientCredentialsSource, RateLimitedGateway};
use crate::http::{decode_identity_pem, HttpClient};

pub(crate) const WORKERS_PATH: &str = "hr/v2/workers";
pub(crate) const WORKERS_KEY: &str = "workers";
pub(crate) const TIME_CARDS_PATH: &str = "time/v2/time-cards";
pub(crate) const TIME_CARDS_KEY: &str = "timeCards";
pub(crate) const LABOR_CHARGE_CODES_PATH: &str = "payroll/v1/labor-charge-codes";
pub(crate) const LABOR_CHARGE_CODES_KEY: &str = "laborChargeCodes";

/// Typed access to the ADP endpoints used by the readers.
pub struct AdpClient {
    gateway: Arc<RateLimitedGateway>,
    page_size: u32,
}

impl AdpClient {
    pub fn new(gateway: Arc<RateLimitedGateway>, page_size: u32) -> Self {
        Self { gateway, page_size }
    }

    /// Wire the full stack for one upstream account.
    ///
    /// The token source and the resource gateway share one TLS identity; the
    /// gateway gets a fresh limiter. Use [`AdpClient::with_limiter`] when
    /// several clients draw on the same quota.
    ///
    /// # Errors
    /// `HrSyncError::Config` for invalid configuration or an unusable client
    /// certificate.
    pub fn from_config(config: &Config) -> Result<Self> {
        let limiter = Arc::new(MinIntervalLimiter::new(config.api.min_request_interval()));
        Self::with_limiter(config, limiter)
    }

    /// [`from_config`](Self::from_config) with an existing limiter.
    ///
    /// # Errors
    /// Same as [`from_config`](Self::from_config).
    pub fn with_limiter(config: &Config, limiter: Arc<MinIntervalLimiter>) -> Result<Self> {
        config.validate()?;

        let mut builder = HttpClient::builder().timeout(config.api.timeout());
        if let Some(agent) = &config.api.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        if let Some(pem) = decode_identity_pem(&config.auth)? {
            builder = builder.identity_pem(pem);
        }
        let http = builder.build()?;

        let tokens = TokenManager::new(ClientCredentialsSource::new(http.clone(), &config.auth));
        let gateway =
            RateLimitedGateway::new(http, &config.api.base_url, limiter, Arc::new(tokens))?;

        info!(
            base_url = %gateway.base_url(),
            environment = ?config.auth.environment,
            client_certificate = config.auth.has_client_certificate(),
            "ADP client configured"
        );
        Ok(Self::new(Arc::new(gateway), config.api.effective_page_size()))
    }

    pub fn gateway(&self) -> &Arc<RateLimitedGateway> {
        &self.gateway
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetcher sized for this client's page size.
    pub fn fetcher(&self) -> PagedCollectionFetcher {
        PagedCollectionFetcher::new(self.page_size)
    }

    /// Check credentials and reachability with a one-record worker request.
    ///
    /// # Errors
    /// The typed failure of that request.
    #[instrument(skip_all)]
    pub async fn test_connection(&self, cancel: &CancellationToken) -> Result<()> {
        let _: Option<serde_json::Value> =
            self.gateway.get_optional(WORKERS_PATH, &[("$top", "1".to_string())], cancel).await?;
        info!("connection test succeeded");
        Ok(())
    }

    pub fn workers(&self, cancel: CancellationToken) -> CollectionPages<WorkerDto> {
        CollectionPages::new(Arc::clone(&self.gateway), WORKERS_PATH, WORKERS_KEY, cancel)
    }

    pub fn time_cards(&self, cancel: CancellationToken) -> CollectionPages<TimeCardDto> {
        CollectionPages::new(Arc::clone(&self.gateway), TIME_CARDS_PATH, TIME_CARDS_KEY, cancel)
    }

    pub fn labor_charge_codes(
        &self,
        cancel: CancellationToken,
    ) -> CollectionPages<LaborChargeCodeDto> {
        CollectionPages::new(
            Arc::clone(&self.gateway),
            LABOR_CHARGE_CODES_PATH,
            LABOR_CHARGE_CODES_KEY,
            cancel,
        )
    }

    /// One worker's US tax profile; `None` when the upstream has none.
    ///
    /// # Errors
    /// Gateway failures.
    pub async fn us_tax_profile(
        &self,
        associate_oid: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<UsTaxProfileDto>> {
        let path =
            format!("payroll/v1/workers/{}/us-tax-profiles", urlencoding::encode(associate_oid));
        let response: Option<UsTaxProfilesResponseDto> =
            self.gateway.get_optional(&path, &[], cancel).await?;
        Ok(response.and_then(|body| body.us_tax_profiles))
    }

    /// State withholdings recorded under one federal profile.
    ///
    /// # Errors
    /// Gateway failures.
    pub async fn state_tax_withholdings(
        &self,
        associate_oid: &str,
        profile_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<StateTaxWithholdingDto>> {
        let path = format!(
            "payroll/v1/workers/{}/us-tax-profiles/{}/state",
            urlencoding::encode(associate_oid),
            urlencoding::encode(profile_id)
        );
        let response: Option<UsStateTaxProfilesResponseDto> =
            self.gateway.get_optional(&path, &[], cancel).await?;

        Ok(response
            .map(|body| body.state_tax_withholdings)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|wrapper| wrapper.state_tax_withholding)
            .collect())
    }
}
