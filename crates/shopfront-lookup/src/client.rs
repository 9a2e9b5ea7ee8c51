//! ViaCEP client with timeout and retry.

use async_trait::async_trait;
use shopfront_commerce::checkout::{
    AddressFields, CheckoutSession, LookupOutcome, LookupStatus, PostalCode,
};

use crate::error::LookupError;
use crate::response::ViaCepResponse;
use crate::retry::RetryPolicy;
use crate::timeout::TimeoutConfig;

/// Public ViaCEP endpoint.
pub const VIACEP_BASE_URL: &str = "https://viacep.com.br";

/// Anything that can resolve a postal code to address fields.
///
/// Failures are folded into [`LookupOutcome::Failed`]; callers only need to
/// decide what to show.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(&self, postal_code: &PostalCode) -> LookupOutcome;
}

/// Policy combining timeout and retry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupPolicy {
    pub timeout: TimeoutConfig,
    pub retry: RetryPolicy,
}

impl LookupPolicy {
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }
}

/// HTTP client for the ViaCEP service.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
    policy: LookupPolicy,
}

impl ViaCepClient {
    /// Client for the public endpoint with default policy.
    pub fn new() -> Result<Self, LookupError> {
        Self::with_base_url(VIACEP_BASE_URL, LookupPolicy::default())
    }

    /// Client for a specific endpoint (mirrors, test servers).
    pub fn with_base_url(base_url: &str, policy: LookupPolicy) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .connect_timeout(policy.timeout.connect)
            .timeout(policy.timeout.total)
            .build()
            .map_err(|e| LookupError::Request(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            policy,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn policy(&self) -> &LookupPolicy {
        &self.policy
    }

    /// `{base}/ws/{digits}/json/`
    pub fn url_for(&self, postal_code: &PostalCode) -> String {
        format!("{}/ws/{}/json/", self.base_url, postal_code.digits())
    }

    /// Look up a postal code, retrying transient failures.
    ///
    /// Returns `Ok(None)` when the service reports the code as unknown.
    pub async fn fetch(&self, postal_code: &PostalCode) -> Result<Option<AddressFields>, LookupError> {
        let url = self.url_for(postal_code);
        let mut attempt = 0;

        loop {
            match self.fetch_once(&url).await {
                Ok(response) => return Ok(response.into_fields()),
                Err(error) if self.policy.retry.should_retry(&error, attempt) => {
                    let delay = self.policy.retry.backoff.delay_for_attempt(attempt);
                    tracing::debug!(%url, attempt, ?delay, %error, "retrying postal code lookup");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<ViaCepResponse, LookupError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    async fn lookup(&self, postal_code: &PostalCode) -> LookupOutcome {
        match self.fetch(postal_code).await {
            Ok(Some(fields)) => LookupOutcome::Found(fields),
            Ok(None) => LookupOutcome::NotFound,
            Err(error) => LookupOutcome::Failed(error.to_string()),
        }
    }
}

/// Feed postal-code input to a session and run the lookup it asks for.
///
/// Returns the session's status afterwards. Input with fewer than 8 digits
/// triggers no request.
pub async fn autofill<L>(session: &mut CheckoutSession, lookup: &L, raw_input: &str) -> LookupStatus
where
    L: AddressLookup + ?Sized,
{
    if let Some(ticket) = session.set_postal_input(raw_input) {
        let outcome = lookup.lookup(ticket.postal_code()).await;
        session.apply_lookup(&ticket, outcome);
    }
    session.status()
}
