use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use thiserror::Error;
use crate::address::{AddressInput, NormalizedAddress};
use crate::config::Credentials;
use crate::outcome::{Advisory, Rejection, ValidationOutcome};
use crate::smarty::model::{Candidate, DpvMatchCode, StreetQuery};

pub mod model;

const STREET_ADDRESS_URL: &str = "https://us-street.api.smarty.com/street-address";
const UA: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Failures that never reached the DPV mapping.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to Smarty failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

// the request URL carries the auth token in its query string
impl From<reqwest::Error> for VerifyError {
    fn from(e: reqwest::Error) -> Self {
        VerifyError::Transport(e.without_url())
    }
}

/// HTTP client for the Smarty US Street Address API
///
/// Holds no per-lookup state, one instance can serve any number of lookups.
pub struct SmartyClient {
    client: Client,
    endpoint: String,
}

impl SmartyClient {
    pub fn new() -> Result<Self, VerifyError> {
        Self::with_endpoint(STREET_ADDRESS_URL)
    }

    /// * `endpoint` - full URL of the street-address resource
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, VerifyError> {
        Ok(
            Self {
                client: Client::builder()
                    .default_headers(Self::default_headers())
                    .build()
                    .map_err(VerifyError::Client)?,
                endpoint: endpoint.into(),
            }
        )
    }

    fn default_headers() -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(USER_AGENT, HeaderValue::from_static(UA));
        map
    }

    /// Send one lookup and map the answer to an outcome.
    ///
    /// Input is forwarded untouched, Smarty decides what is malformed.
    #[tracing::instrument(skip_all, fields(street = %address.street, zipcode = %address.zipcode))]
    pub async fn verify(&self, address: &AddressInput, credentials: &Credentials) -> Result<ValidationOutcome, VerifyError> {
        info!(
            "inquiring address [{}, {}, {} {}]",
            address.street, address.city, address.state, address.zipcode
        );
        let response = self.client
            .get(&self.endpoint)
            .query(&StreetQuery::new(address, credentials))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let outcome = interpret(status, &body)?;
        debug!("address [{}] resolved to {:?}", address.street, outcome);
        Ok(outcome)
    }
}

/// map a raw Smarty response to an outcome
///
/// Only the first candidate is looked at.
pub fn interpret(status: StatusCode, body: &str) -> Result<ValidationOutcome, VerifyError> {
    if status != StatusCode::OK {
        warn!("Smarty answered with status [{}]", status);
        return Ok(ValidationOutcome::Rejected(Rejection::Http(status.as_u16())));
    }
    if body.trim().is_empty() {
        return Ok(ValidationOutcome::Rejected(Rejection::NotFound));
    }

    let candidates: Vec<Candidate> = serde_json::from_str(body)?;
    let Some(candidate) = candidates.into_iter().next() else {
        return Ok(ValidationOutcome::Rejected(Rejection::NotFound));
    };

    let dpv = candidate.analysis.dpv_match_code.as_deref().map(DpvMatchCode::try_from);
    let address = NormalizedAddress::from(candidate);
    let advisory = match dpv {
        Some(Ok(DpvMatchCode::Y)) => return Ok(ValidationOutcome::Valid(address)),
        Some(Ok(DpvMatchCode::N)) => return Ok(ValidationOutcome::Rejected(Rejection::InvalidAddress)),
        Some(Ok(DpvMatchCode::S)) => Advisory::MissingSecondary,
        Some(Ok(DpvMatchCode::D)) => Advisory::PrimaryNumberInvalid,
        Some(Err(code)) => {
            debug!("unrecognized DPV match code [{}]", code);
            Advisory::ClosestMatch
        }
        None => Advisory::ClosestMatch,
    };
    Ok(ValidationOutcome::Advisory { address, advisory })
}
