use serde::{Deserialize, Serialize};
use crate::address::{AddressInput, NormalizedAddress};
use crate::config::Credentials;

/// the match strategy sent with every lookup, Smarty returns a best guess for
/// addresses it cannot validate instead of an empty array
pub const MATCH_STRATEGY: &str = "invalid";

/// query string of a single US Street lookup
#[derive(Debug, Serialize)]
pub struct StreetQuery<'a> {
    #[serde(rename = "auth-id")]
    pub auth_id: &'a str,
    #[serde(rename = "auth-token")]
    pub auth_token: &'a str,
    pub street: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zipcode: &'a str,
    #[serde(rename = "match")]
    pub match_strategy: &'a str,
}

impl<'a> StreetQuery<'a> {
    pub fn new(address: &'a AddressInput, credentials: &'a Credentials) -> Self {
        Self {
            auth_id: &credentials.auth_id,
            auth_token: credentials.auth_token(),
            street: &address.street,
            city: &address.city,
            state: &address.state,
            zipcode: &address.zipcode,
            match_strategy: MATCH_STRATEGY,
        }
    }
}

/// one element of the response array
#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub components: Components,
    #[serde(default)]
    pub analysis: Analysis,
}

#[derive(Debug, Default, Deserialize)]
pub struct Components {
    pub primary_number: Option<String>,
    pub street_name: Option<String>,
    pub street_suffix: Option<String>,
    pub city_name: Option<String>,
    pub state_abbreviation: Option<String>,
    pub zipcode: Option<String>,
    pub plus4_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Analysis {
    pub dpv_match_code: Option<String>,
}

impl From<Candidate> for NormalizedAddress {
    fn from(candidate: Candidate) -> Self {
        let Candidate { components, analysis } = candidate;
        Self {
            primary_number: components.primary_number,
            street_name: components.street_name,
            street_suffix: components.street_suffix,
            city: components.city_name,
            state: components.state_abbreviation,
            zipcode: components.zipcode,
            plus4: components.plus4_code,
            dpv_code: analysis.dpv_match_code,
        }
    }
}

/// USPS delivery point validation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpvMatchCode {
    /// confirmed for the primary and secondary numbers
    Y,
    /// confirmed by dropping a secondary number the input should not carry,
    /// or the secondary number is missing
    S,
    /// confirmed for the primary number only, the secondary number is missing
    D,
    /// not confirmed
    N,
}

impl TryFrom<&str> for DpvMatchCode {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Y" => Ok(DpvMatchCode::Y),
            "S" => Ok(DpvMatchCode::S),
            "D" => Ok(DpvMatchCode::D),
            "N" => Ok(DpvMatchCode::N),
            _ => Err(value.to_string()),
        }
    }
}
