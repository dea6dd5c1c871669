use std::fmt;

/// Smarty secret key pair
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub auth_id: String,
    auth_token: String,
}

impl Credentials {
    pub fn new(auth_id: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            auth_id: auth_id.into(),
            auth_token: auth_token.into(),
        }
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn set_auth_token(&mut self, auth_token: impl Into<String>) {
        self.auth_token = auth_token.into();
    }

    /// load the first credential pair from the environment
    ///
    /// CREDENTIALS=`ID1`=`SECRET1`[,`ID2`=`SECRET2`]*
    pub fn from_env() -> Option<Self> {
        std::env::var("CREDENTIALS")
            .ok()
            .and_then(|credentials| Self::first_of(&credentials))
    }

    fn first_of(credentials: &str) -> Option<Self> {
        Self::parse_list(credentials).into_iter().next()
    }

    fn parse_list(credentials: &str) -> Vec<Self> {
        credentials.split(',')
            .filter_map(|pair| {
                let (id, secret) = pair.trim().split_once('=')?;
                if id.is_empty() || secret.is_empty() {
                    log::warn!("skipping malformed credential pair for id [{}]", id);
                    return None;
                }
                Some(Self::new(id, secret))
            })
            .collect()
    }
}

// keep the token out of logs and panics
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_id", &self.auth_id)
            .field("auth_token", &"<REDACTED>")
            .finish()
    }
}
