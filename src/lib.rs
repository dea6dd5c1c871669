//! Verify US postal addresses against the Smarty US Street Address API.

pub mod address;
pub mod config;
pub mod form;
pub mod outcome;
pub mod smarty;

pub use address::{AddressInput, NormalizedAddress};
pub use config::Credentials;
pub use outcome::{Advisory, Rejection, ValidationOutcome};
pub use smarty::{interpret, SmartyClient, VerifyError};
