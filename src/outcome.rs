use std::fmt;
use crate::address::NormalizedAddress;

/// address was resolved, but Smarty flagged something the user should check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    MissingSecondary,
    PrimaryNumberInvalid,
    ClosestMatch,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Advisory::MissingSecondary => "Missing secondary unit (apartment/suite)",
            Advisory::PrimaryNumberInvalid => "Primary number missing/invalid",
            Advisory::ClosestMatch => "Address not found in USPS DPV, suggested closest match",
        })
    }
}

/// no usable address came back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// non-200 status from the endpoint
    Http(u16),
    NotFound,
    InvalidAddress,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Http(status) => write!(f, "HTTP error {}", status),
            Rejection::NotFound => f.write_str("Address not found"),
            Rejection::InvalidAddress => f.write_str("Invalid address (DPV=N)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid(NormalizedAddress),
    Advisory {
        address: NormalizedAddress,
        advisory: Advisory,
    },
    Rejected(Rejection),
}

impl ValidationOutcome {
    pub fn address(&self) -> Option<&NormalizedAddress> {
        match self {
            ValidationOutcome::Valid(address) | ValidationOutcome::Advisory { address, .. } => Some(address),
            ValidationOutcome::Rejected(_) => None,
        }
    }

    /// the advisory or error text, `None` for a fully valid address
    pub fn message(&self) -> Option<String> {
        match self {
            ValidationOutcome::Valid(_) => None,
            ValidationOutcome::Advisory { advisory, .. } => Some(advisory.to_string()),
            ValidationOutcome::Rejected(rejection) => Some(rejection.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejection_messages() {
        assert_eq!(Rejection::Http(500).to_string(), "HTTP error 500");
        assert_eq!(Rejection::NotFound.to_string(), "Address not found");
        assert_eq!(Rejection::InvalidAddress.to_string(), "Invalid address (DPV=N)");
    }

    #[test]
    fn accessors_follow_variant() {
        let valid = ValidationOutcome::Valid(NormalizedAddress::default());
        assert!(valid.is_valid());
        assert!(valid.address().is_some());
        assert_eq!(valid.message(), None);

        let advisory = ValidationOutcome::Advisory {
            address: NormalizedAddress::default(),
            advisory: Advisory::MissingSecondary,
        };
        assert!(!advisory.is_valid());
        assert!(advisory.address().is_some());
        assert_eq!(advisory.message().as_deref(), Some("Missing secondary unit (apartment/suite)"));

        let rejected = ValidationOutcome::Rejected(Rejection::NotFound);
        assert!(rejected.address().is_none());
        assert_eq!(rejected.message().as_deref(), Some("Address not found"));
    }
}
