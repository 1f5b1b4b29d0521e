use std::sync::Arc;

use klr_keylet::{KeyDeriver, StandardKeyDeriver};

use crate::outcome::ValidationOutcome;
use crate::request::LocatorRequest;
use crate::shape::ShapeKind;
use crate::validate::{validate, Target};

/// Classify `request`, validate its fields, and resolve its key.
///
/// Pure: the result depends only on the request and the deriver. Every
/// failure is a [`ValidationOutcome::Rejected`].
pub fn classify(request: &LocatorRequest, deriver: &dyn KeyDeriver) -> ValidationOutcome {
    let shape = ShapeKind::detect(request);

    let outcome = match validate(shape, request) {
        Ok(Target::Key(key)) => ValidationOutcome::Resolved {
            shape,
            key,
            expected: shape.expected_type(),
        },
        Ok(Target::Derive(keylet_request)) => ValidationOutcome::Resolved {
            shape,
            key: deriver.derive(&keylet_request).key,
            expected: shape.expected_type(),
        },
        Err(error) => ValidationOutcome::Rejected { shape, error },
    };

    match &outcome {
        ValidationOutcome::Resolved { key, expected, .. } => {
            tracing::debug!(%shape, key = %key.short_hex(), %expected, "locator resolved");
        }
        ValidationOutcome::Rejected { error, .. } => {
            tracing::debug!(%shape, error = error.wire_name(), "locator rejected");
        }
    }

    outcome
}

/// A classifier bound to one key-derivation capability.
#[derive(Clone)]
pub struct Locator {
    deriver: Arc<dyn KeyDeriver>,
}

impl Locator {
    pub fn new(deriver: Arc<dyn KeyDeriver>) -> Self {
        Self { deriver }
    }

    /// Locator using the ledger's standard key derivation.
    pub fn standard() -> Self {
        Self::new(Arc::new(StandardKeyDeriver))
    }

    pub fn classify(&self, request: &LocatorRequest) -> ValidationOutcome {
        classify(request, self.deriver.as_ref())
    }

    pub fn deriver(&self) -> &dyn KeyDeriver {
        self.deriver.as_ref()
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Locator").finish_non_exhaustive()
    }
}
