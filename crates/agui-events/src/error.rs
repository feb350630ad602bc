use thiserror::Error;

/// Errors surfaced by `EventGenerator::generate`.
///
/// Template-not-found is the one hard failure in the mechanism: the call
/// aborts and no partial event is returned. Everything else (missing
/// variables, unknown placeholders) is a non-failure by contract — the
/// placeholder stays verbatim in the output.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("template not found: {id}")]
    TemplateNotFound { id: String },
}

/// An upstream data provider call failed. Specialized flows catch this and
/// turn it into a `display-error` event rather than propagating it.
#[derive(Debug, Error)]
#[error("upstream provider error: {0}")]
pub struct ProviderError(pub String);

/// Delivery to a client failed. The generated event still counts as
/// produced; flows record the failure in their report instead of aborting.
#[derive(Debug, Error)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(pub String);
