use thiserror::Error;

/// Closed error taxonomy for the resolution/fetch/aggregation pipeline.
///
/// Callers match on the kind; the display text is the single
/// human-readable message relayed to users verbatim.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unrecognized input: {0}")]
    Validation(String),

    #[error("could not resolve an account id: {0}")]
    Resolution(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected upstream response: {0}")]
    UpstreamFormat(String),

    #[error("cache error: {0}")]
    Cache(#[from] stashval_cache::CacheError),
}
