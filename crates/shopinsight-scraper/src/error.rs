use shopinsight_core::SiteUrlError;
use thiserror::Error;

/// Failures inside the scraper that are not plain transport problems.
///
/// Transport failures never become a `ScraperError`; the fetcher reports them
/// through [`crate::FetchedPage`] instead.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Terminal outcomes of one extraction request.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The homepage could not be fetched or did not answer 200.
    #[error("website {url} is unreachable (status: {})", display_status(.status.as_ref()))]
    Unreachable { url: String, status: Option<u16> },

    /// Anything the pipeline did not anticipate, e.g. a malformed input URL.
    #[error("internal extraction failure: {reason}")]
    Internal { reason: String },
}

impl From<ScraperError> for ExtractError {
    fn from(err: ScraperError) -> Self {
        ExtractError::Internal {
            reason: err.to_string(),
        }
    }
}

impl From<SiteUrlError> for ExtractError {
    fn from(err: SiteUrlError) -> Self {
        ExtractError::Internal {
            reason: err.to_string(),
        }
    }
}

fn display_status(status: Option<&u16>) -> String {
    status.map_or_else(|| "no response".to_string(), ToString::to_string)
}
