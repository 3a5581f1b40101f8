//! Advisory text from a hosted language model for a selected listing.
//!
//! - [`prompt`] — fixed template filled from the listing's fields.
//! - [`openai`] — chat-completions client.
//! - [`cache`] — per-session store of texts already fetched.
//!
//! [`request_advisory`] never fails: a service error becomes the displayed
//! text, and is cached like a successful reply.

pub mod cache;
pub mod openai;
pub mod prompt;

pub use cache::AdvisoryCache;
pub use prompt::{build_prompt, Prompt};

use thiserror::Error;

use crate::models::{Classification, ListingRecord};

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("service returned no text")]
    EmptyResponse,
}

/// Anything that turns a prompt into advisory text.
pub trait AdvisoryGenerator {
    async fn generate(&self, prompt: &Prompt) -> Result<String, AdvisoryError>;
}

/// Return the advisory text for `record`, calling `generator` at most once
/// per listing for the lifetime of `cache`.
pub async fn request_advisory<G: AdvisoryGenerator>(
    generator: &G,
    cache: &mut AdvisoryCache,
    record: &ListingRecord,
    classification: &Classification,
) -> String {
    if let Some(text) = cache.get(record.id) {
        tracing::debug!(record = %record.id, "advisory cache hit");
        return text.to_string();
    }

    let prompt = build_prompt(record, classification);
    let text = match generator.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(record = %record.id, error = %e, "advisory request failed");
            format!("Advisory request failed: {}", e)
        }
    };

    cache.insert(record.id, text.clone());
    tracing::debug!(record = %record.id, cached = cache.len(), "advisory stored");
    text
}
