//! WordPress REST API integration: payload construction and the HTTP client.

mod client;
mod payload;

pub use client::{normalize_site_url, WpClient};
pub use payload::{build_payload, PostPayload};

use crate::batch::{DuplicatePolicy, PostSubmitter, SubmitAction, SubmitError, SubmitOutcome};

/// The slice of the REST API the submitter needs. `WpClient` is the live
/// implementation; tests substitute an in-memory one so the duplicate
/// policy can be exercised without a site.
pub trait PostEndpoint {
    fn find_post_by_slug(&self, slug: &str) -> Result<Option<u64>, SubmitError>;
    fn create_post(&self, payload: &PostPayload) -> Result<u64, SubmitError>;
    fn update_post(&self, id: u64, payload: &PostPayload) -> Result<u64, SubmitError>;
}

impl PostEndpoint for WpClient {
    fn find_post_by_slug(&self, slug: &str) -> Result<Option<u64>, SubmitError> {
        WpClient::find_post_by_slug(self, slug)
    }

    fn create_post(&self, payload: &PostPayload) -> Result<u64, SubmitError> {
        WpClient::create_post(self, payload)
    }

    fn update_post(&self, id: u64, payload: &PostPayload) -> Result<u64, SubmitError> {
        WpClient::update_post(self, id, payload)
    }
}

/// Production submitter: sends payloads to a live WordPress site, applying
/// the configured duplicate policy.
pub struct WpSubmitter<C: PostEndpoint = WpClient> {
    client: C,
    policy: DuplicatePolicy,
}

impl<C: PostEndpoint> WpSubmitter<C> {
    pub fn new(client: C, policy: DuplicatePolicy) -> Self {
        Self { client, policy }
    }
}

impl<C: PostEndpoint> PostSubmitter for WpSubmitter<C> {
    fn submit(&mut self, payload: &PostPayload) -> Result<SubmitOutcome, SubmitError> {
        if self.policy == DuplicatePolicy::Update {
            let slug = payload.slug.as_deref().filter(|s| !s.is_empty());
            if let Some(slug) = slug {
                if let Some(id) = self.client.find_post_by_slug(slug)? {
                    let post_id = self.client.update_post(id, payload)?;
                    return Ok(SubmitOutcome {
                        post_id,
                        action: SubmitAction::Updated,
                    });
                }
            }
        }

        let post_id = self.client.create_post(payload)?;
        Ok(SubmitOutcome {
            post_id,
            action: SubmitAction::Created,
        })
    }
}
