use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{field::Empty, instrument, Instrument};
use url::Url;

use crate::contract::caller::ProfileSyncGrant;
use crate::domain::error::DomainError;
use crate::domain::ports::{IdentityProvider, ProfileUpdate};

#[derive(Serialize)]
struct PatchUserBody<'a> {
    name: &'a str,
    picture: Option<&'a str>,
}

/// HTTP adapter for the identity provider's user-management API.
#[derive(Clone)]
pub struct HttpIdentityClient {
    client: reqwest::Client,
}

impl HttpIdentityClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build identity provider HTTP client")?;
        Ok(Self::new(client))
    }

    /// `{domain}/api/v2/users/{user_id}`, with the user id percent-encoded as one segment.
    fn user_url(domain: &str, user_id: &str) -> Result<Url, DomainError> {
        let mut url = Url::parse(domain)
            .map_err(|e| DomainError::identity_sync(format!("invalid provider domain: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| DomainError::identity_sync("provider domain cannot be a base URL"))?
            .pop_if_empty()
            .extend(&["api", "v2", "users", user_id]);
        Ok(url)
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityClient {
    #[instrument(
        name = "bookings.http.identity.patch_user_profile",
        skip_all,
        fields(user_id = %grant.user_id)
    )]
    async fn patch_user_profile(
        &self,
        grant: &ProfileSyncGrant,
        update: &ProfileUpdate,
    ) -> Result<(), DomainError> {
        let url = Self::user_url(&grant.domain, &grant.user_id)?;
        let span = tracing::info_span!(
            "outgoing_http",
            http.method = "PATCH",
            http.url = %url,
            http.status_code = Empty,
        );

        let body = PatchUserBody {
            name: &update.name,
            picture: update.picture.as_deref(),
        };
        let response = self
            .client
            .patch(url.clone())
            .header(
                reqwest::header::AUTHORIZATION,
                grant.token.authorization_header(),
            )
            .json(&body)
            .send()
            .instrument(span.clone())
            .await
            .with_context(|| format!("PATCH {url}"))
            .map_err(|e| DomainError::identity_sync(format!("{e:#}")))?;

        let status = response.status();
        span.record("http.status_code", status.as_u16());
        if !status.is_success() {
            return Err(DomainError::identity_sync(format!("HTTP {status}")));
        }
        Ok(())
    }
}
