//! Bin source fetching a static JSON feed, e.g. a `mockBins.json` on a web server.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};

use jomso_core::{
    model::{Bin, SourceId, SourceMeta},
    plugin::SourcePlugin,
    ports::{BinSource, PortError},
    wire,
};

/// Bin source reading the feed at a fixed URL.
pub struct RemoteSource {
    client: Client,
    url: Url,
    meta: SourceMeta,
}

impl RemoteSource {
    /// Create a new source bound to the given HTTP client and feed URL.
    #[must_use]
    pub fn new(client: Client, url: Url) -> Self {
        Self {
            client,
            url,
            meta: source_meta(),
        }
    }
}

#[async_trait]
impl BinSource for RemoteSource {
    fn meta(&self) -> &SourceMeta {
        &self.meta
    }

    async fn bins(&self) -> Result<Vec<Bin>, PortError> {
        tracing::debug!(url = %self.url, "fetching bin feed");

        let req = self.client.get(self.url.clone());
        let body = fetch_text(req).await?;

        wire::decode_bins(&body)
    }
}

/// Build the plugin bundle for a remote feed.
#[must_use]
pub fn plugin(client: Client, url: Url) -> SourcePlugin {
    SourcePlugin::new(Arc::new(RemoteSource::new(client, url)))
}

fn source_meta() -> SourceMeta {
    SourceMeta {
        id: SourceId(String::from("remote")),
        name: String::from("Remote feed"),
    }
}

// Fetch the body with status handling; decoding is left to `wire` so a bad
// body is reported the same way as for any other source.
async fn fetch_text(req: RequestBuilder) -> Result<String, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .text()
        .await
        .map_err(PortError::from)
}
