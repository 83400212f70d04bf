//! Offline bin source serving the bundled Karlsruhe fixture.

use std::sync::Arc;

use async_trait::async_trait;

use jomso_core::{
    model::{Bin, SourceId, SourceMeta},
    plugin::SourcePlugin,
    ports::{BinSource, PortError},
    wire,
};

const MOCK_BINS: &str = include_str!("../data/mock_bins.json");

/// Bin source that decodes a JSON document held in memory.
pub struct FixtureSource {
    meta: SourceMeta,
    json: &'static str,
}

impl FixtureSource {
    /// Source serving the bundled Karlsruhe bins.
    #[must_use]
    pub fn new() -> Self {
        Self::from_json(MOCK_BINS)
    }

    /// Source serving a caller-provided JSON bin list.
    #[must_use]
    pub fn from_json(json: &'static str) -> Self {
        Self {
            meta: source_meta(),
            json,
        }
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BinSource for FixtureSource {
    fn meta(&self) -> &SourceMeta {
        &self.meta
    }

    async fn bins(&self) -> Result<Vec<Bin>, PortError> {
        let bins = wire::decode_bins(self.json)?;
        tracing::debug!(count = bins.len(), "decoded fixture bins");
        Ok(bins)
    }
}

/// Build the plugin bundle for the bundled fixture.
#[must_use]
pub fn plugin() -> SourcePlugin {
    SourcePlugin::new(Arc::new(FixtureSource::new()))
}

fn source_meta() -> SourceMeta {
    SourceMeta {
        id: SourceId(String::from("fixture")),
        name: String::from("Karlsruhe (offline)"),
    }
}

#[cfg(test)]
mod tests {
    use jomso_core::{BinKind, GeoPoint, find_nearest};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn bundled_fixture_has_three_karlsruhe_bins() {
        let bins = FixtureSource::new().bins().await.expect("fixture is valid");

        let kinds: Vec<&BinKind> = bins.iter().map(|bin| &bin.kind).collect();
        assert_eq!(
            kinds,
            [&BinKind::Glass, &BinKind::Clothes, &BinKind::Paper],
            "fixture kinds in order"
        );
        assert!(
            bins.iter().all(|bin| bin.location.is_valid()),
            "fixture coordinates are valid"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn user_at_karlstrasse_is_nearest_to_the_glass_bin() {
        let bins = FixtureSource::new().bins().await.expect("fixture is valid");

        let nearest = find_nearest(GeoPoint::new(49.0079, 8.4045), &bins).expect("bins present");
        assert_eq!(nearest.id.0, "1", "user stands at bin 1");
    }

    #[rstest]
    #[tokio::test]
    async fn broken_fixture_reports_decode_error() {
        let source = FixtureSource::from_json("not json");
        assert!(
            matches!(source.bins().await, Err(PortError::Decode(_))),
            "garbage must not decode"
        );
    }

    #[rstest]
    fn plugin_uses_fixture_id() {
        assert_eq!(plugin().meta.id, SourceId("fixture".to_owned()), "plugin id");
    }
}
