//! Registry for all bin sources.

use std::sync::Arc;

use crate::model::{SourceId, SourceMeta};
use crate::ports::{BinSource, PortError};

/// A bin source together with its metadata.
pub struct SourcePlugin {
    /// Static metadata describing the source.
    pub meta: SourceMeta,
    /// Implementation that loads the bins.
    pub source: Arc<dyn BinSource>,
}

impl SourcePlugin {
    /// Wrap a source, copying its metadata.
    #[must_use]
    pub fn new(source: Arc<dyn BinSource>) -> Self {
        Self {
            meta: source.meta().clone(),
            source,
        }
    }
}

/// Registry that resolves sources by identifier, keeping registration order.
pub struct SourceRegistry {
    plugins: Vec<SourcePlugin>,
}

impl SourceRegistry {
    /// Build a registry from the provided plugin list.
    ///
    /// A later plugin with an id already registered is ignored.
    #[must_use]
    pub fn new(plugins: Vec<SourcePlugin>) -> Self {
        let mut unique: Vec<SourcePlugin> = Vec::with_capacity(plugins.len());
        for plugin in plugins {
            if unique.iter().any(|known| known.meta.id == plugin.meta.id) {
                tracing::warn!(source = %plugin.meta.id.0, "duplicate bin source ignored");
                continue;
            }
            unique.push(plugin);
        }
        Self { plugins: unique }
    }

    /// Return metadata for all registered sources.
    #[must_use]
    pub fn sources(&self) -> Vec<SourceMeta> {
        self.sources_iter().cloned().collect()
    }

    /// Iterator over source metadata.
    pub fn sources_iter(&self) -> impl Iterator<Item = &SourceMeta> {
        self.plugins.iter().map(|plugin| &plugin.meta)
    }

    /// Look up the plugin for the given source.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::UnknownSource`] when no plugin is registered.
    pub fn plugin(&self, source: &SourceId) -> Result<&SourcePlugin, PortError> {
        self.plugins
            .iter()
            .find(|plugin| &plugin.meta.id == source)
            .ok_or(PortError::UnknownSource)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use rstest::rstest;

    use super::*;
    use crate::model::Bin;

    struct EmptySource {
        meta: SourceMeta,
    }

    #[async_trait]
    impl BinSource for EmptySource {
        fn meta(&self) -> &SourceMeta {
            &self.meta
        }

        async fn bins(&self) -> Result<Vec<Bin>, PortError> {
            Ok(Vec::new())
        }
    }

    fn plugin(id: &str, name: &str) -> SourcePlugin {
        SourcePlugin::new(Arc::new(EmptySource {
            meta: SourceMeta {
                id: SourceId(id.to_owned()),
                name: name.to_owned(),
            },
        }))
    }

    #[rstest]
    fn keeps_registration_order_and_drops_duplicates() {
        let registry = SourceRegistry::new(vec![
            plugin("fixture", "Offline"),
            plugin("remote", "Remote"),
            plugin("fixture", "Shadowed"),
        ]);

        let names: Vec<String> = registry.sources().into_iter().map(|meta| meta.name).collect();
        assert_eq!(names, ["Offline", "Remote"], "registered sources");
    }

    #[rstest]
    fn unknown_source_is_an_error() {
        let registry = SourceRegistry::new(vec![plugin("fixture", "Offline")]);

        let result = registry.plugin(&SourceId("missing".to_owned()));
        assert!(
            matches!(result, Err(PortError::UnknownSource)),
            "missing source must be rejected"
        );
    }
}
