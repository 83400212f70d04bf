//! High-level service facade combining bin sources, user location, and the locator.

use std::sync::Arc;

use tracing::{debug, info};

use crate::geo;
use crate::model::{Bin, GeoPoint, SourceId};
use crate::plugin::SourceRegistry;
use crate::ports::{LocationPort, PortError};

#[derive(Debug, Clone, PartialEq)]
/// Owned nearest-bin answer ready for display.
pub struct NearestBin {
    /// The closest bin.
    pub bin: Bin,
    /// Distance from the user in meters.
    pub meters: f64,
    /// Human-readable distance such as “380 m”.
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Aggregate fill statistics over a bin list.
pub struct BinSummary {
    /// Number of bins.
    pub total: usize,
    /// Bins above the full threshold.
    pub full: usize,
    /// Mean fill percentage, zero for an empty list.
    pub average_fill: f64,
}

/// Public entry point for loading bins and finding the nearest one.
pub struct JomsoService {
    registry: Arc<SourceRegistry>,
    location: Arc<dyn LocationPort>,
}

impl JomsoService {
    /// Create a new service bound to the provided registry and location port.
    #[must_use]
    pub fn new(registry: Arc<SourceRegistry>, location: Arc<dyn LocationPort>) -> Self {
        Self { registry, location }
    }

    /// List all available sources and their display names.
    #[must_use]
    pub fn sources(&self) -> Vec<(SourceId, String)> {
        self.registry
            .sources()
            .into_iter()
            .map(|meta| (meta.id, meta.name))
            .collect()
    }

    /// Load the bins of one source.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the source is unknown or fails to load.
    pub async fn load_bins(&self, source: &SourceId) -> Result<Vec<Bin>, PortError> {
        let plugin = self.registry.plugin(source)?;
        let bins = plugin.source.bins().await?;
        info!(source = %source.0, count = bins.len(), "loaded bins");
        Ok(bins)
    }

    /// Ask the location port for a fresh user position.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the location backend fails.
    pub async fn user_location(&self) -> Result<Option<GeoPoint>, PortError> {
        let location = self.location.current_location().await?;
        match location {
            Some(point) => debug!(%point, "user location fixed"),
            None => debug!("user location unavailable"),
        }
        Ok(location)
    }

    /// Load bins and the user position, then select the nearest bin.
    ///
    /// `Ok(None)` means the user position is unknown or the source is empty.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the source or the location port fails.
    pub async fn nearest_bin(&self, source: &SourceId) -> Result<Option<NearestBin>, PortError> {
        let bins = self.load_bins(source).await?;
        let user = self.user_location().await?;
        Ok(Self::nearest(user, &bins))
    }

    /// Select the nearest bin from an already loaded list.
    #[must_use]
    pub fn nearest(user: Option<GeoPoint>, bins: &[Bin]) -> Option<NearestBin> {
        geo::nearest(user, bins).map(|found| NearestBin {
            label: found.label(),
            meters: found.meters,
            bin: found.bin.clone(),
        })
    }

    /// Bins ordered for a collection round: fullest first, ties in input order.
    #[must_use]
    pub fn collection_priority(bins: &[Bin]) -> Vec<&Bin> {
        let mut ordered: Vec<&Bin> = bins.iter().collect();
        ordered.sort_by(|left, right| right.fill.cmp(&left.fill));
        ordered
    }

    /// Fill statistics over a bin list.
    #[must_use]
    pub fn summary(bins: &[Bin]) -> BinSummary {
        let total = bins.len();
        let full = bins.iter().filter(|bin| bin.fill.is_full()).count();
        let fill_sum: u32 = bins.iter().map(|bin| u32::from(bin.fill.percent())).sum();
        let average_fill = if total == 0 {
            0.0
        } else {
            f64::from(fill_sum) / f64::from(u32::try_from(total).unwrap_or(u32::MAX))
        };
        BinSummary {
            total,
            full,
            average_fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::model::{BinId, BinKind, FillLevel, SourceMeta};
    use crate::plugin::SourcePlugin;
    use crate::ports::BinSource;

    struct StaticSource {
        meta: SourceMeta,
        bins: Vec<Bin>,
    }

    #[async_trait]
    impl BinSource for StaticSource {
        fn meta(&self) -> &SourceMeta {
            &self.meta
        }

        async fn bins(&self) -> Result<Vec<Bin>, PortError> {
            Ok(self.bins.clone())
        }
    }

    struct FixedLocation(Option<GeoPoint>);

    #[async_trait]
    impl LocationPort for FixedLocation {
        async fn current_location(&self) -> Result<Option<GeoPoint>, PortError> {
            Ok(self.0)
        }
    }

    fn bin(id: &str, latitude: f64, longitude: f64, fill: u8) -> Bin {
        Bin {
            id: BinId(id.to_owned()),
            address: format!("Bin {id}"),
            location: GeoPoint {
                latitude,
                longitude,
            },
            fill: FillLevel::new(fill).expect("fill within range"),
            kind: BinKind::Glass,
            size: "2.5 m³".to_owned(),
            last_emptied_at: None,
        }
    }

    #[fixture]
    fn karlsruhe() -> Vec<Bin> {
        vec![
            bin("1", 49.0079, 8.4045, 92),
            bin("2", 49.0055, 8.4002, 60),
            bin("3", 49.0085, 8.4061, 75),
        ]
    }

    fn service(bins: Vec<Bin>, user: Option<GeoPoint>) -> JomsoService {
        let source = StaticSource {
            meta: SourceMeta {
                id: SourceId("fixture".to_owned()),
                name: "Fixture".to_owned(),
            },
            bins,
        };
        let registry = Arc::new(SourceRegistry::new(vec![SourcePlugin::new(Arc::new(
            source,
        ))]));
        JomsoService::new(registry, Arc::new(FixedLocation(user)))
    }

    fn fixture_id() -> SourceId {
        SourceId("fixture".to_owned())
    }

    #[rstest]
    #[tokio::test]
    async fn nearest_bin_near_europaplatz(karlsruhe: Vec<Bin>) {
        let user = GeoPoint::new(49.0056, 8.4004);
        let service = service(karlsruhe, user);

        let nearest = service
            .nearest_bin(&fixture_id())
            .await
            .expect("source loads")
            .expect("user and bins are present");

        assert_eq!(nearest.bin.id, BinId("2".to_owned()), "Europaplatz bin");
        assert!(nearest.label.ends_with(" m"), "short distance in meters");
    }

    #[rstest]
    #[tokio::test]
    async fn nearest_bin_without_location_is_none(karlsruhe: Vec<Bin>) {
        let service = service(karlsruhe, None);

        let nearest = service.nearest_bin(&fixture_id()).await.expect("source loads");
        assert!(nearest.is_none(), "no location, no nearest bin");
    }

    #[rstest]
    #[tokio::test]
    async fn nearest_bin_of_empty_source_is_none() {
        let service = service(Vec::new(), GeoPoint::new(49.0, 8.4));

        let nearest = service.nearest_bin(&fixture_id()).await.expect("source loads");
        assert!(nearest.is_none(), "empty source, no nearest bin");
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_source_fails(karlsruhe: Vec<Bin>) {
        let service = service(karlsruhe, None);

        let result = service.load_bins(&SourceId("remote".to_owned())).await;
        assert!(
            matches!(result, Err(PortError::UnknownSource)),
            "unregistered source must fail"
        );
    }

    #[rstest]
    fn collection_priority_puts_fullest_first(karlsruhe: Vec<Bin>) {
        let order: Vec<&str> = JomsoService::collection_priority(&karlsruhe)
            .into_iter()
            .map(|bin| bin.id.0.as_str())
            .collect();
        assert_eq!(order, ["1", "3", "2"], "descending fill");
    }

    #[rstest]
    fn summary_counts_full_bins(karlsruhe: Vec<Bin>) {
        let summary = JomsoService::summary(&karlsruhe);
        assert_eq!(summary.total, 3, "total");
        assert_eq!(summary.full, 1, "only the 92% bin is full");
        assert!(
            (summary.average_fill - 75.666_666).abs() < 0.001,
            "average fill, got {}",
            summary.average_fill
        );
    }

    #[rstest]
    fn summary_of_nothing_is_zero() {
        assert_eq!(
            JomsoService::summary(&[]),
            BinSummary::default(),
            "empty summary"
        );
    }
}
