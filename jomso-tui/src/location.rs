use async_trait::async_trait;
use jomso_core::{
    model::GeoPoint,
    ports::{LocationPort, PortError},
};

/// Location port answering with the position given on the command line.
///
/// A terminal has no positioning hardware, so `None` stands in for a denied
/// permission prompt.
pub(crate) struct FixedLocation {
    point: Option<GeoPoint>,
}

impl FixedLocation {
    pub(crate) fn new(point: Option<GeoPoint>) -> Self {
        Self { point }
    }
}

#[async_trait]
impl LocationPort for FixedLocation {
    async fn current_location(&self) -> Result<Option<GeoPoint>, PortError> {
        Ok(self.point)
    }
}
