use std::sync::Arc;

use jomso_core::{
    geo,
    model::{Bin, BinId, GeoPoint, SourceId},
    service::{BinSummary, JomsoService, NearestBin},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    SourceSelect,
    BinList,
    BinDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortMode {
    /// Closest first; source order while the user position is unknown.
    Distance,
    /// Fullest first.
    Priority,
}

pub(crate) struct App {
    pub service: Arc<JomsoService>,

    pub screen: Screen,
    pub sources: Vec<(SourceId, String)>,
    pub source_list_index: usize,
    pub selected_source: Option<SourceId>,

    pub bins: Vec<Bin>,
    pub bin_list_index: usize,
    pub sort: SortMode,
    /// Bin shown on the detail screen, pinned by id so re-sorting cannot swap it.
    pub detail_bin: Option<BinId>,

    pub user_location: Option<GeoPoint>,
    pub nearest: Option<NearestBin>,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<JomsoService>) -> Self {
        let sources = service.sources();
        Self {
            service,
            screen: Screen::SourceSelect,
            sources,
            source_list_index: 0,
            selected_source: None,
            bins: Vec::new(),
            bin_list_index: 0,
            sort: SortMode::Distance,
            detail_bin: None,
            user_location: None,
            nearest: None,
            is_loading: false,
            error_message: None,
        }
    }

    pub(crate) fn select_current_source(&mut self) -> Option<SourceId> {
        let (id, _name) = self.sources.get(self.source_list_index)?;
        self.selected_source = Some(id.clone());
        self.screen = Screen::BinList;
        self.selected_source.clone()
    }

    pub(crate) fn selected_source_name(&self) -> Option<&str> {
        let selected = self.selected_source.as_ref()?;
        self.sources
            .iter()
            .find(|(id, _)| id == selected)
            .map(|(_, name)| name.as_str())
    }

    /// Replace the loaded bins, resetting the cursor.
    pub(crate) fn set_bins(&mut self, bins: Vec<Bin>) {
        self.bins = bins;
        self.bin_list_index = 0;
        self.detail_bin = None;
        self.refresh_nearest();
    }

    /// Replace the user position wholesale, as after a fresh location query.
    pub(crate) fn set_user_location(&mut self, location: Option<GeoPoint>) {
        self.user_location = location;
        self.refresh_nearest();
    }

    fn refresh_nearest(&mut self) {
        self.nearest = JomsoService::nearest(self.user_location, &self.bins);
    }

    pub(crate) fn toggle_sort(&mut self) {
        self.sort = match self.sort {
            SortMode::Distance => SortMode::Priority,
            SortMode::Priority => SortMode::Distance,
        };
        self.bin_list_index = 0;
    }

    /// Bins in display order, each with its distance when the user position is known.
    pub(crate) fn visible_bins(&self) -> Vec<(&Bin, Option<f64>)> {
        match self.sort {
            SortMode::Distance if self.user_location.is_some() => {
                geo::by_distance(self.user_location, &self.bins)
                    .into_iter()
                    .map(|(bin, meters)| (bin, Some(meters)))
                    .collect()
            }
            SortMode::Distance => self.bins.iter().map(|bin| (bin, None)).collect(),
            SortMode::Priority => JomsoService::collection_priority(&self.bins)
                .into_iter()
                .map(|bin| (bin, self.distance_to(bin)))
                .collect(),
        }
    }

    pub(crate) fn distance_to(&self, bin: &Bin) -> Option<f64> {
        self.user_location
            .map(|user| geo::distance_meters(user, bin.location))
    }

    pub(crate) fn selected_bin(&self) -> Option<&Bin> {
        self.visible_bins()
            .get(self.bin_list_index)
            .map(|(bin, _)| *bin)
    }

    /// Bin opened on the detail screen, looked up by id.
    pub(crate) fn detail_bin(&self) -> Option<&Bin> {
        let id = self.detail_bin.as_ref()?;
        self.bins.iter().find(|bin| &bin.id == id)
    }

    pub(crate) fn summary(&self) -> BinSummary {
        JomsoService::summary(&self.bins)
    }

    /// Move the cursor onto the nearest bin. Returns `false` when there is none.
    pub(crate) fn jump_to_nearest(&mut self) -> bool {
        let Some(nearest) = &self.nearest else {
            return false;
        };
        let position = self
            .visible_bins()
            .iter()
            .position(|(bin, _)| bin.id == nearest.bin.id);
        match position {
            Some(index) => {
                self.bin_list_index = index;
                true
            }
            None => false,
        }
    }

    pub(crate) fn open_selected_bin(&mut self) -> bool {
        let Some(id) = self.selected_bin().map(|bin| bin.id.clone()) else {
            return false;
        };
        self.detail_bin = Some(id);
        self.screen = Screen::BinDetail;
        true
    }

    pub(crate) fn close_detail(&mut self) {
        self.detail_bin = None;
        self.screen = Screen::BinList;
    }
}
