use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info};

use crate::config::{SearchPolicy, ServiceConfig};
use crate::error::Result;
use crate::models::{Coordinate, PollutantSelector};
use crate::processors::record_store::RecordStore;
use crate::processors::spatial_filter::{recompute, VisibleStations};
use crate::readers::{GeocodingAdapter, NominatimClient, StationReader, StationSource};
use crate::utils::constants::{CITY_ZOOM, DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON, DEFAULT_ZOOM};
use crate::writers::{
    describe_all, MapView, MarkerLayer, Notice, PositionProvider, UserLocationMarker,
};

/// How a city search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    EmptyQuery,
    Found { city: String, stations: usize },
    NoData { city: String },
    /// A newer search started first; this result was dropped
    Superseded { city: String },
}

/// One map session: the record store plus the UI state around it
pub struct MapSession {
    store: Arc<RecordStore>,
    source: Arc<dyn StationSource>,
    geocoding: GeocodingAdapter,
    view: Arc<dyn MapView>,
    policy: SearchPolicy,
    pollutant: RwLock<PollutantSelector>,
    user_marker: Mutex<Option<UserLocationMarker>>,
    next_marker_id: AtomicU64,
    search_seq: AtomicU64,
    apply_lock: Mutex<()>,
}

impl MapSession {
    pub fn new(
        store: Arc<RecordStore>,
        source: Arc<dyn StationSource>,
        geocoding: GeocodingAdapter,
        view: Arc<dyn MapView>,
    ) -> Self {
        Self {
            store,
            source,
            geocoding,
            view,
            policy: SearchPolicy::default(),
            pollutant: RwLock::new(PollutantSelector::All),
            user_marker: Mutex::new(None),
            next_marker_id: AtomicU64::new(1),
            search_seq: AtomicU64::new(0),
            apply_lock: Mutex::new(()),
        }
    }

    /// Wire the HTTP backend and geocoder described by `config`
    pub fn from_config(config: &ServiceConfig, view: Arc<dyn MapView>) -> Result<Self> {
        let source = Arc::new(StationReader::from_config(config)?);
        let geocoder = Arc::new(NominatimClient::from_config(config)?);
        let geocoding = GeocodingAdapter::new(geocoder, &config.country_scope);

        Ok(Self::new(Arc::new(RecordStore::new()), source, geocoding, view)
            .with_search_policy(config.search_policy))
    }

    pub fn with_search_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn pollutant(&self) -> PollutantSelector {
        self.pollutant
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn user_marker(&self) -> Option<UserLocationMarker> {
        self.user_marker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Centre on the default view and load every station
    pub async fn start(&self) -> usize {
        self.view.set_view(
            Coordinate {
                latitude: DEFAULT_CENTER_LAT,
                longitude: DEFAULT_CENTER_LON,
            },
            DEFAULT_ZOOM,
        );
        self.load_all().await
    }

    /// Fetch the full station set and render it
    ///
    /// An empty answer leaves the previous collection in place.
    pub async fn load_all(&self) -> usize {
        let records = self.source.fetch_all().await;

        if records.is_empty() {
            debug!("No stations returned for the full fetch");
        } else {
            self.store.set_all(records);
        }

        self.refresh();
        self.store.get_all().len()
    }

    /// Resolve a typed place name, load its stations and recentre on them
    pub async fn search_city(&self, input: &str) -> SearchOutcome {
        let query = input.trim();
        if query.is_empty() {
            self.view.notify(&Notice::EmptyQuery);
            return SearchOutcome::EmptyQuery;
        }

        let ticket = self.search_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let city = self.geocoding.normalize_city_name(query).await;
        let records = self.source.fetch_city(&city).await;

        let outcome = {
            let _guard = self.apply_lock.lock().unwrap_or_else(PoisonError::into_inner);

            if self.policy == SearchPolicy::LatestIssuedWins
                && ticket != self.search_seq.load(Ordering::SeqCst)
            {
                debug!(city = %city, ticket, "Discarding superseded search result");
                return SearchOutcome::Superseded { city };
            }

            self.store.set_city(records);
            let stations = self.store.get_city();

            match stations.first() {
                Some(first) => {
                    info!(city = %city, stations = stations.len(), "City stations loaded");
                    self.view.set_view(first.coordinate, CITY_ZOOM);
                    SearchOutcome::Found {
                        city,
                        stations: stations.len(),
                    }
                }
                None => {
                    self.view.notify(&Notice::NoDataForCity(city.clone()));
                    SearchOutcome::NoData { city }
                }
            }
        };

        self.refresh();
        outcome
    }

    /// Mark the device position and load the city it falls in
    ///
    /// Returns `None` when no position is available or the position does not
    /// reverse-geocode to a city; no search is attempted then.
    pub async fn detect_location(&self, provider: &dyn PositionProvider) -> Option<SearchOutcome> {
        let Some(position) = provider.current_position().await else {
            debug!("Device position unavailable");
            return None;
        };

        self.place_user_marker(position);

        let city = self
            .geocoding
            .reverse_geocode(position.latitude, position.longitude)
            .await?;

        Some(self.search_city(&city).await)
    }

    pub fn select_pollutant(&self, selector: PollutantSelector) -> VisibleStations {
        *self
            .pollutant
            .write()
            .unwrap_or_else(PoisonError::into_inner) = selector;
        self.refresh()
    }

    /// Re-filter both collections against the view's current bounds
    pub fn on_viewport_change(&self) -> VisibleStations {
        let viewport = self.view.bounds();
        let pollutant = self.pollutant();

        let visible = recompute(
            &self.store.get_all(),
            &self.store.get_city(),
            &viewport,
            &pollutant,
        );

        debug!(
            all = visible.all.len(),
            city = visible.city.len(),
            %pollutant,
            "Recomputed visible stations"
        );

        self.view
            .render(MarkerLayer::AllStations, &describe_all(&visible.all));
        self.view
            .render(MarkerLayer::CityStations, &describe_all(&visible.city));

        visible
    }

    pub fn refresh(&self) -> VisibleStations {
        self.on_viewport_change()
    }

    fn place_user_marker(&self, position: Coordinate) {
        let mut slot = self
            .user_marker
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = slot.take() {
            self.view.remove_user_marker(&previous);
        }

        let marker = UserLocationMarker::new(
            self.next_marker_id.fetch_add(1, Ordering::SeqCst),
            position,
        );
        self.view.show_user_marker(&marker);
        *slot = Some(marker);
    }
}
