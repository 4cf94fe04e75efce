use parking_lot::Mutex;
use std::{
    fmt::Debug,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{
    config::Config,
    error::{Error, Result},
    model::WeatherRecord,
    provider::{GeocodeResolver, OpenMeteoForecast, OpenMeteoGeocoder, WeatherFetcher},
    store::{FileSlotStorage, RecentSearches},
};

/// Where results, the recent list and user-facing messages end up.
pub trait WeatherView: Send + Sync + Debug {
    /// Replace the weather display with `record` and make it visible.
    fn render(&self, record: &WeatherRecord);

    /// Clear and rebuild the recent-search list.
    fn render_recent(&self, records: &[WeatherRecord]);

    /// Show a short message to the user.
    fn alert(&self, message: &str);
}

/// What a single `search` call ended up doing.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The record was displayed and (unless storage failed) persisted.
    Shown(WeatherRecord),
    /// Nothing was displayed; the user saw the error's `user_message`.
    Failed(Error),
    /// A newer search was issued while this one was in flight, so its
    /// result was dropped.
    Superseded,
}

impl SearchOutcome {
    pub fn record(&self) -> Option<&WeatherRecord> {
        match self {
            SearchOutcome::Shown(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            SearchOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Runs geocode → current weather → display → persist for each search.
///
/// Each call takes a ticket from a monotonic counter; only the most recently
/// issued ticket may touch the view or the store when it completes.
#[derive(Debug)]
pub struct WeatherApp {
    resolver: Box<dyn GeocodeResolver>,
    fetcher: Box<dyn WeatherFetcher>,
    store: Mutex<RecentSearches>,
    view: Box<dyn WeatherView>,
    generation: AtomicU64,
}

impl WeatherApp {
    pub fn new(
        resolver: Box<dyn GeocodeResolver>,
        fetcher: Box<dyn WeatherFetcher>,
        store: RecentSearches,
        view: Box<dyn WeatherView>,
    ) -> Self {
        Self { resolver, fetcher, store: Mutex::new(store), view, generation: AtomicU64::new(0) }
    }

    /// Build the app, restore the recent list and render it.
    ///
    /// A stored payload that can't be read back is logged and ignored: the
    /// app starts with an empty list and the slot is overwritten on the next
    /// successful search.
    pub fn start(
        resolver: Box<dyn GeocodeResolver>,
        fetcher: Box<dyn WeatherFetcher>,
        store: RecentSearches,
        view: Box<dyn WeatherView>,
    ) -> Self {
        let app = Self::new(resolver, fetcher, store, view);
        app.restore();
        app
    }

    /// Wire Open-Meteo and the file-backed slot from `config`, then [`start`](Self::start).
    pub fn from_config(config: &Config, view: Box<dyn WeatherView>) -> anyhow::Result<Self> {
        let http = reqwest::Client::new();
        let data_dir = config.resolved_data_dir()?;
        tracing::debug!(data_dir = %data_dir.display(), "using recent-search storage");

        Ok(Self::start(
            Box::new(OpenMeteoGeocoder::new(http.clone(), config.geocoding_url.as_str())),
            Box::new(OpenMeteoForecast::new(http, config.forecast_url.as_str())),
            RecentSearches::new(Box::new(FileSlotStorage::new(data_dir))),
            view,
        ))
    }

    fn restore(&self) {
        let mut store = self.store.lock();
        if let Err(err) = store.load() {
            tracing::warn!(error = %err, "ignoring unreadable recent searches");
        }
        self.view.render_recent(store.records());
    }

    /// Snapshot of the recent-search list, newest first.
    pub fn recent(&self) -> Vec<WeatherRecord> {
        self.store.lock().records().to_vec()
    }

    /// Look up `raw_input` and show the result.
    pub async fn search(&self, raw_input: &str) -> SearchOutcome {
        let city = raw_input.trim();
        if city.is_empty() {
            let err = Error::Validation;
            self.view.alert(err.user_message());
            return SearchOutcome::Failed(err);
        }

        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(city, ticket, "searching");

        let result = self.lookup(city).await;

        if !self.is_latest(ticket) {
            tracing::debug!(city, ticket, "discarding stale search result");
            return SearchOutcome::Superseded;
        }

        let record = match result {
            Ok(record) => record,
            Err(err) => {
                tracing::error!(city, error = %err, "weather lookup failed");
                self.view.alert(err.user_message());
                return SearchOutcome::Failed(err);
            }
        };

        self.view.render(&record);
        self.persist(record.clone());

        SearchOutcome::Shown(record)
    }

    /// Activate the recent entry at `index`: search its city again.
    /// Returns `None` when there is no such entry.
    pub async fn search_recent(&self, index: usize) -> Option<SearchOutcome> {
        let city = self.store.lock().get(index).map(|r| r.city.clone())?;
        Some(self.search(&city).await)
    }

    async fn lookup(&self, city: &str) -> Result<WeatherRecord> {
        let coords = self.resolver.resolve(city).await?;
        let conditions = self.fetcher.fetch(coords.latitude, coords.longitude).await?;
        Ok(WeatherRecord::new(city, conditions))
    }

    fn persist(&self, record: WeatherRecord) {
        let mut store = self.store.lock();
        match store.save(record) {
            Ok(records) => self.view.render_recent(records),
            Err(err) => {
                tracing::error!(error = %err, "failed to persist recent searches");
                self.view.alert(err.user_message());
            }
        }
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }
}
