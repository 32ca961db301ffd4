//! Dashboard view-model.
//!
//! Activation checks `/health`, fires one independent fetch per collection,
//! and subscribes to the refresh bus so every refresh event re-runs the
//! fetches. Each fetch only ever replaces its own collection; a failure is
//! logged and leaves the previous value in place.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use ontodash_core::{
    Accommodation, Activity, ApiResult, Certification, Collection, Destination, Equipment, Food,
    OntologyApi, OntologyStats, Person, RefreshBus, Service, Subscription, Transport, short_name,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiStatus {
    #[default]
    Checking,
    Connected,
    Disconnected,
}

impl ApiStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApiStatus::Checking => "checking...",
            ApiStatus::Connected => "connected",
            ApiStatus::Disconnected => "disconnected",
        }
    }
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub phase: Phase,
    pub api_status: ApiStatus,
    pub stats: OntologyStats,
    pub destinations: Vec<Destination>,
    pub accommodations: Vec<Accommodation>,
    pub activities: Vec<Activity>,
    pub transports: Vec<Transport>,
    pub services: Vec<Service>,
    pub foods: Vec<Food>,
    pub equipment: Vec<Equipment>,
    pub people: Vec<Person>,
    pub certifications: Vec<Certification>,
    /// Cleared once every fetch of the latest load has finished.
    pub loading: bool,
    /// Most recent failure per collection; removed on the next success.
    pub last_errors: BTreeMap<Collection, String>,
}

impl DashboardState {
    pub fn len_of(&self, collection: Collection) -> usize {
        match collection {
            Collection::Stats => 1,
            Collection::Destinations => self.destinations.len(),
            Collection::Accommodations => self.accommodations.len(),
            Collection::Activities => self.activities.len(),
            Collection::Transports => self.transports.len(),
            Collection::Services => self.services.len(),
            Collection::Foods => self.foods.len(),
            Collection::Equipment => self.equipment.len(),
            Collection::People => self.people.len(),
            Collection::Certifications => self.certifications.len(),
        }
    }

    /// Column headers and display rows for one collection.
    pub fn table(&self, collection: Collection) -> CollectionTable {
        let (headers, rows): (&[&'static str], Vec<Vec<String>>) = match collection {
            Collection::Stats => (
                &["classes", "properties", "individuals"],
                vec![vec![
                    self.stats.classes.to_string(),
                    self.stats.properties.to_string(),
                    self.stats.individuals.to_string(),
                ]],
            ),
            Collection::Destinations => (
                &["name", "type"],
                self.destinations
                    .iter()
                    .map(|d| vec![name_or_uri(&d.name, &d.uri), text(&d.kind)])
                    .collect(),
            ),
            Collection::Accommodations => (
                &["name", "type", "certification"],
                self.accommodations
                    .iter()
                    .map(|a| {
                        vec![
                            name_or_uri(&a.name, &a.uri),
                            text(&a.kind),
                            a.certification.as_deref().map(short_name).unwrap_or("-").to_string(),
                        ]
                    })
                    .collect(),
            ),
            Collection::Activities => (
                &["name", "duration (h)", "footprint", "type"],
                self.activities
                    .iter()
                    .map(|a| {
                        vec![
                            name_or_uri(&a.name, &a.uri),
                            number(&a.duration),
                            number(&a.footprint),
                            text(&a.kind),
                        ]
                    })
                    .collect(),
            ),
            Collection::Transports => (
                &["type", "footprint"],
                self.transports
                    .iter()
                    .map(|t| {
                        let kind = t.kind.clone().unwrap_or_else(|| short_name(&t.uri).to_string());
                        vec![kind, number(&t.footprint)]
                    })
                    .collect(),
            ),
            Collection::Services => (
                &["name", "price"],
                self.services
                    .iter()
                    .map(|s| vec![name_or_uri(&s.name, &s.uri), number(&s.price)])
                    .collect(),
            ),
            Collection::Foods => (
                &["name"],
                self.foods
                    .iter()
                    .map(|f| vec![name_or_uri(&f.name, &f.uri)])
                    .collect(),
            ),
            Collection::Equipment => (
                &["name"],
                self.equipment
                    .iter()
                    .map(|e| vec![name_or_uri(&e.name, &e.uri)])
                    .collect(),
            ),
            Collection::People => (
                &["name", "age"],
                self.people
                    .iter()
                    .map(|p| vec![name_or_uri(&p.name, &p.uri), number(&p.age)])
                    .collect(),
            ),
            Collection::Certifications => (
                &["name", "valid until"],
                self.certifications
                    .iter()
                    .map(|c| vec![name_or_uri(&c.name, &c.uri), text(&c.validity_date)])
                    .collect(),
            ),
        };
        CollectionTable {
            headers: headers.to_vec(),
            rows,
        }
    }
}

/// One collection laid out for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

fn name_or_uri(name: &Option<String>, uri: &str) -> String {
    name.clone().unwrap_or_else(|| short_name(uri).to_string())
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn number<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(|| "-".to_string(), T::to_string)
}

/// Counted join over one load generation.
#[derive(Default)]
struct Inner {
    state: DashboardState,
    generation: u64,
    pending: usize,
}

/// Shared between the view-model and its refresh-bus callback.
struct Loader {
    api: Arc<dyn OntologyApi>,
    inner: RwLock<Inner>,
    active: AtomicBool,
    revision: watch::Sender<u64>,
}

impl Loader {
    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Start a new load generation and spawn one task per collection.
    fn load_data(self: &Arc<Self>) {
        if !self.active.load(Ordering::SeqCst) {
            debug!("Dashboard inactive; load skipped");
            return;
        }
        let Ok(handle) = Handle::try_current() else {
            warn!("No async runtime available; dashboard load skipped");
            return;
        };

        let generation = {
            let mut inner = self.write();
            inner.generation += 1;
            inner.pending = Collection::ALL.len();
            inner.state.loading = true;
            inner.state.phase = Phase::Loading;
            inner.generation
        };
        self.bump();
        info!(generation, "Loading dashboard data");

        self.spawn_fetch(
            &handle,
            generation,
            Collection::Stats,
            |api| async move { api.stats().await },
            |s, v| s.stats = v,
        );
        self.spawn_fetch(
            &handle,
            generation,
            Collection::Destinations,
            |api| async move { api.destinations().await },
            |s, v| s.destinations = v,
        );
        self.spawn_fetch(
            &handle,
            generation,
            Collection::Accommodations,
            |api| async move { api.accommodations().await },
            |s, v| s.accommodations = v,
        );
        self.spawn_fetch(
            &handle,
            generation,
            Collection::Activities,
            |api| async move { api.activities().await },
            |s, v| s.activities = v,
        );
        self.spawn_fetch(
            &handle,
            generation,
            Collection::Transports,
            |api| async move { api.transports().await },
            |s, v| s.transports = v,
        );
        self.spawn_fetch(
            &handle,
            generation,
            Collection::Services,
            |api| async move { api.services().await },
            |s, v| s.services = v,
        );
        self.spawn_fetch(
            &handle,
            generation,
            Collection::Foods,
            |api| async move { api.foods().await },
            |s, v| s.foods = v,
        );
        self.spawn_fetch(
            &handle,
            generation,
            Collection::Equipment,
            |api| async move { api.equipment().await },
            |s, v| s.equipment = v,
        );
        self.spawn_fetch(
            &handle,
            generation,
            Collection::People,
            |api| async move { api.people().await },
            |s, v| s.people = v,
        );
        self.spawn_fetch(
            &handle,
            generation,
            Collection::Certifications,
            |api| async move { api.certifications().await },
            |s, v| s.certifications = v,
        );
    }

    fn spawn_fetch<T, F, Fut>(
        self: &Arc<Self>,
        handle: &Handle,
        generation: u64,
        collection: Collection,
        fetch: F,
        store: fn(&mut DashboardState, T),
    ) where
        T: Send + 'static,
        F: FnOnce(Arc<dyn OntologyApi>) -> Fut + Send + 'static,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let loader = Arc::clone(self);
        let api = Arc::clone(&self.api);
        handle.spawn(async move {
            let result = fetch(api).await;
            loader.complete(generation, collection, result, store);
        });
    }

    fn complete<T>(
        &self,
        generation: u64,
        collection: Collection,
        result: ApiResult<T>,
        store: fn(&mut DashboardState, T),
    ) {
        if !self.active.load(Ordering::SeqCst) {
            debug!(%collection, "Dropping response for inactive dashboard");
            return;
        }

        {
            let mut inner = self.write();
            match result {
                Ok(value) => {
                    store(&mut inner.state, value);
                    inner.state.last_errors.remove(&collection);
                    debug!(%collection, generation, "Collection loaded");
                }
                Err(e) => {
                    warn!(%collection, error = %e, "Failed to load collection");
                    inner.state.last_errors.insert(collection, e.to_string());
                }
            }

            // Stale generations still update data but not the loading join.
            if generation == inner.generation {
                inner.pending = inner.pending.saturating_sub(1);
                if inner.pending == 0 {
                    inner.state.loading = false;
                    inner.state.phase = Phase::Ready;
                    info!(generation, "Dashboard data ready");
                }
            }
        }
        self.bump();
    }

    fn check_health(self: &Arc<Self>) {
        let Ok(handle) = Handle::try_current() else {
            warn!("No async runtime available; health check skipped");
            return;
        };
        let loader = Arc::clone(self);
        handle.spawn(async move {
            let status = match loader.api.health().await {
                Ok(_) => ApiStatus::Connected,
                Err(e) => {
                    warn!(error = %e, "Health check failed");
                    ApiStatus::Disconnected
                }
            };
            if !loader.active.load(Ordering::SeqCst) {
                return;
            }
            loader.write().state.api_status = status;
            loader.bump();
        });
    }
}

/// Dashboard view-model. Dropping it deactivates.
pub struct DashboardViewModel {
    loader: Arc<Loader>,
    bus: RefreshBus,
    subscription: Mutex<Option<Subscription>>,
}

impl DashboardViewModel {
    pub fn new(api: Arc<dyn OntologyApi>, bus: RefreshBus) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            loader: Arc::new(Loader {
                api,
                inner: RwLock::new(Inner::default()),
                active: AtomicBool::new(false),
                revision,
            }),
            bus,
            subscription: Mutex::new(None),
        }
    }

    /// Check health, load every collection, and start listening for
    /// refresh events. Must run inside a tokio runtime.
    pub fn activate(&self) {
        if self.loader.active.swap(true, Ordering::SeqCst) {
            debug!("Dashboard already active");
            return;
        }
        {
            // Keep the generation so fetches from an earlier activation
            // cannot count toward the new load.
            let mut inner = self.loader.write();
            *inner = Inner {
                generation: inner.generation,
                ..Inner::default()
            };
        }
        info!("Dashboard activated");

        self.loader.check_health();
        self.loader.load_data();

        let loader = Arc::clone(&self.loader);
        let subscription = self.bus.subscribe(move || {
            info!("Refreshing dashboard data");
            loader.load_data();
        });
        *self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(subscription);
    }

    /// Stop listening for refresh events. In-flight fetches are not
    /// aborted; their results are discarded.
    pub fn deactivate(&self) {
        let subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if self.loader.active.swap(false, Ordering::SeqCst) || subscription.is_some() {
            info!("Dashboard deactivated");
        }
        drop(subscription);
    }

    /// Re-run every collection fetch.
    pub fn reload(&self) {
        self.loader.load_data();
    }

    pub fn snapshot(&self) -> DashboardState {
        self.loader
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    /// Receiver that changes whenever the state does.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.loader.revision.subscribe()
    }

    /// Wait until the latest load has finished.
    pub async fn settled(&self) {
        let mut rx = self.changes();
        loop {
            let state = self.snapshot();
            if !state.loading && state.phase != Phase::Loading {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Drop for DashboardViewModel {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_data, FakeApi};
    use std::time::Duration;

    fn person(uri: &str) -> Person {
        Person {
            uri: uri.into(),
            name: Some(uri.into()),
            age: None,
        }
    }

    fn destination(uri: &str) -> Destination {
        Destination {
            uri: uri.into(),
            name: None,
            kind: Some("Destination".into()),
        }
    }

    #[tokio::test]
    async fn activation_loads_everything() {
        let api = Arc::new(FakeApi::default());
        api.update(|d| d.people = vec![person("ns#Ali")]);
        let bus = RefreshBus::new();
        let vm = DashboardViewModel::new(api.clone(), bus.clone());

        assert_eq!(vm.snapshot().phase, Phase::Idle);
        vm.activate();
        vm.settled().await;

        let state = vm.snapshot();
        assert_eq!(state.phase, Phase::Ready);
        assert!(!state.loading);
        assert_eq!(state.people.len(), 1);
        assert_eq!(api.calls("people"), 1);
        assert_eq!(api.calls("certifications"), 1);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn health_sets_status_label() {
        let api = Arc::new(FakeApi::default());
        api.set_health_ok(false);
        let vm = DashboardViewModel::new(api.clone(), RefreshBus::new());
        vm.activate();
        vm.settled().await;

        let mut rx = vm.changes();
        while vm.snapshot().api_status == ApiStatus::Checking {
            rx.changed().await.unwrap();
        }
        assert_eq!(vm.snapshot().api_status, ApiStatus::Disconnected);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_prior_value_and_spares_others() {
        let api = Arc::new(FakeApi::default());
        api.update(|d| d.people = vec![person("ns#Ali")]);
        let bus = RefreshBus::new();
        let vm = DashboardViewModel::new(api.clone(), bus.clone());
        vm.activate();
        vm.settled().await;

        api.fail(Collection::People);
        api.update(|d| {
            d.people.clear();
            d.destinations = vec![destination("ns#Tunisie"), destination("ns#Djerba")];
        });
        bus.publish();
        vm.settled().await;

        let state = vm.snapshot();
        assert_eq!(state.people, vec![person("ns#Ali")]);
        assert_eq!(state.destinations.len(), 2);
        assert!(state.last_errors.contains_key(&Collection::People));
        assert!(!state.last_errors.contains_key(&Collection::Destinations));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn every_collection_keeps_prior_value_on_failure() {
        let api = Arc::new(FakeApi::seeded());
        let bus = RefreshBus::new();
        let vm = DashboardViewModel::new(api.clone(), bus.clone());
        vm.activate();
        vm.settled().await;
        let loaded = vm.snapshot();
        assert!(loaded.last_errors.is_empty());

        for failing in Collection::ALL {
            api.fail(failing);
            api.update(|d| *d = DashboardState::default());
            bus.publish();
            vm.settled().await;

            let state = vm.snapshot();
            assert_eq!(
                state.table(failing),
                loaded.table(failing),
                "{failing} should keep its last good value"
            );
            assert_eq!(state.last_errors.keys().collect::<Vec<_>>(), vec![&failing]);
            for other in Collection::ALL.into_iter().filter(|c| *c != failing) {
                assert_eq!(
                    state.table(other),
                    DashboardState::default().table(other),
                    "{other} should take the fresh value while {failing} fails"
                );
            }
            assert_eq!(state.phase, Phase::Ready);

            api.recover(failing);
            api.update(|d| *d = sample_data());
            bus.publish();
            vm.settled().await;
            assert!(vm.snapshot().last_errors.is_empty());
        }
    }

    #[tokio::test]
    async fn failure_on_first_load_leaves_empty() {
        let api = Arc::new(FakeApi::default());
        api.fail(Collection::People);
        let vm = DashboardViewModel::new(api.clone(), RefreshBus::new());
        vm.activate();
        vm.settled().await;

        let state = vm.snapshot();
        assert!(state.people.is_empty());
        assert_eq!(state.phase, Phase::Ready);
    }

    #[tokio::test]
    async fn loading_waits_for_every_fetch() {
        let api = Arc::new(FakeApi::default());
        api.set_delay("certifications", Duration::from_millis(150));
        let vm = DashboardViewModel::new(api.clone(), RefreshBus::new());
        vm.activate();

        // Every other fetch, activities included, is done well before this.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(api.calls("activities"), 1);
        assert!(vm.snapshot().loading);
        assert_eq!(vm.snapshot().phase, Phase::Loading);

        vm.settled().await;
        assert!(!vm.snapshot().loading);
    }

    #[tokio::test]
    async fn refresh_event_reloads() {
        let api = Arc::new(FakeApi::default());
        let bus = RefreshBus::new();
        let vm = DashboardViewModel::new(api.clone(), bus.clone());
        vm.activate();
        vm.settled().await;

        bus.publish();
        vm.settled().await;
        assert_eq!(api.calls("stats"), 2);
    }

    #[tokio::test]
    async fn deactivated_dashboard_ignores_refresh() {
        let api = Arc::new(FakeApi::default());
        let bus = RefreshBus::new();
        let vm = DashboardViewModel::new(api.clone(), bus.clone());
        vm.activate();
        vm.settled().await;

        vm.deactivate();
        assert_eq!(bus.publish(), 0);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(api.calls("stats"), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn late_response_after_deactivation_is_dropped() {
        let api = Arc::new(FakeApi::default());
        api.set_delay("people", Duration::from_millis(50));
        api.update(|d| d.people = vec![person("ns#Late")]);
        let vm = DashboardViewModel::new(api.clone(), RefreshBus::new());
        vm.activate();
        vm.deactivate();

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(vm.snapshot().people.is_empty());
    }

    #[tokio::test]
    async fn dropping_view_releases_subscription() {
        let bus = RefreshBus::new();
        {
            let vm = DashboardViewModel::new(Arc::new(FakeApi::default()), bus.clone());
            vm.activate();
            assert_eq!(bus.subscriber_count(), 1);
        }
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn tables_fall_back_to_uri_fragment() {
        let state = DashboardState {
            people: vec![
                Person {
                    uri: "ns#Ali".into(),
                    name: None,
                    age: Some(31),
                },
                Person {
                    uri: "ns#Sara".into(),
                    name: Some("Sara B.".into()),
                    age: None,
                },
            ],
            stats: OntologyStats {
                classes: 4,
                properties: 7,
                individuals: 42,
            },
            ..Default::default()
        };

        let people = state.table(Collection::People);
        assert_eq!(people.headers, vec!["name", "age"]);
        assert_eq!(
            people.rows,
            vec![
                vec!["Ali".to_string(), "31".to_string()],
                vec!["Sara B.".to_string(), "-".to_string()],
            ]
        );
        assert_eq!(state.table(Collection::Stats).rows[0], vec!["4", "7", "42"]);
        assert!(state.table(Collection::Foods).rows.is_empty());
    }
}
