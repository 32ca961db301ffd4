//! Scripted in-memory gateway for view-model tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use ontodash_core::{
    Accommodation, Activity, ApiError, ApiResult, Certification, Collection, Destination,
    EntityAck, Equipment, Food, HealthStatus, OntologyApi, OntologyStats, Person, QueryResponse,
    ReadResult, Service, Transport,
};

use crate::DashboardState;

/// Collections are served from a [`DashboardState`]; any of them can be
/// switched to failing independently.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<HashMap<&'static str, usize>>,
    delays: Mutex<HashMap<&'static str, Duration>>,
    health_down: AtomicBool,
    data: Mutex<DashboardState>,
    failing: Mutex<HashSet<Collection>>,
    answers: Mutex<VecDeque<ApiResult<QueryResponse>>>,
}

impl FakeApi {
    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().unwrap().get(op).copied().unwrap_or(0)
    }

    pub fn set_delay(&self, op: &'static str, delay: Duration) {
        self.delays.lock().unwrap().insert(op, delay);
    }

    pub fn set_health_ok(&self, ok: bool) {
        self.health_down.store(!ok, Ordering::SeqCst);
    }

    pub fn seeded() -> Self {
        let api = Self::default();
        *api.data.lock().unwrap() = sample_data();
        api
    }

    /// Edit what the collection endpoints return from now on.
    pub fn update(&self, edit: impl FnOnce(&mut DashboardState)) {
        edit(&mut self.data.lock().unwrap());
    }

    pub fn fail(&self, collection: Collection) {
        self.failing.lock().unwrap().insert(collection);
    }

    pub fn recover(&self, collection: Collection) {
        self.failing.lock().unwrap().remove(&collection);
    }

    /// Queue the reply for the next `ask`.
    pub fn push_answer(&self, answer: ApiResult<QueryResponse>) {
        self.answers.lock().unwrap().push_back(answer);
    }

    async fn enter(&self, op: &'static str) {
        *self.calls.lock().unwrap().entry(op).or_default() += 1;
        let delay = self.delays.lock().unwrap().get(op).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    async fn fetch<T>(
        &self,
        collection: Collection,
        pick: impl FnOnce(&DashboardState) -> T,
    ) -> ApiResult<T> {
        self.enter(collection.label()).await;
        if self.failing.lock().unwrap().contains(&collection) {
            return Err(ApiError::Backend {
                status: 500,
                error: Some(format!("{collection} indisponible")),
                suggestion: None,
            });
        }
        Ok(pick(&self.data.lock().unwrap()))
    }
}

/// One record in every collection.
pub fn sample_data() -> DashboardState {
    DashboardState {
        stats: OntologyStats {
            classes: 9,
            properties: 20,
            individuals: 42,
        },
        destinations: vec![Destination {
            uri: "ns#Djerba".into(),
            name: Some("Djerba".into()),
            kind: Some("Ile".into()),
        }],
        accommodations: vec![Accommodation {
            uri: "ns#RiadZitouna".into(),
            name: None,
            kind: Some("Riad".into()),
            certification: Some("ns#EcoLabel".into()),
        }],
        activities: vec![Activity {
            uri: "ns#Randonnee".into(),
            name: Some("Randonnée".into()),
            duration: Some(3),
            footprint: Some(0.5),
            kind: None,
        }],
        transports: vec![Transport {
            uri: "ns#Velo".into(),
            kind: Some("Vélo".into()),
            footprint: Some(0.0),
        }],
        services: vec![Service {
            uri: "ns#Guide".into(),
            name: Some("Guide local".into()),
            price: Some(40.0),
        }],
        foods: vec![Food {
            uri: "ns#Couscous".into(),
            name: None,
        }],
        equipment: vec![Equipment {
            uri: "ns#Gourde".into(),
            name: Some("Gourde".into()),
        }],
        people: vec![Person {
            uri: "ns#Ali".into(),
            name: Some("Ali".into()),
            age: Some(31),
        }],
        certifications: vec![Certification {
            uri: "ns#EcoLabel".into(),
            name: Some("Eco Label".into()),
            validity_date: Some("2027-01-01".into()),
        }],
        ..Default::default()
    }
}

#[async_trait]
impl OntologyApi for FakeApi {
    async fn health(&self) -> ApiResult<HealthStatus> {
        self.enter("health").await;
        if self.health_down.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection refused".into()));
        }
        Ok(HealthStatus::default())
    }

    async fn stats(&self) -> ApiResult<OntologyStats> {
        self.fetch(Collection::Stats, |d| d.stats).await
    }

    async fn destinations(&self) -> ApiResult<Vec<Destination>> {
        self.fetch(Collection::Destinations, |d| d.destinations.clone()).await
    }

    async fn accommodations(&self) -> ApiResult<Vec<Accommodation>> {
        self.fetch(Collection::Accommodations, |d| d.accommodations.clone()).await
    }

    async fn activities(&self) -> ApiResult<Vec<Activity>> {
        self.fetch(Collection::Activities, |d| d.activities.clone()).await
    }

    async fn transports(&self) -> ApiResult<Vec<Transport>> {
        self.fetch(Collection::Transports, |d| d.transports.clone()).await
    }

    async fn services(&self) -> ApiResult<Vec<Service>> {
        self.fetch(Collection::Services, |d| d.services.clone()).await
    }

    async fn foods(&self) -> ApiResult<Vec<Food>> {
        self.fetch(Collection::Foods, |d| d.foods.clone()).await
    }

    async fn equipment(&self) -> ApiResult<Vec<Equipment>> {
        self.fetch(Collection::Equipment, |d| d.equipment.clone()).await
    }

    async fn people(&self) -> ApiResult<Vec<Person>> {
        self.fetch(Collection::People, |d| d.people.clone()).await
    }

    async fn certifications(&self) -> ApiResult<Vec<Certification>> {
        self.fetch(Collection::Certifications, |d| d.certifications.clone()).await
    }

    async fn execute_query(&self, _sparql: &str) -> ApiResult<ReadResult> {
        self.enter("execute_query").await;
        Ok(ReadResult::default())
    }

    async fn ask(&self, _question: &str) -> ApiResult<QueryResponse> {
        self.enter("ask").await;
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(QueryResponse::Read(ReadResult::default())))
    }

    async fn create_entity(&self, _kind: &str, _attributes: &Value) -> ApiResult<EntityAck> {
        self.enter("create_entity").await;
        Ok(EntityAck::default())
    }

    async fn update_entity(&self, _uri: &str, _attributes: &Value) -> ApiResult<EntityAck> {
        self.enter("update_entity").await;
        Ok(EntityAck::default())
    }

    async fn delete_entity(&self, _uri: &str) -> ApiResult<EntityAck> {
        self.enter("delete_entity").await;
        Ok(EntityAck::default())
    }
}
