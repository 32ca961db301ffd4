use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;
use crate::model::{
    Accommodation, Activity, Certification, Destination, Equipment, Food, HealthStatus,
    OntologyStats, Person, Service, Transport,
};
use crate::query::{EntityAck, QueryResponse, ReadResult};

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote data gateway for the ontology backend.
///
/// Each method is one HTTP round trip. Implementations do not retry and do
/// not translate backend errors beyond decoding them into [`ApiError`].
#[async_trait]
pub trait OntologyApi: Send + Sync {
    async fn health(&self) -> ApiResult<HealthStatus>;

    async fn stats(&self) -> ApiResult<OntologyStats>;

    async fn destinations(&self) -> ApiResult<Vec<Destination>>;

    async fn accommodations(&self) -> ApiResult<Vec<Accommodation>>;

    async fn activities(&self) -> ApiResult<Vec<Activity>>;

    async fn transports(&self) -> ApiResult<Vec<Transport>>;

    async fn services(&self) -> ApiResult<Vec<Service>>;

    async fn foods(&self) -> ApiResult<Vec<Food>>;

    async fn equipment(&self) -> ApiResult<Vec<Equipment>>;

    async fn people(&self) -> ApiResult<Vec<Person>>;

    async fn certifications(&self) -> ApiResult<Vec<Certification>>;

    /// Run raw SPARQL through `/query`.
    async fn execute_query(&self, sparql: &str) -> ApiResult<ReadResult>;

    /// Submit a natural-language question (or CRUD command) to `/nl-query`.
    async fn ask(&self, question: &str) -> ApiResult<QueryResponse>;

    /// Create an entity of the given ontology class.
    async fn create_entity(&self, kind: &str, attributes: &Value) -> ApiResult<EntityAck>;

    async fn update_entity(&self, uri: &str, attributes: &Value) -> ApiResult<EntityAck>;

    async fn delete_entity(&self, uri: &str) -> ApiResult<EntityAck>;
}
