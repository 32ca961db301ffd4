use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use ontodash_core::{
    Accommodation, Activity, ApiError, ApiResult, Certification, Collection, Destination,
    EntityAck, Equipment, ErrorEnvelope, Food, HealthStatus, OntologyApi, OntologyStats, Person,
    QueryResponse, ReadResult, Service, Transport,
};

/// Default backend location.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// [`OntologyApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base(base_url.into()),
        }
    }

    /// Build with an optional overall request timeout. `None` leaves
    /// requests unbounded.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: normalize_base(base_url.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = read_body(path, response).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<Value> {
        debug!(path, method = %method, "Sending JSON request");
        let response = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = read_body(path, response).await?;

        // The query and entity endpoints may report failure inside a 2xx.
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(backend_error(200, &body));
        }
        Ok(body)
    }

    async fn collection<T: DeserializeOwned>(&self, collection: Collection) -> ApiResult<Vec<T>> {
        self.get(collection.path()).await
    }
}

fn normalize_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}

/// Read the body bytes, turning non-2xx statuses into [`ApiError::Backend`].
async fn read_bytes(path: &str, response: Response) -> ApiResult<Vec<u8>> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?
        .to_vec();

    if !status.is_success() {
        warn!(path, status = status.as_u16(), "Backend returned an error status");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        return Err(backend_error(status.as_u16(), &body));
    }
    Ok(bytes)
}

async fn read_body(path: &str, response: Response) -> ApiResult<Value> {
    let bytes = read_bytes(path, response).await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

fn backend_error(status: u16, body: &Value) -> ApiError {
    let envelope: ErrorEnvelope = serde_json::from_value(body.clone()).unwrap_or_default();
    ApiError::Backend {
        status,
        error: envelope.error,
        suggestion: envelope.suggestion,
    }
}

#[async_trait]
impl OntologyApi for HttpGateway {
    /// Any 2xx counts as healthy, whatever the body looks like.
    async fn health(&self) -> ApiResult<HealthStatus> {
        debug!(path = "/health", "GET");
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let bytes = read_bytes("/health", response).await?;
        Ok(serde_json::from_slice::<Value>(&bytes)
            .map(HealthStatus::from_value)
            .unwrap_or_default())
    }

    async fn stats(&self) -> ApiResult<OntologyStats> {
        self.get(Collection::Stats.path()).await
    }

    async fn destinations(&self) -> ApiResult<Vec<Destination>> {
        self.collection(Collection::Destinations).await
    }

    async fn accommodations(&self) -> ApiResult<Vec<Accommodation>> {
        self.collection(Collection::Accommodations).await
    }

    async fn activities(&self) -> ApiResult<Vec<Activity>> {
        self.collection(Collection::Activities).await
    }

    async fn transports(&self) -> ApiResult<Vec<Transport>> {
        self.collection(Collection::Transports).await
    }

    async fn services(&self) -> ApiResult<Vec<Service>> {
        self.collection(Collection::Services).await
    }

    async fn foods(&self) -> ApiResult<Vec<Food>> {
        self.collection(Collection::Foods).await
    }

    async fn equipment(&self) -> ApiResult<Vec<Equipment>> {
        self.collection(Collection::Equipment).await
    }

    async fn people(&self) -> ApiResult<Vec<Person>> {
        self.collection(Collection::People).await
    }

    async fn certifications(&self) -> ApiResult<Vec<Certification>> {
        self.collection(Collection::Certifications).await
    }

    async fn execute_query(&self, sparql: &str) -> ApiResult<ReadResult> {
        let body = self
            .send(Method::POST, "/query", &json!({ "query": sparql }))
            .await?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn ask(&self, question: &str) -> ApiResult<QueryResponse> {
        let body = self
            .send(Method::POST, "/nl-query", &json!({ "question": question }))
            .await?;
        QueryResponse::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create_entity(&self, kind: &str, attributes: &Value) -> ApiResult<EntityAck> {
        let body = self
            .send(
                Method::POST,
                "/entity/create",
                &json!({ "type": kind, "attributes": attributes }),
            )
            .await?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn update_entity(&self, uri: &str, attributes: &Value) -> ApiResult<EntityAck> {
        let body = self
            .send(
                Method::PUT,
                "/entity/update",
                &json!({ "uri": uri, "attributes": attributes }),
            )
            .await?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn delete_entity(&self, uri: &str) -> ApiResult<EntityAck> {
        let body = self
            .send(Method::DELETE, "/entity/delete", &json!({ "uri": uri }))
            .await?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
