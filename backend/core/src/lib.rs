pub mod error;
pub mod model;
pub mod query;
pub mod refresh;
pub mod traits;

pub use error::{ApiError, CONNECTION_ERROR_MESSAGE, UNKNOWN_ERROR_MESSAGE};
pub use model::{
    short_name, Accommodation, Activity, Certification, Collection, Destination, Equipment, Food,
    HealthStatus, OntologyStats, Person, Service, Transport,
};
pub use query::{
    cell_text, row_keys, EntityAck, ErrorEnvelope, MutationResult, QueryResponse, ReadResult, Row,
};
pub use refresh::{RefreshBus, Subscription};
pub use traits::{ApiResult, OntologyApi};
