//! HTTP gateway to the ontology REST backend.
//!
//! One GET per dashboard collection, POST `/query` for raw SPARQL, POST
//! `/nl-query` for natural-language questions, and the entity CRUD routes.

pub mod http;

pub use http::{HttpGateway, DEFAULT_BASE_URL};
