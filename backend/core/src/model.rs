use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Ontology summary
// ---------------------------------------------------------------------------

/// Class / property / individual counts reported by `/ontology/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyStats {
    #[serde(default)]
    pub classes: u64,
    #[serde(default)]
    pub properties: u64,
    #[serde(default)]
    pub individuals: u64,
}

/// Opaque body of `/health`. Only success or failure of the call matters,
/// so decoding never fails: non-string values are kept as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => Self {
                status: map.remove("status").and_then(loose_text),
                message: map.remove("message").and_then(loose_text),
            },
            other => Self {
                status: loose_text(other),
                message: None,
            },
        }
    }
}

impl<'de> Deserialize<'de> for HealthStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(HealthStatus::from_value)
    }
}

fn loose_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------
//
// Every record is keyed by `uri`. All other properties may be left unset in
// the ontology, so they decode to `None` on `null` or a missing key.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub uri: String,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    pub uri: String,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub certification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub uri: String,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
    /// Duration in hours.
    #[serde(rename = "duree", default)]
    pub duration: Option<i64>,
    /// Carbon footprint.
    #[serde(rename = "empreinte", default)]
    pub footprint: Option<f64>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transport {
    pub uri: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(rename = "empreinte", default)]
    pub footprint: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub uri: String,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
    #[serde(rename = "prix", default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub uri: String,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub uri: String,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub uri: String,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub uri: String,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
    #[serde(rename = "dateValidite", default)]
    pub validity_date: Option<String>,
}

/// The dashboard's collections, in the order they are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Stats,
    Destinations,
    Accommodations,
    Activities,
    Transports,
    Services,
    Foods,
    Equipment,
    People,
    Certifications,
}

impl Collection {
    pub const ALL: [Collection; 10] = [
        Collection::Stats,
        Collection::Destinations,
        Collection::Accommodations,
        Collection::Activities,
        Collection::Transports,
        Collection::Services,
        Collection::Foods,
        Collection::Equipment,
        Collection::People,
        Collection::Certifications,
    ];

    /// Path of the read endpoint, relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Stats => "/ontology/stats",
            Collection::Destinations => "/destinations",
            Collection::Accommodations => "/hebergements",
            Collection::Activities => "/activites",
            Collection::Transports => "/transports",
            Collection::Services => "/services",
            Collection::Foods => "/nourritures",
            Collection::Equipment => "/equipements",
            Collection::People => "/personnes",
            Collection::Certifications => "/certifications",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Collection::Stats => "stats",
            Collection::Destinations => "destinations",
            Collection::Accommodations => "accommodations",
            Collection::Activities => "activities",
            Collection::Transports => "transports",
            Collection::Services => "services",
            Collection::Foods => "foods",
            Collection::Equipment => "equipment",
            Collection::People => "people",
            Collection::Certifications => "certifications",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fragment of an ontology URI after `#`, or the whole URI when there is none.
pub fn short_name(uri: &str) -> &str {
    match uri.split_once('#') {
        Some((_, fragment)) => fragment,
        None => uri,
    }
}
