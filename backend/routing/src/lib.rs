//! Client-side routes of the ontology dashboard.

pub mod resolve_route;

pub use resolve_route::{resolve_route, RouteResolver, RouteResult, View};
