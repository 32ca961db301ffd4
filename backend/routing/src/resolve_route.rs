/// Route resolver — map a client-side path to the view that renders it.
///
/// The table is `""` and `dashboard` → dashboard, `query` → query, and a
/// catch-all that redirects to the root.
use serde::{Deserialize, Serialize};
use tracing::debug;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Dashboard,
    Query,
}

impl View {
    /// Canonical path of the view.
    pub fn path(&self) -> &'static str {
        match self {
            View::Dashboard => "/dashboard",
            View::Query => "/query",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Query => "Query",
        }
    }

    /// Next view in tab order.
    pub fn next(&self) -> View {
        match self {
            View::Dashboard => View::Query,
            View::Query => View::Dashboard,
        }
    }
}

// ---------------------------------------------------------------------------
// Route binding
// ---------------------------------------------------------------------------

/// An explicit path → view binding. Paths are stored without slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RouteBinding {
    path: String,
    view: View,
}

// ---------------------------------------------------------------------------
// Route result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteResult {
    /// Render this view.
    Render(View),
    /// Unknown path; navigate to `to` instead.
    Redirect { to: String },
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RouteResolver {
    bindings: Vec<RouteBinding>,
    fallback: String,
}

impl Default for RouteResolver {
    fn default() -> Self {
        Self {
            bindings: vec![
                RouteBinding { path: String::new(), view: View::Dashboard },
                RouteBinding { path: "dashboard".into(), view: View::Dashboard },
                RouteBinding { path: "query".into(), view: View::Query },
            ],
            fallback: "/".into(),
        }
    }
}

impl RouteResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve one path against the table without following redirects.
    pub fn resolve(&self, path: &str) -> RouteResult {
        let key = normalize(path);
        match self.bindings.iter().find(|b| b.path == key) {
            Some(binding) => {
                debug!("[Router] {} → {:?}", path, binding.view);
                RouteResult::Render(binding.view)
            }
            None => {
                debug!("[Router] {} unmatched, redirecting to {}", path, self.fallback);
                RouteResult::Redirect { to: self.fallback.clone() }
            }
        }
    }

    /// Resolve a path to a view, following the catch-all redirect.
    pub fn navigate(&self, path: &str) -> View {
        match self.resolve(path) {
            RouteResult::Render(view) => view,
            RouteResult::Redirect { to } => match self.resolve(&to) {
                RouteResult::Render(view) => view,
                RouteResult::Redirect { .. } => View::Dashboard,
            },
        }
    }
}

/// Resolve `path` against the default route table.
pub fn resolve_route(path: &str) -> RouteResult {
    RouteResolver::default().resolve(path)
}

fn normalize(path: &str) -> String {
    path.trim().trim_matches('/').to_string()
}
