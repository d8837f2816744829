//! Declarative route definitions.
//!
//! A route table can be described as data and loaded in one go. Hooks are
//! referred to by the name they were registered under on the [`Router`].
//!
//! ```
//! use oxide_urlmap::{Method, Params, RouteDefinition, Router};
//!
//! let json = r#"[
//!     {
//!         "name": "default",
//!         "pattern": "/<:module>/<#id>(.<:format>)",
//!         "defaults": {"format": "html", "action": "index"},
//!         "methods": {"GET": {"action": "view"}, "DELETE": {"action": "delete"}}
//!     }
//! ]"#;
//!
//! let mut router = Router::new();
//! router.add_definitions(&RouteDefinition::list_from_json(json)?)?;
//!
//! let params = router.match_path(Method::Delete, "/event/164")?;
//! assert_eq!(params.get("action"), Some("delete"));
//! # Ok::<(), oxide_urlmap::RouterError>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RouterError};
use crate::method::Method;
use crate::params::Params;
use crate::route::Route;
use crate::router::Router;

/// One route described as data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDefinition {
    /// Unique route name.
    pub name: String,
    /// Route pattern.
    pub pattern: String,
    /// Route-level defaults.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defaults: BTreeMap<String, String>,
    /// Per-method overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub methods: BTreeMap<Method, BTreeMap<String, String>>,
    /// Name of a condition registered on the router.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Name of an after-match hook registered on the router.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_match: Option<String>,
}

impl RouteDefinition {
    /// Creates a definition with no defaults or hooks.
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Parses a JSON array of definitions.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidDefinition`] if the JSON does not
    /// describe a list of definitions.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Router {
    /// Adds a route from its definition.
    ///
    /// Hook names are resolved before anything is registered, so a failed
    /// definition leaves the table untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidCallable`] if a hook name is not
    /// registered, plus every error of [`Router::add_route`].
    pub fn add_definition(&mut self, definition: &RouteDefinition) -> Result<&mut Route> {
        let condition = definition
            .condition
            .as_deref()
            .map(|name| {
                self.conditions
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RouterError::InvalidCallable {
                        hook: "condition",
                        name: name.to_string(),
                    })
            })
            .transpose()?;
        let after_match = definition
            .after_match
            .as_deref()
            .map(|name| {
                self.after_matches
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RouterError::InvalidCallable {
                        hook: "after match",
                        name: name.to_string(),
                    })
            })
            .transpose()?;

        let route = self.add_route(&definition.name, &definition.pattern)?;
        route.set_defaults(to_params(&definition.defaults));
        for (method, overrides) in &definition.methods {
            route.set_method_defaults(*method, to_params(overrides));
        }
        if let Some(condition) = condition {
            route.set_shared_condition(condition);
        }
        if let Some(after_match) = after_match {
            route.set_shared_after_match(after_match);
        }
        Ok(route)
    }

    /// Adds routes from definitions, in order.
    ///
    /// Stops at the first failing definition. Routes added before it stay
    /// registered.
    ///
    /// # Errors
    ///
    /// Same as [`Router::add_definition`].
    pub fn add_definitions(&mut self, definitions: &[RouteDefinition]) -> Result<()> {
        for definition in definitions {
            self.add_definition(definition)?;
        }
        debug!(count = definitions.len(), "loaded route definitions");
        Ok(())
    }
}

fn to_params(map: &BTreeMap<String, String>) -> Params {
    map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}
