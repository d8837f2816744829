//! Main router implementation.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{Result, RouterError};
use crate::method::Method;
use crate::params::Params;
use crate::route::{AfterMatch, Condition, Route};

/// An ordered table of named routes.
///
/// Routes are tried in registration order and the first accepted match
/// wins.
#[derive(Default)]
pub struct Router {
    /// Registered routes, in priority order.
    routes: Vec<Route>,
    /// Route name to position in `routes`.
    index: HashMap<String, usize>,
    /// Position of the route accepted by the last `match_path`.
    last_matched: Option<usize>,
    /// Hooks that declarative definitions can refer to by name.
    pub(crate) conditions: HashMap<String, Condition>,
    pub(crate) after_matches: HashMap<String, AfterMatch>,
}

impl Router {
    /// Creates a new empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route at the end of the table.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::DuplicateRouteName`] if the name is taken, or
    /// [`RouterError::MalformedPattern`] if the pattern does not compile.
    /// The table is left untouched in both cases.
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_urlmap::{Method, Router};
    ///
    /// let mut router = Router::new();
    /// router
    ///     .add_route("default", "/<:module>/<#id>(.<:format>)")?
    ///     .set_defaults([("format", "html"), ("action", "index")])
    ///     .get([("action", "view")]);
    ///
    /// let params = router.match_path(Method::Get, "/user/235")?;
    /// assert_eq!(params.get("action"), Some("view"));
    /// assert_eq!(params.get("format"), Some("html"));
    /// # Ok::<(), oxide_urlmap::RouterError>(())
    /// ```
    pub fn add_route(&mut self, name: &str, pattern: &str) -> Result<&mut Route> {
        if self.index.contains_key(name) {
            return Err(RouterError::DuplicateRouteName(name.to_string()));
        }

        let route = Route::new(name, pattern)?;
        debug!(route = name, pattern, is_static = route.is_static(), "registered route");

        let position = self.routes.len();
        self.index.insert(name.to_string(), position);
        self.routes.push(route);
        Ok(&mut self.routes[position])
    }

    /// Adds a route with route-level defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Router::add_route`].
    pub fn add_route_with_defaults(
        &mut self,
        name: &str,
        pattern: &str,
        defaults: impl Into<Params>,
    ) -> Result<&mut Route> {
        let route = self.add_route(name, pattern)?;
        route.set_defaults(defaults);
        Ok(route)
    }

    /// Registers a condition that definitions can refer to by name.
    pub fn register_condition<F>(&mut self, name: &str, condition: F) -> &mut Self
    where
        F: Fn(&Params, Method, &str) -> bool + Send + Sync + 'static,
    {
        self.conditions.insert(name.to_string(), Arc::new(condition));
        self
    }

    /// Registers an after-match hook that definitions can refer to by name.
    pub fn register_after_match<F>(&mut self, name: &str, after_match: F) -> &mut Self
    where
        F: Fn(Params, Method, &str) -> Params + Send + Sync + 'static,
    {
        self.after_matches
            .insert(name.to_string(), Arc::new(after_match));
        self
    }

    /// Iterates over the routes in priority order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Looks up a route by name.
    #[must_use]
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.index.get(name).map(|&i| &self.routes[i])
    }

    /// Looks up a route by name for modification.
    pub fn route_mut(&mut self, name: &str) -> Option<&mut Route> {
        self.index.get(name).map(|&i| &mut self.routes[i])
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Matches a request against the table.
    ///
    /// Routes are tried in registration order. A structural match whose
    /// condition returns `false` is discarded and the scan continues. The
    /// first accepted route's params, passed through its after-match hook,
    /// are returned. If nothing is accepted the result is empty.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NoRoutesDefined`] if the table is empty.
    pub fn match_path(&mut self, method: Method, path: &str) -> Result<Params> {
        if self.routes.is_empty() {
            return Err(RouterError::NoRoutesDefined);
        }

        self.last_matched = None;
        let normalized = path.trim_matches('/');

        for (position, route) in self.routes.iter().enumerate() {
            let Some(matches) = route.match_path(normalized) else {
                continue;
            };
            let params = route.resolved_params(&matches, method);

            if let Some(condition) = route.condition() {
                if !condition(&params, method, path) {
                    trace!(route = route.name(), %method, path, "condition rejected match");
                    continue;
                }
            }

            debug!(route = route.name(), %method, path, "matched route");
            self.last_matched = Some(position);

            return Ok(match route.after_match() {
                Some(after_match) => after_match(params, method, path),
                None => params,
            });
        }

        trace!(%method, path, "no route matched");
        Ok(Params::new())
    }

    /// Name of the route accepted by the last match, if any.
    #[must_use]
    pub fn last_matched_route_name(&self) -> Option<&str> {
        self.last_matched_route().map(Route::name)
    }

    /// The route accepted by the last match, if any.
    #[must_use]
    pub fn last_matched_route(&self) -> Option<&Route> {
        self.last_matched.map(|i| &self.routes[i])
    }

    /// Generates a URL for a named route using GET overrides.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::UnknownRouteName`] for an unknown name, or
    /// [`RouterError::MissingRequiredParameter`] if a required placeholder
    /// cannot be filled.
    pub fn url_for(&self, name: &str, params: &Params) -> Result<String> {
        self.url_for_method(name, params, Method::Get)
    }

    /// Generates a URL for a named route.
    ///
    /// # Errors
    ///
    /// Same as [`Router::url_for`].
    pub fn url_for_method(&self, name: &str, params: &Params, method: Method) -> Result<String> {
        let route = self
            .route(name)
            .ok_or_else(|| RouterError::UnknownRouteName(name.to_string()))?;
        route.build_url(params, method)
    }

    /// Removes every route and forgets the last match. Registered hooks are
    /// kept.
    pub fn reset(&mut self) {
        self.routes.clear();
        self.index.clear();
        self.last_matched = None;
    }
}
