//! A single named route.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::encoding;
use crate::error::{Result, RouterError};
use crate::method::Method;
use crate::params::Params;
use crate::pattern::{self, CompiledRoute, OptionalSegment, ParamDescriptor, Segment};

/// Decides whether a structurally matched route is accepted.
///
/// Called with the resolved params, the request method and the path as
/// given to the router. Returning `false` makes the router try the next
/// route.
pub type Condition = Arc<dyn Fn(&Params, Method, &str) -> bool + Send + Sync>;

/// Rewrites the params of an accepted match before they are returned.
pub type AfterMatch = Arc<dyn Fn(Params, Method, &str) -> Params + Send + Sync>;

/// A compiled route with its defaults and hooks.
#[derive(Clone)]
pub struct Route {
    name: String,
    pattern: String,
    compiled: CompiledRoute,
    defaults: Params,
    method_params: HashMap<Method, Params>,
    condition: Option<Condition>,
    after_match: Option<AfterMatch>,
}

impl Route {
    /// Compiles a new route.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::MalformedPattern`] if the pattern does not
    /// compile.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let compiled =
            pattern::compile(pattern).map_err(|source| RouterError::MalformedPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            name: name.into(),
            pattern: pattern.to_string(),
            compiled,
            defaults: Params::new(),
            method_params: HashMap::new(),
            condition: None,
            after_match: None,
        })
    }

    /// The route name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pattern as entered.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled pattern.
    #[must_use]
    pub const fn compiled(&self) -> &CompiledRoute {
        &self.compiled
    }

    /// Returns true if the pattern has no placeholders.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.compiled.is_static()
    }

    /// Compiled regex source, `None` for static routes.
    #[must_use]
    pub fn regex(&self) -> Option<&str> {
        self.compiled.regex()
    }

    /// Every placeholder, in order of appearance.
    #[must_use]
    pub fn named_params(&self) -> &[ParamDescriptor] {
        self.compiled.named_params()
    }

    /// Every optional group, innermost first.
    #[must_use]
    pub fn optional_params(&self) -> &[OptionalSegment] {
        self.compiled.optional_params()
    }

    /// Route-level default params.
    #[must_use]
    pub const fn defaults(&self) -> &Params {
        &self.defaults
    }

    /// Replaces the route-level default params.
    pub fn set_defaults(&mut self, params: impl Into<Params>) -> &mut Self {
        self.defaults = params.into();
        self
    }

    /// Params added when matching with `method`.
    #[must_use]
    pub fn method_defaults(&self, method: Method) -> Option<&Params> {
        self.method_params.get(&method)
    }

    /// Merges params into the overrides for `method`. Existing keys are
    /// overwritten, other keys are kept.
    pub fn set_method_defaults(&mut self, method: Method, params: impl Into<Params>) -> &mut Self {
        self.method_params
            .entry(method)
            .or_default()
            .merge(&params.into());
        self
    }

    /// Merges GET overrides.
    pub fn get(&mut self, params: impl Into<Params>) -> &mut Self {
        self.set_method_defaults(Method::Get, params)
    }

    /// Merges POST overrides.
    pub fn post(&mut self, params: impl Into<Params>) -> &mut Self {
        self.set_method_defaults(Method::Post, params)
    }

    /// Merges PUT overrides.
    pub fn put(&mut self, params: impl Into<Params>) -> &mut Self {
        self.set_method_defaults(Method::Put, params)
    }

    /// Merges DELETE overrides.
    pub fn delete(&mut self, params: impl Into<Params>) -> &mut Self {
        self.set_method_defaults(Method::Delete, params)
    }

    /// The condition hook, if any.
    #[must_use]
    pub const fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// Sets the condition hook.
    pub fn set_condition<F>(&mut self, condition: F) -> &mut Self
    where
        F: Fn(&Params, Method, &str) -> bool + Send + Sync + 'static,
    {
        self.set_shared_condition(Arc::new(condition))
    }

    /// Sets an already shared condition hook.
    pub fn set_shared_condition(&mut self, condition: Condition) -> &mut Self {
        self.condition = Some(condition);
        self
    }

    /// The after-match hook, if any.
    #[must_use]
    pub const fn after_match(&self) -> Option<&AfterMatch> {
        self.after_match.as_ref()
    }

    /// Sets the after-match hook.
    pub fn set_after_match<F>(&mut self, after_match: F) -> &mut Self
    where
        F: Fn(Params, Method, &str) -> Params + Send + Sync + 'static,
    {
        self.set_shared_after_match(Arc::new(after_match))
    }

    /// Sets an already shared after-match hook.
    pub fn set_shared_after_match(&mut self, after_match: AfterMatch) -> &mut Self {
        self.after_match = Some(after_match);
        self
    }

    /// Matches a path against the pattern.
    ///
    /// Returns the raw captured values keyed by placeholder name. Static
    /// routes compare strings and return empty params.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<Params> {
        self.compiled
            .captures(path)
            .map(|captures| captures.into_iter().collect())
    }

    /// Combines every parameter source for a match.
    ///
    /// Lowest to highest precedence: placeholder defaults, route defaults,
    /// overrides for `method`, then `matches`. Values are URL-decoded.
    #[must_use]
    pub fn resolved_params(&self, matches: &Params, method: Method) -> Params {
        let mut params = self.placeholder_defaults();
        params.merge(&self.defaults);
        if let Some(overrides) = self.method_params.get(&method) {
            params.merge(overrides);
        }
        params.merge(matches);
        params.map_values(encoding::decode);
        params
    }

    /// Builds a path from params, the inverse of matching.
    ///
    /// An optional group is written only when `params` carries a value for
    /// its placeholder. Required placeholders fall back to the method
    /// overrides and route defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::MissingRequiredParameter`] if a required
    /// placeholder has no value.
    pub fn build_url(&self, params: &Params, method: Method) -> Result<String> {
        if self.is_static() {
            return Ok(self.render_static());
        }

        let mut values = self.placeholder_defaults();
        values.merge(&self.defaults);
        if let Some(overrides) = self.method_params.get(&method) {
            values.merge(overrides);
        }
        values.merge(params);

        let mut url = String::new();
        self.render(&mut url, &self.compiled.template, &values, params)?;
        trace!(route = %self.name, %url, "built url");
        Ok(url)
    }

    fn placeholder_defaults(&self) -> Params {
        let mut params = Params::new();
        for param in self.compiled.named_params() {
            params.insert_opt(param.name.clone(), param.default_value.clone());
        }
        params
    }

    fn render_static(&self) -> String {
        self.compiled
            .template
            .iter()
            .filter_map(|segment| match segment {
                Segment::Literal(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn render(
        &self,
        out: &mut String,
        segments: &[Segment],
        values: &Params,
        supplied: &Params,
    ) -> Result<()> {
        for segment in segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(index) => {
                    let param = &self.compiled.named_params[*index];
                    let name = &param.name;
                    let value =
                        values
                            .get(name)
                            .ok_or_else(|| RouterError::MissingRequiredParameter {
                                route: self.name.clone(),
                                param: name.clone(),
                            })?;
                    if param.kind.spans_separators() {
                        out.push_str(&encoding::encode_path(value));
                    } else {
                        out.push_str(&encoding::encode(value));
                    }
                }
                Segment::Optional { segment, children } => {
                    let param = &self.compiled.optional_params[*segment].param;
                    if supplied.is_set(param) {
                        self.render(out, children, values, supplied)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("defaults", &self.defaults)
            .field("method_params", &self.method_params)
            .field("condition", &self.condition.is_some())
            .field("after_match", &self.after_match.is_some())
            .finish_non_exhaustive()
    }
}
