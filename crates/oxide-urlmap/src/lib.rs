//! # oxide-urlmap
//!
//! Maps request paths to named parameters, and named routes back to paths.
//!
//! This crate provides:
//! - A route pattern compiler with typed and optional placeholders
//! - First-match routing over an ordered table of named routes
//! - Route defaults and per-method overrides
//! - Condition and after-match hooks
//! - Reverse URL generation from route names and params
//!
//! ## Quick Start
//!
//! ```
//! use oxide_urlmap::{Method, Params, Router};
//!
//! let mut router = Router::new();
//! router
//!     .add_route("default", "/<:module>/<#id>(.<:format>)")?
//!     .set_defaults([("format", "html"), ("action", "index")])
//!     .get([("action", "view")])
//!     .put([("action", "update")]);
//!
//! let params = router.match_path(Method::Get, "/event/164.json")?;
//! assert_eq!(params.get("module"), Some("event"));
//! assert_eq!(params.get("id"), Some("164"));
//! assert_eq!(params.get("format"), Some("json"));
//! assert_eq!(params.get("action"), Some("view"));
//! assert_eq!(router.last_matched_route_name(), Some("default"));
//! # Ok::<(), oxide_urlmap::RouterError>(())
//! ```
//!
//! ## Pattern Syntax
//!
//! | Syntax | Matches |
//! |--------|---------|
//! | `<:name>` | letters, digits, `_`, `-`, `+`, `%`, whitespace |
//! | `<#name>` | digits |
//! | `<*name>` | anything, including `/` |
//! | `<:name\|regex>` | the inline regex |
//! | `( ... )` | an optional group around one placeholder; groups nest |
//!
//! ## Reverse Routing
//!
//! ```
//! use oxide_urlmap::{Params, Router};
//!
//! let mut router = Router::new();
//! router
//!     .add_route("list", "<:controller>(.<:format>)")?
//!     .set_defaults([("format", "html")]);
//!
//! // Optional groups are only written when the caller supplies a value.
//! let url = router.url_for("list", &Params::from([("controller", "events")]))?;
//! assert_eq!(url, "events");
//!
//! let url = router.url_for("list", &Params::from([("controller", "events"), ("format", "xml")]))?;
//! assert_eq!(url, "events.xml");
//! # Ok::<(), oxide_urlmap::RouterError>(())
//! ```
//!
//! ## Conditions
//!
//! ```
//! use oxide_urlmap::{Method, Router};
//!
//! let mut router = Router::new();
//! router
//!     .add_route("admin", "/admin/<:page>")?
//!     .set_condition(|_, method, _| method == Method::Get);
//! router.add_route("fallback", "/<*path>")?;
//!
//! router.match_path(Method::Post, "/admin/users")?;
//! assert_eq!(router.last_matched_route_name(), Some("fallback"));
//! # Ok::<(), oxide_urlmap::RouterError>(())
//! ```

mod definition;
mod encoding;
mod error;
mod method;
mod params;
pub mod pattern;
mod route;
mod router;

pub use definition::RouteDefinition;
pub use encoding::{decode, encode, encode_path};
pub use error::{Result, RouterError};
pub use method::Method;
pub use params::Params;
pub use pattern::{CompiledRoute, OptionalSegment, ParamDescriptor, ParamKind, PatternError};
pub use route::{AfterMatch, Condition, Route};
pub use router::Router;
