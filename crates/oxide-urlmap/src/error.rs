//! Error types for routing.

use thiserror::Error;

use crate::pattern::PatternError;

/// Router-specific errors.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The route pattern could not be compiled.
    #[error("malformed route pattern `{pattern}`: {source}")]
    MalformedPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },

    /// `match` was called on an empty route table.
    #[error("there must be at least one route defined to match against")]
    NoRoutesDefined,

    /// Route name not found.
    #[error("route `{0}` not found in defined routes")]
    UnknownRouteName(String),

    /// A route with this name is already registered.
    #[error("route `{0}` is already defined")]
    DuplicateRouteName(String),

    /// A hook name did not resolve to a registered callback.
    #[error("{hook} callback `{name}` is not registered")]
    InvalidCallable { hook: &'static str, name: String },

    /// Reverse generation could not fill a required placeholder.
    #[error("cannot build URL for route `{route}`: missing required parameter `{param}`")]
    MissingRequiredParameter { route: String, param: String },

    /// The HTTP method string is not one the router knows.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A declarative route definition could not be read.
    #[error("invalid route definition: {0}")]
    InvalidDefinition(#[from] serde_json::Error),
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
