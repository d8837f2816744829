#![allow(dead_code)]

use oxide_urlmap::{Method, Params, Router};

/// A router with the REST route used across the matching tests.
pub fn rest_router() -> Router {
    let mut router = Router::new();
    router
        .add_route("default", "/<:module>/<#id>(.<:format>)")
        .unwrap_or_else(|e| panic!("Failed to add route: {e}"))
        .set_defaults([("format", "html"), ("action", "index")])
        .get([("action", "view")])
        .put([("action", "update")])
        .delete([("action", "delete")]);
    router
}

/// A router with the routes used across the reverse routing tests.
pub fn reverse_router() -> Router {
    let mut router = Router::new();
    for (name, pattern) in [
        ("mvc", "<:controller>/<:action>.<:format>"),
        ("mvc_item", "<:controller>/<:action>/<#id>.<:format>"),
        ("blog_post", "<:dir>/<#year>/<#month>/<:slug>"),
        ("optional", r"<:controller>(/<:action>(/<:id|\d+>))"),
    ] {
        router
            .add_route(name, pattern)
            .unwrap_or_else(|e| panic!("Failed to add route {name}: {e}"));
    }
    router
}

pub fn matched(router: &mut Router, method: Method, path: &str) -> Params {
    router
        .match_path(method, path)
        .unwrap_or_else(|e| panic!("Failed to match: {method} {path}\nError: {e:?}"))
}

pub fn url(router: &Router, name: &str, params: &Params) -> String {
    router
        .url_for(name, params)
        .unwrap_or_else(|e| panic!("Failed to build url for {name}\nError: {e:?}"))
}

pub fn sorted_keys(params: &Params) -> Vec<String> {
    let mut keys: Vec<String> = params.keys().map(str::to_string).collect();
    keys.sort();
    keys
}
