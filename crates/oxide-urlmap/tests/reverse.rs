//! Tests for generating URLs from route names.

mod common;
use common::*;

use oxide_urlmap::{Method, Params, Router, RouterError};

#[test]
fn test_static_route_is_returned_as_written() {
    let mut router = reverse_router();
    router.add_route("login", "/user/login").unwrap();
    assert_eq!(url(&router, "login", &Params::new()), "/user/login");
}

#[test]
fn test_mvc_action() {
    let router = reverse_router();
    let params = Params::from([
        ("controller", "user"),
        ("action", "profile"),
        ("format", "html"),
    ]);
    assert_eq!(url(&router, "mvc", &params), "user/profile.html");
}

#[test]
fn test_mvc_item() {
    let router = reverse_router();
    let params = Params::from([
        ("controller", "blog"),
        ("action", "show"),
        ("id", "55"),
        ("format", "json"),
    ]);
    assert_eq!(url(&router, "mvc_item", &params), "blog/show/55.json");
}

#[test]
fn test_blog_post() {
    let router = reverse_router();
    let params = Params::from([
        ("dir", "blog"),
        ("year", "2009"),
        ("month", "10"),
        ("slug", "blog-post-title"),
    ]);
    assert_eq!(url(&router, "blog_post", &params), "blog/2009/10/blog-post-title");
}

#[test]
fn test_route_defaults_fill_required_placeholders() {
    let mut router = reverse_router();
    router
        .add_route("blog_post_x", "<:dir>/<#year>/<#month>/<:slug>")
        .unwrap()
        .set_defaults([("dir", "blog")]);

    let params = Params::from([("year", "2009"), ("month", "10"), ("slug", "blog-post-title")]);
    assert_eq!(url(&router, "blog_post_x", &params), "blog/2009/10/blog-post-title");
}

#[test]
fn test_missing_required_parameter() {
    let router = reverse_router();
    let err = router
        .url_for("blog_post", &Params::from([("year", "2009"), ("month", "10")]))
        .unwrap_err();

    match err {
        RouterError::MissingRequiredParameter { route, param } => {
            assert_eq!(route, "blog_post");
            assert_eq!(param, "dir");
        }
        other => panic!("Expected MissingRequiredParameter, got {other:?}"),
    }
}

#[test]
fn test_required_default_after_literal_dot() {
    let mut router = reverse_router();
    router
        .add_route("index_action", "<:action>.<:format>")
        .unwrap()
        .set_defaults([("format", "html")]);

    assert_eq!(
        url(&router, "index_action", &Params::from([("action", "new")])),
        "new.html"
    );
    assert_eq!(
        url(&router, "index_action", &Params::from([("action", "new"), ("format", "xml")])),
        "new.xml"
    );
}

#[test]
fn test_optional_group_only_when_supplied() {
    let mut router = reverse_router();
    router
        .add_route("test", "<:controller>(.<:format>)")
        .unwrap()
        .set_defaults([("format", "html")]);

    assert_eq!(url(&router, "test", &Params::from([("controller", "events")])), "events");
    assert_eq!(
        url(&router, "test", &Params::from([("controller", "events"), ("format", "html")])),
        "events.html"
    );
    assert_eq!(
        url(&router, "test", &Params::from([("controller", "events"), ("format", "xml")])),
        "events.xml"
    );
}

#[test]
fn test_space_becomes_plus() {
    let mut router = reverse_router();
    router.add_route("match", "<:match>").unwrap();
    assert_eq!(
        url(&router, "match", &Params::from([("match", "blog post")])),
        "blog+post"
    );
}

#[test]
fn test_nested_optional_route() {
    let router = reverse_router();
    let params = Params::from([("controller", "user"), ("action", "view"), ("id", "500")]);
    assert_eq!(url(&router, "optional", &params), "user/view/500");
}

#[test]
fn test_method_overrides_used_for_method() {
    let mut router = Router::new();
    router
        .add_route("form", "<:controller>/<:action>")
        .unwrap()
        .put([("action", "update")]);

    let params = Params::from([("controller", "post")]);
    assert!(router.url_for("form", &params).is_err());
    assert_eq!(
        router.url_for_method("form", &params, Method::Put).unwrap(),
        "post/update"
    );
}

#[test]
fn test_unknown_route_name() {
    let router = reverse_router();
    assert!(matches!(
        router.url_for("missing", &Params::new()),
        Err(RouterError::UnknownRouteName(name)) if name == "missing"
    ));
}

/// Matching, rebuilding and matching again yields the same params.
#[test]
fn test_wildcard_keeps_separators() {
    let mut router = Router::new();
    router.add_route("files", "/files/<*path>").unwrap();
    assert_eq!(
        url(&router, "files", &Params::from([("path", "docs/readme.md")])),
        "/files/docs/readme.md"
    );
}

#[test]
fn test_group_at_either_edge() {
    let mut router = Router::new();
    router.add_route("about", "(/<:lang>)/about").unwrap();
    router.add_route("pair", "<:a>(/<:b>/)").unwrap();

    assert_eq!(url(&router, "about", &Params::from([("lang", "en")])), "/en/about");
    assert_eq!(url(&router, "about", &Params::new()), "/about");

    let built = url(&router, "pair", &Params::from([("a", "x"), ("b", "y")]));
    assert_eq!(built, "x/y/");
    assert_eq!(
        matched(&mut router, Method::Get, &built),
        Params::from([("a", "x"), ("b", "y")])
    );
}

#[test]
fn test_round_trip() {
    let cases = [
        ("/<:module>/<#id>(.<:format>)", "/event/164.json"),
        ("/<:controller>(/<:action>(/<#id>))", "/user/view/9"),
        ("/<:controller>(/<:action>(/<#id>))", "/user"),
        ("/files/<*path>", "/files/docs/readme.md"),
        ("/docs/<:slug|[a-z0-9/-]+>", "/docs/guide/intro"),
        ("(/<:lang>)/about", "/en/about"),
        ("<:a>(/<:b>/)", "x/y/"),
        ("/search/<:q>", "/search/blog+post"),
        (r"/archive/<:date|\d{4}-\d{2}-\d{2}>", "/archive/2009-10-01"),
        ("/about", "/about"),
    ];

    for (pattern, path) in cases {
        let mut router = Router::new();
        router.add_route("r", pattern).unwrap();

        let first = matched(&mut router, Method::Get, path);
        assert!(!first.is_empty() || router.route("r").unwrap().is_static(), "{pattern} did not match {path}");

        let rebuilt = url(&router, "r", &first);
        let second = matched(&mut router, Method::Get, &rebuilt);
        assert_eq!(first, second, "{pattern}: {path} -> {rebuilt}");
        assert_eq!(router.last_matched_route_name(), Some("r"));
    }
}
