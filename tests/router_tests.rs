use http::Method;
use routebench::dispatcher::HandlerResult;
use routebench::registry::build_router;
use routebench::router::{RouteMatch, Router};
use routebench::server::{RequestContext, ResponseBuilder};
use std::sync::Arc;
use std::thread;

fn first(_ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult {
    res.write_string("first")?;
    Ok(())
}

fn second(_ctx: &RequestContext<'_>, res: &mut ResponseBuilder) -> HandlerResult {
    res.write_string("second")?;
    Ok(())
}

fn pattern_of(m: &RouteMatch<'_>) -> String {
    m.route.pattern().as_str().to_owned()
}

#[test]
fn test_demo_table_registration_order() {
    let router = build_router();
    let table: Vec<(Method, &str)> = router
        .routes()
        .iter()
        .map(|r| (r.method().clone(), r.pattern().as_str()))
        .collect();
    assert_eq!(
        table,
        vec![
            (Method::GET, "/"),
            (Method::GET, "/json"),
            (Method::GET, "/user/:id"),
            (Method::GET, "/search"),
            (Method::POST, "/user"),
            (Method::POST, "/form"),
        ]
    );
}

#[test]
fn test_demo_table_resolution() {
    let router = build_router();
    let cases = [
        (Method::GET, "/", Some("/")),
        (Method::GET, "/json", Some("/json")),
        (Method::GET, "/user/42", Some("/user/:id")),
        (Method::GET, "/user/42/", Some("/user/:id")),
        (Method::GET, "/search", Some("/search")),
        (Method::POST, "/user", Some("/user")),
        (Method::POST, "/form", Some("/form")),
        (Method::GET, "/user", None),
        (Method::GET, "/user/42/extra", None),
        (Method::GET, "/JSON", None),
        (Method::DELETE, "/user/42", None),
        (Method::PUT, "/form", None),
        (Method::GET, "/nope", None),
    ];
    for (method, path, expected) in cases {
        let found = router.route(&method, path).map(|m| pattern_of(&m));
        assert_eq!(found.as_deref(), expected, "{method} {path}");
    }
}

#[test]
fn test_literal_registered_first_wins() {
    let mut router = Router::new();
    router.get("/user/me", first).get("/user/:id", second);
    let m = router.route(&Method::GET, "/user/me").unwrap();
    assert_eq!(pattern_of(&m), "/user/me");
    assert!(m.path_params.is_empty());

    let m = router.route(&Method::GET, "/user/7").unwrap();
    assert_eq!(pattern_of(&m), "/user/:id");
    assert_eq!(m.get_path_param("id"), Some("7"));
}

#[test]
fn test_param_registered_first_shadows_literal() {
    let mut router = Router::new();
    router.get("/user/:id", first).get("/user/me", second);
    let m = router.route(&Method::GET, "/user/me").unwrap();
    assert_eq!(pattern_of(&m), "/user/:id");
    assert_eq!(m.get_path_param("id"), Some("me"));
}

#[test]
fn test_multiple_params_bind_in_order() {
    let mut router = Router::new();
    router.get("/org/:org/repo/:repo", first);
    let m = router.route(&Method::GET, "/org/rust-lang/repo/cargo").unwrap();
    assert_eq!(m.get_path_param("org"), Some("rust-lang"));
    assert_eq!(m.get_path_param("repo"), Some("cargo"));
    assert_eq!(m.get_path_param("missing"), None);
}

#[test]
fn test_param_value_is_not_decoded() {
    let router = build_router();
    let m = router.route(&Method::GET, "/user/a%20b").unwrap();
    assert_eq!(m.get_path_param("id"), Some("a%20b"));
}

#[test]
fn test_empty_interior_segment_never_binds() {
    let router = build_router();
    assert!(router.route(&Method::GET, "/user//").is_none());
}

#[test]
fn test_concurrent_matching_is_isolated() {
    let router = Arc::new(build_router());
    let workers: Vec<_> = (0..8)
        .map(|t| {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                for i in 0..500 {
                    let id = format!("{t}-{i}");
                    let path = format!("/user/{id}");
                    let m = router.route(&Method::GET, &path).unwrap();
                    assert_eq!(m.get_path_param("id"), Some(id.as_str()));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(router.len(), 6);
}
