//! End-to-end router behavior through the public API.

use urlmux::{
    Dispatcher, RequestDescriptor, ResolveError, RouteConstraints, RouteTable, SharedTable,
};

mod common;

use common::echo_handler;

fn get(path: &str) -> RequestDescriptor {
    RequestDescriptor::get(path)
}

#[test]
fn test_variable_extraction_end_to_end() {
    common::init_tracing();

    let mut table = RouteTable::new();
    table
        .register(
            "/books/{title}/page/{page}",
            RouteConstraints::new(),
            echo_handler("book-page"),
        )
        .unwrap();
    let dispatcher = Dispatcher::new(table);

    let response = dispatcher.dispatch(&get("/books/Drums/page/3")).unwrap();
    assert_eq!(response, "book-page page=3 title=Drums");
}

#[test]
fn test_captures_are_percent_decoded() {
    common::init_tracing();

    let mut table = RouteTable::new();
    table
        .register(
            "/books/{title}",
            RouteConstraints::new(),
            echo_handler("book"),
        )
        .unwrap();
    let dispatcher = Dispatcher::new(table);

    let response = dispatcher
        .dispatch(&get("/books/Drums%20of%20Autumn"))
        .unwrap();
    assert_eq!(response, "book title=Drums of Autumn");
}

#[test]
fn test_first_match_wins_over_later_routes() {
    common::init_tracing();

    let mut table = RouteTable::new();
    table
        .register("/books/{title}", RouteConstraints::new(), echo_handler("r1"))
        .unwrap();
    table
        .register("/books/{title}", RouteConstraints::new(), echo_handler("r2"))
        .unwrap();
    let dispatcher = Dispatcher::new(table);

    let response = dispatcher.dispatch(&get("/books/Go")).unwrap();
    assert!(response.starts_with("r1"));
}

#[test]
fn test_method_constraints_produce_405_with_allowed_set() {
    common::init_tracing();

    let mut table = RouteTable::new();
    table
        .register(
            "/books/{title}",
            RouteConstraints::new().methods(["POST"]),
            echo_handler("create-book"),
        )
        .unwrap();
    let dispatcher = Dispatcher::new(table);

    let err = dispatcher.dispatch(&get("/books/Go")).unwrap_err();
    assert_eq!(
        err,
        ResolveError::MethodNotAllowed {
            method: "GET".to_string(),
            allowed: vec!["POST".to_string()],
        }
    );

    let post = RequestDescriptor::new("POST", "http", "", "/books/Go");
    assert_eq!(dispatcher.dispatch(&post).unwrap(), "create-book title=Go");
}

#[test]
fn test_unknown_path_is_not_found() {
    common::init_tracing();

    let mut table = RouteTable::new();
    table
        .register("/books/{title}", RouteConstraints::new(), echo_handler("book"))
        .unwrap();
    let dispatcher = Dispatcher::new(table);

    assert!(matches!(
        dispatcher.dispatch(&get("/unknown")),
        Err(ResolveError::NotFound { .. })
    ));
}

#[test]
fn test_subrouter_scopes_child_routes_to_prefix() {
    common::init_tracing();

    let mut table = RouteTable::new();
    let books = table.subrouter("/books").unwrap();
    books
        .register("/{title}", RouteConstraints::new(), echo_handler("get-book"))
        .unwrap();
    let dispatcher = Dispatcher::new(table);

    assert_eq!(
        dispatcher.dispatch(&get("/books/Go")).unwrap(),
        "get-book title=Go"
    );
    // The bare prefix leaves nothing for the child route to consume.
    assert!(matches!(
        dispatcher.dispatch(&get("/books")),
        Err(ResolveError::NotFound { .. })
    ));
    // Prefixes only match whole segments.
    assert!(matches!(
        dispatcher.dispatch(&get("/bookstore/Go")),
        Err(ResolveError::NotFound { .. })
    ));
}

#[test]
fn test_earlier_literal_route_shadows_subrouter() {
    common::init_tracing();

    let mut table = RouteTable::new();
    table
        .register(
            "/books/featured",
            RouteConstraints::new(),
            echo_handler("featured"),
        )
        .unwrap();
    let books = table.subrouter("/books").unwrap();
    books
        .register("/{title}", RouteConstraints::new(), echo_handler("by-title"))
        .unwrap();
    let dispatcher = Dispatcher::new(table);

    assert_eq!(dispatcher.dispatch(&get("/books/featured")).unwrap(), "featured");
    assert_eq!(
        dispatcher.dispatch(&get("/books/Go")).unwrap(),
        "by-title title=Go"
    );
}

#[test]
fn test_host_and_scheme_constraints() {
    common::init_tracing();

    let mut table = RouteTable::new();
    table
        .register(
            "/login",
            RouteConstraints::new()
                .host("{tenant}.example.com")
                .schemes(["https"]),
            echo_handler("login"),
        )
        .unwrap();
    let dispatcher = Dispatcher::new(table);

    let secure = RequestDescriptor::new("GET", "https", "Acme.Example.com:8443", "/login");
    assert_eq!(dispatcher.dispatch(&secure).unwrap(), "login tenant=acme");

    let plain = RequestDescriptor::new("GET", "http", "acme.example.com", "/login");
    assert!(matches!(
        dispatcher.dispatch(&plain),
        Err(ResolveError::NotFound { .. })
    ));

    let wrong_host = RequestDescriptor::new("GET", "https", "example.com", "/login");
    assert!(matches!(
        dispatcher.dispatch(&wrong_host),
        Err(ResolveError::NotFound { .. })
    ));
}

#[test]
fn test_regex_constraint_filters_at_match_time() {
    common::init_tracing();

    let mut table = RouteTable::new();
    table
        .register(
            "/books/{title}/page/{page:[0-9]+}",
            RouteConstraints::new(),
            echo_handler("page"),
        )
        .unwrap();
    let dispatcher = Dispatcher::new(table);

    assert!(dispatcher.dispatch(&get("/books/Go/page/12")).is_ok());
    assert!(matches!(
        dispatcher.dispatch(&get("/books/Go/page/twelve")),
        Err(ResolveError::NotFound { .. })
    ));
}

#[test]
fn test_resolution_is_idempotent_across_calls() {
    common::init_tracing();

    let mut table = RouteTable::new();
    table
        .register(
            "/books/{title}",
            RouteConstraints::new(),
            echo_handler("book"),
        )
        .unwrap();
    let dispatcher = Dispatcher::new(table);

    let request = get("/books/Go");
    let first = dispatcher.dispatch(&request).unwrap();
    let second = dispatcher.dispatch(&request).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_shared_table_swap_under_readers() {
    common::init_tracing();

    let mut before = RouteTable::new();
    before
        .register("/books/{title}", RouteConstraints::new(), "old")
        .unwrap();
    let shared = std::sync::Arc::new(SharedTable::new(before));

    let request = get("/books/Go");
    let held = shared.snapshot();
    assert_eq!(*held.resolve(&request).unwrap().handler, "old");

    // Swap from another thread while the old snapshot is still held.
    let writer = {
        let shared = std::sync::Arc::clone(&shared);
        std::thread::spawn(move || {
            let mut after = RouteTable::new();
            after
                .register("/books/{title}", RouteConstraints::new(), "new")
                .unwrap();
            shared.swap(after);
        })
    };
    writer.join().unwrap();

    assert_eq!(*held.resolve(&request).unwrap().handler, "old");
    assert_eq!(*shared.snapshot().resolve(&request).unwrap().handler, "new");
}
