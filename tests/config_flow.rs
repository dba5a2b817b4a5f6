//! Configuration-driven setup: TOML in, dispatching table out.

use std::collections::HashMap;

use urlmux::{bind_table, parse_config, BindError, ConfigError, Dispatcher, RequestDescriptor};

mod common;

use common::echo_handler;

const CONFIG: &str = r#"
[[routes]]
name = "book-page"
path = "/books/{title}/page/{page:[0-9]+}"
methods = ["GET"]

[[routes]]
name = "create-book"
path = "/books/{title}"
methods = ["POST"]

[[groups]]
prefix = "/api"

  [[groups.routes]]
  name = "api-item"
  path = "/items/{id}"
"#;

#[test]
fn test_config_to_dispatcher_flow() {
    common::init_tracing();

    let config = parse_config(CONFIG).unwrap();

    let mut handlers = HashMap::new();
    handlers.insert("book-page".to_string(), echo_handler("book-page"));
    handlers.insert("create-book".to_string(), echo_handler("create-book"));
    handlers.insert("api-item".to_string(), echo_handler("api-item"));

    let dispatcher = Dispatcher::new(bind_table(&config, handlers).unwrap());

    let response = dispatcher
        .dispatch(&RequestDescriptor::get("/books/Drums/page/3"))
        .unwrap();
    assert_eq!(response, "book-page page=3 title=Drums");

    let response = dispatcher
        .dispatch(&RequestDescriptor::new("POST", "http", "", "/books/Go"))
        .unwrap();
    assert_eq!(response, "create-book title=Go");

    let response = dispatcher
        .dispatch(&RequestDescriptor::get("/api/items/42"))
        .unwrap();
    assert_eq!(response, "api-item id=42");
}

#[test]
fn test_invalid_config_reports_every_problem() {
    common::init_tracing();

    let err = parse_config(
        r#"
        [[routes]]
        name = "broken"
        path = "/books/{title:["

        [[routes]]
        name = "broken-too"
        path = "relative/path"
        schemes = ["gopher"]
        "#,
    )
    .unwrap_err();

    let ConfigError::Validation(errors) = err else {
        panic!("expected validation failure, got {err}");
    };
    assert_eq!(errors.len(), 3);
}

#[test]
fn test_binding_fails_without_a_handler() {
    common::init_tracing();

    let config = parse_config(
        r#"
        [[routes]]
        name = "book"
        path = "/books/{title}"
        "#,
    )
    .unwrap();

    let err = bind_table(&config, HashMap::<String, &str>::new()).unwrap_err();
    assert!(matches!(err, BindError::MissingHandler { name } if name == "book"));
}
