//! End-to-end tests against a live todo server.
//!
//! # Design
//! Starts the real server (in-memory SQLite) on a random port, then exercises
//! every client operation and a `TodoApp` session over real HTTP using ureq.
//! Validates that the core's request building and response parsing agree with
//! the server's wire format.

use std::net::SocketAddr;
use std::sync::Arc;

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, TodoApp, TodoClient, TodoInput};
use todo_server::SqliteStore;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse::new(status, body)
}

/// Start a fresh server with an empty database on a random port.
fn spawn_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            let store = Arc::new(SqliteStore::open_in_memory().unwrap());
            todo_server::run(listener, store).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn crud_lifecycle() {
    let addr = spawn_server();
    let client = TodoClient::new(&format!("http://{addr}"));

    // list starts empty
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // create
    let req = client.build_create_todo(&TodoInput::new("Integration test", false)).unwrap();
    let created = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(created.description, "Integration test");
    assert!(!created.completed);
    let id = created.id;

    // get
    let fetched = client.parse_get_todo(execute(client.build_get_todo(id))).unwrap();
    assert_eq!(fetched, Some(created.clone()));

    // full replacement of both fields
    let req = client.build_update_todo(id, &TodoInput::new("Updated", true)).unwrap();
    let updated = client.parse_update_todo(execute(req)).unwrap().unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.description, "Updated");
    assert!(updated.completed);

    // blank description is rejected with the server's message
    let req = client.build_update_todo(id, &TodoInput::new("  ", false)).unwrap();
    let err = client.parse_update_todo(execute(req)).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Rejected { status: 400, ref message } if message == "desc is required"
    ));

    // update of an unknown id is a successful no-op
    let req = client.build_update_todo(id + 100, &TodoInput::new("ghost", false)).unwrap();
    assert_eq!(client.parse_update_todo(execute(req)).unwrap(), None);

    // delete returns the removed record
    let deleted = client.parse_delete_todo(execute(client.build_delete_todo(id))).unwrap();
    assert_eq!(deleted, Some(updated));

    // get after delete is null
    let fetched = client.parse_get_todo(execute(client.build_get_todo(id))).unwrap();
    assert_eq!(fetched, None);

    // delete again is a successful no-op
    let deleted = client.parse_delete_todo(execute(client.build_delete_todo(id))).unwrap();
    assert_eq!(deleted, None);

    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty(), "expected empty list after delete");
}

#[test]
fn delete_all_routes_return_removed_records() {
    let addr = spawn_server();
    let client = TodoClient::new(&format!("http://{addr}"));

    for desc in ["a", "b"] {
        let req = client.build_create_todo(&TodoInput::new(desc, false)).unwrap();
        client.parse_create_todo(execute(req)).unwrap();
    }

    let req = client.build_delete_all(todo_core::DeleteAllRoute::Todos);
    let removed = client.parse_delete_all(execute(req)).unwrap();
    let descs: Vec<_> = removed.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descs, ["a", "b"]);

    let req = client.build_delete_all(todo_core::DeleteAllRoute::Delete);
    assert!(client.parse_delete_all(execute(req)).unwrap().is_empty());
}

#[test]
fn app_session_tracks_server_state() {
    let addr = spawn_server();
    let mut app = TodoApp::new(TodoClient::new(&format!("http://{addr}")));

    app.apply_load(execute(app.load_request())).unwrap();
    assert!(app.todos().is_empty());

    // blank input sends nothing
    app.set_input("   ");
    assert!(app.add_request().unwrap().is_none());

    for text in ["write tests", "ship it"] {
        app.set_input(text);
        let req = app.add_request().unwrap().unwrap();
        app.apply_add(execute(req)).unwrap();
        assert_eq!(app.input(), "");
    }
    assert_eq!(app.todos().len(), 2);
    let first = app.todos()[0].id;
    let second = app.todos()[1].id;

    // edit the first record
    assert!(app.begin_edit(first));
    {
        let draft = app.draft_mut().unwrap();
        draft.description = "write more tests".to_string();
        draft.completed = true;
    }
    let req = app.save_request().unwrap().unwrap();
    app.apply_save(execute(req)).unwrap();
    assert!(!app.is_editing());
    assert_eq!(app.todos()[0].description, "write more tests");
    assert!(app.todos()[0].completed);

    // delete the second record
    app.apply_delete(second, execute(app.delete_request(second))).unwrap();
    assert_eq!(app.todos().len(), 1);

    // local list agrees with a fresh load
    let local = app.todos().to_vec();
    app.apply_load(execute(app.load_request())).unwrap();
    assert_eq!(app.todos(), local.as_slice());

    // clear everything
    app.apply_clear(execute(app.clear_request())).unwrap();
    assert!(app.todos().is_empty());
    app.apply_load(execute(app.load_request())).unwrap();
    assert!(app.todos().is_empty());
}
