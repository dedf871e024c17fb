//! Full CRUD lifecycle test against a live todo server.
//!
//! Starts the server on a random port with an in-memory SQLite store, then
//! exercises every client operation over real HTTP using ureq.

use std::sync::Arc;
use std::time::Duration;

use todo_core::{ApiError, HttpMethod, HttpResponse, ItemPatch, NewItem, Status, TodoClient};
use todo_server::{SqliteItemStore, StoreOptions};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: todo_core::HttpRequest) -> HttpResponse {
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
        (HttpMethod::Patch, Some(body)) => {
            agent.patch(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let store = SqliteItemStore::connect(&StoreOptions {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                acquire_timeout: Duration::from_secs(5),
            })
            .await
            .unwrap();
            store.ensure_schema().await.unwrap();

            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener, Arc::new(store)).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn crud_lifecycle() {
    // Step 1: start the server. The listener is bound before the thread
    // starts, so requests queue until the runtime accepts them.
    let client = TodoClient::new(&spawn_server());

    // Step 2: list is empty.
    let page = client
        .parse_list_items(execute(client.build_list_items(None, None)))
        .unwrap();
    assert!(page.data.is_empty(), "expected empty list");
    assert_eq!(page.paging.total, 0);

    // Step 3: blank titles are rejected.
    let blank = NewItem {
        title: "  ".to_string(),
        status: None,
    };
    let err = client
        .parse_create_item(execute(client.build_create_item(&blank).unwrap()))
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::HttpError { status: 400, ref message } if message == "title cannot be blank"
    ));

    // Step 4: create three items.
    let mut ids = Vec::new();
    for title in ["first", " second ", "third"] {
        let input = NewItem {
            title: title.to_string(),
            status: None,
        };
        let created = client
            .parse_create_item(execute(client.build_create_item(&input).unwrap()))
            .unwrap();
        assert_eq!(created.title, title.trim());
        assert_eq!(created.status, Status::Doing);
        ids.push(created.id);
    }

    // Step 5: first page of two, newest first.
    let page = client
        .parse_list_items(execute(client.build_list_items(Some(1), Some(2))))
        .unwrap();
    assert_eq!(page.data.iter().map(|i| i.id).collect::<Vec<_>>(), vec![ids[2], ids[1]]);
    assert_eq!(page.paging.total, 3);

    // Step 6: mark the first item done.
    let patch = ItemPatch {
        title: None,
        status: Some(Status::Done),
    };
    assert!(client
        .parse_update_item(execute(client.build_update_item(ids[0], &patch).unwrap()))
        .unwrap());
    let fetched = client.parse_get_item(execute(client.build_get_item(ids[0]))).unwrap();
    assert_eq!(fetched.title, "first");
    assert_eq!(fetched.status, Status::Done);

    // Step 7: delete it.
    assert!(client
        .parse_delete_item(execute(client.build_delete_item(ids[0])))
        .unwrap());

    // Step 8: get after delete is NotFound.
    let err = client.parse_get_item(execute(client.build_get_item(ids[0]))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 9: delete again is NotFound.
    let err = client
        .parse_delete_item(execute(client.build_delete_item(ids[0])))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 10: list no longer counts it.
    let page = client
        .parse_list_items(execute(client.build_list_items(None, None)))
        .unwrap();
    assert_eq!(page.paging.total, 2);
    assert!(page.data.iter().all(|i| i.id != ids[0]));
}
