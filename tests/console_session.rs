//! Console session tests: views, cache invalidation, the delete
//! confirmation gate, and scripted interactive shell runs, all against a
//! wiremock backend.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use proxyctl::client::{ApiClient, ClientConfig};
use proxyctl::console::{ProxyListView, QueryCache, RouteListView, Shell};
use proxyctl::domain::ProxyForm;

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig { base_url: server.uri(), timeout: 5, verbose: false })
        .expect("client")
}

fn empty_page() -> serde_json::Value {
    json!({
        "content": [],
        "totalElements": 0,
        "totalPages": 0,
        "currentPage": 0,
        "size": 10,
        "hasNext": false,
        "hasPrevious": false
    })
}

fn page_with(names: &[(i64, &str)], current: i64, has_previous: bool, has_next: bool) -> serde_json::Value {
    let content: Vec<_> = names
        .iter()
        .map(|(id, name)| {
            json!({
                "id": id,
                "name": name,
                "uri": format!("http://{name}.internal:9000"),
                "description": "svc",
                "createdAt": "2024-02-01T10:00:00Z",
                "updatedAt": null
            })
        })
        .collect();
    json!({
        "content": content,
        "totalElements": names.len(),
        "totalPages": 2,
        "currentPage": current,
        "size": 10,
        "hasNext": has_next,
        "hasPrevious": has_previous
    })
}

fn routes_body(entries: &[(&str, bool)]) -> serde_json::Value {
    let routes: Vec<_> = entries
        .iter()
        .map(|(id, enabled)| {
            json!({
                "routeId": id,
                "enabled": enabled,
                "path": format!("/{id}"),
                "method": "GET",
                "headers": []
            })
        })
        .collect();
    json!({ "routes": routes })
}

async fn count_requests(server: &MockServer, verb: &str, path_str: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("recording enabled")
        .iter()
        .filter(|r| r.method.to_string() == verb && r.url.path() == path_str)
        .count()
}

#[tokio::test]
async fn refresh_hits_cache_until_a_mutation_invalidates_it() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/proxies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/proxies"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "name": "billing",
            "uri": "http://b",
            "description": null,
            "createdAt": "2024-02-01T10:00:00Z",
            "updatedAt": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut cache = QueryCache::new();
    let mut view = ProxyListView::new();

    view.refresh(&client, &mut cache).await.expect("first fetch");
    view.refresh(&client, &mut cache).await.expect("served from cache");
    assert_eq!(count_requests(&server, "GET", "/api/v1/proxies").await, 1);

    let form = ProxyForm { name: "billing".into(), uri: "http://b".into(), description: None };
    view.submit(&client, &mut cache, &form, None).await.expect("create");

    view.refresh(&client, &mut cache).await.expect("refetch after invalidation");
    assert_eq!(count_requests(&server, "GET", "/api/v1/proxies").await, 2);
}

#[tokio::test]
async fn edit_submits_put_to_item_path() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/proxies/5"))
        .and(body_json(json!({"name": "renamed", "uri": "http://b"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "name": "renamed",
            "uri": "http://b",
            "description": null,
            "createdAt": "2024-02-01T10:00:00Z",
            "updatedAt": "2024-02-02T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut cache = QueryCache::new();
    let mut view = ProxyListView::new();

    let form = ProxyForm { name: "renamed".into(), uri: "http://b".into(), description: None };
    let saved = view.submit(&client, &mut cache, &form, Some(5)).await.expect("update");
    assert_eq!(saved.updated_at.as_deref(), Some("2024-02-02T10:00:00Z"));
}

#[tokio::test]
async fn invalid_form_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    let client = client_for(&server);
    let mut cache = QueryCache::new();
    let mut view = ProxyListView::new();

    let form = ProxyForm { name: "".into(), uri: "http://b".into(), description: None };
    let err = view.submit(&client, &mut cache, &form, None).await.unwrap_err();
    assert!(err.to_string().contains("name"));

    assert!(server.received_requests().await.expect("recording enabled").is_empty());
}

#[tokio::test]
async fn delete_fires_once_and_only_after_confirmation() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/proxies/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut cache = QueryCache::new();
    let mut view = ProxyListView::new();

    // arming the confirmation issues nothing
    view.request_delete(4);
    assert_eq!(count_requests(&server, "DELETE", "/api/v1/proxies/4").await, 0);

    // cancelling disarms; a confirm without a pending id is an error
    view.cancel_delete();
    assert!(view.confirm_delete(&client, &mut cache).await.is_err());
    assert_eq!(count_requests(&server, "DELETE", "/api/v1/proxies/4").await, 0);

    // arm again and confirm: exactly one DELETE
    view.request_delete(4);
    let deleted = view.confirm_delete(&client, &mut cache).await.expect("delete");
    assert_eq!(deleted, 4);
    assert_eq!(count_requests(&server, "DELETE", "/api/v1/proxies/4").await, 1);

    // the pending id was consumed
    assert!(view.confirm_delete(&client, &mut cache).await.is_err());
}

#[tokio::test]
async fn pagination_controls_follow_backend_flags() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/proxies"))
        .and(query_param("page", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_with(&[(1, "billing")], 0, false, true)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/proxies"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_with(&[(2, "orders")], 1, true, false)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut cache = QueryCache::new();
    let mut view = ProxyListView::new();

    view.refresh(&client, &mut cache).await.expect("page 0");
    assert!(!view.has_previous());
    assert!(view.has_next());
    assert!(!view.previous_page());

    assert!(view.next_page());
    view.refresh(&client, &mut cache).await.expect("page 1");
    assert!(view.has_previous());
    assert!(!view.has_next());
    assert!(!view.next_page());

    assert!(view.previous_page());
    assert_eq!(view.page(), 0);
}

#[tokio::test]
async fn rapid_toggles_arrive_in_submission_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/routes/billing/r1/status"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/routes/billing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(routes_body(&[("r1", false)])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut cache = QueryCache::new();
    let mut view = RouteListView::new("billing");

    view.toggle(&client, &mut cache, "r1", true).await.expect("first toggle");
    view.toggle(&client, &mut cache, "r1", false).await.expect("second toggle");

    let bodies: Vec<serde_json::Value> = server
        .received_requests()
        .await
        .expect("recording enabled")
        .iter()
        .filter(|r| r.url.path() == "/api/v1/routes/billing/r1/status")
        .map(|r| serde_json::from_slice(&r.body).expect("json body"))
        .collect();
    assert_eq!(bodies, vec![json!({"enabled": true}), json!({"enabled": false})]);

    // the rendered state is whatever the refetch after the last completed
    // call reports, not the last submitted value
    view.refresh(&client, &mut cache).await.expect("refetch");
    assert!(!view.routes()[0].enabled);
}

#[tokio::test]
async fn shell_renders_empty_page_placeholder() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/proxies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let input = std::io::Cursor::new("quit\n");
    let mut output = Vec::new();

    Shell::new(input, &mut output).run(&client).await.expect("session");

    let rendered = String::from_utf8(output).expect("utf8");
    assert!(rendered.contains("No proxies yet"));
    assert!(rendered.contains("[prev: -, next: -]"));
}

#[tokio::test]
async fn shell_add_flow_posts_form_and_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/proxies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/proxies"))
        .and(body_json(json!({"name": "billing", "uri": "http://billing.internal:9000"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "name": "billing",
            "uri": "http://billing.internal:9000",
            "description": null,
            "createdAt": "2024-02-01T10:00:00Z",
            "updatedAt": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    // add → name, uri, empty description → quit
    let input = std::io::Cursor::new("add\nbilling\nhttp://billing.internal:9000\n\nquit\n");
    let mut output = Vec::new();

    Shell::new(input, &mut output).run(&client).await.expect("session");

    let rendered = String::from_utf8(output).expect("utf8");
    assert!(rendered.contains("proxy 'billing' added"));
    // initial render plus the post-mutation refetch
    assert_eq!(count_requests(&server, "GET", "/api/v1/proxies").await, 2);
}

#[tokio::test]
async fn shell_keeps_entered_form_values_after_failed_submit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/proxies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(&server)
        .await;

    // first submission fails, the retry goes through
    Mock::given(method("POST"))
        .and(path("/api/v1/proxies"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/proxies"))
        .and(body_json(json!({"name": "billing", "uri": "http://billing.internal:9000"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "name": "billing",
            "uri": "http://billing.internal:9000",
            "description": null,
            "createdAt": "2024-02-01T10:00:00Z",
            "updatedAt": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    // add → fields → retry with the kept values (blank keeps each default)
    let input = std::io::Cursor::new(
        "add\nbilling\nhttp://billing.internal:9000\n\ny\n\n\n\nquit\n",
    );
    let mut output = Vec::new();

    Shell::new(input, &mut output).run(&client).await.expect("session");

    let rendered = String::from_utf8(output).expect("utf8");
    assert!(rendered.contains("error: could not add proxy"));
    // the re-prompt offers what was typed, not a blank form
    assert!(rendered.contains("Name [billing]"));
    assert!(rendered.contains("URI [http://billing.internal:9000]"));
    assert!(rendered.contains("proxy 'billing' added"));
    assert_eq!(count_requests(&server, "POST", "/api/v1/proxies").await, 2);
}

#[tokio::test]
async fn shell_navigates_into_route_list_and_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/proxies"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_with(&[(1, "billing")], 0, false, false)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/routes/billing"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(routes_body(&[("r1", true), ("r2", false)])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let input = std::io::Cursor::new("open billing\nshow r1\nback\nquit\n");
    let mut output = Vec::new();

    Shell::new(input, &mut output).run(&client).await.expect("session");

    let rendered = String::from_utf8(output).expect("utf8");
    assert!(rendered.contains("proxyctl/billing>"));
    assert!(rendered.contains("r1"));
    assert!(rendered.contains("Activation window:"));
    // back on the proxy screen afterwards
    assert!(rendered.contains("billing"));
}

#[tokio::test]
async fn shell_reports_fetch_failure_and_keeps_running() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/proxies"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let input = std::io::Cursor::new("list\nquit\n");
    let mut output = Vec::new();

    Shell::new(input, &mut output).run(&client).await.expect("session survives failures");

    let rendered = String::from_utf8(output).expect("utf8");
    assert!(rendered.contains("error: could not fetch proxy list"));
}
