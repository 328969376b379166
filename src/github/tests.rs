//! Tests for the GitHub endpoints

use super::*;
use crate::http::RateCategory;
use crate::pagination::{ListFn, Pager};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GitHubClient {
    let mut config = ClientConfig::default()
        .with_api_url(server.uri())
        .with_token("test-token");
    config.http.max_retries = 0;
    config.http.rate_limit = None;
    GitHubClient::new(config).unwrap()
}

fn repo(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("repo-{id}"),
        "full_name": format!("acme/repo-{id}"),
        "private": false
    })
}

fn repos(ids: &[u64]) -> Value {
    Value::Array(ids.iter().copied().map(repo).collect())
}

fn next_link(server: &MockServer, path_and_query: &str) -> String {
    format!("<{}{}>; rel=\"next\"", server.uri(), path_and_query)
}

fn names(items: &[Repository]) -> Vec<&str> {
    items.iter().map(|r| r.name.as_str()).collect()
}

/// Mount three pages of `/orgs/acme/repos`: [1, 2], [3, 4], [5]
async fn mount_org_pages(server: &MockServer, expect: [u64; 3]) {
    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repos(&[1, 2]))
                .insert_header("link", next_link(server, "/orgs/acme/repos?page=2")),
        )
        .expect(expect[0])
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repos(&[3, 4]))
                .insert_header("link", next_link(server, "/orgs/acme/repos?page=3")),
        )
        .expect(expect[1])
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos(&[5])))
        .expect(expect[2])
        .mount(server)
        .await;
}

// ============================================================================
// Single Page
// ============================================================================

#[tokio::test]
async fn test_list_by_org_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("type", "public"))
        .and(query_param("per_page", "2"))
        .and(header("accept", MEDIA_TYPE))
        .and(header("x-github-api-version", API_VERSION))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repos(&[1, 2]))
                .insert_header("link", next_link(&server, "/orgs/acme/repos?per_page=2&page=2")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let opts = RepoListByOrgOptions {
        kind: Some("public".to_string()),
        list: ListOptions::default().per_page(2),
        ..Default::default()
    };

    let page = client.repos().list_by_org("acme", Some(&opts)).await.unwrap();

    assert_eq!(names(&page.items), vec!["repo-1", "repo-2"]);
    assert_eq!(page.meta.next_page(), Some(2));
    assert!(!page.meta.is_last());
}

#[tokio::test]
async fn test_empty_arguments_rejected_before_request() {
    let server = MockServer::start().await;
    let client = client(&server);

    let err = client.repos().list_by_org("", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { ref name, .. } if name == "org"));

    let err = client.issues().list_by_repo("acme", " ", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { ref name, .. } if name == "repo"));

    let mut pager = client.actions().list_workflow_runs_iter("", "widgets", None);
    assert!(matches!(pager.next().await, Some(Err(Error::InvalidArgument { .. }))));
    assert!(pager.next().await.is_none());

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[test]
fn test_endpoint_percent_encodes_segments() {
    let config = ClientConfig::default().with_api_url("https://ghe.example.com/api/v3/");
    let client = GitHubClient::new(config).unwrap();

    let url = client.endpoint(&["repos", "my org", "a/b", "issues"]).unwrap();
    assert_eq!(url, "https://ghe.example.com/api/v3/repos/my%20org/a%2Fb/issues");
}

// ============================================================================
// Page-Number Listings
// ============================================================================

#[tokio::test]
async fn test_list_by_org_iter_yields_every_item_in_order() {
    let server = MockServer::start().await;
    mount_org_pages(&server, [1, 1, 1]).await;

    let client = client(&server);
    let all = client
        .repos()
        .list_by_org_iter("acme", None)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(
        names(&all),
        vec!["repo-1", "repo-2", "repo-3", "repo-4", "repo-5"]
    );
}

#[tokio::test]
async fn test_list_by_org_iter_stops_early() {
    let server = MockServer::start().await;
    // the third page must never be requested
    mount_org_pages(&server, [1, 1, 0]).await;

    let client = client(&server);
    let first_three: Vec<_> = client
        .repos()
        .list_by_org_iter("acme", None)
        .into_stream()
        .take(3)
        .collect()
        .await;

    let first_three: Vec<_> = first_three.into_iter().map(Result::unwrap).collect();
    assert_eq!(names(&first_three), vec!["repo-1", "repo-2", "repo-3"]);
}

#[tokio::test]
async fn test_list_by_org_iter_does_not_touch_caller_options() {
    let server = MockServer::start().await;
    mount_org_pages(&server, [2, 2, 2]).await;

    let client = client(&server);
    let opts = RepoListByOrgOptions::default();

    let first = client
        .repos()
        .list_by_org_iter("acme", Some(&opts))
        .try_collect()
        .await
        .unwrap();
    assert_eq!(opts, RepoListByOrgOptions::default());

    // a fresh pager from the same options starts over
    let second = client
        .repos()
        .list_by_org_iter("acme", Some(&opts))
        .try_collect()
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_list_by_org_iter_starts_from_given_page() {
    let server = MockServer::start().await;
    mount_org_pages(&server, [0, 1, 1]).await;

    let client = client(&server);
    let opts = RepoListByOrgOptions {
        list: ListOptions::page(2),
        ..Default::default()
    };

    let all = client
        .repos()
        .list_by_org_iter("acme", Some(&opts))
        .try_collect()
        .await
        .unwrap();
    assert_eq!(names(&all), vec!["repo-3", "repo-4", "repo-5"]);
}

#[tokio::test]
async fn test_list_by_org_iter_error_ends_sequence() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repos(&[1, 2]))
                .insert_header("link", next_link(&server, "/orgs/acme/repos?page=2")),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut pager = client.repos().list_by_org_iter("acme", None);

    assert_eq!(pager.next().await.unwrap().unwrap().id, 1);
    assert_eq!(pager.next().await.unwrap().unwrap().id, 2);

    let err = pager.next().await.unwrap().unwrap_err();
    assert_eq!(err.status(), Some(502));

    assert!(pager.next().await.is_none());
    assert!(pager.is_done());
    assert_eq!(pager.pages_fetched(), 1);
}

#[tokio::test]
async fn test_empty_page_with_continuation_is_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .insert_header("link", next_link(&server, "/users/octocat/repos?page=5")),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos(&[9])))
        .mount(&server)
        .await;

    let client = client(&server);
    let all = client
        .repos()
        .list_for_user_iter("octocat", None)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(names(&all), vec!["repo-9"]);
}

#[tokio::test]
async fn test_issues_iter_sends_filters_on_every_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .and(query_param("state", "closed"))
        .and(query_param("labels", "bug,ui"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{
                    "id": 1, "number": 10, "title": "First", "state": "closed",
                    "created_at": "2024-01-01T00:00:00Z"
                }]))
                .insert_header(
                    "link",
                    next_link(&server, "/repos/acme/widgets/issues?state=closed&page=2"),
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .and(query_param("state", "closed"))
        .and(query_param("labels", "bug,ui"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 2, "number": 11, "title": "Second", "state": "closed",
            "created_at": "2024-01-02T00:00:00Z",
            "pull_request": { "url": "https://example.com" }
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let opts = IssueListByRepoOptions {
        state: Some("closed".to_string()),
        labels: vec!["bug".to_string(), "ui".to_string()],
        ..Default::default()
    };

    let issues = client
        .issues()
        .list_by_repo_iter("acme", "widgets", Some(&opts))
        .try_collect()
        .await
        .unwrap();

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].number, 10);
    assert!(!issues[0].is_pull_request());
    assert!(issues[1].is_pull_request());
}

// ============================================================================
// Wrapper Responses
// ============================================================================

#[tokio::test]
async fn test_workflow_runs_are_unwrapped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/actions/runs"))
        .and(query_param("branch", "main"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "total_count": 3,
                    "workflow_runs": [
                        { "id": 100, "status": "completed", "conclusion": "success" },
                        { "id": 101, "status": "completed", "conclusion": "failure" }
                    ]
                }))
                .insert_header(
                    "link",
                    next_link(&server, "/repos/acme/widgets/actions/runs?branch=main&page=2"),
                ),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/actions/runs"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 3,
            "workflow_runs": [{ "id": 102, "status": "in_progress" }]
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let opts = ListWorkflowRunsOptions {
        branch: Some("main".to_string()),
        ..Default::default()
    };

    let page = client
        .actions()
        .list_workflow_runs("acme", "widgets", Some(&opts))
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.meta.next_page(), Some(2));

    let ids: Vec<u64> = client
        .actions()
        .list_workflow_runs_iter("acme", "widgets", Some(&opts))
        .try_collect()
        .await
        .unwrap()
        .into_iter()
        .map(|run| run.id)
        .collect();
    assert_eq!(ids, vec![100, 101, 102]);
}

// ============================================================================
// Cursor Listings
// ============================================================================

fn delivery(id: u64) -> Value {
    json!({
        "id": id,
        "guid": format!("guid-{id}"),
        "delivered_at": "2024-03-01T12:00:00Z",
        "redelivery": false,
        "status": "OK",
        "status_code": 200
    })
}

#[tokio::test]
async fn test_hook_deliveries_follow_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/hooks/42/deliveries"))
        .and(query_param_is_missing("cursor"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([delivery(1), delivery(2)]))
                .insert_header(
                    "link",
                    next_link(
                        &server,
                        "/repos/acme/widgets/hooks/42/deliveries?per_page=2&cursor=v1_abc",
                    ),
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/hooks/42/deliveries"))
        .and(query_param("cursor", "v1_abc"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([delivery(3)])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let opts = ListCursorOptions {
        cursor: None,
        per_page: 2,
    };

    let mut pager = client
        .repos()
        .list_hook_deliveries_iter("acme", "widgets", 42, Some(&opts));

    let mut ids = Vec::new();
    while let Some(delivery) = pager.next().await {
        ids.push(delivery.unwrap().id);
    }

    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(pager.pages_fetched(), 2);
    assert_eq!(pager.options().cursor.as_deref(), Some("v1_abc"));
    assert!(opts.cursor.is_none());
}

fn alert(number: u64) -> Value {
    json!({
        "number": number,
        "state": "open",
        "rule": { "id": "js/xss", "severity": "error" },
        "tool": { "name": "CodeQL" },
        "created_at": "2024-02-01T00:00:00Z"
    })
}

#[tokio::test]
async fn test_alerts_follow_after_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/code-scanning/alerts"))
        .and(query_param_is_missing("after"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([alert(1)]))
                .insert_header(
                    "link",
                    next_link(&server, "/repos/acme/widgets/code-scanning/alerts?after=Y3Vyc29y"),
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/code-scanning/alerts"))
        .and(query_param("after", "Y3Vyc29y"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([alert(2)])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let alerts = client
        .code_scanning()
        .list_alerts_for_repo_iter("acme", "widgets", None)
        .try_collect()
        .await
        .unwrap();

    let numbers: Vec<u64> = alerts.iter().map(|a| a.number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(
        alerts[0].rule.as_ref().and_then(|r| r.id.as_deref()),
        Some("js/xss")
    );
}

#[tokio::test]
async fn test_alerts_follow_page_numbers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/code-scanning/alerts"))
        .and(query_param("state", "open"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([alert(1)]))
                .insert_header(
                    "link",
                    next_link(&server, "/repos/acme/widgets/code-scanning/alerts?state=open&page=2"),
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/code-scanning/alerts"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([alert(2), alert(3)])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let opts = AlertListOptions {
        state: Some("open".to_string()),
        ..Default::default()
    };

    let mut pager = client
        .code_scanning()
        .list_alerts_for_repo_iter("acme", "widgets", Some(&opts));

    let mut numbers = Vec::new();
    pager_drain(&mut pager, &mut numbers).await;

    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(pager.options().list.page, 2);
    assert!(pager.options().cursor.is_none());
}

async fn pager_drain<F>(pager: &mut Pager<AlertListOptions, F>, out: &mut Vec<u64>)
where
    F: ListFn<AlertListOptions, Item = CodeScanningAlert, Error = Error>,
{
    while let Some(alert) = pager.next().await {
        out.push(alert.unwrap().number);
    }
}

// ============================================================================
// Rate Limits
// ============================================================================

#[tokio::test]
async fn test_rate_limit_refreshes_tracker() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": {
                "core": { "limit": 5000, "remaining": 4999, "used": 1, "reset": 1_900_000_000 },
                "search": { "limit": 30, "remaining": 30, "used": 0, "reset": 1_900_000_060 },
                "source_import": { "limit": 100, "remaining": 100, "used": 0, "reset": 1_900_000_000 }
            }
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.rate_limits().is_empty());

    let body = client.rate_limit().await.unwrap();
    assert_eq!(body.resources.len(), 3);

    let known = client.rate_limits();
    assert_eq!(known.len(), 2);
    assert_eq!(known[&RateCategory::Core].remaining, 4999);
    assert_eq!(known[&RateCategory::Search].limit, 30);
}

#[tokio::test]
async fn test_exhausted_quota_fails_listing_locally() {
    let server = MockServer::start().await;
    let reset = chrono::Utc::now() + chrono::Duration::hours(1);

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repos(&[1]))
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", reset.timestamp().to_string().as_str())
                .insert_header("link", next_link(&server, "/orgs/acme/repos?page=2")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut pager = client.repos().list_by_org_iter("acme", None);

    assert_eq!(pager.next().await.unwrap().unwrap().id, 1);
    let err = pager.next().await.unwrap().unwrap_err();
    assert!(matches!(
        err,
        Error::RateLimitExceeded {
            category: RateCategory::Core,
            ..
        }
    ));
    assert!(pager.next().await.is_none());
}

#[tokio::test]
async fn test_rate_limit_reachable_after_quota_exhausted() {
    let server = MockServer::start().await;
    let reset = chrono::Utc::now() + chrono::Duration::hours(1);

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repos(&[1]))
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", reset.timestamp().to_string().as_str()),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos(&[2])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": {
                "core": { "limit": 5000, "remaining": 5000, "used": 0, "reset": reset.timestamp() }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.repos().list_by_org("acme", None).await.unwrap();
    assert_eq!(client.rate_limits()[&RateCategory::Core].remaining, 0);

    let body = client.rate_limit().await.unwrap();
    assert_eq!(body.resources["core"].remaining, 5000);
    assert_eq!(client.rate_limits()[&RateCategory::Core].remaining, 5000);

    // the refreshed tracker lets listings through again
    let page = client.repos().list_by_org("acme", None).await.unwrap();
    assert_eq!(page.items[0].id, 2);
}
