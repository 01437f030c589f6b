//! End-to-end tests of the `sbin` dispatch against a live server.

use clap::Parser;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stringbins::cli::{
    self, CONNECTION_ERROR_MESSAGE, CONTENT_MISSING_MESSAGE, UNEXPECTED_ERROR_MESSAGE,
    UUID_IGNORED_MESSAGE,
};
use stringbins::{server, BinClient, BinStore, Cli, Outcome, StoreConfig};

struct TestServer {
    client: BinClient,
    _dir: TempDir,
    _shutdown: oneshot::Sender<()>,
}

async fn start_server() -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let store = BinStore::open(StoreConfig::new().root(dir.path()).build()).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = server::serve(listener, store, async move {
            let _ = rx.await;
        })
        .await;
    });

    TestServer {
        client: BinClient::new(format!("http://{}", addr)),
        _dir: dir,
        _shutdown: tx,
    }
}

async fn sbin(client: &BinClient, args: &[&str]) -> (Outcome, String) {
    let cli = Cli::parse_from(std::iter::once("sbin").chain(args.iter().copied()));
    let mut out = Vec::new();
    let outcome = cli::run(&cli, client, &mut out).await;
    (outcome, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_create_update_retrieve() {
    let server = start_server().await;

    let (outcome, out) = sbin(&server.client, &["create", "notes"]).await;
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(out, "Created bin with name:notes\n");

    let (outcome, out) = sbin(&server.client, &["update", "notes", "-c", "hello"]).await;
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(out, "Updated bin notes\n");

    let (outcome, out) = sbin(&server.client, &["retrieve", "notes"]).await;
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(out, "hello\n");
}

#[tokio::test]
async fn test_create_with_uuid() {
    let server = start_server().await;

    let (outcome, out) = sbin(&server.client, &["create", "notes", "--uuid"]).await;
    assert_eq!(outcome, Outcome::Success);
    assert!(out.starts_with("Created bin with name:notes-"));

    let (outcome, out) = sbin(&server.client, &["create", "", "-u"]).await;
    assert_eq!(outcome, Outcome::Success);
    let name = out.trim_end().trim_start_matches("Created bin with name:");
    assert!(!name.is_empty());
}

#[tokio::test]
async fn test_server_errors_are_reported() {
    let server = start_server().await;

    let (outcome, out) = sbin(&server.client, &["create", ""]).await;
    assert_eq!(outcome, Outcome::Failure);
    assert_eq!(out, "Failed to create bin : Name Unspecified\n");

    sbin(&server.client, &["create", "dup"]).await;
    let (outcome, out) = sbin(&server.client, &["create", "dup"]).await;
    assert_eq!(outcome, Outcome::Failure);
    assert_eq!(out, "Failed to create bin dup: Bin Already Exists\n");

    let (outcome, out) = sbin(&server.client, &["retrieve", "ghost"]).await;
    assert_eq!(outcome, Outcome::Failure);
    assert_eq!(out, "Failed to retrieve bin ghost: Bin Not Found\n");

    let (outcome, out) = sbin(&server.client, &["update", "ghost", "-c", "boo"]).await;
    assert_eq!(outcome, Outcome::Failure);
    assert_eq!(out, "Failed to update ghost: Bin Not Found\n");
}

#[tokio::test]
async fn test_uuid_ignored_for_retrieve() {
    let server = start_server().await;
    sbin(&server.client, &["create", "notes"]).await;

    let (outcome, out) = sbin(&server.client, &["retrieve", "notes", "-u"]).await;
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(out, format!("{}\n\n", UUID_IGNORED_MESSAGE));
}

#[tokio::test]
async fn test_update_without_content_sends_nothing() {
    let mock = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let client = BinClient::new(mock.uri());
    let (outcome, out) = sbin(&client, &["update", "notes"]).await;
    assert_eq!(outcome, Outcome::Failure);
    assert_eq!(out, format!("{}\n", CONTENT_MISSING_MESSAGE));

    mock.verify().await;
}

#[tokio::test]
async fn test_connection_error() {
    // Bind then drop to get a port nothing is listening on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = BinClient::new(format!("http://{}", addr));
    for args in [
        &["create", "notes"][..],
        &["retrieve", "notes"][..],
        &["update", "notes", "-c", "x"][..],
    ] {
        let (outcome, out) = sbin(&client, args).await;
        assert_eq!(outcome, Outcome::Failure);
        assert_eq!(out, format!("{}\n", CONNECTION_ERROR_MESSAGE));
    }
}

#[tokio::test]
async fn test_create_sends_query_params() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create"))
        .and(query_param("name", "notes"))
        .and(query_param("uuid", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "bin-name": "notes-1234" })),
        )
        .expect(1)
        .mount(&mock)
        .await;

    let client = BinClient::new(mock.uri());
    let (outcome, out) = sbin(&client, &["create", "notes", "-u"]).await;
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(out, "Created bin with name:notes-1234\n");
}

#[tokio::test]
async fn test_malformed_response_is_unexpected() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&mock)
        .await;

    let client = BinClient::new(mock.uri());
    let (outcome, out) = sbin(&client, &["create", "notes"]).await;
    assert_eq!(outcome, Outcome::Failure);

    let mut lines = out.lines();
    assert_eq!(lines.next(), Some(UNEXPECTED_ERROR_MESSAGE));
    assert!(lines.next().is_some_and(|detail| detail.contains("500")));
}
