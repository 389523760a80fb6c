//! Integration tests for the archive API client.
//!
//! These tests run every endpoint against a mock Save.TV server.

use savetv_core::api::{
    ApiClient, AuthError, CatalogItem, ListError, ResolveError, Session, TelecastId, login,
    list_recordings, remove_recording, resolve_download_url,
};
use savetv_core::config::ApiConfig;
use savetv_core::quality::QualityTier;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_config(server: &MockServer, remove_remote: bool) -> ApiConfig {
    ApiConfig {
        base_url: server.uri(),
        video_port: server.address().port(),
        remove_remote,
    }
}

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(api_config(server, false)).expect("client should build")
}

fn item(id: &str, quality: Option<u32>) -> CatalogItem {
    CatalogItem {
        id: TelecastId::new(id),
        display_name: format!("Recording {id}"),
        quality: quality.map(QualityTier),
    }
}

// ==================== Login ====================

#[tokio::test]
async fn test_login_success_returns_first_cookie_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/STV/M/Index.cfm"))
        .and(query_param("sk", "PREMIUM"))
        .and(body_string_contains("sUsername=alice"))
        .and(body_string_contains("sPassword=s3cr%26t"))
        .and(body_string_contains("value=Login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "SNUUID=abc123; path=/; HttpOnly")
                .set_body_string("<html>Login_Succeed</html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = login(&client(&server), "alice", "s3cr&t")
        .await
        .expect("login should succeed");

    assert_eq!(session.cookie_header(), Some("SNUUID=abc123"));
}

#[tokio::test]
async fn test_login_without_marker_is_denied() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/STV/M/Index.cfm"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "SNUUID=abc123; path=/")
                .set_body_string("<html>Wrong password</html>"),
        )
        .mount(&server)
        .await;

    let result = login(&client(&server), "alice", "wrong").await;

    assert!(matches!(result, Err(AuthError::Denied)));
}

#[tokio::test]
async fn test_login_without_cookie_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/STV/M/Index.cfm"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Login_Succeed"))
        .mount(&server)
        .await;

    let result = login(&client(&server), "alice", "pw").await;

    assert!(matches!(result, Err(AuthError::MissingCookie)));
}

#[tokio::test]
async fn test_login_does_not_follow_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/STV/M/Index.cfm"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", "/STV/M/Home.cfm")
                .insert_header("Set-Cookie", "SNUUID=redirected; path=/")
                .set_body_string("Login_Succeed"),
        )
        .mount(&server)
        .await;

    let session = login(&client(&server), "alice", "pw")
        .await
        .expect("login should succeed on the redirect response itself");

    assert_eq!(session.cookie_header(), Some("SNUUID=redirected"));
}

#[tokio::test]
async fn test_login_unreachable_server_is_transport_error() {
    let server = MockServer::start().await;
    let client = client(&server);
    drop(server);

    let result = login(&client, "alice", "pw").await;

    assert!(matches!(result, Err(AuthError::Transport(_))));
}

// ==================== Listing ====================

#[tokio::test]
async fn test_list_sends_session_cookie_and_preserves_order() {
    let server = MockServer::start().await;
    let body = r#"{"ARRVIDEOARCHIVEENTRIES":[
        {"STRTELECASTENTRY":{"ITELECASTID":300,"STITLE":"Tatort","SSUBTITLE":"Borowski",
            "ARRALLOWDDOWNLOADFORMATS":[{"BADCUTENABLED":true,"RECORDINGFORMATID":5},
                                        {"BADCUTENABLED":false,"RECORDINGFORMATID":6}]}},
        {"STRTELECASTENTRY":{"ITELECASTID":100,"STITLE":"Doku","SSUBTITLE":"",
            "ARRALLOWDDOWNLOADFORMATS":[{"BADCUTENABLED":false,"RECORDINGFORMATID":6}]}}
    ]}"#;
    Mock::given(method("GET"))
        .and(path("/STV/M/obj/archive/JSON/VideoArchiveApi.cfm"))
        .and(query_param("iEntriesPerPage", "1000"))
        .and(query_param("iRecordingState", "1"))
        .and(header("cookie", "SNUUID=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let items = list_recordings(&client(&server), &Session::new("SNUUID=abc123"))
        .await
        .expect("listing should succeed");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id.as_str(), "300");
    assert_eq!(items[0].display_name, "Tatort - Borowski");
    assert_eq!(items[0].quality, Some(QualityTier::SD_HIGH));
    assert_eq!(items[1].id.as_str(), "100");
    assert_eq!(items[1].display_name, "Doku");
    assert_eq!(items[1].quality, None);
}

#[tokio::test]
async fn test_list_empty_archive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/STV/M/obj/archive/JSON/VideoArchiveApi.cfm"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"ARRVIDEOARCHIVEENTRIES":[]}"#),
        )
        .mount(&server)
        .await;

    let items = list_recordings(&client(&server), &Session::new("SNUUID=abc"))
        .await
        .expect("listing should succeed");

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_list_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/STV/M/obj/archive/JSON/VideoArchiveApi.cfm"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Session expired</html>"))
        .mount(&server)
        .await;

    let result = list_recordings(&client(&server), &Session::new("SNUUID=abc")).await;

    assert!(matches!(result, Err(ListError::Parse(_))));
}

#[tokio::test]
async fn test_list_blank_session_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = list_recordings(&client(&server), &Session::new("")).await;

    assert!(matches!(result, Err(ListError::NoSession)));
}

// ==================== Resolution ====================

#[tokio::test]
async fn test_resolve_ok_returns_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/STV/M/obj/cRecordOrder/croGetDownloadUrl.cfm"))
        .and(query_param("TelecastId", "42"))
        .and(query_param("iFormat", "6"))
        .and(query_param("bAdFree", "true"))
        .and(header("cookie", "SNUUID=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"ARRVIDEOURL":["x","OK","http://dl.example.net/42.mp4"]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let url = resolve_download_url(&client(&server), &Session::new("SNUUID=abc"), &item("42", Some(6)))
        .await
        .expect("resolution should succeed");

    assert_eq!(url, "http://dl.example.net/42.mp4");
}

#[tokio::test]
async fn test_resolve_fail_status_is_no_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/STV/M/obj/cRecordOrder/croGetDownloadUrl.cfm"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"ARRVIDEOURL":["x","FAIL",null]}"#),
        )
        .mount(&server)
        .await;

    let result =
        resolve_download_url(&client(&server), &Session::new("SNUUID=abc"), &item("42", Some(6)))
            .await;

    assert!(matches!(result, Err(ResolveError::NoUrl { id }) if id == "42"));
}

#[tokio::test]
async fn test_resolve_without_quality_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result =
        resolve_download_url(&client(&server), &Session::new("SNUUID=abc"), &item("7", None)).await;

    assert!(matches!(result, Err(ResolveError::NoQuality { .. })));
}

// ==================== Remote deletion ====================

#[tokio::test]
async fn test_remove_enabled_calls_delete_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/STV/M/obj/cRecordOrder/croDelete.cfm"))
        .and(query_param("TelecastID", "42"))
        .and(header("cookie", "SNUUID=abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let client = ApiClient::new(api_config(&server, true)).expect("client should build");

    let removed = remove_recording(&client, &Session::new("SNUUID=abc"), &TelecastId::new("42"))
        .await
        .expect("deletion should succeed");

    assert!(removed);
}

#[tokio::test]
async fn test_remove_disabled_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let removed = remove_recording(
        &client(&server),
        &Session::new("SNUUID=abc"),
        &TelecastId::new("42"),
    )
    .await
    .expect("disabled deletion is not an error");

    assert!(!removed);
}
