//! Integration test: GET/POST against a local stand-in for the NAS.
//!
//! Checks what actually goes over the wire (query string, multipart body)
//! and how envelopes and transport faults come back.

mod common;

use std::time::Duration;

use common::api_server::{self, Reply};
use dstation_core::api::{
    self, auth, task, ApiError, ApiRequest, Envelope, FilePayload, TransportError,
};
use serde_json::json;

#[tokio::test]
async fn get_sends_sorted_query_with_sid_and_no_timeout() {
    let server = api_server::start_fixed(Reply::json(json!({
        "success": true,
        "data": {"total": 0, "offset": 0, "tasks": []}
    })));
    let req = ApiRequest::new("SYNO.DownloadStation.Task", 1, "list")
        .sid("sess-1")
        .timeout(Duration::from_secs(5))
        .param("offset", 0u32);

    let env: Envelope<serde_json::Value> =
        api::get(&server.base_url, "DownloadStation/task", &req).await.unwrap();
    assert_eq!(
        env,
        Envelope::Success(json!({"total": 0, "offset": 0, "tasks": []}))
    );

    let seen = server.last_request();
    assert_eq!(seen.method, "GET");
    assert_eq!(seen.path(), "/webapi/DownloadStation/task.cgi");
    assert_eq!(
        seen.query(),
        "_sid=sess-1&api=SYNO.DownloadStation.Task&method=list&offset=0&sid=sess-1&version=1"
    );
    assert!(!seen.query().contains("timeout"));
}

#[tokio::test]
async fn vendor_failure_is_returned_not_raised() {
    let server = api_server::start_fixed(Reply::json(json!({
        "success": false,
        "error": {"code": 105}
    })));
    let req = ApiRequest::new("SYNO.DownloadStation.Info", 1, "getinfo").sid("expired");
    let env: Envelope<serde_json::Value> =
        api::get(&server.base_url, "DownloadStation/info", &req).await.unwrap();
    assert_eq!(env, Envelope::Failure(ApiError { code: 105 }));
}

#[tokio::test]
async fn post_sends_multipart_with_sid_before_files() {
    let server = api_server::start_fixed(Reply::json(json!({"success": true})));
    let torrent = b"d8:announce13:http://x/anne".to_vec();
    let req = ApiRequest::new("SYNO.DownloadStation.Task", 1, "create")
        .sid("sess-2")
        .file("file", FilePayload::new(torrent.clone(), "debian.torrent"))
        .param("destination", "home/dl");

    let env: Envelope<()> = api::post(&server.base_url, "DownloadStation/task", &req)
        .await
        .unwrap();
    assert!(env.is_success());

    let seen = server.last_request();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.target, "/webapi/DownloadStation/task.cgi");
    assert!(seen
        .header("content-type")
        .unwrap_or("")
        .starts_with("multipart/form-data"));

    let body = seen.body_text();
    let order: Vec<usize> = [
        "name=\"api\"",
        "name=\"version\"",
        "name=\"method\"",
        "name=\"sid\"",
        "name=\"destination\"",
        "name=\"_sid\"",
        "name=\"file\"; filename=\"debian.torrent\"",
    ]
    .iter()
    .map(|needle| body.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
    .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]), "parts out of order");
    assert_eq!(body.matches("name=\"api\"").count(), 1);
    assert!(!body.contains("name=\"timeout\""));
    assert!(body.contains("d8:announce13:http://x/anne"));
}

#[tokio::test]
async fn non_2xx_status_is_transport_error() {
    let server = api_server::start_fixed(Reply::raw(502, "bad gateway"));
    let req = ApiRequest::new("SYNO.API.Info", 1, "query");
    let r = api::get::<serde_json::Value>(&server.base_url, "query", &req).await;
    assert!(matches!(r, Err(TransportError::Http(502))), "{:?}", r);
}

#[tokio::test]
async fn malformed_body_is_transport_error() {
    let server = api_server::start_fixed(Reply::raw(200, "<html>login</html>"));
    let req = ApiRequest::new("SYNO.API.Info", 1, "query");
    let r = api::get::<serde_json::Value>(&server.base_url, "query", &req).await;
    assert!(matches!(r, Err(TransportError::Decode(_))), "{:?}", r);
}

#[tokio::test]
async fn slow_server_hits_request_timeout() {
    let server = api_server::start_fixed(
        Reply::json(json!({"success": true})).delayed(Duration::from_secs(3)),
    );
    let req = ApiRequest::new("SYNO.API.Info", 1, "query").timeout(Duration::from_millis(300));
    let r = api::get::<()>(&server.base_url, "query", &req).await;
    match r {
        Err(e) => assert!(e.is_timeout(), "expected timeout, got {e}"),
        Ok(_) => panic!("expected timeout"),
    }
}

#[tokio::test]
async fn login_then_list_tasks() {
    let server = api_server::start(|req| {
        if req.path() == "/webapi/auth.cgi" {
            Reply::json(json!({"success": true, "data": {"sid": "fresh-sid"}}))
        } else {
            Reply::json(json!({
                "success": true,
                "data": {
                    "total": 1,
                    "offset": 0,
                    "tasks": [{
                        "id": "dbid_3", "type": "http", "username": "admin",
                        "title": "file.iso", "size": 10, "status": "finished"
                    }]
                }
            }))
        }
    });

    let login = auth::login(&server.base_url, "admin", "secret", None)
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(login.sid, "fresh-sid");

    let opts = task::ListOptions {
        additional: vec![task::Additional::Transfer],
        ..Default::default()
    };
    let list = task::list(&server.base_url, &login.sid, &opts)
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(list.total, 1);
    assert_eq!(list.tasks[0].status, task::TaskStatus::Finished);

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].query().contains("passwd=secret"));
    assert!(requests[1].query().contains("_sid=fresh-sid"));
    assert!(requests[1].query().contains("additional=transfer"));
}

#[tokio::test]
async fn pause_reports_per_task_errors() {
    let server = api_server::start_fixed(Reply::json(json!({
        "success": true,
        "data": [{"id": "dbid_1", "error": 0}, {"id": "dbid_2", "error": 404}]
    })));
    let ids = vec!["dbid_1".to_string(), "dbid_2".to_string()];
    let results = task::pause(&server.base_url, "s", &ids, None)
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].error, 404);
    assert!(server.last_request().query().contains("id=dbid_1%2Cdbid_2"));
}
