//! SeaweedFS backend against a mock master + volume server.

use pagecast::storage::{SeaweedStorage, StorageBackend};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One mock stands in for both the master and the volume server; the
/// assign response points the client back at it.
async fn mock_master() -> (MockServer, String) {
    let server = MockServer::start().await;
    let host = server.uri().trim_start_matches("http://").to_string();
    (server, host)
}

#[tokio::test]
async fn test_upload_assigns_then_writes() {
    let (server, host) = mock_master().await;

    Mock::given(method("GET"))
        .and(path("/dir/assign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fid": "3,01637037d6",
            "url": host,
            "publicUrl": host,
            "count": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/3,01637037d6"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "size": 12 })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = SeaweedStorage::new(server.uri());
    let object = storage
        .upload(b"hello object".to_vec(), "doc.txt")
        .await
        .unwrap();

    assert_eq!(object.id, "3,01637037d6");
    assert_eq!(object.storage, "seaweedfs");
    assert!(object.url.ends_with("/3,01637037d6"));
}

#[tokio::test]
async fn test_delete_locates_volume_first() {
    let (server, host) = mock_master().await;

    Mock::given(method("GET"))
        .and(path("/dir/lookup"))
        .and(query_param("volumeId", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "locations": [{ "url": host }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/3,01637037d6"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "size": 12 })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = SeaweedStorage::new(server.uri());
    storage.delete("3,01637037d6").await.unwrap();
}

#[tokio::test]
async fn test_quota_derived_from_master_status() {
    let (server, _host) = mock_master().await;

    Mock::given(method("GET"))
        .and(path("/dir/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Topology": { "Max": 8, "Free": 6 },
            "VolumeSizeLimitMB": 100,
            "Version": "30GB 3.59"
        })))
        .mount(&server)
        .await;

    let storage = SeaweedStorage::new(server.uri());
    let quota = storage.quota().await.unwrap().unwrap();

    let mb = 1024 * 1024;
    assert_eq!(quota.total_bytes, 8 * 100 * mb);
    assert_eq!(quota.used_bytes, 2 * 100 * mb);
}

#[tokio::test]
async fn test_quota_unavailable_when_status_is_bare() {
    let (server, _host) = mock_master().await;

    Mock::given(method("GET"))
        .and(path("/dir/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Version": "3.59" })))
        .mount(&server)
        .await;

    let storage = SeaweedStorage::new(server.uri());
    assert!(storage.quota().await.unwrap().is_none());
}

#[tokio::test]
async fn test_upload_surfaces_assign_failure() {
    let (server, _host) = mock_master().await;

    Mock::given(method("GET"))
        .and(path("/dir/assign"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let storage = SeaweedStorage::new(server.uri());
    let result = storage.upload(b"bytes".to_vec(), "x").await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("assign failed"));
}
