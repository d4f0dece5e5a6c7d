//! End-to-end tests: real sockets between client, proxy and origin.

mod common;

use std::time::Duration;

use common::{closed_port, http_response, send, start_origin, start_proxy, test_config};

#[tokio::test]
async fn test_miss_then_hit() {
    let tmp = tempfile::tempdir().unwrap();
    let origin = start_origin(vec![http_response(200, "hello from origin")]).await;
    let proxy = start_proxy(test_config(tmp.path())).await;

    let request = format!(
        "GET http://127.0.0.1:{}/hello HTTP/1.1\r\n\r\n",
        origin.addr.port()
    );

    let first = send(proxy.addr, &request).await;
    assert_eq!(first.status_code(), 200);
    assert_eq!(first.header("Cache-Hit"), Some("0"));
    assert_eq!(first.body(), b"hello from origin");

    let cached = tmp.path().join("cache").join("127.0.0.1").join("hello");
    assert_eq!(std::fs::read(&cached).unwrap(), b"hello from origin");

    let second = send(proxy.addr, &request).await;
    assert_eq!(second.status_code(), 200);
    assert_eq!(second.header("Cache-Hit"), Some("1"));
    assert_eq!(second.body(), b"hello from origin");

    assert_eq!(origin.hits(), 1, "second request must not reach the origin");
}

#[tokio::test]
async fn test_body_split_across_writes() {
    let tmp = tempfile::tempdir().unwrap();
    let body = "abcdefghijklmnopqrstuvwxyz";
    let head = format!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n", body.len());
    let origin = start_origin(vec![head, body[..10].to_string(), body[10..].to_string()]).await;
    let proxy = start_proxy(test_config(tmp.path())).await;

    let response = send(
        proxy.addr,
        &format!("GET http://127.0.0.1:{}/letters HTTP/1.0\r\n\r\n", origin.addr.port()),
    )
    .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.body(), body.as_bytes());
}

#[tokio::test]
async fn test_origin_404_is_relayed_uncached() {
    let tmp = tempfile::tempdir().unwrap();
    let origin = start_origin(vec![http_response(404, "nothing here")]).await;
    let proxy = start_proxy(test_config(tmp.path())).await;

    let request = format!("GET http://127.0.0.1:{}/gone HTTP/1.1\r\n\r\n", origin.addr.port());
    let response = send(proxy.addr, &request).await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(response.header("Cache-Hit"), Some("0"));
    assert_eq!(response.body(), b"nothing here");

    send(proxy.addr, &request).await;
    assert_eq!(origin.hits(), 2);
    assert!(!tmp.path().join("cache").join("127.0.0.1").join("gone").exists());
}

#[tokio::test]
async fn test_unsupported_origin_status_becomes_500() {
    let tmp = tempfile::tempdir().unwrap();
    let origin = start_origin(vec![http_response(302, "")]).await;
    let proxy = start_proxy(test_config(tmp.path())).await;

    let response = send(
        proxy.addr,
        &format!("GET http://127.0.0.1:{}/moved HTTP/1.1\r\n\r\n", origin.addr.port()),
    )
    .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(response.header("Cache-Hit"), Some("0"));
}

#[tokio::test]
async fn test_unreachable_origin() {
    let tmp = tempfile::tempdir().unwrap();
    let port = closed_port().await;
    let proxy = start_proxy(test_config(tmp.path())).await;

    let response = send(
        proxy.addr,
        &format!("GET http://127.0.0.1:{port}/x HTTP/1.1\r\n\r\n"),
    )
    .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(response.header("Cache-Hit"), Some("0"));
    assert!(response.body().is_empty());
    assert_eq!(std::fs::read_dir(tmp.path().join("cache")).unwrap().count(), 0);
}

#[tokio::test]
async fn test_rejected_requests_get_500() {
    let tmp = tempfile::tempdir().unwrap();
    let origin = start_origin(vec![http_response(200, "unused")]).await;
    let proxy = start_proxy(test_config(tmp.path())).await;
    let port = origin.addr.port();

    for request in [
        format!("POST http://127.0.0.1:{port}/form HTTP/1.1\r\n\r\n"),
        format!("GET http://127.0.0.1:{port}/ HTTP/2.0\r\n\r\n"),
        "GET\r\n\r\n".to_string(),
    ] {
        let response = send(proxy.addr, &request).await;
        assert_eq!(response.status_code(), 500, "request: {request:?}");
        assert_eq!(response.header("Cache-Hit"), Some("0"));
    }

    assert_eq!(origin.hits(), 0);
}

#[tokio::test]
async fn test_cache_cleared_on_startup() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let stale = config.cache.dir.join("example.com").join("old");
    std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
    std::fs::write(&stale, b"stale").unwrap();

    let _proxy = start_proxy(config.clone()).await;

    assert!(config.cache.dir.is_dir());
    assert_eq!(std::fs::read_dir(&config.cache.dir).unwrap().count(), 0);
}

#[tokio::test]
async fn test_through_reqwest_proxy_setting() {
    let tmp = tempfile::tempdir().unwrap();
    let origin = start_origin(vec![http_response(200, "via reqwest")]).await;
    let proxy = start_proxy(test_config(tmp.path())).await;

    let client = reqwest::Client::builder()
        .proxy(reqwest::Proxy::http(format!("http://{}", proxy.addr)).unwrap())
        .build()
        .unwrap();

    let response = client
        .get(format!("http://127.0.0.1:{}/page", origin.addr.port()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("cache-hit").and_then(|v| v.to_str().ok()),
        Some("0")
    );
    assert_eq!(response.text().await.unwrap(), "via reqwest");
}

#[tokio::test]
async fn test_shutdown_stops_accept_loop() {
    let tmp = tempfile::tempdir().unwrap();
    let proxy = start_proxy(test_config(tmp.path())).await;

    proxy.shutdown.trigger();

    tokio::time::timeout(Duration::from_secs(2), proxy.handle)
        .await
        .expect("accept loop should stop after shutdown")
        .unwrap();
}
