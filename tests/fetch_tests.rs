//! Mock HTTP tests for image downloads.
//!
//! These tests cover:
//! - Successful downloads and decoding
//! - Non-transient statuses failing fast
//! - Retries on transient statuses
//! - The response size cap

use std::io::Cursor;
use std::time::Duration;

use glyphcast::source::{decode, download, FetchError, FetchOptions, Fetcher};
use glyphcast::Error;
use image::{ImageFormat, Rgb, RgbImage};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_options() -> FetchOptions {
    FetchOptions {
        max_retries: 2,
        backoff_base: Duration::from_millis(5),
        backoff_max: Duration::from_millis(20),
        ..FetchOptions::default()
    }
}

fn png_bytes() -> Vec<u8> {
    let image = RgbImage::from_pixel(3, 2, Rgb([40, 80, 120]));
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cat.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = Fetcher::new(fast_options()).unwrap();
    let body = fetcher
        .fetch(&format!("{}/cat.png", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(body, b"hello");
}

#[tokio::test]
async fn test_fetch_not_found_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = Fetcher::new(fast_options()).unwrap();
    let result = fetcher
        .fetch(&format!("{}/missing.png", mock_server.uri()))
        .await;

    assert!(matches!(
        result,
        Err(FetchError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_fetch_retries_transient_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = Fetcher::new(fast_options()).unwrap();
    let body = fetcher
        .fetch(&format!("{}/flaky.png", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_fetch_gives_up_after_max_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).insert_header("Retry-After", "0"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let fetcher = Fetcher::new(fast_options()).unwrap();
    let result = fetcher
        .fetch(&format!("{}/down.png", mock_server.uri()))
        .await;

    match result {
        Err(FetchError::Exhausted { attempts, message }) => {
            assert_eq!(attempts, 3);
            assert!(message.contains("503"));
        }
        other => panic!("expected Exhausted, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_rejects_oversized_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 1024]))
        .mount(&mock_server)
        .await;

    let options = FetchOptions {
        max_bytes: 100,
        ..fast_options()
    };
    let fetcher = Fetcher::new(options).unwrap();
    let result = fetcher
        .fetch(&format!("{}/huge.png", mock_server.uri()))
        .await;

    assert!(matches!(result, Err(FetchError::TooLarge { limit: 100 })));
}

#[tokio::test]
async fn test_download_and_decode_png() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pixel.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "image/png")
                .set_body_bytes(png_bytes()),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/pixel.png", mock_server.uri());
    let bytes = download(&url, &fast_options()).await.unwrap();
    let image = decode(&bytes, &url).unwrap();

    assert_eq!(image.dimensions(), (3, 2));
    assert_eq!(image.get_pixel(2, 1), &Rgb([40, 80, 120]));
}

#[tokio::test]
async fn test_download_failure_is_image_load_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let url = format!("{}/secret.png", mock_server.uri());
    let result = download(&url, &fast_options()).await;

    match result {
        Err(Error::ImageLoad { source_name, .. }) => assert_eq!(source_name, url),
        other => panic!("expected ImageLoad, got {:?}", other),
    }
}
