//! TMDB provider tests against a mock HTTP server.

mod common;

use common::{list, CopyRemuxer, Library};
use mediashelf::config::{ScanConfig, TmdbConfig};
use mediashelf::metadata::{CatalogError, MetadataProvider, TmdbProvider};
use mediashelf::pipeline::LibraryRun;
use mediashelf_common::RunMode;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> TmdbProvider {
    let config = TmdbConfig {
        api_key: "test-key".to_string(),
        base_url: server.uri(),
        ..TmdbConfig::default()
    };
    TmdbProvider::new(&config).unwrap()
}

#[tokio::test]
async fn test_search_tv_sends_key_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("language", "en-US"))
        .and(query_param("query", "Doctor Who"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                {"id": 57243, "name": "Doctor Who", "first_air_date": "2005-03-26"},
                {"id": 121, "name": "Doctor Who", "first_air_date": "1963-11-23"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let shows = provider(&server).search_tv("Doctor Who").await.unwrap();
    assert_eq!(shows.len(), 2);
    assert_eq!(shows[0].id, 57243);
    assert_eq!(shows[0].name, "Doctor Who");
}

#[tokio::test]
async fn test_search_movie_parses_release_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "Heat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": 949, "title": "Heat", "release_date": "1995-12-15"},
                {"id": 1, "title": "Heat", "release_date": ""}
            ]
        })))
        .mount(&server)
        .await;

    let movies = provider(&server).search_movie("Heat").await.unwrap();
    assert_eq!(movies[0].year().as_deref(), Some("1995"));
    assert_eq!(movies[1].release_date, None);
    assert_eq!(movies[1].year(), None);
}

#[tokio::test]
async fn test_empty_search_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let shows = provider(&server).search_tv("Nothing").await.unwrap();
    assert!(shows.is_empty());
}

#[tokio::test]
async fn test_season_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/42/season/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "season_number": 1,
            "episodes": [
                {"episode_number": 1, "name": "Pilot", "air_date": "2001-01-01"},
                {"episode_number": 2, "name": "Second"}
            ]
        })))
        .mount(&server)
        .await;

    let season = provider(&server).season_details(42, 1).await.unwrap();
    assert_eq!(season.show_id, 42);
    assert_eq!(season.season_number, 1);
    assert_eq!(season.episodes.len(), 2);
    assert_eq!(season.episodes[1].episode_number, 2);
    assert_eq!(season.episodes[1].name, "Second");
}

#[tokio::test]
async fn test_missing_season_is_season_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tv/42/season/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status_code": 34,
            "status_message": "The resource you requested could not be found."
        })))
        .mount(&server)
        .await;

    let err = provider(&server).season_details(42, 9).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::SeasonNotFound {
            show_id: 42,
            season: 9
        }
    ));
}

#[tokio::test]
async fn test_server_error_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = provider(&server).search_movie("Heat").await.unwrap_err();
    assert!(matches!(err, CatalogError::Request(_)));
    assert!(!err.to_string().contains("test-key"));
}

#[tokio::test]
async fn test_retries_after_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": [{"id": 7, "name": "Foo"}]})),
        )
        .mount(&server)
        .await;

    let shows = provider(&server).search_tv("Foo").await.unwrap();
    assert_eq!(shows[0].id, 7);
}

#[tokio::test]
async fn test_rename_run_over_http_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .and(query_param("query", "Foo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": [{"id": 7, "name": "Foo"}]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tv/7/season/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "episodes": [
                {"episode_number": 1, "name": "Pilot"},
                {"episode_number": 2, "name": "Second"}
            ]
        })))
        .mount(&server)
        .await;

    let lib = Library::new();
    let dir = lib.add_dir("Foo", &[("a.mkv", "alpha"), ("b.mkv", "beta")]);

    let summary = LibraryRun::new(
        lib.root(),
        RunMode::Rename,
        &ScanConfig::default(),
        Box::new(provider(&server)),
    )
    .with_remuxer(Box::new(CopyRemuxer::new()))
    .run()
    .await
    .unwrap();

    assert_eq!(summary.files_renamed, 2);
    assert_eq!(
        list(&dir),
        vec!["(Foo) [S1E1] Pilot.mkv", "(Foo) [S1E2] Second.mkv"]
    );
}
