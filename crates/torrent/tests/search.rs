use serde_json::json;
use torrent::{ApiError, YtsApi};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn torrent(quality: &str, seeds: u64) -> serde_json::Value {
    json!({
        "url": format!("https://yts.mx/torrent/download/{}{}", quality, seeds),
        "hash": format!("HASH{}{}", quality, seeds),
        "quality": quality,
        "size": "1.2 GB",
        "seeds": seeds,
        "peers": 3
    })
}

fn movie(id: u64, title: &str, torrents: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "id": id,
        "url": format!("https://yts.mx/movies/{}", id),
        "title_long": title,
        "year": 2012,
        "rating": 8.0,
        "medium_cover_image": "https://yts.mx/cover.jpg",
        "torrents": torrents
    })
}

async fn api_with_movies(movies: Vec<serde_json::Value>) -> (MockServer, YtsApi) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list_movies.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "status_message": "Query was successful",
            "data": {"movie_count": movies.len(), "movies": movies}
        })))
        .mount(&server)
        .await;

    let api = YtsApi::new(&server.uri()).unwrap();
    (server, api)
}

#[tokio::test]
async fn test_search_sends_expected_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list_movies.json"))
        .and(query_param("query_term", "Avengers"))
        .and(query_param("limit", "20"))
        .and(query_param("sort_by", "download_count"))
        .and(query_param("order_by", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "data": {"movie_count": 1, "movies": [movie(1, "The Avengers (2012)", vec![torrent("720p", 5)])]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = YtsApi::new(&server.uri()).unwrap();
    let results = api.search("Avengers", None).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].movie_id, 1);
}

#[tokio::test]
async fn test_search_no_matches_returns_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list_movies.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "data": {"movie_count": 0, "limit": 20, "page_number": 1}
        })))
        .mount(&server)
        .await;

    let api = YtsApi::new(&server.uri()).unwrap();
    assert!(api.search("zzzzzqqqqq123", None).await.is_empty());
}

#[tokio::test]
async fn test_search_filters_by_quality() {
    let (_server, api) = api_with_movies(vec![
        movie(1, "The Avengers (2012)", vec![torrent("720p", 50), torrent("1080p", 40)]),
        movie(2, "Avengers: Endgame (2019)", vec![torrent("1080P", 90), torrent("2160p", 10)]),
    ])
    .await;

    let results = api.search("Avengers", Some("1080p")).await;
    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(result.quality.eq_ignore_ascii_case("1080p"));
        assert!(result.title.to_lowercase().contains("1080p"));
    }
}

#[tokio::test]
async fn test_search_sorts_by_seeds_and_truncates() {
    let torrents: Vec<_> = (0..6).map(|i| torrent("720p", i * 7 % 11)).collect();
    let more: Vec<_> = (0..6).map(|i| torrent("1080p", 100 + i)).collect();
    let (_server, api) = api_with_movies(vec![movie(1, "A (2001)", torrents), movie(2, "B (2002)", more)]).await;

    let results = api.search("anything", None).await;
    assert_eq!(results.len(), 10);
    assert!(results.windows(2).all(|w| w[0].seeds >= w[1].seeds));
    assert_eq!(results[0].seeds, 105);
}

#[tokio::test]
async fn test_search_api_error_status_returns_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list_movies.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "status_message": "Something went wrong"
        })))
        .mount(&server)
        .await;

    let api = YtsApi::new(&server.uri()).unwrap();
    assert!(api.search("Avengers", None).await.is_empty());
}

#[tokio::test]
async fn test_search_http_failure_returns_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list_movies.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = YtsApi::new(&server.uri()).unwrap();
    assert!(api.search("Avengers", None).await.is_empty());
}

#[tokio::test]
async fn test_search_malformed_body_returns_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list_movies.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;

    let api = YtsApi::new(&server.uri()).unwrap();
    assert!(api.search("Avengers", None).await.is_empty());
}

#[tokio::test]
async fn test_movie_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie_details.json"))
        .and(query_param("movie_id", "10"))
        .and(query_param("with_cast", "true"))
        .and(query_param("with_images", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "data": {"movie": {
                "id": 10,
                "title_long": "Inception (2010)",
                "year": 2010,
                "rating": 8.8,
                "runtime": 148,
                "genres": ["Action", "Sci-Fi"],
                "description_full": "A thief who steals corporate secrets.",
                "date_uploaded_unix": 1446320095,
                "cast": [{"name": "Leonardo DiCaprio", "character_name": "Cobb"}],
                "torrents": [torrent("1080p", 12), torrent("720p", 4)]
            }}
        })))
        .mount(&server)
        .await;

    let api = YtsApi::new(&server.uri()).unwrap();
    let details = api.movie_details(10).await.unwrap();
    assert_eq!(details.title_long, "Inception (2010)");
    assert_eq!(details.genres, vec!["Action", "Sci-Fi"]);
    assert_eq!(details.cast[0].name, "Leonardo DiCaprio");

    let links = api.stream_links(10, Some("720p")).await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].quality, "720p");
    assert!(links[0].url.starts_with("https://webtor.io/#magnet"));
}

#[tokio::test]
async fn test_movie_details_missing_movie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie_details.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "data": {}
        })))
        .mount(&server)
        .await;

    let api = YtsApi::new(&server.uri()).unwrap();
    let err = api.movie_details(99).await.unwrap_err();
    assert!(matches!(err, ApiError::MovieNotFound(99)));
}
