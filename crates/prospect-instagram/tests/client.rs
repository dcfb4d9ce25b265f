//! Integration tests for `InstagramClient` using wiremock HTTP mocks.

use prospect_instagram::{InstagramClient, InstagramError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> InstagramClient {
    InstagramClient::with_base_url("test-token", "17841400000000000", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn business_discovery_returns_parsed_profile() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "business_discovery": {
            "username": "maria.fit",
            "name": "Maria Fitness",
            "biography": "Sharing my weight loss journey | 34 | SP",
            "followers_count": 25_000,
            "media_count": 310,
            "media": {
                "data": [
                    { "like_count": 800, "comments_count": 45 },
                    { "like_count": 650, "comments_count": 30 }
                ]
            }
        },
        "id": "17841400000000000"
    });

    Mock::given(method("GET"))
        .and(path("/17841400000000000"))
        .and(query_param("access_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let profile = client
        .business_discovery("maria.fit")
        .await
        .expect("should parse profile");

    assert_eq!(profile.username, "maria.fit");
    assert_eq!(profile.name.as_deref(), Some("Maria Fitness"));
    assert_eq!(profile.followers_count, 25_000);
    let media = profile.media.expect("media present");
    assert_eq!(media.data.len(), 2);
    assert_eq!(media.data[0].like_count, 800);
}

#[tokio::test]
async fn business_discovery_without_profile_is_unavailable() {
    let server = MockServer::start().await;

    // A success envelope that lacks the business_discovery node — what the
    // API does for accounts that opted out of discovery.
    Mock::given(method("GET"))
        .and(path("/17841400000000000"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": "17841400000000000" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.business_discovery("someone_private").await;

    assert!(
        matches!(result, Err(InstagramError::ProfileUnavailable { ref username }) if username == "someone_private"),
        "expected ProfileUnavailable, got: {result:?}"
    );
}

#[tokio::test]
async fn unsupported_request_error_maps_to_unavailable() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "message": "Unsupported get request.",
            "type": "GraphMethodException",
            "code": 110,
            "error_subcode": 2_108_006
        }
    });

    Mock::given(method("GET"))
        .and(path("/17841400000000000"))
        .respond_with(ResponseTemplate::new(400).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.business_discovery("not_a_creator").await;

    assert!(matches!(
        result,
        Err(InstagramError::ProfileUnavailable { .. })
    ));
}

#[tokio::test]
async fn throttle_code_maps_to_rate_limited() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "message": "Application request limit reached",
            "type": "OAuthException",
            "code": 4
        }
    });

    Mock::given(method("GET"))
        .and(path("/ig_hashtag_search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.hashtag_search("weightlossjourney").await;

    assert!(
        matches!(result, Err(InstagramError::RateLimited { .. })),
        "expected RateLimited, got: {result:?}"
    );
}

#[tokio::test]
async fn http_429_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ig_hashtag_search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.hashtag_search("fitness").await;

    assert!(matches!(result, Err(InstagramError::RateLimited { .. })));
}

#[tokio::test]
async fn hashtag_search_returns_first_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ig_hashtag_search"))
        .and(query_param("q", "weightlossjourney"))
        .and(query_param("user_id", "17841400000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [ { "id": "17843857450048591" } ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let id = client
        .hashtag_search("weightlossjourney")
        .await
        .expect("should parse hashtag search");

    assert_eq!(id.as_deref(), Some("17843857450048591"));
}

#[tokio::test]
async fn hashtag_search_with_no_match_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ig_hashtag_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let id = client.hashtag_search("nosuchtag").await.expect("empty data is ok");

    assert!(id.is_none());
}

#[tokio::test]
async fn recent_media_parses_page_and_cursor() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "data": [
            {
                "id": "18001",
                "caption": "day 90 of my transformation with @maria.fit",
                "permalink": "https://www.instagram.com/p/abc/"
            },
            { "id": "18002" }
        ],
        "paging": {
            "cursors": { "after": "QVFIU" },
            "next": "https://graph.facebook.com/v19.0/17843857450048591/recent_media?after=QVFIU"
        }
    });

    Mock::given(method("GET"))
        .and(path("/17843857450048591/recent_media"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .recent_media("17843857450048591", 50, None)
        .await
        .expect("should parse media page");

    assert_eq!(page.data.len(), 2);
    assert_eq!(
        page.data[0].caption.as_deref(),
        Some("day 90 of my transformation with @maria.fit")
    );
    let paging = page.paging.expect("paging present");
    assert_eq!(
        paging.cursors.and_then(|c| c.after).as_deref(),
        Some("QVFIU")
    );
}

#[tokio::test]
async fn recent_media_passes_after_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/17843857450048591/recent_media"))
        .and(query_param("after", "QVFIU"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .recent_media("17843857450048591", 50, Some("QVFIU"))
        .await
        .expect("should parse empty page");

    assert!(page.data.is_empty());
    assert!(page.paging.is_none());
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ig_hashtag_search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.hashtag_search("fitness").await;

    assert!(
        matches!(result, Err(InstagramError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}
