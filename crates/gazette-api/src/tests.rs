//! End-to-end tests: the full router over a seeded in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::{Body, to_bytes},
  http::{Request, StatusCode, header},
};
use gazette_core::seed::SeedData;
use gazette_store_sqlite::{DEV_DATA, SqliteStore};
use serde_json::{Value, json};
use tower::ServiceExt as _;

async fn seeded_app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  store
    .seed(SeedData::from_json(DEV_DATA).unwrap())
    .await
    .unwrap();
  crate::app(Arc::new(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) { send(app, "GET", uri, None).await }

fn msg(body: &Value) -> &str { body["msg"].as_str().unwrap_or_default() }

// ─── Root & fallback ─────────────────────────────────────────────────────────

#[tokio::test]
async fn root_describes_every_endpoint() {
  let app = seeded_app().await;
  let (status, body) = get(&app, "/api").await;

  assert_eq!(status, StatusCode::OK);
  let endpoints = body["endpoints"].as_object().unwrap();
  for key in [
    "GET /api/topics",
    "POST /api/articles",
    "GET /api/articles/:article_id/comments",
    "DELETE /api/comments/:comment_id",
    "GET /api/users/:username",
  ] {
    assert!(endpoints.contains_key(key), "missing {key}");
  }
}

#[tokio::test]
async fn unknown_route_is_json_404() {
  let app = seeded_app().await;
  let (status, body) = get(&app, "/api/not-a-route").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(msg(&body), "Route not found");
}

// ─── Identifiers ─────────────────────────────────────────────────────────────

fn id_routes(id: &str) -> Vec<(&'static str, String, Option<Value>)> {
  vec![
    ("GET", format!("/api/articles/{id}"), None),
    ("PATCH", format!("/api/articles/{id}"), Some(json!({ "inc_votes": 1 }))),
    ("DELETE", format!("/api/articles/{id}"), None),
    ("GET", format!("/api/articles/{id}/comments"), None),
    (
      "POST",
      format!("/api/articles/{id}/comments"),
      Some(json!({ "username": "lurker", "body": "hello" })),
    ),
    ("PATCH", format!("/api/comments/{id}"), Some(json!({ "inc_votes": 1 }))),
    ("DELETE", format!("/api/comments/{id}"), None),
  ]
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
  let app = seeded_app().await;
  for raw in ["banana", "0", "-1", "1.5"] {
    for (method, uri, body) in id_routes(raw) {
      let (status, resp) = send(&app, method, &uri, body).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
      assert_eq!(msg(&resp), "Bad request", "{method} {uri}");
    }
  }
}

#[tokio::test]
async fn nonexistent_ids_are_not_found() {
  let app = seeded_app().await;
  for (method, uri, body) in id_routes("9999") {
    let (status, resp) = send(&app, method, &uri, body).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
    assert_eq!(msg(&resp), "Not found", "{method} {uri}");
  }
}

// ─── Topics ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn lists_topics() {
  let app = seeded_app().await;
  let (status, body) = get(&app, "/api/topics").await;

  assert_eq!(status, StatusCode::OK);
  let topics = body["topics"].as_array().unwrap();
  assert_eq!(topics.len(), 3);
  assert!(topics.iter().all(|t| t["slug"].is_string() && t["description"].is_string()));
}

#[tokio::test]
async fn posts_topics_and_rejects_duplicates() {
  let app = seeded_app().await;
  let topic = json!({ "slug": "dogs", "description": "Not cats" });

  let (status, body) = send(&app, "POST", "/api/topics", Some(topic.clone())).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["topic"], topic);

  let (status, body) = send(&app, "POST", "/api/topics", Some(topic)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(msg(&body), "Bad request (duplicate key)");

  let (status, body) =
    send(&app, "POST", "/api/topics", Some(json!({ "description": "no slug" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(msg(&body), "Bad request");
}

// ─── Article listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn default_listing_is_newest_first_without_bodies() {
  let app = seeded_app().await;
  let (status, body) = get(&app, "/api/articles").await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["total_count"], 13);
  let articles = body["articles"].as_array().unwrap();
  assert_eq!(articles.len(), 10);
  assert!(articles.iter().all(|a| a.get("body").is_none()));
  assert!(articles.iter().all(|a| a["comment_count"].is_i64()));

  let dates: Vec<&str> = articles
    .iter()
    .map(|a| a["created_at"].as_str().unwrap())
    .collect();
  assert!(dates.windows(2).all(|w| w[0] >= w[1]), "{dates:?}");
}

#[tokio::test]
async fn listing_filters_by_topic() {
  let app = seeded_app().await;
  let (status, body) = get(&app, "/api/articles?topic=mitch&limit=20").await;

  assert_eq!(status, StatusCode::OK);
  let articles = body["articles"].as_array().unwrap();
  assert_eq!(body["total_count"], 12);
  assert_eq!(articles.len(), 12);
  assert!(articles.iter().all(|a| a["topic"] == "mitch"));
}

#[tokio::test]
async fn listing_topic_failures() {
  let app = seeded_app().await;

  let (status, body) = get(&app, "/api/articles?topic=dogs").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(msg(&body), "Topic not found");

  let (status, body) = get(&app, "/api/articles?topic=paper").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(msg(&body), "No articles found with this topic");
}

#[tokio::test]
async fn listing_sorts_by_requested_column() {
  let app = seeded_app().await;
  let (status, body) = get(&app, "/api/articles?sort_by=votes&order=asc&limit=20").await;

  assert_eq!(status, StatusCode::OK);
  let votes: Vec<i64> = body["articles"]
    .as_array()
    .unwrap()
    .iter()
    .map(|a| a["votes"].as_i64().unwrap())
    .collect();
  assert_eq!(votes.len(), 13);
  assert!(votes.windows(2).all(|w| w[0] <= w[1]), "{votes:?}");

  let (_, body) = get(&app, "/api/articles?sort_by=title&order=asc").await;
  assert_eq!(body["articles"][0]["title"], "A");
}

#[tokio::test]
async fn listing_rejects_invalid_parameters() {
  let app = seeded_app().await;
  for query in [
    "sort_by=body",
    "sort_by=votes%3B%20DROP%20TABLE%20articles",
    "order=sideways",
    "limit=ten",
    "limit=0",
    "p=-2",
  ] {
    let (status, body) = get(&app, &format!("/api/articles?{query}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
    assert_eq!(msg(&body), "Bad request");
  }
}

#[tokio::test]
async fn listing_paginates() {
  let app = seeded_app().await;

  let (status, body) = get(&app, "/api/articles?limit=5&p=3").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["articles"].as_array().unwrap().len(), 3);
  assert_eq!(body["total_count"], 13);

  let (status, _) = get(&app, "/api/articles?limit=5&p=4").await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = get(&app, "/api/articles?p=3").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Single articles ─────────────────────────────────────────────────────────

#[tokio::test]
async fn gets_article_with_body_and_comment_count() {
  let app = seeded_app().await;
  let (status, body) = get(&app, "/api/articles/1").await;

  assert_eq!(status, StatusCode::OK);
  let article = &body["article"];
  assert_eq!(article["article_id"], 1);
  assert_eq!(article["body"], "I find this existence challenging");
  assert_eq!(article["comment_count"], 11);
  assert_eq!(article["votes"], 100);
}

#[tokio::test]
async fn patches_article_votes() {
  let app = seeded_app().await;

  let (status, body) =
    send(&app, "PATCH", "/api/articles/1", Some(json!({ "inc_votes": 50 }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["article"]["votes"], 150);

  let (status, body) =
    send(&app, "PATCH", "/api/articles/1", Some(json!({ "inc_votes": -151 }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["article"]["votes"], -1);

  for bad in [json!({}), json!({ "inc_votes": "lots" }), json!({ "votes": 1 })] {
    let (status, body) = send(&app, "PATCH", "/api/articles/1", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(msg(&body), "Bad request");
  }
}

#[tokio::test]
async fn overflowing_vote_patch_is_rejected_and_row_stays_readable() {
  let app = seeded_app().await;

  for uri in ["/api/articles/1", "/api/comments/1"] {
    let (status, body) =
      send(&app, "PATCH", uri, Some(json!({ "inc_votes": i64::MAX }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    assert_eq!(msg(&body), "Bad request");
  }

  let (status, body) = get(&app, "/api/articles/1").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["article"]["votes"], 100);

  let (status, _) = get(&app, "/api/articles").await;
  assert_eq!(status, StatusCode::OK);
}

async fn total_comments(app: &Router) -> i64 {
  let (_, body) = get(app, "/api/articles?limit=100").await;
  body["articles"]
    .as_array()
    .unwrap()
    .iter()
    .map(|a| a["comment_count"].as_i64().unwrap())
    .sum()
}

#[tokio::test]
async fn deleting_an_article_deletes_its_comments() {
  let app = seeded_app().await;
  assert_eq!(total_comments(&app).await, 18);

  let (status, body) = send(&app, "DELETE", "/api/articles/1", None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  assert_eq!(body, Value::Null);

  assert_eq!(total_comments(&app).await, 18 - 11);
  let (status, _) = get(&app, "/api/articles/1").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) = get(&app, "/api/articles/1/comments").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn posts_article() {
  let app = seeded_app().await;
  let input = json!({
    "author": "lurker",
    "title": "Why paper?",
    "body": "Trees, mostly.",
    "topic": "paper"
  });

  let (status, body) = send(&app, "POST", "/api/articles", Some(input)).await;
  assert_eq!(status, StatusCode::CREATED);
  let article = &body["article"];
  assert_eq!(article["article_id"], 14);
  assert_eq!(article["author"], "lurker");
  assert_eq!(article["votes"], 0);
  assert_eq!(article["comment_count"], 0);
  assert!(article["created_at"].is_string());
  assert_eq!(
    article["article_img_url"],
    gazette_core::article::DEFAULT_ARTICLE_IMG_URL
  );

  let (status, body) = get(&app, "/api/articles?topic=paper").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["total_count"], 1);
}

#[tokio::test]
async fn post_article_failures() {
  let app = seeded_app().await;
  let base = json!({
    "author": "lurker",
    "title": "Title",
    "body": "Body",
    "topic": "mitch"
  });

  let mut missing_topic = base.clone();
  missing_topic.as_object_mut().unwrap().remove("topic");
  let (status, body) = send(&app, "POST", "/api/articles", Some(missing_topic)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(msg(&body), "Bad request");

  let mut blank_title = base.clone();
  blank_title["title"] = json!("");
  let (status, _) = send(&app, "POST", "/api/articles", Some(blank_title)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let mut stranger = base.clone();
  stranger["author"] = json!("nobody");
  let (status, body) = send(&app, "POST", "/api/articles", Some(stranger)).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(msg(&body), "Author not found");

  let mut unknown_topic = base;
  unknown_topic["topic"] = json!("dogs");
  let (status, body) = send(&app, "POST", "/api/articles", Some(unknown_topic)).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(msg(&body), "Topic not found");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
  let app = seeded_app().await;
  let req = Request::builder()
    .method("POST")
    .uri("/api/topics")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{\"slug\": "))
    .unwrap();
  let resp = app.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert_eq!(msg(&body), "Bad request");
}

// ─── Comments ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn lists_comments_newest_first() {
  let app = seeded_app().await;
  let (status, body) = get(&app, "/api/articles/1/comments").await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["total_count"], 11);
  let comments = body["comments"].as_array().unwrap();
  assert_eq!(comments.len(), 10);
  assert_eq!(comments[0]["comment_id"], 5);
  assert!(comments.iter().all(|c| c["article_id"] == 1));

  let (status, body) = get(&app, "/api/articles/1/comments?limit=5&p=3").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["comments"].as_array().unwrap().len(), 1);

  let (status, _) = get(&app, "/api/articles/1/comments?limit=5&p=4").await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, body) = get(&app, "/api/articles/2/comments").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["comments"], json!([]));
  assert_eq!(body["total_count"], 0);
}

#[tokio::test]
async fn posts_comment() {
  let app = seeded_app().await;
  let (status, body) = send(
    &app,
    "POST",
    "/api/articles/2/comments",
    Some(json!({ "username": "lurker", "body": "First!" })),
  )
  .await;

  assert_eq!(status, StatusCode::CREATED);
  let comment = &body["comment"];
  assert_eq!(comment["comment_id"], 19);
  assert_eq!(comment["article_id"], 2);
  assert_eq!(comment["author"], "lurker");
  assert_eq!(comment["body"], "First!");
  assert_eq!(comment["votes"], 0);
}

#[tokio::test]
async fn post_comment_failures() {
  let app = seeded_app().await;

  let (status, _) = send(
    &app,
    "POST",
    "/api/articles/2/comments",
    Some(json!({ "username": "lurker" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, body) = send(
    &app,
    "POST",
    "/api/articles/2/comments",
    Some(json!({ "username": "nobody", "body": "hi" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(msg(&body), "Author not found");
}

#[tokio::test]
async fn patches_and_deletes_comments() {
  let app = seeded_app().await;

  let (status, body) =
    send(&app, "PATCH", "/api/comments/1", Some(json!({ "inc_votes": -6 }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["comment"]["votes"], 10);

  let (status, _) = send(&app, "DELETE", "/api/comments/1", None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (status, body) = send(&app, "DELETE", "/api/comments/1", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(msg(&body), "Not found");
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn lists_and_gets_users() {
  let app = seeded_app().await;

  let (status, body) = get(&app, "/api/users").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["users"].as_array().unwrap().len(), 4);

  let (status, body) = get(&app, "/api/users/lurker").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["user"]["name"], "do_nothing");

  let (status, body) = get(&app, "/api/users/nobody").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(msg(&body), "Not found");
}
