mod common;

use axum::http::StatusCode;
use common::{send, setup_test_app, user_with_token};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "./migrations")]
async fn test_course_crud(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let (_, token) = user_with_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({ "title": "Algorithms", "description": "Sorting and searching" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["title"], "Algorithms");
    let id = body["data"]["id"].as_i64().unwrap();

    send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({ "title": "Compilers" })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/courses", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Algorithms", "Compilers"]);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/courses/{}", id),
        Some(&token),
        Some(json!({ "title": "Advanced Algorithms" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Advanced Algorithms");
    assert_eq!(body["data"]["description"], "Sorting and searching");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/courses/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/courses/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Course not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_course_title_conflicts(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let (_, token) = user_with_token(&app).await;

    send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({ "title": "Networks" })),
    )
    .await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({ "title": "networks" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "A course with this title already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_course_lists_enrolled_users(pool: SqlitePool) {
    let app = setup_test_app(pool.clone());
    let (user_id, token) = user_with_token(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({ "title": "Operating Systems" })),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    send(
        &app,
        "POST",
        &format!("/api/users/{}/courses", user_id),
        Some(&token),
        Some(json!({ "course_id": id })),
    )
    .await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/courses/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_ids"], json!([user_id]));

    send(
        &app,
        "DELETE",
        &format!("/api/courses/{}", id),
        Some(&token),
        None,
    )
    .await;
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_courses WHERE course_id = ?")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_course_is_not_found(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let (_, token) = user_with_token(&app).await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/courses/4242",
        Some(&token),
        Some(json!({ "title": "Nothing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/courses/4242", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/api/courses/not-a-number", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_blank_course_title_is_rejected(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let (_, token) = user_with_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({ "title": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"][0]["field"], "title");

    let (status, body) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({ "title": "  Graphics  " })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["title"], "Graphics");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/courses/{}", id),
        Some(&token),
        Some(json!({ "title": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"][0]["field"], "title");
}
