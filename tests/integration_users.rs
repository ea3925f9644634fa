mod common;

use axum::http::StatusCode;
use common::{
    admin_with_token, generate_unique_email, register, send, setup_test_app, user_with_token,
};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "./migrations")]
async fn test_users_require_token(pool: SqlitePool) {
    let app = setup_test_app(pool);

    for uri in ["/api/users", "/api/users/all", "/api/users/some-id"] {
        let (status, body) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["data"], serde_json::Value::Null);
    }

    let (status, _) = send(&app, "GET", "/api/users", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_paging_defaults_bounds_and_total(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let (_, token) = user_with_token(&app).await;
    for i in 0..11 {
        register(&app, &format!("member-{:02}", i), &generate_unique_email(), 20).await;
    }

    let (status, body) = send(&app, "GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["size"], 10);
    assert_eq!(body["data"]["total"], 12);
    assert_eq!(body["data"]["total_pages"], 2);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 10);

    let (_, body) = send(&app, "GET", "/api/users?page=2&size=10", Some(&token), None).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "GET", "/api/users?page=5&size=10", Some(&token), None).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["total"], 12);

    let (_, body) = send(&app, "GET", "/api/users?page=1&size=5", Some(&token), None).await;
    let names: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["member-00", "member-01", "member-02", "member-03", "member-04"]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_paging_rejects_out_of_range(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let (_, token) = user_with_token(&app).await;

    for uri in [
        "/api/users?page=0",
        "/api/users?size=0",
        "/api/users?size=101",
        "/api/users?page=-1&size=10",
    ] {
        let (status, body) = send(&app, "GET", uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], false);
        assert!(body["data"].as_array().is_some_and(|e| !e.is_empty()));
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_all_and_by_id(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let (user_id, token) = user_with_token(&app).await;

    let (status, body) = send(&app, "GET", "/api/users/all", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/users/{}", user_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user_id);
    assert_eq!(body["data"]["roles"], json!([]));

    let (status, body) = send(&app, "GET", "/api/users/missing", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_user_partial_and_conflicts(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let (user_id, token) = user_with_token(&app).await;
    let other_email = generate_unique_email();
    register(&app, "other", &other_email, 50).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/users/{}", user_id),
        Some(&token),
        Some(json!({ "age": 31 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["age"], 31);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/users/{}", user_id),
        Some(&token),
        Some(json!({ "email": other_email })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/users/{}", user_id),
        Some(&token),
        Some(json!({ "username": "other" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/users/{}", user_id),
        Some(&token),
        Some(json!({ "email": "broken", "age": -3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/users/missing",
        Some(&token),
        Some(json!({ "age": 20 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user_removes_memberships_and_enrollments(pool: SqlitePool) {
    let app = setup_test_app(pool.clone());
    let (_, admin_token) = admin_with_token(&pool, &app).await;
    let (user_id, token) = user_with_token(&app).await;

    let (_, course) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({ "title": "Rust 101" })),
    )
    .await;
    let course_id = course["data"]["id"].as_i64().unwrap();

    send(
        &app,
        "POST",
        &format!("/api/users/{}/courses", user_id),
        Some(&token),
        Some(json!({ "course_id": course_id })),
    )
    .await;
    send(
        &app,
        "POST",
        &format!("/api/users/{}/roles", user_id),
        Some(&admin_token),
        Some(json!({ "role_name": "User" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/users/{}", user_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (roles,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_roles WHERE user_id = ?")
        .bind(&user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    let (courses,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM user_courses WHERE user_id = ?")
            .bind(&user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(roles, 0);
    assert_eq!(courses, 0);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/users/{}", user_id),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_role_is_idempotent(pool: SqlitePool) {
    let app = setup_test_app(pool.clone());
    let (user_id, token) = user_with_token(&app).await;
    let uri = format!("/api/users/{}/roles", user_id);

    let (status, body) = send(&app, "POST", &uri, Some(&token), Some(json!({ "role_name": "User" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Role assigned successfully");

    let (status, body) = send(&app, "POST", &uri, Some(&token), Some(json!({ "role_name": "user" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Role is already assigned to this user");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_roles WHERE user_id = ?")
        .bind(&user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let (_, body) = send(&app, "GET", &format!("/api/users/{}", user_id), Some(&token), None).await;
    assert_eq!(body["data"]["roles"], json!(["User"]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_unknown_role_or_user_is_not_found(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let (user_id, token) = user_with_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/users/{}/roles", user_id),
        Some(&token),
        Some(json!({ "role_name": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Role not found");

    let (status, body) = send(
        &app,
        "POST",
        "/api/users/missing/roles",
        Some(&token),
        Some(json!({ "role_name": "User" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_remove_role_requires_admin(pool: SqlitePool) {
    let app = setup_test_app(pool.clone());
    let (_, admin_token) = admin_with_token(&pool, &app).await;
    let (user_id, token) = user_with_token(&app).await;

    send(
        &app,
        "POST",
        &format!("/api/users/{}/roles", user_id),
        Some(&token),
        Some(json!({ "role_name": "User" })),
    )
    .await;

    let uri = format!("/api/users/{}/roles/User", user_id);
    let (status, body) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "DELETE", &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "DELETE", &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User does not have this role");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_and_unenroll(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let (user_id, token) = user_with_token(&app).await;

    let (_, course) = send(
        &app,
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({ "title": "Databases", "description": "SQL basics" })),
    )
    .await;
    let course_id = course["data"]["id"].as_i64().unwrap();
    let enroll_uri = format!("/api/users/{}/courses", user_id);

    let (status, _) = send(&app, "POST", &enroll_uri, Some(&token), Some(json!({ "course_id": course_id }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", &enroll_uri, Some(&token), Some(json!({ "course_id": course_id }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "POST", &enroll_uri, Some(&token), Some(json!({ "course_id": 9999 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", &format!("/api/users/{}", user_id), Some(&token), None).await;
    assert_eq!(body["data"]["courses"], json!(["Databases"]));

    let unenroll_uri = format!("/api/users/{}/courses/{}", user_id, course_id);
    let (status, _) = send(&app, "DELETE", &unenroll_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "DELETE", &unenroll_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User is not enrolled in this course");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_paging_rejects_page_whose_offset_overflows(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let (_, token) = user_with_token(&app).await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/users?page=9223372036854775807&size=100",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"][0]["field"], "page");

    let (status, body) = send(
        &app,
        "GET",
        "/api/users?page=9223372036854775807&size=1",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["data"]["total"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_rejects_blank_username_and_case_clash(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let (user_id, token) = user_with_token(&app).await;
    register(&app, "Dana", &generate_unique_email(), 28).await;
    let uri = format!("/api/users/{}", user_id);

    let (status, body) = send(&app, "PUT", &uri, Some(&token), Some(json!({ "username": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"][0]["field"], "username");
    assert_eq!(body["data"][0]["message"], "Username is required");

    let (status, _) = send(&app, "PUT", &uri, Some(&token), Some(json!({ "username": "dana" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "PUT", &uri, Some(&token), Some(json!({ "username": "  erin " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "erin");
}
