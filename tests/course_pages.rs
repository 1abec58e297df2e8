//! HTTP flows for the course pages: statuses, index cards, lesson listings,
//! create/validate/delete, and editing.

mod common;

use axum::http::StatusCode;
use sqlx::SqlitePool;

use common::{body_string, build_app, count, get, get_ok, location, post_form};
use coursebook::db::repository;
use coursebook::fixtures;

#[sqlx::test(migrations = "./migrations")]
async fn course_pages_respond(pool: SqlitePool) {
    fixtures::load(&pool).await.unwrap();
    let app = build_app(pool.clone());

    get_ok(app.clone(), "/courses/").await;
    get_ok(app.clone(), "/courses").await;
    get_ok(app.clone(), "/courses/new").await;

    let courses = repository::fetch_courses(&pool).await.unwrap();
    assert!(!courses.is_empty());
    for course in &courses {
        get_ok(app.clone(), &format!("/courses/{}", course.id)).await;
        get_ok(app.clone(), &format!("/courses/{}/edit", course.id)).await;

        // Empty submissions re-render the form instead of failing.
        let response = post_form(app.clone(), &format!("/courses/{}/edit", course.id), &[]).await;
        assert_eq!(response.status(), StatusCode::OK);
        let response = post_form(app.clone(), "/courses/new", &[]).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get(app.clone(), "/courses/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get(app, "/courses/42/edit").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn malformed_course_id_is_a_bad_request(pool: SqlitePool) {
    fixtures::load(&pool).await.unwrap();
    let app = build_app(pool);

    let response = get(app.clone(), "/courses/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = get(app, "/courses/abc/edit").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn index_lists_every_course(pool: SqlitePool) {
    fixtures::load(&pool).await.unwrap();
    let app = build_app(pool.clone());

    let body = get_ok(app, "/courses/").await;
    let courses = repository::fetch_courses(&pool).await.unwrap();
    assert_eq!(count(&body, "<div class=\"card\">"), courses.len());
}

#[sqlx::test(migrations = "./migrations")]
async fn show_page_lists_exactly_the_course_lessons(pool: SqlitePool) {
    fixtures::load(&pool).await.unwrap();
    let app = build_app(pool.clone());

    for course in repository::fetch_courses(&pool).await.unwrap() {
        let body = get_ok(app.clone(), &format!("/courses/{}", course.id)).await;
        let lessons = repository::fetch_lessons_for_course(&pool, course.id)
            .await
            .unwrap();
        assert_eq!(count(&body, "<li>"), lessons.len());
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn create_and_delete_course(pool: SqlitePool) {
    fixtures::load(&pool).await.unwrap();
    let app = build_app(pool.clone());

    let response = post_form(
        app.clone(),
        "/courses/new",
        &[
            ("course[code]", "PHPUNIT"),
            ("course[name]", "Test course"),
            ("course[description]", "Тестовый курс"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/courses/");

    let body = get_ok(app.clone(), "/courses/").await;
    assert_eq!(count(&body, "<div class=\"card\">"), 6);

    // The new course is the last card on the index page.
    let last_card = &body[body.rfind("<div class=\"card\">").unwrap()..];
    assert!(last_card.contains("Test course"));

    let created = repository::fetch_courses(&pool).await.unwrap();
    let created = created.last().unwrap();
    assert_eq!(created.code, "PHPUNIT");

    let body = get_ok(app.clone(), &format!("/courses/{}", created.id)).await;
    assert!(body.contains("course-remove-button"));

    let response = post_form(app.clone(), &format!("/courses/{}", created.id), &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/courses/");

    let body = get_ok(app, "/courses/").await;
    assert_eq!(count(&body, "<div class=\"card\">"), 5);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_course_removes_its_lessons(pool: SqlitePool) {
    fixtures::load(&pool).await.unwrap();
    let app = build_app(pool.clone());

    let course = repository::fetch_courses(&pool).await.unwrap()[0].clone();
    let lessons = repository::fetch_lessons_for_course(&pool, course.id)
        .await
        .unwrap();
    assert_eq!(lessons.len(), 5);

    let response = post_form(app, &format!("/courses/{}", course.id), &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let remaining = repository::fetch_lessons_for_course(&pool, course.id)
        .await
        .unwrap();
    assert!(remaining.is_empty());
    for lesson in lessons {
        assert!(
            repository::find_lesson_by_id(&pool, lesson.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn course_form_rejects_invalid_input(pool: SqlitePool) {
    fixtures::load(&pool).await.unwrap();
    let app = build_app(pool.clone());

    let long = "TestMe".repeat(50);
    let response = post_form(
        app.clone(),
        "/courses/new",
        &[
            ("course[code]", long.as_str()),
            ("course[name]", "Test course"),
            ("course[description]", "Тестовый курс"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Длина кода не должна превышать 255 символов"));

    let response = post_form(
        app.clone(),
        "/courses/new",
        &[
            ("course[code]", "symfony-course"),
            ("course[name]", "Test course"),
            ("course[description]", "Тестовый курс"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Данный код уже используется"));

    let response = post_form(
        app.clone(),
        "/courses/new",
        &[
            ("course[code]", "PHPUNIT"),
            ("course[name]", long.as_str()),
            ("course[description]", "Тестовый курс"),
        ],
    )
    .await;
    let body = body_string(response).await;
    assert!(body.contains("Длина названия не должна превышать 255 символов"));

    let long_description = "TestMe".repeat(200);
    let response = post_form(
        app.clone(),
        "/courses/new",
        &[
            ("course[code]", "PHPUNIT"),
            ("course[name]", "Test course"),
            ("course[description]", long_description.as_str()),
        ],
    )
    .await;
    let body = body_string(response).await;
    assert!(body.contains("Длина описания не должна превышать 1000 символов"));

    let response = post_form(
        app,
        "/courses/new",
        &[
            ("course[code]", ""),
            ("course[name]", "Test course"),
            ("course[description]", ""),
        ],
    )
    .await;
    let body = body_string(response).await;
    assert!(body.contains("Код не может быть пустым"));

    // Nothing was persisted along the way.
    assert_eq!(repository::fetch_courses(&pool).await.unwrap().len(), 5);
}

#[sqlx::test(migrations = "./migrations")]
async fn edit_course_updates_and_redirects_to_detail_page(pool: SqlitePool) {
    fixtures::load(&pool).await.unwrap();
    let app = build_app(pool.clone());

    let course = repository::fetch_courses(&pool).await.unwrap()[0].clone();

    let body = get_ok(app.clone(), &format!("/courses/{}/edit", course.id)).await;
    assert!(body.contains(&format!("value=\"{}\"", course.code)));

    let response = post_form(
        app.clone(),
        &format!("/courses/{}/edit", course.id),
        &[
            ("course[code]", "TEST"),
            ("course[name]", "Test course"),
            ("course[description]", "Тестовый курс"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/courses/{}", course.id));

    let updated = repository::find_course_by_id(&pool, course.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.code, "TEST");
    assert_eq!(updated.name, "Test course");

    let body = get_ok(app, &format!("/courses/{}", course.id)).await;
    assert!(body.contains("Test course"));
}

#[sqlx::test(migrations = "./migrations")]
async fn edit_course_may_keep_its_own_code(pool: SqlitePool) {
    fixtures::load(&pool).await.unwrap();
    let app = build_app(pool.clone());

    let course = repository::fetch_courses(&pool).await.unwrap()[0].clone();
    let response = post_form(
        app.clone(),
        &format!("/courses/{}/edit", course.id),
        &[
            ("course[code]", course.code.as_str()),
            ("course[name]", "Renamed course"),
            ("course[description]", ""),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Another course's code is still a conflict.
    let response = post_form(
        app,
        &format!("/courses/{}/edit", course.id),
        &[
            ("course[code]", "symfony-course"),
            ("course[name]", "Renamed course"),
            ("course[description]", ""),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Данный код уже используется"));
}

#[sqlx::test(migrations = "./migrations")]
async fn health_endpoint_responds(pool: SqlitePool) {
    let app = build_app(pool);
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}
