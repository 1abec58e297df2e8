use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use validator::Validate;

use crate::db::repository;
use crate::error::AppError;
use crate::forms::course::MSG_CODE_TAKEN;
use crate::forms::lesson::MSG_COURSE_NOT_FOUND;
use crate::forms::{CourseForm, FormErrors, LessonForm};
use crate::state::AppState;
use crate::templates::{
    CourseFormTemplate, CourseIndexTemplate, CourseShowTemplate, LessonFormTemplate,
    LessonShowTemplate,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(course_index))
        .route("/courses/", get(course_index))
        .route("/courses/new", get(course_new).post(course_create))
        .route("/courses/{id}", get(course_show).post(course_delete))
        .route("/courses/{id}/edit", get(course_edit).post(course_update))
        .route("/lessons/new", get(lesson_new).post(lesson_create))
        .route("/lessons/{id}", get(lesson_show).post(lesson_delete))
        .route("/lessons/{id}/edit", get(lesson_edit).post(lesson_update))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn course_index(State(state): State<AppState>) -> Result<CourseIndexTemplate, AppError> {
    let courses = repository::fetch_courses(&state.db).await?;
    Ok(CourseIndexTemplate { courses })
}

async fn course_new() -> CourseFormTemplate {
    CourseFormTemplate::new(
        "Новый курс",
        "/courses/new",
        CourseForm::default(),
        FormErrors::default(),
    )
}

async fn course_create(
    State(state): State<AppState>,
    Form(form): Form<CourseForm>,
) -> Result<Response, AppError> {
    let errors = validate_course_form(&state, &form, None).await?;
    if !errors.is_empty() {
        let page = CourseFormTemplate::new("Новый курс", "/courses/new", form, errors);
        return Ok(page.into_response());
    }

    repository::insert_course(&state.db, form.into_new_course()).await?;
    Ok(Redirect::to("/courses/").into_response())
}

async fn course_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<CourseShowTemplate, AppError> {
    let course = repository::find_course_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let lessons = repository::fetch_lessons_for_course(&state.db, id).await?;
    Ok(CourseShowTemplate { course, lessons })
}

async fn course_edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<CourseFormTemplate, AppError> {
    let course = repository::find_course_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(CourseFormTemplate::new(
        "Редактирование курса",
        format!("/courses/{id}/edit"),
        CourseForm::from_course(&course),
        FormErrors::default(),
    ))
}

async fn course_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<CourseForm>,
) -> Result<Response, AppError> {
    repository::find_course_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let errors = validate_course_form(&state, &form, Some(id)).await?;
    if !errors.is_empty() {
        let page = CourseFormTemplate::new(
            "Редактирование курса",
            format!("/courses/{id}/edit"),
            form,
            errors,
        );
        return Ok(page.into_response());
    }

    repository::update_course(&state.db, id, form.into_new_course())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Redirect::to(&format!("/courses/{id}")).into_response())
}

async fn course_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    if !repository::delete_course(&state.db, id).await? {
        return Err(AppError::NotFound);
    }
    Ok(Redirect::to("/courses/"))
}

/// Derive-level checks plus the code-uniqueness lookup. The uniqueness check
/// only runs when the code itself is otherwise acceptable.
async fn validate_course_form(
    state: &AppState,
    form: &CourseForm,
    exclude_id: Option<i64>,
) -> Result<FormErrors, AppError> {
    let mut errors = match form.validate() {
        Ok(()) => FormErrors::default(),
        Err(e) => FormErrors::from(e),
    };
    let code = form.code.trim();
    if !code.is_empty()
        && errors.field("code").is_empty()
        && repository::course_code_taken(&state.db, code, exclude_id).await?
    {
        errors.add("code", MSG_CODE_TAKEN);
    }
    Ok(errors)
}

#[derive(Deserialize)]
struct LessonNewParams {
    course: i64,
}

async fn lesson_new(
    State(state): State<AppState>,
    Query(params): Query<LessonNewParams>,
) -> Result<LessonFormTemplate, AppError> {
    let course = repository::find_course_by_id(&state.db, params.course)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(LessonFormTemplate::new(
        "Новый урок",
        "/lessons/new",
        LessonForm::for_course(course.id),
        FormErrors::default(),
    ))
}

async fn lesson_create(
    State(state): State<AppState>,
    Form(form): Form<LessonForm>,
) -> Result<Response, AppError> {
    let (errors, course_id) = validate_lesson_form(&state, &form).await?;
    if !errors.is_empty() {
        let page = LessonFormTemplate::new("Новый урок", "/lessons/new", form, errors);
        return Ok(page.into_response());
    }
    let course_id = course_id.ok_or(AppError::NotFound)?;

    repository::insert_lesson(&state.db, form.into_new_lesson(course_id)).await?;
    Ok(Redirect::to(&format!("/courses/{course_id}")).into_response())
}

async fn lesson_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<LessonShowTemplate, AppError> {
    let lesson = repository::find_lesson_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let course = repository::find_course_by_id(&state.db, lesson.course_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(LessonShowTemplate { lesson, course })
}

async fn lesson_edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<LessonFormTemplate, AppError> {
    let lesson = repository::find_lesson_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(LessonFormTemplate::new(
        "Редактирование урока",
        format!("/lessons/{id}/edit"),
        LessonForm::from_lesson(&lesson),
        FormErrors::default(),
    ))
}

async fn lesson_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<LessonForm>,
) -> Result<Response, AppError> {
    repository::find_lesson_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let (errors, course_id) = validate_lesson_form(&state, &form).await?;
    if !errors.is_empty() {
        let page = LessonFormTemplate::new(
            "Редактирование урока",
            format!("/lessons/{id}/edit"),
            form,
            errors,
        );
        return Ok(page.into_response());
    }
    let course_id = course_id.ok_or(AppError::NotFound)?;

    repository::update_lesson(&state.db, id, form.into_new_lesson(course_id))
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Redirect::to(&format!("/courses/{course_id}")).into_response())
}

async fn lesson_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let lesson = repository::find_lesson_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    repository::delete_lesson(&state.db, id).await?;
    Ok(Redirect::to(&format!("/courses/{}", lesson.course_id)))
}

/// Derive-level checks plus resolution of the hidden course field. Returns
/// the resolved course id when the field points at a stored course.
async fn validate_lesson_form(
    state: &AppState,
    form: &LessonForm,
) -> Result<(FormErrors, Option<i64>), AppError> {
    let mut errors = match form.validate() {
        Ok(()) => FormErrors::default(),
        Err(e) => FormErrors::from(e),
    };

    let course_id = match form.course_id() {
        Some(id) => repository::find_course_by_id(&state.db, id)
            .await?
            .map(|course| course.id),
        None => None,
    };
    if course_id.is_none() {
        errors.add("course", MSG_COURSE_NOT_FOUND);
    }
    Ok((errors, course_id))
}
