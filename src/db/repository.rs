use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Course, Lesson, NewCourse, NewLesson};

/// Courses in insertion order, so a freshly created course lands at the end
/// of the index page.
pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, code, name, description, created_at, updated_at FROM courses ORDER BY id",
    )
    .fetch_all(db)
    .await
}

pub async fn find_course_by_id(db: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, code, name, description, created_at, updated_at FROM courses WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Whether `code` is already used by a course other than `exclude_id`.
/// Backs the duplicate-code form error; the UNIQUE column constraint stays
/// as the last line of defense.
pub async fn course_code_taken(
    db: &SqlitePool,
    code: &str,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM courses WHERE code = ?")
        .bind(code)
        .fetch_optional(db)
        .await?;
    Ok(match existing {
        Some((id,)) => exclude_id != Some(id),
        None => false,
    })
}

pub async fn insert_course(db: &SqlitePool, new: NewCourse) -> Result<Course, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        "INSERT INTO courses (code, name, description, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&new.code)
    .bind(&new.name)
    .bind(&new.description)
    .bind(&now)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(Course {
        id: result.last_insert_rowid(),
        code: new.code,
        name: new.name,
        description: new.description,
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn update_course(
    db: &SqlitePool,
    id: i64,
    new: NewCourse,
) -> Result<Option<Course>, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        "UPDATE courses SET code = ?, name = ?, description = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&new.code)
    .bind(&new.name)
    .bind(&new.description)
    .bind(&now)
    .bind(id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    find_course_by_id(db, id).await
}

/// Removes the course together with its lessons in one transaction.
pub async fn delete_course(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM lessons WHERE course_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM courses WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}

/// A course's lessons in catalog order.
pub async fn fetch_lessons_for_course(
    db: &SqlitePool,
    course_id: i64,
) -> Result<Vec<Lesson>, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(
        "SELECT id, course_id, name, content, number, created_at, updated_at \
         FROM lessons WHERE course_id = ? ORDER BY number, id",
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}

pub async fn find_lesson_by_id(db: &SqlitePool, id: i64) -> Result<Option<Lesson>, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(
        "SELECT id, course_id, name, content, number, created_at, updated_at \
         FROM lessons WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_lesson(db: &SqlitePool, new: NewLesson) -> Result<Lesson, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        "INSERT INTO lessons (course_id, name, content, number, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(new.course_id)
    .bind(&new.name)
    .bind(&new.content)
    .bind(new.number)
    .bind(&now)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(Lesson {
        id: result.last_insert_rowid(),
        course_id: new.course_id,
        name: new.name,
        content: new.content,
        number: new.number,
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn update_lesson(
    db: &SqlitePool,
    id: i64,
    new: NewLesson,
) -> Result<Option<Lesson>, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        "UPDATE lessons SET course_id = ?, name = ?, content = ?, number = ?, updated_at = ? \
         WHERE id = ?",
    )
    .bind(new.course_id)
    .bind(&new.name)
    .bind(&new.content)
    .bind(new.number)
    .bind(&now)
    .bind(id)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    find_lesson_by_id(db, id).await
}

pub async fn delete_lesson(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM lessons WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
