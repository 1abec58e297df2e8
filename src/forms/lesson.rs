use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::forms::field_error;
use crate::models::{Lesson, NewLesson};

/// Shown when the hidden course field does not resolve to a stored course.
/// The lookup needs the database, so it runs in the handler.
pub const MSG_COURSE_NOT_FOUND: &str = "Курс не найден";

/// Lesson form submission. `number` and `course` arrive as raw strings so a
/// non-numeric value becomes a field error on the re-rendered form rather
/// than an extraction failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LessonForm {
    #[serde(rename = "lesson[name]", default)]
    #[validate(custom(function = validate_name))]
    pub name: String,

    #[serde(rename = "lesson[content]", default)]
    #[validate(custom(function = validate_content))]
    pub content: String,

    #[serde(rename = "lesson[number]", default)]
    #[validate(custom(function = validate_number))]
    pub number: String,

    #[serde(rename = "lesson[course]", default)]
    pub course: String,
}

impl LessonForm {
    /// Empty form bound to a course, for the "new lesson" page.
    pub fn for_course(course_id: i64) -> Self {
        LessonForm {
            course: course_id.to_string(),
            ..LessonForm::default()
        }
    }

    /// Pre-fill the edit form from a stored lesson.
    pub fn from_lesson(lesson: &Lesson) -> Self {
        LessonForm {
            name: lesson.name.clone(),
            content: lesson.content.clone(),
            number: lesson.number.to_string(),
            course: lesson.course_id.to_string(),
        }
    }

    /// The course id carried by the hidden field, if it parses.
    pub fn course_id(&self) -> Option<i64> {
        self.course.trim().parse().ok()
    }

    /// Build the persistable lesson. Only meaningful after `validate` and
    /// the course lookup both passed.
    pub fn into_new_lesson(self, course_id: i64) -> NewLesson {
        let number = self.number.trim().parse().unwrap_or_default();
        NewLesson {
            course_id,
            name: self.name.trim().to_string(),
            content: self.content.trim().to_string(),
            number,
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(field_error("name_blank", "Название не может быть пустым"));
    }
    if name.chars().count() > 255 {
        // Historic catalog message, typo included.
        return Err(field_error(
            "name_too_long",
            "Длина названия не должна первышать 255 символов",
        ));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(field_error(
            "content_blank",
            "Содержимое курса не может быть пустым",
        ));
    }
    Ok(())
}

fn validate_number(raw: &str) -> Result<(), ValidationError> {
    let number: i64 = raw
        .trim()
        .parse()
        .map_err(|_| field_error("number_invalid", "This value is not valid."))?;
    if number < 1 {
        return Err(field_error(
            "number_too_small",
            "Номер урока не может быть меньше 1",
        ));
    }
    if number > 10000 {
        return Err(field_error(
            "number_too_big",
            "Номер урока не может быть больше 10000",
        ));
    }
    Ok(())
}
