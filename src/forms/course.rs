use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::forms::field_error;
use crate::models::{Course, NewCourse};

/// Shown when the submitted code collides with another course. The check
/// needs the database, so it runs in the handler, not in the derive.
pub const MSG_CODE_TAKEN: &str = "Данный код уже используется";

/// Course form submission. Field names follow the `course[field]` convention
/// of the rendered markup; every field defaults so an empty POST re-renders
/// the form with "blank" errors instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CourseForm {
    #[serde(rename = "course[code]", default)]
    #[validate(custom(function = validate_code))]
    pub code: String,

    #[serde(rename = "course[name]", default)]
    #[validate(custom(function = validate_name))]
    pub name: String,

    #[serde(rename = "course[description]", default)]
    #[validate(custom(function = validate_description))]
    pub description: String,
}

impl CourseForm {
    /// Pre-fill the edit form from a stored course.
    pub fn from_course(course: &Course) -> Self {
        CourseForm {
            code: course.code.clone(),
            name: course.name.clone(),
            description: course.description.clone().unwrap_or_default(),
        }
    }

    pub fn into_new_course(self) -> NewCourse {
        let description = self.description.trim();
        NewCourse {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
        }
    }
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(field_error("code_blank", "Код не может быть пустым"));
    }
    if code.chars().count() > 255 {
        return Err(field_error(
            "code_too_long",
            "Длина кода не должна превышать 255 символов",
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(field_error("name_blank", "Название не может быть пустым"));
    }
    if name.chars().count() > 255 {
        return Err(field_error(
            "name_too_long",
            "Длина названия не должна превышать 255 символов",
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > 1000 {
        return Err(field_error(
            "description_too_long",
            "Длина описания не должна превышать 1000 символов",
        ));
    }
    Ok(())
}
