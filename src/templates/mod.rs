//! Askama templates
//!
//! Template structs for the rendered catalog pages. Escaping is handled by
//! askama's HTML escaper; the selectors the admin flows rely on (`card`,
//! `card-link`, the form button names, `form-error-message` spans) live in
//! the template files under `templates/`.

use askama::Template;
use askama_web::WebTemplate;

use crate::forms::{CourseForm, FormErrors, LessonForm};
use crate::models::{Course, Lesson};

/// Course index page: one card per course.
#[derive(Template, WebTemplate)]
#[template(path = "course/index.html")]
pub struct CourseIndexTemplate {
    pub courses: Vec<Course>,
}

/// Course detail page with its lessons in catalog order.
#[derive(Template, WebTemplate)]
#[template(path = "course/show.html")]
pub struct CourseShowTemplate {
    pub course: Course,
    pub lessons: Vec<Lesson>,
}

/// Shared by the "new course" and "edit course" pages; on a failed submit it
/// re-renders with the submitted values and the field errors inline.
#[derive(Template, WebTemplate)]
#[template(path = "course/form.html")]
pub struct CourseFormTemplate {
    pub title: &'static str,
    pub action: String,
    pub form: CourseForm,
    pub errors: FormErrors,
}

impl CourseFormTemplate {
    pub fn new(
        title: &'static str,
        action: impl Into<String>,
        form: CourseForm,
        errors: FormErrors,
    ) -> Self {
        Self {
            title,
            action: action.into(),
            form,
            errors,
        }
    }
}

/// Lesson detail page.
#[derive(Template, WebTemplate)]
#[template(path = "lesson/show.html")]
pub struct LessonShowTemplate {
    pub lesson: Lesson,
    pub course: Course,
}

/// Shared by the "new lesson" and "edit lesson" pages.
#[derive(Template, WebTemplate)]
#[template(path = "lesson/form.html")]
pub struct LessonFormTemplate {
    pub title: &'static str,
    pub action: String,
    pub form: LessonForm,
    pub errors: FormErrors,
}

impl LessonFormTemplate {
    pub fn new(
        title: &'static str,
        action: impl Into<String>,
        form: LessonForm,
        errors: FormErrors,
    ) -> Self {
        Self {
            title,
            action: action.into(),
            form,
            errors,
        }
    }
}

/// Error page rendered by `AppError::into_response`.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: String,
    pub message: String,
}
