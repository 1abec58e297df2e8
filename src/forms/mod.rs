pub mod course;
pub mod lesson;

pub use course::CourseForm;
pub use lesson::LessonForm;

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

/// Field-scoped validation messages collected for one form submission.
///
/// Derive-level checks land here via `From<ValidationErrors>`; checks that
/// need the database (code uniqueness, course lookup) are appended by the
/// handlers before the form is re-rendered.
#[derive(Debug, Default)]
pub struct FormErrors {
    entries: Vec<(String, String)>,
}

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.entries.push((field.to_string(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages attached to one field, in the order they were recorded.
    pub fn field(&self, field: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FormErrors::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                if let Some(message) = &error.message {
                    out.add(field.as_ref(), message.to_string());
                }
            }
        }
        out
    }
}

pub(crate) fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}
