pub mod course;
pub mod lesson;

pub use course::{Course, NewCourse};
pub use lesson::{Lesson, NewLesson};
