//! Demo dataset: five courses with five lessons each, used by the test
//! suite and by the binary when `SEED_DEMO_DATA=1`.

use sqlx::SqlitePool;

use crate::db::repository;
use crate::models::{NewCourse, NewLesson};

const COURSES: [(&str, &str); 5] = [
    ("tech-dev-web", "Технологии разработки WEB-приложений"),
    ("php-language", "Язык программирования PHP"),
    ("database-course", "Базы данных"),
    ("vuejs-course", "Vue.js"),
    ("symfony-course", "Symfony"),
];

pub async fn load(db: &SqlitePool) -> Result<(), sqlx::Error> {
    for (code, name) in COURSES {
        let course = repository::insert_course(
            db,
            NewCourse {
                code: code.to_string(),
                name: name.to_string(),
                description: Some(format!("Перед Вами новейший курс \"{name}\"")),
            },
        )
        .await?;

        for i in 1..6 {
            repository::insert_lesson(
                db,
                NewLesson {
                    course_id: course.id,
                    name: format!("Урок №{i} по курсу {name}"),
                    content: format!("Это содержмиое урока №{i} по курсу \"{name}\""),
                    number: i,
                },
            )
            .await?;
        }
    }
    Ok(())
}
