//! Database seeding: wipes the course catalogue and repopulates it with
//! fixture data. Reached by the `--seed` flag and the `seed` invocation
//! action, both of which bypass HTTP routing entirely.

use crate::models::course::{Course, CourseLevel, CourseStatus};
use crate::services::course_service::{CourseResult, CourseService};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

/// Fixture catalogue: (title, category, level, price in cents).
const FIXTURE_COURSES: [(&str, &str, CourseLevel, Option<i64>); 6] = [
    (
        "Full-Stack Web Development",
        "Web Development",
        CourseLevel::Intermediate,
        Some(7999),
    ),
    (
        "Intro to Data Science",
        "Data Science",
        CourseLevel::Beginner,
        Some(5999),
    ),
    (
        "UI Design Fundamentals",
        "Design",
        CourseLevel::Beginner,
        Some(4999),
    ),
    (
        "Growth Marketing Essentials",
        "Marketing",
        CourseLevel::Intermediate,
        Some(3999),
    ),
    (
        "Advanced Machine Learning",
        "Data Science",
        CourseLevel::Advanced,
        Some(9999),
    ),
    ("Getting Started Guide", "Web Development", CourseLevel::Beginner, None),
];

/// Replace the courses table contents with the fixture catalogue.
pub async fn seed(service: &CourseService) -> CourseResult<()> {
    sqlx::query("DELETE FROM courses")
        .execute(&*service.db)
        .await?;

    let now = Utc::now();
    for (title, category, level, price_cents) in FIXTURE_COURSES {
        let course = Course {
            course_id: Uuid::new_v4().to_string(),
            teacher_id: "user_seed_teacher".into(),
            teacher_name: "Demo Teacher".into(),
            title: title.into(),
            description: Some(format!("{title} — seeded demo course.")),
            category: category.into(),
            image: None,
            price_cents,
            level,
            status: CourseStatus::Published,
            enrollments: 0,
            created_at: now,
            updated_at: now,
        };
        service.insert_course(&course).await?;
    }

    info!(count = FIXTURE_COURSES.len(), "seeded course catalogue");
    Ok(())
}
