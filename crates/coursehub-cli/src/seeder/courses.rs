//! Demo course generation.

use std::time::Instant;

use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Sentence, Words};
use fake::faker::name::en::Name;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use coursehub_core::hash_password;
use coursehub_models::Link;

use super::models::{DEMO_STUDENT_PASSWORD, DemoSummary, SeedConfig};

/// `count` links with fake titles under `https://cdn.example.edu/<kind>/`.
pub fn generate_links(kind: &str, count: usize) -> Vec<Link> {
    (1..=count)
        .map(|n| {
            let words: Vec<String> = Words(2..4).fake();
            Link {
                title: words.join(" "),
                url: format!("https://cdn.example.edu/{kind}/{}-{n}", Uuid::new_v4()),
            }
        })
        .collect()
}

/// Course code unique per run, e.g. `DEMO-3F9A1C0B`.
pub fn demo_course_code() -> String {
    format!("DEMO-{}", &Uuid::new_v4().simple().to_string()[..8]).to_uppercase()
}

async fn insert_course(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<(Uuid, String)> {
    let code = demo_course_code();
    let title: String = Sentence(2..5).fake();
    let description: String = Paragraph(2..4).fake();
    let instructor: String = Name().fake();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO courses (code, title, description, semester, instructor)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(&code)
    .bind(title.trim_end_matches('.'))
    .bind(description)
    .bind("Demo term")
    .bind(instructor)
    .fetch_one(&mut **tx)
    .await?;

    Ok((id, code))
}

/// Inserts lectures numbered from 1; every other one is published.
async fn insert_lectures(
    tx: &mut Transaction<'_, Postgres>,
    course_id: Uuid,
    count: usize,
) -> anyhow::Result<Vec<Uuid>> {
    let start = Utc::now().date_naive();
    let mut ids = Vec::with_capacity(count);

    for index in 0..count {
        let title: String = Sentence(3..6).fake();
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO lectures
                (course_id, lecture_number, title, description, lecture_date,
                 videos, slides, reading_materials, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING id",
        )
        .bind(course_id)
        .bind(index as i32 + 1)
        .bind(title.trim_end_matches('.'))
        .bind(Paragraph(1..3).fake::<String>())
        .bind(start + Duration::days(7 * index as i64))
        .bind(Json(generate_links("videos", 1)))
        .bind(Json(generate_links("slides", 1)))
        .bind(Json(generate_links("readings", 2)))
        .bind(index % 2 == 0)
        .fetch_one(&mut **tx)
        .await?;
        ids.push(id);
    }

    Ok(ids)
}

async fn insert_assignments(
    tx: &mut Transaction<'_, Postgres>,
    course_id: Uuid,
    count: usize,
    lecture_ids: &[Uuid],
) -> anyhow::Result<()> {
    for index in 0..count {
        let related: Vec<Uuid> = lecture_ids.iter().skip(index * 2).take(2).copied().collect();
        sqlx::query(
            "INSERT INTO assignments
                (course_id, assignment_number, title, description, due_date,
                 total_points, attachments, related_lecture_ids, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(course_id)
        .bind(index as i32 + 1)
        .bind(format!("Problem set {}", index + 1))
        .bind(Paragraph(1..2).fake::<String>())
        .bind(Utc::now() + Duration::days(14 * (index as i64 + 1)))
        .bind(100)
        .bind(Json(generate_links("assignments", 1)))
        .bind(related)
        .bind(true)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

async fn insert_extras(tx: &mut Transaction<'_, Postgres>, course_id: Uuid) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO exams (course_id, title, exam_type, exam_date, duration_minutes, location, topics, is_published)
         VALUES ($1, 'Final exam', 'final', $2, 180, 'Main hall', $3, TRUE)",
    )
    .bind(course_id)
    .bind(Utc::now() + Duration::days(90))
    .bind(Words(3..6).fake::<Vec<String>>())
    .execute(&mut **tx)
    .await?;

    sqlx::query(
        "INSERT INTO resources (course_id, title, category, url, display_order)
         VALUES ($1, 'Course handbook', 'general', 'https://cdn.example.edu/handbook.pdf', 0)",
    )
    .bind(course_id)
    .execute(&mut **tx)
    .await?;

    sqlx::query(
        "INSERT INTO teaching_assistants (course_id, name, email, office_hours, is_published)
         VALUES ($1, $2, $3, 'Tuesdays 14:00-16:00', TRUE)",
    )
    .bind(course_id)
    .bind(Name().fake::<String>())
    .bind(SafeEmail().fake::<String>().to_lowercase())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_students(db: &PgPool, count: usize) -> anyhow::Result<usize> {
    let password_hash = hash_password(DEMO_STUDENT_PASSWORD).map_err(|e| e.error)?;
    let mut inserted = 0;

    for _ in 0..count {
        let email = format!("student-{}@example.edu", Uuid::new_v4().simple());
        let result = sqlx::query(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(Name().fake::<String>())
        .bind(email)
        .bind(&password_hash)
        .execute(db)
        .await?;
        inserted += result.rows_affected() as usize;
    }

    Ok(inserted)
}

/// Creates one demo course with content, plus student accounts.
pub async fn seed_demo(db: &PgPool, config: &SeedConfig) -> anyhow::Result<DemoSummary> {
    let start_time = Instant::now();

    let mut tx = db.begin().await?;
    let (course_id, course_code) = insert_course(&mut tx).await?;
    let lecture_ids = insert_lectures(&mut tx, course_id, config.lectures).await?;
    insert_assignments(&mut tx, course_id, config.assignments, &lecture_ids).await?;
    insert_extras(&mut tx, course_id).await?;
    tx.commit().await?;

    let students = insert_students(db, config.students).await?;

    println!("   ✓ Seeded {course_code} in {:?}", start_time.elapsed());

    Ok(DemoSummary {
        course_id,
        course_code,
        lectures: lecture_ids.len(),
        published_lectures: lecture_ids.len().div_ceil(2),
        assignments: config.assignments,
        students,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_links_produces_distinct_urls() {
        let links = generate_links("slides", 3);
        assert_eq!(links.len(), 3);
        assert!(links.iter().all(|l| l.url.starts_with("https://cdn.example.edu/slides/")));
        assert_ne!(links[0].url, links[1].url);
    }

    #[test]
    fn test_demo_course_codes_are_distinct() {
        let first = demo_course_code();
        assert!(first.starts_with("DEMO-"));
        assert!(first.len() <= 20);
        assert_ne!(first, demo_course_code());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_seed_demo_can_run_twice(pool: PgPool) {
        let config = SeedConfig {
            lectures: 2,
            assignments: 1,
            students: 1,
        };

        let first = seed_demo(&pool, &config).await.unwrap();
        let second = seed_demo(&pool, &config).await.unwrap();
        assert_ne!(first.course_code, second.course_code);

        let courses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(courses, 2);
    }
}
