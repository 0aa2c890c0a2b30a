use sqlx::Postgres;
use sqlx::query_builder::Separated;
use sqlx::types::Json;

use coursehub_models::{
    Assignment, AssignmentInput, Exam, ExamInput, Lecture, LectureInput, Prerequisite,
    PrerequisiteInput, Resource, ResourceInput, TeachingAssistant, TeachingAssistantInput,
    Tutorial, TutorialInput,
};

use super::repository::ScopedContent;

impl ScopedContent for Lecture {
    type Input = LectureInput;

    const TABLE: &'static str = "lectures";
    const COLLECTION: &'static str = "lectures";
    const LABEL: &'static str = "Lecture";
    const VISIBILITY_COLUMN: &'static str = "is_published";
    const ORDER_BY: &'static str = "lecture_number ASC";
    const WRITABLE_COLUMNS: &'static [&'static str] = &[
        "lecture_number",
        "title",
        "description",
        "lecture_date",
        "videos",
        "slides",
        "reading_materials",
        "is_published",
    ];

    fn bind_values<'qb, 'args: 'qb>(
        input: LectureInput,
        values: &mut Separated<'qb, 'args, Postgres, &'static str>,
    ) {
        values
            .push_bind(input.lecture_number)
            .push_bind(input.title)
            .push_bind(input.description)
            .push_bind(input.lecture_date)
            .push_bind(Json(input.videos))
            .push_bind(Json(input.slides))
            .push_bind(Json(input.reading_materials))
            .push_bind(input.is_published);
    }
}

impl ScopedContent for Assignment {
    type Input = AssignmentInput;

    const TABLE: &'static str = "assignments";
    const COLLECTION: &'static str = "assignments";
    const LABEL: &'static str = "Assignment";
    const VISIBILITY_COLUMN: &'static str = "is_published";
    const ORDER_BY: &'static str = "assignment_number ASC";
    const WRITABLE_COLUMNS: &'static [&'static str] = &[
        "assignment_number",
        "title",
        "description",
        "due_date",
        "total_points",
        "attachments",
        "related_lecture_ids",
        "is_published",
    ];

    fn bind_values<'qb, 'args: 'qb>(
        input: AssignmentInput,
        values: &mut Separated<'qb, 'args, Postgres, &'static str>,
    ) {
        values
            .push_bind(input.assignment_number)
            .push_bind(input.title)
            .push_bind(input.description)
            .push_bind(input.due_date)
            .push_bind(input.total_points)
            .push_bind(Json(input.attachments))
            .push_bind(input.related_lecture_ids)
            .push_bind(input.is_published);
    }
}

impl ScopedContent for Tutorial {
    type Input = TutorialInput;

    const TABLE: &'static str = "tutorials";
    const COLLECTION: &'static str = "tutorials";
    const LABEL: &'static str = "Tutorial";
    const VISIBILITY_COLUMN: &'static str = "is_published";
    const ORDER_BY: &'static str = "tutorial_number ASC";
    const WRITABLE_COLUMNS: &'static [&'static str] = &[
        "tutorial_number",
        "title",
        "description",
        "tutorial_date",
        "materials",
        "related_lecture_ids",
        "is_published",
    ];

    fn bind_values<'qb, 'args: 'qb>(
        input: TutorialInput,
        values: &mut Separated<'qb, 'args, Postgres, &'static str>,
    ) {
        values
            .push_bind(input.tutorial_number)
            .push_bind(input.title)
            .push_bind(input.description)
            .push_bind(input.tutorial_date)
            .push_bind(Json(input.materials))
            .push_bind(input.related_lecture_ids)
            .push_bind(input.is_published);
    }
}

impl ScopedContent for Exam {
    type Input = ExamInput;

    const TABLE: &'static str = "exams";
    const COLLECTION: &'static str = "exams";
    const LABEL: &'static str = "Exam";
    const VISIBILITY_COLUMN: &'static str = "is_published";
    const ORDER_BY: &'static str = "exam_date ASC";
    const WRITABLE_COLUMNS: &'static [&'static str] = &[
        "title",
        "exam_type",
        "exam_date",
        "duration_minutes",
        "location",
        "topics",
        "related_lecture_ids",
        "is_published",
    ];

    fn bind_values<'qb, 'args: 'qb>(
        input: ExamInput,
        values: &mut Separated<'qb, 'args, Postgres, &'static str>,
    ) {
        values
            .push_bind(input.title)
            .push_bind(input.exam_type)
            .push_bind(input.exam_date)
            .push_bind(input.duration_minutes)
            .push_bind(input.location)
            .push_bind(input.topics)
            .push_bind(input.related_lecture_ids)
            .push_bind(input.is_published);
    }
}

impl ScopedContent for Prerequisite {
    type Input = PrerequisiteInput;

    const TABLE: &'static str = "prerequisites";
    const COLLECTION: &'static str = "prerequisites";
    const LABEL: &'static str = "Prerequisite";
    const VISIBILITY_COLUMN: &'static str = "is_published";
    const ORDER_BY: &'static str = "display_order ASC, created_at ASC";
    const WRITABLE_COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "display_order",
        "materials",
        "is_published",
    ];

    fn bind_values<'qb, 'args: 'qb>(
        input: PrerequisiteInput,
        values: &mut Separated<'qb, 'args, Postgres, &'static str>,
    ) {
        values
            .push_bind(input.title)
            .push_bind(input.description)
            .push_bind(input.display_order)
            .push_bind(Json(input.materials))
            .push_bind(input.is_published);
    }
}

// Resources are the one type toggled through `is_active`.
impl ScopedContent for Resource {
    type Input = ResourceInput;

    const TABLE: &'static str = "resources";
    const COLLECTION: &'static str = "resources";
    const LABEL: &'static str = "Resource";
    const VISIBILITY_COLUMN: &'static str = "is_active";
    const ORDER_BY: &'static str = "category ASC, display_order ASC, created_at ASC";
    const WRITABLE_COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "category",
        "url",
        "display_order",
        "is_active",
    ];

    fn bind_values<'qb, 'args: 'qb>(
        input: ResourceInput,
        values: &mut Separated<'qb, 'args, Postgres, &'static str>,
    ) {
        values
            .push_bind(input.title)
            .push_bind(input.description)
            .push_bind(input.category)
            .push_bind(input.url)
            .push_bind(input.display_order)
            .push_bind(input.is_active);
    }
}

impl ScopedContent for TeachingAssistant {
    type Input = TeachingAssistantInput;

    const TABLE: &'static str = "teaching_assistants";
    const COLLECTION: &'static str = "teaching-assistants";
    const LABEL: &'static str = "Teaching assistant";
    const VISIBILITY_COLUMN: &'static str = "is_published";
    const ORDER_BY: &'static str = "display_order ASC, name ASC";
    const WRITABLE_COLUMNS: &'static [&'static str] = &[
        "name",
        "email",
        "office_hours",
        "office_location",
        "bio",
        "display_order",
        "is_published",
    ];

    fn bind_values<'qb, 'args: 'qb>(
        input: TeachingAssistantInput,
        values: &mut Separated<'qb, 'args, Postgres, &'static str>,
    ) {
        values
            .push_bind(input.name)
            .push_bind(input.email.to_lowercase())
            .push_bind(input.office_hours)
            .push_bind(input.office_location)
            .push_bind(input.bio)
            .push_bind(input.display_order)
            .push_bind(input.is_published);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::QueryBuilder;

    /// Binds `input` into an empty builder and counts the placeholders.
    fn bound_placeholders<T: ScopedContent>(input: &str) -> usize {
        let input: T::Input = serde_json::from_str(input).unwrap();
        let mut qb = QueryBuilder::<Postgres>::new("");
        {
            let mut values = qb.separated(", ");
            T::bind_values(input, &mut values);
        }
        qb.sql().matches('$').count()
    }

    fn assert_columns_match<T: ScopedContent>(input: &str) {
        assert_eq!(
            bound_placeholders::<T>(input),
            T::WRITABLE_COLUMNS.len(),
            "{} binds a different number of values than it declares columns",
            T::LABEL
        );
        assert!(T::WRITABLE_COLUMNS.contains(&T::VISIBILITY_COLUMN));
    }

    #[test]
    fn test_bound_values_match_declared_columns() {
        assert_columns_match::<Lecture>(r#"{"lecture_number":1,"title":"Intro"}"#);
        assert_columns_match::<Assignment>(
            r#"{"assignment_number":1,"title":"HW1","due_date":"2026-02-01T23:59:00Z"}"#,
        );
        assert_columns_match::<Tutorial>(r#"{"tutorial_number":1,"title":"Lab 1"}"#);
        assert_columns_match::<Exam>(
            r#"{"title":"Final","exam_type":"final","exam_date":"2026-05-01T09:00:00Z"}"#,
        );
        assert_columns_match::<Prerequisite>(r#"{"title":"Discrete math"}"#);
        assert_columns_match::<Resource>(r#"{"title":"Book","url":"https://example.com/book"}"#);
        assert_columns_match::<TeachingAssistant>(r#"{"name":"Sam","email":"sam@uni.edu"}"#);
    }

    #[test]
    fn test_collections_are_distinct() {
        let mut collections = vec![
            Lecture::COLLECTION,
            Assignment::COLLECTION,
            Tutorial::COLLECTION,
            Exam::COLLECTION,
            Prerequisite::COLLECTION,
            Resource::COLLECTION,
            TeachingAssistant::COLLECTION,
        ];
        collections.sort();
        collections.dedup();
        assert_eq!(collections.len(), 7);
    }
}
