use uuid::Uuid;

/// How much demo content to generate.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub lectures: usize,
    pub assignments: usize,
    pub students: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            lectures: 8,
            assignments: 4,
            students: 10,
        }
    }
}

/// What `seed_demo` inserted.
#[derive(Debug, Clone)]
pub struct DemoSummary {
    pub course_id: Uuid,
    pub course_code: String,
    pub lectures: usize,
    pub published_lectures: usize,
    pub assignments: usize,
    pub students: usize,
}

/// Password given to every seeded student.
pub const DEMO_STUDENT_PASSWORD: &str = "password123";
