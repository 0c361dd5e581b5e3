use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A student as exchanged with the remote API.
///
/// `student_id` is absent until the server has assigned one; `lessons`
/// is populated on reads and ignored on writes (writes carry lesson ids
/// separately, see the payload types in the api module).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub grade: String,
    pub registration_date: NaiveDate,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Ids of the lessons currently assigned to this student.
    pub fn lesson_ids(&self) -> Vec<String> {
        self.lessons
            .iter()
            .map(|lesson| lesson.lesson_id.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub lesson_id: String,
    pub lesson_name: String,
}
