use chrono::NaiveDate;
use serde::Serialize;

use super::client::ApiClient;
use super::error::{ApiError, ApiResult};
use crate::models::Student;

/// Write body for `POST /students` and `PUT /students/{id}`.
///
/// The server wants the student fields nested under `student` with the
/// assigned lesson ids alongside it in camelCase; this shape is a
/// collaborator contract and must not change.
#[derive(Debug, Serialize)]
pub struct StudentPayload {
    pub student: StudentFields,
    #[serde(rename = "lessonIds")]
    pub lesson_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub grade: String,
    pub registration_date: NaiveDate,
}

impl StudentPayload {
    pub fn from_student(student: &Student) -> Self {
        Self {
            student: StudentFields {
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
                age: student.age,
                grade: student.grade.clone(),
                registration_date: student.registration_date,
            },
            lesson_ids: student.lesson_ids(),
        }
    }
}

impl ApiClient {
    pub async fn list_students(&self) -> ApiResult<Vec<Student>> {
        let response = self.get("students").await?;
        Ok(response.json().await?)
    }

    pub async fn get_student(&self, id: &str) -> ApiResult<Student> {
        let response = self.get(&format!("students/{}", id)).await?;
        Ok(response.json().await?)
    }

    pub async fn create_student(&self, student: &Student) -> ApiResult<()> {
        let payload = StudentPayload::from_student(student);
        self.post("students", &payload).await?;
        Ok(())
    }

    pub async fn update_student(&self, student: &Student) -> ApiResult<()> {
        let id = student
            .student_id
            .as_deref()
            .ok_or(ApiError::MissingStudentId)?;

        let payload = StudentPayload::from_student(student);
        self.put(&format!("students/{}", id), &payload).await?;
        Ok(())
    }

    pub async fn delete_student(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("students/{}", id)).await?;
        Ok(())
    }
}
