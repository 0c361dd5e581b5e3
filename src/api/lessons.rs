use serde::Serialize;

use super::client::ApiClient;
use super::error::ApiResult;
use crate::models::Lesson;

/// Write body for `POST /lessons` and `PUT /lessons/{id}`: the lesson
/// fields nested under `lesson`.
#[derive(Debug, Serialize)]
pub struct LessonPayload {
    pub lesson: LessonFields,
}

#[derive(Debug, Serialize)]
pub struct LessonFields {
    pub lesson_name: String,
}

impl LessonPayload {
    pub fn new(lesson_name: impl Into<String>) -> Self {
        Self {
            lesson: LessonFields {
                lesson_name: lesson_name.into(),
            },
        }
    }
}

impl ApiClient {
    pub async fn list_lessons(&self) -> ApiResult<Vec<Lesson>> {
        let response = self.get("lessons").await?;
        Ok(response.json().await?)
    }

    pub async fn get_lesson(&self, id: &str) -> ApiResult<Lesson> {
        let response = self.get(&format!("lessons/{}", id)).await?;
        Ok(response.json().await?)
    }

    pub async fn create_lesson(&self, lesson_name: &str) -> ApiResult<()> {
        self.post("lessons", &LessonPayload::new(lesson_name)).await?;
        Ok(())
    }

    pub async fn update_lesson(&self, lesson: &Lesson) -> ApiResult<()> {
        let payload = LessonPayload::new(lesson.lesson_name.clone());
        self.put(&format!("lessons/{}", lesson.lesson_id), &payload)
            .await?;
        Ok(())
    }

    pub async fn delete_lesson(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("lessons/{}", id)).await?;
        Ok(())
    }
}
