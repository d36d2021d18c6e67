use std::sync::Arc;

use crate::error::Result;
use crate::models::Teacher;
use crate::store::TeacherRepository;

#[derive(Clone)]
pub struct TeacherService {
    teachers: Arc<dyn TeacherRepository>,
}

impl TeacherService {
    pub fn new(teachers: Arc<dyn TeacherRepository>) -> Self {
        Self { teachers }
    }

    pub async fn find_all(&self) -> Result<Vec<Teacher>> {
        self.teachers.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.teachers.find_by_id(id).await
    }

    pub async fn create(&self, teacher: Teacher) -> Result<Teacher> {
        let saved = self.teachers.save(teacher).await?;
        tracing::info!(
            "Created teacher {} {} ({:?})",
            saved.first_name,
            saved.last_name,
            saved.id
        );
        Ok(saved)
    }
}
