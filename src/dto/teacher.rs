use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Teacher;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDto {
    pub id: Option<i64>,
    pub last_name: String,
    pub first_name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Teacher> for TeacherDto {
    fn from(teacher: &Teacher) -> Self {
        Self {
            id: teacher.id,
            last_name: teacher.last_name.clone(),
            first_name: teacher.first_name.clone(),
            created_at: teacher.created_at,
            updated_at: teacher.updated_at,
        }
    }
}

impl From<TeacherDto> for Teacher {
    fn from(dto: TeacherDto) -> Self {
        Self {
            id: dto.id,
            last_name: dto.last_name,
            first_name: dto.first_name,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}
