use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate::{field, required, Validate};
use crate::error::{Error, Result};
use crate::models::Session;

/// Session as exchanged with clients. `teacher_id` keeps its snake_case name
/// on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "teacher_id")]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub users: Vec<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Validate for SessionDto {
    fn validate(&self) -> Result<()> {
        field("name", &self.name).not_blank()?.max(50)?;
        required("date", &self.date)?;
        required("teacher_id", &self.teacher_id)?;
        field("description", &self.description).not_blank()?.max(2500)?;
        Ok(())
    }
}

impl From<&Session> for SessionDto {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            date: Some(session.date),
            teacher_id: session.teacher_id,
            description: session.description.clone(),
            users: session.users.clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

impl SessionDto {
    /// Build the entity. `teacher_id` is the resolved teacher, `None` when the
    /// requested teacher does not exist.
    pub fn into_entity(self, teacher_id: Option<i64>) -> Result<Session> {
        let date = self
            .date
            .ok_or_else(|| Error::BadRequest("date: must not be null".to_string()))?;

        Ok(Session {
            id: self.id,
            name: self.name,
            date,
            description: self.description,
            teacher_id,
            users: self.users,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> SessionDto {
        SessionDto {
            name: "New Session".to_string(),
            date: Some(Utc::now()),
            teacher_id: Some(1),
            description: "Session Description".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_entity_without_teacher_or_users() {
        let session = Session::new("Flow", Utc::now(), "desc", None);
        let dto = SessionDto::from(&session);

        assert!(dto.teacher_id.is_none());
        assert!(dto.users.is_empty());
    }

    #[test]
    fn test_entity_to_dto() {
        let mut session = Session::new("test session", Utc::now(), "a test session", Some(1));
        session.id = Some(1);
        session.users = vec![1, 2];
        session.created_at = Some(Utc::now());
        session.updated_at = Some(Utc::now());

        let dto = SessionDto::from(&session);
        assert_eq!(dto.id, Some(1));
        assert_eq!(dto.name, session.name);
        assert_eq!(dto.description, session.description);
        assert_eq!(dto.teacher_id, Some(1));
        assert_eq!(dto.users, vec![1, 2]);
        assert_eq!(dto.created_at, session.created_at);
        assert_eq!(dto.updated_at, session.updated_at);
    }

    #[test]
    fn test_dto_to_entity_uses_resolved_teacher() {
        let dto = SessionDto {
            id: Some(1),
            users: vec![1, 2],
            ..valid_dto()
        };
        let session = dto.clone().into_entity(None).unwrap();

        assert_eq!(session.id, Some(1));
        assert!(session.teacher_id.is_none());
        assert_eq!(session.users, vec![1, 2]);
        assert_eq!(Some(session.date), dto.date);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(valid_dto()).unwrap();
        assert_eq!(json["teacher_id"], 1);
        assert!(json.get("teacherId").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_validation() {
        assert!(valid_dto().validate().is_ok());

        let missing_name = SessionDto {
            name: String::new(),
            ..valid_dto()
        };
        assert!(missing_name.validate().is_err());

        let missing_description = SessionDto {
            description: " ".to_string(),
            ..valid_dto()
        };
        assert!(missing_description.validate().is_err());

        let missing_teacher = SessionDto {
            teacher_id: None,
            ..valid_dto()
        };
        assert!(missing_teacher.validate().is_err());

        let long_name = SessionDto {
            name: "x".repeat(51),
            ..valid_dto()
        };
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn test_missing_fields_deserialize_then_fail_validation() {
        let dto: SessionDto = serde_json::from_str(r#"{"teacher_id": 1}"#).unwrap();
        assert!(dto.validate().is_err());
    }
}
