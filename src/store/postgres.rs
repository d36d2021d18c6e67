//! PostgreSQL repository backend

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_postgres::error::SqlState;
use tokio_postgres::{Client, NoTls, Row};

use super::{SessionRepository, TeacherRepository, UserRepository};
use crate::error::{Error, Result};
use crate::models::{Session, Teacher, User};

const SCHEMA: &str = include_str!("schema.sql");

const USER_COLUMNS: &str =
    "id, email, last_name, first_name, password, admin, created_at, updated_at";
const TEACHER_COLUMNS: &str = "id, last_name, first_name, created_at, updated_at";
const SESSION_COLUMNS: &str =
    "id, name, description, date, teacher_id, created_at, updated_at";

/// Statements run one at a time over a single connection
pub struct PgStore {
    client: Mutex<Client>,
}

impl PgStore {
    /// Connect using a libpq-style connection string
    pub async fn connect(url: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(url, NoTls).await?;

        // Spawn the connection handler
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(Self {
            client: Mutex::new(client),
        })
    }

    /// Create the tables if they do not exist yet
    pub async fn migrate(&self) -> Result<()> {
        self.client.lock().await.batch_execute(SCHEMA).await?;
        tracing::info!("Database schema is up to date");
        Ok(())
    }
}

fn user_from_row(row: &Row) -> Result<User> {
    Ok(User {
        id: Some(row.try_get("id")?),
        email: row.try_get("email")?,
        last_name: row.try_get("last_name")?,
        first_name: row.try_get("first_name")?,
        password: row.try_get("password")?,
        admin: row.try_get("admin")?,
        created_at: Some(row.try_get("created_at")?),
        updated_at: Some(row.try_get("updated_at")?),
    })
}

fn teacher_from_row(row: &Row) -> Result<Teacher> {
    Ok(Teacher {
        id: Some(row.try_get("id")?),
        last_name: row.try_get("last_name")?,
        first_name: row.try_get("first_name")?,
        created_at: Some(row.try_get("created_at")?),
        updated_at: Some(row.try_get("updated_at")?),
    })
}

fn session_from_row(row: &Row, users: Vec<i64>) -> Result<Session> {
    Ok(Session {
        id: Some(row.try_get("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        date: row.try_get("date")?,
        teacher_id: row.try_get("teacher_id")?,
        users,
        created_at: Some(row.try_get("created_at")?),
        updated_at: Some(row.try_get("updated_at")?),
    })
}

/// Unique violations on email are a client error, not a server fault
fn map_unique_violation(err: tokio_postgres::Error) -> Error {
    if err.code() == Some(&SqlState::UNIQUE_VIOLATION) {
        Error::BadRequest("Error: Email is already taken!".to_string())
    } else {
        Error::Database(err)
    }
}

/// A participation row pointing at a deleted session or user
fn map_missing_participant(err: tokio_postgres::Error, session_id: i64, user_id: i64) -> Error {
    if err.code() == Some(&SqlState::FOREIGN_KEY_VIOLATION) {
        Error::NotFound(format!(
            "Session {} or user {} not found",
            session_id, user_id
        ))
    } else {
        Error::Database(err)
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let client = self.client.lock().await;
        let row = client
            .query_opt(
                &format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS),
                &[&id],
            )
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let client = self.client.lock().await;
        let row = client
            .query_opt(
                &format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS),
                &[&email],
            )
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let client = self.client.lock().await;
        let row = client
            .query_one(
                "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
                &[&email],
            )
            .await?;
        Ok(row.try_get(0)?)
    }

    async fn save(&self, user: User) -> Result<User> {
        let client = self.client.lock().await;
        let row = match user.id {
            Some(id) => client
                .query_opt(
                    &format!(
                        "UPDATE users SET email = $2, last_name = $3, first_name = $4, \
                         password = $5, admin = $6, updated_at = now() \
                         WHERE id = $1 RETURNING {}",
                        USER_COLUMNS
                    ),
                    &[
                        &id,
                        &user.email,
                        &user.last_name,
                        &user.first_name,
                        &user.password,
                        &user.admin,
                    ],
                )
                .await
                .map_err(map_unique_violation)?
                .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))?,
            None => client
                .query_one(
                    &format!(
                        "INSERT INTO users (email, last_name, first_name, password, admin) \
                         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
                        USER_COLUMNS
                    ),
                    &[
                        &user.email,
                        &user.last_name,
                        &user.first_name,
                        &user.password,
                        &user.admin,
                    ],
                )
                .await
                .map_err(map_unique_violation)?,
        };
        user_from_row(&row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let client = self.client.lock().await;
        // participate rows cascade
        client.execute("DELETE FROM users WHERE id = $1", &[&id]).await?;
        Ok(())
    }
}

#[async_trait]
impl TeacherRepository for PgStore {
    async fn find_all(&self) -> Result<Vec<Teacher>> {
        let client = self.client.lock().await;
        let rows = client
            .query(
                &format!("SELECT {} FROM teachers ORDER BY id", TEACHER_COLUMNS),
                &[],
            )
            .await?;
        rows.iter().map(teacher_from_row).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        let client = self.client.lock().await;
        let row = client
            .query_opt(
                &format!("SELECT {} FROM teachers WHERE id = $1", TEACHER_COLUMNS),
                &[&id],
            )
            .await?;
        row.as_ref().map(teacher_from_row).transpose()
    }

    async fn save(&self, teacher: Teacher) -> Result<Teacher> {
        let client = self.client.lock().await;
        let row = match teacher.id {
            Some(id) => client
                .query_opt(
                    &format!(
                        "UPDATE teachers SET last_name = $2, first_name = $3, updated_at = now() \
                         WHERE id = $1 RETURNING {}",
                        TEACHER_COLUMNS
                    ),
                    &[&id, &teacher.last_name, &teacher.first_name],
                )
                .await?
                .ok_or_else(|| Error::NotFound(format!("Teacher {} not found", id)))?,
            None => {
                client
                    .query_one(
                        &format!(
                            "INSERT INTO teachers (last_name, first_name) VALUES ($1, $2) \
                             RETURNING {}",
                            TEACHER_COLUMNS
                        ),
                        &[&teacher.last_name, &teacher.first_name],
                    )
                    .await?
            }
        };
        teacher_from_row(&row)
    }
}

#[async_trait]
impl SessionRepository for PgStore {
    async fn find_all(&self) -> Result<Vec<Session>> {
        let client = self.client.lock().await;
        let rows = client
            .query(
                &format!("SELECT {} FROM sessions ORDER BY id", SESSION_COLUMNS),
                &[],
            )
            .await?;

        let mut participants: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in client
            .query(
                "SELECT session_id, user_id FROM participate ORDER BY session_id, user_id",
                &[],
            )
            .await?
        {
            participants
                .entry(row.try_get("session_id")?)
                .or_default()
                .push(row.try_get("user_id")?);
        }

        rows.iter()
            .map(|row| {
                let id: i64 = row.try_get("id")?;
                session_from_row(row, participants.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Session>> {
        let client = self.client.lock().await;
        let Some(row) = client
            .query_opt(
                &format!("SELECT {} FROM sessions WHERE id = $1", SESSION_COLUMNS),
                &[&id],
            )
            .await?
        else {
            return Ok(None);
        };

        let users = client
            .query(
                "SELECT user_id FROM participate WHERE session_id = $1 ORDER BY user_id",
                &[&id],
            )
            .await?
            .iter()
            .map(|r| r.try_get("user_id"))
            .collect::<std::result::Result<Vec<i64>, _>>()?;

        session_from_row(&row, users).map(Some)
    }

    async fn save(&self, mut session: Session) -> Result<Session> {
        session.dedup_participants();

        let mut client = self.client.lock().await;
        let tx = client.transaction().await?;

        let row = match session.id {
            Some(id) => tx
                .query_opt(
                    &format!(
                        "UPDATE sessions SET name = $2, description = $3, date = $4, \
                         teacher_id = $5, updated_at = now() WHERE id = $1 RETURNING {}",
                        SESSION_COLUMNS
                    ),
                    &[
                        &id,
                        &session.name,
                        &session.description,
                        &session.date,
                        &session.teacher_id,
                    ],
                )
                .await?
                .ok_or_else(|| Error::NotFound(format!("Session {} not found", id)))?,
            None => {
                tx.query_one(
                    &format!(
                        "INSERT INTO sessions (name, description, date, teacher_id) \
                         VALUES ($1, $2, $3, $4) RETURNING {}",
                        SESSION_COLUMNS
                    ),
                    &[
                        &session.name,
                        &session.description,
                        &session.date,
                        &session.teacher_id,
                    ],
                )
                .await?
            }
        };
        let id: i64 = row.try_get("id")?;

        tx.execute("DELETE FROM participate WHERE session_id = $1", &[&id])
            .await?;
        tx.execute(
            "INSERT INTO participate (session_id, user_id) \
             SELECT $1, u.id FROM users u WHERE u.id = ANY($2) \
             ON CONFLICT DO NOTHING",
            &[&id, &session.users],
        )
        .await?;

        let stored: Vec<i64> = tx
            .query(
                "SELECT user_id FROM participate WHERE session_id = $1",
                &[&id],
            )
            .await?
            .iter()
            .map(|r| r.try_get("user_id"))
            .collect::<std::result::Result<_, _>>()?;
        tx.commit().await?;

        // Keep the caller's participant order
        session.users.retain(|uid| stored.contains(uid));
        session_from_row(&row, session.users)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let client = self.client.lock().await;
        client
            .execute("DELETE FROM sessions WHERE id = $1", &[&id])
            .await?;
        Ok(())
    }
    async fn add_participant(&self, session_id: i64, user_id: i64) -> Result<bool> {
        let client = self.client.lock().await;
        let inserted = client
            .execute(
                "INSERT INTO participate (session_id, user_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
                &[&session_id, &user_id],
            )
            .await
            .map_err(|e| map_missing_participant(e, session_id, user_id))?;
        Ok(inserted == 1)
    }

    async fn remove_participant(&self, session_id: i64, user_id: i64) -> Result<bool> {
        let client = self.client.lock().await;
        let exists = client
            .query_one(
                "SELECT EXISTS(SELECT 1 FROM sessions WHERE id = $1)",
                &[&session_id],
            )
            .await?
            .try_get::<_, bool>(0)?;
        if !exists {
            return Err(Error::NotFound(format!("Session {} not found", session_id)));
        }

        let removed = client
            .execute(
                "DELETE FROM participate WHERE session_id = $1 AND user_id = $2",
                &[&session_id, &user_id],
            )
            .await?;
        Ok(removed == 1)
    }
}
