use chrono::{DateTime, Utc};

/// A scheduled yoga session and the members attending it
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: Option<i64>,
    pub name: String,
    pub date: DateTime<Utc>,
    pub description: String,
    /// Weak reference to the teacher leading the session
    pub teacher_id: Option<i64>,
    /// Ids of participating users. Each id appears at most once.
    pub users: Vec<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create an unsaved session with no participants
    pub fn new(
        name: impl Into<String>,
        date: DateTime<Utc>,
        description: impl Into<String>,
        teacher_id: Option<i64>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            date,
            description: description.into(),
            teacher_id,
            users: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn has_participant(&self, user_id: i64) -> bool {
        self.users.contains(&user_id)
    }

    /// Add a participant. Returns false if the user was already attending.
    pub fn add_participant(&mut self, user_id: i64) -> bool {
        if self.has_participant(user_id) {
            return false;
        }
        self.users.push(user_id);
        true
    }

    /// Remove a participant. Returns false if the user was not attending.
    pub fn remove_participant(&mut self, user_id: i64) -> bool {
        let before = self.users.len();
        self.users.retain(|id| *id != user_id);
        self.users.len() != before
    }

    /// Drop repeated participant ids, keeping first occurrences
    pub fn dedup_participants(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.users.retain(|id| seen.insert(*id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new("Morning flow", Utc::now(), "Gentle vinyasa", Some(1))
    }

    #[test]
    fn test_add_participant_once() {
        let mut s = session();
        assert!(s.add_participant(7));
        assert!(!s.add_participant(7));
        assert_eq!(s.users, vec![7]);
    }

    #[test]
    fn test_remove_participant() {
        let mut s = session();
        s.add_participant(3);
        s.add_participant(4);
        assert!(s.remove_participant(3));
        assert!(!s.remove_participant(3));
        assert_eq!(s.users, vec![4]);
    }

    #[test]
    fn test_dedup_keeps_order() {
        let mut s = session();
        s.users = vec![2, 1, 2, 3, 1];
        s.dedup_participants();
        assert_eq!(s.users, vec![2, 1, 3]);
    }
}
