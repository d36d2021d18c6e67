//! Persisted entities: users, teachers and yoga sessions

mod session;
mod teacher;
mod user;

pub use session::Session;
pub use teacher::Teacher;
pub use user::User;
