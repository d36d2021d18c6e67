//! Domain services sitting between the HTTP handlers and the store

mod session;
mod teacher;
mod user;

pub use session::SessionService;
pub use teacher::TeacherService;
pub use user::UserService;
