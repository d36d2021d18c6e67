//! Wire representations of the entities and the mappings between them

mod session;
mod teacher;
mod user;
pub mod validate;

pub use session::SessionDto;
pub use teacher::TeacherDto;
pub use user::UserDto;
pub use validate::Validate;
