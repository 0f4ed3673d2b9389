//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or, for capacity-sensitive writes, an open
//! transaction connection) as the first argument.

pub mod category_repo;
pub mod comment_repo;
pub mod compilation_repo;
pub mod event_repo;
pub mod request_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use comment_repo::CommentRepo;
pub use compilation_repo::CompilationRepo;
pub use event_repo::EventRepo;
pub use request_repo::RequestRepo;
pub use user_repo::UserRepo;
