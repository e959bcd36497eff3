//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Methods that must share their
//! caller's transaction (the activity log append) accept
//! `&mut PgConnection` instead, so a log row can never be written outside
//! the transaction of the mutation it describes.

pub mod activity_repo;
pub mod member_repo;
pub mod note_repo;
pub mod payment_repo;
pub mod project_repo;
pub mod session_repo;
pub mod task_repo;
pub mod user_repo;

pub use activity_repo::ActivityLogRepo;
pub use member_repo::MemberRepo;
pub use note_repo::NoteRepo;
pub use payment_repo::PaymentRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
