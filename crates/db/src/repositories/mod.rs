//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod complaint_repo;
pub mod fee_repo;
pub mod lost_found_repo;
pub mod mess_menu_repo;
pub mod message_repo;
pub mod outpass_repo;
pub mod reconciliation_repo;
pub mod user_repo;

pub use complaint_repo::ComplaintRepo;
pub use fee_repo::FeeRepo;
pub use lost_found_repo::LostFoundRepo;
pub use mess_menu_repo::MessMenuRepo;
pub use message_repo::MessageRepo;
pub use outpass_repo::OutpassRepo;
pub use reconciliation_repo::ReconciliationRepo;
pub use user_repo::UserRepo;
