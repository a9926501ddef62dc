/// Database models for Taskhub
///
/// Each model owns its table's CRUD operations.
///
/// # Models
///
/// - `user`: user accounts with soft-disable
/// - `main_task`: named groupings of tasks
/// - `user_task_group`: user <-> main task visibility grants
/// - `task`: units of work with a three-valued status
/// - `task_share`: records of a task being shared with a user

pub mod main_task;
pub mod task;
pub mod task_share;
pub mod user;
pub mod user_task_group;
