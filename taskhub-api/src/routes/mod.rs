/// API route handlers
///
/// Organized by resource:
///
/// - `health`: health check endpoint
/// - `auth`: registration and login
/// - `users`: user management
/// - `main_tasks`: task group management and sharing
/// - `tasks`: task management and sharing

pub mod auth;
pub mod health;
pub mod main_tasks;
pub mod tasks;
pub mod users;
