/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `root`: Greeting endpoint
/// - `auth`: Login endpoint issuing bearer tokens
/// - `users`: Registration and user listing
/// - `tasks`: Task CRUD endpoints

pub mod auth;
pub mod root;
pub mod tasks;
pub mod users;
