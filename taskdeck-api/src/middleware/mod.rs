/// Middleware modules for the API server
///
/// - `auth`: Bearer-token extractors resolving the calling user
/// - `timing`: Request logging and X-Process-Time response header

pub mod auth;
pub mod timing;
