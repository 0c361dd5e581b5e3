//! Thin client for the remote student-management REST API.
//!
//! Endpoints: `GET/POST /students`, `GET/PUT/DELETE /students/{id}`,
//! `GET/POST /lessons`, `GET/PUT/DELETE /lessons/{id}`. Requests and
//! responses are JSON; writes use the nested payload shapes defined in
//! the per-resource modules.

pub mod client;
pub mod error;
pub mod lessons;
pub mod students;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use lessons::LessonPayload;
pub use students::StudentPayload;
