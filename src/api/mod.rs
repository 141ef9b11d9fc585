//! HTTP interface
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | GET | `/` | 200 greeting |
//! | GET | `/healthz` | 200 `{"status":"ok"}` |
//! | GET | `/data` | 200 raw collection |
//! | GET | `/patient/{id}` | 200 record view |
//! | GET | `/sort?sort_by=&order=` | 200 ordered views |
//! | POST | `/create` | 202 acknowledgment |
//! | PUT | `/edit/{id}` | 200 acknowledgment |
//! | DELETE | `/delete/{id}` | 200 acknowledgment |
//!
//! Failures are JSON bodies produced by [`ApiError`].

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use server::{build_app, serve, CarebookServer};
