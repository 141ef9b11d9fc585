// Carebook - Patient Record Service
// Copyright (c) 2025 Carebook Contributors
// Licensed under the MIT License

//! # Carebook - Patient Record Service
//!
//! Carebook keeps a small dataset of patient records (name, city, age,
//! gender, height, weight) in a single JSON document and serves it over an
//! HTTP API with body-mass-index and weight-verdict values computed on read.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Validating** records against the patient schema, reporting every bad field
//! - **Deriving** BMI and a weight verdict from height and weight
//! - **Persisting** the whole collection atomically as one JSON object
//! - **Serving** list, get, sort, create, update and delete over HTTP
//!
//! ## Architecture
//!
//! Carebook follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`api`] - HTTP router, handlers and error responses
//! - [`core`] - Record operations (list, get, sort, create, update, delete)
//! - [`adapters`] - Dataset persistence (JSON file, in-memory)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use carebook::adapters::store::create_store;
//! use carebook::config::load_config;
//! use carebook::core::records::PatientService;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("carebook.toml")?;
//!     let service = PatientService::new(create_store(&config.store));
//!
//!     for view in service.sort("bmi", Some("desc")).await? {
//!         println!("{} {} {}", view.id, view.bmi, view.verdict);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], whose error is
//! [`domain::CarebookError`]. Validation failures carry one entry per
//! offending field:
//!
//! ```rust
//! use carebook::domain::{CarebookError, NewPatient};
//!
//! let request: NewPatient = serde_json::from_str(r#"{"id": "P001", "age": 300}"#).unwrap();
//! let err = CarebookError::from(request.validate().unwrap_err());
//! assert_eq!(err.kind(), "validation_error");
//! ```

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
