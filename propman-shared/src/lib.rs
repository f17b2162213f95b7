//! # Propman Shared Library
//!
//! Data layer for the property-management back end: models, PostgreSQL
//! repositories, request DTOs, services and attachment storage. The HTTP
//! layer and the admin binary both build on this crate.
//!
//! ## Module Organization
//!
//! - `config`: Environment configuration (database, object storage)
//! - `db`: Connection pool and embedded migrations
//! - `models`: Database rows plus insert and patch shapes
//! - `repository`: The `Repository` trait and one PostgreSQL repository per entity
//! - `dto`: Validated create/update requests
//! - `service`: CRUD services and the property attachment workflow
//! - `storage`: Object storage (S3, in-memory)
//! - `auth`: Password hashing
//! - `error`: Common error types

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod storage;

/// Current version of the propman shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
