//! # Tasknest API Server Library
//!
//! This library provides the core functionality for the Tasknest API server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `ownership`: Per-resource access control (load + authorize)
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod ownership;
pub mod routes;
