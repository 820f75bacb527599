//! # equipment-checklist-api
//!
//! REST API for the equipment records of an equipment-checklist
//! management system: CRUD over equipment plus an ID lookup used by the
//! check-in flow.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, bearer token)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── EquipmentService (service/)
//!     ├── Validator (domain/)
//!     │
//!     └── EquipmentStore (persistence/)
//!           ├── PostgreSQL
//!           └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
