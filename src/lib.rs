//! nvmeof-cli - management shim for Ceph NVMe-oF gateways.
//!
//! Gateway responses arrive as loosely typed documents. The crate shapes
//! them into schema-described records with a bounded-depth mapper, then
//! routes each management command through a dispatcher that applies output
//! modifiers, renders JSON or YAML, and turns failures into errno-style
//! exit codes.
//!
//! # Quick Start
//!
//! ```rust
//! use nvmeof_cli::mapper::{FieldType, Schema, Source, map};
//!
//! let address = Schema::named("Address").field("street", FieldType::String).build();
//! let person = Schema::named("Person")
//!     .field("name", FieldType::String)
//!     .field("address", FieldType::record(&address))
//!     .build();
//!
//! let doc = Source::from(serde_json::json!({
//!     "name": "Alice",
//!     "address": {"street": "Main St"},
//! }));
//!
//! let record = map(&doc, &person).unwrap();
//! assert_eq!(record.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

/// Command registry, dispatch, and output rendering.
pub mod cli;

/// Configuration schema definitions and loading.
pub mod config;

/// Gateway transport seam and response models.
pub mod gateway;

/// Bounded-depth structural mapping of gateway responses.
pub mod mapper;

/// Logging setup.
pub mod tracing_config;
