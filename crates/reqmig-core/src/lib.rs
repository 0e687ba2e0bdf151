//! Reqmig Core Types and Definitions
//!
//! This crate provides the foundational types used when migrating exported
//! requirements modules into the target import schema. It includes:
//!
//! - **Mapping**: The immutable key and value lookup tables ([`mapping::MappingTables`])
//! - **Model**: Legacy (input) and target (output) document types ([`model`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Reconstructed diagram shapes and their SVG primitives ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod mapping;
pub mod model;
