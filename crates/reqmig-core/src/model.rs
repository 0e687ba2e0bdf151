//! Document model for exported requirements modules.
//!
//! The model is split into two families of types:
//!
//! - **Legacy** types ([`LegacyModule`], [`LegacyArtifact`], [`LegacyLink`])
//!   deserialize an exported document using the legacy key names.
//! - **Target** types ([`Module`], [`Artifact`], [`LinkedArtifact`],
//!   [`Attachment`]) serialize the migrated document using the target key
//!   names.
//!
//! Every recognized key is an explicit optional field. Keys the model does
//! not recognize are kept verbatim, in input order, in an `extra` bag and
//! written back after the recognized fields.

mod legacy;
mod target;

pub use legacy::{GroupField, LegacyArtifact, LegacyLink, LegacyModule};
pub use target::{Artifact, Attachment, AttachmentEntry, LinkedArtifact, Module};

/// Unrecognized keys carried through a migration unchanged.
pub type Extra = indexmap::IndexMap<String, serde_json::Value>;
