//! # Drafter Schema
//!
//! Structured document model for Drafter.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ outline: { sections: [{ title, content }] }  │  flat, AI-facing
//! └──────────────────────────────────────────────┘
//!                      ↓ DocumentBuilder
//! ┌──────────────────────────────────────────────┐
//! │ Node tree: document → section+ →             │  schema-valid,
//! │            heading paragraph+                │  position-addressed
//! └──────────────────────────────────────────────┘
//!                      ↓ SectionData::from_section
//! ┌──────────────────────────────────────────────┐
//! │ section data sent back to the AI             │
//! └──────────────────────────────────────────────┘
//! ```

pub mod ast;
pub mod builder;
pub mod error;
pub mod id_generator;
pub mod outline;
pub mod replace;
pub mod resolve;
pub mod schema;
pub mod serializer;

pub use ast::{Mark, Node, NodeKind, TextRun};
pub use builder::{build_section_with_id, DocumentBuilder, PLACEHOLDER_PARAGRAPH, UNTITLED_HEADING};
pub use error::{SchemaError, SchemaResult};
pub use id_generator::IdGenerator;
pub use outline::{Outline, SectionData};
pub use replace::Fragment;
pub use resolve::{PathStep, ResolvedPos};
pub use schema::{ContentRule, NodeSpec, Schema};
pub use serializer::{from_dom, to_dom, to_markdown, DomNode};
