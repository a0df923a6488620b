//! # Drafter Editor
//!
//! Native editing engine for Drafter documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: node tree, positions, builder       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditorHost                          │
//! │  - Handle registry of live editor states    │
//! │  - Range-replace transactions, validated    │
//! │  - Undo/redo history, selection mapping     │
//! │  - Keymap commands and change observers     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ locator: position → active section + rect   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is immutable per version**: transactions build a new tree
//! 2. **All or nothing**: a transaction that breaks the schema commits nothing
//! 3. **One change, one history entry, one notification**
//! 4. **Epochs**: replacing the whole document invalidates outstanding work
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drafter_editor::{EditorHost, Selection, LineGeometry, locate_selection};
//!
//! let mut host = EditorHost::new();
//! let handle = host.initialize(Some(doc))?;
//!
//! host.set_selection(handle, Selection::cursor(12))?;
//! host.handle_key(handle, "Mod-b")?;
//!
//! let active = locate_selection(&host, handle, &LineGeometry::default());
//! ```

pub mod commands;
pub mod document;
pub mod errors;
pub mod host;
pub mod locator;
pub mod observers;
pub mod selection;
pub mod transaction;
pub mod undo_stack;

pub use commands::{command_for_key, Command};
pub use document::EditorState;
pub use errors::EditorError;
pub use host::{EditorHandle, EditorHost, DEFAULT_HISTORY_DEPTH};
pub use locator::{enclosing_section, locate, locate_selection, ActiveSection, Geometry, LineGeometry, Rect};
pub use observers::{ChangeEvent, ChangeKind, Observer, SubscriptionId};
pub use selection::Selection;
pub use transaction::{Applied, Step, Transaction, TransactionError};
pub use undo_stack::{HistoryEntry, Reverted, UndoStack};
