//! # Editing Commands
//!
//! Key bindings and the text-editing commands they run.
//!
//! | Key                       | Command                  |
//! |---------------------------|--------------------------|
//! | `Mod-z`                   | undo                     |
//! | `Mod-y`, `Mod-Shift-z`    | redo                     |
//! | `Mod-b`                   | toggle strong            |
//! | `Mod-i`                   | toggle em                |
//! | `Backspace`               | delete backward          |
//! | `Enter`                   | split block              |
//!
//! Commands that edit text build a [`Transaction`] from the document and
//! selection; they return `None` when they do not apply (for example toggling
//! a mark inside a heading, or joining across a section boundary).

use crate::selection::Selection;
use crate::transaction::Transaction;
use drafter_schema::{ast::split_runs, Fragment, Mark, Node, NodeKind, ResolvedPos, Schema, TextRun};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "arg", rename_all = "snake_case")]
pub enum Command {
    Undo,
    Redo,
    ToggleMark(Mark),
    InsertText(String),
    DeleteBackward,
    SplitBlock,
}

/// Look up the command bound to a key chord
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "Mod-z" => Some(Command::Undo),
        "Mod-y" | "Mod-Shift-z" => Some(Command::Redo),
        "Mod-b" => Some(Command::ToggleMark(Mark::Strong)),
        "Mod-i" => Some(Command::ToggleMark(Mark::Em)),
        "Backspace" => Some(Command::DeleteBackward),
        "Enter" => Some(Command::SplitBlock),
        _ => None,
    }
}

/// Both ends of the selection inside one textblock
fn textblock_range<'a>(doc: &'a Node, selection: Selection) -> Option<(ResolvedPos<'a>, ResolvedPos<'a>)> {
    let start = doc.resolve(selection.from()).ok()?;
    let end = doc.resolve(selection.to()).ok()?;

    if start.parent().is_textblock() && start.same_parent(&end) {
        Some((start, end))
    } else {
        None
    }
}

pub fn toggle_mark(doc: &Node, selection: Selection, mark: Mark) -> Option<Transaction> {
    if selection.is_empty() {
        return None;
    }

    let (start, _) = textblock_range(doc, selection)?;
    if !Schema::allows_mark(start.parent().kind(), mark) {
        return None;
    }

    let Fragment::Inline(runs) = doc.slice(selection.from(), selection.to()).ok()? else {
        return None;
    };

    let remove = runs.iter().all(|run| run.has_mark(mark));
    let toggled = runs
        .into_iter()
        .map(|run| {
            let marks = run.marks.iter().copied().filter(|m| *m != mark);
            if remove {
                TextRun::marked(run.text, marks)
            } else {
                TextRun::marked(run.text, marks.chain([mark]))
            }
        })
        .collect();

    Some(
        Transaction::new()
            .replace(selection.from(), selection.to(), Fragment::Inline(toggled))
            .with_description(if remove { "remove mark" } else { "add mark" })
            .with_selection(selection),
    )
}

pub fn insert_text(doc: &Node, selection: Selection, text: &str) -> Option<Transaction> {
    let (start, _) = textblock_range(doc, selection)?;
    let parent = start.parent();

    // Inherit marks from the character before the cursor
    let marks = if parent.kind() == NodeKind::Paragraph && start.parent_offset() > 0 {
        let (before, _) = split_runs(parent.runs(), start.parent_offset());
        before.last().map(|run| run.marks.clone()).unwrap_or_default()
    } else {
        Vec::new()
    };

    let run = TextRun::marked(text, marks);
    let cursor = selection.from() + run.len();

    Some(
        Transaction::new()
            .replace(selection.from(), selection.to(), Fragment::Inline(vec![run]))
            .with_description("typing")
            .with_selection(Selection::cursor(cursor)),
    )
}

pub fn delete_backward(doc: &Node, selection: Selection) -> Option<Transaction> {
    if !selection.is_empty() {
        textblock_range(doc, selection)?;
        return Some(
            Transaction::new()
                .replace(selection.from(), selection.to(), Fragment::empty_inline())
                .with_description("delete")
                .with_selection(Selection::cursor(selection.from())),
        );
    }

    let pos = doc.resolve(selection.head).ok()?;
    if !pos.parent().is_textblock() {
        return None;
    }

    if pos.parent_offset() > 0 {
        let from = selection.head - 1;
        return Some(
            Transaction::new()
                .replace(from, selection.head, Fragment::empty_inline())
                .with_description("delete")
                .with_selection(Selection::cursor(from)),
        );
    }

    join_backward(&pos)
}

/// Merge a paragraph into the paragraph before it. Never crosses into a heading
/// or out of the section.
fn join_backward(pos: &ResolvedPos<'_>) -> Option<Transaction> {
    let depth = pos.depth();
    let current = pos.parent();
    let index = pos.step(depth).index;
    if current.kind() != NodeKind::Paragraph || index == 0 {
        return None;
    }

    let section = pos.node(depth - 1);
    let previous = section.child(index - 1)?;
    if previous.kind() != NodeKind::Paragraph {
        return None;
    }

    let before_current = pos.before(depth)?;
    let before_previous = before_current - previous.node_size();
    let end = before_current + current.node_size();

    let mut runs = previous.runs().to_vec();
    runs.extend(current.runs().iter().cloned());
    let merged = Node::paragraph(runs).ok()?;

    Some(
        Transaction::new()
            .replace(before_previous, end, Fragment::Blocks(vec![merged]))
            .with_description("join paragraphs")
            .with_selection(Selection::cursor(before_previous + 1 + previous.content_size())),
    )
}

/// Split the textblock at the cursor. Splitting a heading moves the tail into a
/// new first paragraph.
pub fn split_block(doc: &Node, selection: Selection) -> Option<Transaction> {
    let (start, end) = textblock_range(doc, selection)?;
    let depth = start.depth();
    let block = start.parent();
    let before = start.before(depth)?;

    let (head, _) = split_runs(block.runs(), start.parent_offset());
    let (_, tail) = split_runs(block.runs(), end.parent_offset());

    let first = match block.kind() {
        NodeKind::Heading => Node::heading(head).ok()?,
        _ => Node::paragraph(head).ok()?,
    };
    let second = Node::paragraph(tail).ok()?;

    let cursor = before + first.node_size() + 1;

    Some(
        Transaction::new()
            .replace(before, before + block.node_size(), Fragment::Blocks(vec![first, second]))
            .with_description("split block")
            .with_selection(Selection::cursor(cursor)),
    )
}
