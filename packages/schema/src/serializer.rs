//! Presentational serialization.
//!
//! Maps document trees to and from a small tag tree (`article`, `section`,
//! `h2`, `p`, `strong`, `em`) for display. Parsing also accepts `b` and `i`.
//! Marks found inside a heading are dropped, since headings carry none.

use crate::ast::{normalize_runs, Mark, Node, NodeKind, TextRun};
use crate::error::{SchemaError, SchemaResult};
use crate::id_generator::IdGenerator;
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomNode {
    Text(String),
    Element {
        tag: String,
        #[serde(default)]
        children: Vec<DomNode>,
    },
}

impl DomNode {
    pub fn element(tag: &str, children: Vec<DomNode>) -> Self {
        DomNode::Element {
            tag: tag.to_string(),
            children,
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            DomNode::Text(text) => out.push_str(&escape_html(text)),
            DomNode::Element { tag, children } => {
                let _ = write!(out, "<{}>", tag);
                for child in children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", tag);
            }
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn mark_from_tag(tag: &str) -> Option<Mark> {
    match tag {
        "strong" | "b" => Some(Mark::Strong),
        "em" | "i" => Some(Mark::Em),
        _ => None,
    }
}

/// Document tree → tag tree
pub fn to_dom(node: &Node) -> DomNode {
    let tag = Schema::spec(node.kind()).tag;

    if node.is_textblock() {
        let children = node.runs().iter().map(run_to_dom).collect();
        return DomNode::element(tag, children);
    }

    DomNode::element(tag, node.children().iter().map(to_dom).collect())
}

fn run_to_dom(run: &TextRun) -> DomNode {
    // Strong wraps em, matching mark order
    run.marks
        .iter()
        .rev()
        .fold(DomNode::Text(run.text.clone()), |inner, mark| {
            DomNode::element(mark.name(), vec![inner])
        })
}

/// Tag tree → document tree. Sections receive fresh ids from `ids`.
pub fn from_dom(dom: &DomNode, ids: &mut IdGenerator) -> SchemaResult<Node> {
    let children = expect_tag(dom, "article")?;
    let sections = children
        .iter()
        .filter(|c| !is_blank(c))
        .map(|c| section_from_dom(c, ids))
        .collect::<SchemaResult<Vec<_>>>()?;

    Node::document(sections)
}

fn section_from_dom(dom: &DomNode, ids: &mut IdGenerator) -> SchemaResult<Node> {
    let children: Vec<&DomNode> = expect_tag(dom, "section")?
        .iter()
        .filter(|c| !is_blank(c))
        .collect();

    let id = ids.next_id();
    let (first, rest) = children
        .split_first()
        .ok_or_else(|| SchemaError::MissingHeading { id: id.clone() })?;

    let heading_runs: Vec<TextRun> = inline_from_dom(expect_tag(first, "h2")?)
        .into_iter()
        .map(|run| TextRun::plain(run.text))
        .collect();
    let heading = Node::heading(heading_runs)?;

    let paragraphs = rest
        .iter()
        .map(|p| {
            let runs = inline_from_dom(expect_tag(p, "p")?);
            Node::paragraph(runs)
        })
        .collect::<SchemaResult<Vec<_>>>()?;

    Node::section(id, heading, paragraphs)
}

fn inline_from_dom(children: &[DomNode]) -> Vec<TextRun> {
    let mut runs = Vec::new();
    collect_runs(children, &mut Vec::new(), &mut runs);
    normalize_runs(runs)
}

fn collect_runs(children: &[DomNode], marks: &mut Vec<Mark>, out: &mut Vec<TextRun>) {
    for child in children {
        match child {
            DomNode::Text(text) => out.push(TextRun::marked(text.clone(), marks.clone())),
            DomNode::Element { tag, children } => match mark_from_tag(tag) {
                Some(mark) => {
                    marks.push(mark);
                    collect_runs(children, marks, out);
                    marks.pop();
                }
                None => collect_runs(children, marks, out),
            },
        }
    }
}

fn expect_tag<'a>(dom: &'a DomNode, expected: &str) -> SchemaResult<&'a [DomNode]> {
    match dom {
        DomNode::Element { tag, children } if tag == expected => Ok(children),
        DomNode::Element { tag, .. } => Err(SchemaError::UnknownTag(tag.clone())),
        DomNode::Text(_) => Err(SchemaError::UnknownTag("#text".to_string())),
    }
}

fn is_blank(dom: &DomNode) -> bool {
    matches!(dom, DomNode::Text(text) if text.trim().is_empty())
}

/// Render a document as Markdown-style plain text
pub fn to_markdown(node: &Node) -> String {
    let mut out = String::new();
    write_markdown(node, &mut out);
    out
}

fn write_markdown(node: &Node, out: &mut String) {
    match node.kind() {
        NodeKind::Document | NodeKind::Section => {
            for child in node.children() {
                write_markdown(child, out);
            }
        }
        NodeKind::Heading => {
            let _ = writeln!(out, "## {}\n", node.text_content());
        }
        NodeKind::Paragraph => {
            for run in node.runs() {
                let wrap = match (run.has_mark(Mark::Strong), run.has_mark(Mark::Em)) {
                    (true, true) => "***",
                    (true, false) => "**",
                    (false, true) => "*",
                    (false, false) => "",
                };
                let _ = write!(out, "{}{}{}", wrap, run.text, wrap);
            }
            out.push_str("\n\n");
        }
    }
}
