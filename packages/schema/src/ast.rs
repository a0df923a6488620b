use serde::{Deserialize, Serialize};

/// Inline style mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Strong,
    Em,
}

impl Mark {
    pub fn name(&self) -> &'static str {
        match self {
            Mark::Strong => "strong",
            Mark::Em => "em",
        }
    }
}

/// Run of text sharing one set of marks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Marks are kept sorted and unique, so a run never carries two marks of one kind.
    pub fn marked(text: impl Into<String>, marks: impl IntoIterator<Item = Mark>) -> Self {
        let mut marks: Vec<Mark> = marks.into_iter().collect();
        marks.sort();
        marks.dedup();
        Self {
            text: text.into(),
            marks,
        }
    }

    /// Length in characters (the unit of document positions)
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn has_mark(&self, mark: Mark) -> bool {
        self.marks.contains(&mark)
    }
}

/// Drop empty runs, canonicalize mark sets and merge neighbours with equal marks
pub fn normalize_runs(runs: Vec<TextRun>) -> Vec<TextRun> {
    let mut out: Vec<TextRun> = Vec::with_capacity(runs.len());

    for run in runs {
        if run.is_empty() {
            continue;
        }
        let run = TextRun::marked(run.text, run.marks);

        match out.last_mut() {
            Some(last) if last.marks == run.marks => last.text.push_str(&run.text),
            _ => out.push(run),
        }
    }

    out
}

/// Split runs at a character offset
pub fn split_runs(runs: &[TextRun], at: usize) -> (Vec<TextRun>, Vec<TextRun>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut offset = 0;

    for run in runs {
        let len = run.len();
        if offset + len <= at {
            left.push(run.clone());
        } else if offset >= at {
            right.push(run.clone());
        } else {
            let split = byte_index(&run.text, at - offset);
            left.push(TextRun::marked(&run.text[..split], run.marks.clone()));
            right.push(TextRun::marked(&run.text[split..], run.marks.clone()));
        }
        offset += len;
    }

    (left, right)
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Document,
    Section,
    Heading,
    Paragraph,
}

/// Document tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// Root: one or more sections
    Document { children: Vec<Node> },

    /// One heading followed by one or more paragraphs
    Section { id: String, children: Vec<Node> },

    /// Unmarked text
    Heading {
        #[serde(default)]
        content: Vec<TextRun>,
    },

    /// Text with strong/em marks
    Paragraph {
        #[serde(default)]
        content: Vec<TextRun>,
    },
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document { .. } => NodeKind::Document,
            Node::Section { .. } => NodeKind::Section,
            Node::Heading { .. } => NodeKind::Heading,
            Node::Paragraph { .. } => NodeKind::Paragraph,
        }
    }

    /// Headings and paragraphs hold text directly
    pub fn is_textblock(&self) -> bool {
        matches!(self, Node::Heading { .. } | Node::Paragraph { .. })
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children } | Node::Section { children, .. } => children,
            Node::Heading { .. } | Node::Paragraph { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children } | Node::Section { children, .. } => Some(children),
            Node::Heading { .. } | Node::Paragraph { .. } => None,
        }
    }

    pub fn runs(&self) -> &[TextRun] {
        match self {
            Node::Heading { content } | Node::Paragraph { content } => content,
            Node::Document { .. } | Node::Section { .. } => &[],
        }
    }

    pub fn runs_mut(&mut self) -> Option<&mut Vec<TextRun>> {
        match self {
            Node::Heading { content } | Node::Paragraph { content } => Some(content),
            Node::Document { .. } | Node::Section { .. } => None,
        }
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children().get(index)
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    pub fn section_id(&self) -> Option<&str> {
        match self {
            Node::Section { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Concatenated text of all descendant runs
    pub fn text_content(&self) -> String {
        match self {
            Node::Heading { content } | Node::Paragraph { content } => {
                content.iter().map(|r| r.text.as_str()).collect()
            }
            Node::Document { children } | Node::Section { children, .. } => {
                children.iter().map(Node::text_content).collect()
            }
        }
    }

    /// Size of the node's content in position units
    pub fn content_size(&self) -> usize {
        match self {
            Node::Heading { content } | Node::Paragraph { content } => {
                content.iter().map(TextRun::len).sum()
            }
            Node::Document { children } | Node::Section { children, .. } => {
                children.iter().map(Node::node_size).sum()
            }
        }
    }

    /// Opening token + content + closing token
    pub fn node_size(&self) -> usize {
        self.content_size() + 2
    }

    pub fn sections(&self) -> impl Iterator<Item = &Node> {
        self.children()
            .iter()
            .filter(|c| matches!(c, Node::Section { .. }))
    }

    /// Find a section by id, returning its position and node
    pub fn find_section(&self, section_id: &str) -> Option<(usize, &Node)> {
        let mut pos = 0;
        for child in self.children() {
            if child.section_id() == Some(section_id) {
                return Some((pos, child));
            }
            pos += child.node_size();
        }
        None
    }

    /// Position before the child at `index`, relative to this node's content start
    pub fn child_offset(&self, index: usize) -> usize {
        self.children()
            .iter()
            .take(index)
            .map(Node::node_size)
            .sum()
    }
}
