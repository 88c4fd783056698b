//! Markdown outline to node forest.
//!
//! Only three kinds of lines matter: ATX headings (`#` to `######`), dash list
//! items (`- item`, nested by leading spaces) and plain text, which is folded
//! into the title of the node it follows.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("heading pattern is valid"));
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s+(.*)$").expect("list pattern is valid"));

/// Length of generated node identifiers.
pub const ID_LEN: usize = 20;

/// Source of node identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random identifiers: the first [`ID_LEN`] hex digits of a UUID v4.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(ID_LEN);
        id
    }
}

/// Predictable identifiers (`node-1`, `node-2`, ...).
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    issued: usize,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("node-{}", self.issued)
    }
}

/// A single topic of the mind map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub id: String,
    pub title: String,
    pub depth: u32,
    /// Identifier of the enclosing node, `None` for top-level nodes.
    #[serde(skip)]
    pub parent: Option<String>,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::count).sum::<usize>()
    }
}

/// Total number of nodes in a forest.
pub fn count_nodes(forest: &[OutlineNode]) -> usize {
    forest.iter().map(OutlineNode::count).sum()
}

/// A classified, non-blank input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineLine {
    Heading { level: u32, text: String },
    ListItem { indent: usize, text: String },
    Text(String),
}

/// Classify a raw line. Returns `None` for blank lines.
///
/// Tabs count as two spaces when measuring list indentation.
pub fn classify_line(raw: &str) -> Option<OutlineLine> {
    let expanded = raw.replace('\t', "  ");
    let line = expanded.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(caps) = HEADING_RE.captures(line) {
        return Some(OutlineLine::Heading {
            level: caps[1].len() as u32,
            text: caps[2].to_string(),
        });
    }

    if let Some(caps) = LIST_ITEM_RE.captures(line) {
        let indent = expanded.len() - expanded.trim_start_matches(' ').len();
        return Some(OutlineLine::ListItem {
            indent,
            text: caps[1].to_string(),
        });
    }

    Some(OutlineLine::Text(line.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Root,
    Heading,
    List { indent: usize },
}

/// Open node that still accepts children and text.
struct NodeBuilder {
    kind: FrameKind,
    id: String,
    title: String,
    depth: u32,
    parent: Option<String>,
    children: Vec<OutlineNode>,
}

impl NodeBuilder {
    fn root() -> Self {
        NodeBuilder {
            kind: FrameKind::Root,
            id: String::new(),
            title: String::new(),
            depth: 0,
            parent: None,
            children: Vec::new(),
        }
    }

    fn child_of(parent: &NodeBuilder, kind: FrameKind, id: String, title: String, depth: u32) -> Self {
        let parent_id = match parent.kind {
            FrameKind::Root => None,
            _ => Some(parent.id.clone()),
        };
        NodeBuilder {
            kind,
            id,
            title,
            depth,
            parent: parent_id,
            children: Vec::new(),
        }
    }

    /// Whether a heading of `level` closes this frame.
    fn closed_by_heading(&self, level: u32) -> bool {
        match self.kind {
            FrameKind::Root => false,
            FrameKind::Heading => self.depth >= level,
            FrameKind::List { .. } => true,
        }
    }

    /// Whether a list item at `indent` closes this frame.
    fn closed_by_list_item(&self, indent: usize) -> bool {
        matches!(self.kind, FrameKind::List { indent: open } if open >= indent)
    }

    fn append_text(&mut self, text: &str) {
        if self.kind == FrameKind::Root {
            return;
        }
        self.title.push('\n');
        self.title.push_str(text);
    }

    fn add_child(&mut self, child: OutlineNode) {
        self.children.push(child);
    }

    fn build(self) -> OutlineNode {
        OutlineNode {
            id: self.id,
            title: self.title,
            depth: self.depth,
            parent: self.parent,
            children: self.children,
        }
    }
}

/// Pop the top frame and attach it to the frame beneath. The root is never popped.
fn close_top(stack: &mut Vec<NodeBuilder>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(builder) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.add_child(builder.build());
        }
    }
}

/// Parse outline lines into a forest of top-level nodes.
///
/// Headings and list items share one stack of open nodes with a virtual root at
/// the bottom. List frames always sit above the heading they belong to, so a new
/// heading closes every open list item before comparing heading levels, and a
/// list item only ever closes list frames.
pub fn parse<'a, I>(lines: I, ids: &mut dyn IdGenerator) -> Vec<OutlineNode>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stack: Vec<NodeBuilder> = vec![NodeBuilder::root()];

    for raw in lines {
        let Some(line) = classify_line(raw) else {
            continue;
        };

        match line {
            OutlineLine::Heading { level, text } => {
                while stack.last().is_some_and(|top| top.closed_by_heading(level)) {
                    close_top(&mut stack);
                }
                let Some(parent) = stack.last() else { break };
                let node =
                    NodeBuilder::child_of(parent, FrameKind::Heading, ids.next_id(), text, level);
                stack.push(node);
            }
            OutlineLine::ListItem { indent, text } => {
                while stack.last().is_some_and(|top| top.closed_by_list_item(indent)) {
                    close_top(&mut stack);
                }
                let Some(parent) = stack.last() else { break };
                let depth = parent.depth + 1;
                let node = NodeBuilder::child_of(
                    parent,
                    FrameKind::List { indent },
                    ids.next_id(),
                    text,
                    depth,
                );
                stack.push(node);
            }
            OutlineLine::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.append_text(&text);
                }
            }
        }
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }

    stack.pop().map(|root| root.children).unwrap_or_default()
}
