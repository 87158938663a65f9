//! Syntax tree produced by a successful parse.
//!
//! Leaves are created when a terminal is shifted and carry the lexeme in
//! [`SyntaxNode::terminal`]; their `id` is the terminal's symbol id. Internal
//! nodes are created on reduction, are named after the rule's head symbol, and
//! use the rule id as their `id`. Each node owns its children, so dropping a
//! partially built tree on an error path releases everything below it.
//!
//! Left-recursive rules build trees as deep as the input is long, so cloning,
//! comparing and dropping walk the tree with an explicit stack.

use smartstring::alias::String;
use std::fmt;

#[derive(Debug)]
pub struct SyntaxNode {
    pub id: usize,
    pub name: String,
    pub line: usize,
    pub terminal: Option<String>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn leaf(id: usize, name: &str, line: usize, text: &str) -> Self {
        Self {
            id,
            name: name.into(),
            line,
            terminal: Some(text.into()),
            children: Vec::new(),
        }
    }

    pub fn branch(id: usize, name: &str, line: usize, children: Vec<SyntaxNode>) -> Self {
        Self {
            id,
            name: name.into(),
            line,
            terminal: None,
            children,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// Lexeme of a leaf.
    pub fn terminal(&self) -> Option<&str> {
        self.terminal.as_deref()
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    /// Pre-order traversal of this node and all its descendants.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// First node named `name` in pre-order.
    pub fn find(&self, name: &str) -> Option<&SyntaxNode> {
        self.iter().find(|n| n.name.as_str() == name)
    }

    /// Lexemes of all leaves, left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &str> {
        self.iter().filter_map(|n| n.terminal())
    }

    /// Indented, one-node-per-line rendering.
    pub fn display(&self) -> TreeDisplay<'_> {
        TreeDisplay(self)
    }
}

impl Clone for SyntaxNode {
    fn clone(&self) -> Self {
        // post-order: a node is rebuilt once all of its children are
        let mut pending = vec![(self, false)];
        let mut built: Vec<SyntaxNode> = Vec::new();
        while let Some((node, expanded)) = pending.pop() {
            if expanded {
                let children = built.split_off(built.len() - node.children.len());
                built.push(SyntaxNode {
                    id: node.id,
                    name: node.name.clone(),
                    line: node.line,
                    terminal: node.terminal.clone(),
                    children,
                });
            } else {
                pending.push((node, true));
                pending.extend(node.children.iter().rev().map(|c| (c, false)));
            }
        }
        match built.pop() {
            Some(root) => root,
            None => unreachable!("clone always rebuilds the root"),
        }
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.id != b.id
                || a.line != b.line
                || a.name != b.name
                || a.terminal != b.terminal
                || a.children.len() != b.children.len()
            {
                return false;
            }
            pending.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Eq for SyntaxNode {}

impl Drop for SyntaxNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

pub struct Preorder<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

pub struct TreeDisplay<'a>(&'a SyntaxNode);

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.0, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            write!(f, "{:indent$}", "", indent = depth * 2)?;
            match node.terminal() {
                Some(text) => writeln!(f, "{} {:?} @{}", node.name, text, node.line)?,
                None => writeln!(f, "<{}> @{}", node.name, node.line)?,
            }
            stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
        }
        Ok(())
    }
}
