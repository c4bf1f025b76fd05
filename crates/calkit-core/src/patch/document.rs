//! Parsed config documents, text edits, and quote-style detection

use std::ops::Range;
use std::path::{Path, PathBuf};

use tree_sitter::{Language, Node, Parser, Tree};

use super::PatchError;

/// Preferred quote character for string literals in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    Single,
    Double,
}

impl QuoteStyle {
    pub fn char(&self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }

    /// Wrap a value in this quote style
    pub fn quote(&self, value: &str) -> String {
        format!("{q}{value}{q}", q = self.char())
    }
}

/// A single text replacement planned against a document's source.
/// An empty replaced range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub text: String,
}

impl Edit {
    pub fn insert(at: usize, text: String) -> Self {
        Self { range: at..at, text }
    }

    pub fn replace(range: Range<usize>, text: String) -> Self {
        Self { range, text }
    }
}

/// In-memory parse of a user-authored config file.
///
/// Mutation is a byte-range splice against the original source text,
/// so everything outside the touched region survives a round-trip
/// byte-for-byte. The file is only touched again by [`save`].
///
/// [`save`]: ConfigDocument::save
pub struct ConfigDocument {
    path: PathBuf,
    source: String,
    tree: Tree,
}

impl ConfigDocument {
    /// Read and parse the file at `path`
    pub fn load(path: &Path) -> Result<Self, PatchError> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(path.to_path_buf(), source)
    }

    /// Parse already-read source text
    pub fn parse(path: PathBuf, source: String) -> Result<Self, PatchError> {
        let tree = parse_source(&source).ok_or_else(|| PatchError::Parse { path: path.clone() })?;
        Ok(Self { path, source, tree })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`
    pub fn text_of(&self, node: Node<'_>) -> &str {
        &self.source[node.byte_range()]
    }

    /// Splice `edit` into the source and re-parse
    pub fn apply(&mut self, edit: Edit) -> Result<(), PatchError> {
        self.source.replace_range(edit.range, &edit.text);
        self.tree = parse_source(&self.source).ok_or_else(|| PatchError::Parse {
            path: self.path.clone(),
        })?;
        Ok(())
    }

    /// Write the source back over the original file, in place.
    /// No backup is taken; the patch operations are repeat-safe.
    pub fn save(&self) -> Result<(), PatchError> {
        std::fs::write(&self.path, &self.source)?;
        Ok(())
    }
}

fn parse_source(source: &str) -> Option<Tree> {
    let language: Language = tree_sitter_javascript::LANGUAGE.into();
    let mut parser = Parser::new();
    parser.set_language(&language).ok()?;
    parser.parse(source, None)
}

/// Every node under `root` in depth-first document order
pub(crate) fn walk_preorder(root: Node<'_>) -> Vec<Node<'_>> {
    let mut nodes = Vec::new();
    let mut cursor = root.walk();
    'outer: loop {
        nodes.push(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                break 'outer;
            }
        }
    }
    nodes
}

/// Report whether the document leans single- or double-quoted, from
/// the first string literal in document order. A document without any
/// string literal defaults to double quotes.
pub fn detect_quote_style(doc: &ConfigDocument) -> QuoteStyle {
    for node in walk_preorder(doc.root()) {
        if node.kind() == "string" {
            if doc.text_of(node).starts_with('\'') {
                return QuoteStyle::Single;
            }
            return QuoteStyle::Double;
        }
    }
    QuoteStyle::Double
}
