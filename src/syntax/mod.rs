//! Source parsing
//!
//! Resolver modules are TypeScript in practice, but plain JavaScript modules
//! follow the same export conventions. Each file is parsed with the
//! Tree-sitter grammar matching its extension.

pub mod shape;

use crate::{Error, Result};
use std::path::Path;
use tree_sitter::{Language, Node, Parser, Tree};

/// Grammar used to parse a resolver file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    TypeScript,
    Tsx,
    JavaScript,
}

impl SourceLanguage {
    /// Pick a grammar from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            "js" | "jsx" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            _ => None,
        }
    }

    /// Pick a grammar for a path, if its extension is supported
    pub fn for_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceLanguage::TypeScript => "TypeScript",
            SourceLanguage::Tsx => "TSX",
            SourceLanguage::JavaScript => "JavaScript",
        }
    }

    fn grammar(&self) -> Language {
        match self {
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            SourceLanguage::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

/// Parse source text into a syntax tree
pub fn parse(language: SourceLanguage, content: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.grammar())
        .map_err(|e| Error::Parse(format!("Failed to set {} language: {}", language.name(), e)))?;

    parser
        .parse(content, None)
        .ok_or_else(|| Error::Parse(format!("{} parser returned no tree", language.name())))
}

/// Named children of a node, skipping comments
pub(crate) fn statements<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Source text of a node
pub(crate) fn text<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_extension() {
        assert_eq!(SourceLanguage::from_extension("ts"), Some(SourceLanguage::TypeScript));
        assert_eq!(SourceLanguage::from_extension("tsx"), Some(SourceLanguage::Tsx));
        assert_eq!(SourceLanguage::from_extension("mjs"), Some(SourceLanguage::JavaScript));
        assert_eq!(SourceLanguage::from_extension("md"), None);
        assert_eq!(SourceLanguage::for_path(Path::new("queries/agent.ts")), Some(SourceLanguage::TypeScript));
        assert_eq!(SourceLanguage::for_path(Path::new("README")), None);
    }

    #[test]
    fn test_parse_typescript() {
        let tree = parse(
            SourceLanguage::TypeScript,
            "const x: number = 1\nexport default (cfg: Config) => { return { x } }\n",
        )
        .expect("Failed to parse");

        let root = tree.root_node();
        assert_eq!(root.kind(), "program");
        assert!(!root.has_error());
        assert_eq!(statements(root).len(), 2);
    }

    #[test]
    fn test_statements_skip_comments() {
        let source = "// leading\nconst a = 1\n/* block */\nconst b = 2\n";
        let tree = parse(SourceLanguage::JavaScript, source).expect("Failed to parse");

        let kinds: Vec<_> = statements(tree.root_node()).iter().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec!["lexical_declaration", "lexical_declaration"]);
    }
}
