//! Tree-sitter parsing wrapper with error recovery.
//!
//! [`Parser`] binds a Tree-sitter parser to one [`SupportedLanguage`] and
//! produces [`ParsedSource`] values that keep the tree and its text together,
//! so byte ranges taken from the tree can always be read back.

use std::ops::Range;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::position::point_to_one_based;
use crate::symbols::{self, Declaration, Identifier, NodeSummary};

/// A parsed source file.
///
/// Tree-sitter is error-tolerant, so a parsed source may contain both a
/// usable tree and error nodes.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    tree: tree_sitter::Tree,
    source: String,
    language: SupportedLanguage,
}

impl ParsedSource {
    /// Returns the parsed syntax tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the text that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the language of the parsed text.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns the root node of the syntax tree.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Whether the tree contains ERROR or MISSING nodes.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Collects every syntax error in source order.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let mut errors = Vec::new();
        collect_error_nodes(self.tree.root_node(), &self.source, &mut errors);
        errors
    }

    /// Named declarations in source order.
    #[must_use]
    pub fn declarations(&self) -> Vec<Declaration> {
        symbols::declarations(self)
    }

    /// Every identifier token spelled `name`, in source order.
    #[must_use]
    pub fn identifiers_named(&self, name: &str) -> Vec<Identifier> {
        symbols::identifiers_named(self, name)
    }

    /// The identifier token covering `bytes`, if any.
    ///
    /// An empty range sitting just past an identifier also selects it, so a
    /// caret placed at the end of a word finds the word.
    #[must_use]
    pub fn identifier_at(&self, bytes: Range<usize>) -> Option<Identifier> {
        symbols::identifier_at(self, bytes)
    }

    /// Nodes enclosing `bytes`, innermost first, ending at the root.
    #[must_use]
    pub fn enclosing_nodes(&self, bytes: Range<usize>) -> Vec<NodeSummary> {
        symbols::enclosing_nodes(self, bytes)
    }

    /// Text covered by `node`, or an empty string if the node does not fall on
    /// character boundaries.
    #[must_use]
    pub fn text_of(&self, node: tree_sitter::Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }
}

/// A syntax error found during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Byte range of the error in the source.
    pub byte_range: Range<usize>,
    /// Line number (one-based) where the error starts.
    pub line: u32,
    /// Column number (one-based) where the error starts.
    pub column: u32,
    /// Human-readable description of the error.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let byte_range = node.byte_range();
        let (line, column) = point_to_one_based(node.start_position());
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            let snippet = source
                .get(byte_range.clone())
                .map(|text| text.chars().take(32).collect::<String>())
                .unwrap_or_default();
            format!("unexpected {snippet:?}")
        };
        Self {
            byte_range,
            line,
            column,
            message,
        }
    }
}

/// Tree-sitter parser configured for a single language.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl Parser {
    /// Creates a parser for the given language.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be installed.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.tree_sitter_language())
            .map_err(|e| SyntaxError::parser_init(language, e.to_string()))?;

        Ok(Self { inner, language })
    }

    /// Returns the language this parser is configured for.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Parses `source`.
    ///
    /// Syntax errors do not fail the parse; check
    /// [`ParsedSource::has_errors`] instead.
    ///
    /// # Errors
    ///
    /// Returns an error if Tree-sitter produces no tree at all.
    pub fn parse(&mut self, source: impl Into<String>) -> Result<ParsedSource, SyntaxError> {
        let source = source.into();
        let tree = self
            .inner
            .parse(source.as_bytes(), None)
            .ok_or_else(|| SyntaxError::parse(self.language, "parser produced no tree"))?;

        Ok(ParsedSource {
            tree,
            source,
            language: self.language,
        })
    }
}

fn collect_error_nodes(
    node: tree_sitter::Node<'_>,
    source: &str,
    errors: &mut Vec<SyntaxErrorInfo>,
) {
    if node.is_error() || node.is_missing() {
        errors.push(SyntaxErrorInfo::from_node(node, source));
        return;
    }
    if !node.has_error() {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, source, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SupportedLanguage::Go, "package main\n\nfunc main() {}\n")]
    #[case(SupportedLanguage::Rust, "fn main() {}")]
    #[case(SupportedLanguage::Python, "def hello():\n    pass")]
    #[case(
        SupportedLanguage::TypeScript,
        "function hello(): string { return 'hi'; }"
    )]
    fn parser_parses_valid_source(#[case] language: SupportedLanguage, #[case] source: &str) {
        let mut parser = Parser::new(language).expect("parser init");
        let parsed = parser.parse(source).expect("parse");

        assert!(!parsed.has_errors());
        assert_eq!(parsed.language(), language);
        assert_eq!(parsed.source(), source);
    }

    #[rstest]
    #[case(SupportedLanguage::Go, "package main\nfunc broken( {")]
    #[case(SupportedLanguage::Rust, "fn broken() {")]
    #[case(SupportedLanguage::Python, "def broken(")]
    fn parser_reports_syntax_errors(#[case] language: SupportedLanguage, #[case] source: &str) {
        let mut parser = Parser::new(language).expect("parser init");
        let parsed = parser.parse(source).expect("parse");

        assert!(parsed.has_errors());
        let errors = parsed.errors();
        let first = errors.first().expect("at least one error");
        assert!(first.line >= 1);
        assert!(first.column >= 1);
    }
}
