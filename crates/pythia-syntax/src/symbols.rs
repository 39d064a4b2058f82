//! Identifier and declaration extraction.
//!
//! These are purely syntactic: a declaration is any node whose kind the
//! language lists in [`SupportedLanguage::declaration_kinds`], and an
//! identifier is any leaf token whose kind names an identifier.
//!
//! [`SupportedLanguage::declaration_kinds`]: crate::SupportedLanguage::declaration_kinds

use std::ops::Range;

use crate::parser::ParsedSource;
use crate::position::SourceRange;

/// A named declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declared name.
    pub name: String,
    /// Node kind of the declaring construct, e.g. `function_declaration`.
    pub kind: &'static str,
    /// Byte range of the name token.
    pub name_bytes: Range<usize>,
    /// Location of the name token.
    pub name_range: SourceRange,
    /// Location of the whole declaring construct.
    pub range: SourceRange,
}

/// An identifier token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Token text.
    pub name: String,
    /// Token kind, e.g. `identifier` or `field_identifier`.
    pub kind: &'static str,
    /// Byte range of the token.
    pub bytes: Range<usize>,
    /// Location of the token.
    pub range: SourceRange,
}

/// Kind and location of a syntax node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    /// Node kind.
    pub kind: &'static str,
    /// Byte range of the node.
    pub bytes: Range<usize>,
    /// Location of the node.
    pub range: SourceRange,
}

fn is_identifier(node: tree_sitter::Node<'_>) -> bool {
    let kind = node.kind();
    node.is_named()
        && node.child_count() == 0
        && (kind == "identifier" || kind.ends_with("_identifier"))
}

fn identifier(parsed: &ParsedSource, node: tree_sitter::Node<'_>) -> Identifier {
    Identifier {
        name: parsed.text_of(node).to_owned(),
        kind: node.kind(),
        bytes: node.byte_range(),
        range: SourceRange::of_node(node),
    }
}

/// Visits every node in pre-order.
fn walk<'tree>(root: tree_sitter::Node<'tree>, mut visit: impl FnMut(tree_sitter::Node<'tree>)) {
    let mut cursor = root.walk();
    loop {
        visit(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

pub(crate) fn declarations(parsed: &ParsedSource) -> Vec<Declaration> {
    let kinds = parsed.language().declaration_kinds();
    let mut found = Vec::new();
    walk(parsed.root_node(), |node| {
        if !kinds.contains(&node.kind()) {
            return;
        }
        let mut cursor = node.walk();
        for name in node.children_by_field_name("name", &mut cursor) {
            if !is_identifier(name) {
                continue;
            }
            found.push(Declaration {
                name: parsed.text_of(name).to_owned(),
                kind: node.kind(),
                name_bytes: name.byte_range(),
                name_range: SourceRange::of_node(name),
                range: SourceRange::of_node(node),
            });
        }
    });
    found
}

pub(crate) fn identifiers_named(parsed: &ParsedSource, name: &str) -> Vec<Identifier> {
    let mut found = Vec::new();
    walk(parsed.root_node(), |node| {
        if is_identifier(node) && parsed.text_of(node) == name {
            found.push(identifier(parsed, node));
        }
    });
    found
}

pub(crate) fn identifier_at(parsed: &ParsedSource, bytes: Range<usize>) -> Option<Identifier> {
    let root = parsed.root_node();
    let covering = root
        .descendant_for_byte_range(bytes.start, bytes.end)
        .filter(|node| is_identifier(*node));
    let node = match covering {
        Some(node) => Some(node),
        None if bytes.is_empty() && bytes.start > 0 => {
            let before = bytes.start - 1;
            root.descendant_for_byte_range(before, before)
                .filter(|node| is_identifier(*node) && node.end_byte() == bytes.start)
        }
        None => None,
    };
    node.map(|found| identifier(parsed, found))
}

pub(crate) fn enclosing_nodes(parsed: &ParsedSource, bytes: Range<usize>) -> Vec<NodeSummary> {
    let mut path = Vec::new();
    let mut current = parsed
        .root_node()
        .descendant_for_byte_range(bytes.start, bytes.end);
    while let Some(node) = current {
        if node.is_named() {
            path.push(NodeSummary {
                kind: node.kind(),
                bytes: node.byte_range(),
                range: SourceRange::of_node(node),
            });
        }
        current = node.parent();
    }
    path
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use crate::{Parser, SupportedLanguage};

    use super::*;

    const GO_SOURCE: &str = "package main\n\ntype Greeter struct{}\n\nfunc greet(name string) string {\n\treturn name\n}\n\nfunc main() {\n\tgreet(\"x\")\n}\n";

    #[fixture]
    fn go_program() -> ParsedSource {
        Parser::new(SupportedLanguage::Go)
            .expect("parser init")
            .parse(GO_SOURCE)
            .expect("parse")
    }

    #[rstest]
    fn declarations_are_listed_in_source_order(go_program: ParsedSource) {
        let names: Vec<_> = go_program
            .declarations()
            .into_iter()
            .map(|decl| (decl.name, decl.kind))
            .collect();
        assert_eq!(
            names,
            [
                ("Greeter".to_owned(), "type_spec"),
                ("greet".to_owned(), "function_declaration"),
                ("main".to_owned(), "function_declaration"),
            ]
        );
    }

    #[rstest]
    fn identifiers_named_finds_every_use(go_program: ParsedSource) {
        let uses = go_program.identifiers_named("greet");
        assert_eq!(uses.len(), 2);
        let lines: Vec<_> = uses.iter().map(|id| id.range.start_line).collect();
        assert_eq!(lines, [5, 10]);
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(5)]
    fn identifier_at_accepts_positions_within_or_after_a_word(
        go_program: ParsedSource,
        #[case] offset: usize,
    ) {
        let start = GO_SOURCE.find("greet(name").expect("declaration present");
        let at = start + offset;
        let found = go_program
            .identifier_at(at..at)
            .expect("identifier at offset");
        assert_eq!(found.name, "greet");
        assert_eq!(found.bytes, start..start + 5);
    }

    #[rstest]
    fn identifier_at_rejects_punctuation(go_program: ParsedSource) {
        let brace = GO_SOURCE.find("{}").expect("brace present");
        assert_eq!(go_program.identifier_at(brace + 1..brace + 2), None);
    }

    #[rstest]
    fn enclosing_nodes_run_from_innermost_to_root(go_program: ParsedSource) {
        let at = GO_SOURCE.find("return name").expect("return present");
        let path = go_program.enclosing_nodes(at..at + 6);
        let kinds: Vec<_> = path.iter().map(|node| node.kind).collect();
        assert_eq!(kinds.first(), Some(&"return_statement"));
        assert!(kinds.contains(&"function_declaration"));
        assert_eq!(kinds.last(), Some(&"source_file"));
    }

    #[test]
    fn rust_declarations_use_item_kinds() {
        let parsed = Parser::new(SupportedLanguage::Rust)
            .expect("parser init")
            .parse("struct Point;\nfn origin() -> Point { Point }\n")
            .expect("parse");
        let names: Vec<_> = parsed
            .declarations()
            .into_iter()
            .map(|decl| decl.name)
            .collect();
        assert_eq!(names, ["Point", "origin"]);
    }
}
