//! Tree-sitter powered syntax layer for the Pythia query server.
//!
//! This crate turns source files into syntax trees and answers the purely
//! structural questions the oracle asks of them:
//!
//! - which language a file is written in ([`SupportedLanguage`])
//! - which names a file declares ([`ParsedSource::declarations`])
//! - which identifier sits under a selection ([`ParsedSource::identifier_at`])
//! - which constructs enclose a selection ([`ParsedSource::enclosing_nodes`])
//!
//! # Supported Languages
//!
//! - Go (`.go`)
//! - Rust (`.rs`)
//! - Python (`.py`, `.pyi`)
//! - TypeScript (`.ts`, `.tsx`, `.mts`, `.cts`)
//!
//! # Example
//!
//! ```
//! use pythia_syntax::{Parser, SupportedLanguage};
//!
//! let mut parser = Parser::new(SupportedLanguage::Go)?;
//! let parsed = parser.parse("package main\n\nfunc main() {}\n")?;
//! let names: Vec<_> = parsed.declarations().into_iter().map(|d| d.name).collect();
//! assert_eq!(names, ["main"]);
//! # Ok::<(), pythia_syntax::SyntaxError>(())
//! ```

mod error;
mod language;
mod parser;
mod position;
mod symbols;

pub use error::SyntaxError;
pub use language::{LanguageParseError, SupportedLanguage};
pub use parser::{ParsedSource, Parser, SyntaxErrorInfo};
pub use position::SourceRange;
pub use symbols::{Declaration, Identifier, NodeSummary};
