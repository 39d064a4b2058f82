//! Program model and analysis engine for the Pythia query server.
//!
//! The server treats analysis as a collaborator behind two traits:
//!
//! - [`ProgramLoader`] builds a [`Program`] from the scope arguments once at
//!   start-up ([`FileSetLoader`] reads them from disk)
//! - [`Oracle`] resolves raw positions against the program and answers
//!   queries with a [`QueryResult`] ([`SyntaxOracle`] answers them from
//!   Tree-sitter trees)
//!
//! Results render either as JSON through [`QueryResult::serial`] or as
//! linkable plain text through [`QueryResult::write_plain`].

mod error;
mod loader;
mod model;
mod oracle;
mod query;
mod results;

pub use error::{LoadError, OracleError};
pub use loader::{FileSetLoader, ProgramLoader};
pub use model::{FileId, Program, SourceFile};
pub use oracle::{DEFINITION, DESCRIBE, Oracle, REFERRERS, SyntaxOracle};
pub use query::{QueryMode, ResolvedPos, SourceSpan};
pub use results::{
    DefinitionSite, Definitions, Description, EnclosingNode, FileSummary, Location, QueryResult,
    Referrers, ScopeSummary,
};
