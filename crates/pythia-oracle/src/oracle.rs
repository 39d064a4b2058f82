//! The [`Oracle`] engine abstraction and its Tree-sitter implementation.

use pythia_syntax::Identifier;

use crate::error::OracleError;
use crate::model::{Program, SourceFile};
use crate::query::{QueryMode, ResolvedPos, SourceSpan};
use crate::results::{
    DefinitionSite, Definitions, Description, EnclosingNode, FileSummary, Location, QueryResult,
    Referrers, ScopeSummary,
};

/// An analysis engine answering queries about a loaded program.
///
/// Implementations are not required to be reentrant: callers serialise
/// access, which is why the query methods take `&mut self`.
pub trait Oracle: Send {
    /// Maps a raw span onto the program.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Resolution`] if the file is not part of the
    /// program or the span does not fit inside it.
    fn resolve(&self, span: &SourceSpan) -> Result<ResolvedPos, OracleError>;

    /// Runs a position-scoped query.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::InvalidMode`] for unknown modes and
    /// [`OracleError::Analysis`] when the position does not support the
    /// query.
    fn query(
        &mut self,
        mode: &QueryMode,
        pos: &ResolvedPos,
    ) -> Result<Box<dyn QueryResult>, OracleError>;

    /// Runs a query about the program as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::InvalidMode`] if the mode needs a position.
    fn query_scope(
        &mut self,
        mode: &QueryMode,
        scope: &[String],
    ) -> Result<Box<dyn QueryResult>, OracleError>;
}

impl<O> Oracle for Box<O>
where
    O: Oracle + ?Sized,
{
    fn resolve(&self, span: &SourceSpan) -> Result<ResolvedPos, OracleError> {
        (**self).resolve(span)
    }

    fn query(
        &mut self,
        mode: &QueryMode,
        pos: &ResolvedPos,
    ) -> Result<Box<dyn QueryResult>, OracleError> {
        (**self).query(mode, pos)
    }

    fn query_scope(
        &mut self,
        mode: &QueryMode,
        scope: &[String],
    ) -> Result<Box<dyn QueryResult>, OracleError> {
        (**self).query_scope(mode, scope)
    }
}

/// Describes the syntax node under the position.
pub const DESCRIBE: &str = "describe";
/// Lists declarations named like the identifier at the position.
pub const DEFINITION: &str = "definition";
/// Lists every occurrence of the identifier at the position.
pub const REFERRERS: &str = "referrers";

/// Oracle answering purely syntactic queries over Tree-sitter trees.
#[derive(Debug, Clone)]
pub struct SyntaxOracle {
    program: Program,
}

impl SyntaxOracle {
    /// Wraps a loaded program.
    #[must_use]
    pub const fn new(program: Program) -> Self {
        Self { program }
    }

    /// The program being queried.
    #[must_use]
    pub const fn program(&self) -> &Program {
        &self.program
    }

    fn file(&self, pos: &ResolvedPos) -> Result<&SourceFile, OracleError> {
        self.program
            .file(pos.file())
            .ok_or_else(|| OracleError::resolution("position refers to an unknown file"))
    }

    fn identifier(&self, pos: &ResolvedPos) -> Result<Identifier, OracleError> {
        let file = self.file(pos)?;
        file.parsed().identifier_at(pos.bytes()).ok_or_else(|| {
            OracleError::analysis(format!("no identifier here: {}", span_of(file, pos)))
        })
    }

    fn describe(&self, mode: &QueryMode, pos: &ResolvedPos) -> Result<Description, OracleError> {
        let file = self.file(pos)?;
        let path = file.path().as_str();
        let mut nodes = file.parsed().enclosing_nodes(pos.bytes()).into_iter();
        let innermost = nodes
            .next()
            .ok_or_else(|| OracleError::analysis("no syntax node encloses the selection"))?;
        let identifier = file
            .parsed()
            .identifier_at(pos.bytes())
            .map(|found| found.name);

        Ok(Description {
            mode: mode.to_string(),
            pos: Location::new(path, innermost.range),
            kind: innermost.kind.to_owned(),
            identifier,
            enclosing: nodes
                .map(|node| EnclosingNode {
                    pos: Location::new(path, node.range),
                    kind: node.kind.to_owned(),
                })
                .collect(),
        })
    }

    fn definition(&self, mode: &QueryMode, pos: &ResolvedPos) -> Result<Definitions, OracleError> {
        let identifier = self.identifier(pos)?;
        let definitions: Vec<_> = self
            .program
            .files()
            .flat_map(|(_, file)| {
                file.parsed()
                    .declarations()
                    .into_iter()
                    .filter(|decl| decl.name == identifier.name)
                    .map(|decl| DefinitionSite {
                        pos: Location::new(file.path().as_str(), decl.name_range),
                        kind: decl.kind.to_owned(),
                    })
            })
            .collect();
        if definitions.is_empty() {
            return Err(OracleError::analysis(format!(
                "no declaration of {} in the loaded program",
                identifier.name
            )));
        }
        Ok(Definitions {
            mode: mode.to_string(),
            name: identifier.name,
            definitions,
        })
    }

    fn referrers(&self, mode: &QueryMode, pos: &ResolvedPos) -> Result<Referrers, OracleError> {
        let identifier = self.identifier(pos)?;
        let refs = self
            .program
            .files()
            .flat_map(|(_, file)| {
                file.parsed()
                    .identifiers_named(&identifier.name)
                    .into_iter()
                    .map(|found| Location::new(file.path().as_str(), found.range))
            })
            .collect();
        Ok(Referrers {
            mode: mode.to_string(),
            name: identifier.name,
            refs,
        })
    }

    fn summary(&self, mode: &QueryMode, scope: &[String]) -> ScopeSummary {
        ScopeSummary {
            mode: mode.to_string(),
            scope: scope.to_vec(),
            files: self
                .program
                .files()
                .map(|(_, file)| FileSummary {
                    path: file.path().as_str().to_owned(),
                    language: file.language().to_string(),
                    declarations: file.parsed().declarations().len(),
                    syntax_errors: file.parsed().errors().len(),
                })
                .collect(),
        }
    }
}

fn span_of(file: &SourceFile, pos: &ResolvedPos) -> SourceSpan {
    let bytes = pos.bytes();
    SourceSpan::new(file.path().as_str(), bytes.start, bytes.end)
}

impl Oracle for SyntaxOracle {
    fn resolve(&self, span: &SourceSpan) -> Result<ResolvedPos, OracleError> {
        let id = self.program.lookup(&span.path).ok_or_else(|| {
            OracleError::resolution(format!("no file {} in the loaded program", span.path))
        })?;
        let text = self
            .program
            .file(id)
            .map(SourceFile::text)
            .unwrap_or_default();
        for offset in [span.start, span.end] {
            if offset > text.len() {
                return Err(OracleError::resolution(format!(
                    "offset {offset} is beyond the end of {} ({} bytes)",
                    span.path,
                    text.len()
                )));
            }
            if !text.is_char_boundary(offset) {
                return Err(OracleError::resolution(format!(
                    "offset {offset} splits a character in {}",
                    span.path
                )));
            }
        }
        if span.end < span.start {
            return Err(OracleError::resolution(format!(
                "span end precedes its start: {span}"
            )));
        }
        Ok(ResolvedPos::new(id, span.start, span.end))
    }

    fn query(
        &mut self,
        mode: &QueryMode,
        pos: &ResolvedPos,
    ) -> Result<Box<dyn QueryResult>, OracleError> {
        match mode.as_str() {
            DESCRIBE => Ok(Box::new(self.describe(mode, pos)?)),
            DEFINITION => Ok(Box::new(self.definition(mode, pos)?)),
            REFERRERS => Ok(Box::new(self.referrers(mode, pos)?)),
            other => Err(OracleError::invalid_mode(other)),
        }
    }

    fn query_scope(
        &mut self,
        mode: &QueryMode,
        scope: &[String],
    ) -> Result<Box<dyn QueryResult>, OracleError> {
        if mode.is_scope_summary() {
            Ok(Box::new(self.summary(mode, scope)))
        } else {
            Err(OracleError::invalid_mode(mode.as_str()))
        }
    }
}
