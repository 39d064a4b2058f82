//! Building a [`Program`] from the scope arguments.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use camino::Utf8PathBuf;
use ignore::WalkBuilder;
use pythia_syntax::{Parser, SupportedLanguage};
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::model::{Program, SourceFile};

/// Log target for program loading.
const LOADER_TARGET: &str = "pythia_oracle::loader";

/// Builds the program model from the files and directories named on the
/// command line.
pub trait ProgramLoader {
    /// Loads every source file reachable from `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if a scope argument cannot be read or if no source
    /// file is found.
    fn load(&self, scope: &[String]) -> Result<Program, LoadError>;
}

/// Loads source files from disk.
///
/// Directories are walked recursively, honouring `.gitignore` and `.ignore`
/// files and skipping hidden entries. Only files in a
/// [`SupportedLanguage`] are kept; files that are not valid UTF-8 are skipped
/// with a warning.
#[derive(Debug, Clone, Copy)]
pub struct FileSetLoader {
    respect_ignore_files: bool,
}

impl Default for FileSetLoader {
    fn default() -> Self {
        Self {
            respect_ignore_files: true,
        }
    }
}

impl FileSetLoader {
    /// Creates a loader that honours ignore files.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether `.gitignore` and `.ignore` files prune the walk.
    #[must_use]
    pub const fn with_ignore_files(mut self, respect: bool) -> Self {
        self.respect_ignore_files = respect;
        self
    }

    fn walk(&self, root: &Path) -> WalkBuilder {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(true)
            .ignore(self.respect_ignore_files)
            .git_ignore(self.respect_ignore_files)
            .git_exclude(self.respect_ignore_files)
            .git_global(false)
            .require_git(false);
        builder
    }

    fn collect_paths(&self, argument: &str) -> Result<Vec<Utf8PathBuf>, LoadError> {
        let root =
            std::fs::canonicalize(argument).map_err(|err| LoadError::root(argument, err))?;
        let mut paths = Vec::new();
        for entry in self.walk(&root).build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(target: LOADER_TARGET, root = %argument, error = %err, "skipping entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|kind| kind.is_file()) {
                continue;
            }
            if SupportedLanguage::from_path(entry.path()).is_none() {
                continue;
            }
            let path = Utf8PathBuf::from_path_buf(entry.into_path())
                .map_err(|path| LoadError::NonUtf8Path(path.display().to_string()))?;
            paths.push(path);
        }
        Ok(paths)
    }
}

impl ProgramLoader for FileSetLoader {
    fn load(&self, scope: &[String]) -> Result<Program, LoadError> {
        let mut parsers: HashMap<SupportedLanguage, Parser> = HashMap::new();
        let mut files = Vec::new();

        for argument in scope {
            for path in self.collect_paths(argument)? {
                let Some(language) = SupportedLanguage::from_path(path.as_std_path()) else {
                    continue;
                };
                let bytes = std::fs::read(&path).map_err(|err| LoadError::read(path.clone(), err))?;
                let Ok(text) = String::from_utf8(bytes) else {
                    warn!(target: LOADER_TARGET, path = %path, "skipping file that is not UTF-8");
                    continue;
                };
                let parser = match parsers.entry(language) {
                    Entry::Occupied(slot) => slot.into_mut(),
                    Entry::Vacant(slot) => {
                        slot.insert(Parser::new(language)?)
                    }
                };
                let parsed = parser.parse(text)?;
                if parsed.has_errors() {
                    debug!(target: LOADER_TARGET, path = %path, "file contains syntax errors");
                }
                files.push(SourceFile::new(path, parsed));
            }
        }

        if files.is_empty() {
            return Err(LoadError::EmptyScope);
        }
        let program = Program::new(files);
        debug!(target: LOADER_TARGET, files = program.len(), "program loaded");
        Ok(program)
    }
}
