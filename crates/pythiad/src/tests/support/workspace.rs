//! A small Go program on disk.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub const GREET_GO: &str = "package main\n\nfunc greet(name string) string {\n\treturn name\n}\n";
pub const MAIN_GO: &str = "package main\n\nfunc main() {\n\tgreet(\"x\")\n}\n";

/// Temporary directory holding `greet.go` and `main.go`.
pub struct GoWorkspace {
    _dir: TempDir,
    root: PathBuf,
}

impl GoWorkspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create workspace");
        fs::write(dir.path().join("greet.go"), GREET_GO).expect("write greet.go");
        fs::write(dir.path().join("main.go"), MAIN_GO).expect("write main.go");
        let root = dir.path().canonicalize().expect("canonical workspace root");
        Self { _dir: dir, root }
    }

    /// Scope argument naming the whole workspace.
    pub fn root_arg(&self) -> String {
        self.root.to_str().expect("utf-8 workspace path").to_owned()
    }

    /// Absolute path of a file in the workspace.
    pub fn path_of(&self, name: &str) -> String {
        self.root
            .join(name)
            .to_str()
            .expect("utf-8 file path")
            .to_owned()
    }

    /// Position string covering the first occurrence of `needle` in `name`.
    pub fn pos_of(&self, name: &str, needle: &str) -> String {
        let content = fs::read_to_string(self.root.join(name)).expect("read workspace file");
        let start = content.find(needle).expect("needle present");
        format!("{}:#{start},#{}", self.path_of(name), start + needle.len())
    }
}
