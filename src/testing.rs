//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::path::Path;

use git2::{Repository, Signature};

use crate::error::{AppError, Result};
use crate::git::{CommandOutput, CommandRunner, CommandSpec};

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

type Handler = Box<dyn Fn(&CommandSpec) -> CommandOutput>;

/// `CommandRunner` that answers from a closure and records every invocation.
pub struct ScriptedRunner {
    handler: Handler,
    calls: RefCell<Vec<CommandSpec>>,
    missing_tools: Vec<String>,
}

impl ScriptedRunner {
    pub fn new(handler: impl Fn(&CommandSpec) -> CommandOutput + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            calls: RefCell::new(Vec::new()),
            missing_tools: Vec::new(),
        }
    }

    pub fn without_tool(mut self, tool: &str) -> Self {
        self.missing_tools.push(tool.to_string());
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, subcommand: &str) -> Vec<CommandSpec> {
        self.calls()
            .into_iter()
            .filter(|c| c.subcommand() == Some(subcommand))
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(spec.clone());
        Ok((self.handler)(spec))
    }

    fn assert_available(&self, tool: &str) -> Result<()> {
        if self.missing_tools.iter().any(|t| t == tool) {
            return Err(AppError::ToolNotFound(tool.to_string()));
        }
        Ok(())
    }
}

/// Create a repository at `dir` with one commit containing `files`.
pub fn init_repo_with_files(dir: &Path, files: &[(&str, &str)]) -> Repository {
    let repo = Repository::init(dir).expect("init repository");
    for (path, content) in files {
        let full = dir.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&full, content).expect("write fixture file");
    }

    {
        let mut index = repo.index().expect("open index");
        for (path, _) in files {
            index.add_path(Path::new(path)).expect("stage file");
        }
        index.write().expect("write index");
        let tree_id = index.write_tree().expect("write tree");
        let tree = repo.find_tree(tree_id).expect("find tree");
        let sig = Signature::now("tester", "tester@example.com").expect("signature");
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .expect("commit");
    }

    repo
}
