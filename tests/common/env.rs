//! Test environment builder for isolated CLI testing.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fixtures::OFFLINE_CONFIG;

/// Result of running a CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn json_events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).expect("stdout line is JSON"))
            .collect()
    }
}

/// Isolated project directory with a `components.toml`
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Read a project file, panicking if it is missing
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative))
            .unwrap_or_else(|e| panic!("cannot read {relative}: {e}"))
    }

    pub fn write(&self, relative: &str, content: &str) {
        write_file(&self.project_path(relative), content);
    }

    /// Run the CLI from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.project_root.path(), args)
    }

    /// Run the CLI from a specific directory
    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let output = Command::new(&self.bin)
            .current_dir(cwd)
            .args(args)
            .env("XDG_CONFIG_HOME", self.project_root.path().join(".config"))
            .env_remove("RUST_LOG")
            .env_remove("SHOPIFY_COMPONENTS_SRC_DIR")
            .env_remove("SHOPIFY_COMPONENTS_OUTPUT_DIR")
            .env_remove("SHOPIFY_COMPONENTS_ASSETS_DIR")
            .env_remove("SHOPIFY_COMPONENTS_WATCH")
            .output()
            .expect("Failed to execute shopify-components");
        output_to_result(output)
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

pub struct TestEnvBuilder {
    config: Option<String>,
    files: Vec<(String, String)>,
}

impl TestEnvBuilder {
    fn new() -> Self {
        Self {
            config: Some(OFFLINE_CONFIG.to_string()),
            files: Vec::new(),
        }
    }

    /// Replace the default offline `components.toml`
    pub fn with_config(mut self, content: &str) -> Self {
        self.config = Some(content.to_string());
        self
    }

    /// Add a file under the project root
    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> TestEnv {
        let project_root = tempfile::tempdir().unwrap();
        if let Some(config) = &self.config {
            write_file(&project_root.path().join("components.toml"), config);
        }
        for (relative, content) in &self.files {
            write_file(&project_root.path().join(relative), content);
        }
        TestEnv {
            project_root,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_shopify-components")),
        }
    }
}
