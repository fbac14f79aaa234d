//! Test environment for isolated classprep runs.
//!
//! `TestEnv` owns a temporary project directory (the binary's working
//! directory) and a separate tools directory holding fake `javac` and
//! `jmod` scripts. The binary runs with PATH set to the tools directory
//! only, so a real JDK on the host never leaks into a test.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use super::fixtures::{FAKE_JAVAC, FAKE_JMOD};

/// Result of running the classprep binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated project plus fake toolchain.
pub struct TestEnv {
    /// Working directory for the binary
    pub project_root: TempDir,
    /// Directory placed on PATH
    pub tools_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    /// Project with fake `javac` and `jmod` available.
    pub fn new() -> Self {
        let env = Self::bare();
        env.install_tool("javac", FAKE_JAVAC);
        env.install_tool("jmod", FAKE_JMOD);
        env
    }

    /// Project with an empty PATH directory; install tools explicitly.
    pub fn bare() -> Self {
        Self {
            project_root: TempDir::new().expect("Failed to create project dir"),
            tools_dir: TempDir::new().expect("Failed to create tools dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_classprep")),
        }
    }

    pub fn install_tool(&self, name: &str, script: &str) {
        let path = self.tools_dir.path().join(name);
        std::fs::write(&path, script).expect("Failed to write fake tool");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake tool executable");
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Write a file under the project root, creating parents.
    pub fn write_project_file(&self, relative: &str, content: &str) {
        let full_path = self.project_path(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Create `jdk/jmods` under the project and return the `jdk` path.
    pub fn java_home(&self) -> PathBuf {
        let home = self.project_path("jdk");
        std::fs::create_dir_all(home.join("jmods")).expect("Failed to create jmods dir");
        home
    }

    /// Fake jmod archive listing the given class paths.
    pub fn write_jmod(&self, module: &str, class_paths: &[&str]) {
        let home = self.java_home();
        let mut content = String::new();
        for path in class_paths {
            content.push_str(path);
            content.push('\n');
        }
        std::fs::write(home.join("jmods").join(format!("{}.jmod", module)), content)
            .expect("Failed to write fake jmod");
    }

    /// Log of every fake tool invocation.
    pub fn tool_log(&self) -> String {
        std::fs::read_to_string(self.log_path()).unwrap_or_default()
    }

    /// Extraction directories the fake jmod was asked to fill.
    pub fn jmod_dirs(&self) -> Vec<PathBuf> {
        std::fs::read_to_string(self.jmod_dirs_path())
            .unwrap_or_default()
            .lines()
            .map(PathBuf::from)
            .collect()
    }

    fn log_path(&self) -> PathBuf {
        self.tools_dir.path().join("invocations.log")
    }

    fn jmod_dirs_path(&self) -> PathBuf {
        self.tools_dir.path().join("jmod-dirs.log")
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run with extra environment variables (e.g. `JAVA_HOME`).
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("PATH", self.tools_dir.path())
            .env("FAKE_TOOL_LOG", self.log_path())
            .env("FAKE_JMOD_DIRS", self.jmod_dirs_path())
            .env_remove("JAVA_HOME")
            .env_remove("RUST_LOG")
            .env_remove("FAKE_JAVAC_VERSION")
            .env_remove("FAKE_JAVAC_EXIT");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute classprep");
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
