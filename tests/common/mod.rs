/// Common test utilities and helpers for gitpp tests

use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Temporary config location plus a way to run the binary against it
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.child("gitpp").child("config.json").path().to_path_buf();

        Self {
            temp_dir,
            config_path,
        }
    }

    /// Write raw content to the config file, creating its directory
    pub fn write_config(&self, content: &str) {
        self.temp_dir
            .child("gitpp")
            .child("config.json")
            .write_str(content)
            .expect("Failed to write test config");
    }

    pub fn read_config(&self) -> String {
        std::fs::read_to_string(&self.config_path).expect("Failed to read test config")
    }

    /// Run gitpp with `--config` pointing into the temp dir
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_config(&self.config_path, args)
    }

    pub fn run_with_config(&self, config_path: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_gitpp"))
            .arg("--config")
            .arg(config_path)
            .arg("--no-color")
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute gitpp")
    }
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn assert_contains_all(text: &str, expected: &[&str]) {
    for item in expected {
        assert!(
            text.contains(item),
            "Expected text to contain '{}', but it didn't. Text: {}",
            item,
            text
        );
    }
}
