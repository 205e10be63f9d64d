#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn qra() -> Command {
    cargo_bin_cmd!("qrattend")
}

/// Per-test database and ledger paths inside the system temp dir.
pub struct TestEnv {
    pub db: String,
    pub ledger: String,
}

impl TestEnv {
    /// `qrattend --db <db> --ledger <ledger> <args…>`
    pub fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = qra();
        cmd.args(["--db", &self.db, "--ledger", &self.ledger]);
        cmd.args(args);
        cmd
    }

    pub fn ledger_content(&self) -> String {
        fs::read_to_string(&self.ledger).expect("read ledger")
    }
}

/// Create unique paths for a test and remove leftovers of previous runs
pub fn setup_test_env(name: &str) -> TestEnv {
    let db = temp_path(&format!("{}_qrattend", name), "sqlite");
    let ledger = temp_path(&format!("{}_ledger", name), "csv");
    TestEnv { db, ledger }
}

/// Temporary file path inside tempdir, removed if it already exists
pub fn temp_path(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB + ledger in test mode (no config file written)
pub fn init_env(name: &str) -> TestEnv {
    let env = setup_test_env(name);
    env.cmd(&["--test", "init"]).assert().success();
    env
}

/// Initialize and record a few marks for today
pub fn init_env_with_marks(name: &str) -> TestEnv {
    let env = init_env(name);
    for payload in [
        "ID: S1, Name: Alice",
        "ID: S2, Name: Bob",
        "ID: 007, Name: Bond, James",
    ] {
        env.cmd(&["mark", payload]).assert().success();
    }
    env
}
