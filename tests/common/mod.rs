// Shared helpers for integration tests.
//
// Provides a temporary hosts file, tag store and config file so each
// integration test can drive commands without touching the real system.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code, clippy::expect_used)]

use std::path::{Path, PathBuf};

use clap::Parser;
use hostsmgr_cli::cli::Cli;
use hostsmgr_cli::commands;
use hostsmgr_cli::hosts::HostsRepository;
use hostsmgr_cli::logging::Logger;

/// Hosts content most tests start from.
pub const SAMPLE_HOSTS: &str = "\
# sample hosts file
127.0.0.1 localhost
::1 ip6-localhost  # loopback
10.0.0.2 db.local
";

/// An isolated hosts file, tag store and config in a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding every file of the context.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a context whose hosts file holds [`SAMPLE_HOSTS`] and whose
    /// config disables the privilege check.
    pub fn new() -> Self {
        TestContextBuilder::new().build()
    }

    /// Path of the hosts file.
    pub fn hosts_path(&self) -> PathBuf {
        self.root.path().join("etc").join("hosts")
    }

    /// Path of the tag store.
    pub fn tags_path(&self) -> PathBuf {
        self.root.path().join("etc").join("hosts_tags.json")
    }

    /// Path of the config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("config.toml")
    }

    /// Current hosts file content.
    pub fn hosts(&self) -> String {
        std::fs::read_to_string(self.hosts_path()).expect("read hosts")
    }

    /// Current tag store content, if it exists.
    pub fn tags_json(&self) -> Option<String> {
        std::fs::read_to_string(self.tags_path()).ok()
    }

    /// Repository over the context's files.
    pub fn repository(&self) -> HostsRepository {
        HostsRepository::new(self.hosts_path(), self.tags_path())
    }

    /// Backup files written beside the hosts file.
    pub fn backups(&self) -> Vec<PathBuf> {
        let dir = self.hosts_path();
        let dir = dir.parent().expect("hosts parent");
        let mut found: Vec<PathBuf> = std::fs::read_dir(dir)
            .expect("read etc dir")
            .map(|e| e.expect("dir entry").path())
            .filter(|p| is_backup(p))
            .collect();
        found.sort();
        found
    }

    /// Delete earlier backups so consecutive writes within one second do not
    /// collide on the timestamped name.
    pub fn clear_backups(&self) {
        for path in self.backups() {
            std::fs::remove_file(path).expect("remove backup");
        }
    }

    /// Run `hostsmgr <args>` against this context and capture stdout.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        self.clear_backups();
        let hosts = self.hosts_path();
        let tags = self.tags_path();
        let config = self.config_path();
        let mut argv: Vec<String> = vec!["hostsmgr".to_string()];
        argv.extend(args.iter().map(|a| (*a).to_string()));
        argv.extend([
            "--hosts-file".to_string(),
            hosts.display().to_string(),
            "--tags-file".to_string(),
            tags.display().to_string(),
            "--config".to_string(),
            config.display().to_string(),
        ]);
        let cli = Cli::try_parse_from(argv)?;
        let log = Logger::new(cli.command.name());
        let mut out = Vec::new();
        commands::run(&cli, &log, &mut out)?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }
}

fn is_backup(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("hosts.bak_"))
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    hosts: String,
    tags: Option<String>,
    require_elevation: bool,
}

impl TestContextBuilder {
    /// Begin building a context with [`SAMPLE_HOSTS`] and no tag store.
    pub fn new() -> Self {
        Self {
            hosts: SAMPLE_HOSTS.to_string(),
            tags: None,
            require_elevation: false,
        }
    }

    /// Use `content` as the hosts file.
    pub fn with_hosts(mut self, content: &str) -> Self {
        self.hosts = content.to_string();
        self
    }

    /// Seed the tag store with raw JSON.
    pub fn with_tags_json(mut self, json: &str) -> Self {
        self.tags = Some(json.to_string());
        self
    }

    /// Turn the privilege check back on.
    pub const fn requiring_elevation(mut self) -> Self {
        self.require_elevation = true;
        self
    }

    /// Write the files and return the context.
    pub fn build(self) -> IntegrationTestContext {
        let ctx = IntegrationTestContext {
            root: tempfile::tempdir().expect("create temp dir"),
        };
        std::fs::create_dir_all(ctx.root.path().join("etc")).expect("create etc dir");
        std::fs::write(ctx.hosts_path(), &self.hosts).expect("write hosts");
        if let Some(json) = &self.tags {
            std::fs::write(ctx.tags_path(), json).expect("write tags");
        }
        std::fs::write(
            ctx.config_path(),
            format!("require_elevation = {}\n", self.require_elevation),
        )
        .expect("write config");
        ctx
    }
}
