//! Build script embedding version information.

use std::process::Command;

const VERSION_ENV: &str = "HOSTSMGR_VERSION";

fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!version.is_empty()).then_some(version)
}

fn main() {
    // An explicit version from the release environment wins over git.
    let version = std::env::var(VERSION_ENV).ok().or_else(git_describe);
    if let Some(version) = version {
        println!("cargo:rustc-env={VERSION_ENV}={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed={VERSION_ENV}");
}
