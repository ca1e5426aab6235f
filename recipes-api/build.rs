//! Exposes build identification to the crate as compile-time env vars
//!
//! `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE` are read with `env!` by
//! the startup log line and the `/build_info` endpoint.

use std::process::Command;

use chrono::{SecondsFormat, Utc};

const UNKNOWN: &str = "unknown";

/// Short commit hash of the working tree, if built from a git checkout
fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_owned())
}

fn main() {
    let build_env = [
        ("GIT_HASH", git_short_hash().unwrap_or_else(|| UNKNOWN.to_owned())),
        (
            "BUILD_TIMESTAMP",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        (
            "BUILD_PROFILE",
            std::env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_owned()),
        ),
    ];

    for (key, value) in build_env {
        println!("cargo:rustc-env={key}={value}");
    }
}
