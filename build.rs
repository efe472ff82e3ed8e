use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    for path in ["build.rs", ".git/HEAD", ".git/refs"] {
        println!("cargo:rerun-if-changed={path}");
    }

    let hash = command_output("git", &["rev-parse", "--short", "HEAD"]);
    let status = command_output("git", &["status", "--porcelain"])
        .map(|porcelain| if porcelain.is_empty() { "clean" } else { "dirty" }.to_string());
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    emit("HASH", hash.as_deref().filter(|value| !value.is_empty()));
    emit("STATUS", status.as_deref());
    emit("TIMESTAMP", Some(&timestamp));
    emit("TARGET", env::var("TARGET").ok().as_deref());
    emit("PROFILE", env::var("PROFILE").ok().as_deref());
    emit("RUSTC", command_output("rustc", &["--version"]).as_deref());
}

fn emit(key: &str, value: Option<&str>) {
    println!(
        "cargo:rustc-env=FINANCE_CONTROL_BUILD_{key}={}",
        value.unwrap_or(UNKNOWN)
    );
}

/// Trimmed stdout of a successful command, or `None` if it could not run.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
