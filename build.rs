use std::{env, process::Command};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-env-changed=PERCH_VERSION");

    // Release tarballs carry no .git, packagers pass the version in
    let version = env::var("PERCH_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(git_version)
        .unwrap_or_else(|| format!("{}-unknown", env!("CARGO_PKG_VERSION")));

    println!("cargo:rustc-env=PERCH_VERSION={}", version);
}

/// `v1.2.0-3-gabc123-dirty` becomes `1.2.0-3-gabc123+dirty`.
fn git_version() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    let described = described.strip_prefix('v').unwrap_or(described);
    if described.is_empty() {
        return None;
    }

    Some(match described.strip_suffix("-dirty") {
        Some(clean) => format!("{}+dirty", clean),
        None => described.to_string(),
    })
}
