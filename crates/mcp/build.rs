#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Exposes the short commit hash as `LN_GIT_SHA` when built from a git checkout.
fn main() {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));
    let Some(git_dir) = manifest_dir.ancestors().map(|dir| dir.join(".git")).find(|p| p.is_dir()) else {
        return;
    };
    let head_path = git_dir.join("HEAD");
    println!("cargo:rerun-if-changed={}", head_path.display());

    let Ok(head) = fs::read_to_string(&head_path) else {
        return;
    };
    let head = head.trim();
    let sha = match head.strip_prefix("ref:") {
        Some(name) => read_ref(&git_dir, name.trim()),
        None => Some(head.to_string()),
    };
    if let Some(sha) = sha.filter(|s| !s.is_empty()) {
        let short = sha.chars().take(12).collect::<String>();
        println!("cargo:rustc-env=LN_GIT_SHA={short}");
    }
}

fn read_ref(git_dir: &Path, name: &str) -> Option<String> {
    let loose = git_dir.join(name);
    if let Ok(text) = fs::read_to_string(&loose) {
        println!("cargo:rerun-if-changed={}", loose.display());
        return Some(text.trim().to_string());
    }

    let packed = git_dir.join("packed-refs");
    println!("cargo:rerun-if-changed={}", packed.display());
    let text = fs::read_to_string(&packed).ok()?;
    text.lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
        .filter_map(|line| line.trim().split_once(' '))
        .find(|(_, ref_name)| *ref_name == name)
        .map(|(sha, _)| sha.to_string())
}
