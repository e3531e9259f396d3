use std::{env, path::Path, process::Command, str::from_utf8};

fn main() {
    let rustc = env::var("RUSTC").unwrap();
    let package_version = env::var("CARGO_PKG_VERSION").unwrap();

    let rustc_version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|result| result.status.success())
        .expect("Failed to query rustc version");

    let git_version = if Path::new("../.git").exists() {
        Command::new("git")
            .arg("describe")
            .arg("--tags")
            .arg("--match=v[0-9]*")
            .arg("--dirty=-d")
            .arg("--always")
            .output()
            .ok()
            .filter(|result| result.status.success())
            .map(|result| from_utf8(&result.stdout).unwrap().trim().to_string())
    } else {
        None
    };

    let version = match git_version {
        Some(ref version) if version.starts_with('v') => version[1..].to_string(),
        _ => package_version,
    };

    println!("cargo:rustc-env=CDCLSAT_VERSION={}", version);
    println!(
        "cargo:rustc-env=CDCLSAT_RUSTC_VERSION={}",
        from_utf8(&rustc_version.stdout).unwrap().trim()
    );
    println!(
        "cargo:rustc-env=CDCLSAT_PROFILE={}",
        env::var("PROFILE").unwrap()
    );
}
