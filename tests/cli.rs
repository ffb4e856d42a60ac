//! Runs the compiled `sitevue` binary against temp directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn sitevue(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sitevue"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run sitevue")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn small_site() -> TempDir {
    let site = TempDir::new().unwrap();
    let write = |rel: &str, content: &str| fs::write(site.path().join(rel), content).unwrap();
    write("index.html", "<nav><a href=\"about.html\">About</a></nav><p>Home</p>");
    write("about.html", "<nav><a href=\"index.html\">Home</a></nav><p>About</p>");
    write("style.css", "p { margin: 0; }");
    site
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn gen_config_prints_valid_toml() {
    let output = sitevue(&["gen-config"]);
    assert!(output.status.success());

    let text = stdout(&output);
    let value: toml::Value = toml::from_str(&text).unwrap();
    assert!(value.get("project").is_some());
    assert!(value.get("components").is_some());
}

#[test]
fn convert_writes_project_and_summary() {
    let site = small_site();
    let out = TempDir::new().unwrap();

    let output = sitevue(&[
        "--source",
        arg(site.path()),
        "--output",
        arg(out.path()),
        "convert",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let text = stdout(&output);
    assert!(text.contains("Converted 2 pages, 1 component, 0 assets"), "{text}");
    assert!(out.path().join("src/pages/about.vue").is_file());
    assert!(out.path().join("src/components/Nav.vue").is_file());
    assert!(out.path().join("package.json").is_file());
}

#[test]
fn convert_with_unknown_framework_copies_through() {
    let site = small_site();
    let out = TempDir::new().unwrap();

    let output = sitevue(&[
        "convert",
        "--framework",
        "angular",
        "--source",
        arg(site.path()),
        "--output",
        arg(out.path()),
    ]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("unknown framework 'angular'"), "{text}");
    assert_eq!(
        fs::read_to_string(out.path().join("index.html")).unwrap(),
        "<nav><a href=\"about.html\">About</a></nav><p>Home</p>"
    );
    assert!(!out.path().join("package.json").exists());
}

#[test]
fn scan_lists_pages_without_writing() {
    let site = small_site();
    let out = TempDir::new().unwrap();
    let target = out.path().join("never");

    let output = sitevue(&["--source", arg(site.path()), "--output", arg(&target), "scan"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("001 About → /about"), "{text}");
    assert!(text.contains("002 Index → /"), "{text}");
    assert!(text.contains("    stylesheet: 1"));
    assert!(!target.exists());
}

#[test]
fn check_rejects_bad_config() {
    let site = small_site();
    fs::write(site.path().join("sitevue.toml"), "[project]\nnam = \"typo\"\n").unwrap();

    let output = sitevue(&["--source", arg(site.path()), "check"]);
    assert!(!output.status.success());
}

#[test]
fn check_accepts_good_site() {
    let site = small_site();
    let output = sitevue(&["--source", arg(site.path()), "check"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("==> Site is valid"));
}

#[test]
fn missing_source_fails() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing");
    let output = sitevue(&["--source", arg(&missing), "--output", arg(tmp.path()), "convert"]);
    assert!(!output.status.success());
}
