use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn ttb_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("ttb");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let files_dir = root.join("files");
    fs::create_dir_all(&files_dir).unwrap();
    fs::write(
        files_dir.join("alpha.txt"),
        "The cat sat on the mat.\nDogs bark.\nA catalog of cats.",
    )
    .unwrap();
    fs::write(
        files_dir.join("beta.md"),
        "# Beta\nBEGIN block\nsome body\nEND block\nno cat here? cat!",
    )
    .unwrap();
    fs::write(files_dir.join("ignored.bin"), "cat cat cat").unwrap();

    let config_content = r#"[search]
preview_matches = 10

[files]
include_globs = ["**/*.txt", "**/*.md"]
"#;
    let config_path = config_dir.join("ttb.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_ttb(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    run_ttb_with_stdin(config_path, args, None)
}

fn run_ttb_with_stdin(
    config_path: &Path,
    args: &[&str],
    stdin: Option<&str>,
) -> (String, String, bool) {
    let binary = ttb_binary();
    let mut child = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("Failed to run ttb binary at {:?}: {}", binary, e));

    if let Some(input) = stdin {
        let mut pipe = child.stdin.take().unwrap();
        pipe.write_all(input.as_bytes()).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn files_dir(config_path: &Path) -> String {
    config_path
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("files")
        .display()
        .to_string()
}

#[test]
fn test_search_literal_directory() {
    let (_tmp, config_path) = setup_test_env();
    let dir = files_dir(&config_path);

    let (stdout, stderr, success) = run_ttb(&config_path, &["search", "cat", &dir]);
    assert!(success, "search failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("alpha.txt (2 matches)"));
    assert!(stdout.contains("beta.md (1 match)"));
    assert!(stdout.contains("     1: The cat sat on the mat."));
    assert!(stdout.contains("Found 3 matches in 2 sources."));
    assert!(!stdout.contains("ignored.bin"));
}

#[test]
fn test_search_ignore_case_json() {
    let (_tmp, config_path) = setup_test_env();
    let dir = files_dir(&config_path);

    let (stdout, stderr, success) = run_ttb(
        &config_path,
        &["search", "begin", &dir, "--ignore-case", "--format", "json"],
    );
    assert!(success, "search failed: stderr={}", stderr);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["total_match_count"], 1);
    let record = &value["sources"][0]["matches"][0];
    assert_eq!(record["line_number"], 2);
    assert_eq!(record["display_text"], "BEGIN block");
}

#[test]
fn test_search_regex_full_text_spans_lines() {
    let (_tmp, config_path) = setup_test_env();
    let file = format!("{}/beta.md", files_dir(&config_path));

    let (stdout, stderr, success) = run_ttb(
        &config_path,
        &[
            "search",
            r"BEGIN[\s\S]*?END",
            &file,
            "--regex",
            "--full-text",
            "--format",
            "json",
        ],
    );
    assert!(success, "search failed: stderr={}", stderr);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let record = &value["sources"][0]["matches"][0];
    assert_eq!(record["line_number"], 2);
    assert_eq!(record["is_multi_line"], true);
    assert_eq!(record["is_full_text_match"], true);
    assert_eq!(record["display_text"], "BEGIN block\nsome body\nEND");
}

#[test]
fn test_search_full_text_ignored_without_regex() {
    let (_tmp, config_path) = setup_test_env();
    let dir = files_dir(&config_path);

    let (stdout, stderr, success) =
        run_ttb(&config_path, &["search", "cat", &dir, "--full-text"]);
    assert!(success);
    assert!(stderr.contains("--full-text only applies to --regex"));
    assert!(stdout.contains("Found 3 matches"));
}

#[test]
fn test_search_invalid_regex_fails() {
    let (_tmp, config_path) = setup_test_env();
    let dir = files_dir(&config_path);

    let (_, stderr, success) = run_ttb(&config_path, &["search", "(unclosed", &dir, "--regex"]);
    assert!(!success);
    assert!(stderr.contains("invalid search pattern '(unclosed'"));
}

#[test]
fn test_search_blank_pattern_prints_no_results() {
    let (_tmp, config_path) = setup_test_env();
    let dir = files_dir(&config_path);

    let (stdout, _, success) = run_ttb(&config_path, &["search", "   ", &dir]);
    assert!(success);
    assert_eq!(stdout.trim(), "No results.");
}

#[test]
fn test_search_no_matches() {
    let (_tmp, config_path) = setup_test_env();
    let dir = files_dir(&config_path);

    let (stdout, _, success) = run_ttb(&config_path, &["search", "zebra", &dir]);
    assert!(success);
    assert_eq!(stdout.trim(), "No results.");
}

#[test]
fn test_search_stdin_as_pasted_source() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_ttb_with_stdin(
        &config_path,
        &["search", "one"],
        Some("one\ntwo\nthree one\n"),
    );
    assert!(success, "search failed: stderr={}", stderr);
    assert!(stdout.contains("粘贴的文本 (2 matches)"));
    assert!(stdout.contains("     3: three one"));
}

#[test]
fn test_search_empty_stdin_fails() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_ttb_with_stdin(&config_path, &["search", "one"], Some("  \n"));
    assert!(!success);
    assert!(stderr.contains("No text to search"));
}

#[test]
fn test_search_skips_unreadable_file() {
    let (tmp, config_path) = setup_test_env();
    let bad = tmp.path().join("files/bad.txt");
    fs::write(&bad, [0xffu8, 0xfe, b'c', b'a', b't']).unwrap();
    let dir = files_dir(&config_path);

    let (stdout, stderr, success) = run_ttb(&config_path, &["search", "cat", &dir]);
    assert!(success);
    assert!(stderr.contains("warning: skipping"));
    assert!(stderr.contains("bad.txt"));
    assert!(stdout.contains("Found 3 matches in 2 sources."));
}

#[test]
fn test_search_report_into_directory() {
    let (tmp, config_path) = setup_test_env();
    let dir = files_dir(&config_path);
    let out_dir = tmp.path().join("reports");
    fs::create_dir_all(&out_dir).unwrap();

    let (_, stderr, success) = run_ttb(
        &config_path,
        &[
            "search",
            "cat",
            &dir,
            "--format",
            "report",
            "--output",
            out_dir.to_str().unwrap(),
        ],
    );
    assert!(success, "report failed: stderr={}", stderr);
    assert!(stderr.contains("Wrote"));

    let entries: Vec<PathBuf> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("search_results_") && name.ends_with(".txt"));

    let report = fs::read_to_string(&entries[0]).unwrap();
    assert!(report.starts_with("搜索结果报告\n==============\n搜索关键词: cat\n区分大小写: 是\n"));
    assert!(report.contains("匹配总数: 3\n"));
    assert!(report.contains("匹配数: 2\n"));
    assert!(report.contains("A catalog of cats.\n"));
}

#[test]
fn test_search_report_without_results_fails() {
    let (_tmp, config_path) = setup_test_env();
    let dir = files_dir(&config_path);

    let (_, stderr, success) =
        run_ttb(&config_path, &["search", "zebra", &dir, "--format", "report"]);
    assert!(!success);
    assert!(stderr.contains("No search results to export"));
}

#[test]
fn test_search_flat_output() {
    let (_tmp, config_path) = setup_test_env();
    let file = format!("{}/alpha.txt", files_dir(&config_path));

    let (stdout, _, success) = run_ttb(&config_path, &["search", "cat", &file, "--format", "flat"]);
    assert!(success);
    assert_eq!(stdout, "The cat sat on the mat.\nA catalog of cats.\n");
}

#[test]
fn test_dedup_stdin() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_ttb_with_stdin(
        &config_path,
        &["dedup"],
        Some("apple\nbanana\napple\nApple\n"),
    );
    assert!(success, "dedup failed: stderr={}", stderr);
    assert_eq!(stdout, "apple\nbanana\nApple\n\n");
    assert!(stderr.contains("5 original, 4 unique, 1 removed"));
}

#[test]
fn test_dedup_trim_ignore_case() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_ttb_with_stdin(
        &config_path,
        &["dedup", "--trim", "--ignore-case"],
        Some("  Apple\napple  \nBanana"),
    );
    assert!(success);
    assert_eq!(stdout, "Apple\nBanana\n");
}

#[test]
fn test_dedup_whitespace_stdin() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_ttb_with_stdin(&config_path, &["dedup"], Some(" \n\t\n"));
    assert!(success);
    assert_eq!(stdout.trim(), "No input.");
}

#[test]
fn test_dedup_merges_files_to_output() {
    let (tmp, config_path) = setup_test_env();
    let a = tmp.path().join("a.txt");
    let b = tmp.path().join("b.txt");
    fs::write(&a, "x\ny").unwrap();
    fs::write(&b, "y\nz").unwrap();
    let out = tmp.path().join("unique.txt");

    let (_, stderr, success) = run_ttb(
        &config_path,
        &[
            "dedup",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ],
    );
    assert!(success, "dedup failed: stderr={}", stderr);
    assert_eq!(fs::read_to_string(&out).unwrap(), "x\ny\nz\n");
}

#[test]
fn test_dedup_json() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_ttb_with_stdin(
        &config_path,
        &["dedup", "--format", "json"],
        Some("a\na\nb"),
    );
    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["original_line_count"], 3);
    assert_eq!(value["unique_line_count"], 2);
    assert_eq!(value["removed_line_count"], 1);
    assert_eq!(value["content"], "a\nb");
    assert_eq!(value["options"]["case_sensitive"], true);
}

#[test]
fn test_files_listing() {
    let (tmp, config_path) = setup_test_env();
    fs::write(tmp.path().join("files/bad.txt"), [0xffu8, 0xfe]).unwrap();
    let dir = files_dir(&config_path);

    let (stdout, stderr, success) = run_ttb(&config_path, &["files", &dir]);
    assert!(success, "files failed: stderr={}", stderr);
    assert!(stdout.contains("alpha.txt"));
    assert!(stdout.contains("beta.md"));
    assert!(stdout.contains("FAILED"));
    assert!(!stdout.contains("ignored.bin"));
    assert!(stdout.contains("Loaded 2 files (1 failed)"));
}

#[test]
fn test_missing_path_fails() {
    let (tmp, config_path) = setup_test_env();
    let missing = tmp.path().join("nope.txt");

    let (_, stderr, success) =
        run_ttb(&config_path, &["search", "cat", missing.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("Path does not exist"));
}

#[test]
fn test_init_writes_config_once() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("config/ttb.toml");

    let (stdout, stderr, success) = run_ttb(&config_path, &["init"]);
    assert!(success, "init failed: stderr={}", stderr);
    assert!(stdout.contains("Created config"));
    assert!(fs::read_to_string(&config_path)
        .unwrap()
        .contains("[search]"));

    let (_, stderr, success) = run_ttb(&config_path, &["init"]);
    assert!(!success);
    assert!(stderr.contains("already exists"));
}

#[test]
fn test_missing_config_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("absent.toml");

    let (stdout, _, success) =
        run_ttb_with_stdin(&config_path, &["search", "x"], Some("x\ny\nx"));
    assert!(success);
    assert!(stdout.contains("Found 2 matches in 1 source."));
}

#[test]
fn test_invalid_config_fails() {
    let (_tmp, config_path) = setup_test_env();
    fs::write(&config_path, "[search]\ndisplay_chars = 0\n").unwrap();

    let (_, stderr, success) = run_ttb_with_stdin(&config_path, &["search", "x"], Some("x"));
    assert!(!success);
    assert!(stderr.contains("display_chars"));
}
