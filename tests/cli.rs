use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_course(root: &Path) {
    let structure = serde_json::json!({
        "title": "Go Concurrency",
        "chapters": [
            {
                "id": "chapter-01",
                "title": "Chapter 1: Goroutines",
                "dir": "chapter-01",
                "parts": [
                    {"filename": "PART0.md", "title": "Chapter 1, Part 0: Launching"}
                ]
            }
        ],
        "overview": []
    });
    std::fs::create_dir_all(root.join("chapter-01")).unwrap();
    std::fs::write(
        root.join("structure.json"),
        serde_json::to_string(&structure).unwrap(),
    )
    .unwrap();

    let mut part0 = String::from("# Launching\n\n## Syntax\n");
    for i in 0..12 {
        part0.push_str(&format!("syntax line {}\n", i));
    }
    part0.push_str("## Pitfalls\nnever leak them\n");
    std::fs::write(root.join("chapter-01/PART0.md"), part0).unwrap();
}

fn curso_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("curso").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd.env_remove("HOME");
    cmd
}

#[test]
fn test_dump_prints_sections() {
    let course = TempDir::new().unwrap();
    let config = TempDir::new().unwrap();
    write_course(course.path());

    let mut cmd = curso_cmd(config.path());
    cmd.arg("--dump").arg(course.path());
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("--- slide 1 of 2 ---"))
        .stdout(predicates::str::contains("# Launching"))
        .stdout(predicates::str::contains("--- slide 2 of 2 ---"))
        .stdout(predicates::str::contains("## Pitfalls"));
}

#[test]
fn test_dump_specific_page() {
    let course = TempDir::new().unwrap();
    let config = TempDir::new().unwrap();
    write_course(course.path());

    let mut cmd = curso_cmd(config.path());
    cmd.arg("--dump")
        .arg("--page")
        .arg("chapter-01/PART0.md")
        .arg(course.path());
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("never leak them"));
}

#[test]
fn test_dump_unknown_page_fails() {
    let course = TempDir::new().unwrap();
    let config = TempDir::new().unwrap();
    write_course(course.path());

    let mut cmd = curso_cmd(config.path());
    cmd.arg("--dump")
        .arg("--page")
        .arg("chapter-09/NOPE.md")
        .arg(course.path());
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("unknown page id"));
}

#[test]
fn test_dump_without_structure_fails() {
    let course = TempDir::new().unwrap();
    let config = TempDir::new().unwrap();

    let mut cmd = curso_cmd(config.path());
    cmd.arg("--dump").arg(course.path());
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("no course structure loaded"));
}

#[test]
fn test_help_mentions_course_argument() {
    let config = TempDir::new().unwrap();
    let mut cmd = curso_cmd(config.path());
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("COURSE"))
        .stdout(predicates::str::contains("--resume"));
}
