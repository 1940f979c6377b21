// tests/cli_tests.rs
// Drives the docblock-writer binary end to end

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

// Helper to write a fixture source file
fn create_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

fn run_cli(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_docblock-writer"))
        .current_dir(dir.path())
        .args(args)
        .output()
        .expect("Failed to run docblock-writer")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("Fixture path should be UTF-8")
}

const PLAIN: &str = "<?php\n\nnamespace App;\n\nclass Foo\n{\n}\n";

const DOCUMENTED: &str = r#"<?php

namespace App;

/**
 * Summary line.
 *
 * @property int $id
 */
class Foo
{
}
"#;

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_write_with_tags_keeps_value_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = create_source(&dir, "Foo.php", PLAIN);

        let out = run_cli(
            &dir,
            &[
                "write",
                "App\\Foo",
                "--path",
                path_arg(&path),
                "--summary",
                "Carbon model.",
                "--tag",
                r"property \Carbon\Carbon $created_at",
                "--tag",
                r#"method void run(string $a = "x")"#,
            ],
        );

        assert!(out.status.success(), "write should exit 0: {:?}", out);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<?php\n\nnamespace App;\n\n/**\n * Carbon model.\n *\n * @method void run(string $a = \"x\")\n * @property \\Carbon\\Carbon $created_at\n */\nclass Foo\n{\n}\n"
        );
    }

    #[test]
    fn test_dry_run_prints_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = create_source(&dir, "Foo.php", PLAIN);

        let out = run_cli(
            &dir,
            &["write", "App\\Foo", "--path", path_arg(&path), "--summary", "Dry.", "--dry-run"],
        );

        assert!(out.status.success());
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.contains("/**\n * Dry.\n *\n */\nclass Foo"));
        assert_eq!(fs::read_to_string(&path).unwrap(), PLAIN, "File should be untouched");
    }

    #[test]
    fn test_show_prints_parsed_comment_as_json() {
        let dir = TempDir::new().unwrap();
        let path = create_source(&dir, "Foo.php", DOCUMENTED);

        let out = run_cli(&dir, &["show", "App\\Foo", "--path", path_arg(&path)]);
        assert!(out.status.success());

        let report: serde_json::Value =
            serde_json::from_slice(&out.stdout).expect("show should print JSON");
        assert_eq!(report["identifier"], "App\\Foo");
        assert_eq!(report["start_line"], 10);
        assert_eq!(report["effective_start_line"], 10);
        assert_eq!(report["indentation"], 0);
        assert_eq!(report["comment"]["summary"], "Summary line.");
        assert_eq!(report["comment"]["tags"][0]["name"], "property");
        assert_eq!(report["comment"]["tags"][0]["value"], "int $id");
    }

    #[test]
    fn test_list_scans_directories() {
        let dir = TempDir::new().unwrap();
        create_source(&dir, "Foo.php", DOCUMENTED);
        create_source(&dir, "notes.txt", "class NotPhp\n");

        let out = run_cli(&dir, &["list", "--path", path_arg(dir.path())]);
        assert!(out.status.success());

        let stdout = String::from_utf8_lossy(&out.stdout);
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(lines.len(), 1, "Only the .php file should be scanned");
        assert!(lines[0].starts_with("App\\Foo\t"));
        assert!(lines[0].ends_with("Foo.php:10"));
    }

    #[test]
    fn test_unknown_declaration_exits_with_failure() {
        let dir = TempDir::new().unwrap();
        let path = create_source(&dir, "Foo.php", PLAIN);

        let out = run_cli(&dir, &["write", "App\\Nope", "--path", path_arg(&path)]);

        assert!(!out.status.success());
        assert_eq!(out.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&out.stderr).contains("is not declared"));
        assert_eq!(fs::read_to_string(&path).unwrap(), PLAIN);
    }

    #[test]
    fn test_invalid_tag_exits_with_failure() {
        let dir = TempDir::new().unwrap();
        let path = create_source(&dir, "Foo.php", PLAIN);

        let out = run_cli(
            &dir,
            &["write", "App\\Foo", "--path", path_arg(&path), "--tag", "\"quoted\" name"],
        );

        assert_eq!(out.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid tag"));
        assert_eq!(fs::read_to_string(&path).unwrap(), PLAIN);
    }
}
