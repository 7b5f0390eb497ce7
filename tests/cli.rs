//! End-to-end tests driving the `snippet` binary

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const HELLO_GO: &str = r#"
import "fmt"

func main(){
  fmt.Println("Hello world")
}
"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    fn db(&self) -> PathBuf {
        self.dir.path().join("snippets.db")
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("snippets.toml")
    }

    fn write_source(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_snippet"));
        cmd.args(args)
            .arg("--db")
            .arg(self.db())
            .arg("--config")
            .arg(self.config())
            .env_remove("RUST_LOG")
            .env_remove("SNIPPETS_QUIET");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().unwrap()
    }

    fn stdout(&self, args: &[&str]) -> String {
        let out = self.run(args);
        assert!(
            out.status.success(),
            "snippet {:?} failed: {}",
            args,
            String::from_utf8_lossy(&out.stderr)
        );
        String::from_utf8(out.stdout).unwrap()
    }
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_create_view_delete() {
    let ws = Workspace::new();
    let source = ws.write_source("hello.go", HELLO_GO);

    ws.stdout(&[
        "create", "-t", "Hello world", "-l", "go", "-f", path_arg(&source), "--tags", "basic,beginner",
    ]);

    assert_eq!(ws.stdout(&["view", "-l", "go"]), "[1] - Hello world\n");
    assert_eq!(ws.stdout(&["view", "--tag", "basic"]), "[1] - Hello world\n");
    assert_eq!(ws.stdout(&["view", "--tag", "beginner"]), "[1] - Hello world\n");
    assert_eq!(ws.stdout(&["view", "--id", "1"]), format!("{}\n", HELLO_GO));
    assert_eq!(ws.stdout(&["list"]), "[1] - Hello world (go) #basic #beginner\n");

    ws.stdout(&["delete", "--id", "1"]);
    assert_eq!(ws.stdout(&["view", "-l", "go"]), "");
    assert_eq!(ws.stdout(&["view", "--tag", "basic"]), "");

    // second delete is a no-op
    ws.stdout(&["delete", "--id", "1"]);
    assert!(!ws.run(&["view", "--id", "1"]).status.success());
}

#[test]
fn test_ids_keep_increasing() {
    let ws = Workspace::new();
    let source = ws.write_source("a.rs", "fn main() {}\n");

    for title in ["one", "two", "three"] {
        ws.stdout(&["create", "-t", title, "-l", "rust", "-f", path_arg(&source)]);
    }
    ws.stdout(&["delete", "--id", "2"]);
    ws.stdout(&["create", "-t", "four", "-l", "rust", "-f", path_arg(&source)]);

    assert_eq!(ws.stdout(&["view", "-l", "rust"]), "[1] - one\n[3] - three\n[4] - four\n");
}

#[test]
fn test_create_from_stdin() {
    let ws = Workspace::new();

    let mut child = ws
        .command(&["create", "-t", "piped", "-l", "sh", "-f", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"echo hi\n").unwrap();
    assert!(child.wait_with_output().unwrap().status.success());

    assert_eq!(ws.stdout(&["view", "--id", "1"]), "echo hi\n\n");
}

#[test]
fn test_json_output() {
    let ws = Workspace::new();
    let source = ws.write_source("hello.go", HELLO_GO);
    ws.stdout(&["create", "-t", "Hello world", "-l", "go", "-f", path_arg(&source), "--tags", "basic"]);

    let stats: serde_json::Value =
        serde_json::from_str(&ws.stdout(&["stats", "--format", "json"])).unwrap();
    assert_eq!(stats["status"], "ok");
    assert_eq!(stats["data"]["snippets"], 1);
    assert_eq!(stats["data"]["keys"], 3);
    assert_eq!(stats["data"]["last_id"], 1);

    let view: serde_json::Value =
        serde_json::from_str(&ws.stdout(&["view", "--id", "1", "--format", "json"])).unwrap();
    assert_eq!(view["data"]["title"], "Hello world");
    assert_eq!(view["data"]["tags"], serde_json::json!(["basic"]));
}

#[test]
fn test_rejects_bad_input() {
    let ws = Workspace::new();
    let source = ws.write_source("x.go", "package x\n");

    assert!(!ws.run(&["create", "-t", "bad", "-l", "go", "-f", path_arg(&source), "--tags", "a:b"]).status.success());
    assert!(!ws.db().exists());
    assert!(!ws.run(&["create", "-t", "no source", "-l", "go"]).status.success());
    assert!(!ws.run(&["view"]).status.success());
    assert_eq!(ws.stdout(&["list"]), "");
}

#[test]
fn test_quiet_hides_status_lines() {
    let ws = Workspace::new();
    let source = ws.write_source("hello.go", HELLO_GO);

    let out = ws
        .command(&["create", "-t", "Hello world", "-l", "go", "-f", path_arg(&source)])
        .env("SNIPPETS_QUIET", "1")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let loud = ws.stdout(&["create", "-t", "Second", "-l", "go", "-f", path_arg(&source)]);
    assert!(loud.contains("Created"));

    let data = ws.command(&["view", "-l", "go"]).env("SNIPPETS_QUIET", "1").output().unwrap();
    assert_eq!(String::from_utf8(data.stdout).unwrap(), "[1] - Hello world\n[2] - Second\n");
}

#[test]
fn test_init_writes_config() {
    let ws = Workspace::new();
    let custom_db = ws.dir.path().join("nested").join("custom.db");

    ws.stdout(&["init", "--database", path_arg(&custom_db)]);
    let written = std::fs::read_to_string(ws.config()).unwrap();
    assert!(written.contains("custom.db"));

    assert!(!ws.run(&["init"]).status.success());
    ws.stdout(&["init", "--force"]);
}
