#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
    pub theme: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().to_path_buf();
        let theme = make_fixture_theme(&root);
        Self {
            _tmp: tmp,
            root,
            theme,
        }
    }

    /// Runs from the temp root so no stray `.schemalint.toml` is picked up.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("schemalint");
        cmd.current_dir(&self.root).env_remove("RUST_LOG");
        cmd
    }

    /// Absolute path under the fixture theme; `""` is the theme root.
    pub fn path(&self, rel: &str) -> String {
        let p = if rel.is_empty() {
            self.theme.clone()
        } else {
            self.theme.join(rel)
        };
        p.to_string_lossy().to_string()
    }

    pub fn write(&self, rel: &str, body: &str) -> PathBuf {
        let p = self.root.join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&p, body).expect("write fixture file");
        p
    }

    /// Runs with `--json` and returns the envelope, whatever the exit code.
    pub fn run_json(&self, args: &[&str]) -> (i32, Value) {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .output()
            .expect("run schemalint");
        let code = out.status.code().expect("exit code");
        let json = serde_json::from_slice(&out.stdout).expect("valid json output");
        (code, json)
    }

    pub fn document<'a>(&self, report: &'a Value, file: &str) -> &'a Value {
        report["data"]["documents"]
            .as_array()
            .expect("documents array")
            .iter()
            .find(|d| d["path"].as_str().unwrap_or_default().ends_with(file))
            .unwrap_or_else(|| panic!("no report for {}", file))
    }
}

pub fn kinds(doc: &Value) -> Vec<String> {
    doc["findings"]
        .as_array()
        .expect("findings array")
        .iter()
        .map(|f| f["kind"].as_str().unwrap_or_default().to_string())
        .collect()
}

pub fn section(name: &str, setting: &str) -> String {
    format!(
        r#"<div class="{{{{ section.settings.size }}}}"></div>
{{% schema %}}
{{
  "name": "{}",
  "settings": [
    {}
  ]
}}
{{% endschema %}}
"#,
        name, setting
    )
}

fn make_fixture_theme(base: &Path) -> PathBuf {
    let theme = base.join("theme");
    let sections = theme.join("sections");
    fs::create_dir_all(&sections).expect("create sections");
    fs::create_dir_all(theme.join("snippets")).expect("create snippets");
    fs::create_dir_all(theme.join("node_modules/pkg/sections")).expect("create node_modules");

    let good = section(
        "Good",
        r#"{"type": "range", "id": "size", "label": "Size", "min": 0, "max": 100, "step": 4, "default": 64}"#,
    );
    fs::write(sections.join("good.liquid"), &good).expect("write good");
    fs::write(
        sections.join("steps.liquid"),
        section(
            "Steps",
            r#"{"type": "range", "id": "size", "label": "Size", "min": 0, "max": 1000, "step": 1}"#,
        ),
    )
    .expect("write steps");
    fs::write(
        sections.join("zero-step.liquid"),
        section(
            "Zero",
            r#"{"type": "range", "id": "size", "label": "Size", "min": 0, "max": 50, "step": 0, "default": 10}"#,
        ),
    )
    .expect("write zero-step");
    fs::write(
        sections.join("default-out.liquid"),
        section(
            "Default",
            r#"{"type": "range", "id": "size", "label": "Size", "min": 10, "max": 20, "step": 2, "default": 5}"#,
        ),
    )
    .expect("write default-out");
    fs::write(
        sections.join("twice.liquid"),
        format!("{}{{% schema %}}{{\"name\": \"Again\"}}{{% endschema %}}\n", good),
    )
    .expect("write twice");
    fs::write(
        sections.join("broken.liquid"),
        "<div></div>\n{% schema %}\n{\"name\": \"Broken\", \"settings\": [{\"type\": \"range\"\n{% endschema %}\n",
    )
    .expect("write broken");
    fs::write(theme.join("snippets/icon.liquid"), "<svg></svg>\n").expect("write snippet");
    fs::write(
        theme.join("node_modules/pkg/sections/vendor.liquid"),
        "<p>no schema</p>",
    )
    .expect("write vendored file");
    theme
}
