use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

use plangrid::core::context::AppContext;

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_plangrid"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "plangrid-{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

pub fn write_config(dir: &Path, view: &str, file_logging: bool) {
    let logging = if file_logging { "True" } else { "False" };
    let cfg = format!(
        r#"{{
      "default_view": {{ "value": "{view}", "description": "Initial view" }},
      "pixels_per_hour": {{ "value": 50, "description": "Grid scale" }},
      "snap_minutes": {{ "value": 15, "description": "Snap step" }},
      "quick_add_minutes": {{ "value": 60, "description": "Quick add length" }},
      "month_cell_limit": {{ "value": 3, "description": "Entries per month cell" }},
      "file_logging_enabled": {{ "value": "{logging}", "description": "file logging" }}
    }}"#
    );
    fs::write(dir.join("config.json"), cfg).unwrap();
}

pub fn write_valid_config(dir: &Path) {
    write_config(dir, "week", true);
}

pub fn write_events(dir: &Path, json: &str) {
    fs::write(dir.join("events.json"), json).unwrap();
}

pub fn run_with_input(dir: &Path, input: &str) -> Output {
    let mut child = Command::new(binary_path())
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

pub fn run_without_input(dir: &Path) -> Output {
    Command::new(binary_path())
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run binary")
}

fn strip_ansi_and_control(s: &str) -> String {
    let mut out = Vec::with_capacity(s.len());
    let mut bytes = s.bytes().peekable();

    while let Some(b) = bytes.next() {
        if b == 0x1B && matches!(bytes.peek(), Some(b'[')) {
            let _ = bytes.next();
            for nb in bytes.by_ref() {
                if nb.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        if b.is_ascii_control() {
            continue;
        }
        out.push(b);
    }

    String::from_utf8_lossy(&out).into_owned()
}

pub fn normalized_lines(buf: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(buf)
        .lines()
        .map(|l| {
            let stripped = strip_ansi_and_control(l);
            let trimmed = stripped.trim();
            trimmed
                .strip_prefix('>')
                .map(|rest| rest.trim().to_string())
                .unwrap_or_else(|| trimmed.to_string())
        })
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn build_context(dir: &Path) -> AppContext {
    AppContext::new_with_paths(
        dir.join("config.json"),
        dir.join("events.json"),
        dir.join("logs"),
    )
    .expect("context should load")
}

pub fn read_log_contents(dir: &Path) -> Option<String> {
    let mut entries = fs::read_dir(dir.join("logs")).ok()?;
    let entry = entries.find_map(|e| e.ok())?;
    fs::read_to_string(entry.path()).ok()
}
