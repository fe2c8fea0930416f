use std::io::Write;
use std::path::PathBuf;

fn audit_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".local/state/nixready/audit.jsonl"))
}

/// Best-effort JSONL audit trail of check outcomes and dotfile mutations.
/// Failures to record are ignored; auditing never blocks a check.
pub fn audit(action: &str, data: serde_json::Value) {
    let Some(path) = audit_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": unix_now(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| f.write_all(line.as_bytes()));
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
