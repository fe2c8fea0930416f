use crate::domain::models::JsonOut;
use colored::Colorize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
    Neutral,
}

/// Pure formatting: status + text in, painted string out. `colored`
/// disables itself on non-terminal streams and under NO_COLOR.
pub fn paint(status: Status, text: &str) -> String {
    match status {
        Status::Pass => text.green().to_string(),
        Status::Fail => text.red().to_string(),
        Status::Neutral => text.yellow().to_string(),
    }
}

pub fn ind(text: &str, n: usize) -> String {
    format!("{}{}", "  ".repeat(n), text)
}

pub fn print_status(status: Status, text: &str) {
    match status {
        Status::Fail => eprintln!("{}", paint(status, text)),
        _ => println!("{}", paint(status, text)),
    }
}

/// `* <name>: PASSED/FAILED` line used by both check families.
pub fn print_report_line(name: &str, passed: bool) {
    let (status, verdict) = if passed {
        (Status::Pass, "PASSED")
    } else {
        (Status::Fail, "FAILED")
    };
    print_status(status, &ind(&format!("* {}: {}", name, verdict), 2));
}

pub fn print_json<T: Serialize>(ok: bool, data: T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok, data })?
    );
    Ok(())
}
