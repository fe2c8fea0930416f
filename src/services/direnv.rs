use crate::domain::constants::MIN_DIRENV_VERSION;
use crate::domain::models::{DotfileOutcome, HookReport, Platform};
use crate::services::dotfile::{compose_dotfile, dotfiles_for, overwrite_dotfile_safely};
use dialoguer::Confirm;
use std::fs;
use std::path::Path;
use std::process::Command;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolStatus {
    /// Installed at or above the required minimum; carries the probed version.
    UpToDate(String),
    /// Installed but below the minimum, or reporting an unparsable version.
    Stale(String),
    NotFound,
}

impl ToolStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ToolStatus::UpToDate(_) => "ok",
            ToolStatus::Stale(_) => "stale",
            ToolStatus::NotFound => "not_found",
        }
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            ToolStatus::UpToDate(v) | ToolStatus::Stale(v) => Some(v),
            ToolStatus::NotFound => None,
        }
    }
}

pub fn parse_version(raw: &str) -> Option<Vec<u64>> {
    let parts: Result<Vec<u64>, _> = raw.trim().split('.').map(str::parse).collect();
    parts.ok().filter(|parts| !parts.is_empty())
}

pub fn meets_minimum(version: &[u64]) -> bool {
    version >= &MIN_DIRENV_VERSION[..]
}

pub fn probe_direnv() -> ToolStatus {
    let output = match Command::new("direnv").arg("--version").output() {
        Ok(output) if output.status.success() => output,
        _ => return ToolStatus::NotFound,
    };
    let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
    match parse_version(&raw) {
        Some(version) if meets_minimum(&version) => ToolStatus::UpToDate(raw),
        _ => ToolStatus::Stale(raw),
    }
}

/// `nix profile install nixpkgs#direnv`; stderr text is the diagnostic on
/// a non-zero exit.
pub fn install_direnv() -> Result<(), String> {
    match Command::new("nix")
        .args(["profile", "install", "nixpkgs#direnv"])
        .output()
    {
        Ok(output) if output.status.success() => Ok(()),
        Ok(output) => Err(String::from_utf8_lossy(&output.stderr).trim().to_string()),
        Err(err) => Err(err.to_string()),
    }
}

/// Install decision used outside of tests: `--yes` accepts, unattended
/// sessions decline, an interactive prompt defaults to yes on empty input.
pub fn interactive_decision(assume_yes: bool, attended: bool) -> impl Fn(&ToolStatus) -> bool {
    move |_status| {
        if assume_yes {
            return true;
        }
        if !attended {
            return false;
        }
        Confirm::new()
            .with_prompt("Install direnv with Nix?")
            .default(true)
            .interact()
            .unwrap_or(false)
    }
}

/// Drive the full hook-installation flow: probe, optionally install, then
/// configure every target dotfile. A failure on one dotfile is reported
/// and the remaining files are still processed.
pub fn run_hooks_check(
    home: &Path,
    platform: Platform,
    decide: impl Fn(&ToolStatus) -> bool,
) -> HookReport {
    let status = probe_direnv();
    let mut installed = matches!(status, ToolStatus::UpToDate(_));
    let mut install_error = None;
    let mut ready = true;

    if !installed {
        if decide(&status) {
            match install_direnv() {
                Ok(()) => installed = true,
                Err(err) => {
                    install_error = Some(err);
                    ready = false;
                }
            }
        } else {
            ready = false;
        }
    }

    let mut dotfiles = Vec::new();
    if installed {
        for name in dotfiles_for(platform) {
            match configure_dotfile(home, platform, name) {
                Ok(()) => dotfiles.push(DotfileOutcome {
                    dotfile: name.to_string(),
                    status: "configured".to_string(),
                    detail: None,
                }),
                Err(err) => {
                    ready = false;
                    dotfiles.push(DotfileOutcome {
                        dotfile: name.to_string(),
                        status: "failed".to_string(),
                        detail: Some(format!("{err:#}")),
                    });
                }
            }
        }
    }

    HookReport {
        tool_status: status.label().to_string(),
        version: status.version().map(str::to_string),
        installed,
        install_error,
        dotfiles,
        ready,
    }
}

fn configure_dotfile(home: &Path, platform: Platform, name: &str) -> anyhow::Result<()> {
    let path = home.join(name);
    if !path.exists() {
        fs::write(&path, "")?;
    }
    let current: Vec<String> = fs::read_to_string(&path)?
        .lines()
        .map(str::to_string)
        .collect();
    let next = compose_dotfile(platform, name, &current);
    overwrite_dotfile_safely(&path, &next)
}
