use crate::domain::constants::{
    REQUIRED_EXPERIMENTAL_FEATURES, REQUIRED_EXTRA_PLATFORMS, REQUIRED_FLAGS, REQUIRED_SYSTEM,
};
use crate::domain::models::{AttrReport, ConfReport};
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::process::Command;

/// One setting as `nix show-config --json` reports it. Nix emits more
/// fields (description, defaultValue); only the effective value matters
/// here.
#[derive(Debug, Deserialize)]
pub struct AttrValue {
    pub value: serde_json::Value,
}

pub type ConfSnapshot = BTreeMap<String, AttrValue>;

#[derive(Debug, thiserror::Error)]
pub enum ConfError {
    #[error("'{0}' is not set in nix.conf")]
    MissingAttr(String),
    #[error("'{attribute}' in nix.conf is not a {expected}")]
    WrongShape {
        attribute: String,
        expected: &'static str,
    },
}

/// Snapshot the daemon configuration once per run. A failing command or
/// unparsable output is fatal for the run.
pub fn load_snapshot() -> anyhow::Result<ConfSnapshot> {
    let output = Command::new("nix")
        .args(["show-config", "--json"])
        .output()
        .context("run `nix show-config --json`")?;
    if !output.status.success() {
        anyhow::bail!(
            "`nix show-config` failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    serde_json::from_slice(&output.stdout).context("parse `nix show-config --json` output")
}

fn as_bool(attribute: &str, value: &serde_json::Value) -> Result<bool, ConfError> {
    value.as_bool().ok_or(ConfError::WrongShape {
        attribute: attribute.to_string(),
        expected: "boolean",
    })
}

fn as_str<'v>(attribute: &str, value: &'v serde_json::Value) -> Result<&'v str, ConfError> {
    value.as_str().ok_or(ConfError::WrongShape {
        attribute: attribute.to_string(),
        expected: "string",
    })
}

fn as_string_set(attribute: &str, value: &serde_json::Value) -> Result<BTreeSet<String>, ConfError> {
    let items = value.as_array().ok_or(ConfError::WrongShape {
        attribute: attribute.to_string(),
        expected: "list of strings",
    })?;
    items
        .iter()
        .map(|item| as_str(attribute, item).map(str::to_string))
        .collect()
}

/// Evaluate one named attribute against a predicate. The predicate returns
/// pass/fail plus the itemized missing members (empty when not a set
/// check); a missing or ill-shaped attribute becomes a failed report
/// carrying the typed lookup error as its detail.
pub fn check_attr<F>(snapshot: &ConfSnapshot, attribute: &str, detail: &str, pred: F) -> AttrReport
where
    F: FnOnce(&serde_json::Value) -> Result<(bool, Vec<String>), ConfError>,
{
    let outcome = snapshot
        .get(attribute)
        .ok_or_else(|| ConfError::MissingAttr(attribute.to_string()))
        .and_then(|attr| pred(&attr.value));
    match outcome {
        Ok((true, _)) => AttrReport {
            attribute: attribute.to_string(),
            passed: true,
            missing: Vec::new(),
            detail: None,
        },
        Ok((false, missing)) => AttrReport {
            attribute: attribute.to_string(),
            passed: false,
            missing,
            detail: Some(detail.to_string()),
        },
        Err(err) => AttrReport {
            attribute: attribute.to_string(),
            passed: false,
            missing: Vec::new(),
            detail: Some(err.to_string()),
        },
    }
}

fn check_flag(snapshot: &ConfSnapshot, attribute: &str) -> AttrReport {
    let detail = format!("'{attribute} = true' is missing in nix.conf.");
    check_attr(snapshot, attribute, &detail, |value| {
        Ok((as_bool(attribute, value)?, Vec::new()))
    })
}

fn check_superset(snapshot: &ConfSnapshot, attribute: &str, required: &[&str]) -> AttrReport {
    let detail = format!("The following '{attribute}' items are missing in nix.conf:");
    check_attr(snapshot, attribute, &detail, |value| {
        let current = as_string_set(attribute, value)?;
        let missing: Vec<String> = required
            .iter()
            .filter(|item| !current.contains(**item))
            .map(|item| item.to_string())
            .collect();
        Ok((missing.is_empty(), missing))
    })
}

fn check_system(snapshot: &ConfSnapshot) -> AttrReport {
    let detail = format!("'system = {REQUIRED_SYSTEM}' is missing in nix.conf.");
    check_attr(snapshot, "system", &detail, |value| {
        Ok((as_str("system", value)? == REQUIRED_SYSTEM, Vec::new()))
    })
}

fn check_trusted_users(snapshot: &ConfSnapshot, user: Option<&str>) -> AttrReport {
    let Some(user) = user else {
        return AttrReport {
            attribute: "trusted-users".to_string(),
            passed: false,
            missing: Vec::new(),
            detail: Some("could not determine the current user from the environment".to_string()),
        };
    };
    let detail = format!("'trusted-users = root {user}' is missing in nix.conf.");
    check_attr(snapshot, "trusted-users", &detail, |value| {
        let users = as_string_set("trusted-users", value)?;
        Ok((
            users.contains("root") && users.contains(user),
            Vec::new(),
        ))
    })
}

/// Validate the snapshot against the full required-attribute policy.
/// Checks guarded by `needs_platform_attrs` are omitted entirely when the
/// condition is false; report order follows policy declaration order.
pub fn check_nix_conf(
    snapshot: &ConfSnapshot,
    needs_platform_attrs: bool,
    user: Option<&str>,
) -> ConfReport {
    let mut attributes = Vec::new();
    if needs_platform_attrs {
        attributes.push(check_system(snapshot));
    }
    attributes.push(check_superset(
        snapshot,
        "experimental-features",
        &REQUIRED_EXPERIMENTAL_FEATURES,
    ));
    if needs_platform_attrs {
        attributes.push(check_superset(
            snapshot,
            "extra-platforms",
            &REQUIRED_EXTRA_PLATFORMS,
        ));
    }
    attributes.push(check_trusted_users(snapshot, user));
    for flag in REQUIRED_FLAGS {
        attributes.push(check_flag(snapshot, flag));
    }

    ConfReport {
        passed: attributes.iter().all(|attr| attr.passed),
        attributes,
    }
}
