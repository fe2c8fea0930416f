use crate::domain::models::Platform;

#[derive(Debug, thiserror::Error)]
#[error("Nix is not installed on this system.")]
pub struct NixMissing;

/// Top-level gate: every check needs the `nix` CLI on PATH.
pub fn ensure_nix_present() -> Result<(), NixMissing> {
    which::which("nix").map(|_| ()).map_err(|_| NixMissing)
}

pub fn platform() -> Platform {
    if cfg!(target_os = "macos") {
        Platform::Darwin
    } else {
        Platform::Other
    }
}

pub fn is_apple_silicon() -> bool {
    cfg!(all(target_os = "macos", target_arch = "aarch64"))
}

/// Login name as the environment reports it, `getpass`-style lookup order.
pub fn current_user() -> Option<String> {
    ["USER", "LOGNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .filter(|user| !user.is_empty())
}
