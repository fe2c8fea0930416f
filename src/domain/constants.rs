//! Stable constants: the required-attribute policy and the canonical
//! dotfile snippets. Not user-configurable.

/// Minimum supported direnv version.
pub const MIN_DIRENV_VERSION: [u64; 2] = [2, 30];

/// Prefix identifying a previously inserted activation line, whichever
/// shell it targets.
pub const DIRENV_HOOK_PREFIX: &str = "eval \"$(direnv hook";

pub const BASH_HOOK: &str = "eval \"$(direnv hook bash)\"";
pub const ZSH_HOOK: &str = "eval \"$(direnv hook zsh)\"";

/// Daemon failsafe sourced at the top of darwin dotfiles. macOS system
/// updates rewrite /etc/*rc and drop the installer-provided block.
pub const DAEMON_SNIPPET: [&str; 3] = [
    "# Nix",
    "[ -e '/nix/var/nix/profiles/default/etc/profile.d/nix-daemon.sh' ] && . '/nix/var/nix/profiles/default/etc/profile.d/nix-daemon.sh'",
    "# End Nix",
];

pub const REQUIRED_FLAGS: [&str; 2] = ["keep-derivations", "keep-outputs"];

pub const REQUIRED_EXPERIMENTAL_FEATURES: [&str; 3] =
    ["nix-command", "flakes", "ca-derivations"];

/// Required only when the platform-attribute condition holds (see
/// `needs_platform_attrs`): rosetta builds need both darwin platforms.
pub const REQUIRED_EXTRA_PLATFORMS: [&str; 2] = ["x86_64-darwin", "aarch64-darwin"];

pub const REQUIRED_SYSTEM: &str = "x86_64-darwin";

/// The one project whose toolchain still requires x86_64 builds on Apple
/// silicon hosts.
pub const PLATFORM_ATTRS_APP: &str = "jambhala";
