//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `normalize.rs` — blank-run collapse for dotfile rewrites.
//! - `dotfile.rs` — hook composition + backup/restore safe writer.
//! - `direnv.rs` — version probe, install invocation, hook orchestration.
//! - `nix_conf.rs` — config snapshot + required-attribute policy checks.
//! - `platform.rs` — platform family, user lookup, nix presence gate.
//! - `storage.rs` — best-effort audit log.
//! - `output.rs` — status painting and report rendering helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod direnv;
pub mod dotfile;
pub mod nix_conf;
pub mod normalize;
pub mod output;
pub mod platform;
pub mod storage;
