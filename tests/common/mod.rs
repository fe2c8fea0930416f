use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated environment for driving the real binary: a private HOME for
/// dotfiles and a private PATH holding stub `nix`/`direnv` executables.
pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let bin = tmp.path().join("bin");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&bin).expect("create stub bin dir");
        Self {
            _tmp: tmp,
            home,
            bin,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("nixready").expect("nixready binary");
        cmd.env("HOME", &self.home)
            .env("PATH", &self.bin)
            .env("USER", "dev");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_fail(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn install_stub(&self, name: &str, body: &str) {
        let path = self.bin.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write stub");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path).expect("stub metadata").permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms).expect("mark stub executable");
        }
    }

    /// Stub `nix` answering `--version`, `show-config --json` (with the
    /// given snapshot) and `profile install` (success).
    pub fn stub_nix(&self, show_config: &Value) {
        let payload = serde_json::to_string(show_config).expect("serialize snapshot fixture");
        let body = format!(
            "case \"$1\" in\n\
             \x20 --version) echo \"nix (Nix) 2.18.1\" ;;\n\
             \x20 show-config) printf '%s' '{payload}' ;;\n\
             \x20 profile) exit 0 ;;\n\
             \x20 *) exit 1 ;;\n\
             esac"
        );
        self.install_stub("nix", &body);
    }

    pub fn stub_direnv(&self, version: &str) {
        let body = format!(
            "case \"$1\" in\n\
             \x20 --version) echo \"{version}\" ;;\n\
             \x20 *) exit 1 ;;\n\
             esac"
        );
        self.install_stub("direnv", &body);
    }
}

/// Snapshot satisfying the whole policy for user `dev`.
pub fn compliant_config() -> Value {
    json!({
        "keep-derivations": {"value": true},
        "keep-outputs": {"value": true},
        "experimental-features": {"value": ["nix-command", "flakes", "ca-derivations"]},
        "extra-platforms": {"value": ["x86_64-darwin", "aarch64-darwin"]},
        "system": {"value": "x86_64-darwin"},
        "trusted-users": {"value": ["root", "dev"]},
    })
}
