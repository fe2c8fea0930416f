use crate::domain::constants::{BASH_HOOK, DAEMON_SNIPPET, DIRENV_HOOK_PREFIX, ZSH_HOOK};
use crate::domain::models::Platform;
use crate::services::normalize::collapse_blank_runs;
use anyhow::Context;
use std::fs;
use std::io;
use std::path::Path;

const DARWIN_DOTFILES: [&str; 4] = [".bash_profile", ".bashrc", ".zprofile", ".zshrc"];
const DEFAULT_DOTFILES: [&str; 1] = [".bashrc"];

pub fn dotfiles_for(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Darwin => &DARWIN_DOTFILES,
        Platform::Other => &DEFAULT_DOTFILES,
    }
}

pub fn activation_line(dotfile: &str) -> &'static str {
    match dotfile {
        ".zshrc" | ".zprofile" => ZSH_HOOK,
        _ => BASH_HOOK,
    }
}

pub fn is_hook_line(line: &str) -> bool {
    line.starts_with(DIRENV_HOOK_PREFIX)
}

fn is_daemon_snippet_line(line: &str) -> bool {
    DAEMON_SNIPPET.contains(&line.trim())
}

/// Compute the new full content for one dotfile.
///
/// Prior activation lines (and on darwin, prior daemon snippet lines) are
/// stripped before re-insertion, so repeated runs reach a fixed point: the
/// daemon snippet sits once at the top, the activation hook once at the
/// bottom, user content untouched in between.
pub fn compose_dotfile(platform: Platform, dotfile: &str, current: &[String]) -> Vec<String> {
    let kept = current
        .iter()
        .filter(|line| !is_hook_line(line))
        .filter(|line| platform != Platform::Darwin || !is_daemon_snippet_line(line))
        .cloned();

    let mut next = Vec::new();
    if platform == Platform::Darwin {
        next.extend(DAEMON_SNIPPET.iter().map(|line| line.to_string()));
        next.push(String::new());
    }
    next.extend(kept);
    next.push(String::new());
    next.push(activation_line(dotfile).to_string());
    next
}

/// Replace `path`'s content with the normalized `new_lines`, backed by a
/// copy in a private temporary directory. On a failed write the backup is
/// copied back over the target before the original error propagates; the
/// backup directory is removed on every exit path.
pub fn overwrite_dotfile_safely(path: &Path, new_lines: &[String]) -> anyhow::Result<()> {
    overwrite_with(path, new_lines, |target, content| fs::write(target, content))
}

fn overwrite_with(
    path: &Path,
    new_lines: &[String],
    write: impl FnOnce(&Path, &str) -> io::Result<()>,
) -> anyhow::Result<()> {
    let backup_dir = tempfile::tempdir().context("create backup directory")?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("dotfile");
    let backup = backup_dir.path().join(format!("{name}.bak"));
    fs::copy(path, &backup).with_context(|| format!("back up {}", path.display()))?;

    let content = collapse_blank_runs(new_lines);
    if let Err(err) = write(path, &content) {
        let _ = fs::copy(&backup, path);
        return Err(anyhow::Error::new(err).context(format!("update {}", path.display())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(content: &str) -> Vec<String> {
        content.lines().map(str::to_string).collect()
    }

    #[test]
    fn activation_line_follows_shell_family() {
        assert_eq!(activation_line(".bashrc"), BASH_HOOK);
        assert_eq!(activation_line(".bash_profile"), BASH_HOOK);
        assert_eq!(activation_line(".zshrc"), ZSH_HOOK);
        assert_eq!(activation_line(".zprofile"), ZSH_HOOK);
    }

    #[test]
    fn stale_hooks_are_stripped_before_reinsertion() {
        let current = lines_of("eval \"$(direnv hook bash)\"\nalias g=git\n");
        let next = compose_dotfile(Platform::Other, ".bashrc", &current);
        let hooks = next.iter().filter(|l| is_hook_line(l)).count();
        assert_eq!(hooks, 1);
        assert_eq!(next.last().map(String::as_str), Some(BASH_HOOK));
        assert!(next.contains(&"alias g=git".to_string()));
    }

    #[test]
    fn darwin_snippet_leads_and_hook_trails() {
        let current = lines_of("alias g=git\neval \"$(direnv hook zsh)\"\n");
        let next = compose_dotfile(Platform::Darwin, ".zshrc", &current);
        assert_eq!(&next[..3], &DAEMON_SNIPPET.map(String::from));
        assert_eq!(next.last().map(String::as_str), Some(ZSH_HOOK));
    }

    #[test]
    fn repeated_composition_keeps_one_hook_and_one_snippet() {
        let current = lines_of("# mine\nexport EDITOR=vi\n");
        for platform in [Platform::Darwin, Platform::Other] {
            let mut lines = current.clone();
            for _ in 0..3 {
                lines = compose_dotfile(platform, ".bashrc", &lines);
                assert_eq!(lines.iter().filter(|l| is_hook_line(l)).count(), 1);
                let snippet_markers = lines.iter().filter(|l| l.trim() == "# Nix").count();
                assert_eq!(snippet_markers, usize::from(platform == Platform::Darwin));
            }
        }
    }

    #[test]
    fn repeated_compose_and_write_rounds_leave_file_stable() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(".bashrc");
        fs::write(&path, "alias g=git\n").expect("seed dotfile");

        let mut previous = String::new();
        for round in 0..3 {
            let current = lines_of(&fs::read_to_string(&path).expect("read"));
            let next = compose_dotfile(Platform::Darwin, ".bashrc", &current);
            overwrite_dotfile_safely(&path, &next).expect("safe write");
            let written = fs::read_to_string(&path).expect("read back");
            if round > 0 {
                assert_eq!(written, previous);
            }
            previous = written;
        }
    }

    #[test]
    fn writer_normalizes_and_replaces_content() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(".bashrc");
        fs::write(&path, "old\n").expect("seed dotfile");

        let new_lines = lines_of("a\n\n\n\nb\n");
        overwrite_dotfile_safely(&path, &new_lines).expect("safe write");
        assert_eq!(fs::read_to_string(&path).expect("read back"), "a\nb\n");
    }

    #[test]
    fn writer_restores_backup_when_write_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(".bashrc");
        fs::write(&path, "precious\n").expect("seed dotfile");

        let result = overwrite_with(&path, &lines_of("new\n"), |target, _| {
            fs::write(target, "partial")?;
            Err(io::Error::other("disk full"))
        });
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).expect("read back"), "precious\n");
    }

    #[test]
    fn writer_requires_an_existing_target() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(".bashrc");
        assert!(overwrite_dotfile_safely(&path, &lines_of("x")).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn end_to_end_darwin_rewrite_of_a_stale_dotfile() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(".zshrc");
        fs::write(
            &path,
            "eval \"$(direnv hook zsh)\"\n\n\nalias g=git\n",
        )
        .expect("seed dotfile");

        let current = lines_of(&fs::read_to_string(&path).expect("read"));
        let next = compose_dotfile(Platform::Darwin, ".zshrc", &current);
        overwrite_dotfile_safely(&path, &next).expect("safe write");

        let written = fs::read_to_string(&path).expect("read back");
        assert!(written.starts_with("# Nix\n"));
        assert_eq!(written.matches("# End Nix").count(), 1);
        assert_eq!(written.matches(ZSH_HOOK).count(), 1);
        assert!(written.trim_end().ends_with(ZSH_HOOK));
        assert!(written.contains("alias g=git"));
    }
}
