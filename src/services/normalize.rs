/// Collapse blank-line runs and trim per-line whitespace.
///
/// Repeated hook insertion must not grow dotfiles: runs of up to two blank
/// lines collapse to exactly one, longer runs are dropped entirely, and
/// non-blank lines are re-emitted trimmed with a single trailing newline.
/// The two-or-fewer/more-than-two split is deliberate, documented behavior.
pub fn collapse_blank_runs<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < lines.len() {
        let blank = lines[i].as_ref().trim().is_empty();
        let mut j = i;
        while j < lines.len() && lines[j].as_ref().trim().is_empty() == blank {
            j += 1;
        }
        if blank {
            if j - i <= 2 {
                out.push('\n');
            }
        } else {
            for line in &lines[i..j] {
                out.push_str(line.as_ref().trim());
                out.push('\n');
            }
        }
        i = j;
    }
    out
}
