//! Shared CLI output formatting: colors, symbols, and the lightweight
//! Markdown rendering applied to returned summaries.

/// Check if color output is enabled.
pub fn color_enabled() -> bool {
    // Respect NO_COLOR env (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("GISTIFY_NO_COLOR").is_ok() {
        return false;
    }
    // Default: enable color if stdout is a terminal
    atty_stdout()
}

/// Check if stdout is a TTY.
fn atty_stdout() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

#[cfg(unix)]
extern "C" {
    fn isatty(fd: std::os::raw::c_int) -> std::os::raw::c_int;
}

#[cfg(unix)]
unsafe fn libc_isatty(fd: i32) -> i32 {
    unsafe { isatty(fd) }
}

#[cfg(not(unix))]
unsafe fn libc_isatty(_fd: i32) -> i32 {
    0
}

// ANSI color codes
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self::with_color(color_enabled())
    }

    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Green checkmark symbol.
    pub fn ok_sym(&self) -> &str {
        if self.use_color {
            "\x1b[32m\u{2713}\x1b[0m"
        } else {
            "OK"
        }
    }

    /// Red X symbol.
    pub fn fail_sym(&self) -> &str {
        if self.use_color {
            "\x1b[31m\u{2717}\x1b[0m"
        } else {
            "!!"
        }
    }

    pub fn dim(&self, s: &str) -> String {
        if self.use_color {
            format!("{DIM}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn bold(&self, s: &str) -> String {
        if self.use_color {
            format!("{BOLD}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a returned summary for the terminal.
///
/// Heuristics, not a Markdown engine: `**bold**` spans become ANSI bold
/// (or are unwrapped when color is off), `*`/`-` list lines become `•`
/// bullets, and runs of blank lines collapse to one paragraph break.
pub fn render_summary(text: &str, s: &Styled) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut last_blank = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !last_blank && !out.is_empty() {
                out.push(String::new());
            }
            last_blank = true;
            continue;
        }
        last_blank = false;

        let rendered = if let Some(item) = trimmed
            .strip_prefix("* ")
            .or_else(|| trimmed.strip_prefix("- "))
        {
            format!("  \u{2022} {}", apply_bold(item, s))
        } else {
            apply_bold(trimmed, s)
        };
        out.push(rendered);
    }

    // Drop a trailing paragraph break.
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

fn apply_bold(line: &str, s: &Styled) -> String {
    // Bold spans never nest; a non-greedy match is enough.
    let re = regex::Regex::new(r"\*\*(.+?)\*\*").expect("static regex");
    re.replace_all(line, |caps: &regex::Captures<'_>| s.bold(&caps[1]))
        .into_owned()
}

/// Print an error message the way every command reports failure.
pub fn print_error(s: &Styled, message: &str) {
    eprintln!("  {} {message}", s.fail_sym());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Styled {
        Styled::with_color(false)
    }

    #[test]
    fn test_render_bullets() {
        let text = "* **Topic:** the detail\n- second item";
        let out = render_summary(text, &plain());
        assert_eq!(out, "  \u{2022} Topic: the detail\n  \u{2022} second item");
    }

    #[test]
    fn test_render_unwraps_bold_without_color() {
        let out = render_summary("a **key** phrase", &plain());
        assert_eq!(out, "a key phrase");
    }

    #[test]
    fn test_render_bold_with_color() {
        let styled = Styled::with_color(true);
        let out = render_summary("a **key** phrase", &styled);
        assert_eq!(out, "a \x1b[1mkey\x1b[0m phrase");
    }

    #[test]
    fn test_render_collapses_blank_runs() {
        let text = "first paragraph\n\n\n\nsecond paragraph\n\n";
        let out = render_summary(text, &plain());
        assert_eq!(out, "first paragraph\n\nsecond paragraph");
    }

    #[test]
    fn test_render_leaves_unbalanced_markers() {
        let out = render_summary("stray ** marker", &plain());
        assert_eq!(out, "stray ** marker");
    }
}
