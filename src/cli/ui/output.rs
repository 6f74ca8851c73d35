use console::style;

/// Status lines for interactive commands.
///
/// Results a script may consume (published URLs, generated JSON) go to
/// stdout with plain `println!`; these decorated lines go to stderr.
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        eprintln!("{} {}", style("✓").green(), message);
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", style("⚠").yellow(), message);
    }

    pub fn detail(&self, label: &str, value: &str) {
        eprintln!("  {} {}", style(format!("{label:<10}")).dim(), value);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
