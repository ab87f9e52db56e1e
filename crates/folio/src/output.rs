//! Styled build progress on stderr.

use std::fmt::Display;

use console::{Style, Term};

/// Width labels are right-aligned to in [`Output::step`].
const LABEL_WIDTH: usize = 10;

/// Build progress reporter.
pub(crate) struct Output {
    term: Term,
    label: Style,
    ok: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red().bold(),
        }
    }

    /// Labelled step, e.g. `    Config  /site/folio.toml`.
    pub(crate) fn step(&self, label: &str, detail: impl Display) {
        let label = format!("{label:>LABEL_WIDTH$}");
        self.line(format!("{}  {detail}", self.label.apply_to(label)));
    }

    pub(crate) fn success(&self, msg: impl Display) {
        self.line(self.ok.apply_to(msg));
    }

    pub(crate) fn warning(&self, msg: impl Display) {
        self.line(self.warn.apply_to(format!("warning: {msg}")));
    }

    pub(crate) fn error(&self, msg: impl Display) {
        self.line(self.fail.apply_to(msg));
    }

    fn line(&self, text: impl Display) {
        let _ = self.term.write_line(&text.to_string());
    }
}
