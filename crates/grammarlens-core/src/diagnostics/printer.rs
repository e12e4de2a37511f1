//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::{DiagnosticMessage, Diagnostics, Severity};

/// Builder for rendering diagnostics with various options.
///
/// Spanned diagnostics are rendered as annotated snippets when a source is
/// attached; everything else falls back to one line per diagnostic.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match (self.source, diag.range) {
                (Some(source), Some(range)) => {
                    self.format_snippet(w, &renderer, diag, source, range)?
                }
                _ => write!(w, "{}", diag)?,
            }
        }

        Ok(())
    }

    fn format_snippet(
        &self,
        w: &mut impl Write,
        renderer: &Renderer,
        diag: &DiagnosticMessage,
        source: &str,
        range: TextRange,
    ) -> std::fmt::Result {
        let range = adjust_range(range, source.len());

        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(range).label(&diag.message));

        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let level = severity_to_level(diag.severity());
        let report: Vec<Group> = vec![level.primary_title(&diag.message).element(snippet)];

        write!(w, "{}", renderer.render(&report))
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end.min(limit)
}
