//! Editor-facing views of a rule.
//!
//! Folding and breakpoints each see a rule through a small projection built
//! from its canonical fields, so neither concern leaks into [`Rule`] itself.

use grammarlens_core::utils::rule_identity;

use crate::rule::Rule;
use crate::token::TokenStream;

/// What a rule looks like to code folding.
///
/// The foldable region runs from the `:` to the end of the terminating `;`;
/// the rule name stays visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folding {
    pub id: u32,
    pub expanded: bool,
    /// Only rules whose `:` and `;` sit on different lines can collapse.
    pub collapsible: bool,
    /// Start of the rule (the paragraph the fold belongs to).
    pub paragraph_offset: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    pub start_line: u32,
    pub end_line: u32,
    pub level: u32,
    pub placeholder: &'static str,
}

/// What a rule looks like to the debugger's breakpoint gutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointSite {
    pub id: u32,
    pub offset: usize,
    pub line: u32,
    pub enabled: bool,
}

pub const FOLDING_PLACEHOLDER: &str = ": ... ;";

impl Rule {
    /// Numeric identity that survives re-parsing (CRC-32 of the name).
    pub fn persistent_id(&self) -> u32 {
        rule_identity(self.name())
    }

    /// Carry user-set flags over from the same rule in a previous parse.
    pub fn restore_from(&mut self, previous: &Rule) {
        self.expanded = previous.expanded;
        self.breakpoint = previous.breakpoint;
    }

    pub fn can_be_collapsed(&self, stream: &TokenStream) -> bool {
        let span = self.span();
        match (stream.get(span.colon), stream.get(span.end)) {
            (Some(colon), Some(end)) => colon.start_line < end.start_line,
            _ => false,
        }
    }

    pub fn folding(&self, stream: &TokenStream) -> Folding {
        let span = self.span();
        let colon = stream.get(span.colon);
        let end = stream.get(span.end);

        Folding {
            id: self.persistent_id(),
            expanded: self.is_expanded(),
            collapsible: self.can_be_collapsed(stream),
            paragraph_offset: self.start_offset(stream),
            start_offset: colon.map_or(0, |t| usize::from(t.start())),
            end_offset: self.end_offset(stream),
            start_line: colon.map_or(0, |t| t.start_line),
            end_line: end.map_or(0, |t| t.end_line),
            level: 0,
            placeholder: FOLDING_PLACEHOLDER,
        }
    }

    pub fn breakpoint_site(&self, stream: &TokenStream) -> BreakpointSite {
        BreakpointSite {
            id: self.persistent_id(),
            offset: self.start_offset(stream),
            line: stream.get(self.span().start).map_or(0, |t| t.start_line),
            enabled: self.is_breakpoint(),
        }
    }
}
