#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Grammar rule segmentation.
//!
//! - `lexer` - tokenizes grammar text into a [`TokenStream`]
//! - `rule` - one rule's span: alternatives, blocks, left recursion
//! - `projection` - folding/breakpoint views and persistence identity of a rule
//! - `grammar` - finds rules in a token stream and links references
//!
//! Rules never own tokens. They hold index ranges into the stream that
//! produced them, and every query takes that stream as an argument.
//!
//! # Example
//!
//! ```
//! use grammarlens_syntax::GrammarSyntax;
//!
//! let (grammar, diagnostics) = GrammarSyntax::parse("e : e '+' t | t ;\nt : ID ;");
//! assert!(diagnostics.is_empty());
//!
//! let rule = grammar.rule("e").unwrap();
//! assert!(rule.has_left_recursion());
//! assert_eq!(rule.left_recursion_removed_text(grammar.stream()), "(t) ('+' t)*");
//! ```

pub mod grammar;
pub mod lexer;
pub mod projection;
pub mod rule;
mod token;

#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod test_utils;

pub use grammar::{GrammarSyntax, Reference};
pub use lexer::{TokenKind, lex};
pub use projection::{BreakpointSite, Folding};
pub use rule::{Alternative, Rule, RuleKind, RuleSpan};
pub use token::{Token, TokenStream};
