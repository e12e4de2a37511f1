//! Automaton arena for grammar rules.
//!
//! States live in a flat vector and are referenced by [`StateId`]. Each rule
//! registers a `(start, stop)` pair; the stop state is the rule's accept state.
//!
//! A rule-reference transition points at the state that follows the call.
//! The called rule's own states are never entered from the caller, so the
//! states reachable from a rule's start stay within that rule.

use grammarlens_core::StateId;
use indexmap::IndexMap;

use crate::optimize::{AutomatonGraph, build_graph};

/// What a transition consumes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Epsilon,
    /// Terminal: literal, token name, range or wildcard, as written.
    Symbol(String),
    /// Call of another rule.
    Rule(String),
}

impl Label {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Self::Epsilon)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Epsilon => f.write_str("ε"),
            Self::Symbol(text) => f.write_str(text),
            Self::Rule(name) => write!(f, "<{name}>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub label: Label,
    pub target: StateId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    pub transitions: Vec<Transition>,
    pub accepting: bool,
}

/// A piece of automaton with a single entry and a single exit state.
///
/// Combinators connect fragments through epsilon transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub entry: StateId,
    pub exit: StateId,
}

impl Fragment {
    pub fn new(entry: StateId, exit: StateId) -> Self {
        Self { entry, exit }
    }

    pub fn single(state: StateId) -> Self {
        Self {
            entry: state,
            exit: state,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleAutomaton {
    pub start: StateId,
    pub stop: StateId,
}

/// Source of rule automata for graph assembly.
pub trait AutomatonProvider {
    /// Start state of `rule`, `None` when the rule has no automaton.
    fn start_state(&self, rule: &str) -> Option<StateId>;

    /// Collect the states reachable from `start`, optionally without
    /// redundant epsilon states.
    fn build(&self, start: StateId, optimize: bool) -> AutomatonGraph;
}

#[derive(Debug, Clone, Default)]
pub struct Automaton {
    states: Vec<State>,
    rules: IndexMap<String, RuleAutomaton>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self) -> StateId {
        let id = StateId::from_raw(self.states.len() as u32);
        self.states.push(State::default());
        id
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    pub fn get(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (StateId::from_raw(i as u32), s))
    }

    pub fn connect(&mut self, from: StateId, to: StateId, label: Label) {
        self.states[from.index()]
            .transitions
            .push(Transition { label, target: to });
    }

    pub fn rule(&self, name: &str) -> Option<RuleAutomaton> {
        self.rules.get(name).copied()
    }

    /// Registered rules in definition order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, RuleAutomaton)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Wrap `body` in fresh start and stop states and register it as `name`.
    ///
    /// A later definition under the same name replaces the earlier one.
    pub fn define_rule(&mut self, name: impl Into<String>, body: Fragment) -> RuleAutomaton {
        let start = self.add_state();
        let stop = self.add_state();
        self.connect(start, body.entry, Label::Epsilon);
        self.connect(body.exit, stop, Label::Epsilon);
        self.states[stop.index()].accepting = true;

        let rule = RuleAutomaton { start, stop };
        self.rules.insert(name.into(), rule);
        rule
    }

    // ─────────────────────────────────────────────────────────────────────
    // Fragment Combinators
    // ─────────────────────────────────────────────────────────────────────

    fn labelled_fragment(&mut self, label: Label) -> Fragment {
        let entry = self.add_state();
        let exit = self.add_state();
        self.connect(entry, exit, label);
        Fragment::new(entry, exit)
    }

    pub fn symbol(&mut self, text: impl Into<String>) -> Fragment {
        self.labelled_fragment(Label::Symbol(text.into()))
    }

    pub fn rule_ref(&mut self, name: impl Into<String>) -> Fragment {
        self.labelled_fragment(Label::Rule(name.into()))
    }

    pub fn epsilon_fragment(&mut self) -> Fragment {
        Fragment::single(self.add_state())
    }

    /// f1 → f2 → ... → fn
    pub fn sequence(&mut self, fragments: &[Fragment]) -> Fragment {
        match fragments {
            [] => self.epsilon_fragment(),
            [only] => *only,
            [first, .., last] => {
                for window in fragments.windows(2) {
                    self.connect(window[0].exit, window[1].entry, Label::Epsilon);
                }
                Fragment::new(first.entry, last.exit)
            }
        }
    }

    /// entry → [f1 | f2 | ... | fn] → exit
    pub fn alternation(&mut self, fragments: &[Fragment]) -> Fragment {
        match fragments {
            [] => self.epsilon_fragment(),
            [only] => *only,
            _ => {
                let entry = self.add_state();
                let exit = self.add_state();
                for f in fragments {
                    self.connect(entry, f.entry, Label::Epsilon);
                    self.connect(f.exit, exit, Label::Epsilon);
                }
                Fragment::new(entry, exit)
            }
        }
    }

    /// inner?
    pub fn optional(&mut self, inner: Fragment) -> Fragment {
        let entry = self.add_state();
        let exit = self.add_state();
        self.connect(entry, inner.entry, Label::Epsilon);
        self.connect(entry, exit, Label::Epsilon);
        self.connect(inner.exit, exit, Label::Epsilon);
        Fragment::new(entry, exit)
    }

    /// inner*
    ///
    /// ```text
    ///          ┌──────────────┐
    ///          ↓              │
    /// entry ─→ branch ─→ inner ─┘
    ///            │
    ///            └─→ exit
    /// ```
    pub fn zero_or_more(&mut self, inner: Fragment) -> Fragment {
        let branch = self.add_state();
        let exit = self.add_state();
        self.connect(branch, inner.entry, Label::Epsilon);
        self.connect(branch, exit, Label::Epsilon);
        self.connect(inner.exit, branch, Label::Epsilon);
        Fragment::new(branch, exit)
    }

    /// inner+
    pub fn one_or_more(&mut self, inner: Fragment) -> Fragment {
        let exit = self.add_state();
        self.connect(inner.exit, inner.entry, Label::Epsilon);
        self.connect(inner.exit, exit, Label::Epsilon);
        Fragment::new(inner.entry, exit)
    }
}

impl AutomatonProvider for Automaton {
    fn start_state(&self, rule: &str) -> Option<StateId> {
        self.rule(rule).map(|r| r.start)
    }

    fn build(&self, start: StateId, optimize: bool) -> AutomatonGraph {
        build_graph(self, start, optimize)
    }
}
