//! Building graphs, and graph groups for grammar errors.

use grammarlens_core::{DiagnosticKind, Diagnostics, GrammarError};

use crate::automaton::AutomatonProvider;
use crate::config::AssemblerConfig;
use crate::graph::Graph;
use crate::group::GraphGroup;
use crate::render::{GraphRenderer, PlainRenderer};

/// Result of [`GraphAssembler::build_for_rule_with_errors`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visualization {
    /// No errors: the rule's own graph.
    Graphs(Vec<Graph>),
    /// One group per error.
    Groups(Vec<GraphGroup>),
}

#[derive(Debug, Clone, Default)]
pub struct GraphAssembler<R = PlainRenderer> {
    config: AssemblerConfig,
    renderer: R,
}

impl GraphAssembler<PlainRenderer> {
    pub fn new(config: AssemblerConfig) -> Self {
        Self::with_renderer(config, PlainRenderer)
    }
}

impl<R: GraphRenderer> GraphAssembler<R> {
    pub fn with_renderer(config: AssemblerConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    pub fn is_optimizing(&self) -> bool {
        self.config.optimize
    }

    pub fn set_optimize(&mut self, optimize: bool) {
        self.config.optimize = optimize;
    }

    /// Flip epsilon elimination for automata built from now on. Returns the new setting.
    pub fn toggle_optimization(&mut self) -> bool {
        self.config.optimize = !self.config.optimize;
        self.config.optimize
    }

    /// The graph of `rule`, or `None` when the provider has no start state for it.
    pub fn build_for_rule<P>(
        &self,
        provider: &P,
        rule: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<Vec<Graph>>
    where
        P: AutomatonProvider + ?Sized,
    {
        self.build_graph(provider, rule, diagnostics)
            .map(|graph| vec![graph])
    }

    /// Graphs for `rule` when `errors` is empty, otherwise one group per error.
    pub fn build_for_rule_with_errors<P>(
        &self,
        provider: &P,
        rule: &str,
        errors: &[GrammarError],
        diagnostics: &mut Diagnostics,
    ) -> Option<Visualization>
    where
        P: AutomatonProvider + ?Sized,
    {
        if errors.is_empty() {
            return self
                .build_for_rule(provider, rule, diagnostics)
                .map(Visualization::Graphs);
        }

        let groups = errors
            .iter()
            .map(|error| self.build_graph_group(provider, error, diagnostics))
            .collect();
        Some(Visualization::Groups(groups))
    }

    /// Graphs of the rules named by `error` that its paths touch, plus the paths.
    ///
    /// Rules without a start state are skipped. The first path starts
    /// visible; the others start hidden.
    pub fn build_graph_group<P>(
        &self,
        provider: &P,
        error: &GrammarError,
        diagnostics: &mut Diagnostics,
    ) -> GraphGroup
    where
        P: AutomatonProvider + ?Sized,
    {
        let mut group = GraphGroup::new(&error.message);

        for rule in &error.rules {
            let Some(graph) = self.build_graph(provider, rule, diagnostics) else {
                continue;
            };
            if error.paths.iter().any(|p| graph.contains_any_state(p)) {
                group.add_graph(graph);
            } else {
                tracing::debug!(rule = rule.as_str(), "graph not on any error path, dropped");
            }
        }

        for (i, states) in error.paths.iter().enumerate() {
            group.add_path(states.clone(), error.is_path_disabled(i));
        }

        if group.path_count() > 0 {
            group.set_path_visible(0, true);
        } else {
            diagnostics
                .report_unspanned(DiagnosticKind::EmptyDiagnosticPath)
                .message(&error.message)
                .emit();
        }

        group
    }

    fn build_graph<P>(&self, provider: &P, rule: &str, diagnostics: &mut Diagnostics) -> Option<Graph>
    where
        P: AutomatonProvider + ?Sized,
    {
        let Some(start) = provider.start_state(rule) else {
            tracing::debug!(rule, "no start state");
            diagnostics
                .report_unspanned(DiagnosticKind::UnresolvedRule)
                .message(rule)
                .emit();
            return None;
        };

        let automaton = provider.build(start, self.config.optimize);
        Some(self.renderer.render(rule, &automaton))
    }
}
