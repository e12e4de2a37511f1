//! Graphs bundled with the diagnostic paths of one grammar error.
//!
//! At most one path is meant to be shown at a time: the group starts with
//! the first path visible and [`GraphGroup::select_next`] /
//! [`GraphGroup::select_previous`] step through the enabled ones. Showing
//! several at once is still possible through [`GraphGroup::show_all`].

use grammarlens_core::StateId;

use crate::graph::Graph;

/// One concrete trace through the automata, as an ordered state sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub states: Vec<StateId>,
    pub enabled: bool,
    pub visible: bool,
}

impl Path {
    pub fn new(states: Vec<StateId>, enabled: bool) -> Self {
        Self {
            states,
            enabled,
            visible: false,
        }
    }

    /// Consecutive state pairs, i.e. the edges the path walks.
    pub fn steps(&self) -> impl Iterator<Item = (StateId, StateId)> + '_ {
        self.states.windows(2).map(|w| (w[0], w[1]))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphGroup {
    name: String,
    graphs: Vec<Graph>,
    paths: Vec<Path>,
}

impl GraphGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_graph(&mut self, graph: Graph) {
        self.graphs.push(graph);
    }

    pub fn graphs(&self) -> &[Graph] {
        &self.graphs
    }

    pub fn graph(&self, name: &str) -> Option<&Graph> {
        self.graphs.iter().find(|g| g.name() == name)
    }

    /// Attach a path. New paths start hidden.
    pub fn add_path(&mut self, states: Vec<StateId>, disabled: bool) {
        self.paths.push(Path::new(states, !disabled));
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn path(&self, index: usize) -> Option<&Path> {
        self.paths.get(index)
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Returns `false` when `index` is out of range.
    pub fn set_path_visible(&mut self, index: usize, visible: bool) -> bool {
        match self.paths.get_mut(index) {
            Some(path) => {
                path.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Flip the enabled flag. Returns the new value, `None` when out of range.
    pub fn toggle_path_enabled(&mut self, index: usize) -> Option<bool> {
        let path = self.paths.get_mut(index)?;
        path.enabled = !path.enabled;
        Some(path.enabled)
    }

    pub fn show_all(&mut self) {
        for path in &mut self.paths {
            path.visible = true;
        }
    }

    pub fn hide_all(&mut self) {
        for path in &mut self.paths {
            path.visible = false;
        }
    }

    pub fn visible_paths(&self) -> impl Iterator<Item = (usize, &Path)> {
        self.paths.iter().enumerate().filter(|(_, p)| p.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_paths().count()
    }

    /// Show the next enabled path after the first visible one, wrapping, and
    /// hide all others. Returns the index now shown.
    pub fn select_next(&mut self) -> Option<usize> {
        if self.paths.is_empty() {
            return None;
        }
        let len = self.paths.len();
        let from = self.first_visible().unwrap_or(len - 1);
        let next = (1..=len)
            .map(|step| (from + step) % len)
            .find(|&i| self.paths[i].enabled)?;
        self.show_only(next);
        Some(next)
    }

    /// Like [`GraphGroup::select_next`], walking backwards.
    pub fn select_previous(&mut self) -> Option<usize> {
        if self.paths.is_empty() {
            return None;
        }
        let len = self.paths.len();
        let from = self.first_visible().unwrap_or(0);
        let previous = (1..=len)
            .map(|step| (from + len - step) % len)
            .find(|&i| self.paths[i].enabled)?;
        self.show_only(previous);
        Some(previous)
    }

    fn first_visible(&self) -> Option<usize> {
        self.paths.iter().position(|p| p.visible)
    }

    fn show_only(&mut self, index: usize) {
        for (i, path) in self.paths.iter_mut().enumerate() {
            path.visible = i == index;
        }
    }
}
