use std::collections::BTreeSet;

use crate::actor::interface::ActorInterface;

/// Which outputs of an actor depend, within one firing, on which inputs.
///
/// The scheduler orders firings from these edges and `Network` folds them
/// into boundary-level dependencies for composites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionDependency {
    input_count: usize,
    output_count: usize,
    edges: BTreeSet<(usize, usize)>,
}

impl FunctionDependency {
    /// Every output depends on every input.
    pub fn full(interface: &ActorInterface) -> Self {
        let mut dependency = Self::independent(interface);
        for input in 0..dependency.input_count {
            for output in 0..dependency.output_count {
                dependency.edges.insert((input, output));
            }
        }
        dependency
    }

    /// No output depends on any input.
    pub fn independent(interface: &ActorInterface) -> Self {
        Self {
            input_count: interface.inputs.len(),
            output_count: interface.outputs.len(),
            edges: BTreeSet::new(),
        }
    }

    /// Declares that `output` does not see `input` within the same firing.
    pub fn without_dependency(mut self, input: usize, output: usize) -> Self {
        self.edges.remove(&(input, output));
        self
    }

    pub fn add(&mut self, input: usize, output: usize) {
        if input < self.input_count && output < self.output_count {
            self.edges.insert((input, output));
        }
    }

    pub fn depends(&self, input: usize, output: usize) -> bool {
        self.edges.contains(&(input, output))
    }

    /// Outputs that depend on `input`.
    pub fn dependents_of(&self, input: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .range((input, 0)..(input.saturating_add(1), 0))
            .map(|(_, output)| *output)
    }

    /// Whether any output depends on `input`. Actors without outputs count
    /// every input as consumed.
    pub fn is_consumed(&self, input: usize) -> bool {
        self.output_count == 0 || self.dependents_of(input).next().is_some()
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }
}
