use super::prepare;
use crate::core::exposure::{ExposureError, ExposureMap};
use crate::core::graph::{Dag, NodeId};
use std::collections::VecDeque;
use tracing::debug;

/// A deferred "process this node's holdings" step.
#[derive(Debug, Clone, Copy)]
struct Bounce {
    investment: NodeId,
    /// Product of edge weights from the root to `investment`.
    weight: f64,
}

impl Bounce {
    /// Runs one step: shares are settled immediately, sub-funds are deferred
    /// to the back of the queue instead of being entered.
    fn run(self, dag: &Dag, queue: &mut VecDeque<Bounce>, exposures: &mut ExposureMap) {
        for holding in dag.node(self.investment).holdings.values() {
            let child = dag.node(holding.investment);
            if child.is_fund {
                queue.push_back(Bounce {
                    investment: holding.investment,
                    weight: self.weight * holding.weight,
                });
            } else {
                exposures.add_exposure(&child.name, holding.weight * self.weight);
            }
        }
    }
}

/// Resolves `root` with a FIFO work queue and a driver loop, so stack usage
/// stays constant however deep the holdings go.
pub fn resolve_trampolined(root: &str, dag: &Dag) -> Result<ExposureMap, ExposureError> {
    let root_id = prepare(root, dag)?;
    debug!(root, "Resolving exposures with trampoline");

    let mut exposures = ExposureMap::new();
    let mut queue = VecDeque::from([Bounce {
        investment: root_id,
        weight: 1.0,
    }]);

    let mut steps = 0usize;
    while let Some(bounce) = queue.pop_front() {
        bounce.run(dag, &mut queue, &mut exposures);
        steps += 1;
    }

    debug!(root, steps, "Trampoline finished");
    Ok(exposures)
}
