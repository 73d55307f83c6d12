use super::prepare;
use crate::core::exposure::{ExposureError, ExposureMap};
use crate::core::graph::{Dag, NodeId};
use tracing::debug;

/// Resolves `root` with plain recursion.
///
/// Call depth follows the longest path below the root, and a sub-fund is
/// walked again on every path that reaches it.
pub fn resolve_recursive(root: &str, dag: &Dag) -> Result<ExposureMap, ExposureError> {
    let root_id = prepare(root, dag)?;
    debug!(root, "Resolving exposures recursively");

    let mut exposures = ExposureMap::new();
    descend(dag, root_id, 1.0, &mut exposures);
    Ok(exposures)
}

fn descend(dag: &Dag, id: NodeId, weight: f64, exposures: &mut ExposureMap) {
    for holding in dag.node(id).holdings.values() {
        let child = dag.node(holding.investment);
        if child.is_fund {
            descend(dag, holding.investment, weight * holding.weight, exposures);
        } else {
            exposures.add_exposure(&child.name, holding.weight * weight);
        }
    }
}
