use super::prepare;
use crate::core::exposure::{ExposureError, ExposureMap};
use crate::core::graph::{Dag, NodeId};
use crate::core::memo::{MemoCache, SharedMemoCache};
use std::sync::Arc;
use tracing::debug;

/// Resolves `root`, expanding each distinct fund at most once per `memo`.
///
/// Newly computed fund-local maps, the root's included, are left in `memo`
/// for later calls against the same graph.
pub fn resolve_memoized(
    root: &str,
    dag: &Dag,
    memo: &mut MemoCache,
) -> Result<ExposureMap, ExposureError> {
    let root_id = prepare(root, dag)?;
    debug!(root, cached = memo.len(), "Resolving exposures with memo cache");

    Ok(fund_local(dag, root_id, memo).as_ref().clone())
}

/// Exposures of fund `id` as if it were held with weight 1.0.
fn fund_local(dag: &Dag, id: NodeId, memo: &mut MemoCache) -> Arc<ExposureMap> {
    let fund = dag.node(id);
    if let Some(cached) = memo.get(&fund.name) {
        return cached;
    }

    let mut exposures = ExposureMap::new();
    for holding in fund.holdings.values() {
        let child = dag.node(holding.investment);
        if child.is_fund {
            let sub = fund_local(dag, holding.investment, memo);
            exposures.merge_scaled(&sub, holding.weight);
        } else {
            exposures.add_exposure(&child.name, holding.weight);
        }
    }

    let exposures = Arc::new(exposures);
    if fund.is_fund {
        memo.put(&fund.name, Arc::clone(&exposures));
    }
    exposures
}

/// Resolves `root` through a cache that other threads may be using at the
/// same time. Each fund's expansion runs once across all callers.
pub fn resolve_shared(
    root: &str,
    dag: &Dag,
    memo: &SharedMemoCache,
) -> Result<ExposureMap, ExposureError> {
    let root_id = prepare(root, dag)?;
    debug!(root, "Resolving exposures with shared memo cache");

    if !dag.node(root_id).is_fund {
        return Ok(ExposureMap::new());
    }
    Ok(shared_fund_local(dag, root_id, memo).as_ref().clone())
}

/// Expands fund `root` with an explicit stack instead of recursion. A fund's
/// slot is only filled once the slots of all its sub-funds are filled, so
/// stack usage stays flat however deep the holdings go.
fn shared_fund_local(dag: &Dag, root: NodeId, memo: &SharedMemoCache) -> Arc<ExposureMap> {
    // Frames are (fund, sub-funds already pushed)
    let mut stack = vec![(root, false)];
    let mut resolved = None;

    while let Some((id, children_pushed)) = stack.pop() {
        let fund = dag.node(id);
        if let Some(cached) = memo.get(&fund.name) {
            if id == root {
                resolved = Some(cached);
            }
            continue;
        }

        let sub_funds = || {
            fund.holdings
                .values()
                .filter(|holding| dag.node(holding.investment).is_fund)
        };

        if !children_pushed {
            stack.push((id, true));
            stack.extend(
                sub_funds()
                    .filter(|holding| memo.get(&dag.node(holding.investment).name).is_none())
                    .map(|holding| (holding.investment, false)),
            );
            continue;
        }

        let mut subs = Vec::new();
        let mut missing = false;
        for holding in sub_funds() {
            match memo.get(&dag.node(holding.investment).name) {
                Some(sub) => subs.push((sub, holding.weight)),
                None => missing = true,
            }
        }
        if missing {
            stack.push((id, false));
            continue;
        }

        let exposures = memo.get_or_compute(&fund.name, || {
            let mut exposures = ExposureMap::new();
            for holding in fund.holdings.values() {
                let child = dag.node(holding.investment);
                if !child.is_fund {
                    exposures.add_exposure(&child.name, holding.weight);
                }
            }
            for (sub, weight) in &subs {
                exposures.merge_scaled(sub, *weight);
            }
            exposures
        });
        if id == root {
            resolved = Some(exposures);
        }
    }

    resolved.unwrap_or_default()
}
