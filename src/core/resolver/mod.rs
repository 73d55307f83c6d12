//! Flattens a fund's nested holdings into leaf share exposures.
//!
//! Every strategy resolves the root as if it were reached with a weight of
//! 1.0 and produces the same [`ExposureMap`] up to floating-point summation
//! order. Resolution fails before any traversal if the root is unknown or if
//! a cycle is reachable from it.

pub mod concurrent;
pub mod memoized;
pub mod recursive;
pub mod trampoline;

pub use concurrent::{FundExposure, resolve_all};
pub use memoized::{resolve_memoized, resolve_shared};
pub use recursive::resolve_recursive;
pub use trampoline::resolve_trampolined;

use crate::core::exposure::{ExposureError, ExposureMap};
use crate::core::graph::{Dag, NodeId};
use crate::core::memo::MemoCache;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Plain recursion, recomputing shared sub-funds on every path
    Recursive,
    /// Recursion that expands each distinct fund once per memo cache
    Memoized,
    /// Queue-driven traversal with bounded stack depth
    #[default]
    Trampoline,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Strategy::Recursive => "recursive",
                Strategy::Memoized => "memoized",
                Strategy::Trampoline => "trampoline",
            }
        )
    }
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recursive" | "recurse" => Ok(Strategy::Recursive),
            "memoized" | "memo" => Ok(Strategy::Memoized),
            "trampoline" | "trampolined" => Ok(Strategy::Trampoline),
            _ => Err(anyhow::anyhow!("Invalid strategy: {}", s)),
        }
    }
}

/// Resolves `root` with the chosen strategy. The memo cache is only used by
/// [`Strategy::Memoized`]; without one a throwaway cache is used.
pub fn resolve(
    root: &str,
    dag: &Dag,
    strategy: Strategy,
    memo: Option<&mut MemoCache>,
) -> Result<ExposureMap, ExposureError> {
    match strategy {
        Strategy::Recursive => resolve_recursive(root, dag),
        Strategy::Memoized => match memo {
            Some(memo) => resolve_memoized(root, dag, memo),
            None => resolve_memoized(root, dag, &mut MemoCache::new()),
        },
        Strategy::Trampoline => resolve_trampolined(root, dag),
    }
}

/// Looks up the root and rejects graphs with a cycle reachable from it.
pub(crate) fn prepare(root: &str, dag: &Dag) -> Result<NodeId, ExposureError> {
    let id = dag
        .lookup(root)
        .ok_or_else(|| ExposureError::NotFound(root.to_string()))?;

    if let Some(cycle) = dag.find_cycle_from(id) {
        return Err(ExposureError::Cycle(cycle));
    }
    Ok(id)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use approx::assert_relative_eq;

    const STRATEGIES: [Strategy; 3] = [
        Strategy::Recursive,
        Strategy::Memoized,
        Strategy::Trampoline,
    ];

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("recursive".parse::<Strategy>().unwrap(), Strategy::Recursive);
        assert_eq!("MEMO".parse::<Strategy>().unwrap(), Strategy::Memoized);
        assert_eq!("trampoline".parse::<Strategy>().unwrap(), Strategy::Trampoline);
        assert!("bfs".parse::<Strategy>().is_err());
        assert_eq!(Strategy::default(), Strategy::Trampoline);
        assert_eq!(Strategy::Memoized.to_string(), "memoized");
    }

    #[test]
    fn test_all_strategies_match_expectations() {
        let dag = example_dag();
        for strategy in STRATEGIES {
            for fund in ["Ethical Global Fund", "Fund B", "Fund D"] {
                let result = resolve(fund, &dag, strategy, None).unwrap();
                assert_exposures(&result, &expected(fund));
            }
        }
    }

    #[test]
    fn test_strategies_agree_on_every_fund() {
        let dag = example_dag();
        let mut memo = MemoCache::new();
        for fund in dag.funds() {
            let baseline = resolve_recursive(&fund.name, &dag).unwrap();
            for strategy in STRATEGIES {
                let result = resolve(&fund.name, &dag, strategy, Some(&mut memo)).unwrap();
                assert_eq!(result.shares(), baseline.shares());
                for (share, weight) in baseline.iter() {
                    assert_relative_eq!(result.get(share).unwrap(), weight, epsilon = EPSILON);
                }
            }
        }
    }

    #[test]
    fn test_not_found_for_every_strategy() {
        let dag = example_dag();
        for strategy in STRATEGIES {
            assert_eq!(
                resolve("Fund Z", &dag, strategy, None),
                Err(ExposureError::NotFound("Fund Z".to_string()))
            );
        }
    }

    #[test]
    fn test_cycle_for_every_strategy() {
        let dag = cyclic_dag();
        for strategy in STRATEGIES {
            match resolve("Root", &dag, strategy, None) {
                Err(ExposureError::Cycle(path)) => {
                    assert_eq!(path.first(), path.last());
                    assert!(path.iter().any(|name| name == "Loop A"));
                }
                other => panic!("expected cycle error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_share_root_resolves_empty() {
        let dag = example_dag();
        for strategy in STRATEGIES {
            let result = resolve("GreenCo", &dag, strategy, None).unwrap();
            assert!(result.is_empty());
        }
    }
}
