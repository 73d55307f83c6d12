use super::resolve_shared;
use crate::core::exposure::{ExposureError, ExposureMap};
use crate::core::graph::Dag;
use crate::core::memo::SharedMemoCache;
use anyhow::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use tracing::debug;

/// Outcome of resolving one fund as part of a batch.
#[derive(Debug)]
pub struct FundExposure {
    pub fund: String,
    pub exposures: Result<ExposureMap, ExposureError>,
}

/// Resolves every fund in `funds` concurrently on blocking worker tasks.
///
/// All tasks share `memo`, so a sub-fund held by several of the requested
/// funds is expanded once. Results come back in the order of `funds`.
/// Progress can be reported via `update_callback`, called once per fund.
pub async fn resolve_all(
    dag: Arc<Dag>,
    funds: Vec<String>,
    memo: SharedMemoCache,
    update_callback: &(dyn Fn()),
) -> Result<Vec<FundExposure>> {
    debug!(count = funds.len(), "Resolving funds concurrently");

    let tasks = funds.into_iter().map(|fund| {
        let dag = Arc::clone(&dag);
        let memo = memo.clone();
        async move {
            let handle = tokio::task::spawn_blocking(move || {
                let exposures = resolve_shared(&fund, &dag, &memo);
                FundExposure { fund, exposures }
            });
            let result = handle.await;
            update_callback();
            result
        }
    });

    let results = join_all(tasks).await;
    results
        .into_iter()
        .map(|r| r.context("Resolution task failed"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::fixtures::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_resolve_all_in_order() {
        let dag = Arc::new(example_dag());
        let memo = SharedMemoCache::new();
        let progress = AtomicUsize::new(0);

        let funds = vec![
            "Fund D".to_string(),
            "Missing".to_string(),
            "Ethical Global Fund".to_string(),
            "Fund B".to_string(),
        ];
        let results = resolve_all(dag, funds, memo.clone(), &|| {
            progress.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();

        assert_eq!(progress.load(Ordering::SeqCst), 4);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].fund, "Fund D");
        assert_exposures(results[0].exposures.as_ref().unwrap(), &expected("Fund D"));
        assert_eq!(
            results[1].exposures,
            Err(ExposureError::NotFound("Missing".to_string()))
        );
        assert_exposures(
            results[2].exposures.as_ref().unwrap(),
            &expected("Ethical Global Fund"),
        );
        assert_exposures(results[3].exposures.as_ref().unwrap(), &expected("Fund B"));

        // Every fund below the roots ends up cached once
        assert_eq!(memo.len(), 5);
    }

    #[tokio::test]
    async fn test_resolve_all_deep_chain() {
        let depth = 100_000;
        let dag = Arc::new(narrow_chain(depth));
        let memo = SharedMemoCache::new();

        let funds = vec!["Level 0".to_string(), format!("Level {}", depth / 2)];
        let results = resolve_all(dag, funds, memo.clone(), &|| {}).await.unwrap();

        for result in &results {
            assert_exposures(result.exposures.as_ref().unwrap(), &[("Bottom", 1.0)]);
        }
        assert_eq!(memo.len(), depth + 1);
    }
}
