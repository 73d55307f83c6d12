use crate::core::catalog::FundCatalog;
use crate::core::graph::Dag;
use crate::core::resolver::{Strategy, resolve};
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Prints the names of the shares `fund` ultimately holds, one per line.
pub fn run(catalog_path: &Path, fund: &str, strategy: Strategy) -> Result<()> {
    let shares = find_shares(catalog_path, fund, strategy)?;
    for share in shares {
        println!("{share}");
    }
    Ok(())
}

pub fn find_shares(catalog_path: &Path, fund: &str, strategy: Strategy) -> Result<Vec<String>> {
    let catalog = FundCatalog::load_from_path(catalog_path)?;
    let dag = Dag::build(&catalog);

    info!(fund, %strategy, "Finding shares");
    let exposures = resolve(fund, &dag, strategy, None)?;
    Ok(exposures.shares().into_iter().map(String::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_find_shares_from_yaml() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
        file.write_all(
            br#"
- name: Outer
  holdings:
    - { name: Inner, weight: 0.5 }
    - { name: Zeta, weight: 0.5 }
- name: Inner
  holdings:
    - { name: Alpha, weight: 1.0 }
"#,
        )?;

        let shares = find_shares(file.path(), "Outer", Strategy::Trampoline)?;
        assert_eq!(shares, vec!["Alpha", "Zeta"]);

        run(file.path(), "Inner", Strategy::Recursive)?;
        assert!(run(file.path(), "Nope", Strategy::Memoized).is_err());
        Ok(())
    }
}
