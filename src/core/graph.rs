//! The investments graph: funds and shares connected by weighted holdings.
//!
//! Built once from a [`FundCatalog`] snapshot and read-only afterwards. Nodes
//! live in an arena owned by the [`Dag`]; edges refer to children by
//! [`NodeId`].

use crate::core::catalog::FundCatalog;
use std::collections::HashMap;
use tracing::debug;

/// Index of an [`Investment`] inside its [`Dag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A weighted edge from a parent investment to a child investment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Holding {
    pub investment: NodeId,
    /// Fraction of the parent's value, relative to the parent.
    pub weight: f64,
}

/// A fund or a share.
///
/// When an investment is first discovered as someone's holding we don't know
/// whether it is a fund, so `is_fund` starts false and latches to true once a
/// record defines it.
#[derive(Debug, Clone, PartialEq)]
pub struct Investment {
    pub name: String,
    pub is_fund: bool,
    /// Keyed by child name.
    pub holdings: HashMap<String, Holding>,
}

impl Investment {
    fn new(name: &str, is_fund: bool) -> Self {
        Self {
            name: name.to_string(),
            is_fund,
            holdings: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dag {
    nodes: Vec<Investment>,
    index: HashMap<String, NodeId>,
}

impl Dag {
    /// Converts a flat list of fund records into a graph with one node per
    /// distinct name.
    pub fn build(catalog: &FundCatalog) -> Self {
        let mut dag = Dag::default();

        for fund in &catalog.funds {
            let fund_id = dag.ensure_investment(&fund.name, true);
            for record in &fund.holdings {
                let holding_id = dag.ensure_investment(&record.name, false);
                // A repeated child name overwrites the earlier edge
                dag.nodes[fund_id.0].holdings.insert(
                    record.name.clone(),
                    Holding {
                        investment: holding_id,
                        weight: record.weight,
                    },
                );
            }
        }

        debug!(
            investments = dag.len(),
            funds = dag.nodes.iter().filter(|n| n.is_fund).count(),
            "Built investments graph"
        );
        dag
    }

    /// Returns the existing node for `name` or creates it. Fund status only
    /// ever latches on.
    fn ensure_investment(&mut self, name: &str, is_fund: bool) -> NodeId {
        let id = match self.index.get(name) {
            Some(id) => *id,
            None => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(Investment::new(name, is_fund));
                self.index.insert(name.to_string(), id);
                id
            }
        };

        let node = &mut self.nodes[id.0];
        node.is_fund = node.is_fund || is_fund;
        id
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&Investment> {
        self.lookup(name).map(|id| self.node(id))
    }

    /// Panics if `id` was not issued by this graph.
    pub fn node(&self, id: NodeId) -> &Investment {
        &self.nodes[id.0]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn investments(&self) -> impl Iterator<Item = &Investment> {
        self.nodes.iter()
    }

    pub fn funds(&self) -> impl Iterator<Item = &Investment> {
        self.nodes.iter().filter(|n| n.is_fund)
    }

    /// Searches for a cycle reachable from `root` with an explicit stack.
    ///
    /// Returns the fund names along the cycle, starting and ending with the
    /// same name.
    pub fn find_cycle_from(&self, root: NodeId) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            InProgress,
            Done,
        }

        // Only nodes reachable from `root` get an entry; absent means unvisited
        let mut marks: HashMap<NodeId, Mark> = HashMap::new();
        // Each frame holds a node and the children still to visit
        let mut stack: Vec<(NodeId, Vec<NodeId>)> = Vec::new();

        let children = |id: NodeId| -> Vec<NodeId> {
            self.node(id)
                .holdings
                .values()
                .map(|h| h.investment)
                .collect()
        };

        marks.insert(root, Mark::InProgress);
        stack.push((root, children(root)));

        while let Some((_, pending)) = stack.last_mut() {
            match pending.pop() {
                Some(child) => match marks.get(&child).copied() {
                    None => {
                        marks.insert(child, Mark::InProgress);
                        stack.push((child, children(child)));
                    }
                    Some(Mark::InProgress) => {
                        let start = stack
                            .iter()
                            .position(|(id, _)| *id == child)
                            .unwrap_or_default();
                        let mut path: Vec<String> = stack[start..]
                            .iter()
                            .map(|(id, _)| self.node(*id).name.clone())
                            .collect();
                        path.push(self.node(child).name.clone());
                        return Some(path);
                    }
                    Some(Mark::Done) => {}
                },
                None => {
                    if let Some((id, _)) = stack.pop() {
                        marks.insert(id, Mark::Done);
                    }
                }
            }
        }

        None
    }
}
