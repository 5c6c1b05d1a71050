//! Linked-list reorder phase.
//!
//! Six nodes sit in a chain in their original order. The user lists the
//! node positions (1 to 6) in the order that leaves the chain sorted by
//! descending value. The chain is an arena: nodes never move and links are
//! indices, so relinking never touches which nodes exist.

use serde::{Deserialize, Serialize};

use crate::error::{Explosion, SolveError};
use crate::parse::read_six_numbers;

use super::{Phase, PhaseResult};

/// Nodes in the chain.
pub const NODES: usize = 6;

/// One chain node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// Value compared when checking order.
    pub value: i32,
    /// One-based position in the original chain.
    pub index: usize,
    /// Arena slot of the next node.
    pub next: Option<usize>,
}

/// Six nodes linked through arena indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    nodes: [Node; NODES],
    head: Option<usize>,
}

impl Chain {
    /// Builds the original chain: node 1 → node 2 → … → node 6.
    #[must_use]
    pub fn new(values: [i32; NODES]) -> Self {
        let nodes = std::array::from_fn(|slot| Node {
            value: values[slot],
            index: slot + 1,
            next: (slot + 1 < NODES).then_some(slot + 1),
        });
        Self {
            nodes,
            head: Some(0),
        }
    }

    /// Arena slots in link order, starting from the head.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        std::iter::successors(self.head.map(|h| &self.nodes[h]), |node| {
            node.next.map(|n| &self.nodes[n])
        })
        .take(NODES)
    }

    /// Arena slot reached by following `position - 1` links from the head.
    fn slot_at(&self, position: usize) -> Option<usize> {
        let mut slot = self.head?;
        for _ in 1..position {
            slot = self.nodes[slot].next?;
        }
        Some(slot)
    }

    /// Relinks the chain so the selected positions appear in the given order.
    fn relink(&mut self, positions: &[usize; NODES]) -> Option<()> {
        let mut picked = [0usize; NODES];
        for (dst, &position) in picked.iter_mut().zip(positions) {
            *dst = self.slot_at(position)?;
        }
        for pair in picked.windows(2) {
            self.nodes[pair[0]].next = Some(pair[1]);
        }
        self.nodes[picked[NODES - 1]].next = None;
        self.head = Some(picked[0]);
        Some(())
    }

    /// Whether values never increase along the links.
    #[must_use]
    pub fn is_descending(&self) -> bool {
        let values: Vec<i32> = self.iter().map(|n| n.value).collect();
        values.windows(2).all(|w| w[0] >= w[1])
    }

    /// Stable insertion sort by descending value, relinking in place.
    pub fn sort_descending(&mut self) {
        let Some(first) = self.head else {
            return;
        };
        let mut pending = self.nodes[first].next;
        self.nodes[first].next = None;
        let mut head = first;

        while let Some(p) = pending {
            pending = self.nodes[p].next;
            let value = self.nodes[p].value;

            // Walk past every node at least as large so equal values keep
            // their original relative order.
            let mut prev: Option<usize> = None;
            let mut cursor = Some(head);
            while let Some(c) = cursor {
                if self.nodes[c].value < value {
                    break;
                }
                prev = Some(c);
                cursor = self.nodes[c].next;
            }

            self.nodes[p].next = cursor;
            match prev {
                Some(q) => self.nodes[q].next = Some(p),
                None => head = p,
            }
        }
        self.head = Some(head);
    }
}

/// Reorder the chain into descending order by listing node positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReorder {
    /// Value of each node in original chain order.
    pub values: [i32; NODES],
}

impl ListReorder {
    /// A fresh copy of the original chain.
    #[must_use]
    pub fn chain(&self) -> Chain {
        Chain::new(self.values)
    }
}

impl Phase for ListReorder {
    fn name(&self) -> &'static str {
        "list_reorder"
    }

    fn check(&self, line: &str) -> PhaseResult {
        let numbers = read_six_numbers(line)?;

        let mut positions = [0usize; NODES];
        for (i, &n) in numbers.iter().enumerate() {
            let position = usize::try_from(n)
                .ok()
                .filter(|p| (1..=NODES).contains(p))
                .ok_or_else(|| Explosion::rule(format!("node {n} out of range")))?;
            if numbers[i + 1..].contains(&n) {
                return Err(Explosion::rule(format!("node {n} listed twice")));
            }
            positions[i] = position;
        }

        let mut chain = self.chain();
        chain
            .relink(&positions)
            .ok_or_else(|| Explosion::rule("position past the end of the chain"))?;
        if !chain.is_descending() {
            return Err(Explosion::rule("chain is not in descending order"));
        }
        Ok(())
    }

    fn solve(&self) -> Result<String, SolveError> {
        let mut chain = self.chain();
        chain.sort_descending();
        let order: Vec<String> = chain.iter().map(|n| n.index.to_string()).collect();
        if order.len() != NODES {
            return Err(SolveError::NoWitness {
                phase: self.name(),
                detail: format!("sorted chain has {} nodes", order.len()),
            });
        }
        Ok(order.join(" "))
    }
}
