use std::collections::VecDeque;
use std::fmt;

use amaze_core::Coord;

use crate::distance::manhattan;
use crate::node::{NodeId, SearchNode};

/// How [`Frontier::remove`] picks the next node to expand.
///
/// Selected once per solve and fixed for its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Remove the most recently added node (stack discipline): exploration
    /// goes deep before wide.
    Lifo,
    /// Remove the earliest added node (queue discipline): exploration goes
    /// wide before deep, discovering shortest paths by edge count.
    Fifo,
    /// Stable-sort all pending nodes ascending by the key function, then
    /// remove the smallest.
    PrioritySorted(PriorityKey),
}

/// The key function for [`Policy::PrioritySorted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityKey {
    /// Manhattan distance to the goal: greedy best-first, not guaranteed
    /// optimal.
    Heuristic,
    /// Manhattan distance to the goal plus `traveled + 1`: an `f = g + h`
    /// score whose +1 offset is the cost of the move that produced the
    /// node. Manhattan distance is admissible and consistent on a
    /// unit-cost 4-connected grid, so the discovered path is shortest.
    CostPlusHeuristic,
}

/// `remove()` was called on an empty frontier.
///
/// A contract violation, not a search outcome: callers must check
/// [`Frontier::is_empty`] first, and the solver's own loop discipline
/// makes this unreachable. If it surfaces, an invariant is broken and the
/// run aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyFrontierError;

impl fmt::Display for EmptyFrontierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("remove() called on an empty frontier")
    }
}

impl std::error::Error for EmptyFrontierError {}

struct Entry {
    id: NodeId,
    state: Coord,
    priority: i32,
}

/// The collection of discovered-but-not-yet-expanded search nodes.
///
/// Entries cache their state and priority at insertion (nodes are
/// immutable, so both are fixed for the node's lifetime). The frontier
/// does not deduplicate; keeping frontier and explored set disjoint is the
/// solver's job.
pub struct Frontier {
    entries: VecDeque<Entry>,
    policy: Policy,
    goal: Coord,
}

impl Frontier {
    /// Create an empty frontier with the given removal policy.
    ///
    /// `goal` feeds the priority key functions; it is ignored by the
    /// [`Policy::Lifo`] and [`Policy::Fifo`] policies.
    pub fn new(policy: Policy, goal: Coord) -> Self {
        Self {
            entries: VecDeque::new(),
            policy,
            goal,
        }
    }

    /// The removal policy this frontier was built with.
    #[inline]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Add a pending node.
    pub fn add(&mut self, id: NodeId, node: &SearchNode) {
        let priority = match self.policy {
            Policy::Lifo | Policy::Fifo => 0,
            Policy::PrioritySorted(PriorityKey::Heuristic) => manhattan(node.state(), self.goal),
            Policy::PrioritySorted(PriorityKey::CostPlusHeuristic) => {
                manhattan(node.state(), self.goal) + node.traveled() as i32 + 1
            }
        };
        self.entries.push_back(Entry {
            id,
            state: node.state(),
            priority,
        });
    }

    /// Remove one node per the policy.
    ///
    /// For [`Policy::PrioritySorted`] the whole pending collection is
    /// re-sorted ascending by priority before removal; the sort is stable,
    /// so equal-priority nodes keep insertion order and tie-breaking stays
    /// reproducible.
    pub fn remove(&mut self) -> Result<NodeId, EmptyFrontierError> {
        let entry = match self.policy {
            Policy::Lifo => self.entries.pop_back(),
            Policy::Fifo => self.entries.pop_front(),
            Policy::PrioritySorted(_) => {
                self.entries
                    .make_contiguous()
                    .sort_by_key(|e| e.priority);
                self.entries.pop_front()
            }
        };
        entry.map(|e| e.id).ok_or(EmptyFrontierError)
    }

    /// Whether a node with this state is already pending.
    ///
    /// Linear scan over every queued entry, O(n) in the current frontier
    /// size; acceptable because grid state spaces are small.
    pub fn contains_state(&self, state: Coord) -> bool {
        self.entries.iter().any(|e| e.state == state)
    }

    /// Whether no nodes are pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pending nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop all pending nodes, keeping capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
