use std::fmt;
use std::time::Instant;

use amaze_core::{Coord, Maze, Move};

use crate::frontier::{EmptyFrontierError, Frontier, Policy, PriorityKey};
use crate::node::{NodeArena, NodeId};

/// Caller-facing selector for the exploration strategy of one solve.
///
/// Each mode is a fixed pairing of a removal [`Policy`] and, for the
/// priority-ordered modes, a key function. Presentation labels for the
/// modes are external layers' business; only this mapping is contractual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchMode {
    /// Deep-before-wide exploration (LIFO removal).
    #[default]
    DepthFirst,
    /// Wide-before-deep exploration (FIFO removal); finds shortest paths
    /// by edge count.
    BreadthFirst,
    /// Expand whichever pending node looks closest to the goal.
    GreedyBestFirst,
    /// Cost-plus-heuristic ordering; optimal on a unit-cost grid.
    AStar,
}

impl SearchMode {
    /// All modes, in menu order.
    pub const ALL: [SearchMode; 4] = [
        SearchMode::DepthFirst,
        SearchMode::BreadthFirst,
        SearchMode::GreedyBestFirst,
        SearchMode::AStar,
    ];

    /// The frontier removal policy this mode runs under.
    pub fn policy(self) -> Policy {
        match self {
            SearchMode::DepthFirst => Policy::Lifo,
            SearchMode::BreadthFirst => Policy::Fifo,
            SearchMode::GreedyBestFirst => Policy::PrioritySorted(PriorityKey::Heuristic),
            SearchMode::AStar => Policy::PrioritySorted(PriorityKey::CostPlusHeuristic),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchMode::DepthFirst => "depth-first",
            SearchMode::BreadthFirst => "breadth-first",
            SearchMode::GreedyBestFirst => "greedy-best-first",
            SearchMode::AStar => "a-star",
        };
        f.write_str(name)
    }
}

/// An ordered path from the first move after the start cell to the goal.
///
/// `actions` and `cells` run in parallel: `cells[i]` is the cell reached
/// by `actions[i]`. The start cell itself is excluded (it is reached by no
/// move).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    actions: Vec<Move>,
    cells: Vec<Coord>,
}

impl Solution {
    /// The moves, in travel order.
    #[inline]
    pub fn actions(&self) -> &[Move] {
        &self.actions
    }

    /// The cells entered, in travel order, ending at the goal.
    #[inline]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Path length in moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// `true` when start and goal coincide.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The `(move, cell)` pairs, in travel order.
    pub fn steps(&self) -> impl Iterator<Item = (Move, Coord)> {
        self.actions
            .iter()
            .copied()
            .zip(self.cells.iter().copied())
    }
}

/// The outcome of one solve.
///
/// `solution` is `None` when the goal is unreachable under the current
/// walls; that is a normal outcome, distinct from the solve failing to
/// run. `explored` is always populated, in the order states were removed
/// from the frontier (external playback layers replay it as-is).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    solution: Option<Solution>,
    explored: Vec<Coord>,
}

impl SolveReport {
    /// The path found, if any.
    #[inline]
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Whether a path was found.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// States expanded during the solve, in removal order.
    #[inline]
    pub fn explored(&self) -> &[Coord] {
        &self.explored
    }

    /// Split the report into its parts.
    pub fn into_parts(self) -> (Option<Solution>, Vec<Coord>) {
        (self.solution, self.explored)
    }
}

/// Runs searches over a [`Maze`].
///
/// The solver owns the per-solve working state (node arena, explored
/// set, neighbor scratch buffer) and reuses its allocations across
/// solves. Working state is never shared: concurrent solves need one
/// `Solver` each, borrowing the same read-only maze.
#[derive(Debug, Default)]
pub struct Solver {
    arena: NodeArena,
    explored_seen: Vec<bool>,
    explored: Vec<Coord>,
    nbuf: Vec<(Move, Coord)>,
}

impl Solver {
    /// Create a solver with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `maze` from its start to its goal under `mode`.
    ///
    /// Runs synchronously to a terminal state. Returns
    /// [`EmptyFrontierError`] only on a broken loop invariant; an
    /// unreachable goal is reported as `solution: None`, not as an error.
    pub fn solve(
        &mut self,
        maze: &Maze,
        mode: SearchMode,
    ) -> Result<SolveReport, EmptyFrontierError> {
        let started = Instant::now();

        self.arena.clear();
        self.explored.clear();
        self.explored_seen.clear();
        self.explored_seen.resize(maze.cell_count(), false);

        let mut frontier = Frontier::new(mode.policy(), maze.goal());
        let root = self.arena.push(maze.start(), None, None);
        frontier.add(root, &self.arena[root]);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let solution = loop {
            if frontier.is_empty() {
                break None;
            }

            let id = frontier.remove()?;
            let state = self.arena[id].state();

            if state == maze.goal() {
                break Some(self.reconstruct(id));
            }

            if let Some(ci) = maze.index_of(state) {
                self.explored_seen[ci] = true;
            }
            self.explored.push(state);

            maze.neighbors(state, &mut nbuf);
            for &(action, next) in nbuf.iter() {
                let Some(ni) = maze.index_of(next) else {
                    continue;
                };
                // States already expanded or already pending are never
                // re-added; the frontier itself does not deduplicate.
                if self.explored_seen[ni] || frontier.contains_state(next) {
                    continue;
                }
                let child = self.arena.push(next, Some(id), Some(action));
                frontier.add(child, &self.arena[child]);
            }
        };

        self.nbuf = nbuf;

        log::debug!(
            "solve: mode={mode} explored={} path={:?} nodes={} elapsed={:?}",
            self.explored.len(),
            solution.as_ref().map(Solution::len),
            self.arena.len(),
            started.elapsed(),
        );

        Ok(SolveReport {
            solution,
            explored: self.explored.clone(),
        })
    }

    /// Walk parent links backward from the terminal node, collecting
    /// `(action, cell)` pairs. The root carries no action and is excluded.
    fn reconstruct(&self, terminal: NodeId) -> Solution {
        let mut actions = Vec::new();
        let mut cells = Vec::new();
        let mut cur = terminal;
        while let Some(parent) = self.arena[cur].parent() {
            if let Some(action) = self.arena[cur].action() {
                actions.push(action);
                cells.push(self.arena[cur].state());
            }
            cur = parent;
        }
        actions.reverse();
        cells.reverse();
        Solution { actions, cells }
    }
}
