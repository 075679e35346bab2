use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::board::Board;

const ASTAR_NODE_BUDGET: usize = 100_000;
const BFS_NODE_BUDGET: usize = 100_000;
const DFS_NODE_BUDGET: usize = 10_000;
const DFS_DEPTH_LIMIT: u32 = 20;
const GREEDY_NODE_BUDGET: usize = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    Manhattan,
    Misplaced,
}

impl Heuristic {
    fn estimate(&self, board: &Board) -> u32 {
        match self {
            Heuristic::Manhattan => board.manhattan_distance(),
            Heuristic::Misplaced => board.misplaced_tiles(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    AStar(Heuristic),
    Bfs,
    Dfs,
    Greedy,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown algorithm selector '{0}'")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "astar_manhattan" => Ok(Strategy::AStar(Heuristic::Manhattan)),
            "astar_misplaced" => Ok(Strategy::AStar(Heuristic::Misplaced)),
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "greedy" => Ok(Strategy::Greedy),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::AStar(Heuristic::Manhattan) => "A* (Manhattan Distance)",
            Strategy::AStar(Heuristic::Misplaced) => "A* (Misplaced Tiles)",
            Strategy::Bfs => "Breadth-First Search",
            Strategy::Dfs => "Depth-First Search (Limited)",
            Strategy::Greedy => "Greedy Best-First Search",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of a search. Budget exhaustion is a normal result, not an error:
/// `path` is `None` and `nodes_explored` reports how far the search got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Board snapshots from the initial board to the goal, inclusive.
    pub path: Option<Vec<Board>>,
    pub nodes_explored: usize,
}

impl SearchResult {
    fn found(path: Vec<Board>, nodes_explored: usize) -> Self {
        Self {
            path: Some(path),
            nodes_explored,
        }
    }

    fn exhausted(nodes_explored: usize) -> Self {
        Self {
            path: None,
            nodes_explored,
        }
    }

    /// Number of moves in the solution, one less than the path length.
    pub fn steps(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len() - 1)
    }
}

// Search nodes live in a per-invocation arena; a node refers to its parent
// by index, so the parent chain forms a tree without shared ownership.
struct SearchNode {
    board: Board,
    depth: u32,
    parent: Option<usize>,
}

struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn push(&mut self, board: Board, depth: u32, parent: Option<usize>) -> usize {
        self.nodes.push(SearchNode {
            board,
            depth,
            parent,
        });
        self.nodes.len() - 1
    }

    fn board(&self, index: usize) -> Board {
        self.nodes[index].board
    }

    fn depth(&self, index: usize) -> u32 {
        self.nodes[index].depth
    }

    /// Walk parent links back to the root and return the boards start to goal.
    fn reconstruct_path(&self, goal: usize) -> Vec<Board> {
        let mut path = Vec::new();
        let mut current = Some(goal);
        while let Some(index) = current {
            path.push(self.nodes[index].board);
            current = self.nodes[index].parent;
        }
        path.reverse();
        path
    }
}

// Frontier entry for the heap-based searches. Ordering is by (score, seq)
// only, never by board payload; `seq` is a push counter, so equal scores pop
// in insertion order and the expansion order is reproducible.
#[derive(PartialEq, Eq)]
struct OpenEntry {
    score: u32,
    seq: u64,
    node: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest (score, seq) first.
        (other.score, other.seq).cmp(&(self.score, self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Run the selected strategy against `initial`.
pub fn solve(initial: Board, strategy: Strategy) -> SearchResult {
    debug!(strategy = %strategy, "starting search");
    let result = match strategy {
        Strategy::AStar(heuristic) => astar_search(initial, heuristic),
        Strategy::Bfs => bfs_search(initial),
        Strategy::Dfs => dfs_search(initial),
        Strategy::Greedy => greedy_search(initial),
    };
    debug!(
        nodes_explored = result.nodes_explored,
        found = result.path.is_some(),
        "search finished"
    );
    result
}

/// A* over unit-cost moves. Lazy-deletion priority queue ordered by
/// f = g + h; a board is re-pushed only when a strictly better g is found,
/// and fully expanded boards are skipped on re-pop via the closed set.
/// Terminates on popping the goal, so a consistent heuristic yields a
/// shortest path.
fn astar_search(initial: Board, heuristic: Heuristic) -> SearchResult {
    if initial.is_goal() {
        return SearchResult::found(vec![initial], 0);
    }

    let mut arena = NodeArena::new();
    let root = arena.push(initial, 0, None);

    let mut seq = 0u64;
    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        score: heuristic.estimate(&initial),
        seq,
        node: root,
    });

    let mut best_g: HashMap<Board, u32> = HashMap::new();
    best_g.insert(initial, 0);
    let mut closed: HashSet<Board> = HashSet::new();
    let mut nodes_explored = 0;

    while nodes_explored < ASTAR_NODE_BUDGET {
        let Some(entry) = open.pop() else { break };
        let current = entry.node;
        let board = arena.board(current);

        if closed.contains(&board) {
            continue;
        }
        nodes_explored += 1;

        if board.is_goal() {
            return SearchResult::found(arena.reconstruct_path(current), nodes_explored);
        }
        closed.insert(board);

        let current_g = best_g[&board];
        for neighbor in board.legal_moves() {
            if closed.contains(&neighbor) {
                continue;
            }
            let tentative_g = current_g + 1;
            if best_g
                .get(&neighbor)
                .map_or(true, |&known| tentative_g < known)
            {
                best_g.insert(neighbor, tentative_g);
                let child = arena.push(neighbor, tentative_g, Some(current));
                seq += 1;
                open.push(OpenEntry {
                    score: tentative_g + heuristic.estimate(&neighbor),
                    seq,
                    node: child,
                });
            }
        }
    }

    SearchResult::exhausted(nodes_explored)
}

/// Uninformed breadth-first search; optimal for unit-cost moves. Boards are
/// marked visited at enqueue time, and the goal test runs on each generated
/// neighbor for early exit.
fn bfs_search(initial: Board) -> SearchResult {
    if initial.is_goal() {
        return SearchResult::found(vec![initial], 0);
    }

    let mut arena = NodeArena::new();
    let root = arena.push(initial, 0, None);

    let mut queue = VecDeque::new();
    queue.push_back(root);
    let mut visited: HashSet<Board> = HashSet::new();
    visited.insert(initial);
    let mut nodes_explored = 0;

    while nodes_explored < BFS_NODE_BUDGET {
        let Some(current) = queue.pop_front() else {
            break;
        };
        nodes_explored += 1;

        let board = arena.board(current);
        let depth = arena.depth(current);
        for neighbor in board.legal_moves() {
            if !visited.contains(&neighbor) {
                let child = arena.push(neighbor, depth + 1, Some(current));
                if neighbor.is_goal() {
                    return SearchResult::found(arena.reconstruct_path(child), nodes_explored);
                }
                visited.insert(neighbor);
                queue.push_back(child);
            }
        }
    }

    SearchResult::exhausted(nodes_explored)
}

/// Depth-first search bounded at 20 moves; unbounded DFS can wander this
/// state space effectively forever. Boards are marked visited at expansion
/// time, and neighbors are pushed in reverse generation order so stack
/// popping expands them in generation order. The first path found within the
/// limits is reported; it is not necessarily shortest.
fn dfs_search(initial: Board) -> SearchResult {
    if initial.is_goal() {
        return SearchResult::found(vec![initial], 0);
    }

    let mut arena = NodeArena::new();
    let root = arena.push(initial, 0, None);

    let mut stack = vec![root];
    let mut visited: HashSet<Board> = HashSet::new();
    let mut nodes_explored = 0;

    while nodes_explored < DFS_NODE_BUDGET {
        let Some(current) = stack.pop() else { break };
        let board = arena.board(current);
        let depth = arena.depth(current);

        if visited.contains(&board) || depth > DFS_DEPTH_LIMIT {
            continue;
        }
        visited.insert(board);
        nodes_explored += 1;

        if board.is_goal() {
            return SearchResult::found(arena.reconstruct_path(current), nodes_explored);
        }

        for neighbor in board.legal_moves().into_iter().rev() {
            if !visited.contains(&neighbor) {
                let child = arena.push(neighbor, depth + 1, Some(current));
                stack.push(child);
            }
        }
    }

    SearchResult::exhausted(nodes_explored)
}

/// Greedy best-first search ordered purely by Manhattan distance, ignoring
/// accumulated path cost. Usually the fastest to find some path, often a
/// longer one.
fn greedy_search(initial: Board) -> SearchResult {
    if initial.is_goal() {
        return SearchResult::found(vec![initial], 0);
    }

    let mut arena = NodeArena::new();
    let root = arena.push(initial, 0, None);

    let mut seq = 0u64;
    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        score: initial.manhattan_distance(),
        seq,
        node: root,
    });

    let mut visited: HashSet<Board> = HashSet::new();
    let mut nodes_explored = 0;

    while nodes_explored < GREEDY_NODE_BUDGET {
        let Some(entry) = open.pop() else { break };
        let current = entry.node;
        let board = arena.board(current);

        if visited.contains(&board) {
            continue;
        }
        visited.insert(board);
        nodes_explored += 1;

        if board.is_goal() {
            return SearchResult::found(arena.reconstruct_path(current), nodes_explored);
        }

        let depth = arena.depth(current);
        for neighbor in board.legal_moves() {
            if !visited.contains(&neighbor) {
                let child = arena.push(neighbor, depth + 1, Some(current));
                seq += 1;
                open.push(OpenEntry {
                    score: neighbor.manhattan_distance(),
                    seq,
                    node: child,
                });
            }
        }
    }

    SearchResult::exhausted(nodes_explored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GOAL;

    const ALL_STRATEGIES: [Strategy; 5] = [
        Strategy::AStar(Heuristic::Manhattan),
        Strategy::AStar(Heuristic::Misplaced),
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Greedy,
    ];

    fn board(tiles: [u8; 9]) -> Board {
        Board::new(tiles).unwrap()
    }

    #[test]
    fn goal_input_is_trivial_for_every_strategy() {
        for strategy in ALL_STRATEGIES {
            let result = solve(GOAL, strategy);
            assert_eq!(result.path, Some(vec![GOAL]), "{}", strategy);
            assert_eq!(result.nodes_explored, 0, "{}", strategy);
            assert_eq!(result.steps(), Some(0), "{}", strategy);
        }
    }

    #[test]
    fn one_move_scramble_solves_in_one_move() {
        let start = board([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let expected = vec![start, GOAL];

        let astar = solve(start, Strategy::AStar(Heuristic::Manhattan));
        assert_eq!(astar.path, Some(expected.clone()));
        // Start expansion plus the goal pop.
        assert_eq!(astar.nodes_explored, 2);

        let bfs = solve(start, Strategy::Bfs);
        assert_eq!(bfs.path, Some(expected.clone()));
        // Goal is detected at generation time, after one expansion.
        assert_eq!(bfs.nodes_explored, 1);

        let greedy = solve(start, Strategy::Greedy);
        assert_eq!(greedy.path, Some(expected));
        assert_eq!(greedy.nodes_explored, 2);
    }

    #[test]
    fn astar_heuristics_agree_on_optimal_length() {
        // Three moves from the goal.
        let start = board([1, 2, 3, 0, 5, 6, 4, 7, 8]);
        let manhattan = solve(start, Strategy::AStar(Heuristic::Manhattan));
        let misplaced = solve(start, Strategy::AStar(Heuristic::Misplaced));
        let bfs = solve(start, Strategy::Bfs);
        assert_eq!(bfs.steps(), Some(3));
        assert_eq!(manhattan.steps(), bfs.steps());
        assert_eq!(misplaced.steps(), bfs.steps());
    }

    #[test]
    fn dfs_respects_its_tighter_budget() {
        let unsolvable = board([8, 1, 2, 0, 4, 3, 7, 6, 5]);
        assert!(!unsolvable.is_solvable());
        let result = solve(unsolvable, Strategy::Dfs);
        assert_eq!(result.path, None);
        assert!(result.nodes_explored <= 10_000);
        assert!(result.nodes_explored > 0);
    }

    #[test]
    fn selector_parsing_round_trips_known_names() {
        assert_eq!(
            "astar_manhattan".parse::<Strategy>(),
            Ok(Strategy::AStar(Heuristic::Manhattan))
        );
        assert_eq!(
            "astar_misplaced".parse::<Strategy>(),
            Ok(Strategy::AStar(Heuristic::Misplaced))
        );
        assert_eq!("bfs".parse::<Strategy>(), Ok(Strategy::Bfs));
        assert_eq!("dfs".parse::<Strategy>(), Ok(Strategy::Dfs));
        assert_eq!("greedy".parse::<Strategy>(), Ok(Strategy::Greedy));
    }

    #[test]
    fn unknown_selectors_are_rejected_not_defaulted() {
        let err = "simulated_annealing".parse::<Strategy>().unwrap_err();
        assert_eq!(err, UnknownStrategy("simulated_annealing".to_string()));
    }
}
