//! Monte Carlo tree search over an arena of nodes.
//!
//! Nodes live in a contiguous `Vec` and refer to each other by `NodeId`.
//! Every node owns a snapshot of its board and accumulates play-out results
//! from the point of view of its own player to move; a parent therefore
//! reads its children's results negated.

use crate::engine::config::EngineConfig;
use crate::engine::movegen::{candidate_cells, EngineMoveGen};
use crate::engine::{Move, SearchError, SearchOutcome, SearchStats, Searcher};
use crate::logic::board::{Board, Player};
use crate::logic::rules::check_win;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: Self = Self(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct MctsNode {
    /// `NodeId::NONE` for the root.
    pub parent: NodeId,
    /// Move that led here; `None` for the root.
    pub mv: Option<Move>,
    pub board: Board,
    /// Player to move at this node.
    pub player: Player,
    /// Sum of play-out results seen from `player`'s side.
    pub wins: i64,
    pub visits: u32,
    pub children: Vec<NodeId>,
    /// Candidates not yet expanded, worst first so `pop` yields the best.
    pub untried: Vec<Move>,
    /// The move into this node completed five.
    pub is_terminal: bool,
}

impl MctsNode {
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_result(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f64 / f64::from(self.visits)
        }
    }

    /// UCT value of this node for the parent that chooses it.
    fn uct(&self, ln_parent_visits: f64, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = f64::from(self.visits);
        -self.mean_result() + exploration * (ln_parent_visits / visits).sqrt()
    }
}

#[derive(Debug)]
pub struct MctsTree {
    nodes: Vec<MctsNode>,
    root: NodeId,
}

impl MctsTree {
    pub fn new(board: Board, player: Player, untried: Vec<Move>) -> Self {
        let root = MctsNode {
            parent: NodeId::NONE,
            mv: None,
            board,
            player,
            wins: 0,
            visits: 0,
            children: Vec::new(),
            untried,
            is_terminal: false,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[MctsNode] {
        &self.nodes
    }

    #[allow(clippy::cast_possible_truncation)]
    fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Child with the highest UCT value; unvisited children come first.
    pub fn select_child(&self, id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(id);
        let ln_visits = f64::from(node.visits.max(1)).ln();

        node.children.iter().copied().max_by(|&a, &b| {
            let ua = self.get(a).uct(ln_visits, exploration);
            let ub = self.get(b).uct(ln_visits, exploration);
            ua.partial_cmp(&ub).unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    pub fn add_child(&mut self, parent: NodeId, child: MctsNode) -> NodeId {
        let id = self.allocate(child);
        self.get_mut(parent).children.push(id);
        id
    }

    /// Walks from `leaf` up to the root, flipping the result at each level.
    pub fn backpropagate(&mut self, leaf: NodeId, result: i64) {
        let mut current = leaf;
        let mut value = result;

        while current.is_some() {
            let node = self.get_mut(current);
            node.wins += value;
            node.visits += 1;
            value = -value;
            current = node.parent;
        }
    }

    /// Most visited child of the root.
    pub fn best_child(&self) -> Option<NodeId> {
        self.get(self.root)
            .children
            .iter()
            .copied()
            .max_by_key(|&id| self.get(id).visits)
    }
}

/// Uniformly random play-out from `board` with `player` to move.
/// Returns +1 if `player` wins, -1 if the opponent does, 0 on a draw.
pub fn playout(rng: &mut StdRng, board: &Board, player: Player, margin: Option<usize>) -> i64 {
    let mut board = board.clone();
    let mut current = player;

    loop {
        let mut cells: Vec<(usize, usize)> = match margin {
            Some(m) => candidate_cells(&board, m).collect(),
            None => board.empty_cells().collect(),
        };
        if cells.is_empty() && margin.is_some() {
            cells = board.empty_cells().collect();
        }
        let Some(&(r, c)) = cells.choose(rng) else {
            return 0;
        };

        board.put(r, c, current);
        if check_win(&board, r, c, current) {
            return if current == player { 1 } else { -1 };
        }
        current = current.opponent();
    }
}

pub struct MctsEngine {
    config: Arc<EngineConfig>,
    rng: StdRng,
}

impl MctsEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        let rng = Self::make_rng(&config);
        Self { config, rng }
    }

    /// Replaces the configuration and reseeds the generator from it.
    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.rng = Self::make_rng(&config);
        self.config = config;
    }

    fn make_rng(config: &EngineConfig) -> StdRng {
        config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }

    fn untried_moves(&self, board: &Board, player: Player) -> Vec<Move> {
        let ranked = EngineMoveGen::new(&self.config).generate(board, player);
        let mut moves: Vec<Move> = ranked.moves().collect();
        moves.reverse();
        moves
    }

    fn expand(&self, tree: &mut MctsTree, id: NodeId) -> NodeId {
        let node = tree.get_mut(id);
        let Some(mv) = node.untried.pop() else {
            return id;
        };
        let mover = node.player;
        let mut board = node.board.clone();
        board.put(mv.row(), mv.col(), mover);

        let is_terminal = check_win(&board, mv.row(), mv.col(), mover);
        let next = mover.opponent();
        let untried = if is_terminal {
            Vec::new()
        } else {
            self.untried_moves(&board, next)
        };

        tree.add_child(
            id,
            MctsNode {
                parent: id,
                mv: Some(mv),
                board,
                player: next,
                wins: 0,
                visits: 0,
                children: Vec::new(),
                untried,
                is_terminal,
            },
        )
    }

    /// Runs `iterations` rounds of select, expand, simulate, backpropagate
    /// and returns the resulting tree.
    pub fn build_tree(
        &mut self,
        board: &Board,
        player: Player,
        iterations: u32,
    ) -> Result<MctsTree, SearchError> {
        let untried = self.untried_moves(board, player);
        if untried.is_empty() {
            return Err(SearchError::NoLegalMove);
        }

        let mut tree = MctsTree::new(board.clone(), player, untried);
        let exploration = self.config.exploration;
        let margin = self.config.playout_margin;

        for i in 0..iterations {
            let mut id = tree.root();
            loop {
                let node = tree.get(id);
                if !node.untried.is_empty() || node.children.is_empty() {
                    break;
                }
                match tree.select_child(id, exploration) {
                    Some(child) => id = child,
                    None => break,
                }
            }

            let leaf = self.expand(&mut tree, id);
            let node = tree.get(leaf);
            let result = if node.is_terminal {
                -1
            } else {
                playout(&mut self.rng, &node.board, node.player, margin)
            };
            log::trace!("mcts iteration {i}: leaf {:?} result {result}", node.mv);
            tree.backpropagate(leaf, result);
        }

        Ok(tree)
    }
}

impl Searcher for MctsEngine {
    #[allow(clippy::cast_possible_truncation)]
    fn search(&mut self, board: &Board, player: Player) -> Result<SearchOutcome, SearchError> {
        let start = Instant::now();
        let iterations = self.config.mcts_iterations;

        if iterations == 0 {
            let mv = self
                .untried_moves(board, player)
                .last()
                .copied()
                .ok_or(SearchError::NoLegalMove)?;
            log::warn!("mcts: zero iterations configured, playing best-ranked candidate {mv}");
            return Ok(SearchOutcome {
                mv,
                score: 0,
                stats: SearchStats::default(),
            });
        }

        let tree = self.build_tree(board, player, iterations)?;
        let best = tree.best_child().ok_or(SearchError::NoLegalMove)?;
        let node = tree.get(best);
        let mv = node.mv.ok_or(SearchError::NoLegalMove)?;
        let score = (-node.mean_result() * 1000.0).round() as i64;

        let stats = SearchStats {
            depth: 0,
            nodes: u32::try_from(tree.node_count()).unwrap_or(u32::MAX),
            iterations,
            time_ms: start.elapsed().as_millis() as u64,
        };
        log::debug!(
            "mcts: player {player} plays {mv} ({} visits, score {score}, {iterations} iterations, {} nodes, {} ms)",
            node.visits,
            stats.nodes,
            stats.time_ms
        );
        Ok(SearchOutcome { mv, score, stats })
    }
}
