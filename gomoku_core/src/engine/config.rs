use serde::{Deserialize, Serialize};

/// How the connective-run terms of the candidate heuristic are shaped.
/// One value per engine build; both searchers read it from the same config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BonusShaping {
    /// count^2
    #[default]
    Squared,
    /// 10^count
    Exponential,
}

impl BonusShaping {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn apply(self, count: usize) -> i64 {
        let count = count as i64;
        match self {
            Self::Squared => count * count,
            Self::Exponential => 10_i64.pow(count as u32),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Candidate generation
    pub margin: usize,
    pub top_n: usize,
    pub weight_center: i64,
    pub weight_offense: i64,
    pub weight_defense: i64,
    pub bonus_shaping: BonusShaping,

    // Alpha-beta
    pub minimax_depth: u8,

    // MCTS
    pub mcts_iterations: u32,
    pub exploration: f64,
    pub playout_margin: Option<usize>, // None: play-outs use the whole board
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            margin: 2,
            top_n: 30,
            weight_center: 1,
            weight_offense: 10,
            weight_defense: 10,
            bonus_shaping: BonusShaping::Squared,

            minimax_depth: 2,

            mcts_iterations: 1000,
            exploration: 1.414,
            playout_margin: None,
            seed: None,
        }
    }
}

#[derive(Deserialize)]
struct EngineConfigJson {
    margin: Option<usize>,
    top_n: Option<usize>,
    weight_center: Option<f64>,
    weight_offense: Option<f64>,
    weight_defense: Option<f64>,
    bonus_shaping: Option<BonusShaping>,

    minimax_depth: Option<u8>,

    mcts_iterations: Option<u32>,
    exploration: Option<f64>,
    playout_margin: Option<usize>,
    seed: Option<u64>,
}

impl EngineConfig {
    /// Overlays a partial JSON document on the defaults. Heuristic weights
    /// are scale factors applied to the default weight; every other entry is
    /// an absolute value.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            margin: json_config.margin.unwrap_or(default.margin),
            top_n: json_config.top_n.unwrap_or(default.top_n),
            weight_center: apply_scale(default.weight_center, json_config.weight_center),
            weight_offense: apply_scale(default.weight_offense, json_config.weight_offense),
            weight_defense: apply_scale(default.weight_defense, json_config.weight_defense),
            bonus_shaping: json_config.bonus_shaping.unwrap_or(default.bonus_shaping),

            minimax_depth: json_config.minimax_depth.unwrap_or(default.minimax_depth),

            mcts_iterations: json_config
                .mcts_iterations
                .unwrap_or(default.mcts_iterations),
            exploration: json_config.exploration.unwrap_or(default.exploration),
            playout_margin: json_config.playout_margin.or(default.playout_margin),
            seed: json_config.seed.or(default.seed),
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i64, scale: Option<f64>) -> i64 {
    scale.map_or(default_val, |s| (default_val as f64 * s).round() as i64)
}
