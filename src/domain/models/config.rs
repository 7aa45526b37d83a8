use serde::{Deserialize, Serialize};

/// Weights for the Hybrid Combiner's blend (§4.7).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HybridWeights {
    #[serde(default = "default_kw_weight")]
    pub keyword: f32,
    #[serde(default = "default_emb_weight")]
    pub embedding: f32,
    #[serde(default = "default_imp_weight")]
    pub importance: f32,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            keyword: default_kw_weight(),
            embedding: default_emb_weight(),
            importance: default_imp_weight(),
        }
    }
}

fn default_kw_weight() -> f32 {
    0.4
}
fn default_emb_weight() -> f32 {
    0.4
}
fn default_imp_weight() -> f32 {
    0.2
}

/// Every tunable named in §6, plus the reserve fraction left open by §9.
///
/// Precedence, low to high: these defaults < a `.codectx.toml` file at the scan
/// root < explicit overrides passed by the caller (mirrors the env-first
/// precedence the teacher uses for its Anthropic-compatible HTTP clients).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_budget")]
    pub budget: usize,

    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default = "default_true")]
    pub follow_imports: bool,

    #[serde(default = "default_import_depth")]
    pub import_depth: usize,

    #[serde(default = "default_true")]
    pub use_hybrid_ranking: bool,

    #[serde(default)]
    pub use_smart_rerank: bool,

    #[serde(default = "default_true")]
    pub use_hyde: bool,

    /// Fraction of the budget the primary pass is restricted to before graph
    /// expansion gets its reserve (§4.8, §9's open question — exposed here
    /// rather than hard-coded since every other numeric knob is configurable).
    #[serde(default = "default_reserve")]
    pub primary_pass_reserve: f32,

    #[serde(default)]
    pub weights: HybridWeights,

    /// Multiplier applied to chunks whose path ends in `.md`/`.mdx`/`.txt`/`.rst` (§4.7).
    #[serde(default = "default_doc_penalty")]
    pub doc_penalty: f32,

    /// Force-include files above the normal size/line limits (§4.1).
    #[serde(default)]
    pub force_large: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            budget: default_budget(),
            include: Vec::new(),
            exclude: Vec::new(),
            follow_imports: true,
            import_depth: default_import_depth(),
            use_hybrid_ranking: true,
            use_smart_rerank: false,
            use_hyde: true,
            primary_pass_reserve: default_reserve(),
            weights: HybridWeights::default(),
            doc_penalty: default_doc_penalty(),
            force_large: false,
        }
    }
}

impl RetrievalConfig {
    /// Parses a `.codectx.toml` file. Caller decides whether a missing file is fatal;
    /// per §7 this is ambient configuration, not an `InvalidInput` source.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

fn default_true() -> bool {
    true
}
fn default_budget() -> usize {
    50_000
}
fn default_import_depth() -> usize {
    1
}
fn default_reserve() -> f32 {
    0.7
}
fn default_doc_penalty() -> f32 {
    0.6
}
