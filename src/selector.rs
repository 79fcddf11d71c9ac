//! Ranking the registry and choosing at most one skill

use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, info};

use crate::hook::Recommendation;
use crate::registry::{self, SkillDescriptor};
use crate::scorer::{score_with, MatchWeights, ScoredCandidate};
use crate::{environment, history, DEFAULT_HISTORY_LIMIT, SELECTION_THRESHOLD};

/// Scores a registry against one request. Built fresh per invocation.
#[derive(Debug, Clone)]
pub struct Selector {
    skills: Vec<SkillDescriptor>,
    history_limit: usize,
    weights: MatchWeights,
}

impl Selector {
    pub fn new(skills: Vec<SkillDescriptor>) -> Self {
        Self {
            skills,
            history_limit: DEFAULT_HISTORY_LIMIT,
            weights: MatchWeights::default(),
        }
    }

    /// Selector over the registry installed next to the binary
    pub fn installed() -> Self {
        Self::new(registry::load())
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_weights(mut self, weights: MatchWeights) -> Self {
        self.weights = weights;
        self
    }

    /// All candidates with a positive score, best first. Equal scores keep
    /// registry order.
    pub fn rank(&self, prompt: &str, cwd: &Path, transcript: Option<&Path>) -> Vec<ScoredCandidate> {
        if self.skills.is_empty() {
            debug!("Empty registry, nothing to rank");
            return Vec::new();
        }

        let tech_stack = environment::detect(cwd);
        let context = transcript
            .map(|path| history::extract(path, self.history_limit))
            .unwrap_or_default();

        let mut candidates: Vec<ScoredCandidate> = self
            .skills
            .iter()
            .map(|skill| score_with(&self.weights, skill, prompt, &tech_stack, &context))
            .filter(|candidate| candidate.score > 0.0)
            .collect();

        // sort_by is stable, so the first-declared skill wins ties
        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        candidates
    }

    /// The best skill for this request, if it clears the threshold
    pub fn select(&self, prompt: &str, cwd: &Path, transcript: Option<&Path>) -> Option<Recommendation> {
        pick(&self.rank(prompt, cwd, transcript))
    }
}

/// Accept the head of an already ranked list if it reaches [`SELECTION_THRESHOLD`]
pub fn pick(ranked: &[ScoredCandidate]) -> Option<Recommendation> {
    let best = ranked.first()?;
    if best.score >= SELECTION_THRESHOLD {
        info!("Selected {} (score: {:.1})", best.name, best.score);
        Some(Recommendation {
            name: best.name.clone(),
            reason: best.reason.clone(),
        })
    } else {
        debug!(
            "Best candidate {} scored {:.1}, below threshold {:.1}",
            best.name, best.score, SELECTION_THRESHOLD
        );
        None
    }
}
