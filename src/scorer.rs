//! Per-skill relevance scoring
//!
//! Scoring is additive over four independent signals, highest weight first:
//! 1. keyword in prompt: whole word (+10) or substring (+5), per keyword
//! 2. tech stack overlap with the detected project tags (+3 per tag)
//! 3. extension pattern (".ts") mentioned in prompt or history (+4 per pattern)
//! 4. any keyword echoed in recent history (+1, once)
//!
//! The reported reason is the first one produced in that order.

use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

use crate::registry::SkillDescriptor;

// ============================================================================
// Scoring Weights
// ============================================================================

/// Scoring weights for the different match types
#[derive(Debug, Clone, Copy)]
pub struct MatchWeights {
    /// Keyword appears in the prompt as a whole word
    pub keyword_exact: f64,
    /// Keyword appears in the prompt only inside a larger word
    pub keyword_substring: f64,
    /// Per tag shared by the skill and the project
    pub tech_stack: f64,
    /// Per extension pattern mentioned in prompt or history
    pub file_pattern: f64,
    /// Some keyword was mentioned in recent history
    pub history: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            keyword_exact: 10.0,
            keyword_substring: 5.0,
            tech_stack: 3.0,
            file_pattern: 4.0,
            history: 1.0,
        }
    }
}

/// Score and explanation for one registry entry
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub name: String,
    pub score: f64,
    pub reason: String,
}

// ============================================================================
// Matching Logic
// ============================================================================

/// `needle` occurs in `haystack` bounded by word boundaries on both sides.
/// Both are expected lowercased already.
fn is_whole_word(haystack: &str, needle: &str) -> bool {
    match Regex::new(&format!(r"\b{}\b", regex::escape(needle))) {
        Ok(re) => re.is_match(haystack),
        Err(e) => {
            debug!("Cannot build word-boundary regex for {:?}, treating as substring: {}", needle, e);
            false
        }
    }
}

/// Score `skill` against the prompt with the default weights
pub fn score(
    skill: &SkillDescriptor,
    prompt: &str,
    tech_stack: &BTreeSet<String>,
    context: &str,
) -> ScoredCandidate {
    score_with(&MatchWeights::default(), skill, prompt, tech_stack, context)
}

/// Score `skill` against the prompt, environment tags and history context
pub fn score_with(
    weights: &MatchWeights,
    skill: &SkillDescriptor,
    prompt: &str,
    tech_stack: &BTreeSet<String>,
    context: &str,
) -> ScoredCandidate {
    let mut score = 0.0;
    let mut reasons: Vec<String> = Vec::new();

    let prompt_lower = prompt.to_lowercase();
    let context_lower = context.to_lowercase();

    let keywords: Vec<&String> = skill
        .keywords
        .iter()
        .filter(|k| !k.trim().is_empty())
        .collect();

    // Keyword matching against the prompt
    for keyword in &keywords {
        let kw_lower = keyword.to_lowercase();
        if !prompt_lower.contains(&kw_lower) {
            continue;
        }
        if is_whole_word(&prompt_lower, &kw_lower) {
            score += weights.keyword_exact;
            reasons.push(format!("keyword «{}» matched exactly", keyword));
        } else {
            score += weights.keyword_substring;
            reasons.push(format!("keyword «{}» found as substring", keyword));
        }
    }

    // Tech stack overlap
    let matched_tech: Vec<String> = skill
        .tech_stack
        .iter()
        .map(|t| t.to_lowercase())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|t| tech_stack.contains(t))
        .collect();
    if !matched_tech.is_empty() {
        score += weights.tech_stack * matched_tech.len() as f64;
        reasons.push(format!("tech stack «{}» matched", matched_tech.join(", ")));
    }

    // Extension patterns mentioned in prompt or history
    for pattern in &skill.file_patterns {
        if !pattern.starts_with('.') {
            continue;
        }
        let ext = pattern.to_lowercase();
        if prompt_lower.contains(&ext) || context_lower.contains(&ext) {
            score += weights.file_pattern;
            reasons.push(format!("file type «{}» mentioned", pattern));
        }
    }

    // History echo, counted once
    if !context.is_empty() {
        if let Some(keyword) = keywords
            .iter()
            .find(|k| context_lower.contains(&k.to_lowercase()))
        {
            score += weights.history;
            reasons.push(format!("history mentions «{}»", keyword));
        }
    }

    ScoredCandidate {
        name: skill.name.clone(),
        score,
        reason: reasons.into_iter().next().unwrap_or_default(),
    }
}
