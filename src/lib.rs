//! Auto Skill Selector - recommends one skill per prompt for Claude Code
//!
//! Runs as a UserPromptSubmit hook. For each prompt it scores every entry of a
//! static skill registry against four signals and recommends the single best
//! entry, or stays silent when nothing clears [`SELECTION_THRESHOLD`]:
//! - keywords in the prompt (whole word or substring)
//! - technology tags detected from project manifests in the working directory
//! - file extensions mentioned in the prompt or recent history
//! - keywords echoed in the last few user messages of the session transcript
//!
//! # Input (via stdin)
//! JSON with fields: prompt, cwd, transcript_path
//!
//! # Output (via stdout)
//! Nothing, or a single `<system-reminder>` line naming the skill and why.
//!
//! Every invocation re-reads the registry, manifests and transcript; nothing is
//! cached between runs.

pub mod environment;
pub mod error;
pub mod history;
pub mod hook;
pub mod registry;
pub mod scorer;
pub mod selector;

pub use error::RouterError;
pub use hook::{HookInput, Recommendation};
pub use registry::SkillDescriptor;
pub use scorer::{score, MatchWeights, ScoredCandidate};
pub use selector::{pick, Selector};

/// Minimum score the top-ranked candidate needs to be recommended
pub const SELECTION_THRESHOLD: f64 = 5.0;

/// Number of user messages pulled from the transcript by default
pub const DEFAULT_HISTORY_LIMIT: usize = 5;
