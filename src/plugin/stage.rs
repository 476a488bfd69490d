//! Pipeline stages.

use std::fmt;

use serde::Serialize;

/// A fixed, ordered point in the generation pipeline.
///
/// Stages are reached in declaration order, each at most once per run.
/// `Cleanup` is always reached, even after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Init,
    PreGenerate,
    Generate,
    PostGenerate,
    Validate,
    Cleanup,
}

impl Stage {
    /// Every stage in execution order.
    pub const ALL: [Stage; 6] = [
        Stage::Init,
        Stage::PreGenerate,
        Stage::Generate,
        Stage::PostGenerate,
        Stage::Validate,
        Stage::Cleanup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::PreGenerate => "pre-generate",
            Stage::Generate => "generate",
            Stage::PostGenerate => "post-generate",
            Stage::Validate => "validate",
            Stage::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
