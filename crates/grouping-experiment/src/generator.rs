//! Synthetic participant generator.
//!
//! Produces a population split evenly between the two categories, with
//! unique nicknames, for demos and experiments.

use grouping_kernel::{Category, Participant};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const CATEGORY_A_NICKNAMES: &[&str] = &[
    "ByteKnight", "StackSurfer", "RustRanger", "NullPointer", "LoopLord", "CacheCaptain",
    "KernelKid", "PixelPilot", "BitBaron", "ShellShock", "LambdaLion", "TokenTitan",
    "ForkFalcon", "QueueKing", "HeapHawk", "MutexMarshal", "VectorViking", "SocketSage",
    "PatchPaladin", "CompileCrow", "RegexRider", "ThreadTiger", "LatencyLynx", "BuildBison",
];

const CATEGORY_B_NICKNAMES: &[&str] = &[
    "CodeQueen", "DebugDiva", "SyntaxSiren", "PromptPioneer", "MergeMuse", "ClosureCoral",
    "TraitTempest", "BorrowBelle", "ParserPhoenix", "CommitComet", "ArrayAurora", "GraphGazelle",
    "SchemaSwan", "DeployDove", "LintLark", "HashHeron", "MacroMaven", "RouterRaven",
    "ScriptSparrow", "BranchBlossom", "StreamSelkie", "ObjectOrchid", "PayloadPeony", "FuzzFinch",
];

/// Configuration for participant generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of participants
    pub count: usize,
    /// Random seed for reproducibility (None for random)
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 72,
            seed: None,
        }
    }
}

/// Generator for synthetic populations.
pub struct ParticipantGenerator {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
}

impl ParticipantGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate `count` participants: `count / 2` of category A, the rest B.
    pub fn generate(&mut self) -> Vec<Participant> {
        let target_a = self.config.count / 2;
        let target_b = self.config.count - target_a;

        let mut participants = Vec::with_capacity(self.config.count);
        participants.extend(
            self.nicknames(CATEGORY_A_NICKNAMES, "dev", target_a)
                .into_iter()
                .map(|name| Participant::new(name, Category::A)),
        );
        participants.extend(
            self.nicknames(CATEGORY_B_NICKNAMES, "coder", target_b)
                .into_iter()
                .map(|name| Participant::new(name, Category::B)),
        );
        participants.shuffle(&mut self.rng);
        participants
    }

    /// Draw `count` distinct nicknames from a pool, falling back to numbered
    /// names once the pool is exhausted.
    fn nicknames(&mut self, pool: &[&str], fallback: &str, count: usize) -> Vec<String> {
        let mut names: Vec<String> = pool.iter().map(|s| s.to_string()).collect();
        names.shuffle(&mut self.rng);
        names.truncate(count);

        let mut suffix = 1;
        while names.len() < count {
            names.push(format!("{}{}", fallback, suffix));
            suffix += 1;
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn generate(count: usize, seed: u64) -> Vec<Participant> {
        ParticipantGenerator::new(GeneratorConfig {
            count,
            seed: Some(seed),
        })
        .generate()
    }

    #[test]
    fn test_even_split() {
        let people = generate(72, 42);
        assert_eq!(people.len(), 72);
        let a = people.iter().filter(|p| p.category() == Category::A).count();
        assert_eq!(a, 36);
    }

    #[test]
    fn test_odd_count_gives_extra_to_b() {
        let people = generate(7, 1);
        let a = people.iter().filter(|p| p.category() == Category::A).count();
        assert_eq!(a, 3);
        assert_eq!(people.len() - a, 4);
    }

    #[test]
    fn test_names_are_unique_beyond_pool_size() {
        let people = generate(200, 9);
        let names: HashSet<&str> = people.iter().map(|p| p.id()).collect();
        assert_eq!(names.len(), 200);
    }

    #[test]
    fn test_reproducible_with_seed() {
        assert_eq!(generate(20, 12345), generate(20, 12345));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(generate(20, 1), generate(20, 2));
    }

    #[test]
    fn test_generated_roster_is_accepted_by_kernel() {
        let people = generate(48, 3);
        assert!(grouping_kernel::Roster::new(people).is_ok());
    }
}
