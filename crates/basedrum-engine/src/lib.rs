//! basedrum Generation Engine - Deterministic Pattern Generation
//!
//! This crate turns a read-only identity snapshot (wallet activity, social
//! graph, holdings) into per-instrument rhythmic and melodic patterns with
//! musical constraints, assembled into a validated song document.
//!
//! # Determinism
//!
//! All generation is fully deterministic. Given the same snapshot, the output
//! document is identical down to the reason strings. This is achieved through:
//!
//! - A fixed linear-congruential generator seeded from the wallet address,
//!   follower count, and transaction count
//! - Hand-authored template banks selected by tiered constraint bands
//! - Bounded stochastic variation that never touches structural downbeats
//!
//! # Two generator tiers
//!
//! [`generator::PatternGenerator`] is the canonical stochastic path: it derives
//! musical constraints, picks templates per instrument role, and applies seeded
//! variation. [`threshold::ThresholdGenerator`] is the fast onboarding tier: a
//! pure banded lookup from raw scalars to canonical patterns, with no
//! randomness at all. The two tiers are intentionally independent.
//!
//! # Example
//!
//! ```
//! use basedrum_engine::generator::PatternGenerator;
//! use basedrum_spec::validation::validate_document;
//!
//! let generator = PatternGenerator::new(None);
//! let doc = generator.into_document("2024-06-01T00:00:00Z");
//! assert!(validate_document(&doc).is_ok());
//! ```
//!
//! # Modules
//!
//! - [`constraints`]: Identity snapshot to bounded musical constraints
//! - [`rng`]: Seeded deterministic random source
//! - [`note`]: Pitch-class and scale-degree naming
//! - [`library`]: Hand-authored base template banks
//! - [`generator`]: The stochastic pattern generator
//! - [`threshold`]: The rule-based onboarding generator
//! - [`expand`]: Acceptance contract for the remote producer pass

pub mod constraints;
pub mod expand;
pub mod generator;
pub mod library;
pub mod note;
pub mod rng;
pub mod threshold;

pub use constraints::{extract_constraints, Mode, MusicalConstraints};
pub use expand::{accept_expansion, ExpansionError, EXPANDED_BARS, EXPANDED_STEPS};
pub use generator::{GeneratedTrack, PatternGenerator};
pub use library::Role;
pub use rng::SeededRandom;
pub use threshold::ThresholdGenerator;

/// Crate version for engine identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
