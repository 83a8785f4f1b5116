//! basedrum Canonical Document Library
//!
//! This crate provides the types, validation, and hashing for basedrum song
//! documents and the user-data snapshots that drive generation.
//!
//! # Overview
//!
//! A song document is a JSON document (format tag `"basedrum-v1"`) describing a
//! complete generated track: metadata, master effects, per-instrument step
//! patterns, and an optional bar-range arrangement. Documents are validated
//! structurally and against their documented numeric ranges before the playback
//! engine is allowed to read them.
//!
//! # Example
//!
//! ```
//! use basedrum_spec::song::{SongDocument, SongMetadata, SongEffects, SongTrack};
//! use basedrum_spec::validation::validate_document;
//!
//! let metadata = SongMetadata::new("Genesis Block", 128, 1, "2024-06-01T00:00:00Z");
//! let mut doc = SongDocument::new(metadata, SongEffects::default());
//! doc.insert_track("kick", SongTrack::hits(vec![0, 4, 8, 12], -6.0));
//!
//! let result = validate_document(&doc);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for document validation
//! - [`song`]: Song document types (metadata, effects, tracks, arrangement)
//! - [`user`]: User-data snapshot consumed by the generators
//! - [`validation`]: Document validation functions
//! - [`hash`]: Canonical hashing and seed derivation

pub mod error;
pub mod hash;
pub mod song;
pub mod user;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{
    DocumentError, ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use hash::{address_hash, canonical_document_hash, derive_seed, DEFAULT_SEED};
pub use song::{
    ActiveTracks, ArrangementSection, FilterKind, FilterSettings, ReverbSettings, SongDocument,
    SongEffects, SongMetadata, SongTrack, MAX_BARS, MAX_BPM, MAX_STEPS, MIN_BARS, MIN_BPM,
    MIN_STEPS, SILENCE_FLOOR_DB, SONG_FORMAT, STEPS_PER_BAR,
};
pub use user::{FarcasterProfile, OnchainActivity, PriceSnapshot, UserData, WalletSnapshot};
pub use validation::{parse_document, validate_document};
