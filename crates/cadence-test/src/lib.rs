//! Cadence recurrence engine - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can
//! exercise the descriptor-to-description pipeline through one path.

#![allow(ambiguous_glob_reexports)]

pub mod core {
    pub use cadence_core::*;
}

pub mod engine {
    pub use cadence_engine::*;
}

/// Everything a pipeline test usually needs.
pub mod prelude {
    pub use cadence_core::config::Settings;
    pub use cadence_core::types::RuleKind;
    pub use cadence_core::{Descriptor, ValidationError, ValidationErrors, validate};
    pub use cadence_engine::{
        CompileContext, EnglishLocalizer, Formatter, FormattingError, Recurrence, Rule, compile,
    };
}
