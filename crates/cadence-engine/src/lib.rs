//! Rule compilation, occurrence generation and rule formatting.
//!
//! A [`ValidDescriptor`](cadence_core::ValidDescriptor) compiles into an
//! immutable [`Rule`]. Rules generate their occurrences lazily through
//! [`Occurrences`], export to `rrule` sets, and are described in words by a
//! [`Formatter`].

pub mod error;
pub mod format;
pub mod occurrence;
pub mod rule;

pub use error::{EngineError, EngineResult, FormattingError};
pub use format::{EnglishLocalizer, Formatter, Localizer};
pub use occurrence::Occurrences;
pub use rule::{CompileContext, Recurrence, Rule, compile};
