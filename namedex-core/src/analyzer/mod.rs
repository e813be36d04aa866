//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Cleans raw display names and splits off the basic form
//! - **Tokenizer**: Splits the basic form into searchable words

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::{NameNormalizer, NormalizedName};
pub use tokenizer::{Tokenizer, Tokens};
