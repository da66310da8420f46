//! The linear analysis pipeline: validate input, encode, call the model.
//!
//! Each stage is its own module so it can be unit-tested without the others:
//!
//! * [`input`] — resolve and validate the saved upload on disk
//! * [`encode`] — file bytes → base64 `data:` payload
//! * [`llm`] — wire types and the single completions API call
//!
//! The stages are composed by [`crate::analyze::analyze`].

pub mod encode;
pub mod input;
pub mod llm;
