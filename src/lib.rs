//! MediConnect assistant core.
//!
//! Routes a free-text patient prompt to one of a fixed set of structured
//! intents, extracts typed arguments, dispatches the matching lookup against
//! a domain collaborator, and degrades through fallback intents down to a
//! canned suggestion when nothing concrete can be found.
//!
//! The crate owns no transport: the surrounding request layer calls
//! [`assistant::Assistant::handle_query`] in-process and renders the
//! resulting `{summary, data}` pair however it likes. Persistence, auth and
//! delivery of the underlying records live behind the traits in [`stores`].

pub mod assistant;
pub mod config;
pub mod models;
pub mod stores;

pub use assistant::{Assistant, Identity, QueryResponse};
