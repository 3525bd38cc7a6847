//! The chat assistant core: free-text prompt in, `{summary, data}` out.
//!
//! One prompt flows through a fixed pipeline: the matcher routes it to an
//! intent with typed arguments and an advisory confidence, the dispatcher
//! runs the intent against a collaborator, the fallback orchestrator
//! escalates a low-confidence empty result through related intents, and the
//! suggestion generator tops up whatever is still empty with an advisory.
//! Every stage degrades instead of failing, so `handle_query` always
//! resolves to a well-formed response.

pub mod catalog;
pub mod dispatch;
pub mod extract;
pub mod fallback;
pub mod matcher;
pub mod render;
pub mod suggest;
pub mod types;

pub use catalog::IntentKind;
pub use extract::QueryArgs;
pub use types::{DetectedQuery, DiagnosisDetail, Identity, QueryData, QueryResponse};

use tracing::debug;

use crate::stores::Collaborators;

use dispatch::QueryDispatcher;
use fallback::FallbackOrchestrator;
use suggest::{SuggestionGenerator, GENERIC_HELP};

/// One engine definition, any number of collaborator bindings: construct it
/// once per binding (a server-side store, an in-memory test double, a cached
/// client mirror) and the routing behavior is identical across all of them.
pub struct Assistant {
    dispatcher: QueryDispatcher,
    collaborators: Collaborators,
}

impl Assistant {
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            dispatcher: QueryDispatcher::new(collaborators.clone()),
            collaborators,
        }
    }

    /// Answer one prompt. Collaborator calls run strictly one at a time, in
    /// primary-then-fallback-then-probe order, and no failure mode escapes
    /// as an error.
    pub async fn handle_query(
        &self,
        identity: Option<&Identity>,
        prompt: &str,
    ) -> QueryResponse {
        let detected = matcher::match_prompt(prompt);
        debug!(
            intent = detected.kind.as_str(),
            confidence = detected.confidence,
            "routed prompt"
        );

        let primary = self.dispatcher.dispatch(identity, &detected).await;
        let mut response = FallbackOrchestrator::new(&self.dispatcher)
            .resolve(identity, &detected, primary)
            .await;

        if response.data.is_empty() {
            // Invariant: every dispatch path already emits a sentence, so
            // the empty-summary arms below never fire today. They hold the
            // never-empty-summary contract independently of that.
            let advisory = SuggestionGenerator::new(&self.collaborators)
                .advise(identity, detected.kind)
                .await;
            match advisory {
                Some(advisory) if response.summary.is_empty() => response.summary = advisory,
                Some(advisory) => response.summary = format!("{} {advisory}", response.summary),
                None if response.summary.is_empty() => response.summary = GENERIC_HELP.into(),
                None => {}
            }
        }

        response
    }
}
