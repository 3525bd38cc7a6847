//! Fallback escalation: when the primary dispatch comes back empty and the
//! match confidence was low, retry against the intent's declared fallback
//! kinds in order. A fallback dispatch runs with a fixed low override
//! confidence, so it can never qualify for another fallback round itself.

use tracing::debug;

use crate::config::{FALLBACK_CONFIDENCE, FALLBACK_THRESHOLD};

use super::dispatch::QueryDispatcher;
use super::types::{DetectedQuery, Identity, QueryResponse};

/// Prefix on a fallback summary, signalling the answer is related to the
/// question rather than the literal answer to it.
pub const FALLBACK_PREFIX: &str = "I found this related information: ";

pub struct FallbackOrchestrator<'a> {
    dispatcher: &'a QueryDispatcher,
}

impl<'a> FallbackOrchestrator<'a> {
    pub fn new(dispatcher: &'a QueryDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Escalate an empty primary result through the declared fallback kinds.
    /// Engages only when all three hold: the primary data is empty, the
    /// match confidence is below the threshold, and at least one fallback is
    /// declared. A high-confidence empty result passes through unmodified.
    pub async fn resolve(
        &self,
        identity: Option<&Identity>,
        detected: &DetectedQuery,
        primary: QueryResponse,
    ) -> QueryResponse {
        if !primary.data.is_empty()
            || detected.confidence >= FALLBACK_THRESHOLD
            || detected.fallback_kinds.is_empty()
        {
            return primary;
        }

        for fallback_kind in detected.fallback_kinds {
            debug!(
                from = detected.kind.as_str(),
                to = fallback_kind.as_str(),
                "trying fallback intent"
            );
            let fallback = DetectedQuery {
                kind: *fallback_kind,
                args: detected.args.clone(),
                confidence: FALLBACK_CONFIDENCE,
                fallback_kinds: &[],
            };
            let response = self.dispatcher.dispatch(identity, &fallback).await;
            if !response.data.is_empty() {
                return QueryResponse {
                    summary: format!("{FALLBACK_PREFIX}{}", response.summary),
                    data: response.data,
                };
            }
        }

        primary
    }
}
