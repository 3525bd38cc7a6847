/// Application-level constants
pub const APP_NAME: &str = "MediConnect";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// Confidence heuristic. These values are carried over verbatim from the
// original routing tables for behavioral compatibility; nothing about them
// is principled, so treat them as tunables rather than invariants.

/// Base confidence for any direct pattern match.
pub const BASE_MATCH_CONFIDENCE: f32 = 0.7;

/// Bonus when the matched slice covers more than half the prompt.
pub const COVERAGE_BONUS: f32 = 0.2;

/// Bonus per domain keyword found anywhere in the prompt (uncapped
/// accumulation; the final score is clamped to 1.0).
pub const KEYWORD_BONUS: f32 = 0.1;

/// Fallback intents engage only below this confidence.
pub const FALLBACK_THRESHOLD: f32 = 0.6;

/// Override confidence assigned to a fallback dispatch, low enough that a
/// fallback can never re-trigger further fallback.
pub const FALLBACK_CONFIDENCE: f32 = 0.3;

/// How many entities a "Found N ..." summary spells out before truncating
/// to "and K more".
pub const MAX_DETAILED: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_confidence_below_threshold() {
        // A fallback dispatch must not qualify for another fallback round.
        assert!(FALLBACK_CONFIDENCE < FALLBACK_THRESHOLD);
    }

    #[test]
    fn base_confidence_in_unit_range() {
        assert!(BASE_MATCH_CONFIDENCE > 0.0 && BASE_MATCH_CONFIDENCE <= 1.0);
        assert!(BASE_MATCH_CONFIDENCE + COVERAGE_BONUS <= 1.0);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
