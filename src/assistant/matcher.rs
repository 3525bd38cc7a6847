//! First-match-wins routing over the intent catalog plus the advisory
//! confidence heuristic.

use crate::config::{BASE_MATCH_CONFIDENCE, COVERAGE_BONUS, KEYWORD_BONUS};

use super::catalog::{catalog, IntentKind, MatchPattern};
use super::types::DetectedQuery;

/// Lower-case, trim, collapse internal whitespace. Literal patterns run
/// against this form; regexes run against the raw prompt so captures keep
/// the user's casing.
pub fn normalize_prompt(prompt: &str) -> String {
    prompt
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Walk the catalog in order and stop at the first pattern that matches.
/// Prompts matching nothing route to [`IntentKind::Unknown`] with
/// confidence 0 and no fallbacks.
pub fn match_prompt(prompt: &str) -> DetectedQuery {
    let normalized = normalize_prompt(prompt);

    for def in catalog() {
        for pattern in &def.patterns {
            match pattern {
                MatchPattern::Literal(text) => {
                    if normalized.contains(text) {
                        let args = def.extract.map(|f| f(None, prompt)).unwrap_or_default();
                        return DetectedQuery {
                            kind: def.kind,
                            args,
                            confidence: score(text.len(), &normalized, def.keywords),
                            fallback_kinds: def.fallbacks,
                        };
                    }
                }
                MatchPattern::Regex(re) => {
                    if let Some(caps) = re.captures(prompt) {
                        // The regex ran on the raw prompt, but coverage is
                        // measured on the normalized form, same as literals.
                        let matched = caps.get(0).map_or("", |m| m.as_str());
                        let matched_len = normalize_prompt(matched).len();
                        let args = def
                            .extract
                            .map(|f| f(Some(&caps), prompt))
                            .unwrap_or_default();
                        return DetectedQuery {
                            kind: def.kind,
                            args,
                            confidence: score(matched_len, &normalized, def.keywords),
                            fallback_kinds: def.fallbacks,
                        };
                    }
                }
            }
        }
    }

    DetectedQuery {
        kind: IntentKind::Unknown,
        args: Default::default(),
        confidence: 0.0,
        fallback_kinds: &[],
    }
}

/// Advisory score, not a probability. Base for any direct match, a bonus
/// when the match covers more than half the prompt, a bonus per domain
/// keyword present anywhere, clamped to 1.
fn score(matched_len: usize, normalized: &str, keywords: &[&str]) -> f32 {
    let mut confidence = BASE_MATCH_CONFIDENCE;
    if matched_len * 2 > normalized.len() {
        confidence += COVERAGE_BONUS;
    }
    for keyword in keywords {
        if normalized.contains(keyword) {
            confidence += KEYWORD_BONUS;
        }
    }
    confidence.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConsultationType, PaymentStatus};

    #[test]
    fn normalization_collapses_whitespace_and_case() {
        assert_eq!(
            normalize_prompt("  Show   ALL\tavailable\n doctors "),
            "show all available doctors"
        );
    }

    #[test]
    fn all_doctors_prompt_routes_with_high_confidence() {
        let detected = match_prompt("show all available doctors");
        assert_eq!(detected.kind, IntentKind::DoctorAll);
        assert_eq!(detected.args, Default::default());
        assert!(detected.confidence >= 0.9, "got {}", detected.confidence);
    }

    #[test]
    fn doctor_by_name_extracts_the_name() {
        let detected = match_prompt("do we have doctor Smith available?");
        assert_eq!(detected.kind, IntentKind::DoctorByName);
        assert_eq!(detected.args.name.as_deref(), Some("Smith"));
    }

    #[test]
    fn unpaid_orders_routes_to_payment_status_pending() {
        let detected = match_prompt("unpaid orders");
        assert_eq!(detected.kind, IntentKind::OrdersPaymentStatus);
        assert_eq!(detected.args.payment_status, Some(PaymentStatus::Pending));
    }

    #[test]
    fn virtual_consultations_routes_to_consultation_type() {
        let detected = match_prompt("virtual consultations");
        assert_eq!(detected.kind, IntentKind::AppointmentsConsultationType);
        assert_eq!(
            detected.args.consultation_type,
            Some(ConsultationType::Virtual)
        );
    }

    #[test]
    fn gibberish_routes_to_unknown_with_zero_confidence() {
        let detected = match_prompt("asdkjasd random gibberish");
        assert_eq!(detected.kind, IntentKind::Unknown);
        assert_eq!(detected.confidence, 0.0);
        assert!(detected.fallback_kinds.is_empty());
    }

    #[test]
    fn specialization_with_keyword_boost_clears_fallback_threshold() {
        let detected = match_prompt("cardiology doctor");
        assert_eq!(detected.kind, IntentKind::DoctorBySpecialization);
        assert_eq!(detected.args.specialization.as_deref(), Some("cardiology"));
        assert!(detected.confidence >= 0.6, "got {}", detected.confidence);
    }

    // Ordering regressions: these prompts satisfy more than one catalog
    // entry and must resolve to the earliest one.

    #[test]
    fn availability_today_wins_over_name_capture() {
        // "doctor available today" would otherwise feed "today" into the
        // name extractor via the byName regex.
        let detected = match_prompt("is any doctor available today?");
        assert_eq!(detected.kind, IntentKind::DoctorAvailableToday);
        assert_eq!(detected.args.name, None);
    }

    #[test]
    fn specific_intent_wins_over_domain_catch_all() {
        let detected = match_prompt("heart doctors please");
        assert_eq!(detected.kind, IntentKind::DoctorBySpecialization);
        assert_eq!(detected.args.specialization.as_deref(), Some("cardiology"));

        let detected = match_prompt("upcoming appointments");
        assert_eq!(detected.kind, IntentKind::AppointmentsUpcoming);
    }

    #[test]
    fn matching_is_deterministic() {
        let first = match_prompt("refund for my payment");
        for _ in 0..5 {
            let again = match_prompt("refund for my payment");
            assert_eq!(again.kind, first.kind);
            assert_eq!(again.args, first.args);
            assert_eq!(again.confidence, first.confidence);
        }
    }

    #[test]
    fn coverage_bonus_requires_majority_of_prompt() {
        // Same intent, mentioned in passing: base + keyword boosts only.
        let passing = match_prompt(
            "by the way while we are chatting about other things entirely, unpaid stuff",
        );
        assert_eq!(passing.kind, IntentKind::OrdersPaymentStatus);
        assert!(passing.confidence < 0.9);

        let direct = match_prompt("unpaid order");
        assert_eq!(direct.kind, IntentKind::OrdersPaymentStatus);
        assert!(direct.confidence > passing.confidence);
    }

    #[test]
    fn regex_confidence_is_unchanged_by_whitespace_padding() {
        let tight = match_prompt("do we have doctor Smith available?");
        let padded = match_prompt("do  we   have doctor   Smith  available?");
        assert_eq!(padded.kind, tight.kind);
        assert_eq!(padded.args, tight.args);
        assert_eq!(padded.confidence, tight.confidence);
    }

    #[test]
    fn confidence_is_clamped_to_one() {
        let detected = match_prompt("show all available doctors");
        assert!(detected.confidence <= 1.0);
    }
}
