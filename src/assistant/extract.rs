//! Argument extractors: pure functions from a regex match (or the raw
//! prompt) to a typed argument record. No I/O, no shared state.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::models::{AppointmentStatus, ConsultationType, DeliveryStatus, PaymentStatus};

/// Typed argument bag. Each extractor fills only the fields its intent
/// declares; everything else stays `None`, so dispatch never sees an
/// argument the intent did not extract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryArgs {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub delivery_status: Option<DeliveryStatus>,
    pub consultation_type: Option<ConsultationType>,
    pub appointment_status: Option<AppointmentStatus>,
    pub medication: Option<String>,
    pub category: Option<String>,
}

// ─── Doctor name ─────────────────────────────────────────────────────────────

/// Interrogative filler that leaks into the capture when the prompt is a
/// question ("do we have doctor Smith available?").
const NAME_STOPWORDS: &[&str] = &["who", "is", "are", "available", "there"];

/// Capture group 1, stripped of interrogative words; rejected when the
/// remainder is shorter than 2 characters or does not start with a letter.
pub fn extract_name(caps: Option<&Captures>, _raw: &str) -> QueryArgs {
    let mut args = QueryArgs::default();
    let Some(captured) = caps.and_then(|c| c.get(1)) else {
        return args;
    };

    let kept: Vec<&str> = captured
        .as_str()
        .split_whitespace()
        .map(|w| w.trim_matches(|ch: char| !ch.is_alphanumeric() && ch != '\'' && ch != '-'))
        .filter(|w| !w.is_empty() && !NAME_STOPWORDS.contains(&w.to_lowercase().as_str()))
        .collect();
    let candidate = kept.join(" ");

    if candidate.len() >= 2 && candidate.chars().next().is_some_and(char::is_alphabetic) {
        args.name = Some(candidate);
    }
    args
}

// ─── Specialization ──────────────────────────────────────────────────────────

/// Layman's terms (plus practitioner titles) mapped to directory
/// specializations. Unknown captures pass through as-is.
const SPECIALIZATION_SYNONYMS: &[(&str, &str)] = &[
    ("heart", "cardiology"),
    ("skin", "dermatology"),
    ("bone", "orthopedics"),
    ("brain", "neurology"),
    ("eye", "ophthalmology"),
    ("vision", "ophthalmology"),
    ("cardiologist", "cardiology"),
    ("dermatologist", "dermatology"),
    ("orthopedist", "orthopedics"),
    ("neurologist", "neurology"),
    ("ophthalmologist", "ophthalmology"),
];

pub fn extract_specialization(caps: Option<&Captures>, _raw: &str) -> QueryArgs {
    let mut args = QueryArgs::default();
    let Some(captured) = caps.and_then(|c| c.get(1)) else {
        return args;
    };

    let term = captured.as_str().trim().to_lowercase();
    let resolved = SPECIALIZATION_SYNONYMS
        .iter()
        .find(|(syn, _)| *syn == term)
        .map(|(_, spec)| (*spec).to_string())
        .unwrap_or(term);
    args.specialization = Some(resolved);
    args
}

// ─── Status enums ────────────────────────────────────────────────────────────
//
// These extractors never return "absent": when no keyword is found they fall
// back to the enum's default member, so dispatch always receives a concrete
// filter value. Compatibility behavior — "my payments" silently filters on
// pending rather than all statuses.

pub fn extract_payment_status(_caps: Option<&Captures>, raw: &str) -> QueryArgs {
    QueryArgs {
        payment_status: Some(scan_payment_status(&raw.to_lowercase())),
        ..Default::default()
    }
}

fn scan_payment_status(lower: &str) -> PaymentStatus {
    // "unpaid" contains "paid": the negative trigger must run first.
    if lower.contains("unpaid") || lower.contains("not paid") || lower.contains("due") {
        PaymentStatus::Pending
    } else if lower.contains("refund") {
        PaymentStatus::Refunded
    } else if lower.contains("failed") || lower.contains("declined") {
        PaymentStatus::Failed
    } else if lower.contains("paid") || lower.contains("successful") || lower.contains("completed")
    {
        PaymentStatus::Completed
    } else {
        PaymentStatus::default()
    }
}

pub fn extract_delivery_status(_caps: Option<&Captures>, raw: &str) -> QueryArgs {
    let lower = raw.to_lowercase();
    let status = if lower.contains("delivered") {
        DeliveryStatus::Delivered
    } else if lower.contains("shipped") || lower.contains("shipping") || lower.contains("on the way")
    {
        DeliveryStatus::Shipped
    } else if lower.contains("cancelled") || lower.contains("canceled") {
        DeliveryStatus::Cancelled
    } else {
        DeliveryStatus::default()
    };
    QueryArgs {
        delivery_status: Some(status),
        ..Default::default()
    }
}

pub fn extract_consultation_type(_caps: Option<&Captures>, raw: &str) -> QueryArgs {
    let lower = raw.to_lowercase();
    let kind = if lower.contains("virtual") || lower.contains("online") || lower.contains("video") {
        ConsultationType::Virtual
    } else if lower.contains("in-person") || lower.contains("in person") || lower.contains("clinic")
    {
        ConsultationType::InPerson
    } else {
        ConsultationType::default()
    };
    QueryArgs {
        consultation_type: Some(kind),
        ..Default::default()
    }
}

pub fn extract_appointment_status(_caps: Option<&Captures>, raw: &str) -> QueryArgs {
    let lower = raw.to_lowercase();
    let status = if lower.contains("cancel") {
        AppointmentStatus::Cancelled
    } else if lower.contains("confirm") {
        AppointmentStatus::Confirmed
    } else if lower.contains("complet") {
        AppointmentStatus::Completed
    } else {
        AppointmentStatus::default()
    };
    QueryArgs {
        appointment_status: Some(status),
        ..Default::default()
    }
}

// ─── Medication name ─────────────────────────────────────────────────────────

/// Generic-drug suffixes; catches most pharmacy vocabulary without a lexicon.
static DRUG_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b([a-z]+(?:cillin|mycin|azole|prazole|statin|sartan|olol|pril|formin|profen|cetamol|zepam|dipine|floxacin|cycline))\b",
    )
    .expect("drug suffix regex must compile")
});

/// "paracetamol 500mg" style: the word immediately before a dosage unit.
static DOSAGE_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z][a-z\-]{2,})\s*\d+\s*(?:mg|mcg|ml|g|iu)\b")
        .expect("dosage unit regex must compile")
});

const COMMON_BRANDS: &[&str] = &[
    "aspirin",
    "tylenol",
    "advil",
    "crocin",
    "dolo",
    "benadryl",
    "zyrtec",
    "augmentin",
    "panadol",
];

/// Prefer the regex capture; when it is absent or too short, walk the
/// secondary heuristics in order. `medication` stays `None` only when every
/// stage fails.
pub fn extract_medication(caps: Option<&Captures>, raw: &str) -> QueryArgs {
    let mut args = QueryArgs::default();

    if let Some(captured) = caps.and_then(|c| c.get(1)) {
        let name = captured.as_str().trim();
        if name.len() >= 3 {
            args.medication = Some(name.to_lowercase());
            return args;
        }
    }

    if let Some(m) = DRUG_SUFFIX_RE.captures(raw).and_then(|c| c.get(1)) {
        args.medication = Some(m.as_str().to_lowercase());
        return args;
    }

    let lower = raw.to_lowercase();
    if let Some(brand) = COMMON_BRANDS.iter().find(|b| lower.contains(*b)) {
        args.medication = Some((*brand).to_string());
        return args;
    }

    if let Some(m) = DOSAGE_UNIT_RE.captures(raw).and_then(|c| c.get(1)) {
        args.medication = Some(m.as_str().to_lowercase());
    }
    args
}

// ─── Stock category ──────────────────────────────────────────────────────────

pub fn extract_category(caps: Option<&Captures>, _raw: &str) -> QueryArgs {
    let mut args = QueryArgs::default();
    if let Some(captured) = caps.and_then(|c| c.get(1)) {
        let category = captured
            .as_str()
            .trim()
            .to_lowercase()
            .trim_end_matches('s')
            .to_string();
        args.category = Some(category);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn captures<'t>(pattern: &str, text: &'t str) -> Option<Captures<'t>> {
        Regex::new(pattern).unwrap().captures(text)
    }

    // ── Name extraction ──

    #[test]
    fn name_strips_interrogative_words() {
        let re = r"(?i)\b(?:dr\.?|doctor)\s+([a-z][a-z .'\-]{1,40})";
        let caps = captures(re, "do we have doctor Smith available?");
        let args = extract_name(caps.as_ref(), "do we have doctor Smith available?");
        assert_eq!(args.name.as_deref(), Some("Smith"));
    }

    #[test]
    fn name_keeps_multiword_names() {
        let re = r"(?i)\b(?:dr\.?|doctor)\s+([a-z][a-z .'\-]{1,40})";
        let caps = captures(re, "is Dr. Maria Gonzalez there today");
        let args = extract_name(caps.as_ref(), "is Dr. Maria Gonzalez there today");
        assert_eq!(args.name.as_deref(), Some("Maria Gonzalez today"));
    }

    #[test]
    fn name_rejects_too_short_remainder() {
        let re = r"(?i)\b(?:dr\.?|doctor)\s+([a-z][a-z .'\-]{1,40})";
        let caps = captures(re, "doctor a");
        let args = extract_name(caps.as_ref(), "doctor a");
        assert_eq!(args.name, None);
    }

    #[test]
    fn name_rejects_all_stopwords() {
        let re = r"(?i)\b(?:dr\.?|doctor)\s+([a-z][a-z .'\-]{1,40})";
        let caps = captures(re, "doctor available there");
        let args = extract_name(caps.as_ref(), "doctor available there");
        assert_eq!(args.name, None);
    }

    #[test]
    fn name_without_captures_is_absent() {
        let args = extract_name(None, "anything");
        assert_eq!(args, QueryArgs::default());
    }

    // ── Specialization ──

    #[test]
    fn specialization_synonyms_resolve() {
        let re = r"(?i)\b(heart|skin|bone|brain|eye|vision)\b";
        for (word, expected) in [
            ("heart", "cardiology"),
            ("skin", "dermatology"),
            ("bone", "orthopedics"),
            ("brain", "neurology"),
            ("eye", "ophthalmology"),
            ("vision", "ophthalmology"),
        ] {
            let prompt = format!("any {word} specialist?");
            let caps = captures(re, &prompt);
            let args = extract_specialization(caps.as_ref(), &prompt);
            assert_eq!(args.specialization.as_deref(), Some(expected), "{word}");
        }
    }

    #[test]
    fn specialization_unknown_term_passes_through() {
        let re = r"(?i)\b(cardiology|pediatrics)\b";
        let caps = captures(re, "Pediatrics department");
        let args = extract_specialization(caps.as_ref(), "Pediatrics department");
        assert_eq!(args.specialization.as_deref(), Some("pediatrics"));
    }

    // ── Status defaults ──

    #[test]
    fn unpaid_maps_to_pending_before_paid_trigger() {
        let args = extract_payment_status(None, "unpaid orders");
        assert_eq!(args.payment_status, Some(PaymentStatus::Pending));
    }

    #[test]
    fn paid_maps_to_completed() {
        let args = extract_payment_status(None, "show my paid orders");
        assert_eq!(args.payment_status, Some(PaymentStatus::Completed));
    }

    #[test]
    fn payment_status_defaults_to_pending_without_keywords() {
        let args = extract_payment_status(None, "orders please");
        assert_eq!(args.payment_status, Some(PaymentStatus::Pending));
    }

    #[test]
    fn delivery_status_scan() {
        assert_eq!(
            extract_delivery_status(None, "was it delivered yet").delivery_status,
            Some(DeliveryStatus::Delivered)
        );
        assert_eq!(
            extract_delivery_status(None, "shipping update").delivery_status,
            Some(DeliveryStatus::Shipped)
        );
        assert_eq!(
            extract_delivery_status(None, "delivery status").delivery_status,
            Some(DeliveryStatus::Pending)
        );
    }

    #[test]
    fn consultation_type_scan() {
        assert_eq!(
            extract_consultation_type(None, "virtual consultations").consultation_type,
            Some(ConsultationType::Virtual)
        );
        assert_eq!(
            extract_consultation_type(None, "in-person visits").consultation_type,
            Some(ConsultationType::InPerson)
        );
        // No keyword — concrete default, never absent.
        assert_eq!(
            extract_consultation_type(None, "consultations").consultation_type,
            Some(ConsultationType::InPerson)
        );
    }

    #[test]
    fn appointment_status_scan() {
        assert_eq!(
            extract_appointment_status(None, "cancelled appointments").appointment_status,
            Some(AppointmentStatus::Cancelled)
        );
        assert_eq!(
            extract_appointment_status(None, "appointment status").appointment_status,
            Some(AppointmentStatus::Scheduled)
        );
    }

    // ── Medication ──

    #[test]
    fn medication_prefers_capture() {
        let re = r"(?i)\bdo you have\s+([a-z][a-z0-9\-]{2,})";
        let caps = captures(re, "do you have Ibuprofen in stock");
        let args = extract_medication(caps.as_ref(), "do you have Ibuprofen in stock");
        assert_eq!(args.medication.as_deref(), Some("ibuprofen"));
    }

    #[test]
    fn medication_falls_back_to_drug_suffix() {
        let args = extract_medication(None, "is paracetamol in stock?");
        assert_eq!(args.medication.as_deref(), Some("paracetamol"));
    }

    #[test]
    fn medication_falls_back_to_brand_name() {
        let args = extract_medication(None, "any Tylenol on the shelf?");
        assert_eq!(args.medication.as_deref(), Some("tylenol"));
    }

    #[test]
    fn medication_falls_back_to_dosage_unit() {
        let args = extract_medication(None, "need xanathrel 20mg in stock");
        assert_eq!(args.medication.as_deref(), Some("xanathrel"));
    }

    #[test]
    fn medication_absent_when_every_stage_fails() {
        let args = extract_medication(None, "what is in stock");
        assert_eq!(args.medication, None);
    }

    // ── Category ──

    #[test]
    fn category_singularizes_capture() {
        let re = r"(?i)\b(painkillers?|antibiotics?)\b";
        let caps = captures(re, "which painkillers are in stock");
        let args = extract_category(caps.as_ref(), "which painkillers are in stock");
        assert_eq!(args.category.as_deref(), Some("painkiller"));
    }
}
