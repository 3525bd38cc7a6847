//! The intent catalog: an ordered, immutable table of match rules built once
//! at first use.
//!
//! Order is part of the routing contract. Intents are grouped by domain
//! (doctors, orders, appointments, payments, diagnoses, pharmacy stock) and,
//! within a domain, run from most specific to most general, so a prompt that
//! could satisfy both a specific lookup and a catch-all listing resolves to
//! the specific one. Reordering entries changes behavior; the regression
//! tests in `matcher.rs` pin the ambiguous cases.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use super::extract;
use super::extract::QueryArgs;

/// Closed set of intents the assistant can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntentKind {
    DoctorAvailableToday,
    DoctorByName,
    DoctorBySpecialization,
    DoctorAll,
    OrdersPaymentStatus,
    OrdersDeliveryStatus,
    OrdersAll,
    AppointmentsConsultationType,
    AppointmentsStatus,
    AppointmentsUpcoming,
    AppointmentsAll,
    PaymentsByStatus,
    PaymentsAll,
    DiagnosesLatest,
    StockByName,
    StockByCategory,
    StockAll,
    Unknown,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DoctorAvailableToday => "doctor:availableToday",
            Self::DoctorByName => "doctor:byName",
            Self::DoctorBySpecialization => "doctor:bySpecialization",
            Self::DoctorAll => "doctor:all",
            Self::OrdersPaymentStatus => "orders:paymentStatus",
            Self::OrdersDeliveryStatus => "orders:deliveryStatus",
            Self::OrdersAll => "orders:all",
            Self::AppointmentsConsultationType => "appointments:consultationType",
            Self::AppointmentsStatus => "appointments:status",
            Self::AppointmentsUpcoming => "appointments:upcoming",
            Self::AppointmentsAll => "appointments:all",
            Self::PaymentsByStatus => "payments:byStatus",
            Self::PaymentsAll => "payments:all",
            Self::DiagnosesLatest => "diagnoses:latest",
            Self::StockByName => "stock:byName",
            Self::StockByCategory => "stock:byCategory",
            Self::StockAll => "stock:all",
            Self::Unknown => "unknown",
        }
    }

    /// Orders, appointments, payments and diagnoses belong to a specific
    /// user; without a caller identity they short-circuit to a login prompt
    /// before any collaborator runs.
    pub fn is_identity_scoped(&self) -> bool {
        matches!(
            self,
            Self::OrdersPaymentStatus
                | Self::OrdersDeliveryStatus
                | Self::OrdersAll
                | Self::AppointmentsConsultationType
                | Self::AppointmentsStatus
                | Self::AppointmentsUpcoming
                | Self::AppointmentsAll
                | Self::PaymentsByStatus
                | Self::PaymentsAll
                | Self::DiagnosesLatest
        )
    }
}

/// A single match rule. Literals run as case-insensitive substring tests
/// against the normalized prompt; regexes run against the raw prompt so
/// capture groups keep the user's casing for the extractors.
pub enum MatchPattern {
    Literal(&'static str),
    Regex(Regex),
}

pub type ExtractFn = fn(Option<&Captures>, &str) -> QueryArgs;

pub struct IntentDefinition {
    pub kind: IntentKind,
    pub patterns: Vec<MatchPattern>,
    pub extract: Option<ExtractFn>,
    /// Domain keywords that boost confidence when present in the prompt.
    pub keywords: &'static [&'static str],
    /// Fallback intents, tried in order when the primary result is empty
    /// and confidence is low.
    pub fallbacks: &'static [IntentKind],
}

fn lit(s: &'static str) -> MatchPattern {
    MatchPattern::Literal(s)
}

fn re(pattern: &str) -> MatchPattern {
    MatchPattern::Regex(Regex::new(pattern).expect("catalog regex must compile"))
}

static CATALOG: LazyLock<Vec<IntentDefinition>> = LazyLock::new(|| {
    vec![
        // ─── Doctors ─────────────────────────────────────────────────────
        IntentDefinition {
            kind: IntentKind::DoctorAvailableToday,
            patterns: vec![lit("available today"), lit("free today"), lit("today's availability")],
            extract: None,
            keywords: &["doctor", "available", "today"],
            fallbacks: &[IntentKind::DoctorAll],
        },
        IntentDefinition {
            kind: IntentKind::DoctorByName,
            patterns: vec![re(r"(?i)\b(?:dr\.?|doctor)\s+([a-z][a-z .'\-]{1,40})")],
            extract: Some(extract::extract_name),
            keywords: &["doctor", "available", "specialist"],
            fallbacks: &[IntentKind::DoctorAll],
        },
        IntentDefinition {
            kind: IntentKind::DoctorBySpecialization,
            patterns: vec![re(
                r"(?i)\b(cardiology|cardiologist|dermatology|dermatologist|orthopedics|orthopedist|neurology|neurologist|ophthalmology|ophthalmologist|heart|skin|bone|brain|eye|vision)\b(?:\s+(?:doctors?|specialists?))?",
            )],
            extract: Some(extract::extract_specialization),
            keywords: &["doctor", "specialist"],
            fallbacks: &[IntentKind::DoctorAll],
        },
        IntentDefinition {
            kind: IntentKind::DoctorAll,
            patterns: vec![
                lit("all doctors"),
                lit("available doctors"),
                lit("list doctors"),
                lit("show doctors"),
                lit("doctors"),
                lit("doctor"),
            ],
            extract: None,
            keywords: &["doctor", "available", "specialist"],
            fallbacks: &[],
        },
        // ─── Orders ──────────────────────────────────────────────────────
        IntentDefinition {
            kind: IntentKind::OrdersPaymentStatus,
            patterns: vec![
                lit("unpaid"),
                lit("order payment"),
                lit("payment status"),
                lit("paid orders"),
                lit("orders paid"),
            ],
            extract: Some(extract::extract_payment_status),
            keywords: &["order", "payment", "paid"],
            fallbacks: &[IntentKind::OrdersAll],
        },
        IntentDefinition {
            kind: IntentKind::OrdersDeliveryStatus,
            patterns: vec![
                lit("delivery status"),
                lit("delivered"),
                lit("shipped"),
                lit("shipping"),
                lit("track my order"),
            ],
            extract: Some(extract::extract_delivery_status),
            keywords: &["order", "delivery"],
            fallbacks: &[IntentKind::OrdersAll],
        },
        IntentDefinition {
            kind: IntentKind::OrdersAll,
            patterns: vec![lit("my orders"), lit("order history"), lit("orders")],
            extract: None,
            keywords: &["order", "medicine"],
            fallbacks: &[],
        },
        // ─── Appointments ────────────────────────────────────────────────
        IntentDefinition {
            kind: IntentKind::AppointmentsConsultationType,
            patterns: vec![
                lit("virtual"),
                lit("online consultation"),
                lit("video consultation"),
                lit("in-person"),
                lit("in person"),
            ],
            extract: Some(extract::extract_consultation_type),
            keywords: &["appointment", "consultation", "visit"],
            fallbacks: &[IntentKind::AppointmentsUpcoming, IntentKind::AppointmentsAll],
        },
        IntentDefinition {
            kind: IntentKind::AppointmentsStatus,
            patterns: vec![
                lit("cancelled appointment"),
                lit("canceled appointment"),
                lit("confirmed appointment"),
                lit("completed appointment"),
                lit("appointment status"),
            ],
            extract: Some(extract::extract_appointment_status),
            keywords: &["appointment", "status"],
            fallbacks: &[IntentKind::AppointmentsAll],
        },
        IntentDefinition {
            kind: IntentKind::AppointmentsUpcoming,
            patterns: vec![
                lit("upcoming appointment"),
                lit("next appointment"),
                lit("upcoming visits"),
            ],
            extract: None,
            keywords: &["appointment", "upcoming", "schedule"],
            fallbacks: &[IntentKind::AppointmentsAll],
        },
        IntentDefinition {
            kind: IntentKind::AppointmentsAll,
            patterns: vec![
                lit("my appointments"),
                lit("appointments"),
                lit("appointment"),
                lit("consultations"),
            ],
            extract: None,
            keywords: &["appointment", "booking"],
            fallbacks: &[],
        },
        // ─── Payments ────────────────────────────────────────────────────
        IntentDefinition {
            kind: IntentKind::PaymentsByStatus,
            patterns: vec![
                lit("pending payments"),
                lit("failed payment"),
                lit("refund"),
                lit("successful payment"),
                lit("payment pending"),
            ],
            extract: Some(extract::extract_payment_status),
            keywords: &["payment", "transaction"],
            fallbacks: &[IntentKind::PaymentsAll],
        },
        IntentDefinition {
            kind: IntentKind::PaymentsAll,
            patterns: vec![
                lit("payment history"),
                lit("my payments"),
                lit("payments"),
                lit("payment"),
            ],
            extract: None,
            keywords: &["payment", "transaction", "history"],
            fallbacks: &[],
        },
        // ─── Diagnoses ───────────────────────────────────────────────────
        IntentDefinition {
            kind: IntentKind::DiagnosesLatest,
            patterns: vec![
                lit("latest diagnosis"),
                lit("my diagnosis"),
                lit("diagnosed"),
                lit("diagnosis"),
                lit("my condition"),
            ],
            extract: None,
            keywords: &["diagnosis", "prescription", "condition"],
            fallbacks: &[],
        },
        // ─── Pharmacy stock ──────────────────────────────────────────────
        IntentDefinition {
            kind: IntentKind::StockByName,
            patterns: vec![
                re(r"(?i)\b(?:do (?:you|we) have|stock of|availability of|looking for)\s+([a-z][a-z0-9\-]{2,})"),
                lit("in stock"),
            ],
            extract: Some(extract::extract_medication),
            keywords: &["stock", "medicine", "pharmacy"],
            fallbacks: &[IntentKind::StockAll],
        },
        IntentDefinition {
            kind: IntentKind::StockByCategory,
            patterns: vec![re(
                r"(?i)\b(painkillers?|antibiotics?|antiseptics?|vitamins?|supplements?|antacids?|syrups?|tablets?|capsules?)\b",
            )],
            extract: Some(extract::extract_category),
            keywords: &["stock", "medicine", "pharmacy", "category"],
            fallbacks: &[IntentKind::StockAll],
        },
        IntentDefinition {
            kind: IntentKind::StockAll,
            patterns: vec![
                lit("pharmacy stock"),
                lit("medicines available"),
                lit("stock"),
                lit("pharmacy"),
                lit("medicines"),
                lit("medications"),
            ],
            extract: None,
            keywords: &["stock", "medicine", "pharmacy"],
            fallbacks: &[],
        },
    ]
});

/// The ordered catalog, built once and read-only for the process lifetime.
pub fn catalog() -> &'static [IntentDefinition] {
    &CATALOG
}
