use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::IntentKind;
use super::extract::QueryArgs;
use crate::models::*;

/// Caller identity forwarded by the request layer. `None` at the entry point
/// means an anonymous visitor; identity-scoped intents short-circuit to a
/// login prompt without touching any collaborator.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
}

/// Outcome of routing one prompt, immutable once built.
#[derive(Debug, Clone)]
pub struct DetectedQuery {
    pub kind: IntentKind,
    pub args: QueryArgs,
    /// Advisory score in [0, 1]; gates fallback, never the primary dispatch.
    pub confidence: f32,
    pub fallback_kinds: &'static [IntentKind],
}

/// What `handle_query` hands back to the chat layer. Always well-formed: the
/// summary is a sentence even when every lookup failed or came back empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub summary: String,
    pub data: QueryData,
}

/// The latest diagnosis together with its prescriptions, loaded as one
/// fixed two-call pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisDetail {
    pub diagnosis: Diagnosis,
    pub prescriptions: Vec<Prescription>,
}

/// Typed payload for the chat UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "items", rename_all = "snake_case")]
pub enum QueryData {
    Doctors(Vec<Doctor>),
    Orders(Vec<Order>),
    Appointments(Vec<Appointment>),
    Payments(Vec<Payment>),
    Diagnosis(DiagnosisDetail),
    Medications(Vec<Medication>),
    None,
}

impl QueryData {
    /// Empty means "nothing to show": either no payload at all or an empty
    /// collection. Drives the fallback and suggestion stages.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Doctors(v) => v.is_empty(),
            Self::Orders(v) => v.is_empty(),
            Self::Appointments(v) => v.is_empty(),
            Self::Payments(v) => v.is_empty(),
            Self::Diagnosis(_) => false,
            Self::Medications(v) => v.is_empty(),
            Self::None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_and_empty_collections_are_empty() {
        assert!(QueryData::None.is_empty());
        assert!(QueryData::Doctors(vec![]).is_empty());
        assert!(QueryData::Orders(vec![]).is_empty());
    }

    #[test]
    fn diagnosis_detail_is_never_empty() {
        let detail = DiagnosisDetail {
            diagnosis: Diagnosis {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                condition: "Hypertension".into(),
                diagnosed_on: chrono::NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
                doctor_id: None,
                notes: None,
            },
            prescriptions: vec![],
        };
        assert!(!QueryData::Diagnosis(detail).is_empty());
    }

    #[test]
    fn query_data_serializes_tagged() {
        let json = serde_json::to_value(&QueryData::None).unwrap();
        assert_eq!(json["type"], "none");

        let json = serde_json::to_value(&QueryData::Doctors(vec![])).unwrap();
        assert_eq!(json["type"], "doctors");
        assert!(json["items"].as_array().unwrap().is_empty());
    }
}
