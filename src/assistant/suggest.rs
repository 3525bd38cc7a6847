//! Last-resort suggestions. When every dispatch stage came back empty, probe
//! a few cheap lookups related to the original intent's domain and offer
//! whatever turned up as an advisory. Probe failures are absorbed; this
//! stage always moves the conversation forward.

use tracing::debug;

use crate::models::{AppointmentFilter, DoctorFilter, OrderFilter, StockFilter};
use crate::stores::Collaborators;

use super::catalog::IntentKind;
use super::types::Identity;

/// Help sentence for prompts nothing in the catalog recognizes.
pub const GENERIC_HELP: &str = "I can help you find doctors, check pharmacy stock, or look up \
     your orders, appointments, payments and diagnoses. Try asking about one of those.";

pub struct SuggestionGenerator<'a> {
    collaborators: &'a Collaborators,
}

impl<'a> SuggestionGenerator<'a> {
    pub fn new(collaborators: &'a Collaborators) -> Self {
        Self { collaborators }
    }

    /// Probe the domains named by the intent and fold any non-empty findings
    /// into one advisory sentence. `None` means nothing relevant turned up.
    pub async fn advise(&self, identity: Option<&Identity>, kind: IntentKind) -> Option<String> {
        let intent_name = kind.as_str();
        let mut findings: Vec<String> = Vec::new();

        if intent_name.contains("doctor") {
            let filter = DoctorFilter {
                available_today: Some(true),
                ..Default::default()
            };
            match self.collaborators.doctors.lookup_doctors(&filter).await {
                Ok(doctors) if !doctors.is_empty() => {
                    findings.push(format!("{} doctor(s) are available today", doctors.len()));
                }
                Ok(_) => {}
                Err(err) => debug!(probe = "doctors", error = %err, "suggestion probe failed"),
            }
        }

        if intent_name.contains("stock") {
            match self
                .collaborators
                .stock
                .lookup_stock(&StockFilter::default())
                .await
            {
                Ok(medications) if !medications.is_empty() => {
                    findings.push(format!(
                        "the pharmacy lists {} medicine(s) in stock",
                        medications.len()
                    ));
                }
                Ok(_) => {}
                Err(err) => debug!(probe = "stock", error = %err, "suggestion probe failed"),
            }
        }

        if let Some(identity) = identity {
            if intent_name.contains("appointment") {
                let filter = AppointmentFilter {
                    upcoming_only: true,
                    ..Default::default()
                };
                match self
                    .collaborators
                    .appointments
                    .lookup_appointments(identity.user_id, &filter)
                    .await
                {
                    Ok(appointments) if !appointments.is_empty() => {
                        findings.push(format!(
                            "you have {} upcoming appointment(s)",
                            appointments.len()
                        ));
                    }
                    Ok(_) => {}
                    Err(err) => {
                        debug!(probe = "appointments", error = %err, "suggestion probe failed")
                    }
                }
            }

            if intent_name.contains("order") {
                match self
                    .collaborators
                    .orders
                    .lookup_orders(identity.user_id, &OrderFilter::default())
                    .await
                {
                    Ok(orders) if !orders.is_empty() => {
                        findings.push(format!("you have {} order(s) on record", orders.len()));
                    }
                    Ok(_) => {}
                    Err(err) => debug!(probe = "orders", error = %err, "suggestion probe failed"),
                }
            }
        }

        if findings.is_empty() {
            None
        } else {
            Some(format!(
                "You might find this helpful: {}.",
                findings.join("; ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use crate::models::*;
    use crate::stores::memory::*;

    use super::*;

    fn collaborators_with_doctors_and_stock() -> Collaborators {
        Collaborators {
            doctors: Arc::new(InMemoryDoctorDirectory {
                doctors: vec![Doctor {
                    id: Uuid::new_v4(),
                    name: "Dr. Anita Smith".into(),
                    specialization: "cardiology".into(),
                    institution: None,
                    available_today: true,
                }],
            }),
            orders: Arc::new(InMemoryOrderStore::default()),
            appointments: Arc::new(InMemoryAppointmentStore::default()),
            payments: Arc::new(InMemoryPaymentStore::default()),
            diagnoses: Arc::new(InMemoryDiagnosisStore::default()),
            stock: Arc::new(InMemoryStockCatalog {
                medications: vec![Medication {
                    id: Uuid::new_v4(),
                    name: "Paracetamol".into(),
                    category: "painkiller".into(),
                    kind: "tablet".into(),
                    manufacturer: "Acme Pharma".into(),
                    units_in_stock: 120,
                }],
            }),
        }
    }

    #[tokio::test]
    async fn doctor_intent_probes_the_directory() {
        let collaborators = collaborators_with_doctors_and_stock();
        let generator = SuggestionGenerator::new(&collaborators);

        let advisory = generator
            .advise(None, IntentKind::DoctorBySpecialization)
            .await
            .expect("directory has an available doctor");
        assert!(advisory.contains("1 doctor(s) are available today"));
    }

    #[tokio::test]
    async fn stock_intent_probes_the_catalog() {
        let collaborators = collaborators_with_doctors_and_stock();
        let generator = SuggestionGenerator::new(&collaborators);

        let advisory = generator
            .advise(None, IntentKind::StockByName)
            .await
            .expect("catalog has stock");
        assert!(advisory.contains("1 medicine(s) in stock"));
    }

    #[tokio::test]
    async fn identity_scoped_probes_are_skipped_without_identity() {
        let collaborators = collaborators_with_doctors_and_stock();
        let generator = SuggestionGenerator::new(&collaborators);

        let advisory = generator.advise(None, IntentKind::OrdersAll).await;
        assert_eq!(advisory, None);
    }

    #[tokio::test]
    async fn unknown_intent_probes_nothing() {
        let collaborators = collaborators_with_doctors_and_stock();
        let generator = SuggestionGenerator::new(&collaborators);

        let advisory = generator.advise(None, IntentKind::Unknown).await;
        assert_eq!(advisory, None);
    }

    #[tokio::test]
    async fn empty_collaborators_yield_no_advisory() {
        let collaborators = Collaborators {
            doctors: Arc::new(InMemoryDoctorDirectory::default()),
            orders: Arc::new(InMemoryOrderStore::default()),
            appointments: Arc::new(InMemoryAppointmentStore::default()),
            payments: Arc::new(InMemoryPaymentStore::default()),
            diagnoses: Arc::new(InMemoryDiagnosisStore::default()),
            stock: Arc::new(InMemoryStockCatalog::default()),
        };
        let generator = SuggestionGenerator::new(&collaborators);

        let advisory = generator.advise(None, IntentKind::DoctorAll).await;
        assert_eq!(advisory, None);
    }
}
