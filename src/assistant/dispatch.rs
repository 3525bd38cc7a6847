//! Intent-to-collaborator dispatch. One detected intent maps to exactly one
//! lookup (or a small fixed pipeline of lookups); the mapping is total over
//! every kind except `Unknown`. Dispatch never propagates an error: identity
//! checks run before any collaborator, and collaborator failures degrade to
//! an apology response so the fallback and suggestion stages can continue.

use tracing::warn;

use crate::config::APP_NAME;
use crate::models::{
    AppointmentFilter, ConsultationType, DoctorFilter, OrderFilter, PaymentFilter, StockFilter,
};
use crate::stores::{Collaborators, StoreError};

use super::catalog::IntentKind;
use super::render::{
    describe_appointment, describe_doctor, describe_medication, describe_order, describe_payment,
    found_summary, none_summary,
};
use super::types::{DetectedQuery, DiagnosisDetail, Identity, QueryData, QueryResponse};

pub const LOGIN_PROMPT: &str =
    "Please log in to view your personal records on MediConnect.";
pub const NEED_MORE_INFO: &str =
    "I need a bit more information to help with that. Could you rephrase your question?";
pub const LOOKUP_APOLOGY: &str =
    "Sorry, I couldn't look that up right now. Please try again in a moment.";

pub struct QueryDispatcher {
    collaborators: Collaborators,
}

impl QueryDispatcher {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    /// Run one intent against its collaborator. Infallible by contract: the
    /// result is always a well-formed response, never an error.
    pub async fn dispatch(
        &self,
        identity: Option<&Identity>,
        detected: &DetectedQuery,
    ) -> QueryResponse {
        // Hard authorization short-circuit, evaluated before any lookup.
        if detected.kind.is_identity_scoped() && identity.is_none() {
            return QueryResponse {
                summary: LOGIN_PROMPT.into(),
                data: QueryData::None,
            };
        }

        match self.run(identity, detected).await {
            Ok(response) => response,
            Err(err) => {
                warn!(intent = detected.kind.as_str(), error = %err, "collaborator lookup failed");
                QueryResponse {
                    summary: LOOKUP_APOLOGY.into(),
                    data: QueryData::None,
                }
            }
        }
    }

    async fn run(
        &self,
        identity: Option<&Identity>,
        detected: &DetectedQuery,
    ) -> Result<QueryResponse, StoreError> {
        let args = &detected.args;
        // Identity-scoped kinds were gated in `dispatch`; the unwrap_or
        // value is never read for them.
        let user_id = identity.map(|i| i.user_id);

        let response = match detected.kind {
            // ── Doctors ──
            IntentKind::DoctorAvailableToday => {
                let filter = DoctorFilter {
                    available_today: Some(true),
                    ..Default::default()
                };
                let doctors = self.collaborators.doctors.lookup_doctors(&filter).await?;
                if doctors.is_empty() {
                    empty("doctors available today")
                } else {
                    let details: Vec<String> = doctors.iter().map(describe_doctor).collect();
                    QueryResponse {
                        summary: found_summary("doctor", " available today", &details),
                        data: QueryData::Doctors(doctors),
                    }
                }
            }
            IntentKind::DoctorByName => {
                let filter = DoctorFilter {
                    name: args.name.clone(),
                    ..Default::default()
                };
                let doctors = self.collaborators.doctors.lookup_doctors(&filter).await?;
                if doctors.is_empty() {
                    match &args.name {
                        Some(name) => empty(&format!("doctors named {name}")),
                        None => empty("doctors"),
                    }
                } else {
                    let context = match &args.name {
                        Some(name) => format!(" matching \"{name}\""),
                        None => String::new(),
                    };
                    let details: Vec<String> = doctors.iter().map(describe_doctor).collect();
                    QueryResponse {
                        summary: found_summary("doctor", &context, &details),
                        data: QueryData::Doctors(doctors),
                    }
                }
            }
            IntentKind::DoctorBySpecialization => {
                let filter = DoctorFilter {
                    specialization: args.specialization.clone(),
                    ..Default::default()
                };
                let doctors = self.collaborators.doctors.lookup_doctors(&filter).await?;
                let criterion = match &args.specialization {
                    Some(spec) => format!("{spec} specialists"),
                    None => "specialists".to_string(),
                };
                if doctors.is_empty() {
                    empty(&criterion)
                } else {
                    let context = match &args.specialization {
                        Some(spec) => format!(" specializing in {spec}"),
                        None => String::new(),
                    };
                    let details: Vec<String> = doctors.iter().map(describe_doctor).collect();
                    QueryResponse {
                        summary: found_summary("doctor", &context, &details),
                        data: QueryData::Doctors(doctors),
                    }
                }
            }
            IntentKind::DoctorAll => {
                let doctors = self
                    .collaborators
                    .doctors
                    .lookup_doctors(&DoctorFilter::default())
                    .await?;
                if doctors.is_empty() {
                    empty("doctors")
                } else {
                    let details: Vec<String> = doctors.iter().map(describe_doctor).collect();
                    QueryResponse {
                        summary: found_summary(
                            "doctor",
                            &format!(" available on {APP_NAME}"),
                            &details,
                        ),
                        data: QueryData::Doctors(doctors),
                    }
                }
            }

            // ── Orders ──
            IntentKind::OrdersPaymentStatus => {
                let status = args.payment_status.unwrap_or_default();
                let filter = OrderFilter {
                    payment_status: Some(status),
                    ..Default::default()
                };
                let orders = self
                    .collaborators
                    .orders
                    .lookup_orders(user_id.unwrap_or_default(), &filter)
                    .await?;
                order_response(orders, &format!("payment {}", status.as_str()))
            }
            IntentKind::OrdersDeliveryStatus => {
                let status = args.delivery_status.unwrap_or_default();
                let filter = OrderFilter {
                    delivery_status: Some(status),
                    ..Default::default()
                };
                let orders = self
                    .collaborators
                    .orders
                    .lookup_orders(user_id.unwrap_or_default(), &filter)
                    .await?;
                order_response(orders, &format!("delivery {}", status.as_str()))
            }
            IntentKind::OrdersAll => {
                let orders = self
                    .collaborators
                    .orders
                    .lookup_orders(user_id.unwrap_or_default(), &OrderFilter::default())
                    .await?;
                if orders.is_empty() {
                    empty("orders")
                } else {
                    let details: Vec<String> = orders.iter().map(describe_order).collect();
                    QueryResponse {
                        summary: found_summary("order", "", &details),
                        data: QueryData::Orders(orders),
                    }
                }
            }

            // ── Appointments ──
            IntentKind::AppointmentsConsultationType => {
                let kind = args.consultation_type.unwrap_or_default();
                let filter = AppointmentFilter {
                    consultation_type: Some(kind),
                    ..Default::default()
                };
                let appointments = self
                    .collaborators
                    .appointments
                    .lookup_appointments(user_id.unwrap_or_default(), &filter)
                    .await?;
                let wording = match kind {
                    ConsultationType::Virtual => "virtual",
                    ConsultationType::InPerson => "in-person",
                };
                appointment_response(appointments, &format!("{wording} appointments"))
            }
            IntentKind::AppointmentsStatus => {
                let status = args.appointment_status.unwrap_or_default();
                let filter = AppointmentFilter {
                    status: Some(status),
                    ..Default::default()
                };
                let appointments = self
                    .collaborators
                    .appointments
                    .lookup_appointments(user_id.unwrap_or_default(), &filter)
                    .await?;
                appointment_response(appointments, &format!("{} appointments", status.as_str()))
            }
            IntentKind::AppointmentsUpcoming => {
                let filter = AppointmentFilter {
                    upcoming_only: true,
                    ..Default::default()
                };
                let appointments = self
                    .collaborators
                    .appointments
                    .lookup_appointments(user_id.unwrap_or_default(), &filter)
                    .await?;
                appointment_response(appointments, "upcoming appointments")
            }
            IntentKind::AppointmentsAll => {
                let appointments = self
                    .collaborators
                    .appointments
                    .lookup_appointments(user_id.unwrap_or_default(), &AppointmentFilter::default())
                    .await?;
                appointment_response(appointments, "appointments")
            }

            // ── Payments ──
            IntentKind::PaymentsByStatus => {
                let status = args.payment_status.unwrap_or_default();
                let filter = PaymentFilter {
                    status: Some(status),
                };
                let payments = self
                    .collaborators
                    .payments
                    .lookup_payments(user_id.unwrap_or_default(), &filter)
                    .await?;
                if payments.is_empty() {
                    empty(&format!("{} payments", status.as_str()))
                } else {
                    let details: Vec<String> = payments.iter().map(describe_payment).collect();
                    QueryResponse {
                        summary: found_summary(
                            "payment",
                            &format!(" with status {}", status.as_str()),
                            &details,
                        ),
                        data: QueryData::Payments(payments),
                    }
                }
            }
            IntentKind::PaymentsAll => {
                let payments = self
                    .collaborators
                    .payments
                    .lookup_payments(user_id.unwrap_or_default(), &PaymentFilter::default())
                    .await?;
                if payments.is_empty() {
                    empty("payments")
                } else {
                    let details: Vec<String> = payments.iter().map(describe_payment).collect();
                    QueryResponse {
                        summary: found_summary("payment", "", &details),
                        data: QueryData::Payments(payments),
                    }
                }
            }

            // ── Diagnoses ──
            IntentKind::DiagnosesLatest => {
                // Fixed two-call pipeline: the latest diagnosis, then its
                // prescriptions.
                let diagnoses = self
                    .collaborators
                    .diagnoses
                    .lookup_diagnoses(user_id.unwrap_or_default(), true)
                    .await?;
                match diagnoses.into_iter().next() {
                    None => empty("diagnoses"),
                    Some(diagnosis) => {
                        let prescriptions = self
                            .collaborators
                            .diagnoses
                            .prescriptions_for(diagnosis.id)
                            .await?;
                        let summary = if prescriptions.is_empty() {
                            format!(
                                "Your latest diagnosis is {} (recorded on {}), with no prescriptions on file.",
                                diagnosis.condition, diagnosis.diagnosed_on
                            )
                        } else {
                            let meds: Vec<String> = prescriptions
                                .iter()
                                .map(|p| format!("{} {} ({})", p.medication, p.dosage, p.frequency))
                                .collect();
                            format!(
                                "Your latest diagnosis is {} (recorded on {}), prescribed: {}.",
                                diagnosis.condition,
                                diagnosis.diagnosed_on,
                                meds.join("; ")
                            )
                        };
                        QueryResponse {
                            summary,
                            data: QueryData::Diagnosis(DiagnosisDetail {
                                diagnosis,
                                prescriptions,
                            }),
                        }
                    }
                }
            }

            // ── Pharmacy stock ──
            IntentKind::StockByName => {
                // An empty extraction degrades to an unfiltered listing
                // rather than a guaranteed-empty name filter.
                let filter = StockFilter {
                    name: args.medication.clone(),
                    ..Default::default()
                };
                let medications = self.collaborators.stock.lookup_stock(&filter).await?;
                if medications.is_empty() {
                    match &args.medication {
                        Some(name) => empty(&format!("stock for {name}")),
                        None => empty("medicines in stock"),
                    }
                } else {
                    let context = match &args.medication {
                        Some(name) => format!(" matching \"{name}\""),
                        None => String::new(),
                    };
                    let details: Vec<String> =
                        medications.iter().map(describe_medication).collect();
                    QueryResponse {
                        summary: found_summary("medicine", &context, &details),
                        data: QueryData::Medications(medications),
                    }
                }
            }
            IntentKind::StockByCategory => {
                let filter = StockFilter {
                    category: args.category.clone(),
                    ..Default::default()
                };
                let medications = self.collaborators.stock.lookup_stock(&filter).await?;
                let criterion = match &args.category {
                    Some(category) => format!("{category} medicines in stock"),
                    None => "medicines in stock".to_string(),
                };
                if medications.is_empty() {
                    empty(&criterion)
                } else {
                    let context = match &args.category {
                        Some(category) => format!(" in the {category} category"),
                        None => String::new(),
                    };
                    let details: Vec<String> =
                        medications.iter().map(describe_medication).collect();
                    QueryResponse {
                        summary: found_summary("medicine", &context, &details),
                        data: QueryData::Medications(medications),
                    }
                }
            }
            IntentKind::StockAll => {
                let medications = self
                    .collaborators
                    .stock
                    .lookup_stock(&StockFilter::default())
                    .await?;
                if medications.is_empty() {
                    empty("medicines in stock")
                } else {
                    let details: Vec<String> =
                        medications.iter().map(describe_medication).collect();
                    QueryResponse {
                        summary: found_summary("medicine", " in stock", &details),
                        data: QueryData::Medications(medications),
                    }
                }
            }

            IntentKind::Unknown => QueryResponse {
                summary: NEED_MORE_INFO.into(),
                data: QueryData::None,
            },
        };
        Ok(response)
    }
}

fn empty(criterion: &str) -> QueryResponse {
    QueryResponse {
        summary: none_summary(criterion),
        data: QueryData::None,
    }
}

fn order_response(orders: Vec<crate::models::Order>, criterion: &str) -> QueryResponse {
    if orders.is_empty() {
        empty(&format!("orders with {criterion}"))
    } else {
        let details: Vec<String> = orders.iter().map(describe_order).collect();
        QueryResponse {
            summary: found_summary("order", &format!(" with {criterion}"), &details),
            data: QueryData::Orders(orders),
        }
    }
}

fn appointment_response(
    appointments: Vec<crate::models::Appointment>,
    criterion: &str,
) -> QueryResponse {
    if appointments.is_empty() {
        empty(criterion)
    } else {
        let details: Vec<String> = appointments.iter().map(describe_appointment).collect();
        QueryResponse {
            summary: found_summary("appointment", "", &details),
            data: QueryData::Appointments(appointments),
        }
    }
}
