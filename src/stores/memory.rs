//! In-memory collaborators for testing — plain `Vec` scans with the same
//! filter semantics the production services implement in SQL.

use async_trait::async_trait;
use uuid::Uuid;

use super::{
    AppointmentStore, DiagnosisStore, DoctorDirectory, OrderStore, PaymentStore, StockCatalog,
    StoreError,
};
use crate::models::*;

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Default)]
pub struct InMemoryDoctorDirectory {
    pub doctors: Vec<Doctor>,
}

#[async_trait]
impl DoctorDirectory for InMemoryDoctorDirectory {
    async fn lookup_doctors(&self, filter: &DoctorFilter) -> Result<Vec<Doctor>, StoreError> {
        Ok(self
            .doctors
            .iter()
            .filter(|d| {
                filter
                    .name
                    .as_ref()
                    .map_or(true, |n| contains_ci(&d.name, n))
            })
            .filter(|d| {
                filter
                    .specialization
                    .as_ref()
                    .map_or(true, |s| contains_ci(&d.specialization, s))
            })
            .filter(|d| filter.available_today.map_or(true, |a| d.available_today == a))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryOrderStore {
    pub orders: Vec<Order>,
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn lookup_orders(
        &self,
        user_id: Uuid,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .filter(|o| filter.payment_status.map_or(true, |s| o.payment_status == s))
            .filter(|o| filter.delivery_status.map_or(true, |s| o.delivery_status == s))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryAppointmentStore {
    pub appointments: Vec<Appointment>,
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn lookup_appointments(
        &self,
        user_id: Uuid,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, StoreError> {
        let today = chrono::Local::now().date_naive();
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter(|a| filter.status.map_or(true, |s| a.status == s))
            .filter(|a| {
                filter
                    .consultation_type
                    .map_or(true, |c| a.consultation_type == c)
            })
            .filter(|a| !filter.upcoming_only || a.date >= today)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryPaymentStore {
    pub payments: Vec<Payment>,
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn lookup_payments(
        &self,
        user_id: Uuid,
        filter: &PaymentFilter,
    ) -> Result<Vec<Payment>, StoreError> {
        Ok(self
            .payments
            .iter()
            .filter(|p| p.user_id == user_id)
            .filter(|p| filter.status.map_or(true, |s| p.status == s))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryDiagnosisStore {
    pub diagnoses: Vec<Diagnosis>,
    pub prescriptions: Vec<Prescription>,
}

#[async_trait]
impl DiagnosisStore for InMemoryDiagnosisStore {
    async fn lookup_diagnoses(
        &self,
        user_id: Uuid,
        latest_only: bool,
    ) -> Result<Vec<Diagnosis>, StoreError> {
        let mut matches: Vec<Diagnosis> = self
            .diagnoses
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.diagnosed_on.cmp(&a.diagnosed_on));
        if latest_only {
            matches.truncate(1);
        }
        Ok(matches)
    }

    async fn prescriptions_for(
        &self,
        diagnosis_id: Uuid,
    ) -> Result<Vec<Prescription>, StoreError> {
        Ok(self
            .prescriptions
            .iter()
            .filter(|p| p.diagnosis_id == diagnosis_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryStockCatalog {
    pub medications: Vec<Medication>,
}

#[async_trait]
impl StockCatalog for InMemoryStockCatalog {
    async fn lookup_stock(&self, filter: &StockFilter) -> Result<Vec<Medication>, StoreError> {
        Ok(self
            .medications
            .iter()
            .filter(|m| filter.id.map_or(true, |id| m.id == id))
            .filter(|m| filter.name.as_ref().map_or(true, |n| contains_ci(&m.name, n)))
            .filter(|m| {
                filter
                    .category
                    .as_ref()
                    .map_or(true, |c| contains_ci(&m.category, c))
            })
            .filter(|m| filter.kind.as_ref().map_or(true, |k| contains_ci(&m.kind, k)))
            .filter(|m| {
                filter
                    .manufacturer
                    .as_ref()
                    .map_or(true, |mf| contains_ci(&m.manufacturer, mf))
            })
            .cloned()
            .collect())
    }
}
