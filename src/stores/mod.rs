//! Collaborator contracts for the surrounding CRUD services.
//!
//! The assistant core never talks to a database or the network itself; every
//! domain lookup goes through one of these traits. The request layer binds
//! them to its real services, tests bind them to the [`memory`]
//! implementations. Because the bundle is just `Arc` handles, the same
//! engine can be instantiated twice with different bindings (e.g. a
//! server-side store and a cached client-side mirror) without duplicating
//! any routing logic.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::*;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("Collaborator timed out: {0}")]
    Timeout(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn lookup_doctors(&self, filter: &DoctorFilter) -> Result<Vec<Doctor>, StoreError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn lookup_orders(
        &self,
        user_id: Uuid,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, StoreError>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn lookup_appointments(
        &self,
        user_id: Uuid,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, StoreError>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn lookup_payments(
        &self,
        user_id: Uuid,
        filter: &PaymentFilter,
    ) -> Result<Vec<Payment>, StoreError>;
}

#[async_trait]
pub trait DiagnosisStore: Send + Sync {
    async fn lookup_diagnoses(
        &self,
        user_id: Uuid,
        latest_only: bool,
    ) -> Result<Vec<Diagnosis>, StoreError>;

    async fn prescriptions_for(
        &self,
        diagnosis_id: Uuid,
    ) -> Result<Vec<Prescription>, StoreError>;
}

#[async_trait]
pub trait StockCatalog: Send + Sync {
    async fn lookup_stock(&self, filter: &StockFilter) -> Result<Vec<Medication>, StoreError>;
}

/// Everything the assistant needs to answer a prompt, bundled so one engine
/// definition serves any number of collaborator bindings.
#[derive(Clone)]
pub struct Collaborators {
    pub doctors: Arc<dyn DoctorDirectory>,
    pub orders: Arc<dyn OrderStore>,
    pub appointments: Arc<dyn AppointmentStore>,
    pub payments: Arc<dyn PaymentStore>,
    pub diagnoses: Arc<dyn DiagnosisStore>,
    pub stock: Arc<dyn StockCatalog>,
}
