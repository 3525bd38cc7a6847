pub mod enums;
pub mod filters;

pub use enums::*;
pub use filters::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub institution: Option<String>,
    pub available_today: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_summary: String,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
    pub placed_on: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub doctor_id: Uuid,
    pub doctor_name: String,
    pub date: NaiveDate,
    pub status: AppointmentStatus,
    pub consultation_type: ConsultationType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub status: PaymentStatus,
    pub paid_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    pub id: Uuid,
    pub user_id: Uuid,
    pub condition: String,
    pub diagnosed_on: NaiveDate,
    pub doctor_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub diagnosis_id: Uuid,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
}

/// A pharmacy stock entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub kind: String,
    pub manufacturer: String,
    pub units_in_stock: u32,
}
