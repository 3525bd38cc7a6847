use uuid::Uuid;

use super::enums::{AppointmentStatus, ConsultationType, DeliveryStatus, PaymentStatus};

#[derive(Debug, Clone, Default)]
pub struct DoctorFilter {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub available_today: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub payment_status: Option<PaymentStatus>,
    pub delivery_status: Option<DeliveryStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub consultation_type: Option<ConsultationType>,
    pub upcoming_only: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct StockFilter {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub kind: Option<String>,
    pub manufacturer: Option<String>,
}
