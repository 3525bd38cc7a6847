//! Summary rendering. Two shared rules hold for every entity type: an empty
//! result yields a "No X found" sentence echoing the search criterion, and a
//! non-empty result yields "Found N <noun>(s)…" spelling out the first few
//! entries before truncating to "and K more".

use crate::config::{APP_NAME, MAX_DETAILED};
use crate::models::{Appointment, Doctor, Medication, Order, Payment};

pub fn found_summary(noun: &str, context: &str, details: &[String]) -> String {
    let shown: Vec<&str> = details
        .iter()
        .take(MAX_DETAILED)
        .map(String::as_str)
        .collect();
    let mut summary = format!(
        "Found {} {}(s){}: {}",
        details.len(),
        noun,
        context,
        shown.join("; ")
    );
    if details.len() > MAX_DETAILED {
        summary.push_str(&format!(" and {} more", details.len() - MAX_DETAILED));
    }
    summary.push('.');
    summary
}

pub fn none_summary(what: &str) -> String {
    format!("No {what} found on {APP_NAME}.")
}

pub fn describe_doctor(doctor: &Doctor) -> String {
    let availability = if doctor.available_today {
        "available today"
    } else {
        "not available today"
    };
    match &doctor.institution {
        Some(institution) => format!(
            "{} ({}, {availability}, {institution})",
            doctor.name, doctor.specialization
        ),
        None => format!("{} ({}, {availability})", doctor.name, doctor.specialization),
    }
}

pub fn describe_order(order: &Order) -> String {
    format!(
        "{} placed on {} (payment {}, delivery {})",
        order.item_summary,
        order.placed_on,
        order.payment_status.as_str(),
        order.delivery_status.as_str()
    )
}

pub fn describe_appointment(appointment: &Appointment) -> String {
    format!(
        "{} with {} ({}, {})",
        appointment.date,
        appointment.doctor_name,
        appointment.consultation_type.as_str(),
        appointment.status.as_str()
    )
}

pub fn describe_payment(payment: &Payment) -> String {
    match payment.paid_on {
        Some(paid_on) => format!(
            "{:.2} ({}, paid on {paid_on})",
            payment.amount,
            payment.status.as_str()
        ),
        None => format!("{:.2} ({})", payment.amount, payment.status.as_str()),
    }
}

pub fn describe_medication(medication: &Medication) -> String {
    format!(
        "{} ({}, {}) — {} units in stock",
        medication.name, medication.category, medication.kind, medication.units_in_stock
    )
}
