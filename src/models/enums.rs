use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid enum value for {field}: {value}")]
pub struct InvalidEnumValue {
    pub field: &'static str,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnumValue {
                        field: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(PaymentStatus {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
    Refunded => "refunded",
});

str_enum!(DeliveryStatus {
    Pending => "pending",
    Shipped => "shipped",
    Delivered => "delivered",
    Cancelled => "cancelled",
});

str_enum!(ConsultationType {
    Virtual => "virtual",
    InPerson => "in_person",
});

str_enum!(AppointmentStatus {
    Scheduled => "scheduled",
    Confirmed => "confirmed",
    Completed => "completed",
    Cancelled => "cancelled",
});

str_enum!(UserRole {
    Patient => "patient",
    Doctor => "doctor",
    Admin => "admin",
});

// The argument extractors always hand dispatch a concrete status value even
// when the prompt names none; these defaults are the documented best-guess
// members ("unpaid orders" and "my payments" both filter on pending).

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl Default for DeliveryStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl Default for ConsultationType {
    fn default() -> Self {
        Self::InPerson
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}
