use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string did not name any variant of the target enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid enum value for {field}: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string literal doubles as the serde name of the variant.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "Male",
    Female => "Female",
    Other => "Other",
});

str_enum!(BloodGroup {
    APositive => "A+",
    ANegative => "A-",
    BPositive => "B+",
    BNegative => "B-",
    AbPositive => "AB+",
    AbNegative => "AB-",
    OPositive => "O+",
    ONegative => "O-",
});

str_enum!(PatientStatus {
    Active => "Active",
    Discharged => "Discharged",
});

str_enum!(AppointmentStatus {
    Scheduled => "Scheduled",
    Completed => "Completed",
    Cancelled => "Cancelled",
});

impl AppointmentStatus {
    /// Completed and Cancelled have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Scheduled)
    }

    /// Whether moving from `self` to `next` is a legal lifecycle step.
    ///
    /// The store never calls this; callers check before issuing an update.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::Completed) | (Self::Scheduled, Self::Cancelled)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn blood_group_uses_clinical_notation() {
        assert_eq!(BloodGroup::AbNegative.as_str(), "AB-");
        assert_eq!(BloodGroup::from_str("O+").unwrap(), BloodGroup::OPositive);
        let json = serde_json::to_string(&BloodGroup::BPositive).unwrap();
        assert_eq!(json, "\"B+\"");
    }

    #[test]
    fn unknown_value_is_rejected() {
        let err = Gender::from_str("male").unwrap_err();
        assert_eq!(err.field, "Gender");
        assert_eq!(err.value, "male");
    }

    #[test]
    fn appointment_status_deserializes_from_label() {
        let status: AppointmentStatus = serde_json::from_str("\"Cancelled\"").unwrap();
        assert_eq!(status, AppointmentStatus::Cancelled);
    }

    #[test]
    fn only_scheduled_can_move() {
        use AppointmentStatus::*;
        assert!(Scheduled.can_transition_to(Completed));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(!Scheduled.can_transition_to(Scheduled));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Scheduled));
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!Scheduled.is_terminal());
    }
}
