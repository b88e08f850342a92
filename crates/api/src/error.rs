// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use shearbook::CoreError;
use shearbook_domain::DomainError;
use shearbook_persistence::PersistenceError;

use crate::input::ParseIdError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The requested interval overlaps an existing appointment.
    ///
    /// The caller should fetch availability again and pick another time.
    SlotConflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::SlotConflict { message } => write!(f, "Slot conflict: {message}"),
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTimeFormat(_) | DomainError::TimeOutOfRange { .. } => {
            ApiError::InvalidInput {
                field: String::from("time"),
                message: err.to_string(),
            }
        }
        DomainError::InvalidServiceDuration { .. } => ApiError::InvalidInput {
            field: String::from("duration_minutes"),
            message: err.to_string(),
        },
        DomainError::InvalidStaffHours { reason } => ApiError::InvalidInput {
            field: String::from("working_hours"),
            message: reason,
        },
        DomainError::InvalidOperatingDay { weekday, reason } => ApiError::InvalidInput {
            field: String::from("operating_hours"),
            message: format!("{weekday}: {reason}"),
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message: err.to_string(),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::ServiceNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Service"),
            message: format!("Service {id} does not exist"),
        },
        DomainError::StaffNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Staff member"),
            message: format!("Staff member {id} does not exist"),
        },
        DomainError::ClientNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Client"),
            message: format!("Client {id} does not exist"),
        },
        DomainError::AppointmentNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Appointment"),
            message: format!("Appointment {id} does not exist"),
        },
        DomainError::ServiceInactive(id) => ApiError::DomainRuleViolation {
            rule: String::from("active_service"),
            message: format!("Service {id} is no longer offered"),
        },
        DomainError::StaffInactive(id) => ApiError::DomainRuleViolation {
            rule: String::from("active_staff"),
            message: format!("Staff member {id} is inactive"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::SlotConflict { .. } => ApiError::SlotConflict {
            message: err.to_string(),
        },
        CoreError::ScheduleMismatch { .. } | CoreError::UnsupportedCommand(_) => {
            ApiError::Internal {
                message: err.to_string(),
            }
        }
    }
}

/// Translates a persistence error into an API error.
///
/// A missing row surfaces as not-found; anything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: format!("Audit event {id} does not exist"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

impl From<ParseIdError> for ApiError {
    fn from(err: ParseIdError) -> Self {
        Self::InvalidInput {
            field: String::from(err.field()),
            message: err.to_string(),
        }
    }
}
