// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::OperatingHours;
use crate::error::DomainError;
use crate::types::{Client, Service, StaffProfile};

/// Validates a staff member's working-hours profile.
///
/// # Arguments
///
/// * `staff` - The profile to validate
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The working day does not start before it ends
/// - The lunch break ends before it starts
/// - A non-empty lunch break lies outside the working day
pub fn validate_staff_profile(staff: &StaffProfile) -> Result<(), DomainError> {
    // Rule: name must not be empty
    if staff.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Staff name cannot be empty",
        )));
    }

    // Rule: working day must be a non-empty interval
    if staff.work_start >= staff.work_end {
        return Err(DomainError::InvalidStaffHours {
            reason: format!(
                "work start {} must be before work end {}",
                staff.work_start, staff.work_end
            ),
        });
    }

    // Rule: lunch must not be inverted
    if staff.lunch_start > staff.lunch_end {
        return Err(DomainError::InvalidStaffHours {
            reason: format!(
                "lunch start {} must not be after lunch end {}",
                staff.lunch_start, staff.lunch_end
            ),
        });
    }

    // Rule: a real lunch break sits inside the working day.
    // A zero-length lunch means "no lunch" and may carry any time.
    let has_lunch: bool = staff.lunch_start < staff.lunch_end;
    if has_lunch && (staff.lunch_start < staff.work_start || staff.lunch_end > staff.work_end) {
        return Err(DomainError::InvalidStaffHours {
            reason: format!(
                "lunch {}-{} must fall within working hours {}-{}",
                staff.lunch_start, staff.lunch_end, staff.work_start, staff.work_end
            ),
        });
    }

    Ok(())
}

/// Validates a service definition.
///
/// The duration is already guaranteed positive by `ServiceDuration`.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty.
pub fn validate_service(service: &Service) -> Result<(), DomainError> {
    if service.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Service name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates the shop's weekly hours.
///
/// # Errors
///
/// Returns `DomainError::InvalidOperatingDay` for the first open weekday
/// whose opening time is not before its closing time.
pub fn validate_operating_hours(hours: &OperatingHours) -> Result<(), DomainError> {
    for (weekday, day) in hours.iter() {
        if day.is_open && day.open_time >= day.close_time {
            return Err(DomainError::InvalidOperatingDay {
                weekday,
                reason: format!(
                    "open time {} must be before close time {}",
                    day.open_time, day.close_time
                ),
            });
        }
    }
    Ok(())
}

/// Validates a client record.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty.
pub fn validate_client(client: &Client) -> Result<(), DomainError> {
    if client.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Client name cannot be empty",
        )));
    }
    Ok(())
}
