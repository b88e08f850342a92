// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shearbook_domain::{AppointmentId, ClientId, Service, StaffId, TimeOfDay};
use time::Date;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request appointment changes. Services are
/// carried resolved so the transition can derive the end time without
/// further lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Book a new appointment.
    BookAppointment {
        /// The client being served.
        client_id: ClientId,
        /// The staff member performing the service.
        staff_id: StaffId,
        /// The service, as currently defined.
        service: Service,
        /// The calendar date.
        date: Date,
        /// The requested start time.
        start_time: TimeOfDay,
    },
    /// Replace an appointment's details, possibly moving it.
    ///
    /// All fields carry the final values after the caller has merged
    /// its partial patch with the stored record.
    RescheduleAppointment {
        /// The appointment being changed.
        appointment_id: AppointmentId,
        /// The client after the change.
        client_id: ClientId,
        /// The staff member after the change.
        staff_id: StaffId,
        /// The service after the change.
        service: Service,
        /// The date after the change.
        date: Date,
        /// The start time after the change.
        start_time: TimeOfDay,
    },
    /// Remove an appointment.
    CancelAppointment {
        /// The appointment being cancelled.
        appointment_id: AppointmentId,
    },
}

impl Command {
    /// Returns the command name used for audit actions.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BookAppointment { .. } => "BookAppointment",
            Self::RescheduleAppointment { .. } => "RescheduleAppointment",
            Self::CancelAppointment { .. } => "CancelAppointment",
        }
    }
}
