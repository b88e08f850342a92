// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment availability calculation.
//!
//! This module computes bookable start times for a staff member on a date.
//! It is a pure function of its inputs; callers supply a consistent
//! snapshot of the calendar and the day's appointments.
//!
//! ## Invariants
//!
//! - Candidate starts are spaced every [`SLOT_INTERVAL_MINUTES`] from the
//!   start of the effective window
//! - A slot may end exactly at the window end, never after it
//! - A slot touching lunch or an appointment at an endpoint is bookable
//! - [`find_conflict`] is the same predicate the booking gate uses, so every
//!   offered slot can be booked against the same snapshot

use crate::calendar::{OperatingCalendar, StaffWindow};
use crate::time_of_day::{ServiceDuration, TimeOfDay, overlaps};
use crate::types::{Appointment, AppointmentId, StaffId, StaffProfile};
use time::Date;

/// Spacing between candidate start times, in minutes.
pub const SLOT_INTERVAL_MINUTES: u16 = 15;

/// Finds an existing appointment that collides with `[start, end)`.
///
/// Only appointments for `staff_id` on `date` are considered. The appointment
/// identified by `exclude` is skipped, so an edit never conflicts with its
/// own previous slot.
#[must_use]
pub fn find_conflict<'a>(
    existing: &'a [Appointment],
    staff_id: StaffId,
    date: Date,
    start: TimeOfDay,
    end: TimeOfDay,
    exclude: Option<AppointmentId>,
) -> Option<&'a Appointment> {
    existing
        .iter()
        .filter(|a| a.staff_id == staff_id && a.date == date)
        .filter(|a| exclude.is_none() || a.id != exclude)
        .find(|a| overlaps(start, end, a.start_time, a.end_time))
}

/// Calculates the ordered list of bookable start times.
///
/// # Arguments
///
/// * `calendar` - Shop hours and leave snapshot
/// * `staff` - The staff member's working-hours profile
/// * `date` - The calendar date
/// * `duration` - Length of the requested service
/// * `existing` - The staff member's appointments on that date
/// * `exclude` - An appointment being edited, ignored for conflicts
///
/// # Returns
///
/// Start times in ascending order. Empty when the shop is closed, the staff
/// member is on leave or inactive, or the effective window is too short.
#[must_use]
pub fn calculate_available_slots(
    calendar: &OperatingCalendar,
    staff: &StaffProfile,
    date: Date,
    duration: ServiceDuration,
    existing: &[Appointment],
    exclude: Option<AppointmentId>,
) -> Vec<TimeOfDay> {
    let Some(window) = calendar.effective_window(staff, date) else {
        return Vec::new();
    };

    candidate_slots(&window, duration)
        .filter(|(start, end)| !overlaps(*start, *end, window.lunch_start, window.lunch_end))
        .filter(|(start, end)| {
            find_conflict(existing, staff.id, date, *start, *end, exclude).is_none()
        })
        .map(|(start, _)| start)
        .collect()
}

/// Walks `[start, start + duration)` candidates across the window.
fn candidate_slots(
    window: &StaffWindow,
    duration: ServiceDuration,
) -> impl Iterator<Item = (TimeOfDay, TimeOfDay)> {
    let window_end: TimeOfDay = window.end;
    std::iter::successors(Some(window.start), |start| {
        start.add_minutes(SLOT_INTERVAL_MINUTES).ok()
    })
    .map_while(move |start| {
        start
            .add_duration(duration)
            .ok()
            .filter(|end| *end <= window_end)
            .map(|end| (start, end))
    })
}
