// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operating calendar.
//!
//! Answers two questions for a calendar date:
//! - Is the shop open, and between which times?
//! - When does a given staff member work, if at all?
//!
//! The bookable window for a staff member is the intersection of both.
//!
//! ## Invariants
//!
//! - Every weekday has exactly one `OperatingDay`
//! - A leave entry removes the staff member for the whole date
//! - Inactive staff have no window

use crate::time_of_day::TimeOfDay;
use crate::types::{StaffId, StaffProfile};
use serde::{Deserialize, Serialize};
use time::{Date, Weekday};

/// Weekdays in storage order, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

const DEFAULT_OPEN: TimeOfDay = TimeOfDay::new_unchecked(9 * 60);
const DEFAULT_CLOSE: TimeOfDay = TimeOfDay::new_unchecked(19 * 60);

/// Shop opening hours for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingDay {
    /// Whether the shop opens at all on this weekday.
    pub is_open: bool,
    /// Opening time.
    pub open_time: TimeOfDay,
    /// Closing time.
    pub close_time: TimeOfDay,
}

impl OperatingDay {
    /// Creates an open day.
    #[must_use]
    pub const fn open(open_time: TimeOfDay, close_time: TimeOfDay) -> Self {
        Self {
            is_open: true,
            open_time,
            close_time,
        }
    }

    /// Creates a closed day.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            is_open: false,
            open_time: TimeOfDay::MIDNIGHT,
            close_time: TimeOfDay::MIDNIGHT,
        }
    }
}

/// The shop-wide weekly schedule: one `OperatingDay` per weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    /// Indexed by `Weekday::number_days_from_monday`.
    days: [OperatingDay; 7],
}

impl OperatingHours {
    /// Creates operating hours from seven days, Monday first.
    #[must_use]
    pub const fn new(days: [OperatingDay; 7]) -> Self {
        Self { days }
    }

    /// Returns the operating day for a weekday.
    #[must_use]
    pub const fn day(&self, weekday: Weekday) -> &OperatingDay {
        &self.days[weekday.number_days_from_monday() as usize]
    }

    /// Replaces the operating day for a weekday.
    pub const fn set_day(&mut self, weekday: Weekday, day: OperatingDay) {
        self.days[weekday.number_days_from_monday() as usize] = day;
    }

    /// Iterates all seven days, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &OperatingDay)> {
        WEEKDAYS.iter().copied().zip(self.days.iter())
    }
}

impl Default for OperatingHours {
    /// Monday to Saturday `09:00-19:00`, closed on Sunday.
    fn default() -> Self {
        let weekday: OperatingDay = OperatingDay::open(DEFAULT_OPEN, DEFAULT_CLOSE);
        let mut days: [OperatingDay; 7] = [weekday; 7];
        days[Weekday::Sunday.number_days_from_monday() as usize] = OperatingDay::closed();
        Self { days }
    }
}

/// A full-day absence for one staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarberLeave {
    /// The staff member on leave.
    pub staff_id: StaffId,
    /// The date of the leave.
    pub date: Date,
}

/// The working window of a staff member on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffWindow {
    /// First bookable minute.
    pub start: TimeOfDay,
    /// End of the window (exclusive).
    pub end: TimeOfDay,
    /// Start of the lunch break.
    pub lunch_start: TimeOfDay,
    /// End of the lunch break.
    pub lunch_end: TimeOfDay,
}

impl StaffWindow {
    /// Returns whether the window contains no bookable minutes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// An immutable snapshot of shop hours and staff leave.
///
/// Availability queries build one of these per call so that every check
/// in the query sees the same inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperatingCalendar {
    hours: OperatingHours,
    leaves: Vec<BarberLeave>,
}

impl OperatingCalendar {
    /// Creates a calendar snapshot.
    #[must_use]
    pub const fn new(hours: OperatingHours, leaves: Vec<BarberLeave>) -> Self {
        Self { hours, leaves }
    }

    /// Returns the shop's weekly hours.
    #[must_use]
    pub const fn hours(&self) -> &OperatingHours {
        &self.hours
    }

    /// Resolves a date to its weekday and returns the shop hours for it.
    #[must_use]
    pub fn operating_day(&self, date: Date) -> &OperatingDay {
        self.hours.day(date.weekday())
    }

    /// Returns whether the staff member has a leave entry on the date.
    #[must_use]
    pub fn is_on_leave(&self, staff_id: StaffId, date: Date) -> bool {
        self.leaves
            .iter()
            .any(|leave| leave.staff_id == staff_id && leave.date == date)
    }

    /// Returns the staff member's own working window on a date.
    ///
    /// `None` when the staff member is on leave or inactive. Shop hours
    /// are not applied here; see [`OperatingCalendar::effective_window`].
    #[must_use]
    pub fn staff_window(&self, staff: &StaffProfile, date: Date) -> Option<StaffWindow> {
        if !staff.status.is_active() || self.is_on_leave(staff.id, date) {
            return None;
        }
        Some(StaffWindow {
            start: staff.work_start,
            end: staff.work_end,
            lunch_start: staff.lunch_start,
            lunch_end: staff.lunch_end,
        })
    }

    /// Returns the bookable window: shop hours intersected with the staff
    /// member's working hours.
    ///
    /// `None` when the shop is closed, the staff member has no window, or
    /// the intersection is empty.
    #[must_use]
    pub fn effective_window(&self, staff: &StaffProfile, date: Date) -> Option<StaffWindow> {
        let day: &OperatingDay = self.operating_day(date);
        if !day.is_open {
            return None;
        }

        let staff_window: StaffWindow = self.staff_window(staff, date)?;
        let window: StaffWindow = StaffWindow {
            start: staff_window.start.max(day.open_time),
            end: staff_window.end.min(day.close_time),
            ..staff_window
        };

        (!window.is_empty()).then_some(window)
    }
}
