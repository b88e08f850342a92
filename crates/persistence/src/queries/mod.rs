// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `catalog`: services, staff and clients
//! - `calendar`: operating hours and staff leave
//! - `appointments`: appointment lookups and day schedules
//! - `audit`: audit events and timelines

pub mod appointments;
pub mod audit;
pub mod calendar;
pub mod catalog;
