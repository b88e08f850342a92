// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read access to the audit trail.

use shearbook_audit::AuditEvent;
use shearbook_domain::StaffId;
use time::Date;

use crate::error::ApiError;
use crate::input::{check_id, parse_date_input, parse_id};
use crate::request_response::{AuditEventInfo, AuditTimelineRequest, AuditTimelineResponse};
use crate::scheduler::Scheduler;

impl Scheduler {
    /// Returns every event recorded against one staff member's day,
    /// oldest first. Bookings, moves, cancellations and leave changes all
    /// appear here.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is malformed or storage fails.
    pub async fn get_audit_timeline(
        &self,
        request: &AuditTimelineRequest,
    ) -> Result<AuditTimelineResponse, ApiError> {
        let staff_id: StaffId = StaffId::new(parse_id("staff_id", &request.staff_id)?);
        let date: Date = parse_date_input("date", &request.date)?;

        let events: Vec<AuditEvent> = self.storage().await.get_audit_timeline(staff_id, date)?;
        Ok(AuditTimelineResponse {
            events: events.iter().map(AuditEventInfo::from).collect(),
        })
    }

    /// Returns shop-wide events such as operating hours changes.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn get_global_audit_events(&self) -> Result<AuditTimelineResponse, ApiError> {
        let events: Vec<AuditEvent> = self.storage().await.get_global_audit_events()?;
        Ok(AuditTimelineResponse {
            events: events.iter().map(AuditEventInfo::from).collect(),
        })
    }

    /// Returns one audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is malformed or the event does not exist.
    pub async fn get_audit_event(&self, event_id: i64) -> Result<AuditEventInfo, ApiError> {
        let event_id: i64 = check_id("event_id", event_id)?;
        let event: AuditEvent = self.storage().await.get_audit_event(event_id)?;
        Ok(AuditEventInfo::from(&event))
    }
}
