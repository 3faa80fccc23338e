// ── Request queue and dashboard figures ──

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{RequestStatus, ServiceRequest};

/// Pending work: Open requests only, most urgent first, then oldest first.
pub fn queue(requests: &[Arc<ServiceRequest>]) -> Vec<Arc<ServiceRequest>> {
    let mut open: Vec<Arc<ServiceRequest>> = requests
        .iter()
        .filter(|r| r.status == RequestStatus::Open)
        .cloned()
        .collect();
    open.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| a.requested_at.cmp(&b.requested_at))
    });
    open
}

/// Headline numbers for the requests panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStats {
    pub open: usize,
    pub in_progress: usize,
    /// Resolved with `completed_at` on the given UTC calendar date.
    pub resolved_today: usize,
    /// Mean of (eta - requested_at) over requests that have an eta; 0 when none do.
    pub avg_response_minutes: f64,
}

impl RequestStats {
    #[allow(clippy::cast_precision_loss)]
    pub fn compute<'a>(
        requests: impl IntoIterator<Item = &'a ServiceRequest>,
        today: NaiveDate,
    ) -> Self {
        let mut stats = Self::default();
        let mut total_minutes = 0.0;
        let mut with_eta = 0usize;

        for request in requests {
            match request.status {
                RequestStatus::Open => stats.open += 1,
                RequestStatus::InProgress => stats.in_progress += 1,
                RequestStatus::Resolved
                    if request
                        .completed_at
                        .is_some_and(|at| at.date_naive() == today) =>
                {
                    stats.resolved_today += 1;
                }
                _ => {}
            }
            if let Some(minutes) = request.response_minutes() {
                total_minutes += minutes;
                with_eta += 1;
            }
        }

        if with_eta > 0 {
            stats.avg_response_minutes = total_minutes / with_eta as f64;
        }
        stats
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{EntityId, Priority, ServiceType};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, hour, 0, 0).unwrap()
    }

    fn request(code: &str, priority: Priority, status: RequestStatus, hour: u32) -> Arc<ServiceRequest> {
        Arc::new(ServiceRequest {
            id: EntityId::from(code),
            guest_name: format!("Guest {code}"),
            room_number: "101".into(),
            service_type: ServiceType::RoomService,
            priority,
            status,
            requested_at: at(hour),
            eta: None,
            assigned_staff_ids: vec![],
            notes: String::new(),
            attachment: None,
            activity: vec![],
            completed_at: None,
        })
    }

    fn codes(list: &[Arc<ServiceRequest>]) -> Vec<String> {
        list.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn queue_orders_by_rank_then_age() {
        let all = vec![
            request("low-old", Priority::Low, RequestStatus::Open, 1),
            request("normal-new", Priority::Normal, RequestStatus::Open, 9),
            request("urgent", Priority::Urgent, RequestStatus::Open, 8),
            request("normal-old", Priority::Normal, RequestStatus::Open, 2),
            request("high-started", Priority::High, RequestStatus::InProgress, 0),
        ];
        assert_eq!(
            codes(&queue(&all)),
            vec!["urgent", "normal-old", "normal-new", "low-old"]
        );
    }

    #[test]
    fn queue_contains_open_requests_only() {
        let all = vec![
            request("a", Priority::Urgent, RequestStatus::Resolved, 1),
            request("b", Priority::Urgent, RequestStatus::Cancelled, 1),
        ];
        assert!(queue(&all).is_empty());
    }

    #[test]
    fn stats_count_today_and_average_eta() {
        let mut resolved = (*request("r", Priority::Normal, RequestStatus::Resolved, 3)).clone();
        resolved.completed_at = Some(at(4));
        resolved.eta = Some(at(3) + Duration::minutes(30));
        let mut old = (*request("o", Priority::Normal, RequestStatus::Resolved, 3)).clone();
        old.completed_at = Some(at(4) - Duration::days(1));
        let mut open = (*request("p", Priority::Normal, RequestStatus::Open, 5)).clone();
        open.eta = Some(at(5) + Duration::minutes(90));
        let started = (*request("s", Priority::Normal, RequestStatus::InProgress, 5)).clone();

        let all = [resolved, old, open, started];
        let stats = RequestStats::compute(&all, at(0).date_naive());
        assert_eq!(
            stats,
            RequestStats {
                open: 1,
                in_progress: 1,
                resolved_today: 1,
                avg_response_minutes: 60.0,
            }
        );
    }

    #[test]
    fn stats_average_is_zero_without_etas() {
        let all = [(*request("p", Priority::Normal, RequestStatus::Open, 5)).clone()];
        let stats = RequestStats::compute(&all, at(0).date_naive());
        assert!(stats.avg_response_minutes.abs() < 1e-9);
    }
}
