//! Delivery requests assigned to drones by the planning layer.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Delivery lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl DeliveryStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// A payload to drop at a point within a time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: String,
    pub position: Position,
    pub weight: f64,
    /// Higher is more urgent
    pub priority: i32,
    pub time_window_start: DateTime<Utc>,
    pub time_window_end: DateTime<Utc>,
    #[serde(default)]
    pub assigned_drone: Option<String>,
    #[serde(default)]
    pub status: DeliveryStatus,
}

impl Delivery {
    pub fn new(
        id: impl Into<String>,
        position: Position,
        weight: f64,
        priority: i32,
        time_window_start: DateTime<Utc>,
        time_window_end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            weight,
            priority,
            time_window_start,
            time_window_end,
            assigned_drone: None,
            status: DeliveryStatus::Pending,
        }
    }

    /// Both window ends are inclusive.
    #[must_use]
    pub fn is_within_time_window(&self, now: DateTime<Utc>) -> bool {
        self.time_window_start <= now && now <= self.time_window_end
    }

    /// Signed time left until the window closes
    #[must_use]
    pub fn time_until_deadline(&self, now: DateTime<Utc>) -> Duration {
        self.time_window_end - now
    }

    pub fn assign_to_drone(&mut self, drone_id: impl Into<String>) {
        self.assigned_drone = Some(drone_id.into());
        self.status = DeliveryStatus::InProgress;
    }

    pub fn mark_completed(&mut self) {
        self.status = DeliveryStatus::Completed;
    }

    pub fn mark_failed(&mut self) {
        self.status = DeliveryStatus::Failed;
    }

    /// Dispatch ordering: higher priority first, then earlier deadline.
    #[must_use]
    pub fn dispatch_order(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.time_window_end.cmp(&other.time_window_end))
    }
}
