//! Work order domain types.

use chrono::{DateTime, NaiveDate, Utc};
use opsdesk_shared::types::{CustomerId, ItemId, UserId, WorkOrderNumber};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Work order status.
///
/// The valid transitions are:
/// - Todo ↔ Pending
/// - Todo | Pending → InProgress
/// - InProgress → Pending
/// - Todo | Pending | InProgress → Completed
/// - Completed → InProgress (reopen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    /// Queued, not yet picked up.
    Todo,
    /// Waiting on something external (parts, customer).
    Pending,
    /// Actively being worked.
    InProgress,
    /// Finished.
    Completed,
}

impl WorkOrderStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "todo" => Some(Self::Todo),
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Work order priority. Absent means normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Standard scheduling.
    Medium,
    /// Jump the queue.
    High,
}

/// A material consumed by a work order.
///
/// Recording a material does not decrement inventory by itself; consumption
/// is an explicit stock adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// The inventory item consumed.
    pub item_id: ItemId,
    /// Quantity consumed (must be >= 0).
    pub quantity: Decimal,
}

/// A unit of field work with an assignee and hour tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Sequential work order number, assigned once at creation.
    pub number: WorkOrderNumber,
    /// Short title.
    pub title: String,
    /// Longer description of the work.
    pub description: Option<String>,
    /// The customer the work is for.
    pub customer_id: CustomerId,
    /// The user assigned to the work (its owner for policy purposes).
    pub assignee_id: UserId,
    /// The user who created the work order.
    pub created_by: UserId,
    /// Current status.
    pub status: WorkOrderStatus,
    /// Priority; `None` means normal.
    pub priority: Option<Priority>,
    /// Estimated hours (must be >= 0).
    pub estimated_hours: Option<Decimal>,
    /// Actual hours worked (must be >= 0).
    pub actual_hours: Option<Decimal>,
    /// Due date for the work.
    pub due_date: Option<NaiveDate>,
    /// When work first entered in-progress. Set once.
    pub started_at: Option<DateTime<Utc>>,
    /// When the work was completed. Set once; cleared only by reopen.
    pub completed_at: Option<DateTime<Utc>>,
    /// Dense, unique position in the work queue (1..N).
    pub position: u32,
    /// Materials consumed.
    pub materials: Vec<Material>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a work order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrderInput {
    /// Short title.
    pub title: String,
    /// Longer description of the work.
    pub description: Option<String>,
    /// The customer the work is for.
    pub customer_id: CustomerId,
    /// The user assigned to the work.
    pub assignee_id: UserId,
    /// Priority; `None` means normal.
    pub priority: Option<Priority>,
    /// Estimated hours.
    pub estimated_hours: Option<Decimal>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Materials consumed.
    #[serde(default)]
    pub materials: Vec<Material>,
}

/// Partial update for a work order. Absent fields are left untouched.
///
/// A present field always carries a replacement value; a patch cannot clear
/// a set field (priority, due date) back to none.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkOrderPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New customer reference.
    pub customer_id: Option<CustomerId>,
    /// New assignee.
    pub assignee_id: Option<UserId>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New estimated hours.
    pub estimated_hours: Option<Decimal>,
    /// New actual hours.
    pub actual_hours: Option<Decimal>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// Replacement materials.
    pub materials: Option<Vec<Material>>,
}
