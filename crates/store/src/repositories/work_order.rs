//! Work order repository.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use opsdesk_core::numbering::SequenceScope;
use opsdesk_core::policy::{Actor, Operation, OwnershipPolicy};
use opsdesk_core::workorder::{
    Material, WorkOrder, WorkOrderError, WorkOrderInput, WorkOrderLifecycle, WorkOrderPatch,
    WorkOrderStatus, WorkQueue,
};
use opsdesk_shared::types::{CustomerId, PageRequest, PageResponse, UserId, WorkOrderNumber};
use opsdesk_shared::{AppError, AppResult};

use crate::memory::MemStore;

/// Filter options for listing work orders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkOrderFilter {
    /// Filter by status.
    pub status: Option<WorkOrderStatus>,
    /// Filter by customer.
    pub customer_id: Option<CustomerId>,
    /// Filter by assignee.
    pub assignee_id: Option<UserId>,
    /// Case-insensitive substring match on number or title.
    pub search: Option<String>,
}

/// Work order repository for CRUD, transitions, and queue moves.
#[derive(Debug, Clone)]
pub struct WorkOrderRepository {
    store: Arc<MemStore>,
}

impl WorkOrderRepository {
    /// Creates a new work order repository.
    #[must_use]
    pub fn new(store: Arc<MemStore>) -> Self {
        Self { store }
    }

    /// Lists work orders visible to the actor in queue order.
    pub fn list(
        &self,
        actor: &Actor,
        filter: &WorkOrderFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<WorkOrder>> {
        let scope = OwnershipPolicy::list_scope(actor);
        let needle = filter.search.as_deref().map(str::to_lowercase);

        let mut work_orders: Vec<WorkOrder> = self
            .store
            .work_orders
            .iter()
            .filter(|entry| scope.is_none_or(|owner| entry.assignee_id == owner))
            .filter(|entry| filter.status.is_none_or(|status| entry.status == status))
            .filter(|entry| filter.customer_id.is_none_or(|id| entry.customer_id == id))
            .filter(|entry| filter.assignee_id.is_none_or(|id| entry.assignee_id == id))
            .filter(|entry| {
                needle.as_deref().is_none_or(|needle| {
                    entry.number.as_str().to_lowercase().contains(needle)
                        || entry.title.to_lowercase().contains(needle)
                })
            })
            .map(|entry| entry.clone())
            .collect();

        work_orders.sort_by_key(|wo| wo.position);

        let total = work_orders.len() as u64;
        let data: Vec<WorkOrder> = work_orders
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Fetches one work order.
    pub fn get(&self, actor: &Actor, number: &WorkOrderNumber) -> AppResult<WorkOrder> {
        let work_order = self
            .store
            .work_orders
            .get(number)
            .map(|entry| entry.clone())
            .ok_or_else(|| AppError::NotFound(format!("work order {number}")))?;
        OwnershipPolicy::check_owned(actor, work_order.assignee_id, Operation::Read, false)
            .into_result(&format!("work order {number}"))?;
        Ok(work_order)
    }

    /// Creates a work order at the end of the queue.
    pub fn create(&self, actor: &Actor, input: WorkOrderInput) -> AppResult<WorkOrder> {
        OwnershipPolicy::check_owned(actor, actor.id, Operation::Create, false)
            .into_result("work order")?;
        self.ensure_customer_exists(input.customer_id)?;
        WorkOrderLifecycle::validate_hours(input.estimated_hours, None)
            .map_err(AppError::from)?;
        Self::validate_materials(&input.materials)?;

        let number = WorkOrderNumber::from(self.store.allocate(SequenceScope::WorkOrder)?);
        let now = Utc::now();

        let guard = self.store.queue_guard()?;
        let positions: Vec<u32> = self.store.work_orders.iter().map(|wo| wo.position).collect();
        let work_order = WorkOrder {
            number: number.clone(),
            title: input.title,
            description: input.description,
            customer_id: input.customer_id,
            assignee_id: input.assignee_id,
            created_by: actor.id,
            status: WorkOrderStatus::Todo,
            priority: input.priority,
            estimated_hours: input.estimated_hours,
            actual_hours: None,
            due_date: input.due_date,
            started_at: None,
            completed_at: None,
            position: WorkQueue::next_position(&positions),
            materials: input.materials,
            created_at: now,
            updated_at: now,
        };
        self.store
            .work_orders
            .insert(number.clone(), work_order.clone());
        drop(guard);

        tracing::debug!(number = %number, "work order created");
        Ok(work_order)
    }

    /// Applies a partial update.
    pub fn update(
        &self,
        actor: &Actor,
        number: &WorkOrderNumber,
        patch: WorkOrderPatch,
    ) -> AppResult<WorkOrder> {
        if let Some(customer_id) = patch.customer_id {
            self.ensure_customer_exists(customer_id)?;
        }
        WorkOrderLifecycle::validate_hours(patch.estimated_hours, patch.actual_hours)
            .map_err(AppError::from)?;
        if let Some(materials) = &patch.materials {
            Self::validate_materials(materials)?;
        }

        let mut entry = self
            .store
            .work_orders
            .get_mut(number)
            .ok_or_else(|| AppError::NotFound(format!("work order {number}")))?;
        OwnershipPolicy::check_owned(actor, entry.assignee_id, Operation::Update, false)
            .into_result(&format!("work order {number}"))?;

        if let Some(title) = patch.title {
            entry.title = title;
        }
        if let Some(description) = patch.description {
            entry.description = Some(description);
        }
        if let Some(customer_id) = patch.customer_id {
            entry.customer_id = customer_id;
        }
        if let Some(assignee_id) = patch.assignee_id {
            entry.assignee_id = assignee_id;
        }
        if let Some(priority) = patch.priority {
            entry.priority = Some(priority);
        }
        if let Some(estimated_hours) = patch.estimated_hours {
            entry.estimated_hours = Some(estimated_hours);
        }
        if let Some(actual_hours) = patch.actual_hours {
            entry.actual_hours = Some(actual_hours);
        }
        if let Some(due_date) = patch.due_date {
            entry.due_date = Some(due_date);
        }
        if let Some(materials) = patch.materials {
            entry.materials = materials;
        }
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    /// Deletes a work order and closes the gap in the queue.
    ///
    /// Deletable by the assignee or an admin. A quote linked to the deleted
    /// work order has its link cleared.
    pub fn delete(&self, actor: &Actor, number: &WorkOrderNumber) -> AppResult<()> {
        let assignee_id = self
            .store
            .work_orders
            .get(number)
            .map(|entry| entry.assignee_id)
            .ok_or_else(|| AppError::NotFound(format!("work order {number}")))?;
        OwnershipPolicy::check_owned(actor, assignee_id, Operation::Delete, false)
            .into_result(&format!("work order {number}"))?;

        let guard = self.store.queue_guard()?;
        let Some((_, removed)) = self.store.work_orders.remove(number) else {
            return Err(AppError::NotFound(format!("work order {number}")));
        };
        let entries: Vec<(WorkOrderNumber, u32)> = self
            .store
            .work_orders
            .iter()
            .map(|wo| (wo.number.clone(), wo.position))
            .collect();
        for (other, position) in WorkQueue::plan_remove(&entries, removed.position) {
            if let Some(mut wo) = self.store.work_orders.get_mut(&other) {
                wo.position = position;
            }
        }
        drop(guard);

        for mut quote in self.store.quotes.iter_mut() {
            if quote.work_order.as_ref() == Some(number) {
                quote.work_order = None;
                quote.updated_at = Utc::now();
            }
        }
        tracing::debug!(number = %number, "work order deleted");
        Ok(())
    }

    /// Transitions a work order's status, applying timestamp side effects.
    pub fn transition(
        &self,
        actor: &Actor,
        number: &WorkOrderNumber,
        to: WorkOrderStatus,
    ) -> AppResult<WorkOrder> {
        let mut entry = self
            .store
            .work_orders
            .get_mut(number)
            .ok_or_else(|| AppError::NotFound(format!("work order {number}")))?;
        OwnershipPolicy::check_owned(actor, entry.assignee_id, Operation::Transition, false)
            .into_result(&format!("work order {number}"))?;

        let action =
            WorkOrderLifecycle::transition(&entry, to, Utc::now()).map_err(AppError::from)?;
        entry.status = action.new_status;
        entry.started_at = action.started_at;
        entry.completed_at = action.completed_at;
        entry.updated_at = Utc::now();
        tracing::debug!(number = %number, status = %to, "work order transitioned");
        Ok(entry.clone())
    }

    /// Moves a work order to a new queue position.
    ///
    /// The whole permutation changes under the queue guard, so the dense
    /// 1..N invariant holds at every observable point.
    pub fn move_position(
        &self,
        actor: &Actor,
        number: &WorkOrderNumber,
        new_index: u32,
    ) -> AppResult<WorkOrder> {
        let assignee_id = self
            .store
            .work_orders
            .get(number)
            .map(|entry| entry.assignee_id)
            .ok_or_else(|| AppError::NotFound(format!("work order {number}")))?;
        OwnershipPolicy::check_owned(actor, assignee_id, Operation::Reorder, false)
            .into_result(&format!("work order {number}"))?;

        let guard = self.store.queue_guard()?;
        let entries: Vec<(WorkOrderNumber, u32)> = self
            .store
            .work_orders
            .iter()
            .map(|wo| (wo.number.clone(), wo.position))
            .collect();
        let updates = WorkQueue::plan_move(&entries, number, new_index).map_err(AppError::from)?;
        for (other, position) in updates {
            if let Some(mut wo) = self.store.work_orders.get_mut(&other) {
                wo.position = position;
                wo.updated_at = Utc::now();
            }
        }
        drop(guard);

        tracing::debug!(number = %number, position = new_index, "work order moved");
        self.store
            .work_orders
            .get(number)
            .map(|entry| entry.clone())
            .ok_or_else(|| AppError::NotFound(format!("work order {number}")))
    }

    fn validate_materials(materials: &[Material]) -> AppResult<()> {
        for material in materials {
            if material.quantity < Decimal::ZERO {
                return Err(WorkOrderError::NegativeMaterialQuantity.into());
            }
        }
        Ok(())
    }

    fn ensure_customer_exists(&self, customer_id: CustomerId) -> AppResult<()> {
        if self.store.customers.contains_key(&customer_id) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("customer {customer_id}")))
        }
    }
}
