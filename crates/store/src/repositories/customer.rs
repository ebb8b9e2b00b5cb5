//! Customer repository.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use opsdesk_core::customer::{Customer, CustomerInput, CustomerStatus};
use opsdesk_core::policy::{Actor, Operation, OwnershipPolicy};
use opsdesk_shared::types::{CustomerId, PageRequest, PageResponse};
use opsdesk_shared::{AppError, AppResult};

use crate::memory::MemStore;

/// Filter options for listing customers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerFilter {
    /// Case-insensitive substring match on name or email.
    pub search: Option<String>,
    /// Filter by account status.
    pub status: Option<CustomerStatus>,
}

/// Customer repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    store: Arc<MemStore>,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub fn new(store: Arc<MemStore>) -> Self {
        Self { store }
    }

    /// Lists customers, name ascending. Customers are shared: members see all.
    pub fn list(
        &self,
        actor: &Actor,
        filter: &CustomerFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Customer>> {
        OwnershipPolicy::check_shared(actor, Operation::List, true).into_result("customers")?;

        let needle = filter.search.as_deref().map(str::to_lowercase);
        let mut customers: Vec<Customer> = self
            .store
            .customers
            .iter()
            .filter(|entry| {
                needle.as_deref().is_none_or(|needle| {
                    entry.name.to_lowercase().contains(needle)
                        || entry
                            .email
                            .as_deref()
                            .is_some_and(|email| email.to_lowercase().contains(needle))
                })
            })
            .filter(|entry| filter.status.is_none_or(|status| entry.status == status))
            .map(|entry| entry.clone())
            .collect();

        customers.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let total = customers.len() as u64;
        let data: Vec<Customer> = customers
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Fetches one customer.
    pub fn get(&self, actor: &Actor, id: CustomerId) -> AppResult<Customer> {
        OwnershipPolicy::check_shared(actor, Operation::Read, true).into_result("customers")?;
        self.store
            .customers
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or_else(|| AppError::NotFound(format!("customer {id}")))
    }

    /// Creates a customer, active unless the input says otherwise.
    pub fn create(&self, actor: &Actor, input: CustomerInput) -> AppResult<Customer> {
        OwnershipPolicy::check_shared(actor, Operation::Create, true).into_result("customers")?;
        if input.name.trim().is_empty() {
            return Err(AppError::Validation(
                "customer name cannot be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let customer = Customer {
            id: CustomerId::new(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            status: input.status.unwrap_or(CustomerStatus::Active),
            created_at: now,
            updated_at: now,
        };
        self.store.customers.insert(customer.id, customer.clone());
        tracing::debug!(id = %customer.id, "customer created");
        Ok(customer)
    }

    /// Replaces a customer's contact fields and status.
    pub fn update(&self, actor: &Actor, id: CustomerId, input: CustomerInput) -> AppResult<Customer> {
        OwnershipPolicy::check_shared(actor, Operation::Update, true).into_result("customers")?;
        if input.name.trim().is_empty() {
            return Err(AppError::Validation(
                "customer name cannot be empty".to_string(),
            ));
        }

        let mut entry = self
            .store
            .customers
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("customer {id}")))?;
        entry.name = input.name;
        entry.email = input.email;
        entry.phone = input.phone;
        entry.address = input.address;
        if let Some(status) = input.status {
            entry.status = status;
        }
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    /// Deletes a customer. Admin only; rejected while any document still
    /// references the customer.
    pub fn delete(&self, actor: &Actor, id: CustomerId) -> AppResult<()> {
        OwnershipPolicy::check_shared(actor, Operation::Delete, true).into_result("customers")?;
        if !self.store.customers.contains_key(&id) {
            return Err(AppError::NotFound(format!("customer {id}")));
        }
        if self.is_referenced(id) {
            return Err(AppError::Conflict(format!(
                "customer {id} is referenced by existing documents"
            )));
        }

        self.store.customers.remove(&id);
        tracing::debug!(id = %id, "customer deleted");
        Ok(())
    }

    fn is_referenced(&self, id: CustomerId) -> bool {
        self.store.quotes.iter().any(|q| q.customer_id == id)
            || self.store.invoices.iter().any(|i| i.customer_id == id)
            || self.store.work_orders.iter().any(|w| w.customer_id == id)
    }
}
