//! Invoice repository.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use opsdesk_core::finance::FinanceCalculator;
use opsdesk_core::invoice::{
    Invoice, InvoiceDisplayStatus, InvoiceInput, InvoiceLifecycle, InvoicePatch, InvoiceStatus,
};
use opsdesk_core::numbering::SequenceScope;
use opsdesk_core::policy::{Actor, Operation, OwnershipPolicy};
use opsdesk_shared::config::BusinessConfig;
use opsdesk_shared::types::{CustomerId, InvoiceNumber, PageRequest, PageResponse};
use opsdesk_shared::{AppError, AppResult};

use crate::memory::MemStore;

/// Filter options for listing invoices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceFilter {
    /// Filter by displayed status (overdue matches the derived state).
    pub status: Option<InvoiceDisplayStatus>,
    /// Filter by customer.
    pub customer_id: Option<CustomerId>,
    /// Case-insensitive substring match on number or notes.
    pub search: Option<String>,
}

/// Invoice repository for CRUD and payment transitions.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    store: Arc<MemStore>,
    business: BusinessConfig,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub fn new(store: Arc<MemStore>, business: BusinessConfig) -> Self {
        Self { store, business }
    }

    /// Lists invoices visible to the actor, newest first.
    pub fn list(
        &self,
        actor: &Actor,
        filter: &InvoiceFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Invoice>> {
        let scope = OwnershipPolicy::list_scope(actor);
        let today = Utc::now().date_naive();
        let needle = filter.search.as_deref().map(str::to_lowercase);

        let mut invoices: Vec<Invoice> = self
            .store
            .invoices
            .iter()
            .filter(|entry| scope.is_none_or(|owner| entry.owner_id == owner))
            .filter(|entry| {
                filter
                    .status
                    .is_none_or(|status| InvoiceLifecycle::display_status(entry, today) == status)
            })
            .filter(|entry| filter.customer_id.is_none_or(|id| entry.customer_id == id))
            .filter(|entry| {
                needle.as_deref().is_none_or(|needle| {
                    entry.number.as_str().to_lowercase().contains(needle)
                        || entry
                            .notes
                            .as_deref()
                            .is_some_and(|notes| notes.to_lowercase().contains(needle))
                })
            })
            .map(|entry| entry.clone())
            .collect();

        invoices.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.number.as_str().cmp(a.number.as_str()))
        });

        let total = invoices.len() as u64;
        let data: Vec<Invoice> = invoices
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Fetches one invoice.
    pub fn get(&self, actor: &Actor, number: &InvoiceNumber) -> AppResult<Invoice> {
        let invoice = self
            .store
            .invoices
            .get(number)
            .map(|entry| entry.clone())
            .ok_or_else(|| AppError::NotFound(format!("invoice {number}")))?;
        OwnershipPolicy::check_owned(actor, invoice.owner_id, Operation::Read, true)
            .into_result(&format!("invoice {number}"))?;
        Ok(invoice)
    }

    /// Creates an invoice in draft status with a year-scoped number.
    pub fn create(&self, actor: &Actor, input: InvoiceInput) -> AppResult<Invoice> {
        OwnershipPolicy::check_owned(actor, actor.id, Operation::Create, true)
            .into_result("invoice")?;
        self.ensure_customer_exists(input.customer_id)?;

        let vat = self.business.vat_rate_percent;
        let totals = FinanceCalculator::compute(
            &input.line_items,
            input.labor_hours,
            input.hourly_rate.or(Some(self.business.default_hourly_rate)),
            vat,
        )?;

        let now = Utc::now();
        let year = now.date_naive().year();
        let number = InvoiceNumber::from(self.store.allocate(SequenceScope::Invoice { year })?);
        let invoice = Invoice {
            number: number.clone(),
            customer_id: input.customer_id,
            owner_id: actor.id,
            quote: None,
            work_order: None,
            status: InvoiceStatus::Draft,
            line_items: input.line_items,
            labor_hours: input.labor_hours,
            hourly_rate: input.hourly_rate,
            vat_rate_percent: vat,
            totals,
            due_date: input.due_date,
            paid_at: None,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };

        self.store.invoices.insert(number.clone(), invoice.clone());
        tracing::debug!(number = %number, "invoice created");
        Ok(invoice)
    }

    /// Applies a partial update, recomputing totals only when financial
    /// inputs changed. Terminal invoices reject updates.
    pub fn update(
        &self,
        actor: &Actor,
        number: &InvoiceNumber,
        patch: InvoicePatch,
    ) -> AppResult<Invoice> {
        if let Some(customer_id) = patch.customer_id {
            self.ensure_customer_exists(customer_id)?;
        }

        let mut entry = self
            .store
            .invoices
            .get_mut(number)
            .ok_or_else(|| AppError::NotFound(format!("invoice {number}")))?;
        OwnershipPolicy::check_owned(actor, entry.owner_id, Operation::Update, true)
            .into_result(&format!("invoice {number}"))?;
        InvoiceLifecycle::ensure_editable(entry.status).map_err(AppError::from)?;

        let recompute = patch.changes_financials();
        if let Some(customer_id) = patch.customer_id {
            entry.customer_id = customer_id;
        }
        if let Some(line_items) = patch.line_items {
            entry.line_items = line_items;
        }
        if let Some(labor_hours) = patch.labor_hours {
            entry.labor_hours = Some(labor_hours);
        }
        if let Some(hourly_rate) = patch.hourly_rate {
            entry.hourly_rate = Some(hourly_rate);
        }
        if let Some(due_date) = patch.due_date {
            entry.due_date = Some(due_date);
        }
        if let Some(notes) = patch.notes {
            entry.notes = Some(notes);
        }

        if recompute {
            entry.totals = FinanceCalculator::compute(
                &entry.line_items,
                entry.labor_hours,
                entry
                    .hourly_rate
                    .or(Some(self.business.default_hourly_rate)),
                entry.vat_rate_percent,
            )?;
        }
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    /// Deletes an invoice. Admin only; the originating quote's link is
    /// cleared so the quote becomes deletable again.
    pub fn delete(&self, actor: &Actor, number: &InvoiceNumber) -> AppResult<()> {
        let owner_id = self
            .store
            .invoices
            .get(number)
            .map(|entry| entry.owner_id)
            .ok_or_else(|| AppError::NotFound(format!("invoice {number}")))?;
        OwnershipPolicy::check_owned(actor, owner_id, Operation::Delete, true)
            .into_result(&format!("invoice {number}"))?;

        let removed = self.store.invoices.remove(number);
        if let Some((_, invoice)) = removed
            && let Some(quote_number) = invoice.quote
            && let Some(mut quote) = self.store.quotes.get_mut(&quote_number)
        {
            quote.invoice = None;
            quote.updated_at = Utc::now();
        }
        tracing::debug!(number = %number, "invoice deleted");
        Ok(())
    }

    /// Transitions an invoice's stored status.
    ///
    /// Marking a paid invoice paid again is accepted and leaves `paid_at`
    /// untouched.
    pub fn transition(
        &self,
        actor: &Actor,
        number: &InvoiceNumber,
        to: InvoiceStatus,
    ) -> AppResult<Invoice> {
        let mut entry = self
            .store
            .invoices
            .get_mut(number)
            .ok_or_else(|| AppError::NotFound(format!("invoice {number}")))?;
        OwnershipPolicy::check_owned(actor, entry.owner_id, Operation::Transition, true)
            .into_result(&format!("invoice {number}"))?;

        let action =
            InvoiceLifecycle::transition(&entry, to, Utc::now()).map_err(AppError::from)?;
        entry.status = action.new_status;
        entry.paid_at = action.paid_at;
        entry.updated_at = Utc::now();
        tracing::debug!(number = %number, status = %to, "invoice transitioned");
        Ok(entry.clone())
    }

    fn ensure_customer_exists(&self, customer_id: CustomerId) -> AppResult<()> {
        if self.store.customers.contains_key(&customer_id) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("customer {customer_id}")))
        }
    }
}
