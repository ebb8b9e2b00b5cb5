//! Quote repository.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use opsdesk_core::finance::FinanceCalculator;
use opsdesk_core::invoice::{Invoice, InvoiceStatus};
use opsdesk_core::numbering::SequenceScope;
use opsdesk_core::policy::{Actor, Operation, OwnershipPolicy};
use opsdesk_core::quote::{Quote, QuoteError, QuoteInput, QuoteLifecycle, QuotePatch, QuoteStatus};
use opsdesk_core::workorder::{Material, WorkOrder, WorkOrderStatus, WorkQueue};
use opsdesk_shared::config::BusinessConfig;
use opsdesk_shared::types::{
    CustomerId, InvoiceNumber, PageRequest, PageResponse, QuoteNumber, UserId, WorkOrderNumber,
};
use opsdesk_shared::{AppError, AppResult};

use crate::memory::MemStore;

/// Filter options for listing quotes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteFilter {
    /// Filter by displayed status (expired matches derived expiry).
    pub status: Option<QuoteStatus>,
    /// Filter by customer.
    pub customer_id: Option<CustomerId>,
    /// Case-insensitive substring match on number or title.
    pub search: Option<String>,
}

/// Quote repository for CRUD, transitions, and conversions.
#[derive(Debug, Clone)]
pub struct QuoteRepository {
    store: Arc<MemStore>,
    business: BusinessConfig,
}

impl QuoteRepository {
    /// Creates a new quote repository.
    #[must_use]
    pub fn new(store: Arc<MemStore>, business: BusinessConfig) -> Self {
        Self { store, business }
    }

    /// Lists quotes visible to the actor, newest first.
    pub fn list(
        &self,
        actor: &Actor,
        filter: &QuoteFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Quote>> {
        let scope = OwnershipPolicy::list_scope(actor);
        let today = Utc::now().date_naive();
        let needle = filter.search.as_deref().map(str::to_lowercase);

        let mut quotes: Vec<Quote> = self
            .store
            .quotes
            .iter()
            .filter(|entry| scope.is_none_or(|owner| entry.owner_id == owner))
            .filter(|entry| {
                filter
                    .status
                    .is_none_or(|status| QuoteLifecycle::display_status(entry, today) == status)
            })
            .filter(|entry| filter.customer_id.is_none_or(|id| entry.customer_id == id))
            .filter(|entry| {
                needle.as_deref().is_none_or(|needle| {
                    entry.number.as_str().to_lowercase().contains(needle)
                        || entry.title.to_lowercase().contains(needle)
                })
            })
            .map(|entry| entry.clone())
            .collect();

        quotes.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.number.as_str().cmp(a.number.as_str()))
        });

        let total = quotes.len() as u64;
        let data: Vec<Quote> = quotes
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();
        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Fetches one quote.
    pub fn get(&self, actor: &Actor, number: &QuoteNumber) -> AppResult<Quote> {
        let quote = self
            .store
            .quotes
            .get(number)
            .map(|entry| entry.clone())
            .ok_or_else(|| AppError::NotFound(format!("quote {number}")))?;
        OwnershipPolicy::check_owned(actor, quote.owner_id, Operation::Read, true)
            .into_result(&format!("quote {number}"))?;
        Ok(quote)
    }

    /// Creates a quote in draft status with a freshly allocated number.
    pub fn create(&self, actor: &Actor, input: QuoteInput) -> AppResult<Quote> {
        OwnershipPolicy::check_owned(actor, actor.id, Operation::Create, true)
            .into_result("quote")?;
        self.ensure_customer_exists(input.customer_id)?;

        let vat = self.business.vat_rate_percent;
        let totals = FinanceCalculator::compute(
            &input.line_items,
            input.labor_hours,
            input.hourly_rate.or(Some(self.business.default_hourly_rate)),
            vat,
        )?;

        let number = QuoteNumber::from(self.store.allocate(SequenceScope::Quote)?);
        let now = Utc::now();
        let quote = Quote {
            number: number.clone(),
            customer_id: input.customer_id,
            owner_id: actor.id,
            title: input.title,
            status: QuoteStatus::Draft,
            line_items: input.line_items,
            labor_hours: input.labor_hours,
            hourly_rate: input.hourly_rate,
            vat_rate_percent: vat,
            totals,
            work_order: None,
            invoice: None,
            valid_until: input.valid_until,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };

        self.store.quotes.insert(number.clone(), quote.clone());
        tracing::debug!(number = %number, "quote created");
        Ok(quote)
    }

    /// Applies a partial update, recomputing totals only when financial
    /// inputs changed.
    pub fn update(
        &self,
        actor: &Actor,
        number: &QuoteNumber,
        patch: QuotePatch,
    ) -> AppResult<Quote> {
        if let Some(customer_id) = patch.customer_id {
            self.ensure_customer_exists(customer_id)?;
        }

        let mut entry = self
            .store
            .quotes
            .get_mut(number)
            .ok_or_else(|| AppError::NotFound(format!("quote {number}")))?;
        OwnershipPolicy::check_owned(actor, entry.owner_id, Operation::Update, true)
            .into_result(&format!("quote {number}"))?;
        QuoteLifecycle::ensure_editable(entry.status).map_err(AppError::from)?;

        let recompute = patch.changes_financials();
        if let Some(title) = patch.title {
            entry.title = title;
        }
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
        if let Some(valid_until) = patch.valid_until {
            entry.valid_until = Some(valid_until);
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

    /// Deletes a quote. Admin only; linked quotes cannot be deleted.
    pub fn delete(&self, actor: &Actor, number: &QuoteNumber) -> AppResult<()> {
        let (owner_id, invoice_link) = self
            .store
            .quotes
            .get(number)
            .map(|entry| (entry.owner_id, entry.invoice.clone()))
            .ok_or_else(|| AppError::NotFound(format!("quote {number}")))?;
        OwnershipPolicy::check_owned(actor, owner_id, Operation::Delete, true)
            .into_result(&format!("quote {number}"))?;
        if let Some(invoice) = invoice_link {
            return Err(QuoteError::LinkedToInvoice(invoice).into());
        }

        self.store.quotes.remove(number);
        tracing::debug!(number = %number, "quote deleted");
        Ok(())
    }

    /// Transitions a quote's stored status.
    pub fn transition(
        &self,
        actor: &Actor,
        number: &QuoteNumber,
        to: QuoteStatus,
    ) -> AppResult<Quote> {
        let mut entry = self
            .store
            .quotes
            .get_mut(number)
            .ok_or_else(|| AppError::NotFound(format!("quote {number}")))?;
        OwnershipPolicy::check_owned(actor, entry.owner_id, Operation::Transition, true)
            .into_result(&format!("quote {number}"))?;
        QuoteLifecycle::transition(entry.status, to).map_err(AppError::from)?;

        entry.status = to;
        entry.updated_at = Utc::now();
        tracing::debug!(number = %number, status = %to, "quote transitioned");
        Ok(entry.clone())
    }

    /// Converts an approved quote into a work order assigned to `assignee_id`.
    ///
    /// Line items referencing inventory become the work order's material
    /// list; the quote's labor estimate carries over.
    pub fn convert_to_work_order(
        &self,
        actor: &Actor,
        number: &QuoteNumber,
        assignee_id: UserId,
    ) -> AppResult<WorkOrder> {
        let mut entry = self
            .store
            .quotes
            .get_mut(number)
            .ok_or_else(|| AppError::NotFound(format!("quote {number}")))?;
        OwnershipPolicy::check_owned(actor, entry.owner_id, Operation::Transition, true)
            .into_result(&format!("quote {number}"))?;
        QuoteLifecycle::ensure_convertible(entry.status).map_err(AppError::from)?;
        if let Some(existing) = &entry.work_order {
            return Err(QuoteError::AlreadyConverted(format!("work order {existing}")).into());
        }

        let wo_number = WorkOrderNumber::from(self.store.allocate(SequenceScope::WorkOrder)?);
        let materials: Vec<Material> = entry
            .line_items
            .iter()
            .filter_map(|line| {
                line.item_id.map(|item_id| Material {
                    item_id,
                    quantity: line.quantity,
                })
            })
            .collect();

        let now = Utc::now();
        let guard = self.store.queue_guard()?;
        let positions: Vec<u32> = self.store.work_orders.iter().map(|wo| wo.position).collect();
        let work_order = WorkOrder {
            number: wo_number.clone(),
            title: entry.title.clone(),
            description: entry.notes.clone(),
            customer_id: entry.customer_id,
            assignee_id,
            created_by: actor.id,
            status: WorkOrderStatus::Todo,
            priority: None,
            estimated_hours: entry.labor_hours,
            actual_hours: None,
            due_date: None,
            started_at: None,
            completed_at: None,
            position: WorkQueue::next_position(&positions),
            materials,
            created_at: now,
            updated_at: now,
        };
        self.store
            .work_orders
            .insert(wo_number.clone(), work_order.clone());
        drop(guard);

        entry.work_order = Some(wo_number.clone());
        entry.updated_at = now;
        tracing::info!(quote = %number, work_order = %wo_number, "quote converted to work order");
        Ok(work_order)
    }

    /// Converts an approved quote into a draft invoice.
    ///
    /// Financial inputs carry over unchanged, so the invoice opens with the
    /// same totals the customer approved.
    pub fn convert_to_invoice(
        &self,
        actor: &Actor,
        number: &QuoteNumber,
        due_date: Option<NaiveDate>,
    ) -> AppResult<Invoice> {
        let mut entry = self
            .store
            .quotes
            .get_mut(number)
            .ok_or_else(|| AppError::NotFound(format!("quote {number}")))?;
        OwnershipPolicy::check_owned(actor, entry.owner_id, Operation::Transition, true)
            .into_result(&format!("quote {number}"))?;
        QuoteLifecycle::ensure_convertible(entry.status).map_err(AppError::from)?;
        if let Some(existing) = &entry.invoice {
            return Err(QuoteError::AlreadyConverted(format!("invoice {existing}")).into());
        }

        let now = Utc::now();
        let year = now.date_naive().year();
        let inv_number =
            InvoiceNumber::from(self.store.allocate(SequenceScope::Invoice { year })?);

        let invoice = Invoice {
            number: inv_number.clone(),
            customer_id: entry.customer_id,
            owner_id: entry.owner_id,
            quote: Some(number.clone()),
            work_order: entry.work_order.clone(),
            status: InvoiceStatus::Draft,
            line_items: entry.line_items.clone(),
            labor_hours: entry.labor_hours,
            hourly_rate: entry.hourly_rate,
            vat_rate_percent: entry.vat_rate_percent,
            totals: entry.totals,
            due_date,
            paid_at: None,
            notes: entry.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.store
            .invoices
            .insert(inv_number.clone(), invoice.clone());

        entry.invoice = Some(inv_number.clone());
        entry.updated_at = now;
        tracing::info!(quote = %number, invoice = %inv_number, "quote converted to invoice");
        Ok(invoice)
    }

    fn ensure_customer_exists(&self, customer_id: CustomerId) -> AppResult<()> {
        if self.store.customers.contains_key(&customer_id) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("customer {customer_id}")))
        }
    }
}
