//! The concurrent in-process store.
//!
//! Collections live in `DashMap`s keyed by their natural identifier. Sequence
//! counters are atomic per scope and never rewind, so a deleted document's
//! number is never reissued. Two short critical sections are guarded by
//! mutexes: queue position changes (the dense 1..N permutation must change
//! atomically) and SKU uniqueness checks.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use opsdesk_core::customer::Customer;
use opsdesk_core::inventory::InventoryItem;
use opsdesk_core::invoice::Invoice;
use opsdesk_core::numbering::{self, MAX_ALLOCATION_ATTEMPTS, SequenceScope};
use opsdesk_core::quote::Quote;
use opsdesk_core::workorder::WorkOrder;
use opsdesk_shared::types::{CustomerId, InvoiceNumber, ItemId, QuoteNumber, WorkOrderNumber};
use opsdesk_shared::{AppError, AppResult};

/// The shared in-process store behind every repository.
#[derive(Debug)]
pub struct MemStore {
    /// Customers by ID.
    pub customers: DashMap<CustomerId, Customer>,
    /// Quotes by number.
    pub quotes: DashMap<QuoteNumber, Quote>,
    /// Invoices by number.
    pub invoices: DashMap<InvoiceNumber, Invoice>,
    /// Work orders by number.
    pub work_orders: DashMap<WorkOrderNumber, WorkOrder>,
    /// Inventory items by ID.
    pub items: DashMap<ItemId, InventoryItem>,
    /// Monotonic sequence counters by scope key.
    sequences: DashMap<String, AtomicU64>,
    /// Guards queue position changes.
    queue_lock: Mutex<()>,
    /// Guards SKU uniqueness checks.
    sku_lock: Mutex<()>,
    /// Retry bound for number allocation, from `BusinessConfig`.
    allocation_attempts: u32,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    /// Creates an empty store with the default allocation retry bound.
    #[must_use]
    pub fn new() -> Self {
        Self::with_attempts(MAX_ALLOCATION_ATTEMPTS)
    }

    /// Creates an empty store with a configured allocation retry bound.
    #[must_use]
    pub fn with_attempts(allocation_attempts: u32) -> Self {
        Self {
            customers: DashMap::new(),
            quotes: DashMap::new(),
            invoices: DashMap::new(),
            work_orders: DashMap::new(),
            items: DashMap::new(),
            sequences: DashMap::new(),
            queue_lock: Mutex::new(()),
            sku_lock: Mutex::new(()),
            allocation_attempts,
        }
    }

    /// Atomically reserves the next sequence value for a scope key.
    ///
    /// Counters start at 1 and never rewind, even when documents are deleted.
    pub fn reserve(&self, scope_key: &str) -> u64 {
        self.sequences
            .entry(scope_key.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::SeqCst)
            + 1
    }

    /// Allocates the next unique document number in `scope`.
    ///
    /// Combines the atomic counter with a uniqueness re-check against the
    /// relevant collection, retried a bounded number of times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocationExhausted`] when every candidate was
    /// already taken.
    pub fn allocate(&self, scope: SequenceScope) -> AppResult<String> {
        let key = scope.key();
        let number = numbering::allocate_with(
            scope,
            self.allocation_attempts,
            || self.reserve(&key),
            |candidate| self.number_in_use(scope, candidate),
        )?;
        Ok(number)
    }

    fn number_in_use(&self, scope: SequenceScope, candidate: &str) -> bool {
        match scope {
            SequenceScope::Quote => self.quotes.contains_key(&QuoteNumber::from(candidate)),
            SequenceScope::WorkOrder => self
                .work_orders
                .contains_key(&WorkOrderNumber::from(candidate)),
            SequenceScope::Invoice { .. } => {
                self.invoices.contains_key(&InvoiceNumber::from(candidate))
            }
            SequenceScope::Sku => self
                .items
                .iter()
                .any(|item| item.auto_sku.as_str() == candidate),
        }
    }

    /// Returns true when `sku` is already carried by an item other than
    /// `except`, in any of the three SKU fields.
    ///
    /// Callers must hold the SKU guard across the check and the write.
    pub fn sku_in_use(&self, sku: &str, except: Option<ItemId>) -> bool {
        self.items.iter().any(|item| {
            except != Some(item.id)
                && (item.sku.as_deref() == Some(sku)
                    || item.supplier_sku.as_deref() == Some(sku)
                    || item.auto_sku.as_str() == sku)
        })
    }

    /// Acquires the queue position guard.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the guard is poisoned.
    pub fn queue_guard(&self) -> AppResult<std::sync::MutexGuard<'_, ()>> {
        self.queue_lock
            .lock()
            .map_err(|_| AppError::Internal("work queue lock poisoned".to_string()))
    }

    /// Acquires the SKU uniqueness guard.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the guard is poisoned.
    pub fn sku_guard(&self) -> AppResult<std::sync::MutexGuard<'_, ()>> {
        self.sku_lock
            .lock()
            .map_err(|_| AppError::Internal("sku lock poisoned".to_string()))
    }
}
