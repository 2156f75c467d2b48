//! Receipt list state: paged loading and print selection.

use std::collections::HashSet;

use receiptdesk_core::{DomainError, DomainResult, OrderId, find_by_id};

use crate::order::Order;

/// Rows fetched per "load more".
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Inclusive row range requested from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub from: usize,
    pub to: usize,
}

/// State behind the receipt list screen.
///
/// Rows arrive newest-first from the storage collaborator one page at a time.
/// Selection is tracked by order id and survives further page loads.
#[derive(Debug, Clone)]
pub struct OrderBrowser {
    page_size: usize,
    page: usize,
    orders: Vec<Order>,
    has_more: bool,
    selected: HashSet<OrderId>,
}

impl Default for OrderBrowser {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl OrderBrowser {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
            orders: Vec::new(),
            has_more: true,
            selected: HashSet::new(),
        }
    }

    /// Current (1-based) page.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Row range to request for a 1-based page.
    pub fn range_for(&self, page: usize) -> RowRange {
        let from = page.saturating_sub(1) * self.page_size;
        RowRange {
            from,
            to: from + self.page_size - 1,
        }
    }

    /// Advance to the next page and return the range to fetch, or `None` when
    /// everything is already loaded.
    pub fn load_more(&mut self) -> Option<RowRange> {
        if !self.has_more {
            return None;
        }
        self.page += 1;
        Some(self.range_for(self.page))
    }

    /// Start over from the first page (e.g. after a save).
    pub fn reload(&mut self) -> RowRange {
        self.page = 1;
        self.has_more = true;
        self.range_for(1)
    }

    /// Accept a fetched page. Page 1 replaces the list; later pages append.
    pub fn receive(&mut self, page: usize, rows: Vec<Order>, total_count: Option<usize>) {
        let range = self.range_for(page);
        let exhausted = rows.is_empty() || total_count.is_some_and(|count| range.to + 1 >= count);

        if page <= 1 {
            self.orders = rows;
        } else {
            self.orders.extend(rows);
        }

        if exhausted {
            self.has_more = false;
        }
    }

    /// A loaded order, e.g. to open it in the receipt form.
    pub fn find(&self, id: OrderId) -> DomainResult<&Order> {
        find_by_id(&self.orders, &id)
    }

    pub fn toggle_select(&mut self, id: OrderId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    pub fn is_selected(&self, id: OrderId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Selected orders in list order, ready to hand to the printer.
    pub fn selection_for_print(&self) -> DomainResult<Vec<Order>> {
        let picked: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| self.selected.contains(&o.id_typed()))
            .cloned()
            .collect();

        if picked.is_empty() {
            return Err(DomainError::validation("select at least one order to print"));
        }
        Ok(picked)
    }
}
