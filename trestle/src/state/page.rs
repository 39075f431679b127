//! Pagination axis: current page, page size, optional remote total.

use super::authority::Authority;
use crate::config::{PageConfig, Pagination};
use crate::events::PageSnapshot;

/// Pagination display state for the pagination widget.
///
/// Unlike [`PageSnapshot`], `current` here is clamped to the last page with
/// data and `total` is the effective row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub current: usize,
    pub page_size: usize,
    pub total: usize,
    pub show_size_changer: bool,
    pub page_size_options: Vec<usize>,
}

/// Pagination state behind its authority tag.
///
/// `current` is stored raw (as last requested); every read clamps it
/// against the effective total, so a data shrink never yields an invalid
/// page. The axis survives pagination being switched off and back on.
#[derive(Debug, Clone)]
pub struct PageState {
    enabled: bool,
    current: Authority<usize>,
    page_size: usize,
    total: Option<usize>,
    show_size_changer: bool,
    page_size_options: Vec<usize>,
}

impl PageState {
    pub fn init_from(pagination: &Pagination) -> Self {
        match pagination {
            Pagination::Off => Self {
                enabled: false,
                current: Authority::Internal(1),
                page_size: 10,
                total: None,
                show_size_changer: false,
                page_size_options: PageConfig::default().page_size_options,
            },
            Pagination::On(config) => {
                let value = config
                    .default_current
                    .or(config.current)
                    .unwrap_or(1)
                    .max(1);
                let current = if config.current.is_some() {
                    Authority::External(value)
                } else {
                    Authority::Internal(value)
                };
                Self {
                    enabled: true,
                    current,
                    page_size: config
                        .default_page_size
                        .or(config.page_size)
                        .unwrap_or(10)
                        .max(1),
                    total: config.total,
                    show_size_changer: config.show_size_changer,
                    page_size_options: config.page_size_options.clone(),
                }
            }
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The raw, unclamped page.
    pub fn current_raw(&self) -> usize {
        *self.current.get()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_external(&self) -> bool {
        self.current.is_external()
    }

    /// Row count the pager runs against: the remote total when configured
    /// and non-zero, else the local filtered length.
    pub fn effective_total(&self, local_len: usize) -> usize {
        match self.total {
            Some(total) if total > 0 => total,
            _ => local_len,
        }
    }

    /// `current` clamped into `[1, last page with data]`.
    pub fn clamped_current(&self, effective_total: usize) -> usize {
        let last = effective_total.div_ceil(self.page_size).max(1);
        self.current_raw().clamp(1, last)
    }

    /// Request a page change. Zero keeps the prior page (floor 1). Commits
    /// through the authority tag; returns the attempted page for
    /// notifications.
    pub fn set_page(&mut self, requested: usize) -> usize {
        let attempted = if requested == 0 {
            self.current_raw().max(1)
        } else {
            requested
        };
        self.current.set_if_internal(attempted);
        attempted
    }

    /// Request a page-size change. The size always commits; `current`
    /// commits through the authority tag. Returns the attempted pair.
    pub fn set_page_size(&mut self, current: usize, page_size: usize) -> (usize, usize) {
        self.page_size = page_size.max(1);
        let attempted = current.max(1);
        self.current.set_if_internal(attempted);
        (attempted, self.page_size)
    }

    /// Jump back to the first page (filter changes do this). Commits through
    /// the authority tag.
    pub fn reset_to_first(&mut self) {
        self.current.set_if_internal(1);
    }

    /// Notification payload with the committed `current`.
    pub fn snapshot(&self) -> Option<PageSnapshot> {
        self.snapshot_with(self.current_raw())
    }

    /// Notification payload with an attempted `current` (which an external
    /// authority may have refused to commit).
    pub fn snapshot_with(&self, current: usize) -> Option<PageSnapshot> {
        self.enabled.then(|| PageSnapshot {
            current,
            page_size: self.page_size,
            total: self.total,
        })
    }

    /// Display state for the pagination widget; `None` when disabled or
    /// there is nothing to page.
    pub fn view(&self, local_len: usize) -> Option<PageView> {
        if !self.enabled {
            return None;
        }
        let total = self.effective_total(local_len);
        if total == 0 {
            return None;
        }
        Some(PageView {
            current: self.clamped_current(total),
            page_size: self.page_size,
            total,
            show_size_changer: self.show_size_changer,
            page_size_options: self.page_size_options.clone(),
        })
    }

    /// Merge configured fields over state on reconcile. Configured fields
    /// are authoritative for what they specify; absent fields keep state.
    /// Switching pagination off keeps the axis values for a later re-enable.
    pub fn reconcile(&mut self, pagination: &Pagination) {
        match pagination {
            Pagination::Off => self.enabled = false,
            Pagination::On(config) => {
                self.enabled = true;
                if let Some(size) = config.page_size {
                    self.page_size = size.max(1);
                }
                if let Some(total) = config.total {
                    self.total = Some(total);
                }
                self.show_size_changer = config.show_size_changer;
                self.page_size_options = config.page_size_options.clone();
                match config.current {
                    Some(current) => self.current = Authority::External(current.max(1)),
                    None => self.current.demote(),
                }
            }
        }
    }
}
