//! Pagination state controller.
//!
//! Tracks the active page of a list whose items are rendered elsewhere,
//! decides which navigation moves are legal and notifies the host once per
//! visible page change. Page-size changes keep the first visible item on
//! screen instead of jumping back to the first page.

pub mod events;
pub mod options;

pub use events::{PageEvent, PageView, PaginatorInput};
pub use options::DEFAULT_PAGE_SIZE;

use crate::coerce::{coerce_bool, coerce_number, coerce_number_list};
use crate::config::PaginatorConfig;
use crate::intl::{IntlSubscription, PaginatorIntl};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Synchronous page-change listener.
pub type PageCallback = Box<dyn Fn(&PageEvent) + Send + Sync>;

/// Page index, page size, item count and page-size options of one list.
pub struct PaginationState {
    /// Current page (0-based)
    page_index: usize,

    /// Items per page; 0 means unset, or disabled once initialized
    page_size: usize,

    /// Total number of items
    length: usize,

    page_size_options: Vec<usize>,
    displayed_page_size_options: Vec<usize>,
    hide_page_size: bool,
    show_first_last_buttons: bool,

    /// Derivation is suppressed until `initialize` runs
    initialized: bool,

    intl: Arc<PaginatorIntl>,
    intl_subscription: Option<IntlSubscription>,

    callbacks: Vec<PageCallback>,
    event_sender: Option<mpsc::UnboundedSender<PageEvent>>,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::with_intl(PaginatorIntl::shared())
    }

    /// Create a state bound to a shared label provider.
    pub fn with_intl(intl: Arc<PaginatorIntl>) -> Self {
        Self {
            page_index: 0,
            page_size: 0,
            length: 0,
            page_size_options: Vec::new(),
            displayed_page_size_options: Vec::new(),
            hide_page_size: false,
            show_first_last_buttons: false,
            initialized: false,
            intl,
            intl_subscription: None,
            callbacks: Vec::new(),
            event_sender: None,
        }
    }

    /// Create a state pre-populated with configured defaults.
    pub fn with_config(config: &PaginatorConfig, intl: Arc<PaginatorIntl>) -> Self {
        let mut state = Self::with_intl(intl);
        if let Some(page_size) = config.page_size {
            state.page_size = page_size;
        }
        state.page_size_options = config.page_size_options.clone();
        state.hide_page_size = config.hide_page_size;
        state.show_first_last_buttons = config.show_first_last_buttons;
        state
    }

    /// Forward page events into a channel as well as to callbacks.
    pub fn with_event_sender(mut self, sender: mpsc::UnboundedSender<PageEvent>) -> Self {
        self.event_sender = Some(sender);
        self
    }

    /// Register a page-change listener.
    pub fn on_page<F>(&mut self, callback: F)
    where
        F: Fn(&PageEvent) + Send + Sync + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// One-time transition to the initialized state.
    ///
    /// Resolves the default page size, derives the displayed options and
    /// subscribes to label changes. Calling it again does nothing.
    pub fn initialize(&mut self) -> PageView {
        if self.initialized {
            warn!("Pagination state already initialized; ignoring");
            return self.view();
        }

        self.initialized = true;
        self.recompute_displayed_options();
        self.intl_subscription = Some(self.intl.subscribe());

        debug!(
            page_size = self.page_size,
            options = ?self.displayed_page_size_options,
            "Pagination state initialized"
        );
        self.view()
    }

    /// Release the label subscription. Returns whether anything was released.
    pub fn dispose(&mut self) -> bool {
        match self.intl_subscription.take() {
            Some(subscription) => {
                drop(subscription);
                debug!("Released label subscription");
                true
            }
            None => false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Drain label notifications; `true` means the host should re-render.
    pub fn poll_label_changes(&mut self) -> bool {
        match self.intl_subscription.as_mut() {
            Some(subscription) => subscription.drain() > 0,
            None => false,
        }
    }

    pub fn intl(&self) -> &Arc<PaginatorIntl> {
        &self.intl
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    pub fn displayed_page_size_options(&self) -> &[usize] {
        &self.displayed_page_size_options
    }

    pub fn hide_page_size(&self) -> bool {
        self.hide_page_size
    }

    pub fn show_first_last_buttons(&self) -> bool {
        self.show_first_last_buttons
    }

    /// Zero-based index of the last page.
    ///
    /// This is not a count: an empty list yields `-1`, as does a page size of
    /// zero, since no page is addressable then.
    pub fn number_of_pages(&self) -> i64 {
        if self.page_size == 0 {
            return -1;
        }
        let pages = self.length.div_ceil(self.page_size);
        i64::try_from(pages).unwrap_or(i64::MAX) - 1
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_index >= 1 && self.page_size != 0
    }

    pub fn has_next_page(&self) -> bool {
        let page_index = i64::try_from(self.page_index).unwrap_or(i64::MAX);
        page_index < self.number_of_pages() && self.page_size != 0
    }

    /// Item indices shown on the current page, empty past the end.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.page_index.saturating_mul(self.page_size).min(self.length);
        let end = start.saturating_add(self.page_size).min(self.length);
        start..end
    }

    pub fn view(&self) -> PageView {
        PageView {
            page_index: self.page_index,
            page_size: self.page_size,
            length: self.length,
            last_page_index: self.number_of_pages(),
            has_previous_page: self.has_previous_page(),
            has_next_page: self.has_next_page(),
            displayed_page_size_options: self.displayed_page_size_options.clone(),
            hide_page_size: self.hide_page_size,
            show_first_last_buttons: self.show_first_last_buttons,
        }
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        let previous = self.page_index;
        self.page_index += 1;
        self.emit_page_event(previous);
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous_page() {
            return false;
        }
        let previous = self.page_index;
        self.page_index -= 1;
        self.emit_page_event(previous);
        true
    }

    pub fn first_page(&mut self) -> bool {
        if !self.has_previous_page() {
            return false;
        }
        let previous = self.page_index;
        self.page_index = 0;
        self.emit_page_event(previous);
        true
    }

    pub fn last_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        let previous = self.page_index;
        // has_next_page guarantees a non-negative last index here
        self.page_index = usize::try_from(self.number_of_pages()).unwrap_or(previous);
        self.emit_page_event(previous);
        true
    }

    /// Switch to `new_size` items per page, keeping the first previously
    /// visible item on screen.
    ///
    /// Always emits, even when the size is unchanged.
    pub fn change_page_size(&mut self, new_size: usize) -> PageEvent {
        let previous = self.page_index;
        let start_index = self.page_index.saturating_mul(self.page_size);
        self.page_index = start_index.checked_div(new_size).unwrap_or(0);
        self.set_page_size(new_size);
        self.emit_page_event(previous)
    }

    /// Assign the page index without validation or notification.
    pub fn set_page_index(&mut self, page_index: usize) -> PageView {
        self.page_index = page_index;
        self.view()
    }

    /// Assign the item count without validation or notification.
    ///
    /// Shrinking the length can leave `page_index` past the last page; see
    /// [`PageView::is_out_of_range`].
    pub fn set_length(&mut self, length: usize) -> PageView {
        self.length = length;
        self.view()
    }

    pub fn set_page_size(&mut self, page_size: usize) -> PageView {
        self.page_size = page_size;
        self.recompute_displayed_options();
        self.view()
    }

    pub fn set_page_size_options(&mut self, options: Vec<usize>) -> PageView {
        self.page_size_options = options;
        self.recompute_displayed_options();
        self.view()
    }

    pub fn set_hide_page_size(&mut self, hide: bool) -> PageView {
        self.hide_page_size = hide;
        self.view()
    }

    pub fn set_show_first_last_buttons(&mut self, show: bool) -> PageView {
        self.show_first_last_buttons = show;
        self.view()
    }

    /// Apply a raw host update, coercing it to the field's domain first.
    pub fn apply(&mut self, input: PaginatorInput) -> PageView {
        match input {
            PaginatorInput::PageIndex(value) => self.set_page_index(coerce_number(&value)),
            PaginatorInput::Length(value) => self.set_length(coerce_number(&value)),
            PaginatorInput::PageSize(value) => self.set_page_size(coerce_number(&value)),
            PaginatorInput::PageSizeOptions(value) => {
                self.set_page_size_options(coerce_number_list(&value))
            }
            PaginatorInput::HidePageSize(value) => self.set_hide_page_size(coerce_bool(&value)),
            PaginatorInput::ShowFirstLastButtons(value) => {
                self.set_show_first_last_buttons(coerce_bool(&value))
            }
        }
    }

    fn recompute_displayed_options(&mut self) {
        if !self.initialized {
            return;
        }

        self.page_size = options::resolve_page_size(self.page_size, &self.page_size_options);
        self.displayed_page_size_options =
            options::displayed_options(&self.page_size_options, self.page_size);
    }

    fn emit_page_event(&self, previous_page_index: usize) -> PageEvent {
        let event = PageEvent {
            page_index: self.page_index,
            previous_page_index,
            page_size: self.page_size,
            length: self.length,
        };

        debug!(
            page_index = event.page_index,
            previous_page_index = event.previous_page_index,
            page_size = event.page_size,
            length = event.length,
            "Page changed"
        );

        for callback in &self.callbacks {
            callback(&event);
        }

        if let Some(ref sender) = self.event_sender {
            if sender.send(event).is_err() {
                debug!("Page event receiver dropped");
            }
        }

        event
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PaginationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationState")
            .field("page_index", &self.page_index)
            .field("page_size", &self.page_size)
            .field("length", &self.length)
            .field("page_size_options", &self.page_size_options)
            .field("displayed_page_size_options", &self.displayed_page_size_options)
            .field("hide_page_size", &self.hide_page_size)
            .field("show_first_last_buttons", &self.show_first_last_buttons)
            .field("initialized", &self.initialized)
            .field("subscribed", &self.intl_subscription.is_some())
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn paged(length: usize, page_size: usize, page_index: usize) -> PaginationState {
        let mut state = PaginationState::new();
        state.set_length(length);
        state.set_page_size(page_size);
        state.set_page_index(page_index);
        state.initialize();
        state
    }

    fn recorded(state: &mut PaginationState) -> Arc<Mutex<Vec<PageEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        state.on_page(move |event| sink.lock().unwrap().push(*event));
        events
    }

    #[test]
    fn test_number_of_pages_is_last_index() {
        assert_eq!(paged(95, 10, 0).number_of_pages(), 9);
        assert_eq!(paged(100, 10, 0).number_of_pages(), 9);
        assert_eq!(paged(101, 10, 0).number_of_pages(), 10);
        assert_eq!(paged(1, 10, 0).number_of_pages(), 0);
        assert_eq!(paged(0, 10, 0).number_of_pages(), -1);
    }

    #[test]
    fn test_empty_list_has_no_navigation() {
        let mut state = paged(0, 10, 0);
        assert!(!state.has_next_page());
        assert!(!state.has_previous_page());
        assert!(!state.next_page());
        assert!(!state.last_page());
    }

    #[test]
    fn test_has_page_queries() {
        let state = paged(95, 10, 4);
        assert!(state.has_next_page());
        assert!(state.has_previous_page());

        let last = paged(95, 10, 9);
        assert!(!last.has_next_page());
        assert!(last.has_previous_page());
    }

    #[test]
    fn test_next_page_walks_to_the_end() {
        let mut state = paged(95, 10, 0);
        let events = recorded(&mut state);

        for expected in 1..=9 {
            assert!(state.next_page());
            assert_eq!(state.page_index(), expected);
        }
        assert!(!state.has_next_page());
        assert!(!state.next_page());
        assert_eq!(state.page_index(), 9);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 9);
        assert_eq!(events[8].page_index, 9);
        assert_eq!(events[8].previous_page_index, 8);
        assert_eq!(events[8].length, 95);
    }

    #[test]
    fn test_previous_page() {
        let mut state = paged(95, 10, 2);
        let events = recorded(&mut state);

        assert!(state.previous_page());
        assert!(state.previous_page());
        assert!(!state.previous_page());
        assert_eq!(state.page_index(), 0);
        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_first_and_last_are_idempotent() {
        let mut state = paged(95, 10, 0);
        let events = recorded(&mut state);

        assert!(!state.first_page());
        assert!(events.lock().unwrap().is_empty());

        assert!(state.last_page());
        assert_eq!(state.page_index(), 9);
        assert!(!state.last_page());

        assert!(state.first_page());
        assert_eq!(state.page_index(), 0);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].previous_page_index, 0);
        assert_eq!(events[0].page_index, 9);
        assert_eq!(events[1].page_index, 0);
    }

    #[test]
    fn test_disabled_page_size_blocks_navigation() {
        // Uninitialized states never resolve a default size.
        let mut state = PaginationState::new();
        state.set_length(100);
        state.set_page_index(3);
        let events = recorded(&mut state);

        assert_eq!(state.page_size(), 0);
        assert!(!state.has_next_page());
        assert!(!state.has_previous_page());
        assert!(!state.next_page());
        assert!(!state.previous_page());
        assert!(!state.first_page());
        assert!(!state.last_page());
        assert_eq!(state.page_index(), 3);
        assert_eq!(state.number_of_pages(), -1);
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_zero_option_disables_after_initialize() {
        let mut state = PaginationState::new();
        state.set_page_size_options(vec![0, 10]);
        state.set_length(30);
        state.initialize();

        assert_eq!(state.page_size(), 0);
        assert!(!state.next_page());
        assert_eq!(state.displayed_page_size_options(), &[0, 10]);
    }

    #[test]
    fn test_change_page_size_keeps_first_item_visible() {
        let mut state = paged(95, 10, 2);
        let event = state.change_page_size(5);

        assert_eq!(state.page_index(), 4);
        assert_eq!(state.page_size(), 5);
        assert_eq!(
            event,
            PageEvent { page_index: 4, previous_page_index: 2, page_size: 5, length: 95 }
        );
        assert_eq!(state.visible_range(), 20..25);
    }

    #[test]
    fn test_change_page_size_to_larger_size_floors() {
        let mut state = paged(95, 10, 3);
        state.change_page_size(25);
        // item 30 lives on page 1 of the 25-item layout
        assert_eq!(state.page_index(), 1);
    }

    #[test]
    fn test_change_page_size_from_disabled_starts_at_zero() {
        let mut state = PaginationState::new();
        state.set_page_index(7);
        state.set_length(100);
        state.change_page_size(20);
        assert_eq!(state.page_index(), 0);
        assert_eq!(state.page_size(), 20);
    }

    #[test]
    fn test_change_page_size_always_emits() {
        let mut state = paged(95, 10, 0);
        let events = recorded(&mut state);
        state.change_page_size(10);
        assert_eq!(events.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_change_page_size_updates_displayed_options() {
        let mut state = PaginationState::new();
        state.set_page_size_options(vec![10, 25]);
        state.initialize();
        state.change_page_size(15);
        assert_eq!(state.displayed_page_size_options(), &[10, 15, 25]);
    }

    #[test]
    fn test_displayed_options_sorted_with_current_size() {
        let mut state = PaginationState::new();
        state.set_page_size_options(vec![25, 10, 50]);
        state.set_page_size(10);
        state.initialize();
        assert_eq!(state.displayed_page_size_options(), &[10, 25, 50]);
    }

    #[test]
    fn test_default_page_size_when_nothing_configured() {
        let mut state = PaginationState::new();
        let view = state.initialize();
        assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(view.displayed_page_size_options, vec![50]);
    }

    #[test]
    fn test_default_page_size_takes_first_option() {
        let mut state = PaginationState::new();
        state.set_page_size_options(vec![20, 5]);
        state.initialize();
        assert_eq!(state.page_size(), 20);
        assert_eq!(state.displayed_page_size_options(), &[5, 20]);
    }

    #[test]
    fn test_derivation_suppressed_before_initialize() {
        let mut state = PaginationState::new();
        state.set_page_size_options(vec![5, 10]);
        state.set_page_size(7);
        assert!(state.displayed_page_size_options().is_empty());

        state.initialize();
        assert_eq!(state.displayed_page_size_options(), &[5, 7, 10]);

        state.set_page_size_options(vec![100, 3]);
        assert_eq!(state.displayed_page_size_options(), &[3, 7, 100]);
    }

    #[test]
    fn test_setting_zero_after_initialize_resolves_default() {
        let mut state = PaginationState::new();
        state.set_page_size_options(vec![25, 10]);
        state.initialize();
        let view = state.set_page_size(0);
        assert_eq!(view.page_size, 25);
    }

    #[test]
    fn test_direct_assignment_is_not_validated() {
        let mut state = paged(95, 10, 9);
        let events = recorded(&mut state);

        let view = state.set_length(30);
        assert_eq!(view.page_index, 9);
        assert_eq!(view.last_page_index, 2);
        assert!(view.is_out_of_range());
        assert!(!view.has_next_page);

        state.set_page_index(40);
        assert_eq!(state.page_index(), 40);
        assert!(events.lock().unwrap().is_empty());

        // Navigation still works back into range.
        assert!(state.first_page());
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn test_emptied_list_reports_out_of_range() {
        let mut state = paged(95, 10, 9);
        let view = state.set_length(0);

        assert_eq!(view.page_index, 9);
        assert_eq!(view.last_page_index, -1);
        assert!(view.is_out_of_range());
        assert!(!view.has_next_page);
    }

    #[test]
    fn test_huge_coerced_index_is_out_of_range() {
        let mut state = paged(95, 10, 0);
        let view = state.apply(PaginatorInput::PageIndex(json!("1e30")));

        assert_eq!(view.page_index, usize::MAX);
        assert!(view.is_out_of_range());
        assert!(!view.has_next_page);
        assert_eq!(
            state.intl().range_label(view.page_index, view.page_size, view.length),
            format!("{} – {} of 95", usize::MAX, usize::MAX)
        );
    }

    #[test]
    fn test_apply_coerces_raw_input() {
        let mut state = PaginationState::new();
        state.initialize();

        state.apply(PaginatorInput::Length(json!("95")));
        state.apply(PaginatorInput::PageSizeOptions(json!(["25", 10, "bogus"])));
        state.apply(PaginatorInput::PageSize(json!(10.7)));
        state.apply(PaginatorInput::PageIndex(json!(-3)));
        state.apply(PaginatorInput::HidePageSize(json!("")));
        let view = state.apply(PaginatorInput::ShowFirstLastButtons(json!("false")));

        assert_eq!(view.length, 95);
        assert_eq!(view.page_size, 10);
        assert_eq!(view.page_index, 0);
        assert_eq!(view.displayed_page_size_options, vec![0, 10, 25]);
        assert!(view.hide_page_size);
        assert!(!view.show_first_last_buttons);
    }

    #[test]
    fn test_event_sender_receives_events_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut state = PaginationState::new().with_event_sender(tx);
        state.set_length(95);
        state.set_page_size(10);
        state.initialize();

        state.next_page();
        state.next_page();
        state.change_page_size(5);
        state.previous_page();

        let indices: Vec<usize> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|event| event.page_index)
            .collect();
        assert_eq!(indices, vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_callback_sees_completed_state() {
        let mut state = paged(95, 10, 2);
        let events = recorded(&mut state);
        state.change_page_size(5);
        let event = events.lock().unwrap()[0];
        assert_eq!((event.page_index, event.page_size), (4, 5));
    }

    #[test]
    fn test_initialize_twice_is_ignored() {
        let intl = PaginatorIntl::shared();
        let mut state = PaginationState::with_intl(intl.clone());
        state.initialize();
        state.set_page_size(30);
        state.initialize();

        assert_eq!(state.page_size(), 30);
        assert_eq!(intl.subscriber_count(), 1);
    }

    #[test]
    fn test_label_subscription_lifecycle() {
        let intl = PaginatorIntl::shared();
        let mut state = PaginationState::with_intl(intl.clone());
        assert_eq!(intl.subscriber_count(), 0);
        assert!(!state.poll_label_changes());

        state.initialize();
        assert_eq!(intl.subscriber_count(), 1);

        intl.update(|labels| labels.items_per_page = "Per page:".to_string());
        assert!(state.poll_label_changes());
        assert!(!state.poll_label_changes());

        assert!(state.dispose());
        assert_eq!(intl.subscriber_count(), 0);
        assert!(!state.dispose());

        intl.notify_changed();
        assert!(!state.poll_label_changes());
    }

    #[test]
    fn test_with_config_applies_defaults() {
        let config = PaginatorConfig {
            page_size: Some(25),
            page_size_options: vec![10, 50],
            hide_page_size: true,
            show_first_last_buttons: true,
        };
        let mut state = PaginationState::with_config(&config, PaginatorIntl::shared());
        let view = state.initialize();

        assert_eq!(view.page_size, 25);
        assert_eq!(view.displayed_page_size_options, vec![10, 25, 50]);
        assert!(view.hide_page_size);
        assert!(view.show_first_last_buttons);
    }

    #[test]
    fn test_visible_range() {
        assert_eq!(paged(95, 10, 0).visible_range(), 0..10);
        assert_eq!(paged(95, 10, 9).visible_range(), 90..95);
        assert_eq!(paged(95, 10, 20).visible_range(), 95..95);
        assert_eq!(paged(0, 10, 0).visible_range(), 0..0);
    }
}
