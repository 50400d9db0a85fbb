//! Page-size option normalization for the size selector.

/// Page size used when neither the host nor the option list provides one.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Resolve a falsy page size to the first option, or [`DEFAULT_PAGE_SIZE`].
pub fn resolve_page_size(page_size: usize, options: &[usize]) -> usize {
    if page_size != 0 {
        return page_size;
    }
    options.first().copied().unwrap_or(DEFAULT_PAGE_SIZE)
}

/// Options as shown to the user: the configured ones with `page_size`
/// injected when missing, sorted ascending.
pub fn displayed_options(options: &[usize], page_size: usize) -> Vec<usize> {
    let mut displayed = options.to_vec();
    if !displayed.contains(&page_size) {
        displayed.push(page_size);
    }
    displayed.sort_unstable();
    displayed
}
