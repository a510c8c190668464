use crate::core::{
    ReaderError,
    RequestSequence,
    RequestTicket,
};

/// Tracks the current page of a book and hands out sequenced tickets for page
/// loads, so a response that arrives after a newer request is discarded.
#[derive(Debug, Clone)]
pub struct PageNavigator {
    book_id: String,
    current: Option<u32>,
    total_pages: Option<u32>,
    sequence: RequestSequence,
}

impl PageNavigator {
    pub fn new(book_id: impl Into<String>) -> Self {
        Self {
            book_id: book_id.into(),
            current: None,
            total_pages: None,
            sequence: RequestSequence::new(),
        }
    }

    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    pub fn current(&self) -> Option<u32> {
        self.current
    }

    /// Validates `page` against `[1, total_pages]` (the upper bound is unknown
    /// until the first page arrived) and issues a ticket for it.
    pub fn request(&self, page: u32) -> Result<RequestTicket, ReaderError> {
        if page < 1 {
            return Err(ReaderError::Validation(format!("page {page} is before the first page")));
        }
        if let Some(total) = self.total_pages {
            if page > total {
                return Err(ReaderError::Validation(format!(
                    "page {page} is past the last page ({total})"
                )));
            }
        }
        Ok(self.sequence.issue(page))
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.sequence.is_current(ticket)
    }

    /// Commits a completed load. Returns false for superseded tickets.
    pub fn accept(&mut self, ticket: &RequestTicket, total_pages: u32) -> bool {
        if !self.is_current(ticket) {
            log::warn!(
                "Dropping stale response for page {} (request #{})",
                ticket.page,
                ticket.seq
            );
            return false;
        }
        self.current = Some(ticket.page);
        self.total_pages = Some(total_pages);
        true
    }

    pub fn has_previous(&self) -> bool {
        self.current.is_some_and(|page| page > 1)
    }

    pub fn has_next(&self) -> bool {
        match (self.current, self.total_pages) {
            (Some(page), Some(total)) => page < total,
            _ => false,
        }
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.current.map(|p| p + 1)).flatten()
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous().then(|| self.current.map(|p| p - 1)).flatten()
    }

    pub fn header(&self) -> String {
        match (self.current, self.total_pages) {
            (Some(page), Some(total)) => format!("Page {page} of {total}"),
            _ => "Loading...".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(page: u32, total: u32) -> PageNavigator {
        let mut nav = PageNavigator::new("book-1");
        let ticket = nav.request(page).unwrap();
        assert!(nav.accept(&ticket, total));
        nav
    }

    #[test]
    fn test_bounds() {
        let nav = loaded(3, 5);
        assert!(nav.request(0).unwrap_err().is_validation());
        assert!(nav.request(6).unwrap_err().is_validation());
        assert!(nav.request(5).is_ok());
        assert!(nav.request(1).is_ok());
    }

    #[test]
    fn test_first_request_has_no_upper_bound() {
        let nav = PageNavigator::new("book-1");
        assert!(nav.request(40).is_ok());
        assert!(nav.request(0).is_err());
        assert_eq!(nav.header(), "Loading...");
        assert!(!nav.has_next() && !nav.has_previous());
    }

    #[test]
    fn test_edges_disable_controls() {
        let nav = loaded(1, 3);
        assert!(!nav.has_previous());
        assert!(nav.has_next());
        assert_eq!(nav.next_page(), Some(2));
        assert_eq!(nav.previous_page(), None);

        let nav = loaded(3, 3);
        assert!(nav.has_previous());
        assert!(!nav.has_next());
        assert_eq!(nav.next_page(), None);
        assert_eq!(nav.header(), "Page 3 of 3");
    }

    #[test]
    fn test_stale_ticket_rejected() {
        let mut nav = loaded(1, 10);
        let slow = nav.request(2).unwrap();
        let fast = nav.request(3).unwrap();

        assert!(nav.accept(&fast, 10));
        assert!(!nav.accept(&slow, 10));
        assert_eq!(nav.current(), Some(3));
    }
}
