use tracing::{debug, info, trace};

use crate::client::ApiRequest;
use crate::error::{Error, Result};
use crate::types::PolicyViolation;

/// Page size used when aggregating all pages
pub const DEFAULT_PAGE_SIZE: u32 = 100;

const VIOLATION_PATH: &str = "/api/v1/violation";

/// Lists policy violations through an [`ApiRequest`] transport
pub struct Client<R> {
    requester: R,
    page_size: u32,
    max_pages: Option<u32>,
}

impl<R: ApiRequest> Client<R> {
    /// Create a client with the default page size and no page bound
    pub fn new(requester: R) -> Self {
        Self {
            requester,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
        }
    }

    /// Page size used by [`Client::all_violations`]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Maximum number of non-empty pages [`Client::all_violations`] accepts.
    ///
    /// `Some(0)` accepts no non-empty page at all. Without a bound, a server
    /// that never returns an empty page keeps the loop running until the page
    /// number runs out; guarding against that is then up to the caller.
    pub fn max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetch one page of violations, in server order.
    ///
    /// An empty vector means the page is past the last violation.
    pub async fn violations(
        &self,
        suppressed: bool,
        page_number: u32,
        page_size: u32,
    ) -> Result<Vec<PolicyViolation>> {
        debug!(
            "Fetching violations page {} (size {}, suppressed {})",
            page_number, page_size, suppressed
        );
        let query = [
            ("suppressed", suppressed.to_string()),
            ("pageNumber", page_number.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        let body = self.requester.get(VIOLATION_PATH, &query).await?;
        let page: Vec<PolicyViolation> = serde_json::from_str(&body)?;
        trace!("Page {} has {} violations", page_number, page.len());
        Ok(page)
    }

    /// Fetch every page until the server returns an empty one.
    ///
    /// Pages are requested one after another; the first error aborts the
    /// whole listing.
    pub async fn all_violations(&self, suppressed: bool) -> Result<Vec<PolicyViolation>> {
        let mut all = Vec::new();
        let mut page_number = 1;

        loop {
            let page = self
                .violations(suppressed, page_number, self.page_size)
                .await?;
            if page.is_empty() {
                info!(
                    "Fetched {} violations from {} pages",
                    all.len(),
                    page_number - 1
                );
                return Ok(all);
            }
            if let Some(max_pages) = self.max_pages {
                if page_number > max_pages {
                    return Err(Error::PageLimit { max_pages });
                }
            }
            all.extend(page);
            page_number = next_page(page_number)?;
        }
    }
}

fn next_page(page_number: u32) -> Result<u32> {
    page_number
        .checked_add(1)
        .ok_or(Error::PageLimit { max_pages: u32::MAX })
}
