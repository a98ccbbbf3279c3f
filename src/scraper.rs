use crate::parser::{ParseError, parse_listing_page, parse_result_count};
use crate::types::{School, SchoolType};

use reqwest::blocking::Client;
use std::time::Duration;

/// Entries per results page, fixed by the site.
pub const PAGE_SIZE: usize = 20;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// The transport seam. One synchronous GET per call; no retries.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        log::debug!("GET {url}");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.text()?)
    }
}

pub struct SchoolScraper<F = HttpFetcher> {
    fetcher: F,
    base_url: String,
}

impl SchoolScraper {
    pub fn new() -> Result<Self, ScraperError> {
        Ok(SchoolScraper {
            fetcher: HttpFetcher::new()?,
            base_url: crate::BASE_URL.to_string(),
        })
    }
}

impl<F: PageFetcher> SchoolScraper<F> {
    pub fn with_fetcher(fetcher: F, base_url: impl Into<String>) -> Self {
        SchoolScraper {
            fetcher,
            base_url: base_url.into(),
        }
    }

    pub fn page_url(&self, school_type: SchoolType, start: usize) -> String {
        format!(
            "{}/type/?t={}&start={}",
            self.base_url,
            school_type.slug(),
            start
        )
    }

    /// Crawls every listing page for one category and returns the records
    /// in page and in-page order. The result count comes from the first
    /// page; if the site's count drifts between requests, whatever the
    /// pages actually yield is kept as-is.
    pub fn list_schools(&self, school_type: SchoolType) -> Result<Vec<School>, ScraperError> {
        let first = self.fetcher.fetch(&self.page_url(school_type, 0))?;
        let total = parse_result_count(&first)?;
        let pages = page_count(total);
        log::debug!("{total} listings for {school_type:?}, {pages} pages");

        let mut schools = Vec::new();
        for page in 0..pages {
            let html = self
                .fetcher
                .fetch(&self.page_url(school_type, page * PAGE_SIZE))?;
            schools.extend(parse_listing_page(&html)?);
        }

        Ok(schools)
    }
}

pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}
