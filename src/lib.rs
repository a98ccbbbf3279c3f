pub mod export;
pub mod parser;
pub mod scraper;
pub mod types;

pub use scraper::SchoolScraper;

pub(crate) const BASE_URL: &str = "http://www.skoleliste.eu";
