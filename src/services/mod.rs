pub(crate) mod assembly;
pub(crate) mod checkpoint;
pub(crate) mod pull_service;
pub(crate) mod scraping;

pub use checkpoint::CheckpointResolver;
pub use pull_service::{PullRequest, PullService, PullSettings, PullSummary};
pub use scraping::ScrapingService;
