pub mod artist;
pub mod config;
pub mod prefix;
pub mod rate_limit;
pub mod token;

pub use artist::{Artist, CompletionRecord};
pub use config::{ConfigError, CrawlerConfig};
pub use prefix::{Prefix, PrefixError, ALPHABET};
pub use rate_limit::{RateLimitInfo, WindowRequest};
pub use token::CachedToken;
