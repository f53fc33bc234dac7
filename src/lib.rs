pub mod date_resolver;
pub mod digest_store;
pub mod source;
pub mod types;

pub use date_resolver::{news_date_for_anchor, parse_news_date, window_for_news_date, AnchorWindow};
pub use digest_store::{articles_from_json, DigestStore};
pub use source::source_from_url;
pub use types::*;
