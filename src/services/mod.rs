pub mod contact_scraper;
pub mod droid;
pub mod extractor;
pub mod pager;
pub mod session_manager;
pub mod session_store;

#[cfg(test)]
pub(crate) mod testing;

pub use contact_scraper::*;
pub use droid::*;
pub use extractor::*;
pub use pager::*;
pub use session_manager::*;
pub use session_store::*;
