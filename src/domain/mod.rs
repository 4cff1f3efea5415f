pub mod page;
pub mod result_record;
pub mod search_query;
pub mod selector_catalog;
pub mod session;

pub use page::*;
pub use result_record::*;
pub use search_query::*;
pub use selector_catalog::*;
pub use session::*;
