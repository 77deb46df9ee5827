pub mod config;
pub mod error;
pub mod language;
pub mod lookup;
pub mod record;
pub mod tokenize;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::lookup::daum::DaumProvider;
    pub use crate::lookup::{LookupOptions, MetadataProvider};
    pub use crate::record::*;
}
