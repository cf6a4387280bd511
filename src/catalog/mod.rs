pub mod feed;
pub mod views;

pub use feed::{Catalog, CatalogError};
pub use views::ViewCounts;
