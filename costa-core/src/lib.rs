//! costa-core: catalog model, view derivation, and store boundary for the
//! Costa Tours catalog.

pub mod item;
pub mod query;
pub mod reorder;
pub mod store;

pub use item::{CatalogItem, Flag, Lang, Localized};
pub use query::{
    CategoryFilter, PriceBand, QueryCriteria, SearchField, SortDirection, SortKey, SortSpec,
    StatusFilter, query,
};
pub use reorder::{MoveDirection, ReorderAssignment, reorder};
pub use store::{CatalogStore, MemoryStore};
