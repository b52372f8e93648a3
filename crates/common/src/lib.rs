pub mod paging;
pub mod types;

pub use paging::PagedResult;
pub use types::{CustomerId, OrderId, OrderItemId, ProductId};
