pub mod customer;
pub mod invoice;
pub mod notice;
pub mod order;
pub mod order_item;
pub mod product;

pub use order::OrderStatus;
pub use invoice::InvoiceStatus;
pub use notice::{NoticePriority, NoticeStatus};
