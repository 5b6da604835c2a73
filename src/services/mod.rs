pub mod customers;
pub mod invoices;
pub mod notices;
pub mod orders;
pub mod products;

pub use customers::CustomerService;
pub use invoices::InvoiceService;
pub use notices::NoticeService;
pub use orders::OrderService;
pub use products::ProductService;
