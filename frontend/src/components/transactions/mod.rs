pub mod filter_bar;
pub mod pagination_controls;
pub mod summary_bar;
pub mod transaction_form;
pub mod transaction_table;

pub use filter_bar::FilterBar;
pub use pagination_controls::PaginationControls;
pub use summary_bar::SummaryBar;
pub use transaction_form::TransactionForm;
pub use transaction_table::TransactionTable;
