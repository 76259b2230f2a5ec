pub mod use_transaction_store;

pub use use_transaction_store::use_transaction_store;
