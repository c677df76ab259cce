pub mod aggregate;
pub mod browse;
pub mod catalog;
pub mod draft;
pub mod error;
pub mod grouping;
pub mod pagination;
pub mod preprocess;
pub mod search;
pub mod sort;
pub mod state;
pub mod stats;
pub mod store;
pub mod types;
pub mod view;
