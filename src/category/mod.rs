//! Categories used to label income and expense transactions.

mod domain;

pub use domain::{Category, CategoryId, CategoryName, categories_of_type};
