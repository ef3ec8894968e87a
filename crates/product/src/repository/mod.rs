pub mod command;
pub mod memory;
pub mod query;

const PRODUCT_COLUMNS: &str = "id, name, price, availability, created_at, updated_at";
