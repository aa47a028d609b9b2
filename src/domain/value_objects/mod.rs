mod category_id;
mod product_id;

pub use category_id::CategoryId;
pub use product_id::ProductId;
