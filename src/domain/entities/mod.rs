mod category;
mod product;

pub use category::{Category, CategoryDbData, CategoryPatch};
pub use product::{NewProduct, Product, ProductDbData, ProductPatch};
