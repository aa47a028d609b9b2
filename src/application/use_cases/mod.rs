mod categories;
mod products;

pub use categories::{
    CreateCategoryUseCase, DeleteCategoryUseCase, GetCategoryUseCase, ListCategoriesUseCase,
    UpdateCategoryUseCase,
};
pub use products::{
    CreateProductUseCase, DeleteProductUseCase, GetProductUseCase, ListProductsUseCase,
    UpdateProductUseCase,
};
