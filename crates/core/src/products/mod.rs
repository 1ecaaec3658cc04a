//! Products module - the investable catalog and its funding tracker.

mod products_model;
mod products_service;
mod products_traits;


pub use products_model::{NewProduct, Product, ProductStatus, ProductUpdate};
pub use products_service::ProductService;
pub use products_traits::{ProductRepositoryTrait, ProductServiceTrait};
