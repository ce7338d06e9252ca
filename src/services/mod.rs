pub mod catalog_service;
pub mod document_service;
pub mod order_service;
pub mod password_service;
pub mod product_service;
pub mod reference_service;
pub mod user_service;
