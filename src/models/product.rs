use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    database::Collection,
    models::{Document, DocumentId, has_text},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub is_template: bool,
    pub product_type: String,
    pub special_request: bool,
    pub base_price: Decimal,
    pub color: String,
    pub name: String,
    pub description: String,
    pub img_path: String,
    pub charm_id: Option<DocumentId>,
    pub beads_id: Option<DocumentId>,
    pub design_id: Option<DocumentId>,
    pub shape_id: Option<DocumentId>,
}

impl Document for Product {
    const COLLECTION: Collection = Collection::Products;
    const KIND: &'static str = "product";
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductRequest {
    pub id: Option<String>,
    pub is_template: Option<bool>,
    pub product_type: Option<String>,
    pub special_request: Option<bool>,
    pub base_price: Option<Decimal>,
    pub color: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub img_path: Option<String>,
    pub charm_id: Option<String>,
    pub beads_id: Option<String>,
    pub design_id: Option<String>,
    pub shape_id: Option<String>,
}

impl ProductRequest {
    pub fn required_fields(&self) -> [(&'static str, bool); 8] {
        [
            ("is_template", self.is_template.is_some()),
            ("product_type", has_text(&self.product_type)),
            ("special_request", self.special_request.is_some()),
            ("base_price", self.base_price.is_some()),
            ("color", has_text(&self.color)),
            ("name", has_text(&self.name)),
            ("description", has_text(&self.description)),
            ("img_path", has_text(&self.img_path)),
        ]
    }
}
