use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    database::Collection,
    models::{Document, DocumentId},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub customer_id: DocumentId,
    pub product_ids: Vec<DocumentId>,
    /// Creation time, overwritten on every update.
    pub date: DateTime<Utc>,
}

impl Document for Order {
    const COLLECTION: Collection = Collection::Orders;
    const KIND: &'static str = "order";
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderRequest {
    pub id: Option<String>,
    pub customer_id: Option<String>,
    pub product_ids: Option<Vec<String>>,
}
