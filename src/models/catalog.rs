use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    database::Collection,
    error::Result,
    models::{Document, has_text, require},
};

/// Bead, charm, design and shape documents: standalone catalog attributes
/// that products point at.
pub trait CatalogItem: Document {
    type Request: DeserializeOwned + Send + 'static;

    fn request_id(request: &Self::Request) -> Option<&str>;

    /// Builds the document, failing with the full list of missing fields.
    fn from_request(request: Self::Request) -> Result<Self>;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bead {
    pub name: String,
    pub color: String,
    pub description: String,
    pub img_path: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BeadRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub img_path: Option<String>,
}

impl Document for Bead {
    const COLLECTION: Collection = Collection::Beads;
    const KIND: &'static str = "bead";
}

impl CatalogItem for Bead {
    type Request = BeadRequest;

    fn request_id(request: &BeadRequest) -> Option<&str> {
        request.id.as_deref()
    }

    fn from_request(request: BeadRequest) -> Result<Self> {
        require(&[
            ("name", has_text(&request.name)),
            ("color", has_text(&request.color)),
            ("description", has_text(&request.description)),
            ("img_path", has_text(&request.img_path)),
        ])?;

        Ok(Self {
            name: request.name.unwrap_or_default(),
            color: request.color.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            img_path: request.img_path.unwrap_or_default(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charm {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub img_path: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CharmRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub img_path: Option<String>,
}

impl Document for Charm {
    const COLLECTION: Collection = Collection::Charms;
    const KIND: &'static str = "charm";
}

impl CatalogItem for Charm {
    type Request = CharmRequest;

    fn request_id(request: &CharmRequest) -> Option<&str> {
        request.id.as_deref()
    }

    fn from_request(request: CharmRequest) -> Result<Self> {
        require(&[
            ("name", has_text(&request.name)),
            ("price", request.price.is_some()),
            ("description", has_text(&request.description)),
            ("img_path", has_text(&request.img_path)),
        ])?;

        Ok(Self {
            name: request.name.unwrap_or_default(),
            price: request.price.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            img_path: request.img_path.unwrap_or_default(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    pub name: String,
    pub description: String,
    pub img_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub name: String,
    pub description: String,
    pub img_path: String,
}

/// Designs and shapes share one request shape.
#[derive(Debug, Default, Deserialize)]
pub struct BasicItemRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub img_path: Option<String>,
}

impl BasicItemRequest {
    fn into_fields(self) -> Result<(String, String, String)> {
        require(&[
            ("name", has_text(&self.name)),
            ("description", has_text(&self.description)),
            ("img_path", has_text(&self.img_path)),
        ])?;

        Ok((
            self.name.unwrap_or_default(),
            self.description.unwrap_or_default(),
            self.img_path.unwrap_or_default(),
        ))
    }
}

impl Document for Design {
    const COLLECTION: Collection = Collection::Designs;
    const KIND: &'static str = "design";
}

impl CatalogItem for Design {
    type Request = BasicItemRequest;

    fn request_id(request: &BasicItemRequest) -> Option<&str> {
        request.id.as_deref()
    }

    fn from_request(request: BasicItemRequest) -> Result<Self> {
        let (name, description, img_path) = request.into_fields()?;
        Ok(Self {
            name,
            description,
            img_path,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Document for Shape {
    const COLLECTION: Collection = Collection::Shapes;
    const KIND: &'static str = "shape";
}

impl CatalogItem for Shape {
    type Request = BasicItemRequest;

    fn request_id(request: &BasicItemRequest) -> Option<&str> {
        request.id.as_deref()
    }

    fn from_request(request: BasicItemRequest) -> Result<Self> {
        let (name, description, img_path) = request.into_fields()?;
        Ok(Self {
            name,
            description,
            img_path,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
