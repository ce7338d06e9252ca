use crate::{
    database::DocumentStore,
    error::{AppError, Result},
    models::{Document, DocumentId, Record, RefUpdate},
    queries::document_queries,
};

/// Outcome of checking one reference against its owning collection.
#[derive(Debug)]
pub enum Resolution<T> {
    Absent,
    InvalidFormat(String),
    NotFound(DocumentId),
    Valid(Record<T>),
}

impl<T: Document> Resolution<T> {
    /// Absence is fine; anything else must resolve.
    pub fn into_optional(self) -> Result<Option<Record<T>>> {
        match self {
            Resolution::Absent => Ok(None),
            Resolution::Valid(record) => Ok(Some(record)),
            Resolution::InvalidFormat(value) => Err(AppError::InvalidReference {
                kind: T::KIND,
                value,
            }),
            Resolution::NotFound(id) => Err(AppError::ReferenceNotFound { kind: T::KIND, id }),
        }
    }

    /// Like [`Resolution::into_optional`], but absence reports `field` as missing.
    pub fn into_required(self, field: &'static str) -> Result<Record<T>> {
        self.into_optional()?
            .ok_or_else(|| AppError::MissingField(vec![field]))
    }
}

/// Format check first, then a lookup. Blank input counts as absent.
pub async fn lookup<T: Document>(
    store: &dyn DocumentStore,
    raw: Option<&str>,
) -> Result<Resolution<T>> {
    let value = match raw.map(str::trim) {
        None | Some("") => return Ok(Resolution::Absent),
        Some(value) => value,
    };

    let Some(id) = DocumentId::parse(value) else {
        return Ok(Resolution::InvalidFormat(value.to_string()));
    };

    Ok(match document_queries::find_by_id::<T>(store, id).await? {
        Some(record) => Resolution::Valid(record),
        None => Resolution::NotFound(id),
    })
}

pub async fn resolve_optional<T: Document>(
    store: &dyn DocumentStore,
    raw: Option<&str>,
) -> Result<Option<DocumentId>> {
    Ok(lookup::<T>(store, raw)
        .await?
        .into_optional()?
        .map(|record| record.id))
}

/// Validates the target of a [`RefUpdate::SetTo`]; the other variants pass
/// through without touching the store.
pub async fn resolve_update<T: Document>(
    store: &dyn DocumentStore,
    update: RefUpdate,
) -> Result<RefUpdate<DocumentId>> {
    match update {
        RefUpdate::Unchanged => Ok(RefUpdate::Unchanged),
        RefUpdate::Cleared => Ok(RefUpdate::Cleared),
        RefUpdate::SetTo(value) => {
            let record = lookup::<T>(store, Some(&value))
                .await?
                .into_required(T::KIND)?;
            Ok(RefUpdate::SetTo(record.id))
        }
    }
}

/// Parses a primary id supplied by the caller for the entity being read,
/// updated or deleted.
pub fn parse_id<T: Document>(raw: &str) -> Result<DocumentId> {
    DocumentId::parse(raw).ok_or_else(|| AppError::InvalidReference {
        kind: T::KIND,
        value: raw.to_string(),
    })
}

/// Loads the entity an operation targets, reporting `NotFound` when absent.
pub async fn load<T: Document>(store: &dyn DocumentStore, raw: &str) -> Result<Record<T>> {
    load_by_id::<T>(store, parse_id::<T>(raw)?).await
}

pub async fn load_by_id<T: Document>(store: &dyn DocumentStore, id: DocumentId) -> Result<Record<T>> {
    document_queries::find_by_id::<T>(store, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No {} with id {} found in DB", T::KIND, id)))
}
