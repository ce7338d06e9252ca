use crate::{
    database::DocumentStore,
    error::{AppError, Result},
    models::{Document, Record},
    queries::document_queries,
    services::reference_service,
};

pub async fn list<T: Document>(store: &dyn DocumentStore) -> Result<Vec<Record<T>>> {
    let records = document_queries::find_all::<T>(store).await?;

    if records.is_empty() {
        return Err(AppError::NotFound(format!(
            "No {} found in DB",
            T::COLLECTION
        )));
    }

    Ok(records)
}

pub async fn get<T: Document>(store: &dyn DocumentStore, id: &str) -> Result<Record<T>> {
    reference_service::load::<T>(store, id).await
}

/// Unconditional once the document exists; nothing pointing at it is touched.
pub async fn delete<T: Document>(store: &dyn DocumentStore, id: Option<&str>) -> Result<Record<T>> {
    let id = id.map(str::trim).filter(|id| !id.is_empty());
    let Some(id) = id else {
        return Err(AppError::MissingField(vec!["id"]));
    };

    let record = reference_service::load::<T>(store, id).await?;
    document_queries::delete::<T>(store, record.id).await?;

    tracing::info!("Deleted {} {}", T::KIND, record.id);

    Ok(record)
}
