use crate::error::{AppError, Result};

/// Fails with every field whose flag is `false`, in the order given.
pub fn require(fields: &[(&'static str, bool)]) -> Result<()> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingField(missing))
    }
}

pub fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
