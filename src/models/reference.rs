use crate::models::DocumentId;

/// Wire token that clears an optional reference on update.
pub const CLEAR_TOKEN: &str = "remove";

/// How an update request treats one optional reference.
///
/// Requests carry these as plain strings; [`RefUpdate::from_wire`] decodes
/// them once so nothing downstream compares against [`CLEAR_TOKEN`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefUpdate<T = String> {
    /// Field omitted (or blank): keep whatever is stored.
    Unchanged,
    /// Clearing token supplied: store null.
    Cleared,
    SetTo(T),
}

impl RefUpdate<String> {
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::Unchanged,
            Some(CLEAR_TOKEN) => Self::Cleared,
            Some(value) => Self::SetTo(value.to_string()),
        }
    }
}

impl RefUpdate<DocumentId> {
    pub fn apply(&self, current: Option<DocumentId>) -> Option<DocumentId> {
        match self {
            Self::Unchanged => current,
            Self::Cleared => None,
            Self::SetTo(id) => Some(*id),
        }
    }
}
