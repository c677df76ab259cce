//! Checks applied to a language before it is created or updated.

use lughat_types::{DictionaryEntry, Family, Language, Region, Status, non_empty};

use crate::error::DraftError;

/// Enumerated fields must name a known value when they are set at all
pub fn validate_draft(draft: &Language) -> Result<(), DraftError> {
    if draft.name.trim().is_empty() {
        return Err(DraftError::MissingName);
    }
    if let Some(region) = non_empty(&draft.region)
        && Region::parse(region).is_none()
    {
        return Err(DraftError::UnknownRegion(region.to_string()));
    }
    if let Some(family) = non_empty(&draft.family)
        && Family::parse(family).is_none()
    {
        return Err(DraftError::UnknownFamily(family.to_string()));
    }
    if let Some(status) = non_empty(&draft.status)
        && Status::parse(status).is_none()
    {
        return Err(DraftError::UnknownStatus(status.to_string()));
    }
    Ok(())
}

/// Validate and normalize a draft for submission.
///
/// The name is trimmed and a language without any dictionary gets a single
/// blank entry, which is the shape the language form always submits.
pub fn prepare_draft(mut draft: Language) -> Result<Language, DraftError> {
    validate_draft(&draft)?;
    draft.name = draft.name.trim().to_string();
    if draft.dictionary.is_empty() {
        draft.dictionary.push(DictionaryEntry::placeholder());
    }
    Ok(draft)
}
