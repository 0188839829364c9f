//! Pure validation helpers for the story submission form.

/// Upload ceiling enforced client-side before the form ever posts.
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

pub const MISSING_FIELDS_NOTICE: &str = "Please fill in all required fields";
pub const OVERSIZE_UPLOAD_NOTICE: &str = "File size must be less than 16MB";

/// Story form fields collected from the submission page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoryDraft {
    pub title: String,
    pub content: String,
    pub region: String,
}

/// Names of required fields that are empty after trimming.
pub fn missing_required_fields(draft: &StoryDraft) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if draft.title.trim().is_empty() {
        missing.push("title");
    }
    if draft.content.trim().is_empty() {
        missing.push("content");
    }
    if draft.region.trim().is_empty() {
        missing.push("region");
    }
    missing
}

pub fn upload_too_large(byte_len: u64) -> bool {
    byte_len > MAX_UPLOAD_BYTES
}
