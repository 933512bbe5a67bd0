//! Line-based extraction of `Label: value` facts from tool output

use crate::error::{Result, RigError};

/// Label of the runtime identifier line in `dotnet --info`
pub const RID_MARKER: &str = "RID:";

/// Value after `marker` on the first line that starts with it (after trimming)
pub fn extract_field(text: &str, marker: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(marker))
        .map(|value| value.trim().to_string())
}

/// Like `extract_field`, but a missing or blank value is an error
pub fn require_field(text: &str, marker: &str) -> Result<String> {
    extract_field(text, marker)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RigError::ParseMiss {
            marker: marker.to_string(),
        })
}
