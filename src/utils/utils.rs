// Start of file: /src/utils/utils.rs

// The utils module organizes useful functions, used by other modules.

use serde::Serialize;
use anyhow::Result;

// Convert any `Serialize` type into a two-space-indented JSON string.
pub fn to_two_space_indented_json<T: Serialize>(value: &T) -> Result<String> {
    let json_value: serde_json::Value = serde_json::to_value(value)?;
    let pretty_json: String = serde_json::to_string_pretty(&json_value)?;
    Ok(pretty_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_with_two_spaces() {
        let out = to_two_space_indented_json(&serde_json::json!({ "a": 1 })).unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }
}

// End of file: /src/utils/utils.rs
