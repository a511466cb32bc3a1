use chrono::Utc;

/// Characters many document stores forbid in a key path segment.
const FORBIDDEN: [char; 5] = ['/', '#', '$', '[', ']'];

const MAX_KEY_LEN: usize = 500;

/// Sanitize an identity string for use as a store document key.
///
/// Applied identically on write and on read-back key derivation so the same
/// email always maps to the same key. Empty input gets a generated
/// placeholder and is therefore the one non-deterministic case.
pub fn store_key(raw: &str) -> String {
    if raw.is_empty() {
        return format!("default_id_{}", Utc::now().timestamp_millis());
    }

    let mut key: String = raw
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();

    if key.trim().is_empty() {
        key = format!("empty_id_{}", Utc::now().timestamp_millis());
    }

    if key == "." || key == ".." {
        key = format!("id_{}", key.replace('.', "_"));
    }

    if key.chars().count() > MAX_KEY_LEN {
        key = key.chars().take(MAX_KEY_LEN).collect();
    }

    key
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_forbidden_characters() {
        let key = store_key("a/b#c$d[e]f.@x.com");
        assert_eq!(key, "a_b_c_d_e_f.@x.com");
        for c in FORBIDDEN {
            assert!(!key.contains(c));
        }
    }

    #[test]
    fn deterministic_for_non_empty_input() {
        assert_eq!(store_key("ana@example.com"), store_key("ana@example.com"));
    }

    #[test]
    fn plain_email_passes_through() {
        assert_eq!(store_key("ana@example.com"), "ana@example.com");
    }

    #[test]
    fn empty_and_whitespace_get_placeholders() {
        assert!(store_key("").starts_with("default_id_"));
        assert!(store_key("   ").starts_with("empty_id_"));
    }

    #[test]
    fn dot_segments_are_rewritten() {
        assert_eq!(store_key("."), "id__");
        assert_eq!(store_key(".."), "id___");
    }

    #[test]
    fn truncates_long_keys() {
        let long = "x".repeat(2000);
        assert_eq!(store_key(&long).len(), MAX_KEY_LEN);
    }
}
