//! Project identifiers in the manifest's canonical textual form
//!
//! Identifiers are 32 hex digits grouped 8-4-4-4-12, upper-case. Braces are
//! manifest punctuation and never stored.

use uuid::Uuid;

/// Generate a fresh identifier that collides with none of `existing`
pub fn new_guid<'a, I>(existing: I) -> String
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    loop {
        let candidate = Uuid::new_v4().hyphenated().to_string().to_ascii_uppercase();
        if !existing
            .clone()
            .into_iter()
            .any(|g| g.eq_ignore_ascii_case(&candidate))
        {
            return candidate;
        }
    }
}

/// Strip surrounding braces and upper-case an identifier
pub fn normalize(guid: &str) -> String {
    guid.trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .to_ascii_uppercase()
}

/// Check whether a string is an identifier in canonical form
pub fn is_canonical(guid: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let parts: Vec<&str> = guid.split('-').collect();
    parts.len() == GROUPS.len()
        && parts.iter().zip(GROUPS).all(|(part, len)| {
            part.len() == len
                && part
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_guid_is_canonical() {
        for _ in 0..32 {
            let guid = new_guid(std::iter::empty());
            assert!(is_canonical(&guid), "not canonical: {}", guid);
        }
    }

    #[test]
    fn test_new_guid_avoids_existing() {
        let existing = vec![
            "A5C37F46-8482-4519-94A2-B706DEBD596A".to_string(),
            "FB4CFB33-2D1C-498B-AEF8-4E5E6562D792".to_string(),
        ];
        let guid = new_guid(existing.iter().map(String::as_str));
        assert!(!existing.contains(&guid));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize("{a5c37f46-8482-4519-94a2-b706debd596a}"),
            "A5C37F46-8482-4519-94A2-B706DEBD596A"
        );
    }

    #[test]
    fn test_is_canonical_rejects() {
        assert!(!is_canonical("a5c37f46-8482-4519-94a2-b706debd596a"));
        assert!(!is_canonical("{A5C37F46-8482-4519-94A2-B706DEBD596A}"));
        assert!(!is_canonical("A5C37F468482451994A2B706DEBD596A"));
        assert!(!is_canonical("A5C37F46-8482-4519-94A2-B706DEBD596"));
    }
}
