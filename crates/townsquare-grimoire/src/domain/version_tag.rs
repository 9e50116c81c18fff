//! Weak entity tags derived from a game's version counter.

/// Returns the weak tag for `version`, e.g. `W/3`.
#[must_use]
pub fn weak_tag(version: i64) -> String {
    format!("W/{version}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weak_tag_format() {
        assert_eq!(weak_tag(1), "W/1");
        assert_eq!(weak_tag(42), "W/42");
    }
}
