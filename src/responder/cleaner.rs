pub struct Cleaner;

impl Cleaner {
    /// Lowercases and trims user text. Blank input yields `None`; it never
    /// matches a category.
    pub fn normalize(input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_none() {
        assert_eq!(Cleaner::normalize(""), None);
        assert_eq!(Cleaner::normalize("   \t\n "), None);
    }

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(Cleaner::normalize("  HeLLo There \n").as_deref(), Some("hello there"));
    }

    #[test]
    fn inner_whitespace_is_kept() {
        assert_eq!(Cleaner::normalize("good   morning").as_deref(), Some("good   morning"));
    }
}
