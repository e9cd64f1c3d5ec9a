/// Substring counted when resuming numbering in an existing dump file.
/// Matches the anchors the formatter emits.
const TOGGLE_MARKER: &str = "href=\"javascript: toggleDiv";

/// Hands out sequential toggle ids pairing each show/hide anchor with the
/// collapsible region it controls.
///
/// Ids are 1-based and must stay unique per file, so a writer appending
/// to an existing dump seeds the allocator by counting the anchors that
/// are already there and continues from that count.
#[derive(Debug, Default)]
pub struct ToggleAllocator {
    issued: usize,
}

impl ToggleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume numbering after any toggles already present in `content`.
    pub fn seed_from(content: &str) -> Self {
        Self {
            issued: content.matches(TOGGLE_MARKER).count(),
        }
    }

    pub fn next(&mut self) -> usize {
        self.issued += 1;
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_allocator_starts_at_one() {
        let mut toggles = ToggleAllocator::new();
        assert_eq!(toggles.next(), 1);
        assert_eq!(toggles.next(), 2);
    }

    #[test]
    fn test_seeding_continues_after_existing_anchors() {
        let existing = r#"<a id=a1 href="javascript: toggleDiv(1)">+</a>
<a id=a2 href="javascript: toggleDiv(2)">+</a>
<a id=a3 href="javascript: toggleDiv(3)">+</a>"#;
        let mut toggles = ToggleAllocator::seed_from(existing);
        assert_eq!(toggles.next(), 4);
    }

    #[test]
    fn test_seeding_ignores_unrelated_content() {
        let mut toggles = ToggleAllocator::seed_from("<pre>toggleDiv appears in prose</pre>");
        assert_eq!(toggles.next(), 1);
    }
}
