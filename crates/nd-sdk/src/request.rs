/// Options for a single comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffRequest {
    /// Caller-supplied cache key. When absent the key is derived from the
    /// compared content.
    pub key: Option<String>,
    /// Attach the line transcript (`diff_content`) to the result.
    pub include_content: bool,
}

impl DiffRequest {
    /// A request with a content-derived key and no transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit cache key, e.g. a document path plus revision.
    ///
    /// The caller must keep the key unique per distinct (original, current)
    /// pair: a later request with the same key is served the cached result
    /// without looking at its text.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Request the expandable line transcript.
    pub fn with_content(mut self) -> Self {
        self.include_content = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder() {
        let r = DiffRequest::new().with_key("notes/todo.md@4").with_content();
        assert_eq!(r.key.as_deref(), Some("notes/todo.md@4"));
        assert!(r.include_content);
    }

    #[test]
    fn default_request_derives_key_without_content() {
        let r = DiffRequest::new();
        assert!(r.key.is_none());
        assert!(!r.include_content);
    }
}
