use std::collections::BTreeMap;
use std::sync::Arc;

/// Name-keyed store of loaded shader text.
///
/// Lives for the whole process. Entries are added once and never replaced.
#[derive(Debug, Clone, Default)]
pub struct ShaderCache {
    entries: BTreeMap<String, Arc<str>>,
}

impl ShaderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<str>> {
        self.entries.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Store `text` under `key` and return the cached value.
    ///
    /// If `key` is already present the existing text wins.
    pub fn insert(&mut self, key: &str, text: String) -> Arc<str> {
        self.entries
            .entry(key.to_string())
            .or_insert_with(|| Arc::from(text))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut cache = ShaderCache::new();
        assert!(cache.is_empty());
        cache.insert("VS", "vertex".into());
        assert_eq!(cache.get("VS").as_deref(), Some("vertex"));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("FS").is_none());
    }

    #[test]
    fn first_insert_wins() {
        let mut cache = ShaderCache::new();
        cache.insert("FS", "first".into());
        let kept = cache.insert("FS", "second".into());
        assert_eq!(&*kept, "first");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_are_sorted() {
        let mut cache = ShaderCache::new();
        cache.insert("VS", "v".into());
        cache.insert("FS", "f".into());
        assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["FS", "VS"]);
    }
}
