use std::collections::HashMap;

use crate::models::RecordId;

/// Advisory texts already fetched in one session, keyed by listing id.
///
/// Lives exactly as long as the session that owns it; there is no eviction.
#[derive(Debug, Default)]
pub struct AdvisoryCache {
    texts: HashMap<RecordId, String>,
}

impl AdvisoryCache {
    pub fn get(&self, id: RecordId) -> Option<&str> {
        self.texts.get(&id).map(String::as_str)
    }

    pub fn insert(&mut self, id: RecordId, text: String) {
        self.texts.insert(id, text);
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }
}
