use std::collections::HashMap;

/// Set of strings compared case-insensitively.
///
/// The first spelling inserted for a given key is the one retained.
#[derive(Debug, Clone, Default)]
pub struct CaseInsensitiveSet {
    map: HashMap<String, String>,
}

impl CaseInsensitiveSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for name in names {
            set.insert(name.as_ref());
        }
        set
    }

    /// Inserts `name`, returning `true` if no case variant was present.
    pub fn insert(&mut self, name: &str) -> bool {
        let key = fold(name);
        if self.map.contains_key(&key) {
            return false;
        }
        self.map.insert(key, name.to_string());
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&fold(name)).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&fold(name))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}
