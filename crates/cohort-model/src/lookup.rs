use std::collections::HashMap;

/// Case-insensitive set of column names that remembers the original casing.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveSet {
    map: HashMap<String, String>,
}

impl CaseInsensitiveSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            let key = name.to_ascii_uppercase();
            map.entry(key).or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    /// Resolve a name to its original casing.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.to_ascii_uppercase())
            .map(|value| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_case_insensitively() {
        let set = CaseInsensitiveSet::new(["MCSID", "ApSmCh00"]);
        assert_eq!(set.get("mcsid"), Some("MCSID"));
        assert_eq!(set.get("APSMCH00"), Some("ApSmCh00"));
        assert!(!set.contains("FCNUM00"));
    }
}
