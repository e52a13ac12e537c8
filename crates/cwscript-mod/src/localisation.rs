use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One language's localisation table, e.g. `l_english:`.
///
/// Rendered in the game's YAML dialect:
///
/// ```text
/// l_english:
///  civic_acme_technocrats:0 "Technocrats"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localisation {
    pub language: String,
    pub entries: IndexMap<String, String>,
}

impl Localisation {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            entries: IndexMap::new(),
        }
    }

    /// Adds or replaces an entry; a replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn render(&self) -> String {
        let mut output = format!("l_{}:\n", self.language);
        for (key, value) in &self.entries {
            output.push_str(&format!(" {key}:0 \"{value}\"\n"));
        }
        output
    }

    /// Reads a localisation file.
    ///
    /// Lines that are blank, comments, or not `key:N "value"` entries are
    /// skipped. Returns `None` when there is no `l_<language>:` header.
    pub fn parse(text: &str) -> Option<Self> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));
        let language = lines.next()?.strip_prefix("l_")?.strip_suffix(':')?;
        let mut localisation = Self::new(language);
        for line in lines {
            if let Some((key, value)) = parse_entry(line) {
                localisation.insert(key, value);
            }
        }
        Some(localisation)
    }
}

/// `key:0 "value"` or `key: "value"`. The value runs to the last quote.
fn parse_entry(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(':')?;
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit()).trim_start();
    let value = rest.strip_prefix('"')?;
    let end = value.rfind('"')?;
    Some((key.trim(), &value[..end]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_and_entries() {
        let mut loc = Localisation::new("english");
        loc.insert("civic_x", "Civic X");
        loc.insert("civic_x_desc", "Say \"hi\"");
        assert_eq!(
            loc.render(),
            "l_english:\n civic_x:0 \"Civic X\"\n civic_x_desc:0 \"Say \"hi\"\"\n"
        );
    }

    #[test]
    fn parse_reads_rendered_output() {
        let mut loc = Localisation::new("german");
        loc.insert("a", "Eins");
        loc.insert("b", "Zwei \"2\"");
        assert_eq!(Localisation::parse(&loc.render()), Some(loc));
    }

    #[test]
    fn parse_tolerates_comments_and_versions() {
        let text = "# header\nl_english:\n\n  key_one:1 \"One\"\n  # note\n  key_two: \"Two\"\n  junk\n";
        let loc = Localisation::parse(text).unwrap();
        assert_eq!(loc.language, "english");
        assert_eq!(loc.get("key_one"), Some("One"));
        assert_eq!(loc.get("key_two"), Some("Two"));
        assert_eq!(loc.entries.len(), 2);
    }

    #[test]
    fn parse_requires_header() {
        assert_eq!(Localisation::parse(" key:0 \"v\"\n"), None);
        assert_eq!(Localisation::parse(""), None);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut loc = Localisation::new("english");
        loc.insert("a", "1");
        loc.insert("b", "2");
        loc.insert("a", "3");
        let keys: Vec<&str> = loc.entries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(loc.get("a"), Some("3"));
    }
}
