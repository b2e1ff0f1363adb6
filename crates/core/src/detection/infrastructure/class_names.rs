//! Class label lookup for Ultralytics exports.
//!
//! Ultralytics writes the label table into the ONNX custom metadata under
//! the `names` key, formatted as a Python dict literal:
//! `{0: 'pothole', 1: 'manhole'}`.

use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassNames {
    names: HashMap<usize, String>,
}

impl ClassNames {
    /// Parses the `names` metadata value. Malformed entries are skipped.
    pub fn parse(raw: &str) -> Self {
        let body = raw.trim().trim_start_matches('{').trim_end_matches('}');
        let mut names = HashMap::new();

        for entry in split_entries(body) {
            let Some((id, name)) = entry.split_once(':') else {
                continue;
            };
            let Ok(id) = id.trim().parse::<usize>() else {
                continue;
            };
            let name = name.trim().trim_matches(|c| c == '\'' || c == '"');
            if !name.is_empty() {
                names.insert(id, name.to_string());
            }
        }

        Self { names }
    }

    /// Label for `class_id`, falling back to `class{id}`.
    pub fn label(&self, class_id: usize) -> String {
        self.names
            .get(&class_id)
            .cloned()
            .unwrap_or_else(|| format!("class{class_id}"))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Splits on commas that are not inside a quoted name.
fn split_entries(body: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        match (quote, c) {
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            (None, ',') => {
                entries.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&body[start..]);
    entries
}
