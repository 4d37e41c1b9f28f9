use std::collections::HashMap;

use crate::error::CatalogError;

/// Drink id -> drink name lookup, parsed from `id,name` lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkCatalog {
    names: HashMap<u16, String>,
}

impl DrinkCatalog {
    /// Parse catalog text. Blank lines are skipped; names may contain commas.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut names = HashMap::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (id, name) = line
                .split_once(',')
                .ok_or(CatalogError::MissingName { line: i + 1 })?;
            let id = id.trim();
            let id: u16 = id.parse().map_err(|_| CatalogError::InvalidId {
                line: i + 1,
                id: id.to_string(),
            })?;
            names.insert(id, name.trim().to_string());
        }
        Ok(Self { names })
    }

    /// Name of a drink, if listed
    pub fn name(&self, drink_id: u16) -> Option<&str> {
        self.names.get(&drink_id).map(String::as_str)
    }

    /// Number of drinks listed
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when no drinks are listed
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
