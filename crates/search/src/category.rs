use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Browse categories shown above the listing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    All,
    Pousada,
    Sitio,
    Fazenda,
    Piscina,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 5] = [
        Category::All,
        Category::Pousada,
        Category::Sitio,
        Category::Fazenda,
        Category::Piscina,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Pousada => "pousada",
            Category::Sitio => "sitio",
            Category::Fazenda => "fazenda",
            Category::Piscina => "piscina",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "Todos",
            Category::Pousada => "Pousadas",
            Category::Sitio => "Sítios",
            Category::Fazenda => "Fazendas",
            Category::Piscina => "Com Piscina",
        }
    }

    /// Listing type this category narrows to, if any.
    pub fn listing_type(&self) -> Option<&'static str> {
        match self {
            Category::Pousada | Category::Sitio | Category::Fazenda => Some(self.id()),
            _ => None,
        }
    }

    /// Amenity this category requires, if any.
    pub fn required_amenity(&self) -> Option<&'static str> {
        match self {
            Category::Piscina => Some("Piscina"),
            _ => None,
        }
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
