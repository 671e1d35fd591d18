use serde::{Deserialize, Serialize};

/// Catalog entry managed by the books module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Opaque identifier assigned by the document store on creation
    pub id: String,
    /// Title of the book; never empty once persisted
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Category>,
}

impl BookRecord {
    /// Merge a partial patch into this record. Absent patch fields leave the
    /// current value untouched; the identifier is never part of a patch.
    pub fn apply_patch(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(author) = patch.author {
            self.author = Some(author);
        }
        if let Some(price) = patch.price {
            self.price = Some(price);
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
    }
}

/// Closed set of genre tags a book may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Fantasy,
    Adventure,
    Classics,
    Crime,
    Mystery,
    Romance,
    SciFi,
}

/// Candidate record for creation. The title is optional here on purpose:
/// its presence is exactly what the service validates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBookRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Category>,
}

/// Partial-field patch for updates; `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Category>,
}
