//! Document shapes persisted by the store and returned by the API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Name of an icon category, the key inside [`IconLibrary::icons`].
pub type CategoryName = String;

/// A single icon category.
///
/// Categories are never physically removed; deleting one only sets
/// `deleted`. Missing fields in stored documents fall back to a live,
/// empty category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub data: Vec<String>,
}

impl Category {
    /// A freshly added category: live and without icons.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `url` is present in this category's icon list.
    pub fn contains(&self, url: &str) -> bool {
        self.data.iter().any(|u| u == url)
    }
}

/// The single icons document of a deployment.
///
/// Serializes as `{"icons": {"<name>": {"deleted": bool, "data": [..]}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconLibrary {
    #[serde(default)]
    pub icons: BTreeMap<CategoryName, Category>,
}

impl IconLibrary {
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.icons.get(name)
    }
}

/// A stored username/password pair from the `users` table.
///
/// The password is compared verbatim; it is not hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredential {
    pub id: DbId,
    pub username: String,
    pub password: String,
}
