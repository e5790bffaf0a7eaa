//! The vault document: named entries holding public or secret items.
//!
//! This is the plaintext JSON the envelope encrypts. Field names are
//! camelCase on the wire so documents interoperate with vaults written
//! by other implementations of the format. Secret item values hold a nested
//! envelope string (encrypted individually under the same passphrase);
//! public values are stored as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};

/// A complete vault document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultDocument {
    /// When this vault was created
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,

    /// Named entries, each a group of items
    pub entries: Vec<Entry>,
}

/// A named entry (e.g. one site or account).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Slug identifier derived from the name
    pub id: String,

    /// User-facing name
    pub name: String,

    /// When this entry was created
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,

    /// Key/value items belonging to this entry
    pub items: Vec<Item>,
}

/// A single key/value item within an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Slug identifier derived from the name
    pub id: String,

    /// User-facing name
    pub name: String,

    /// Whether the value is stored in the clear or enveloped
    #[serde(rename = "type")]
    pub kind: ItemKind,

    /// Plaintext for public items, an envelope string for secret ones
    pub value: String,
}

/// Visibility class of an item value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Public,
    Secret,
}

/// Derive a slug id from a user-facing name: lowercase, runs of
/// non-alphanumeric characters collapsed to `-`, edges trimmed.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

impl VaultDocument {
    /// Create an empty vault stamped with the current time.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            entries: Vec::new(),
        }
    }

    /// Parse a document from decrypted plaintext bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serialize to the compact JSON that gets encrypted.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to human-readable JSON (for `export`).
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a new empty entry, returning its id.
    pub fn add_entry(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        let id = slugify(name);
        if id.is_empty() {
            return Err(VaultError::InvalidInput(
                "Entry name must contain at least one letter or digit".to_string(),
            ));
        }
        if self.entries.iter().any(|e| e.id == id) {
            return Err(VaultError::InvalidInput(format!(
                "An entry with that name already exists: {}",
                id
            )));
        }

        let now = Utc::now();
        self.entries.push(Entry {
            id: id.clone(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            items: Vec::new(),
        });
        self.updated_at = now;
        Ok(id)
    }

    /// Remove an entry by id.
    pub fn remove_entry(&mut self, id: &str) -> Result<()> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Err(VaultError::NotFound(format!("Entry not found: {}", id)));
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entry_mut(&mut self, id: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Refresh the document-level modification timestamp. Called after
    /// entry-level mutations, which cannot reach the document.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for VaultDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Entry {
    /// Add an item, returning its id. The caller is responsible for
    /// enveloping the value first when `kind` is [`ItemKind::Secret`].
    pub fn add_item(&mut self, name: &str, kind: ItemKind, value: String) -> Result<String> {
        let name = name.trim();
        let id = slugify(name);
        if id.is_empty() {
            return Err(VaultError::InvalidInput(
                "Item name must contain at least one letter or digit".to_string(),
            ));
        }
        if self.items.iter().any(|i| i.id == id) {
            return Err(VaultError::InvalidInput(format!(
                "An item with that name already exists in this entry: {}",
                id
            )));
        }

        self.items.push(Item {
            id: id.clone(),
            name: name.to_string(),
            kind,
            value,
        });
        self.updated_at = Utc::now();
        Ok(id)
    }

    /// Remove an item by id.
    pub fn remove_item(&mut self, id: &str) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        if self.items.len() == before {
            return Err(VaultError::NotFound(format!("Item not found: {}", id)));
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Bank Login"), "my-bank-login");
        assert_eq!(slugify("  GitHub (work)  "), "github-work");
        assert_eq!(slugify("a--b__c"), "a-b-c");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("Déjà vu"), "d-j-vu");
    }

    #[test]
    fn test_add_entry_and_duplicate_rejected() {
        let mut doc = VaultDocument::new();
        let id = doc.add_entry("My Bank").unwrap();
        assert_eq!(id, "my-bank");

        // Same slug, different capitalization.
        let result = doc.add_entry("my bank");
        assert!(matches!(result, Err(VaultError::InvalidInput(_))));
        assert_eq!(doc.entries.len(), 1);
    }

    #[test]
    fn test_entry_name_without_alphanumerics_rejected() {
        let mut doc = VaultDocument::new();
        assert!(doc.add_entry("!!!").is_err());
    }

    #[test]
    fn test_remove_entry() {
        let mut doc = VaultDocument::new();
        doc.add_entry("One").unwrap();
        doc.remove_entry("one").unwrap();
        assert!(doc.entries.is_empty());

        let result = doc.remove_entry("one");
        assert!(matches!(result, Err(VaultError::NotFound(_))));
    }

    #[test]
    fn test_items_with_duplicate_check() {
        let mut doc = VaultDocument::new();
        doc.add_entry("Site").unwrap();
        let entry = doc.entry_mut("site").unwrap();

        entry
            .add_item("Username", ItemKind::Public, "alice".to_string())
            .unwrap();
        let result = entry.add_item("username", ItemKind::Public, "bob".to_string());
        assert!(result.is_err());
        assert_eq!(entry.items.len(), 1);

        entry.remove_item("username").unwrap();
        assert!(entry.items.is_empty());
    }

    #[test]
    fn test_mutation_refreshes_timestamps() {
        let mut doc = VaultDocument::new();
        let created = doc.created_at;
        doc.add_entry("Site").unwrap();
        assert!(doc.updated_at >= created);

        let entry = doc.entry_mut("site").unwrap();
        let entry_created = entry.created_at;
        entry
            .add_item("Token", ItemKind::Public, "t".to_string())
            .unwrap();
        assert!(entry.updated_at >= entry_created);
    }

    #[test]
    fn test_json_wire_format_is_camel_case() {
        let mut doc = VaultDocument::new();
        doc.add_entry("Site").unwrap();
        doc.entry_mut("site")
            .unwrap()
            .add_item("API Key", ItemKind::Secret, "<envelope>".to_string())
            .unwrap();

        let json = doc.to_json().unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        assert!(json.contains("\"type\":\"secret\""));
        assert!(!json.contains("created_at"));
    }

    #[test]
    fn test_parses_documents_written_by_other_implementations() {
        let json = r#"{
            "createdAt": "2025-01-15T10:30:00.000Z",
            "updatedAt": "2025-02-01T08:00:00.000Z",
            "entries": [
                {
                    "id": "email",
                    "name": "Email",
                    "createdAt": "2025-01-15T10:31:00.000Z",
                    "updatedAt": "2025-01-15T10:31:00.000Z",
                    "items": [
                        {"id": "address", "name": "Address", "type": "public", "value": "a@b.c"},
                        {"id": "password", "name": "Password", "type": "secret", "value": "AAAA"}
                    ]
                }
            ]
        }"#;

        let doc = VaultDocument::from_json(json.as_bytes()).unwrap();
        assert_eq!(doc.entries.len(), 1);
        let entry = doc.entry("email").unwrap();
        assert_eq!(entry.items[0].kind, ItemKind::Public);
        assert_eq!(entry.items[1].kind, ItemKind::Secret);

        // And it round-trips.
        let reparsed = VaultDocument::from_json(doc.to_json().unwrap().as_bytes()).unwrap();
        assert_eq!(reparsed.entries[0].items.len(), 2);
    }

    #[test]
    fn test_invalid_document_rejected() {
        let result = VaultDocument::from_json(b"{\"entries\": 7}");
        assert!(matches!(result, Err(VaultError::Document(_))));
    }
}
