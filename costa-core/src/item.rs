//! Catalog item model shared by excursions and categories.
//!
//! Items are read-only snapshots to the query layer: callers fetch a fresh
//! array from the store, derive a view, and never write through the view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported UI languages. String matching always takes the language
/// explicitly instead of reading ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lang {
    #[serde(rename = "es")]
    Es,
    #[serde(rename = "en")]
    En,
    #[serde(rename = "de")]
    De,
}

/// One localized text field. Every language is populated at creation;
/// a value may be empty but is never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub es: String,
    pub en: String,
    pub de: String,
}

impl Localized {
    pub fn new(es: impl Into<String>, en: impl Into<String>, de: impl Into<String>) -> Self {
        Self {
            es: es.into(),
            en: en.into(),
            de: de.into(),
        }
    }

    /// Same text in all three languages. Mostly a test convenience.
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            es: text.clone(),
            en: text.clone(),
            de: text,
        }
    }

    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::Es => &self.es,
            Lang::En => &self.en,
            Lang::De => &self.de,
        }
    }
}

/// Boolean flags a status filter can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flag {
    #[serde(rename = "featured")]
    Featured,
    #[serde(rename = "active")]
    Active,
}

/// A sellable/listable catalog record (excursion or category).
///
/// Note: we keep this small + serializable. Persistence lives behind the
/// `CatalogStore` trait; the query layer only ever sees snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u32,
    pub name: Localized,
    pub description: Localized,

    pub price: f64,
    pub created_at: DateTime<Utc>,
    /// 0-based position within the hand-ordered sequence.
    pub sort_order: i32,
    /// Derived count rendered next to the item (e.g. excursions per category).
    pub derived_count: u32,

    pub featured: bool,
    pub active: bool,

    /// Foreign key into the category list. Equality-matched, case-sensitive.
    pub category_tag: String,

    /// Free text that may carry bulleted schedule lines.
    pub notes: Option<String>,
    /// Canonical schedule window (`HH:MM:SS`), feeds extractor defaults.
    pub schedule_start: Option<String>,
    pub schedule_end: Option<String>,
}

impl CatalogItem {
    pub fn new(id: u32, name: Localized) -> Self {
        Self {
            id,
            name,
            description: Localized::default(),
            price: 0.0,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            sort_order: 0,
            derived_count: 0,
            featured: false,
            active: true,
            category_tag: String::new(),
            notes: None,
            schedule_start: None,
            schedule_end: None,
        }
    }

    pub fn with_description(mut self, description: Localized) -> Self {
        self.description = description;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub fn with_sort_order(mut self, order: i32) -> Self {
        self.sort_order = order;
        self
    }

    pub fn with_derived_count(mut self, count: u32) -> Self {
        self.derived_count = count;
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_category_tag(mut self, tag: impl Into<String>) -> Self {
        self.category_tag = tag.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_schedule(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.schedule_start = Some(start.into());
        self.schedule_end = Some(end.into());
        self
    }

    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::Featured => self.featured,
            Flag::Active => self.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_lookup() {
        let name = Localized::new("Playa", "Beach", "Strand");
        assert_eq!(name.get(Lang::Es), "Playa");
        assert_eq!(name.get(Lang::En), "Beach");
        assert_eq!(name.get(Lang::De), "Strand");
    }

    #[test]
    fn test_item_flag_access() {
        let item = CatalogItem::new(1, Localized::uniform("Snorkel"))
            .with_featured(true)
            .with_active(false);
        assert!(item.flag(Flag::Featured));
        assert!(!item.flag(Flag::Active));
    }

    #[test]
    fn test_item_serde_round_trip() {
        let item = CatalogItem::new(7, Localized::uniform("Catamarán"))
            .with_price(59.0)
            .with_category_tag("Mar")
            .with_schedule("09:00:00", "13:00:00");
        let json = serde_json::to_string(&item).unwrap();
        let back: CatalogItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
