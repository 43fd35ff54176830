//! Catalog view derivation: search, multi-filter, multi-key stable sort.
//!
//! `query` is pure and permissive by design: every criterion has an `All`
//! sentinel that skips it, unknown option strings degrade to no-ops, and the
//! input snapshot is never mutated.

use crate::item::{CatalogItem, Flag, Lang};
use std::cmp::Ordering;

/// A localized text field the search predicate can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name(Lang),
    Description(Lang),
}

impl SearchField {
    fn value<'a>(&self, item: &'a CatalogItem) -> &'a str {
        match self {
            SearchField::Name(lang) => item.name.get(*lang),
            SearchField::Description(lang) => item.description.get(*lang),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Flag { flag: Flag, expected: bool },
}

impl StatusFilter {
    /// Permissive parse of the admin screens' status values.
    /// Unknown values mean "don't filter".
    pub fn parse(s: &str) -> Self {
        match s {
            "active" => StatusFilter::Flag {
                flag: Flag::Active,
                expected: true,
            },
            "inactive" => StatusFilter::Flag {
                flag: Flag::Active,
                expected: false,
            },
            "featured" => StatusFilter::Flag {
                flag: Flag::Featured,
                expected: true,
            },
            _ => StatusFilter::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    /// Exact, case-sensitive match against `category_tag`. No trimming.
    Tag(String),
}

impl CategoryFilter {
    pub fn parse(s: &str) -> Self {
        match s {
            "all" => CategoryFilter::All,
            tag => CategoryFilter::Tag(tag.to_string()),
        }
    }
}

/// Coarse price classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    All,
    Low,
    Medium,
    High,
}

impl PriceBand {
    /// Band boundaries: low < 50, medium [50, 80), high >= 80.
    pub fn of(price: f64) -> Self {
        if price < 50.0 {
            PriceBand::Low
        } else if price < 80.0 {
            PriceBand::Medium
        } else {
            PriceBand::High
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "low" => PriceBand::Low,
            "medium" => PriceBand::Medium,
            "high" => PriceBand::High,
            _ => PriceBand::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name(Lang),
    Price,
    CreatedAt,
    SortOrder,
    DerivedCount,
    /// Featured items first. Default when no explicit key is chosen.
    FeaturedFirst,
    /// Unknown key: keep input order untouched.
    Unsorted,
}

impl SortKey {
    /// Permissive parse; unrecognized keys fall through to `Unsorted`.
    pub fn parse(s: &str, lang: Lang) -> Self {
        match s {
            "name" => SortKey::Name(lang),
            "price" => SortKey::Price,
            "created_at" | "createdAt" => SortKey::CreatedAt,
            "order" => SortKey::SortOrder,
            "count" => SortKey::DerivedCount,
            "featured" => SortKey::FeaturedFirst,
            _ => SortKey::Unsorted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Self {
        match s {
            "desc" => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::FeaturedFirst,
            direction: SortDirection::Asc,
        }
    }
}

/// The bundle of search/filter/sort options applied to a catalog snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCriteria {
    pub search_text: String,
    /// Fields the search substring is matched against (ANY-field match).
    pub search_fields: Vec<SearchField>,
    pub status: StatusFilter,
    pub category: CategoryFilter,
    pub price_band: PriceBand,
    pub sort: SortSpec,
}

impl Default for QueryCriteria {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            search_fields: vec![
                SearchField::Name(Lang::Es),
                SearchField::Name(Lang::En),
                SearchField::Name(Lang::De),
                SearchField::Description(Lang::Es),
            ],
            status: StatusFilter::All,
            category: CategoryFilter::All,
            price_band: PriceBand::All,
            sort: SortSpec::default(),
        }
    }
}

impl QueryCriteria {
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_price_band(mut self, band: PriceBand) -> Self {
        self.price_band = band;
        self
    }

    pub fn with_sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = SortSpec { key, direction };
        self
    }

    fn matches(&self, item: &CatalogItem) -> bool {
        if !self.search_text.is_empty() {
            let needle = self.search_text.to_lowercase();
            let hit = self
                .search_fields
                .iter()
                .any(|f| f.value(item).to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let StatusFilter::Flag { flag, expected } = self.status {
            if item.flag(flag) != expected {
                return false;
            }
        }

        if let CategoryFilter::Tag(ref tag) = self.category {
            if item.category_tag != *tag {
                return false;
            }
        }

        if self.price_band != PriceBand::All && PriceBand::of(item.price) != self.price_band {
            return false;
        }

        true
    }
}

/// Ascending comparator for one sort key. Ties come back `Equal` so the
/// stable sort keeps input order; descending is handled by the caller.
fn compare_asc(key: SortKey, a: &CatalogItem, b: &CatalogItem) -> Ordering {
    match key {
        // Lowercase-normalized lexicographic; stands in for the UI's
        // locale-aware compare.
        SortKey::Name(lang) => a
            .name
            .get(lang)
            .to_lowercase()
            .cmp(&b.name.get(lang).to_lowercase()),
        SortKey::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::SortOrder => a.sort_order.cmp(&b.sort_order),
        SortKey::DerivedCount => a.derived_count.cmp(&b.derived_count),
        // true before false.
        SortKey::FeaturedFirst => b.featured.cmp(&a.featured),
        SortKey::Unsorted => Ordering::Equal,
    }
}

/// Derive a filtered, sorted view of a catalog snapshot.
///
/// Filters are ANDed and evaluated before the sort; the sort is stable, and
/// `Desc` reverses the comparator result per pair rather than reversing the
/// output array, so tie order is direction-invariant.
pub fn query(items: &[CatalogItem], criteria: &QueryCriteria) -> Vec<CatalogItem> {
    let mut view: Vec<CatalogItem> = items
        .iter()
        .filter(|item| criteria.matches(item))
        .cloned()
        .collect();

    let SortSpec { key, direction } = criteria.sort;
    if key != SortKey::Unsorted {
        view.sort_by(|a, b| {
            let ord = compare_asc(key, a, b);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Localized;
    use chrono::{TimeZone, Utc};

    fn fixture() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new(1, Localized::new("Volcán", "Volcano", "Vulkan"))
                .with_description(Localized::new("Caminata al cráter", "Crater hike", "Kraterwanderung"))
                .with_price(95.0)
                .with_created_at(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap())
                .with_sort_order(2)
                .with_category_tag("Naturaleza")
                .with_featured(true),
            CatalogItem::new(2, Localized::new("Playa Norte", "North Beach", "Nordstrand"))
                .with_description(Localized::new("Día de playa", "Beach day", "Strandtag"))
                .with_price(45.0)
                .with_created_at(Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap())
                .with_sort_order(0)
                .with_category_tag("Mar")
                .with_active(false),
            CatalogItem::new(3, Localized::new("Catamarán", "Catamaran", "Katamaran"))
                .with_description(Localized::new("Paseo en barco", "Boat trip", "Bootsfahrt"))
                .with_price(80.0)
                .with_created_at(Utc.with_ymd_and_hms(2025, 2, 10, 8, 0, 0).unwrap())
                .with_sort_order(1)
                .with_category_tag("Mar")
                .with_featured(true),
            CatalogItem::new(4, Localized::new("Mercado", "Market", "Markt"))
                .with_description(Localized::new("Tour gastronómico", "Food tour", "Gastrotour"))
                .with_price(50.0)
                .with_created_at(Utc.with_ymd_and_hms(2025, 2, 10, 8, 0, 0).unwrap())
                .with_sort_order(3)
                .with_category_tag("Cultura"),
        ]
    }

    fn ids(view: &[CatalogItem]) -> Vec<u32> {
        view.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        let items = fixture();
        let criteria = QueryCriteria::default().with_sort(SortKey::Unsorted, SortDirection::Asc);
        assert_eq!(ids(&query(&items, &criteria)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_matches_any_configured_field() {
        let items = fixture();
        // "beach" only appears in the English name of item 2.
        let criteria = QueryCriteria::default()
            .with_search("BEACH")
            .with_sort(SortKey::Unsorted, SortDirection::Asc);
        assert_eq!(ids(&query(&items, &criteria)), vec![2]);

        // Spanish description hit.
        let criteria = QueryCriteria::default()
            .with_search("barco")
            .with_sort(SortKey::Unsorted, SortDirection::Asc);
        assert_eq!(ids(&query(&items, &criteria)), vec![3]);
    }

    #[test]
    fn test_status_filter_both_polarities() {
        let items = fixture();
        let active = QueryCriteria::default()
            .with_status(StatusFilter::parse("active"))
            .with_sort(SortKey::Unsorted, SortDirection::Asc);
        assert_eq!(ids(&query(&items, &active)), vec![1, 3, 4]);

        let inactive = QueryCriteria::default()
            .with_status(StatusFilter::parse("inactive"))
            .with_sort(SortKey::Unsorted, SortDirection::Asc);
        assert_eq!(ids(&query(&items, &inactive)), vec![2]);
    }

    #[test]
    fn test_category_filter_is_case_sensitive() {
        let items = fixture();
        let exact = QueryCriteria::default()
            .with_category(CategoryFilter::Tag("Naturaleza".to_string()))
            .with_sort(SortKey::Unsorted, SortDirection::Asc);
        assert_eq!(ids(&query(&items, &exact)), vec![1]);

        let lowercase = QueryCriteria::default()
            .with_category(CategoryFilter::Tag("naturaleza".to_string()))
            .with_sort(SortKey::Unsorted, SortDirection::Asc);
        assert!(query(&items, &lowercase).is_empty());
    }

    #[test]
    fn test_price_band_boundaries() {
        assert_eq!(PriceBand::of(49.99), PriceBand::Low);
        assert_eq!(PriceBand::of(50.0), PriceBand::Medium);
        assert_eq!(PriceBand::of(79.99), PriceBand::Medium);
        assert_eq!(PriceBand::of(80.0), PriceBand::High);

        let items = fixture();
        let medium = QueryCriteria::default()
            .with_price_band(PriceBand::Medium)
            .with_sort(SortKey::Unsorted, SortDirection::Asc);
        // Item 4 costs exactly 50, item 3 exactly 80.
        assert_eq!(ids(&query(&items, &medium)), vec![4]);
        let high = QueryCriteria::default()
            .with_price_band(PriceBand::High)
            .with_sort(SortKey::Unsorted, SortDirection::Asc);
        assert_eq!(ids(&query(&items, &high)), vec![1, 3]);
    }

    #[test]
    fn test_filters_and_together() {
        let items = fixture();
        let criteria = QueryCriteria::default()
            .with_status(StatusFilter::parse("active"))
            .with_category(CategoryFilter::Tag("Mar".to_string()))
            .with_sort(SortKey::Unsorted, SortDirection::Asc);
        // Item 2 is Mar but inactive; only 3 survives both.
        assert_eq!(ids(&query(&items, &criteria)), vec![3]);
    }

    #[test]
    fn test_filter_survivors_independent_of_sort() {
        let items = fixture();
        let base = QueryCriteria::default()
            .with_status(StatusFilter::parse("active"))
            .with_price_band(PriceBand::High);

        let mut by_price = ids(&query(
            &items,
            &base.clone().with_sort(SortKey::Price, SortDirection::Desc),
        ));
        let mut by_name = ids(&query(
            &items,
            &base.clone().with_sort(SortKey::Name(Lang::Es), SortDirection::Asc),
        ));
        by_price.sort_unstable();
        by_name.sort_unstable();
        assert_eq!(by_price, by_name);
    }

    #[test]
    fn test_query_is_idempotent() {
        let items = fixture();
        let criteria = QueryCriteria::default()
            .with_search("a")
            .with_sort(SortKey::Price, SortDirection::Desc);
        let first = ids(&query(&items, &criteria));
        let second = ids(&query(&items, &criteria));
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_by_name_locale_insensitive_case() {
        let items = fixture();
        let criteria =
            QueryCriteria::default().with_sort(SortKey::Name(Lang::En), SortDirection::Asc);
        assert_eq!(ids(&query(&items, &criteria)), vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_sort_by_created_at() {
        let items = fixture();
        let criteria =
            QueryCriteria::default().with_sort(SortKey::CreatedAt, SortDirection::Asc);
        // Items 3 and 4 share a timestamp; input order (3 before 4) holds.
        assert_eq!(ids(&query(&items, &criteria)), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_descending_ties_keep_input_order() {
        let items = fixture();
        let asc = QueryCriteria::default().with_sort(SortKey::CreatedAt, SortDirection::Asc);
        let desc = QueryCriteria::default().with_sort(SortKey::CreatedAt, SortDirection::Desc);
        // 3 and 4 tie on created_at: they must appear as 3,4 in BOTH
        // directions. Reversing the output array would flip them.
        assert_eq!(ids(&query(&items, &asc)), vec![2, 3, 4, 1]);
        assert_eq!(ids(&query(&items, &desc)), vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_featured_first_is_default_sort() {
        let items = fixture();
        let criteria = QueryCriteria::default();
        // Featured 1 and 3 lead in input order, then 2 and 4.
        assert_eq!(ids(&query(&items, &criteria)), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_unknown_sort_key_is_noop() {
        let items = fixture();
        assert_eq!(SortKey::parse("bogus", Lang::Es), SortKey::Unsorted);
        let criteria = QueryCriteria::default()
            .with_sort(SortKey::parse("bogus", Lang::Es), SortDirection::Desc);
        assert_eq!(ids(&query(&items, &criteria)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_query_does_not_mutate_input() {
        let items = fixture();
        let before = items.clone();
        let _ = query(
            &items,
            &QueryCriteria::default().with_sort(SortKey::Price, SortDirection::Desc),
        );
        assert_eq!(items, before);
    }

    #[test]
    fn test_permissive_parsing() {
        assert_eq!(StatusFilter::parse("nonsense"), StatusFilter::All);
        assert_eq!(PriceBand::parse("all"), PriceBand::All);
        assert_eq!(PriceBand::parse("medium"), PriceBand::Medium);
        assert_eq!(
            CategoryFilter::parse("Mar"),
            CategoryFilter::Tag("Mar".to_string())
        );
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("up"), SortDirection::Asc);
    }
}
