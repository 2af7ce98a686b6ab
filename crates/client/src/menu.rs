//! Menu grouping, filtering, and sorting.
//!
//! Pure list transformations over [`Product`]. No pagination anywhere: the
//! full result set is recomputed per change, which is fine at coffee-menu
//! scale.

use roastline_core::Price;

use crate::api::Product;

/// Category assigned to products the server left uncategorized.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Products of one category, in server order.
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<Product>,
}

/// Category selector: everything, or one exact category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

/// Sort key for the favorites list. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Rating, best first.
    Rating,
    /// Numeric price, most expensive first.
    Price,
    /// Name, A to Z, case-insensitive.
    Name,
}

/// Partition a flat product list into category groups.
///
/// Groups appear in order of first occurrence; a product with a blank
/// category lands in [`DEFAULT_CATEGORY`]. Every product lands in exactly
/// one group.
#[must_use]
pub fn group_by_category(products: Vec<Product>) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for mut product in products {
        if product.category.trim().is_empty() {
            product.category = DEFAULT_CATEGORY.to_owned();
        }
        let category = product.category.clone();
        if let Some(group) = groups.iter_mut().find(|g| g.category == category) {
            group.items.push(product);
        } else {
            groups.push(CategoryGroup {
                category,
                items: vec![product],
            });
        }
    }
    groups
}

/// Filter grouped products by category selection and search text.
///
/// The query matches case-insensitively against name and description.
/// Groups left without items are dropped.
#[must_use]
pub fn filter_groups(
    groups: &[CategoryGroup],
    filter: &CategoryFilter,
    query: &str,
) -> Vec<CategoryGroup> {
    groups
        .iter()
        .filter(|group| filter.matches(&group.category))
        .filter_map(|group| {
            let items: Vec<Product> = group
                .items
                .iter()
                .filter(|item| matches_query(item, query))
                .cloned()
                .collect();
            (!items.is_empty()).then(|| CategoryGroup {
                category: group.category.clone(),
                items,
            })
        })
        .collect()
}

/// Filter a flat product list by category selection.
#[must_use]
pub fn filter_by_category(products: &[Product], filter: &CategoryFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|p| filter.matches(&p.category))
        .cloned()
        .collect()
}

/// Sort a product list in place by the single active key.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Price => {
            products.sort_by(|a, b| Price::parse(&b.price).cmp(&Price::parse(&a.price)));
        }
        SortKey::Name => {
            products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
    }
}

/// Case-insensitive substring match over name and description.
fn matches_query(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(id: i64, name: &str, description: &str, category: &str, price: &str) -> Product {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "description": description,
            "category": category,
            "price": price,
        }))
        .unwrap()
    }

    fn sample_menu() -> Vec<Product> {
        vec![
            product(1, "Latte", "Espresso with steamed milk", "Drinks", "50"),
            product(2, "Bagel", "Toasted, with cream cheese", "Food", "20"),
            product(3, "Mocha", "Chocolate and espresso", "Drinks", "80"),
            product(4, "Mystery Cup", "Barista's choice", "", "35"),
        ]
    }

    #[test]
    fn test_grouping_is_a_partition() {
        let input = sample_menu();
        let input_ids: Vec<i64> = input.iter().map(|p| p.id.as_i64()).collect();

        let groups = group_by_category(input);
        let mut output_ids: Vec<i64> = groups
            .iter()
            .flat_map(|g| g.items.iter().map(|p| p.id.as_i64()))
            .collect();

        // Every product appears exactly once across all groups.
        output_ids.sort_unstable();
        let mut expected = input_ids;
        expected.sort_unstable();
        assert_eq!(output_ids, expected);
    }

    #[test]
    fn test_grouping_defaults_blank_category() {
        let groups = group_by_category(sample_menu());
        let other = groups
            .iter()
            .find(|g| g.category == DEFAULT_CATEGORY)
            .unwrap();
        assert_eq!(other.items.len(), 1);
        assert_eq!(other.items.first().unwrap().name, "Mystery Cup");
    }

    #[test]
    fn test_grouping_preserves_first_occurrence_order() {
        let categories: Vec<String> = group_by_category(sample_menu())
            .into_iter()
            .map(|g| g.category)
            .collect();
        assert_eq!(categories, ["Drinks", "Food", DEFAULT_CATEGORY]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let groups = group_by_category(sample_menu());

        let upper = filter_groups(&groups, &CategoryFilter::All, "Latte");
        let lower = filter_groups(&groups, &CategoryFilter::All, "latte");

        let ids = |gs: &[CategoryGroup]| -> Vec<i64> {
            gs.iter()
                .flat_map(|g| g.items.iter().map(|p| p.id.as_i64()))
                .collect()
        };
        assert_eq!(ids(&upper), ids(&lower));
        assert_eq!(ids(&upper), vec![1]);
    }

    #[test]
    fn test_search_matches_description() {
        let groups = group_by_category(sample_menu());
        let hits = filter_groups(&groups, &CategoryFilter::All, "cream cheese");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().unwrap().items.first().unwrap().name, "Bagel");
    }

    #[test]
    fn test_category_filter_is_exact_or_all() {
        let groups = group_by_category(sample_menu());

        let drinks = filter_groups(&groups, &CategoryFilter::Only("Drinks".to_owned()), "");
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks.first().unwrap().items.len(), 2);

        let all = filter_groups(&groups, &CategoryFilter::All, "");
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_empty_groups_are_dropped() {
        let groups = group_by_category(sample_menu());
        let hits = filter_groups(&groups, &CategoryFilter::Only("Food".to_owned()), "latte");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_sort_by_price_descending_parses_strings() {
        let mut items = vec![
            product(1, "A", "", "Drinks", "50"),
            product(2, "B", "", "Drinks", "20"),
            product(3, "C", "", "Drinks", "80"),
        ];
        sort_products(&mut items, SortKey::Price);
        let prices: Vec<&str> = items.iter().map(|p| p.price.as_str()).collect();
        assert_eq!(prices, ["80", "50", "20"]);
    }

    #[test]
    fn test_sort_by_rating_descending() {
        let mut items: Vec<Product> = [(1, 3.5), (2, 4.8), (3, 4.1)]
            .into_iter()
            .map(|(id, rating)| {
                serde_json::from_value(json!({"id": id, "name": "x", "rating": rating})).unwrap()
            })
            .collect();
        sort_products(&mut items, SortKey::Rating);
        let ids: Vec<i64> = items.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let mut items = vec![
            product(1, "mocha", "", "Drinks", "1"),
            product(2, "Bagel", "", "Food", "1"),
            product(3, "Latte", "", "Drinks", "1"),
        ];
        sort_products(&mut items, SortKey::Name);
        let names: Vec<&str> = items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Bagel", "Latte", "mocha"]);
    }
}
