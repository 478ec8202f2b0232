//! Derived views: pure computations over the current [`Storefront`]

use crate::model::{
    Category, CategoryFilter, MenuItem, Order, OrderStatus, Reservation, ReservationStatus,
    Review,
};
use crate::store::Storefront;

/// A titled group of menu items
#[derive(Clone, Debug, PartialEq)]
pub struct MenuSection<'a> {
    pub category: Category,
    pub items: Vec<&'a MenuItem>,
}

/// Case-insensitive substring match on name or description, plus category
pub fn filter_menu<'a>(
    items: &'a [MenuItem],
    query: &str,
    category: CategoryFilter,
) -> Vec<&'a MenuItem> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| category.matches(item.category))
        .filter(|item| {
            needle.is_empty()
                || item.name.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Group by category; sections appear in order of first appearance
pub fn group_by_category<'a>(items: &[&'a MenuItem]) -> Vec<MenuSection<'a>> {
    let mut sections: Vec<MenuSection<'a>> = Vec::new();
    for &item in items {
        match sections.iter_mut().find(|s| s.category == item.category) {
            Some(section) => section.items.push(item),
            None => sections.push(MenuSection {
                category: item.category,
                items: vec![item],
            }),
        }
    }
    sections
}

/// The menu as the current filters show it
pub fn menu_sections(state: &Storefront) -> Vec<MenuSection<'_>> {
    group_by_category(&filter_menu(&state.menu, &state.search_query, state.category))
}

/// Total number of units in the cart
pub fn cart_item_count(state: &Storefront) -> u32 {
    state.cart.iter().map(|entry| entry.quantity).sum()
}

pub fn popular_items(state: &Storefront) -> Vec<&MenuItem> {
    state.menu.iter().filter(|item| item.popular).collect()
}

/// The last `n` reviews, newest last
pub fn recent_reviews(state: &Storefront, n: usize) -> &[Review] {
    let start = state.reviews.len().saturating_sub(n);
    &state.reviews[start..]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarBucket {
    pub stars: u8,
    pub count: usize,
    /// Share of all reviews, 0 to 100
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewSummary {
    /// Mean rating, 0 when there are no reviews
    pub average: f64,
    pub count: usize,
    /// Buckets for 5 down to 1 stars
    pub histogram: [StarBucket; 5],
}

pub fn review_summary(reviews: &[Review]) -> ReviewSummary {
    let count = reviews.len();
    let average = if count == 0 {
        0.0
    } else {
        reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>() / count as f64
    };
    let histogram = [5u8, 4, 3, 2, 1].map(|stars| {
        let matching = reviews.iter().filter(|r| r.rating == stars).count();
        StarBucket {
            stars,
            count: matching,
            percentage: if count == 0 {
                0.0
            } else {
                matching as f64 * 100.0 / count as f64
            },
        }
    });
    ReviewSummary {
        average,
        count,
        histogram,
    }
}

pub fn order_status_count(orders: &[Order], status: OrderStatus) -> usize {
    orders.iter().filter(|o| o.status == status).count()
}

pub fn reservation_status_count(reservations: &[Reservation], status: ReservationStatus) -> usize {
    reservations.iter().filter(|r| r.status == status).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Id;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn item(id: &str, name: &str, description: &str, category: Category) -> MenuItem {
        MenuItem {
            id: Id::new(id),
            name: name.into(),
            description: description.into(),
            price: Decimal::new(1000, 2),
            category,
            image: String::new(),
            rating: 4.5,
            review_count: 3,
            popular: false,
        }
    }

    fn review(rating: u8) -> Review {
        Review {
            id: Id::new(format!("rev-{rating}")),
            customer_name: "Sam".into(),
            rating,
            comment: "ok".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            menu_item_id: None,
        }
    }

    fn menu() -> Vec<MenuItem> {
        vec![
            item("item-1", "Pancakes", "Fluffy stack", Category::Breakfast),
            item("item-2", "Club Sandwich", "Grilled chicken", Category::Lunch),
            item("item-3", "Lemonade", "Fresh squeezed", Category::Drinks),
            item("item-4", "Chicken Parm", "With spaghetti", Category::Dinner),
            item("item-5", "Omelette", "Three eggs", Category::Breakfast),
        ]
    }

    #[test]
    fn test_filter_matches_name_or_description() {
        let menu = menu();
        let found = filter_menu(&menu, "CHICKEN", CategoryFilter::All);
        let ids: Vec<_> = found.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["item-2", "item-4"]);
    }

    #[test]
    fn test_filter_by_category() {
        let menu = menu();
        let found = filter_menu(&menu, "chicken", CategoryFilter::Only(Category::Dinner));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "item-4");

        assert!(filter_menu(&menu, "", CategoryFilter::Only(Category::Desserts)).is_empty());
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let menu = menu();
        assert_eq!(filter_menu(&menu, "  ", CategoryFilter::All).len(), menu.len());
    }

    #[test]
    fn test_grouping_preserves_first_appearance() {
        let menu = menu();
        let sections = group_by_category(&filter_menu(&menu, "", CategoryFilter::All));
        let order: Vec<_> = sections.iter().map(|s| s.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Breakfast,
                Category::Lunch,
                Category::Drinks,
                Category::Dinner
            ]
        );
        let breakfast: Vec<_> = sections[0].items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(breakfast, vec!["item-1", "item-5"]);
    }

    #[test]
    fn test_no_match_gives_no_sections() {
        let state = Storefront {
            menu: menu(),
            search_query: "sushi".into(),
            ..Default::default()
        };
        assert!(menu_sections(&state).is_empty());
    }

    #[test]
    fn test_review_summary() {
        let reviews = vec![review(5), review(4), review(4), review(1)];
        let summary = review_summary(&reviews);

        assert_eq!(summary.count, 4);
        assert!((summary.average - 3.5).abs() < f64::EPSILON);
        assert_eq!(summary.histogram[0].stars, 5);
        assert_eq!(summary.histogram[0].count, 1);
        assert_eq!(summary.histogram[1].count, 2);
        assert!((summary.histogram[1].percentage - 50.0).abs() < f64::EPSILON);
        assert_eq!(summary.histogram[2].count, 0);
        assert_eq!(summary.histogram[4].stars, 1);
    }

    #[test]
    fn test_review_summary_histogram() {
        let reviews = vec![review(5), review(5), review(4), review(3)];
        let summary = review_summary(&reviews);

        assert!((summary.average - 4.25).abs() < f64::EPSILON);
        let counts: Vec<(u8, usize)> = summary
            .histogram
            .iter()
            .map(|bucket| (bucket.stars, bucket.count))
            .collect();
        assert_eq!(counts, vec![(5, 2), (4, 1), (3, 1), (2, 0), (1, 0)]);
        assert!((summary.histogram[0].percentage - 50.0).abs() < f64::EPSILON);
        assert!((summary.histogram[2].percentage - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_review_summary_empty() {
        let summary = review_summary(&[]);
        assert_eq!(summary.average, 0.0);
        assert!(summary.histogram.iter().all(|b| b.count == 0 && b.percentage == 0.0));
    }

    #[test]
    fn test_recent_reviews() {
        let state = Storefront {
            reviews: vec![review(1), review(2), review(3), review(4)],
            ..Default::default()
        };
        let recent: Vec<_> = recent_reviews(&state, 3).iter().map(|r| r.rating).collect();
        assert_eq!(recent, vec![2, 3, 4]);
        assert_eq!(recent_reviews(&Storefront::default(), 3).len(), 0);
    }
}
