//! Keyword-based expense categorization.
//!
//! Descriptions are matched against a fixed keyword table. The first category
//! with a matching keyword wins, so more specific categories should come
//! before broader ones in the table.

/// The category assigned when no keyword matches.
pub const FALLBACK_CATEGORY: &str = "Others";

/// Keywords that assign a category to an expense description.
///
/// Matching is case-insensitive and checks for substring containment, e.g.
/// the keyword "coffee" matches the description "Morning Coffee Run".
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Food",
        &[
            "food",
            "lunch",
            "dinner",
            "breakfast",
            "snacks",
            "coffee",
            "restaurant",
            "cafe",
            "pizza",
            "burger",
            "meal",
        ],
    ),
    (
        "Grocery",
        &["grocery", "fruits", "vegetables", "supermarket", "mart"],
    ),
    (
        "Transport",
        &["petrol", "fuel", "uber", "taxi", "bus", "metro"],
    ),
    (
        "Bills",
        &["bill", "electricity", "water", "internet", "phone", "rent"],
    ),
    (
        "Healthcare",
        &["medicine", "doctor", "hospital", "medical", "pharmacy"],
    ),
    (
        "Shopping",
        &["amazon", "flipkart", "clothing", "shoes", "electronics"],
    ),
    (
        "Entertainment",
        &["movie", "cinema", "netflix", "spotify", "game", "entertainment"],
    ),
];

/// Assign a category to an expense based on its description.
///
/// Returns [FALLBACK_CATEGORY] if no keyword matches.
pub fn categorize(description: &str) -> &'static str {
    let description = description.to_lowercase();

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| description.contains(keyword)) {
            return category;
        }
    }

    FALLBACK_CATEGORY
}
