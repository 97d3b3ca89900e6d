//! Card components for displaying the total and per-category amounts.

use maud::{Markup, html};

use crate::{
    html::format_currency,
    summary::{CategoryTotal, summary_total},
};

/// Renders the summary card section.
///
/// The first card shows the total across all categories, followed by one
/// card per category in summary order.
pub(super) fn summary_cards_view(summary: &[CategoryTotal]) -> Markup {
    let total = summary_total(summary);

    html! {
        section id="summary-cards" class="summary-cards"
        {
            (summary_card("Total Expenses", total))

            @for entry in summary {
                (summary_card(&entry.category, entry.total))
            }
        }
    }
}

/// Renders a single summary card with a label and a currency amount.
fn summary_card(label: &str, amount: f64) -> Markup {
    html! {
        div class="summary-card"
        {
            h3 { (label) }
            div class="amount" { (format_currency(amount)) }
        }
    }
}
