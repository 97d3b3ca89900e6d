//! The expense table view for the dashboard.

use maud::{Markup, html};

use crate::{expense::Expense, html::format_currency};

/// The text shown when there are no expenses to display.
pub(super) const EMPTY_TABLE_TEXT: &str = "No expenses yet";

/// Renders the expense table.
///
/// Shows one row per expense in input order with its description,
/// currency-formatted amount, and category. An empty list renders a single
/// placeholder row instead.
pub(super) fn expenses_table(expenses: &[Expense]) -> Markup {
    html! {
        section id="expenses" class="expenses-section"
        {
            h2 { "All Expenses" }

            table class="expenses-table"
            {
                thead
                {
                    tr
                    {
                        th { "Description" }
                        th { "Amount" }
                        th { "Category" }
                    }
                }

                tbody id="expenses-body"
                {
                    @if expenses.is_empty() {
                        tr
                        {
                            td colspan="3" class="empty-row" { (EMPTY_TABLE_TEXT) }
                        }
                    } @else {
                        @for expense in expenses {
                            tr
                            {
                                td { (expense.description) }
                                td { (format_currency(expense.amount)) }
                                td { (expense.category) }
                            }
                        }
                    }
                }
            }
        }
    }
}
