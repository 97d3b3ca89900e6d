//! Dashboard HTTP handlers and view rendering.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    dashboard::{
        cards::summary_cards_view,
        charts::{
            DashboardChart, category_bar_chart, category_ring_chart, charts_script, charts_view,
        },
        tables::expenses_table,
    },
    expense::{Expense, get_all_expenses},
    html::{HeadElement, base},
    summary::{CategoryTotal, get_summary},
};

/// The URL of the ECharts library used to render the dashboard charts.
const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js";

/// Display the dashboard page with summary cards, charts, and the expense table.
///
/// Both reads (the expense list and the category summary) must succeed
/// before anything is rendered; any failure aborts the render and yields the
/// error page instead of a partial dashboard.
pub async fn get_dashboard_page(State(state): State<AppState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_all_expenses(&connection)
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;
    let summary = get_summary(&connection)
        .inspect_err(|error| tracing::error!("could not get summary: {error}"))?;

    drop(connection);

    Ok(dashboard_view(&summary, &expenses).into_response())
}

/// Creates the array of dashboard charts from the category summary.
fn build_dashboard_charts(summary: &[CategoryTotal]) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "category-ring-chart",
            options: category_ring_chart(summary).to_string(),
        },
        DashboardChart {
            id: "category-bar-chart",
            options: category_bar_chart(summary).to_string(),
        },
    ]
}

/// Renders the full dashboard page.
///
/// Components appear in a fixed order: summary cards, ring chart, bar chart,
/// expense table. The upload and manual-entry modals are rendered hidden and
/// toggled by the client script.
fn dashboard_view(summary: &[CategoryTotal], expenses: &[Expense]) -> Markup {
    let charts = build_dashboard_charts(summary);

    let content = html!(
        header class="dashboard-header"
        {
            h1 { "Expense Dashboard" }

            div class="header-actions"
            {
                button id="show-upload" class="button" { "Upload File" }
                button id="show-manual" class="button" { "Add Manually" }
                button id="clear-expenses" class="button button-danger" { "Clear All" }
            }
        }

        main class="dashboard-content"
        {
            (summary_cards_view(summary))

            (charts_view(&charts))

            (expenses_table(expenses))
        }

        (upload_modal())

        (manual_modal())
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}

/// Renders the hidden modal dialog for uploading a CSV expense file.
fn upload_modal() -> Markup {
    html!(
        div id="upload-modal" class="modal"
        {
            div class="modal-content"
            {
                h2 { "Upload Expense File" }

                form id="upload-form"
                {
                    label for="file" { "CSV file with Description and Amount columns" }
                    input type="file" id="file" name="file" accept=".csv" required;

                    button type="submit" class="button" { "Upload" }
                }
            }
        }
    )
}

/// Renders the hidden modal dialog for adding an expense manually.
fn manual_modal() -> Markup {
    html!(
        div id="manual-modal" class="modal"
        {
            div class="modal-content"
            {
                h2 { "Add Expense" }

                form id="manual-form"
                {
                    label for="description" { "Description" }
                    input
                        type="text"
                        id="description"
                        name="description"
                        placeholder="e.g. Lunch"
                        required;

                    label for="amount" { "Amount" }
                    input
                        type="number"
                        id="amount"
                        name="amount"
                        step="0.01"
                        placeholder="0.00"
                        required;

                    button type="submit" class="button" { "Add" }
                }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode},
    };
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{
        AppState,
        expense::{NewExpense, create_expense},
    };

    use super::get_dashboard_page;

    fn get_test_state() -> AppState {
        let conn = Connection::open_in_memory().unwrap();
        AppState::new(conn).unwrap()
    }

    fn add_expense(description: &str, amount: f64, state: &AppState) {
        let connection = state.db_connection.lock().unwrap();
        create_expense(NewExpense::build(description, amount).unwrap(), &connection).unwrap();
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_chart_exists(html: &Html, chart_id: &str) {
        let selector = Selector::parse(&format!("#{}", chart_id)).unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "Chart with id '{}' not found",
            chart_id
        );
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
        let state = get_test_state();
        add_expense("Lunch", 12.5, &state);
        add_expense("Taxi home", 23.0, &state);

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);

        assert_chart_exists(&html, "category-ring-chart");
        assert_chart_exists(&html, "category-bar-chart");

        // Total card plus one card per category.
        let card_selector = Selector::parse(".summary-card").unwrap();
        assert_eq!(html.select(&card_selector).count(), 3);

        let row_selector = Selector::parse("tbody tr").unwrap();
        assert_eq!(html.select(&row_selector).count(), 2);
    }

    #[tokio::test]
    async fn empty_dashboard_shows_placeholder_row_and_zero_total() {
        let state = get_test_state();

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;
        assert_valid_html(&html);

        let row_selector = Selector::parse("tbody tr").unwrap();
        let rows: Vec<_> = html.select(&row_selector).collect();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].text().collect::<String>().contains("No expenses yet"));

        let amount_selector = Selector::parse(".summary-card .amount").unwrap();
        let total = html
            .select(&amount_selector)
            .next()
            .unwrap()
            .text()
            .collect::<String>();
        assert_eq!(total, "$0.00");
    }

    #[tokio::test]
    async fn dashboard_page_includes_modals() {
        let state = get_test_state();

        let response = get_dashboard_page(State(state)).await.unwrap();
        let html = parse_html(response).await;

        for selector in ["#upload-modal form#upload-form", "#manual-modal form#manual-form"] {
            let selector = Selector::parse(selector).unwrap();
            assert!(
                html.select(&selector).next().is_some(),
                "missing modal form: {selector:?}"
            );
        }
    }
}
