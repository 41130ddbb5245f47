//! Fixed sample metrics shown behind the login gate.

use chrono::{Days, NaiveDate};
use shared::protocol::{Bar, BarChart, CardTone, DashboardData, SummaryCard, TransactionRow};

pub const TREND_DAYS: usize = 30;

const BAR_COLORS: [&str; 3] = ["darkgreen", "gold", "darkred"];
const USAGE_CATEGORIES: [&str; 3] = ["Best", "Normal", "Worst"];
const CATEGORY_COSTS: [u32; 3] = [50, 60, 40];
const DAILY_COSTS: [u32; TREND_DAYS] = [
    20, 18, 25, 15, 12, 10, 22, 24, 19, 17, 14, 21, 18, 25, 15, 12, 10, 22, 24, 19, 17, 14, 21,
    18, 25, 15, 12, 10, 22, 24,
];

pub fn sample_dashboard(today: NaiveDate) -> DashboardData {
    DashboardData {
        cards: summary_cards(),
        charts: vec![category_cost_chart(), daily_cost_chart(today)],
        transactions: transactions(),
    }
}

/// The `TREND_DAYS` days before `today`, newest first.
pub fn trailing_days(today: NaiveDate) -> Vec<NaiveDate> {
    (1..=TREND_DAYS as u64)
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect()
}

fn summary_cards() -> Vec<SummaryCard> {
    vec![
        SummaryCard {
            label: "Battery Usage".into(),
            value: "80%".into(),
            tone: CardTone::Blue,
        },
        SummaryCard {
            label: "Remaining Balance".into(),
            value: "£25".into(),
            tone: CardTone::Green,
        },
        SummaryCard {
            label: "Total Cost Last 30 Days".into(),
            value: "£150".into(),
            tone: CardTone::Red,
        },
    ]
}

fn category_cost_chart() -> BarChart {
    BarChart {
        id: "cost_chart".into(),
        title: "Cost Over Last 30 Days".into(),
        x_axis_title: "Usage Category".into(),
        y_axis_title: "Cost (£)".into(),
        bars: USAGE_CATEGORIES
            .iter()
            .zip(CATEGORY_COSTS)
            .zip(BAR_COLORS)
            .map(|((label, value), color)| Bar {
                label: label.to_string(),
                value,
                color: color.to_string(),
            })
            .collect(),
    }
}

fn daily_cost_chart(today: NaiveDate) -> BarChart {
    BarChart {
        id: "daily_cost_chart".into(),
        title: "Daily Cost Trend".into(),
        x_axis_title: "Date".into(),
        y_axis_title: "Cost (£)".into(),
        bars: trailing_days(today)
            .into_iter()
            .zip(DAILY_COSTS)
            .zip(BAR_COLORS.iter().cycle())
            .map(|((day, value), color)| Bar {
                label: day.format("%Y-%m-%d").to_string(),
                value,
                color: color.to_string(),
            })
            .collect(),
    }
}

fn transactions() -> Vec<TransactionRow> {
    [
        ((2025, 2, 1), "Best", 5, 5),
        ((2025, 2, 2), "Normal", 7, 5),
        ((2025, 2, 3), "Worst", 10, 10),
    ]
    .into_iter()
    .filter_map(|((y, m, d), category, cost, amount_paid)| {
        Some(TransactionRow {
            date: NaiveDate::from_ymd_opt(y, m, d)?,
            usage_category: category.to_string(),
            cost,
            amount_paid,
        })
    })
    .collect()
}
