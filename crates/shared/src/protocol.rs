use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{ClickCounters, Credentials, Display, Region, ViewState};

/// Body of `POST /events`: one control activation plus the form snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRequest {
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub login_clicks: u64,
    #[serde(default)]
    pub logout_clicks: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl EventRequest {
    pub fn counters(&self) -> ClickCounters {
        ClickCounters::new(self.login_clicks, self.logout_clicks)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Display directives for each region, keyed by what the page element shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewResponse {
    pub dashboard_content: Display,
    pub login_screen: Display,
    pub user_menu: Display,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_output: Option<String>,
}

impl ViewResponse {
    pub fn new(view: ViewState, login_output: Option<String>) -> Self {
        Self {
            dashboard_content: view.display(Region::DashboardContent),
            login_screen: view.display(Region::LoginScreen),
            user_menu: view.display(Region::UserMenu),
            login_output,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTone {
    Blue,
    Green,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCard {
    pub label: String,
    pub value: String,
    pub tone: CardTone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarChart {
    pub id: String,
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn max_value(&self) -> u32 {
        self.bars.iter().map(|bar| bar.value).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub date: NaiveDate,
    pub usage_category: String,
    pub cost: u32,
    pub amount_paid: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    pub cards: Vec<SummaryCard>,
    pub charts: Vec<BarChart>,
    pub transactions: Vec<TransactionRow>,
}
