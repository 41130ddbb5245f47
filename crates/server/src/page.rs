//! Server-rendered markup for the single dashboard page.

use std::fmt::Write as _;

use shared::{
    domain::{Region, ViewState, LOGIN_BUTTON_ID, LOGOUT_CONTROL_ID},
    protocol::{BarChart, CardTone, DashboardData, SummaryCard, TransactionRow},
};

const CHART_WIDTH: u32 = 560;
const CHART_HEIGHT: u32 = 400;
const CHART_PADDING: u32 = 48;

pub fn render_page(view: ViewState, data: &DashboardData) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Energy Dashboard</title>\n\
         <link rel=\"stylesheet\" href=\"https://cdnjs.cloudflare.com/ajax/libs/materialize/1.0.0/css/materialize.min.css\">\n\
         </head>\n<body style=\"background-color:#2E2E2E;min-height:100vh;padding:20px\">\n",
    );
    render_header(&mut html, view);
    render_login(&mut html, view);
    render_dashboard(&mut html, view, data);
    html.push_str(SCRIPT);
    html.push_str("</body>\n</html>\n");
    html
}

fn display_style(view: ViewState, region: Region) -> String {
    format!("display:{}", view.display(region).as_css())
}

fn render_header(html: &mut String, view: ViewState) {
    let _ = write!(
        html,
        "<div class=\"container\"><nav class=\"nav-wrapper blue darken-3\">\
         <div style=\"display:flex;align-items:center;width:100%\">\
         <div style=\"flex:1;text-align:left\"><img src=\"/assets/logo.svg\" alt=\"logo\" style=\"height:50px\"></div>\
         <div style=\"flex:1;text-align:right\"><ul class=\"right\"><li>\
         <a id=\"{id}\" class=\"waves-effect waves-light btn red darken-3\" style=\"{style}\">Logout</a>\
         </li></ul></div></div></nav></div>\n",
        id = LOGOUT_CONTROL_ID,
        style = display_style(view, Region::UserMenu),
    );
}

fn render_login(html: &mut String, view: ViewState) {
    let _ = write!(
        html,
        "<div id=\"{id}\" class=\"container center-align\" style=\"margin-top:100px;{style}\">\
         <div class=\"card-panel grey darken-3 white-text\" style=\"max-width:400px;margin:auto;padding:20px\">\
         <h4 class=\"center-align white-text\">Login</h4><div class=\"row\">\
         <input id=\"username\" type=\"text\" placeholder=\"Enter username\" class=\"input-field col s12\">\
         <input id=\"password\" type=\"password\" placeholder=\"Enter password\" class=\"input-field col s12\">\
         <button id=\"{button}\" class=\"waves-effect waves-light btn green darken-3 col s12\">Login</button>\
         <div id=\"login-output\" class=\"red-text center-align mt-2\"></div>\
         </div></div></div>\n",
        id = Region::LoginScreen.element_id(),
        style = display_style(view, Region::LoginScreen),
        button = LOGIN_BUTTON_ID,
    );
}

fn render_dashboard(html: &mut String, view: ViewState, data: &DashboardData) {
    let _ = write!(
        html,
        "<div id=\"{id}\" class=\"container\" style=\"{style}\">\n<div class=\"row\">",
        id = Region::DashboardContent.element_id(),
        style = display_style(view, Region::DashboardContent),
    );
    for card in &data.cards {
        render_card(html, card);
    }
    html.push_str(
        "</div>\n<div class=\"row\" style=\"background-color:#1E1E1E;padding:20px;border-radius:10px\">",
    );
    for chart in &data.charts {
        render_bar_chart(html, chart);
    }
    html.push_str("</div>\n");
    render_transactions(html, &data.transactions);
    html.push_str("</div>\n");
}

fn render_card(html: &mut String, card: &SummaryCard) {
    let tone = match card.tone {
        CardTone::Blue => "blue",
        CardTone::Green => "green",
        CardTone::Red => "red",
    };
    let _ = write!(
        html,
        "<div class=\"card-panel {tone} darken-3 white-text center col s12 m4\">{label}: {value}</div>",
        label = escape(&card.label),
        value = escape(&card.value),
    );
}

/// Draws a bar chart as inline SVG scaled to the tallest bar.
fn render_bar_chart(html: &mut String, chart: &BarChart) {
    let plot_width = CHART_WIDTH - 2 * CHART_PADDING;
    let plot_height = CHART_HEIGHT - 2 * CHART_PADDING;
    let max = chart.max_value().max(1);
    let slot = plot_width as f64 / chart.bars.len().max(1) as f64;

    let _ = write!(
        html,
        "<div id=\"{id}\" class=\"col s12 m6\"><svg viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" \
         role=\"img\" style=\"background-color:#1E1E1E;color:white\">\
         <text x=\"{mid}\" y=\"24\" fill=\"white\" text-anchor=\"middle\">{title}</text>",
        id = escape(&chart.id),
        mid = CHART_WIDTH / 2,
        title = escape(&chart.title),
    );
    for (index, bar) in chart.bars.iter().enumerate() {
        let height = f64::from(bar.value) / f64::from(max) * f64::from(plot_height);
        let x = f64::from(CHART_PADDING) + slot * index as f64 + slot * 0.1;
        let y = f64::from(CHART_PADDING + plot_height) - height;
        let _ = write!(
            html,
            "<rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{w:.1}\" height=\"{height:.1}\" fill=\"{color}\">\
             <title>{label}: {value}</title></rect>",
            w = slot * 0.8,
            color = escape(&bar.color),
            label = escape(&bar.label),
            value = bar.value,
        );
    }
    let _ = write!(
        html,
        "<text x=\"{mid}\" y=\"{bottom}\" fill=\"white\" text-anchor=\"middle\">{x_title}</text>\
         <text x=\"14\" y=\"{center}\" fill=\"white\" text-anchor=\"middle\" \
         transform=\"rotate(-90 14 {center})\">{y_title}</text></svg></div>",
        mid = CHART_WIDTH / 2,
        bottom = CHART_HEIGHT - 12,
        center = CHART_HEIGHT / 2,
        x_title = escape(&chart.x_axis_title),
        y_title = escape(&chart.y_axis_title),
    );
}

fn render_transactions(html: &mut String, rows: &[TransactionRow]) {
    html.push_str(
        "<div class=\"container\"><h4 class=\"center-align white-text\">Transaction History</h4>\
         <table class=\"striped centered white-text\" style=\"background-color:#2E2E2E;border-radius:10px;padding:10px\">\
         <thead><tr class=\"grey darken-3 white-text\"><th>Date</th><th>Usage Category</th>\
         <th>Cost</th><th>Amount Paid</th></tr></thead><tbody>",
    );
    for row in rows {
        let _ = write!(
            html,
            "<tr><td>{date}</td><td>{category}</td><td>{cost}</td><td>{paid}</td></tr>",
            date = row.date.format("%Y-%m-%d"),
            category = escape(&row.usage_category),
            cost = row.cost,
            paid = row.amount_paid,
        );
    }
    html.push_str("</tbody></table></div>\n");
}

pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

// Keeps per-control click counters and applies the directives returned by
// `POST /events` to the three regions.
const SCRIPT: &str = r#"<script>
(function () {
  var clicks = { login: 0, logout: 0 };
  function apply(view) {
    document.getElementById("dashboard-content").style.display = view.dashboard_content;
    document.getElementById("login-screen").style.display = view.login_screen;
    document.getElementById("user-menu").style.display = view.user_menu;
    document.getElementById("login-output").textContent = view.login_output || "";
  }
  function send(trigger) {
    fetch("/events", {
      method: "POST",
      headers: { "content-type": "application/json" },
      body: JSON.stringify({
        trigger: trigger,
        login_clicks: clicks.login,
        logout_clicks: clicks.logout,
        username: document.getElementById("username").value || null,
        password: document.getElementById("password").value || null
      })
    }).then(function (r) { return r.ok ? r.json() : null; })
      .then(function (view) { if (view) { apply(view); } });
  }
  document.getElementById("login-button").addEventListener("click", function () {
    clicks.login += 1;
    send("login-button");
  });
  document.getElementById("user-menu").addEventListener("click", function () {
    clicks.logout += 1;
    send("user-menu");
  });
})();
</script>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::protocol::Bar;

    fn empty_data() -> DashboardData {
        DashboardData {
            cards: vec![],
            charts: vec![],
            transactions: vec![],
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn region_styles_follow_view_state() {
        let html = render_page(ViewState::DASHBOARD, &empty_data());
        assert!(html.contains(
            "id=\"dashboard-content\" class=\"container\" style=\"display:block\""
        ));
        assert!(html.contains("margin-top:100px;display:none"));
        assert!(html.contains(
            "id=\"user-menu\" class=\"waves-effect waves-light btn red darken-3\" style=\"display:block\""
        ));
    }

    #[test]
    fn chart_labels_are_escaped() {
        let data = DashboardData {
            cards: vec![],
            charts: vec![BarChart {
                id: "c".into(),
                title: "<script>".into(),
                x_axis_title: "x".into(),
                y_axis_title: "y".into(),
                bars: vec![Bar {
                    label: "a&b".into(),
                    value: 3,
                    color: "gold".into(),
                }],
            }],
            transactions: vec![TransactionRow {
                date: NaiveDate::from_ymd_opt(2025, 2, 1).expect("date"),
                usage_category: "Best".into(),
                cost: 5,
                amount_paid: 5,
            }],
        };
        let html = render_page(ViewState::LOGIN, &data);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a&amp;b: 3"));
        assert!(html.contains("<td>2025-02-01</td><td>Best</td><td>5</td><td>5</td>"));
    }
}
