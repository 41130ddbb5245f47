use std::path::PathBuf;

use chrono::NaiveDate;
use session::SessionViewController;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) controller: SessionViewController,
    pub(crate) assets_dir: PathBuf,
    pub(crate) body_limit_bytes: usize,
    pub(crate) today: fn() -> NaiveDate,
}

pub(crate) fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
