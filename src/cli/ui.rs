//! tabboard ui command: launches the terminal dashboard.

use crate::error::Result;
use crate::profile::GithubProfileClient;
use crate::tabs::Tab;
use crate::todo::TodoWidget;
use crate::ui::dashboard;

use super::Context;

pub fn run(context: Context) -> Result<()> {
    let widget = TodoWidget::open(context.storage.slots(), &context.config.store.slot);
    let client = GithubProfileClient::new(&context.config.profile)?;
    let tab = context
        .config
        .ui
        .default_tab
        .parse::<Tab>()
        .unwrap_or_default();
    dashboard::run(widget, client, tab)
}
