// forum-stats entry point.
// Loads configuration, sets up logging, and runs the dashboard until the user quits.

use std::sync::Arc;

use tracing::info;

use forum_stats::app::App;
use forum_stats::cache::{self, Clock, ResponseCache, SystemClock};
use forum_stats::config::Config;
use forum_stats::discourse::{DiscourseClient, Forum};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    forum_stats::telemetry::init(cache::cache_dir().as_deref())?;
    info!(base_url = %config.base_url, days = config.lookback.days(), "starting");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache = Arc::new(ResponseCache::new(config.cache_ttl, clock.clone()));
    let client = DiscourseClient::from_config(&config)?;
    let forum = Forum::new(client, cache, clock).with_max_pages(config.max_pages);

    let mut terminal = ratatui::init();
    let mut app = App::new(config.lookback);
    let result = app.run(&mut terminal, &forum, &runtime);
    ratatui::restore();

    result?;
    info!("exiting");
    Ok(())
}
