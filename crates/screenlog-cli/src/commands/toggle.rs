use super::status::{map_api_error, print_snapshot};
use crate::output::Output;
use color_eyre::Result;
use screenlog_core::ToggleOutcome;
use screenlog_models::{ContentKey, ContentType};

pub async fn run_watched(
    content_id: String,
    content_type: ContentType,
    output: &Output,
) -> Result<()> {
    let registry = super::connect()?;
    let key = ContentKey::new(content_id, content_type);
    let controller = registry.controller(&key);

    // Fetch current logs first so the toggle knows whether to remove or create
    controller.refresh().await.map_err(map_api_error)?;

    match controller.toggle_watched().await {
        Ok(ToggleOutcome::Completed) => {
            print_snapshot(&controller.snapshot(), output);
            Ok(())
        }
        Ok(ToggleOutcome::Dropped) => {
            output.warn("Another change is still in flight for this title; request dropped");
            Ok(())
        }
        Err(err) => Err(map_api_error(err)),
    }
}

pub async fn run_watchlist(
    content_id: String,
    content_type: ContentType,
    output: &Output,
) -> Result<()> {
    let registry = super::connect()?;
    let key = ContentKey::new(content_id, content_type);
    let controller = registry.controller(&key);

    controller.refresh().await.map_err(map_api_error)?;

    match controller.toggle_watchlist().await {
        Ok(ToggleOutcome::Completed) => {
            print_snapshot(&controller.snapshot(), output);
            Ok(())
        }
        Ok(ToggleOutcome::Dropped) => {
            output.warn("Another change is still in flight for this title; request dropped");
            Ok(())
        }
        Err(err) => Err(map_api_error(err)),
    }
}
