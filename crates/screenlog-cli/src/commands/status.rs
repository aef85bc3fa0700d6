use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use screenlog_api::ApiError;
use screenlog_core::ItemSnapshot;
use screenlog_models::{ContentKey, ContentType, WatchStatus};

pub async fn run_status(
    content_id: String,
    content_type: ContentType,
    output: &Output,
) -> Result<()> {
    let registry = super::connect()?;
    let key = ContentKey::new(content_id, content_type);
    let controller = registry.controller(&key);

    controller.refresh().await.map_err(map_api_error)?;

    print_snapshot(&controller.snapshot(), output);
    Ok(())
}

pub(crate) fn map_api_error(err: ApiError) -> color_eyre::eyre::Report {
    match err {
        ApiError::Auth => {
            eyre!("Session rejected by the backend. Run 'screenlog login --token <TOKEN>' again")
        }
        other => eyre!("{}", other),
    }
}

pub(crate) fn print_snapshot(snapshot: &ItemSnapshot, output: &Output) {
    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return;
            }

            let status = match snapshot.status {
                WatchStatus::Watched => "watched".green().to_string(),
                WatchStatus::Watching => "watching".yellow().to_string(),
                WatchStatus::Unwatched => "unwatched".bright_black().to_string(),
            };
            println!("{}  {}", snapshot.key, status);

            if let Some(log) = &snapshot.representative {
                match log.rating {
                    Some(rating) => {
                        println!("  last logged {} (rated {:.1})", log.watched_date, rating)
                    }
                    None => println!("  last logged {}", log.watched_date),
                }
            }

            if snapshot.in_watchlist {
                println!("  {} on watchlist", "◆".cyan());
            }

            if let Some(error) = &snapshot.error {
                println!("  {} {}", "✗".red(), error.message);
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => match serde_json::to_value(snapshot) {
            Ok(value) => output.json(&value),
            Err(e) => output.error(&format!("Failed to serialize snapshot: {}", e)),
        },
    }
}
