//! Diff command handler
//!
//! Prints the work set an incremental cook would process.

use anyhow::Result;

use hotcook::application::CookOptions;
use hotcook::domain::value_objects::PlatformId;
use hotcook::infrastructure::ProcessSupervisor;
use hotcook::presentation::{create_cook_use_case, create_event_sink};

use super::load_config;

pub fn cmd_diff(
    config_path: Option<&std::path::Path>,
    platforms: Option<Vec<PlatformId>>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    let mut options = CookOptions::new();
    if let Some(platforms) = platforms.filter(|p| !p.is_empty()) {
        options = options.with_platforms(platforms);
    }

    let events = create_event_sink(json, true, false);
    let use_case = create_cook_use_case(&config, ProcessSupervisor::new(), events);
    let preview = use_case.preview_work_set(&config, &options)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "diff",
                "command": "diff",
                "preview": preview,
            })
        );
        return Ok(());
    }

    let Some(preview) = preview else {
        println!(
            "No base version at {}; the next cook will be a full cook.",
            config.resolved_state_path().display()
        );
        return Ok(());
    };

    println!("Base version: {}", preview.base_id);
    if preview.work_set.is_empty() {
        println!("Up to date.");
        return Ok(());
    }
    for platform in &preview.platforms {
        let assets = preview.work_set.assets_for(platform);
        let files = preview.work_set.external_files_for(platform);
        println!(
            "{}: {} asset(s), {} external file(s)",
            platform,
            assets.map_or(0, |a| a.len()),
            files.map_or(0, |f| f.len())
        );
        for asset in assets.into_iter().flatten() {
            println!("  + {}", asset);
        }
        for file in files.into_iter().flatten() {
            println!("  + {}", file.display());
        }
    }
    Ok(())
}
