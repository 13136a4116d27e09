//! # CLI
//!
//! One client of the sprig library. This is the only place that touches the
//! terminal, reads the environment or decides exit codes.
//!
//! ## Plant selection
//!
//! Commands that act on existing plants take one or more selectors: the
//! index shown by `sprig list`, the plant's full id, or its name (case
//! insensitive, must be unique).
//!
//! ## Naked execution
//!
//! `sprig` with no subcommand lists plants, preceded by a notice when any of
//! them needs water.
//!
//! ## Data directory
//!
//! `--data`, then `SPRIG_DATA`, then the platform data directory. Plants,
//! profile, theme and `config.json` all live there.

mod args;
mod print;

use args::{Cli, Commands, PlantFields};
use chrono::Utc;
use clap::Parser;
use directories::ProjectDirs;
use print::Printer;
use sprig::api::{ConfigAction, LocationFilter, PlantFilter, ProfileUpdate, SprigApi};
use sprig::config::SprigConfig;
use sprig::error::{Result, SprigError};
use sprig::identify::ImagePayload;
use sprig::model::{CareAction, Location, PlantDraft, PlantPatch};
use sprig::store::fs_backend::FsBackend;
use sprig::store::plant_store::PlantStore;
use sprig::themes::ThemeId;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DATA_ENV: &str = "SPRIG_DATA";

struct AppContext {
    api: SprigApi<FsBackend>,
    printer: Printer,
    soon_days: i64,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add { name, fields }) => handle_add(&mut ctx, name, fields),
        Some(Commands::List { search, location }) => handle_list(&mut ctx, search, location),
        Some(Commands::View { plants }) => handle_view(&mut ctx, plants),
        Some(Commands::Edit {
            plant,
            name,
            fields,
        }) => handle_edit(&mut ctx, plant, name, fields),
        Some(Commands::Delete { plants }) => handle_delete(&mut ctx, plants),
        Some(Commands::Water { plants }) => handle_care(&mut ctx, plants, CareAction::Water),
        Some(Commands::Fertilize { plants }) => {
            handle_care(&mut ctx, plants, CareAction::Fertilize)
        }
        Some(Commands::Repot { plants }) => handle_care(&mut ctx, plants, CareAction::Repot),
        Some(Commands::Reminders) => handle_reminders(&mut ctx),
        Some(Commands::History { limit }) => handle_history(&mut ctx, limit),
        Some(Commands::Identify {
            image,
            save,
            location,
        }) => handle_identify(&mut ctx, image, save, location).await,
        Some(Commands::Profile {
            name,
            email,
            phone,
            location,
            bio,
            avatar,
        }) => {
            let changes = ProfileUpdate {
                name,
                email,
                phone,
                location,
                bio,
                avatar: avatar.as_deref().map(read_image).transpose()?,
            };
            handle_profile(&mut ctx, changes)
        }
        Some(Commands::Theme { theme }) => handle_theme(&mut ctx, theme),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None, None),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "sprig", "sprig")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            SprigError::Config(format!(
                "Could not determine a data directory, set {}",
                DATA_ENV
            ))
        })
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dir = data_dir(cli)?;
    tracing::debug!(dir = %dir.display(), "using data directory");

    let config = SprigConfig::load(&dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable config.json, using defaults");
        SprigConfig::default()
    });

    let store = PlantStore::with_backend(FsBackend::new(dir.clone()));
    let api = SprigApi::new(store, dir);
    let theme = api.theme()?.theme.unwrap_or_default();

    Ok(AppContext {
        api,
        printer: Printer::new(theme, config.soon_days),
        soon_days: config.soon_days,
    })
}

fn read_image(path: &Path) -> Result<String> {
    Ok(ImagePayload::from_file(path)?.as_str().to_string())
}

fn draft_from(name: String, fields: PlantFields) -> Result<PlantDraft> {
    let mut draft = PlantDraft::new(name);
    if let Some(species) = fields.species {
        draft.species = species;
    }
    if let Some(kind) = fields.kind {
        draft.kind = kind;
    }
    if let Some(location) = fields.location {
        draft.location = location;
    }
    if let Some(light) = fields.light {
        draft.light_needs = light;
    }
    if let Some(humidity) = fields.humidity {
        draft.humidity_needs = humidity;
    }
    if let Some(temp) = fields.temp {
        draft.temp_range = temp;
    }
    if let Some(days) = fields.water_every {
        draft.watering_frequency = days;
    }
    if let Some(days) = fields.fertilize_every {
        draft.fertilizing_frequency = days;
    }
    if let Some(years) = fields.repot_every {
        draft.repotting_frequency = years;
    }
    draft.acquisition_date = fields.acquired;
    draft.notes = fields.notes;
    draft.image = fields.image.as_deref().map(read_image).transpose()?;
    Ok(draft)
}

fn patch_from(name: Option<String>, fields: PlantFields) -> Result<PlantPatch> {
    Ok(PlantPatch {
        name,
        species: fields.species,
        kind: fields.kind,
        image: fields.image.as_deref().map(read_image).transpose()?,
        acquisition_date: fields.acquired,
        watering_frequency: fields.water_every,
        fertilizing_frequency: fields.fertilize_every,
        repotting_frequency: fields.repot_every,
        location: fields.location,
        light_needs: fields.light,
        humidity_needs: fields.humidity,
        temp_range: fields.temp,
        notes: fields.notes,
    })
}

fn handle_add(ctx: &mut AppContext, name: String, fields: PlantFields) -> Result<()> {
    let draft = draft_from(name, fields)?;
    let result = ctx.api.add_plant(draft)?;
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_list(
    ctx: &mut AppContext,
    search: Option<String>,
    location: Option<Location>,
) -> Result<()> {
    let notice = ctx.api.startup_check()?;
    ctx.printer.messages(&notice.messages);

    let filter = PlantFilter {
        search,
        location: location.map_or(LocationFilter::All, LocationFilter::Only),
    };
    let result = ctx.api.list_plants(&filter)?;
    ctx.printer.plants(&result.listed_plants, Utc::now());
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, plants: Vec<String>) -> Result<()> {
    let result = ctx.api.view_plants(&plants)?;
    ctx.printer.plant_details(&result.listed_plants, Utc::now());
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    plant: String,
    name: Option<String>,
    fields: PlantFields,
) -> Result<()> {
    let patch = patch_from(name, fields)?;
    let result = ctx.api.update_plant(&plant, &patch)?;
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, plants: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_plants(&plants)?;
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_care(ctx: &mut AppContext, plants: Vec<String>, action: CareAction) -> Result<()> {
    let result = ctx.api.record_care(&plants, action)?;
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_reminders(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.reminders()?;
    ctx.printer.messages(&result.messages);
    if let Some(board) = &result.board {
        ctx.printer.board(board);
    }
    Ok(())
}

fn handle_history(ctx: &mut AppContext, limit: Option<usize>) -> Result<()> {
    let result = ctx.api.history(limit)?;
    ctx.printer.history(&result.history, Utc::now());
    Ok(())
}

async fn handle_identify(
    ctx: &mut AppContext,
    image: PathBuf,
    save: bool,
    location: Option<Location>,
) -> Result<()> {
    let payload = ImagePayload::from_file(&image)?;
    let draft = PlantDraft {
        location: location.unwrap_or_default(),
        ..PlantDraft::default()
    };

    eprintln!("Identifying {}…", image.display());
    let result = ctx.api.identify_plant(payload, draft, save).await?;

    if let Some(plant) = &result.identified {
        ctx.printer.identified(plant);
    }
    if result.has_errors() {
        let failure = result
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(SprigError::Api(failure));
    }
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_profile(ctx: &mut AppContext, changes: ProfileUpdate) -> Result<()> {
    let result = if changes.is_empty() {
        ctx.api.profile()?
    } else {
        ctx.api.update_profile(changes)?
    };
    if let Some(profile) = &result.profile {
        ctx.printer.profile(profile, result.stats.as_ref());
    }
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, theme: Option<ThemeId>) -> Result<()> {
    let result = match theme {
        Some(theme) => ctx.api.set_theme(theme)?,
        None => ctx.api.theme()?,
    };
    let active = result.theme.unwrap_or_default();
    ctx.printer = Printer::new(active, ctx.soon_days);
    ctx.printer.themes(active);
    ctx.printer.messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            ctx.printer.config(config);
        }
    }
    ctx.printer.messages(&result.messages);
    Ok(())
}
