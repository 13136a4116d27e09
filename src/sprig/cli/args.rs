use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use sprig::model::{HumidityLevel, LightLevel, Location, PlantType};
use sprig::themes::ThemeId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sprig", version)]
#[command(about = "Keep track of watering, feeding and repotting your houseplants", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (overrides SPRIG_DATA and the platform default)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Descriptive fields shared by `add` and `edit`.
#[derive(Args, Debug, Default)]
pub struct PlantFields {
    /// Botanical name
    #[arg(long)]
    pub species: Option<String>,

    /// succulent, tropical, flowering, fern, tree or other
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<PlantType>,

    /// indoor or outdoor
    #[arg(long)]
    pub location: Option<Location>,

    /// low, medium, bright or direct
    #[arg(long)]
    pub light: Option<LightLevel>,

    /// low, medium or high
    #[arg(long)]
    pub humidity: Option<HumidityLevel>,

    /// Temperature range, free text (e.g. "18-24°C")
    #[arg(long)]
    pub temp: Option<String>,

    /// Water every N days
    #[arg(long, value_name = "DAYS")]
    pub water_every: Option<u32>,

    /// Fertilize every N days
    #[arg(long, value_name = "DAYS")]
    pub fertilize_every: Option<u32>,

    /// Repot every N years
    #[arg(long, value_name = "YEARS")]
    pub repot_every: Option<u32>,

    /// Date the plant was acquired (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub acquired: Option<NaiveDate>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Photo of the plant
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a plant
    #[command(alias = "n")]
    Add {
        /// Name of the plant
        name: String,

        #[command(flatten)]
        fields: PlantFields,
    },

    /// List plants
    #[command(alias = "ls")]
    List {
        /// Search name and species
        #[arg(short, long)]
        search: Option<String>,

        /// Only indoor or only outdoor plants
        #[arg(short, long)]
        location: Option<Location>,
    },

    /// Show plant details
    #[command(alias = "v")]
    View {
        /// Index, name or id of the plants
        #[arg(required = true, num_args = 1..)]
        plants: Vec<String>,
    },

    /// Change a plant's details
    #[command(alias = "e")]
    Edit {
        /// Index, name or id of the plant
        plant: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: PlantFields,
    },

    /// Delete plants and their history
    #[command(alias = "rm")]
    Delete {
        /// Index, name or id of the plants
        #[arg(required = true, num_args = 1..)]
        plants: Vec<String>,
    },

    /// Record a watering
    #[command(alias = "w")]
    Water {
        #[arg(required = true, num_args = 1..)]
        plants: Vec<String>,
    },

    /// Record a feeding
    #[command(alias = "f")]
    Fertilize {
        #[arg(required = true, num_args = 1..)]
        plants: Vec<String>,
    },

    /// Record a repotting
    Repot {
        #[arg(required = true, num_args = 1..)]
        plants: Vec<String>,
    },

    /// Show overdue and upcoming care
    #[command(alias = "r")]
    Reminders,

    /// Show recent care across all plants
    History {
        /// Show at most N entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Identify a plant from a photo
    Identify {
        /// Image file (jpg, png, webp, gif, heic)
        image: PathBuf,

        /// Add the identified plant to your collection
        #[arg(long)]
        save: bool,

        /// Location for the saved plant
        #[arg(long)]
        location: Option<Location>,
    },

    /// Show or edit your profile
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Where you live
        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        bio: Option<String>,

        /// Avatar image file
        #[arg(long, value_name = "FILE")]
        avatar: Option<PathBuf>,
    },

    /// Show or change the color theme
    Theme {
        /// green, blue or warm
        theme: Option<ThemeId>,
    },

    /// Get or set configuration values
    Config {
        /// Configuration key (e.g. identifier, soon-days)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}
