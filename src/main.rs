//! dna-matches - draw DNA match relationships from a GEDCOM file.

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use dna_matches::config::DEFAULT_MAX_GENERATIONS;
use dna_matches::{Config, EventField, Orientation, OutputFormat, TitlePlacement, ValueMode};

/// Draw the relationships between DNA matches recorded in a GEDCOM file.
///
/// The reference person carries the event with the text "me"; every other
/// person carrying it is a match whose text holds the shared cM value.
#[derive(Debug, Parser)]
#[command(name = "dna-matches")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Event type (`2 TYPE`) holding the DNA match data
    #[arg(value_name = "EVENTNAME")]
    event_name: String,

    /// GEDCOM file to read
    #[arg(value_name = "INFILE")]
    infile: PathBuf,

    /// Minimum shared cM of a match to include
    #[arg(long, default_value_t = dna_matches::config::DEFAULT_MIN_CM)]
    min: u32,

    /// Maximum shared cM of a match to include
    #[arg(long, default_value_t = dna_matches::config::DEFAULT_MAX_CM)]
    max: u32,

    /// Output format: tree, matrix or gedcom
    #[arg(long, default_value = "tree")]
    format: OutputFormat,

    /// Where the match text lives: the event's note or its value
    #[arg(long, default_value = "note")]
    eventtype: EventField,

    /// Take the first number in the text even without a "cM" unit
    #[arg(long)]
    lenient: bool,

    /// Show the relationship in match cells
    #[arg(long)]
    relationship: bool,

    /// Chart title
    #[arg(long)]
    title: Option<String>,

    /// Title position: tc, tl, tr, bc, bl or br
    #[arg(long, default_value = "tc")]
    placetitle: TitlePlacement,

    /// Point arrows from parents to children
    #[arg(long)]
    reverse_arrows: bool,

    /// Chart direction: lr, tb, bt or rl
    #[arg(long, default_value = "lr")]
    orientation: Orientation,

    /// Only the first given name and the surname
    #[arg(long)]
    shortname: bool,

    /// Thicker lines, repeat for more
    #[arg(long, action = ArgAction::Count)]
    thick: u8,

    /// Stop the ancestor search after this many generations
    #[arg(long, default_value_t = DEFAULT_MAX_GENERATIONS)]
    max_generations: usize,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::new(self.event_name.clone());
        config.field = self.eventtype;
        config.value_mode = if self.lenient { ValueMode::Lenient } else { ValueMode::Strict };
        config.min_cm = self.min;
        config.max_cm = self.max;
        config.format = self.format;
        config.show_relationship = self.relationship;
        config.title = self.title.clone();
        config.title_placement = self.placetitle;
        config.reverse_arrows = self.reverse_arrows;
        config.orientation = self.orientation;
        config.short_names = self.shortname;
        config.thickness = 1 + u32::from(self.thick);
        config.max_generations = self.max_generations;
        config
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> dna_matches::Result<()> {
    let config = cli.config();
    let output = dna_matches::draw_file(&cli.infile, &config)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
