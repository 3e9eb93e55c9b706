//! Fetch the official Austrian address for one OSM object.
//!
//! Reads a JSON edit document (or creates a single node at a coordinate),
//! looks up the address, checks OpenStreetMap for existing objects with the
//! same address and writes the edited document as JSON.

mod prompt;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use austria_address::{
    AddressHelper, AddressType, Config, Document, GeoPoint, MapObject, ObjectId, TagSchema,
};

use crate::prompt::TerminalOperator;

#[derive(Parser, Debug)]
#[command(name = "fetch-address")]
#[command(about = "Fetch the official Austrian address for an OSM object")]
struct Args {
    /// JSON document with the objects to edit
    #[arg(short, long, conflicts_with_all = ["lat", "lon"], required_unless_present = "lat")]
    input: Option<PathBuf>,

    /// Latitude of a new node to look up instead of an input document
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of a new node to look up instead of an input document
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Object to look up, e.g. way/123 (defaults to the document's selection)
    #[arg(long = "select")]
    select: Vec<ObjectId>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reverse-geocoding endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Overpass API server, e.g. https://overpass-api.de/api/
    #[arg(long)]
    overpass_server: Option<String>,

    /// Skip the check for existing objects with the same address
    #[arg(long)]
    no_duplicate_check: bool,

    /// Tagging of ambiguous municipalities: suburb or locality_as_city
    #[arg(long)]
    schema: Option<TagSchema>,

    /// Answer for addresses the server cannot classify: street or place
    #[arg(long)]
    address_type: Option<AddressType>,

    /// Remember address-type answers for the session without asking
    #[arg(long)]
    remember: bool,

    /// Answer every confirmation with yes
    #[arg(short, long)]
    yes: bool,

    /// Where to write the edited document (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the document
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let mut doc = match (&args.input, args.lat, args.lon) {
        (Some(path), _, _) => read_document(path)?,
        (None, Some(lat), Some(lon)) => {
            Document::new(vec![MapObject::node(-1, GeoPoint { lat, lon })])
        }
        _ => anyhow::bail!("either --input or --lat and --lon are required"),
    };

    if !args.select.is_empty() {
        doc.select(args.select.iter().copied());
    } else if doc.selection.is_empty() {
        doc.select_all();
    }

    let mut helper = AddressHelper::new(config)?;
    let stdin = io::stdin();
    let mut operator = TerminalOperator::new(
        stdin.lock(),
        io::stderr(),
        args.yes,
        args.address_type,
        args.remember,
    );

    let update = helper.run(&mut doc, &mut operator).await?;
    info!("Added {} tags to {}", update.tags.len(), update.target);

    write_document(&doc, args.output.as_deref())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    if let Some(base_url) = &args.base_url {
        config.geocoder.base_url = base_url.clone();
    }
    if let Some(server) = &args.overpass_server {
        config.duplicates.overpass_server = server.clone();
    }
    if args.no_duplicate_check {
        config.duplicates.enabled = false;
    }
    if let Some(schema) = args.schema {
        config.tags.schema = schema;
    }

    Ok(config)
}

fn read_document(path: &Path) -> Result<Document> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input document {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).context("Failed to parse input document")
}

fn write_document(doc: &Document, path: Option<&Path>) -> Result<()> {
    let mut writer: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output document {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    serde_json::to_writer_pretty(&mut writer, doc).context("Failed to write document")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
