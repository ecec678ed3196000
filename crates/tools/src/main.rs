use std::path::PathBuf;

use clap::{Parser, Subcommand};
use compute::Dataview;
use foundation::bounds::{LatLngBounds, PixelSize};
use geocoding::{MapboxGeocoder, ReqwestClient};
use tracing::error;
use tracing_subscriber::EnvFilter;

use tools::{
    bounds_zoom, describe_map, env_var_string, load_map_options, parse_latlng, read_text,
    run_dataview, ToolError, MAPBOX_TOKEN_VAR,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Map state utilities")]
struct Args {
    /// Map options JSON (center, zoom, minZoom, maxZoom, provider, layers)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deepest zoom at which a bounding box fits the viewport
    BoundsZoom {
        /// South-west corner: lat,lon
        #[arg(long)]
        sw: String,

        /// North-east corner: lat,lon
        #[arg(long)]
        ne: String,

        #[arg(long, default_value_t = 1024.0)]
        width: f64,

        #[arg(long, default_value_t = 768.0)]
        height: f64,
    },

    /// Compute a dataview over a GeoJSON file
    Dataview {
        /// FeatureCollection or array of features
        #[arg(long)]
        features: PathBuf,

        /// Dataview type: category or formula
        #[arg(long = "type")]
        kind: String,

        #[arg(long)]
        column: Option<String>,

        /// Formula operation: count or avg
        #[arg(long)]
        operation: Option<String>,
    },

    /// Forward-geocode an address with Mapbox
    Geocode {
        address: String,

        /// Access token (default: $MAPBOX_ACCESS_TOKEN)
        #[arg(long)]
        token: Option<String>,
    },

    /// Build the configured map on a headless engine and print a summary
    Describe {
        #[arg(long, default_value_t = 1024.0)]
        width: f64,

        #[arg(long, default_value_t = 768.0)]
        height: f64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run(Args::parse()).await {
        error!(error = %e, "mapctl failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        Command::BoundsZoom {
            sw,
            ne,
            width,
            height,
        } => {
            let options = load_map_options(args.config.as_deref())?;
            let bounds = LatLngBounds::new(parse_latlng(&sw)?, parse_latlng(&ne)?);
            match bounds_zoom(options, bounds, PixelSize::new(width, height))? {
                Some(zoom) => println!("{zoom}"),
                None => println!("none"),
            }
        }
        Command::Dataview {
            features,
            kind,
            column,
            operation,
        } => {
            let dataview = Dataview {
                kind,
                column,
                operation,
            };
            let result = run_dataview(&read_text(&features)?, &dataview, 0)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Geocode { address, token } => {
            let token = token
                .or_else(|| env_var_string(MAPBOX_TOKEN_VAR))
                .ok_or_else(|| ToolError::Argument(format!("pass --token or set {MAPBOX_TOKEN_VAR}")))?;
            let geocoder = MapboxGeocoder::new(ReqwestClient::new()?);
            let results = geocoder.geocode(&address, &token).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Describe { width, height } => {
            let options = load_map_options(args.config.as_deref())?;
            let summary = describe_map(options, PixelSize::new(width, height))?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
