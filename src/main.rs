use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use odk2odm::columns::{self, column_index};
use odk2odm::manifest::{self, DEFAULT_PROJECTION, GeoColumns, ManifestOptions};
use odk2odm::submissions::{self, SubmissionOptions};
use odk2odm::table::{TableOptions, parse_delimiter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Georeference photo attachments from ODK submissions into a geo.txt for OpenDroneMap
    Geo {
        /// Input table of submissions (CSV, or a spreadsheet workbook)
        #[arg(required = true)]
        input: PathBuf,

        /// Columns holding photo file names, e.g. "15-26,28-39" or "O-Z,AB-AM" (1-based)
        #[arg(long, short = 'r')]
        range: String,

        /// Longitude column: 1-based number or spreadsheet letters
        #[arg(long = "lon", visible_alias = "longitude")]
        longitude: String,

        /// Latitude column: 1-based number or spreadsheet letters
        #[arg(long = "lat", visible_alias = "latitude")]
        latitude: String,

        /// GPS elevation column
        #[arg(long = "ele", visible_alias = "elevation")]
        elevation: String,

        /// Estimated GPS accuracy column
        #[arg(long = "acc", visible_alias = "accuracy")]
        accuracy: String,

        /// Coordinate reference system written on the first line of geo.txt
        #[arg(long = "proj", visible_alias = "projection", default_value = DEFAULT_PROJECTION)]
        projection: String,

        /// Delimiter of the input table
        #[arg(long, short = 'd', default_value = ",")]
        delimiter: String,
    },

    /// Flatten a saved OData submissions document into a delimited table
    Submissions {
        /// Submissions JSON, as returned by the OData Submissions endpoint
        #[arg(required = true)]
        input: PathBuf,

        /// Form name, used for the output file name
        #[arg(long, short = 'f')]
        form: Option<String>,

        /// Directory to write the output file to
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Column containing the geopoint (1-based number or letters)
        #[arg(long, short = 'g')]
        geopoint_column: Option<String>,

        /// Delimiter of the output table
        #[arg(long, short = 'd', default_value = ";")]
        delimiter: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "odk2odm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Geo {
            input,
            range,
            longitude,
            latitude,
            elevation,
            accuracy,
            projection,
            delimiter,
        } => {
            // Everything the user typed is validated before the input is read.
            let photo_columns = columns::resolve(&range)?;
            let geo_columns = GeoColumns::resolve(&longitude, &latitude, &elevation, &accuracy)
                .context("Invalid longitude, latitude, elevation or accuracy column")?;
            let options = ManifestOptions {
                projection,
                table: TableOptions {
                    delimiter: parse_delimiter(&delimiter)?,
                },
            };

            let summary =
                manifest::make_geo_txt(&input, &photo_columns, &geo_columns, &options)
                    .with_context(|| format!("Failed to build geo.txt from {}", input.display()))?;
            println!("{}", summary.output.display());
        }
        Commands::Submissions {
            input,
            form,
            output_dir,
            geopoint_column,
            delimiter,
        } => {
            let geopoint_column = geopoint_column
                .as_deref()
                .map(|col| column_index(col.trim()))
                .transpose()
                .context("Invalid geopoint column")?;
            let options = SubmissionOptions {
                delimiter: parse_delimiter(&delimiter)?,
                geopoint_column,
                form,
                output_dir,
            };

            let output = submissions::convert_submissions(&input, &options)
                .with_context(|| format!("Failed to convert {}", input.display()))?;
            println!("{}", output.display());
        }
    }

    Ok(())
}
