use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use meteo_core::{
    Config, Coordinates, ForecastClient, HistoryClient, HttpTransport, Location, LocationRegistry,
    VariableStore, export_csv, export_json,
};
use tracing::info;

use crate::{configure, menu, output};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "meteo",
    version,
    about = "Manage locations and weather variables, fetch weather data, export variables"
)]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the sample session: register a location, define a variable, fetch and export.
    Demo {
        /// Date used for the historical request.
        #[arg(long, default_value = "2024-09-10")]
        date: NaiveDate,

        #[arg(long, default_value = "weather_data.csv")]
        csv: PathBuf,

        #[arg(long, default_value = "weather_data.json")]
        json: PathBuf,
    },

    /// List the locations configured in the config file.
    Locations,

    /// Print the raw forecast for a location.
    Forecast(Target),

    /// Print raw historical data for a location and day.
    History {
        #[command(flatten)]
        target: Target,

        /// Day to fetch, as YYYY-MM-DD.
        #[arg(long)]
        date: NaiveDate,
    },

    /// Interactive variable manager.
    Variables,

    /// Export NAME=VALUE pairs to CSV and/or JSON.
    Export {
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long)]
        json: Option<PathBuf>,

        /// Variables to export, e.g. Temperature=75.
        #[arg(required = true, value_parser = parse_assignment)]
        variables: Vec<(String, f64)>,
    },

    /// Configure endpoints and timeouts.
    Configure,
}

/// Where to fetch weather for: a configured location or explicit coordinates.
#[derive(Debug, Args)]
pub struct Target {
    /// Name of a location from the config file.
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub location: Option<String>,

    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

impl Target {
    pub fn resolve(&self, registry: &LocationRegistry) -> Result<Coordinates> {
        match (&self.location, self.lat, self.lon) {
            (Some(name), _, _) => Ok(registry.find(name)?.coordinates()),
            (None, Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => bail!("Specify either --location NAME or both --lat and --lon."),
        }
    }
}

fn parse_assignment(raw: &str) -> Result<(String, f64), String> {
    let (name, value) =
        raw.split_once('=').ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{raw}'"));
    }

    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for '{name}': {e}"))?;

    Ok((name.to_string(), value))
}

/// Everything a command needs, built once per process.
struct App {
    config: Config,
    registry: LocationRegistry,
    forecast: ForecastClient,
    history: HistoryClient,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config.http)?;
        let forecast = ForecastClient::from_config(transport.clone(), &config);
        let history = HistoryClient::from_config(transport, &config);
        let registry = config.location_registry();

        Ok(Self { config, registry, forecast, history })
    }
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    pub async fn run(self) -> Result<()> {
        let config = self.load_config()?;

        match self.command {
            Command::Configure => {
                let path = configure::run(config, self.config.as_deref())?;
                println!("Configuration saved to {}", path.display());
            }
            Command::Locations => {
                println!("{}", output::locations(&config.location_registry()));
            }
            Command::Variables => {
                let mut store = VariableStore::new();
                menu::run(&mut store)?;
            }
            Command::Export { csv, json, variables } => {
                if csv.is_none() && json.is_none() {
                    bail!("Nothing to do: pass --csv PATH and/or --json PATH.");
                }
                let store: VariableStore = variables.into_iter().collect();

                if let Some(path) = csv {
                    export_csv(&path, store.as_map())?;
                    println!("Wrote {}", path.display());
                }
                if let Some(path) = json {
                    export_json(&path, store.as_map())?;
                    println!("Wrote {}", path.display());
                }
            }
            Command::Forecast(target) => {
                let app = App::new(config)?;
                let coordinates = target.resolve(&app.registry)?;
                let response = app
                    .forecast
                    .fetch(coordinates)
                    .await
                    .with_context(|| format!("Failed to fetch forecast for {coordinates}"))?;
                println!("{}", output::weather(&response));
            }
            Command::History { target, date } => {
                let app = App::new(config)?;
                let coordinates = target.resolve(&app.registry)?;
                let response = app
                    .history
                    .fetch(coordinates, date)
                    .await
                    .with_context(|| format!("Failed to fetch history for {coordinates} on {date}"))?;
                println!("{}", output::weather(&response));
            }
            Command::Demo { date, csv, json } => {
                let app = App::new(config)?;
                demo(app, date, &csv, &json).await;
            }
        }

        Ok(())
    }
}

/// Sample session. Failures are reported and the session carries on.
async fn demo(mut app: App, date: NaiveDate, csv: &Path, json: &Path) {
    info!(
        forecast = app.forecast.endpoint(),
        history = app.history.endpoint(),
        timeout_secs = app.config.http.timeout_secs,
        "starting demo session"
    );

    let city = Location::new("CityA", 35.0, -78.0);
    let coordinates = city.coordinates();
    app.registry.add(city);
    println!("{}", output::locations(&app.registry));

    let mut variables = VariableStore::new();
    variables.define("Temperature", 75.0);
    println!("{}", output::variables(&variables));

    match app.forecast.fetch(coordinates).await {
        Ok(response) => println!("{}", output::weather(&response)),
        Err(e) => eprintln!("Forecast unavailable: {e}"),
    }

    match app.history.fetch(coordinates, date).await {
        Ok(response) => println!("{}", output::weather(&response)),
        Err(e) => eprintln!("Historical data unavailable: {e}"),
    }

    if let Err(e) = export_csv(csv, variables.as_map()) {
        eprintln!("CSV export failed: {e}");
    }
    if let Err(e) = export_json(json, variables.as_map()) {
        eprintln!("JSON export failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_assignment_accepts_name_value() {
        assert_eq!(parse_assignment("Temperature=75").unwrap(), ("Temperature".into(), 75.0));
        assert_eq!(parse_assignment(" Dew Point = -3.5 ").unwrap(), ("Dew Point".into(), -3.5));
    }

    #[test]
    fn parse_assignment_rejects_malformed_input() {
        assert!(parse_assignment("Temperature").is_err());
        assert!(parse_assignment("=75").is_err());
        assert!(parse_assignment("Temperature=warm").is_err());
    }

    #[test]
    fn history_accepts_negative_coordinates_and_date() {
        let cli = Cli::try_parse_from([
            "meteo", "history", "--lat", "35", "--lon", "-78", "--date", "2024-09-10",
        ])
        .unwrap();

        match cli.command {
            Command::History { target, date } => {
                let coords = target.resolve(&LocationRegistry::new()).unwrap();
                assert_eq!(coords, Coordinates::new(35.0, -78.0));
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 9, 10).unwrap());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn location_and_coordinates_conflict() {
        let res = Cli::try_parse_from([
            "meteo", "forecast", "--location", "CityA", "--lat", "1", "--lon", "2",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn target_resolves_configured_location() {
        let registry: LocationRegistry =
            [Location::new("CityA", 35.0, -78.0)].into_iter().collect();
        let target = Target { location: Some("CityA".into()), lat: None, lon: None };

        assert_eq!(target.resolve(&registry).unwrap(), Coordinates::new(35.0, -78.0));
    }

    #[test]
    fn target_without_location_or_coordinates_is_rejected() {
        let target = Target { location: None, lat: None, lon: None };
        let err = target.resolve(&LocationRegistry::new()).unwrap_err();
        assert!(err.to_string().contains("--location"));
    }

    #[test]
    fn unknown_location_is_not_found() {
        let target = Target { location: Some("Atlantis".into()), lat: None, lon: None };
        let err = target.resolve(&LocationRegistry::new()).unwrap_err();
        assert_eq!(err.to_string(), "Location 'Atlantis' not found");
    }

    #[test]
    fn export_parses_pairs() {
        let cli = Cli::try_parse_from([
            "meteo", "export", "--csv", "out.csv", "Temperature=75", "Humidity=40",
        ])
        .unwrap();

        match cli.command {
            Command::Export { csv, json, variables } => {
                assert_eq!(csv, Some(PathBuf::from("out.csv")));
                assert!(json.is_none());
                assert_eq!(variables.len(), 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[tokio::test]
    async fn demo_reports_failures_and_still_exports() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        // Nothing listens on port 9 of the loopback in the test environment.
        config.endpoints.forecast_url = "http://127.0.0.1:9/v1/forecast".into();
        config.endpoints.history_url = "http://127.0.0.1:9/v1/history".into();
        config.http.timeout_secs = 2;

        let csv = dir.path().join("weather_data.csv");
        let json = dir.path().join("weather_data.json");
        let date = NaiveDate::from_ymd_opt(2024, 9, 10).unwrap();

        demo(App::new(config).unwrap(), date, &csv, &json).await;

        assert_eq!(std::fs::read_to_string(&csv).unwrap(), "Variable,Value\nTemperature,75\n");
        assert!(std::fs::read_to_string(&json).unwrap().contains("\"Temperature\": 75.0"));
    }
}
