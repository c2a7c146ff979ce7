use airdash_core::{Config, DashboardController, HttpDashboardService, Persona, QueryInput};
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use inquire::{CustomType, Select, Text};
use tracing::info;

use crate::terminal::{TerminalCharts, TerminalMaps, TerminalSurface};

type TerminalController =
    DashboardController<HttpDashboardService, TerminalSurface, TerminalCharts, TerminalMaps>;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "airdash", version, about = "Air-quality dashboard for vulnerable populations")]
pub struct Cli {
    /// Base URL of the dashboard data service; overrides the config file.
    #[arg(long, global = true, env = "AIRDASH_SERVICE_URL")]
    pub service_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the service URL, default location and persona.
    Configure,

    /// Fetch and print the dashboard for a location.
    Show {
        /// Latitude; defaults to the configured location.
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,

        /// Longitude; defaults to the configured location.
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<String>,

        /// Persona tag, e.g. "children" or "elderly".
        #[arg(long)]
        persona: Option<String>,
    },

    /// List the supported personas.
    Personas,

    /// Check that the dashboard service is up.
    Health,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(Config::load()?)?,
            Command::Show { lat, lon, persona } => {
                let config = Config::load()?;
                let service_url = service_url(self.service_url, &config);
                let persona = match persona {
                    Some(tag) => Persona::try_from(tag.as_str())?,
                    None => config.default_persona()?,
                };
                let input = QueryInput {
                    latitude: lat.or_else(|| config.default_latitude.map(|v| v.to_string())),
                    longitude: lon.or_else(|| config.default_longitude.map(|v| v.to_string())),
                    persona,
                };
                show(&service_url, &input).await?;
            }
            Command::Personas => println!("{}", personas_table()),
            Command::Health => {
                let service_url = match self.service_url {
                    Some(url) => url,
                    None => Config::load()?.service_url,
                };
                let health = controller(&service_url)
                    .check_health()
                    .await
                    .with_context(|| format!("Health check against {service_url} failed"))?;
                println!(
                    "{}: {}",
                    health.service.as_deref().unwrap_or(service_url.as_str()),
                    health.status
                );
            }
        }

        Ok(())
    }
}

/// The `--service-url` flag (or its env var) wins over the config file.
fn service_url(flag: Option<String>, config: &Config) -> String {
    flag.unwrap_or_else(|| config.service_url.clone())
}

fn controller(service_url: &str) -> TerminalController {
    DashboardController::new(
        HttpDashboardService::new(service_url),
        TerminalSurface::default(),
        TerminalCharts::default(),
        TerminalMaps::default(),
    )
}

async fn show(service_url: &str, input: &QueryInput) -> anyhow::Result<()> {
    let mut controller = controller(service_url);

    // The surface only records the alert, so it is reported once, here.
    let result = controller.submit(input).await.map(|_| ());
    if let Err(err) = result {
        let message = controller.surface().alert_message().unwrap_or(err.user_message());
        return Err(anyhow::Error::new(err).context(message.to_string()));
    }

    println!("{}", controller.surface().render_report());
    println!("{}", controller.maps().render_report());
    println!("{}", controller.charts().render_report());

    Ok(())
}

fn personas_table() -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Tag", "Name", "Recommendations"]);

    for p in Persona::all() {
        table.add_row(vec![p.as_str(), p.display_name(), p.category().as_str()]);
    }
    table.to_string()
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let service_url =
        Text::new("Dashboard service URL:").with_default(&config.service_url).prompt()?;
    config.service_url = service_url.trim().trim_end_matches('/').to_string();

    let lat = CustomType::<f64>::new("Default latitude (Esc to skip):")
        .with_error_message("Please type a number, e.g. 19.43")
        .prompt_skippable()?;
    let lon = CustomType::<f64>::new("Default longitude (Esc to skip):")
        .with_error_message("Please type a number, e.g. -99.13")
        .prompt_skippable()?;
    if let (Some(lat), Some(lon)) = (lat, lon) {
        config.set_default_location(lat, lon);
    }

    let current = config.default_persona()?;
    let start = Persona::all().iter().position(|p| *p == current).unwrap_or(0);
    let persona = Select::new("Default persona:", Persona::all().to_vec())
        .with_starting_cursor(start)
        .prompt()?;
    config.set_default_persona(persona);

    let path = config.save()?;
    info!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["airdash", "show", "--lat", "19.43", "--lon", "-99.13"])
            .expect("arguments parse");

        match cli.command {
            Command::Show { lat, lon, persona } => {
                assert_eq!(lat.as_deref(), Some("19.43"));
                assert_eq!(lon.as_deref(), Some("-99.13"));
                assert!(persona.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn service_url_flag_is_global() {
        let cli = Cli::try_parse_from(["airdash", "health", "--service-url", "http://x.test"])
            .expect("arguments parse");
        assert_eq!(cli.service_url.as_deref(), Some("http://x.test"));
    }

    #[test]
    fn service_url_flag_overrides_config() {
        let config = Config::default();

        assert_eq!(service_url(Some("http://x.test".into()), &config), "http://x.test");
        assert_eq!(service_url(None, &config), config.service_url);
    }

    #[tokio::test]
    async fn personas_runs_without_service_url() {
        let cli = Cli::try_parse_from(["airdash", "personas"]).expect("arguments parse");
        assert!(matches!(cli.command, Command::Personas));
        assert!(cli.service_url.is_none());

        cli.run().await.expect("personas needs neither config nor service");
    }

    #[tokio::test]
    async fn failed_show_reports_the_alert_once() {
        let input = QueryInput {
            persona: Persona::Adults,
            ..Default::default()
        };

        let err = show("http://127.0.0.1:1", &input).await.unwrap_err();

        assert_eq!(err.to_string(), "Please enter a latitude and longitude.");
        assert!(err.chain().nth(1).is_some_and(|cause| cause.to_string() != err.to_string()));
    }

    #[test]
    fn personas_table_lists_every_persona() {
        let table = personas_table();
        for p in Persona::all() {
            assert!(table.contains(p.as_str()));
        }
        assert!(table.contains("for_health_centers"));
    }
}
