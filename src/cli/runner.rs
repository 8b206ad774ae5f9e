//! CLI command execution

use crate::cli::{Cli, Commands, OutputFormat};
use crate::config::{self, SearchProfile};
use crate::controller::{EventsController, LoadListener};
use crate::error::{Error, Result};
use crate::transport::{HttpTransport, TransportConfig};
use crate::types::Event;
use std::sync::Arc;
use tracing::info;

/// Listener that reports load progress through tracing
struct ProgressListener;

impl LoadListener for ProgressListener {
    fn on_will_load(&self) {
        info!("fetching page");
    }

    fn on_did_load(&self, items: &[Event]) {
        info!(events = items.len(), "page settled");
    }

    fn on_did_error(&self, error: &Error) {
        tracing::error!(%error, "load failed");
    }
}

/// Executes CLI commands
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for parsed arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Search {
                base_url,
                cities,
                categories,
            } => {
                let mut profile = self.load_profile()?;
                if let Some(base_url) = base_url {
                    profile.base_url.clone_from(base_url);
                }
                if let Some(cities) = cities {
                    profile.cities = split_list(cities);
                }
                if let Some(categories) = categories {
                    profile.categories = split_list(categories);
                }
                self.search(&profile).await
            }
            Commands::Validate => {
                let profile = self.load_profile()?;
                println!("base_url: {}", profile.base_url);
                println!("keyword: {:?}", profile.keyword);
                println!("categories: {:?}", profile.categories);
                println!("cities: {:?}", profile.cities);
                println!("dates: {:?}", profile.dates);
                match profile.geo() {
                    Some(geo) => println!(
                        "location: {:.4},{:.4} within {}",
                        geo.point.latitude,
                        geo.point.longitude,
                        geo.within_param()
                    ),
                    None => println!("location: none"),
                }
                Ok(())
            }
        }
    }

    fn load_profile(&self) -> Result<SearchProfile> {
        let path = self
            .cli
            .profile
            .as_ref()
            .ok_or_else(|| Error::config("no profile given, pass --profile <file>"))?;
        config::load_profile(path)
    }

    async fn search(&self, profile: &SearchProfile) -> Result<()> {
        let transport_config = TransportConfig::builder()
            .base_url(&profile.base_url)
            .timeout(profile.timeout())
            .build();
        let transport = Arc::new(HttpTransport::new(transport_config)?);

        let controller = EventsController::new(transport);
        controller.add_listener(Arc::new(ProgressListener));
        controller.set_keyword(profile.keyword.clone());
        controller.set_categories(profile.categories.clone());
        controller.set_cities(profile.cities.clone());
        controller.set_dates(profile.dates.clone());
        if let Some(geo) = profile.geo() {
            controller.set_location(Some(geo.point));
            controller.set_radius_mi(Some(geo.radius_mi));
        }

        controller.reload().settled().await;

        let sections = controller.sections();
        let total: usize = sections.iter().map(Vec::len).sum();
        info!(pages = sections.len(), events = total, "search finished");

        match self.cli.format {
            OutputFormat::Json => {
                for section in &sections {
                    for event in section {
                        println!("{}", serde_json::to_string(event)?);
                    }
                }
            }
            OutputFormat::Pretty => {
                for (index, section) in sections.iter().enumerate() {
                    println!("page {} ({} events)", index + 1, section.len());
                    for event in section {
                        println!(
                            "  {}  {}",
                            event.id().unwrap_or("-"),
                            event.name().unwrap_or("(unnamed)")
                        );
                    }
                }
            }
        }
        Ok(())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("Boston, Cambridge"), vec!["Boston", "Cambridge"]);
        assert_eq!(split_list(""), Vec::<String>::new());
        assert_eq!(split_list("music,,sports"), vec!["music", "sports"]);
    }
}
