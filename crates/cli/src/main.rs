use clap::{Parser, Subcommand};

use book_metadata_core::config::{config_path, load_config, load_config_from, lookup_options_from_config, AppConfig};
use book_metadata_core::lookup::daum::{self, DaumProvider};
use book_metadata_core::lookup::MetadataProvider;
use book_metadata_core::record::MetaRecord;

#[derive(Parser)]
#[command(name = "book-metadata")]
#[command(about = "Book metadata lookup from online providers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search Daum Books for a title
    Search {
        /// Free-text title query
        #[arg(required = true)]
        query: Vec<String>,

        /// Locale for language names (defaults to config)
        #[arg(long)]
        locale: Option<String>,

        /// Cover to use for results without a thumbnail (defaults to config)
        #[arg(long)]
        generic_cover: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Initialize default config file
    Init,
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Key (dot-separated path)
        key: String,
        /// Value
        value: String,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Search { query, locale, generic_cover } => run_search(&query.join(" "), locale.as_deref(), generic_cover.as_deref(), cli.json),
        Commands::Config { action } => run_config(action, cli.json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_search(
    query: &str,
    locale: Option<&str>,
    generic_cover: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cfg = load_config();
    let mut options = lookup_options_from_config(&cfg);
    if let Some(l) = locale {
        options.locale = l.to_string();
    }
    if let Some(c) = generic_cover {
        options.generic_cover = c.to_string();
    }

    if !cfg.daum.active {
        if !json {
            println!("Provider {} is disabled", daum::PROVIDER_ID);
        } else {
            println!("[]");
        }
        return Ok(());
    }
    let provider = DaumProvider::from_config(&cfg.daum)?;

    let records = provider
        .search(query, &options)
        .ok_or_else(|| format!("Search on {} failed (see log output)", provider.description()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No results found");
    } else {
        for (i, r) in records.iter().enumerate() {
            println!("Result {}: {}", i + 1, describe(r));
        }
    }
    Ok(())
}

fn describe(r: &MetaRecord) -> String {
    let mut line = r.title.clone();
    if !r.authors.is_empty() {
        line.push_str(&format!(" by {}", r.authors.join(", ")));
    }
    if !r.published_date.is_empty() {
        line.push_str(&format!(" ({})", r.published_date));
    }
    if !r.id.is_empty() {
        line.push_str(&format!(" [{}]", r.id));
    }
    line
}

fn run_config(
    action: &ConfigAction,
    json: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match action {
        ConfigAction::Init => {
            let path = config_path().ok_or("Could not determine config directory")?;
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let default_cfg = AppConfig::default();
            let toml = toml::to_string_pretty(&default_cfg)?;
            std::fs::write(&path, toml)?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigAction::Show => {
            let mut cfg = load_config();
            if cfg.daum.api_key.is_some() {
                cfg.daum.api_key = Some("********".to_string());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else {
                println!("{}", toml::to_string_pretty(&cfg)?);
            }
        }
        ConfigAction::Set { key, value } => {
            let path = config_path().ok_or("Could not determine config directory")?;
            let mut cfg: AppConfig = if path.exists() {
                load_config_from(&path)?
            } else {
                AppConfig::default()
            };

            set_config_key(&mut cfg, key, value)?;

            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let toml = toml::to_string_pretty(&cfg)?;
            std::fs::write(&path, toml)?;
            if !json {
                println!("Updated {}", key);
            }
        }
    }
    Ok(())
}

fn set_config_key(cfg: &mut AppConfig, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let parts: Vec<&str> = key.splitn(2, '.').collect();
    match parts.as_slice() {
        ["locale"] => cfg.locale = value.to_string(),
        ["generic_cover"] => cfg.generic_cover = value.to_string(),
        ["daum", sub] => match *sub {
            "active" => cfg.daum.active = value.parse().map_err(|_| format!("Expected true or false for {}", key))?,
            "api_key" => cfg.daum.api_key = Some(value.to_string()),
            "search_url" => cfg.daum.search_url = value.to_string(),
            _ => return Err(format!("Unknown key: {}", key).into()),
        },
        _ => return Err(format!("Unknown key: {}", key).into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_known_keys() {
        let mut cfg = AppConfig::default();
        set_config_key(&mut cfg, "locale", "ko").unwrap();
        set_config_key(&mut cfg, "daum.active", "false").unwrap();
        set_config_key(&mut cfg, "daum.api_key", "secret").unwrap();
        assert_eq!(cfg.locale, "ko");
        assert!(!cfg.daum.active);
        assert_eq!(cfg.daum.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_bools() {
        let mut cfg = AppConfig::default();
        assert!(set_config_key(&mut cfg, "daum.colour", "x").is_err());
        assert!(set_config_key(&mut cfg, "nope", "x").is_err());
        assert!(set_config_key(&mut cfg, "daum.active", "maybe").is_err());
    }

    #[test]
    fn describe_skips_empty_parts() {
        let source = book_metadata_core::record::MetaSourceInfo {
            id: "daum".to_string(),
            description: "Daum Books".to_string(),
            link: "https://search.daum.net/search?w=bookpage".to_string(),
        };
        let mut r = MetaRecord::new("", "Title", vec![], "https://example.com", source);
        assert_eq!(describe(&r), "Title");
        r.authors = vec!["A".to_string(), "B".to_string()];
        r.published_date = "2020-05-01".to_string();
        r.id = "9788972345678".to_string();
        assert_eq!(describe(&r), "Title by A, B (2020-05-01) [9788972345678]");
    }
}
