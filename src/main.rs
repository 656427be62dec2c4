use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use guidepost::validate::{FieldKind, Validator};
use guidepost::{config, markup, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("GUIDEPOST_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GUIDEPOST_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "guidepost")]
#[command(about = "Interactive behavior for static travel-guide pages")]
#[command(long_about = "\
Interactive behavior for static travel-guide pages

The browser side is a wasm bundle that attaches to plain markup: a carousel,
inline form validation, a collapsible menu, active-link highlighting, and
smooth in-page scrolling. This CLI shares its config and validator.

Markup contract (stock selectors):

  .menu-toggle + nav              Menu; both get `active` when open
  nav a                           Highlighted when href matches the page
  .slider-container               One carousel per container
  ├── .slider-wrapper             Translated by -100% per slide
  │   └── .slider-item            One per slide
  ├── .slider-prev / .slider-next Optional
  └── .slider-dot                 Optional, one per slide
  form                            input, textarea, select validated
  a[href^=\"#\"]                    Smooth-scrolls to its target

Config is read from guidepost.toml; pages embed the same structure as JSON in
<script type=\"application/json\" id=\"guidepost-config\">.

Run 'guidepost gen-config' to generate a documented guidepost.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (stock defaults when absent)
    #[arg(long, default_value = "guidepost.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock guidepost.toml with all options documented
    GenConfig,
    /// Print the resolved config as the JSON a page embeds
    ShowConfig,
    /// Validate a value the way a form field would
    Check {
        /// Field kind: text, email, tel (or phone), date, password, textarea
        #[arg(long, value_parser = parse_kind)]
        kind: FieldKind,
        /// Judge dates against this moment instead of the local clock (RFC 3339)
        #[arg(long)]
        now: Option<DateTime<chrono::FixedOffset>>,
        /// The value to check
        value: String,
    },
    /// Write demo pages exercising every component
    Demo {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
        /// wasm-pack output directory to copy alongside the pages
        #[arg(long)]
        bundle: Option<PathBuf>,
    },
}

fn parse_kind(name: &str) -> Result<FieldKind, String> {
    FieldKind::parse(name).ok_or_else(|| format!("unknown field kind {name:?}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::ShowConfig => {
            let config = config::load_config(&cli.config)?;
            println!("{}", output::format_config_json(&config)?);
        }
        Command::Check { kind, now, value } => {
            let config = config::load_config(&cli.config)?;
            let validator = Validator::new(config.validation);
            let now = now.unwrap_or_else(|| Local::now().fixed_offset());
            let verdict = validator.check(kind, &value, now);
            let message = verdict.err().map(|v| validator.message(v));
            output::print_check_output(kind, &value, verdict, message);
            if verdict.is_err() {
                std::process::exit(1);
            }
        }
        Command::Demo { output: out, bundle } => {
            let config = config::load_config(&cli.config)?;
            let pages = markup::write_demo(&out, &config, bundle.as_deref())?;
            output::print_demo_output(&out, &pages, bundle.is_some());
        }
    }

    Ok(())
}
