//! iubenda consent CLI
//!
//! Entry point for the `iubenda` command-line tool.

use clap::{Parser, Subcommand};
use iubenda_consent::{
    activate, LinkAttributes, OptionLayers, OptionResolver, RenderContext, ResolvedConfig,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// User options file read when `-c` is not given and the file exists
const DEFAULT_CONFIG_FILE: &str = "iubenda.toml";

#[derive(Parser)]
#[command(name = "iubenda")]
#[command(about = "Resolve iubenda consent banner options and render head scripts", version)]
struct Cli {
    /// Path to user options file (default: iubenda.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Path to public overrides file (TOML or JSON)
    #[arg(long, global = true)]
    public: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the options resolve to an active banner
    Verify,

    /// Print the head scripts
    Head {
        /// Output descriptors as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Print policy URLs and link markup
    Links {
        /// Active locale for i18n policy overrides
        #[arg(long, short = 'l')]
        locale: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let resolved = match load_resolved(cli.config, cli.public) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading options: {}", e);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Verify => run_verify(&resolved),
        Commands::Head { json } => run_head(&resolved, json),
        Commands::Links { locale, json } => run_links(&resolved, locale, json),
    }
}

fn load_resolved(
    config_path: Option<PathBuf>,
    public_path: Option<PathBuf>,
) -> Result<ResolvedConfig, iubenda_consent::ConfigError> {
    let config_path = config_path.or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    });
    let layers =
        OptionLayers::load(config_path.as_deref(), public_path.as_deref())?.with_public_env()?;
    OptionResolver::resolve_layers(layers)
}

fn run_verify(resolved: &ResolvedConfig) {
    let options = resolved.options();

    if !resolved.is_active() {
        eprintln!("Consent banner unconfigured: siteId and cookiePolicyId are required.");
        process::exit(1);
    }

    println!("Consent banner active");
    println!();
    if let Some((site_id, policy_id)) = options.identifiers() {
        println!("  Site: {}", site_id);
        println!("  Cookie policy: {}", policy_id);
    }
    println!("  Environment: {}", options.env().as_str());
    println!("  Language: {}", options.config.lang);
    println!(
        "  Links: {}",
        if options.links.enable {
            options.links.style.as_str()
        } else {
            "disabled"
        }
    );
    if !options.i18n.is_empty() {
        let locales: Vec<&str> = options.i18n.keys().map(|k| k.as_str()).collect();
        println!("  Locales: {}", locales.join(", "));
    }
    println!("  Scripts: {}", resolved.scripts().len());
    for source in resolved.sources() {
        match &source.path {
            Some(path) => println!("  Source: {:?} {}", source.origin, path),
            None => println!("  Source: {:?}", source.origin),
        }
    }
}

fn run_head(resolved: &ResolvedConfig, json_output: bool) {
    match render_head(resolved, json_output) {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => {
            eprintln!("Consent banner unconfigured; no scripts emitted.");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

/// Head scripts as HTML or JSON; None when the banner is unconfigured.
fn render_head(
    resolved: &ResolvedConfig,
    json_output: bool,
) -> Result<Option<String>, serde_json::Error> {
    let mut ctx = RenderContext::new();
    if activate(resolved, &mut ctx).is_none() {
        return Ok(None);
    }

    if json_output {
        serde_json::to_string_pretty(ctx.head().scripts()).map(Some)
    } else {
        Ok(Some(ctx.head().render()))
    }
}

fn run_links(resolved: &ResolvedConfig, locale: Option<String>, json_output: bool) {
    let mut ctx = match locale {
        Some(locale) => RenderContext::with_locale(locale),
        None => RenderContext::new(),
    };

    let facade = match activate(resolved, &mut ctx) {
        Some(f) => f,
        None => {
            eprintln!("Consent banner unconfigured; no policy links available.");
            process::exit(1);
        }
    };

    let attributes = LinkAttributes::default();
    let privacy_link = facade.privacy_policy_link_html(None, &attributes);
    let cookie_link = facade.cookie_policy_link_html(None, &attributes);

    if json_output {
        let output = serde_json::json!({
            "facade": &*facade,
            "privacyPolicyLinkHtml": privacy_link,
            "cookiePolicyLinkHtml": cookie_link,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("Policy id: {}", facade.policy_id());
        println!("  Privacy policy: {}", facade.privacy_policy_url());
        println!("  Cookie policy: {}", facade.cookie_policy_url());
        println!("  Privacy policy API: {}", facade.privacy_policy_api_url());
        println!("  Cookie policy API: {}", facade.cookie_policy_api_url());
        println!("  Link class: {}", facade.links_class());
        println!();
        println!("{}", privacy_link);
        println!("{}", cookie_link);
    }
}
