use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gc_oauth::oauth::{
    build_authorize_url, decode_state, encode_state, CallbackParams, ConfigResolver,
    GitConfigScope, GitConfigSource, OAuthClientConfig, ProcessEnvironment,
};

#[derive(Parser)]
#[command(name = "gc-oauth")]
#[command(about = "OAuth client configuration and redirect state for git hosting providers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the OAuth client configuration for a provider base URL
    Config {
        /// Provider base URL, e.g. https://gitlab.com
        base_url: String,

        /// Git config file to read credential entries from (any, local, global, system)
        #[arg(short, long, default_value = "any")]
        scope: GitConfigScope,

        /// Repository directory git config is read from
        #[arg(short, long, default_value = ".")]
        repo: PathBuf,

        /// Print the client secret instead of redacting it
        #[arg(long)]
        show_secret: bool,
    },
    /// Encode or decode the OAuth state parameter
    State {
        #[command(subcommand)]
        action: StateAction,
    },
    /// Print the provider authorize URL for an IDE instance
    AuthorizeUrl {
        /// Provider base URL, e.g. https://gitlab.com
        base_url: String,

        /// IDE resource path, e.g. /environments/<env>/ide/<id>/
        #[arg(long)]
        ide_path: String,

        /// Local callback listener, e.g. http://localhost:4435
        #[arg(long)]
        callback_url: String,

        /// Redirect URI registered with the provider
        #[arg(long)]
        redirect_uri: String,

        #[arg(short, long, default_value = "any")]
        scope: GitConfigScope,

        #[arg(short, long, default_value = ".")]
        repo: PathBuf,
    },
    /// Print the local forward URL for a provider redirect
    Route {
        /// Full redirect URL received from the provider
        redirect_url: String,
    },
}

#[derive(Subcommand)]
enum StateAction {
    Encode {
        ide_path: String,
        callback_url: String,
    },
    Decode {
        token: String,
    },
}

fn resolve_config(
    base_url: &str,
    scope: GitConfigScope,
    repo: PathBuf,
) -> Result<OAuthClientConfig> {
    let resolver = ConfigResolver::new(Box::new(GitConfigSource::new(repo, scope)));
    resolver
        .resolve(base_url, &ProcessEnvironment)
        .with_context(|| format!("Failed to resolve OAuth configuration for {}", base_url))
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Config {
            base_url,
            scope,
            repo,
            show_secret,
        } => {
            let mut config = resolve_config(&base_url, scope, repo)?;
            if !config.is_complete() {
                log::warn!("OAuth configuration for {} is incomplete", base_url);
            }
            if !show_secret && !config.client_secret.is_empty() {
                config.client_secret = "<redacted>".to_string();
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::State { action } => match action {
            StateAction::Encode {
                ide_path,
                callback_url,
            } => {
                let token = encode_state(&ide_path, &callback_url)
                    .context("Failed to encode OAuth state")?;
                println!("{}", token);
            }
            StateAction::Decode { token } => {
                let state = decode_state(&token).context("Failed to decode OAuth state")?;
                println!("{}", serde_json::to_string_pretty(&state)?);
            }
        },
        Command::AuthorizeUrl {
            base_url,
            ide_path,
            callback_url,
            redirect_uri,
            scope,
            repo,
        } => {
            let config = resolve_config(&base_url, scope, repo)?;
            let state = encode_state(&ide_path, &callback_url)
                .context("Failed to encode OAuth state")?;
            let url = build_authorize_url(&config, &redirect_uri, &state)?;
            log::info!("Built authorize URL for {}", base_url);
            println!("{}", url);
        }
        Command::Route { redirect_url } => {
            let routed = CallbackParams::from_url_str(&redirect_url)?
                .into_routed()
                .context("Rejected OAuth callback")?;
            log::info!(
                "Routing authorization code to IDE {} on port {}",
                routed.state.ide,
                routed.state.port
            );
            println!("{}", routed.forward_url()?);
        }
    }

    Ok(())
}
