//! Demo and inspection CLI for the liffground session core.
//!
//! Drives the full bootstrap against a configurable stub platform and
//! renders the resulting snapshot as the label/value list the browser
//! playground shows. The `url` subcommand reproduces the loader's CDN URL
//! construction for a given version selector.

use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lg_domain::config::PlaygroundConfig;
use lg_domain::{ContextType, Scope, SdkVersionSelection};
use lg_platform::{cdn_url, SdkLoader, StaticScript, StubPlatform};
use lg_session::{RecordingHost, Session, Snapshot};

#[derive(Parser)]
#[command(name = "liffground", about = "Platform SDK playground session core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bootstrap a session against a stub platform and print the snapshot.
    Run {
        /// Query string, e.g. "version=2&patch=true&liffId=1234-abcd".
        #[arg(long, default_value = "")]
        query: String,
        /// Start with a logged-in user.
        #[arg(long)]
        logged_in: bool,
        /// Simulate an SDK build without the granted-permission query.
        #[arg(long)]
        no_permission_api: bool,
        /// Context type of the embedding surface (utou, room, group,
        /// square_chat, external, none).
        #[arg(long, default_value = "utou")]
        context_type: String,
        /// Actually fetch the SDK script from the CDN instead of using the
        /// in-memory stub script.
        #[arg(long)]
        fetch: bool,
        /// Print the snapshot as JSON instead of a label/value list.
        #[arg(long)]
        json: bool,
    },
    /// Validate a version selector and print the CDN URL it resolves to.
    Url {
        #[arg(long)]
        version: String,
        #[arg(long)]
        patch: bool,
    },
    /// Print the configuration resolved from a query string.
    Config {
        #[arg(long, default_value = "")]
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("liffground=info,lg_session=info,lg_platform=info")),
        )
        .init();

    match Cli::parse().command {
        Command::Run {
            query,
            logged_in,
            no_permission_api,
            context_type,
            fetch,
            json,
        } => run(&query, logged_in, no_permission_api, &context_type, fetch, json).await,
        Command::Url { version, patch } => {
            let selection = SdkVersionSelection::parse(&version, patch)?;
            let config = PlaygroundConfig::default();
            println!("{}", cdn_url(&selection, &config.cdn));
            Ok(())
        }
        Command::Config { query } => {
            let config = PlaygroundConfig::from_query(&query);
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

async fn run(
    query: &str,
    logged_in: bool,
    no_permission_api: bool,
    context_type: &str,
    fetch: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = PlaygroundConfig::from_query(query);
    if config.liff_id.is_empty() {
        config.liff_id = "1234-abcd".into();
    }

    let context_type: ContextType =
        serde_json::from_value(serde_json::Value::String(context_type.to_string()))
            .with_context(|| format!("unknown context type {context_type:?}"))?;

    tracing::info!(logged_in, no_permission_api, ?context_type, fetch, "bootstrapping session");
    let stub = build_stub(logged_in, no_permission_api, context_type);
    let page_url = format!("https://liff.example/?{}", query.strip_prefix('?').unwrap_or(query));
    let session = Session::new(config.clone(), Arc::new(RecordingHost::new(page_url)));

    if fetch {
        let loader = SdkLoader::new(config.cdn.clone())?;
        session.bootstrap(&loader, Arc::new(stub)).await;
    } else {
        session.bootstrap(&StaticScript::default(), Arc::new(stub)).await;
    }

    let snap = session.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    } else {
        print_snapshot(&snap);
    }
    Ok(())
}

fn build_stub(logged_in: bool, no_permission_api: bool, context_type: ContextType) -> StubPlatform {
    let scope = vec![Scope::Profile, Scope::OpenId, Scope::ChatMessageWrite];
    let mut stub = StubPlatform::new()
        .with_context_type(context_type)
        .with_scope(scope.clone())
        .with_available_api("shareTargetPicker")
        .with_available_api("scanCodeV2");

    if logged_in {
        stub = stub
            .with_logged_in(true)
            .with_profile(lg_domain::Profile {
                user_id: "U0000000000000000".into(),
                display_name: "Playground User".into(),
                picture_url: None,
                status_message: Some("exploring the SDK".into()),
            })
            .with_tokens(
                "stub-id-token",
                "stub-access-token",
                lg_domain::DecodedIdToken {
                    name: Some("Playground User".into()),
                    email: Some("playground@example.com".into()),
                    ..Default::default()
                },
            );
        if !no_permission_api {
            stub = stub.with_granted(scope);
        }
    }

    stub
}

fn print_snapshot(snap: &Snapshot) {
    row("Phase", &snap.phase.to_string());
    row("SDK Loaded", &yes_no(snap.sdk_loaded));
    row("Ready", &yes_no(snap.ready));
    row("Logged In", &yes_no(snap.logged_in));
    if let Some(selection) = &snap.selection {
        row("SDK Version", &selection.to_string());
    }
    if let Some(info) = &snap.sdk_info.version {
        row("Reported Version", info);
    }
    row("In Client", &yes_no(snap.in_client));
    if let Some(os) = &snap.os {
        row("OS", &format!("{os:?}").to_lowercase());
    }
    if let Some(lang) = &snap.sdk_info.language {
        row("Language", lang);
    }
    if let Some(line) = &snap.sdk_info.line_version {
        row("LINE Version", line);
    }
    if let Some(context) = &snap.context {
        row("Context Type", &format!("{:?}", context.context_type).to_lowercase());
        let scopes: Vec<&str> = context.scope.iter().map(Scope::as_str).collect();
        row("Context Scope", &scopes.join(", "));
    }
    if let Some(profile) = &snap.profile {
        row("User ID", &profile.user_id);
        row("Display Name", &profile.display_name);
        if let Some(status) = &profile.status_message {
            row("Status Message", status);
        }
    }
    if let Some(id_token) = &snap.tokens.id_token {
        row("ID Token", id_token);
    }
    if let Some(access_token) = &snap.tokens.access_token {
        row("Access Token", access_token);
    }
    if let Some(decoded) = &snap.tokens.decoded {
        if let Some(email) = &decoded.email {
            row("Email", email);
        }
    }
    if let Some(granted) = &snap.granted_scopes {
        let scopes: Vec<&str> = granted.iter().map(Scope::as_str).collect();
        row("Granted Scopes", &scopes.join(", "));
    }

    let mut capabilities: Vec<String> =
        snap.capabilities.iter().map(|c| c.to_string()).collect();
    capabilities.sort();
    row("Capabilities", &capabilities.join(", "));
}

fn row(label: &str, value: &str) {
    println!("{label:<18} {value}");
}

fn yes_no(value: bool) -> String {
    if value { "yes".into() } else { "no".into() }
}
