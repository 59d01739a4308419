use anyhow::{Context, Result};
use shipgate::cli::commands::{ResolveCommand, VerifyCommand};
use shipgate::cli::output::{format_release, format_skip, format_verdict, style, CHECK, CROSS, INFO};
use shipgate::cli::{Cli, Command};
use shipgate::core::{resolver, ReleaseGate};
use shipgate::distribution::{DistributionConfig, HttpReleaseClient};
use shipgate::persistence::SnapshotStore;
use shipgate::project::{PlistBundleReader, XcodebuildProject};
use shipgate::ProjectConfig;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Resolve(cmd) => run_resolve(cmd).await?,
        Command::Verify(cmd) => run_verify(cmd).await?,
    }

    Ok(())
}

async fn run_resolve(cmd: &ResolveCommand) -> Result<()> {
    println!("{}", style(format!("Loading settings from {}", cmd.config)).bold());

    let config = match ProjectConfig::from_file(&cmd.config)
        .with_context(|| format!("Failed to load {}", cmd.config))
    {
        Ok(config) => config,
        Err(e) => {
            println!("{} {}", CROSS, style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    };

    let project = XcodebuildProject::new(&config.xcodeproj);
    let bundles = PlistBundleReader::new();

    println!();
    println!("{}", style("Resolving target settings").bold());

    let resolution = match resolver::resolve(&config, &project, &bundles).await {
        Ok(resolution) => resolution,
        Err(e) => {
            println!("{} {}", CROSS, style(e).red());
            std::process::exit(1);
        }
    };

    for skipped in &resolution.skipped {
        println!("{}", format_skip(skipped));
    }
    for (name, release) in &resolution.releases {
        println!("{}", format_release(name, release));
    }

    println!();
    println!("{}", style("Saving target information").bold());

    let store = SnapshotStore::new(&cmd.output);
    store.save(&resolution.releases).await?;
    println!("|- {}", style(format!("Saved to {}", cmd.output)).green());

    if cmd.json {
        println!();
        println!("{}", serde_json::to_string_pretty(&resolution.releases)?);
    }

    Ok(())
}

async fn run_verify(cmd: &VerifyCommand) -> Result<()> {
    println!("{}", style("Starting release verification").bold());

    let store = SnapshotStore::new(&cmd.snapshot);
    let candidates = match store.load().await {
        Ok(candidates) => candidates,
        Err(e) => {
            println!("{} {}", CROSS, style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    };

    if candidates.is_empty() {
        println!("{} No targets to verify", INFO);
    }

    let client = match HttpReleaseClient::new(DistributionConfig::new(&cmd.api_url, &cmd.token)) {
        Ok(client) => client,
        Err(e) => {
            println!("{} {}", CROSS, style(e).red());
            std::process::exit(1);
        }
    };

    let result = match ReleaseGate::evaluate_all(&candidates, &client).await {
        Ok(result) => result,
        Err(e) => {
            println!("{} {}", CROSS, style(e).red());
            std::process::exit(1);
        }
    };

    for verdict in &result.verdicts {
        println!("{}", format_verdict(verdict));
    }

    if cmd.json {
        println!();
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    println!();
    if result.passed {
        println!(
            "{} {}",
            CHECK,
            style("All version and build numbers are ahead of the published release.").green()
        );
        Ok(())
    } else {
        println!(
            "{} {}",
            CROSS,
            style("Can't continue, as every version and build number must be ahead of the published release.")
                .red()
        );
        std::process::exit(1);
    }
}
