//! tfx-probe - Main entry point

use clap::Parser;
use log::{debug, info};
use std::io;

use tfx_probe::context::{process_env, ContextResolver, InputSource};
use tfx_probe::hcp::{run_report, ReportOptions};
use tfx_probe::output::{print_error, Reporter};
use tfx_probe::scratch::ScratchSpace;
use tfx_probe::ui::TerminalPrompter;
use tfx_probe::{Cli, Result, TfeClient};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    info!("Starting tfx-probe v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: org={:?}, quiet={}, debug={}, batch={}, single_version={}, max_pages={}",
        cli.org, cli.quiet, cli.debug, cli.batch, cli.single_version, cli.max_pages
    );

    // The scratch space is dropped inside `run`, so it is gone before exiting
    if let Err(e) = run(&cli).await {
        print_error(&e);
        std::process::exit(e.exit_code());
    }

    info!("Completed successfully");
}

async fn run(cli: &Cli) -> Result<()> {
    let prompter = TerminalPrompter;
    let source = InputSource::new(&process_env, &prompter, cli.batch);
    let context = ContextResolver::new(source).resolve(cli.org.as_deref())?;

    let mut client = TfeClient::from_context(&context)?;
    client.set_debug(cli.debug);
    client.set_max_pages(cli.max_pages);

    let scratch = ScratchSpace::create(ScratchSpace::default_root()?)?;

    let options = ReportOptions {
        single_version: cli.single_version,
        hide_progress: cli.quiet || cli.debug,
    };
    let mut reporter = Reporter::new(io::stdout(), cli.quiet, !cli.no_color);

    let totals = run_report(&client, &context, &scratch, &options, &mut reporter).await?;
    reporter.flush()?;

    debug!(
        "Reported {} workspaces with {} resources",
        totals.workspaces, totals.resources
    );
    Ok(())
}
