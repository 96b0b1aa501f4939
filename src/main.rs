use bppctl::control::ControlConfig;
use bppctl::load_control_file;
use bppctl::model::ShowOptions;
use bppctl::parser::ParsingError;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the control file
    #[arg(short, long)]
    cfile: PathBuf,

    /// Build the species tree and print it
    #[arg(short, long)]
    tree: bool,

    /// Print the populated configuration as JSON
    #[arg(short, long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Parsing(#[from] ParsingError),
    #[error("Failed to serialize configuration: {0}")]
    Json(#[from] serde_json::Error),
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = load_control_file(&cli.cfile)?;
    debug!(?config, "configuration");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print_summary(&config);
    }

    if cli.tree {
        match config.build_species_tree() {
            Some(tree) => {
                let tree = tree?;
                println!();
                tree.show_ascii(ShowOptions::LABEL | ShowOptions::BRANCH_LENGTH);
                println!("{}", tree.to_newick());
            }
            None => println!("No 'species&tree' record"),
        }
    }

    Ok(())
}

fn print_summary(config: &ControlConfig) {
    println!("seed:          {}", config.seed);
    if let Some(arch) = config.arch {
        println!("arch:          {arch}");
    }
    if let Some(seqfile) = &config.seqfile {
        println!("seqfile:       {seqfile}");
    }
    if let Some(outfile) = &config.outfile {
        println!("outfile:       {outfile}");
    }
    println!(
        "mcmc:          burnin {}, nsample {}, sampfreq {}",
        config.burnin, config.nsample, config.sampfreq
    );
    println!(
        "thetaprior:    {} {} ({:?})",
        config.theta_prior.alpha, config.theta_prior.beta, config.theta_estimate
    );
    println!("tauprior:      {} {}", config.tau_prior.alpha, config.tau_prior.beta);
    if let Some(record) = &config.species_and_tree {
        println!("species:       {}", record.reorder);
        println!("species tree:  {}", record.newick);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
