use clap::Parser;
use passvault::cli::commands::generate::GenerateArgs;
use passvault::cli::{Cli, Commands};

/// Environment variable holding the tracing filter (e.g. `passvault=debug`).
const LOG_ENV: &str = "PASSVAULT_LOG";

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref site,
            ref user,
            ref note,
            generate,
        } => passvault::cli::commands::add::execute(&cli, site, user, note, generate),
        Commands::List { ref search } => {
            passvault::cli::commands::list::execute(&cli, search.as_deref())
        }
        Commands::Show { ref id, copy } => passvault::cli::commands::show::execute(&cli, id, copy),
        Commands::Edit {
            ref id,
            ref site,
            ref user,
            ref note,
            secret,
        } => passvault::cli::commands::edit::execute(
            &cli,
            id,
            site.clone(),
            user.clone(),
            note.clone(),
            secret,
        ),
        Commands::Delete { ref id, force } => {
            passvault::cli::commands::delete::execute(&cli, id, force)
        }
        Commands::Import { ref file } => passvault::cli::commands::import_cmd::execute(&cli, file),
        Commands::Backup { ref dir } => {
            passvault::cli::commands::backup::execute(&cli, dir.as_deref())
        }
        Commands::Passwd => passvault::cli::commands::passwd::execute(&cli),
        Commands::Generate {
            low,
            high,
            length,
            ref classes,
            seed,
            real_random,
            copy,
            save,
            ref site,
            ref user,
            ref note,
        } => passvault::cli::commands::generate::execute(
            &cli,
            &GenerateArgs {
                low,
                high,
                length,
                classes,
                seed,
                real_random,
                copy,
                save,
                site,
                user,
                note,
            },
        ),
        Commands::Audit { last, ref since } => {
            passvault::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { shell } => passvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr and are off unless `PASSVAULT_LOG` is set,
/// so stdout stays clean for piping secrets.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
