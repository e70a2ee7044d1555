//! `passvault generate`: create a random password.
//!
//! Length bounds and character classes fall back to `.passvault.toml`.
//! The source of randomness is one of: the thread RNG (default), a
//! fixed `--seed`, or `--real-random`, which mixes 16 typed keystrokes
//! with their timing.

use console::{style, Term};
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{clipboard, open_session, settings, Cli};
use crate::errors::{PassVaultError, Result};
use crate::generator::{CharClass, PasswordGenerator, SeedMixer};
use crate::vault::VaultEntry;

/// Options gathered from the `generate` subcommand.
pub struct GenerateArgs<'a> {
    pub low: Option<usize>,
    pub high: Option<usize>,
    pub length: Option<usize>,
    pub classes: &'a [CharClass],
    pub seed: Option<u64>,
    pub real_random: bool,
    pub copy: bool,
    pub save: bool,
    pub site: &'a str,
    pub user: &'a str,
    pub note: &'a str,
}

/// Execute the `generate` command.
pub fn execute(cli: &Cli, args: &GenerateArgs<'_>) -> Result<()> {
    let settings = settings()?;
    let (low, high) = match args.length {
        Some(n) => (n, n),
        None => (
            args.low.unwrap_or(settings.generator_low),
            args.high.unwrap_or(settings.generator_high),
        ),
    };
    let classes = if args.classes.is_empty() {
        settings.generator_classes()?
    } else {
        args.classes.to_vec()
    };

    // Unlock first so a wrong passphrase fails before any password is shown.
    let mut session = if args.save {
        Some(open_session(cli)?)
    } else {
        None
    };

    let seed = if args.real_random {
        Some(read_keystroke_seed()?)
    } else {
        args.seed
    };

    let password = Zeroizing::new(match seed {
        Some(seed) => PasswordGenerator::with_seed(seed).generate(low, high, &classes)?,
        None => PasswordGenerator::new().generate(low, high, &classes)?,
    });
    let details = format!("length {}", password.chars().count());

    let saved = match session.as_mut() {
        Some(session) => {
            let entry = VaultEntry::new(password.as_str(), args.site, args.user, args.note);
            let summary = entry.summary();
            let id = session.add(entry);
            session.save()?;
            crate::audit::log_audit(cli, "generate", summary.as_deref(), Some(&details));
            Some(id)
        }
        None => {
            crate::audit::log_audit(cli, "generate", None, Some(&details));
            None
        }
    };

    if args.copy {
        clipboard::copy(&password)?;
        output::success(&format!(
            "Generated a {}-character password and copied it to the clipboard",
            password.chars().count()
        ));
    } else {
        println!("{}", password.as_str());
    }
    if let Some(id) = saved {
        output::success(&format!("Saved as entry {}", output::short_id(&id)));
    }

    Ok(())
}

/// Read [`SEED_INPUT_LEN`](crate::generator::SEED_INPUT_LEN) raw
/// keystrokes from the terminal and mix them into a seed.
fn read_keystroke_seed() -> Result<u64> {
    let term = Term::stderr();
    if !term.is_term() {
        return Err(PassVaultError::CommandFailed(
            "--real-random needs an interactive terminal".into(),
        ));
    }

    let mut mixer = SeedMixer::new();
    eprintln!(
        "{}",
        style(format!("Type {} random characters:", mixer.remaining())).bold()
    );

    while !mixer.is_complete() {
        let ch = term
            .read_char()
            .map_err(|e| PassVaultError::CommandFailed(format!("keystroke input: {e}")))?;
        mixer.push(ch);
        let _ = term.write_str("*");
    }
    let _ = term.write_line("");

    mixer
        .seed()
        .ok_or_else(|| PassVaultError::CommandFailed("not enough keystrokes".into()))
}
