use crate::opts::PrivateKeyError;
use eyre::EyreHandler;
use itertools::Itertools;
use pharos_config::ConfigError;
use std::{error::Error, fmt, iter};

/// Short `eyre` reports for operators: the deduplicated cause chain and, for the failures an
/// operator can fix by themselves, a hint.
pub struct Handler {
    verbose: Option<Box<dyn EyreHandler>>,
}

impl Handler {
    /// `verbose` takes over `Debug` formatting when set.
    pub fn new(verbose: Option<Box<dyn EyreHandler>>) -> Self {
        Self { verbose }
    }
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Display;
        dedup_chain(error).into_iter().format("; ").fmt(f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(verbose) = &self.verbose {
            return verbose.debug(error, f);
        }
        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        let causes = dedup_chain(error);
        let Some((message, sources)) = causes.split_first() else { return Ok(()) };
        write!(f, "{message}")?;
        if !sources.is_empty() {
            write!(f, "\n\nCaused by:")?;
            for source in sources {
                write!(f, "\n  {source}")?;
            }
        }
        if let Some(hint) = hint(error) {
            write!(f, "\n\nHint: {hint}")?;
        }
        Ok(())
    }

    fn track_caller(&mut self, location: &'static std::panic::Location<'static>) {
        if let Some(verbose) = &mut self.verbose {
            verbose.track_caller(location);
        }
    }
}

fn chain<'a>(error: &'a (dyn Error + 'static)) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    iter::successors(Some(error), |err| (*err).source())
}

/// The messages of `error` and its sources, dropping a source whose message is already part of
/// the previous one (`msg1: msg2; msg2` -> `msg1: msg2`).
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes = chain(error).map(|err| err.to_string().trim().to_string()).collect_vec();
    causes.dedup_by(|b, a| a.contains(b.as_str()));
    causes
}

/// What the operator can do about `error`, if it is a setup mistake.
fn hint(error: &(dyn Error + 'static)) -> Option<&'static str> {
    chain(error).find_map(|err| {
        if let Some(ConfigError::ContractNotConfigured) = err.downcast_ref::<ConfigError>() {
            return Some("deploy with `pharos deploy` and put the address in .env");
        }
        match err.downcast_ref::<PrivateKeyError>()? {
            PrivateKeyError::Missing => Some("add PRIVATE_KEY=0x... to .env"),
            PrivateKeyError::ExistsAsEnvVar(_) => Some("pass the key itself, e.g. `$PRIVATE_KEY`"),
            PrivateKeyError::Malformed | PrivateKeyError::Invalid(_) => None,
        }
    })
}

/// Installs the [`eyre`] and [`panic`](mod@std::panic) hooks as the global ones.
///
/// Reports stay short unless `PHAROS_DEBUG` is set, in which case the `color-eyre` report is
/// used. Panics always get the `color-eyre` one.
pub fn install() {
    let panic_section = "This is a bug. Consider reporting it at \
                         https://github.com/hrumdrops/pharos-russia-mint";
    let (panic_hook, eyre_hook) =
        color_eyre::config::HookBuilder::default().panic_section(panic_section).into_hooks();
    panic_hook.install();
    let eyre_hook = eyre_hook.into_eyre_hook();
    let verbose = std::env::var_os("PHAROS_DEBUG").is_some();
    if let Err(err) =
        eyre::set_hook(Box::new(move |e| Box::new(Handler::new(verbose.then(|| eyre_hook(e))))))
    {
        debug!("failed to install eyre error hook: {err}");
    }
}
