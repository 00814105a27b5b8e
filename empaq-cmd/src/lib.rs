//! Command implementations for the empaq CLI.
//!
//! Provides subcommands for running the extraction pipeline on a local
//! payload and for fetching the dashboard payload over HTTP and
//! assessing the result against thresholds.

use clap::Subcommand;

pub mod extract;
pub mod monitor;

#[derive(Subcommand)]
pub enum Command {
    /// Run extraction on a local payload (text table or JSON)
    Extract {
        /// Path to the payload file, or "-" for stdin
        #[arg(short, long)]
        input: String,

        /// Override the clock, as YYYY-MM-DDTHH:MM:SS (defaults to now)
        #[arg(long)]
        now: Option<String>,
    },

    /// Fetch the dashboard payload over HTTP, extract and assess it
    Monitor {
        /// URL serving the payload
        #[arg(short, long)]
        url: String,

        /// Upper critical bound (put side)
        #[arg(long)]
        critico_put: f64,

        /// Upper warning bound (put side)
        #[arg(long)]
        alerta_put: f64,

        /// Lower warning bound (call side)
        #[arg(long)]
        alerta_call: f64,

        /// Lower critical bound (call side)
        #[arg(long)]
        critico_call: f64,

        /// Override the clock, as YYYY-MM-DDTHH:MM:SS (defaults to now)
        #[arg(long)]
        now: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Extract { input, now } => extract::run_extract(&input, now.as_deref()),
        Command::Monitor {
            url,
            critico_put,
            alerta_put,
            alerta_call,
            critico_call,
            now,
        } => {
            let thresholds = empaq_assess::ThresholdSet {
                critico_put,
                alerta_put,
                alerta_call,
                critico_call,
            };
            monitor::run_monitor(&url, &thresholds, now.as_deref()).await
        }
    }
}

/// Resolve the effective clock for a run: the `--now` override when
/// given, the local wall clock otherwise.
pub(crate) fn resolve_now(now: Option<&str>) -> anyhow::Result<chrono::NaiveDateTime> {
    match now {
        Some(s) => chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map_err(|e| anyhow::anyhow!("invalid --now value {:?}: {}", s, e)),
        None => Ok(chrono::Local::now().naive_local()),
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_now;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_resolve_now_override() {
        let now = resolve_now(Some("2025-12-06T15:05:00")).unwrap();
        assert_eq!(
            now.date(),
            NaiveDate::from_ymd_opt(2025, 12, 6).unwrap()
        );
        assert_eq!(now.hour(), 15);
    }

    #[test]
    fn test_resolve_now_rejects_garbage() {
        assert!(resolve_now(Some("yesterday")).is_err());
    }
}
