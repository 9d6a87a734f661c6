use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::config::{
    ENV_ASSESSMENT_DELAY_MS, ENV_AUTH_DELAY_MS, ENV_LESSON_SECONDS, ENV_PROVIDER_TIMEOUT_MS,
    parse_number,
};
use services::{
    AppConfig, AppServices, AuthService, Clock, ConfigError, DashboardService, LessonService,
    PlacementService, ProfileService,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    Config(ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ConfigError> for ArgsError {
    fn from(e: ConfigError) -> Self {
        ArgsError::Config(e)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --lesson-seconds <n>        time budget per lesson (default 1800)");
    eprintln!("  --auth-delay-ms <n>         simulated sign-in latency (default 1500)");
    eprintln!("  --social-delay-ms <n>       simulated social sign-up latency (default 1000)");
    eprintln!("  --assessment-delay-ms <n>   simulated placement test latency (default 2000)");
    eprintln!("  --provider-timeout-ms <n>   give up on a provider call after this long (default 10000)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {ENV_LESSON_SECONDS}, {ENV_AUTH_DELAY_MS},");
    eprintln!("  {ENV_ASSESSMENT_DELAY_MS}, {ENV_PROVIDER_TIMEOUT_MS}");
    eprintln!("  RUST_LOG (default: info)");
}

/// Applies command-line flags on top of `config`; `None` means help was requested.
fn parse_args(
    args: &mut impl Iterator<Item = String>,
    mut config: AppConfig,
) -> Result<Option<AppConfig>, ArgsError> {
    while let Some(arg) = args.next() {
        let flag = match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--lesson-seconds" => "--lesson-seconds",
            "--auth-delay-ms" => "--auth-delay-ms",
            "--social-delay-ms" => "--social-delay-ms",
            "--assessment-delay-ms" => "--assessment-delay-ms",
            "--provider-timeout-ms" => "--provider-timeout-ms",
            _ => return Err(ArgsError::UnknownArg(arg)),
        };
        let raw = require_value(args, flag)?;
        config = match flag {
            "--lesson-seconds" => config.with_lesson_time_budget_secs(parse_number(flag, &raw)?),
            "--auth-delay-ms" => config.with_auth_delay_ms(parse_number(flag, &raw)?),
            "--social-delay-ms" => config.with_social_auth_delay_ms(parse_number(flag, &raw)?),
            "--assessment-delay-ms" => config.with_assessment_delay_ms(parse_number(flag, &raw)?),
            _ => config.with_provider_timeout_ms(parse_number(flag, &raw)?),
        };
    }
    config.validate()?;
    Ok(Some(config))
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn placement(&self) -> Arc<PlacementService> {
        self.services.placement()
    }

    fn lessons(&self) -> Arc<LessonService> {
        self.services.lessons()
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        self.services.dashboard()
    }

    fn profile(&self) -> Arc<ProfileService> {
        self.services.profile()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let base = AppConfig::from_env()?;
    let mut args = std::env::args().skip(1);
    let config = match parse_args(&mut args, base) {
        Ok(Some(config)) => config,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            return Err(e.into());
        }
    };

    init_tracing();
    info!(
        lesson_secs = config.lesson_time_budget_secs(),
        timeout_ms = config.provider_timeout().as_millis(),
        "starting EnglishFlow"
    );

    let services = AppServices::simulated(config, Clock::system())?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("EnglishFlow")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<AppConfig>, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_owned());
        parse_args(&mut iter, AppConfig::default())
    }

    #[test]
    fn no_flags_keep_defaults() {
        assert_eq!(parse(&[]).unwrap(), Some(AppConfig::default()));
    }

    #[test]
    fn flags_override_config() {
        let config = parse(&["--lesson-seconds", "60", "--provider-timeout-ms", "500"])
            .unwrap()
            .unwrap();
        assert_eq!(config.lesson_time_budget_secs(), 60);
        assert_eq!(config.provider_timeout().as_millis(), 500);
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse(&["--help", "--bogus"]).unwrap(), None);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            parse(&["--auth-delay-ms"]),
            Err(ArgsError::MissingValue { flag: "--auth-delay-ms" })
        ));
        assert!(matches!(
            parse(&["--lesson-seconds", "soon"]),
            Err(ArgsError::Config(ConfigError::InvalidNumber { .. }))
        ));
        assert!(matches!(
            parse(&["--lesson-seconds", "0"]),
            Err(ArgsError::Config(ConfigError::ZeroLessonBudget))
        ));
        assert!(matches!(parse(&["--db"]), Err(ArgsError::UnknownArg(_))));
    }
}
