use clap::{Parser, Subcommand};
use piket::adapters::{
    DeliveredReminder, FileStore, HttpRosterSource, LocalNotificationPlatform, TokioTimeProvider,
};
use piket::config::{AppConfig, ConfigLayer};
use piket::identity;
use piket::schedule::ClassifiedShift;
use piket::{EngineSettings, ReminderEngine, ReminderStatus};
use std::path::PathBuf;
use tokio::sync::mpsc;

const DEFAULT_SUGGESTION_LIMIT: usize = 5;

type CliEngine = ReminderEngine<
    TokioTimeProvider,
    HttpRosterSource,
    LocalNotificationPlatform<TokioTimeProvider>,
    FileStore,
>;

#[derive(Parser, Debug)]
#[command(name = "piket", version, about = "Duty roster reminders")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Command,
    #[arg(long, env = "PIKET_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "PIKET_APP_NAME")]
    app_name: Option<String>,
    #[arg(long, env = "PIKET_ROSTER_URL")]
    roster_url: Option<String>,
    #[arg(long, env = "PIKET_FETCH_TIMEOUT")]
    fetch_timeout: Option<String>,
    #[arg(long, env = "PIKET_DATA_DIR")]
    data_dir: Option<PathBuf>,
    #[arg(long, env = "PIKET_UTC_OFFSET", allow_hyphen_values = true)]
    utc_offset: Option<String>,
    #[arg(long, env = "PIKET_REFRESH_INTERVAL")]
    refresh_interval: Option<String>,
    /// Run without notification support, as on a simulator.
    #[arg(long, env = "PIKET_HEADLESS")]
    headless: bool,
    #[arg(long, env = "PIKET_LOG_JSON")]
    pub(crate) log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bind yourself to a roster entry by full name.
    Identify {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// List staff whose name contains the given text.
    Suggest {
        partial: String,
        #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },
    /// Show every staff member and their shifts.
    Roster,
    /// Show your own shifts.
    Agenda,
    /// Schedule reminders for your shifts and deliver them until done.
    Remind,
    /// Show the saved identity, the reminder flag and live reminders.
    Status,
    /// Cancel reminders and forget the saved identity.
    Reset,
}

impl Cli {
    fn config_layer(&self) -> ConfigLayer {
        ConfigLayer {
            app_name: self.app_name.clone(),
            roster_url: self.roster_url.clone(),
            fetch_timeout: self.fetch_timeout.clone(),
            data_dir: self.data_dir.clone(),
            utc_offset: self.utc_offset.clone(),
            refresh_interval: self.refresh_interval.clone(),
            device_capable: self.headless.then_some(false),
        }
    }

    fn resolve_config(&self) -> Result<AppConfig, String> {
        let file = match self.config.as_deref() {
            Some(path) => ConfigLayer::load(path).map_err(|err| err.to_string())?,
            None => ConfigLayer::default(),
        };
        self.config_layer()
            .layered_over(file)
            .into_config()
            .map_err(|err| err.to_string())
    }
}

pub(crate) async fn run(cli: Cli) -> i32 {
    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return 2;
        }
    };
    let (engine, deliveries) = match build_engine(&config) {
        Ok(built) => built,
        Err(err) => {
            eprintln!("error: {err}");
            return 2;
        }
    };

    match cli.command {
        Command::Identify { name } => run_identify(&engine, &name.join(" ")).await,
        Command::Suggest { partial, limit } => run_suggest(&engine, &partial, limit).await,
        Command::Roster => run_roster(&engine).await,
        Command::Agenda => run_agenda(&engine).await,
        Command::Remind => run_remind(&engine, deliveries).await,
        Command::Status => run_status(&engine).await,
        Command::Reset => {
            engine.reset().await;
            println!("Reminders cancelled and saved identity cleared.");
            0
        }
    }
}

fn build_engine(
    config: &AppConfig,
) -> Result<(CliEngine, mpsc::UnboundedReceiver<DeliveredReminder>), String> {
    let source = HttpRosterSource::new(config.roster_url.clone(), config.fetch_timeout)
        .map_err(|err| format!("failed to build http client: {err}"))?;
    let (platform, deliveries) =
        LocalNotificationPlatform::new(TokioTimeProvider, config.device_capable);
    let engine = ReminderEngine::new(
        TokioTimeProvider,
        source,
        platform,
        FileStore::new(&config.data_dir),
        EngineSettings::from(config),
    );
    Ok((engine, deliveries))
}

async fn run_identify(engine: &CliEngine, name: &str) -> i32 {
    let roster = engine.fetch_roster().await;
    match engine.identify(&roster, name).await {
        Ok(resolved) => {
            println!(
                "Identified as {} ({}) on the {} roster for {} {} [{}].",
                resolved.staff.full_name,
                resolved.staff.role,
                roster.snapshot.institution_name,
                roster.snapshot.period_label,
                roster.snapshot.year,
                roster.origin.as_str()
            );
            print_agenda(&engine.agenda(&resolved.staff));
            0
        }
        Err(err) => {
            eprintln!("{err}");
            let suggestions = identity::suggest(&roster.snapshot, name, DEFAULT_SUGGESTION_LIMIT);
            if !suggestions.is_empty() {
                let names: Vec<&str> = suggestions
                    .iter()
                    .map(|staff| staff.full_name.as_str())
                    .collect();
                eprintln!("did you mean: {}", names.join(", "));
            }
            1
        }
    }
}

async fn run_suggest(engine: &CliEngine, partial: &str, limit: usize) -> i32 {
    let roster = engine.fetch_roster().await;
    for staff in identity::suggest(&roster.snapshot, partial, limit) {
        println!("{} ({})", staff.full_name, staff.role);
    }
    0
}

async fn run_roster(engine: &CliEngine) -> i32 {
    let roster = engine.fetch_roster().await;
    let snapshot = &roster.snapshot;
    println!(
        "{} - {} {} [{}]",
        snapshot.institution_name,
        snapshot.period_label,
        snapshot.year,
        roster.origin.as_str()
    );
    for staff in &snapshot.staff {
        println!();
        println!("{} ({})", staff.full_name, staff.role);
        print_agenda(&engine.agenda(staff));
    }
    0
}

async fn run_agenda(engine: &CliEngine) -> i32 {
    let Some(resolved) = engine.resume().await else {
        eprintln!("no saved identity; run `piket identify <NAME>` first");
        return 1;
    };
    println!("{} ({})", resolved.staff.full_name, resolved.staff.role);
    print_agenda(&engine.agenda(&resolved.staff));
    0
}

async fn run_remind(
    engine: &CliEngine,
    mut deliveries: mpsc::UnboundedReceiver<DeliveredReminder>,
) -> i32 {
    let Some(resolved) = engine.resume().await else {
        eprintln!("no saved identity; run `piket identify <NAME>` first");
        return 1;
    };

    let summary = match engine.remind(&resolved).await {
        ReminderStatus::Scheduled(summary) => summary,
        ReminderStatus::PermissionDenied => {
            eprintln!("notifications are not available; reminders were not scheduled");
            return 1;
        }
    };
    println!(
        "{} reminder(s) scheduled, {} skipped, {} failed.",
        summary.scheduled, summary.skipped, summary.failed
    );

    let mut remaining = summary.scheduled;
    while remaining > 0 {
        tokio::select! {
            delivered = deliveries.recv() => {
                let Some(reminder) = delivered else { break };
                println!("[{}] {}: {}", reminder.shift_key, reminder.title, reminder.body);
                remaining -= 1;
            }
            _ = tokio::signal::ctrl_c() => {
                engine.scheduler().cancel_all().await;
                break;
            }
        }
    }
    0
}

async fn run_status(engine: &CliEngine) -> i32 {
    let status = engine.status().await;
    match (&status.identity, &status.user_name) {
        (Some(resolved), _) => println!(
            "Identity: {} ({}) on the {} roster for {} {} [{}]",
            resolved.staff.full_name,
            resolved.staff.role,
            resolved.roster.snapshot.institution_name,
            resolved.roster.snapshot.period_label,
            resolved.roster.snapshot.year,
            resolved.roster.origin.as_str()
        ),
        (None, Some(name)) => println!("Identity: {name} (profile data missing)"),
        (None, None) => println!("Identity: none"),
    }
    println!(
        "Notifications: {}",
        if status.notifications_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("Live reminders: {}", status.pending_reminders.len());
    for ticket in &status.pending_reminders {
        println!("  {} ({})", ticket.shift_key, ticket.handle);
    }
    0
}

fn print_agenda(agenda: &[ClassifiedShift]) {
    if agenda.is_empty() {
        println!("  (no shifts)");
        return;
    }
    for entry in agenda {
        let shift = &entry.shift;
        let mut line = format!(
            "  [{:<8}] {} {} {}-{}",
            entry.status().label(),
            shift.weekday_label,
            shift.date,
            shift.start_time,
            shift.end_time
        );
        if !shift.note.trim().is_empty() {
            line.push_str(&format!("  {}", shift.note.trim()));
        }
        println!("{line}");
    }
}
