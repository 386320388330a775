//! upeye - personal activity pattern analysis
//!
//! This tool provides commands for:
//! - Browsing users, days and logged activities
//! - Adding users and activities to the snapshot
//! - Mining recurring patterns from a user's history
//! - Filtering patterns by the activities they involve
//! - Exporting patterns as JSON
//!
//! Uses XDG Base Directory specification for file locations:
//! - Snapshot: $XDG_DATA_HOME/upeye/snapshot.json (~/.local/share/upeye/snapshot.json)
//! - Config: $XDG_CONFIG_HOME/upeye/config.toml (~/.config/upeye/config.toml)
//! - Logs: $XDG_STATE_HOME/upeye/upeye.log (~/.local/state/upeye/upeye.log)

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use upeye_core::analytics::summary::DEFAULT_CHART_LIMIT;
use upeye_core::analytics::{
    activity_catalog, chart_bars, create_default_engine, filter_patterns, primary_patterns,
    FilterMode, PatternSummary,
};
use upeye_core::ingest::{demo_snapshot, NewActivity};
use upeye_core::{Config, MetricSynthesizer, Pattern, PatternLength, Snapshot, UserHistory};

#[derive(Parser)]
#[command(name = "upeye")]
#[command(about = "Find recurring patterns in your logged activities")]
#[command(version)]
struct Args {
    /// Snapshot file to read (default: from config)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Use the built-in demo data instead of a snapshot
    #[arg(long, global = true, conflicts_with = "snapshot")]
    demo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List users
    Users,

    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommand,
    },

    /// List a user's days with activity counts
    Days {
        /// User id or username
        #[arg(short, long)]
        user: String,
    },

    /// Show the activities logged on one day
    Day {
        /// User id or username
        #[arg(short, long)]
        user: String,

        /// Day id
        #[arg(short, long)]
        day: String,
    },

    /// Mine patterns from a user's history
    Analyze {
        /// User id or username
        #[arg(short, long)]
        user: String,

        /// Pattern length: 1 = frequency, 2-4 = sequence (default: from config)
        #[arg(short, long)]
        length: Option<u8>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Only sequential and frequency patterns
        #[arg(long)]
        primary: bool,
    },

    /// Keep only patterns involving the selected activities
    Filter {
        /// User id or username
        #[arg(short, long)]
        user: String,

        /// Activity name to select (repeatable)
        #[arg(short, long = "select")]
        select: Vec<String>,

        /// exclusive, exclusive-plus or non-exclusive
        #[arg(short, long, default_value = "non-exclusive")]
        mode: FilterMode,

        /// Pattern length: 1 = frequency, 2-4 = sequence (default: from config)
        #[arg(short, long)]
        length: Option<u8>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write the patterns to patterns_<username>_<date>.json
    Export {
        /// User id or username
        #[arg(short, long)]
        user: String,

        /// Pattern length: 1 = frequency, 2-4 = sequence (default: from config)
        #[arg(short, long)]
        length: Option<u8>,

        /// Output directory (default: from config, else current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Date used in the file name, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Log a new activity into the snapshot file
    Add {
        /// Day id the activity belongs to
        #[arg(short, long)]
        day: String,

        /// Activity name
        #[arg(short, long)]
        name: String,

        /// Start time, HH:MM
        #[arg(short, long)]
        time: String,

        /// Productivity score, 0-10
        #[arg(long)]
        productivity: f64,

        /// Satisfaction score, 0-10
        #[arg(long)]
        satisfaction: f64,

        /// Average heart rate in bpm (synthesized if omitted)
        #[arg(long)]
        heart_rate: Option<f64>,

        /// Stress level, 0-10 (synthesized if omitted)
        #[arg(long)]
        stress: Option<f64>,

        /// Energy level, 0-10 (synthesized if omitted)
        #[arg(long)]
        energy: Option<f64>,

        /// Hydration level, 0-10 (synthesized if omitted)
        #[arg(long)]
        hydration: Option<f64>,

        /// Sleep quality, 0-10 (synthesized if omitted)
        #[arg(long)]
        sleep: Option<f64>,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Create a user in the snapshot file
    Add {
        /// Unique username
        #[arg(short, long)]
        username: String,

        /// Contact email
        #[arg(short, long)]
        email: Option<String>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Where the rows come from for this invocation.
struct Source {
    snapshot: Snapshot,
    path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = upeye_core::logging::init(&config.logging).ok();

    tracing::info!(demo = args.demo, "upeye starting");
    let source = load_source(&args, &config)?;

    match args.command {
        Command::Users => cmd_users(&source.snapshot),
        Command::User {
            command: UserCommand::Add { username, email },
        } => cmd_user_add(source, &username, email.as_deref()),
        Command::Days { user } => cmd_days(&config, &source.snapshot, &user),
        Command::Day { user, day } => cmd_day(&config, &source.snapshot, &user, &day),
        Command::Analyze {
            user,
            length,
            format,
            primary,
        } => cmd_analyze(&config, &source.snapshot, &user, length, format, primary),
        Command::Filter {
            user,
            select,
            mode,
            length,
            format,
        } => cmd_filter(&config, &source.snapshot, &user, &select, mode, length, format),
        Command::Export {
            user,
            length,
            out,
            date,
        } => cmd_export(&config, &source.snapshot, &user, length, out, date),
        Command::Add {
            day,
            name,
            time,
            productivity,
            satisfaction,
            heart_rate,
            stress,
            energy,
            hydration,
            sleep,
        } => {
            let form = NewActivity {
                heart_rate,
                stress_level: stress,
                energy_level: energy,
                hydration_level: hydration,
                sleep_quality: sleep,
                ..NewActivity::new(day, name, time, productivity, satisfaction)
            };
            cmd_add(&config, source, form)
        }
    }
}

fn load_source(args: &Args, config: &Config) -> Result<Source> {
    if args.demo {
        return Ok(Source {
            snapshot: demo_snapshot(),
            path: None,
        });
    }

    let path = args
        .snapshot
        .clone()
        .unwrap_or_else(|| config.snapshot_path());
    tracing::info!(path = %path.display(), "Loading snapshot");
    let snapshot = Snapshot::load(&path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;
    Ok(Source {
        snapshot,
        path: Some(path),
    })
}

fn collect_history(config: &Config, snapshot: &Snapshot, user: &str) -> Result<UserHistory> {
    let mut synth = config
        .ingest
        .synthesize_missing_health
        .then(|| MetricSynthesizer::from_config_seed(config.ingest.seed));
    UserHistory::collect(snapshot, user, synth.as_mut()).context("failed to load user history")
}

fn resolve_length(config: &Config, length: Option<u8>) -> Result<PatternLength> {
    let length = match length {
        Some(n) => PatternLength::new(n)?,
        None => config.analysis.pattern_length()?,
    };
    Ok(length)
}

fn run_analysis(history: &UserHistory, length: PatternLength) -> Result<Vec<Pattern>> {
    let run = create_default_engine()
        .run(&history.activities, length)
        .context("pattern analysis failed")?;
    tracing::info!(
        user_id = %history.user.user_id,
        pattern_length = length.get(),
        patterns = run.patterns.len(),
        "Analysis complete"
    );
    Ok(run.patterns)
}

fn cmd_users(snapshot: &Snapshot) -> Result<()> {
    if snapshot.users.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    println!("{:<20} USERNAME", "USER ID");
    for user in &snapshot.users {
        println!("{:<20} {}", user.user_id, user.username);
    }
    Ok(())
}

fn cmd_days(config: &Config, snapshot: &Snapshot, user: &str) -> Result<()> {
    let history = collect_history(config, snapshot, user)?;

    println!("Days for {} ({})", history.user.username, history.user.user_id);
    println!();

    if history.days.is_empty() {
        println!("  No days logged.");
        return Ok(());
    }

    println!("  {:<12} {:<10} ACTIVITIES", "DATE", "DAY ID");
    for day in &history.days {
        println!(
            "  {:<12} {:<10} {}",
            day.activity_date.format("%Y-%m-%d"),
            day.day_id,
            history.activities_for_day(&day.day_id).len()
        );
    }
    Ok(())
}

fn cmd_day(config: &Config, snapshot: &Snapshot, user: &str, day_id: &str) -> Result<()> {
    let history = collect_history(config, snapshot, user)?;
    let day = history
        .find_day(day_id)
        .with_context(|| format!("day {} not found for user {}", day_id, history.user.username))?;

    println!("{}", day.activity_date.format("%A, %B %-d, %Y"));
    println!();

    let activities = history.activities_for_day(day_id);
    if activities.is_empty() {
        println!("  No activities logged.");
        return Ok(());
    }

    for activity in activities {
        println!("  {}  {}", activity.start_time, activity.name);
        println!(
            "         Productivity: {}/10   Satisfaction: {}/10",
            activity.productivity_score, activity.satisfaction_score
        );
        if let Some(h) = &activity.health_metrics {
            println!(
                "         Heart rate: {} bpm   Stress: {}/10   Energy: {}/10   Hydration: {}/10   Sleep: {}/10",
                h.heart_rate, h.stress_level, h.energy_level, h.hydration_level, h.sleep_quality
            );
        }
    }
    Ok(())
}

fn cmd_analyze(
    config: &Config,
    snapshot: &Snapshot,
    user: &str,
    length: Option<u8>,
    format: OutputFormat,
    primary: bool,
) -> Result<()> {
    let history = collect_history(config, snapshot, user)?;
    let length = resolve_length(config, length)?;
    let patterns = run_analysis(&history, length)?;

    let summary = PatternSummary::from_patterns(&patterns);
    let shown = if primary {
        primary_patterns(&patterns)
    } else {
        patterns
    };

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "user_id": history.user.user_id,
            "username": history.user.username,
            "pattern_length": length.get(),
            "summary": summary,
            "patterns": shown,
        })),
        OutputFormat::Text => {
            print_summary(&history, length, &summary);
            print_chart(&primary_patterns(&shown), length);
            print_patterns(&shown);
            Ok(())
        }
    }
}

fn cmd_filter(
    config: &Config,
    snapshot: &Snapshot,
    user: &str,
    select: &[String],
    mode: FilterMode,
    length: Option<u8>,
    format: OutputFormat,
) -> Result<()> {
    let history = collect_history(config, snapshot, user)?;
    let length = resolve_length(config, length)?;
    let patterns = run_analysis(&history, length)?;

    let filtered = filter_patterns(&patterns, select, mode).with_context(|| {
        format!(
            "available activities: {}",
            activity_catalog(&patterns).join(", ")
        )
    })?;
    tracing::info!(
        mode = mode.as_str(),
        selected = select.len(),
        kept = filtered.len(),
        "Filtered patterns"
    );

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "mode": mode.as_str(),
            "selected": select,
            "pattern_length": length.get(),
            "patterns": filtered,
        })),
        OutputFormat::Text => {
            println!("Filter: {}", mode.label());
            println!("Selected: {}", select.join(", "));
            println!();
            if filtered.is_empty() {
                println!("  No patterns match the selected activities.");
                return Ok(());
            }
            print_chart(&filtered, length);
            print_patterns(&filtered);
            Ok(())
        }
    }
}

fn cmd_export(
    config: &Config,
    snapshot: &Snapshot,
    user: &str,
    length: Option<u8>,
    out: Option<PathBuf>,
    date: Option<String>,
) -> Result<()> {
    let history = collect_history(config, snapshot, user)?;
    let length = resolve_length(config, length)?;
    let patterns = run_analysis(&history, length)?;

    let date = match date {
        Some(d) => NaiveDate::parse_from_str(&d, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", d))?,
        None => Local::now().date_naive(),
    };
    let dir = out.unwrap_or_else(|| config.export.directory());

    let path = upeye_core::export::write_export(&dir, &history.user.username, date, &patterns)
        .context("failed to write export")?;

    println!("Exported {} patterns to {}", patterns.len(), path.display());
    Ok(())
}

fn cmd_user_add(source: Source, username: &str, email: Option<&str>) -> Result<()> {
    let Some(path) = source.path else {
        anyhow::bail!("cannot add users to the demo data; use --snapshot");
    };

    let mut snapshot = source.snapshot;
    let user = snapshot
        .insert_user(username, email)
        .context("failed to add user")?;
    snapshot
        .save(&path)
        .with_context(|| format!("failed to save snapshot {}", path.display()))?;

    println!("Created user {} ({})", user.user_id, user.username);
    Ok(())
}

fn cmd_add(config: &Config, source: Source, form: NewActivity) -> Result<()> {
    let Some(path) = source.path else {
        anyhow::bail!("cannot add activities to the demo data; use --snapshot");
    };

    let mut snapshot = source.snapshot;
    let mut synth = MetricSynthesizer::from_config_seed(config.ingest.seed);
    let activity = snapshot
        .insert_activity(form, &mut synth)
        .context("failed to add activity")?;
    snapshot
        .save(&path)
        .with_context(|| format!("failed to save snapshot {}", path.display()))?;

    println!(
        "Added activity {} ({} at {}) to day {}",
        activity.id, activity.name, activity.start_time, activity.day_id
    );
    Ok(())
}

fn print_summary(history: &UserHistory, length: PatternLength, summary: &PatternSummary) {
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!(
        "│{:^60}│",
        format!("PATTERNS FOR {}", history.user.username.to_uppercase())
    );
    println!("╰{}╯", "─".repeat(60));
    println!();

    println!("SUMMARY");
    println!(
        "   Activities:   {:<10} Days: {}",
        history.activities.len(),
        history.days.len()
    );
    println!("   Length:       {}", length);
    println!("   Patterns:     {}", summary.total_patterns);
    println!(
        "   Most active:  {}",
        summary.most_active.as_deref().unwrap_or("-")
    );
    let peak = match (&summary.peak_time, summary.total_patterns) {
        (Some(band), _) => band.as_str(),
        (None, 0) => "-",
        (None, _) => "N/A",
    };
    println!("   Peak time:    {}", peak);
    println!();
}

fn print_chart(patterns: &[Pattern], length: PatternLength) {
    let bars = chart_bars(patterns, DEFAULT_CHART_LIMIT);
    if bars.is_empty() {
        return;
    }

    println!("PATTERN {} - TOP {} PATTERNS", length, bars.len());
    for bar in &bars {
        let width = (bar.width_percent / 100.0 * 30.0).round() as usize;
        println!(
            "   {:<30} {:<30} {:>3} times  {:>3}/100",
            bar.label,
            "█".repeat(width.max(1)),
            bar.frequency,
            bar.health_benefits_score
        );
    }
    println!();
}

fn print_patterns(patterns: &[Pattern]) {
    if patterns.is_empty() {
        println!("  No patterns found. Log more activities to see recurring behavior.");
        println!();
        return;
    }

    println!("PATTERNS");
    for pattern in patterns {
        println!(
            "   {} [{}] - {} times",
            pattern.name, pattern.pattern_type, pattern.frequency
        );
        println!(
            "      Productivity: {}   Satisfaction: {}   Health: {}/100 ({})",
            pattern.avg_productivity,
            pattern.avg_satisfaction,
            pattern.health_benefits_score,
            pattern.health_benefits_description
        );
    }
    println!();
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
