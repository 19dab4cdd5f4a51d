use std::fs;
use std::path::PathBuf;

use analytics::{AnalyticsEngine, EquityMode, MetricValue, SegmentSort};
use analytics::{calendar, duration, engine, equity, normalize, rolling, segment};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use core_types::{Account, TradeRecord};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// The main entry point for the Apex performance analytics CLI.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(args) => handle_report(args),
        Commands::Equity(args) => handle_equity(args),
        Commands::Rolling(args) => handle_rolling(args),
        Commands::Segments(args) => handle_segments(args),
        Commands::Calendar(args) => handle_calendar(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance analytics over an exported trade journal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full performance report for a trade set.
    Report(ReportArgs),
    /// Print the chronological equity curve.
    Equity(EquityArgs),
    /// Print a rolling-window metric series.
    Rolling(RollingArgs),
    /// Print a categorical performance breakdown.
    Segments(SegmentsArgs),
    /// Print per-day or per-month P&L totals.
    Calendar(CalendarArgs),
}

#[derive(Parser)]
struct JournalArgs {
    /// Path to the exported journal JSON file.
    #[arg(long)]
    journal: PathBuf,

    /// Restrict to a single account.
    #[arg(long)]
    account: Option<Uuid>,

    /// Restrict to a single playbook.
    #[arg(long)]
    playbook: Option<Uuid>,
}

#[derive(Parser)]
struct ReportArgs {
    #[command(flatten)]
    journal: JournalArgs,
}

#[derive(Parser)]
struct EquityArgs {
    #[command(flatten)]
    journal: JournalArgs,

    /// Unit of the equity axis.
    #[arg(long, value_enum, default_value = "r")]
    mode: EquityUnit,
}

#[derive(Parser)]
struct RollingArgs {
    #[command(flatten)]
    journal: JournalArgs,

    /// Metric to project out of each window.
    #[arg(long, value_enum, default_value = "profit-factor")]
    metric: RollingMetric,

    /// Number of trades per window.
    #[arg(long, default_value_t = 20)]
    window: usize,
}

#[derive(Parser)]
struct SegmentsArgs {
    #[command(flatten)]
    journal: JournalArgs,

    /// Categorical key to partition by.
    #[arg(long, value_enum)]
    by: SegmentKey,

    /// Bucket ordering. Defaults to descending profit factor, except the
    /// weekday breakdown which defaults to calendar order.
    #[arg(long, value_enum)]
    sort: Option<SortKey>,
}

#[derive(Parser)]
struct CalendarArgs {
    #[command(flatten)]
    journal: JournalArgs,

    /// Calendar granularity.
    #[arg(long, value_enum, default_value = "day")]
    period: CalendarPeriod,
}

#[derive(Clone, Copy, ValueEnum)]
enum EquityUnit {
    R,
    Currency,
}

#[derive(Clone, Copy, ValueEnum)]
enum RollingMetric {
    ProfitFactor,
    Expectancy,
    AvgR,
    WinRate,
}

#[derive(Clone, Copy, ValueEnum)]
enum SegmentKey {
    Environment,
    Session,
    Weekday,
    Emotion,
    Asset,
    Playbook,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortKey {
    ProfitFactor,
    TotalR,
    TradeCount,
    DomainOrder,
}

impl From<SortKey> for SegmentSort {
    fn from(sort: SortKey) -> Self {
        match sort {
            SortKey::ProfitFactor => SegmentSort::ProfitFactor,
            SortKey::TotalR => SegmentSort::TotalR,
            SortKey::TradeCount => SegmentSort::TradeCount,
            SortKey::DomainOrder => SegmentSort::DomainOrder,
        }
    }
}

// ==============================================================================
// Journal Loading
// ==============================================================================

/// The exported journal document: account metadata plus raw trade records.
#[derive(Deserialize)]
struct Journal {
    #[serde(default)]
    accounts: Vec<Account>,
    trades: Vec<TradeRecord>,
}

/// Loads the journal, normalizes every record, and applies the account and
/// playbook filters.
fn load_trades(args: &JournalArgs) -> anyhow::Result<(Vec<TradeRecord>, Vec<Account>)> {
    let raw = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file {}", args.journal.display()))?;
    let journal: Journal =
        serde_json::from_str(&raw).context("Failed to parse journal JSON")?;

    let mut trades: Vec<TradeRecord> = journal
        .trades
        .into_iter()
        .filter(|t| args.account.is_none_or(|id| t.account_id == id))
        .filter(|t| args.playbook.is_none_or(|id| t.playbook_id == Some(id)))
        .collect();
    normalize::normalize_all(&mut trades);

    info!(trades = trades.len(), "loaded journal");
    Ok((trades, journal.accounts))
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let (trades, _) = load_trades(&args.journal)?;
    let report = AnalyticsEngine::new().aggregate(&trades);
    let durations = duration::duration_stats(&trades);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Total Trades".to_string(), report.total_trades.to_string()]);
    table.add_row(vec!["Win Rate".to_string(), format_pct(report.win_rate)]);
    table.add_row(vec!["Loss Rate".to_string(), format_pct(report.loss_rate)]);
    table.add_row(vec!["Breakeven Rate".to_string(), format_pct(report.breakeven_rate)]);
    table.add_row(vec!["Total R".to_string(), format_r(report.total_r)]);
    table.add_row(vec!["Avg R".to_string(), format_r(report.avg_r)]);
    table.add_row(vec!["Profit Factor".to_string(), report.profit_factor.to_string()]);
    table.add_row(vec!["Expectancy".to_string(), format_r(report.expectancy)]);
    table.add_row(vec!["Avg Win".to_string(), format_r(report.avg_win_r)]);
    table.add_row(vec!["Avg Loss".to_string(), format_r(report.avg_loss_r)]);
    table.add_row(vec!["Max Drawdown".to_string(), format_pct(report.max_drawdown_r)]);
    table.add_row(vec![
        "Longest Win Streak".to_string(),
        report.longest_win_streak.to_string(),
    ]);
    table.add_row(vec![
        "Longest Loss Streak".to_string(),
        report.longest_loss_streak.to_string(),
    ]);
    table.add_row(vec![
        "Avg Rule Adherence".to_string(),
        format!("{}/10", report.avg_rule_adherence.round_dp(1)),
    ]);
    table.add_row(vec![
        "Avg Exit Efficiency".to_string(),
        format_pct(report.avg_exit_efficiency),
    ]);
    table.add_row(vec![
        "Cost of Discretion".to_string(),
        format_r(normalize::total_cost_of_discretion(&trades)),
    ]);
    table.add_row(vec!["Avg MFE".to_string(), format_r(engine::avg_mfe(&trades))]);
    table.add_row(vec!["Avg MAE".to_string(), format_r(engine::avg_mae(&trades))]);
    table.add_row(vec![
        "Avg Duration".to_string(),
        duration::format_duration(durations.avg_ms),
    ]);

    println!("{table}");
    Ok(())
}

fn handle_equity(args: EquityArgs) -> anyhow::Result<()> {
    let (trades, accounts) = load_trades(&args.journal)?;
    let mode = match args.mode {
        EquityUnit::R => EquityMode::RMultiple,
        EquityUnit::Currency => {
            let account = match args.journal.account {
                Some(id) => accounts.iter().find(|a| a.id == id),
                None => accounts.first(),
            }
            .context("Currency mode requires an account with an initial balance")?;
            EquityMode::Currency {
                initial_balance: account.initial_balance,
            }
        }
    };

    let curve = equity::build_curve(&trades, mode);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "Equity", "Drawdown"]);
    for point in curve {
        table.add_row(vec![
            point.index.to_string(),
            point.value.to_string(),
            point.drawdown.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn handle_rolling(args: RollingArgs) -> anyhow::Result<()> {
    let (trades, _) = load_trades(&args.journal)?;
    let selector = |metrics: &analytics::PerformanceMetrics| -> MetricValue {
        match args.metric {
            RollingMetric::ProfitFactor => metrics.profit_factor,
            RollingMetric::Expectancy => metrics.expectancy.into(),
            RollingMetric::AvgR => metrics.avg_r.into(),
            RollingMetric::WinRate => metrics.win_rate.into(),
        }
    };
    let series = rolling::rolling_metric(&trades, args.window, selector)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Trade #", "Value"]);
    for point in series {
        table.add_row(vec![point.position.to_string(), point.value.to_string()]);
    }
    println!("{table}");
    Ok(())
}

fn handle_segments(args: SegmentsArgs) -> anyhow::Result<()> {
    let (trades, _) = load_trades(&args.journal)?;
    let sort = args.sort.map(SegmentSort::from).unwrap_or(match args.by {
        SegmentKey::Weekday => SegmentSort::DomainOrder,
        _ => SegmentSort::ProfitFactor,
    });
    let buckets = match args.by {
        SegmentKey::Environment => segment::by_market_environment(&trades, sort),
        SegmentKey::Session => segment::by_session(&trades, sort),
        SegmentKey::Weekday => segment::by_weekday(&trades, sort),
        SegmentKey::Emotion => segment::by_emotion(&trades, sort),
        SegmentKey::Asset => segment::by_asset(&trades, sort),
        SegmentKey::Playbook => segment::by_playbook(&trades, sort),
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Segment",
        "Trades",
        "Win Rate",
        "Total R",
        "Profit Factor",
        "Expectancy",
    ]);
    for bucket in buckets {
        table.add_row(vec![
            bucket.label.clone(),
            bucket.trade_count.to_string(),
            format_pct(bucket.metrics.win_rate),
            format_r(bucket.metrics.total_r),
            bucket.metrics.profit_factor.to_string(),
            format_r(bucket.metrics.expectancy),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn handle_calendar(args: CalendarArgs) -> anyhow::Result<()> {
    let (trades, _) = load_trades(&args.journal)?;
    let period = match args.period {
        CalendarPeriod::Day => calendar::Period::Day,
        CalendarPeriod::Month => calendar::Period::Month,
    };
    let pnl = calendar::period_pnl(&trades, period);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Period", "Total R", "Trades"]);
    for row in pnl {
        table.add_row(vec![
            row.period.clone(),
            format_r(row.total_r),
            row.trade_count.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

#[derive(Clone, Copy, ValueEnum)]
enum CalendarPeriod {
    Day,
    Month,
}

fn format_r(value: Decimal) -> String {
    format!("{}R", value.round_dp(2))
}

fn format_pct(value: Decimal) -> String {
    format!("{}%", value.round_dp(1))
}
