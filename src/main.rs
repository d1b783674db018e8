use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use perpdesk::prelude::*;
use prettytable::{Cell, Row, Table};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "perpdesk")]
#[command(about = "Position sizing and strategy backtesting for perpetual futures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //backtest one strategy over a csv window
    Backtest {
        //path to csv data file (timestamp,open,high,low,close,volume)
        #[arg(long)]
        data: PathBuf,

        //strategy name (ema, macd)
        #[arg(long)]
        strategy: String,

        //output path for equity curve csv
        #[arg(long)]
        output_equity_csv: Option<PathBuf>,
    },

    //size a position from balance, entry and stop
    Size {
        //terminal config json (risk profile, alert settings)
        #[arg(long)]
        config: PathBuf,

        #[arg(long)]
        balance: f64,

        #[arg(long)]
        entry: f64,

        #[arg(long)]
        stop: f64,

        #[arg(long, default_value = "1")]
        leverage: u32,
    },

    //pivot levels from the last complete bar
    Pivots {
        #[arg(long)]
        data: PathBuf,

        //price to classify against the levels (defaults to the last close)
        #[arg(long)]
        price: Option<f64>,

        //terminal config json; without it the zone alert is suppressed
        #[arg(long)]
        config: Option<PathBuf>,
    },

    //latest rsi and atr
    Indicators {
        #[arg(long)]
        data: PathBuf,

        #[arg(long, default_value = "14")]
        period: usize,
    },

    //check the daily loss limit
    DailyLoss {
        //terminal config json (risk profile, alert settings)
        #[arg(long)]
        config: PathBuf,

        #[arg(long)]
        day_start_balance: f64,

        #[arg(long)]
        balance: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Backtest {
            data,
            strategy,
            output_equity_csv,
        } => backtest(&data, &strategy, output_equity_csv.as_deref()),
        Commands::Size {
            config,
            balance,
            entry,
            stop,
            leverage,
        } => size(&config, balance, entry, stop, leverage),
        Commands::Pivots {
            data,
            price,
            config,
        } => pivots(&data, price, config.as_deref()),
        Commands::Indicators { data, period } => indicators(&data, period),
        Commands::DailyLoss {
            config,
            day_start_balance,
            balance,
        } => daily_loss(&config, day_start_balance, balance),
    }
}

fn load_config(path: Option<&Path>) -> Result<TerminalConfig> {
    match path {
        Some(p) => TerminalConfig::from_json_file(p),
        None => Ok(TerminalConfig::default()),
    }
}

fn load_bars(path: &Path) -> Result<Vec<Bar>> {
    let bars = load_csv(path).context(format!("Failed to load data from {:?}", path))?;
    if bars.is_empty() {
        anyhow::bail!("No bars found in {:?}", path);
    }
    Ok(bars)
}

fn backtest(data: &Path, strategy: &str, output_equity_csv: Option<&Path>) -> Result<()> {
    let bars = load_bars(data)?;

    println!("Perpdesk Strategy Backtest");
    println!("==========================\n");
    println!("Loaded {} bars", bars.len());
    if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
        println!("Date range: {} to {}\n", first.timestamp, last.timestamp);
    }

    let result = run_backtest(&bars, strategy)?;

    SummaryMetrics::from_result(&result).pretty_print_table();

    if let Some(path) = output_equity_csv {
        save_equity_csv(&result.equity_points(), path)?;
        println!("\nEquity curve saved to {:?}", path);
    }

    Ok(())
}

fn save_equity_csv(points: &[EquityPoint], path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).context(format!("Failed to create {:?}", path))?;
    for point in points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

fn size(config: &Path, balance: f64, entry: f64, stop: f64, leverage: u32) -> Result<()> {
    let config = TerminalConfig::from_json_file(config)?;
    let mut manager = RiskManager::new(config.risk);
    manager.set_leverage(leverage);

    let request = PositionSizingRequest::new(balance, entry, stop)?;
    let result = manager.size(&request)?;

    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Sizing"), Cell::new("Value")]));
    table.add_row(Row::new(vec![
        Cell::new("Contracts"),
        Cell::new(&format!("{:.4}", result.contracts)),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Leverage Used"),
        Cell::new(&format!("{}x (max {}x)", result.leverage_used, config.risk.max_leverage)),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Margin Required"),
        Cell::new(&format!("${:.2}", result.margin_required)),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Risk Per Trade"),
        Cell::new(&format!(
            "${:.2} ({:.2}%)",
            balance * config.risk.max_risk_per_trade,
            config.risk.max_risk_per_trade * 100.0
        )),
    ]));
    table.printstd();

    Ok(())
}

fn pivots(data: &Path, price: Option<f64>, config: Option<&Path>) -> Result<()> {
    let bars = load_bars(data)?;
    let config = load_config(config)?;
    let levels = pivots_from_series(&bars)?;

    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Level"), Cell::new("Price")]));
    for (name, value) in [
        ("R3", levels.r3),
        ("R2", levels.r2),
        ("R1", levels.r1),
        ("Pivot", levels.pivot),
        ("S1", levels.s1),
        ("S2", levels.s2),
        ("S3", levels.s3),
    ] {
        table.add_row(Row::new(vec![
            Cell::new(name),
            Cell::new(&format!("{:.4}", value)),
        ]));
    }
    table.printstd();

    let price = match price.or_else(|| bars.last().map(|b| b.close)) {
        Some(p) => p,
        None => return Ok(()),
    };
    let zone = classify_price(price, &levels);
    println!("\nPrice {:.4} is {}", price, zone.describe());

    if matches!(zone, PivotZone::AboveR1 | PivotZone::BelowS1) {
        let notifier = AlertNotifier::spawn(config.alerts, LogSink);
        notifier.raise(format!("Price {:.4} is {}", price, zone.describe()));
        notifier.shutdown();
    }

    Ok(())
}

fn indicators(data: &Path, period: usize) -> Result<()> {
    let bars = load_bars(data)?;
    let closes = closes(&bars);

    let rsi_value = latest_rsi(&closes, period)?;
    let atr_values = atr(&bars, period)?;
    let macd_series = macd(&closes);

    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Indicator"), Cell::new("Value")]));
    table.add_row(Row::new(vec![
        Cell::new(&format!("RSI({})", period)),
        Cell::new(&format!("{:.2}", rsi_value)),
    ]));
    if let Some(v) = atr_values.last() {
        table.add_row(Row::new(vec![
            Cell::new(&format!("ATR({})", period)),
            Cell::new(&format!("{:.4}", v)),
        ]));
    }
    if let Some(v) = macd_series.histogram.last() {
        table.add_row(Row::new(vec![
            Cell::new("MACD Histogram"),
            Cell::new(&format!("{:.4}", v)),
        ]));
    }
    table.printstd();

    Ok(())
}

fn daily_loss(config: &Path, day_start_balance: f64, balance: f64) -> Result<()> {
    let config = TerminalConfig::from_json_file(config)?;
    let manager = RiskManager::new(config.risk);

    if manager.daily_loss_breached(day_start_balance, balance) {
        let message = format!(
            "Daily loss limit of {:.2}% reached: balance {:.2} vs {:.2} at day start",
            config.risk.daily_loss_limit * 100.0,
            balance,
            day_start_balance
        );
        println!("{}", message);

        let notifier = AlertNotifier::spawn(config.alerts, LogSink);
        notifier.raise(message);
        notifier.shutdown();
    } else {
        println!(
            "Within daily loss limit ({:.2}%)",
            config.risk.daily_loss_limit * 100.0
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_requires_a_config_file() {
        let parsed = Cli::try_parse_from([
            "perpdesk", "size", "--balance", "10000", "--entry", "100", "--stop", "95",
        ]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "perpdesk", "size", "--config", "desk.json", "--balance", "10000", "--entry", "100",
            "--stop", "95",
        ]);
        assert!(matches!(
            parsed.map(|cli| cli.command),
            Ok(Commands::Size { leverage: 1, .. })
        ));
    }

    #[test]
    fn daily_loss_requires_a_config_file() {
        let parsed = Cli::try_parse_from([
            "perpdesk",
            "daily-loss",
            "--day-start-balance",
            "10000",
            "--balance",
            "9000",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_config_file_is_an_error_not_a_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(size(&missing, 10_000.0, 100.0, 95.0, 1).is_err());
        assert!(daily_loss(&missing, 10_000.0, 9_000.0).is_err());
    }
}
