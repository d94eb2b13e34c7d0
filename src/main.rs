//! enertool entry point — CLI wiring and config-driven session construction.

use std::path::Path;
use std::process;

use enertool::config::ToolConfig;
use enertool::forecast;
use enertool::input::Prompter;
use enertool::menu::{self, Session};
use enertool::portfolio::{self, PortfolioReport};

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    command: Command,
}

enum Command {
    Menu,
    Portfolio {
        price_override: Option<f64>,
    },
    Forecast {
        symbol_override: Option<String>,
        days_override: Option<usize>,
        #[cfg(feature = "tui")]
        chart: bool,
    },
}

fn print_help() {
    eprintln!("enertool — building energy calculators, portfolio analysis, price forecast");
    eprintln!();
    eprintln!("Usage: enertool [OPTIONS] [COMMAND]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  menu                     Interactive calculator menu (default)");
    eprintln!("  portfolio                Analyze the sample building portfolio");
    eprintln!("  forecast                 Fit and evaluate the price forecaster");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load tool configuration from a TOML file");
    eprintln!("  --price <f64>            (portfolio) Override the unit price per kWh");
    eprintln!("  --symbol <name>          (forecast) Override the trading pair symbol");
    eprintln!("  --days <n>               (forecast) Override the candle history length");
    #[cfg(feature = "tui")]
    eprintln!("  --chart                  (forecast) Show the actual-vs-predicted chart");
    eprintln!("  --help                   Show this help message");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = None;
    let mut command_name: Option<String> = None;
    let mut price_override = None;
    let mut symbol_override = None;
    let mut days_override = None;
    #[cfg(feature = "tui")]
    let mut chart = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--price" => {
                i += 1;
                let value = args.get(i).and_then(|v| v.parse::<f64>().ok());
                let Some(p) = value else {
                    eprintln!("error: --price requires an f64 argument");
                    process::exit(1);
                };
                price_override = Some(p);
            }
            "--symbol" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --symbol requires a name argument");
                    process::exit(1);
                }
                symbol_override = Some(args[i].clone());
            }
            "--days" => {
                i += 1;
                let value = args.get(i).and_then(|v| v.parse::<usize>().ok());
                let Some(d) = value else {
                    eprintln!("error: --days requires a positive integer argument");
                    process::exit(1);
                };
                days_override = Some(d);
            }
            #[cfg(feature = "tui")]
            "--chart" => {
                chart = true;
            }
            "menu" | "portfolio" | "forecast" if command_name.is_none() => {
                command_name = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    let command = match command_name.as_deref() {
        None | Some("menu") => Command::Menu,
        Some("portfolio") => Command::Portfolio { price_override },
        Some("forecast") => Command::Forecast {
            symbol_override,
            days_override,
            #[cfg(feature = "tui")]
            chart,
        },
        Some(_) => unreachable!("command names are filtered during parsing"),
    };

    CliArgs {
        config_path,
        command,
    }
}

fn load_config(cli: &CliArgs) -> ToolConfig {
    match cli.config_path {
        Some(ref path) => match ToolConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => ToolConfig::default(),
    }
}

fn exit_on_invalid(config: &ToolConfig) {
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
}

fn main() {
    let cli = parse_args();
    let mut config = load_config(&cli);

    match cli.command {
        Command::Menu => {
            exit_on_invalid(&config);
            let session = Session::from_config(&config);
            let mut prompter = Prompter::console();
            if let Err(e) = menu::run(&session, &mut prompter) {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
        Command::Portfolio { price_override } => {
            if let Some(price) = price_override {
                config.pricing.price_per_kwh = price;
            }
            exit_on_invalid(&config);
            let buildings = portfolio::sample_portfolio();
            let report = PortfolioReport::analyze(&buildings, config.pricing.price_per_kwh);
            println!("{report}");
        }
        Command::Forecast {
            symbol_override,
            days_override,
            #[cfg(feature = "tui")]
            chart,
        } => {
            if let Some(symbol) = symbol_override {
                config.forecast.symbol = symbol;
            }
            if let Some(days) = days_override {
                config.forecast.days = days;
            }
            exit_on_invalid(&config);

            eprintln!(
                "Fetching {} daily {} candles...",
                config.forecast.days.clamp(2, 1000),
                config.forecast.symbol.to_uppercase()
            );
            let run = match forecast::run(&config.forecast) {
                Ok(run) => run,
                Err(e) => {
                    eprintln!("error: {e}");
                    process::exit(1);
                }
            };
            println!("{run}");

            #[cfg(feature = "tui")]
            if chart {
                if let Err(e) = enertool::tui::run_forecast_chart(&run.symbol, &run.evaluation) {
                    eprintln!("error: chart failed: {e}");
                    process::exit(1);
                }
            }
        }
    }
}
