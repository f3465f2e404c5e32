//! Command-line front end: loads assumptions, runs one project, prints or exports the results.

use std::fs;
use std::path::Path;
use std::process;

use solar_viability::engine::cash_flow::breakeven_month;
use solar_viability::io::export::export_cash_flow_csv;
use solar_viability::region::DEFAULT_REGION;
use solar_viability::{Engine, EngineConfig, ParameterBag};

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    project_type: Option<String>,
    region: String,
    params_path: Option<String>,
    params: Vec<(String, String)>,
    scenarios: bool,
    cash_flow_months: Option<u32>,
    cash_flow_out: Option<String>,
    json: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("solar-viability: PV sizing and financial viability estimator");
    eprintln!();
    eprintln!("Usage: solar-viability --type <project_type> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --type <name>            residential | commercial | ev_charging | common_areas");
    eprintln!("  --region <code>          Region code, e.g. GO (default: \"{DEFAULT_REGION}\")");
    eprintln!("  --params <path>          Load project parameters from a JSON object file");
    eprintln!("  --param <key=value>      Set one project parameter (repeatable)");
    eprintln!("  --config <path>          Load engine assumptions from TOML config file");
    eprintln!("  --scenarios              Also print the four investment scenarios");
    eprintln!("  --cash-flow [months]     Also print the monthly cash flow (default 24,");
    eprintln!("                           at most the system lifetime in months)");
    eprintln!("  --cash-flow-out <path>   Export the monthly cash flow to CSV");
    eprintln!("  --json                   Print results as JSON");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server instead of a single run");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("Set RUST_LOG=debug for engine diagnostics.");
}

fn next_value(args: &[String], i: &mut usize, flag: &str, what: &str) -> String {
    *i += 1;
    if *i >= args.len() {
        eprintln!("error: {flag} requires {what}");
        process::exit(1);
    }
    args[*i].clone()
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        project_type: None,
        region: DEFAULT_REGION.to_string(),
        params_path: None,
        params: Vec::new(),
        scenarios: false,
        cash_flow_months: None,
        cash_flow_out: None,
        json: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                cli.config_path = Some(next_value(&args, &mut i, "--config", "a path argument"));
            }
            "--type" => {
                cli.project_type = Some(next_value(&args, &mut i, "--type", "a project type"));
            }
            "--region" => {
                cli.region = next_value(&args, &mut i, "--region", "a region code");
            }
            "--params" => {
                cli.params_path = Some(next_value(&args, &mut i, "--params", "a path argument"));
            }
            "--param" => {
                let pair = next_value(&args, &mut i, "--param", "a key=value argument");
                let Some((key, value)) = pair.split_once('=') else {
                    eprintln!("error: --param value \"{pair}\" is not key=value");
                    process::exit(1);
                };
                cli.params
                    .push((key.trim().to_string(), value.trim().to_string()));
            }
            "--scenarios" => {
                cli.scenarios = true;
            }
            "--cash-flow" => {
                let months = match args.get(i + 1).map(|a| a.parse::<u32>()) {
                    Some(Ok(m)) => {
                        i += 1;
                        m
                    }
                    _ => solar_viability::engine::cash_flow::DEFAULT_MONTHS,
                };
                cli.cash_flow_months = Some(months);
            }
            "--cash-flow-out" => {
                cli.cash_flow_out = Some(next_value(
                    &args,
                    &mut i,
                    "--cash-flow-out",
                    "a path argument",
                ));
            }
            "--json" => {
                cli.json = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let raw = next_value(&args, &mut i, "--port", "a u16 argument");
                if let Ok(p) = raw.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{raw}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Collects project parameters: the JSON file first, then `--param` overrides.
fn load_parameters(cli: &CliArgs) -> Result<ParameterBag, String> {
    let mut bag = ParameterBag::new();
    if let Some(ref path) = cli.params_path {
        let raw = fs::read_to_string(path).map_err(|e| format!("cannot read \"{path}\": {e}"))?;
        let file: ParameterBag = serde_json::from_str(&raw)
            .map_err(|e| format!("invalid parameters in \"{path}\": {e}"))?;
        bag.extend(file);
    }
    bag.extend(ParameterBag::from_pairs(cli.params.iter().cloned()));
    Ok(bag)
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("error: failed to serialize output: {e}");
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();
    let cli = parse_args();

    let config = if let Some(ref path) = cli.config_path {
        match EngineConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        EngineConfig::baseline()
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let engine = Engine::new(config);

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(solar_viability::api::AppState { engine });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(solar_viability::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
        return;
    }

    let Some(ref project_type) = cli.project_type else {
        eprintln!("error: --type is required");
        print_help();
        process::exit(1);
    };

    let params = match load_parameters(&cli) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let result = match engine.size_and_project(project_type, &params, &cli.region) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let scenarios = cli.scenarios.then(|| {
        engine.generate_investment_scenarios(
            result.technical_specs.installed_power_kwp,
            &result.project_details.region_code,
        )
    });

    if let Some(months) = cli.cash_flow_months {
        let max = engine.max_cash_flow_months();
        if months > max {
            eprintln!("note: --cash-flow {months} exceeds the {max}-month lifetime, capped");
        }
    }

    let cash_flow = (cli.cash_flow_months.is_some() || cli.cash_flow_out.is_some()).then(|| {
        let fa = &result.financial_analysis;
        engine.build_cash_flow_series(fa.total_investment, fa.monthly_savings, cli.cash_flow_months)
    });

    if cli.json {
        print_json(&serde_json::json!({
            "result": &result,
            "scenarios": &scenarios,
            "cash_flow": &cash_flow,
        }));
    } else {
        println!("{result}");
        if let Some(ref scenarios) = scenarios {
            println!("\n--- Investment Scenarios ---");
            for s in scenarios {
                println!("{s}");
            }
        }
        if let (Some(points), Some(_)) = (&cash_flow, cli.cash_flow_months) {
            println!("\n--- Monthly Cash Flow ---");
            for p in points {
                println!(
                    "Month {:>3}: flow {:>12.2}  accumulated {:>12.2}",
                    p.month, p.monthly_flow, p.accumulated_flow
                );
            }
            match breakeven_month(points) {
                Some(m) => println!("Breakeven in month {m}"),
                None => println!("No breakeven within {} months", points.len()),
            }
        }
    }

    if let (Some(points), Some(path)) = (&cash_flow, &cli.cash_flow_out) {
        if let Err(e) = export_cash_flow_csv(points, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Cash flow written to {path}");
    }
}
