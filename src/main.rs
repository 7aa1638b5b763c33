//! Ridgeline CLI
//!
//! Usage:
//!   ridgeline --signals 1.5,1.2,1.8                 # Single cycle
//!   ridgeline --interactive                         # One line per cycle
//!   ridgeline --serve                               # HTTP API server
//!   ridgeline --seal                                # Print a fresh seal
//!   ridgeline --verify --public-key HEX --signature HEX
//!   ridgeline --verify --public-key "$(cat key.pem)" --signature HEX
//!   ridgeline --trajectory 2.5 --coefficients 1,1,0.5,1
//!   ridgeline --signals 1.5,1.2,1.8 --json          # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ridgeline::core::{run_server, seal, Monitor, SignalParser};
use ridgeline::types::{CycleOutput, KeyRetention, ModeCoefficients, MonitorConfig, MonitorError};
use ridgeline::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "ridgeline",
    version = VERSION,
    about = "Ridgeline - deterministic state monitor with an Ed25519 attestation seal",
    long_about = "Ridgeline aggregates three signals (g, c, m) into a four-axis state\n\
                  vector, derives density and health, keeps the vector inside a safe\n\
                  envelope and seals an attestation message with Ed25519.\n\n\
                  Modes:\n  \
                  --signals      One cycle\n  \
                  --interactive  One cycle per input line\n  \
                  --serve        HTTP API server\n  \
                  --seal         Print a fresh attestation seal\n  \
                  --verify       Verify a seal\n  \
                  --trajectory   Project the two-mode trajectory"
)]
struct Args {
    /// Signals for a single cycle: "g,c,m", "g c m" or "g=.., c=.., m=.."
    #[arg(long)]
    signals: Option<String>,

    /// Cycle index for --signals
    #[arg(long, default_value_t = 0)]
    cycle: u64,

    /// Interactive mode - read one signal line per cycle from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Generate a key pair, sign the attestation message, print the seal
    #[arg(long)]
    seal: bool,

    /// Verify --public-key / --signature against --message
    #[arg(long, requires_all = ["public_key", "signature"])]
    verify: bool,

    /// Public key as hex or PEM text
    #[arg(long)]
    public_key: Option<String>,

    /// Signature as hex
    #[arg(long)]
    signature: Option<String>,

    /// Message text (defaults to the configured attestation message)
    #[arg(long)]
    message: Option<String>,

    /// Project the trajectory at this time offset
    #[arg(long, allow_negative_numbers = true)]
    trajectory: Option<f64>,

    /// Mode coefficients "c1,v1,c2,v2" for --trajectory
    #[arg(long, default_value = "1,1,1,1")]
    coefficients: String,

    /// Configuration file (.toml or .json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show orientation and reason breakdown
    #[arg(long)]
    verbose: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stderr keeps stdout parseable
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match &args.config {
        Some(path) => match MonitorConfig::load(path) {
            Ok(config) => config,
            Err(e) => return fail(&e),
        },
        None => MonitorConfig::default(),
    };

    let result = if args.serve {
        run_serve(&args, config).await
    } else if args.seal {
        run_seal(&args, &config)
    } else if args.verify {
        run_verify(&args, &config)
    } else if let Some(t) = args.trajectory {
        run_trajectory(t, &args, config)
    } else if let Some(ref line) = args.signals {
        run_single(line, &args, config)
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args, config)
    };

    match result {
        Ok(code) => code,
        Err(e) => fail(&e),
    }
}

fn fail(err: &MonitorError) -> ExitCode {
    eprintln!("{} {}", "error:".red().bold(), err);
    ExitCode::FAILURE
}

/// Run a single cycle
fn run_single(line: &str, args: &Args, config: MonitorConfig) -> Result<ExitCode, MonitorError> {
    let signals = SignalParser::new().parse(line)?;
    let mut monitor = Monitor::new(config)?;
    let output = monitor.step(args.cycle, signals)?;
    print_output(&output, args);
    Ok(ExitCode::SUCCESS)
}

/// Run interactive mode
fn run_interactive(args: &Args, config: MonitorConfig) -> Result<ExitCode, MonitorError> {
    let parser = SignalParser::new();
    let mut monitor = Monitor::new(config)?;

    print_header(args.no_color);
    println!("Enter g, c, m per line (e.g. '1.5 1.2 1.8'). Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("[cycle {}] > ", monitor.cycle_count());
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Cycles: {}", monitor.cycle_count());
            break;
        }
        if line.is_empty() {
            continue;
        }

        // Bad lines are reported and skipped
        let result = parser.parse(line).and_then(|signals| monitor.next(signals));
        match result {
            Ok(output) => print_output(&output, args),
            Err(e) => eprintln!("{} {}", "rejected:".yellow(), e),
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_seal(args: &Args, config: &MonitorConfig) -> Result<ExitCode, MonitorError> {
    let message = args.message.clone().unwrap_or_else(|| config.seal.message.clone());
    let sealed = seal::initialize(message, KeyRetention::Discard);
    let attestation = sealed.attestation();

    if args.json {
        let json = serde_json::to_string_pretty(attestation)
            .map_err(|e| MonitorError::Config(format!("serialization failed: {e}")))?;
        println!("{json}");
    } else {
        println!("algorithm={}", attestation.algorithm);
        println!("message={}", attestation.message_text());
        println!("public_key={}", attestation.public_key_hex());
        println!("signature={}", attestation.signature_hex());
        println!("fingerprint={}", attestation.fingerprint());
        print!("{}", attestation.public_key_pem()?);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_verify(args: &Args, config: &MonitorConfig) -> Result<ExitCode, MonitorError> {
    let required = |field: &str, value: Option<&String>| -> Result<String, MonitorError> {
        value
            .cloned()
            .ok_or_else(|| MonitorError::Config(format!("--{field} is required")))
    };
    let public_key = seal::decode_public_key(&required("public-key", args.public_key.as_ref())?)?;
    let signature = hex::decode(required("signature", args.signature.as_ref())?)
        .map_err(|e| MonitorError::Config(format!("--signature: invalid hex: {e}")))?;
    let message = args.message.clone().unwrap_or_else(|| config.seal.message.clone());

    match seal::verify(&public_key, &signature, message.as_bytes()) {
        Ok(()) => {
            if args.json {
                println!("{}", serde_json::json!({ "valid": true }));
            } else {
                println!("{}", "VALID".green().bold());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if args.json {
                println!("{}", serde_json::json!({ "valid": false, "reason": e.to_string() }));
            } else {
                println!("{} {}", "INVALID".red().bold(), e);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_trajectory(t: f64, args: &Args, config: MonitorConfig) -> Result<ExitCode, MonitorError> {
    let coefficients = parse_coefficients(&args.coefficients)?;
    let monitor = Monitor::new(config)?;
    let point = monitor.project(t, coefficients)?;

    if args.json {
        println!("{}", serde_json::json!({ "t": point.t, "value": point.value }));
    } else {
        println!("t={} | value={:.6}", point.t, point.value);
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_coefficients(text: &str) -> Result<ModeCoefficients, MonitorError> {
    let values = text
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| MonitorError::Config(format!("--coefficients: {e}")))?;
    match values.as_slice() {
        [c1, v1, c2, v2] => Ok(ModeCoefficients::new(*c1, *v1, *c2, *v2)),
        _ => Err(MonitorError::Config(format!(
            "--coefficients expects 4 values, got {}",
            values.len()
        ))),
    }
}

fn print_output(output: &CycleOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("serialization failed: {e}"),
        }
    } else if args.verbose {
        print_verbose(output, args.no_color);
    } else if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
}

fn print_verbose(output: &CycleOutput, no_color: bool) {
    if no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
    let [air, water, fire, earth] = output.orientation;
    println!("  orientation: air={air:.4} water={water:.4} fire={fire:.4} earth={earth:.4}");
    for reason in &output.reasons {
        let line = format!("  {reason}");
        if reason.is_intervention() {
            println!("{}", line.yellow());
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_header(no_color: bool) {
    let title = format!("Ridgeline v{VERSION} - Interactive");
    if no_color {
        println!("========================================");
        println!("  {title}");
        println!("========================================");
    } else {
        println!("{}", title.bold());
    }
    println!();
}

/// Run HTTP API server
async fn run_serve(args: &Args, config: MonitorConfig) -> Result<ExitCode, MonitorError> {
    if let Err(e) = run_server(&args.addr, config).await {
        eprintln!("Server error: {}", e);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
