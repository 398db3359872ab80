use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use polar::{compile, render_snippet, CompileReport, CompiledExpression};
use polar_ast::visit::{called_functions, references_theta, NodeCounter, Visitable};
use polar_ast::AstPrinter;
use polar_emitter::{load_settings, save_settings, EmitterPath, PathPoint, Preset};

mod repl;

use repl::ReplSession;

#[derive(Debug, Parser)]
#[command(
    name = "polar",
    version,
    about = "Check, evaluate and trace polar curve formulas r(theta)",
    long_about = "polar compiles formulas such as `r = 109*sin(4*theta)+271` and reports\n\
        errors with their position, evaluates them, and traces the emitter path\n\
        they describe.\n\n\
        EXAMPLES:\n\
        \n  polar check '200*sin(2*theta)'           Validate a formula\n\
        \n  polar eval 'theta^2' --theta 1 2 3       Evaluate at several angles\n\
        \n  polar trace --preset gentle --steps 8    Sample the emitter path\n\
        \n  polar repl                               Start interactive REPL\n\
        \n  echo 'r = abs(cos(theta))' | polar check Check a formula from stdin"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that a formula compiles
    Check(FormulaArgs),

    /// Print the compile report as JSON
    Json(FormulaArgs),

    /// Evaluate a formula at one or more values of theta
    Eval(EvalArgs),

    /// Sample the emitter path for a formula or settings file
    Trace(TraceArgs),

    /// Show the syntax tree and what a formula uses
    Inspect(FormulaArgs),

    /// Print or save a named parameter preset
    Preset(PresetArgs),

    /// Start an interactive Read-Eval-Print Loop
    #[command(
        about = "Start an interactive REPL session",
        long_about = "Type formulas to compile and activate them.\n\n\
            Commands:\n\
            \n  :theta <value>   Set theta and evaluate\n\
            \n  :eval [theta]    Evaluate the active formula\n\
            \n  :ast             Show the active syntax tree\n\
            \n  :help            Show available REPL commands\n\
            \n  :quit            Exit the REPL (also :q, :exit)"
    )]
    Repl,
}

#[derive(Debug, Args, Clone)]
struct FormulaArgs {
    /// Formula text (reads from stdin if not provided)
    #[arg(value_name = "FORMULA", allow_hyphen_values = true)]
    formula: Option<String>,
}

#[derive(Debug, Args, Clone)]
struct EvalArgs {
    #[arg(value_name = "FORMULA", allow_hyphen_values = true)]
    formula: String,

    /// Values of theta to evaluate at
    #[arg(
        short,
        long,
        value_name = "T",
        num_args = 1..,
        required = true,
        allow_negative_numbers = true
    )]
    theta: Vec<f64>,
}

#[derive(Debug, Args, Clone)]
struct TraceArgs {
    /// Formula text; overrides the formula of --settings or --preset
    #[arg(value_name = "FORMULA", allow_hyphen_values = true)]
    formula: Option<String>,

    /// JSON settings file to start from
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    settings: Option<PathBuf>,

    /// Named preset to start from (gentle, chaotic, rainbow, blueGreen)
    #[arg(long, value_name = "NAME")]
    preset: Option<Preset>,

    /// Number of points to sample
    #[arg(long, value_name = "N", default_value_t = 16)]
    steps: usize,

    /// Theta advance per step; overrides drawSpeed
    #[arg(long, value_name = "S", allow_negative_numbers = true)]
    speed: Option<f64>,

    /// Emitter origin
    #[arg(long, value_names = ["X", "Y"], num_args = 2, allow_negative_numbers = true)]
    origin: Option<Vec<f64>>,

    /// Print points as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args, Clone)]
struct PresetArgs {
    /// Preset name (gentle, chaotic, rainbow, blueGreen)
    #[arg(value_name = "NAME")]
    name: Preset,

    /// Write the settings to a file instead of stdout
    #[arg(short, long = "out", value_name = "FILE")]
    out: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbose {
        0 if std::env::var_os("RUST_LOG").is_some() => {}
        0 => {
            builder.filter_level(LevelFilter::Warn);
        }
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    let _ = builder.try_init();
}

fn read_formula(formula: &Option<String>) -> Result<String, String> {
    if let Some(text) = formula {
        Ok(text.clone())
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        Ok(buf)
    }
}

/// Compile `source`, printing a rendered diagnostic on failure.
fn compile_or_report(source: &str) -> Option<CompiledExpression> {
    match compile(source) {
        Ok(compiled) => Some(compiled),
        Err(error) => {
            eprint!("{}", render_snippet(&error.diagnostic(source), source));
            None
        }
    }
}

fn run_check(source: &str) -> i32 {
    match compile_or_report(source) {
        Some(_) => {
            println!("ok");
            0
        }
        None => 1,
    }
}

fn run_json(source: &str) -> i32 {
    let report = CompileReport::compile(source);
    match report.to_json() {
        Ok(json) => {
            println!("{json}");
            if report.ok {
                0
            } else {
                1
            }
        }
        Err(e) => {
            eprintln!("error: failed to serialize report: {e}");
            2
        }
    }
}

fn run_eval(args: &EvalArgs) -> i32 {
    let Some(compiled) = compile_or_report(&args.formula) else {
        return 1;
    };
    for &theta in &args.theta {
        println!("r({theta}) = {}", compiled.evaluate(theta));
    }
    0
}

fn inspect_text(compiled: &CompiledExpression) -> String {
    let ast = compiled.ast();
    let mut counter = NodeCounter::default();
    ast.accept(&mut counter);
    let functions = called_functions(ast);
    let functions = if functions.is_empty() {
        "none".to_string()
    } else {
        functions.join(", ")
    };
    format!(
        "formula: {compiled}\ntree:\n{}functions: {functions}\nuses theta: {}\nnodes: {}, depth: {}\n",
        AstPrinter::new().print(ast),
        if references_theta(ast) { "yes" } else { "no" },
        counter.nodes,
        counter.max_depth,
    )
}

fn run_inspect(source: &str) -> i32 {
    match compile_or_report(source) {
        Some(compiled) => {
            print!("{}", inspect_text(&compiled));
            0
        }
        None => 1,
    }
}

fn trace_text(points: &[PathPoint]) -> String {
    let mut out = String::from("theta\tradius\tx\ty\temission_angle\n");
    for p in points {
        out.push_str(&format!(
            "{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\n",
            p.theta, p.radius, p.x, p.y, p.emission_angle
        ));
    }
    out
}

fn run_trace(args: &TraceArgs) -> i32 {
    let mut path = EmitterPath::default();

    let settings = match (&args.settings, args.preset) {
        (Some(file), _) => match load_settings(file) {
            Ok(settings) => Some(settings),
            Err(e) => {
                eprintln!("error: {e}");
                return 2;
            }
        },
        (None, Some(preset)) => Some(preset.settings()),
        (None, None) => None,
    };

    let source = match (&args.formula, &settings) {
        (Some(formula), _) => formula.clone(),
        (None, Some(settings)) => settings.formula.clone(),
        (None, None) => {
            eprintln!("error: a formula, --settings or --preset is required");
            return 2;
        }
    };

    if let Some(settings) = &settings {
        path.set_speed(settings.draw_speed);
    }
    if let Some(speed) = args.speed {
        path.set_speed(speed);
    }
    if let Some([x, y]) = args.origin.as_deref() {
        path.set_origin(*x, *y);
    }

    let Some(compiled) = compile_or_report(&source) else {
        return 1;
    };
    path.set_compiled(Arc::new(compiled));
    log::info!(
        "tracing {} steps of {:?} at speed {}",
        args.steps,
        path.formula().source(),
        path.speed()
    );

    let points = path.sample(args.steps);
    if args.json {
        match serde_json::to_string_pretty(&points) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize points: {e}");
                return 2;
            }
        }
    } else {
        print!("{}", trace_text(&points));
    }
    0
}

fn run_preset(args: &PresetArgs) -> i32 {
    let settings = args.name.settings();
    match &args.out {
        Some(file) => match save_settings(file, &settings) {
            Ok(()) => {
                println!("wrote preset '{}' to {}", args.name, file.display());
                0
            }
            Err(e) => {
                eprintln!("error: {e}");
                2
            }
        },
        None => match serde_json::to_string_pretty(&settings) {
            Ok(json) => {
                println!("{json}");
                0
            }
            Err(e) => {
                eprintln!("error: failed to serialize preset: {e}");
                2
            }
        },
    }
}

fn run_repl() -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize repl: {e}");
            return 2;
        }
    };

    let mut session = ReplSession::new();
    loop {
        match rl.readline(session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: repl failed: {e}");
                return 2;
            }
        }
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli
        .command
        .unwrap_or(Command::Check(FormulaArgs { formula: None }));

    match command {
        Command::Check(args) => match read_formula(&args.formula) {
            Ok(source) => run_check(&source),
            Err(e) => {
                eprintln!("error: {e}");
                2
            }
        },
        Command::Json(args) => match read_formula(&args.formula) {
            Ok(source) => run_json(&source),
            Err(e) => {
                eprintln!("error: {e}");
                2
            }
        },
        Command::Inspect(args) => match read_formula(&args.formula) {
            Ok(source) => run_inspect(&source),
            Err(e) => {
                eprintln!("error: {e}");
                2
            }
        },
        Command::Eval(args) => run_eval(&args),
        Command::Trace(args) => run_trace(&args),
        Command::Preset(args) => run_preset(&args),
        Command::Repl => run_repl(),
    }
}

fn main() {
    std::process::exit(run_cli());
}
