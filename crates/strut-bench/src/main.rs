use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::hint::black_box;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use strut_engine::{ConstraintEngine, ConstraintSet};
use strut_expr::strength::{self, Preset, StrengthSpec};
use strut_expr::{Constraint, Expression, RelationalOperator, Term, Variable};
use strut_tools::{init_logging, LogConfig};

const DEFAULT_CASES: [usize; 4] = [10, 100, 1_000, 10_000];
const RESTRENGTH_ROUNDS: usize = 1_000;
const SCHEMA_VERSION: u32 = 1;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Strut benchmark runner and reporting interface"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute benchmark scenarios and save JSONL artifacts
    Run(RunArgs),
    /// Render benchmark artifact summaries
    Report(ReportArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Benchmark scenarios to execute
    #[arg(
        long = "scenario",
        value_enum,
        value_delimiter = ',',
        default_value = "reduce,build,restrength"
    )]
    scenarios: Vec<Scenario>,

    /// Comma-separated list of raw term counts
    #[arg(long, value_delimiter = ',')]
    cases: Option<Vec<usize>>,

    /// Distinct variables per raw term, in (0, 1]; lower means more duplicates to merge
    #[arg(long, default_value_t = 0.5)]
    distinct_ratio: f64,

    /// Number of repetitions per case
    #[arg(long, default_value_t = 1)]
    repetitions: u32,

    /// JSONL output artifact path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Input JSONL benchmark artifact
    #[arg(long)]
    input: PathBuf,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Ndjson,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum Scenario {
    Reduce,
    Build,
    Restrength,
}

impl Scenario {
    fn as_str(self) -> &'static str {
        match self {
            Scenario::Reduce => "reduce",
            Scenario::Build => "build",
            Scenario::Restrength => "restrength",
        }
    }
}

#[derive(Debug, Clone)]
struct StageMeasurement {
    stage: &'static str,
    duration_ms: f64,
}

#[derive(Debug, Clone)]
struct CaseExecution {
    terms: usize,
    variables: usize,
    reduced_terms: usize,
    stages: Vec<StageMeasurement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BenchRecord {
    schema_version: u32,
    run_id: String,
    scenario: String,
    case_name: String,
    repetition: u32,
    terms: usize,
    variables: usize,
    reduced_terms: usize,
    stage: String,
    duration_ms: f64,
}

#[derive(Debug, Clone, Eq, Ord, PartialEq, PartialOrd)]
struct SummaryKey {
    scenario: String,
    case_name: String,
    stage: String,
}

#[derive(Debug, Clone, Serialize)]
struct SummaryRow {
    scenario: String,
    case_name: String,
    stage: String,
    samples: usize,
    mean_duration_ms: f64,
    max_duration_ms: f64,
    reduced_terms: usize,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LogConfig::from_env()?)?;
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run_command(args),
        Command::Report(args) => report_command(args),
    }
}

fn run_command(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.repetitions == 0 {
        return Err(boxed_input_error("repetitions must be greater than zero"));
    }
    if !(args.distinct_ratio > 0.0 && args.distinct_ratio <= 1.0) {
        return Err(boxed_input_error("distinct-ratio must be in (0, 1]"));
    }

    let run_id = build_run_id()?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("artifacts/bench/{}.jsonl", run_id.as_str())));
    let cases = args.cases.clone().unwrap_or_else(|| DEFAULT_CASES.to_vec());
    if cases.contains(&0) {
        return Err(boxed_input_error("term counts must be greater than zero"));
    }

    let mut records = Vec::new();
    for scenario in &args.scenarios {
        for &terms in &cases {
            let case_name = format!("terms_{}", terms);
            for rep_idx in 0..args.repetitions {
                let execution = execute_case(*scenario, terms, args.distinct_ratio)?;
                tracing::info!(
                    component = "bench",
                    operation = "execute_case",
                    status = "success",
                    scenario = scenario.as_str(),
                    case = %case_name,
                    repetition = rep_idx + 1,
                    "Case finished"
                );
                records.extend(case_records(
                    &run_id,
                    *scenario,
                    &case_name,
                    rep_idx + 1,
                    &execution,
                ));
            }
        }
    }

    write_records_jsonl(&output_path, &records)?;
    render_output(args.format, &records)?;
    println!("artifact: {}", output_path.display());

    Ok(())
}

fn report_command(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_records_jsonl(&args.input)?;
    render_output(args.format, &records)?;
    Ok(())
}

fn distinct_count(terms: usize, ratio: f64) -> usize {
    ((terms as f64 * ratio).round() as usize).clamp(1, terms)
}

/// Raw expression over `variables`, cycling through them so that every
/// variable past the first pass appears again as a duplicate term.
fn generate_expression(terms: usize, variables: &[Variable]) -> Expression {
    let raw = (0..terms)
        .map(|idx| {
            let variable = variables[idx % variables.len()].clone();
            Term::new(variable, ((idx % 7) + 1) as f64)
        })
        .collect();
    Expression::new(raw, terms as f64)
}

fn timed<T>(stage: &'static str, stages: &mut Vec<StageMeasurement>, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    stages.push(StageMeasurement {
        stage,
        duration_ms: start.elapsed().as_secs_f64() * 1_000.0,
    });
    out
}

fn execute_case(
    scenario: Scenario,
    terms: usize,
    distinct_ratio: f64,
) -> Result<CaseExecution, Box<dyn std::error::Error>> {
    let total_start = Instant::now();
    let mut stages = Vec::new();

    let variables: Vec<Variable> = (0..distinct_count(terms, distinct_ratio))
        .map(|idx| Variable::new(format!("v{}", idx)))
        .collect();
    let raw = timed("generate", &mut stages, || {
        generate_expression(terms, &variables)
    });

    let reduced_terms = match scenario {
        Scenario::Reduce => {
            let reduced = timed("reduce", &mut stages, || raw.reduced());
            reduced.terms().len()
        }
        Scenario::Build => {
            let constraint = timed("build", &mut stages, || {
                Constraint::new(
                    &raw,
                    RelationalOperator::LessEqual,
                    Some(StrengthSpec::Named(Preset::Strong)),
                )
            })?;
            let mut set = ConstraintSet::new();
            timed("stage", &mut stages, || set.add_constraint(&constraint))?;
            let text = timed("describe", &mut stages, || constraint.describe());
            black_box(text);
            constraint.expression().terms().len()
        }
        Scenario::Restrength => {
            let base = Constraint::required(&raw, RelationalOperator::Equal);
            let presets = [Preset::Weak, Preset::Medium, Preset::Strong, Preset::Required];
            timed("restrength", &mut stages, || -> Result<(), Box<dyn std::error::Error>> {
                for round in 0..RESTRENGTH_ROUNDS {
                    let preset = presets[round % presets.len()];
                    black_box(base.with_preset(preset));
                    let numeric = strength::create(0.0, (round % 1_000) as f64, 1.0, 1.0);
                    black_box(base.with_strength(numeric)?);
                }
                Ok(())
            })?;
            base.expression().terms().len()
        }
    };

    stages.push(StageMeasurement {
        stage: "total",
        duration_ms: total_start.elapsed().as_secs_f64() * 1_000.0,
    });

    Ok(CaseExecution {
        terms,
        variables: variables.len(),
        reduced_terms,
        stages,
    })
}

fn case_records(
    run_id: &str,
    scenario: Scenario,
    case_name: &str,
    repetition: u32,
    execution: &CaseExecution,
) -> Vec<BenchRecord> {
    execution
        .stages
        .iter()
        .map(|measurement| BenchRecord {
            schema_version: SCHEMA_VERSION,
            run_id: run_id.to_string(),
            scenario: scenario.as_str().to_string(),
            case_name: case_name.to_string(),
            repetition,
            terms: execution.terms,
            variables: execution.variables,
            reduced_terms: execution.reduced_terms,
            stage: measurement.stage.to_string(),
            duration_ms: measurement.duration_ms,
        })
        .collect()
}

fn render_output(
    format: OutputFormat,
    records: &[BenchRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Table => {
            let rows = summarize_records(records);
            print_summary_table(&rows);
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
            Ok(())
        }
        OutputFormat::Ndjson => {
            for record in records {
                println!("{}", serde_json::to_string(record)?);
            }
            Ok(())
        }
    }
}

fn summarize_records(records: &[BenchRecord]) -> Vec<SummaryRow> {
    #[derive(Default)]
    struct Acc {
        samples: usize,
        duration_sum: f64,
        duration_max: f64,
        reduced_terms: usize,
    }

    let mut groups: BTreeMap<SummaryKey, Acc> = BTreeMap::new();
    for record in records {
        let key = SummaryKey {
            scenario: record.scenario.clone(),
            case_name: record.case_name.clone(),
            stage: record.stage.clone(),
        };
        let entry = groups.entry(key).or_default();
        entry.samples += 1;
        entry.duration_sum += record.duration_ms;
        if record.duration_ms > entry.duration_max {
            entry.duration_max = record.duration_ms;
        }
        entry.reduced_terms = entry.reduced_terms.max(record.reduced_terms);
    }

    groups
        .into_iter()
        .map(|(key, acc)| SummaryRow {
            scenario: key.scenario,
            case_name: key.case_name,
            stage: key.stage,
            samples: acc.samples,
            mean_duration_ms: if acc.samples == 0 {
                0.0
            } else {
                acc.duration_sum / acc.samples as f64
            },
            max_duration_ms: acc.duration_max,
            reduced_terms: acc.reduced_terms,
        })
        .collect()
}

fn print_summary_table(rows: &[SummaryRow]) {
    println!(
        "{:<12} {:<14} {:<12} {:>7} {:>12} {:>12} {:>9}",
        "scenario", "case", "stage", "samples", "mean_ms", "max_ms", "reduced"
    );
    for row in rows {
        println!(
            "{:<12} {:<14} {:<12} {:>7} {:>12.3} {:>12.3} {:>9}",
            row.scenario,
            row.case_name,
            row.stage,
            row.samples,
            row.mean_duration_ms,
            row.max_duration_ms,
            row.reduced_terms,
        );
    }
}

fn write_records_jsonl(
    path: &Path,
    records: &[BenchRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn load_records_jsonl(path: &Path) -> Result<Vec<BenchRecord>, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str::<BenchRecord>(&line)?);
    }
    Ok(records)
}

fn build_run_id() -> Result<String, Box<dyn std::error::Error>> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| std::io::Error::other(err.to_string()))?
        .as_millis();
    Ok(format!("bench_{}", millis))
}

fn boxed_input_error(message: &str) -> Box<dyn std::error::Error> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        message.to_string(),
    ))
}
