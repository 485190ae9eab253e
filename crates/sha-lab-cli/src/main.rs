use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rand::RngCore;
use sha2::Digest as _;
use sha_lab_core::input::bytes_from_hex;
use sha_lab_core::Digest;
use sha_lab_cpu::bench::{print_bench_results, run_bench, BenchConfig};
use sha_lab_cpu::{avalanche, run_selftest, SelfTestConfig};
use sha_lab_hash::{digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Messages hashed by the demo
const SAMPLES: [&str; 4] = [
    "",
    "abc",
    "hello world",
    "The quick brown fox jumps over the lazy dog",
];

/// Files at least this large get a progress bar
const PROGRESS_THRESHOLD: u64 = 64 * 1024 * 1024;

/// Maximum mismatches printed by the self-test
const MAX_REPORTED_MISMATCHES: usize = 10;

#[derive(Parser, Debug)]
#[command(
    name = "sha-lab",
    version,
    about = "From-scratch SHA-256 with reference cross-checks"
)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Hash the built-in samples and compare with the sha2 crate (default)
    Demo,

    /// Hash text, hex bytes or files
    Hash {
        /// Inputs to hash (UTF-8 text unless --hex or --file)
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Inputs are hex-encoded bytes
        #[arg(long = "hex", default_value_t = false, conflicts_with = "file")]
        hex: bool,

        /// Inputs are file paths ("-" reads stdin)
        #[arg(short = 'f', long = "file", default_value_t = false)]
        file: bool,

        /// Read size when streaming files
        #[arg(
            long = "chunk-size",
            default_value_t = 64 * 1024,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        chunk_size: u64,
    },

    /// Cross-check random messages against the sha2 crate
    Selftest {
        /// Number of random messages
        #[arg(long = "cases", default_value_t = 10_000)]
        cases: u64,

        /// Maximum random message length
        #[arg(long = "max-len", default_value_t = 4096)]
        max_len: usize,

        /// Seed for message generation (random if omitted)
        #[arg(long = "seed")]
        seed: Option<u64>,
    },

    /// Single-bit-flip avalanche statistics for a text message
    Avalanche {
        /// Message text
        text: String,

        /// Maximum number of bits to flip
        #[arg(long = "bits", default_value_t = 256)]
        bits: usize,
    },

    /// Measure hashing throughput
    Bench {
        /// Buffer size in bytes
        #[arg(long = "size", default_value_t = 1 << 20)]
        size: usize,

        /// Timed iterations
        #[arg(long = "iters", default_value_t = 64)]
        iters: u32,

        /// Warmup iterations before timing
        #[arg(long = "warmup", default_value_t = 4)]
        warmup: u32,

        /// Also time streaming updates of this many bytes
        #[arg(long = "chunk")]
        chunk: Option<usize>,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn reference_digest(data: &[u8]) -> [u8; 32] {
    sha2::Sha256::digest(data).into()
}

/// One demo line: our digest next to the reference.
struct DemoRow {
    input: &'static str,
    ours: Digest,
    reference: [u8; 32],
}

impl DemoRow {
    fn matches(&self) -> bool {
        self.ours.as_bytes() == &self.reference
    }
}

fn demo_rows() -> Vec<DemoRow> {
    SAMPLES
        .into_iter()
        .map(|input| DemoRow {
            input,
            ours: digest(input.as_bytes()),
            reference: reference_digest(input.as_bytes()),
        })
        .collect()
}

fn run_demo() -> ExitCode {
    let rows = demo_rows();

    for row in &rows {
        println!("input: {:?}", row.input);
        println!("sha256 (this impl): {}", row.ours);
        println!("sha256 (sha2)     : {}", hex::encode(row.reference));
        println!("match: {}", row.matches());
        println!("{}", "-".repeat(60));
    }

    if rows.iter().all(DemoRow::matches) {
        ExitCode::SUCCESS
    } else {
        eprintln!("Error: digest mismatch against reference implementation");
        ExitCode::FAILURE
    }
}

/// Stream a reader through the hasher in `chunk_size` reads.
fn hash_reader<R: Read>(reader: R, chunk_size: usize) -> Result<Digest> {
    let mut hasher = Sha256::new();
    let mut reader = BufReader::with_capacity(chunk_size.max(1), reader);
    io::copy(&mut reader, &mut hasher)?;
    Ok(hasher.finalize()?)
}

fn hash_file(path: &Path, chunk_size: usize) -> Result<Digest> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("cannot stat {}", path.display()))?
        .len();
    debug!(path = %path.display(), len, chunk_size, "hashing file");

    if len < PROGRESS_THRESHOLD {
        return hash_reader(file, chunk_size)
            .with_context(|| format!("cannot read {}", path.display()));
    }

    let pb = ProgressBar::new(len);
    pb.set_style(ProgressStyle::with_template(
        "{msg} [{bar:40}] {bytes}/{total_bytes} ({bytes_per_sec})",
    )?);
    pb.set_message(path.display().to_string());
    let result = hash_reader(pb.wrap_read(file), chunk_size)
        .with_context(|| format!("cannot read {}", path.display()));
    pb.finish_and_clear();
    result
}

/// Decode every input up front so bad input fails before any hashing.
fn decode_inputs(inputs: &[String], hex: bool) -> Result<Vec<Vec<u8>>> {
    inputs
        .iter()
        .map(|input| -> Result<Vec<u8>> {
            if hex {
                Ok(bytes_from_hex(input)?)
            } else {
                Ok(input.as_bytes().to_vec())
            }
        })
        .collect()
}

fn run_hash(inputs: &[String], hex: bool, file: bool, chunk_size: usize) -> Result<ExitCode> {
    if file {
        for input in inputs {
            let digest = if input == "-" {
                hash_reader(io::stdin().lock(), chunk_size).context("cannot read stdin")?
            } else {
                hash_file(Path::new(input), chunk_size)?
            };
            println!("{}  {}", digest, input);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let messages = decode_inputs(inputs, hex)?;
    let digests = sha_lab_cpu::hash_batch(&messages);
    for (input, digest) in inputs.iter().zip(digests) {
        println!("{}  {:?}", digest, input);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_selftest_cmd(cases: u64, max_len: usize, seed: Option<u64>) -> Result<ExitCode> {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().next_u64());
    let cfg = SelfTestConfig {
        cases,
        max_len,
        seed,
    };

    eprintln!("Self-test: {} case(s), max length {}, seed {}", cases, max_len, seed);

    let pb = ProgressBar::new(cases);
    pb.set_style(ProgressStyle::with_template(
        "[{elapsed_precise}] [{bar:40}] {pos}/{len} ({per_sec})",
    )?);
    let report = run_selftest(&cfg, reference_digest, || pb.inc(1));
    pb.finish_and_clear();

    info!(bytes = report.bytes_hashed, "self-test finished");

    if report.passed() {
        eprintln!(
            "OK: {} case(s), {} bytes hashed, all digests match",
            report.cases_checked, report.bytes_hashed
        );
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!(
        "FAILED: {} mismatch(es) in {} case(s)",
        report.mismatches.len(),
        report.cases_checked
    );
    for m in report.mismatches.iter().take(MAX_REPORTED_MISMATCHES) {
        let got = match &m.got {
            Ok(d) => d.to_string(),
            Err(e) => format!("error: {}", e),
        };
        eprintln!(
            "  case {} (len {}, {:?}): expected {}, got {}",
            m.case, m.len, m.check, m.expected, got
        );
    }
    eprintln!("Replay with --seed {}", seed);
    Ok(ExitCode::FAILURE)
}

fn run_avalanche(text: &str, bits: usize) -> ExitCode {
    let stats = avalanche(text.as_bytes(), bits);
    if stats.flips == 0 {
        println!("Nothing to flip: message is empty or --bits is 0");
        return ExitCode::SUCCESS;
    }

    println!("Flipped bits:   {}", stats.flips);
    println!("Min changed:    {}", stats.min);
    println!("Max changed:    {}", stats.max);
    println!(
        "Mean changed:   {:.2} ({:.1}% of output bits)",
        stats.mean,
        stats.mean_fraction() * 100.0
    );
    ExitCode::SUCCESS
}

fn run(args: Args) -> Result<ExitCode> {
    match args.command.unwrap_or(Command::Demo) {
        Command::Demo => Ok(run_demo()),
        Command::Hash {
            inputs,
            hex,
            file,
            chunk_size,
        } => {
            let chunk_size = usize::try_from(chunk_size).context("--chunk-size too large")?;
            run_hash(&inputs, hex, file, chunk_size)
        }
        Command::Selftest {
            cases,
            max_len,
            seed,
        } => run_selftest_cmd(cases, max_len, seed),
        Command::Avalanche { text, bits } => Ok(run_avalanche(&text, bits)),
        Command::Bench {
            size,
            iters,
            warmup,
            chunk,
        } => {
            let cfg = BenchConfig {
                message_len: size,
                iters,
                warmup,
                chunk_len: chunk,
            };
            let results = run_bench(&cfg)?;
            print_bench_results(&results, &cfg);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
