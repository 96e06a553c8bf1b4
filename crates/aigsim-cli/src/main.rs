//! Demo driver for `aigsim-core`: builds one of a small catalog of
//! circuits, runs a simulation session over it, prints a verdict per
//! PO, and on a sequential failure, extracts and dumps a
//! counter-example witness.
//!
//! `aigsim-core` treats AIG construction, topological ordering and all
//! file/CLI I/O as out of scope; this binary is the thin outer shell
//! around it, in the same "core crate + thin driver" split the
//! workspace's own `splst_core`/`splst_front` pairing uses.

mod circuit;
mod demos;

use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use aigsim_core::{cex, dump, observe, rng, session, Circuit};

/// Errors this driver can report to the shell; `aigsim-core` itself
/// never returns this type.
#[derive(Error, Debug)]
enum CliError {
    #[error("failed to open witness file {path}: {source}")]
    OpenWitnessFile { path: PathBuf, source: io::Error },

    #[error("failed to write witness: {0}")]
    WriteWitness(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DemoCircuit {
    Buffer,
    Inverter,
    LatchPassthrough,
    RampLatch,
    AndOfAll,
    ConstZero,
}

/// Bit-parallel AIG simulator demo driver.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Which demo circuit to simulate.
    #[arg(value_enum)]
    circuit: DemoCircuit,

    /// Number of true PIs, only used by `and-of-all`.
    #[arg(long, default_value_t = 4)]
    pis: usize,

    /// Words per frame (simulation patterns = 32 * words).
    #[arg(long, default_value_t = 4)]
    words: usize,

    /// Number of time frames to simulate (sequential circuits only).
    #[arg(long, default_value_t = 4)]
    frames: usize,

    /// Number of prefix frames excluded from equivalence scanning.
    #[arg(long, default_value_t = 0)]
    pref: usize,

    /// PRNG seed, for reproducible runs.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Append a found counter-example's witness dump to this file.
    #[arg(long)]
    witness_out: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let mut rng = rng::seeded(cli.seed);

    let result = match cli.circuit {
        DemoCircuit::Buffer => {
            run_comb(&demos::buffer(), &mut rng, cli.words);
            Ok(())
        }
        DemoCircuit::Inverter => {
            run_comb(&demos::inverter(), &mut rng, cli.words);
            Ok(())
        }
        DemoCircuit::AndOfAll => {
            run_comb(&demos::and_of_all(cli.pis.max(1)), &mut rng, cli.words);
            Ok(())
        }
        DemoCircuit::ConstZero => run_seq(&demos::const_zero(), &mut rng, &cli),
        DemoCircuit::LatchPassthrough => run_seq(&demos::latch_passthrough(), &mut rng, &cli),
        DemoCircuit::RampLatch => run_seq(&demos::ramp_latch(), &mut rng, &cli),
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run_comb<C: Circuit>(circuit: &C, rng: &mut dyn rng::SimRng, words: usize) {
    let session = session::simulate_comb(circuit, rng, words.max(1));
    for (i, &po) in circuit.true_pos().iter().enumerate() {
        let verdict = if observe::is_zero(session.arena(), po) { "const-0" } else { "non-const" };
        println!("po[{i}]: {verdict}");
    }
}

fn run_seq<C: Circuit>(circuit: &C, rng: &mut dyn rng::SimRng, cli: &Cli) -> Result<(), CliError> {
    let session = session::simulate_seq(circuit, rng, cli.pref, cli.frames.max(1), cli.words.max(1));
    log::info!("non_const_out = {}", session.non_const_out);

    if !session.non_const_out {
        println!("no true PO became non-constant-0 within {} frames", cli.frames);
        return Ok(());
    }

    match cex::get_counter_example(circuit, &session) {
        Some(witness) => {
            println!("counter-example: po={} frame={}", witness.i_po, witness.i_frame);
            if let Some(path) = &cli.witness_out {
                let mut file = File::options()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| CliError::OpenWitnessFile { path: path.clone(), source })?;
                let replayed = dump::write_counter_example(&mut file, circuit, &witness)?;
                println!("wrote witness to {} (replay agreed: {replayed})", path.display());
            }
        }
        None => println!("a non-const output was observed but no witness could be extracted"),
    }
    Ok(())
}
