//! QAOA runtime benchmarks across quantum backends.
//!
//! Iterates problem × backend × graph size, runs the QAOA optimization
//! loop at each point, persists the per-evaluation runtime sequence under
//! a run id, and prints a per-backend summary. Points that already have a
//! recorded run are skipped, so an interrupted sweep resumes where it
//! stopped.

mod backends;
mod report;
mod store;
mod ui;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use sunna_qaoa::{Cobyla, Graph, Problem, QaoaDriver, QaoaRun, Spsa, TspInstance, exact};

use crate::report::RuntimeReport;
use crate::store::RunStore;

/// Benchmark problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProblemKind {
    /// Max-Cut on regular graphs.
    Maxcut,
    /// Traveling Salesman in the one-hot encoding.
    Tsp,
    /// Dominating Set.
    Dsp,
}

impl ProblemKind {
    fn label(self) -> &'static str {
        match self {
            ProblemKind::Maxcut => "maxcut",
            ProblemKind::Tsp => "tsp",
            ProblemKind::Dsp => "dsp",
        }
    }

    /// Build the problem instance for one benchmark point.
    fn instance(self, size: usize, seed: u64) -> Problem {
        let graph = Graph::circulant(size, &[1, 2]);
        match self {
            ProblemKind::Maxcut => Problem::MaxCut(graph),
            ProblemKind::Tsp => Problem::Tsp(TspInstance::from_graph(&graph, seed)),
            ProblemKind::Dsp => Problem::Dsp(graph),
        }
    }
}

impl std::fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classical optimizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OptimizerKind {
    /// Simplex with trust-region contraction.
    Cobyla,
    /// Simultaneous perturbation stochastic approximation.
    Spsa,
}

impl std::fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OptimizerKind::Cobyla => "cobyla",
            OptimizerKind::Spsa => "spsa",
        })
    }
}

/// QAOA runtime benchmarks across quantum backends.
#[derive(Debug, Parser)]
#[command(name = "sunna-bench", version, about)]
struct Cli {
    /// Backend ids: sim, ibm:<device>, ionq[:<target>].
    #[arg(long, value_delimiter = ',', default_value = "sim")]
    backends: Vec<String>,

    /// Problems to benchmark.
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = [ProblemKind::Maxcut, ProblemKind::Tsp])]
    problems: Vec<ProblemKind>,

    /// Graph sizes for Max-Cut and DSP. Beyond ~15 qubits local
    /// simulation slows down sharply.
    #[arg(long, value_delimiter = ',', default_values_t = [5usize, 7, 9, 11, 13])]
    sizes: Vec<usize>,

    /// City counts for TSP (qubit count is the square).
    #[arg(long, value_delimiter = ',', default_values_t = [3usize, 4])]
    tsp_sizes: Vec<usize>,

    /// QAOA depth p. Deeper circuits usually score better and run longer.
    #[arg(long, default_value_t = 1)]
    layers: usize,

    /// Shots per circuit evaluation.
    #[arg(long, default_value_t = 2048)]
    shots: u32,

    /// Optimizer iteration cap.
    #[arg(long, default_value_t = 100)]
    maxiter: usize,

    /// Classical optimizer.
    #[arg(long, value_enum, default_value_t = OptimizerKind::Cobyla)]
    optimizer: OptimizerKind,

    /// Directory for persisted runtime sequences.
    #[arg(long, default_value = "data")]
    data_dir: std::path::PathBuf,

    /// Seed for graph and distance generation.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

impl Cli {
    fn sizes_for(&self, problem: ProblemKind) -> &[usize] {
        match problem {
            ProblemKind::Tsp => &self.tsp_sizes,
            _ => &self.sizes,
        }
    }
}

async fn run_point(
    cli: &Cli,
    backend: std::sync::Arc<dyn sunna_hal::Backend>,
    problem: Problem,
) -> anyhow::Result<QaoaRun> {
    let run = match cli.optimizer {
        OptimizerKind::Cobyla => {
            QaoaDriver::with_optimizer(backend, problem, Cobyla::new().with_maxiter(cli.maxiter))
                .with_layers(cli.layers)
                .with_shots(cli.shots)
                .run()
                .await?
        }
        OptimizerKind::Spsa => {
            QaoaDriver::with_optimizer(backend, problem, Spsa::new().with_maxiter(cli.maxiter))
                .with_layers(cli.layers)
                .with_shots(cli.shots)
                .run()
                .await?
        }
    };
    Ok(run)
}

/// Score the most frequent sampled bitstring against the brute-force
/// optimum. Exact solving is only feasible for the benchmark sizes.
fn solution_quality(problem: &Problem, run: &QaoaRun) -> Option<String> {
    let top = run.best_bitstrings.first()?;
    if problem.n_nodes() > 24 {
        return None;
    }
    let bits: Vec<u8> = top.chars().map(|c| u8::from(c == '1')).collect();

    match problem {
        Problem::MaxCut(graph) => {
            let assignment: Vec<bool> = bits.iter().map(|&b| b == 1).collect();
            let cut = graph.cut_value(&assignment);
            let (_, best) = exact::max_cut_solutions(graph);
            Some(format!("cut {cut} of {best}"))
        }
        Problem::Dsp(graph) => {
            let score = exact::dsp_assignment_score(graph, &bits);
            let best = exact::dsp_solve(graph);
            Some(format!("score {score} of {best}"))
        }
        Problem::Tsp(tsp) => {
            let (best, solutions) = exact::tsp_solve(tsp);
            let optimal = solutions.contains(top);
            Some(format!("optimum {best:.1}, sampled optimal: {optimal}"))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let store = RunStore::new(&cli.data_dir)?;

    for &problem_kind in &cli.problems {
        let sizes = cli.sizes_for(problem_kind).to_vec();
        let title = format!(
            "Benchmark: {} problem, p={}",
            problem_kind.label(),
            cli.layers
        );
        ui::print_header(&title);

        for backend_id in &cli.backends {
            // Unknown ids and missing credentials are fatal here: a sweep
            // over a misconfigured backend would record nothing.
            let backend = backends::resolve(backend_id)?;
            ui::print_section(&format!("{} on {}", problem_kind.label(), backend_id));
            let pb = ui::progress_bar(sizes.len() as u64, backend_id);

            for &size in &sizes {
                let id = store::run_id(problem_kind.label(), backend_id, size, cli.layers);
                if store.exists(&id) {
                    tracing::info!(run = %id, "already recorded, skipping");
                    pb.inc(1);
                    continue;
                }

                let problem = problem_kind.instance(size, cli.seed);
                let run = run_point(&cli, backend.clone(), problem.clone()).await?;

                let mut runtimes = run.runtimes_ms.clone();
                if !backend.capabilities().is_simulator {
                    report::smooth_zero_runtimes(&mut runtimes);
                }
                store.save(&id, &runtimes)?;

                let quality = solution_quality(&problem, &run).unwrap_or_default();
                pb.suspend(|| {
                    ui::print_result(
                        &id,
                        format!(
                            "best {:?}, {} evaluations, {quality}",
                            run.best_bitstrings.first().map(String::as_str).unwrap_or("-"),
                            run.evaluations
                        ),
                    );
                });
                pb.inc(1);
            }

            pb.finish_and_clear();
        }

        let series = report::collect(
            &store,
            problem_kind.label(),
            &cli.backends,
            &sizes,
            cli.layers,
        )?;
        println!("{}", RuntimeReport::new(title, series.clone()));
        report::write_summary(&store, problem_kind.label(), cli.layers, &series)?;
    }

    ui::print_success("Benchmarking finished");
    Ok(())
}
