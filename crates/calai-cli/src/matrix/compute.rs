//! `calai compute`: parse operands, build the engine, run one operation.
use anyhow::{Context, Result};
use clap::ArgMatches;

use calai_matrix::{
    CalculationHistory, Dimensions, EngineConfig, HistoryLog, Matrix, MatrixEngine, NullHistory,
    Operation, Outcome,
};

/// Everything `calai compute` needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct ComputeRequest {
    pub operation: Operation,
    pub lhs: Matrix<f64>,
    pub rhs: Matrix<f64>,
    pub declared_lhs: Option<Dimensions>,
    pub declared_rhs: Option<Dimensions>,
    pub precision: usize,
}

impl ComputeRequest {
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let tag: &String = matches
            .get_one("operation")
            .context("An operation is required")?;
        let operation: Operation = tag.parse()?;

        let lhs_text: &String = matches.get_one("lhs").context("--lhs is required")?;
        let lhs = parse_grid(lhs_text).context("Invalid --lhs matrix")?;

        let rhs = match matches.get_one::<String>("rhs") {
            Some(text) => parse_grid(text).context("Invalid --rhs matrix")?,
            None if operation.uses_rhs() => {
                anyhow::bail!("Operation `{}` needs a second matrix (--rhs)", operation)
            }
            None => Matrix::from_rows(Vec::new())?,
        };

        Ok(Self {
            operation,
            lhs,
            rhs,
            declared_lhs: declared(matches, "rows1", "cols1")?,
            declared_rhs: declared(matches, "rows2", "cols2")?,
            precision: matches.get_one::<usize>("precision").copied().unwrap_or(2),
        })
    }
}

fn declared(matches: &ArgMatches, rows: &str, cols: &str) -> Result<Option<Dimensions>> {
    match (
        matches.get_one::<usize>(rows).copied(),
        matches.get_one::<usize>(cols).copied(),
    ) {
        (Some(r), Some(c)) => Ok(Some(Dimensions::new(r, c))),
        (None, None) => Ok(None),
        _ => anyhow::bail!("--{} and --{} must be given together", rows, cols),
    }
}

/// Parse a JSON grid such as `[[1,2],[3,4]]` into a matrix.
pub fn parse_grid(text: &str) -> Result<Matrix<f64>> {
    let matrix: Matrix<f64> = serde_json::from_str(text)
        .with_context(|| format!("Expected a JSON list of equal-length rows, got `{}`", text))?;
    Ok(matrix)
}

/// History sink selected by the config: a JSON file when one is set,
/// otherwise nothing is kept past the process.
pub fn open_history(config: &EngineConfig) -> Box<dyn HistoryLog> {
    match &config.history_file {
        Some(path) => Box::new(CalculationHistory::open(path, config.history_capacity)),
        None => Box::new(NullHistory),
    }
}

pub fn run_compute(request: &ComputeRequest, config: &EngineConfig) -> Result<Outcome> {
    let engine = MatrixEngine::with_history(config.clone(), open_history(config));
    let declared_lhs = request
        .declared_lhs
        .unwrap_or_else(|| Dimensions::of(&request.lhs));
    let declared_rhs = request
        .declared_rhs
        .unwrap_or_else(|| Dimensions::of(&request.rhs));

    let outcome = engine.compute_declared(
        &request.lhs,
        &request.rhs,
        request.operation,
        declared_lhs,
        declared_rhs,
    )?;
    log::info!(
        "[Calai::Cli] {} completed: {}",
        request.operation,
        outcome.history_text()
    );
    Ok(outcome)
}
