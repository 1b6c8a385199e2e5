//! Calculo - numerical methods from the command line
//!
//! # Usage
//!
//! ```bash
//! calculo newton --poly "1 0 -4" --x0 1
//! calculo bisection --poly "1 0 -1 -2" -a 1 -b 2
//! calculo linear --matrix "2 1 -1; -3 -1 2; -2 1 2" --rhs "8; -11; -3"
//! calculo linear --matrix "1 1; 1 1" --rhs "2 2" --method svd
//! ```

use std::path::{Path, PathBuf};

use calculo_core::{
    config::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE},
    error::{CalculoError, Result},
    input::{self, Polynomial},
    Bisection, LinearSystemConfig, LinearSystemSolver, Method, NewtonRaphson, RootFindConfig,
    RootFindResult,
};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Bisection form default, looser than the library default.
const BISECTION_TOLERANCE: f64 = 1e-5;

/// Bisection, Newton-Raphson and Gaussian elimination solvers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every iteration
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find a root by bisection on [a, b]
    Bisection {
        /// Polynomial coefficients, highest degree first
        #[arg(long, default_value = "1 0 -1 -2", allow_hyphen_values = true)]
        poly: String,

        /// Left end of the interval
        #[arg(
            short,
            default_value = "1.0",
            value_parser = input::parse_scalar,
            allow_hyphen_values = true
        )]
        a: f64,

        /// Right end of the interval
        #[arg(
            short,
            default_value = "2.0",
            value_parser = input::parse_scalar,
            allow_hyphen_values = true
        )]
        b: f64,

        #[command(flatten)]
        params: RootParams,
    },

    /// Find a root by Newton-Raphson from x0
    Newton {
        /// Polynomial coefficients, highest degree first
        #[arg(long, default_value = "1 0 -4", allow_hyphen_values = true)]
        poly: String,

        /// Starting point
        #[arg(
            long,
            default_value = "1.0",
            value_parser = input::parse_scalar,
            allow_hyphen_values = true
        )]
        x0: f64,

        #[command(flatten)]
        params: RootParams,
    },

    /// Solve a linear system A x = b
    Linear {
        /// Matrix rows separated by ';' or newlines, values by commas or spaces
        #[arg(
            long,
            conflicts_with = "matrix_file",
            required_unless_present = "matrix_file",
            allow_hyphen_values = true
        )]
        matrix: Option<String>,

        /// Read the matrix from a file
        #[arg(long, value_name = "PATH")]
        matrix_file: Option<PathBuf>,

        /// Right-hand side values
        #[arg(
            long,
            conflicts_with = "rhs_file",
            required_unless_present = "rhs_file",
            allow_hyphen_values = true
        )]
        rhs: Option<String>,

        /// Read the right-hand side from a file
        #[arg(long, value_name = "PATH")]
        rhs_file: Option<PathBuf>,

        /// Solution method
        #[arg(long, value_enum, default_value_t = MethodArg::Gauss)]
        method: MethodArg,

        /// Condition number above which results carry a warning
        #[arg(long, default_value = "1e5", value_parser = input::parse_scalar)]
        condition_threshold: f64,
    },
}

/// Tolerance and iteration budget shared by the root-finders.
#[derive(Args, Debug)]
struct RootParams {
    /// Relative error tolerance [default: 1e-5 for bisection, 1e-7 for newton]
    #[arg(long, value_parser = input::parse_scalar)]
    tolerance: Option<f64>,

    /// Maximum number of iterations
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,
}

impl RootParams {
    fn config(&self, default_tolerance: f64) -> Result<RootFindConfig> {
        let config = RootFindConfig::new()
            .with_tolerance(self.tolerance.unwrap_or(default_tolerance))
            .with_max_iterations(self.max_iterations);
        input::validate_root_params(&config)?;
        Ok(config)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MethodArg {
    /// Gaussian elimination with partial pivoting
    Gauss,
    /// SVD pseudo-inverse
    Svd,
    /// Normal-equations least squares
    LeastSquares,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Gauss => Method::Elimination,
            MethodArg::Svd => Method::Svd,
            MethodArg::LeastSquares => Method::LeastSquares,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Command::Bisection { poly, a, b, params } => {
            let config = params.config(BISECTION_TOLERANCE)?;
            input::validate_interval(a, b)?;
            let f = parse_function(&poly)?;

            println!("f(x) = {f}");
            let result = Bisection::with_config(config).solve(|x| f.eval(x), a, b);
            print_root(&result);
        }

        Command::Newton { poly, x0, params } => {
            let config = params.config(DEFAULT_TOLERANCE)?;
            let f = parse_function(&poly)?;
            let df = f.derivative();

            println!("f(x)  = {f}");
            println!("f'(x) = {df}");
            let result =
                NewtonRaphson::with_config(config).solve(|x| f.eval(x), |x| df.eval(x), x0);
            print_root(&result);
        }

        Command::Linear {
            matrix,
            matrix_file,
            rhs,
            rhs_file,
            method,
            condition_threshold,
        } => {
            let config = LinearSystemConfig::new().with_condition_threshold(condition_threshold);
            config.validate()?;

            let matrix = text_or_file(matrix, matrix_file.as_deref())?;
            let rhs = text_or_file(rhs, rhs_file.as_deref())?;

            let solver = LinearSystemSolver::with_config(config);
            let result = solver.solve_text(&matrix, &rhs, method.into());

            println!("{}", result.message);
            if let Some(x) = &result.solution {
                for (i, value) in x.iter().enumerate() {
                    println!("x{} = {value}", i + 1);
                }
            }
            if let Some(alternative) = result.suggested_method() {
                let flag = match alternative {
                    Method::Svd => "svd",
                    Method::LeastSquares => "least-squares",
                    Method::Elimination => "gauss",
                };
                println!("Rerun with --method {flag} to use {alternative}.");
            }
        }
    }

    Ok(())
}

/// Parse a polynomial and reject constants.
fn parse_function(text: &str) -> Result<Polynomial> {
    let f = Polynomial::parse(text)?;
    f.require_variable()?;
    Ok(f)
}

fn text_or_file(text: Option<String>, path: Option<&Path>) -> Result<String> {
    match (text, path) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => {
            std::fs::read_to_string(path).map_err(|e| CalculoError::FileReadError {
                path: path.display().to_string(),
                source: e,
            })
        }
        (None, None) => Err(CalculoError::EmptyInput { what: "input" }),
    }
}

fn print_root(result: &RootFindResult) {
    println!("{}", result.message());
    match result.root {
        Some(root) => println!("root       = {root}"),
        None => println!("root       = (none)"),
    }
    println!("iterations = {}", result.iterations);
    if let Some(value) = result.value_at_root {
        println!("f(root)    = {value:e}");
    }
    if let Some(error) = result.relative_error {
        println!("rel. error = {error:e}");
    }
}
