use std::{fmt, path::PathBuf, str::FromStr};

use anyhow::Error;

use clap::Args;

use lazyview_core::{text, Input, OutOfRange, Source, SourceExt};

/// A view of numbers built from the command line.
pub type DynView = Box<dyn Source<Item = f64, Error = EvalError>>;

/// Input and steps shared by all subcommands.
#[derive(Args, Debug)]
pub struct Pipeline {
    /// Input values.
    ///
    /// Numbers separated by whitespace or commas, optionally gzipped. Lines starting with '#' are
    /// ignored. If no file is provided, stdin will be used.
    #[arg(value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Step to add to the view.
    ///
    /// Steps are applied in the order given, and nothing is evaluated until an element is
    /// requested. Arithmetic: 'add:N', 'sub:N', 'mul:N', 'div:N', 'neg', 'abs', 'sqrt'.
    /// Windowing: 'skip:N', 'take:N', 'window:OFFSET:LENGTH'. Memoization: 'cache'.
    #[arg(short = 'x', long = "step", value_name = "STEP")]
    pub steps: Vec<Step>,
}

impl Pipeline {
    /// Reads the input and builds the view.
    pub fn build(&self) -> Result<DynView, Error> {
        let input = Input::new(self.input.clone())?;
        let values = text::parse_values(&input.read_to_string()?)?;

        match input.as_path() {
            Some(path) => log::info!("Read {} values from {}.", values.len(), path.display()),
            None => log::info!("Read {} values from stdin.", values.len()),
        }

        Ok(self.build_from(values))
    }

    /// Builds the view over the provided values.
    pub fn build_from(&self, values: Vec<f64>) -> DynView {
        // Lift the source into the error type shared by all steps
        let source: DynView = Box::new(values.try_map(Ok::<f64, EvalError>));

        self.steps.iter().fold(source, |view, step| {
            log::debug!("Adding step '{step}' to view.");
            step.apply(view)
        })
    }
}

/// A single step in a pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Add(f64),
    Sub(f64),
    Mul(f64),
    Div(f64),
    Neg,
    Abs,
    Sqrt,
    Skip(usize),
    Take(usize),
    Window { offset: usize, length: usize },
    Cache,
}

impl Step {
    /// Stacks the step on top of a view.
    pub fn apply(self, view: DynView) -> DynView {
        match self {
            Step::Add(n) => Box::new(view.map(traced(self, move |x| x + n))),
            Step::Sub(n) => Box::new(view.map(traced(self, move |x| x - n))),
            Step::Mul(n) => Box::new(view.map(traced(self, move |x| x * n))),
            Step::Div(n) => Box::new(view.try_map(traced(self, move |x| {
                if n == 0.0 {
                    Err(EvalError::DivideByZero { value: x })
                } else {
                    Ok(x / n)
                }
            }))),
            Step::Neg => Box::new(view.map(traced(self, |x: f64| -x))),
            Step::Abs => Box::new(view.map(traced(self, f64::abs))),
            Step::Sqrt => Box::new(view.try_map(traced(self, |x: f64| {
                if x < 0.0 {
                    Err(EvalError::NegativeSqrt { value: x })
                } else {
                    Ok(x.sqrt())
                }
            }))),
            Step::Skip(n) => Box::new(view.skip(n)),
            Step::Take(n) => Box::new(view.take(n)),
            Step::Window { offset, length } => Box::new(view.window(offset, length)),
            Step::Cache => Box::new(view.cached()),
        }
    }
}

/// Wraps a transform so that every invocation is logged.
fn traced<T, F>(step: Step, f: F) -> impl Fn(f64) -> T
where
    T: fmt::Debug,
    F: Fn(f64) -> T,
{
    move |x| {
        let y = f(x);
        log::trace!("Evaluated step '{step}' on {x}: {y:?}.");
        y
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Add(n) => write!(f, "add:{n}"),
            Step::Sub(n) => write!(f, "sub:{n}"),
            Step::Mul(n) => write!(f, "mul:{n}"),
            Step::Div(n) => write!(f, "div:{n}"),
            Step::Neg => f.write_str("neg"),
            Step::Abs => f.write_str("abs"),
            Step::Sqrt => f.write_str("sqrt"),
            Step::Skip(n) => write!(f, "skip:{n}"),
            Step::Take(n) => write!(f, "take:{n}"),
            Step::Window { offset, length } => write!(f, "window:{offset}:{length}"),
            Step::Cache => f.write_str("cache"),
        }
    }
}

impl FromStr for Step {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseStepError(String::from(s));

        fn arg<T: FromStr>(s: Option<&str>) -> Option<T> {
            s.and_then(|s| T::from_str(s).ok())
        }

        let mut parts = s.split(':');
        let name = parts.next().ok_or_else(err)?;
        let (first, second) = (parts.next(), parts.next());
        if parts.next().is_some() {
            return Err(err());
        }

        let step = match (name, first, second) {
            ("add", Some(_), None) => arg(first).map(Step::Add),
            ("sub", Some(_), None) => arg(first).map(Step::Sub),
            ("mul", Some(_), None) => arg(first).map(Step::Mul),
            ("div", Some(_), None) => arg(first).map(Step::Div),
            ("neg", None, None) => Some(Step::Neg),
            ("abs", None, None) => Some(Step::Abs),
            ("sqrt", None, None) => Some(Step::Sqrt),
            ("skip", Some(_), None) => arg(first).map(Step::Skip),
            ("take", Some(_), None) => arg(first).map(Step::Take),
            ("window", Some(_), Some(_)) => arg(first)
                .zip(arg(second))
                .map(|(offset, length)| Step::Window { offset, length }),
            ("cache", None, None) => Some(Step::Cache),
            _ => None,
        };

        step.ok_or_else(err)
    }
}

/// An error associated with parsing a step.
#[derive(Debug)]
pub struct ParseStepError(String);

impl fmt::Display for ParseStepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse '{}' as step", self.0)
    }
}

impl std::error::Error for ParseStepError {}

/// An error raised when evaluating an element of a view.
#[derive(Debug, PartialEq)]
pub enum EvalError {
    DivideByZero { value: f64 },
    NegativeSqrt { value: f64 },
    OutOfRange(OutOfRange),
}

impl From<OutOfRange> for EvalError {
    fn from(e: OutOfRange) -> Self {
        Self::OutOfRange(e)
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DivideByZero { value } => write!(f, "cannot divide {value} by zero"),
            EvalError::NegativeSqrt { value } => {
                write!(f, "cannot take square root of negative value {value}")
            }
            EvalError::OutOfRange(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for EvalError {}
