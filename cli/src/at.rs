use std::io::{self, Write};

use anyhow::Error;

use clap::Parser;

use lazyview_core::Source;

use crate::pipeline::{DynView, Pipeline};

/// Print elements of a view by index.
#[derive(Debug, Parser)]
pub struct At {
    #[command(flatten)]
    pipeline: Pipeline,

    /// Indices of elements to print.
    ///
    /// Use comma to separate indices, or pass the option multiple times. Elements are printed in
    /// the order given, one per line. Indices outside the view, including negative indices, cause
    /// an error.
    #[arg(
        short = 'n',
        long = "index",
        required = true,
        use_value_delimiter = true,
        allow_negative_numbers = true,
        value_name = "INT,..."
    )]
    indices: Vec<isize>,

    /// Precision to use when printing elements.
    #[arg(short = 'p', long, default_value_t = 6, value_name = "INT")]
    precision: usize,
}

impl At {
    pub fn run(self) -> Result<(), Error> {
        let view = self.pipeline.build()?;

        write_at(
            &mut io::stdout().lock(),
            &view,
            &self.indices,
            self.precision,
        )
    }
}

fn write_at<W>(
    writer: &mut W,
    view: &DynView,
    indices: &[isize],
    precision: usize,
) -> Result<(), Error>
where
    W: Write,
{
    for &index in indices {
        let value = view.at_signed(index)?;
        log::debug!("Accessed element {index}.");

        writeln!(writer, "{value:.precision$}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{pipeline::Step, tests::parse_subcmd};

    fn view() -> DynView {
        Pipeline {
            input: None,
            steps: vec![Step::Mul(2.), Step::Skip(1)],
        }
        .build_from(vec![1., 2., 3.])
    }

    #[test]
    fn test_parse_indices() {
        let args = parse_subcmd::<At>("lazyview at -n 0,2 --index -1 -x neg");

        assert_eq!(args.indices, vec![0, 2, -1]);
        assert_eq!(args.pipeline.steps, vec![Step::Neg]);
    }

    #[test]
    fn test_write_at() -> Result<(), Error> {
        let mut dest = Vec::new();
        write_at(&mut dest, &view(), &[1, 0, 1], 1)?;

        assert_eq!(dest, b"6.0\n4.0\n6.0\n");

        Ok(())
    }

    #[test]
    fn test_write_at_out_of_range() {
        let mut dest = Vec::new();
        let result = write_at(&mut dest, &view(), &[0, -1], 0);

        assert_eq!(dest, b"4\n");
        assert_eq!(
            result.unwrap_err().to_string(),
            "index -1 out of range for view with 2 elements"
        );
    }
}
