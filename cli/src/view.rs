use std::io::{self, Write};

use anyhow::Error;

use clap::Parser;

use lazyview_core::{text, SourceExt};

use crate::pipeline::{DynView, Pipeline};

/// Print all elements of a view.
#[derive(Debug, Parser)]
pub struct View {
    #[command(flatten)]
    pipeline: Pipeline,

    /// Delimiter between elements.
    ///
    /// By default, elements are printed one per line.
    #[arg(short = 'd', long, default_value = "\n", hide_default_value = true)]
    delimiter: String,

    /// Precision to use when printing elements.
    #[arg(short = 'p', long, default_value_t = 6, value_name = "INT")]
    precision: usize,
}

impl View {
    pub fn run(self) -> Result<(), Error> {
        let view = self.pipeline.build()?;

        write_view(
            &mut io::stdout().lock(),
            &view,
            &self.delimiter,
            self.precision,
        )
    }
}

fn write_view<W>(
    writer: &mut W,
    view: &DynView,
    delimiter: &str,
    precision: usize,
) -> Result<(), Error>
where
    W: Write,
{
    let values = view.collect_values()?;
    log::debug!("Evaluated {} elements.", values.len());

    text::write_values(writer, values, delimiter, precision)?;

    Ok(())
}
