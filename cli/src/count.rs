use std::io::{self, Write};

use anyhow::Error;

use clap::Parser;

use lazyview_core::Source;

use crate::pipeline::Pipeline;

/// Print the number of elements in a view.
#[derive(Debug, Parser)]
pub struct Count {
    #[command(flatten)]
    pipeline: Pipeline,
}

impl Count {
    pub fn run(self) -> Result<(), Error> {
        let view = self.pipeline.build()?;

        let count = view.count();
        log::debug!("View has {count} elements.");

        writeln!(io::stdout().lock(), "{count}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::tests::parse_subcmd;

    #[test]
    fn test_parse_steps_in_order() {
        let args = parse_subcmd::<Count>("lazyview count -x skip:1 values.txt --step take:2");

        assert_eq!(
            args.pipeline.input.as_deref(),
            Some(std::path::Path::new("values.txt"))
        );
        assert_eq!(
            args.pipeline
                .steps
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            ["skip:1", "take:2"]
        );
    }
}
