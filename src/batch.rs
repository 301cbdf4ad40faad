//! Line-by-line processing of hypergraph files.
//!
//! Each non-blank input line holds one hypergraph in brace notation. For every line that parses,
//! `<line>;<ais>` is written to `<input>_hg_and_ais.txt`, where `<ais>` is the absolute
//! indifference of each vertex in ascending vertex order, e.g. `{1,2};{0,0}`.
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{Error, Result};
use crate::hypergraph::{Hypergraph, Vertex};
use crate::isomorphism::SearchConfig;
use crate::notation::write_list;
use crate::variety::Indifference;

/// Absolute indifferences rendered as `{a,b,c}`
pub struct Indifferences<'a>(pub &'a [(Vertex, usize)]);

impl fmt::Display for Indifferences<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.0.iter().map(|&(_, ai)| ai))
    }
}

/// Summary of one batch run
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BatchReport {
    pub output: PathBuf,
    pub written: usize,
    pub skipped: usize,
}

/// `<input>_hg_and_ais.txt`, next to the input file.
pub fn output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push("_hg_and_ais.txt");
    PathBuf::from(name)
}

/// Parse one line and render its result line, `<line>;<ais>`.
pub fn process_line(line: &str, config: &SearchConfig) -> Result<String> {
    let hg: Hypergraph = line.parse()?;
    let diagnostics = Indifference::with_config(&hg, *config).diagnostics()?;
    Ok(format!("{line};{}", Indifferences(&diagnostics)))
}

/// Process every line of `input`, writing results to [`output_path`].
///
/// A line that fails to parse or to evaluate is logged and skipped; I/O errors abort the run.
pub fn run_file(input: &Path, config: &SearchConfig) -> Result<BatchReport> {
    let reader = File::open(input)
        .map(BufReader::new)
        .map_err(|e| Error::io(input, e))?;

    let output = output_path(input);
    let mut writer = File::create(&output)
        .map(BufWriter::new)
        .map_err(|e| Error::io(&output, e))?;

    info!("processing {} into {}", input.display(), output.display());

    let mut written = 0;
    let mut skipped = 0;
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(input, e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match process_line(line, config) {
            Ok(result) => {
                writeln!(writer, "{result}").map_err(|e| Error::io(&output, e))?;
                written += 1;
            }
            Err(err) => {
                warn!("{}:{}: skipping line: {err}", input.display(), number + 1);
                skipped += 1;
            }
        }
    }
    writer.flush().map_err(|e| Error::io(&output, e))?;

    info!("wrote {written} results, skipped {skipped} lines");
    Ok(BatchReport {
        output,
        written,
        skipped,
    })
}
