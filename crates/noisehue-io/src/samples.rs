//! Text sample file reading and writing.

use crate::{Error, Result};
use noisehue_analysis::SampleSeries;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Parse raw samples from a reader, one unsigned integer per line.
///
/// Surrounding whitespace is ignored, as are blank lines and lines starting
/// with `#`. Range checking is left to normalization.
pub fn parse_samples<R: BufRead>(reader: R) -> Result<Vec<u32>> {
    let mut samples = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let value = trimmed.parse::<u32>().map_err(|_| Error::Parse {
            line: index + 1,
            content: trimmed.to_string(),
        })?;
        samples.push(value);
    }

    if samples.is_empty() {
        return Err(Error::Empty);
    }
    Ok(samples)
}

/// Read raw samples from a text file.
///
/// # Example
/// ```ignore
/// let raw = read_samples("noise.txt")?;
/// println!("Loaded {} samples", raw.len());
/// ```
pub fn read_samples<P: AsRef<Path>>(path: P) -> Result<Vec<u32>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let samples = parse_samples(BufReader::new(file))?;

    tracing::info!(count = samples.len(), path = %path.display(), "loaded samples");
    Ok(samples)
}

/// Read a sample file and normalize it into a [`SampleSeries`].
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<SampleSeries> {
    let raw = read_samples(path)?;
    Ok(SampleSeries::from_raw(&raw)?)
}

/// Write raw samples to a text file, one per line.
pub fn write_samples<P: AsRef<Path>>(path: P, samples: &[u16]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    for sample in samples {
        writeln!(writer, "{sample}")?;
    }
    writer.flush()?;

    tracing::info!(count = samples.len(), path = %path.display(), "wrote samples");
    Ok(())
}
