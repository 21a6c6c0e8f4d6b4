use std::io::{self, Write};

use anyhow::Error;

use physval::ModelError;
use physval::io::Error as IoError;

use crate::util::text::wrap;

const WIDTH: usize = 59;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();
    let rule = "─".repeat(WIDTH + 3);

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔{}╗", "═".repeat(WIDTH + 3));
    let _ = writeln!(stderr, "   ║  {:<WIDTH$} ║", "✗ Error");
    let _ = writeln!(stderr, "   ╟{rule}╢");

    for line in wrap(&err.to_string(), WIDTH) {
        let _ = writeln!(stderr, "   ║  {:<WIDTH$} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟{rule}╢");
        let _ = writeln!(stderr, "   ║  {:<WIDTH$} ║", "Caused by:");
        for line in wrap(&cause.to_string(), WIDTH - 2) {
            let _ = writeln!(stderr, "   ║    {:<w$} ║", line, w = WIDTH - 2);
        }
    }

    let hints = hints(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟{rule}╢");
        let _ = writeln!(stderr, "   ║  {:<WIDTH$} ║", "Hints:");
        for hint in hints {
            let wrapped = wrap(hint, WIDTH - 4);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<w$} ║", first, w = WIDTH - 4);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<w$} ║", line, w = WIDTH - 4);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚{}╝", "═".repeat(WIDTH + 3));
    let _ = writeln!(stderr);
}

/// Suggestions for the first typed error found in the chain.
fn hints(err: &Error) -> Vec<&'static str> {
    for cause in err.chain() {
        if let Some(io_err) = cause.downcast_ref::<IoError>() {
            return io_hints(io_err);
        }
        if let Some(model_err) = cause.downcast_ref::<ModelError>() {
            return model_hints(model_err);
        }
    }
    Vec::new()
}

fn io_hints(err: &IoError) -> Vec<&'static str> {
    match err {
        IoError::Io { source } => match source.kind() {
            io::ErrorKind::NotFound => vec![
                "Check the --meta, --gsd and --log paths",
                "All three files must exist and be readable",
            ],
            io::ErrorKind::PermissionDenied => vec!["Check file permissions with `ls -la`"],
            _ => vec!["Check file paths, permissions and disk state"],
        },
        IoError::Parse { .. } => vec![
            "Inspect the log around the reported line",
            "Every row must have one value per header column",
        ],
        IoError::Corrupt { .. } => vec![
            "The trajectory may be truncated or still being written",
            "Make sure --gsd points to a GSD file with the 'hoomd' schema",
        ],
        IoError::Metadata(_) => vec!["--meta must be the JSON written by hoomd.meta.dump_metadata"],
        IoError::MissingMetadata { .. } => vec![
            "Dump metadata after the integrator has been set up",
        ],
        IoError::CapabilityMissing { .. } => vec![
            "This build was compiled without the `gsd` feature",
            "Rebuild with `--features gsd`",
        ],
        IoError::IntegratorNotFound => vec![
            "Supported integrators: nvt, berendsen, langevin, npt, nve",
            "Dump metadata after the integrator has been set up",
        ],
        IoError::MissingColumn { .. } => vec![
            "Add the column to the quantities logged by hoomd.analyze.log",
            "Reservoir column names can be changed with --config",
        ],
        IoError::EmptyTrajectory => vec!["The GSD file contains no frames"],
        IoError::Config(_) => vec!["Check the config file for unknown keys or wrong types"],
        IoError::Model(model_err) => model_hints(model_err),
    }
}

fn model_hints(err: &ModelError) -> Vec<&'static str> {
    match err {
        ModelError::FrameParticleCount { .. } | ModelError::AtomCountMismatch { .. } => vec![
            "The particle count changes during the trajectory",
            "Only fixed-size systems can be validated",
        ],
        ModelError::ObservableLength { .. } => {
            vec!["Log columns must all have the same number of samples"]
        }
        ModelError::InvalidMass { .. } => vec!["Particle masses must be positive and finite"],
        ModelError::InvalidTimestep(_) => vec!["The metadata timestep must be positive"],
        _ => Vec::new(),
    }
}
