use std::io::{self, Write};

use anyhow::{Context, Result};

use physval::{HoomdFiles, HoomdParser, Parser, gsd_support};

use crate::cli::HoomdArgs;
use crate::config::load_hoomd_config;
use crate::display::{
    Context as DisplayContext, Progress, print_ensemble, print_observables, print_system,
    print_units,
};
use crate::report::Summary;

const TOTAL_STEPS: u8 = 2;

pub fn run_hoomd(args: HoomdArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Loading parser settings");
    let config = load_hoomd_config(args.config.as_deref())?;
    let settings_substeps = settings_substeps(&args, gsd_support().is_available());
    let settings_ref: Vec<&str> = settings_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Loading parser settings", &settings_ref);

    progress.step("Parsing HOOMD-blue output");
    let parser = HoomdParser::with_config(config);
    let files = HoomdFiles::new(&args.meta, &args.gsd, &args.log);
    let data = parser.get_simulation_data(&files).with_context(|| {
        format!(
            "Failed to parse HOOMD-blue output ({}, {}, {})",
            files.metadata.display(),
            files.trajectory.display(),
            files.log.display()
        )
    })?;

    let summary = Summary::new(parser.backend(), &data);
    let parse_substeps = vec![
        format!("Read {} trajectory frames", summary.system.frames),
        format!("Read {} log samples", summary.samples),
        format!("Classified as {}", summary.ensemble_label()),
    ];
    let parse_ref: Vec<&str> = parse_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Parsing HOOMD-blue output", &parse_ref);

    progress.finish();

    if ctx.interactive {
        print_ensemble(&summary);
        print_system(&summary);
        print_units(&summary);
        print_observables(&summary);
    }

    if args.json {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &summary).context("Failed to write JSON summary")?;
        writeln!(out).context("Failed to write JSON summary")?;
    }

    Ok(())
}

fn settings_substeps(args: &HoomdArgs, gsd_available: bool) -> Vec<String> {
    let source = match &args.config {
        Some(path) => format!("Settings from {}", path.display()),
        None => "Default settings".to_string(),
    };
    let gsd = if gsd_available {
        "GSD trajectory reader available"
    } else {
        "GSD trajectory reader missing"
    };
    vec![source, gsd.to_string()]
}
