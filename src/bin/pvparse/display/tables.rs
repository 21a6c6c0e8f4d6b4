use std::io::{self, Write};

use crate::report::Summary;
use crate::util::text::truncate;

const INDENT: &str = "      ";
const TABLE_WIDTH: usize = 56;

pub fn print_ensemble(summary: &Summary) {
    let mut rows = vec![("Backend", summary.backend.clone())];
    match &summary.ensemble {
        Some(ensemble) => {
            rows.push(("Ensemble", ensemble.kind.clone()));
            rows.push(("Atoms", optional(ensemble.natoms.map(|n| n.to_string()))));
            rows.push(("Volume", optional(ensemble.volume.map(number))));
            rows.push(("Pressure", optional(ensemble.pressure.map(number))));
            rows.push(("Temperature", optional(ensemble.temperature.map(number))));
        }
        None => rows.push(("Ensemble", "unknown".to_string())),
    }
    print_kv_table(&mut io::stderr().lock(), "Ensemble", &rows);
}

pub fn print_system(summary: &Summary) {
    let system = &summary.system;
    let rows = [
        ("Atoms", system.natoms.to_string()),
        ("Frames", system.frames.to_string()),
        ("Timestep", number(summary.dt)),
        ("Total mass", number(system.total_mass)),
        ("Constraints", system.nconstraints.to_string()),
        ("Degrees of freedom", system.ndof.to_string()),
    ];
    print_kv_table(&mut io::stderr().lock(), "System", &rows);
}

pub fn print_units(summary: &Summary) {
    let mut rows: Vec<(&str, String)> = summary
        .units
        .iter()
        .map(|u| (u.quantity, format!("{} (×{})", u.name, u.conversion)))
        .collect();
    rows.push(("kB", number(summary.kb)));
    print_kv_table(&mut io::stderr().lock(), "Units", &rows);
}

pub fn print_observables(summary: &Summary) {
    write_observables(&mut io::stderr().lock(), summary);
}

fn write_observables(out: &mut impl Write, summary: &Summary) {
    let name_w = 18usize;
    let col_w = 10usize;
    let rule = |left: &str, mid: &str, right: &str| {
        let cols = vec!["─".repeat(col_w + 2); 4].join(mid);
        format!("{INDENT}{left}{}{mid}{cols}{right}", "─".repeat(name_w + 2))
    };

    let _ = writeln!(
        out,
        "{INDENT}┌─ Observables ({} samples) ─┐",
        summary.samples
    );
    let _ = writeln!(
        out,
        "{INDENT}│ {:<name_w$} │ {:>col_w$} │ {:>col_w$} │ {:>col_w$} │ {:>col_w$} │",
        "Name", "Mean", "Std", "Min", "Max"
    );
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));
    for stats in &summary.observables {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<name_w$} │ {:>col_w$} │ {:>col_w$} │ {:>col_w$} │ {:>col_w$} │",
            truncate(stats.name, name_w),
            number(stats.mean),
            number(stats.std),
            number(stats.min),
            number(stats.max)
        );
    }
    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
    let _ = writeln!(out);
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 18usize;
    let val_w = TABLE_WIDTH.saturating_sub(key_w + 7);

    let _ = writeln!(out, "{INDENT}┌─ {} ─┐", truncate(title, TABLE_WIDTH - 6));
    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<key_w$} │ {:>val_w$} │",
            truncate(key, key_w),
            truncate(val, val_w)
        );
    }
    let _ = writeln!(
        out,
        "{INDENT}└{}┴{}┘",
        "─".repeat(key_w + 2),
        "─".repeat(val_w + 2)
    );
    let _ = writeln!(out);
}

fn optional(value: Option<String>) -> String {
    value.unwrap_or_else(|| "—".to_string())
}

/// Fixed notation for ordinary magnitudes, scientific otherwise.
fn number(x: f64) -> String {
    let abs = x.abs();
    if x == 0.0 || (1e-3..1e6).contains(&abs) {
        format!("{x:.4}")
    } else {
        format!("{x:.3e}")
    }
}
