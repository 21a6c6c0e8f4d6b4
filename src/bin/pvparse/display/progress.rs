use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Step-wise spinner on stderr; silent when not attached to a terminal.
pub struct Progress {
    spinner: Option<Spinner>,
}

struct Spinner {
    bar: Option<ProgressBar>,
    started: Instant,
    step_started: Instant,
    step: u8,
    total_steps: u8,
}

impl Progress {
    pub fn new(interactive: bool, total_steps: u8) -> Self {
        let now = Instant::now();
        Self {
            spinner: interactive.then(|| Spinner {
                bar: None,
                started: now,
                step_started: now,
                step: 0,
                total_steps,
            }),
        }
    }

    pub fn step(&mut self, description: &str) {
        let Some(spinner) = self.spinner.as_mut() else {
            return;
        };
        spinner.clear();
        spinner.step += 1;
        spinner.step_started = Instant::now();

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            bar.set_style(style.tick_chars(TICK_CHARS));
        }
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_message(format!(
            "[{}/{}] {description}...",
            spinner.step, spinner.total_steps
        ));
        spinner.bar = Some(bar);
    }

    pub fn complete_step(&mut self, description: &str, substeps: &[&str]) {
        let Some(spinner) = self.spinner.as_mut() else {
            return;
        };
        spinner.clear();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
            description,
            spinner.step_started.elapsed().as_secs_f64()
        );
        for substep in substeps {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {substep}");
        }
    }

    pub fn finish(self) {
        let Some(mut spinner) = self.spinner else {
            return;
        };
        spinner.clear();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m Parse complete {:>35}",
            format!("Total: {:.2}s", spinner.started.elapsed().as_secs_f64())
        );
        let _ = writeln!(stderr);
    }
}

impl Spinner {
    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
