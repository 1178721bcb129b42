//! Human-readable result reports.

use castsim_core::{SimMetrics, TrialSummary};
use console::style;

pub fn print_run(name: &str, metrics: &SimMetrics, seconds: u64) {
    print_header(name);

    println!("{}", style("Damage:").bold().yellow());
    println!("  Total: {:.0}", metrics.total_damage);
    println!("  DPS: {:.1}", metrics.dps(seconds));
    println!();

    println!("{}", style("Casts:").bold().yellow());
    println!("  Hits: {}", metrics.casts.len());
    println!("  Crits: {}", metrics.crits());
    println!("  Procs: {}", metrics.procs());
    println!("  Misses: {}", metrics.misses);
    println!();

    println!("{}", style("Mana:").bold().yellow());
    match metrics.oom_event() {
        Some(oom) => println!(
            "  Out of mana at {}s with {:.0} damage dealt",
            oom.at_second, oom.damage
        ),
        None => println!("  Never ran out of mana"),
    }
    println!("  Ending mana: {:.0}", metrics.ending_mana);
}

pub fn print_trials(name: &str, summary: &TrialSummary) {
    print_header(name);

    println!(
        "{} {} x {}s",
        style("Trials:").bold().cyan(),
        summary.trials,
        summary.duration_secs
    );
    println!();

    println!("{}", style("Damage:").bold().yellow());
    println!("  Mean: {:.0}", summary.mean_damage);
    println!("  Min: {:.0}", summary.min_damage);
    println!("  Max: {:.0}", summary.max_damage);
    println!("  Std dev: {:.1}", summary.std_dev_damage);
    println!("  Mean DPS: {:.1}", summary.mean_dps);
    println!();

    println!("{}", style("Mana:").bold().yellow());
    println!("  OOM rate: {:.1}%", summary.oom_rate * 100.0);
    println!("  Mean ending mana: {:.0}", summary.mean_ending_mana);
}

fn print_header(name: &str) {
    let title = if name.is_empty() { "scenario" } else { name };
    println!("{}", style(format!("=== {title} ===")).bold().green());
    println!();
}
