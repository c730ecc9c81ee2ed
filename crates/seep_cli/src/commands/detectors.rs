//! Detectors command - lists the compiled detector set.

use seep_core::Detector;
use seep_core::prelude::*;

use crate::ui::{colors, print_command_header, truncate_with_ellipsis};

const DESCRIPTION_TRUNCATE_WIDTH: usize = 52;

/// Lists every detector that would run with the current configuration,
/// optionally with regex and keyword details.
pub fn run(config_path: Option<&std::path::Path>, verbose: bool) -> super::Result {
    print_command_header("detectors");

    let config_path = config_path.unwrap_or(std::path::Path::new(crate::CONFIG_FILENAME));
    let config = Config::load(config_path)?;
    let detectors = crate::scanning::load_detectors(&config)?;

    print_count(detectors.len());
    println!();

    for detector in detectors.detectors() {
        if verbose {
            print_detector_detail(detector);
        } else {
            print_detector_row(detector);
        }
    }

    Ok(())
}

fn print_count(count: usize) {
    println!("{}", colors::muted().apply_to(format!("{count} detectors")));
}

fn print_detector_row(detector: &Detector) {
    println!(
        "  {}  {}",
        colors::accent().apply_to(format!("{:<24}", detector.name)),
        colors::secondary().apply_to(truncate_with_ellipsis(&detector.description, DESCRIPTION_TRUNCATE_WIDTH))
    );
}

fn print_detector_detail(detector: &Detector) {
    println!();
    println!("{}", console::style(detector.name.as_ref()).bold());
    println!("  {}", colors::secondary().apply_to(detector.description.as_ref()));
    println!(
        "  {} {}",
        colors::muted().apply_to("regex"),
        colors::emphasis().apply_to(detector.regex.as_str())
    );

    if detector.keywords.is_empty() {
        println!("  {}", colors::muted().apply_to("keywords (none)"));
    } else {
        let keywords: Vec<&str> = detector.keywords.iter().map(AsRef::as_ref).collect();
        println!(
            "  {} {}",
            colors::muted().apply_to("keywords"),
            colors::emphasis().apply_to(keywords.join(", "))
        );
    }
}
