//! CLI subcommand modules.
//!
//! This module contains the implementations for all ronda CLI subcommands.

pub(crate) mod analyze;
pub(crate) mod compare;
pub(crate) mod insights;
pub(crate) mod list;
pub(crate) mod ratios;
pub(crate) mod sector;

/// Print a boxed section banner.
pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", title);
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}
