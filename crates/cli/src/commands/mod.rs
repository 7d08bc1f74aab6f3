pub mod sample_config;
pub mod scan;

use clap::Subcommand;
pub use scan::ScanArgs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan the configured roots and write one EFU manifest into each.
    ///
    /// Example:
    ///   efulist scan
    ///   efulist scan /etc/efulist/disks.json /etc/efulist/nas.json
    Scan(ScanArgs),

    /// Print a sample config file to stdout.
    SampleConfig,
}
