use std::path::PathBuf;
use structopt::StructOpt;

use crate::countdown::parse_code;

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Create a new countdown timer.
    Add {
        /// The timer label text.
        #[structopt()]
        label: String,

        /// The duration as a DDHHMM code, two digits each for days, hours, minutes.
        #[structopt(parse(try_from_str=parse_code))]
        time: i64,
    },
    /// Replace the label and duration of the timer at a list position.
    Edit {
        #[structopt()]
        position: usize,

        /// The replacement label text.
        #[structopt()]
        label: String,

        /// The replacement DDHHMM code; the countdown restarts from now.
        #[structopt()]
        time: String,
    },
    /// Remove the timer at a list position.
    Rm {
        #[structopt()]
        position: usize,
    },
    /// List all timers with their remaining time.
    List,
    /// Keep the list on screen, redrawn every second.
    Watch,
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "Cuenta",
    about = "A hyper-minimalistic countdown timer tracker."
)]
pub struct CommandLineArgs {
    #[structopt(subcommand)]
    pub action: Command,

    /// Use a different store file.
    #[structopt(parse(from_os_str), short, long)]
    pub store_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_parses_the_code_at_the_boundary() {
        let args =
            CommandLineArgs::from_iter_safe(&["cuenta", "add", "archer tower", "010203"]).unwrap();
        match args.action {
            Command::Add { label, time } => {
                assert_eq!(label, "archer tower");
                assert_eq!(time, 93_780_000);
            }
            other => panic!("parsed into {:?}", other),
        }
    }

    #[test]
    fn add_rejects_a_malformed_code_loudly() {
        assert!(CommandLineArgs::from_iter_safe(&["cuenta", "add", "hut", "abc"]).is_err());
    }

    #[test]
    fn edit_takes_the_code_as_raw_text() {
        // bad codes must reach the store layer to die silently there
        let args =
            CommandLineArgs::from_iter_safe(&["cuenta", "edit", "1", "hut", "nonsense"]).unwrap();
        match args.action {
            Command::Edit { position, label, time } => {
                assert_eq!(position, 1);
                assert_eq!(label, "hut");
                assert_eq!(time, "nonsense");
            }
            other => panic!("parsed into {:?}", other),
        }
    }
}
