//! Control-file interpreter.
//!
//! A control file is a line-oriented list of `key = value` options with
//! `*`/`#` comments:
//!
//! ```text
//! seed = -1
//! seqfile = data/frogs.txt
//! thetaprior = 3 0.002 E     * integrate thetas out
//! species&tree = 3 A B C
//!                  5 5 5
//!                ((A, B), C);
//! ```
//!
//! [ControlFileParser] reads such a file in a single pass and returns a
//! [ControlConfig]. Keys are matched case-insensitively, unknown keys are
//! skipped, and every malformed value of a known key is a fatal
//! [ParsingError] naming the option and the 1-based line.
//!
//! The `species&tree` record spans three physical lines: the key line with
//! the species count and labels, one line that is read and ignored, and the
//! species tree as a Newick string.

pub mod config;
pub mod extractor;
pub mod grammar;
pub mod keys;

pub use config::{
    Arch, ControlConfig, Finetune, FinetuneSteps, InvGammaPrior, PrintFlags, ReorderList,
    SpeciesAndTree, SpeciesDelimitation, SpeciesModelPrior, SpeciesTreeMode, ThetaEstimate,
};
pub use extractor::{LineKind, classify};
pub use keys::ControlKey;

use crate::parser::fields::get_string;
use crate::parser::{LineReader, ParsingError, ParsingErrorType};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, trace};

// =#========================================================================#=
// CONTROL FILE PARSER
// =#========================================================================#=
/// Single-pass interpreter of a control file.
///
/// # Example
/// ```
/// use bppctl::control::{ControlFileParser, ThetaEstimate};
///
/// let text = "burnin = 2000\nthetaprior = 3 0.002 E\nthreads = 4\n";
/// let config = ControlFileParser::new(text.as_bytes(), "inline.ctl").parse().unwrap();
/// assert_eq!(config.burnin, 2000);
/// assert_eq!(config.theta_estimate, ThetaEstimate::Analytical);
/// ```
pub struct ControlFileParser<R: Read> {
    reader: LineReader<R>,
    /// Name used in diagnostics
    file_name: String,
}

impl ControlFileParser<File> {
    /// Opens the control file at `path`.
    ///
    /// # Errors
    /// Returns an IO error naming the file if it cannot be opened.
    pub fn for_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let path = path.as_ref();
        let reader = LineReader::from_file(path)?;
        Ok(Self {
            reader,
            file_name: path.display().to_string(),
        })
    }
}

impl<R: Read> ControlFileParser<R> {
    /// Creates an interpreter over `reader`; `file_name` only appears in
    /// error messages and logs.
    pub fn new<S: Into<String>>(reader: R, file_name: S) -> Self {
        Self {
            reader: LineReader::new(reader),
            file_name: file_name.into(),
        }
    }

    /// Reads the whole file and returns the populated configuration.
    ///
    /// # Errors
    /// The first violation found: a line without `=`, a recognized option
    /// whose value does not match its grammar or range, an unimplemented
    /// option, an incomplete `species&tree` record, or a read failure.
    pub fn parse(mut self) -> Result<ControlConfig, ParsingError> {
        let mut config = ControlConfig::default();

        while let Some(line) = self.read_line()? {
            let line = line.to_string();
            let line_number = self.reader.line_number();

            match classify(&line) {
                LineKind::Blank => {}
                LineKind::Malformed => {
                    return Err(self.error(ParsingErrorType::MissingAssignment, line_number));
                }
                LineKind::KeyValue { key, value } => match ControlKey::from_str(key) {
                    Ok(control_key) => {
                        self.apply(&mut config, control_key, key, value, line_number)?;
                        debug!(option = %control_key, line = line_number, "applied option");
                    }
                    Err(_) => trace!(key, line = line_number, "skipping unknown option"),
                },
            }
        }

        info!(
            file = %self.file_name,
            lines = self.reader.line_number(),
            "control file loaded"
        );
        Ok(config)
    }

    /// Parses `value` with the grammar of `control_key` and stores the result.
    fn apply(
        &mut self,
        config: &mut ControlConfig,
        control_key: ControlKey,
        key: &str,
        value: &str,
        line: usize,
    ) -> Result<(), ParsingError> {
        let invalid = |expected: &'static str| {
            ParsingError::invalid_option(control_key.as_ref(), expected, &self.file_name, line)
        };

        match control_key {
            ControlKey::Seed => {
                let seed = grammar::parse_single_long(value).ok_or_else(|| invalid("expects one integer"))?;
                config.seed = if seed == -1 { clock_seed() } else { seed };
            }
            ControlKey::Arch => {
                let name = grammar::parse_string(value).ok_or_else(|| invalid("expects a string"))?;
                let arch = Arch::from_str(name)
                    .map_err(|_| self.error(ParsingErrorType::InvalidArch(name.to_string()), line))?;
                config.arch = Some(arch);
            }
            ControlKey::Nloci => {
                config.locus_count = grammar::parse_single_long(value)
                    .filter(|&n| n >= 1)
                    .and_then(|n| u64::try_from(n).ok())
                    .ok_or_else(|| invalid("expects one positive integer"))?;
            }
            ControlKey::Print => {
                config.print = grammar::parse_print(value).ok_or_else(|| invalid("expects four integers"))?;
            }
            ControlKey::Burnin => {
                config.burnin = grammar::parse_single_long(value)
                    .and_then(|n| u64::try_from(n).ok())
                    .ok_or_else(|| invalid("expects one positive (or zero) integer"))?;
            }
            ControlKey::Seqfile => config.seqfile = Some(self.file_option(value, &invalid)?),
            ControlKey::Outfile => config.outfile = Some(self.file_option(value, &invalid)?),
            ControlKey::Imapfile => config.imapfile = Some(self.file_option(value, &invalid)?),
            ControlKey::Mcmcfile => config.mcmcfile = Some(self.file_option(value, &invalid)?),
            ControlKey::Usedata => {
                config.usedata = parse_bit(value).ok_or_else(|| invalid("expects value 0 or 1"))?;
            }
            ControlKey::Cleandata => {
                config.cleandata = parse_bit(value).ok_or_else(|| invalid("expects value 0 or 1"))?;
            }
            ControlKey::Nsample => {
                config.nsample = parse_positive(value).ok_or_else(|| invalid("expects a positive integer"))?;
            }
            ControlKey::Sampfreq => {
                config.sampfreq = parse_positive(value).ok_or_else(|| invalid("expects a positive integer"))?;
            }
            ControlKey::Thetaprior => {
                let (prior, estimate) = grammar::parse_theta_prior(value)
                    .ok_or_else(|| invalid("expects two doubles and an optional 'E'"))?;
                config.theta_prior = prior;
                if let Some(estimate) = estimate {
                    config.theta_estimate = estimate;
                }
            }
            ControlKey::Tauprior => {
                config.tau_prior = grammar::parse_tau_prior(value).ok_or_else(|| invalid("expects two doubles"))?;
            }
            ControlKey::Finetune => {
                config.finetune = grammar::parse_finetune(value).ok_or_else(|| invalid("in wrong format"))?;
            }
            ControlKey::Speciestree => {
                config.species_tree = grammar::parse_species_tree(value).ok_or_else(|| invalid("in wrong format"))?;
            }
            ControlKey::Speciesmodelprior => {
                config.species_model_prior = match grammar::parse_single_long(value) {
                    Some(0) => SpeciesModelPrior::LabeledHistories,
                    Some(1) => SpeciesModelPrior::RootedTrees,
                    _ => return Err(invalid("expects value 0 or 1")),
                };
            }
            ControlKey::Speciesdelimitation => {
                config.species_delimitation =
                    grammar::parse_species_delimitation(value).ok_or_else(|| invalid("in wrong format"))?;
            }
            ControlKey::SpeciesAndTree => {
                let reorder = grammar::parse_species_header(value).ok_or_else(|| invalid("in wrong format"))?;
                let newick = self.read_species_tree_lines()?;
                debug!(species = %reorder, newick = %newick, "species&tree record");
                config.species_and_tree = Some(SpeciesAndTree { reorder, newick });
            }
            ControlKey::Heredity | ControlKey::Locusrate | ControlKey::Sequenceerror => {
                return Err(self.error(ParsingErrorType::NotImplemented(key.to_string()), line));
            }
        }

        Ok(())
    }

    /// Consumes the two continuation lines of a `species&tree` record and
    /// returns the Newick text of the second one.
    fn read_species_tree_lines(&mut self) -> Result<String, ParsingError> {
        // species sizes, not used
        if self.read_line()?.is_none() {
            let line = self.reader.line_number();
            return Err(self.error(ParsingErrorType::IncompleteSpeciesAndTree, line));
        }

        let newick = self.read_line()?.map(|line| get_string(line).map(|(_, s)| s.to_string()));
        let line = self.reader.line_number();
        match newick {
            None => Err(self.error(ParsingErrorType::IncompleteSpeciesAndTree, line)),
            Some(None) => Err(self.error(ParsingErrorType::MissingNewick, line)),
            Some(Some(newick)) => Ok(newick),
        }
    }

    /// Reads the next line; a read failure is reported at the line that
    /// could not be read.
    fn read_line(&mut self) -> Result<Option<&str>, ParsingError> {
        let line = self.reader.line_number() + 1;
        let file_name = &self.file_name;
        self.reader.next_line().map_err(|err| {
            ParsingError::at_line(ParsingErrorType::IoError(err.to_string()), file_name, line)
        })
    }

    fn file_option<F>(&self, value: &str, invalid: &F) -> Result<String, ParsingError>
    where
        F: Fn(&'static str) -> ParsingError,
    {
        grammar::parse_string(value)
            .map(str::to_string)
            .ok_or_else(|| invalid("expects a string"))
    }

    fn error(&self, kind: ParsingErrorType, line: usize) -> ParsingError {
        ParsingError::at_line(kind, &self.file_name, line)
    }
}

/// One integer that must be 0 or 1.
fn parse_bit(value: &str) -> Option<bool> {
    match grammar::parse_single_long(value)? {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

/// One integer that must be strictly positive.
fn parse_positive(value: &str) -> Option<u64> {
    grammar::parse_single_long(value)
        .filter(|&n| n > 0)
        .and_then(|n| u64::try_from(n).ok())
}

/// Seconds since the UNIX epoch, the seed used for `seed = -1`.
fn clock_seed() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() as i64)
}
