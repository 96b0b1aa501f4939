//! Recognized control-file option names.

use strum::{AsRefStr, Display, EnumString};

/// An option key the interpreter knows how to handle.
///
/// Matching is case-insensitive; anything else is not a [ControlKey] and is
/// skipped by the interpreter.
///
/// # Example
/// ```
/// use bppctl::control::ControlKey;
/// use std::str::FromStr;
///
/// assert_eq!(ControlKey::from_str("SeqFile"), Ok(ControlKey::Seqfile));
/// assert_eq!(ControlKey::from_str("species&tree"), Ok(ControlKey::SpeciesAndTree));
/// assert!(ControlKey::from_str("threads").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ControlKey {
    Seed,
    Arch,
    Nloci,
    Print,
    Burnin,
    Seqfile,
    Outfile,
    Usedata,
    Nsample,
    Imapfile,
    Mcmcfile,
    Tauprior,
    Heredity,
    Finetune,
    Sampfreq,
    Cleandata,
    Locusrate,
    Thetaprior,
    Speciestree,
    #[strum(serialize = "species&tree")]
    SpeciesAndTree,
    Sequenceerror,
    Speciesmodelprior,
    Speciesdelimitation,
}
