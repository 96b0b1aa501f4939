//! The populated control-file model.
//!
//! [ControlConfig] starts out with fixed defaults; the interpreter overwrites
//! only the fields whose options appear in the file. Once returned it is
//! plain read-only data for whoever drives the analysis.

use crate::model::RootedTree;
use crate::newick;
use crate::parser::{ParsingError, ParsingErrorType};
use serde::Serialize;
use std::fmt;
use strum::{Display, EnumString};

/// Instruction set for likelihood kernels (`arch`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Cpu,
    Sse,
    Avx,
    Avx2,
}

/// Inverse-gamma prior `IG(alpha, beta)` (`thetaprior`, `tauprior`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct InvGammaPrior {
    pub alpha: f64,
    pub beta: f64,
}

/// How population sizes are handled by the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThetaEstimate {
    /// Thetas are sampled in the MCMC.
    #[default]
    Sampled,
    /// Thetas are integrated out analytically (`E` marker on `thetaprior`).
    Analytical,
}

/// Step sizes of the MCMC proposals, in `finetune` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinetuneSteps {
    pub gene_tree_age: f64,
    pub gene_tree_spr: f64,
    pub theta: f64,
    pub tau: f64,
    pub mix: f64,
    pub locus_rate: f64,
    pub sequence_error: f64,
}

impl Default for FinetuneSteps {
    fn default() -> Self {
        Self {
            gene_tree_age: 5.0,
            gene_tree_spr: 0.001,
            theta: 0.001,
            tau: 0.001,
            mix: 0.3,
            locus_rate: 0.33,
            sequence_error: 0.001,
        }
    }
}

/// The `finetune` record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Finetune {
    /// Whether step sizes are reset (adapted) during burn-in
    pub reset: bool,
    pub steps: FinetuneSteps,
}

/// The `print` record: which quantities are written to the sample file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrintFlags {
    pub samples: i64,
    pub locus_rate: i64,
    pub heredity_scalars: i64,
    pub gene_trees: i64,
}

impl Default for PrintFlags {
    fn default() -> Self {
        Self {
            samples: 1,
            locus_rate: 0,
            heredity_scalars: 0,
            gene_trees: 0,
        }
    }
}

/// The `speciestree` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeciesTreeMode {
    /// `0`: species tree topology is fixed
    #[default]
    Fixed,
    /// `1`: species tree topology is sampled
    Estimated,
}

/// The `speciesmodelprior` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesModelPrior {
    /// `0`: uniform prior on labelled histories
    LabeledHistories,
    /// `1`: uniform prior on rooted trees
    #[default]
    RootedTrees,
}

/// The `speciesdelimitation` record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SpeciesDelimitation {
    /// `0`: delimitation is fixed
    #[default]
    Fixed,
    /// `1 0 epsilon`: rjMCMC algorithm 0
    Algorithm0 { epsilon: f64 },
    /// `1 1 alpha mean`: rjMCMC algorithm 1
    Algorithm1 { alpha: f64, mean: f64 },
}

/// Ordered taxon labels declared by a `species&tree` record.
///
/// Displays as the comma-joined label sequence.
///
/// # Example
/// ```
/// use bppctl::control::ReorderList;
///
/// let list = ReorderList::from(vec!["A".to_string(), "B".to_string()]);
/// assert_eq!(list.to_string(), "A,B");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ReorderList(Vec<String>);

impl ReorderList {
    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for ReorderList {
    fn from(labels: Vec<String>) -> Self {
        ReorderList(labels)
    }
}

impl fmt::Display for ReorderList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

/// The multi-line `species&tree` record: declared species and the species
/// tree as raw Newick text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesAndTree {
    pub reorder: ReorderList,
    pub newick: String,
}

impl SpeciesAndTree {
    /// Builds the species tree from the captured Newick text.
    ///
    /// # Errors
    /// A Newick parsing error, or [ParsingErrorType::SpeciesMismatch] if the
    /// tree's leaves are not exactly the declared species.
    ///
    /// # Example
    /// ```
    /// use bppctl::control::{ReorderList, SpeciesAndTree};
    ///
    /// let record = SpeciesAndTree {
    ///     reorder: ReorderList::from(vec!["A".into(), "B".into(), "C".into()]),
    ///     newick: "((A:1,B:1):1,C:2):0;".to_string(),
    /// };
    /// let tree = record.species_tree().unwrap();
    /// assert_eq!(tree.num_leaves(), 3);
    /// ```
    pub fn species_tree(&self) -> Result<RootedTree, ParsingError> {
        let tree = newick::parse_str(&self.newick)?;

        let mut leaves = tree.leaf_labels();
        let mut declared: Vec<&str> = self.reorder.labels().iter().map(String::as_str).collect();
        leaves.sort_unstable();
        declared.sort_unstable();

        if leaves != declared {
            return Err(ParsingError::without_context(ParsingErrorType::SpeciesMismatch(
                format!(
                    "declared {}, tree has {}",
                    self.reorder,
                    tree.leaf_labels().join(",")
                ),
            )));
        }

        Ok(tree)
    }
}

// =#========================================================================#=
// CONTROL CONFIG
// =#========================================================================#=
/// Everything a control file can set, with defaults for what it does not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlConfig {
    /// Random seed; `seed = -1` in the file is replaced by the clock
    pub seed: i64,
    /// `None` selects the best instruction set at runtime
    pub arch: Option<Arch>,
    pub locus_count: u64,
    pub print: PrintFlags,
    pub burnin: u64,
    pub seqfile: Option<String>,
    pub outfile: Option<String>,
    pub imapfile: Option<String>,
    pub mcmcfile: Option<String>,
    pub usedata: bool,
    pub cleandata: bool,
    pub nsample: u64,
    pub sampfreq: u64,
    pub theta_prior: InvGammaPrior,
    pub theta_estimate: ThetaEstimate,
    pub tau_prior: InvGammaPrior,
    pub finetune: Finetune,
    pub species_tree: SpeciesTreeMode,
    pub species_model_prior: SpeciesModelPrior,
    pub species_delimitation: SpeciesDelimitation,
    pub species_and_tree: Option<SpeciesAndTree>,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            seed: -1,
            arch: None,
            locus_count: 0,
            print: PrintFlags::default(),
            burnin: 100,
            seqfile: None,
            outfile: None,
            imapfile: None,
            mcmcfile: None,
            usedata: true,
            cleandata: false,
            nsample: 0,
            sampfreq: 10,
            theta_prior: InvGammaPrior::default(),
            theta_estimate: ThetaEstimate::default(),
            tau_prior: InvGammaPrior::default(),
            finetune: Finetune::default(),
            species_tree: SpeciesTreeMode::default(),
            species_model_prior: SpeciesModelPrior::default(),
            species_delimitation: SpeciesDelimitation::default(),
            species_and_tree: None,
        }
    }
}

impl ControlConfig {
    /// The species tree declared by the `species&tree` record, if any.
    ///
    /// See [SpeciesAndTree::species_tree].
    pub fn build_species_tree(&self) -> Option<Result<RootedTree, ParsingError>> {
        self.species_and_tree.as_ref().map(SpeciesAndTree::species_tree)
    }
}
