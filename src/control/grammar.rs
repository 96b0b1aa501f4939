//! Record grammars: the field sequence expected after each option's `=`.
//!
//! Every grammar walks one value with a [ValueCursor] and returns `None`
//! unless all required fields parse and nothing but whitespace or a comment
//! is left. The interpreter turns `None` into a fatal error for the option.

use crate::control::config::{
    Finetune, FinetuneSteps, InvGammaPrior, PrintFlags, ReorderList, SpeciesDelimitation,
    SpeciesTreeMode, ThetaEstimate,
};
use crate::parser::fields::{Flag, ValueCursor, get_string};

/// Separators between the labels of a `species&tree` record.
const LABEL_SEPARATORS: &[char] = &[' ', '\t', '\n', '\r'];

/// One integer.
pub fn parse_single_long(value: &str) -> Option<i64> {
    let mut cursor = ValueCursor::new(value);
    let number = cursor.long()?;
    cursor.is_exhausted().then_some(number)
}

/// A string up to the first comment marker, trimmed.
pub fn parse_string(value: &str) -> Option<&str> {
    get_string(value).map(|(_, text)| text)
}

/// `alpha beta [E]`.
///
/// The estimate is `None` if the flag is absent; any token other than `E`
/// fails the record.
///
/// # Example
/// ```
/// use bppctl::control::grammar::parse_theta_prior;
/// use bppctl::control::ThetaEstimate;
///
/// let (prior, estimate) = parse_theta_prior(" 2.0 3.0 E").unwrap();
/// assert_eq!((prior.alpha, prior.beta), (2.0, 3.0));
/// assert_eq!(estimate, Some(ThetaEstimate::Analytical));
/// assert!(parse_theta_prior(" 2.0 3.0 X").is_none());
/// ```
pub fn parse_theta_prior(value: &str) -> Option<(InvGammaPrior, Option<ThetaEstimate>)> {
    let mut cursor = ValueCursor::new(value);
    let alpha = cursor.double()?;
    let beta = cursor.double()?;

    let estimate = match cursor.e_flag() {
        Flag::Absent => None,
        Flag::Present => Some(ThetaEstimate::Analytical),
        Flag::Invalid => return None,
    };

    cursor
        .is_exhausted()
        .then_some((InvGammaPrior { alpha, beta }, estimate))
}

/// `alpha beta`.
pub fn parse_tau_prior(value: &str) -> Option<InvGammaPrior> {
    let mut cursor = ValueCursor::new(value);
    let alpha = cursor.double()?;
    let beta = cursor.double()?;
    cursor.is_exhausted().then_some(InvGammaPrior { alpha, beta })
}

/// `0|1 : gtage gtspr theta tau mix locusrate seqerr`.
///
/// The reset digit is a single character; whitespace may separate it from
/// the colon.
///
/// # Example
/// ```
/// use bppctl::control::grammar::parse_finetune;
///
/// let finetune = parse_finetune(" 1: 5 0.001 0.001 0.001 0.3 0.33 0.001").unwrap();
/// assert!(finetune.reset);
/// assert_eq!(finetune.steps.mix, 0.3);
/// assert!(parse_finetune(" 1: 5 0.001 0.001 0.001 0.3 0.33").is_none());
/// ```
pub fn parse_finetune(value: &str) -> Option<Finetune> {
    let mut cursor = ValueCursor::new(value);

    cursor.skip_whitespace();
    let reset = if cursor.consume_char(b'1') {
        true
    } else if cursor.consume_char(b'0') {
        false
    } else {
        return None;
    };

    cursor.skip_whitespace();
    if !cursor.consume_char(b':') {
        return None;
    }

    let steps = FinetuneSteps {
        gene_tree_age: cursor.double()?,
        gene_tree_spr: cursor.double()?,
        theta: cursor.double()?,
        tau: cursor.double()?,
        mix: cursor.double()?,
        locus_rate: cursor.double()?,
        sequence_error: cursor.double()?,
    };

    cursor.is_exhausted().then_some(Finetune { reset, steps })
}

/// `samples locusrate hscalars genetrees`.
pub fn parse_print(value: &str) -> Option<PrintFlags> {
    let mut cursor = ValueCursor::new(value);
    let flags = PrintFlags {
        samples: cursor.long()?,
        locus_rate: cursor.long()?,
        heredity_scalars: cursor.long()?,
        gene_trees: cursor.long()?,
    };
    cursor.is_exhausted().then_some(flags)
}

/// `0`, `1 0 epsilon`, or `1 1 alpha mean`.
///
/// # Example
/// ```
/// use bppctl::control::grammar::parse_species_delimitation;
/// use bppctl::control::SpeciesDelimitation;
///
/// assert_eq!(parse_species_delimitation(" 0"), Some(SpeciesDelimitation::Fixed));
/// assert_eq!(
///     parse_species_delimitation(" 1 1 2 1"),
///     Some(SpeciesDelimitation::Algorithm1 { alpha: 2.0, mean: 1.0 })
/// );
/// assert_eq!(parse_species_delimitation(" 2"), None);
/// ```
pub fn parse_species_delimitation(value: &str) -> Option<SpeciesDelimitation> {
    let mut cursor = ValueCursor::new(value);

    let delimitation = match cursor.long()? {
        0 => SpeciesDelimitation::Fixed,
        1 => match cursor.long()? {
            0 => SpeciesDelimitation::Algorithm0 {
                epsilon: cursor.double()?,
            },
            1 => SpeciesDelimitation::Algorithm1 {
                alpha: cursor.double()?,
                mean: cursor.double()?,
            },
            _ => return None,
        },
        _ => return None,
    };

    cursor.is_exhausted().then_some(delimitation)
}

/// `0|1 [ratios...]`. Fields after the selector are not read.
pub fn parse_species_tree(value: &str) -> Option<SpeciesTreeMode> {
    match ValueCursor::new(value).long()? {
        0 => Some(SpeciesTreeMode::Fixed),
        1 => Some(SpeciesTreeMode::Estimated),
        _ => None,
    }
}

/// First line of a `species&tree` record: `count label1 label2 ...`.
///
/// The labels are read up to the first comment marker and must number
/// exactly `count`.
///
/// # Example
/// ```
/// use bppctl::control::grammar::parse_species_header;
///
/// let reorder = parse_species_header(" 3 A B C * three species").unwrap();
/// assert_eq!(reorder.to_string(), "A,B,C");
/// assert!(parse_species_header(" 2 A B C").is_none());
/// ```
pub fn parse_species_header(value: &str) -> Option<ReorderList> {
    let mut cursor = ValueCursor::new(value);
    let count = cursor.long()?;
    let labels_text = cursor.string()?;

    let labels: Vec<String> = labels_text
        .split(LABEL_SEPARATORS)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect();

    (usize::try_from(count).ok() == Some(labels.len())).then(|| ReorderList::from(labels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_long() {
        assert_eq!(parse_single_long(" 12345 * seed"), Some(12345));
        assert_eq!(parse_single_long(" 1 2"), None);
        assert_eq!(parse_single_long(" "), None);
    }

    #[test]
    fn test_theta_prior_without_flag() {
        let (prior, estimate) = parse_theta_prior(" 3 0.002").unwrap();
        assert_eq!(prior, InvGammaPrior { alpha: 3.0, beta: 0.002 });
        assert_eq!(estimate, None);
    }

    #[test]
    fn test_theta_prior_lowercase_flag_and_trailing_garbage() {
        assert_eq!(
            parse_theta_prior("3 0.002 e # integrate").map(|(_, e)| e),
            Some(Some(ThetaEstimate::Analytical))
        );
        assert!(parse_theta_prior("3 0.002 E 7").is_none());
        assert!(parse_theta_prior("3").is_none());
    }

    #[test]
    fn test_tau_prior() {
        assert_eq!(
            parse_tau_prior(" 3 0.03"),
            Some(InvGammaPrior { alpha: 3.0, beta: 0.03 })
        );
        assert_eq!(parse_tau_prior(" 3 0.03 1"), None);
    }

    #[test]
    fn test_finetune_layouts() {
        let finetune = parse_finetune("0 : 1 2 3 4 5 6 7").unwrap();
        assert!(!finetune.reset);
        assert_eq!(finetune.steps.gene_tree_age, 1.0);
        assert_eq!(finetune.steps.sequence_error, 7.0);

        assert!(parse_finetune(" 1 5 0.001 0.001 0.001 0.3 0.33 0.001").is_none());
        assert!(parse_finetune(" 2: 5 0.001 0.001 0.001 0.3 0.33 0.001").is_none());
        assert!(parse_finetune(" 10: 5 0.001 0.001 0.001 0.3 0.33 0.001").is_none());
        assert!(parse_finetune(" 1: 5 0.001 0.001 0.001 0.3 0.33 0.001 9").is_none());
    }

    #[test]
    fn test_print() {
        assert_eq!(
            parse_print(" 1 0 0 1"),
            Some(PrintFlags { samples: 1, locus_rate: 0, heredity_scalars: 0, gene_trees: 1 })
        );
        assert_eq!(parse_print(" 1 0 0"), None);
        assert_eq!(parse_print(" 1 0 0 1 1"), None);
    }

    #[test]
    fn test_species_delimitation_algorithm0() {
        assert_eq!(
            parse_species_delimitation(" 1 0 2"),
            Some(SpeciesDelimitation::Algorithm0 { epsilon: 2.0 })
        );
        assert_eq!(parse_species_delimitation(" 1 0"), None);
        assert_eq!(parse_species_delimitation(" 1 2 2"), None);
        assert_eq!(parse_species_delimitation(" 0 5"), None);
    }

    #[test]
    fn test_species_tree_ignores_ratios() {
        assert_eq!(parse_species_tree(" 1 0.4 0.2 0.1"), Some(SpeciesTreeMode::Estimated));
        assert_eq!(parse_species_tree(" 0"), Some(SpeciesTreeMode::Fixed));
        assert_eq!(parse_species_tree(" 3"), None);
    }

    #[test]
    fn test_species_header() {
        assert_eq!(parse_species_header(" 1 kiwi").map(|r| r.len()), Some(1));
        assert!(parse_species_header(" 3").is_none());
        assert!(parse_species_header(" -1 A").is_none());
        assert!(parse_species_header(" 3 A\tB  C").is_some());
    }
}
