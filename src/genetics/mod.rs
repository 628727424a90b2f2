//! Genetic profile loading and genotype interpretation.
//!
//! Consumes the tab-separated raw-genome export format common to consumer
//! genotyping services: one data line per SNP with
//! `rsid  chromosome  position  genotype`. Comment lines (`#`), blank
//! lines, missing calls (`--`), and malformed positions are skipped.
//!
//! Genotype interpretation for enzyme modifiers: when a modifier declares
//! minus-strand orientation, each reported base is Watson-Crick
//! complemented before the risk allele is counted. Counting is
//! case-insensitive. A missing SNP contributes a neutral multiplier of 1.0.

use std::collections::HashMap;
use std::path::Path;

use crate::pathway::{GeneticModifier, Strand};

/// One parsed SNP record from a raw-genome file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpRecord {
    /// Chromosome label as reported (e.g. "1", "X", "MT").
    pub chromosome: String,
    /// Position on the chromosome.
    pub position: u64,
    /// Reported genotype, usually two bases (e.g. "AG").
    pub genotype: String,
}

/// Map from rsId to reported genotype.
#[derive(Debug, Clone, Default)]
pub struct GeneticProfile {
    snps: HashMap<String, SnpRecord>,
}

impl GeneticProfile {
    /// Empty profile (identity under [`crate::profile::apply_genetics`]).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a profile from explicit rsId -> genotype pairs (tests,
    /// hand-entered variants).
    pub fn from_genotypes<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let snps = pairs
            .into_iter()
            .map(|(rs_id, genotype)| {
                (
                    rs_id,
                    SnpRecord {
                        chromosome: String::new(),
                        position: 0,
                        genotype,
                    },
                )
            })
            .collect();
        Self { snps }
    }

    /// Parse raw-genome text.
    ///
    /// Never fails: every malformed line is skipped (counted and logged),
    /// so a corrupt file degrades to a smaller profile rather than an
    /// aborted simulation.
    pub fn parse_raw(text: &str) -> Self {
        let mut snps = HashMap::new();
        let mut skipped = 0usize;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let (Some(rsid), Some(chromosome), Some(position), Some(genotype)) = (
                fields.next(),
                fields.next(),
                fields.next(),
                fields.next(),
            ) else {
                skipped += 1;
                continue;
            };
            let genotype = genotype.trim();
            if genotype == "--" {
                continue;
            }
            // Diploid calls only; odd-length calls read as missing data
            if genotype.len() != 2 {
                skipped += 1;
                continue;
            }
            let Ok(position) = position.trim().parse::<u64>() else {
                skipped += 1;
                continue;
            };
            snps.insert(
                rsid.trim().to_string(),
                SnpRecord {
                    chromosome: chromosome.trim().to_string(),
                    position,
                    genotype: genotype.to_string(),
                },
            );
        }

        if skipped > 0 {
            log::warn!("genetic profile: skipped {} malformed lines", skipped);
        }
        log::info!("genetic profile: {} SNPs loaded", snps.len());
        Self { snps }
    }

    /// Load a raw-genome file from disk; missing or unreadable files yield
    /// an empty profile with a logged warning.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(text) => Self::parse_raw(&text),
            Err(e) => {
                log::warn!(
                    "genetic profile {:?} not readable ({}); continuing without genetics",
                    path.as_ref(),
                    e
                );
                Self::empty()
            }
        }
    }

    /// Reported genotype for a SNP, if present.
    pub fn genotype(&self, rs_id: &str) -> Option<&str> {
        self.snps.get(rs_id).map(|r| r.genotype.as_str())
    }

    /// Full record for a SNP, if present.
    pub fn record(&self, rs_id: &str) -> Option<&SnpRecord> {
        self.snps.get(rs_id)
    }

    /// Number of loaded SNPs.
    pub fn len(&self) -> usize {
        self.snps.len()
    }

    /// Whether the profile holds no SNPs.
    pub fn is_empty(&self) -> bool {
        self.snps.is_empty()
    }
}

/// Watson-Crick complement of one base; other characters pass through.
#[inline]
pub fn complement_base(base: char) -> char {
    match base.to_ascii_uppercase() {
        'A' => 'T',
        'T' => 'A',
        'C' => 'G',
        'G' => 'C',
        _ => base,
    }
}

/// Count risk-allele copies in a genotype under the declared orientation.
///
/// Minus orientation complements each reported base first; comparison is
/// case-insensitive. Returns 0, 1, or 2 for a diploid genotype.
pub fn count_risk_alleles(genotype: &str, risk_allele: char, orientation: Strand) -> u32 {
    let risk = risk_allele.to_ascii_uppercase();
    genotype
        .chars()
        .map(|base| match orientation {
            Strand::Plus => base.to_ascii_uppercase(),
            Strand::Minus => complement_base(base),
        })
        .filter(|&base| base == risk)
        .count() as u32
}

/// Vmax multiplier contributed by one modifier under one profile.
///
/// Two risk-allele copies select the homozygous effect, one the
/// heterozygous effect; zero copies or a missing SNP are neutral.
pub fn modifier_multiplier(modifier: &GeneticModifier, profile: &GeneticProfile) -> f64 {
    let Some(genotype) = profile.genotype(&modifier.rs_id) else {
        return 1.0;
    };
    match count_risk_alleles(genotype, modifier.risk_allele, modifier.orientation) {
        2 => modifier.homozygous_effect,
        1 => modifier.heterozygous_effect,
        _ => 1.0,
    }
}
