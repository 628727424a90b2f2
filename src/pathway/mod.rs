//! Declarative data model for metabolic networks.
//!
//! A pathway is a graph of metabolites connected by enzyme-catalyzed
//! reactions. Reactions reference metabolites and enzymes by id string;
//! the graph carries no pointers, so pathways are plain immutable data that
//! can be shared freely between simulation instances. Resolution of ids to
//! dense vector indices happens once, at compile time, in
//! [`compiled::CompiledSystem`].
//!
//! Entities follow the structural-update convention: transforms such as the
//! personalizer rebuild entities with changed fields and never mutate their
//! input.

pub mod compiled;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::kinetics::KineticsKind;

/// A chemical species tracked over time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metabolite {
    /// Unique id within a pathway (e.g. "methyl_thf").
    #[serde(alias = "Id")]
    pub id: String,
    /// Display name (e.g. "5-Methyltetrahydrofolate").
    #[serde(alias = "Name")]
    pub name: String,
    /// Initial concentration (mM), non-negative.
    #[serde(rename = "initialConcentration", alias = "InitialConcentration")]
    pub initial_concentration_mM: f64,
    /// Compartment label (e.g. "cytosol", "blood", "store").
    #[serde(alias = "Compartment", default)]
    pub compartment: String,
}

impl Metabolite {
    /// Create a metabolite with a clamped non-negative initial concentration.
    pub fn new(id: &str, name: &str, initial_mM: f64, compartment: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            initial_concentration_mM: initial_mM.max(0.0),
            compartment: compartment.to_string(),
        }
    }

    /// Rebuild with a different initial concentration.
    pub fn with_initial_concentration(&self, initial_mM: f64) -> Self {
        Self {
            initial_concentration_mM: initial_mM.max(0.0),
            ..self.clone()
        }
    }
}

/// Strand orientation of a reported genotype relative to the declared
/// risk allele.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strand {
    /// Genotype bases compare directly against the risk allele.
    Plus,
    /// Genotype bases are Watson-Crick complemented before comparison.
    Minus,
}

/// How a genotype at one SNP scales an enzyme's Vmax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticModifier {
    /// SNP identifier (e.g. "rs1801133").
    #[serde(rename = "rsId", alias = "RsId")]
    pub rs_id: String,
    /// Gene symbol (e.g. "MTHFR").
    #[serde(rename = "geneName", alias = "GeneName")]
    pub gene_name: String,
    /// Single-base risk allele, compared after orientation handling.
    #[serde(rename = "riskAllele", alias = "RiskAllele")]
    pub risk_allele: char,
    /// Strand orientation of raw genotypes for this SNP.
    #[serde(alias = "Orientation")]
    pub orientation: Strand,
    /// Vmax multiplier with two risk-allele copies, in [0, ~3].
    #[serde(rename = "homozygousEffect", alias = "HomozygousEffect")]
    pub homozygous_effect: f64,
    /// Vmax multiplier with one risk-allele copy, in [0, ~3].
    #[serde(rename = "heterozygousEffect", alias = "HeterozygousEffect")]
    pub heterozygous_effect: f64,
    /// Human-readable description of the variant's effect.
    #[serde(alias = "Description", default)]
    pub description: String,
}

/// A catalyst with kinetic parameters and genetic modifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enzyme {
    /// Unique id within the enzyme table (e.g. "mthfr").
    #[serde(alias = "Id")]
    pub id: String,
    /// Display name (e.g. "Methylenetetrahydrofolate reductase").
    #[serde(alias = "Name")]
    pub name: String,
    /// EC number (e.g. "1.5.1.20").
    #[serde(rename = "ecNumber", alias = "EcNumber", default)]
    pub ec_number: String,
    /// Maximum reaction velocity (mM/s), positive.
    #[serde(rename = "vmax", alias = "Vmax")]
    pub vmax_mM_per_sec: f64,
    /// Michaelis constant (mM), positive.
    #[serde(rename = "km", alias = "Km")]
    pub km_mM: f64,
    /// Cofactor tags (e.g. "B12", "NAD+"); informational.
    #[serde(alias = "Cofactors", default)]
    pub cofactors: Vec<String>,
    /// Genetic modifiers affecting this enzyme.
    #[serde(rename = "geneticModifiers", alias = "GeneticModifiers", default)]
    pub genetic_modifiers: Vec<GeneticModifier>,
}

impl Enzyme {
    /// Create an enzyme with no cofactors or modifiers.
    pub fn new(id: &str, name: &str, vmax_mM_per_sec: f64, km_mM: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ec_number: String::new(),
            vmax_mM_per_sec,
            km_mM,
            cofactors: Vec::new(),
            genetic_modifiers: Vec::new(),
        }
    }

    /// Builder-style EC number assignment.
    pub fn with_ec(mut self, ec: &str) -> Self {
        self.ec_number = ec.to_string();
        self
    }

    /// Builder-style cofactor tag.
    pub fn with_cofactor(mut self, tag: &str) -> Self {
        self.cofactors.push(tag.to_string());
        self
    }

    /// Builder-style genetic modifier attachment.
    pub fn with_modifier(mut self, modifier: GeneticModifier) -> Self {
        self.genetic_modifiers.push(modifier);
        self
    }

    /// Rebuild with Vmax scaled by a factor.
    pub fn with_vmax_scaled(&self, factor: f64) -> Self {
        Self {
            vmax_mM_per_sec: self.vmax_mM_per_sec * factor,
            ..self.clone()
        }
    }
}

/// Immutable table of enzymes, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct EnzymeTable {
    enzymes: Vec<Enzyme>,
    index: HashMap<String, usize>,
}

impl EnzymeTable {
    /// Build a table, rejecting duplicate enzyme ids.
    pub fn build(enzymes: Vec<Enzyme>) -> ModelResult<Self> {
        let mut index = HashMap::with_capacity(enzymes.len());
        for (i, enzyme) in enzymes.iter().enumerate() {
            if index.insert(enzyme.id.clone(), i).is_some() {
                return Err(ModelError::DuplicateId {
                    kind: "enzyme",
                    id: enzyme.id.clone(),
                });
            }
        }
        Ok(Self { enzymes, index })
    }

    /// Look up an enzyme by id.
    pub fn get(&self, id: &str) -> Option<&Enzyme> {
        self.index.get(id).map(|&i| &self.enzymes[i])
    }

    /// Whether an enzyme id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All enzymes in declaration order.
    pub fn enzymes(&self) -> &[Enzyme] {
        &self.enzymes
    }

    /// Number of enzymes.
    pub fn len(&self) -> usize {
        self.enzymes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.enzymes.is_empty()
    }

    /// Rebuild the table with each enzyme passed through a pure transform.
    ///
    /// Ids are preserved, so the result never fails validation.
    pub fn map_enzymes<F>(&self, f: F) -> Self
    where
        F: Fn(&Enzyme) -> Enzyme,
    {
        let enzymes = self.enzymes.iter().map(f).collect();
        Self {
            enzymes,
            index: self.index.clone(),
        }
    }

}

/// Stoichiometric role of a metabolite in a reaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionParticipant {
    /// Referenced metabolite id.
    #[serde(rename = "metaboliteId", alias = "MetaboliteId")]
    pub metabolite_id: String,
    /// Stoichiometric coefficient, at least 1.
    #[serde(alias = "Coefficient")]
    pub coefficient: u32,
}

impl ReactionParticipant {
    /// Participant with a clamped coefficient of at least 1.
    pub fn new(metabolite_id: &str, coefficient: u32) -> Self {
        Self {
            metabolite_id: metabolite_id.to_string(),
            coefficient: coefficient.max(1),
        }
    }
}

/// A directed enzymatic transformation of substrates into products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    /// Unique id within a pathway (e.g. "mthfr_reduction").
    #[serde(alias = "Id")]
    pub id: String,
    /// Display name.
    #[serde(alias = "Name", default)]
    pub name: String,
    /// Catalyzing enzyme id (must exist in the enzyme table).
    #[serde(rename = "enzymeId", alias = "EnzymeId")]
    pub enzyme_id: String,
    /// Consumed species; the first is the rate-limiting substrate.
    #[serde(alias = "Substrates", default)]
    pub substrates: Vec<ReactionParticipant>,
    /// Produced species.
    #[serde(alias = "Products", default)]
    pub products: Vec<ReactionParticipant>,
    /// Base rate law.
    #[serde(alias = "Kinetics")]
    pub kinetics: KineticsKind,
    /// Inhibitor metabolite ids; concentrations are summed into [I].
    #[serde(alias = "Inhibitors", default)]
    pub inhibitors: Vec<String>,
    /// Activator metabolite ids; concentrations are summed into [A].
    #[serde(alias = "Activators", default)]
    pub activators: Vec<String>,
    /// Inhibition constant (mM).
    #[serde(rename = "ki", alias = "Ki", default)]
    pub ki_mM: Option<f64>,
    /// Activation constant (mM).
    #[serde(rename = "ka", alias = "Ka", default)]
    pub ka_mM: Option<f64>,
    /// Hill coefficient for allosteric kinetics.
    #[serde(rename = "hillCoefficient", alias = "HillCoefficient", default)]
    pub hill_coefficient: Option<f64>,
}

impl Reaction {
    /// Create a reaction with plain kinetics and no regulators.
    pub fn new(
        id: &str,
        name: &str,
        enzyme_id: &str,
        substrates: Vec<ReactionParticipant>,
        products: Vec<ReactionParticipant>,
        kinetics: KineticsKind,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            enzyme_id: enzyme_id.to_string(),
            substrates,
            products,
            kinetics,
            inhibitors: Vec::new(),
            activators: Vec::new(),
            ki_mM: None,
            ka_mM: None,
            hill_coefficient: None,
        }
    }

    /// Builder-style inhibitor attachment.
    pub fn with_inhibitor(mut self, metabolite_id: &str, ki_mM: f64) -> Self {
        self.inhibitors.push(metabolite_id.to_string());
        self.ki_mM = Some(ki_mM);
        self
    }

    /// Builder-style activator attachment.
    pub fn with_activator(mut self, metabolite_id: &str, ka_mM: f64) -> Self {
        self.activators.push(metabolite_id.to_string());
        self.ka_mM = Some(ka_mM);
        self
    }

    /// Builder-style Hill coefficient.
    pub fn with_hill(mut self, n: f64) -> Self {
        self.hill_coefficient = Some(n);
        self
    }
}

/// An immutable metabolic network: metabolites plus reactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pathway {
    /// Unique pathway id (e.g. "methylation").
    #[serde(alias = "Id")]
    pub id: String,
    /// Display name.
    #[serde(alias = "Name")]
    pub name: String,
    /// Human-readable description.
    #[serde(alias = "Description", default)]
    pub description: String,
    /// Declared metabolites, in declaration order.
    #[serde(alias = "Metabolites")]
    pub metabolites: Vec<Metabolite>,
    /// Declared reactions, in declaration order.
    #[serde(alias = "Reactions", default)]
    pub reactions: Vec<Reaction>,
}

impl Pathway {
    /// Validate and build a pathway.
    ///
    /// Checks id uniqueness for metabolites and reactions, reference
    /// closure (every substrate/product/inhibitor/activator id must be
    /// declared), and that every reaction's enzyme exists in `enzymes`.
    /// Violations are fatal and name the offending element.
    pub fn build(
        id: &str,
        name: &str,
        description: &str,
        metabolites: Vec<Metabolite>,
        reactions: Vec<Reaction>,
        enzymes: &EnzymeTable,
    ) -> ModelResult<Self> {
        let mut seen = HashSet::with_capacity(metabolites.len());
        for m in &metabolites {
            if !seen.insert(m.id.as_str()) {
                return Err(ModelError::DuplicateId {
                    kind: "metabolite",
                    id: m.id.clone(),
                });
            }
        }

        let mut seen_reactions = HashSet::with_capacity(reactions.len());
        for r in &reactions {
            if !seen_reactions.insert(r.id.as_str()) {
                return Err(ModelError::DuplicateId {
                    kind: "reaction",
                    id: r.id.clone(),
                });
            }
            if !enzymes.contains(&r.enzyme_id) {
                return Err(ModelError::MissingEnzyme {
                    reaction: r.id.clone(),
                    enzyme_id: r.enzyme_id.clone(),
                });
            }
            let refs = r
                .substrates
                .iter()
                .chain(&r.products)
                .map(|p| p.metabolite_id.as_str())
                .chain(r.inhibitors.iter().map(String::as_str))
                .chain(r.activators.iter().map(String::as_str));
            for metabolite_id in refs {
                if !seen.contains(metabolite_id) {
                    return Err(ModelError::UnknownReference {
                        reaction: r.id.clone(),
                        id: metabolite_id.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            metabolites,
            reactions,
        })
    }

    /// Merge several pathways into one whole-body network.
    ///
    /// Metabolites are unioned by id (the first definition wins on
    /// conflict); reactions are concatenated in pathway order.
    pub fn merge(id: &str, name: &str, pathways: &[&Pathway]) -> Self {
        let mut metabolites: Vec<Metabolite> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut reactions: Vec<Reaction> = Vec::new();

        for pathway in pathways {
            for m in &pathway.metabolites {
                if seen.insert(m.id.clone()) {
                    metabolites.push(m.clone());
                }
            }
            reactions.extend(pathway.reactions.iter().cloned());
        }

        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("merge of {} pathways", pathways.len()),
            metabolites,
            reactions,
        }
    }

    /// Look up a metabolite by id.
    pub fn metabolite(&self, id: &str) -> Option<&Metabolite> {
        self.metabolites.iter().find(|m| m.id == id)
    }

    /// Rebuild the pathway with each metabolite passed through a pure
    /// transform. Ids are preserved.
    pub fn map_metabolites<F>(&self, f: F) -> Self
    where
        F: Fn(&Metabolite) -> Metabolite,
    {
        Self {
            metabolites: self.metabolites.iter().map(f).collect(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_enzymes() -> EnzymeTable {
        EnzymeTable::build(vec![
            Enzyme::new("hk", "Hexokinase", 1.0, 0.1),
            Enzyme::new("pk", "Pyruvate kinase", 2.0, 0.3),
        ])
        .unwrap()
    }

    fn simple_reaction(id: &str, enzyme: &str) -> Reaction {
        Reaction::new(
            id,
            id,
            enzyme,
            vec![ReactionParticipant::new("a", 1)],
            vec![ReactionParticipant::new("b", 1)],
            KineticsKind::MichaelisMenten,
        )
    }

    #[test]
    fn test_build_accepts_valid_pathway() {
        let pathway = Pathway::build(
            "p",
            "Test",
            "",
            vec![
                Metabolite::new("a", "A", 1.0, "cytosol"),
                Metabolite::new("b", "B", 0.0, "cytosol"),
            ],
            vec![simple_reaction("r1", "hk")],
            &test_enzymes(),
        );
        assert!(pathway.is_ok());
    }

    #[test]
    fn test_build_rejects_duplicate_metabolite() {
        let err = Pathway::build(
            "p",
            "Test",
            "",
            vec![
                Metabolite::new("a", "A", 1.0, "cytosol"),
                Metabolite::new("a", "A again", 2.0, "cytosol"),
            ],
            vec![],
            &test_enzymes(),
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateId { kind: "metabolite", .. }));
    }

    #[test]
    fn test_build_rejects_unknown_reference() {
        let err = Pathway::build(
            "p",
            "Test",
            "",
            vec![Metabolite::new("a", "A", 1.0, "cytosol")],
            vec![simple_reaction("r1", "hk")],
            &test_enzymes(),
        )
        .unwrap_err();
        match err {
            ModelError::UnknownReference { reaction, id } => {
                assert_eq!(reaction, "r1");
                assert_eq!(id, "b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_rejects_missing_enzyme() {
        let err = Pathway::build(
            "p",
            "Test",
            "",
            vec![
                Metabolite::new("a", "A", 1.0, "cytosol"),
                Metabolite::new("b", "B", 0.0, "cytosol"),
            ],
            vec![simple_reaction("r1", "nope")],
            &test_enzymes(),
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::MissingEnzyme { .. }));
    }

    #[test]
    fn test_merge_first_definition_wins() {
        let enzymes = test_enzymes();
        let p1 = Pathway::build(
            "p1",
            "One",
            "",
            vec![
                Metabolite::new("a", "A", 1.0, "cytosol"),
                Metabolite::new("b", "B", 0.0, "cytosol"),
            ],
            vec![simple_reaction("r1", "hk")],
            &enzymes,
        )
        .unwrap();
        let p2 = Pathway::build(
            "p2",
            "Two",
            "",
            vec![
                Metabolite::new("a", "A", 9.0, "cytosol"),
                Metabolite::new("c", "C", 0.5, "cytosol"),
            ],
            vec![],
            &enzymes,
        )
        .unwrap();

        let merged = Pathway::merge("whole", "Whole", &[&p1, &p2]);
        assert_eq!(merged.metabolites.len(), 3);
        // First definition of "a" (1.0 mM) wins
        assert!((merged.metabolite("a").unwrap().initial_concentration_mM - 1.0).abs() < 1e-12);
        assert_eq!(merged.reactions.len(), 1);
    }

    #[test]
    fn test_structural_update_does_not_mutate() {
        let m = Metabolite::new("a", "A", 1.0, "cytosol");
        let m2 = m.with_initial_concentration(3.0);
        assert!((m.initial_concentration_mM - 1.0).abs() < 1e-12);
        assert!((m2.initial_concentration_mM - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_enzyme_table_duplicate() {
        let err = EnzymeTable::build(vec![
            Enzyme::new("hk", "Hexokinase", 1.0, 0.1),
            Enzyme::new("hk", "Hexokinase copy", 1.0, 0.1),
        ])
        .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateId { kind: "enzyme", .. }));
    }

    #[test]
    fn test_pathway_json_round_trip() {
        let pathway = Pathway::build(
            "p",
            "Test",
            "desc",
            vec![
                Metabolite::new("a", "A", 1.0, "cytosol"),
                Metabolite::new("b", "B", 0.0, "cytosol"),
            ],
            vec![simple_reaction("r1", "hk").with_inhibitor("b", 0.2)],
            &test_enzymes(),
        )
        .unwrap();

        let json = serde_json::to_string(&pathway).unwrap();
        let parsed: Pathway = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, pathway.id);
        assert_eq!(parsed.metabolites.len(), pathway.metabolites.len());
        assert_eq!(parsed.reactions[0].inhibitors, vec!["b".to_string()]);
        assert_eq!(parsed.reactions[0].ki_mM, Some(0.2));
    }
}
