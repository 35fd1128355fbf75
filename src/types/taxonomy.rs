//! Boiler taxonomy: components, subcomponents and failure causes
//!
//! The vocabularies are closed. Free-text spreadsheet cells are resolved
//! against the alias lists below (accent-folded, lower-case); anything that
//! does not resolve is carried as `Resolved::Unmapped` or `Cause::Other` so it
//! can be reported and excluded instead of silently drifting.

use serde::{Deserialize, Serialize};

use crate::text;

// ============================================================================
// Resolution outcome
// ============================================================================

/// Outcome of resolving a free-text cell against a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolved<T> {
    Known(T),
    /// Non-empty text that matched no alias (kept lower-cased)
    Unmapped(String),
    /// Empty or missing cell
    Unknown,
}

impl<T: Copy> Resolved<T> {
    pub const fn known(&self) -> Option<T> {
        match self {
            Self::Known(t) => Some(*t),
            _ => None,
        }
    }
}

/// Empty cell, or the placeholder written by a normalised export.
fn is_unknown_marker(folded: &str) -> bool {
    matches!(folded, "" | "inconnu" | "inconnue")
}

/// Substring alias lookup shared by the component and subcomponent resolvers.
///
/// Exact alias match wins first; otherwise the first entry (in table order)
/// having an alias contained in the value.
fn resolve_in<T: Copy>(raw: &str, table: &[(T, &[&str])]) -> Resolved<T> {
    let value = text::fold(raw.trim());
    if is_unknown_marker(&value) {
        return Resolved::Unknown;
    }
    if let Some((t, _)) = table.iter().find(|(_, aliases)| aliases.contains(&value.as_str())) {
        return Resolved::Known(*t);
    }
    table
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|a| value.contains(a)))
        .map_or(Resolved::Unmapped(value.clone()), |(t, _)| Resolved::Known(*t))
}

// ============================================================================
// Component
// ============================================================================

/// Heat-exchanger bank of the boiler.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    EconomiseurBt,
    EconomiseurHt,
    SurchauffeurBt,
    SurchauffeurHt,
    RechauffeurBt,
    RechauffeurHt,
}

impl Component {
    /// Alias-table order, which is also the resolution priority.
    pub const ALL: [Self; 6] = [
        Self::EconomiseurBt,
        Self::EconomiseurHt,
        Self::SurchauffeurBt,
        Self::SurchauffeurHt,
        Self::RechauffeurBt,
        Self::RechauffeurHt,
    ];

    /// Canonical ASCII key, also the sort key of FMECA output.
    pub const fn key(self) -> &'static str {
        match self {
            Self::EconomiseurBt => "economiseur bt",
            Self::EconomiseurHt => "economiseur ht",
            Self::SurchauffeurBt => "surchauffeur bt",
            Self::SurchauffeurHt => "surchauffeur ht",
            Self::RechauffeurBt => "rechauffeur bt",
            Self::RechauffeurHt => "rechauffeur ht",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::EconomiseurBt => "Économiseur BT",
            Self::EconomiseurHt => "Économiseur HT",
            Self::SurchauffeurBt => "Surchauffeur BT",
            Self::SurchauffeurHt => "Surchauffeur HT",
            Self::RechauffeurBt => "Réchauffeur BT",
            Self::RechauffeurHt => "Réchauffeur HT",
        }
    }

    /// Prefix of the work-order image files.
    pub const fn short_code(self) -> &'static str {
        match self {
            Self::EconomiseurBt => "eco_bt",
            Self::EconomiseurHt => "eco_ht",
            Self::SurchauffeurBt => "sur_bt",
            Self::SurchauffeurHt => "sur_ht",
            Self::RechauffeurBt => "rch_bt",
            Self::RechauffeurHt => "rch_ht",
        }
    }

    /// Folded spreadsheet aliases, canonical key first.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::EconomiseurBt => &["economiseur bt", "eco bt", "economiseur basse temperature"],
            Self::EconomiseurHt => &["economiseur ht", "eco ht", "economiseur haute temperature"],
            Self::SurchauffeurBt => &[
                "surchauffeur bt",
                "sur bt",
                "sbt",
                "surchauf bt",
                "surchauffeur basse temperature",
            ],
            Self::SurchauffeurHt => &[
                "surchauffeur ht",
                "sur ht",
                "sht",
                "surchauf ht",
                "surchauffeur haute temperature",
            ],
            Self::RechauffeurBt => &[
                "rechauffeur bt",
                "rch bt",
                "rbt",
                "rechauff bt",
                "rechauffeur basse temperature",
            ],
            Self::RechauffeurHt => &[
                "rechauffeur ht",
                "rch ht",
                "rht",
                "rechauff ht",
                "rechauffeur haute temperature",
            ],
        }
    }

    /// Subcomponents installed on this bank, in picker order.
    pub const fn installed(self) -> &'static [Subcomponent] {
        use Subcomponent::*;
        match self {
            Self::EconomiseurBt => &[CollecteurSortie, Epingle],
            Self::EconomiseurHt => &[CollecteurEntree, TubesSuspension],
            Self::SurchauffeurBt => &[Epingle, CollecteurEntree],
            Self::SurchauffeurHt => &[TubePorteur, BranchesEntree, CollecteurSortie],
            Self::RechauffeurBt => &[CollecteurEntree, TubesSuspension, TubePorteur],
            Self::RechauffeurHt => &[BranchesSortie, CollecteurEntree, CollecteurSortie],
        }
    }

    /// Resolve a free-text cell.
    pub fn resolve(raw: &str) -> Resolved<Self> {
        let table: Vec<(Self, &[&str])> = Self::ALL.iter().map(|c| (*c, c.aliases())).collect();
        resolve_in(raw, &table)
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Subcomponent
// ============================================================================

/// Part of a heat-exchanger bank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Subcomponent {
    Epingle,
    CollecteurEntree,
    CollecteurSortie,
    TubePorteur,
    BranchesEntree,
    BranchesSortie,
    TubesSuspension,
}

impl Subcomponent {
    pub const ALL: [Self; 7] = [
        Self::Epingle,
        Self::CollecteurEntree,
        Self::CollecteurSortie,
        Self::TubePorteur,
        Self::BranchesEntree,
        Self::BranchesSortie,
        Self::TubesSuspension,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Epingle => "epingle",
            Self::CollecteurEntree => "collecteur entree",
            Self::CollecteurSortie => "collecteur sortie",
            Self::TubePorteur => "tube porteur",
            Self::BranchesEntree => "branches entree",
            Self::BranchesSortie => "branches sortie",
            Self::TubesSuspension => "tubes suspension",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Epingle => "Épingle",
            Self::CollecteurEntree => "Collecteur entrée",
            Self::CollecteurSortie => "Collecteur sortie",
            Self::TubePorteur => "Tube porteur",
            Self::BranchesEntree => "Branches entrée",
            Self::BranchesSortie => "Branches sortie",
            Self::TubesSuspension => "Tubes suspension",
        }
    }

    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Epingle => &["epingle", "epingles", "tube epingle"],
            Self::CollecteurEntree => &[
                "collecteur entree",
                "collecteur d'entree",
                "collecteur d entree",
                "coll. entree",
                "collecteur e",
            ],
            Self::CollecteurSortie => &[
                "collecteur sortie",
                "collecteur de sortie",
                "coll. sortie",
                "collecteur s",
            ],
            Self::TubePorteur => &[
                "tube porteur",
                "tubes porteurs",
                "porteur",
                "tube support",
                "tubes supports",
            ],
            Self::BranchesEntree => &["branches entree", "branche entree", "branch. entree"],
            Self::BranchesSortie => &["branches sortie", "branche sortie", "branch. sortie"],
            Self::TubesSuspension => &[
                "tubes suspension",
                "tube suspension",
                "tubes de suspension",
                "suspension",
            ],
        }
    }

    pub const fn category(self) -> SubcomponentCategory {
        match self {
            Self::Epingle => SubcomponentCategory::Epingle,
            Self::CollecteurEntree | Self::CollecteurSortie => SubcomponentCategory::Collecteur,
            Self::TubePorteur | Self::TubesSuspension => SubcomponentCategory::Tube,
            Self::BranchesEntree | Self::BranchesSortie => SubcomponentCategory::Branches,
        }
    }

    pub fn resolve(raw: &str) -> Resolved<Self> {
        let table: Vec<(Self, &[&str])> = Self::ALL.iter().map(|s| (*s, s.aliases())).collect();
        resolve_in(raw, &table)
    }
}

impl std::fmt::Display for Subcomponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Family of subcomponents sharing failure modes, operations and materials.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SubcomponentCategory {
    Epingle,
    Collecteur,
    Tube,
    Branches,
}

impl SubcomponentCategory {
    pub const ALL: [Self; 4] = [Self::Epingle, Self::Collecteur, Self::Tube, Self::Branches];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Epingle => "epingle",
            Self::Collecteur => "collecteur",
            Self::Tube => "tube",
            Self::Branches => "branches",
        }
    }

    /// Category of a free-text subcomponent name: first key contained in it.
    pub fn from_text(raw: &str) -> Option<Self> {
        let value = text::fold(raw);
        Self::ALL.into_iter().find(|c| value.contains(c.key()))
    }
}

// ============================================================================
// Cause
// ============================================================================

/// Root cause of a stoppage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cause {
    Corrosion,
    Fissure,
    Erosion,
    Fatigue,
    Percement,
    Surchauffe,
    Encrassement,
    Vibration,
    MauvaisMontage,
    Fuite,
    /// Non-empty text that matched no alias (kept folded)
    Other(String),
    /// Empty or missing cell
    Unknown,
}

impl Cause {
    /// Alias-table order, which is also the resolution priority.
    pub const KNOWN: [Self; 10] = [
        Self::Corrosion,
        Self::Fissure,
        Self::Erosion,
        Self::Fatigue,
        Self::Percement,
        Self::Surchauffe,
        Self::Encrassement,
        Self::Vibration,
        Self::MauvaisMontage,
        Self::Fuite,
    ];

    /// Lower-case text form: canonical key, the passthrough text, or `"inconnue"`.
    pub fn key(&self) -> &str {
        match self {
            Self::Corrosion => "corrosion",
            Self::Fissure => "fissure",
            Self::Erosion => "erosion",
            Self::Fatigue => "fatigue",
            Self::Percement => "percement",
            Self::Surchauffe => "surchauffe",
            Self::Encrassement => "encrassement",
            Self::Vibration => "vibration",
            Self::MauvaisMontage => "mauvais montage",
            Self::Fuite => "fuite",
            Self::Other(text) => text,
            Self::Unknown => "inconnue",
        }
    }

    pub fn display_name(&self) -> String {
        text::title_case(self.key())
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Corrosion => &["corrosion", "rouille", "oxydation", "attaque chimique", "piqure"],
            Self::Fissure => &["fissure", "fissuration", "craquelure", "fente"],
            Self::Erosion => &["erosion", "usure", "abrasion"],
            Self::Fatigue => &["fatigue", "stress", "tension"],
            Self::Percement => &["percement", "perforation", "trou", "perce"],
            Self::Surchauffe => &["surchauffe", "temperature elevee", "chaleur excessive"],
            Self::Encrassement => &[
                "encrassement",
                "depot",
                "accumulation",
                "obstruction",
                "bouchage",
            ],
            Self::Vibration => &["vibration", "oscillation"],
            Self::MauvaisMontage => &["mauvais montage", "montage incorrect", "defaut d'assemblage"],
            Self::Fuite => &["fuite", "ecoulement", "perte", "suintement"],
            Self::Other(_) | Self::Unknown => &[],
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_) | Self::Unknown)
    }

    /// Resolve a free-text cause cell.
    pub fn resolve(raw: &str) -> Self {
        let value = text::fold(raw.trim());
        if is_unknown_marker(&value) {
            return Self::Unknown;
        }
        if let Some(c) = Self::KNOWN.iter().find(|c| c.aliases().contains(&value.as_str())) {
            return c.clone();
        }
        Self::KNOWN
            .iter()
            .find(|c| c.aliases().iter().any(|a| value.contains(a)))
            .cloned()
            .unwrap_or(Self::Other(value))
    }
}

impl std::fmt::Display for Cause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_aliases() {
        assert_eq!(Component::resolve("Eco BT"), Resolved::Known(Component::EconomiseurBt));
        assert_eq!(Component::resolve(" Économiseur HT "), Resolved::Known(Component::EconomiseurHt));
        assert_eq!(Component::resolve("SBT"), Resolved::Known(Component::SurchauffeurBt));
        assert_eq!(
            Component::resolve("Réchauffeur haute température"),
            Resolved::Known(Component::RechauffeurHt)
        );
        assert_eq!(Component::resolve("surchauffeur bt"), Resolved::Known(Component::SurchauffeurBt));
    }

    #[test]
    fn test_component_substring_fallback() {
        assert_eq!(
            Component::resolve("zone eco bt nord"),
            Resolved::Known(Component::EconomiseurBt)
        );
    }

    #[test]
    fn test_component_unmapped_and_empty() {
        assert_eq!(Component::resolve("Chaudière"), Resolved::Unmapped("chaudiere".into()));
        assert_eq!(Component::resolve("   "), Resolved::Unknown);
    }

    #[test]
    fn test_subcomponent_aliases() {
        assert_eq!(Subcomponent::resolve("Épingles"), Resolved::Known(Subcomponent::Epingle));
        assert_eq!(
            Subcomponent::resolve("Collecteur d'entrée"),
            Resolved::Known(Subcomponent::CollecteurEntree)
        );
        assert_eq!(
            Subcomponent::resolve("collecteur de sortie"),
            Resolved::Known(Subcomponent::CollecteurSortie)
        );
        assert_eq!(Subcomponent::resolve("suspension"), Resolved::Known(Subcomponent::TubesSuspension));
        assert_eq!(Subcomponent::resolve("Tubes porteurs"), Resolved::Known(Subcomponent::TubePorteur));
    }

    #[test]
    fn test_categories() {
        assert_eq!(Subcomponent::TubesSuspension.category(), SubcomponentCategory::Tube);
        assert_eq!(Subcomponent::TubePorteur.category(), SubcomponentCategory::Tube);
        assert_eq!(Subcomponent::BranchesSortie.category(), SubcomponentCategory::Branches);
        assert_eq!(
            SubcomponentCategory::from_text("collecteur principal"),
            Some(SubcomponentCategory::Collecteur)
        );
        assert_eq!(SubcomponentCategory::from_text("virole"), None);
    }

    #[test]
    fn test_cause_resolution_order() {
        assert_eq!(Cause::resolve("Rouille"), Cause::Corrosion);
        assert_eq!(Cause::resolve("Érosion"), Cause::Erosion);
        assert_eq!(Cause::resolve("dépôt de cendres"), Cause::Encrassement);
        assert_eq!(Cause::resolve("Température élevée"), Cause::Surchauffe);
        assert_eq!(Cause::resolve("défaut d'assemblage"), Cause::MauvaisMontage);
        assert_eq!(Cause::resolve("perte d'eau"), Cause::Fuite);
        assert_eq!(Cause::resolve(""), Cause::Unknown);
        assert_eq!(Cause::resolve("Foudre"), Cause::Other("foudre".into()));
    }

    #[test]
    fn test_installed_part_counts() {
        for c in Component::ALL {
            let parts = c.installed();
            assert!((2..=3).contains(&parts.len()), "{c} has {} parts", parts.len());
        }
    }
}
