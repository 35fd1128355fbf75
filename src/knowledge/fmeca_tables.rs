//! FMECA lookup tables: failure modes, effects, functions, corrective actions

use crate::types::{Cause, Component, CriticalityBand, Subcomponent, SubcomponentCategory};

/// Failure mode used when the (cause, category) pair has no table entry.
pub const FALLBACK_FAILURE_MODE: &str = "Défaillance";

/// Effect used when the failure mode has no table entry.
pub const FALLBACK_EFFECT: &str = "Impact sur performance";

/// Function used when the (component, subcomponent) pair has no table entry.
pub const FALLBACK_FUNCTION: &str = "Support et échange thermique";

/// Corrective actions for causes without a dedicated list.
pub const GENERIC_ACTIONS: [&str; 6] = [
    "Inspection régulière",
    "Maintenance préventive",
    "Analyse des causes",
    "Formation personnel",
    "Amélioration procédures",
    "Remplacement périodique",
];

// ============================================================================
// Detection term lists
// ============================================================================

/// Causes an operator notices immediately (D = 1).
pub const EASILY_DETECTABLE: [&str; 4] = ["fuite", "percement", "surchauffe", "vibration"];

/// Causes found by routine inspection (D = 2).
pub const MEDIUM_DETECTABLE: [&str; 4] = ["corrosion", "erosion", "encrassement", "mauvais montage"];

/// Causes that need non-destructive testing (D = 3).
pub const HARD_DETECTABLE: [&str; 2] = ["fissure", "fatigue"];

// ============================================================================
// Cause to table entry
// ============================================================================

/// Causes carrying failure-mode and action tables, in lookup order.
static TABLED_CAUSES: [Cause; 9] = [
    Cause::Corrosion,
    Cause::Fissure,
    Cause::Erosion,
    Cause::Fatigue,
    Cause::Percement,
    Cause::Surchauffe,
    Cause::Encrassement,
    Cause::Vibration,
    Cause::Fuite,
];

/// The tabled cause a cause reads as. Passthrough text falls back to the
/// first tabled cause whose key it contains.
fn tabled(cause: &Cause) -> Option<&'static Cause> {
    match cause {
        Cause::Other(text) => TABLED_CAUSES.iter().find(|c| text.contains(c.key())),
        Cause::MauvaisMontage | Cause::Unknown => None,
        known => TABLED_CAUSES.iter().find(|c| *c == known),
    }
}

// ============================================================================
// Failure mode
// ============================================================================

/// Failure mode for a cause on a subcomponent category.
pub fn failure_mode(cause: &Cause, category: Option<SubcomponentCategory>) -> &'static str {
    use SubcomponentCategory::{Branches, Collecteur, Epingle, Tube};
    let (Some(cause), Some(category)) = (tabled(cause), category) else {
        return FALLBACK_FAILURE_MODE;
    };
    match (cause, category) {
        (Cause::Corrosion, Epingle) => "Corrosion externe",
        (Cause::Corrosion, Collecteur) => "Corrosion interne",
        (Cause::Corrosion, Tube) => "Corrosion côté feu",
        (Cause::Corrosion, Branches) => "Corrosion sous contrainte",
        (Cause::Fissure, Epingle) => "Fissuration thermique",
        (Cause::Fissure, Collecteur) => "Fissures intergranulaires",
        (Cause::Fissure, Tube) | (Cause::Fatigue, Epingle) => "Fatigue thermique",
        (Cause::Fissure, Branches) => "Fissuration",
        (Cause::Erosion, Epingle) => "Erosion par cendres",
        (Cause::Erosion, Collecteur | Branches) => "Erosion",
        (Cause::Erosion, Tube) => "Erosion par particules",
        (Cause::Fatigue, Collecteur) => "Fatigue mécanique",
        (Cause::Fatigue, Tube) => "Fatigue",
        (Cause::Fatigue, Branches) => "Fatigue cyclique",
        (Cause::Percement, Epingle) => "Percement par érosion",
        (Cause::Percement, Collecteur) => "Fuites locales",
        (Cause::Percement, Tube) => "Percement",
        (Cause::Percement, Branches) => "Rupture par fluage",
        (Cause::Surchauffe, Epingle) => "Short-term overheat",
        (Cause::Surchauffe, Collecteur) => "Long-term overheat",
        (Cause::Surchauffe, Tube) => "Surchauffe locale",
        (Cause::Surchauffe, Branches) => "Surchauffe",
        (Cause::Encrassement, Epingle) => "Encrassement interne",
        (Cause::Encrassement, Collecteur) => "Dépôts",
        (Cause::Encrassement, Tube) => "Bouchage",
        (Cause::Encrassement, Branches) => "Encrassement",
        (Cause::Vibration, Epingle) => "Vibration excessive",
        (Cause::Vibration, Collecteur) => "Vibration",
        (Cause::Vibration, Tube) => "Vibrations du flux",
        (Cause::Vibration, Branches) => "Vibration des branches",
        (Cause::Fuite, Epingle | Tube) => "Fuite",
        (Cause::Fuite, Collecteur) => "Fuite aux joints",
        (Cause::Fuite, Branches) => "Fuite aux raccords",
        _ => FALLBACK_FAILURE_MODE,
    }
}

/// Effect of a failure mode.
pub fn effect(failure_mode: &str) -> &'static str {
    match failure_mode {
        "Corrosion externe" => "Amincissement parois",
        "Corrosion interne" => "Perte matière interne",
        "Corrosion côté feu" => "Perte métal externe",
        "Corrosion sous contrainte" => "Fissures intergranulaires",
        "Fissuration thermique" | "Fatigue mécanique" => "Fissures externes",
        "Fissures intergranulaires" => "Rupture soudure",
        "Fatigue thermique" => "Fissures",
        "Fissuration" => "Fuites locales",
        "Erosion par cendres" => "Amincissement accéléré",
        "Erosion" => "Perte matière",
        "Erosion par particules" => "Surface \"fromage suisse\"",
        "Fatigue" => "Rupture",
        "Fatigue cyclique" => "Microfissures",
        "Percement par érosion" => "Perte fluide",
        "Fuites locales" | "Fuite" => "Perte rendement",
        "Percement" => "Arrêt d'urgence",
        "Rupture par fluage" => "Défaillance catastrophique",
        "Short-term overheat" => "Rupture ductile",
        "Long-term overheat" => "Rupture fluage",
        "Surchauffe locale" => "Déformation permanente",
        "Surchauffe" => "Fragilisation",
        "Encrassement interne" => "Réduction débit",
        "Dépôts" => "Blocage flux vapeur",
        "Bouchage" => "Réduction efficacité",
        "Encrassement" => "Surchauffe locale",
        "Vibration excessive" => "Fatigue accélérée",
        "Vibration" => "Desserrage fixations",
        "Vibrations du flux" => "Usure prématurée",
        "Vibration des branches" => "Rupture aux raccords",
        "Fuite aux joints" => "Arrêt pour maintenance",
        "Fuite aux raccords" => "Contamination environnement",
        _ => FALLBACK_EFFECT,
    }
}

// ============================================================================
// Function
// ============================================================================

/// Function of a subcomponent within its bank.
pub fn function(component: Component, subcomponent: Subcomponent) -> &'static str {
    use Component::*;
    use Subcomponent::*;
    match (component, subcomponent) {
        (_, Epingle) => match component {
            RechauffeurBt | RechauffeurHt => "Échange thermique",
            _ => "Transfert thermique",
        },
        (EconomiseurBt, CollecteurEntree) => "Alimentation eau",
        (EconomiseurBt, CollecteurSortie) => "Collecte eau chauffée",
        (EconomiseurBt, BranchesEntree) => "Distribution eau",
        (EconomiseurBt, BranchesSortie) => "Évacuation eau",
        (EconomiseurBt | EconomiseurHt, TubePorteur) => "Support structurel",
        (EconomiseurBt | EconomiseurHt, TubesSuspension) => "Support mécanique",
        (EconomiseurHt, CollecteurEntree) => "Distribution vapeur",
        (EconomiseurHt, CollecteurSortie) => "Collecte vapeur",
        (EconomiseurHt, BranchesEntree) => "Amenée fluide",
        (EconomiseurHt, BranchesSortie) => "Évacuation vapeur",
        (SurchauffeurBt, CollecteurEntree) => "Distribution vapeur",
        (SurchauffeurBt, CollecteurSortie) => "Collecte vapeur surchauffée",
        (SurchauffeurBt, TubePorteur) => "Résistance pression",
        (SurchauffeurBt, BranchesEntree) => "Alimentation vapeur",
        (SurchauffeurBt, BranchesSortie) => "Évacuation vapeur",
        (SurchauffeurHt, CollecteurEntree | BranchesEntree) => "Distribution vapeur",
        (SurchauffeurHt, CollecteurSortie) => "Évacuation vapeur",
        (SurchauffeurHt, TubePorteur) => "Stabilité mécanique",
        (SurchauffeurHt, BranchesSortie) => "Collecte vapeur",
        (RechauffeurBt, CollecteurEntree) => "Distribution vapeur",
        (RechauffeurBt, CollecteurSortie) => "Collecte vapeur",
        (RechauffeurBt, TubePorteur) => "Support mécanique",
        (RechauffeurBt, TubesSuspension) => "Support structurel",
        (RechauffeurBt, BranchesEntree) => "Alimentation vapeur",
        (RechauffeurBt, BranchesSortie) => "Évacuation vapeur",
        (RechauffeurHt, CollecteurEntree) => "Distribution vapeur",
        (RechauffeurHt, CollecteurSortie | BranchesSortie) => "Évacuation vapeur",
        (RechauffeurHt, TubePorteur) => "Résistance pression",
        (RechauffeurHt, BranchesEntree) => "Amenée vapeur",
        (SurchauffeurBt | SurchauffeurHt | RechauffeurHt, TubesSuspension) => FALLBACK_FUNCTION,
    }
}

// ============================================================================
// Corrective actions
// ============================================================================

/// Candidate corrective actions for a cause (generic list when untabled).
pub fn corrective_actions(cause: &Cause) -> &'static [&'static str] {
    let Some(cause) = tabled(cause) else {
        return &GENERIC_ACTIONS;
    };
    match cause {
        Cause::Corrosion => &[
            "Revêtement céramique",
            "Contrôle humidité hebdo",
            "Application inhibiteur de corrosion",
            "Analyse chimique eau",
            "Passivation annuelle",
            "Injection additifs anti-corrosion",
        ],
        Cause::Fissure => &[
            "Inspection PAUT annuelle",
            "Soudure inox",
            "Contrôle ultrasons",
            "Surveillance des contraintes",
            "Test ressuage annuel",
            "Inspection thermique",
        ],
        Cause::Erosion => &[
            "Revêtement dur",
            "Contrôle particules",
            "Nettoyage pneumatique mensuel",
            "Installation de déflecteurs",
            "Inspection épaisseur par ultrasons",
            "Analyse des cendres",
        ],
        Cause::Fatigue => &[
            "Renforts métalliques",
            "Surveillance vibratoire",
            "Analyse de contraintes",
            "Modification des supports",
            "Optimisation de la distribution",
            "Inspection par courants de Foucault",
        ],
        Cause::Percement => &[
            "Remplacement préventif",
            "Contrôle épaisseur mensuel",
            "Revêtement protecteur",
            "Analyse des causes",
            "Optimisation des paramètres",
            "Adaptation des soudures",
        ],
        Cause::Surchauffe => &[
            "Alarmes température",
            "Purge démarrage",
            "Optimisation combustion",
            "Capteurs température",
            "Contrôle débit",
            "Équilibrage thermique",
        ],
        Cause::Encrassement => &[
            "Nettoyage chimique",
            "Filtres améliorés",
            "Rinçage périodique",
            "Contrôle pH auto",
            "Nettoyage par soufflage",
            "Analyse des dépôts",
        ],
        Cause::Vibration => &[
            "Amortisseurs",
            "Contrôle serrage",
            "Analyse fréquentielle",
            "Équilibrage",
            "Modification des supports",
            "Renforts structurels",
        ],
        Cause::Fuite => &[
            "Remplacement joints",
            "Test pression",
            "Contrôle serrage",
            "Analyse vibratoire",
            "Modification des raccords",
            "Inspection thermographique",
        ],
        _ => &GENERIC_ACTIONS,
    }
}

/// Maintenance strategy label heading the corrective actions of a band.
pub const fn maintenance_label(band: CriticalityBand) -> &'static str {
    match band {
        CriticalityBand::Negligible => "Maintenance corrective",
        CriticalityBand::Moderate => "Maintenance préventive systématique",
        CriticalityBand::High => "Maintenance préventive conditionnelle",
        CriticalityBand::Unacceptable => "Remise en cause complète",
    }
}

/// Number of sampled corrective actions for a band.
pub const fn action_count(band: CriticalityBand) -> usize {
    match band {
        CriticalityBand::Negligible => 1,
        CriticalityBand::Moderate | CriticalityBand::High => 2,
        CriticalityBand::Unacceptable => 3,
    }
}
