//! Work-order tables: operations, materials, default criticality, images

use crate::types::{Component, MaintenanceTier, Subcomponent, SubcomponentCategory};

/// A maintenance operation template (name, details, allotted minutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationTemplate {
    pub name: &'static str,
    pub details: &'static str,
    pub minutes: u32,
}

const fn op(name: &'static str, details: &'static str, minutes: u32) -> OperationTemplate {
    OperationTemplate { name, details, minutes }
}

// ============================================================================
// Operations
// ============================================================================

/// Opens every work order.
pub const BASELINE_OPERATION: OperationTemplate = op(
    "Inspection visuelle",
    "Vérification de l'état général, recherche de signes de corrosion, fuites ou fissures",
    15,
);

/// Replaces the tiered operations when the subcomponent has no category.
pub const GENERIC_OPERATIONS: [OperationTemplate; 2] = [
    op("Contrôle général", "Vérification complète de l'état et du fonctionnement", 30),
    op("Nettoyage préventif", "Élimination des dépôts et contaminants", 25),
];

const EPINGLE_LOW: [OperationTemplate; 1] = [op(
    "Contrôle visuel des soudures",
    "Vérification de l'intégrité des soudures et des raccords",
    20,
)];

const EPINGLE_MEDIUM: [OperationTemplate; 2] = [
    op("Contrôle ultrasons", "Mesure de l'épaisseur des parois par ultrasons", 25),
    op(
        "Nettoyage des dépôts internes",
        "Élimination des dépôts et résidus avec une brosse souple",
        30,
    ),
];

const EPINGLE_HIGH: [OperationTemplate; 2] = [
    op(
        "Réparation ponctuelle",
        "Soudure des zones présentant des signes d'usure ou de faiblesse",
        40,
    ),
    op(
        "Traitement anticorrosion",
        "Application d'un revêtement protecteur sur les surfaces exposées",
        35,
    ),
];

const COLLECTEUR_LOW: [OperationTemplate; 1] = [op(
    "Vérification étanchéité",
    "Test de pression pour détecter les fuites potentielles",
    20,
)];

const COLLECTEUR_MEDIUM: [OperationTemplate; 2] = [
    op("Nettoyage interne", "Élimination des dépôts et de la corrosion interne", 25),
    op("Traitement anticorrosion", "Application d'un revêtement protecteur", 20),
];

const COLLECTEUR_HIGH: [OperationTemplate; 3] = [
    op("Inspection endoscopique", "Examen détaillé des surfaces internes avec caméra", 30),
    op("Test ressuage", "Détection des microfissures par ressuage", 35),
    op(
        "Renforcement des zones critiques",
        "Traitement spécial des zones soumises à fortes contraintes",
        30,
    ),
];

const TUBE_LOW: [OperationTemplate; 1] = [op(
    "Contrôle visuel des points d'ancrage",
    "Vérification des fixations et supports",
    15,
)];

const TUBE_MEDIUM: [OperationTemplate; 2] = [
    op(
        "Mesure d'épaisseur par ultrasons",
        "Contrôle de l'épaisseur des parois aux points critiques",
        30,
    ),
    op(
        "Nettoyage des surfaces externes",
        "Élimination des dépôts et résidus de combustion",
        25,
    ),
];

const TUBE_HIGH: [OperationTemplate; 3] = [
    op(
        "Installation capteurs de température",
        "Mise en place de capteurs aux points critiques",
        35,
    ),
    op("Analyse vibratoire", "Mesure des vibrations en fonctionnement", 30),
    op("Renforcement structurel", "Installation de supports supplémentaires", 40),
];

const BRANCHES_LOW: [OperationTemplate; 1] = [op(
    "Contrôle des raccords",
    "Vérification de l'intégrité des raccordements",
    20,
)];

const BRANCHES_MEDIUM: [OperationTemplate; 2] = [
    op("Test d'étanchéité", "Recherche de fuites aux jonctions", 25),
    op("Nettoyage interne", "Élimination des dépôts accumulés", 30),
];

const BRANCHES_HIGH: [OperationTemplate; 3] = [
    op("Remplacement des joints", "Installation de nouveaux joints d'étanchéité", 30),
    op("Inspection thermographique", "Détection des points chauds en fonctionnement", 25),
    op("Renforcement des raccords", "Amélioration des points de jonction critiques", 35),
];

/// Operations contributed by one tier of one category (not cumulative).
pub const fn tier_operations(
    category: SubcomponentCategory,
    tier: MaintenanceTier,
) -> &'static [OperationTemplate] {
    use MaintenanceTier::{High, Low, Medium};
    use SubcomponentCategory::{Branches, Collecteur, Epingle, Tube};
    match (category, tier) {
        (Epingle, Low) => &EPINGLE_LOW,
        (Epingle, Medium) => &EPINGLE_MEDIUM,
        (Epingle, High) => &EPINGLE_HIGH,
        (Collecteur, Low) => &COLLECTEUR_LOW,
        (Collecteur, Medium) => &COLLECTEUR_MEDIUM,
        (Collecteur, High) => &COLLECTEUR_HIGH,
        (Tube, Low) => &TUBE_LOW,
        (Tube, Medium) => &TUBE_MEDIUM,
        (Tube, High) => &TUBE_HIGH,
        (Branches, Low) => &BRANCHES_LOW,
        (Branches, Medium) => &BRANCHES_MEDIUM,
        (Branches, High) => &BRANCHES_HIGH,
    }
}

// ============================================================================
// Materials
// ============================================================================

/// Listed on every work order.
pub const COMMON_MATERIALS: [&str; 3] = ["Lampe torche", "Caméra d'inspection", "Appareil photo"];

/// Fixed extra materials when the subcomponent has no category.
pub const GENERIC_MATERIALS: [&str; 4] = [
    "Brosse métallique",
    "Produit nettoyant",
    "Caméra endoscopique",
    "Peinture anticorrosion",
];

/// Candidate materials sampled per category.
pub const fn material_candidates(category: SubcomponentCategory) -> &'static [&'static str] {
    match category {
        SubcomponentCategory::Epingle => &[
            "Appareil à ultrasons",
            "Gel de contact",
            "Brosse semi-rigide",
            "Produit nettoyant",
            "Poste à souder",
            "Électrodes de soudure",
        ],
        SubcomponentCategory::Collecteur => &[
            "Kit de test d'étanchéité",
            "Endoscope",
            "Brosse métallique",
            "Pinceau / rouleau",
            "Peinture anticorrosion",
            "Produit dégraissant",
        ],
        SubcomponentCategory::Tube => &[
            "Appareil à ultrasons",
            "Gel de contact",
            "Brosse flexible",
            "Capteurs de température",
            "Miroir d'inspection",
            "Peinture anticorrosion",
        ],
        SubcomponentCategory::Branches => &[
            "Kit de test d'étanchéité",
            "Outils de serrage",
            "Brosse métallique",
            "Produit nettoyant",
            "Caméra thermique",
            "Joints de rechange",
        ],
    }
}

/// Number of sampled category materials per tier.
pub const fn material_sample_size(tier: MaintenanceTier) -> usize {
    match tier {
        MaintenanceTier::Low => 3,
        MaintenanceTier::Medium => 4,
        MaintenanceTier::High => 5,
    }
}

// ============================================================================
// Default criticality and images
// ============================================================================

/// Field-experience criticality of the installed parts.
pub const fn default_criticality(component: Component, subcomponent: Subcomponent) -> Option<u32> {
    use Component::*;
    use Subcomponent::*;
    match (component, subcomponent) {
        (EconomiseurBt, CollecteurSortie) => Some(45),
        (EconomiseurBt, Epingle) => Some(24),
        (EconomiseurHt, CollecteurEntree) => Some(24),
        (EconomiseurHt, TubesSuspension) => Some(16),
        (SurchauffeurBt, Epingle) => Some(40),
        (SurchauffeurBt, CollecteurEntree) => Some(24),
        (SurchauffeurHt, TubePorteur | CollecteurSortie) => Some(30),
        (SurchauffeurHt, BranchesEntree) => Some(24),
        (RechauffeurBt, CollecteurEntree) => Some(30),
        (RechauffeurBt, TubesSuspension | TubePorteur) => Some(24),
        (RechauffeurHt, BranchesSortie) => Some(36),
        (RechauffeurHt, CollecteurEntree) => Some(24),
        (RechauffeurHt, CollecteurSortie) => Some(20),
        _ => None,
    }
}

/// Photo file names attached to the work order of an installed part.
pub const fn image_files(component: Component, subcomponent: Subcomponent) -> &'static [&'static str] {
    use Component::*;
    use Subcomponent::*;
    match (component, subcomponent) {
        (EconomiseurBt, CollecteurSortie) => &["eco_bt_collecteur_1.png", "eco_bt_collecteur_2.png"],
        (EconomiseurBt, Epingle) => &["eco_bt_epingle_1.png", "eco_bt_epingle_2.png"],
        (EconomiseurHt, CollecteurEntree) => &["eco_ht_collecteur_1.png", "eco_ht_collecteur_2.png"],
        (EconomiseurHt, TubesSuspension) => &["eco_ht_tubes_1.png", "eco_ht_tubes_2.png"],
        (SurchauffeurBt, Epingle) => &["sur_bt_epingle_1.png", "sur_bt_epingle_2.png"],
        (SurchauffeurBt, CollecteurEntree) => &["sur_bt_collecteur_1.png", "sur_bt_collecteur_2.png"],
        (SurchauffeurHt, TubePorteur) => &["sur_ht_tube_1.png", "sur_ht_tube_2.png"],
        (SurchauffeurHt, BranchesEntree) => &["sur_ht_branches_1.png", "sur_ht_branches_2.png"],
        (SurchauffeurHt, CollecteurSortie) => &["sur_ht_collecteur_1.png", "sur_ht_collecteur_2.png"],
        (RechauffeurBt, CollecteurEntree) => &["rch_bt_collecteur_1.png", "rch_bt_collecteur_2.png"],
        (RechauffeurBt, TubesSuspension) => &["rch_bt_tubes_1.png", "rch_bt_tubes_2.png"],
        (RechauffeurBt, TubePorteur) => &["rch_bt_porteur_1.png", "rch_bt_porteur_2.png"],
        (RechauffeurHt, BranchesSortie) => &["rch_ht_branches_1.png", "rch_ht_branches_2.png"],
        (RechauffeurHt, CollecteurEntree) => &["rch_ht_collecteur_1.png", "rch_ht_collecteur_2.png"],
        (RechauffeurHt, CollecteurSortie) => {
            &["rch_ht_collecteur_sortie_1.png", "rch_ht_collecteur_sortie_2.png"]
        }
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_installed_part_has_defaults_and_images() {
        for c in Component::ALL {
            for s in c.installed() {
                assert!(default_criticality(c, *s).is_some(), "{c} / {s} has no default");
                assert_eq!(image_files(c, *s).len(), 2, "{c} / {s} images");
                assert!(
                    image_files(c, *s).iter().all(|f| f.starts_with(c.short_code())),
                    "{c} / {s} images use another prefix"
                );
            }
        }
    }

    #[test]
    fn test_tier_operation_sizes() {
        const STATIC_LOW: &[OperationTemplate] = tier_operations(SubcomponentCategory::Tube, MaintenanceTier::Low);
        assert_eq!(STATIC_LOW[0].name, "Contrôle visuel des points d'ancrage");
        for cat in SubcomponentCategory::ALL {
            let sizes: Vec<usize> = [MaintenanceTier::Low, MaintenanceTier::Medium, MaintenanceTier::High]
                .into_iter()
                .map(|tier| tier_operations(cat, tier).len())
                .collect();
            assert_eq!(sizes[..2], [1, 2], "{cat:?}");
            assert!(sizes[2] >= 2, "{cat:?}");
            assert!(tier_operations(cat, MaintenanceTier::High).iter().all(|o| o.minutes > 0));
        }
    }

    #[test]
    fn test_uninstalled_part_has_no_default() {
        assert_eq!(default_criticality(Component::EconomiseurBt, Subcomponent::TubePorteur), None);
        assert!(image_files(Component::EconomiseurBt, Subcomponent::TubePorteur).is_empty());
    }

    #[test]
    fn test_candidate_pools_cover_largest_sample() {
        for cat in SubcomponentCategory::ALL {
            assert!(material_candidates(cat).len() >= material_sample_size(MaintenanceTier::High));
        }
    }
}
