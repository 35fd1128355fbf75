//! Chat answer tables: failure-mode lists, maintenance lists, frequencies,
//! criticality interpretations and response templates

use crate::types::{Component, CriticalityBand, Subcomponent};

pub const GENERIC_FAILURE_MODES: [&str; 4] = ["Corrosion", "Érosion", "Fatigue", "Fissuration"];

pub const GENERIC_MAINTENANCE: [&str; 4] = [
    "Inspection visuelle régulière",
    "Contrôle des paramètres opérationnels",
    "Nettoyage préventif",
    "Analyse des tendances",
];

/// Frequency word used when the component has no inspection interval.
pub const DEFAULT_FREQUENCY: &str = "régulière";

/// Typical failure modes quoted by the assistant for an installed part.
pub const fn failure_modes(component: Component, subcomponent: Subcomponent) -> &'static [&'static str] {
    use Component::*;
    use Subcomponent::*;
    match (component, subcomponent) {
        (EconomiseurBt, Epingle) => &["Corrosion externe", "Érosion", "Encrassement", "Fuites locales"],
        (EconomiseurBt, CollecteurSortie) => {
            &["Caustic attack", "Dépôts internes", "Perte matière", "Fissuration"]
        }
        (EconomiseurHt, CollecteurEntree) => {
            &["Érosion par cendres", "Amincissement accéléré", "Corrosion interne"]
        }
        (EconomiseurHt, TubesSuspension) => &["Fatigue mécanique", "Vibrations", "Fissures externes"],
        (SurchauffeurBt, Epingle) => &["Graphitization", "Corrosion côté feu", "Short-term overheat"],
        (SurchauffeurBt, CollecteurEntree) => &["Corrosion interne", "Érosion", "Fissuration"],
        (SurchauffeurHt, TubePorteur) => {
            &["Long-term overheat", "Rupture fluage", "Déformation permanente"]
        }
        (SurchauffeurHt, BranchesEntree) => {
            &["Fireside corrosion", "Perte métal externe", "Fissuration"]
        }
        (SurchauffeurHt, CollecteurSortie) => {
            &["SCC (Stress Corrosion Cracking)", "Fissures intergranulaires"]
        }
        (RechauffeurBt, CollecteurEntree) => &["Hydrogen damage", "Microfissures", "Corrosion interne"],
        (RechauffeurBt, TubesSuspension) => &["Fatigue thermique", "Fissures", "Déformation"],
        (RechauffeurBt, TubePorteur) => &["Fatigue thermique", "Cycles démarrage/arrêt", "Fissures"],
        (RechauffeurHt, BranchesSortie) => &["Acid attack", "Surface \"fromage suisse\"", "Corrosion"],
        (RechauffeurHt, CollecteurEntree) => &["Waterside corrosion", "Fissures internes", "Dépôts"],
        (RechauffeurHt, CollecteurSortie) => {
            &["Dissimilar metal weld", "Rupture soudure", "Contraintes interfaces"]
        }
        _ => &GENERIC_FAILURE_MODES,
    }
}

/// Recommended maintenance operations quoted by the assistant.
pub const fn maintenance_operations(
    component: Component,
    subcomponent: Subcomponent,
) -> &'static [&'static str] {
    use Component::*;
    use Subcomponent::*;
    match (component, subcomponent) {
        (EconomiseurBt, Epingle) => &[
            "Inspection visuelle des surfaces",
            "Contrôle d'épaisseur par ultrasons",
            "Nettoyage des dépôts",
            "Application d'un revêtement protecteur",
        ],
        (EconomiseurBt, CollecteurSortie) => &[
            "Inspection visuelle des soudures",
            "Test d'étanchéité",
            "Rinçage chimique",
            "Contrôle du pH",
        ],
        (EconomiseurHt, CollecteurEntree) => &[
            "Nettoyage pneumatique",
            "Inspection visuelle",
            "Contrôle des raccords",
            "Traitement anti-corrosion",
        ],
        (EconomiseurHt, TubesSuspension) => &[
            "Installation de renforts",
            "Surveillance vibratoire",
            "Inspection visuelle",
            "Vérification des fixations",
        ],
        (SurchauffeurBt, Epingle) => &[
            "Contrôle des soudures",
            "Inspection thermique",
            "Nettoyage des dépôts",
            "Remplacement préventif",
        ],
        (SurchauffeurBt, CollecteurEntree) => &[
            "Injection d'additifs anti-slagging",
            "Contrôle des raccords",
            "Inspection des points chauds",
            "Nettoyage interne",
        ],
        (SurchauffeurHt, TubePorteur) => &[
            "Installation de capteurs de température",
            "Surveillance continue",
            "Inspection de la structure cristalline",
            "Analyse de contraintes",
        ],
        (SurchauffeurHt, BranchesEntree) => &[
            "Optimisation de la combustion",
            "Nettoyage des surfaces",
            "Contrôle des raccords",
            "Analyse des dépôts",
        ],
        (SurchauffeurHt, CollecteurSortie) => &[
            "Remplacement des matériaux par des aciers austénitiques",
            "Contrôle ultrasons",
            "Analyse des contraintes",
            "Inspection des soudures",
        ],
        (RechauffeurBt, CollecteurEntree) => &[
            "Contrôle chimie eau",
            "Surveillance du pH",
            "Inspection des dépôts",
            "Nettoyage interne",
        ],
        (RechauffeurBt, TubesSuspension) => &[
            "Inspection thermique",
            "Analyse des vibrations",
            "Renforcement des supports",
            "Contrôle des fixations",
        ],
        (RechauffeurBt, TubePorteur) => &[
            "Inspection thermique",
            "Analyse des cycles",
            "Contrôle des fixations",
            "Renforcement structurel",
        ],
        (RechauffeurHt, BranchesSortie) => &[
            "Procédures nettoyage contrôlé",
            "Inspection des surfaces",
            "Analyse chimique des dépôts",
            "Remplacement des joints",
        ],
        (RechauffeurHt, CollecteurEntree) => &[
            "Traitement eau déminéralisée",
            "Contrôle de la corrosion",
            "Inspection par endoscopie",
            "Analyse des dépôts",
        ],
        (RechauffeurHt, CollecteurSortie) => &[
            "Contrôle ultrasons soudure",
            "Surveillance des interfaces",
            "Inspection des contraintes",
            "Traitement thermique",
        ],
        _ => &GENERIC_MAINTENANCE,
    }
}

/// Inspection interval of a component.
pub const fn inspection_frequency(component: Component) -> &'static str {
    match component {
        Component::EconomiseurBt
        | Component::SurchauffeurBt
        | Component::SurchauffeurHt
        | Component::RechauffeurHt => "trimestrielle",
        Component::EconomiseurHt | Component::RechauffeurBt => "semestrielle",
    }
}

/// Sentence completing "<component> - <subcomponent> ..." for a criticality band.
pub const fn interpretation(band: CriticalityBand) -> &'static str {
    match band {
        CriticalityBand::Negligible => {
            "présente une criticité négligeable. Une maintenance corrective est suffisante."
        }
        CriticalityBand::Moderate => {
            "présente une criticité moyenne. Une maintenance préventive systématique est recommandée."
        }
        CriticalityBand::High => {
            "présente une criticité élevée. Une maintenance préventive conditionnelle est nécessaire."
        }
        CriticalityBand::Unacceptable => {
            "présente une criticité interdite. Une remise en cause complète de la conception est requise."
        }
    }
}

// ============================================================================
// Response templates
// ============================================================================

/// Response template families. Placeholders are `{component}`,
/// `{subcomponent}`, `{info}`, `{modes}`, `{maintenance}`, `{criticality}`
/// and `{interpretation}`.
pub mod templates {
    pub const GREETING: [&str; 3] = [
        "Bonjour ! Comment puis-je vous aider avec la maintenance des chaudières aujourd'hui ?",
        "Salut ! Je suis là pour répondre à vos questions sur les AMDEC et la maintenance des chaudières.",
        "Bonjour, que puis-je faire pour vous concernant les chaudières et leur maintenance ?",
    ];

    pub const FAREWELL: [&str; 3] = [
        "Au revoir ! N'hésitez pas à revenir si vous avez d'autres questions.",
        "À bientôt ! J'espère avoir pu vous aider.",
        "Bonne journée ! Je reste disponible pour toute autre question sur les chaudières.",
    ];

    pub const COMPONENT_INFO: [&str; 3] = [
        "Le {component} est un élément important de la chaudière. {info}",
        "Concernant le {component}, voici ce que je peux vous dire : {info}",
        "Informations sur le {component} : {info}",
    ];

    pub const FAILURE_MODE: [&str; 3] = [
        "Les modes de défaillance courants pour {component} - {subcomponent} incluent : {modes}",
        "Pour {component} - {subcomponent}, voici les défaillances typiques : {modes}",
        "Le {component} - {subcomponent} peut présenter les défaillances suivantes : {modes}",
    ];

    pub const MAINTENANCE: [&str; 3] = [
        "Pour la maintenance de {component} - {subcomponent}, je recommande : {maintenance}",
        "Voici les opérations de maintenance recommandées pour {component} - {subcomponent} : {maintenance}",
        "La maintenance de {component} - {subcomponent} nécessite : {maintenance}",
    ];

    pub const CRITICALITY: [&str; 3] = [
        "La criticité de {component} - {subcomponent} est de {criticality}. {interpretation}",
        "Pour {component} - {subcomponent}, l'indice de criticité est de {criticality}. {interpretation}",
        "Avec une criticité de {criticality}, {component} - {subcomponent} {interpretation}",
    ];

    pub const NOT_UNDERSTOOD: [&str; 3] = [
        "Je ne suis pas sûr de comprendre votre question. Pouvez-vous reformuler ?",
        "Désolé, je n'ai pas bien saisi votre demande. Pourriez-vous préciser ?",
        "Je ne comprends pas complètement. Pouvez-vous me donner plus de détails ?",
    ];

    pub const FAILURE_GUIDANCE: &str = "Pour obtenir des informations sur les modes de défaillance, \
        veuillez préciser le composant concerné. Par exemple : \
        \"Quels sont les modes de défaillance de l'économiseur BT ?\"";

    pub const MAINTENANCE_GUIDANCE: &str = "Pour obtenir des informations sur la maintenance, \
        veuillez préciser le composant concerné. Par exemple : \
        \"Comment faire la maintenance du surchauffeur HT ?\"";

    /// Substitute `{key}` placeholders.
    pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
        values.iter().fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{key}}}"), value)
        })
    }
}
