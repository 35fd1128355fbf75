//! Chat Regression Tests
//!
//! Routing of representative questions through the assistant, with and
//! without a component catalog and a generated FMECA table.

use boiler_amdec::chat::intent::{classify, Classified, Intent};
use boiler_amdec::knowledge::chat_tables::templates;
use boiler_amdec::knowledge::ComponentCatalog;
use boiler_amdec::{ChatBot, Component, FmecaBuilder, HistoryRecord, Subcomponent};

const CATALOG: &str = r#"{
    "chaudiere": {
        "surchauffeur ht": {
            "description_simple": "Porte la vapeur à sa température finale.",
            "matériaux": { "tubes": "T91" },
            "structure": { "nappes": ["suspendues", "verticales"] },
            "AMDEC": { "mode_defaillance": "fluage", "causes": ["surchauffe prolongée"] },
            "maintenance": { "personnel": ["un inspecteur CND", "deux soudeurs"] }
        }
    }
}"#;

fn bot() -> ChatBot {
    let catalog: ComponentCatalog = serde_json::from_str(CATALOG).expect("catalog fixture");
    ChatBot::new(Some(11)).with_catalog(catalog)
}

#[test]
fn bonjour_alone_is_a_greeting() {
    assert_eq!(classify("bonjour"), Classified::Greeting);
    let answer = bot().generate_response("bonjour");
    assert!(templates::GREETING.contains(&answer.as_str()), "{answer}");
}

#[test]
fn greeting_never_reaches_component_handling() {
    let answer = bot().generate_response("Bonjour surchauffeur HT");
    assert!(templates::GREETING.contains(&answer.as_str()), "{answer}");
}

#[test]
fn routing_by_intent() {
    let cases = [
        ("quelles défaillances pour le sht tube porteur ?", Intent::FailureModes),
        ("comment faire l'entretien du surchauffeur ht", Intent::Maintenance),
        ("quel est le risque sur le sht", Intent::Criticality),
        ("parle-moi du surchauffeur ht", Intent::GeneralInfo),
    ];
    for (query, expected) in cases {
        match classify(query) {
            Classified::About { component, intent, .. } => {
                assert_eq!(component, Component::SurchauffeurHt, "{query}");
                assert_eq!(intent, expected, "{query}");
            }
            other => panic!("{query}: unexpected {other:?}"),
        }
    }
}

#[test]
fn catalog_enriches_answers() {
    let mut bot = bot();

    let info = bot.generate_response("parle-moi du surchauffeur ht");
    assert!(info.contains("Porte la vapeur à sa température finale."), "{info}");
    assert!(info.contains("Il est fabriqué avec tubes: T91."), "{info}");
    assert!(info.contains("Sa structure comprend nappes: suspendues, verticales."), "{info}");

    let failures = bot.generate_response("quelles défaillances pour le sht tube porteur ?");
    assert!(failures.contains("Long-term overheat, Rupture fluage, Déformation permanente"), "{failures}");
    assert!(failures.contains("causées par surchauffe prolongée"), "{failures}");

    let maintenance = bot.generate_response("comment faire l'entretien du surchauffeur ht");
    assert!(maintenance.contains("La maintenance trimestrielle devrait inclure"), "{maintenance}");
    assert!(maintenance.ends_with("effectuée par un inspecteur CND, deux soudeurs."), "{maintenance}");

    assert_eq!(bot.history().len(), 3);
}

#[test]
fn component_without_catalog_entry_uses_fixed_text() {
    let answer = bot().generate_response("présente-moi l'eco bt");
    assert!(answer.contains("Le Économiseur BT est un composant important de la chaudière."), "{answer}");
    assert!(answer.contains("Le Collecteur sortie"), "first installed part: {answer}");
}

#[test]
fn criticality_prefers_loaded_fmeca() {
    let history = vec![HistoryRecord::from_cells("Eco HT", "Tubes suspension", "vibration", 0.2)];
    let table = FmecaBuilder::new(Some(1)).generate(&history);
    let expected = table.criticality_for(Component::EconomiseurHt, Subcomponent::TubesSuspension).unwrap();

    let mut bot = ChatBot::new(Some(3)).with_fmeca(table);
    let answer = bot.generate_response("criticité eco ht tubes de suspension");
    assert!(answer.contains(&format!(" {expected}")), "{answer}");

    let mut plain = ChatBot::new(Some(3));
    let answer = plain.generate_response("criticité eco ht tubes de suspension");
    assert!(answer.contains("16"), "{answer}");
    assert!(answer.contains("criticité moyenne"), "{answer}");
}

#[test]
fn questions_without_component() {
    let mut bot = bot();
    assert_eq!(bot.generate_response("j'ai une panne"), templates::FAILURE_GUIDANCE);
    assert_eq!(bot.generate_response("comment faire l'entretien ?"), templates::MAINTENANCE_GUIDANCE);
    let answer = bot.generate_response("quelle heure est-il");
    assert!(templates::NOT_UNDERSTOOD.contains(&answer.as_str()), "{answer}");
}
