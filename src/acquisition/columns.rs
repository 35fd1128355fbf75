//! Header resolution for history sheets
//!
//! Shop-floor exports name their columns freely ("Équipement", "Durée
//! d'arrêt (h)", "Sous-composant"). Headers are normalised with
//! [`text::column_key`] and each required field claims the first unclaimed
//! column containing one of its aliases.

use crate::text;

/// Required history fields, in claim order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SousComposant,
    Composant,
    Cause,
    Duree,
}

impl Field {
    /// `sous_composant` claims first so that "Sous-composant" is never taken
    /// as the component column.
    pub const CLAIM_ORDER: [Self; 4] = [Self::SousComposant, Self::Composant, Self::Cause, Self::Duree];

    pub const fn name(self) -> &'static str {
        match self {
            Self::SousComposant => "sous_composant",
            Self::Composant => "composant",
            Self::Cause => "cause",
            Self::Duree => "duree",
        }
    }

    /// Normalised header fragments identifying the field; the name comes first.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::SousComposant => &["sous_composant", "subcomponent", "sub_component", "sous_ensemble"],
            Self::Composant => &["composant", "component", "equipement", "materiel"],
            Self::Cause => &["cause", "raison", "motif", "origine", "reason"],
            Self::Duree => &["duree", "heures", "temps", "time", "duration", "arret"],
        }
    }

    fn matches(self, key: &str) -> bool {
        self.aliases().iter().any(|a| key.contains(a))
    }
}

/// Column index of each required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub composant: usize,
    pub sous_composant: usize,
    pub cause: usize,
    pub duree: usize,
}

impl ColumnMap {
    /// Resolve the header row. On failure returns the names of the
    /// unresolved fields, in claim order.
    pub fn resolve(headers: &[String]) -> Result<Self, Vec<&'static str>> {
        let keys: Vec<String> = headers.iter().map(|h| text::column_key(h)).collect();
        let mut claimed = vec![false; keys.len()];
        let mut found = [None; 4];
        let mut missing = Vec::new();

        for (slot, field) in Field::CLAIM_ORDER.into_iter().enumerate() {
            let column = keys.iter().enumerate().position(|(i, key)| {
                !claimed[i]
                    && field.matches(key)
                    && !(field == Field::Composant && Field::SousComposant.matches(key))
            });
            match column {
                Some(i) => {
                    claimed[i] = true;
                    found[slot] = Some(i);
                }
                None => missing.push(field.name()),
            }
        }

        match found {
            [Some(sous_composant), Some(composant), Some(cause), Some(duree)] => {
                Ok(Self { composant, sous_composant, cause, duree })
            }
            _ => Err(missing),
        }
    }

    /// Largest resolved column index.
    pub fn max_index(&self) -> usize {
        self.composant.max(self.sous_composant).max(self.cause).max(self.duree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_headers() {
        let map = ColumnMap::resolve(&headers(&["Composant", "Sous-composant", "Cause", "Durée"])).unwrap();
        assert_eq!(map, ColumnMap { composant: 0, sous_composant: 1, cause: 2, duree: 3 });
    }

    #[test]
    fn test_subcomponent_is_never_taken_as_component() {
        let map =
            ColumnMap::resolve(&headers(&["Sous-composant", "Équipement", "Durée d'arrêt (h)", "Motif"])).unwrap();
        assert_eq!(map.sous_composant, 0);
        assert_eq!(map.composant, 1);
        assert_eq!(map.duree, 2);
        assert_eq!(map.cause, 3);
        assert_eq!(map.max_index(), 3);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let map = ColumnMap::resolve(&headers(&[
            "Date",
            "Component",
            "Subcomponent",
            "Reason",
            "Duration",
            "Commentaire",
        ]))
        .unwrap();
        assert_eq!(map.composant, 1);
        assert_eq!(map.duree, 4);
    }

    #[test]
    fn test_missing_columns_reported() {
        let missing = ColumnMap::resolve(&headers(&["Sous-composant", "Date"])).unwrap_err();
        assert_eq!(missing, vec!["composant", "cause", "duree"]);
    }
}
