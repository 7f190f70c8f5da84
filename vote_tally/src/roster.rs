use log::{debug, warn};
use std::collections::HashMap;

/// A registered person: the opaque identifier used on the ballots and the
/// name to show in the tallies.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
}

impl RosterEntry {
    pub fn new(id: &str, name: &str) -> RosterEntry {
        RosterEntry {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

// Class list used when no other roster is configured.
const BUILTIN_ROSTER: &[(&str, &str)] = &[
    ("241035387", "LEA ACUÑA"),
    ("242058143", "ANDRES ALOMAR"),
    ("24001632K", "EMILIA ALVAREZ"),
    ("239604099", "PALOMA ASTORGA"),
    ("241983889", "DOMINGA CACERES"),
    ("238721709", "VALENTIN CALLEJA"),
    ("241730395", "MARÍA CARTER"),
    ("242082257", "FELIPE CASTRO"),
    ("239490794", "GADIR CHACOFF"),
    ("239790070", "FERNANDO CHAMORRO"),
    ("239154379", "PEDRO ESCOBAR"),
    ("239780059", "IGNACIO FERRADA"),
    ("241914259", "AURORA GUTIERREZ"),
    ("239703275", "MARTIN HERRERA"),
    ("239899935", "JUAN CRISTOBAL JULIO"),
    ("239768210", "AISHA KUZHITHATTIL"),
    ("23922010K", "GABRIELA LEIVA"),
    ("24050958K", "VIOLETA LETELIER"),
    ("238896975", "JOSEFINA MARIN"),
    ("241195767", "SOFIA MAUREIRA"),
    ("241053091", "JAVIER MUCI"),
    ("241456765", "POLO MUÑOZ"),
    ("24216072K", "CONSTANZA PIÑA"),
    ("239832792", "MIA RENCK"),
    ("239737730", "CATALINA ROMERO"),
    ("24007415K", "ANTONIA SABANDO"),
    ("239398987", "MAX TREWHELA"),
    ("239670717", "FERRAN XARLES"),
];

/// Immutable mapping from ballot identifiers to display names.
///
/// ```
/// use vote_tally::Roster;
///
/// let roster = Roster::from_pairs(&[("R1", "Alice")]);
/// assert_eq!(roster.resolve("R1"), "Alice");
/// assert_eq!(roster.resolve("R9"), "R9");
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Roster {
    names: HashMap<String, String>,
}

impl Roster {
    /// Builds the roster. If an identifier is listed several times, the last entry wins.
    pub fn new(entries: &[RosterEntry]) -> Roster {
        let mut names: HashMap<String, String> = HashMap::new();
        for e in entries.iter() {
            if let Some(previous) = names.insert(e.id.clone(), e.name.clone()) {
                warn!(
                    "Roster: identifier {} listed twice ({} replaced by {})",
                    e.id, previous, e.name
                );
            }
        }
        debug!("Roster: {} entries", names.len());
        Roster { names }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Roster {
        let entries: Vec<RosterEntry> = pairs
            .iter()
            .map(|(id, name)| RosterEntry::new(id, name))
            .collect();
        Roster::new(&entries)
    }

    pub fn builtin() -> Roster {
        Roster::from_pairs(BUILTIN_ROSTER)
    }

    /// The display name of an identifier, or the identifier itself if it is not registered.
    pub fn resolve<'a>(&'a self, id: &'a str) -> &'a str {
        self.names.get(id).map(|s| s.as_str()).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
