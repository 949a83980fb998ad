//! Modus-Flags (Bitmaske) für die Interaktionsmodi der Engine.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

use serde::{Deserialize, Serialize};

use crate::error::FreeDrawError;

/// Kombinierbare Menge von Interaktionsmodi.
///
/// Invariante: enthält nie Bits außerhalb von [`ModeSet::ALL`]. Gilt auch für
/// deserialisierte Werte: unbekannte Bits scheitern schon beim Parsen.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ModeSet(u32);

impl ModeSet {
    /// Kein Modus aktiv
    pub const NONE: ModeSet = ModeSet(0);
    /// Neue Polygone per Freihand zeichnen
    pub const CREATE: ModeSet = ModeSet(1);
    /// Eckpunkte bestehender Polygone verschieben
    pub const EDIT: ModeSet = ModeSet(2);
    /// Polygone per Klick löschen
    pub const DELETE: ModeSet = ModeSet(4);
    /// Eckpunkte per Klick auf eine Kante einfügen
    pub const APPEND: ModeSet = ModeSet(8);
    /// EDIT und APPEND kombiniert
    pub const EDIT_APPEND: ModeSet = ModeSet(2 | 8);
    /// Alle Modi
    pub const ALL: ModeSet = ModeSet(1 | 2 | 4 | 8);

    /// Strikte Konvertierung: `None` wenn unbekannte Bits gesetzt sind.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(ModeSet(bits))
        } else {
            None
        }
    }

    /// Maskiert unbekannte Bits weg.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        ModeSet(bits & Self::ALL.0)
    }

    /// Wie [`ModeSet::from_bits`], aber mit Fehlertyp.
    pub fn try_from_bits(bits: u32) -> Result<Self, FreeDrawError> {
        Self::from_bits(bits).ok_or(FreeDrawError::InvalidMode(bits))
    }

    /// Rohwert der Bitmaske.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Gibt `true` zurück wenn kein Modus aktiv ist.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Prüft ob alle Bits von `other` gesetzt sind.
    pub const fn contains(self, other: ModeSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Prüft ob mindestens ein Bit von `other` gesetzt ist.
    pub const fn intersects(self, other: ModeSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Setzt die Bits von `other`.
    pub fn insert(&mut self, other: ModeSet) {
        self.0 |= other.0;
    }

    /// Löscht die Bits von `other`.
    pub fn remove(&mut self, other: ModeSet) {
        self.0 &= !other.0;
    }

    /// Kippt die Bits von `other`.
    pub fn toggle(&mut self, other: ModeSet) {
        self.0 ^= other.0;
    }

    /// CSS-Klassennamen für den Karten-Container (`mode-create`, `mode-edit`, …).
    pub fn class_names(self) -> Vec<&'static str> {
        [
            (ModeSet::CREATE, "mode-create"),
            (ModeSet::EDIT, "mode-edit"),
            (ModeSet::DELETE, "mode-delete"),
            (ModeSet::APPEND, "mode-append"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect()
    }
}

impl TryFrom<u32> for ModeSet {
    type Error = FreeDrawError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        ModeSet::try_from_bits(bits)
    }
}

impl From<ModeSet> for u32 {
    fn from(mode: ModeSet) -> u32 {
        mode.bits()
    }
}

impl BitOr for ModeSet {
    type Output = ModeSet;

    fn bitor(self, rhs: ModeSet) -> ModeSet {
        ModeSet(self.0 | rhs.0)
    }
}

impl BitAnd for ModeSet {
    type Output = ModeSet;

    fn bitand(self, rhs: ModeSet) -> ModeSet {
        ModeSet(self.0 & rhs.0)
    }
}

impl BitXor for ModeSet {
    type Output = ModeSet;

    fn bitxor(self, rhs: ModeSet) -> ModeSet {
        ModeSet(self.0 ^ rhs.0)
    }
}

impl Not for ModeSet {
    type Output = ModeSet;

    /// Komplement innerhalb von `ALL`.
    fn not(self) -> ModeSet {
        ModeSet(!self.0 & Self::ALL.0)
    }
}

impl fmt::Debug for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "ModeSet(NONE)");
        }
        let names: Vec<&str> = self
            .class_names()
            .into_iter()
            .map(|name| name.trim_start_matches("mode-"))
            .collect();
        write!(f, "ModeSet({})", names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_flags_have_expected_bits() {
        assert_eq!(ModeSet::EDIT_APPEND, ModeSet::EDIT | ModeSet::APPEND);
        assert_eq!(ModeSet::ALL.bits(), 15);
        assert!(ModeSet::ALL.contains(ModeSet::EDIT_APPEND));
        assert!(ModeSet::NONE.is_empty());
    }

    #[test]
    fn from_bits_rejects_unknown_bits() {
        assert_eq!(ModeSet::from_bits(3), Some(ModeSet::CREATE | ModeSet::EDIT));
        assert_eq!(ModeSet::from_bits(16), None);
        assert_eq!(
            ModeSet::try_from_bits(0x21),
            Err(FreeDrawError::InvalidMode(0x21))
        );
        assert_eq!(ModeSet::from_bits_truncate(0x21), ModeSet::CREATE);
    }

    #[test]
    fn not_stays_within_all() {
        assert_eq!(!ModeSet::CREATE, ModeSet::EDIT | ModeSet::DELETE | ModeSet::APPEND);
        assert_eq!(!ModeSet::ALL, ModeSet::NONE);
    }

    #[test]
    fn insert_remove_toggle() {
        let mut mode = ModeSet::NONE;
        mode.insert(ModeSet::CREATE);
        mode.insert(ModeSet::EDIT);
        mode.remove(ModeSet::CREATE);
        assert_eq!(mode, ModeSet::EDIT);
        mode.toggle(ModeSet::EDIT_APPEND);
        assert_eq!(mode, ModeSet::APPEND);
    }

    #[derive(Debug, Deserialize, Serialize)]
    struct Wrapper {
        mode: ModeSet,
    }

    #[test]
    fn deserialize_rejects_unknown_bits() {
        let parsed: Wrapper = toml::from_str("mode = 9").expect("gültige Bits sollten parsen");
        assert_eq!(parsed.mode, ModeSet::CREATE | ModeSet::APPEND);

        let error = toml::from_str::<Wrapper>("mode = 64").expect_err("Bit 64 ist unbekannt");
        assert!(error.to_string().contains("ungueltiger Modus"), "{error}");
    }

    #[test]
    fn serializes_as_plain_number() {
        let text = toml::to_string(&Wrapper {
            mode: ModeSet::EDIT_APPEND,
        })
        .expect("Serialisierung erwartet");
        assert_eq!(text.trim(), "mode = 10");
    }

    #[test]
    fn class_names_follow_flags() {
        let mode = ModeSet::CREATE | ModeSet::DELETE;
        assert_eq!(mode.class_names(), vec!["mode-create", "mode-delete"]);
        assert_eq!(format!("{mode:?}"), "ModeSet(create|delete)");
    }
}
