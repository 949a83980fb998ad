//! Begrenztes Log der ausgelösten Änderungs-Benachrichtigungen.

use super::ChangeReason;

/// Ein Log-Eintrag: Grund und Polygon-Anzahl nach der Änderung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeLogEntry {
    /// Auslöser der Benachrichtigung
    pub reason: ChangeReason,
    /// Anzahl Polygone nach der Änderung
    pub polygon_count: usize,
}

/// Speichert ausgelöste Benachrichtigungen in Reihenfolge.
#[derive(Debug, Default)]
pub struct ChangeLog {
    entries: Vec<ChangeLogEntry>,
}

impl ChangeLog {
    const MAX_ENTRIES: usize = 1000;
}

impl ChangeLog {
    /// Erstellt ein leeres Log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Fügt einen Eintrag hinzu.
    /// Begrenzt auf MAX_ENTRIES, ältere Einträge werden verworfen.
    pub fn record(&mut self, reason: ChangeReason, polygon_count: usize) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(ChangeLogEntry {
            reason,
            polygon_count,
        });
    }

    /// Gibt die Anzahl der Einträge zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Einträge vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[ChangeLogEntry] {
        &self.entries
    }

    /// Nur die Gründe, in Reihenfolge.
    pub fn reasons(&self) -> Vec<ChangeReason> {
        self.entries.iter().map(|entry| entry.reason).collect()
    }
}
