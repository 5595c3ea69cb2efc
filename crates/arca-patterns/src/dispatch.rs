//! Overriding versus hiding, expressed as explicit dispatch.
//!
//! [`Record::save`] is resolved at run time through `&dyn Record`. A type
//! that wants its own behaviour without replacing the trait's exposes it
//! under a different name, so callers always see which one they get.

use tracing::debug;

/// A record that can be saved.
pub trait Record {
    /// Short type label used in logs.
    fn kind(&self) -> &'static str;

    /// Save the record. The provided behaviour is the base one.
    fn save(&self) -> String {
        "saved by base record".to_string()
    }
}

/// Uses the provided [`Record::save`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseRecord;

impl Record for BaseRecord {
    fn kind(&self) -> &'static str {
        "base"
    }
}

/// Replaces [`Record::save`]; the replacement wins through any `&dyn Record`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OverridingRecord;

impl Record for OverridingRecord {
    fn kind(&self) -> &'static str {
        "overriding"
    }

    fn save(&self) -> String {
        "saved by overriding record".to_string()
    }
}

/// Keeps the provided [`Record::save`] and adds an unrelated operation next
/// to it.
#[derive(Clone, Copy, Debug, Default)]
pub struct HidingRecord;

impl HidingRecord {
    /// The trait behaviour, reachable by name.
    pub fn save_base(&self) -> String {
        Record::save(self)
    }

    /// This type's own behaviour. Never reached through `&dyn Record`.
    pub fn save_hidden(&self) -> String {
        "saved by hiding record".to_string()
    }
}

impl Record for HidingRecord {
    fn kind(&self) -> &'static str {
        "hiding"
    }
}

/// Save every record through dynamic dispatch.
pub fn dispatch_all(records: &[&dyn Record]) -> Vec<String> {
    records
        .iter()
        .map(|record| {
            let out = record.save();
            debug!(kind = record.kind(), output = %out, "record dispatched");
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_through_trait_object() {
        let record: &dyn Record = &OverridingRecord;
        assert_eq!(record.save(), "saved by overriding record");
    }

    #[test]
    fn hiding_record_dispatches_to_base() {
        let record: &dyn Record = &HidingRecord;
        assert_eq!(record.save(), "saved by base record");
    }

    #[test]
    fn hiding_record_exposes_both_names() {
        let record = HidingRecord;
        assert_eq!(record.save_base(), "saved by base record");
        assert_eq!(record.save_hidden(), "saved by hiding record");
    }

    #[test]
    fn dispatch_all_preserves_order() {
        let out = dispatch_all(&[&BaseRecord, &OverridingRecord, &HidingRecord]);
        assert_eq!(
            out,
            vec![
                "saved by base record",
                "saved by overriding record",
                "saved by base record",
            ]
        );
    }
}
