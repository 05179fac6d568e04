//! Search modes and their input forms.
//!
//! Each [`Mode`] owns a small form of typed fields (text, choice, slider)
//! with the defaults the service documentation uses as examples. Submitting
//! a form runs [`build_query`], which parses the field values into a
//! `molq_core` [`Query`] — numeric parsing happens here, at the UI boundary,
//! so core queries always carry well-typed values.

use crate::event::{AppEvent, Direction};
use molq_core::{Cid, MassType, Query, StructureKind};

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

/// One entry in the search-method sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    ByCid,
    ByName,
    BySmiles,
    ByFormula,
    ByMass,
    ByStructure,
    BySimilarity,
    ByCrossReference,
    FullRecords,
}

impl Mode {
    pub const ALL: [Mode; 9] = [
        Mode::ByCid,
        Mode::ByName,
        Mode::BySmiles,
        Mode::ByFormula,
        Mode::ByMass,
        Mode::ByStructure,
        Mode::BySimilarity,
        Mode::ByCrossReference,
        Mode::FullRecords,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mode::ByCid => "By CID",
            Mode::ByName => "By Name",
            Mode::BySmiles => "By SMILES",
            Mode::ByFormula => "By Molecular Formula",
            Mode::ByMass => "By Mass",
            Mode::ByStructure => "By Structure Search",
            Mode::BySimilarity => "By Similarity Search",
            Mode::ByCrossReference => "By Cross Reference",
            Mode::FullRecords => "View Full Records",
        }
    }

    /// Build this mode's form with its default values.
    pub fn form(self) -> FormState {
        let fields = match self {
            Mode::ByCid => vec![Field::text("CID", "2244")],
            Mode::ByName => vec![Field::text("Name", "glucose")],
            Mode::BySmiles => vec![Field::text("SMILES", "CC(=O)OC1=CC=CC=C1C(=O)O")],
            Mode::ByFormula => vec![Field::text("Formula", "C6H12O6")],
            Mode::ByMass => vec![
                Field::choice(
                    "Mass type",
                    &["molecular_weight", "exact_mass", "monoisotopic_mass"],
                ),
                Field::choice("Method", &["Equals a Value", "Within Range"]),
                Field::text("Value", "400.0"),
                Field::text("Minimum", "400.0"),
                Field::text("Maximum", "400.05"),
            ],
            Mode::ByStructure => vec![
                Field::text("SMILES", "C1CCCCC1"),
                Field::choice("Search type", &["substructure", "superstructure"]),
            ],
            Mode::BySimilarity => vec![
                Field::text("SMILES", "CC(=O)OC1=CC=CC=C1C(=O)O"),
                Field::slider("Threshold", 90, 1, 100),
            ],
            Mode::ByCrossReference => vec![
                Field::text("Xref type", "PatentID"),
                Field::text("Xref value", "US20050159403A1"),
            ],
            Mode::FullRecords => vec![
                Field::text("CID", "2244"),
                Field::choice("Action", &["View as JSON", "Download SDF"]),
            ],
        };
        FormState {
            mode: self,
            fields,
            selected: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// The editable value of one form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free-text input with a byte-offset cursor.
    Text { value: String, cursor: usize },
    /// One of a fixed set of options, cycled with ←/→.
    Choice {
        options: &'static [&'static str],
        selected: usize,
    },
    /// An integer adjusted with ←/→, clamped to `min..=max`.
    Slider { value: u8, min: u8, max: u8 },
}

/// One labelled field of a mode's form.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub value: FieldValue,
}

impl Field {
    fn text(label: &'static str, default: &str) -> Self {
        Field {
            label,
            value: FieldValue::Text {
                cursor: default.len(),
                value: default.to_string(),
            },
        }
    }

    fn choice(label: &'static str, options: &'static [&'static str]) -> Self {
        Field {
            label,
            value: FieldValue::Choice {
                options,
                selected: 0,
            },
        }
    }

    fn slider(label: &'static str, value: u8, min: u8, max: u8) -> Self {
        Field {
            label,
            value: FieldValue::Slider { value, min, max },
        }
    }
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// Editable state of one mode's form. Forms persist per mode for the whole
/// session, so switching modes never loses typed input.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub mode: Mode,
    pub fields: Vec<Field>,
    /// Index of the field that receives editing events.
    pub selected: usize,
}

impl FormState {
    /// Handle a key event from the app shell.
    ///
    /// `Nav(Up/Down)` moves between fields; `Char`/`Backspace` edit the
    /// selected text field; `Nav(Left/Right)` moves the text cursor, cycles
    /// a choice, or adjusts a slider.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.selected = self.selected.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                if self.selected + 1 < self.fields.len() {
                    self.selected += 1;
                }
            }
            AppEvent::Char(c) => {
                if let FieldValue::Text { value, cursor } = &mut self.fields[self.selected].value {
                    value.insert(*cursor, *c);
                    *cursor += c.len_utf8();
                    tracing::debug!(field = self.fields[self.selected].label, "form: char inserted");
                }
            }
            AppEvent::Backspace => {
                if let FieldValue::Text { value, cursor } = &mut self.fields[self.selected].value {
                    if *cursor > 0 {
                        // Walk back one char boundary
                        let prev = value[..*cursor]
                            .char_indices()
                            .last()
                            .map(|(i, _)| i)
                            .unwrap_or(0);
                        value.remove(prev);
                        *cursor = prev;
                    }
                }
            }
            AppEvent::Nav(Direction::Left) => match &mut self.fields[self.selected].value {
                FieldValue::Text { value, cursor } => {
                    if *cursor > 0 {
                        *cursor = value[..*cursor]
                            .char_indices()
                            .last()
                            .map(|(i, _)| i)
                            .unwrap_or(0);
                    }
                }
                FieldValue::Choice { options, selected } => {
                    *selected = (*selected + options.len() - 1) % options.len();
                }
                FieldValue::Slider { value, min, .. } => {
                    if *value > *min {
                        *value -= 1;
                    }
                }
            },
            AppEvent::Nav(Direction::Right) => match &mut self.fields[self.selected].value {
                FieldValue::Text { value, cursor } => {
                    if *cursor < value.len() {
                        *cursor = value[*cursor..]
                            .char_indices()
                            .nth(1)
                            .map(|(i, _)| *cursor + i)
                            .unwrap_or(value.len());
                    }
                }
                FieldValue::Choice { options, selected } => {
                    *selected = (*selected + 1) % options.len();
                }
                FieldValue::Slider { value, max, .. } => {
                    if *value < *max {
                        *value += 1;
                    }
                }
            },
            _ => {}
        }
    }

    /// The current text of the field with this label, if it is a text field.
    pub fn text(&self, label: &str) -> Option<&str> {
        self.fields.iter().find_map(|f| match &f.value {
            FieldValue::Text { value, .. } if f.label == label => Some(value.as_str()),
            _ => None,
        })
    }

    /// The selected option of the choice field with this label.
    pub fn choice(&self, label: &str) -> Option<&'static str> {
        self.fields.iter().find_map(|f| match &f.value {
            FieldValue::Choice { options, selected } if f.label == label => {
                Some(options[*selected])
            }
            _ => None,
        })
    }

    /// The value of the slider field with this label.
    pub fn slider(&self, label: &str) -> Option<u8> {
        self.fields.iter().find_map(|f| match &f.value {
            FieldValue::Slider { value, .. } if f.label == label => Some(*value),
            _ => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Form → query
// ---------------------------------------------------------------------------

/// Parse the form's current values into a query.
///
/// String fields are passed through verbatim (the service rejects malformed
/// identifiers itself); only numeric fields are parsed here, and a parse
/// failure is returned as the user-visible message.
pub fn build_query(form: &FormState) -> Result<Query, String> {
    match form.mode {
        Mode::ByCid => Ok(Query::ByCid {
            cid: Cid::new(form.text("CID").unwrap_or("")),
        }),
        Mode::ByName => Ok(Query::ByName {
            name: form.text("Name").unwrap_or("").to_string(),
        }),
        Mode::BySmiles => Ok(Query::BySmiles {
            smiles: form.text("SMILES").unwrap_or("").to_string(),
        }),
        Mode::ByFormula => Ok(Query::ByFormula {
            formula: form.text("Formula").unwrap_or("").to_string(),
        }),
        Mode::ByMass => {
            let mass_type = match form.choice("Mass type") {
                Some("exact_mass") => MassType::ExactMass,
                Some("monoisotopic_mass") => MassType::MonoisotopicMass,
                _ => MassType::MolecularWeight,
            };
            if form.choice("Method") == Some("Within Range") {
                Ok(Query::ByMassRange {
                    mass_type,
                    min: parse_mass("Minimum", form.text("Minimum"))?,
                    max: parse_mass("Maximum", form.text("Maximum"))?,
                })
            } else {
                Ok(Query::ByMassEquals {
                    mass_type,
                    value: parse_mass("Value", form.text("Value"))?,
                })
            }
        }
        Mode::ByStructure => {
            let kind = if form.choice("Search type") == Some("superstructure") {
                StructureKind::Superstructure
            } else {
                StructureKind::Substructure
            };
            Ok(Query::ByStructure {
                kind,
                smiles: form.text("SMILES").unwrap_or("").to_string(),
            })
        }
        Mode::BySimilarity => Ok(Query::BySimilarity {
            smiles: form.text("SMILES").unwrap_or("").to_string(),
            threshold: form.slider("Threshold").unwrap_or(90),
        }),
        Mode::ByCrossReference => Ok(Query::ByCrossReference {
            xref_type: form.text("Xref type").unwrap_or("").to_string(),
            xref_value: form.text("Xref value").unwrap_or("").to_string(),
        }),
        Mode::FullRecords => {
            let cid = Cid::new(form.text("CID").unwrap_or(""));
            if form.choice("Action") == Some("Download SDF") {
                Ok(Query::FullRecordSdf { cid })
            } else {
                Ok(Query::FullRecordJson { cid })
            }
        }
    }
}

fn parse_mass(label: &str, raw: Option<&str>) -> Result<f64, String> {
    raw.unwrap_or("")
        .trim()
        .parse()
        .map_err(|_| format!("{label} must be a number"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_forms_build_the_documented_example_queries() {
        assert_eq!(
            build_query(&Mode::ByCid.form()),
            Ok(Query::ByCid {
                cid: Cid::from("2244")
            })
        );
        assert_eq!(
            build_query(&Mode::ByName.form()),
            Ok(Query::ByName {
                name: "glucose".into()
            })
        );
        assert_eq!(
            build_query(&Mode::ByFormula.form()),
            Ok(Query::ByFormula {
                formula: "C6H12O6".into()
            })
        );
        assert_eq!(
            build_query(&Mode::BySimilarity.form()),
            Ok(Query::BySimilarity {
                smiles: "CC(=O)OC1=CC=CC=C1C(=O)O".into(),
                threshold: 90
            })
        );
        assert_eq!(
            build_query(&Mode::ByCrossReference.form()),
            Ok(Query::ByCrossReference {
                xref_type: "PatentID".into(),
                xref_value: "US20050159403A1".into()
            })
        );
    }

    #[test]
    fn mass_defaults_to_equals() {
        assert_eq!(
            build_query(&Mode::ByMass.form()),
            Ok(Query::ByMassEquals {
                mass_type: MassType::MolecularWeight,
                value: 400.0
            })
        );
    }

    #[test]
    fn mass_range_reads_min_and_max() {
        let mut form = Mode::ByMass.form();
        // Switch "Method" to "Within Range"
        form.selected = 1;
        form.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(
            build_query(&form),
            Ok(Query::ByMassRange {
                mass_type: MassType::MolecularWeight,
                min: 400.0,
                max: 400.05
            })
        );
    }

    #[test]
    fn bad_mass_is_a_user_visible_message() {
        let mut form = Mode::ByMass.form();
        form.selected = 2;
        // Wipe "Value" and type garbage
        for _ in 0.."400.0".len() {
            form.handle(&AppEvent::Backspace);
        }
        for c in "abc".chars() {
            form.handle(&AppEvent::Char(c));
        }
        assert_eq!(build_query(&form), Err("Value must be a number".to_string()));
    }

    #[test]
    fn choice_cycles_both_directions() {
        let mut form = Mode::ByStructure.form();
        form.selected = 1;
        assert_eq!(form.choice("Search type"), Some("substructure"));
        form.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(form.choice("Search type"), Some("superstructure"));
        form.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(form.choice("Search type"), Some("substructure"));
        form.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(form.choice("Search type"), Some("superstructure"));
    }

    #[test]
    fn slider_clamps_to_bounds() {
        let mut form = Mode::BySimilarity.form();
        form.selected = 1;
        for _ in 0..20 {
            form.handle(&AppEvent::Nav(Direction::Right));
        }
        assert_eq!(form.slider("Threshold"), Some(100));
        for _ in 0..200 {
            form.handle(&AppEvent::Nav(Direction::Left));
        }
        assert_eq!(form.slider("Threshold"), Some(1));
    }

    #[test]
    fn text_editing_respects_char_boundaries() {
        let mut form = Mode::ByName.form();
        // Clear "glucose"
        for _ in 0.."glucose".len() {
            form.handle(&AppEvent::Backspace);
        }
        for c in "héme".chars() {
            form.handle(&AppEvent::Char(c));
        }
        assert_eq!(form.text("Name"), Some("héme"));
        // Two lefts put the cursor before 'm'; backspace removes the 'é'
        form.handle(&AppEvent::Nav(Direction::Left));
        form.handle(&AppEvent::Nav(Direction::Left));
        form.handle(&AppEvent::Backspace);
        assert_eq!(form.text("Name"), Some("hme"));
    }

    #[test]
    fn field_selection_stops_at_the_edges() {
        let mut form = Mode::ByMass.form();
        form.handle(&AppEvent::Nav(Direction::Up));
        assert_eq!(form.selected, 0);
        for _ in 0..20 {
            form.handle(&AppEvent::Nav(Direction::Down));
        }
        assert_eq!(form.selected, form.fields.len() - 1);
    }

    #[test]
    fn full_records_action_switches_query() {
        let mut form = Mode::FullRecords.form();
        assert_eq!(
            build_query(&form),
            Ok(Query::FullRecordJson {
                cid: Cid::from("2244")
            })
        );
        form.selected = 1;
        form.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(
            build_query(&form),
            Ok(Query::FullRecordSdf {
                cid: Cid::from("2244")
            })
        );
    }
}
