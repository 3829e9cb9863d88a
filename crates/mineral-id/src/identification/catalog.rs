use super::domain::{HardnessRange, ReferenceRecord};
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Separator for multi-valued CSV columns such as `colors` and `luster`.
const LIST_SEPARATOR: char = ';';

/// Integrity failures detected while assembling a reference catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog record is missing a name")]
    EmptyName,
    #[error("duplicate catalog record '{0}'")]
    DuplicateName(String),
    #[error("'{name}' has an inverted hardness range ({min} > {max})")]
    InvertedHardness { name: String, min: f64, max: f64 },
    #[error("'{name}' has hardness {range} outside the Mohs scale")]
    HardnessOffScale { name: String, range: HardnessRange },
    #[error("'{name}' has non-positive density {density}")]
    NonPositiveDensity { name: String, density: f64 },
    #[error("'{name}' has an unrecognized {column} value '{value}'")]
    InvalidFlag {
        name: String,
        column: &'static str,
        value: String,
    },
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Immutable set of reference minerals, kept in insertion order.
#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    records: Vec<ReferenceRecord>,
}

impl ReferenceCatalog {
    /// Validates and wraps the given records.
    pub fn new(records: Vec<ReferenceRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            validate_record(record)?;
            if !seen.insert(record.name.as_str()) {
                return Err(CatalogError::DuplicateName(record.name.clone()));
            }
        }

        debug!(records = records.len(), "reference catalog validated");
        Ok(Self { records })
    }

    /// The built-in reference set of common rock-forming and ore minerals.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(standard_records())
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<CatalogRow>() {
            records.push(row?.into_record()?);
        }

        Self::new(records)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_csv_reader(file)?;
        info!(path = %path.display(), records = catalog.len(), "loaded reference catalog");
        Ok(catalog)
    }

    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    pub fn get(&self, name: &str) -> Option<&ReferenceRecord> {
        self.records.iter().find(|record| record.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn validate_record(record: &ReferenceRecord) -> Result<(), CatalogError> {
    if record.name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }

    let range = record.hardness;
    if !range.is_ordered() {
        return Err(CatalogError::InvertedHardness {
            name: record.name.clone(),
            min: range.min,
            max: range.max,
        });
    }
    if !range.is_on_scale() {
        return Err(CatalogError::HardnessOffScale {
            name: record.name.clone(),
            range,
        });
    }

    // Written to also reject NaN.
    if !(record.density > 0.0) {
        return Err(CatalogError::NonPositiveDensity {
            name: record.name.clone(),
            density: record.density,
        });
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    name: String,
    #[serde(default)]
    colors: String,
    streak: String,
    hardness_min: f64,
    hardness_max: f64,
    #[serde(default)]
    luster: String,
    #[serde(default)]
    cleavage: String,
    density: f64,
    magnetic: String,
    acid_reactive: String,
    #[serde(default)]
    notes: String,
}

impl CatalogRow {
    fn into_record(self) -> Result<ReferenceRecord, CatalogError> {
        let magnetic = parse_flag(&self.name, "magnetic", &self.magnetic)?;
        let acid_reactive = parse_flag(&self.name, "acid_reactive", &self.acid_reactive)?;

        Ok(ReferenceRecord {
            colors: split_labels(&self.colors),
            streak: normalize_label(&self.streak),
            hardness: HardnessRange::new(self.hardness_min, self.hardness_max),
            luster: split_labels(&self.luster),
            cleavage: split_labels(&self.cleavage),
            density: self.density,
            magnetic,
            acid_reactive,
            notes: self.notes,
            name: self.name,
        })
    }
}

fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn split_labels(raw: &str) -> BTreeSet<String> {
    raw.split(LIST_SEPARATOR)
        .map(normalize_label)
        .filter(|label| !label.is_empty())
        .collect()
}

fn parse_flag(name: &str, column: &'static str, raw: &str) -> Result<bool, CatalogError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(CatalogError::InvalidFlag {
            name: name.to_string(),
            column,
            value: raw.to_string(),
        }),
    }
}

fn labels(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn standard_records() -> Vec<ReferenceRecord> {
    vec![
        ReferenceRecord {
            name: "Quartz".to_string(),
            colors: labels(&["colorless", "white", "grey", "pink", "purple"]),
            streak: "white".to_string(),
            hardness: HardnessRange::exact(7.0),
            luster: labels(&["vitreous", "glassy"]),
            cleavage: labels(&["none"]),
            density: 2.65,
            magnetic: false,
            acid_reactive: false,
            notes: "Hard enough to scratch steel; no visible cleavage.".to_string(),
        },
        ReferenceRecord {
            name: "Calcite".to_string(),
            colors: labels(&["colorless", "white", "yellow", "grey"]),
            streak: "white".to_string(),
            hardness: HardnessRange::exact(3.0),
            luster: labels(&["vitreous"]),
            cleavage: labels(&["perfect rhombohedral"]),
            density: 2.71,
            magnetic: false,
            acid_reactive: true,
            notes: "Fizzes in dilute hydrochloric acid; the acid test is decisive.".to_string(),
        },
        ReferenceRecord {
            name: "Feldspar".to_string(),
            colors: labels(&["white", "pink", "grey"]),
            streak: "white".to_string(),
            hardness: HardnessRange::new(6.0, 6.5),
            luster: labels(&["vitreous", "pearly"]),
            cleavage: labels(&["two directions"]),
            density: 2.56,
            magnetic: false,
            acid_reactive: false,
            notes: "Good cleavage in two directions; common in igneous rocks.".to_string(),
        },
        ReferenceRecord {
            name: "Mica (Biotite/Muscovite)".to_string(),
            colors: labels(&["black", "brown", "silvery", "greenish"]),
            streak: "white".to_string(),
            hardness: HardnessRange::new(2.5, 3.0),
            luster: labels(&["pearly", "vitreous"]),
            cleavage: labels(&["perfect basal"]),
            density: 2.8,
            magnetic: false,
            acid_reactive: false,
            notes: "Splits into thin, flexible sheets.".to_string(),
        },
        ReferenceRecord {
            name: "Pyrite".to_string(),
            colors: labels(&["brassy", "golden"]),
            streak: "greenish-black".to_string(),
            hardness: HardnessRange::new(6.0, 6.5),
            luster: labels(&["metallic"]),
            cleavage: labels(&["none"]),
            density: 5.0,
            magnetic: false,
            acid_reactive: false,
            notes: "\"Fool's gold\"; brittle rather than malleable.".to_string(),
        },
        ReferenceRecord {
            name: "Galena".to_string(),
            colors: labels(&["lead-gray"]),
            streak: "lead-gray".to_string(),
            hardness: HardnessRange::new(2.5, 2.75),
            luster: labels(&["metallic"]),
            cleavage: labels(&["perfect cubic"]),
            density: 7.4,
            magnetic: false,
            acid_reactive: false,
            notes: "Very heavy for its size; breaks into cubes.".to_string(),
        },
        ReferenceRecord {
            name: "Hematite".to_string(),
            colors: labels(&["steel-gray", "reddish"]),
            streak: "reddish-brown".to_string(),
            hardness: HardnessRange::new(5.5, 6.5),
            luster: labels(&["metallic", "earthy"]),
            cleavage: labels(&["none"]),
            density: 5.3,
            magnetic: false,
            acid_reactive: false,
            notes: "Reddish-brown streak is highly characteristic.".to_string(),
        },
        ReferenceRecord {
            name: "Magnetite".to_string(),
            colors: labels(&["black"]),
            streak: "black".to_string(),
            hardness: HardnessRange::new(5.5, 6.5),
            luster: labels(&["metallic"]),
            cleavage: labels(&["none"]),
            density: 5.17,
            magnetic: true,
            acid_reactive: false,
            notes: "Strongly magnetic.".to_string(),
        },
        ReferenceRecord {
            name: "Halite".to_string(),
            colors: labels(&["colorless", "white"]),
            streak: "white".to_string(),
            hardness: HardnessRange::new(2.0, 2.5),
            luster: labels(&["vitreous"]),
            cleavage: labels(&["perfect cubic"]),
            density: 2.17,
            magnetic: false,
            acid_reactive: false,
            notes: "Salty taste is the classic field test (avoid tasting in professional settings).".to_string(),
        },
        ReferenceRecord {
            name: "Gypsum".to_string(),
            colors: labels(&["colorless", "white", "grey"]),
            streak: "white".to_string(),
            hardness: HardnessRange::new(1.5, 2.0),
            luster: labels(&["pearly"]),
            cleavage: labels(&["perfect"]),
            density: 2.3,
            magnetic: false,
            acid_reactive: false,
            notes: "Very soft; scratched easily with a fingernail.".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "name,colors,streak,hardness_min,hardness_max,luster,cleavage,density,magnetic,acid_reactive,notes\n";

    fn csv_catalog(rows: &str) -> Result<ReferenceCatalog, CatalogError> {
        let data = format!("{HEADER}{rows}");
        ReferenceCatalog::from_csv_reader(Cursor::new(data.into_bytes()))
    }

    #[test]
    fn standard_catalog_is_valid_and_ordered() {
        let catalog = ReferenceCatalog::standard().expect("standard catalog validates");
        assert_eq!(catalog.len(), 10);
        let names: Vec<&str> = catalog.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"Quartz"));
        assert_eq!(names.last(), Some(&"Gypsum"));
        assert!(catalog.get("Magnetite").is_some_and(|record| record.magnetic));
        assert!(catalog.get("Unobtainium").is_none());
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut records = standard_records();
        let copy = records[1].clone();
        records.push(copy);

        match ReferenceCatalog::new(records) {
            Err(CatalogError::DuplicateName(name)) => assert_eq!(name, "Calcite"),
            other => panic!("expected duplicate name error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_inverted_hardness() {
        let mut records = standard_records();
        records[0].hardness = HardnessRange::new(7.5, 6.0);

        assert!(matches!(
            ReferenceCatalog::new(records),
            Err(CatalogError::InvertedHardness { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_density() {
        let mut records = standard_records();
        records[2].density = 0.0;

        assert!(matches!(
            ReferenceCatalog::new(records),
            Err(CatalogError::NonPositiveDensity { .. })
        ));
    }

    #[test]
    fn rejects_hardness_off_the_scale() {
        let mut records = standard_records();
        records[3].hardness = HardnessRange::new(9.5, 11.0);

        assert!(matches!(
            ReferenceCatalog::new(records),
            Err(CatalogError::HardnessOffScale { .. })
        ));
    }

    #[test]
    fn loads_csv_with_normalized_label_lists() {
        let catalog = csv_catalog(
            "Sphalerite, Brown ; Yellow ;Black,Pale Yellow,3.5,4.0,resinous;adamantine,perfect dodecahedral,4.05,no,no,zinc ore\n",
        )
        .expect("csv catalog loads");

        let record = catalog.get("Sphalerite").expect("record present");
        assert_eq!(record.colors, labels(&["black", "brown", "yellow"]));
        assert_eq!(record.streak, "pale yellow");
        assert_eq!(record.hardness, HardnessRange::new(3.5, 4.0));
        assert!(record.luster.contains("adamantine"));
        assert!(!record.magnetic);
        assert_eq!(record.notes, "zinc ore");
    }

    #[test]
    fn csv_rows_are_validated_like_static_records() {
        let err = csv_catalog(
            "Quartz,white,white,7,7,vitreous,none,2.65,false,false,\nQuartz,white,white,7,7,vitreous,none,2.65,false,false,\n",
        )
        .expect_err("duplicate rejected");
        assert!(matches!(err, CatalogError::DuplicateName(_)));
    }

    #[test]
    fn csv_rejects_unknown_flag_values() {
        let err = csv_catalog("Quartz,white,white,7,7,vitreous,none,2.65,maybe,false,\n")
            .expect_err("flag rejected");
        match err {
            CatalogError::InvalidFlag { column, value, .. } => {
                assert_eq!(column, "magnetic");
                assert_eq!(value, "maybe");
            }
            other => panic!("expected invalid flag error, got {other:?}"),
        }
    }
}
