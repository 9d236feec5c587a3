//! Curriculum catalog
//!
//! A read-only mapping from semester key to the ordered subjects taught in that
//! semester. The built-in catalog is compiled into the binary; alternative
//! curricula can be loaded from TOML of the form:
//!
//! ```toml
//! [[semester."1"]]
//! code = "CH3124"
//! name = "Engineering Chemistry"
//! credits = 3
//! ```

use crate::core::models::Subject;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

type SubjectRow = (&'static str, &'static str, f64);

const BUILTIN_CURRICULUM: &[(&str, &[SubjectRow])] = &[
    (
        "1",
        &[
            ("CH3124", "Engineering Chemistry", 3.0),
            ("EN3111", "Professional English I", 3.0),
            ("GE3111", "Heritage of Tamils", 1.0),
            ("GE3131", "Basic Electrical & Electronics Engineering", 3.0),
            ("MA3122", "Matrices and Calculus", 4.0),
            ("PH3123", "Engineering Physics", 3.0),
            ("EN3119", "English Language Learning Lab", 1.0),
            ("GE3121", "Physics and Chemistry Lab", 2.0),
            ("GE3134", "Engineering Practices Lab", 2.0),
        ],
    ),
    (
        "2",
        &[
            ("CH3222", "Chemistry for Information Science", 3.0),
            ("EN3211", "Professional English II", 3.0),
            ("GE3211", "Tamils and Technology", 1.0),
            ("GE3231", "Problem Solving & Python Programming", 3.0),
            ("GE3233", "Engineering Graphics and Design", 3.0),
            ("MA3222", "Statistics & Numerical Methods", 4.0),
            ("PH3222", "Physics for Information Science", 3.0),
            ("GE3221", "Engineering Sciences Lab", 2.0),
            ("GE3232", "Python Programming Lab", 2.0),
        ],
    ),
    (
        "3",
        &[
            ("AD3363", "Digital Principles and Computer Organization", 3.0),
            ("CS3361", "Object Oriented Programming", 3.0),
            ("CY3361", "Fundamentals of Networks & Communication", 3.0),
            ("CY3362", "Introduction to Cyber Security", 3.0),
            ("IT3361", "Programming and Data Structures", 3.0),
            ("MA3322", "Discrete Mathematics", 3.0),
            ("CS3364", "OOP Lab", 1.5),
            ("CY3363", "Networks Lab", 1.5),
            ("IT3363", "Data Structures Lab", 1.5),
        ],
    ),
    (
        "4",
        &[
            ("CS3463", "Database Management Systems", 3.0),
            ("CY3461", "Basics of Cyber Forensics", 3.0),
            ("CY3462", "Secure Software Engineering", 3.0),
            ("CY3463", "Cyber Laws and Ethics", 3.0),
            ("IT3461", "Operating Systems", 3.0),
            ("MA3422", "Applied Math for Info Science", 2.0),
            ("CS3466", "DBMS Lab", 1.5),
            ("CY3464", "Open Source Lab", 1.5),
            ("IT3464", "OS Lab", 1.5),
        ],
    ),
    (
        "5",
        &[
            ("CE3531", "Environmental Studies", 2.0),
            ("CS3564", "Web Development and UI Design", 3.0),
            ("CY3561", "Biometric Security", 3.0),
            ("CY3562", "Ethical Hacking Practices", 3.0),
            ("CY3563", "Information Warfare", 3.0),
            ("PCY301", "Modern Cryptography", 3.0),
            ("PCY302", "Cryptocurrency and Blockchain", 3.0),
            ("CS3567", "Full Stack Dev Lab", 1.5),
            ("CY3565", "Biometric Image Processing Lab", 1.5),
            ("CY3566", "Ethical Hacking Lab", 1.5),
        ],
    ),
];

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    let semesters = BUILTIN_CURRICULUM
        .iter()
        .map(|(semester, rows)| {
            let subjects = rows
                .iter()
                .map(|(code, name, credits)| Subject::new(*code, *name, *credits))
                .collect();
            ((*semester).to_string(), subjects)
        })
        .collect();
    Catalog { semesters }
});

/// Semester-indexed subject catalog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Subjects per semester key, in curriculum order
    #[serde(rename = "semester", default)]
    semesters: BTreeMap<String, Vec<Subject>>,
}

impl Catalog {
    /// The compiled-in curriculum
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a catalog from semester/subject pairs
    ///
    /// # Errors
    /// Returns an error if a subject has negative or non-finite credits, or a
    /// subject code repeats within one semester.
    pub fn from_semesters<I>(semesters: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (String, Vec<Subject>)>,
    {
        let catalog = Self {
            semesters: semesters.into_iter().collect(),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from a TOML document
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or fails validation.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let catalog: Self =
            toml::from_str(toml_str).map_err(|e| format!("Invalid catalog TOML: {e}"))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read catalog {}: {e}", path.display()))?;
        let catalog = Self::from_toml(&content)?;
        crate::debug!(
            "Loaded catalog {} ({} semesters)",
            path.display(),
            catalog.semesters.len()
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), String> {
        for (semester, subjects) in &self.semesters {
            let mut seen = HashSet::new();
            for subject in subjects {
                if !subject.credits.is_finite() || subject.credits < 0.0 {
                    return Err(format!(
                        "Semester {semester}: subject {} has invalid credits {}",
                        subject.code, subject.credits
                    ));
                }
                if !seen.insert(subject.code.as_str()) {
                    return Err(format!(
                        "Semester {semester}: duplicate subject code {}",
                        subject.code
                    ));
                }
            }
        }
        Ok(())
    }

    /// Semester keys in display order (numeric keys first, numerically)
    #[must_use]
    pub fn semesters(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.semesters.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| compare_semester_keys(a, b));
        keys
    }

    /// Subjects for a semester; empty for unknown keys
    #[must_use]
    pub fn subjects(&self, semester: &str) -> &[Subject] {
        self.semesters
            .get(semester)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the catalog knows this semester
    #[must_use]
    pub fn contains(&self, semester: &str) -> bool {
        self.semesters.contains_key(semester)
    }

    /// Look up one subject by code within a semester
    #[must_use]
    pub fn find_subject(&self, semester: &str, code: &str) -> Option<&Subject> {
        self.subjects(semester).iter().find(|s| s.code == code)
    }

    /// Sum of credits offered in a semester
    #[must_use]
    pub fn total_credits(&self, semester: &str) -> f64 {
        self.subjects(semester).iter().map(|s| s.credits).sum()
    }

    /// Number of semesters
    #[must_use]
    pub fn len(&self) -> usize {
        self.semesters.len()
    }

    /// Whether the catalog has no semesters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
    }
}

fn compare_semester_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<u32>(), b.parse::<u32>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
