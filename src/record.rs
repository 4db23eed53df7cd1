//! The certificate record and its input-side rules (defaults, validation).

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Kind of certificate being issued.
///
/// Values outside the four known kinds are kept verbatim in `Other` so they
/// can still be rendered; callers should avoid producing them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CertificateKind {
    #[default]
    Completion,
    Achievement,
    Excellence,
    Participation,
    Other(String),
}

impl CertificateKind {
    /// The identifier as it appears in records (`completion`, `achievement`, ...)
    pub fn as_str(&self) -> &str {
        match self {
            CertificateKind::Completion => "completion",
            CertificateKind::Achievement => "achievement",
            CertificateKind::Excellence => "excellence",
            CertificateKind::Participation => "participation",
            CertificateKind::Other(s) => s.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CertificateKind::Other(_))
    }

    /// Display label: a space before every internal ASCII capital (`A`-`Z`),
    /// then uppercased. `deanList` becomes `DEAN LIST`; other scripts never
    /// split.
    pub fn label(&self) -> String {
        let mut out = String::new();
        for (i, c) in self.as_str().chars().enumerate() {
            if i > 0 && c.is_ascii_uppercase() {
                out.push(' ');
            }
            out.push(c);
        }
        out.to_uppercase()
    }
}

impl From<String> for CertificateKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "completion" => CertificateKind::Completion,
            "achievement" => CertificateKind::Achievement,
            "excellence" => CertificateKind::Excellence,
            "participation" => CertificateKind::Participation,
            _ => CertificateKind::Other(s),
        }
    }
}

impl From<&str> for CertificateKind {
    fn from(s: &str) -> Self {
        CertificateKind::from(s.to_string())
    }
}

impl From<CertificateKind> for String {
    fn from(kind: CertificateKind) -> Self {
        match kind {
            CertificateKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for CertificateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One certificate to render.
///
/// Field names serialize in camelCase (`studentName`, `courseName`, ...).
/// Only `studentName` and `courseName` are required; the rest default to an
/// empty instructor, today's UTC date and a completion certificate.
///
/// # Examples
///
/// ```
/// let record = certgen::CertificateRecord::new("Jane Doe", "Cloud Computing Fundamentals")
///     .with_date("2024-01-15");
/// assert!(record.validate().is_ok());
/// assert_eq!(record.certificate_type.label(), "COMPLETION");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    pub student_name: String,
    pub course_name: String,
    #[serde(default)]
    pub instructor_name: String,
    #[serde(default = "today")]
    pub completion_date: String,
    #[serde(default)]
    pub certificate_type: CertificateKind,
}

/// Today's date in UTC as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

impl CertificateRecord {
    pub fn new(student_name: impl Into<String>, course_name: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            course_name: course_name.into(),
            instructor_name: String::new(),
            completion_date: today(),
            certificate_type: CertificateKind::default(),
        }
    }

    pub fn with_instructor(mut self, instructor_name: impl Into<String>) -> Self {
        self.instructor_name = instructor_name.into();
        self
    }

    pub fn with_date(mut self, completion_date: impl Into<String>) -> Self {
        self.completion_date = completion_date.into();
        self
    }

    pub fn with_type(mut self, kind: impl Into<CertificateKind>) -> Self {
        self.certificate_type = kind.into();
        self
    }

    /// Check the required fields. Whitespace-only names count as missing.
    pub fn validate(&self) -> Result<()> {
        if self.student_name.trim().is_empty() {
            return Err(Error::Validation { field: "studentName" });
        }
        if self.course_name.trim().is_empty() {
            return Err(Error::Validation { field: "courseName" });
        }
        Ok(())
    }

    pub fn has_instructor(&self) -> bool {
        !self.instructor_name.is_empty()
    }

    /// Parse a record from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_splits_internal_capitals() {
        assert_eq!(CertificateKind::Participation.label(), "PARTICIPATION");
        assert_eq!(CertificateKind::Excellence.label(), "EXCELLENCE");
        assert_eq!(CertificateKind::from("deanList").label(), "DEAN LIST");
        assert_eq!(CertificateKind::from("Honors").label(), "HONORS");
    }

    #[test]
    fn label_splits_only_before_ascii_capitals() {
        assert_eq!(CertificateKind::from("cursoÉlite").label(), "CURSOÉLITE");
        assert_eq!(CertificateKind::from("ΣigmaΔelta").label(), "ΣIGMAΔELTA");
        assert_eq!(CertificateKind::from("émileHonors").label(), "ÉMILE HONORS");
    }

    #[test]
    fn unknown_kind_is_kept_verbatim() {
        let k = CertificateKind::from("mastery");
        assert!(!k.is_known());
        assert_eq!(k.as_str(), "mastery");
        assert_eq!(String::from(k), "mastery");
    }

    #[test]
    fn validate_reports_first_missing_field() {
        let r = CertificateRecord::new("", "");
        match r.validate() {
            Err(Error::Validation { field }) => assert_eq!(field, "studentName"),
            other => panic!("unexpected: {:?}", other),
        }
        let r = CertificateRecord::new("Jane", "   ");
        match r.validate() {
            Err(Error::Validation { field }) => assert_eq!(field, "courseName"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn json_fills_defaults() {
        let r = CertificateRecord::from_json(r#"{"studentName":"Jane Doe","courseName":"Rust"}"#).unwrap();
        assert_eq!(r.instructor_name, "");
        assert_eq!(r.certificate_type, CertificateKind::Completion);
        assert_eq!(r.completion_date.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&r.completion_date, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn json_uses_camel_case() {
        let r = CertificateRecord::new("Jane Doe", "Rust")
            .with_instructor("Dr. Smith")
            .with_date("2024-01-15")
            .with_type("excellence");
        let js = serde_json::to_value(&r).unwrap();
        assert_eq!(js["studentName"], "Jane Doe");
        assert_eq!(js["instructorName"], "Dr. Smith");
        assert_eq!(js["completionDate"], "2024-01-15");
        assert_eq!(js["certificateType"], "excellence");
    }

    #[test]
    fn json_missing_required_field_is_a_parse_error() {
        let err = CertificateRecord::from_json(r#"{"studentName":"Jane"}"#).unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
    }
}
