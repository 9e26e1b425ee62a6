//! Output filename policy

use crate::record::ContractRecord;
use crate::RenderMode;
use log::debug;
use nb_text::slugify;

/// Filename of a regular, unbranded contract
pub const DEFAULT_FILENAME: &str = "kjøpskontrakt.pdf";

/// Filename when the record holds the demo identity
pub const DEMO_FILENAME: &str = "demo-kjøpskontrakt.pdf";

/// Filename of every preview
pub const PREVIEW_FILENAME: &str = "forhandsvisning-kjopskontrakt.pdf";

const BRANDED_SUFFIX: &str = "kjøpskontrakt.pdf";

const DEMO_FIRST_NAME: &str = "Ola";
const DEMO_LAST_NAME: &str = "Nordmann";
const DEMO_PHONE: &str = "22334455";

/// Whether the seller is the demo person used by the form's sample data
pub fn is_demo_identity(record: &ContractRecord) -> bool {
    record.selger_fornavn == DEMO_FIRST_NAME
        && record.selger_etternavn == DEMO_LAST_NAME
        && record.selger_telefon == DEMO_PHONE
}

/// Pick the download filename
///
/// Preview wins over everything, then the demo identity, then the company
/// name when branding is on. A company name without any usable characters
/// falls back to the default.
pub fn resolve_filename(record: &ContractRecord, mode: RenderMode) -> String {
    let filename = if mode == RenderMode::Preview {
        PREVIEW_FILENAME.to_string()
    } else if is_demo_identity(record) {
        DEMO_FILENAME.to_string()
    } else if record.include_company_info {
        let slug = slugify(&record.company_name);
        if slug.is_empty() {
            DEFAULT_FILENAME.to_string()
        } else {
            format!("{slug}-{BRANDED_SUFFIX}")
        }
    } else {
        DEFAULT_FILENAME.to_string()
    };

    debug!("Resolved filename '{filename}' for {mode:?}");
    filename
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn demo_record() -> ContractRecord {
        ContractRecord {
            selger_fornavn: "Ola".to_string(),
            selger_etternavn: "Nordmann".to_string(),
            selger_telefon: "22334455".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(
            resolve_filename(&ContractRecord::default(), RenderMode::Normal),
            DEFAULT_FILENAME
        );
    }

    #[test]
    fn test_preview_wins() {
        let mut record = demo_record();
        record.include_company_info = true;
        record.company_name = "Bilsenter AS".to_string();
        assert_eq!(resolve_filename(&record, RenderMode::Preview), PREVIEW_FILENAME);
    }

    #[test]
    fn test_demo_identity() {
        let record = demo_record();
        assert!(is_demo_identity(&record));
        assert_eq!(resolve_filename(&record, RenderMode::Normal), DEMO_FILENAME);

        let mut other = demo_record();
        other.selger_telefon = "99999999".to_string();
        assert!(!is_demo_identity(&other));
    }

    #[test]
    fn test_demo_identity_is_exact() {
        let mut padded = demo_record();
        padded.selger_etternavn = " Nordmann ".to_string();
        assert!(!is_demo_identity(&padded));
        assert_eq!(resolve_filename(&padded, RenderMode::Normal), DEFAULT_FILENAME);

        let mut lowercase = demo_record();
        lowercase.selger_fornavn = "ola".to_string();
        assert!(!is_demo_identity(&lowercase));
    }

    #[test]
    fn test_branded_filename() {
        let bilsenter = ContractRecord {
            include_company_info: true,
            company_name: "Bilsenter AS".to_string(),
            ..Default::default()
        };
        assert_eq!(
            resolve_filename(&bilsenter, RenderMode::Normal),
            "bilsenter-as-kjøpskontrakt.pdf"
        );

        let record = ContractRecord {
            include_company_info: true,
            company_name: "Bjørn's Bilsalg AS".to_string(),
            ..Default::default()
        };
        assert_eq!(
            resolve_filename(&record, RenderMode::Normal),
            "bjorn-s-bilsalg-as-kjøpskontrakt.pdf"
        );
    }

    #[test]
    fn test_branded_without_usable_name() {
        let record = ContractRecord {
            include_company_info: true,
            company_name: " !! ".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_filename(&record, RenderMode::Normal), DEFAULT_FILENAME);
    }

    #[test]
    fn test_company_name_ignored_without_branding() {
        let record = ContractRecord {
            company_name: "Bilsenter AS".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_filename(&record, RenderMode::Normal), DEFAULT_FILENAME);
    }
}
