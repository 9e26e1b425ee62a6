//! Contract record as submitted by the form

use crate::Result;
use serde::{Deserialize, Serialize};

/// Answer to a yes/no question that may be left unanswered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Disclosure {
    Ja,
    Nei,
    /// Not answered ("velg"); the field is left out of the contract
    #[default]
    Velg,
}

impl Disclosure {
    /// Whether the question was answered
    pub fn is_set(&self) -> bool {
        !matches!(self, Disclosure::Velg)
    }

    /// Display value ("Ja" / "Nei"), `None` when unanswered
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Disclosure::Ja => Some(nb_text::yes_no(true)),
            Disclosure::Nei => Some(nb_text::yes_no(false)),
            Disclosure::Velg => None,
        }
    }
}

impl From<String> for Disclosure {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "ja" | "yes" | "true" => Disclosure::Ja,
            "nei" | "no" | "false" => Disclosure::Nei,
            _ => Disclosure::Velg,
        }
    }
}

impl From<Disclosure> for String {
    fn from(value: Disclosure) -> Self {
        match value {
            Disclosure::Ja => "ja",
            Disclosure::Nei => "nei",
            Disclosure::Velg => "velg",
        }
        .to_string()
    }
}

/// Who pays the re-registration fee
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeePayer {
    Buyer,
    Seller,
    #[default]
    Unset,
}

impl FeePayer {
    /// Localized display value
    pub fn label(&self) -> &'static str {
        match self {
            FeePayer::Buyer => "Kjøper",
            FeePayer::Seller => "Selger",
            FeePayer::Unset => "",
        }
    }
}

impl From<String> for FeePayer {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "kjoper" | "kjøper" | "buyer" => FeePayer::Buyer,
            "selger" | "seller" => FeePayer::Seller,
            _ => FeePayer::Unset,
        }
    }
}

impl From<FeePayer> for String {
    fn from(value: FeePayer) -> Self {
        match value {
            FeePayer::Buyer => "kjoper",
            FeePayer::Seller => "selger",
            FeePayer::Unset => "",
        }
        .to_string()
    }
}

/// Flat record of every form field
///
/// Missing keys deserialize to empty values, which the contract renders as
/// empty boxes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractRecord {
    // Seller
    pub selger_fornavn: String,
    pub selger_etternavn: String,
    pub selger_adresse: String,
    pub selger_postnummer: String,
    pub selger_poststed: String,
    pub selger_fodselsnummer: String,
    pub selger_telefon: String,

    // Buyer
    pub kjoper_fornavn: String,
    pub kjoper_etternavn: String,
    pub kjoper_adresse: String,
    pub kjoper_postnummer: String,
    pub kjoper_poststed: String,
    pub kjoper_fodselsnummer: String,
    pub kjoper_telefon: String,

    // Vehicle
    pub registreringsnummer: String,
    pub bilmerke: String,
    pub modell: String,
    pub arsmodell: String,
    pub kilometerstand: String,
    pub sist_eu_godkjent: String,
    pub kjopesum: String,
    pub betalingsmate: String,
    pub selgers_kontonummer: String,
    pub omregistreringsavgift_betales_av: FeePayer,
    pub omregistreringsavgift_belop: String,

    // Equipment
    pub sommerdekk: bool,
    pub vinterdekk: bool,
    pub annet_utstyr: bool,
    pub utstyr_spesifikasjon: String,
    pub har_bilen_heftelser: Disclosure,
    pub er_bilen_provekjort: Disclosure,

    pub andre_kommentarer: String,

    // Signatures
    pub selger_sted: String,
    pub selger_dato: String,
    pub selger_signatur: String,
    pub kjoper_sted: String,
    pub kjoper_dato: String,
    pub kjoper_signatur: String,

    pub include_disclaimer: bool,

    // Branding
    pub include_company_info: bool,
    pub company_name: String,
    pub company_address: String,
    pub company_email: String,
    pub company_phone: String,
    /// Logo as a `data:image/...;base64,` URI or bare base64
    pub company_logo: String,
    pub custom_header: String,
    /// Hex color such as "#1e3369"
    pub primary_color: Option<String>,
}

impl ContractRecord {
    /// Parse a record from the form's JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_json_partial() {
        let record = ContractRecord::from_json(
            r#"{
                "selger_fornavn": "Kari",
                "kjopesum": "85000",
                "vinterdekk": true,
                "har_bilen_heftelser": "nei"
            }"#,
        )
        .unwrap();

        assert_eq!(record.selger_fornavn, "Kari");
        assert_eq!(record.kjopesum, "85000");
        assert!(record.vinterdekk);
        assert!(!record.sommerdekk);
        assert_eq!(record.har_bilen_heftelser, Disclosure::Nei);
        assert_eq!(record.er_bilen_provekjort, Disclosure::Velg);
        assert_eq!(record.primary_color, None);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(ContractRecord::from_json("{ not json").is_err());
    }

    #[test]
    fn test_disclosure_parsing() {
        assert_eq!(Disclosure::from("ja".to_string()), Disclosure::Ja);
        assert_eq!(Disclosure::from(" Nei ".to_string()), Disclosure::Nei);
        assert_eq!(Disclosure::from("velg".to_string()), Disclosure::Velg);
        assert_eq!(Disclosure::from(String::new()), Disclosure::Velg);
    }

    #[test]
    fn test_disclosure_label() {
        assert_eq!(Disclosure::Ja.label(), Some("Ja"));
        assert_eq!(Disclosure::Nei.label(), Some("Nei"));
        assert_eq!(Disclosure::Velg.label(), None);
        assert!(!Disclosure::Velg.is_set());
    }

    #[test]
    fn test_fee_payer_parsing() {
        assert_eq!(FeePayer::from("kjoper".to_string()), FeePayer::Buyer);
        assert_eq!(FeePayer::from("kjøper".to_string()), FeePayer::Buyer);
        assert_eq!(FeePayer::from("seller".to_string()), FeePayer::Seller);
        assert_eq!(FeePayer::from("Selger".to_string()), FeePayer::Seller);
        assert_eq!(FeePayer::from("".to_string()), FeePayer::Unset);
    }

    #[test]
    fn test_fee_payer_label() {
        assert_eq!(FeePayer::Buyer.label(), "Kjøper");
        assert_eq!(FeePayer::Seller.label(), "Selger");
    }

    #[test]
    fn test_record_serializes_form_keys() {
        let record = ContractRecord {
            omregistreringsavgift_betales_av: FeePayer::Seller,
            har_bilen_heftelser: Disclosure::Ja,
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["omregistreringsavgift_betales_av"], "selger");
        assert_eq!(value["har_bilen_heftelser"], "ja");
        assert_eq!(value["er_bilen_provekjort"], "velg");
    }
}
