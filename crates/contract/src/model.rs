//! Render-ready contract model
//!
//! [`Contract::from_record`] resolves everything that depends only on the
//! record (trimming, date and amount formatting, the signature union,
//! branding) so that the section composers only place content.

use crate::color::{resolve_color, Rgb, DEFAULT_COLOR};
use crate::record::{ContractRecord, Disclosure, FeePayer};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::warn;
use nb_text::{format_amount, format_date};

/// Prefix that marks a signature or logo as an embedded image
const IMAGE_URI_PREFIX: &str = "data:image";

/// A signature: nothing, typed text, or a drawn image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Signature {
    #[default]
    Empty,
    Text(String),
    /// Image file bytes (may fail to decode when drawn)
    Image(Vec<u8>),
}

impl Signature {
    /// Classify a raw form value
    ///
    /// Values starting with `data:image` are images regardless of whether
    /// their payload decodes.
    pub fn from_value(raw: &str) -> Self {
        let value = raw.trim();
        if value.is_empty() {
            Signature::Empty
        } else if value.starts_with(IMAGE_URI_PREFIX) {
            match decode_data_uri(value) {
                Some(bytes) => Signature::Image(bytes),
                None => {
                    warn!("Signature image is not valid base64, leaving the box empty");
                    Signature::Image(Vec::new())
                }
            }
        } else {
            Signature::Text(value.to_string())
        }
    }
}

/// Decode the base64 payload of a data URI, or bare base64
fn decode_data_uri(value: &str) -> Option<Vec<u8>> {
    let payload = if value.starts_with("data:") {
        value.split_once(',').map(|(_, payload)| payload)?
    } else {
        value
    };
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64.decode(compact).ok()
}

/// One contracting party
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Party {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub id_number: String,
    pub phone: String,
}

/// Vehicle and payment terms, already formatted for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vehicle {
    pub registration: String,
    pub make: String,
    pub model: String,
    pub model_year: String,
    pub odometer: String,
    pub last_inspection: String,
    pub price: String,
    pub payment_method: String,
    pub seller_account: String,
    pub fee_payer: FeePayer,
    pub fee_amount: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Equipment {
    pub summer_tires: bool,
    pub winter_tires: bool,
    pub other: bool,
    pub specification: String,
}

impl Equipment {
    /// Whether any checkbox is ticked
    pub fn any_checked(&self) -> bool {
        self.summer_tires || self.winter_tires || self.other
    }
}

/// Place, date and signature of one party
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signing {
    pub place: String,
    pub date: String,
    pub signature: Signature,
}

/// Company branding applied to headers and footers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub company_name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub logo: Option<Vec<u8>>,
    /// Replaces the default title when set
    pub header_text: Option<String>,
    pub color: Rgb,
}

impl Branding {
    /// Email and phone joined for the contact line
    pub fn contact_line(&self) -> String {
        [self.email.as_str(), self.phone.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("  |  ")
    }
}

/// Normalized contract
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contract {
    pub seller: Party,
    pub buyer: Party,
    pub vehicle: Vehicle,
    pub equipment: Equipment,
    pub encumbrances: Disclosure,
    pub test_driven: Disclosure,
    pub comments: String,
    pub seller_signing: Signing,
    pub buyer_signing: Signing,
    pub include_disclaimer: bool,
    /// Present only when company info is included
    pub branding: Option<Branding>,
}

impl Contract {
    /// Normalize a form record
    pub fn from_record(record: &ContractRecord) -> Self {
        let text = |s: &str| s.trim().to_string();

        Self {
            seller: Party {
                first_name: text(&record.selger_fornavn),
                last_name: text(&record.selger_etternavn),
                address: text(&record.selger_adresse),
                postal_code: text(&record.selger_postnummer),
                city: text(&record.selger_poststed),
                id_number: text(&record.selger_fodselsnummer),
                phone: text(&record.selger_telefon),
            },
            buyer: Party {
                first_name: text(&record.kjoper_fornavn),
                last_name: text(&record.kjoper_etternavn),
                address: text(&record.kjoper_adresse),
                postal_code: text(&record.kjoper_postnummer),
                city: text(&record.kjoper_poststed),
                id_number: text(&record.kjoper_fodselsnummer),
                phone: text(&record.kjoper_telefon),
            },
            vehicle: Vehicle {
                registration: text(&record.registreringsnummer).to_uppercase(),
                make: text(&record.bilmerke),
                model: text(&record.modell),
                model_year: text(&record.arsmodell),
                odometer: text(&record.kilometerstand),
                last_inspection: format_date(&record.sist_eu_godkjent),
                price: format_amount(&record.kjopesum),
                payment_method: text(&record.betalingsmate),
                seller_account: text(&record.selgers_kontonummer),
                fee_payer: record.omregistreringsavgift_betales_av,
                fee_amount: format_amount(&record.omregistreringsavgift_belop),
            },
            equipment: Equipment {
                summer_tires: record.sommerdekk,
                winter_tires: record.vinterdekk,
                other: record.annet_utstyr,
                specification: record.utstyr_spesifikasjon.trim_end().to_string(),
            },
            encumbrances: record.har_bilen_heftelser,
            test_driven: record.er_bilen_provekjort,
            comments: record.andre_kommentarer.trim_end().to_string(),
            seller_signing: Signing {
                place: text(&record.selger_sted),
                date: format_date(&record.selger_dato),
                signature: Signature::from_value(&record.selger_signatur),
            },
            buyer_signing: Signing {
                place: text(&record.kjoper_sted),
                date: format_date(&record.kjoper_dato),
                signature: Signature::from_value(&record.kjoper_signatur),
            },
            include_disclaimer: record.include_disclaimer,
            branding: Self::branding_from_record(record),
        }
    }

    fn branding_from_record(record: &ContractRecord) -> Option<Branding> {
        if !record.include_company_info {
            return None;
        }

        let logo_value = record.company_logo.trim();
        let logo = if logo_value.is_empty() {
            None
        } else {
            let decoded = decode_data_uri(logo_value);
            if decoded.is_none() {
                warn!("Company logo is not valid base64, drawing header without it");
            }
            decoded
        };

        let header = record.custom_header.trim();

        Some(Branding {
            company_name: record.company_name.trim().to_string(),
            address: record.company_address.trim().to_string(),
            email: record.company_email.trim().to_string(),
            phone: record.company_phone.trim().to_string(),
            logo,
            header_text: (!header.is_empty()).then(|| header.to_string()),
            color: resolve_color(record.primary_color.as_deref()),
        })
    }

    /// Accent color: the branding color, or the default navy
    pub fn accent(&self) -> Rgb {
        self.branding
            .as_ref()
            .map(|b| b.color)
            .unwrap_or(DEFAULT_COLOR)
    }

    /// Company name for the footer, if branding has one
    pub fn footer_name(&self) -> Option<&str> {
        self.branding
            .as_ref()
            .map(|b| b.company_name.as_str())
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_signature_classification() {
        assert_eq!(Signature::from_value(""), Signature::Empty);
        assert_eq!(Signature::from_value("   "), Signature::Empty);
        assert_eq!(
            Signature::from_value(" Jane Doe "),
            Signature::Text("Jane Doe".to_string())
        );
        assert_eq!(
            Signature::from_value("data:image/png;base64,AAAA"),
            Signature::Image(vec![0, 0, 0])
        );
    }

    #[test]
    fn test_signature_bad_base64_is_still_image() {
        assert_eq!(
            Signature::from_value("data:image/png;base64,@@@"),
            Signature::Image(Vec::new())
        );
    }

    #[test]
    fn test_decode_bare_base64() {
        assert_eq!(decode_data_uri("AQID"), Some(vec![1, 2, 3]));
        assert_eq!(decode_data_uri("data:image/png;base64,AQ\nID"), Some(vec![1, 2, 3]));
        assert_eq!(decode_data_uri("data:image/png"), None);
    }

    #[test]
    fn test_from_record_formats_values() {
        let record = ContractRecord {
            selger_fornavn: "  Ola ".to_string(),
            registreringsnummer: "ab 12345".to_string(),
            kjopesum: "120000".to_string(),
            sist_eu_godkjent: "2024-03-01".to_string(),
            omregistreringsavgift_belop: "2500".to_string(),
            selger_dato: "2024-06-01".to_string(),
            ..Default::default()
        };
        let contract = Contract::from_record(&record);

        assert_eq!(contract.seller.first_name, "Ola");
        assert_eq!(contract.vehicle.registration, "AB 12345");
        assert_eq!(contract.vehicle.price, "120 000 kr");
        assert_eq!(contract.vehicle.last_inspection, "01.03.2024");
        assert_eq!(contract.vehicle.fee_amount, "2 500 kr");
        assert_eq!(contract.seller_signing.date, "01.06.2024");
    }

    #[test]
    fn test_branding_dropped_when_disabled() {
        let record = ContractRecord {
            include_company_info: false,
            company_name: "Bilsenter AS".to_string(),
            primary_color: Some("#ff0000".to_string()),
            ..Default::default()
        };
        let contract = Contract::from_record(&record);

        assert_eq!(contract.branding, None);
        assert_eq!(contract.accent(), DEFAULT_COLOR);
        assert_eq!(contract.footer_name(), None);
    }

    #[test]
    fn test_branding_resolves_color_and_header() {
        let record = ContractRecord {
            include_company_info: true,
            company_name: "Bilsenter AS".to_string(),
            company_email: "post@bilsenter.no".to_string(),
            company_phone: "12345678".to_string(),
            custom_header: "  ".to_string(),
            primary_color: Some("#ff0000".to_string()),
            ..Default::default()
        };
        let contract = Contract::from_record(&record);
        let branding = contract.branding.as_ref().unwrap();

        assert_eq!(contract.accent(), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(branding.header_text, None);
        assert_eq!(branding.logo, None);
        assert_eq!(branding.contact_line(), "post@bilsenter.no  |  12345678");
        assert_eq!(contract.footer_name(), Some("Bilsenter AS"));
    }

    #[test]
    fn test_invalid_logo_is_dropped() {
        let record = ContractRecord {
            include_company_info: true,
            company_logo: "data:image/png;base64,!!!".to_string(),
            ..Default::default()
        };
        let contract = Contract::from_record(&record);
        assert_eq!(contract.branding.unwrap().logo, None);
    }

    #[test]
    fn test_equipment_any_checked() {
        let mut equipment = Equipment::default();
        assert!(!equipment.any_checked());
        equipment.other = true;
        assert!(equipment.any_checked());
    }
}
