//! Norwegian template text

pub const TITLE: &str = "Kjøpskontrakt for bruktbil";
pub const CONTINUED: &str = "(fortsatt)";

pub const SELLER: &str = "Selger";
pub const BUYER: &str = "Kjøper";
pub const PARTIES: &str = "Selger og kjøper";

pub const FIRST_NAME: &str = "Fornavn";
pub const LAST_NAME: &str = "Etternavn";
pub const ADDRESS: &str = "Adresse";
pub const POSTAL_CODE: &str = "Postnummer";
pub const CITY: &str = "Poststed";
pub const ID_NUMBER: &str = "Fødselsnummer/org.nr.";
pub const PHONE: &str = "Telefon";

pub const VEHICLE: &str = "Kjøretøy";
pub const REGISTRATION: &str = "Registreringsnummer";
pub const MAKE: &str = "Bilmerke";
pub const MODEL: &str = "Modell/type";
pub const MODEL_YEAR: &str = "Årsmodell";
pub const ODOMETER: &str = "Kilometerstand";
pub const LAST_INSPECTION: &str = "Sist EU-godkjent";
pub const PRICE: &str = "Kjøpesum";
pub const PAYMENT_METHOD: &str = "Betalingsmåte";
pub const SELLER_ACCOUNT: &str = "Selgers kontonummer";
pub const FEE_PAYER: &str = "Omregistreringsavgift betales av";
pub const FEE_AMOUNT: &str = "Omregistreringsavgift (beløp)";

pub const EQUIPMENT: &str = "Utstyr";
pub const SUMMER_TIRES: &str = "Sommerdekk";
pub const WINTER_TIRES: &str = "Vinterdekk";
pub const OTHER_EQUIPMENT: &str = "Annet utstyr";
pub const EQUIPMENT_SPECIFICATION: &str = "Spesifikasjon av utstyr";
pub const ENCUMBRANCES: &str = "Har bilen heftelser";
pub const TEST_DRIVEN: &str = "Er bilen prøvekjørt/besiktiget";

pub const COMMENTS: &str = "Andre kommentarer / vilkår";

pub const SIGNATURES: &str = "Signaturer";
pub const PLACE: &str = "Sted";
pub const DATE: &str = "Dato";
pub const SELLER_SIGNATURE: &str = "Selgers signatur";
pub const BUYER_SIGNATURE: &str = "Kjøpers signatur";

pub const DISCLAIMER: &str = "Ansvarsfraskrivelse";
pub const DISCLAIMER_TEXT: &str = "Denne kontrakten er en standardmal og erstatter ikke juridisk \
rådgivning. Partene er selv ansvarlige for at opplysningene i kontrakten er korrekte og \
fullstendige. Bilen selges som den er, jf. kjøpsloven § 19, med de begrensninger som følger av \
loven. Kjøper oppfordres til å undersøke bilen grundig og til å sjekke heftelser i Løsøreregisteret \
før kjøpet gjennomføres. Leverandøren av malen er ikke part i avtalen og tar ikke ansvar for tap \
som følge av bruk av dokumentet.";

pub const WATERMARK: &str = "FORHÅNDSVISNING";
pub const WATERMARK_SUBTITLE: &str = "IKKE ET GYLDIG DOKUMENT";
