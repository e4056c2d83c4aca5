//! Blank forms for the Majhi Ladki Bahin scheme.
//!
//! Each template supplies the title, body and footer of a printable form. The
//! underscores are blanks for handwritten entries.

use std::fmt;
use std::str::FromStr;

use crate::layout::DocumentRequest;

const SELF_DECLARATION_BODY: &str = "मी, ________________________________________________ (नाव)\n\
आधार क्र. _____________________________________________\n\
राहणार ________________________________________________, शपथपूर्वक लिहून देते की:\n\n\
१. माझ्या कुटुंबाचे एकत्रित वार्षिक उत्पन्न रु. २.५० लाख पेक्षा जास्त नाही.\n\
२. माझ्या कुटुंबातील कोणीही सदस्य आयकरदाता (Tax Payer) नाही.\n\
३. मी स्वतः किंवा माझ्या कुटुंबातील सदस्य सरकारी नोकरीत कार्यरत नाही.\n\
४. मी शासनाच्या इतर विभागामार्फत राबविण्यात येणाऱ्या दरमहा रु. १५००/- पेक्षा जास्त \
रकमेच्या योजनेचा लाभ घेत नाही.\n\
५. माझ्या कुटुंबातील सदस्यांच्या नावावर चारचाकी वाहन (ट्रॅक्टर वगळून) नाही.\n\n\
मी दिलेली वरील माहिती खरी असून, ती चुकीची आढळल्यास मी कायदेशीर कार्यवाहीस पात्र राहीन.";

const CORRECTION_BODY: &str = "प्रति, अंगणवाडी सेविका / बाल विकास प्रकल्प अधिकारी,\n\
__________________________________________ (केंद्र/गाव)\n\n\
विषय: 'मुख्यमंत्री - माझी लाडकी बहीण' योजनेच्या अर्जात दुरुस्ती करण्याबाबत.\n\n\
महोदय,\n\
मी, __________________________________________ (मोबाईल क्र. ____________________), \
या योजनेसाठी ऑनलाइन अर्ज केला होता. परंतु अर्ज भरताना माझ्याकडून अनवधानाने खालील चूक \
झाली आहे:\n\n\
चूक: 'Govt Job' या पर्यायावर 'YES' क्लिक झाले आहे / किंवा इतर: ________________________.\n\n\
वास्तविक पाहता, माझ्या घरी कोणीही सरकारी नोकरीत नाही. तरी कृपया माझ्या अर्जात योग्य ती \
दुरुस्ती करून माझा अर्ज मंजूर करण्यात यावा. सोबत आधार कार्ड जोडले आहे.";

const BANK_SEEDING_BODY: &str = "प्रति, शाखा व्यवस्थापक (Branch Manager),\n\
बँकेचे नाव: __________________________________________\n\
शाखा: __________________________________________\n\n\
विषय: बँक खाते आधार कार्डशी लिंक करणेबाबत (DBT Enable).\n\n\
महोदय,\n\
माझे आपल्या बँकेत खाते क्रमांक __________________________________________ असून, मला शासनाचे \
थेट लाभ (DBT) जमा होण्यासाठी माझे खाते NPCI मॅपरशी लिंक करावे.\n\n\
मी याद्वारे माझे आधार कार्ड (क्र. ______________________________) बँक खात्याशी जोडण्यास \
संमती देत आहे.";

/// The printable forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormTemplate {
    /// Self declaration of eligibility (हमीपत्र).
    SelfDeclaration,
    /// Request to correct a wrongly submitted application.
    ApplicationCorrection,
    /// Request to seed a bank account with Aadhaar for DBT.
    BankSeeding,
}

impl FormTemplate {
    pub const ALL: [FormTemplate; 3] = [
        FormTemplate::SelfDeclaration,
        FormTemplate::ApplicationCorrection,
        FormTemplate::BankSeeding,
    ];

    /// Short identifier used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Self::SelfDeclaration => "hamipatra",
            Self::ApplicationCorrection => "correction",
            Self::BankSeeding => "dbt",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::SelfDeclaration => "हमीपत्र (Self Declaration)",
            Self::ApplicationCorrection => "अर्ज दुरुस्ती विनंती पत्र",
            Self::BankSeeding => "आधार लिंकिंग अर्ज (Bank Seeding)",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            Self::SelfDeclaration => SELF_DECLARATION_BODY,
            Self::ApplicationCorrection => CORRECTION_BODY,
            Self::BankSeeding => BANK_SEEDING_BODY,
        }
    }

    pub fn footer(self) -> &'static str {
        match self {
            Self::SelfDeclaration => "दिनांक: _______________    सही: ____________________",
            Self::ApplicationCorrection => "अर्जदार सही: ____________________",
            Self::BankSeeding => "सही: ____________________    नाव: ____________________",
        }
    }

    /// Suggested download file name.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::SelfDeclaration => "hamipatra_blank.pdf",
            Self::ApplicationCorrection => "correction_application_blank.pdf",
            Self::BankSeeding => "aadhaar_linking_blank.pdf",
        }
    }

    pub fn request(self) -> DocumentRequest {
        DocumentRequest::new(self.title(), self.body(), self.footer())
    }
}

impl fmt::Display for FormTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when parsing an unknown form name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownForm(pub String);

impl fmt::Display for UnknownForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known = FormTemplate::ALL.map(FormTemplate::slug).join(", ");
        write!(f, "unknown form '{}' (expected one of: {})", self.0, known)
    }
}

impl std::error::Error for UnknownForm {}

impl FromStr for FormTemplate {
    type Err = UnknownForm;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        FormTemplate::ALL
            .into_iter()
            .find(|form| form.slug() == value)
            .ok_or(UnknownForm(value))
    }
}
