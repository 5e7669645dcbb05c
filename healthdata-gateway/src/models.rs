use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Minimal FHIR search bundle: only the entries are read.
#[derive(Debug, Deserialize)]
pub(crate) struct Bundle<T> {
    #[serde(default = "Vec::new")]
    pub entry: Vec<BundleEntry<T>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BundleEntry<T> {
    pub resource: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HumanName {
    #[serde(default)]
    pub text: Option<String>,
}

/// Shared shape of the FHIR `Patient` and `Practitioner` resources, reduced
/// to the fields the clinic UI displays.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PersonResource {
    pub id: String,
    #[serde(default)]
    pub name: Vec<HumanName>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
}

impl PersonResource {
    pub(crate) fn display_name(&mut self) -> Option<String> {
        self.name.drain(..).next().and_then(|name| name.text)
    }
}

/// A patient as registered on the national platform. `ihs_number` is the
/// platform's durable identifier.
#[derive(Debug, Clone, Serialize)]
pub struct PatientRecord {
    pub ihs_number: String,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
}

impl From<PersonResource> for PatientRecord {
    fn from(mut resource: PersonResource) -> Self {
        Self {
            name: resource.display_name(),
            ihs_number: resource.id,
            gender: resource.gender,
            birth_date: resource.birth_date,
        }
    }
}

/// A practitioner as registered on the national platform.
#[derive(Debug, Clone, Serialize)]
pub struct PractitionerRecord {
    pub ihs_number: String,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
}

impl From<PersonResource> for PractitionerRecord {
    fn from(mut resource: PersonResource) -> Self {
        Self {
            name: resource.display_name(),
            ihs_number: resource.id,
            gender: resource.gender,
            birth_date: resource.birth_date,
        }
    }
}
