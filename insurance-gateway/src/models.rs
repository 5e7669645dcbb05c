use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Envelope wrapping every gateway response.
///
/// `meta_data.code` signals success or business failure independently of the
/// HTTP status; `"200"` is the only success code.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T> {
    #[serde(rename = "metaData")]
    pub meta_data: MetaData,
    #[serde(default)]
    pub response: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetaData {
    pub code: String,
    pub message: String,
}

/// Code + human-readable description pair used throughout the gateway schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodedDescription {
    pub kode: String,
    pub keterangan: String,
}

/// Primary-care facility reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRef {
    pub kd_provider: String,
    pub nm_provider: String,
}

/// Participant age, as the gateway formats it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Umur {
    /// Age at the queried service date.
    pub umur_saat_pelayanan: String,
    /// Age today.
    pub umur_sekarang: String,
}

/// Participant eligibility and demographic detail, returned by
/// [`crate::client::InsuranceGatewayClient::check_eligibility`] under
/// `response.peserta`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Peserta {
    pub nama: String,
    pub nik: String,
    pub no_kartu: String,
    pub tgl_lahir: String,
    pub sex: String,
    pub status_peserta: CodedDescription,
    pub hak_kelas: CodedDescription,
    pub prov_umum: ProviderRef,
    pub umur: Umur,
    /// Coverage start date.
    #[serde(rename = "tglTMT")]
    pub tgl_tmt: String,
    /// Coverage end date.
    #[serde(rename = "tglTAT")]
    pub tgl_tat: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PesertaPayload {
    pub peserta: Peserta,
}

/// Referral sub-record of a SEP request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SepRujukan {
    /// Referral source code (primary-care facility or hospital).
    pub asal_rujukan: String,
    pub tgl_rujukan: String,
    pub no_rujukan: String,
    /// Referring facility code.
    pub ppk_rujukan: String,
}

/// Full SEP issuance payload. Every field is a mandatory string or code per
/// the gateway schema; nothing is defaulted locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SepRequest {
    pub no_kartu: String,
    pub tgl_sep: String,
    /// Service-providing facility code.
    pub ppk_pelayanan: String,
    /// Service type: `"1"` inpatient, `"2"` outpatient.
    pub jns_pelayanan: String,
    /// Ward class.
    pub kls_rawat: String,
    #[serde(rename = "noMR")]
    pub no_mr: String,
    pub rujukan: SepRujukan,
    pub catatan: String,
    pub diag_awal: String,
    /// Destination polyclinic code.
    pub poli_tujuan: String,
    /// `"0"` or `"1"`: executive-class polyclinic.
    pub eksekutif: String,
    /// `"0"` or `"1"`: coordination of benefits.
    pub cob: String,
    /// `"0"` or `"1"`: cataract case.
    pub katarak: String,
    /// `"0"` or `"1"`: traffic-accident guarantee.
    pub laka_lantas: String,
    /// Operator username, recorded by the gateway for audit.
    pub user: String,
}

/// Participant summary echoed inside an issued SEP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SepPeserta {
    pub asuransi: String,
    pub hak_kelas: String,
    pub jns_peserta: String,
    pub kelamin: String,
    pub nama: String,
    pub no_kartu: String,
    pub no_mr: String,
    pub tgl_lahir: String,
}

/// An issued SEP. `no_sep` is the durable identifier callers persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sep {
    pub no_sep: String,
    pub diagnosa: String,
    pub kls_rawat: String,
    pub catatan: String,
    pub peserta: SepPeserta,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SepPayload {
    pub sep: Sep,
}

/// Reference-table lookup selector. Each kind maps to a fixed URL template.
#[derive(Debug, Clone)]
pub enum ReferenceKind {
    /// Polyclinics matching a keyword.
    Polyclinic { keyword: String },
    /// Diagnosis codes matching a keyword.
    Diagnosis { keyword: String },
    /// Referring facilities matching a keyword.
    Facility { keyword: String },
    /// Attending physicians available on a service date.
    AttendingPhysician { service_date: NaiveDate },
}

impl ReferenceKind {
    pub(crate) fn path(&self) -> String {
        match self {
            Self::Polyclinic { keyword } => format!("referensi/poli/{keyword}"),
            Self::Diagnosis { keyword } => format!("referensi/diagnosa/{keyword}"),
            Self::Facility { keyword } => format!("referensi/faskes/{keyword}"),
            Self::AttendingPhysician { service_date } => format!(
                "referensi/dokter/tglPelayanan/{}",
                service_date.format("%Y-%m-%d")
            ),
        }
    }
}

/// One entry of a reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub kode: String,
    pub nama: String,
}

/// The gateway nests each reference list under a key named after the table;
/// only the key matching the queried kind is populated.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReferencePayload {
    #[serde(default)]
    pub poli: Vec<ReferenceItem>,
    #[serde(default)]
    pub diagnosa: Vec<ReferenceItem>,
    #[serde(default)]
    pub faskes: Vec<ReferenceItem>,
    #[serde(default)]
    pub list: Vec<ReferenceItem>,
}

impl ReferencePayload {
    pub(crate) fn into_items(self, kind: &ReferenceKind) -> Vec<ReferenceItem> {
        match kind {
            ReferenceKind::Polyclinic { .. } => self.poli,
            ReferenceKind::Diagnosis { .. } => self.diagnosa,
            ReferenceKind::Facility { .. } => self.faskes,
            ReferenceKind::AttendingPhysician { .. } => self.list,
        }
    }
}
