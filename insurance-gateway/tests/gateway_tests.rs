//! Stub-gateway tests for the insurance client.
//!
//! A mockito server stands in for the national gateway so every envelope
//! and failure class can be exercised without credentials.

use chrono::NaiveDate;
use insurance_gateway::{
    GatewayConfig, GatewayError, InsuranceGatewayClient, ReferenceKind, SepRequest, SepRujukan,
};
use mockito::Matcher;

fn client_for(server: &mockito::ServerGuard) -> InsuranceGatewayClient {
    let config = GatewayConfig::new(server.url(), "dev-cons", "dev-secret", "dev-user-key");
    InsuranceGatewayClient::new(config).unwrap()
}

fn sample_sep_request() -> SepRequest {
    SepRequest {
        no_kartu: "0001234567890".to_string(),
        tgl_sep: "2024-03-15".to_string(),
        ppk_pelayanan: "0301R011".to_string(),
        jns_pelayanan: "2".to_string(),
        kls_rawat: "3".to_string(),
        no_mr: "MR-000812".to_string(),
        rujukan: SepRujukan {
            asal_rujukan: "1".to_string(),
            tgl_rujukan: "2024-03-10".to_string(),
            no_rujukan: "030101010324P000015".to_string(),
            ppk_rujukan: "03010101".to_string(),
        },
        catatan: "".to_string(),
        diag_awal: "A09".to_string(),
        poli_tujuan: "INT".to_string(),
        eksekutif: "0".to_string(),
        cob: "0".to_string(),
        katarak: "0".to_string(),
        laka_lantas: "0".to_string(),
        user: "frontdesk01".to_string(),
    }
}

const PESERTA_BODY: &str = r#"{
    "metaData": { "code": "200", "message": "OK" },
    "response": {
        "peserta": {
            "nama": "Budi Santoso",
            "nik": "3201011502900001",
            "noKartu": "0001234567890",
            "tglLahir": "1990-02-15",
            "sex": "L",
            "statusPeserta": { "kode": "0", "keterangan": "AKTIF" },
            "hakKelas": { "kode": "3", "keterangan": "KELAS III" },
            "provUmum": { "kdProvider": "03010101", "nmProvider": "KLINIK MELATI" },
            "umur": { "umurSaatPelayanan": "34 tahun", "umurSekarang": "34 tahun" },
            "tglTMT": "2015-01-01",
            "tglTAT": "2999-12-31"
        }
    }
}"#;

const SEP_BODY: &str = r#"{
    "metaData": { "code": "200", "message": "Sukses" },
    "response": {
        "sep": {
            "noSep": "0301R0110324V000001",
            "diagnosa": "A09 - Diarrhoea and gastroenteritis",
            "klsRawat": "3",
            "catatan": "",
            "peserta": {
                "asuransi": "-",
                "hakKelas": "KELAS III",
                "jnsPeserta": "PBI",
                "kelamin": "L",
                "nama": "Budi Santoso",
                "noKartu": "0001234567890",
                "noMr": "MR-000812",
                "tglLahir": "1990-02-15"
            }
        }
    }
}"#;

#[tokio::test]
async fn eligibility_lookup_returns_the_participant() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/Peserta/0001234567890/tglSEP/2024-03-15")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PESERTA_BODY)
        .create_async()
        .await;

    let client = client_for(&server);
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let peserta = client
        .check_eligibility("0001234567890", date)
        .await
        .unwrap();

    assert_eq!(peserta.nama, "Budi Santoso");
    assert_eq!(peserta.status_peserta.keterangan, "AKTIF");
    mock.assert_async().await;
}

#[tokio::test]
async fn every_request_carries_the_mandated_auth_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/Peserta/0001234567890/tglSEP/2024-03-15")
        .match_header("x-cons-id", "dev-cons")
        .match_header("x-timestamp", Matcher::Regex(r"^\d+$".to_string()))
        .match_header(
            "x-signature",
            Matcher::Regex(r"^[A-Za-z0-9+/]{43}=$".to_string()),
        )
        .match_header("user_key", "dev-user-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PESERTA_BODY)
        .create_async()
        .await;

    let client = client_for(&server);
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    client
        .check_eligibility("0001234567890", date)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_envelope_code_is_a_domain_error_with_the_gateway_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/Peserta/0009999999999/tglSEP/2024-03-15")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "metaData": { "code": "201", "message": "Peserta tidak ditemukan" } }"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let err = client
        .check_eligibility("0009999999999", date)
        .await
        .unwrap_err();

    assert!(err.is_domain());
    assert_eq!(err.to_string(), "Peserta tidak ditemukan");
}

#[tokio::test]
async fn sep_creation_round_trips_through_get() {
    let mut server = mockito::Server::new_async().await;
    let insert = server
        .mock("POST", "/SEP/2.0/insert")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "request": {
                "noKartu": "0001234567890",
                "tglSep": "2024-03-15",
                "poliTujuan": "INT",
                "user": "frontdesk01"
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SEP_BODY)
        .create_async()
        .await;

    let client = client_for(&server);
    let issued = client.create_sep(&sample_sep_request()).await.unwrap();
    assert_eq!(issued.no_sep, "0301R0110324V000001");
    assert_eq!(issued.peserta.no_mr, "MR-000812");
    insert.assert_async().await;

    let get = server
        .mock("GET", "/SEP/2.0/0301R0110324V000001")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "metaData": { "code": "200", "message": "Sukses" },
                "response": {
                    "noSep": "0301R0110324V000001",
                    "diagnosa": "A09 - Diarrhoea and gastroenteritis",
                    "klsRawat": "3",
                    "catatan": "",
                    "peserta": {
                        "asuransi": "-",
                        "hakKelas": "KELAS III",
                        "jnsPeserta": "PBI",
                        "kelamin": "L",
                        "nama": "Budi Santoso",
                        "noKartu": "0001234567890",
                        "noMr": "MR-000812",
                        "tglLahir": "1990-02-15"
                    }
                }
            }"#,
        )
        .create_async()
        .await;

    let fetched = client.get_sep(&issued.no_sep).await.unwrap();
    assert_eq!(fetched.no_sep, issued.no_sep);
    get.assert_async().await;
}

#[tokio::test]
async fn rejected_sep_creation_surfaces_the_gateway_message_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/SEP/2.0/insert")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "metaData": { "code": "201", "message": "Nomor rujukan tidak valid" } }"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.create_sep(&sample_sep_request()).await.unwrap_err();

    assert!(err.is_domain());
    assert_eq!(err.to_string(), "Nomor rujukan tidak valid");
}

#[tokio::test]
async fn deleting_an_unknown_sep_is_a_domain_error_not_transport() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/SEP/2.0/delete")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "metaData": { "code": "201", "message": "SEP tidak ditemukan" } }"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .delete_sep("0301R0110324V999999", "frontdesk01")
        .await
        .unwrap_err();

    assert!(err.is_domain());
    assert!(!matches!(err, GatewayError::Transport { .. }));
    assert_eq!(err.to_string(), "SEP tidak ditemukan");
}

#[tokio::test]
async fn successful_delete_returns_the_gateway_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/SEP/2.0/delete")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "request": { "noSep": "0301R0110324V000001", "user": "frontdesk01" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "metaData": { "code": "200", "message": "Sukses" } }"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let message = client
        .delete_sep("0301R0110324V000001", "frontdesk01")
        .await
        .unwrap();

    assert_eq!(message, "Sukses");
    mock.assert_async().await;
}

#[tokio::test]
async fn http_failure_is_a_transport_error_with_the_status_code() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/Peserta/0001234567890/tglSEP/2024-03-15")
        .with_status(500)
        .create_async()
        .await;

    let client = client_for(&server);
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let err = client
        .check_eligibility("0001234567890", date)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("500"));
    match err {
        GatewayError::Transport { status, .. } => assert_eq!(status, 500),
        other => panic!("expected transport error, got: {other}"),
    }
}

#[tokio::test]
async fn reference_lookup_selects_the_list_for_the_queried_kind() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/referensi/poli/mata")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "metaData": { "code": "200", "message": "OK" },
                "response": { "poli": [
                    { "kode": "MAT", "nama": "POLI MATA" },
                    { "kode": "MATK", "nama": "POLI MATA KHUSUS" }
                ] }
            }"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let items = client
        .reference_list(ReferenceKind::Polyclinic {
            keyword: "mata".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kode, "MAT");
    mock.assert_async().await;
}
