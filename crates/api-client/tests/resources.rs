use api_client::{
    ApiError, AssessmentFields, AudioUpload, CreateNoteBody, HttpClient, ScribeApi, UpdateNoteBody,
    Url,
};
use oasis::ItemCode;
use scribe_types::ResourceId;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(Url::parse(&server.uri()).expect("mock server uri")).expect("client")
}

fn id(value: &str) -> ResourceId {
    ResourceId::parse(value).expect("valid id")
}

#[tokio::test]
async fn fetch_patients_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Patients fetched",
            "patients": [
                { "id": "p1", "name": "John Doe", "patientId": "1234567890" },
                { "id": "p2", "name": "Jane Roe", "patientId": "0987654321" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patients = client_for(&server).fetch_patients().await.unwrap();

    let names: Vec<&str> = patients.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["John Doe", "Jane Roe"]);
    assert_eq!(patients[1].patient_id, "0987654321");
}

#[tokio::test]
async fn fetch_notes_keeps_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Notes fetched",
            "notes": [
                {
                    "id": "n2",
                    "patient": { "id": "p1", "name": "John Doe" },
                    "summary": "Needs help bathing.",
                    "createdAt": "2024-04-22T09:00:00.000Z"
                },
                {
                    "id": "n1",
                    "patient": { "id": "p1", "name": "John Doe" },
                    "summary": "Independent ambulation.",
                    "createdAt": "2024-04-21T09:00:00.000Z"
                }
            ]
        })))
        .mount(&server)
        .await;

    let notes = client_for(&server).fetch_notes().await.unwrap();

    assert_eq!(notes[0].id, id("n2"));
    assert_eq!(notes[1].id, id("n1"));
    assert_eq!(notes[0].patient.name, "John Doe");
}

#[tokio::test]
async fn get_patient_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patient/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Patient not found" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_patient_by_id(&id("missing"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    match err {
        ApiError::Status {
            status, message, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Patient not found");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_without_json_uses_reason_phrase() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_notes().await.unwrap_err();

    assert!(!err.is_not_found());
    assert!(
        matches!(err, ApiError::Status { status: 500, ref message, .. } if message == "Internal Server Error")
    );
}

#[tokio::test]
async fn null_resource_is_missing_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/note/n1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "ok", "note": null })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).get_note_by_id(&id("n1")).await.unwrap_err();

    assert!(matches!(err, ApiError::MissingField { field: "note" }));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn get_note_returns_editable_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/note/n1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Note fetched",
            "note": {
                "id": "n1",
                "transcription": "The patient requires assistance with grooming.",
                "summary": "Patient requires assistance with bathing and dressing.",
                "m1800": "2", "m1810": "2", "m1820": "1", "m1830": "3",
                "m1840": "0", "m1850": "0", "m1860": "0",
                "patientId": "p1",
                "createdAt": "2024-04-21T10:30:00.000Z"
            }
        })))
        .mount(&server)
        .await;

    let note = client_for(&server).get_note_by_id(&id("n1")).await.unwrap();

    assert_eq!(note.patient_id, id("p1"));
    assert_eq!(note.assessment.get(ItemCode::M1830), "3");
    assert_eq!(
        note.summary,
        "Patient requires assistance with bathing and dressing."
    );
}

#[tokio::test]
async fn create_note_sends_multipart_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/note"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"patientId\""))
        .and(body_string_contains("p1"))
        .and(body_string_contains("name=\"audio\"; filename=\"visit.mp3\""))
        .and(body_string_contains("Content-Type: audio/mpeg"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Note created",
            "note": { "id": "n9" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_note(CreateNoteBody {
            patient_id: id("p1"),
            audio: AudioUpload {
                file_name: "visit.mp3".into(),
                media_type: "audio/mpeg".into(),
                bytes: b"ID3\x03\x00fake".to_vec(),
            },
        })
        .await
        .unwrap();

    assert_eq!(created.id, id("n9"));
}

#[tokio::test]
async fn update_note_puts_all_nine_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/note/n1"))
        .and(body_json(json!({
            "transcription": "Edited transcription",
            "summary": "Edited summary",
            "m1800": "0", "m1810": "1", "m1820": "2", "m1830": "3",
            "m1840": "4", "m1850": "5", "m1860": "6"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Note updated",
            "note": { "id": "n1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut assessment = AssessmentFields::default();
    for (score, code) in ItemCode::ALL.into_iter().enumerate() {
        assessment.set(code, score.to_string());
    }

    let updated = client_for(&server)
        .update_note(
            &id("n1"),
            &UpdateNoteBody {
                transcription: "Edited transcription".into(),
                summary: "Edited summary".into(),
                assessment,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, id("n1"));
}

#[tokio::test]
async fn base_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "ok", "notes": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let base = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let notes = HttpClient::new(base).unwrap().fetch_notes().await.unwrap();

    assert!(notes.is_empty());
}

fn upload() -> CreateNoteBody {
    CreateNoteBody {
        patient_id: id("p1"),
        audio: AudioUpload {
            file_name: "visit.mp3".into(),
            media_type: "audio/mpeg".into(),
            bytes: b"ID3\x03\x00fake".to_vec(),
        },
    }
}

#[tokio::test]
async fn create_note_rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/note"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Patient does not exist" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).create_note(upload()).await.unwrap_err();

    assert!(!err.is_not_found());
    match err {
        ApiError::Status {
            method,
            path,
            status,
            message,
        } => {
            assert_eq!(method, "POST");
            assert_eq!(path, "/note");
            assert_eq!(status, 422);
            assert_eq!(message, "Patient does not exist");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_note_without_note_in_envelope_is_missing_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/note"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "message": "Note created" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).create_note(upload()).await.unwrap_err();

    assert!(matches!(err, ApiError::MissingField { field: "note" }));
}

#[tokio::test]
async fn update_note_server_error_is_status() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/note/n1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .update_note(&id("n1"), &UpdateNoteBody::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Status { status: 500, ref method, .. } if method == "PUT"
    ));
}
