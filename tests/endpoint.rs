use dbpedia_books::{Error, SparqlClient};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn results(bindings: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "head": { "vars": ["book", "title", "authors", "abstract"] },
        "results": { "bindings": bindings }
    })
}

fn literal(value: &str) -> serde_json::Value {
    serde_json::json!({ "type": "literal", "xml:lang": "en", "value": value })
}

async fn client_for(server: &MockServer) -> SparqlClient {
    SparqlClient::new(&format!("{}/sparql", server.uri())).expect("client")
}

#[tokio::test]
async fn test_book_info_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sparql"))
        .and(header("accept", "application/sparql-results+json"))
        .and(body_string_contains("query="))
        .respond_with(ResponseTemplate::new(200).set_body_json(results(serde_json::json!([
            {
                "book": { "type": "uri", "value": "http://dbpedia.org/resource/Good_Omens" },
                "title": literal("Good Omens"),
                "authors": literal("Terry Pratchett & Neil Gaiman & neil gaiman & "),
                "abstract": literal("Good Omens is a 1990 novel.")
            },
            {
                "book": { "type": "uri", "value": "http://dbpedia.org/resource/Dune_(novel)" },
                "title": literal("Dune"),
                "authors": literal("Frank Herbert"),
                "abstract": literal("Dune is a 1965 novel.")
            }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let records = client
        .book_info(&[
            "http://dbpedia.org/resource/Good_Omens".to_string(),
            "http://dbpedia.org/resource/Dune_(novel)".to_string(),
        ])
        .await
        .expect("lookup");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title.as_deref(), Some("Good Omens"));
    assert_eq!(records[0].authors, "Terry Pratchett & Neil Gaiman");
    assert_eq!(records[1].authors, "Frank Herbert");

    let json = serde_json::to_value(&records).unwrap();
    assert_eq!(json[1]["abstract"], "Dune is a 1965 novel.");
}

#[tokio::test]
async fn test_query_is_form_encoded_with_filter() {
    let server = MockServer::start().await;

    // "FILTER (?book IN (<urn:x>))" form-encoded
    Mock::given(method("POST"))
        .and(body_string_contains("FILTER+%28%3Fbook+IN+%28%3Curn%3Ax%3E%29%29"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results(serde_json::json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server)
        .await
        .book_info(&["urn:x".to_string()])
        .await
        .expect("lookup");
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_malformed_row_fails_whole_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results(serde_json::json!([
            { "title": literal("A"), "authors": literal("x") },
            { "title": literal("B") },
            { "title": literal("C"), "authors": literal("z") }
        ]))))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .book_info(&["urn:a".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedBinding { field: "authors", .. }));
}

#[tokio::test]
async fn test_endpoint_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .book_info(&["urn:a".to_string()])
        .await
        .unwrap_err();
    match err {
        Error::Endpoint { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_endpoint_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .book_info(&["urn:a".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(err.is_source_error());
}

#[tokio::test]
async fn test_garbage_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .book_info(&["urn:a".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_http_error() {
    // Port 9 (discard) is not expected to run an HTTP server.
    let client = SparqlClient::new("http://127.0.0.1:9/sparql").unwrap();
    let err = client.book_info(&["urn:a".to_string()]).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}
