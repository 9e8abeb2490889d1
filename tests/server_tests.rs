mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use common::fixtures;
use common::pdf_assertions::{GeneratedPdf, files_in};
use common::{RenderMode, StubRenderer, StubTransformer, TestDirs, pipeline_with};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use transform2pdf::server::routes::content_disposition;
use transform2pdf::server::{AppState, build_router};
use transform2pdf_core::{ConversionRequest, Stylesheet};

const BOUNDARY: &str = "----transform2pdf-test-boundary";

fn app(dirs: &TestDirs, transformer: StubTransformer, mode: RenderMode) -> axum::Router {
    let pipeline = pipeline_with(
        Arc::new(transformer),
        Arc::new(StubRenderer::new(mode)),
        &dirs.work(),
    );
    build_router(AppState::new(pipeline, dirs.config()))
}

fn multipart_body(field: &str, file_name: &str, content: &str) -> String {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/xml\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    )
}

fn upload_request(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_upload_returns_pdf_attachment_and_cleans_up() {
    let dirs = TestDirs::new();
    let app = app(&dirs, StubTransformer::new(), RenderMode::Pdf);

    let response = app
        .oneshot(upload_request(
            "/upload",
            multipart_body("file", "R-2024-0042.xml", &fixtures::cii_invoice()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"R-2024-0042.pdf\""
    );

    let pdf = GeneratedPdf::from_bytes(body_bytes(response).await).unwrap();
    assert_eq!(pdf.page_count(), 1);
    assert_eq!(files_in(&dirs.uploads()), 0);
    assert_eq!(files_in(&dirs.work()), 0);
}

#[tokio::test]
async fn test_unrecognized_format_is_400_with_hint() {
    let dirs = TestDirs::new();
    let app = app(&dirs, StubTransformer::new(), RenderMode::Pdf);

    let response = app
        .oneshot(upload_request(
            "/upload",
            multipart_body("file", "catalogue.xml", &fixtures::unsupported_document()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "File format not recognized");
    assert_eq!(
        json["message"],
        "Is it a UBL 2.1 or UN/CEFACT 2016b XML file or PDF you are trying to open?"
    );
    assert_eq!(files_in(&dirs.uploads()), 0);
}

#[tokio::test]
async fn test_transform_failure_is_500_exception_and_cleans_up() {
    let dirs = TestDirs::new();
    let app = app(
        &dirs,
        StubTransformer::failing_on(Stylesheet::XrToHtml),
        RenderMode::Pdf,
    );

    let response = app
        .oneshot(upload_request(
            "/upload",
            multipart_body("file", "order.xml", &fixtures::cii_order()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Exception");
    assert!(json["message"].as_str().unwrap().contains("XTDE0045"));
    assert_eq!(files_in(&dirs.uploads()), 0);
    assert_eq!(files_in(&dirs.work()), 0);
}

#[tokio::test]
async fn test_invalid_renderer_output_is_500_and_cleans_up() {
    let dirs = TestDirs::new();
    let app = app(&dirs, StubTransformer::new(), RenderMode::NotAPdf);

    let response = app
        .oneshot(upload_request(
            "/upload",
            multipart_body("file", "invoice.xml", &fixtures::ubl_invoice()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Exception");
    assert_eq!(files_in(&dirs.uploads()), 0);
    assert_eq!(files_in(&dirs.work()), 0);
}

#[tokio::test]
async fn test_missing_file_field_is_400() {
    let dirs = TestDirs::new();
    let app = app(&dirs, StubTransformer::new(), RenderMode::Pdf);

    let response = app
        .oneshot(upload_request(
            "/upload",
            multipart_body("attachment", "invoice.xml", &fixtures::cii_invoice()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Exception");
    assert!(json["message"].as_str().unwrap().contains("'file'"));
}

#[tokio::test]
async fn test_malformed_xml_is_400_exception() {
    let dirs = TestDirs::new();
    let app = app(&dirs, StubTransformer::new(), RenderMode::Pdf);

    let response = app
        .oneshot(upload_request(
            "/upload",
            multipart_body("file", "broken.xml", "<Invoice><unclosed>"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Exception");
    assert_eq!(files_in(&dirs.uploads()), 0);
}

#[tokio::test]
async fn test_query_overrides() {
    let dirs = TestDirs::new();
    let app = app(&dirs, StubTransformer::new(), RenderMode::Pdf);

    let response = app
        .clone()
        .oneshot(upload_request(
            "/html?lang=en&show_ids=true&dialect=cii",
            multipart_body("file", "order.xml", &fixtures::cii_order()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("Order number"));

    let response = app
        .clone()
        .oneshot(upload_request(
            "/upload?dialect=edifact",
            multipart_body("file", "order.xml", &fixtures::cii_order()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(upload_request(
            "/upload?lang=fr",
            multipart_body("file", "order.xml", &fixtures::cii_order()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(files_in(&dirs.uploads()), 0);
}

#[tokio::test]
async fn test_html_preview() {
    let dirs = TestDirs::new();
    let app = app(&dirs, StubTransformer::new(), RenderMode::Pdf);

    let response = app
        .oneshot(upload_request(
            "/html",
            multipart_body("file", "invoice.xml", &fixtures::cii_invoice()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("Rechnungsnummer"));
    assert!(html.contains("data-order=\"false\""));
}

#[tokio::test]
async fn test_health_and_languages() {
    let dirs = TestDirs::new();
    let app = app(&dirs, StubTransformer::new(), RenderMode::Pdf);

    let response = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["transformer"], "StubTransformer");
    assert_eq!(json["renderer"], "StubRenderer");

    let response = app
        .oneshot(Request::get("/languages").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["default"], "de");
    assert_eq!(json["languages"], serde_json::json!(["de", "en"]));
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let dirs = TestDirs::new();
    let app = app(&dirs, StubTransformer::new(), RenderMode::Pdf);

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/upload")
                .header(header::ORIGIN, "https://portal.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_content_disposition_keeps_non_ascii_name() {
    let dirs = TestDirs::new();
    let pipeline = pipeline_with(
        Arc::new(StubTransformer::new()),
        Arc::new(StubRenderer::new(RenderMode::Pdf)),
        &dirs.work(),
    );

    let conversion = pipeline
        .convert(ConversionRequest::new(fixtures::cii_invoice(), "Rechnung März.xml"))
        .await
        .unwrap();
    assert_eq!(
        content_disposition(&conversion.artifact),
        "attachment; filename=\"Rechnung_M_rz.pdf\"; filename*=UTF-8''Rechnung%20M%C3%A4rz.pdf"
    );

    let conversion = pipeline
        .convert(ConversionRequest::new(fixtures::cii_invoice(), "R-2024-0042.xml"))
        .await
        .unwrap();
    assert_eq!(
        content_disposition(&conversion.artifact),
        "attachment; filename=\"R-2024-0042.pdf\""
    );
}

#[tokio::test]
async fn test_rejected_query_is_json_error() {
    let dirs = TestDirs::new();
    let app = app(&dirs, StubTransformer::new(), RenderMode::Pdf);

    let response = app
        .oneshot(upload_request(
            "/upload?show_ids=yes",
            multipart_body("file", "invoice.xml", &fixtures::cii_invoice()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Exception");
    assert!(json["message"].as_str().unwrap().starts_with("Invalid request"));
}

#[tokio::test]
async fn test_non_multipart_body_is_json_error() {
    let dirs = TestDirs::new();
    let app = app(&dirs, StubTransformer::new(), RenderMode::Pdf);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/html")
                .header(header::CONTENT_TYPE, "application/xml")
                .body(Body::from(fixtures::cii_invoice()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Exception");
    assert!(json["message"].as_str().unwrap().starts_with("Invalid request"));
    assert_eq!(files_in(&dirs.uploads()), 0);
}
