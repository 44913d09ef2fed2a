use std::fs;
use std::time::Duration;

use kiwa::error::SourceError;
use kiwa::source::{load_proposal, load_table, open_source, FsSource};
use tempfile::tempdir;

const TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::test]
async fn loads_proposal_and_patches_year() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("propuesta.json");
    fs::write(
        &path,
        r#"{
            "meta": {"titulo": "Propuesta 2025", "periodo": {"inicio": "2025-02", "fin": "2025-11", "meses": 10}},
            "aplicativos": [{"nombre": "Asistencia", "seccion": "Seguimiento"}],
            "anexos": {"tsv_horario_url": "horario.tsv"}
        }"#,
    )
    .unwrap();

    let src = FsSource::new(&path);
    let p = load_proposal(&src, Some(2026)).await.unwrap();
    assert_eq!(p.meta.titulo, "Propuesta 2026");
    assert_eq!(p.aplicativos.len(), 1);
    assert_eq!(p.tsv_url(), Some("horario.tsv"));

    let p = load_proposal(&src, None).await.unwrap();
    assert_eq!(p.meta.titulo, "Propuesta 2025");
}

#[tokio::test]
async fn loads_tsv_from_file_url() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("horario.tsv");
    fs::write(&path, "Centro\tDía\r\nKiwa Bosa\tLunes\r\nKiwa Suba\r\n").unwrap();

    let location = format!("file://{}", path.display());
    let src = open_source(&location, TIMEOUT).unwrap();
    let table = load_table(src.as_ref()).await.unwrap();
    assert_eq!(table.headers, vec!["Centro", "Día"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[1].cells(), ["Kiwa Suba".to_string()]);
}

#[tokio::test]
async fn leading_bom_is_not_part_of_the_first_header() {
    let tmp = tempdir().unwrap();
    let tsv = tmp.path().join("horario.tsv");
    fs::write(&tsv, "\u{feff}Centro\tDía\nKiwa Bosa\tLunes\n").unwrap();
    let table = load_table(&FsSource::new(&tsv)).await.unwrap();
    assert_eq!(table.headers[0], "Centro");
    assert_eq!(table.column_index("Centro"), Some(0));

    let json = tmp.path().join("propuesta.json");
    fs::write(&json, "\u{feff}{\"aplicativos\": [{\"nombre\": \"Drive\"}]}").unwrap();
    let p = load_proposal(&FsSource::new(&json), None).await.unwrap();
    assert_eq!(p.aplicativos[0].name, "Drive");
}

#[tokio::test]
async fn empty_tsv_is_empty_table_not_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("vacio.tsv");
    fs::write(&path, "\r\n\r\n").unwrap();

    let table = load_table(&FsSource::new(&path)).await.unwrap();
    assert!(table.is_empty());
}

#[tokio::test]
async fn missing_file_is_unavailable() {
    let tmp = tempdir().unwrap();
    let src = FsSource::new(tmp.path().join("nope.json"));
    let err = load_proposal(&src, None).await.unwrap_err();
    assert!(matches!(err, SourceError::Unavailable { .. }), "{err:?}");
    assert!(err.location().ends_with("nope.json"));
}

#[tokio::test]
async fn malformed_json_is_invalid_document() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("roto.json");
    fs::write(&path, "{ not json").unwrap();

    let err = load_proposal(&FsSource::new(&path), None).await.unwrap_err();
    assert!(matches!(err, SourceError::InvalidDocument { .. }), "{err:?}");
}

#[tokio::test]
async fn unreachable_http_is_unavailable() {
    // nothing listens on port 9 of the loopback interface
    let src = open_source("http://127.0.0.1:9/horario.tsv", TIMEOUT).unwrap();
    let err = load_table(src.as_ref()).await.unwrap_err();
    assert!(matches!(err, SourceError::Unavailable { .. }), "{err:?}");
}
