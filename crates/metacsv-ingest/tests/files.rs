//! End-to-end tests over real files: metadata sidecar plus data file.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use metacsv_codec::{DecodeOutcome, FieldValue, OnError, ReadError};
use metacsv_ingest::{
    IngestError, ReadOptions, TypedReader, TypedWriter, read_metadata_path, write_metadata,
    write_metadata_path,
};
use metacsv_model::{Document, Verbosity, parse_descriptor};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn sales_document() -> Document {
    let descriptor = |text: &str| parse_descriptor(text).expect("descriptor");
    Document::builder()
        .meta("version", "1.0")
        .encoding(encoding_rs::UTF_16LE)
        .bom(true)
        .delimiter(';')
        .null_value("NA")
        .column(0, descriptor("currency/post/€/decimal/ /,"))
        .column(1, descriptor("datetime/yyyy-MM-dd HH:mm:ssXXX"))
        .column(2, descriptor("boolean/oui/non"))
        .build()
}

fn create_files(dir: &TempDir) -> (PathBuf, PathBuf) {
    let metadata = dir.path().join("sales.metadata.csv");
    let data = dir.path().join("sales.csv");
    let document = sales_document();
    write_metadata_path(&metadata, &document, Verbosity::Minimal).expect("write metadata");

    let mut writer = TypedWriter::create(&data, &document).expect("create data");
    writer
        .write_headers(&["amount", "at", "paid", "note"])
        .expect("headers");
    writer
        .write_values(&[
            FieldValue::Decimal(BigDecimal::from_str("1234.5").expect("decimal")),
            FieldValue::Datetime(
                Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
                    .single()
                    .expect("instant"),
            ),
            FieldValue::Boolean(true),
            FieldValue::from("Zoë"),
        ])
        .expect("first record");
    writer
        .write_values(&[
            FieldValue::Null,
            FieldValue::Null,
            FieldValue::Boolean(false),
            FieldValue::from("a;b"),
        ])
        .expect("second record");
    writer.flush().expect("flush");
    (metadata, data)
}

#[test]
fn metadata_file_snapshot() {
    let mut out = Vec::new();
    write_metadata(&mut out, &sales_document(), Verbosity::Minimal).expect("write");
    let text = String::from_utf8(out).expect("utf-8").replace("\r\n", "\n");
    insta::assert_snapshot!(text, @r#"
    domain,key,value
    meta,version,1.0
    file,encoding,utf-16le
    file,bom,true
    csv,delimiter,;
    data,null_value,NA
    data,col/0/type,"currency/post/€/decimal/ /,"
    data,col/1/type,datetime/yyyy-MM-dd HH:mm:ssXXX
    data,col/2/type,boolean/oui/non
    "#);
}

#[test]
fn utf16_files_round_trip() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let (metadata, data) = create_files(&dir);

    let bytes = fs::read(&data).expect("read data");
    assert!(bytes.starts_with(b"\xFF\xFE"));

    let document = read_metadata_path(&metadata).expect("read metadata");
    assert_eq!(document, sales_document());

    let mut reader =
        TypedReader::from_path(&data, &document, ReadOptions::default()).expect("open data");
    assert_eq!(
        reader.headers().map(<[String]>::to_vec),
        Some(vec![
            "amount".to_string(),
            "at".to_string(),
            "paid".to_string(),
            "note".to_string()
        ])
    );
    let records: Vec<Vec<DecodeOutcome>> = reader.by_ref().collect::<Result<_, _>>().expect("records");
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0][0],
        DecodeOutcome::Value(FieldValue::Decimal(
            BigDecimal::from_str("1234.5").expect("decimal")
        ))
    );
    assert_eq!(
        records[0][1],
        DecodeOutcome::Value(FieldValue::Datetime(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
                .single()
                .expect("instant")
        ))
    );
    assert_eq!(records[0][3], DecodeOutcome::Value(FieldValue::from("Zoë")));
    assert_eq!(
        records[1],
        vec![
            DecodeOutcome::Null,
            DecodeOutcome::Null,
            DecodeOutcome::Value(FieldValue::Boolean(false)),
            DecodeOutcome::Value(FieldValue::from("a;b")),
        ]
    );
}

#[test]
fn canonical_export_of_written_file() {
    let dir = TempDir::new().expect("temp dir");
    let (metadata, data) = create_files(&dir);
    let document = read_metadata_path(&metadata).expect("read metadata");
    let mut reader =
        TypedReader::from_path(&data, &document, ReadOptions::default()).expect("open data");
    assert_eq!(
        reader.read_canonical().expect("first"),
        Some(vec![
            "1234.5".to_string(),
            "2024-03-01T12:30:00Z".to_string(),
            "true".to_string(),
            "Zoë".to_string(),
        ])
    );
    assert_eq!(
        reader.read_canonical().expect("second"),
        Some(vec![
            String::new(),
            String::new(),
            "false".to_string(),
            "a;b".to_string(),
        ])
    );
    assert_eq!(reader.read_canonical().expect("end"), None);
}

#[test]
fn single_byte_encoding_with_policies() {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let metadata = dir.path().join("prices.metadata.csv");
    let data = dir.path().join("prices.csv");
    fs::write(
        &metadata,
        "domain,key,value\n\
         file,encoding,latin1\n\
         data,col/0/type,text\n\
         data,col/1/type,integer/.\n",
    )
    .expect("write metadata");
    fs::write(&data, b"caf\xE9,1.500\nth\xE9,beaucoup\n").expect("write data");

    let document = read_metadata_path(&metadata).expect("read metadata");
    assert_eq!(document.file().encoding, encoding_rs::WINDOWS_1252);

    let options = ReadOptions::new().has_headers(false).on_error(OnError::WrapError);
    let records: Vec<Vec<DecodeOutcome>> = TypedReader::from_path(&data, &document, options)
        .expect("open data")
        .collect::<Result<_, _>>()
        .expect("records");
    assert_eq!(
        records,
        vec![
            vec![
                DecodeOutcome::Value(FieldValue::from("café")),
                DecodeOutcome::Value(FieldValue::Integer(1500)),
            ],
            vec![
                DecodeOutcome::Value(FieldValue::from("thé")),
                DecodeOutcome::Wrapped(ReadError::new("beaucoup", "integer/.")),
            ],
        ]
    );

    let options = ReadOptions::new().has_headers(false);
    let err = TypedReader::from_path(&data, &document, options)
        .expect("open data")
        .nth(1)
        .expect("second record")
        .expect_err("fail policy");
    assert!(matches!(err, IngestError::Field { line: 2, column: 1, .. }));
}

#[test]
fn malformed_utf8_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let data = dir.path().join("broken.csv");
    fs::write(&data, b"ok,caf\xE9\n").expect("write data");
    let options = ReadOptions::new().has_headers(false);
    let mut reader =
        TypedReader::from_path(&data, &Document::default(), options).expect("open data");
    let err = reader.read_record().expect_err("invalid utf-8");
    assert!(matches!(
        err,
        IngestError::Decode {
            line: 1,
            column: 1,
            encoding: "UTF-8"
        }
    ));
}

#[test]
fn missing_metadata_file() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_metadata_path(&dir.path().join("absent.csv")).expect_err("missing file");
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
