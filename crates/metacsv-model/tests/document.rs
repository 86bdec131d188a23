use metacsv_model::{
    Descriptor, Document, DocumentError, HeaderMode, Verbosity, parse_descriptor, parse_document,
    render_document,
};
use proptest::prelude::*;

fn to_text(rows: &[[String; 3]]) -> String {
    rows.iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_rows(rows: &[[&str; 3]]) -> Result<Document, DocumentError> {
    parse_document(rows.iter().copied(), HeaderMode::Present)
}

#[test]
fn currency_column_and_null_marker() {
    let document = parse_rows(&[
        ["domain", "key", "value"],
        ["data", "col/1/type", "currency/pre/$/decimal/,/."],
        ["data", "null_value", "NULL"],
    ])
    .expect("parse document");

    let column = document.column_type(1).expect("column 1 declared");
    assert_eq!(column.to_string(), "currency/pre/$/decimal/,/.");
    assert_eq!(document.null_value(), "NULL");
    assert_eq!(document.descriptor_or_text(0), Descriptor::Text);
}

#[test]
fn renders_minimal_document() {
    let document = parse_rows(&[
        ["domain", "key", "value"],
        ["meta", "version", "draft0"],
        ["file", "encoding", "UTF-8"],
        ["file", "line_terminator", "\\n"],
        ["csv", "delimiter", ";"],
        ["data", "null_value", "NULL"],
        ["data", "col/2/type", "date/dd\\/MM\\/yyyy"],
        ["data", "col/0/type", "boolean/Y/N"],
        ["data", "col/1/type", "text"],
    ])
    .expect("parse document");

    insta::assert_snapshot!(to_text(&render_document(&document, Verbosity::Minimal)), @r"
    domain,key,value
    meta,version,draft0
    file,line_terminator,\n
    csv,delimiter,;
    data,null_value,NULL
    data,col/0/type,boolean/Y/N
    data,col/2/type,date/dd\/MM\/yyyy
    ");
}

#[test]
fn renders_verbose_document() {
    let document = Document::builder()
        .encoding(encoding_rs::WINDOWS_1252)
        .column(1, Descriptor::Text)
        .build();

    insta::assert_snapshot!(to_text(&render_document(&document, Verbosity::Verbose)), @r#"
    domain,key,value
    file,encoding,windows-1252
    file,bom,false
    file,line_terminator,\r\n
    csv,delimiter,,
    csv,double_quote,true
    csv,escape_char,
    csv,quote_char,"
    csv,skip_initial_space,false
    data,null_value,
    data,col/1/type,text
    "#);
}

#[test]
fn aborts_on_first_bad_row() {
    let err = parse_rows(&[
        ["domain", "key", "value"],
        ["data", "col/0/type", "integer"],
        ["data", "col/1/type", "currency/left/$/integer"],
        ["data", "col/2/type", "money"],
    ])
    .expect_err("invalid position");
    assert_eq!(err.row(), 3);
    assert_eq!(
        err.to_string(),
        "row 3: type 'currency' has invalid symbol position 'left' (expected pre or post)"
    );
}

#[test]
fn header_may_be_omitted() {
    let document = parse_document([["data", "null_value", "-"]], HeaderMode::Absent)
        .expect("parse without header");
    assert_eq!(document.null_value(), "-");
}

fn column_descriptor() -> impl Strategy<Value = Descriptor> {
    prop::sample::select(vec![
        "text",
        "boolean/yes/no",
        "integer/ ",
        "float//,",
        "decimal/./,",
        "date/yyyy-MM-dd",
        "datetime/dd\\/MM\\/yyyy HH:mm/en_GB",
        "currency/post/€/decimal/ /,",
        "percentage/post/%/float",
    ])
    .prop_map(|text| parse_descriptor(text).expect("fixture descriptor"))
}

fn document() -> impl Strategy<Value = Document> {
    (
        prop::option::of("[a-z0-9.]{1,6}"),
        prop::sample::select(vec!["utf-8", "windows-1252", "utf-16le", "iso-8859-1"]),
        any::<bool>(),
        prop::sample::select(vec!["\r\n", "\n", "\r"]),
        prop::sample::select(vec![',', ';', '\t', '|']),
        prop::option::of(prop::sample::select(vec!['\\', '^'])),
        any::<bool>(),
        prop::sample::select(vec!["", "NULL", "N/A", "-"]),
        prop::collection::btree_map(0usize..8, column_descriptor(), 0..5),
    )
        .prop_map(
            |(version, encoding, bom, terminator, delimiter, escape, double_quote, null, columns)| {
                let mut builder = Document::builder()
                    .encoding(
                        encoding_rs::Encoding::for_label(encoding.as_bytes())
                            .expect("fixture encoding"),
                    )
                    .bom(bom)
                    .line_terminator(terminator)
                    .delimiter(delimiter)
                    .escape_char(escape)
                    .double_quote(double_quote)
                    .null_value(null);
                if let Some(version) = version {
                    builder = builder.meta("version", version);
                }
                for (index, descriptor) in columns {
                    builder = builder.column(index, descriptor);
                }
                builder.build()
            },
        )
}

proptest! {
    #[test]
    fn minimal_render_is_idempotent(document in document()) {
        let first = render_document(&document, Verbosity::Minimal);
        let reparsed = parse_document(first.clone(), HeaderMode::Present).expect("reparse");
        let second = render_document(&reparsed, Verbosity::Minimal);
        prop_assert_eq!(second, first);
    }

    #[test]
    fn verbose_render_round_trips(document in document()) {
        let rows = render_document(&document, Verbosity::Verbose);
        let reparsed = parse_document(rows, HeaderMode::Present).expect("reparse");
        prop_assert_eq!(reparsed, document);
    }
}
