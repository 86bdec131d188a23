//! Descriptor grammar tests: parse/render round trips and canonical text.

use metacsv_model::{
    Affixed, CurrencyAmount, DateFormat, DatePattern, DecimalFormat, Descriptor, DescriptorError,
    IntegerFormat, Locale, PercentageAmount, SymbolPosition, parse_descriptor, render_descriptor,
};
use proptest::prelude::*;

fn separator() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", ",", ".", " ", "'", "/", "\\", "_"]).prop_map(String::from)
}

fn word() -> impl Strategy<Value = String> {
    "[A-Za-z/\\\\]{1,5}"
}

fn decimal_format() -> impl Strategy<Value = DecimalFormat> {
    (separator(), separator())
        .prop_map(|(thousands, decimal)| DecimalFormat::new(thousands, decimal))
        .prop_filter("grouping distinct from the decimal mark", |format| {
            format.thousands_separator != format.effective_decimal_separator()
        })
}

fn integer_format() -> impl Strategy<Value = IntegerFormat> {
    separator().prop_map(|thousands_separator| IntegerFormat {
        thousands_separator,
    })
}

fn date_format() -> impl Strategy<Value = DateFormat> {
    let patterns = prop::sample::select(vec![
        "yyyy-MM-dd",
        "dd/MM/yyyy",
        "yyyy-MM-dd'T'HH:mm:ss",
        "d MMM yyyy HH:mm:ss.SSS Z",
        "MM/yyyy",
        "yyyy",
        "HH:mm",
        "hh:mm a",
    ]);
    let locales = prop::sample::select(vec!["", "en", "fr_FR", "pt_BR", "es_419"]);
    (patterns, locales).prop_map(|(pattern, locale)| DateFormat {
        pattern: DatePattern::compile(pattern).expect("fixture pattern"),
        locale: (!locale.is_empty()).then(|| locale.parse::<Locale>().expect("fixture locale")),
    })
}

fn position() -> impl Strategy<Value = SymbolPosition> {
    prop_oneof![Just(SymbolPosition::Pre), Just(SymbolPosition::Post)]
}

fn descriptor() -> impl Strategy<Value = Descriptor> {
    prop_oneof![
        Just(Descriptor::Text),
        (word(), prop_oneof![Just(String::new()), word()])
            .prop_map(|(t, f)| Descriptor::boolean(t, f)),
        integer_format().prop_map(Descriptor::Integer),
        decimal_format().prop_map(Descriptor::Float),
        decimal_format().prop_map(Descriptor::Decimal),
        date_format().prop_map(Descriptor::Date),
        date_format().prop_map(Descriptor::Datetime),
        (
            position(),
            word(),
            prop_oneof![
                integer_format().prop_map(CurrencyAmount::Integer),
                decimal_format().prop_map(CurrencyAmount::Decimal),
            ]
        )
            .prop_map(|(position, symbol, number)| Descriptor::Currency(Affixed {
                position,
                symbol,
                number,
            })),
        (
            position(),
            word(),
            prop_oneof![
                decimal_format().prop_map(PercentageAmount::Float),
                decimal_format().prop_map(PercentageAmount::Decimal),
            ]
        )
            .prop_map(|(position, symbol, number)| Descriptor::Percentage(Affixed {
                position,
                symbol,
                number,
            })),
        prop::collection::vec("[a-z/\\\\]{0,3}", 0..4).prop_map(Descriptor::Object),
    ]
}

proptest! {
    #[test]
    fn render_then_parse_is_identity(descriptor in descriptor()) {
        let text = render_descriptor(&descriptor);
        let parsed = parse_descriptor(&text);
        prop_assert_eq!(parsed, Ok(descriptor));
    }

    #[test]
    fn rendering_is_stable(descriptor in descriptor()) {
        let text = render_descriptor(&descriptor);
        let again = parse_descriptor(&text).map(|d| render_descriptor(&d));
        prop_assert_eq!(again, Ok(text));
    }
}

#[test]
fn canonical_texts_are_preserved() {
    for text in [
        "text",
        "object",
        "object/anything/goes",
        "boolean/true/false",
        "boolean/T",
        "integer",
        "integer/ ",
        "float/,/.",
        "float//,",
        "decimal/ /,",
        "date/yyyy-MM-dd",
        r"date/dd\/MM\/yyyy/fr_FR",
        "datetime/yyyy-MM-dd'T'HH:mm:ssXXX",
        "currency/pre/$/decimal/,/.",
        "currency/post/€/integer/ ",
        "percentage/post/%/float/,/.",
        "percentage/pre/%/decimal",
    ] {
        let descriptor = parse_descriptor(text).unwrap_or_else(|err| panic!("{text}: {err}"));
        assert_eq!(render_descriptor(&descriptor), text);
    }
}

#[test]
fn explicit_empty_tokens_select_no_separator() {
    let descriptor = parse_descriptor("decimal//,").expect("parse");
    assert_eq!(descriptor, Descriptor::Decimal(DecimalFormat::new("", ",")));
    let descriptor = parse_descriptor("currency/post/€/integer/").expect("parse");
    assert_eq!(render_descriptor(&descriptor), "currency/post/€/integer");
}

#[test]
fn errors_name_the_offending_tag() {
    let err = parse_descriptor("percentage/post/%/float/,/./x").expect_err("too many");
    assert_eq!(
        err,
        DescriptorError::Arity {
            tag: "float",
            expected: "0..=2",
            actual: 3,
        }
    );
    assert_eq!(
        err.to_string(),
        "type 'float' expects 0..=2 parameter(s), got 3"
    );
}

#[test]
fn grouping_must_not_overlap_decimal_mark() {
    for text in [
        "decimal/.",
        "float/,/,",
        "float/./",
        "currency/pre/$/decimal/,/,",
        "percentage/post/%/float/.",
    ] {
        assert!(
            matches!(
                parse_descriptor(text),
                Err(DescriptorError::SeparatorClash { .. })
            ),
            "{text} should be rejected"
        );
    }
    assert_eq!(
        parse_descriptor("decimal/.").expect_err("clash").to_string(),
        "type 'decimal' has thousands separator '.' overlapping decimal separator '.'"
    );
    assert!(parse_descriptor("decimal/./,").is_ok());
    assert!(parse_descriptor("float/,").is_ok());
}
