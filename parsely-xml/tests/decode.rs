//! End-to-end decoding into dynamic values.

use indoc::indoc;
use parsely_xml::{
    DeserializeOptions, ErrorKind, FieldDef, RootPolicy, ScalarType, SequencePolicy, Shape, Value,
    decode, decode_with_options,
};

fn field<'a>(value: &'a Value, name: &str) -> &'a Value {
    value
        .as_object()
        .and_then(|o| o.get(name))
        .unwrap_or_else(|| panic!("no field {name} in {value:?}"))
}

fn text<'a>(value: &'a Value, name: &str) -> &'a str {
    field(value, name).as_str().unwrap()
}

fn user_shape() -> Shape {
    Shape::new("User")
        .field(FieldDef::scalar("userId", ScalarType::String))
        .field(FieldDef::scalar("age", ScalarType::I64))
        .field(FieldDef::scalar("isActive", ScalarType::Bool))
}

#[test]
fn flat_user() {
    parsely_testhelpers::setup();

    let xml = "<user><userId>user123</userId><age>25</age><isActive>true</isActive></user>";
    let value = decode(xml, &user_shape()).unwrap();
    assert_eq!(text(&value, "userId"), "user123");
    assert_eq!(field(&value, "age"), &Value::I64(25));
    assert_eq!(field(&value, "isActive"), &Value::Bool(true));
}

#[test]
fn repeated_tags_decode_in_order() {
    parsely_testhelpers::setup();

    let shape = Shape::new("Tags").field(FieldDef::sequence("tag", ScalarType::String));
    let value = decode("<tags><tag>a</tag><tag>b</tag><tag>c</tag></tags>", &shape).unwrap();
    assert_eq!(
        field(&value, "tag"),
        &Value::from(vec!["a".to_string(), "b".to_string(), "c".to_string()])
    );
}

#[test]
fn nested_customer() {
    parsely_testhelpers::setup();

    let address = Shape::new("Address").field(FieldDef::scalar("city", ScalarType::String));
    let shape = Shape::new("Customer")
        .field(FieldDef::scalar("name", ScalarType::String))
        .field(FieldDef::object("address", address));

    let xml = "<customer><name>Kim</name><address><city>Seoul</city></address></customer>";
    let value = decode(xml, &shape).unwrap();
    assert_eq!(text(&value, "name"), "Kim");
    assert_eq!(text(field(&value, "address"), "city"), "Seoul");
}

#[test]
fn whitespace_around_text_is_ignored() {
    parsely_testhelpers::setup();

    let xml = indoc! {"
        <user>
            <userId>  user_with_spaces  </userId>
            <age>
                25
            </age>
            <isActive>\ttrue </isActive>
        </user>
    "};
    let value = decode(xml, &user_shape()).unwrap();
    assert_eq!(text(&value, "userId"), "user_with_spaces");
    assert_eq!(field(&value, "age"), &Value::I64(25));
    assert_eq!(field(&value, "isActive"), &Value::Bool(true));
}

#[test]
fn inner_whitespace_is_kept() {
    parsely_testhelpers::setup();

    let shape = Shape::new("Product").field(FieldDef::scalar("name", ScalarType::String));
    let value = decode("<product><name>  iPhone 17   PRO </name></product>", &shape).unwrap();
    assert_eq!(text(&value, "name"), "iPhone 17   PRO");
}

#[test]
fn boolean_literals() {
    parsely_testhelpers::setup();

    let shape = Shape::new("Flag").field(FieldDef::scalar("on", ScalarType::Bool));
    let cases = [
        ("true", true),
        ("TRUE", true),
        ("1", true),
        ("yes", true),
        ("Y", true),
        ("false", false),
        ("False", false),
        ("0", false),
        ("NO", false),
        ("n", false),
    ];
    for (literal, expected) in cases {
        let xml = format!("<flag><on>{literal}</on></flag>");
        let value = decode(&xml, &shape).unwrap();
        assert_eq!(field(&value, "on"), &Value::Bool(expected), "literal {literal:?}");
    }

    for literal in ["2", "on", "truee", "nope"] {
        let xml = format!("<flag><on>{literal}</on></flag>");
        let err = decode(&xml, &shape).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch, "literal {literal:?}");
    }
}

#[test]
fn numeric_kinds() {
    parsely_testhelpers::setup();

    let shape = Shape::new("Numbers")
        .field(FieldDef::scalar("small", ScalarType::I8))
        .field(FieldDef::scalar("count", ScalarType::U32))
        .field(FieldDef::scalar("delta", ScalarType::I64))
        .field(FieldDef::scalar("ratio", ScalarType::F32))
        .field(FieldDef::scalar("price", ScalarType::F64));
    let xml = indoc! {"
        <numbers>
            <small>-128</small>
            <count>+42</count>
            <delta>-9000000000</delta>
            <ratio>0.5</ratio>
            <price>1.2e6</price>
        </numbers>
    "};
    let value = decode(xml, &shape).unwrap();
    assert_eq!(field(&value, "small"), &Value::I8(-128));
    assert_eq!(field(&value, "count"), &Value::U32(42));
    assert_eq!(field(&value, "delta"), &Value::I64(-9_000_000_000));
    assert_eq!(field(&value, "ratio"), &Value::F32(0.5));
    assert_eq!(field(&value, "price"), &Value::F64(1_200_000.0));
}

#[test]
fn product_with_unicode_text() {
    parsely_testhelpers::setup();

    let shape = Shape::new("Product")
        .field(FieldDef::scalar("id", ScalarType::I64))
        .field(FieldDef::scalar("name", ScalarType::String))
        .field(FieldDef::scalar("price", ScalarType::F64))
        .field(FieldDef::scalar("inStock", ScalarType::Bool))
        .field(FieldDef::scalar("description", ScalarType::String));
    let xml = indoc! {"
        <product>
            <id>12345</id>
            <name>iPhone 17 PRO</name>
            <price>1200000.99</price>
            <inStock>true</inStock>
            <description>최신 아이폰</description>
        </product>
    "};

    let value = decode(xml, &shape).unwrap();
    assert_eq!(field(&value, "id"), &Value::I64(12345));
    let price = field(&value, "price").as_f64().unwrap();
    assert!((price - 1_200_000.99).abs() < 0.01);
    assert_eq!(text(&value, "description"), "최신 아이폰");
}

#[test]
fn references_and_cdata_are_text() {
    parsely_testhelpers::setup();

    let shape = Shape::new("Note")
        .field(FieldDef::scalar("title", ScalarType::String))
        .field(FieldDef::scalar("body", ScalarType::String));
    let xml = "<note><title>Ben &amp; Jerry&#39;s</title><body><![CDATA[<b>bold</b>]]></body></note>";
    let value = decode(xml, &shape).unwrap();
    assert_eq!(text(&value, "title"), "Ben & Jerry's");
    assert_eq!(text(&value, "body"), "<b>bold</b>");
}

#[test]
fn comments_and_declaration_are_skipped() {
    parsely_testhelpers::setup();

    let xml = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!-- generated -->
        <user>
            <userId>u<!-- split -->1</userId>
            <age>7</age>
            <isActive>n</isActive>
        </user>
    "#};
    let value = decode(xml, &user_shape()).unwrap();
    assert_eq!(text(&value, "userId"), "u1");
}

#[test]
fn optional_fields() {
    parsely_testhelpers::setup();

    let shape = user_shape()
        .field(FieldDef::scalar("email", ScalarType::String).optional())
        .field(FieldDef::scalar("nickname", ScalarType::String).optional());
    let xml = indoc! {"
        <user>
            <userId>u</userId>
            <age>1</age>
            <isActive>yes</isActive>
            <nickname>kim</nickname>
            <email>   </email>
        </user>
    "};
    let value = decode(xml, &shape).unwrap();
    assert_eq!(field(&value, "email"), &Value::Null);
    assert_eq!(text(&value, "nickname"), "kim");
}

#[test]
fn unknown_elements_are_ignored() {
    parsely_testhelpers::setup();

    let xml = "<user><extra><deep>1</deep></extra><userId>u</userId><age>3</age><isActive>0</isActive></user>";
    let value = decode(xml, &user_shape()).unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["userId", "age", "isActive"]);
}

#[test]
fn library_of_books() {
    parsely_testhelpers::setup();

    let book = Shape::new("BookItem")
        .field(FieldDef::scalar("title", ScalarType::String))
        .field(FieldDef::scalar("author", ScalarType::String))
        .field(FieldDef::scalar("isbn", ScalarType::String));
    let shape = Shape::new("Library")
        .field(FieldDef::scalar("name", ScalarType::String))
        .field(FieldDef::object(
            "bookList",
            Shape::new("BookList").field(FieldDef::sequence("books", book)),
        ));
    let xml = indoc! {"
        <library>
            <name>Central Library</name>
            <bookList>
                <books>
                    <title>Programming Rust</title>
                    <author>Blandy</author>
                    <isbn>978-1492052593</isbn>
                </books>
                <books>
                    <title>Rust Atomics and Locks</title>
                    <author>Bos</author>
                    <isbn>978-1098119447</isbn>
                </books>
                <books>
                    <title>Zero To Production</title>
                    <author>Palmieri</author>
                    <isbn>978-3000000000</isbn>
                </books>
            </bookList>
        </library>
    "};

    let value = decode(xml, &shape).unwrap();
    assert_eq!(text(&value, "name"), "Central Library");
    let books = field(field(&value, "bookList"), "books").as_array().unwrap();
    assert_eq!(books.len(), 3);
    assert_eq!(text(&books[0], "author"), "Blandy");
    assert_eq!(text(&books[2], "title"), "Zero To Production");
}

#[test]
fn single_occurrence_policies() {
    parsely_testhelpers::setup();

    let shape = Shape::new("Tags").field(FieldDef::sequence("tag", ScalarType::String));
    let xml = "<tags><tag>only</tag></tags>";

    let value = decode(xml, &shape).unwrap();
    assert_eq!(field(&value, "tag"), &Value::Array(vec![Value::from("only")]));

    let strict = DeserializeOptions::new().sequence_policy(SequencePolicy::Strict);
    let err = decode_with_options(xml, &shape, &strict).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("tags.tag"));
}

#[test]
fn wrapper_named_after_root() {
    parsely_testhelpers::setup();

    let shape = Shape::new("UserDTO").field(FieldDef::object("user", user_shape()));
    let xml = "<user><userId>u</userId><age>30</age><isActive>false</isActive></user>";

    let value = decode(xml, &shape).unwrap();
    assert_eq!(field(field(&value, "user"), "age"), &Value::I64(30));

    // forcing the other interpretation looks for <user> inside <user>
    let unwrapped = DeserializeOptions::new().root_policy(RootPolicy::Unwrapped);
    let err = decode_with_options(xml, &shape, &unwrapped).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
    assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("user.user"));
}

#[test]
fn child_named_like_root() {
    parsely_testhelpers::setup();

    let shape = Shape::new("Item")
        .field(FieldDef::scalar("item", ScalarType::String))
        .field(FieldDef::scalar("price", ScalarType::I64));
    let value = decode("<item><item>pen</item><price>3</price></item>", &shape).unwrap();
    assert_eq!(text(&value, "item"), "pen");
    assert_eq!(field(&value, "price"), &Value::I64(3));
}

#[test]
fn self_closing_elements_are_empty() {
    parsely_testhelpers::setup();

    let shape = Shape::new("Item")
        .field(FieldDef::scalar("id", ScalarType::U64))
        .field(FieldDef::scalar("note", ScalarType::String).optional());
    let value = decode("<item><id>9</id><note/></item>", &shape).unwrap();
    assert_eq!(field(&value, "note"), &Value::Null);
}
