use std::collections::BTreeMap;

use recast_marshal::{CustomConverter, CustomDeserializer, MarshalError, Marshaller, Registry};
use recast_record::{
    FieldDef, FieldType, Record, Scalar, ScalarKind, Shape, Union, UnionType, UnionValue,
};
use recast_reflect::Reflect;
use recast_reflect::info::Typed;
use recast_reflect::ops::{DynamicMap, Variant};

#[derive(recast_reflect::derive::Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Pet {
    name: String,
}

fn pet_record(extra: bool) -> Record {
    let mut builder = Shape::builder();
    builder.add_scalar("name", ScalarKind::String).unwrap();
    if extra {
        builder.add_scalar("extra", ScalarKind::Int).unwrap();
    }
    let mut record = Record::new(&builder.build());
    record.put_scalar("name", Scalar::String(String::from("rex"))).unwrap();
    record
}

// -----------------------------------------------------------------------------
// Unknown fields

#[test]
fn unknown_fields_fail_by_default() {
    let registry = Registry::new();
    let err = Marshaller::new(&registry)
        .deserialize_as::<Pet>(&pet_record(true))
        .unwrap_err();
    assert!(matches!(err, MarshalError::MissingAccessor(_)));
}

#[test]
fn unknown_fields_can_be_ignored() {
    let registry = Registry::builder().ignore_unknown_fields(true).build();
    let pet = Marshaller::new(&registry)
        .deserialize_as::<Pet>(&pet_record(true))
        .unwrap();
    assert_eq!(pet.name, "rex");
}

// -----------------------------------------------------------------------------
// Maps

#[test]
fn type_id_key_becomes_the_record_identifier() {
    let registry = Registry::builder().type_id_key("kind").build();
    let marshaller = Marshaller::new(&registry);

    let mut widget = DynamicMap::new();
    widget.insert_value("kind", String::from("Widget"));
    widget.insert_value("size", 3_i32);

    let record = marshaller.serialize(&widget).unwrap();
    assert_eq!(record.id(), Some("Widget"));
    assert_eq!(record.len(), 1);
    assert_eq!(record.get_scalar("size").unwrap(), &Scalar::Int(3));
    assert!(record.shape().field("kind").is_none());

    // The identifier is not put back into the map.
    let back = marshaller.deserialize(&record, None).unwrap();
    let back = back.downcast_ref::<DynamicMap>().unwrap();
    assert_eq!(back.keys().collect::<Vec<_>>(), ["size"]);
}

#[derive(recast_reflect::derive::Reflect, Default)]
#[reflect(default)]
struct Indexed {
    by_id: BTreeMap<i32, String>,
}

#[test]
fn map_keys_must_be_strings() {
    let registry = Registry::new();
    let indexed = Indexed {
        by_id: BTreeMap::from([(1, String::from("one"))]),
    };
    let err = Marshaller::new(&registry).serialize(&indexed).unwrap_err();
    assert!(matches!(err, MarshalError::KeyTypeError(_)));
}

// -----------------------------------------------------------------------------
// Characters

#[derive(recast_reflect::derive::Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Glyph {
    symbol: char,
}

#[test]
fn characters_are_one_character_strings() {
    let registry = Registry::new();
    let marshaller = Marshaller::new(&registry);

    let record = marshaller.serialize(&Glyph { symbol: 'Q' }).unwrap();
    assert_eq!(record.get_scalar("symbol").unwrap(), &Scalar::String(String::from("Q")));
    assert_eq!(marshaller.deserialize_as::<Glyph>(&record).unwrap(), Glyph { symbol: 'Q' });

    let mut record = record;
    record.put_scalar("symbol", Scalar::String(String::from("QR"))).unwrap();
    let err = marshaller.deserialize_as::<Glyph>(&record).unwrap_err();
    assert!(matches!(err, MarshalError::CharacterOverflow(_)));
}

// -----------------------------------------------------------------------------
// Unions

#[derive(recast_reflect::derive::Reflect)]
enum Switch {
    On,
    Off,
}

#[derive(recast_reflect::derive::Reflect)]
struct Panel {
    switch: Switch,
}

#[derive(recast_reflect::derive::Reflect, Default, Debug)]
#[reflect(default)]
struct Slot {
    content: Variant,
}

#[test]
fn regular_unions_are_refused() {
    let registry = Registry::new();
    let marshaller = Marshaller::new(&registry);

    for switch in [Switch::On, Switch::Off] {
        let err = marshaller.serialize(&Panel { switch }).unwrap_err();
        assert!(matches!(err, MarshalError::UnionKindError(_)));
    }

    let members = vec![FieldDef::new("count", FieldType::Scalar(ScalarKind::Int))];
    let mut builder = Shape::builder();
    builder.add_union("content", UnionType::Regular(members.clone())).unwrap();
    let mut record = Record::new(&builder.build());
    let mut union = Union::new(UnionType::Regular(members));
    union.set(UnionValue::Scalar(Scalar::Int(1))).unwrap();
    *record.union_mut("content").unwrap() = union;

    let err = marshaller.deserialize_as::<Slot>(&record).unwrap_err();
    assert!(matches!(err, MarshalError::UnionKindError(_)));
}

#[test]
fn variants_cannot_hold_arrays() {
    let registry = Registry::new();
    let slot = Slot {
        content: Variant::new(vec![1_i32, 2]),
    };
    let err = Marshaller::new(&registry).serialize(&slot).unwrap_err();
    assert!(matches!(err, MarshalError::UnsupportedType(_)));
}

// -----------------------------------------------------------------------------
// Custom conversions

#[derive(recast_reflect::derive::Reflect, Default)]
#[reflect(default)]
struct Money {
    cents: i64,
    currency: String,
}

#[derive(recast_reflect::derive::Reflect, Default)]
#[reflect(default)]
struct Invoice {
    total: Money,
}

/// Stores money as a single formatted string.
struct MoneyAsText;

impl CustomConverter for MoneyAsText {
    fn build_shape(&self, _: &dyn Reflect, _: &Marshaller<'_>) -> Result<Shape, MarshalError> {
        let mut builder = Shape::builder();
        builder.set_id("money");
        builder.add_scalar("text", ScalarKind::String)?;
        Ok(builder.build())
    }

    fn populate(&self, value: &dyn Reflect, record: &mut Record, _: &Marshaller<'_>) -> Result<(), MarshalError> {
        let money = value
            .downcast_ref::<Money>()
            .ok_or_else(|| MarshalError::custom("not money"))?;
        let text = format!("{}.{:02} {}", money.cents / 100, money.cents % 100, money.currency);
        record.put_scalar("text", Scalar::String(text))?;
        Ok(())
    }
}

struct MoneyFromText;

impl CustomDeserializer for MoneyFromText {
    fn deserialize(&self, record: &Record, _: &Marshaller<'_>) -> Result<Box<dyn Reflect>, MarshalError> {
        let text = record
            .get_scalar("text")?
            .as_str()
            .ok_or_else(|| MarshalError::custom("text is not a string"))?;
        let (amount, currency) = text
            .split_once(' ')
            .ok_or_else(|| MarshalError::custom("missing currency"))?;
        let cents = amount.replace('.', "").parse::<i64>().map_err(MarshalError::custom)?;
        Ok(Box::new(Money {
            cents,
            currency: currency.to_owned(),
        }))
    }
}

#[test]
fn custom_converters_replace_the_default_traversal() {
    let registry = Registry::builder()
        .register_converter::<Money>(MoneyAsText)
        .register_deserializer("money", MoneyFromText)
        .build();
    let marshaller = Marshaller::new(&registry);

    let invoice = Invoice {
        total: Money {
            cents: 1250,
            currency: String::from("EUR"),
        },
    };
    let record = marshaller.serialize(&invoice).unwrap();
    let total = record.child("total").unwrap();
    assert_eq!(total.id(), Some("money"));
    assert_eq!(total.get_scalar("text").unwrap(), &Scalar::String(String::from("12.50 EUR")));
    assert!(total.shape().field("cents").is_none());

    let back: Invoice = marshaller.deserialize_as(&record).unwrap();
    assert_eq!(back.total.cents, 1250);
    assert_eq!(back.total.currency, "EUR");
}

#[derive(recast_reflect::derive::Reflect, Default, Debug, Clone, Copy, PartialEq)]
enum Mode {
    #[default]
    Manual,
    Auto,
}

#[derive(recast_reflect::derive::Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Console {
    mode: Mode,
    fallback: Option<Mode>,
    history: Vec<Mode>,
}

/// Stores a mode as its name.
struct ModeAsName;

impl CustomConverter for ModeAsName {
    fn build_shape(&self, _: &dyn Reflect, _: &Marshaller<'_>) -> Result<Shape, MarshalError> {
        let mut builder = Shape::builder();
        builder.set_id("mode");
        builder.add_scalar("name", ScalarKind::String)?;
        Ok(builder.build())
    }

    fn populate(&self, value: &dyn Reflect, record: &mut Record, _: &Marshaller<'_>) -> Result<(), MarshalError> {
        let name = match value.downcast_ref::<Mode>() {
            Some(Mode::Manual) => "manual",
            Some(Mode::Auto) => "auto",
            None => return Err(MarshalError::custom("not a mode")),
        };
        record.put_scalar("name", Scalar::String(name.to_owned()))?;
        Ok(())
    }
}

fn mode_from_name(record: &Record, _: &Marshaller<'_>) -> Result<Box<dyn Reflect>, MarshalError> {
    match record.get_scalar("name")?.as_str() {
        Some("manual") => Ok(Box::new(Mode::Manual)),
        Some("auto") => Ok(Box::new(Mode::Auto)),
        other => Err(MarshalError::custom(format_args!("unknown mode {other:?}"))),
    }
}

#[test]
fn converters_apply_to_fields_of_any_kind() {
    let registry = Registry::builder()
        .register_converter::<Mode>(ModeAsName)
        .register_deserializer("mode", mode_from_name)
        .build();
    let marshaller = Marshaller::new(&registry);

    let console = Console {
        mode: Mode::Auto,
        fallback: Some(Mode::Manual),
        history: vec![Mode::Manual, Mode::Auto, Mode::Auto],
    };
    let record = marshaller.serialize(&console).unwrap();
    let mode = record.child("mode").unwrap();
    assert_eq!(mode.id(), Some("mode"));
    assert_eq!(mode.get_scalar("name").unwrap(), &Scalar::String(String::from("auto")));
    assert_eq!(record.child("fallback").unwrap().id(), Some("mode"));
    assert_eq!(record.array_len("history").unwrap(), 3);

    let back: Console = marshaller.deserialize_as(&record).unwrap();
    assert_eq!(back, console);

    // Without the converter the enum is a regular union again.
    let err = Marshaller::new(&Registry::new()).serialize(&console).unwrap_err();
    assert!(matches!(err, MarshalError::UnionKindError(_)));
}

#[test]
fn custom_deserializers_win_over_explicit_targets() {
    let registry = Registry::builder()
        .register_deserializer("pet", |_: &Record, _: &Marshaller<'_>| -> Result<Box<dyn Reflect>, MarshalError> {
            Ok(Box::new(String::from("replaced")))
        })
        .build();
    let marshaller = Marshaller::new(&registry);

    let mut builder = Shape::builder();
    builder.set_id("pet");
    builder.add_scalar("name", ScalarKind::String).unwrap();
    let record = Record::new(&builder.build());

    let value = marshaller.deserialize(&record, Some(Pet::type_desc())).unwrap();
    assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("replaced"));

    let err = marshaller.deserialize_as::<Pet>(&record).unwrap_err();
    assert!(matches!(err, MarshalError::TypeMismatch(_)));
}

#[test]
fn errors_name_the_failing_field() {
    let registry = Registry::new();
    let mut record = Marshaller::new(&registry)
        .serialize(&Glyph { symbol: 'a' })
        .unwrap();
    record.put_scalar("symbol", Scalar::String(String::new())).unwrap();

    let err = Marshaller::new(&registry)
        .deserialize_as::<Glyph>(&record)
        .unwrap_err();
    let MarshalError::TypeMismatch(msg) = err else {
        panic!("unexpected error: {err}");
    };
    if cfg!(debug_assertions) {
        assert!(msg.ends_with("(at `symbol`)"), "{msg}");
    }
}
