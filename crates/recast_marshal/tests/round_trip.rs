use std::collections::{BTreeMap, HashMap, VecDeque};

use recast_marshal::{MarshalError, Marshaller, Registry};
use recast_record::{CHUNK_LEN, FieldKind, Scalar};
use recast_reflect::derive::Reflect;
use recast_reflect::ops::{DynamicList, DynamicMap, Variant};

#[derive(Reflect, Default, Debug, Clone, PartialEq)]
#[reflect(default)]
struct Sample {
    byte: i8,
    short: i16,
    int: i32,
    long: i64,
    float: f32,
    double: f64,
    flag: bool,
    letter: char,
    text: String,
    maybe: Option<i32>,
    nested: Nested,
    ints: Vec<i32>,
    pair: [f64; 2],
    words: VecDeque<String>,
    bits: Box<[bool]>,
    counts: BTreeMap<String, i32>,
    table: HashMap<String, Nested>,
    children: Vec<Nested>,
}

#[derive(Reflect, Default, Debug, Clone, PartialEq)]
#[reflect(default)]
struct Nested {
    #[reflect(rename = "label")]
    name: String,
    weight: Option<f64>,
}

fn nested(name: &str, weight: Option<f64>) -> Nested {
    Nested {
        name: name.to_owned(),
        weight,
    }
}

fn sample() -> Sample {
    Sample {
        byte: -8,
        short: 1600,
        int: -320_000,
        long: 64_000_000_000,
        float: 1.5,
        double: -0.25,
        flag: true,
        letter: 'Z',
        text: String::from("hello"),
        maybe: Some(9),
        nested: nested("inner", Some(2.0)),
        ints: vec![3, 1, 4, 1, 5],
        pair: [0.5, 1.5],
        words: VecDeque::from([String::from("a"), String::from("b")]),
        bits: vec![true, false, true].into_boxed_slice(),
        counts: BTreeMap::from([(String::from("x"), 1), (String::from("y"), 2)]),
        table: HashMap::from([(String::from("only"), nested("t", None))]),
        children: vec![nested("first", Some(1.5)), nested("second", Some(0.0))],
    }
}

#[test]
fn typed_round_trip() {
    let registry = Registry::new();
    let marshaller = Marshaller::new(&registry);

    let original = sample();
    let record = marshaller.serialize(&original).unwrap();
    let back: Sample = marshaller.deserialize_as(&record).unwrap();
    assert_eq!(back, original);
}

#[test]
fn absent_values_are_not_fields() {
    let registry = Registry::new();
    let marshaller = Marshaller::new(&registry);

    let mut value = sample();
    value.maybe = None;
    let record = marshaller.serialize(&value).unwrap();
    assert!(record.shape().field("maybe").is_none());

    let child = record.child("nested").unwrap();
    assert_eq!(child.get_scalar("label").unwrap(), &Scalar::String(String::from("inner")));
    assert_eq!(child.get_scalar("weight").unwrap(), &Scalar::Double(2.0));

    let back: Sample = marshaller.deserialize_as(&record).unwrap();
    assert_eq!(back, value);
}

#[test]
fn field_kinds_follow_the_native_types() {
    let registry = Registry::new();
    let record = Marshaller::new(&registry).serialize(&sample()).unwrap();
    let kind = |name: &str| record.shape().field(name).unwrap().kind();

    assert_eq!(kind("letter"), FieldKind::Scalar);
    assert_eq!(kind("nested"), FieldKind::Record);
    assert_eq!(kind("counts"), FieldKind::Record);
    assert_eq!(kind("ints"), FieldKind::ScalarArray);
    assert_eq!(kind("bits"), FieldKind::ScalarArray);
    assert_eq!(kind("children"), FieldKind::RecordArray);
    assert_eq!(record.get_scalar("letter").unwrap(), &Scalar::String(String::from("Z")));
}

// -----------------------------------------------------------------------------
// Arrays

#[derive(Reflect, Default)]
#[reflect(default)]
struct Fixed {
    values: [i32; 5],
}

#[derive(Reflect, Default)]
#[reflect(default)]
struct Growable {
    values: Vec<i32>,
}

#[derive(Reflect, Default, Debug)]
#[reflect(default)]
struct Short {
    values: [i32; 4],
}

#[test]
fn fixed_arrays_and_sequences_are_interchangeable() {
    let registry = Registry::new();
    let marshaller = Marshaller::new(&registry);

    let record = marshaller.serialize(&Fixed { values: [5, 4, 3, 2, 1] }).unwrap();

    let growable: Growable = marshaller.deserialize_as(&record).unwrap();
    assert_eq!(growable.values, [5, 4, 3, 2, 1]);

    let fixed: Fixed = marshaller.deserialize_as(&record).unwrap();
    assert_eq!(fixed.values, [5, 4, 3, 2, 1]);

    let err = marshaller.deserialize_as::<Short>(&record).unwrap_err();
    assert!(matches!(err, MarshalError::TypeMismatch(_)));
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(default)]
struct Bulk {
    samples: Vec<i64>,
    points: Vec<Nested>,
}

#[test]
fn arrays_longer_than_one_chunk() {
    let registry = Registry::new();
    let marshaller = Marshaller::new(&registry);

    let bulk = Bulk {
        samples: (0..(CHUNK_LEN as i64 * 3 + 11)).collect(),
        points: (0..CHUNK_LEN + 1).map(|i| nested(&i.to_string(), None)).collect(),
    };
    let record = marshaller.serialize(&bulk).unwrap();
    assert_eq!(record.array_len("samples").unwrap(), bulk.samples.len());
    assert_eq!(record.array_len("points").unwrap(), CHUNK_LEN + 1);

    let back: Bulk = marshaller.deserialize_as(&record).unwrap();
    assert_eq!(back, bulk);
}

#[test]
fn record_array_elements_share_one_shape() {
    let registry = Registry::new();
    let marshaller = Marshaller::new(&registry);

    let bulk = Bulk {
        samples: Vec::new(),
        points: vec![nested("light", None), nested("heavy", Some(7.5))],
    };
    let record = marshaller.serialize(&bulk).unwrap();
    let points = record.get_records("points", 0, 2).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].shape(), points[1].shape());
    assert!(points[0].shape().field("weight").is_some());
    assert_eq!(points[0].get_scalar("weight").unwrap(), &Scalar::Double(0.0));

    // A value missing from one element reads back as the declared default.
    let back: Bulk = marshaller.deserialize_as(&record).unwrap();
    assert_eq!(back.points[0].weight, Some(0.0));
    assert_eq!(back.points[1], nested("heavy", Some(7.5)));
}

#[test]
fn record_array_elements_must_agree_on_field_types() {
    let registry = Registry::new();
    let marshaller = Marshaller::new(&registry);

    let mut small = DynamicMap::new();
    small.insert_value("size", 3_i32);
    let mut named = DynamicMap::new();
    named.insert_value("size", String::from("large"));
    let mut items = DynamicList::new();
    items.extend(small);
    items.extend(named);
    let mut holder = DynamicMap::new();
    holder.insert_value("items", items);

    let err = marshaller.serialize(&holder).unwrap_err();
    assert!(matches!(err, MarshalError::TypeMismatch(_)));
}

// -----------------------------------------------------------------------------
// Generic results

#[test]
fn untyped_reads_produce_dynamic_containers() {
    let registry = Registry::new();
    let marshaller = Marshaller::new(&registry);

    let record = marshaller.serialize(&sample()).unwrap();
    let value = marshaller.deserialize(&record, None).unwrap();
    let map = value.downcast_ref::<DynamicMap>().unwrap();

    assert_eq!(map.get_as::<i16>("short"), Some(&1600));
    assert_eq!(map.get_as::<String>("letter").map(String::as_str), Some("Z"));

    let ints = map.get_as::<DynamicList>("ints").unwrap();
    assert_eq!(ints.get_as::<i32>(4), Some(&5));

    let children = map.get_as::<DynamicList>("children").unwrap();
    let second = children.get_as::<DynamicMap>(1).unwrap();
    assert_eq!(second.get_as::<String>("label").map(String::as_str), Some("second"));

    // The generic result serializes to the same record.
    let again = marshaller.serialize(map).unwrap();
    assert_eq!(again, record);
}

#[test]
fn generic_sequences_can_be_switched_off() {
    let registry = Registry::builder().generic_sequences(false).build();
    let marshaller = Marshaller::new(&registry);

    let record = marshaller.serialize(&Growable { values: vec![1] }).unwrap();
    let err = marshaller.deserialize(&record, None).unwrap_err();
    assert!(matches!(err, MarshalError::UnsupportedType(_)));

    assert!(marshaller.deserialize_as::<Growable>(&record).is_ok());
}

// -----------------------------------------------------------------------------
// Variants

#[derive(Reflect, Default, Debug)]
#[reflect(default)]
struct Envelope {
    payload: Variant,
    extras: Vec<Variant>,
}

#[test]
fn variants_round_trip_through_their_held_type() {
    let registry = Registry::builder().register_type::<Nested>("nested").build();
    let marshaller = Marshaller::new(&registry);

    let envelope = Envelope {
        payload: Variant::new(nested("held", Some(1.0))),
        extras: vec![Variant::new(3_i64), Variant::empty(), Variant::new(String::from("s"))],
    };
    let record = marshaller.serialize(&envelope).unwrap();
    assert_eq!(record.shape().field("payload").unwrap().kind(), FieldKind::Union);
    assert_eq!(record.shape().field("extras").unwrap().kind(), FieldKind::UnionArray);

    let back: Envelope = marshaller.deserialize_as(&record).unwrap();
    assert_eq!(back.payload.downcast_ref::<Nested>(), Some(&nested("held", Some(1.0))));
    assert_eq!(back.extras.len(), 3);
    assert_eq!(back.extras[0].downcast_ref::<i64>(), Some(&3));
    assert!(back.extras[1].is_empty());
    assert_eq!(back.extras[2].downcast_ref::<String>().map(String::as_str), Some("s"));
}

#[test]
fn unregistered_variant_records_come_back_as_maps() {
    let registry = Registry::new();
    let marshaller = Marshaller::new(&registry);

    let envelope = Envelope {
        payload: Variant::new(nested("held", None)),
        extras: Vec::new(),
    };
    let record = marshaller.serialize(&envelope).unwrap();
    let back: Envelope = marshaller.deserialize_as(&record).unwrap();

    let map = back.payload.downcast_ref::<DynamicMap>().unwrap();
    assert_eq!(map.get_as::<String>("label").map(String::as_str), Some("held"));
    assert!(!map.contains_key("weight"));
}
