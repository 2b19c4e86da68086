use valtree::xml::{from_entity, XmlEntity};
use valtree::{
    binary_array, entity_builder, int_array, string_array, BinaryValue, Entity, StringParametersMap, Value,
    ValueType,
};
use valtree_pack::codecs::Codecs;
use valtree_pack::json::{JsonReader, JsonWriter};
use valtree_pack::msgpack::{MessagePackReader, MessagePackWriter};
use valtree_pack::xml::XmlWriter;
use valtree_pack::{
    read_json, read_message_pack, read_record, to_tuple, write_json, write_message_pack, write_record,
    write_xml, Charset, CodecConfig, DataFormat, MappingError, UnknownFormatError,
};

fn sample() -> Entity {
    entity_builder()
        .put("name", "a")
        .put("count", 3i64)
        .put("tags", string_array(["x", "y"]))
        .build()
}

#[test]
fn sample_entity_matrix() {
    let value = Value::from(sample());

    assert_eq!(
        write_json(&value).unwrap(),
        r#"{"name":"a","count":3,"tags":["x","y"]}"#
    );

    let xml = write_xml(&from_entity("root", &sample())).unwrap();
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\n\
         <root>\n\t<name>a</name>\n\t<count>3</count>\n\t<tags>\n\t\t<item>x</item>\n\t\t<item>y</item>\n\t</tags>\n</root>"
    );

    let tuple = to_tuple(&value).unwrap();
    let fields = tuple.as_list().unwrap()[1].as_list().unwrap();
    let shape: Vec<(i64, &str)> = fields
        .iter()
        .map(|field| {
            let field = field.as_list().unwrap();
            (field[0].as_int().unwrap(), field[1].as_str().unwrap())
        })
        .collect();
    assert_eq!(
        shape,
        vec![
            (i64::from(ValueType::String.ordinal()), "name"),
            (i64::from(ValueType::Long.ordinal()), "count"),
            (i64::from(ValueType::Array.ordinal()), "tags"),
        ]
    );
}

#[test]
fn sparse_fields_are_omitted() {
    let entity = entity_builder()
        .put("blank", "")
        .put("nested", Entity::empty())
        .put("list", int_array(Vec::new()))
        .put("bytes", BinaryValue::from(Vec::new()))
        .put("zero", 0i64)
        .put("no", false)
        .build();
    let value = Value::from(entity);

    assert_eq!(write_json(&value).unwrap(), r#"{"zero":0,"no":false}"#);
    assert_eq!(
        write_message_pack(&value),
        vec![0x82, 0xa4, b'z', b'e', b'r', b'o', 0x00, 0xa2, b'n', b'o', 0xc2]
    );
    let xml = XmlWriter::new()
        .write_document_body(&from_entity("r", value.as_entity().unwrap()))
        .unwrap();
    assert_eq!(xml, "<r>\n\t<zero>0</zero>\n\t<no>false</no>\n</r>");
}

#[test]
fn emptiness_at_the_top_level() {
    let writer = JsonWriter::new();
    assert_eq!(writer.write(None::<&Value>).unwrap(), "{}");
    assert_eq!(writer.write(&Value::from(Entity::empty())).unwrap(), "{}");
    assert_eq!(writer.write(&Value::from(int_array(Vec::new()))).unwrap(), "[]");
    assert_eq!(writer.write(&Value::from(7i64)).unwrap(), "7");

    let mut msgpack = MessagePackWriter::new();
    assert!(msgpack.write(&Value::from(Entity::empty())).is_empty());
    assert_eq!(msgpack.write(None::<&Value>), vec![0xc0]);
}

#[test]
fn integer_keys_survive_msgpack_but_not_json() {
    let value = Value::from(entity_builder().put(1i32, "a").put(2i64, "b").build());

    assert_eq!(write_json(&value).unwrap(), r#"{"1":"a","2":"b"}"#);
    let from_json = read_json(r#"{"1":"a","2":"b"}"#).unwrap().unwrap();
    assert!(from_json.as_entity().unwrap().has("1"));

    let bytes = write_message_pack(&value);
    assert_eq!(bytes[..2], [0x82, 0x01]);
    let restored = read_message_pack(&bytes).unwrap().unwrap();
    let restored = restored.as_entity().unwrap();
    assert_eq!(restored.get(1i64), Some(Value::from("a")));
    assert_eq!(restored.get(2i64), Some(Value::from("b")));
    assert!(!restored.has("1"));
}

#[test]
fn int_arrays_read_back_as_longs() {
    let value = Value::from(entity_builder().put("v", int_array(vec![1, 2, 3])).build());
    let json = write_json(&value).unwrap();
    assert_eq!(json, r#"{"v":[1,2,3]}"#);
    let restored = read_json(&json).unwrap().unwrap();
    let restored = restored.as_entity().unwrap().get("v").unwrap();
    assert_eq!(restored.as_array().unwrap().longs(), Some(&[1i64, 2, 3][..]));
}

#[test]
fn fragments_splice_into_their_parent() {
    let spliced = XmlEntity::builder()
        .tag("root")
        .child(XmlEntity::fragment([XmlEntity::text("a", "1"), XmlEntity::text("b", "2")]))
        .build();
    let flat = XmlEntity::builder()
        .tag("root")
        .child(XmlEntity::text("a", "1"))
        .child(XmlEntity::text("b", "2"))
        .build();
    assert_eq!(write_xml(&spliced).unwrap(), write_xml(&flat).unwrap());
}

#[test]
fn integer_keys_have_no_xml_form() {
    let value = Value::from(entity_builder().put(1i32, "a").build());
    let mut codecs = Codecs::default();
    assert!(matches!(
        codecs.encode(DataFormat::Xml, &value),
        Err(MappingError::InvalidXmlName(name)) if name == "1"
    ));
}

#[test]
fn binary_values_are_base64_in_text_formats() {
    let value = Value::from(
        entity_builder()
            .put("blob", BinaryValue::from(vec![0xde, 0xad, 0xbe, 0xef]))
            .put("blobs", binary_array([BinaryValue::from(vec![1])]))
            .build(),
    );
    assert_eq!(write_json(&value).unwrap(), r#"{"blob":"3q2+7w==","blobs":["AQ=="]}"#);
    let xml = XmlWriter::new()
        .write_document_body(&from_entity("r", value.as_entity().unwrap()))
        .unwrap();
    assert!(xml.contains("<blob>3q2+7w==</blob>"));
}

#[test]
fn string_parameters_pack_as_string_maps() {
    let parameters: StringParametersMap = [("k", "v")].into_iter().collect();
    let bytes = MessagePackWriter::new().write(&Value::StringParametersMap(parameters.clone()));
    assert_eq!(bytes, vec![0x81, 0xa1, b'k', 0xa1, b'v']);
    assert_eq!(write_json(&Value::StringParametersMap(parameters)).unwrap(), r#"{"k":"v"}"#);
}

#[test]
fn configured_charset_applies_to_bytes() {
    let config = CodecConfig {
        charset: Charset::Utf16Be,
        ..CodecConfig::default()
    };
    let value = Value::from(entity_builder().put("a", "b").build());
    let bytes = JsonWriter::with_config(&config).write_bytes(&value).unwrap();
    assert_eq!(Charset::Utf16Be.decode(&bytes).unwrap(), r#"{"a":"b"}"#);
    let restored = JsonReader::with_config(&config).read(&bytes).unwrap();
    assert_eq!(restored, Some(value));

    let xml = XmlWriter::with_config(&config).write(&XmlEntity::text("a", "1")).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-16BE\"?>"));
}

#[test]
fn config_deserializes_with_defaults() {
    let config: CodecConfig = serde_json::from_str(r#"{"charset":"UTF-16LE","pretty":true}"#).unwrap();
    assert_eq!(config.charset, Charset::Utf16Le);
    assert!(config.pretty);
    assert!(!config.strict_arrays);
    assert_eq!(config.xml_root_tag, "root");
}

#[test]
fn registry_dispatch() {
    let mut codecs = Codecs::new(&CodecConfig::default());
    let value = Value::from(sample());

    let json = codecs.encode(DataFormat::Json, &value).unwrap();
    assert_eq!(json, br#"{"name":"a","count":3,"tags":["x","y"]}"#.to_vec());

    let xml = codecs.encode(DataFormat::Xml, &value).unwrap();
    assert!(String::from_utf8(xml).unwrap().contains("<root>"));

    let packed = codecs.encode(DataFormat::MessagePack, &value).unwrap();
    let restored = codecs.decode(DataFormat::MessagePack, &packed).unwrap().unwrap();
    assert_eq!(restored.as_entity().unwrap().get("count"), Some(Value::from(3i64)));

    let format: DataFormat = "xml".parse().unwrap();
    assert!(matches!(
        codecs.decode(format, b"<a/>"),
        Err(MappingError::UnknownFormat(UnknownFormatError::NoDecoder { format: DataFormat::Xml }))
    ));
    assert!(matches!(
        codecs.encode(format, &Value::from(int_array(vec![1]))),
        Err(MappingError::UnknownFormat(UnknownFormatError::Unsupported {
            value_type: ValueType::Array,
            ..
        }))
    ));
}

#[test]
fn records_round_trip_through_the_tuple_store_form() {
    let value = Value::from(sample());
    let restored = read_record(&write_record(&value).unwrap()).unwrap();
    assert_eq!(restored, value);
}

#[test]
fn malformed_msgpack_is_a_mapping_error() {
    assert!(matches!(read_message_pack(&[0xc1]), Err(MappingError::MsgPack(_))));
    assert_eq!(MessagePackReader::new().read(&[]), Ok(None));
}
