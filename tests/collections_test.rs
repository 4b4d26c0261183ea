use indexmap::IndexMap;
use samyama_mapper::mapper::{MappingError, Property, RdfMapper, Schema, Value, ValueType};
use samyama_mapper::rdf::{vocab, Graph, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Playlist {
    songs: Vec<String>,
    tags: Vec<String>,
    ratings: Vec<i32>,
}

fn playlist_schema(songs_as_list: bool) -> Schema {
    let songs = Property::new("songs", ValueType::list_of(ValueType::String));
    let songs = if songs_as_list { songs.list() } else { songs };

    Schema::builder::<Playlist>()
        .property(
            songs,
            |p: &Playlist| p.songs.clone().into(),
            |p: &mut Playlist, v| {
                p.songs = v.into_vec()?;
                Ok(())
            },
        )
        .property(
            Property::new("tags", ValueType::set_of(ValueType::String)),
            |p: &Playlist| p.tags.clone().into(),
            |p: &mut Playlist, v| {
                p.tags = v.into_vec()?;
                Ok(())
            },
        )
        .property(
            Property::new("ratings", ValueType::sorted_set_of(ValueType::Int)),
            |p: &Playlist| p.ratings.clone().into(),
            |p: &mut Playlist, v| {
                p.ratings = v.into_vec()?;
                Ok(())
            },
        )
        .build()
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Team {
    roles: IndexMap<String, String>,
}

fn team_schema() -> Schema {
    Schema::builder::<Team>()
        .property(
            Property::new("roles", ValueType::map_of(ValueType::String, ValueType::String)),
            |t: &Team| t.roles.clone().into(),
            |t: &mut Team, v| {
                t.roles = v.into_pairs::<String, String>()?.into_iter().collect();
                Ok(())
            },
        )
        .build()
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Profile {
    name: String,
}

fn profile_schema() -> Schema {
    Schema::builder::<Profile>()
        .property(
            Property::new("name", ValueType::String),
            |p: &Profile| p.name.clone().into(),
            |p: &mut Profile, v| {
                p.name = v.try_into()?;
                Ok(())
            },
        )
        .build()
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Track {
    title: String,
}

fn track_schema() -> Schema {
    Schema::builder::<Track>()
        .rdfs_class("urn:Track")
        .property(
            Property::new("title", ValueType::String).identity(),
            |t: &Track| t.title.clone().into(),
            |t: &mut Track, v| {
                t.title = v.try_into()?;
                Ok(())
            },
        )
        .build()
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Album {
    tracks: Vec<Track>,
}

fn album_schema() -> Schema {
    Schema::builder::<Album>()
        .property(
            Property::new("tracks", ValueType::list_of(ValueType::object::<Track>())).list(),
            |a: &Album| Value::Collection(a.tracks.iter().cloned().map(Value::object).collect()),
            |a: &mut Album, v| {
                a.tracks = v.into_entities()?;
                Ok(())
            },
        )
        .build()
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Office {
    seating: Vec<(Profile, String)>,
    occupants: Vec<(String, Profile)>,
}

fn map_entries(value: Value) -> Result<Vec<(Value, Value)>, MappingError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Map(entries) => Ok(entries),
        other => Err(MappingError::UnsupportedValue(other.type_name().to_string())),
    }
}

fn office_schema() -> Schema {
    Schema::builder::<Office>()
        .property(
            Property::new(
                "seating",
                ValueType::map_of(ValueType::object::<Profile>(), ValueType::String),
            ),
            |o: &Office| {
                Value::Map(
                    o.seating
                        .iter()
                        .map(|(who, desk)| (Value::object(who.clone()), Value::from(desk.as_str())))
                        .collect(),
                )
            },
            |o: &mut Office, v| {
                o.seating = map_entries(v)?
                    .into_iter()
                    .map(|(k, v)| -> Result<(Profile, String), MappingError> {
                        Ok((k.into_entity()?, v.try_into()?))
                    })
                    .collect::<Result<_, _>>()?;
                Ok(())
            },
        )
        .property(
            Property::new("occupants", ValueType::map_of(ValueType::String, ValueType::Any)),
            |o: &Office| {
                Value::Map(
                    o.occupants
                        .iter()
                        .map(|(room, who)| (Value::from(room.as_str()), Value::object(who.clone())))
                        .collect(),
                )
            },
            |o: &mut Office, v| {
                o.occupants = map_entries(v)?
                    .into_iter()
                    .map(|(k, v)| -> Result<(String, Profile), MappingError> {
                        Ok((k.try_into()?, v.into_entity()?))
                    })
                    .collect::<Result<_, _>>()?;
                Ok(())
            },
        )
        .build()
}

fn typed_profile_schema() -> Schema {
    Schema::builder::<Profile>()
        .rdfs_class("urn:Profile")
        .property(
            Property::new("name", ValueType::String).identity(),
            |p: &Profile| p.name.clone().into(),
            |p: &mut Profile, v| {
                p.name = v.try_into()?;
                Ok(())
            },
        )
        .build()
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Layers {
    layers: Vec<IndexMap<String, String>>,
}

fn layers_schema() -> Schema {
    Schema::builder::<Layers>()
        .property(
            Property::new(
                "layers",
                ValueType::list_of(ValueType::map_of(ValueType::String, ValueType::String)),
            ),
            |l: &Layers| Value::Collection(l.layers.iter().cloned().map(Value::from).collect()),
            |_: &mut Layers, _| Ok(()),
        )
        .build()
}

fn count(graph: &Graph, predicate: &RdfPredicate) -> usize {
    graph.iter().filter(|t| &t.predicate == predicate).count()
}

fn predicate(name: &str) -> RdfPredicate {
    RdfPredicate::new(&format!("{}{}", vocab::DEFAULT_NAMESPACE, name)).unwrap()
}

#[test]
fn test_list_encoding() {
    init_tracing();
    let mapper = RdfMapper::with_schemas([playlist_schema(true)]).unwrap();

    let mut playlist = Playlist {
        songs: vec!["b-side".to_string(), "a-side".to_string()],
        ..Playlist::default()
    };

    let mut graph = Graph::new();
    let id = mapper.encode_into(&mut playlist, &mut graph).unwrap();

    assert_eq!(count(&graph, &vocab::rdf_first()), 2);
    assert_eq!(count(&graph, &vocab::rdf_rest()), 2);
    assert_eq!(count(&graph, &predicate("songs")), 1);

    let nil: RdfSubject = vocab::rdf_nil().into();
    let ends_in_nil = graph
        .iter()
        .any(|t| t.predicate == vocab::rdf_rest() && t.object.as_subject() == Some(nil.clone()));
    assert!(ends_in_nil);

    let decoded: Playlist = mapper.decode_node(&graph, &id).unwrap();
    assert_eq!(decoded.songs, playlist.songs);
}

#[test]
fn test_lists_option() {
    let mapper = RdfMapper::builder()
        .schema(playlist_schema(false))
        .serialize_collections_as_lists(true)
        .build()
        .unwrap();

    let mut playlist = Playlist {
        tags: vec!["jazz".to_string(), "live".to_string()],
        ..Playlist::default()
    };
    let graph = mapper.encode(&mut playlist).unwrap();

    assert_eq!(count(&graph, &predicate("tags")), 1);
    assert_eq!(count(&graph, &vocab::rdf_first()), 2);
}

#[test]
fn test_multi_assertion_encoding() {
    let mapper = RdfMapper::with_schemas([playlist_schema(false)]).unwrap();

    let mut playlist = Playlist {
        songs: vec!["one".to_string(), "two".to_string()],
        ..Playlist::default()
    };
    let graph = mapper.encode(&mut playlist).unwrap();

    assert_eq!(count(&graph, &predicate("songs")), 2);
    assert_eq!(count(&graph, &vocab::rdf_first()), 0);
    assert_eq!(graph.subjects().len(), 1);

    let mut decoded: Playlist = mapper.decode(&graph).unwrap();
    decoded.songs.sort();
    assert_eq!(decoded.songs, vec!["one".to_string(), "two".to_string()]);
}

#[test]
fn test_empty_collections_are_skipped() {
    let mapper = RdfMapper::with_schemas([playlist_schema(true)]).unwrap();

    let mut playlist = Playlist::default();
    let graph = mapper.encode(&mut playlist).unwrap();
    assert!(graph.is_empty());
}

#[test]
fn test_mixed_list_and_plain_values() {
    let mapper = RdfMapper::with_schemas([playlist_schema(false)]).unwrap();
    let subject = NamedNode::new("urn:mix").unwrap();

    let mut graph = Graph::new();
    let head = graph.add_list(vec![
        Literal::new_simple_literal("a").into(),
        Literal::new_simple_literal("b").into(),
    ]);
    graph.add(subject.clone(), predicate("songs"), head);
    graph.add(subject.clone(), predicate("songs"), Literal::new_simple_literal("c"));

    let decoded: Playlist = mapper.decode_node(&graph, &subject.into()).unwrap();
    assert_eq!(decoded.songs, vec!["a", "b", "c"]);
}

#[test]
fn test_set_semantics() {
    let mapper = RdfMapper::with_schemas([playlist_schema(false)]).unwrap();
    let subject = NamedNode::new("urn:sets").unwrap();

    let mut graph = Graph::new();
    for rating in [5, 3, 4] {
        graph.add(
            subject.clone(),
            predicate("ratings"),
            Literal::new_typed_literal(rating.to_string(), NamedNode::from(oxrdf::vocab::xsd::INT)),
        );
    }
    let head = graph.add_list(vec![
        Literal::new_simple_literal("rock").into(),
        Literal::new_simple_literal("rock").into(),
    ]);
    graph.add(subject.clone(), predicate("tags"), head);

    let decoded: Playlist = mapper.decode_node(&graph, &subject.into()).unwrap();
    assert_eq!(decoded.ratings, vec![3, 4, 5]);
    assert_eq!(decoded.tags, vec!["rock"]);
}

#[test]
fn test_map_encoding() {
    let mapper = RdfMapper::with_schemas([team_schema()]).unwrap();

    let mut roles = IndexMap::new();
    roles.insert("bob".to_string(), "tester".to_string());
    let mut team = Team { roles };

    let mut graph = Graph::new();
    let id = mapper.encode_into(&mut team, &mut graph).unwrap();

    assert_eq!(count(&graph, &predicate("roles")), 1);
    assert_eq!(count(&graph, &predicate("_entry")), 1);
    assert_eq!(count(&graph, &predicate("_key")), 1);
    assert_eq!(count(&graph, &predicate("_value")), 1);
    assert_eq!(graph.len(), 4);

    let entry = graph
        .iter()
        .find(|t| t.predicate == predicate("_key"))
        .map(|t| t.subject.clone())
        .unwrap();
    assert!(entry.is_blank_node());
    assert_eq!(
        graph.object(&entry, &predicate("_value")).and_then(|o| o.as_literal()).map(|l| l.value()),
        Some("tester")
    );

    let decoded: Team = mapper.decode_node(&graph, &id).unwrap();
    assert_eq!(decoded, team);

    // an empty map writes nothing
    let mut empty = Team::default();
    assert!(mapper.encode(&mut empty).unwrap().is_empty());
}

#[test]
fn test_incomplete_map_entries_are_skipped() {
    let mapper = RdfMapper::with_schemas([team_schema()]).unwrap();

    let mut roles = IndexMap::new();
    roles.insert("bob".to_string(), "tester".to_string());
    roles.insert("eve".to_string(), "auditor".to_string());
    let mut team = Team { roles };

    let mut graph = Graph::new();
    let id = mapper.encode_into(&mut team, &mut graph).unwrap();

    // drop eve's value
    let trimmed: Graph = graph
        .iter()
        .filter(|t| {
            !(t.predicate == predicate("_value")
                && t.object.as_literal().map(|l| l.value()) == Some("auditor"))
        })
        .cloned()
        .collect();

    let decoded: Team = mapper.decode_node(&trimmed, &id).unwrap();
    assert_eq!(decoded.roles.len(), 1);
    assert_eq!(decoded.roles.get("bob").map(String::as_str), Some("tester"));
}

#[test]
fn test_cardinality_violation() {
    let subject = NamedNode::new("urn:twice").unwrap();
    let mut graph = Graph::new();
    graph.add(subject.clone(), predicate("name"), Literal::new_simple_literal("first"));
    graph.add(subject.clone(), predicate("name"), Literal::new_simple_literal("second"));

    let strict = RdfMapper::with_schemas([profile_schema()]).unwrap();
    let err = strict.decode::<Profile>(&graph).unwrap_err();
    assert_eq!(
        err,
        MappingError::CardinalityViolation {
            property: "name".to_string(),
            count: 2,
        }
    );

    let lenient = RdfMapper::builder()
        .schema(profile_schema())
        .ignore_cardinality_violations(true)
        .build()
        .unwrap();
    let profile: Profile = lenient.decode(&graph).unwrap();
    assert_eq!(profile.name, "first");
}

#[test]
fn test_map_cardinality() {
    let subject = NamedNode::new("urn:team").unwrap();
    let mut graph = Graph::new();
    for _ in 0..2 {
        let map = samyama_mapper::rdf::BlankNode::new();
        graph.add(subject.clone(), predicate("roles"), map);
    }

    let strict = RdfMapper::with_schemas([team_schema()]).unwrap();
    assert!(matches!(
        strict.decode_node::<Team>(&graph, &subject.clone().into()),
        Err(MappingError::CardinalityViolation { .. })
    ));

    let lenient = RdfMapper::builder()
        .schema(team_schema())
        .ignore_cardinality_violations(true)
        .build()
        .unwrap();
    let team: Team = lenient.decode_node(&graph, &subject.into()).unwrap();
    assert!(team.roles.is_empty());
}

#[test]
fn test_collection_values() {
    // a lone scalar converts to a single element collection
    let values: Vec<String> = Value::from("solo").into_vec().unwrap();
    assert_eq!(values, vec!["solo".to_string()]);
}

#[test]
fn test_list_of_objects() {
    let mapper = RdfMapper::with_schemas([album_schema(), track_schema()]).unwrap();

    let titles = ["Intro", "Anthem", "Coda"];
    let mut album = Album {
        tracks: titles
            .iter()
            .map(|t| Track {
                title: t.to_string(),
            })
            .collect(),
    };

    let mut graph = Graph::new();
    let id = mapper.encode_into(&mut album, &mut graph).unwrap();
    assert_eq!(count(&graph, &vocab::rdf_first()), 3);
    assert_eq!(count(&graph, &predicate("title")), 3);

    // every element is a typed track node with its own triples merged in
    let head = graph
        .object(&id, &predicate("tracks"))
        .and_then(|o| o.as_subject())
        .unwrap();
    let items = graph.list_items(&head);
    assert_eq!(items.len(), 3);
    for (item, title) in items.iter().zip(titles) {
        let node = item.as_subject().unwrap();
        assert_eq!(graph.types_of(&node), vec![NamedNode::new("urn:Track").unwrap()]);
        assert_eq!(
            graph.object(&node, &predicate("title")),
            Some(&RdfObject::from(Literal::new_simple_literal(title)))
        );
    }

    let decoded: Album = mapper.decode_node(&graph, &id).unwrap();
    assert_eq!(decoded, album);
}

#[test]
fn test_maps_with_object_keys_and_values() {
    let mapper = RdfMapper::with_schemas([office_schema(), typed_profile_schema()]).unwrap();

    let ada = Profile {
        name: "Ada".to_string(),
    };
    let alan = Profile {
        name: "Alan".to_string(),
    };
    let mut office = Office {
        seating: vec![
            (ada, "desk 1".to_string()),
            (alan.clone(), "desk 2".to_string()),
        ],
        occupants: vec![("lab".to_string(), alan)],
    };

    let mut graph = Graph::new();
    let id = mapper.encode_into(&mut office, &mut graph).unwrap();
    assert_eq!(count(&graph, &predicate("_entry")), 3);

    // key and value objects are written as typed nodes
    let profiles = graph
        .iter()
        .filter(|t| {
            t.predicate == vocab::rdf_type()
                && t.object == RdfObject::from(NamedNode::new("urn:Profile").unwrap())
        })
        .count();
    assert_eq!(profiles, 2);

    let decoded: Office = mapper.decode_node(&graph, &id).unwrap();
    assert_eq!(decoded, office);
}

#[test]
fn test_collection_of_maps_is_rejected() {
    let mapper = RdfMapper::with_schemas([layers_schema()]).unwrap();

    let mut layer = IndexMap::new();
    layer.insert("k".to_string(), "v".to_string());
    let mut layers = Layers {
        layers: vec![layer],
    };

    assert!(matches!(
        mapper.encode(&mut layers),
        Err(MappingError::UnsupportedValue(_))
    ));
}
