//! Turtle format implementation

use super::{ParseError, ParseResult, SerializeError, SerializeResult};
use crate::rdf::{BlankNode, Graph, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use oxrdf::vocab::xsd;
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_turtle::{TurtleFormatter, TurtleParser};
use std::io::{BufReader, Cursor};

/// Turtle parser
pub struct TurtleParserWrapper;

impl TurtleParserWrapper {
    /// Parse a Turtle string into a graph
    pub fn parse(input: &str) -> ParseResult<Graph> {
        let cursor = Cursor::new(input);
        let mut reader = BufReader::new(cursor);
        let mut parser = TurtleParser::new(&mut reader, None);

        let mut graph = Graph::new();

        let res: Result<(), rio_turtle::TurtleError> = parser.parse_all(&mut |t| {
            let subject = convert_subject(t.subject).map_err(invalid_data)?;
            let predicate = convert_predicate(t.predicate).map_err(invalid_data)?;
            let object = convert_object(t.object).map_err(invalid_data)?;

            graph.insert(Triple::new(subject, predicate, object));
            Ok(())
        });

        match res {
            Ok(_) => Ok(graph),
            Err(e) => Err(ParseError::Parse(e.to_string())),
        }
    }
}

/// Turtle serializer
pub struct TurtleSerializerWrapper;

impl TurtleSerializerWrapper {
    /// Serialize a graph to a Turtle string
    pub fn serialize(graph: &Graph) -> SerializeResult<String> {
        let mut output = Vec::new();
        let mut formatter = TurtleFormatter::new(&mut output);

        for triple in graph.iter() {
            let subject = match &triple.subject {
                RdfSubject::NamedNode(n) => {
                    rio_api::model::Subject::NamedNode(rio_api::model::NamedNode { iri: n.as_str() })
                }
                RdfSubject::BlankNode(b) => {
                    rio_api::model::Subject::BlankNode(rio_api::model::BlankNode { id: b.as_str() })
                }
            };

            let predicate = rio_api::model::NamedNode {
                iri: triple.predicate.as_str(),
            };

            let datatype;
            let object = match &triple.object {
                RdfObject::NamedNode(n) => {
                    rio_api::model::Term::NamedNode(rio_api::model::NamedNode { iri: n.as_str() })
                }
                RdfObject::BlankNode(b) => {
                    rio_api::model::Term::BlankNode(rio_api::model::BlankNode { id: b.as_str() })
                }
                RdfObject::Literal(l) => {
                    if let Some(lang) = l.language() {
                        rio_api::model::Term::Literal(rio_api::model::Literal::LanguageTaggedString {
                            value: l.value(),
                            language: lang,
                        })
                    } else {
                        datatype = l.datatype();
                        if datatype.as_str() == xsd::STRING.as_str() {
                            rio_api::model::Term::Literal(rio_api::model::Literal::Simple {
                                value: l.value(),
                            })
                        } else {
                            rio_api::model::Term::Literal(rio_api::model::Literal::Typed {
                                value: l.value(),
                                datatype: rio_api::model::NamedNode {
                                    iri: datatype.as_str(),
                                },
                            })
                        }
                    }
                }
            };

            let rio_triple = rio_api::model::Triple {
                subject,
                predicate,
                object,
            };

            formatter
                .format(&rio_triple)
                .map_err(|e| SerializeError::Serialize(e.to_string()))?;
        }

        formatter
            .finish()
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;

        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }
}

fn invalid_data(e: ParseError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
}

fn convert_subject(s: rio_api::model::Subject) -> Result<RdfSubject, ParseError> {
    match s {
        rio_api::model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(
            BlankNode::from_str(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        _ => Err(ParseError::Parse("Unsupported subject type".to_string())),
    }
}

fn convert_predicate(p: rio_api::model::NamedNode) -> Result<RdfPredicate, ParseError> {
    RdfPredicate::new(p.iri).map_err(|e| ParseError::Parse(e.to_string()))
}

fn convert_object(o: rio_api::model::Term) -> Result<RdfObject, ParseError> {
    match o {
        rio_api::model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(
            NamedNode::new(n.iri).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(
            BlankNode::from_str(b.id).map_err(|e| ParseError::Parse(e.to_string()))?,
        )),
        rio_api::model::Term::Literal(l) => match l {
            rio_api::model::Literal::Simple { value } => {
                Ok(RdfObject::Literal(Literal::new_simple_literal(value)))
            }
            rio_api::model::Literal::LanguageTaggedString { value, language } => {
                Ok(RdfObject::Literal(
                    Literal::new_language_tagged_literal(value, language)
                        .map_err(|e| ParseError::Parse(e.to_string()))?,
                ))
            }
            rio_api::model::Literal::Typed { value, datatype } => {
                let dt = NamedNode::new(datatype.iri).map_err(|e| ParseError::Parse(e.to_string()))?;
                Ok(RdfObject::Literal(Literal::new_typed_literal(value, dt)))
            }
        },
        _ => Err(ParseError::Parse("Unsupported object type".to_string())),
    }
}
