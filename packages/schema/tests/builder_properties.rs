//! Builder properties over a spread of outlines

use drafter_schema::{DocumentBuilder, Node, NodeKind, Outline, Schema, SectionData};

fn outlines() -> Vec<Outline> {
    vec![
        Outline::default(),
        Outline {
            sections: vec![SectionData::default()],
        },
        Outline {
            sections: vec![
                SectionData::new("", vec![]),
                SectionData::new("Scope", vec!["We will build X.".into()]),
                SectionData::new("Terms", vec!["".into(), "Net 30.".into(), "".into()]),
            ],
        },
        Outline {
            sections: (0..20)
                .map(|i| SectionData::new(format!("Section {}", i), vec![format!("Body {}", i); i % 3]))
                .collect(),
        },
    ]
}

#[test]
fn test_every_built_document_is_schema_valid() {
    for outline in outlines() {
        let doc = DocumentBuilder::new("props").build_document(&outline);

        assert!(Schema::check(&doc).is_ok(), "invalid document for {:?}", outline);
        assert!(doc.child_count() >= 1);

        for section in doc.children() {
            assert_eq!(section.child(0).unwrap().kind(), NodeKind::Heading);
            assert!(section.child_count() >= 2);
            assert!(section.child(0).unwrap().runs().iter().all(|r| r.marks.is_empty()));
        }
    }
}

#[test]
fn test_section_count_matches_outline() {
    for outline in outlines() {
        let doc = DocumentBuilder::new("props").build_document(&outline);
        assert_eq!(doc.child_count(), outline.sections.len().max(1));
    }
}

#[test]
fn test_extract_then_rebuild_is_idempotent() {
    let mut builder = DocumentBuilder::new("round-trip");

    for outline in outlines() {
        for data in &outline.sections {
            let built = builder.build_section(data);
            let extracted = SectionData::from_section(&built).unwrap();
            let rebuilt = builder.build_section(&extracted);

            assert_eq!(rebuilt.text_content(), built.text_content());
            assert_eq!(rebuilt.child_count(), built.child_count());
            assert_eq!(SectionData::from_section(&rebuilt).unwrap(), extracted);
        }
    }
}

#[test]
fn test_nda_outline_end_to_end() {
    let json = r#"{"sections":[{"title":"Confidentiality","content":["Both parties agree..."]}]}"#;
    let outline: Outline = serde_json::from_str(json).unwrap();
    let doc = DocumentBuilder::new("Draft a 1-page NDA").build_document(&outline);

    assert_eq!(doc.child_count(), 1);
    let section = doc.child(0).unwrap();
    assert_eq!(section.child(0).unwrap().text_content(), "Confidentiality");
    assert_eq!(section.child_count(), 2);
    assert_eq!(section.child(1).unwrap().text_content(), "Both parties agree...");
}

#[test]
fn test_document_json_round_trip_stays_valid() {
    let doc = DocumentBuilder::new("json").build_document(&outlines()[2]);
    let json = serde_json::to_string(&doc).unwrap();
    let back: Node = serde_json::from_str(&json).unwrap();

    assert_eq!(back, doc);
    assert!(Schema::check(&back).is_ok());
}
